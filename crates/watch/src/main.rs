//! TGVmax watch CLI - poll availability and alert on discounted seats.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use notify::channels::email::{ENV_SMTP_PASSWORD, ENV_SMTP_USERNAME};
use notify::channels::sms::{ENV_SMS_PASS, ENV_SMS_USER};
use notify::{EmailChannel, Notifier, NotifyChannel, SmsChannel};
use tgvmax_watch::client::{AvailabilityClient, TravelQuery, API_BASE_URL};
use tgvmax_watch::stations::StationDirectory;
use tgvmax_watch::watcher::{Watcher, DEFAULT_INTERVAL_SECS};
use tgvmax_watch::window::TimeWindow;

/// Notification channels selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum AlertKind {
    Sms,
    Email,
}

/// Watch TGVmax availability for one trip and alert when a discounted seat
/// appears.
#[derive(Parser)]
#[command(name = "tgvmax-watch")]
#[command(about = "Poll TGVmax availability and alert on discounted seats")]
#[command(version)]
struct Cli {
    /// Travel date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Departure-hour window, e.g. 11:18 to watch 11h00 through 18h59
    #[arg(long, value_name = "HH:HH")]
    time_range: TimeWindow,

    /// Origin station (free text, resolved against the canonical list)
    #[arg(long)]
    origin: String,

    /// Destination station (free text, resolved against the canonical list)
    #[arg(long)]
    destination: String,

    /// Notification channels (console output is always on)
    #[arg(long, value_enum, value_delimiter = ',')]
    alert: Vec<AlertKind>,

    /// Seconds between poll cycles
    #[arg(long, default_value_t = DEFAULT_INTERVAL_SECS)]
    interval: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("tgvmax_watch=debug,notify=debug,info")
    } else {
        EnvFilter::new("tgvmax_watch=info,notify=info,warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let stations = StationDirectory::fetch(API_BASE_URL)
        .await
        .context("failed to download the station list")?;
    let origin = stations.resolve(&cli.origin)?.to_string();
    let destination = stations.resolve(&cli.destination)?.to_string();

    let notifier = build_notifier(&cli.alert)?;
    tracing::debug!(channels = notifier.channel_count(), "notifier ready");

    let query = TravelQuery {
        origin: origin.clone(),
        destination: destination.clone(),
        date: cli.date,
    };
    let client = AvailabilityClient::new(&query)?;

    println!(
        "Searching for a train from {} to {} on {} between {}h and {}h",
        origin,
        destination,
        cli.date,
        cli.time_range.start(),
        cli.time_range.end()
    );

    let watcher = Watcher::new(
        client,
        cli.time_range,
        notifier,
        Duration::from_secs(cli.interval),
    );
    watcher.run().await?;

    Ok(())
}

/// Build the notifier for the selected channels, refusing to start when a
/// requested channel has no credentials.
fn build_notifier(kinds: &[AlertKind]) -> Result<Notifier> {
    let mut channels: Vec<Arc<dyn NotifyChannel>> = Vec::new();

    if kinds.contains(&AlertKind::Sms) {
        let sms = SmsChannel::from_env();
        ensure!(
            sms.enabled(),
            "SMS alerts requested but {ENV_SMS_USER}/{ENV_SMS_PASS} are not set"
        );
        channels.push(Arc::new(sms));
    }

    if kinds.contains(&AlertKind::Email) {
        let email = EmailChannel::from_env();
        ensure!(
            email.enabled(),
            "email alerts requested but {ENV_SMTP_USERNAME}/{ENV_SMTP_PASSWORD} are not set"
        );
        channels.push(Arc::new(email));
    }

    if channels.is_empty() {
        return Ok(Notifier::disabled());
    }
    Ok(Notifier::with_channels(channels))
}
