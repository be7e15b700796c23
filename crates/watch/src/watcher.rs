//! The polling loop: fetch, evaluate, notify, wait.

use std::time::Duration;

use colored::Colorize;
use notify::{Notifier, TrainAlert};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::client::{AvailabilityClient, FetchError};
use crate::tracker::TrainTracker;
use crate::window::TimeWindow;

/// Default wait between poll cycles.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Result of a single poll cycle.
#[derive(Debug, Default)]
pub struct CycleReport {
    /// Number of records fetched.
    pub fetched: usize,
    /// Number of newly qualifying trains alerted this cycle.
    pub notified: usize,
}

/// Drives the poll cycle on a fixed interval until killed.
///
/// The loop owns the seen set and the query exclusively; one cycle
/// completes fully before the next begins, so cycles can never race on the
/// tracker state.
pub struct Watcher {
    client: AvailabilityClient,
    tracker: TrainTracker,
    notifier: Notifier,
    interval: Duration,
}

impl Watcher {
    /// Create a watcher over a fixed query and window.
    #[must_use]
    pub fn new(
        client: AvailabilityClient,
        window: TimeWindow,
        notifier: Notifier,
        interval: Duration,
    ) -> Self {
        Self {
            client,
            tracker: TrainTracker::new(window),
            notifier,
            interval,
        }
    }

    /// Run one fetch-evaluate-notify cycle.
    ///
    /// Delivery failures are handled inside the notifier and never affect
    /// the seen set: a train alerted with a failed SMS stays alerted.
    pub async fn cycle(&mut self) -> Result<CycleReport, FetchError> {
        let records = self.client.fetch().await?;
        let fresh = self.tracker.process(&records);

        for record in &fresh {
            let alert = TrainAlert::from(*record);
            println!("{}", alert.message().green().bold());
            let delivered = self.notifier.dispatch(&alert).await;
            debug!(train_no = %record.train_no, delivered, "alert dispatched");
        }

        debug!(tracked = self.tracker.alerted_count(), "cycle complete");

        Ok(CycleReport {
            fetched: records.len(),
            notified: fresh.len(),
        })
    }

    /// Poll forever: the loop keeps running after an alert so a seat that
    /// reopens later can alert again.
    ///
    /// Returns on a fatal fetch error or on Ctrl-C; transient fetch errors
    /// only skip the cycle. The interval wait is unconditional after both
    /// success and transient-failure cycles.
    pub async fn run(mut self) -> Result<(), FetchError> {
        loop {
            let outcome = tokio::select! {
                outcome = self.cycle() => outcome,
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, shutting down");
                    return Ok(());
                }
            };

            match outcome {
                Ok(report) if report.notified == 0 => {
                    println!(
                        "No discounted train available yet ({} records checked)",
                        report.fetched
                    );
                }
                Ok(report) => {
                    println!(
                        "{}",
                        format!("Found {} new discounted train(s)!", report.notified)
                            .green()
                            .bold()
                    );
                }
                Err(err) if err.is_transient() => {
                    warn!(error = %err, "fetch failed, retrying after the poll interval");
                }
                Err(err) => return Err(err),
            }

            tokio::select! {
                () = sleep(self.interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, shutting down");
                    return Ok(());
                }
            }
        }
    }
}
