//! Match evaluation and alert deduplication across poll cycles.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::records::TrainRecord;
use crate::window::TimeWindow;

/// Whether a record is bookable under the discount and departs inside the
/// window. A malformed departure time disqualifies the single record, never
/// the batch.
fn qualifies(record: &TrainRecord, window: TimeWindow) -> bool {
    if !record.discount_eligible() {
        return false;
    }
    match record.departure_hour() {
        Some(hour) => window.contains(hour),
        None => {
            warn!(
                train_no = %record.train_no,
                departure = %record.departure,
                "skipping record with malformed departure time"
            );
            false
        }
    }
}

/// Filter a record set down to the discounted departures inside `window`,
/// preserving input order.
#[must_use]
pub fn matching<'a>(records: &'a [TrainRecord], window: TimeWindow) -> Vec<&'a TrainRecord> {
    records
        .iter()
        .filter(|record| qualifies(record, window))
        .collect()
}

/// Tracks which trains have already triggered an alert in this run.
///
/// State per train number cycles `Unseen -> Alerted -> Unseen`: a train
/// enters the set the moment it first qualifies, and leaves it when a later
/// poll reports it without the discount flag, so a seat that reopens can
/// alert a second time. The set lives for the process only.
pub struct TrainTracker {
    window: TimeWindow,
    alerted: HashSet<String>,
}

impl TrainTracker {
    /// Create a tracker with an empty seen set.
    #[must_use]
    pub fn new(window: TimeWindow) -> Self {
        Self {
            window,
            alerted: HashSet::new(),
        }
    }

    /// Apply one poll's full record set and return the trains to alert on,
    /// in input order.
    ///
    /// Records outside the window are ignored entirely; they never enter
    /// the seen set.
    pub fn process<'a>(&mut self, records: &'a [TrainRecord]) -> Vec<&'a TrainRecord> {
        let mut fresh = Vec::new();

        for record in records {
            if !record.discount_eligible() {
                if self.alerted.remove(&record.train_no) {
                    info!(
                        train_no = %record.train_no,
                        "discount gone, train will re-alert if it comes back"
                    );
                }
                continue;
            }

            if !qualifies(record, self.window) {
                continue;
            }

            if self.alerted.insert(record.train_no.clone()) {
                fresh.push(record);
            }
        }

        fresh
    }

    /// Number of trains currently in the alerted state.
    #[must_use]
    pub fn alerted_count(&self) -> usize {
        self.alerted.len()
    }
}
