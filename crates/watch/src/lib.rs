//! TGVmax availability watcher.
//!
//! This crate provides:
//! - Upstream record types for the SNCF TGVmax open-data API
//! - A fetch client with a transient/fatal error split
//! - Fuzzy station-name resolution against the canonical station list
//! - Match evaluation and alert deduplication across poll cycles
//! - The polling loop that drives fetch, evaluation and notification

pub mod client;
pub mod records;
pub mod stations;
pub mod tracker;
pub mod watcher;
pub mod window;

// Re-export main types
pub use client::{AvailabilityClient, FetchError, TravelQuery};
pub use records::TrainRecord;
pub use stations::StationDirectory;
pub use tracker::TrainTracker;
pub use watcher::{CycleReport, Watcher};
pub use window::TimeWindow;
