//! Single-server queueing process simulation.
//!
//! Generates stochastic arrival and departure event timelines and tracks
//! queue occupancy over time, under two service regimes: unconstrained
//! parallel service ([`simulate_nowait`]) and FIFO single-server service
//! with blocking ([`simulate_queue`]).

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::default_trait_access)]

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

mod samples;
pub use samples::{SampleConfig, SampleGenerator, Samples};

mod departure;
pub use departure::{nowait_departures, queue_departures};

mod timeline;
pub use timeline::{Event, EventKind, Timeline, TimelineEntry};

mod simulation;
pub use simulation::{simulate_nowait, simulate_queue, ServiceModel, SimulationConfig};

/// Job ID, assigned in arrival order starting at 0.
#[derive(
    From,
    Into,
    Debug,
    PartialEq,
    PartialOrd,
    Eq,
    Ord,
    Serialize,
    Deserialize,
    Copy,
    Clone,
    Hash,
    Display,
)]
pub struct JobId(usize);

/// A single job passing through the system, with all of its times resolved.
///
/// Jobs are immutable once built: departure times are computed in bulk by one
/// of the service models and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// The ID of this job, unique within one simulation run.
    pub id: JobId,
    /// The moment the job enters the system.
    pub arrival_time: f64,
    /// The time the job occupies the server.
    pub service_duration: f64,
    /// The moment the job finishes service and leaves.
    pub departure_time: f64,
}

impl Job {
    /// The delay between entering the system and leaving it.
    #[must_use]
    pub fn sojourn_time(&self) -> f64 {
        self.departure_time - self.arrival_time
    }

    /// The time spent waiting for the server before service began.
    #[must_use]
    pub fn waiting_time(&self) -> f64 {
        self.sojourn_time() - self.service_duration
    }
}

/// Errors surfaced to the caller on contract violations.
///
/// Every error is fatal to the current invocation only; nothing is retried
/// and no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A simulation was requested for zero jobs.
    #[error("number of jobs must be positive")]
    NoJobs,

    /// Paired input sequences have different lengths.
    #[error("mismatched sequence lengths: {0} and {1}")]
    MismatchedLengths(usize, usize),

    /// Arrival times fed to the single-server recurrence are not ascending.
    #[error("arrival times must be ascending: violation at index {0}")]
    UnsortedArrivals(usize),

    /// A distribution parameter is outside of its valid range.
    #[error("invalid distribution parameter: {0}")]
    InvalidParameter(String),
}
