use crate::{Error, Job};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// The type of a timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A job enters the system.
    Arrival,
    /// A job finishes service and leaves the system.
    Departure,
}

impl EventKind {
    /// The change in queue occupancy caused by an event of this kind.
    #[must_use]
    pub fn change_in_queue(self) -> i64 {
        match self {
            EventKind::Arrival => 1,
            EventKind::Departure => -1,
        }
    }
}

/// A point on the combined timeline. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// When the event occurs.
    pub time: f64,
    /// Whether a job arrives or departs.
    pub kind: EventKind,
}

/// One row of the assembled timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// When the event occurs.
    pub time: f64,
    /// +1 for an arrival, -1 for a departure.
    pub change_in_queue: i64,
    /// Number of jobs present (waiting or in service) after the event.
    pub queue_size: i64,
}

/// The chronologically ordered sequence of all arrival and departure events,
/// with the running queue occupancy.
///
/// For `n` jobs the timeline holds `2n` entries; the queue size after the
/// last entry is 0, since every arrival is matched by exactly one departure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Merges arrival events (+1) and departure events (-1) into one
    /// sequence sorted by time ascending, and computes the running queue
    /// size as the prefix sum of the changes.
    ///
    /// Events at the exact same time keep their generation order: arrivals
    /// before departures, each in job order. An empty input yields an empty
    /// timeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedLengths`] when the two sequences differ in
    /// length.
    pub fn assemble(arrivals: &[f64], departures: &[f64]) -> Result<Self, Error> {
        if arrivals.len() != departures.len() {
            return Err(Error::MismatchedLengths(arrivals.len(), departures.len()));
        }
        let mut events: Vec<Event> = arrivals
            .iter()
            .map(|&time| Event {
                time,
                kind: EventKind::Arrival,
            })
            .chain(departures.iter().map(|&time| Event {
                time,
                kind: EventKind::Departure,
            }))
            .collect();
        // Stable sort: equal-time events keep their generation order.
        events.sort_by_key(|event| OrderedFloat(event.time));
        let mut queue_size = 0_i64;
        let entries = events
            .into_iter()
            .map(|event| {
                queue_size += event.kind.change_in_queue();
                TimelineEntry {
                    time: event.time,
                    change_in_queue: event.kind.change_in_queue(),
                    queue_size,
                }
            })
            .collect();
        Ok(Self { entries })
    }

    /// Assembles the timeline of the given finalized jobs.
    #[must_use]
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let arrivals: Vec<f64> = jobs.iter().map(|job| job.arrival_time).collect();
        let departures: Vec<f64> = jobs.iter().map(|job| job.departure_time).collect();
        Self::assemble(&arrivals, &departures).expect("equal-length inputs")
    }

    /// The entries in chronological order.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Iterates over the entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter()
    }

    /// The number of entries, twice the number of jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the timeline holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The largest queue size reached, or 0 for an empty timeline.
    #[must_use]
    pub fn max_queue_size(&self) -> i64 {
        self.entries
            .iter()
            .map(|entry| entry.queue_size)
            .max()
            .unwrap_or(0)
    }

    /// The queue size after the last event, or 0 for an empty timeline.
    #[must_use]
    pub fn final_queue_size(&self) -> i64 {
        self.entries.last().map_or(0, |entry| entry.queue_size)
    }
}
