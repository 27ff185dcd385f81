use crate::{
    nowait_departures, queue_departures, Error, Job, JobId, SampleConfig, SampleGenerator, Timeline,
};

use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

/// The service regime of a simulation run.
#[derive(
    Debug, PartialEq, Eq, Clone, Copy, strum::EnumString, strum::ToString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceModel {
    /// Service capacity is unlimited; every job is served immediately on
    /// arrival.
    NoWait,

    /// Exactly one job is served at a time, strictly in arrival order.
    SingleServer,
}

impl ServiceModel {
    /// Computes the departure times of this regime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedLengths`] when the sequences differ in
    /// length, and [`Error::UnsortedArrivals`] when the single-server model
    /// is given arrival times that are not ascending.
    pub fn departures(self, arrivals: &[f64], services: &[f64]) -> Result<Vec<f64>, Error> {
        match self {
            ServiceModel::NoWait => nowait_departures(arrivals, services),
            ServiceModel::SingleServer => queue_departures(arrivals, services),
        }
    }
}

/// Configuration for a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of jobs to generate. Must be positive.
    pub num_jobs: usize,

    /// Service regime. See [`ServiceModel`].
    pub model: ServiceModel,

    /// Parameters of the stochastic sources.
    #[serde(default)]
    pub samples: SampleConfig,

    /// Seed for the random number generator; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a configuration with default sample parameters and an
    /// entropy-seeded random number generator.
    #[must_use]
    pub fn new(num_jobs: usize, model: ServiceModel) -> Self {
        Self {
            num_jobs,
            model,
            samples: SampleConfig::default(),
            seed: None,
        }
    }

    fn generator(&self) -> Result<SampleGenerator<ChaChaRng>, Error> {
        match self.seed {
            Some(seed) => SampleGenerator::seeded(self.samples, seed),
            None => SampleGenerator::from_entropy(self.samples),
        }
    }

    /// Runs the simulation and returns the finalized per-job records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoJobs`] when `num_jobs` is 0, and
    /// [`Error::InvalidParameter`] for an out-of-range sample configuration.
    pub fn run_jobs(&self) -> Result<Vec<Job>, Error> {
        if self.num_jobs == 0 {
            return Err(Error::NoJobs);
        }
        let samples = self.generator()?.generate(self.num_jobs);
        let arrivals = samples.arrival_times();
        log::debug!("generated {} arrival and service samples", samples.len());
        let departures = self.model.departures(&arrivals, &samples.service_durations)?;
        Ok(arrivals
            .iter()
            .zip(&samples.service_durations)
            .zip(&departures)
            .enumerate()
            .map(
                |(id, ((&arrival_time, &service_duration), &departure_time))| Job {
                    id: JobId::from(id),
                    arrival_time,
                    service_duration,
                    departure_time,
                },
            )
            .collect())
    }

    /// Runs the simulation and returns the assembled event timeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoJobs`] when `num_jobs` is 0, and
    /// [`Error::InvalidParameter`] for an out-of-range sample configuration.
    pub fn run(&self) -> Result<Timeline, Error> {
        let timeline = Timeline::from_jobs(&self.run_jobs()?);
        log::info!(
            "assembled timeline of {} events, max queue size {}",
            timeline.len(),
            timeline.max_queue_size()
        );
        Ok(timeline)
    }
}

/// Simulates the arrival and departure process with no waiting, as if there
/// were unlimited servers available, using the default sample configuration.
///
/// # Errors
///
/// Returns [`Error::NoJobs`] when `num_jobs` is 0.
pub fn simulate_nowait(num_jobs: usize) -> Result<Timeline, Error> {
    SimulationConfig::new(num_jobs, ServiceModel::NoWait).run()
}

/// Simulates the single-server FIFO arrival and departure process using the
/// default sample configuration.
///
/// # Errors
///
/// Returns [`Error::NoJobs`] when `num_jobs` is 0.
pub fn simulate_queue(num_jobs: usize) -> Result<Timeline, Error> {
    SimulationConfig::new(num_jobs, ServiceModel::SingleServer).run()
}
