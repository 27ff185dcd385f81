use crate::Error;

use rand::Rng;
use rand_chacha::{rand_core::SeedableRng, ChaChaRng};
use rand_distr::{Beta, Distribution, Exp};
use serde::{Deserialize, Serialize};

/// Parameters of the stochastic arrival and service processes.
///
/// Inter-arrival durations are iid exponential draws with rate
/// `arrival_rate`. Service durations are iid Beta(`service_shape`) draws
/// scaled by `service_scale`.
///
/// The defaults (rate 1, shape (2, 5), scale 3.5) make the mean service
/// duration equal to the mean inter-arrival duration, i.e. a load of ρ ≈ 1.
/// Changing the rate without recomputing a compatible scale shifts the load;
/// use [`SampleConfig::balanced`] to keep ρ ≈ 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Expected number of arrivals per unit of time.
    pub arrival_rate: f64,

    /// The (alpha, beta) shape parameters of the Beta service distribution.
    pub service_shape: (f64, f64),

    /// Factor scaling Beta draws from `[0, 1]` to service durations.
    pub service_scale: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 1.0,
            service_shape: (2.0, 5.0),
            service_scale: 3.5,
        }
    }
}

impl SampleConfig {
    /// Returns the same configuration with the service scale recomputed so
    /// that the mean service duration equals the mean inter-arrival duration.
    ///
    /// The mean of Beta(α, β) is α / (α + β), so the scale becomes
    /// (α + β) / (`arrival_rate` · α).
    #[must_use]
    pub fn balanced(self) -> Self {
        let (alpha, beta) = self.service_shape;
        Self {
            service_scale: (alpha + beta) / (self.arrival_rate * alpha),
            ..self
        }
    }
}

/// Samples drawn for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Samples {
    /// Durations between consecutive arrivals, all positive.
    pub interarrival_durations: Vec<f64>,
    /// Durations the jobs occupy the server, all positive.
    pub service_durations: Vec<f64>,
}

impl Samples {
    /// Arrival times: the cumulative sum of the inter-arrival durations.
    ///
    /// Strictly increasing, since every inter-arrival duration is positive.
    #[must_use]
    pub fn arrival_times(&self) -> Vec<f64> {
        let mut time = 0.0;
        self.interarrival_durations
            .iter()
            .map(|duration| {
                time += duration;
                time
            })
            .collect()
    }

    /// The number of jobs drawn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interarrival_durations.len()
    }

    /// Whether no jobs were drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interarrival_durations.is_empty()
    }
}

/// Draws iid inter-arrival and service durations from the configured
/// distributions.
pub struct SampleGenerator<R: Rng> {
    rng: R,
    interarrival: Exp<f64>,
    service: Beta<f64>,
    service_scale: f64,
}

impl SampleGenerator<ChaChaRng> {
    /// Creates a generator with a deterministic rng seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for out-of-range configuration.
    pub fn seeded(config: SampleConfig, seed: u64) -> Result<Self, Error> {
        Self::new(config, ChaChaRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from system entropy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for out-of-range configuration.
    pub fn from_entropy(config: SampleConfig) -> Result<Self, Error> {
        Self::new(config, ChaChaRng::from_entropy())
    }
}

impl<R: Rng> SampleGenerator<R> {
    /// Creates a generator drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the arrival rate, the shape
    /// parameters, or the service scale are not finite and positive.
    pub fn new(config: SampleConfig, rng: R) -> Result<Self, Error> {
        if !config.service_scale.is_finite() || config.service_scale <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "service scale must be positive, got {}",
                config.service_scale
            )));
        }
        let interarrival = Exp::new(config.arrival_rate).map_err(|_| {
            Error::InvalidParameter(format!("invalid arrival rate: {}", config.arrival_rate))
        })?;
        let (alpha, beta) = config.service_shape;
        let service = Beta::new(alpha, beta).map_err(|_| {
            Error::InvalidParameter(format!("invalid service shape: ({}, {})", alpha, beta))
        })?;
        Ok(Self {
            rng,
            interarrival,
            service,
            service_scale: config.service_scale,
        })
    }

    /// Draws `n` inter-arrival durations followed by `n` service durations.
    pub fn generate(&mut self, n: usize) -> Samples {
        let interarrival_durations = (&self.interarrival)
            .sample_iter(&mut self.rng)
            .take(n)
            .collect();
        let service_scale = self.service_scale;
        let service_durations = (&self.service)
            .sample_iter(&mut self.rng)
            .take(n)
            .map(|draw| draw * service_scale)
            .collect();
        Samples {
            interarrival_durations,
            service_durations,
        }
    }
}
