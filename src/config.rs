use std::collections::BTreeSet;
use std::str::FromStr;

use validator::{Validate, ValidationError};

use crate::error::IsingError;

/// How the spins are set before the first sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitPolicy {
    /// Every spin +1.
    AllUp,
    /// Every spin -1.
    AllDown,
    /// Independent fair coin per site.
    #[default]
    Random,
}

impl TryFrom<&str> for InitPolicy {
    type Error = IsingError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "all_up" => Ok(Self::AllUp),
            "all_down" => Ok(Self::AllDown),
            "random" => Ok(Self::Random),
            _ => Err(IsingError::invalid(format!(
                "unknown init policy '{s}', expected 'all_up', 'all_down', or 'random'"
            ))),
        }
    }
}

impl FromStr for InitPolicy {
    type Err = IsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Number of samples a run records: sweep 0 is always recorded, then every
/// `record_every` sweeps after that.
pub fn n_records(sweeps: usize, record_every: usize) -> usize {
    if record_every == 0 {
        return 0;
    }
    sweeps.div_ceil(record_every)
}

/// Number of leading samples dropped as burn-in out of `n` recorded ones.
pub fn n_discarded(n: usize, discard_fraction: f64) -> usize {
    (discard_fraction * n as f64).floor() as usize
}

fn validate_simulation_config(cfg: &SimulationConfig) -> Result<(), ValidationError> {
    if cfg.size < 1 {
        return Err(ValidationError::new("lattice size must be >= 1"));
    }
    if !(cfg.temperature.is_finite() && cfg.temperature > 0.0) {
        return Err(ValidationError::new("temperature must be finite and > 0"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new("coupling must be finite"));
    }
    Ok(())
}

/// Parameters fixed for the lifetime of one [`SimulationRunner`](crate::SimulationRunner).
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_simulation_config"))]
pub struct SimulationConfig {
    /// Side length `L` of the square lattice.
    pub size: usize,
    pub temperature: f64,
    /// Coupling constant `J`; positive is ferromagnetic.
    pub coupling: f64,
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub init: InitPolicy,
}

impl SimulationConfig {
    pub fn new(size: usize, temperature: f64) -> Self {
        Self {
            size,
            temperature,
            coupling: 1.0,
            seed: None,
            init: InitPolicy::default(),
        }
    }

    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_init(mut self, init: InitPolicy) -> Self {
        self.init = init;
        self
    }

    /// Inverse temperature `β = 1/T`.
    pub fn beta(&self) -> f64 {
        1.0 / self.temperature
    }
}

fn validate_run_config(cfg: &RunConfig) -> Result<(), ValidationError> {
    if cfg.sweeps < 1 {
        return Err(ValidationError::new("sweeps must be >= 1"));
    }
    if cfg.record_every < 1 {
        return Err(ValidationError::new("record_every must be >= 1"));
    }
    Ok(())
}

/// Parameters of a single call to [`SimulationRunner::run`](crate::SimulationRunner::run).
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_run_config"))]
pub struct RunConfig {
    pub sweeps: usize,
    /// Observables are recorded on sweeps where `sweep % record_every == 0`.
    pub record_every: usize,
    /// Sweep indices at which a copy of the lattice is kept.
    pub snapshot_at: BTreeSet<usize>,
}

impl RunConfig {
    pub fn new(sweeps: usize) -> Self {
        Self {
            sweeps,
            record_every: 1,
            snapshot_at: BTreeSet::new(),
        }
    }

    pub fn with_record_every(mut self, record_every: usize) -> Self {
        self.record_every = record_every;
        self
    }

    pub fn with_snapshots(mut self, sweeps: impl IntoIterator<Item = usize>) -> Self {
        self.snapshot_at.extend(sweeps);
        self
    }
}

fn validate_phase_sweep_config(cfg: &PhaseSweepConfig) -> Result<(), ValidationError> {
    if cfg.temperatures.is_empty() {
        return Err(ValidationError::new("temperatures must not be empty"));
    }
    if cfg
        .temperatures
        .iter()
        .any(|&t| !(t.is_finite() && t > 0.0))
    {
        return Err(ValidationError::new(
            "every temperature must be finite and > 0",
        ));
    }
    if !(0.0..1.0).contains(&cfg.discard_fraction) {
        return Err(ValidationError::new("discard_fraction must be in [0, 1)"));
    }
    if cfg.size < 1 {
        return Err(ValidationError::new("lattice size must be >= 1"));
    }
    if !cfg.coupling.is_finite() {
        return Err(ValidationError::new("coupling must be finite"));
    }
    if cfg.sweeps < 1 {
        return Err(ValidationError::new("sweeps must be >= 1"));
    }
    if cfg.record_every < 1 {
        return Err(ValidationError::new("record_every must be >= 1"));
    }
    let n = n_records(cfg.sweeps, cfg.record_every);
    if n <= n_discarded(n, cfg.discard_fraction) {
        return Err(ValidationError::new(
            "discard_fraction leaves no equilibrium samples",
        ));
    }
    Ok(())
}

/// Parameters of a temperature scan, shared by every temperature point.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = "validate_phase_sweep_config"))]
pub struct PhaseSweepConfig {
    pub temperatures: Vec<f64>,
    pub sweeps: usize,
    pub record_every: usize,
    /// Leading fraction of each history dropped before computing moments.
    pub discard_fraction: f64,
    pub size: usize,
    pub coupling: f64,
    pub init: InitPolicy,
    /// Every temperature point is seeded with this same value.
    pub seed: Option<u64>,
    /// Run temperature points on the current thread instead of the rayon pool.
    pub sequential: bool,
}

impl PhaseSweepConfig {
    /// Defaults: 5000 sweeps recorded every 10, 20% burn-in, `L = 100`,
    /// ordered start, seed 42, sequential.
    pub fn new(temperatures: Vec<f64>) -> Self {
        Self {
            temperatures,
            sweeps: 5000,
            record_every: 10,
            discard_fraction: 0.2,
            size: 100,
            coupling: 1.0,
            init: InitPolicy::AllUp,
            seed: Some(42),
            sequential: true,
        }
    }

    /// Configuration for the runner at one temperature point.
    pub fn simulation_config(&self, temperature: f64) -> SimulationConfig {
        SimulationConfig {
            size: self.size,
            temperature,
            coupling: self.coupling,
            seed: self.seed,
            init: self.init,
        }
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(self.sweeps).with_record_every(self.record_every)
    }
}
