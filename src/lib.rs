//! Metropolis Monte Carlo for the ferromagnetic (or antiferromagnetic) Ising
//! model on a periodic `L x L` square lattice.
//!
//! A [`SimulationRunner`] owns one lattice and its generator and records
//! energy and magnetization per site as it sweeps. [`run_phase_sweep`] runs
//! one simulation per temperature and derives susceptibility and specific
//! heat from the recorded fluctuations.

pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod simulation;
pub mod spins;
pub mod statistics;

mod parallel;

pub use config::{InitPolicy, PhaseSweepConfig, RunConfig, SimulationConfig};
pub use error::{IsingError, Result};
pub use geometry::Lattice;
pub use simulation::{run_phase_sweep, summarize, RunState, SimulationRunner};
pub use spins::LatticeState;
pub use statistics::{Observable, PhasePoint, PhaseSweepResult, SimulationResult};
