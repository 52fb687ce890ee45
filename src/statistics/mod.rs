pub mod autocorrelation;
pub mod results;
mod stats;

pub use autocorrelation::{autocorrelation, integrated_autocorrelation_time, sokal_tau};
pub use results::{Observable, PhasePoint, PhaseSweepResult, SimulationResult};
pub use stats::{Moments, Statistics};
