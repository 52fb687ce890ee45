use tracing::info;
use validator::Validate;

use crate::config::{n_discarded, PhaseSweepConfig};
use crate::error::{IsingError, Result};
use crate::parallel::par_over_temperatures;
use crate::simulation::SimulationRunner;
use crate::statistics::{integrated_autocorrelation_time, Moments, PhasePoint, PhaseSweepResult};

/// Reduce one temperature point's histories to a [`PhasePoint`].
///
/// The first `floor(discard_fraction * n)` samples are dropped as burn-in.
/// Susceptibility and specific heat are the scaled variances
/// `N·(⟨m²⟩ − ⟨m⟩²)` and `N·β²·(⟨e²⟩ − ⟨e⟩²)` with `N = L²`.
pub fn summarize(
    temperature: f64,
    size: usize,
    energies: &[f64],
    magnetizations: &[f64],
    discard_fraction: f64,
) -> Result<PhasePoint> {
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(IsingError::invalid(format!(
            "temperature must be finite and > 0, got {temperature}"
        )));
    }
    if !(0.0..1.0).contains(&discard_fraction) {
        return Err(IsingError::invalid(format!(
            "discard_fraction must be in [0, 1), got {discard_fraction}"
        )));
    }
    if energies.len() != magnetizations.len() {
        return Err(IsingError::invalid(format!(
            "history length mismatch: {} energies vs {} magnetizations",
            energies.len(),
            magnetizations.len()
        )));
    }

    let n = energies.len();
    let discard = n_discarded(n, discard_fraction);
    if discard >= n {
        return Err(IsingError::invalid(format!(
            "discard_fraction {discard_fraction} leaves no equilibrium samples out of {n}"
        )));
    }

    let mags = &magnetizations[discard..];
    let m = Moments::from_samples(mags);
    let e = Moments::from_samples(&energies[discard..]);

    let n_sites = (size * size) as f64;
    let beta = 1.0 / temperature;

    Ok(PhasePoint {
        temperature,
        magnetization: m.mean,
        energy: e.mean,
        susceptibility: n_sites * m.variance(),
        specific_heat: n_sites * beta * beta * e.variance(),
        magnetization_tau: integrated_autocorrelation_time(mags),
        n_samples: n - discard,
    })
}

/// Run one independent simulation per temperature and tabulate the moments.
///
/// The whole configuration is validated before any simulation starts. Rows
/// come back in the order of `config.temperatures`, whether the points run
/// sequentially or on the rayon pool.
pub fn run_phase_sweep(config: &PhaseSweepConfig) -> Result<PhaseSweepResult> {
    config.validate()?;

    info!(
        n_temps = config.temperatures.len(),
        size = config.size,
        sweeps = config.sweeps,
        record_every = config.record_every,
        discard_fraction = config.discard_fraction,
        sequential = config.sequential,
        "starting phase sweep"
    );

    let run = config.run_config();
    let points = par_over_temperatures(
        &config.temperatures,
        config.sequential,
        |_, temperature| -> Result<PhasePoint> {
            let mut runner = SimulationRunner::new(config.simulation_config(temperature))?;
            let result = runner.run(&run)?;
            let p = summarize(
                temperature,
                config.size,
                &result.energies,
                &result.magnetizations,
                config.discard_fraction,
            )?;
            info!(
                temperature,
                magnetization = p.magnetization,
                energy = p.energy,
                susceptibility = p.susceptibility,
                specific_heat = p.specific_heat,
                tau = p.magnetization_tau,
                "temperature point done"
            );
            Ok(p)
        },
    );

    points.into_iter().collect()
}
