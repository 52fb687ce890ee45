pub mod phase;

pub use phase::{run_phase_sweep, summarize};

use rand_xoshiro::Xoshiro256StarStar;
use tracing::debug;
use validator::Validate;

use crate::config::{RunConfig, SimulationConfig};
use crate::error::{IsingError, Result};
use crate::geometry::Lattice;
use crate::mcmc::{self, make_rng};
use crate::spins::{self, LatticeState};
use crate::statistics::SimulationResult;

/// Lifecycle of a [`SimulationRunner`]. A runner is run at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
}

/// Owns one lattice, its generator and its recorded history.
///
/// Construction validates the [`SimulationConfig`], seeds the generator and
/// initializes the spins. [`run`](Self::run) may then be called once; a second
/// call returns [`IsingError::AlreadyRun`] and leaves everything untouched.
pub struct SimulationRunner {
    config: SimulationConfig,
    lattice: Lattice,
    state: LatticeState,
    rng: Xoshiro256StarStar,
    result: SimulationResult,
    run_state: RunState,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = make_rng(config.seed);
        let state = LatticeState::new(config.size, config.init, &mut rng)?;
        let lattice = Lattice::new(config.size);

        Ok(Self {
            config,
            lattice,
            state,
            rng,
            result: SimulationResult::default(),
            run_state: RunState::Idle,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Current spins (the initial configuration before `run`).
    pub fn state(&self) -> &LatticeState {
        &self.state
    }

    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    pub fn into_result(self) -> SimulationResult {
        self.result
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Run `run.sweeps` Metropolis sweeps.
    pub fn run(&mut self, run: &RunConfig) -> Result<&SimulationResult> {
        self.run_with_progress(run, &|| {})
    }

    /// Like [`run`](Self::run), calling `on_sweep` once before every sweep
    /// (useful for progress bars).
    ///
    /// Sweep `k` (0-based) is followed by a recording when
    /// `k % record_every == 0` and by a snapshot when `k` is in
    /// `snapshot_at`, so the history holds `ceil(sweeps / record_every)`
    /// samples.
    pub fn run_with_progress(
        &mut self,
        run: &RunConfig,
        on_sweep: &(dyn Fn() + Sync),
    ) -> Result<&SimulationResult> {
        if self.run_state != RunState::Idle {
            return Err(IsingError::AlreadyRun);
        }
        run.validate()?;
        self.run_state = RunState::Running;

        let beta = self.config.beta();
        let coupling = self.config.coupling;
        debug!(
            size = self.config.size,
            temperature = self.config.temperature,
            sweeps = run.sweeps,
            record_every = run.record_every,
            "starting run"
        );

        let mut accepted = 0usize;
        for sweep in 0..run.sweeps {
            on_sweep();
            accepted += mcmc::metropolis_sweep(
                &self.lattice,
                &mut self.state,
                beta,
                coupling,
                &mut self.rng,
            )?;

            if sweep % run.record_every == 0 {
                let e = spins::energy_per_site(&self.lattice, &self.state, coupling);
                let m = spins::magnetization_per_site(&self.state);
                self.result.record(sweep, e, m);
            }

            if run.snapshot_at.contains(&sweep) {
                self.result.snapshots.insert(sweep, self.state.clone());
            }
        }

        self.run_state = RunState::Completed;

        let proposals = run.sweeps * self.lattice.n_sites;
        debug!(
            temperature = self.config.temperature,
            samples = self.result.len(),
            snapshots = self.result.snapshots.len(),
            acceptance = accepted as f64 / proposals as f64,
            final_energy = self.result.energies.last().copied(),
            final_magnetization = self.result.magnetizations.last().copied(),
            "run finished"
        );

        Ok(&self.result)
    }
}
