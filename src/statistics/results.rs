use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::IsingError;
use crate::spins::LatticeState;

/// Which recorded history to read from a [`SimulationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Observable {
    Energy,
    Magnetization,
}

impl TryFrom<&str> for Observable {
    type Error = IsingError;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "energy" => Ok(Self::Energy),
            "magnetization" => Ok(Self::Magnetization),
            _ => Err(IsingError::invalid(format!(
                "unknown observable '{s}', expected 'energy' or 'magnetization'"
            ))),
        }
    }
}

impl FromStr for Observable {
    type Err = IsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

/// Everything recorded during one run.
///
/// `energies[k]`, `magnetizations[k]` and `recorded_sweeps[k]` all refer to
/// the same recorded sweep.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    /// Energy per site.
    pub energies: Vec<f64>,
    /// Magnetization per site.
    pub magnetizations: Vec<f64>,
    /// Sweep index of each recorded sample.
    pub recorded_sweeps: Vec<usize>,
    /// Lattice copies keyed by the sweep they were taken after.
    pub snapshots: BTreeMap<usize, LatticeState>,
}

impl SimulationResult {
    pub(crate) fn record(&mut self, sweep: usize, energy: f64, magnetization: f64) {
        self.recorded_sweeps.push(sweep);
        self.energies.push(energy);
        self.magnetizations.push(magnetization);
    }

    /// Number of recorded samples.
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn history(&self, observable: Observable) -> &[f64] {
        match observable {
            Observable::Energy => &self.energies,
            Observable::Magnetization => &self.magnetizations,
        }
    }

    pub fn snapshot(&self, sweep: usize) -> Option<&LatticeState> {
        self.snapshots.get(&sweep)
    }
}

/// One row of a [`PhaseSweepResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhasePoint {
    pub temperature: f64,
    /// ⟨m⟩ over equilibrium samples.
    pub magnetization: f64,
    /// ⟨e⟩ over equilibrium samples.
    pub energy: f64,
    /// χ = N·(⟨m²⟩ − ⟨m⟩²).
    pub susceptibility: f64,
    /// C = N·β²·(⟨e²⟩ − ⟨e⟩²).
    pub specific_heat: f64,
    /// Integrated autocorrelation time of m, in recorded samples.
    pub magnetization_tau: f64,
    /// Equilibrium samples the moments were taken over.
    pub n_samples: usize,
}

/// Temperature scan results as parallel columns, in input temperature order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseSweepResult {
    pub temperatures: Vec<f64>,
    pub magnetization: Vec<f64>,
    pub energy: Vec<f64>,
    pub susceptibility: Vec<f64>,
    pub specific_heat: Vec<f64>,
    pub magnetization_tau: Vec<f64>,
    pub n_samples: Vec<usize>,
}

impl PhaseSweepResult {
    pub(crate) fn push(&mut self, p: PhasePoint) {
        self.temperatures.push(p.temperature);
        self.magnetization.push(p.magnetization);
        self.energy.push(p.energy);
        self.susceptibility.push(p.susceptibility);
        self.specific_heat.push(p.specific_heat);
        self.magnetization_tau.push(p.magnetization_tau);
        self.n_samples.push(p.n_samples);
    }

    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<PhasePoint> {
        (i < self.len()).then(|| PhasePoint {
            temperature: self.temperatures[i],
            magnetization: self.magnetization[i],
            energy: self.energy[i],
            susceptibility: self.susceptibility[i],
            specific_heat: self.specific_heat[i],
            magnetization_tau: self.magnetization_tau[i],
            n_samples: self.n_samples[i],
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = PhasePoint> + '_ {
        (0..self.len()).filter_map(|i| self.point(i))
    }
}

impl FromIterator<PhasePoint> for PhaseSweepResult {
    fn from_iter<I: IntoIterator<Item = PhasePoint>>(iter: I) -> Self {
        let mut result = Self::default();
        for p in iter {
            result.push(p);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(t: f64) -> PhasePoint {
        PhasePoint {
            temperature: t,
            magnetization: 1.0 / t,
            energy: -t,
            susceptibility: 2.0 * t,
            specific_heat: 3.0 * t,
            magnetization_tau: 0.5,
            n_samples: 10,
        }
    }

    #[test]
    fn test_observable_tags() {
        assert_eq!(Observable::try_from("energy"), Ok(Observable::Energy));
        assert_eq!(
            "magnetization".parse::<Observable>(),
            Ok(Observable::Magnetization)
        );
        assert!(matches!(
            Observable::try_from("entropy"),
            Err(IsingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_history_lockstep() {
        let mut result = SimulationResult::default();
        assert!(result.is_empty());
        result.record(0, -1.0, 0.5);
        result.record(10, -1.5, 0.25);
        assert_eq!(result.len(), 2);
        assert_eq!(result.history(Observable::Energy), &[-1.0, -1.5]);
        assert_eq!(result.history(Observable::Magnetization), &[0.5, 0.25]);
        assert_eq!(result.recorded_sweeps, vec![0, 10]);
        assert!(result.snapshot(0).is_none());
    }

    #[test]
    fn test_phase_rows_keep_order() {
        let result: PhaseSweepResult = [2.0, 1.0, 3.0].into_iter().map(point).collect();
        assert_eq!(result.len(), 3);
        let temps: Vec<f64> = result.rows().map(|p| p.temperature).collect();
        assert_eq!(temps, vec![2.0, 1.0, 3.0]);
        assert_eq!(result.point(1), Some(point(1.0)));
        assert_eq!(result.point(3), None);
    }
}
