use crate::geometry::{Direction, Lattice};
use crate::spins::LatticeState;

/// Total bond energy `E = -J * sum_i s_i * (s_down(i) + s_right(i))`.
///
/// Only forward bonds are visited, so each bond is counted once.
pub fn total_energy(lattice: &Lattice, state: &LatticeState, coupling: f64) -> f64 {
    debug_assert_eq!(lattice.n_sites, state.n_sites());
    let spins = state.as_slice();

    let mut bonds = 0i64;
    for (i, &si) in spins.iter().enumerate() {
        let mut forward = 0i8;
        for dir in Direction::FORWARD {
            forward += spins[lattice.neighbor(i, dir)];
        }
        bonds += (si * forward) as i64;
    }

    -coupling * bonds as f64
}

/// Energy per site, `E / L²`.
pub fn energy_per_site(lattice: &Lattice, state: &LatticeState, coupling: f64) -> f64 {
    total_energy(lattice, state, coupling) / state.n_sites() as f64
}

/// Magnetization per site, `(1 / L²) * sum_i s_i`.
pub fn magnetization_per_site(state: &LatticeState) -> f64 {
    let sum: i64 = state.as_slice().iter().map(|&s| s as i64).sum();
    sum as f64 / state.n_sites() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitPolicy;
    use approx::assert_relative_eq;

    #[test]
    fn test_ordered_energy_2x2() {
        let lat = Lattice::new(2);
        let up = LatticeState::with_seed(2, InitPolicy::AllUp, None).unwrap();
        assert_eq!(energy_per_site(&lat, &up, 1.0), -2.0);
        assert_eq!(energy_per_site(&lat, &up, 0.5), -1.0);
        assert_eq!(energy_per_site(&lat, &up, -1.5), 3.0);
    }

    #[test]
    fn test_ordered_observables() {
        let lat = Lattice::new(8);
        let up = LatticeState::with_seed(8, InitPolicy::AllUp, None).unwrap();
        let down = LatticeState::with_seed(8, InitPolicy::AllDown, None).unwrap();
        assert_eq!(energy_per_site(&lat, &up, 1.0), -2.0);
        assert_eq!(energy_per_site(&lat, &down, 1.0), -2.0);
        assert_eq!(magnetization_per_site(&up), 1.0);
        assert_eq!(magnetization_per_site(&down), -1.0);
    }

    #[test]
    fn test_checkerboard_is_antiferromagnetic_ground_state() {
        let l = 4;
        let spins: Vec<i8> = (0..l * l)
            .map(|i| if (i / l + i % l) % 2 == 0 { 1 } else { -1 })
            .collect();
        let state = LatticeState::from_spins(l, spins).unwrap();
        let lat = Lattice::new(l);
        assert_eq!(energy_per_site(&lat, &state, 1.0), 2.0);
        assert_eq!(magnetization_per_site(&state), 0.0);
    }

    #[test]
    fn test_single_flip_energy() {
        // One flipped spin in an ordered 4x4 breaks four bonds: +8J total.
        let lat = Lattice::new(4);
        let mut state = LatticeState::with_seed(4, InitPolicy::AllUp, None).unwrap();
        state.flip(2, 1);
        assert_relative_eq!(total_energy(&lat, &state, 1.0), -32.0 + 8.0);
        assert_relative_eq!(magnetization_per_site(&state), 14.0 / 16.0);
    }

    #[test]
    fn test_random_state_bounds() {
        let lat = Lattice::new(10);
        let state = LatticeState::with_seed(10, InitPolicy::Random, Some(3)).unwrap();
        let m = magnetization_per_site(&state);
        let e = energy_per_site(&lat, &state, 1.0);
        assert!((-1.0..=1.0).contains(&m));
        assert!((-2.0..=2.0).contains(&e));
    }
}
