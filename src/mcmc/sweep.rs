use crate::error::{IsingError, Result};
use crate::geometry::Lattice;
use crate::spins::LatticeState;
use rand::Rng;

/// Sum of the four periodic neighbors of `site`.
#[inline]
fn neighbor_sum(lattice: &Lattice, spins: &[i8], site: usize) -> i32 {
    // SAFETY: `metropolis_sweep` rejects states whose length differs from
    // `n_sites` and only passes `site < n_sites`; every table entry is
    // `< n_sites` by construction.
    unsafe {
        let nb = lattice.neighbors_unchecked(site);
        nb.iter()
            .map(|&j| *spins.get_unchecked(j as usize) as i32)
            .sum()
    }
}

/// Metropolis acceptance probability `min(1, exp(-β·ΔE))`.
///
/// Non-positive `delta_e` returns 1 without evaluating the exponential. At
/// very large `beta` the result underflows to exactly 0.
#[inline]
pub fn accept_probability(delta_e: f64, beta: f64) -> f64 {
    if delta_e <= 0.0 {
        1.0
    } else {
        (-beta * delta_e).exp()
    }
}

/// One Metropolis sweep: `L²` single-spin-flip proposals at uniformly random
/// sites (sites may repeat within a sweep).
///
/// Each proposal draws the row, then the column, then, only when the flip
/// would raise the energy, one uniform in `[0, 1)`. Keeping this order is what
/// makes seeded runs reproducible.
///
/// Returns the number of accepted flips, or `InvalidConfiguration` when
/// `state` was not built for `lattice`.
#[cfg_attr(feature = "profile", inline(never))]
pub fn metropolis_sweep<R: Rng + ?Sized>(
    lattice: &Lattice,
    state: &mut LatticeState,
    beta: f64,
    coupling: f64,
    rng: &mut R,
) -> Result<usize> {
    let size = lattice.size;
    let n_sites = lattice.n_sites;
    if state.n_sites() != n_sites {
        return Err(IsingError::invalid(format!(
            "lattice state has {} sites, neighbor table has {n_sites}",
            state.n_sites()
        )));
    }
    let spins = state.spins_mut();

    let mut accepted = 0;
    for _ in 0..n_sites {
        let row = rng.gen_range(0..size);
        let col = rng.gen_range(0..size);
        let site = row * size + col;

        let si = spins[site];
        let h = neighbor_sum(lattice, spins, site);
        let eng_change = 2.0 * coupling * (si as i32 * h) as f64;

        if eng_change <= 0.0 || rng.gen::<f64>() < accept_probability(eng_change, beta) {
            spins[site] = -si;
            accepted += 1;
        }
    }
    Ok(accepted)
}
