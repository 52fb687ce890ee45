use rand::Rng;

use crate::config::InitPolicy;
use crate::error::{IsingError, Result};
use crate::mcmc::make_rng;

/// Spin configuration of an `L x L` periodic lattice.
///
/// Spins are stored row-major in a flat `Vec<i8>` and are always `+1` or
/// `-1`. Cloning gives an independent copy, which is how snapshots are taken.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeState {
    size: usize,
    spins: Vec<i8>,
}

impl LatticeState {
    /// Initialize per `init`, drawing from `rng` for [`InitPolicy::Random`].
    pub fn new<R: Rng + ?Sized>(size: usize, init: InitPolicy, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(IsingError::invalid("lattice size must be >= 1"));
        }
        let n_sites = size * size;
        let spins = match init {
            InitPolicy::AllUp => vec![1i8; n_sites],
            InitPolicy::AllDown => vec![-1i8; n_sites],
            InitPolicy::Random => (0..n_sites)
                .map(|_| if rng.gen::<f64>() < 0.5 { -1 } else { 1 })
                .collect(),
        };
        Ok(Self { size, spins })
    }

    /// Like [`LatticeState::new`] with a private generator seeded from
    /// `seed`, or from OS entropy when `None`.
    pub fn with_seed(size: usize, init: InitPolicy, seed: Option<u64>) -> Result<Self> {
        Self::new(size, init, &mut make_rng(seed))
    }

    /// Wrap an existing row-major configuration.
    pub fn from_spins(size: usize, spins: Vec<i8>) -> Result<Self> {
        if size == 0 {
            return Err(IsingError::invalid("lattice size must be >= 1"));
        }
        if spins.len() != size * size {
            return Err(IsingError::invalid(format!(
                "expected {} spins for L = {size}, got {}",
                size * size,
                spins.len()
            )));
        }
        if spins.iter().any(|&s| s != 1 && s != -1) {
            return Err(IsingError::invalid("spins must be +1 or -1"));
        }
        Ok(Self { size, spins })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn n_sites(&self) -> usize {
        self.spins.len()
    }

    /// Spin at `(row, col)`, both wrapped modulo `L`.
    #[inline]
    pub fn spin(&self, row: isize, col: isize) -> i8 {
        self.spins[self.wrap(row, col)]
    }

    /// Negate the spin at `(row, col)`, both wrapped modulo `L`.
    pub fn flip(&mut self, row: isize, col: isize) {
        let site = self.wrap(row, col);
        self.flip_site(site);
    }

    #[inline]
    pub fn flip_site(&mut self, site: usize) {
        self.spins[site] = -self.spins[site];
    }

    /// Row-major view of all spins.
    pub fn as_slice(&self) -> &[i8] {
        &self.spins
    }

    /// Iterate the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[i8]> + '_ {
        self.spins.chunks_exact(self.size)
    }

    /// Mutable access for the sweep kernel, which only ever negates entries.
    pub(crate) fn spins_mut(&mut self) -> &mut [i8] {
        &mut self.spins
    }

    #[inline]
    fn wrap(&self, row: isize, col: isize) -> usize {
        let l = self.size as isize;
        (row.rem_euclid(l) * l + col.rem_euclid(l)) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_inits() {
        let up = LatticeState::with_seed(5, InitPolicy::AllUp, None).unwrap();
        assert_eq!(up.n_sites(), 25);
        assert!(up.as_slice().iter().all(|&s| s == 1));

        let down = LatticeState::with_seed(5, InitPolicy::AllDown, None).unwrap();
        assert!(down.as_slice().iter().all(|&s| s == -1));
    }

    #[test]
    fn test_random_init_is_seeded() {
        let a = LatticeState::with_seed(16, InitPolicy::Random, Some(7)).unwrap();
        let b = LatticeState::with_seed(16, InitPolicy::Random, Some(7)).unwrap();
        let c = LatticeState::with_seed(16, InitPolicy::Random, Some(8)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        assert!(a.as_slice().iter().all(|&s| s == 1 || s == -1));
        let ups = a.as_slice().iter().filter(|&&s| s == 1).count();
        // 256 fair coins; mean 128, sd 8.
        assert!((80..=176).contains(&ups), "ups = {ups}");
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = LatticeState::with_seed(0, InitPolicy::AllUp, Some(1)).unwrap_err();
        assert!(matches!(err, IsingError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_spin_wraps() {
        let state = LatticeState::from_spins(2, vec![1, -1, -1, 1]).unwrap();
        assert_eq!(state.spin(0, 1), -1);
        assert_eq!(state.spin(0, -1), -1);
        assert_eq!(state.spin(2, 2), 1);
        assert_eq!(state.spin(-1, 0), -1);
    }

    #[test]
    fn test_flip_and_deep_copy() {
        let mut state = LatticeState::with_seed(3, InitPolicy::AllUp, None).unwrap();
        let snapshot = state.clone();
        state.flip(1, 1);
        state.flip(-1, 0);
        assert_eq!(state.spin(1, 1), -1);
        assert_eq!(state.spin(2, 0), -1);
        assert!(snapshot.as_slice().iter().all(|&s| s == 1));

        state.flip_site(4);
        assert_eq!(state.spin(1, 1), 1);
    }

    #[test]
    fn test_from_spins_validation() {
        assert!(LatticeState::from_spins(2, vec![1, 1, 1]).is_err());
        assert!(LatticeState::from_spins(2, vec![1, 0, 1, 1]).is_err());
        assert!(LatticeState::from_spins(0, vec![]).is_err());
    }

    #[test]
    fn test_rows_view() {
        let state = LatticeState::from_spins(2, vec![1, -1, -1, 1]).unwrap();
        let rows: Vec<&[i8]> = state.rows().collect();
        assert_eq!(rows, vec![&[1i8, -1][..], &[-1i8, 1][..]]);
    }
}
