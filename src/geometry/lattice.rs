/// One of the four bonds leaving a site of the square lattice.
///
/// `Down` and `Right` are the forward directions along rows and columns;
/// every bond is the forward bond of exactly one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down = 0,
    Right = 1,
    Up = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Down, Self::Right, Self::Up, Self::Left];
    pub const FORWARD: [Direction; 2] = [Self::Down, Self::Right];

    /// Displacement `(d_row, d_col)`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::Down => (1, 0),
            Self::Right => (0, 1),
            Self::Up => (-1, 0),
            Self::Left => (0, -1),
        }
    }
}

/// Periodic `L x L` square lattice with a precomputed neighbor table.
///
/// Sites are indexed in row-major order: `site = row * L + col`.
/// `neighbors[site][dir as usize]` is the site reached from `site` by
/// stepping once in `dir`, wrapped with `rem_euclid`.
#[derive(Debug, Clone)]
pub struct Lattice {
    /// Side length `L`.
    pub size: usize,
    /// `L * L`.
    pub n_sites: usize,
    neighbors: Vec<[u32; 4]>,
}

impl Lattice {
    pub fn new(size: usize) -> Self {
        let n_sites = size * size;
        let mut neighbors = vec![[0u32; 4]; n_sites];

        for (site, entry) in neighbors.iter_mut().enumerate() {
            let (row, col) = (site / size, site % size);
            for dir in Direction::ALL {
                let (dr, dc) = dir.offset();
                entry[dir as usize] =
                    wrapped_site(size, row as isize + dr, col as isize + dc) as u32;
            }
        }

        Self {
            size,
            n_sites,
            neighbors,
        }
    }

    #[inline]
    pub fn neighbor(&self, site: usize, dir: Direction) -> usize {
        self.neighbors[site][dir as usize] as usize
    }

    /// All four neighbors of `site` in [`Direction::ALL`] order.
    ///
    /// # Safety
    ///
    /// `site` must be `< n_sites`.
    #[inline]
    pub unsafe fn neighbors_unchecked(&self, site: usize) -> &[u32; 4] {
        self.neighbors.get_unchecked(site)
    }
}

#[inline]
fn wrapped_site(size: usize, row: isize, col: isize) -> usize {
    let l = size as isize;
    (row.rem_euclid(l) * l + col.rem_euclid(l)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_neighbors() {
        // 4x4 lattice
        let lat = Lattice::new(4);
        assert_eq!(lat.n_sites, 16);

        // Site 0 = (0,0): down -> (1,0)=4, right -> (0,1)=1
        assert_eq!(lat.neighbor(0, Direction::Down), 4);
        assert_eq!(lat.neighbor(0, Direction::Right), 1);

        // Site 0 = (0,0): up -> (3,0)=12 (wrap), left -> (0,3)=3 (wrap)
        assert_eq!(lat.neighbor(0, Direction::Up), 12);
        assert_eq!(lat.neighbor(0, Direction::Left), 3);

        // Site 15 = (3,3): down -> (0,3)=3 (wrap), right -> (3,0)=12 (wrap)
        assert_eq!(lat.neighbor(15, Direction::Down), 3);
        assert_eq!(lat.neighbor(15, Direction::Right), 12);

        // Site 5 = (1,1): interior
        let nb = unsafe { lat.neighbors_unchecked(5) };
        assert_eq!(nb, &[9, 6, 1, 4]);
    }

    #[test]
    fn test_two_by_two_wraps_onto_same_site() {
        // On L=2 the up and down neighbors coincide, as do left and right.
        let lat = Lattice::new(2);
        for site in 0..4 {
            assert_eq!(
                lat.neighbor(site, Direction::Up),
                lat.neighbor(site, Direction::Down)
            );
            assert_eq!(
                lat.neighbor(site, Direction::Left),
                lat.neighbor(site, Direction::Right)
            );
        }
    }

    #[test]
    fn test_single_site_is_its_own_neighbor() {
        let lat = Lattice::new(1);
        for dir in Direction::ALL {
            assert_eq!(lat.neighbor(0, dir), 0);
        }
    }
}
