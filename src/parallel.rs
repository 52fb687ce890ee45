use rayon::prelude::*;

/// Map `body` over temperature points, optionally in parallel.
///
/// Each call receives `(index, temperature)` and must own all of its state
/// (lattice, RNG), so the points never share mutable data. Results come back
/// in input order either way.
///
/// When `sequential` is true the points run on the current thread, which
/// avoids rayon overhead when the caller is already parallel at an outer
/// level.
pub fn par_over_temperatures<R, F>(temperatures: &[f64], sequential: bool, body: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize, f64) -> R + Send + Sync,
{
    if sequential {
        temperatures
            .iter()
            .enumerate()
            .map(|(i, &t)| body(i, t))
            .collect()
    } else {
        temperatures
            .par_iter()
            .enumerate()
            .map(|(i, &t)| body(i, t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let temps: Vec<f64> = (1..=64).map(|i| i as f64 * 0.1).collect();
        let seq = par_over_temperatures(&temps, true, |i, t| (i, t * 2.0));
        let par = par_over_temperatures(&temps, false, |i, t| (i, t * 2.0));
        assert_eq!(seq, par);
        assert!(seq.iter().enumerate().all(|(k, &(i, _))| k == i));
    }
}
