/// Normalized autocorrelation function Γ(δ) for `δ = 0..=max_lag`.
///
/// Γ(δ) = ⟨(o(t) − ⟨o⟩)·(o(t−δ) − ⟨o⟩)⟩ / Var(o), with the lagged product
/// averaged over the `n − δ` available pairs. Products are taken on the
/// centered series so a nearly constant series stays well conditioned. A
/// constant series (zero variance) or a lag with no pairs yields Γ(0) = 1 and
/// Γ(δ > 0) = 0.
pub fn autocorrelation(series: &[f64], max_lag: usize) -> Vec<f64> {
    let n = series.len();
    let m = n as f64;
    let mean = series.iter().sum::<f64>() / m;
    let centered: Vec<f64> = series.iter().map(|&o| o - mean).collect();
    let var = centered.iter().map(|&d| d * d).sum::<f64>() / m;

    (0..=max_lag)
        .map(|delta| {
            let count = n.saturating_sub(delta);
            if count == 0 || var <= 0.0 {
                return if delta == 0 { 1.0 } else { 0.0 };
            }
            let sum_prod: f64 = centered[delta..]
                .iter()
                .zip(centered.iter())
                .map(|(&a, &b)| a * b)
                .sum();
            sum_prod / count as f64 / var
        })
        .collect()
}

/// Integrated autocorrelation time with Sokal's automatic window: stop at the
/// first `W` with `W >= 5·τ(W)`, or where Γ stops being positive. Never below
/// 0.5.
pub fn sokal_tau(gamma: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        if g <= 0.0 {
            break;
        }
        tau += g;
        if w as f64 >= 5.0 * tau {
            return tau;
        }
    }
    tau
}

/// τ_int of `series`, looking at lags up to a quarter of its length.
pub fn integrated_autocorrelation_time(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.5;
    }
    let max_lag = (series.len() / 4).max(1);
    sokal_tau(&autocorrelation(series, max_lag))
}
