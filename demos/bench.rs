use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use ising_sim::{
    run_phase_sweep, InitPolicy, PhaseSweepConfig, RunConfig, SimulationConfig, SimulationRunner,
};

const L: usize = 128;
const N_SWEEPS: usize = 500;
const N_TEMPS: usize = 16;

fn main() {
    let mut runner = SimulationRunner::new(
        SimulationConfig::new(L, 2.269)
            .with_seed(42)
            .with_init(InitPolicy::Random),
    )
    .unwrap();

    println!(
        "Lattice: {}x{}  |  T: 2.269  |  Sweeps: {}",
        L, L, N_SWEEPS
    );
    println!("{}", "-".repeat(70));

    let pb = ProgressBar::new(N_SWEEPS as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )
        .unwrap()
        .progress_chars("=> "),
    );
    pb.set_message("sweeps");

    let t0 = Instant::now();
    runner
        .run_with_progress(&RunConfig::new(N_SWEEPS).with_record_every(10), &|| {
            pb.inc(1)
        })
        .unwrap();
    pb.finish();
    let elapsed = t0.elapsed().as_secs_f64();

    let per_sweep = elapsed / N_SWEEPS as f64 * 1000.0;
    let flips_per_sec = (N_SWEEPS * L * L) as f64 / elapsed / 1e6;
    println!(
        "Single run: {:.3} s  |  {:.3} ms/sweep  |  {:.1} M proposals/s",
        elapsed, per_sweep, flips_per_sec
    );

    let temps: Vec<f64> = (0..N_TEMPS)
        .map(|i| 1.5 + 2.0 * i as f64 / (N_TEMPS - 1) as f64)
        .collect();
    let mut config = PhaseSweepConfig::new(temps);
    config.size = 32;
    config.sweeps = 2000;
    config.sequential = false;

    let t0 = Instant::now();
    let result = run_phase_sweep(&config).unwrap();
    let elapsed = t0.elapsed().as_secs_f64();

    println!("{}", "-".repeat(70));
    println!(
        "{:>8} {:>10} {:>10} {:>10} {:>10}",
        "T", "m", "e", "chi", "C"
    );
    for p in result.rows() {
        println!(
            "{:>8.3} {:>10.4} {:>10.4} {:>10.3} {:>10.3}",
            p.temperature, p.magnetization, p.energy, p.susceptibility, p.specific_heat
        );
    }
    println!("Phase sweep ({} temps, L = 32): {:.3} s", N_TEMPS, elapsed);
}
