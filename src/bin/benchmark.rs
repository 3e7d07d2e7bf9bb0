//! Advance timing: serial versus row-parallel evaluation

use std::time::Instant;

use conway_life::{Evaluation, Simulation};
use rand::{rngs::StdRng, SeedableRng};

/// Average milliseconds per advance, or `None` if the grid can't be built
fn benchmark(size: usize, evaluation: Evaluation, iterations: u32) -> Option<f64> {
    let mut sim = Simulation::new(size, size).ok()?.with_evaluation(evaluation);
    sim.seed_random_with(&mut StdRng::seed_from_u64(size as u64), 0.3);

    let start = Instant::now();
    for _ in 0..iterations {
        sim.advance();
    }
    Some(start.elapsed().as_secs_f64() * 1000.0 / f64::from(iterations))
}

fn main() {
    println!("=== Game of Life Advance Benchmark ===\n");

    let sizes = [40, 100, 200, 500, 1000, 2000];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10} {:>14}", "Size", "Serial", "Parallel", "Speedup", "Cells/sec");
    println!("{:-<62}", "");

    for size in sizes {
        let (Some(serial_ms), Some(parallel_ms)) = (
            benchmark(size, Evaluation::Serial, iterations),
            benchmark(size, Evaluation::Parallel, iterations),
        ) else {
            continue;
        };

        let fastest = serial_ms.min(parallel_ms);
        let cells_per_sec = (size * size) as f64 / (fastest / 1000.0);

        println!(
            "{:>10} {:>12.3} {:>12.3} {:>9.1}x {:>13.1}M",
            format!("{size}x{size}"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms,
            cells_per_sec / 1_000_000.0,
        );
    }
}
