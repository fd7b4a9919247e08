//! Step-throughput benchmark for the sparse engine.
//!
//! Also demonstrates the sparseness property: a soup parked a million cells
//! from the origin steps in the same time as one at the origin, because cost
//! follows population, not coordinate magnitude.

use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sparse_life::domain::{Coord, LiveSet, engine, presets};

fn soup(center: Coord, radius: i32, density: f64, seed: u64) -> Arc<LiveSet> {
    let mut rng = StdRng::seed_from_u64(seed);
    Arc::new(engine::randomize(center, radius, density, &mut rng).expect("region within cap"))
}

fn bench(mut cells: Arc<LiveSet>, iterations: u32, parallel: bool) -> (f64, usize) {
    let start = Instant::now();
    for _ in 0..iterations {
        cells = if parallel {
            engine::step_parallel(&cells)
        } else {
            engine::step(&cells)
        };
    }
    let ms_per_gen = start.elapsed().as_secs_f64() * 1000.0 / iterations as f64;
    (ms_per_gen, cells.population())
}

fn main() {
    println!("=== Sparse Life Step Benchmark ===\n");

    let iterations = 50;
    let radii = [20, 50, 100, 200, 400];

    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>10}",
        "Radius", "Start pop", "Serial", "Parallel", "Speedup"
    );
    println!("{:-<60}", "");

    for radius in radii {
        let cells = soup(Coord::new(0, 0), radius, 0.3, 42);
        let population = cells.population();

        let (serial_ms, _) = bench(Arc::clone(&cells), iterations, false);
        let (parallel_ms, _) = bench(cells, iterations, true);

        println!(
            "{:>10} {:>12} {:>9.3}ms {:>9.3}ms {:>9.1}x",
            radius,
            population,
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    println!("\n=== Coordinate-magnitude independence ===\n");

    let near = soup(Coord::new(0, 0), 200, 0.3, 7);
    let far = soup(Coord::new(900_000, -900_000), 200, 0.3, 7);
    let (near_ms, _) = bench(near, iterations, false);
    let (far_ms, _) = bench(far, iterations, false);
    println!("Near origin:   {:>8.3} ms/gen", near_ms);
    println!("Far origin:    {:>8.3} ms/gen", far_ms);
    println!("Ratio:         {:>8.2}", far_ms / near_ms);

    println!("\n=== Glider gun growth ===\n");

    let mut cells = Arc::new(engine::stamp(
        &LiveSet::new(),
        &presets::glider_gun(),
        Coord::new(0, 0),
    ));
    let start = Instant::now();
    for generation in 1..=300u32 {
        cells = engine::step(&cells);
        if generation % 60 == 0 {
            println!(
                "gen {:>4}: population {:>5} ({:.3} ms/gen avg)",
                generation,
                cells.population(),
                start.elapsed().as_secs_f64() * 1000.0 / generation as f64
            );
        }
    }
}
