//! Measurement Overrides
//!
//! Run-wide defaults come from `benchpress.toml` and the CLI. A suite can
//! set defaults for its direct benches with `describe_with`, and a bench can
//! override individual fields with `bench_with`; unset fields fall through.
//!
//! Run with: cargo run --example feature_options -p benchpress-demos --release

use benchpress::prelude::*;
use benchpress_demos::{bubble_sort, shuffled};
use std::time::Duration;

#[bench_file]
fn options(s: &mut SuiteBuilder<'_>) {
    let quick = BenchOptions::new()
        .time(Duration::from_millis(100))
        .warmup_time(Duration::from_millis(20));

    s.describe_with("Quick Suite", quick, |s| {
        s.bench("sum 1k", || {
            black_box((0..1_000u64).sum::<u64>());
        });

        // inherits the suite's time budgets, caps the iteration count
        let input = shuffled(256, 9);
        s.bench_with(
            "bubble_sort 256",
            BenchOptions::new().max_iterations(500),
            move || {
                let mut values = input.clone();
                bubble_sort(&mut values);
                black_box(values);
            },
        );
    });

    s.describe("Fixed Iterations", |s| {
        s.bench_with(
            "exactly 25 samples",
            BenchOptions::new()
                .time(Duration::ZERO)
                .warmup_time(Duration::ZERO)
                .warmup_iterations(0)
                .iterations(25)
                .max_iterations(25),
            || {
                black_box(shuffled(64, 3));
            },
        );
    });
}

fn main() -> anyhow::Result<()> {
    benchpress::run()
}
