//! Benchpress Examples
//!
//! Runnable demonstrations of every Benchpress feature. This crate is not
//! published; it exists solely to host examples that depend on `benchpress`.
//!
//! Run any example with:
//! ```sh
//! cargo run --example <name> -p benchpress-demos --release
//! ```
//!
//! Every example accepts the full harness CLI, e.g. `-- -g Sorting` or
//! `-- --reporter json -o target/report.json`, and `-- list` to print the plan.
//!
//! ## Feature Examples
//!
//! | Example | Feature |
//! |---------|---------|
//! | `example_bench` | Nested suites, `skip`, `todo`, name filtering |
//! | `feature_focus` | `describe_only` / `bench_only` focus mode |
//! | `feature_async` | Async benches and async lifecycle hooks |
//! | `feature_options` | Per-suite and per-bench measurement overrides |
//!
//! The functions below are the workloads the examples measure.

/// Naive O(n²) sort, the slow baseline in the sorting demos
pub fn bubble_sort<T: PartialOrd>(values: &mut [T]) {
    let n = values.len();
    for i in 0..n {
        let mut swapped = false;
        for j in 0..n - 1 - i {
            if values[j] > values[j + 1] {
                values.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/// Deterministic pseudo-random input for sorting benches
pub fn shuffled(len: usize, seed: u64) -> Vec<u64> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state % 10_000
        })
        .collect()
}

/// Count case-insensitive occurrences of `needle` in `haystack`
pub fn count_matches(haystack: &str, needle: &str) -> usize {
    haystack
        .to_lowercase()
        .matches(&needle.to_lowercase())
        .count()
}
