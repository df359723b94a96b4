//! Example Benchmark File
//!
//! Two top-level suites, one nested suite, a skipped bench and a todo:
//! a plain run measures five benches, skips one and lists one as todo.
//!
//! Run with: cargo run --example example_bench -p benchpress-demos --release
//! Filter with: cargo run --example example_bench -p benchpress-demos --release -- -g Sorting

use benchpress::prelude::*;
use benchpress_demos::{bubble_sort, count_matches, shuffled};

const TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
                    sed do eiusmod tempor incididunt ut labore et dolore magna aliqua";

#[bench_file]
fn string_matching(s: &mut SuiteBuilder<'_>) {
    s.describe("String Matching", |s| {
        s.bench("includes", || {
            black_box(black_box(TEXT).contains("tempor"));
        });
        s.bench("indexOf", || {
            black_box(black_box(TEXT).find("tempor"));
        });
        s.bench("starts_with", || {
            black_box(black_box(TEXT).starts_with("Lorem"));
        });

        s.describe("case-insensitive", |s| {
            s.bench("count_matches", || {
                black_box(count_matches(black_box(TEXT), "DOLOR"));
            });
        });
    });
}

#[bench_file]
fn array_sorting(s: &mut SuiteBuilder<'_>) {
    s.describe("Array Sorting", |s| {
        let input = shuffled(1_000, 42);

        let data = input.clone();
        s.bench("sort_unstable", move || {
            let mut values = data.clone();
            values.sort_unstable();
            black_box(values);
        });

        let data = input;
        s.bench_skip("bubble_sort", move || {
            let mut values = data.clone();
            bubble_sort(&mut values);
            black_box(values);
        });

        s.bench_todo("radix_sort");
    });
}

fn main() -> anyhow::Result<()> {
    benchpress::run()
}
