//! Focus Mode: `describe_only` and `bench_only`
//!
//! As soon as anything is marked `only`, the run narrows to:
//! - every non-skipped bench inside a focused suite (and its descendants)
//! - focused benches inside otherwise unfocused suites
//!
//! Here "Parsing" runs in full, "Formatting" runs only `format!`, and
//! "Hashing" does not run at all.
//!
//! Run with: cargo run --example feature_focus -p benchpress-demos --release

use benchpress::prelude::*;
use std::collections::HashMap;
use std::fmt::Write;

#[bench_file]
fn focus(s: &mut SuiteBuilder<'_>) {
    s.describe_only("Parsing", |s| {
        s.bench("parse u64", || {
            black_box(black_box("18446744073709551615").parse::<u64>().ok());
        });
        s.bench("parse f64", || {
            black_box(black_box("3.14159265358979").parse::<f64>().ok());
        });

        s.describe("nested under focus", |s| {
            s.bench("parse bool", || {
                black_box(black_box("true").parse::<bool>().ok());
            });
        });
    });

    s.describe("Formatting", |s| {
        s.bench_only("format!", || {
            black_box(format!("{}-{}", black_box(42), black_box("x")));
        });
        s.bench("write!", || {
            let mut out = String::with_capacity(16);
            let _ = write!(out, "{}-{}", black_box(42), black_box("x"));
            black_box(out);
        });
    });

    s.describe("Hashing", |s| {
        s.bench("HashMap insert", || {
            let mut map = HashMap::with_capacity(64);
            for i in 0..64u32 {
                map.insert(i, i);
            }
            black_box(map);
        });
    });
}

fn main() -> anyhow::Result<()> {
    benchpress::run()
}
