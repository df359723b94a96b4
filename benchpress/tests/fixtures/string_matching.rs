use benchpress::prelude::*;

const HAYSTACK: &str = "the quick brown fox jumps over the lazy dog";

#[bench_file]
fn string_matching(s: &mut SuiteBuilder<'_>) {
    s.describe("String Matching", |s| {
        s.bench("includes", || {
            black_box(black_box(HAYSTACK).contains("lazy"));
        });
        s.bench("indexOf", || {
            black_box(black_box(HAYSTACK).find("lazy"));
        });
        s.bench("regex", || {
            black_box(black_box(HAYSTACK).split_whitespace().any(|w| w == "lazy"));
        });
        s.describe("case-insensitive", |s| {
            s.bench("toLowerCase", || {
                black_box(black_box(HAYSTACK).to_lowercase().contains("lazy"));
            });
        });
    });

    s.describe("Array Sorting", |s| {
        s.bench("sort", || {
            let mut values: Vec<u32> = (0..64).rev().collect();
            values.sort_unstable();
            black_box(values);
        });
        s.bench_skip("bubble", || {
            panic!("skipped benches never run");
        });
        s.bench_todo("quick");
    });
}
