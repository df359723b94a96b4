use benchpress::prelude::*;

#[bench_file]
fn focus(s: &mut SuiteBuilder<'_>) {
    s.describe("Focused Suite", |s| {
        s.bench("A benchmark in a focused suite", || {
            black_box((0..32u64).sum::<u64>());
        });
        s.bench("Another benchmark in a focused suite", || {
            black_box((0..32u64).product::<u64>());
        });
    });

    s.describe("Unfocused Suite", |s| {
        s.bench("A benchmark in an unfocused suite", || {
            panic!("filtered out by the name pattern");
        });
    });
}
