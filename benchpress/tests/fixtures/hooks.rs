use benchpress::prelude::*;
use std::cell::RefCell;

thread_local! {
    static EVENTS: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
}

fn record(event: &'static str) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

/// Drain everything recorded on this thread
pub fn take_events() -> Vec<&'static str> {
    EVENTS.with(|events| std::mem::take(&mut *events.borrow_mut()))
}

#[bench_file(name = "lifecycle hooks")]
fn hooks(s: &mut SuiteBuilder<'_>) {
    s.describe_with(
        "Lifecycle",
        BenchOptions::new().iterations(3).max_iterations(3),
        |s| {
            s.before_all(|| record("beforeAll"));
            s.before_each_async(|| async {
                tokio::task::yield_now().await;
                record("beforeEach");
            });
            s.after_each(|| record("afterEach"));
            s.after_all_async(|| async { record("afterAll") });

            s.bench("sync", || record("sync"));
            s.bench_async("async", || async {
                tokio::task::yield_now().await;
                record("async");
            });
        },
    );
}
