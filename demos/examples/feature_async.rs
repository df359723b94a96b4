//! Async Benches and Hooks
//!
//! Benches and hooks may return futures. The harness drives everything on a
//! single-threaded Tokio runtime, so async work is awaited in order and hooks
//! always observe the bench they wrap.
//!
//! Run with: cargo run --example feature_async -p benchpress-demos --release

use benchpress::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};

#[bench_file]
fn async_basics(s: &mut SuiteBuilder<'_>) {
    s.describe("Async Basics", |s| {
        s.bench_async("ready future", || async {
            black_box(std::future::ready(42).await);
        });

        s.bench_async("yield_now", || async {
            tokio::task::yield_now().await;
        });
    });
}

#[bench_file]
fn async_hooks(s: &mut SuiteBuilder<'_>) {
    s.describe("Channels", |s| {
        let channel = Rc::new(RefCell::new(None));

        let setup = channel.clone();
        s.before_all(move || {
            *setup.borrow_mut() = Some(mpsc::channel::<u64>(1024));
        });

        let sender = channel.clone();
        s.bench_async("send + recv", move || {
            let channel = sender.clone();
            async move {
                let pair = channel.borrow_mut().take();
                if let Some((tx, mut rx)) = pair {
                    let _ = tx.send(7).await;
                    black_box(rx.recv().await);
                    *channel.borrow_mut() = Some((tx, rx));
                }
            }
        });

        let teardown = channel;
        s.after_all(move || {
            teardown.borrow_mut().take();
        });
    });

    s.describe("Locks", |s| {
        let lock = Rc::new(Mutex::new(0u64));

        let reset = lock.clone();
        s.before_each_async(move || {
            let lock = reset.clone();
            async move {
                *lock.lock().await = 0;
            }
        });

        let bench = lock.clone();
        s.bench_async("uncontended lock", move || {
            let lock = bench.clone();
            async move {
                *lock.lock().await += 1;
            }
        });

        s.after_all_async(move || {
            let lock = lock.clone();
            async move {
                black_box(*lock.lock().await);
            }
        });
    });

    s.describe("Timers", |s| {
        s.add_bench(
            "sleep 50µs",
            benchpress::BenchMode::Run,
            BenchFn::from_async(|| tokio::time::sleep(Duration::from_micros(50))),
            Some(BenchOptions::new().iterations(20).max_iterations(200)),
        );
    });
}

fn main() -> anyhow::Result<()> {
    benchpress::run()
}
