//! Benchmark Execution
//!
//! Depth-first walk over the suite tree. For every entered suite:
//!
//! ```text
//! select benches ─▶ beforeAll ─▶ engine.run_batch ─▶ afterAll ─▶ report
//!                                  (silenced)
//!        │
//!        ▼
//!   child suites, in declaration order
//! ```
//!
//! Each task handed to the engine runs the suite's beforeEach hooks, the
//! bench, then the afterEach hooks, so per-invocation setup is part of the
//! timed work. A suite counts as run when it or any descendant ran a bench.

use super::engine::{MeasurementBatch, MeasurementEngine, Task};
use crate::console::OutputSilencer;
use crate::planner::{BenchDecision, Selection};
use anyhow::Context;
use benchpress_core::{BenchCase, BenchFn, HookKind, Suite};
use benchpress_report::{ReportError, Reporter, RunStats, RunSummary, SuiteReport};
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;

/// Errors that abort a run
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("suite `{suite}`: bench `{bench}` failed: {source:#}")]
    Bench {
        suite: String,
        bench: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("suite `{suite}`: {kind} hook failed: {source:#}")]
    Hook {
        suite: String,
        kind: HookKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("suite `{suite}`: {message}")]
    Measurement { suite: String, message: String },

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Drives one run over a suite tree
pub struct Runner<'r, E> {
    engine: E,
    selection: Selection,
    reporter: &'r mut dyn Reporter,
    silence_output: bool,
    stats: RunStats,
}

impl<'r, E: MeasurementEngine> Runner<'r, E> {
    /// Create a runner; output silencing is on by default
    pub fn new(engine: E, selection: Selection, reporter: &'r mut dyn Reporter) -> Self {
        Self {
            engine,
            selection,
            reporter,
            silence_output: true,
            stats: RunStats::default(),
        }
    }

    /// Toggle stdout/stderr suppression around measurement
    pub fn silence_output(mut self, silence: bool) -> Self {
        self.silence_output = silence;
        self
    }

    /// Execute the tree, report every measured suite, then report the totals.
    ///
    /// `files` is the number of bench files the tree was collected from.
    pub async fn run(mut self, tree: &Suite, files: usize) -> Result<RunSummary, ExecutionError> {
        let start = Instant::now();
        tracing::info!(
            focus = self.selection.focus(),
            pattern = self.selection.pattern().map(|re| re.as_str()),
            "starting run"
        );

        self.execute(tree, &[]).await?;

        let summary = RunSummary {
            stats: std::mem::take(&mut self.stats),
            files,
            total_duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        self.reporter.on_finish(&summary)?;

        tracing::info!(
            benches_run = summary.stats.benches_run,
            suites_run = summary.stats.suites_run,
            "run complete"
        );
        Ok(summary)
    }

    /// Returns whether this suite or a descendant ran at least one bench
    async fn execute(&mut self, suite: &Suite, ancestors: &[&Suite]) -> Result<bool, ExecutionError> {
        let scope = match self.selection.enter_suite(suite, ancestors) {
            Ok(scope) => scope,
            Err(reason) => {
                tracing::debug!(suite = %suite.name, ?reason, "suite excluded");
                self.stats.benches_skipped += suite.bench_count();
                // the root never counts as a suite of its own
                let excluded = suite.suite_count() - usize::from(suite.is_root());
                self.stats.suites_skipped += excluded;
                return Ok(false);
            }
        };

        let mut included = Vec::new();
        for bench in &suite.benches {
            match self.selection.bench_decision(bench, &scope) {
                BenchDecision::Run => {
                    self.stats.benches_run += 1;
                    included.push(bench);
                }
                BenchDecision::Skip => self.stats.benches_skipped += 1,
                BenchDecision::Todo => {
                    self.stats.benches_todo += 1;
                    self.stats.todo.push(bench.name.clone());
                }
            }
        }

        let mut ran = !included.is_empty();
        if ran {
            self.run_suite(suite, ancestors, &included).await?;
        }

        let mut chain = ancestors.to_vec();
        chain.push(suite);
        for child in &suite.children {
            if Box::pin(self.execute(child, &chain)).await? {
                ran = true;
            }
        }

        if !suite.is_root() {
            if ran {
                self.stats.suites_run += 1;
            } else {
                self.stats.suites_skipped += 1;
            }
        }
        Ok(ran)
    }

    async fn run_suite(
        &mut self,
        suite: &Suite,
        ancestors: &[&Suite],
        included: &[&BenchCase],
    ) -> Result<(), ExecutionError> {
        let path: Vec<String> = ancestors
            .iter()
            .filter(|a| !a.is_root())
            .map(|a| a.name.clone())
            .chain(std::iter::once(suite.name.clone()))
            .collect();
        tracing::info!(suite = %path.join(" › "), benches = included.len(), "running suite");

        run_hooks(suite, HookKind::BeforeAll).await?;

        let batch = MeasurementBatch {
            path: path.clone(),
            tasks: included
                .iter()
                .map(|bench| Task {
                    name: bench.name.clone(),
                    func: wrap_with_each_hooks(suite, &bench.func),
                    options: suite.options_for(bench),
                })
                .collect(),
        };

        let outcome = {
            let _silencer = if self.silence_output {
                OutputSilencer::engage()
                    .map_err(|e| tracing::warn!("could not silence output: {e}"))
                    .ok()
            } else {
                None
            };
            self.engine.run_batch(batch).await
        };

        // afterAll runs even when measurement failed; the measurement error wins
        let teardown = run_hooks(suite, HookKind::AfterAll).await;
        let results = outcome?;
        teardown?;

        self.reporter.on_suite(&SuiteReport {
            path,
            file: suite.origin_file.clone(),
            results,
        })?;
        Ok(())
    }
}

async fn run_hooks(suite: &Suite, kind: HookKind) -> Result<(), ExecutionError> {
    for hook in suite.hooks.get(kind) {
        hook.call().await.map_err(|source| ExecutionError::Hook {
            suite: suite.name.clone(),
            kind,
            source,
        })?;
    }
    Ok(())
}

/// beforeEach hooks → bench → afterEach hooks, as one invocation
fn wrap_with_each_hooks(suite: &Suite, func: &BenchFn) -> BenchFn {
    let before: Rc<[BenchFn]> = suite.hooks.get(HookKind::BeforeEach).into();
    let after: Rc<[BenchFn]> = suite.hooks.get(HookKind::AfterEach).into();
    if before.is_empty() && after.is_empty() {
        return func.clone();
    }

    let func = func.clone();
    BenchFn::try_async(move || {
        let before = before.clone();
        let after = after.clone();
        let func = func.clone();
        async move {
            for hook in before.iter() {
                hook.call().await.context("beforeEach hook failed")?;
            }
            func.call().await?;
            for hook in after.iter() {
                hook.call().await.context("afterEach hook failed")?;
            }
            Ok::<(), anyhow::Error>(())
        }
    })
}
