//! Collector
//!
//! Builds the suite tree while benchmark files register themselves. A fresh
//! collector is created for every run and consumed by [`Collector::finish`],
//! so nothing registered in one run can leak into the next.
//!
//! Open suites live on a stack of owned [`Suite`] values with the root at the
//! bottom. Closing a suite pops it and appends it to the new top's children,
//! which preserves declaration order.

use crate::BenchFileDef;
use crate::bencher::BenchOptions;
use crate::suite::{BenchCase, BenchMode, HookKind, ROOT_SUITE_NAME, Suite, SuiteMode};
use crate::task::BenchFn;
use std::future::Future;
use thiserror::Error;

/// Errors raised while assembling the suite tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{file}: suite name `[root]` is reserved for the root suite")]
    ReservedName { file: String },

    #[error("{file}: bench `{name}` must be declared inside a suite")]
    BenchOutsideSuite { file: String, name: String },

    #[error("{file}: {kind} hook must be declared inside a suite")]
    HookOutsideSuite { file: String, kind: HookKind },

    #[error("collection finished with {depth} suite(s) still open")]
    UnbalancedSuite { depth: usize },
}

/// Assembles a suite tree from DSL calls
#[derive(Debug)]
pub struct Collector {
    stack: Vec<Suite>,
    current_file: Option<String>,
    errors: Vec<RegistrationError>,
}

impl Collector {
    /// Create a collector holding only the root suite
    pub fn new() -> Self {
        Self {
            stack: vec![Suite::root()],
            current_file: None,
            errors: Vec::new(),
        }
    }

    /// Build a tree from registered benchmark files, in the given order
    pub fn collect<'a>(
        files: impl IntoIterator<Item = &'a BenchFileDef>,
    ) -> Result<Suite, RegistrationError> {
        let mut collector = Self::new();
        for def in files {
            tracing::debug!(file = def.file, name = def.name, "loading bench file");
            collector.set_current_file(Some(def.file));
            (def.register_fn)(&mut collector.builder());
        }
        collector.set_current_file(None::<String>);
        collector.finish()
    }

    /// Set the provenance stamped on everything registered next
    pub fn set_current_file(&mut self, file: Option<impl Into<String>>) {
        self.current_file = file.map(Into::into);
    }

    /// Number of open suites, excluding the root
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// DSL handle positioned at the currently open suite
    pub fn builder(&mut self) -> SuiteBuilder<'_> {
        SuiteBuilder { collector: self }
    }

    /// Open a suite, run its factory, then close it as the last child of the parent
    pub fn open_suite<F>(
        &mut self,
        name: impl Into<String>,
        mode: SuiteMode,
        bench_options: Option<BenchOptions>,
        factory: F,
    ) where
        F: FnOnce(&mut Collector),
    {
        let name = name.into();
        if name == ROOT_SUITE_NAME {
            self.record(RegistrationError::ReservedName {
                file: self.file_label(),
            });
        }

        let mut suite = Suite::new(name, mode);
        suite.bench_options = bench_options;
        suite.origin_file = self.current_file.clone();

        self.stack.push(suite);
        factory(self);
        self.close_suite();
    }

    /// Append a bench to the currently open suite
    pub fn add_bench(&mut self, mut case: BenchCase) {
        if self.depth() == 0 {
            self.record(RegistrationError::BenchOutsideSuite {
                file: self.file_label(),
                name: case.name,
            });
            return;
        }
        case.origin_file = self.current_file.clone();
        self.top_mut().benches.push(case);
    }

    /// Append a hook to the currently open suite
    pub fn add_hook(&mut self, kind: HookKind, hook: BenchFn) {
        if self.depth() == 0 {
            self.record(RegistrationError::HookOutsideSuite {
                file: self.file_label(),
                kind,
            });
            return;
        }
        self.top_mut().hooks.push(kind, hook);
    }

    /// Hand back the completed tree, or the first registration error
    pub fn finish(mut self) -> Result<Suite, RegistrationError> {
        if let Some(first) = self.errors.drain(..).next() {
            return Err(first);
        }
        if self.stack.len() != 1 {
            return Err(RegistrationError::UnbalancedSuite {
                depth: self.depth(),
            });
        }
        self.stack
            .pop()
            .ok_or(RegistrationError::UnbalancedSuite { depth: 0 })
    }

    fn close_suite(&mut self) {
        if self.stack.len() < 2 {
            return;
        }
        if let Some(suite) = self.stack.pop() {
            self.top_mut().children.push(suite);
        }
    }

    fn top_mut(&mut self) -> &mut Suite {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn file_label(&self) -> String {
        self.current_file
            .clone()
            .unwrap_or_else(|| "<unknown>".to_string())
    }

    fn record(&mut self, error: RegistrationError) {
        tracing::warn!(%error, "registration error");
        self.errors.push(error);
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

/// The benchmark-declaration DSL.
///
/// Every method registers into whatever suite is currently open. The
/// canonical entry points are [`suite`](Self::suite), [`add_bench`](Self::add_bench)
/// and [`hook`](Self::hook); the rest are shorthands over them.
///
/// ```ignore
/// fn register(s: &mut SuiteBuilder<'_>) {
///     s.describe("Array Sorting", |s| {
///         s.bench("sort", || { /* ... */ });
///         s.bench_todo("quick sort");
///     });
/// }
/// ```
pub struct SuiteBuilder<'c> {
    collector: &'c mut Collector,
}

impl SuiteBuilder<'_> {
    /// Declare a suite with an explicit mode and optional bench defaults
    pub fn suite<F>(
        &mut self,
        name: impl Into<String>,
        mode: SuiteMode,
        bench_options: Option<BenchOptions>,
        factory: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut SuiteBuilder<'_>),
    {
        self.collector
            .open_suite(name, mode, bench_options, |collector| {
                factory(&mut collector.builder())
            });
        self
    }

    /// Declare a suite
    pub fn describe<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: FnOnce(&mut SuiteBuilder<'_>),
    {
        self.suite(name, SuiteMode::Run, None, factory)
    }

    /// Declare a suite whose direct benches default to `options`
    pub fn describe_with<F>(
        &mut self,
        name: impl Into<String>,
        options: BenchOptions,
        factory: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut SuiteBuilder<'_>),
    {
        self.suite(name, SuiteMode::Run, Some(options), factory)
    }

    /// Declare a skipped suite
    pub fn describe_skip<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: FnOnce(&mut SuiteBuilder<'_>),
    {
        self.suite(name, SuiteMode::Skip, None, factory)
    }

    /// Declare a focused suite
    pub fn describe_only<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: FnOnce(&mut SuiteBuilder<'_>),
    {
        self.suite(name, SuiteMode::Only, None, factory)
    }

    /// Register a bench with an explicit mode and optional overrides
    pub fn add_bench(
        &mut self,
        name: impl Into<String>,
        mode: BenchMode,
        func: BenchFn,
        options: Option<BenchOptions>,
    ) -> &mut Self {
        let mut case = BenchCase::new(name, mode, func);
        case.options = options;
        self.collector.add_bench(case);
        self
    }

    /// Register a synchronous bench
    pub fn bench<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() + 'static,
    {
        self.add_bench(name, BenchMode::Run, BenchFn::new(f), None)
    }

    /// Register a synchronous bench with measurement overrides
    pub fn bench_with<F>(&mut self, name: impl Into<String>, options: BenchOptions, f: F) -> &mut Self
    where
        F: Fn() + 'static,
    {
        self.add_bench(name, BenchMode::Run, BenchFn::new(f), Some(options))
    }

    /// Register a synchronous bench that may fail
    pub fn bench_fallible<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() -> anyhow::Result<()> + 'static,
    {
        self.add_bench(name, BenchMode::Run, BenchFn::fallible(f), None)
    }

    /// Register an async bench
    pub fn bench_async<F, Fut>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.add_bench(name, BenchMode::Run, BenchFn::from_async(f), None)
    }

    /// Register a bench that never runs
    pub fn bench_skip<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() + 'static,
    {
        self.add_bench(name, BenchMode::Skip, BenchFn::new(f), None)
    }

    /// Register a focused bench
    pub fn bench_only<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn() + 'static,
    {
        self.add_bench(name, BenchMode::Only, BenchFn::new(f), None)
    }

    /// Register a placeholder bench
    pub fn bench_todo(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_bench(name, BenchMode::Todo, BenchFn::noop(), None)
    }

    /// Register a hook of the given kind
    pub fn hook(&mut self, kind: HookKind, hook: BenchFn) -> &mut Self {
        self.collector.add_hook(kind, hook);
        self
    }

    /// Run once before the suite's benches are measured
    pub fn before_all<F: Fn() + 'static>(&mut self, f: F) -> &mut Self {
        self.hook(HookKind::BeforeAll, BenchFn::new(f))
    }

    /// Run once after the suite's benches are measured
    pub fn after_all<F: Fn() + 'static>(&mut self, f: F) -> &mut Self {
        self.hook(HookKind::AfterAll, BenchFn::new(f))
    }

    /// Run before every bench invocation
    pub fn before_each<F: Fn() + 'static>(&mut self, f: F) -> &mut Self {
        self.hook(HookKind::BeforeEach, BenchFn::new(f))
    }

    /// Run after every bench invocation
    pub fn after_each<F: Fn() + 'static>(&mut self, f: F) -> &mut Self {
        self.hook(HookKind::AfterEach, BenchFn::new(f))
    }

    /// Async [`before_all`](Self::before_all)
    pub fn before_all_async<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.hook(HookKind::BeforeAll, BenchFn::from_async(f))
    }

    /// Async [`after_all`](Self::after_all)
    pub fn after_all_async<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.hook(HookKind::AfterAll, BenchFn::from_async(f))
    }

    /// Async [`before_each`](Self::before_each)
    pub fn before_each_async<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.hook(HookKind::BeforeEach, BenchFn::from_async(f))
    }

    /// Async [`after_each`](Self::after_each)
    pub fn after_each_async<F, Fut>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        self.hook(HookKind::AfterEach, BenchFn::from_async(f))
    }
}
