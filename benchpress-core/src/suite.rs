//! Suite Tree Model
//!
//! Suites own their child suites and benches outright; the tree has no
//! back-references, so every traversal is a plain recursion over owned lists.

use crate::bencher::BenchOptions;
use crate::task::BenchFn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the synthetic top-level suite
pub const ROOT_SUITE_NAME: &str = "[root]";

/// Execution disposition of a bench
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenchMode {
    /// Runs unless filtered out
    #[default]
    Run,
    /// Never runs; counted as skipped
    Skip,
    /// Runs and puts the whole run into focus mode
    Only,
    /// Placeholder; never runs, counted separately
    Todo,
}

/// Execution disposition of a suite (suites have no `todo`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuiteMode {
    /// Runs unless filtered out
    #[default]
    Run,
    /// Excludes the suite and its whole subtree
    Skip,
    /// Focuses the run on this subtree
    Only,
}

impl fmt::Display for BenchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BenchMode::Run => "run",
            BenchMode::Skip => "skip",
            BenchMode::Only => "only",
            BenchMode::Todo => "todo",
        })
    }
}

impl fmt::Display for SuiteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SuiteMode::Run => "run",
            SuiteMode::Skip => "skip",
            SuiteMode::Only => "only",
        })
    }
}

/// Lifecycle hook slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    /// Once before a suite's benches are measured
    BeforeAll,
    /// Once after a suite's benches are measured
    AfterAll,
    /// Before every invocation of every bench
    BeforeEach,
    /// After every invocation of every bench
    AfterEach,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookKind::BeforeAll => "beforeAll",
            HookKind::AfterAll => "afterAll",
            HookKind::BeforeEach => "beforeEach",
            HookKind::AfterEach => "afterEach",
        })
    }
}

/// The four ordered hook lists of a suite
#[derive(Debug, Clone, Default)]
pub struct Hooks {
    before_all: Vec<BenchFn>,
    after_all: Vec<BenchFn>,
    before_each: Vec<BenchFn>,
    after_each: Vec<BenchFn>,
}

impl Hooks {
    /// Hooks of one kind, in declaration order
    pub fn get(&self, kind: HookKind) -> &[BenchFn] {
        match kind {
            HookKind::BeforeAll => &self.before_all,
            HookKind::AfterAll => &self.after_all,
            HookKind::BeforeEach => &self.before_each,
            HookKind::AfterEach => &self.after_each,
        }
    }

    /// Append a hook
    pub fn push(&mut self, kind: HookKind, hook: BenchFn) {
        match kind {
            HookKind::BeforeAll => self.before_all.push(hook),
            HookKind::AfterAll => self.after_all.push(hook),
            HookKind::BeforeEach => self.before_each.push(hook),
            HookKind::AfterEach => self.after_each.push(hook),
        }
    }

    /// Whether no hooks of any kind are registered
    pub fn is_empty(&self) -> bool {
        self.before_all.is_empty()
            && self.after_all.is_empty()
            && self.before_each.is_empty()
            && self.after_each.is_empty()
    }
}

/// A single measurable unit
#[derive(Debug, Clone)]
pub struct BenchCase {
    /// Display label (not required to be unique)
    pub name: String,
    /// The operation to measure
    pub func: BenchFn,
    /// Execution disposition
    pub mode: BenchMode,
    /// Measurement overrides for this bench
    pub options: Option<BenchOptions>,
    /// Source file this bench was declared in
    pub origin_file: Option<String>,
}

impl BenchCase {
    /// Create a bench; provenance is stamped by the collector
    pub fn new(name: impl Into<String>, mode: BenchMode, func: BenchFn) -> Self {
        Self {
            name: name.into(),
            func,
            mode,
            options: None,
            origin_file: None,
        }
    }

    /// Attach measurement overrides
    pub fn with_options(mut self, options: BenchOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// A named container of benches and nested suites
#[derive(Debug, Clone, Default)]
pub struct Suite {
    /// Display label; [`ROOT_SUITE_NAME`] for the synthetic root
    pub name: String,
    /// Execution disposition
    pub mode: SuiteMode,
    /// Lifecycle hooks
    pub hooks: Hooks,
    /// Default measurement overrides for direct child benches
    pub bench_options: Option<BenchOptions>,
    /// Child suites in declaration order
    pub children: Vec<Suite>,
    /// Direct benches in declaration order
    pub benches: Vec<BenchCase>,
    /// Source file this suite was declared in
    pub origin_file: Option<String>,
}

impl Suite {
    /// Create an empty suite
    pub fn new(name: impl Into<String>, mode: SuiteMode) -> Self {
        Self {
            name: name.into(),
            mode,
            ..Self::default()
        }
    }

    /// Create the synthetic root suite
    pub fn root() -> Self {
        Self::new(ROOT_SUITE_NAME, SuiteMode::Run)
    }

    /// Whether this is the synthetic root
    pub fn is_root(&self) -> bool {
        self.name == ROOT_SUITE_NAME
    }

    /// Number of benches in this suite and all descendants
    pub fn bench_count(&self) -> usize {
        self.benches.len() + self.children.iter().map(Suite::bench_count).sum::<usize>()
    }

    /// Number of suites in this subtree, including this one
    pub fn suite_count(&self) -> usize {
        1 + self.children.iter().map(Suite::suite_count).sum::<usize>()
    }

    /// Whether this suite, a direct bench, or any descendant is marked `only`
    pub fn has_only(&self) -> bool {
        self.mode == SuiteMode::Only
            || self.benches.iter().any(|b| b.mode == BenchMode::Only)
            || self.children.iter().any(Suite::has_only)
    }

    /// Effective options for a direct bench: suite defaults overlaid with the bench's own
    pub fn options_for(&self, bench: &BenchCase) -> BenchOptions {
        let base = self.bench_options.clone().unwrap_or_default();
        match &bench.options {
            Some(own) => base.merge(own),
            None => base,
        }
    }
}
