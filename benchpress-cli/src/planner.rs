//! Benchmark Planner
//!
//! Decides which suites and benches are active for a run. Two filters compose:
//!
//! - Mode: `skip` removes a suite's whole subtree or a single bench, `todo`
//!   benches never run, and any `only` anywhere puts the run into focus mode.
//! - Pattern: a case-sensitive regex matched against suite and bench names.
//!
//! Decisions are taken lazily while the executor walks the tree, because a
//! suite's outcome depends on its ancestors.

use benchpress_core::{BenchCase, BenchMode, Suite, SuiteMode};
use regex::Regex;
use std::fmt::Write;

/// Run-wide selection state
#[derive(Debug, Clone)]
pub struct Selection {
    pattern: Option<Regex>,
    focus: bool,
}

/// Why a suite was excluded with its whole subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// The suite is marked `skip`
    Skipped,
    /// Nothing in the subtree matches the pattern
    NoPatternMatch,
    /// Focus mode is on and nothing in the subtree is focused
    OutOfFocus,
}

/// State threaded into the bench decisions of an active suite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteScope {
    /// Focus mode is off, or the suite or an ancestor is marked `only`
    pub focused_by_ancestry: bool,
    /// The pattern matches the suite's name or an ancestor's name
    pub path_matches: bool,
}

/// Outcome for a single bench
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchDecision {
    /// Measure it
    Run,
    /// Count it as skipped
    Skip,
    /// Count it as pending work
    Todo,
}

impl Selection {
    /// Derive the selection for `tree`; focus mode is fixed here for the whole run
    pub fn new(tree: &Suite, pattern: Option<Regex>) -> Self {
        Self {
            pattern,
            focus: tree.has_only(),
        }
    }

    /// Whether any node in the tree is marked `only`
    pub fn focus(&self) -> bool {
        self.focus
    }

    /// Name pattern, if any
    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Decide whether `suite` is entered at all.
    ///
    /// `ancestors` runs from the root down to the suite's parent.
    pub fn enter_suite(&self, suite: &Suite, ancestors: &[&Suite]) -> Result<SuiteScope, Exclusion> {
        if suite.mode == SuiteMode::Skip {
            return Err(Exclusion::Skipped);
        }

        let ancestor_matches = self
            .pattern
            .as_ref()
            .is_some_and(|re| ancestors.iter().any(|a| name_matches(a, re)));

        if let Some(re) = &self.pattern {
            if !ancestor_matches && !subtree_matches(suite, re) {
                return Err(Exclusion::NoPatternMatch);
            }
        }

        let focused_by_ancestry = !self.focus
            || suite.mode == SuiteMode::Only
            || ancestors.iter().any(|a| a.mode == SuiteMode::Only);

        if !focused_by_ancestry && !suite.has_only() {
            return Err(Exclusion::OutOfFocus);
        }

        let path_matches = ancestor_matches
            || self.pattern.as_ref().is_some_and(|re| name_matches(suite, re));

        Ok(SuiteScope {
            focused_by_ancestry,
            path_matches,
        })
    }

    /// Decide a direct bench of an entered suite
    pub fn bench_decision(&self, bench: &BenchCase, scope: &SuiteScope) -> BenchDecision {
        match bench.mode {
            BenchMode::Skip => return BenchDecision::Skip,
            BenchMode::Todo => return BenchDecision::Todo,
            BenchMode::Run | BenchMode::Only => {}
        }

        if self.focus && bench.mode != BenchMode::Only && !scope.focused_by_ancestry {
            return BenchDecision::Skip;
        }

        if let Some(re) = &self.pattern {
            if !scope.path_matches && !re.is_match(&bench.name) {
                return BenchDecision::Skip;
            }
        }

        BenchDecision::Run
    }
}

/// Whether the pattern matches the suite's name, a direct bench, or anything below
pub fn subtree_matches(suite: &Suite, re: &Regex) -> bool {
    name_matches(suite, re)
        || suite.benches.iter().any(|b| re.is_match(&b.name))
        || suite.children.iter().any(|c| subtree_matches(c, re))
}

/// The synthetic root has no displayable name and never matches
fn name_matches(suite: &Suite, re: &Regex) -> bool {
    !suite.is_root() && re.is_match(&suite.name)
}

/// Render the plan as a tree without executing anything
pub fn render_plan(selection: &Selection, tree: &Suite) -> String {
    let mut output = String::new();
    let mut selected = 0;
    render_suite(selection, tree, &[], true, 0, &mut output, &mut selected);
    let _ = writeln!(output, "{} benches selected.", selected);
    output
}

fn render_suite(
    selection: &Selection,
    suite: &Suite,
    ancestors: &[&Suite],
    active: bool,
    depth: usize,
    output: &mut String,
    selected: &mut usize,
) {
    let scope = if active {
        selection.enter_suite(suite, ancestors).ok()
    } else {
        None
    };

    let indent = "│   ".repeat(depth.saturating_sub(1));
    if !suite.is_root() {
        let marker = if scope.is_some() { "" } else { " (skipped)" };
        let _ = writeln!(output, "{}├── {} [{}]{}", indent, suite.name, suite.mode, marker);
    }

    let bench_indent = if suite.is_root() {
        String::new()
    } else {
        "│   ".repeat(depth)
    };
    for bench in &suite.benches {
        let decision = match &scope {
            Some(scope) => selection.bench_decision(bench, scope),
            None => BenchDecision::Skip,
        };
        let label = match decision {
            BenchDecision::Run => {
                *selected += 1;
                "run"
            }
            BenchDecision::Skip => "skip",
            BenchDecision::Todo => "todo",
        };
        let _ = writeln!(output, "{}├── {} ({})", bench_indent, bench.name, label);
    }

    let mut chain = ancestors.to_vec();
    chain.push(suite);
    for child in &suite.children {
        render_suite(
            selection,
            child,
            &chain,
            scope.is_some(),
            depth + 1,
            output,
            selected,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchpress_core::{BenchFn, Collector, SuiteBuilder};

    fn tree(register: fn(&mut SuiteBuilder<'_>)) -> Suite {
        let mut collector = Collector::new();
        register(&mut collector.builder());
        collector.finish().unwrap()
    }

    fn focused_tree() -> Suite {
        tree(|s| {
            s.describe("plain", |s| {
                s.bench("p1", || {});
            });
            s.describe("holder", |s| {
                s.bench("h1", || {});
                s.bench_only("h2", || {});
                s.describe("inner", |s| {
                    s.bench("i1", || {});
                });
            });
            s.describe_only("focused", |s| {
                s.bench("f1", || {});
                s.bench_skip("f2", || {});
                s.bench_todo("f3");
                s.describe("deep", |s| {
                    s.bench("d1", || {});
                });
            });
        })
    }

    fn decisions(selection: &Selection, suite: &Suite, ancestors: &[&Suite]) -> Vec<BenchDecision> {
        let scope = selection.enter_suite(suite, ancestors).unwrap();
        suite
            .benches
            .iter()
            .map(|b| selection.bench_decision(b, &scope))
            .collect()
    }

    #[test]
    fn test_no_filters_runs_everything_runnable() {
        let root = tree(|s| {
            s.describe("a", |s| {
                s.bench("x", || {});
                s.bench_skip("y", || {});
                s.bench_todo("z");
            });
        });
        let selection = Selection::new(&root, None);
        assert!(!selection.focus());

        let suite = &root.children[0];
        assert_eq!(
            decisions(&selection, suite, &[&root]),
            [BenchDecision::Run, BenchDecision::Skip, BenchDecision::Todo]
        );
    }

    #[test]
    fn test_skipped_suite_is_excluded() {
        let root = tree(|s| {
            s.describe_skip("gone", |s| {
                s.bench_only("would focus", || {});
            });
        });
        let selection = Selection::new(&root, None);
        assert_eq!(
            selection.enter_suite(&root.children[0], &[&root]),
            Err(Exclusion::Skipped)
        );
    }

    #[test]
    fn test_focus_excludes_unfocused_suites() {
        let root = focused_tree();
        let selection = Selection::new(&root, None);
        assert!(selection.focus());

        assert_eq!(
            selection.enter_suite(&root.children[0], &[&root]),
            Err(Exclusion::OutOfFocus)
        );
    }

    #[test]
    fn test_focused_bench_runs_alone_in_its_suite() {
        let root = focused_tree();
        let selection = Selection::new(&root, None);
        let holder = &root.children[1];

        assert_eq!(
            decisions(&selection, holder, &[&root]),
            [BenchDecision::Skip, BenchDecision::Run]
        );
        // a sibling subtree without focus is out
        assert_eq!(
            selection.enter_suite(&holder.children[0], &[&root, holder]),
            Err(Exclusion::OutOfFocus)
        );
    }

    #[test]
    fn test_focused_suite_runs_all_its_benches_and_descendants() {
        let root = focused_tree();
        let selection = Selection::new(&root, None);
        let focused = &root.children[2];

        assert_eq!(
            decisions(&selection, focused, &[&root]),
            [BenchDecision::Run, BenchDecision::Skip, BenchDecision::Todo]
        );
        assert_eq!(
            decisions(&selection, &focused.children[0], &[&root, focused]),
            [BenchDecision::Run]
        );
    }

    #[test]
    fn test_pattern_matches_suite_name() {
        let root = tree(|s| {
            s.describe("Focused Suite", |s| {
                s.bench("A benchmark in a focused suite", || {});
                s.bench("Another benchmark", || {});
            });
            s.describe("Unfocused Suite", |s| {
                s.bench("A benchmark in an unfocused suite", || {});
            });
        });
        let selection = Selection::new(&root, Some(Regex::new("Focused").unwrap()));

        assert_eq!(
            decisions(&selection, &root.children[0], &[&root]),
            [BenchDecision::Run, BenchDecision::Run]
        );
        // case-sensitive: "Unfocused" does not contain "Focused"
        assert_eq!(
            selection.enter_suite(&root.children[1], &[&root]),
            Err(Exclusion::NoPatternMatch)
        );
    }

    #[test]
    fn test_pattern_matches_individual_benches() {
        let root = tree(|s| {
            s.describe("strings", |s| {
                s.bench("includes", || {});
                s.bench("index_of", || {});
                s.bench("regex", || {});
            });
        });
        let selection = Selection::new(&root, Some(Regex::new("^in").unwrap()));

        assert_eq!(
            decisions(&selection, &root.children[0], &[&root]),
            [BenchDecision::Run, BenchDecision::Run, BenchDecision::Skip]
        );
    }

    #[test]
    fn test_ancestor_match_runs_nested_benches() {
        let root = tree(|s| {
            s.describe("parsing", |s| {
                s.describe("json", |s| {
                    s.bench("small", || {});
                    s.bench("large", || {});
                });
            });
        });
        let selection = Selection::new(&root, Some(Regex::new("pars").unwrap()));
        let parsing = &root.children[0];

        assert_eq!(
            decisions(&selection, &parsing.children[0], &[&root, parsing]),
            [BenchDecision::Run, BenchDecision::Run]
        );
    }

    #[test]
    fn test_pattern_never_matches_root() {
        let root = tree(|s| {
            s.describe("suite", |s| {
                s.bench("bench", || {});
            });
        });
        let selection = Selection::new(&root, Some(Regex::new("root").unwrap()));
        assert_eq!(selection.enter_suite(&root, &[]), Err(Exclusion::NoPatternMatch));
    }

    #[test]
    fn test_pattern_and_focus_compose() {
        let root = tree(|s| {
            s.describe("alpha", |s| {
                s.bench_only("fast", || {});
                s.bench_only("slow", || {});
                s.bench("fast too", || {});
            });
        });
        let selection = Selection::new(&root, Some(Regex::new("fast").unwrap()));

        assert_eq!(
            decisions(&selection, &root.children[0], &[&root]),
            [BenchDecision::Run, BenchDecision::Skip, BenchDecision::Skip]
        );
    }

    #[test]
    fn test_decisions_are_idempotent() {
        let root = focused_tree();
        let selection = Selection::new(&root, Some(Regex::new("1").unwrap()));
        let first = render_plan(&selection, &root);
        let second = render_plan(&Selection::new(&root, Some(Regex::new("1").unwrap())), &root);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_plan() {
        let root = focused_tree();
        let plan = render_plan(&Selection::new(&root, None), &root);

        assert!(plan.contains("├── plain [run] (skipped)"));
        assert!(plan.contains("├── h2 (run)"));
        assert!(plan.contains("├── f3 (todo)"));
        assert!(plan.contains("├── d1 (run)"));
        assert!(plan.ends_with("3 benches selected.\n"));
    }

    #[test]
    fn test_bench_fn_is_not_invoked_by_planning() {
        let root = tree(|s| {
            s.describe("a", |s| {
                s.add_bench(
                    "panics if called",
                    BenchMode::Run,
                    BenchFn::new(|| panic!("planning must not execute benches")),
                    None,
                );
            });
        });
        let plan = render_plan(&Selection::new(&root, None), &root);
        assert!(plan.contains("1 benches selected."));
    }
}
