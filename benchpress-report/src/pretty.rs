//! Pretty Output
//!
//! Renders a tree view grouped by source file once the run completes:
//!
//! ```text
//! benches/example.rs
//!   │
//!   ├─ String Matching
//!   │  ✓ includes        41 ns/op ±0.52%  24,390,243 ops/sec ±0.51% (100 samples)
//!   │
//!   └─ Array Sorting
//!      ✓ sort           812 ns/op ±1.02%   1,231,527 ops/sec ±1.01% (100 samples)
//! ```
//!
//! followed by a summary block. The name column is aligned across the whole run.

use crate::report::{RunSummary, SuiteReport, TaskResult};
use crate::{ReportError, Reporter};
use colored::{ColoredString, Colorize};
use std::io::Write;
use std::path::Path;

/// Tree reporter writing to any sink (stdout by default)
pub struct PrettyReporter<W: Write> {
    out: W,
    styled: bool,
    suites: Vec<SuiteReport>,
}

impl PrettyReporter<std::io::Stdout> {
    /// Styled reporter printing to stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout()).styled(true)
    }
}

impl<W: Write> PrettyReporter<W> {
    /// Plain reporter printing to `out`
    pub fn new(out: W) -> Self {
        Self {
            out,
            styled: false,
            suites: Vec::new(),
        }
    }

    /// Toggle terminal styling; `colored` still honours `NO_COLOR` and non-tty sinks
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Give back the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.styled {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn write_tree(&mut self) -> std::io::Result<()> {
        let width = self
            .suites
            .iter()
            .flat_map(|s| &s.results)
            .map(|r| r.name.chars().count())
            .max()
            .unwrap_or(0)
            + 2;

        // files in first-seen order
        let mut files: Vec<(Option<&str>, Vec<&SuiteReport>)> = Vec::new();
        for suite in &self.suites {
            let file = suite.file.as_deref();
            match files.iter_mut().find(|(f, _)| *f == file) {
                Some((_, group)) => group.push(suite),
                None => files.push((file, vec![suite])),
            }
        }

        let mut text = String::new();
        for (file, group) in &files {
            if let Some(file) = file {
                text.push_str(&self.file_header(file));
            }
            for (i, suite) in group.iter().enumerate() {
                text.push_str(&self.suite_block(suite, width, i + 1 == group.len()));
            }
        }
        self.out.write_all(text.as_bytes())
    }

    fn file_header(&self, file: &str) -> String {
        let path = Path::new(file);
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.to_string());
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| format!("{}/", p.display()))
            .unwrap_or_default();
        format!(
            "\n{}{}\n  {}\n",
            self.paint(&dir, |s| s.dimmed()),
            self.paint(&base, |s| s.bold()),
            self.paint("│", |s| s.dimmed())
        )
    }

    fn suite_block(&self, suite: &SuiteReport, width: usize, last: bool) -> String {
        let separator = self.paint(" › ", |s| s.dimmed());
        let name = suite
            .path
            .iter()
            .map(|p| self.paint(p, |s| s.bold()))
            .collect::<Vec<_>>()
            .join(&separator);
        let (branch, rail) = if last { ("└─", "  ") } else { ("├─", "│ ") };

        let mut block = format!("  {} {}\n", self.paint(branch, |s| s.dimmed()), name);
        for result in &suite.results {
            block.push_str(&format!(
                "  {} {}\n",
                self.paint(rail, |s| s.dimmed()),
                self.task_line(result, width)
            ));
        }
        if !last {
            block.push_str(&format!("  {}\n", self.paint("│", |s| s.dimmed())));
        }
        block
    }

    fn task_line(&self, result: &TaskResult, width: usize) -> String {
        format!(
            "{} {}{} ns/op {}  {} ops/sec {} {}",
            self.paint("✓", |s| s.green()),
            self.paint(&format!("{:<width$}", result.name), |s| s.cyan()),
            self.paint(&format!("{:>10}", format_thousands(result.latency.mean)), |s| s.green()),
            self.paint(&format!("±{:.2}%", result.latency.rme), |s| s.dimmed()),
            self.paint(&format!("{:>10}", format_thousands(result.throughput.mean)), |s| s.yellow()),
            self.paint(&format!("±{:.2}%", result.throughput.rme), |s| s.dimmed()),
            self.paint(&format!("({} samples)", result.samples), |s| s.dimmed()),
        )
    }
}

impl<W: Write> Reporter for PrettyReporter<W> {
    fn on_suite(&mut self, report: &SuiteReport) -> Result<(), ReportError> {
        if !report.results.is_empty() {
            self.suites.push(report.clone());
        }
        Ok(())
    }

    fn on_finish(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.write_tree()?;
        write!(self.out, "{}", format_summary(summary))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Round to an integer and group digits by thousands
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{}", rounded.abs() as u128);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

/// Render the end-of-run summary block
///
/// Zero counts are omitted; the total is always shown.
pub fn format_summary(summary: &RunSummary) -> String {
    let stats = &summary.stats;

    let suites = join_counts(&[
        (stats.suites_run, "run"),
        (stats.suites_skipped, "skip"),
    ], stats.total_suites());
    let benches = join_counts(&[
        (stats.benches_run, "run"),
        (stats.benches_skipped, "skip"),
        (stats.benches_todo, "todo"),
    ], stats.total_benches());
    let files = format!(
        "{} file{}",
        summary.files,
        if summary.files == 1 { "" } else { "s" }
    );

    let mut output = String::new();
    output.push_str(&format!("\n  Suites:   {}\n", suites));
    output.push_str(&format!("  Benches:  {}\n", benches));
    if !stats.todo.is_empty() {
        output.push_str(&format!("  Todo:     {}\n", stats.todo.join(", ")));
    }
    output.push_str(&format!("  Files:    {}\n", files));
    output.push_str(&format!(
        "  Time:     {:.2}s\n",
        summary.total_duration_ms / 1000.0
    ));
    output
}

fn join_counts(counts: &[(usize, &str)], total: usize) -> String {
    let mut parts: Vec<String> = counts
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{} {}", n, label))
        .collect();
    parts.push(format!("{} total", total));
    parts.join(", ")
}
