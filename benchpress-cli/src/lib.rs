#![warn(missing_docs)]
//! Benchpress CLI Library
//!
//! Selection, execution and the command-line front end for benchmark
//! binaries. Use `benchpress::run()` (or `benchpress_cli::run()`) in your main
//! function to collect every linked `#[bench_file]`, filter it and measure it.
//!
//! # Example
//!
//! ```ignore
//! use benchpress::prelude::*;
//!
//! #[bench_file]
//! fn strings(s: &mut SuiteBuilder<'_>) {
//!     s.describe("String Matching", |s| {
//!         s.bench("includes", || {
//!             black_box("hello world".contains("world"));
//!         });
//!     });
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     benchpress::run()
//! }
//! ```

mod config;
mod console;
mod executor;
mod planner;

pub use config::{
    BenchpressConfig, CONFIG_FILE_NAME, ConfigError, DiscoveryConfig, OutputConfig, RunnerConfig,
};
pub use console::OutputSilencer;
pub use executor::{
    ExecutionError, MeasurementBatch, MeasurementEngine, Runner, SamplingEngine, Task,
    compute_statistics,
};
pub use planner::{BenchDecision, Exclusion, Selection, SuiteScope, render_plan, subtree_matches};

use anyhow::Context;
use benchpress_core::{BenchFileDef, Collector, MeasurementSettings, Suite, registered_files};
use benchpress_report::{JsonReporter, OutputFormat, PrettyReporter, Reporter, RunSummary};
use clap::{Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;

/// Benchpress CLI arguments
#[derive(Parser, Debug)]
#[command(name = "benchpress")]
#[command(author, version, about = "Benchpress - declarative benchmark suites for Rust")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Reporter: pretty or json
    #[arg(short, long)]
    pub reporter: Option<String>,

    /// Output file for the json reporter
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Glob selecting bench files by source path
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Only run suites and benches whose names match this regex
    #[arg(short, long)]
    pub grep: Option<String>,

    /// Minimum measurement time per bench (e.g., "500ms", "1s")
    #[arg(long)]
    pub time: Option<String>,

    /// Minimum warm-up time per bench
    #[arg(long)]
    pub warmup_time: Option<String>,

    /// Minimum measured iterations per bench
    #[arg(long)]
    pub iterations: Option<u64>,

    /// Minimum warm-up iterations per bench
    #[arg(long)]
    pub warmup_iterations: Option<u64>,

    /// Hard cap on measured iterations per bench
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Let bench output through to the terminal while measuring
    #[arg(long)]
    pub no_silence: bool,

    /// Configuration file (default: discover benchpress.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Print the planned suite tree without measuring anything
    List,
    /// Run benchmarks (default)
    Run,
}

/// Everything a run needs, after config and flags are merged
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Bench file selection
    pub pattern: glob::Pattern,
    /// Name filter
    pub grep: Option<Regex>,
    /// Reporter to use
    pub format: OutputFormat,
    /// JSON destination (required for the json reporter)
    pub json_path: Option<PathBuf>,
    /// Run-wide measurement defaults
    pub settings: MeasurementSettings,
    /// Discard bench output while measuring
    pub silence_output: bool,
}

impl RunOptions {
    /// Merge configuration with command-line flags; flags win
    pub fn resolve(cli: &Cli, config: &BenchpressConfig) -> anyhow::Result<Self> {
        let pattern_src = cli.pattern.as_deref().unwrap_or(&config.discovery.pattern);
        let pattern = glob::Pattern::new(pattern_src)
            .with_context(|| format!("invalid file pattern `{pattern_src}`"))?;

        let grep = cli
            .grep
            .as_deref()
            .map(|g| Regex::new(g).with_context(|| format!("invalid name pattern `{g}`")))
            .transpose()?;

        let reporter = cli.reporter.as_deref().unwrap_or(&config.output.reporter);
        let format: OutputFormat = reporter.parse().map_err(anyhow::Error::msg)?;
        let json_path = cli
            .output
            .clone()
            .or_else(|| config.output.json_path.as_ref().map(PathBuf::from));
        if format == OutputFormat::Json && json_path.is_none() {
            anyhow::bail!("the json reporter requires an output file (--output)");
        }

        let mut settings = config.measurement_settings()?;
        if let Some(time) = &cli.time {
            settings.time = BenchpressConfig::parse_duration(time)?;
        }
        if let Some(time) = &cli.warmup_time {
            settings.warmup_time = BenchpressConfig::parse_duration(time)?;
        }
        if let Some(n) = cli.iterations {
            settings.iterations = n;
        }
        if let Some(n) = cli.warmup_iterations {
            settings.warmup_iterations = n;
        }
        if cli.max_iterations.is_some() {
            settings.max_iterations = cli.max_iterations;
        }

        Ok(Self {
            pattern,
            grep,
            format,
            json_path,
            settings,
            silence_output: config.runner.silence_output && !cli.no_silence,
        })
    }
}

/// Run the Benchpress CLI with the given arguments.
/// This is the main entry point for benchmark binaries.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the Benchpress CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    // Discover benchpress.toml configuration (CLI flags override)
    let config = match &cli.config {
        Some(path) => BenchpressConfig::load(path)?,
        None => BenchpressConfig::discover()?.unwrap_or_default(),
    };
    let options = RunOptions::resolve(&cli, &config)?;

    let files = select_files(&registered_files(), &options.pattern);
    tracing::debug!(files = files.len(), pattern = %options.pattern, "discovered bench files");
    let tree = Collector::collect(files.iter().copied())?;

    match cli.command {
        Some(Commands::List) => {
            let selection = Selection::new(&tree, options.grep.clone());
            print!("{}", render_plan(&selection, &tree));
            Ok(())
        }
        Some(Commands::Run) | None => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            let engine = SamplingEngine::new(options.settings);
            runtime.block_on(execute_run(&tree, files.len(), &options, engine))?;
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "benchpress=debug"
    } else {
        "benchpress=info"
    };
    // a host process may already have installed a subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Registered files whose source path matches `pattern`, in input order
pub fn select_files<'a>(files: &[&'a BenchFileDef], pattern: &glob::Pattern) -> Vec<&'a BenchFileDef> {
    files
        .iter()
        .copied()
        .filter(|def| pattern.matches(def.file))
        .collect()
}

/// Execute `tree` with `engine` and the reporter selected in `options`
pub async fn execute_run<E: MeasurementEngine>(
    tree: &Suite,
    files: usize,
    options: &RunOptions,
    engine: E,
) -> anyhow::Result<RunSummary> {
    let mut reporter: Box<dyn Reporter> = match (options.format, &options.json_path) {
        (OutputFormat::Pretty, _) => Box::new(PrettyReporter::stdout()),
        (OutputFormat::Json, Some(path)) => Box::new(JsonReporter::new(path)),
        (OutputFormat::Json, None) => {
            anyhow::bail!("the json reporter requires an output file (--output)")
        }
    };

    let selection = Selection::new(tree, options.grep.clone());
    let summary = Runner::new(engine, selection, reporter.as_mut())
        .silence_output(options.silence_output)
        .run(tree, files)
        .await?;

    if let (OutputFormat::Json, Some(path)) = (options.format, &options.json_path) {
        tracing::info!(path = %path.display(), "json report written");
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchpress_core::SuiteBuilder;
    use std::time::Duration;

    fn register_nothing(_: &mut SuiteBuilder<'_>) {}

    static FILES: [BenchFileDef; 3] = [
        BenchFileDef {
            name: "arrays",
            file: "benches/arrays.rs",
            line: 1,
            module_path: "fixtures",
            register_fn: register_nothing,
        },
        BenchFileDef {
            name: "strings",
            file: "benches/strings.rs",
            line: 1,
            module_path: "fixtures",
            register_fn: register_nothing,
        },
        BenchFileDef {
            name: "helpers",
            file: "src/helpers.rs",
            line: 1,
            module_path: "fixtures",
            register_fn: register_nothing,
        },
    ];

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("benchpress").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_flags() {
        let cli = cli(&["-r", "json", "-o", "out.json", "-g", "^sort", "--no-silence", "list"]);
        assert_eq!(cli.reporter.as_deref(), Some("json"));
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert_eq!(cli.grep.as_deref(), Some("^sort"));
        assert!(cli.no_silence);
        assert_eq!(cli.command, Some(Commands::List));
    }

    #[test]
    fn test_resolve_defaults() {
        let options = RunOptions::resolve(&cli(&[]), &BenchpressConfig::default()).unwrap();
        assert_eq!(options.format, OutputFormat::Pretty);
        assert!(options.grep.is_none());
        assert!(options.silence_output);
        assert_eq!(options.settings, MeasurementSettings::default());
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = BenchpressConfig::default();
        config.runner.iterations = 50;
        config.runner.time = "2s".into();

        let options = RunOptions::resolve(
            &cli(&["--iterations", "3", "--warmup-time", "0ms", "--no-silence"]),
            &config,
        )
        .unwrap();
        assert_eq!(options.settings.iterations, 3);
        assert_eq!(options.settings.time, Duration::from_secs(2));
        assert_eq!(options.settings.warmup_time, Duration::ZERO);
        assert!(!options.silence_output);
    }

    #[test]
    fn test_json_requires_output_path() {
        let err = RunOptions::resolve(&cli(&["-r", "json"]), &BenchpressConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--output"));

        let mut config = BenchpressConfig::default();
        config.output.json_path = Some("target/report.json".into());
        let options = RunOptions::resolve(&cli(&["-r", "json"]), &config).unwrap();
        assert_eq!(options.json_path, Some(PathBuf::from("target/report.json")));
    }

    #[test]
    fn test_invalid_patterns_are_errors() {
        let config = BenchpressConfig::default();
        assert!(RunOptions::resolve(&cli(&["-g", "(unclosed"]), &config).is_err());
        assert!(RunOptions::resolve(&cli(&["-p", "[z-a"]), &config).is_err());
        assert!(RunOptions::resolve(&cli(&["-r", "html"]), &config).is_err());
    }

    #[test]
    fn test_select_files_by_glob() {
        let all: Vec<&BenchFileDef> = FILES.iter().collect();

        let everything = select_files(&all, &glob::Pattern::new("**/*").unwrap());
        assert_eq!(everything.len(), 3);

        let benches = select_files(&all, &glob::Pattern::new("benches/*.rs").unwrap());
        let names: Vec<_> = benches.iter().map(|f| f.name).collect();
        assert_eq!(names, ["arrays", "strings"]);
    }

    #[tokio::test]
    async fn test_execute_run_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        let mut collector = Collector::new();
        collector.builder().describe("math", |s| {
            s.bench("add", || {
                std::hint::black_box(1 + 1);
            });
        });
        let tree = collector.finish().unwrap();

        let options = RunOptions {
            pattern: glob::Pattern::new("**/*").unwrap(),
            grep: None,
            format: OutputFormat::Json,
            json_path: Some(path.clone()),
            settings: MeasurementSettings {
                time: Duration::ZERO,
                warmup_time: Duration::ZERO,
                iterations: 5,
                warmup_iterations: 1,
                max_iterations: Some(5),
            },
            silence_output: false,
        };
        let engine = SamplingEngine::new(options.settings);
        let summary = execute_run(&tree, 1, &options, engine).await.unwrap();
        assert_eq!(summary.stats.benches_run, 1);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["results"][0]["suite"], "math");
        assert_eq!(json["results"][0]["tasks"][0]["samples"], 5);
    }
}
