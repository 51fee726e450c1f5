use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dtrcraft_core::{DetectionSummary, Detector, DtrConfig, ProblemType, Severity};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "dtrlint")]
#[command(about = "Flags missing punches, implausible hours and weekend attendance in DTR records", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the attendance listing (JSON array or {"data": [...]})
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Show only records that have problems
    #[arg(short, long)]
    problems_only: bool,

    /// Show only records whose worst problem is at least this severe
    #[arg(short, long, value_enum)]
    min_severity: Option<SeverityArg>,

    /// Show only records with this problem type (e.g. missing_time_out)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    problem_type: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for CI/CD integration
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeverityArg {
    Low,
    Medium,
    High,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Low => Severity::Low,
            SeverityArg::Medium => Severity::Medium,
            SeverityArg::High => Severity::High,
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_problem_type(name: &str) -> Result<ProblemType> {
    serde_json::from_value(serde_json::Value::String(name.to_string()))
        .with_context(|| format!("Unknown problem type: {}", name))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DtrConfig::load(cli.config.as_deref())?;

    let type_filter = cli.problem_type.as_deref().map(parse_problem_type).transpose()?;

    let records = dtrcraft_core::load_records(&cli.file)
        .with_context(|| format!("Failed to load records: {}", cli.file.display()))?;

    let detector = Detector::with_config(config);
    tracing::debug!(
        records = records.len(),
        rules = detector.rules().len(),
        "running detector"
    );
    let reports = detector.detect_all(&records);

    // Summary always covers the whole listing
    let summary = DetectionSummary::from_reports(&reports);

    let min_severity = cli.min_severity.map(Severity::from);
    let shown: Vec<_> = reports
        .iter()
        .filter(|r| !cli.problems_only || !r.is_clean())
        .filter(|r| min_severity.is_none_or(|min| r.severity.is_some_and(|s| s >= min)))
        .filter(|r| {
            type_filter.is_none_or(|t| r.problems.iter().any(|p| p.problem_type == t))
        })
        .collect();

    match cli.format {
        OutputFormat::Human => {
            formatter::print_human(&cli.file, &shown, &summary);
        }
        OutputFormat::Json => {
            formatter::print_json(&cli.file, &shown, &summary)?;
        }
    }

    // Exit with appropriate code
    let exit_code = if summary.by_severity.contains_key(&Severity::High) {
        1
    } else {
        0 // Medium and low problems are advisory
    };

    std::process::exit(exit_code);
}
