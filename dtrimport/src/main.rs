use anyhow::Result;
use clap::{Parser, ValueEnum};
use colored::*;
use dtrcraft_core::normalizer::resolve_roles;
use dtrcraft_core::{
    ColumnRole, DtrConfig, ImportError, ImportOptions, ImportPreview, RawCell, preview_file,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dtrimport")]
#[command(about = "Validates an attendance spreadsheet and previews its normalized rows")]
#[command(version)]
struct Cli {
    /// Path to the CSV/Excel/ODS attendance file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of data rows to preview (overrides `preview_rows` from the config)
    #[arg(short, long, value_name = "N")]
    rows: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportReport<'a> {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    missing_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    column_roles: Vec<ColumnRole>,
    data_row_count: usize,
    preview: &'a [Vec<String>],
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

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = DtrConfig::load(cli.config.as_deref())?;
    let options = ImportOptions {
        preview_rows: cli.rows.unwrap_or_else(|| config.preview_rows()),
    };
    tracing::debug!(
        preview_rows = options.preview_rows,
        file = %cli.file.display(),
        "preparing import"
    );

    let result = preview_file(&cli.file, &options);

    match cli.format {
        OutputFormat::Human => print_human(&cli.file, &result),
        OutputFormat::Json => print_json(&cli.file, &result)?,
    }

    std::process::exit(if result.is_ok() { 0 } else { 1 });
}

fn column_roles(preview: &ImportPreview) -> Vec<ColumnRole> {
    let header: Vec<RawCell> = preview
        .header()
        .iter()
        .map(|h| RawCell::text(h.as_str()))
        .collect();
    resolve_roles(&header)
}

fn print_human(file: &Path, result: &Result<ImportPreview, ImportError>) {
    println!("{}", format!("Importing: {}", file.display()).bold());
    println!();

    let preview = match result {
        Ok(preview) => preview,
        Err(ImportError::MissingColumns(missing)) => {
            println!("{}", "✗ Invalid header".red().bold());
            println!("  Missing required columns: {}", missing.join(", ").yellow());
            println!(
                "  Expected columns like: {}",
                dtrcraft_core::normalizer::header::STANDARD_HEADER.join(", ")
            );
            return;
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), e.to_string().red());
            return;
        }
    };

    println!(
        "{} ({} format, {} data rows)",
        "✓ Header accepted".green().bold(),
        preview.validation.format,
        preview.data_row_count
    );
    println!();

    let roles = column_roles(preview);
    let widths: Vec<usize> = (0..roles.len())
        .map(|col| {
            preview
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(roles[col].as_str().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let role_names: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
    println!("{}", render(role_names.as_slice()).bright_black());
    println!("{}", render(preview.header()).bold());
    for row in preview.data_rows() {
        println!("{}", render(row.as_slice()));
    }

    if preview.data_row_count > preview.data_rows().len() {
        println!(
            "{}",
            format!(
                "... {} more rows",
                preview.data_row_count - preview.data_rows().len()
            )
            .bright_black()
        );
    }
}

fn print_json(file: &Path, result: &Result<ImportPreview, ImportError>) -> Result<()> {
    let report = match result {
        Ok(preview) => ImportReport {
            file: file.display().to_string(),
            valid: true,
            error: None,
            missing_columns: Vec::new(),
            format: Some(preview.validation.format.as_str()),
            column_roles: column_roles(preview),
            data_row_count: preview.data_row_count,
            preview: &preview.rows,
        },
        Err(e) => ImportReport {
            file: file.display().to_string(),
            valid: false,
            error: Some(e.to_string()),
            missing_columns: match e {
                ImportError::MissingColumns(missing) => missing.clone(),
                _ => Vec::new(),
            },
            format: None,
            column_roles: Vec::new(),
            data_row_count: 0,
            preview: &[],
        },
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
