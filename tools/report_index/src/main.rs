//! Report index CLI
//!
//! Flattens a `GET /patients` snapshot into the report index and prints the
//! rows that match the given filters.
//!
//! Usage:
//!   report_index <snapshot.json> [--search <term>] [--patient <name>] [--type <REPORT_TYPE>]
//!                [--format json|csv] [--config <config.json>]

use clap::{Parser, ValueEnum};
use medlens_core::config::EngineConfig;
use medlens_core::error::CoreResult;
use medlens_core::records::filter::{apply_filters, DateRange, FilterCriteria};
use medlens_core::records::index::{build_index, ReportStats};
use medlens_core::records::model::ReportType;
use medlens_core::records::parser::parse_patients;
use medlens_core::viewer::detail::ReportCardSummary;
use medlens_core::viewer::render::render_index_csv;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "report_index")]
#[command(about = "Search and filter every patient's reports", long_about = None)]
struct Cli {
    /// Patients snapshot (body of GET /patients)
    snapshot: PathBuf,

    /// Case-insensitive match on filename or patient name
    #[arg(long, default_value = "")]
    search: String,

    /// Case-insensitive match on patient name only
    #[arg(long, default_value = "")]
    patient: String,

    /// PDF_NER, XRAY_ANALYSIS or XRAY_COMPARISON
    #[arg(long = "type", value_parser = parse_report_type)]
    report_type: Option<ReportType>,

    /// Accepted for compatibility; not applied
    #[arg(long, default_value = "all", value_parser = parse_date_range)]
    date_range: DateRange,

    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Engine config file (defaults to $MEDLENS_CONFIG, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            std::process::exit(2);
        }
    };
    init_tracing(&config);

    match run(&cli) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("report_index error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> CoreResult<String> {
    let raw = std::fs::read_to_string(&cli.snapshot)?;
    let patients = parse_patients(&raw)?;
    let index = build_index(&patients);

    let criteria = FilterCriteria {
        search_term: cli.search.clone(),
        patient_name: cli.patient.clone(),
        report_type: cli.report_type,
        date_range: cli.date_range,
        ..Default::default()
    };
    let rows = apply_filters(&index, &criteria);
    tracing::info!(
        total = index.len(),
        shown = rows.len(),
        active_filters = criteria.has_active_filters(),
        "report index ready"
    );

    match cli.format {
        OutputFormat::Csv => render_index_csv(&rows),
        OutputFormat::Json => {
            let reports: Vec<_> = rows
                .iter()
                .map(|row| {
                    json!({
                        "report": row,
                        "patient_label": row.patient_label(),
                        "type_display": row.report_type().display_name(),
                        "card": ReportCardSummary::of(&row.report).describe(),
                    })
                })
                .collect();
            let out = json!({
                "stats": ReportStats::of(&index),
                "criteria": criteria,
                "showing": rows.len(),
                "total": index.len(),
                "reports": reports,
            });
            Ok(serde_json::to_string_pretty(&out)?)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> CoreResult<EngineConfig> {
    match path {
        Some(p) => EngineConfig::load(p),
        None => EngineConfig::from_env(),
    }
}

fn init_tracing(config: &EngineConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_report_type(s: &str) -> Result<ReportType, String> {
    s.parse().map_err(|e: medlens_core::error::CoreError| e.to_string())
}

fn parse_date_range(s: &str) -> Result<DateRange, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("invalid date range: {} (all|today|week|month|custom)", s))
}
