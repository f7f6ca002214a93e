//! Report detail CLI
//!
//! Renders one report from a patients snapshot as Markdown: grouped medical
//! entities for NER reports, ranked pathologies for X-ray analyses, or the
//! comparison text.

use clap::Parser;
use medlens_core::config::EngineConfig;
use medlens_core::error::{CoreError, CoreResult};
use medlens_core::records::index::build_index;
use medlens_core::records::parser::parse_patients;
use medlens_core::viewer::detail::{build_report_detail, find_report};
use medlens_core::viewer::render::render_report_detail_markdown;
use medlens_core::xray::model::{FilterBy, SortBy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "report_view")]
#[command(about = "Render a single report's analysis results", long_about = None)]
struct Cli {
    /// Patients snapshot (body of GET /patients)
    snapshot: PathBuf,

    /// Report id
    report_id: i64,

    /// Owning patient id; required when the report id is shared between patients
    #[arg(long)]
    patient: Option<i64>,

    /// Pathology order: name, probability, detected
    #[arg(long, value_parser = parse_sort)]
    sort: Option<SortBy>,

    /// Pathology filter: all, detected, not-detected
    #[arg(long, value_parser = parse_filter)]
    filter: Option<FilterBy>,

    /// Emit the detail as JSON instead of Markdown
    #[arg(long)]
    json: bool,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let config = match cli.config.as_ref() {
        Some(p) => EngineConfig::load(p),
        None => EngineConfig::from_env(),
    };
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            std::process::exit(2);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli, &config) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("report_view error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, config: &EngineConfig) -> CoreResult<String> {
    let sort_by = cli.sort.unwrap_or(config.default_pathology_sort);
    let filter_by = cli.filter.unwrap_or(config.default_pathology_filter);

    let raw = std::fs::read_to_string(&cli.snapshot)?;
    let index = build_index(&parse_patients(&raw)?);
    let row = find_report(&index, cli.patient, cli.report_id)?;
    let detail = build_report_detail(&row.report, sort_by, filter_by);
    tracing::info!(
        report_id = row.id(),
        patient_id = row.patient_id,
        report_type = row.report_type().as_str(),
        "rendering report detail"
    );

    if cli.json {
        return Ok(serde_json::to_string_pretty(&detail)?);
    }
    render_report_detail_markdown(row, &detail, config)
}

fn parse_sort(s: &str) -> Result<SortBy, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}

fn parse_filter(s: &str) -> Result<FilterBy, String> {
    s.parse().map_err(|e: CoreError| e.to_string())
}
