use crate::error::{CoreError, CoreResult};
use crate::ner::grouping::{group_entities, EntityGroups};
use crate::records::model::{IndexedReport, Report, ResultsPayload};
use crate::xray::model::{FilterBy, Pathology, PathologySummary, SortBy};
use crate::xray::ranking::rank_pathologies;
use serde::Serialize;

pub const NO_COMPARISON_REPORT: &str = "No comparison report available.";

/// Everything a report's detail view shows, derived from its results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportDetail {
    Entities {
        groups: EntityGroups,
        medical_count: usize,
    },
    Pathologies {
        ranked: Vec<Pathology>,
        detected: Vec<Pathology>,
        summary: PathologySummary,
        generated_report: String,
    },
    Comparison {
        comparison_report: String,
    },
}

/// The one place that interprets a report's results payload.
pub fn build_report_detail(
    report: &Report,
    sort_by: SortBy,
    filter_by: FilterBy,
) -> ReportDetail {
    match &report.results {
        ResultsPayload::Ner { entities } => {
            let groups = group_entities(entities);
            let medical_count = groups.entity_count();
            ReportDetail::Entities {
                groups,
                medical_count,
            }
        }
        ResultsPayload::XrayAnalysis {
            pathologies,
            generated_report,
        } => ReportDetail::Pathologies {
            ranked: rank_pathologies(pathologies, sort_by, filter_by),
            detected: pathologies.iter().filter(|p| p.detected).cloned().collect(),
            summary: PathologySummary::of(pathologies),
            generated_report: generated_report.clone(),
        },
        ResultsPayload::XrayComparison { comparison_report } => ReportDetail::Comparison {
            comparison_report: if comparison_report.is_empty() {
                NO_COMPARISON_REPORT.to_string()
            } else {
                comparison_report.clone()
            },
        },
    }
}

/// One-line digest shown on a report's card in the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportCardSummary {
    Entities { count: usize },
    Pathologies { detected: usize, total: usize },
    Comparison { has_report: bool },
}

impl ReportCardSummary {
    pub fn of(report: &Report) -> Self {
        match &report.results {
            ResultsPayload::Ner { entities } => Self::Entities {
                count: entities.len(),
            },
            ResultsPayload::XrayAnalysis { pathologies, .. } => {
                let summary = PathologySummary::of(pathologies);
                Self::Pathologies {
                    detected: summary.detected,
                    total: summary.total,
                }
            }
            ResultsPayload::XrayComparison { comparison_report } => Self::Comparison {
                has_report: !comparison_report.is_empty(),
            },
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Entities { count } => format!("{} entities", count),
            Self::Pathologies { detected, total } => {
                format!("{}/{} pathologies detected", detected, total)
            }
            Self::Comparison { has_report: true } => "Comparison complete".to_string(),
            Self::Comparison { has_report: false } => "No comparison data".to_string(),
        }
    }
}

/// Locate a report by id. Report ids are only unique per patient, so without a
/// `patient_id` the id must match exactly one row.
pub fn find_report(
    index: &[IndexedReport],
    patient_id: Option<i64>,
    report_id: i64,
) -> CoreResult<&IndexedReport> {
    let mut matches = index
        .iter()
        .filter(|row| row.id() == report_id)
        .filter(|row| patient_id.map_or(true, |p| row.patient_id == p));
    let first = matches.next().ok_or(CoreError::ReportNotFound(report_id))?;
    if matches.next().is_some() {
        return Err(CoreError::InvalidInput(format!(
            "report id {} belongs to more than one patient; pass a patient id",
            report_id
        )));
    }
    Ok(first)
}
