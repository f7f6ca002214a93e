use super::model::{IndexedReport, Patient, ReportType};
use serde::Serialize;

/// Flatten every patient's reports into one list carrying patient attributes.
///
/// Most recent first: reports with a `created_at` come before those without,
/// newest timestamp first, and `id` descending breaks ties. With no timestamps
/// at all this is plain id-descending order.
pub fn build_index(patients: &[Patient]) -> Vec<IndexedReport> {
    let mut index: Vec<IndexedReport> = patients
        .iter()
        .flat_map(|patient| {
            patient
                .reports
                .iter()
                .map(move |report| IndexedReport::new(patient, report))
        })
        .collect();

    index.sort_by(|a, b| {
        b.report
            .created_at
            .cmp(&a.report.created_at)
            .then_with(|| b.id().cmp(&a.id()))
    });

    tracing::debug!(
        patients = patients.len(),
        reports = index.len(),
        "built report index"
    );
    index
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    pub medical_reports: usize,
    pub xray_reports: usize,
}

impl ReportStats {
    pub fn of(index: &[IndexedReport]) -> Self {
        let mut stats = ReportStats {
            total: index.len(),
            ..Default::default()
        };
        for row in index {
            match row.report_type() {
                ReportType::PDF_NER => stats.medical_reports += 1,
                ReportType::XRAY_ANALYSIS | ReportType::XRAY_COMPARISON => {
                    stats.xray_reports += 1
                }
            }
        }
        stats
    }
}
