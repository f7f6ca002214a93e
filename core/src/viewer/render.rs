use super::detail::ReportDetail;
use crate::config::EngineConfig;
use crate::error::{CoreError, CoreResult};
use crate::ner::classify::category_color;
use crate::records::model::IndexedReport;
use crate::xray::descriptions::{describe_pathology, display_name};
use crate::xray::model::{PathologySummary, SeverityBand};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub const NOT_AVAILABLE: &str = "N/A";

const DISCLAIMER: &str = "This analysis is AI-assisted and for reference only. \
All results should be interpreted and validated by a qualified radiologist or healthcare \
professional. Do not make medical decisions based solely on this automated analysis.";

const NO_MEDICAL_ENTITIES: &str = "No medical entities found. Non-medical entities like dates, \
names, ages, and locations are filtered out to focus on medical terms.";

/// `dd/mm/yyyy, HH:MM` in the given offset, or `N/A`.
pub fn format_timestamp(ts: Option<OffsetDateTime>, offset: UtcOffset) -> CoreResult<String> {
    match ts {
        None => Ok(NOT_AVAILABLE.to_string()),
        Some(ts) => ts
            .to_offset(offset)
            .format(format_description!("[day]/[month]/[year], [hour]:[minute]"))
            .map_err(|e| CoreError::TimeFormat(e.to_string())),
    }
}

pub fn render_report_detail_markdown(
    row: &IndexedReport,
    detail: &ReportDetail,
    config: &EngineConfig,
) -> CoreResult<String> {
    let created_at = format_timestamp(row.report.created_at, config.utc_offset()?)?;

    let mut out = Vec::new();
    out.push(format!("# {} #{}", row.report_type().display_name(), row.id()));
    out.push("".to_string());
    out.push(format!("- Patient: {}", inline(&row.patient_label())));
    out.push(format!("- File: {}", inline(&row.report.filename)));
    out.push(format!("- Created: {}", created_at));
    out.push("- Status: Processed".to_string());
    out.push("".to_string());

    match detail {
        ReportDetail::Entities {
            groups,
            medical_count,
        } => {
            out.push(format!("## Extracted Medical Entities ({})", medical_count));
            out.push("".to_string());
            if groups.is_empty() {
                out.push(NO_MEDICAL_ENTITIES.to_string());
                out.push("".to_string());
            }
            for group in groups {
                out.push(format!(
                    "### {} ({}) `{}`",
                    inline(&group.category),
                    group.entities.len(),
                    category_color(&group.category)
                ));
                for entity in &group.entities {
                    let mut line = format!("- {}", inline(&entity.text));
                    if let Some(c) = entity.confidence.filter(|c| *c > 0.0) {
                        line.push_str(&format!(" ({:.1}%)", c * 100.0));
                    }
                    if let Some((start, end)) = entity.span() {
                        line.push_str(&format!(" pos: {}-{}", start, end));
                    }
                    out.push(line);
                }
                out.push("".to_string());
            }
        }
        ReportDetail::Pathologies {
            ranked,
            detected,
            summary,
            generated_report,
        } => {
            out.push("## Pathology Detection Results".to_string());
            out.push("".to_string());
            out.push(summary_line(summary));
            out.push("".to_string());
            if !detected.is_empty() {
                out.push("### Detected Findings (requires medical review)".to_string());
                for p in detected {
                    out.push(format!(
                        "- {}: {:.1}% confidence",
                        inline(&display_name(&p.name)),
                        p.probability * 100.0
                    ));
                }
                out.push("".to_string());
            }
            out.push("| Pathology | Status | Confidence | Level | Description |".to_string());
            out.push("|---|---|---|---|---|".to_string());
            if ranked.is_empty() {
                out.push("| - | - | - | - | No pathologies match the current filter criteria. |".to_string());
            }
            for p in ranked {
                out.push(format!(
                    "| {} | {} | {:.1}% | {} | {} |",
                    inline(&display_name(&p.name)),
                    if p.detected { "DETECTED" } else { "NOT DETECTED" },
                    p.probability * 100.0,
                    SeverityBand::from_probability(p.probability).label(),
                    describe_pathology(&p.name)
                ));
            }
            out.push("".to_string());
            if !generated_report.is_empty() {
                out.push("## AI Generated Report".to_string());
                out.push("".to_string());
                out.push(generated_report.clone());
                out.push("".to_string());
            }
            out.push("## Confidence Level Guide".to_string());
            for band in SeverityBand::DESCENDING {
                out.push(format!("- {}", band.guide()));
            }
            out.push("".to_string());
            out.push(format!("> **Important Disclaimer:** {}", DISCLAIMER));
            out.push("".to_string());
        }
        ReportDetail::Comparison { comparison_report } => {
            out.push("## Comparison Analysis".to_string());
            out.push("".to_string());
            out.push(comparison_report.clone());
            out.push("".to_string());
        }
    }

    Ok(out.join("\n"))
}

// Keeps backend text on one line and out of table cell boundaries.
fn inline(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}

fn summary_line(summary: &PathologySummary) -> String {
    format!(
        "**{}** detected, **{}** not detected, **{}** total analyzed",
        summary.detected, summary.not_detected, summary.total
    )
}

pub fn render_index_csv(rows: &[IndexedReport]) -> CoreResult<String> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);
    wtr.write_record([
        "id",
        "filename",
        "report_type",
        "patient_id",
        "patient_name",
        "patient_age",
        "patient_gender",
        "created_at",
    ])?;
    for row in rows {
        let created_at = row
            .report
            .created_at
            .and_then(|ts| ts.format(&Rfc3339).ok())
            .unwrap_or_default();
        wtr.write_record([
            row.id().to_string(),
            row.report.filename.clone(),
            row.report_type().as_str().to_string(),
            row.patient_id.to_string(),
            row.patient_name.clone(),
            row.patient_age.map(|a| a.to_string()).unwrap_or_default(),
            row.patient_gender.clone(),
            created_at,
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::model::Entity;
    use crate::records::model::{Patient, Report, ReportType, ResultsPayload};
    use crate::viewer::detail::build_report_detail;
    use crate::xray::model::{FilterBy, Pathology, SortBy};
    use time::macros::{datetime, offset};

    fn patient() -> Patient {
        Patient {
            id: 11,
            name: "Farah Khan".to_string(),
            age: Some(47),
            gender: "F".to_string(),
            reports: vec![],
        }
    }

    #[test]
    fn test_format_timestamp() {
        let ts = datetime!(2025-07-01 20:45 UTC);
        assert_eq!(
            format_timestamp(Some(ts), offset!(+05:30)).unwrap(),
            "02/07/2025, 02:15"
        );
        assert_eq!(format_timestamp(None, offset!(UTC)).unwrap(), "N/A");
    }

    #[test]
    fn test_render_ner_markdown() {
        let report = Report::new(
            21,
            "summary.pdf",
            ResultsPayload::Ner {
                entities: vec![
                    Entity::new("diabetes", "CONDITION")
                        .with_confidence(0.912)
                        .with_span(4, 12),
                    Entity::new("Farah", "PERSON"),
                ],
            },
        );
        let row = IndexedReport::new(&patient(), &report);
        let detail = build_report_detail(&report, SortBy::Probability, FilterBy::All);
        let md = render_report_detail_markdown(&row, &detail, &EngineConfig::default()).unwrap();

        assert!(md.contains("# Medical Report (PDF NER) #21"));
        assert!(md.contains("Farah Khan (47y, F)"));
        assert!(md.contains("Created: N/A"));
        assert!(md.contains("## Extracted Medical Entities (1)"));
        assert!(md.contains("- diabetes (91.2%) pos: 4-12"));
        assert!(!md.contains("### PERSON"));
    }

    #[test]
    fn test_render_analysis_markdown() {
        let report = Report::new(
            22,
            "cxr.png",
            ResultsPayload::XrayAnalysis {
                pathologies: vec![
                    Pathology::new("Pleural_Thickening", true, 0.81),
                    Pathology::new("Hernia", false, 0.05),
                ],
                generated_report: "Mild pleural thickening.".to_string(),
            },
        )
        .created_at(datetime!(2025-01-10 04:00 UTC));
        let row = IndexedReport::new(&patient(), &report);
        let detail = build_report_detail(&report, SortBy::Probability, FilterBy::All);
        let md = render_report_detail_markdown(&row, &detail, &EngineConfig::default()).unwrap();

        assert!(md.contains("Created: 10/01/2025, 09:30"));
        assert!(md.contains("**1** detected, **1** not detected, **2** total analyzed"));
        assert!(md.contains("- Pleural Thickening: 81.0% confidence"));
        assert!(md.contains("| Hernia | NOT DETECTED | 5.0% | Minimal Confidence |"));
        assert!(md.contains("Mild pleural thickening."));
        assert!(md.contains("Important Disclaimer"));
    }

    #[test]
    fn test_render_index_csv() {
        let report = Report::new(
            5,
            "scan, left.png",
            ResultsPayload::empty(ReportType::XRAY_COMPARISON),
        );
        let csv = render_index_csv(&[IndexedReport::new(&patient(), &report)]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("id,filename,report_type,patient_id,patient_name,patient_age,patient_gender,created_at")
        );
        assert_eq!(
            lines.next(),
            Some("5,\"scan, left.png\",XRAY_COMPARISON,11,Farah Khan,47,F,")
        );
    }

    #[test]
    fn test_markdown_cells_stay_on_one_line() {
        let report = Report::new(
            23,
            "cxr.png",
            ResultsPayload::XrayAnalysis {
                pathologies: vec![Pathology::new("Mass|Nodule\nsuspected", true, 0.7)],
                generated_report: String::new(),
            },
        );
        let row = IndexedReport::new(&patient(), &report);
        let detail = build_report_detail(&report, SortBy::Probability, FilterBy::All);
        let md = render_report_detail_markdown(&row, &detail, &EngineConfig::default()).unwrap();

        assert!(md.contains("| Mass\\|Nodule suspected | DETECTED | 70.0% |"));
        assert!(md.contains("- Mass\\|Nodule suspected: 70.0% confidence"));
        assert_eq!(inline("  left\r\n lung | base \n"), "left lung \\| base");
    }

    #[test]
    fn test_csv_keeps_line_breaks_inside_fields() {
        let report = Report::new(
            6,
            "line one\r\nline two.pdf",
            ResultsPayload::empty(ReportType::PDF_NER),
        );
        let csv = render_index_csv(&[IndexedReport::new(&patient(), &report)]).unwrap();
        assert!(csv.contains("\"line one\r\nline two.pdf\""));
        assert!(csv.ends_with(",\n"));
    }
}
