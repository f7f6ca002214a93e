use super::model::{Patient, Report, ReportType, ResultsPayload};
use crate::error::{CoreError, CoreResult};
use crate::ner::model::{resolve_label, Entity};
use crate::xray::model::Pathology;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Parse the body of `GET /patients`.
pub fn parse_patients(json_str: &str) -> CoreResult<Vec<Patient>> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| CoreError::InvalidInput(format!("Failed to parse patients: {}", e)))?;
    let items = raw
        .as_array()
        .ok_or_else(|| CoreError::InvalidInput("Expected a JSON array of patients".to_string()))?;

    let patients = items
        .iter()
        .enumerate()
        .filter_map(|(position, raw)| match patient_from_value(raw) {
            Ok(patient) => Some(patient),
            Err(e) => {
                tracing::warn!(position, error = %e, "skipping malformed patient");
                None
            }
        })
        .collect();
    Ok(patients)
}

/// Parse the body of `GET /patients/{id}`.
pub fn parse_patient(json_str: &str) -> CoreResult<Patient> {
    let raw: Value = serde_json::from_str(json_str)
        .map_err(|e| CoreError::InvalidInput(format!("Failed to parse patient: {}", e)))?;
    patient_from_value(&raw)
}

fn patient_from_value(raw: &Value) -> CoreResult<Patient> {
    let obj = raw
        .as_object()
        .ok_or_else(|| CoreError::InvalidInput("Patient must be a JSON object".to_string()))?;

    let id = obj
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| CoreError::InvalidInput("Missing patient id".to_string()))?;

    let name = str_field(obj, "name").unwrap_or_default();
    let gender = str_field(obj, "gender").unwrap_or_default();
    let age = obj
        .get("age")
        .and_then(|v| v.as_u64())
        .and_then(|a| u32::try_from(a).ok());

    let reports = obj
        .get("reports")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|r| report_from_value(id, r))
                .collect()
        })
        .unwrap_or_default();

    Ok(Patient {
        id,
        name,
        age,
        gender,
        reports,
    })
}

// Reports that cannot be interpreted are skipped, never fatal.
fn report_from_value(patient_id: i64, raw: &Value) -> Option<Report> {
    let Some(obj) = raw.as_object() else {
        tracing::warn!(patient_id, "skipping report that is not a JSON object");
        return None;
    };
    let Some(id) = obj.get("id").and_then(|v| v.as_i64()) else {
        tracing::warn!(patient_id, "skipping report without id");
        return None;
    };
    let report_type = match obj
        .get("report_type")
        .and_then(|v| v.as_str())
        .map(str::parse::<ReportType>)
    {
        Some(Ok(t)) => t,
        Some(Err(e)) => {
            tracing::warn!(patient_id, report_id = id, "skipping report: {}", e);
            return None;
        }
        None => {
            tracing::warn!(patient_id, report_id = id, "skipping report without report_type");
            return None;
        }
    };

    let results = match obj.get("results").and_then(|v| v.as_object()) {
        Some(results) => payload_from_object(report_type, results, id),
        None => ResultsPayload::empty(report_type),
    };

    Some(Report {
        id,
        filename: str_field(obj, "filename").unwrap_or_default(),
        results,
        created_at: obj
            .get("created_at")
            .and_then(|v| v.as_str())
            .and_then(parse_timestamp),
    })
}

fn payload_from_object(
    report_type: ReportType,
    results: &Map<String, Value>,
    report_id: i64,
) -> ResultsPayload {
    match report_type {
        ReportType::PDF_NER => ResultsPayload::Ner {
            entities: array_field(results, "entities")
                .iter()
                .filter_map(|e| entity_from_value(e, report_id))
                .collect(),
        },
        ReportType::XRAY_ANALYSIS => ResultsPayload::XrayAnalysis {
            pathologies: array_field(results, "pathologies")
                .iter()
                .filter_map(|p| pathology_from_value(p, report_id))
                .collect(),
            generated_report: str_field(results, "generated_report").unwrap_or_default(),
        },
        ReportType::XRAY_COMPARISON => ResultsPayload::XrayComparison {
            comparison_report: str_field(results, "comparison_report").unwrap_or_default(),
        },
    }
}

/// Build an entity from one NER result item, tolerating partial data.
pub fn entity_from_value(raw: &Value, report_id: i64) -> Option<Entity> {
    let obj = raw.as_object()?;
    let label = str_field(obj, "label");
    let entity_type = str_field(obj, "entity_type");
    let ty = str_field(obj, "type");

    let start_pos = position_field(obj, "start_pos");
    let end_pos = position_field(obj, "end_pos");
    if let (Some(start), Some(end)) = (start_pos, end_pos) {
        if start > end {
            tracing::warn!(report_id, start, end, "entity span is inverted");
        }
    }

    Some(Entity {
        text: str_field(obj, "text").unwrap_or_default(),
        label: resolve_label(&[label.as_ref(), entity_type.as_ref(), ty.as_ref()]),
        confidence: obj
            .get("confidence")
            .and_then(|v| v.as_f64())
            .map(|c| c.clamp(0.0, 1.0)),
        start_pos,
        end_pos,
    })
}

fn pathology_from_value(raw: &Value, report_id: i64) -> Option<Pathology> {
    let obj = raw.as_object()?;
    let Some(name) = str_field(obj, "name") else {
        tracing::warn!(report_id, "skipping pathology without name");
        return None;
    };
    let probability = obj
        .get("probability")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    let detected = obj.get("detected").and_then(|v| v.as_bool()).unwrap_or(false);

    Some(Pathology {
        name,
        detected,
        probability,
    })
}

/// Accepts RFC 3339, or a naive ISO-8601 datetime which is taken as UTC.
/// Fractional seconds are dropped on the naive path.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    let normalized = raw.trim().replacen(' ', "T", 1);
    let whole_seconds = normalized.split('.').next().unwrap_or_default();
    PrimitiveDateTime::parse(
        whole_seconds,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .map(PrimitiveDateTime::assume_utc)
    .ok()
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(|v| v.as_array())
        .map(|a| a.as_slice())
        .unwrap_or(&[])
}

fn position_field(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    obj.get(key)
        .and_then(|v| v.as_u64())
        .and_then(|p| u32::try_from(p).ok())
}
