use super::model::{IndexedReport, ReportType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    Custom,
}

/// Criteria for narrowing the report index. `Default` is the cleared state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FilterCriteria {
    /// Matches filename or patient name.
    pub search_term: String,
    pub patient_name: String,
    #[serde(
        serialize_with = "serialize_report_type",
        deserialize_with = "deserialize_report_type"
    )]
    pub report_type: Option<ReportType>,
    // Date criteria are carried but not applied; see `apply_filters`.
    pub date_range: DateRange,
    pub start_date: String,
    pub end_date: String,
}

impl FilterCriteria {
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.is_empty()
            || !self.patient_name.is_empty()
            || self.report_type.is_some()
            || self.has_date_criteria()
    }

    fn has_date_criteria(&self) -> bool {
        self.date_range != DateRange::All || !self.start_date.is_empty() || !self.end_date.is_empty()
    }
}

/// Keep the rows matching every non-empty criterion, in input order.
///
/// Date criteria impose no constraint yet: a warning is logged when one is set.
pub fn apply_filters(index: &[IndexedReport], criteria: &FilterCriteria) -> Vec<IndexedReport> {
    if criteria.has_date_criteria() {
        tracing::warn!(
            date_range = ?criteria.date_range,
            "date filtering is not applied; criterion ignored"
        );
    }

    let search = criteria.search_term.to_lowercase();
    let patient = criteria.patient_name.to_lowercase();

    let filtered: Vec<IndexedReport> = index
        .iter()
        .filter(|row| {
            search.is_empty()
                || row.report.filename.to_lowercase().contains(&search)
                || row.patient_name.to_lowercase().contains(&search)
        })
        .filter(|row| patient.is_empty() || row.patient_name.to_lowercase().contains(&patient))
        .filter(|row| {
            criteria
                .report_type
                .map_or(true, |wanted| row.report_type() == wanted)
        })
        .cloned()
        .collect();

    tracing::debug!(
        total = index.len(),
        shown = filtered.len(),
        "applied report filters"
    );
    filtered
}

fn serialize_report_type<S: Serializer>(
    value: &Option<ReportType>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.map(ReportType::as_str).unwrap_or(""))
}

// `""` means every type.
fn deserialize_report_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<ReportType>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(serde::de::Error::custom)
}
