use crate::error::CoreError;
use crate::ner::model::Entity;
use crate::xray::model::Pathology;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReportType {
    PDF_NER,
    XRAY_ANALYSIS,
    XRAY_COMPARISON,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PDF_NER => "PDF_NER",
            Self::XRAY_ANALYSIS => "XRAY_ANALYSIS",
            Self::XRAY_COMPARISON => "XRAY_COMPARISON",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::PDF_NER => "Medical Report (PDF NER)",
            Self::XRAY_ANALYSIS => "X-Ray Analysis",
            Self::XRAY_COMPARISON => "X-Ray Comparison",
        }
    }

    pub fn is_xray(self) -> bool {
        matches!(self, Self::XRAY_ANALYSIS | Self::XRAY_COMPARISON)
    }
}

impl FromStr for ReportType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PDF_NER" => Ok(Self::PDF_NER),
            "XRAY_ANALYSIS" => Ok(Self::XRAY_ANALYSIS),
            "XRAY_COMPARISON" => Ok(Self::XRAY_COMPARISON),
            other => Err(CoreError::InvalidInput(format!(
                "unknown report_type: {}",
                other
            ))),
        }
    }
}

/// Analysis results; the variant is the report's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultsPayload {
    Ner {
        entities: Vec<Entity>,
    },
    XrayAnalysis {
        pathologies: Vec<Pathology>,
        generated_report: String,
    },
    XrayComparison {
        comparison_report: String,
    },
}

impl ResultsPayload {
    pub fn report_type(&self) -> ReportType {
        match self {
            Self::Ner { .. } => ReportType::PDF_NER,
            Self::XrayAnalysis { .. } => ReportType::XRAY_ANALYSIS,
            Self::XrayComparison { .. } => ReportType::XRAY_COMPARISON,
        }
    }

    /// Payload of the given type with every field empty.
    pub fn empty(report_type: ReportType) -> Self {
        match report_type {
            ReportType::PDF_NER => Self::Ner { entities: vec![] },
            ReportType::XRAY_ANALYSIS => Self::XrayAnalysis {
                pathologies: vec![],
                generated_report: String::new(),
            },
            ReportType::XRAY_COMPARISON => Self::XrayComparison {
                comparison_report: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Unique within the owning patient.
    pub id: i64,
    pub filename: String,
    pub results: ResultsPayload,
    pub created_at: Option<OffsetDateTime>,
}

impl Report {
    pub fn new(id: i64, filename: impl Into<String>, results: ResultsPayload) -> Self {
        Self {
            id,
            filename: filename.into(),
            results,
            created_at: None,
        }
    }

    pub fn created_at(mut self, ts: OffsetDateTime) -> Self {
        self.created_at = Some(ts);
        self
    }

    pub fn report_type(&self) -> ReportType {
        self.results.report_type()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let created_at = self.created_at.and_then(|ts| ts.format(&Rfc3339).ok());
        let mut s = serializer.serialize_struct("Report", 5)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("filename", &self.filename)?;
        s.serialize_field("report_type", &self.report_type())?;
        s.serialize_field("results", &self.results)?;
        s.serialize_field("created_at", &created_at)?;
        s.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: Option<u32>,
    pub gender: String,
    pub reports: Vec<Report>,
}

/// A report flattened together with its owning patient's attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedReport {
    #[serde(flatten)]
    pub report: Report,
    pub patient_id: i64,
    pub patient_name: String,
    pub patient_age: Option<u32>,
    pub patient_gender: String,
}

impl IndexedReport {
    pub fn new(patient: &Patient, report: &Report) -> Self {
        Self {
            report: report.clone(),
            patient_id: patient.id,
            patient_name: patient.name.clone(),
            patient_age: patient.age,
            patient_gender: patient.gender.clone(),
        }
    }

    pub fn id(&self) -> i64 {
        self.report.id
    }

    pub fn report_type(&self) -> ReportType {
        self.report.report_type()
    }

    /// `Name (45y, F)`; the parenthetical is dropped when age is unknown.
    pub fn patient_label(&self) -> String {
        match self.patient_age {
            Some(age) => format!("{} ({}y, {})", self.patient_name, age, self.patient_gender),
            None => self.patient_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> Patient {
        Patient {
            id: 3,
            name: "Asha Rao".to_string(),
            age: Some(52),
            gender: "F".to_string(),
            reports: vec![],
        }
    }

    #[test]
    fn payload_variant_determines_type() {
        for t in [
            ReportType::PDF_NER,
            ReportType::XRAY_ANALYSIS,
            ReportType::XRAY_COMPARISON,
        ] {
            assert_eq!(ResultsPayload::empty(t).report_type(), t);
            assert_eq!(t.as_str().parse::<ReportType>().unwrap(), t);
        }
        assert!("xray".parse::<ReportType>().is_err());
    }

    #[test]
    fn patient_label_formats() {
        let report = Report::new(1, "a.pdf", ResultsPayload::empty(ReportType::PDF_NER));
        let mut row = IndexedReport::new(&patient(), &report);
        assert_eq!(row.patient_label(), "Asha Rao (52y, F)");
        row.patient_age = None;
        assert_eq!(row.patient_label(), "Asha Rao");
    }

    #[test]
    fn indexed_report_serializes_flat() {
        let report = Report::new(7, "chest.png", ResultsPayload::empty(ReportType::XRAY_ANALYSIS));
        let row = IndexedReport::new(&patient(), &report);
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["report_type"], "XRAY_ANALYSIS");
        assert_eq!(v["patient_name"], "Asha Rao");
        assert_eq!(v["results"]["generated_report"], "");
        assert!(v["created_at"].is_null());
    }

    #[test]
    fn xray_types() {
        assert!(!ReportType::PDF_NER.is_xray());
        assert!(ReportType::XRAY_ANALYSIS.is_xray());
        assert!(ReportType::XRAY_COMPARISON.is_xray());
        assert_eq!(ReportType::XRAY_COMPARISON.display_name(), "X-Ray Comparison");
    }
}
