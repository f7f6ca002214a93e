use super::model::Entity;
use serde::{Deserialize, Serialize};

/// Category codes that are never medical.
///
/// Classification is a blacklist: any category not enumerated here is treated
/// as medical, so new medical label types need no code change. A new
/// non-medical code must be added as a variant and to `ALL`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NonMedicalCategory {
    PERSON,
    DATE,
    TIME,
    AGE,
    NAME,
    LOCATION,
    ADDRESS,
    PHONE,
    EMAIL,
    ID,
    NUMBER,
    QUANTITY,
    MONEY,
    PERCENT,
    ORDINAL,
    CARDINAL,
    /// Geopolitical entity
    GPE,
    ORG,
    /// Facility
    FAC,
    EVENT,
    WORK_OF_ART,
    LAW,
    LANGUAGE,
    /// Nationalities, religious or political groups
    NORP,
    MISC,
    OTHER,
}

impl NonMedicalCategory {
    pub const ALL: [NonMedicalCategory; 26] = [
        Self::PERSON,
        Self::DATE,
        Self::TIME,
        Self::AGE,
        Self::NAME,
        Self::LOCATION,
        Self::ADDRESS,
        Self::PHONE,
        Self::EMAIL,
        Self::ID,
        Self::NUMBER,
        Self::QUANTITY,
        Self::MONEY,
        Self::PERCENT,
        Self::ORDINAL,
        Self::CARDINAL,
        Self::GPE,
        Self::ORG,
        Self::FAC,
        Self::EVENT,
        Self::WORK_OF_ART,
        Self::LAW,
        Self::LANGUAGE,
        Self::NORP,
        Self::MISC,
        Self::OTHER,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::PERSON => "PERSON",
            Self::DATE => "DATE",
            Self::TIME => "TIME",
            Self::AGE => "AGE",
            Self::NAME => "NAME",
            Self::LOCATION => "LOCATION",
            Self::ADDRESS => "ADDRESS",
            Self::PHONE => "PHONE",
            Self::EMAIL => "EMAIL",
            Self::ID => "ID",
            Self::NUMBER => "NUMBER",
            Self::QUANTITY => "QUANTITY",
            Self::MONEY => "MONEY",
            Self::PERCENT => "PERCENT",
            Self::ORDINAL => "ORDINAL",
            Self::CARDINAL => "CARDINAL",
            Self::GPE => "GPE",
            Self::ORG => "ORG",
            Self::FAC => "FAC",
            Self::EVENT => "EVENT",
            Self::WORK_OF_ART => "WORK_OF_ART",
            Self::LAW => "LAW",
            Self::LANGUAGE => "LANGUAGE",
            Self::NORP => "NORP",
            Self::MISC => "MISC",
            Self::OTHER => "OTHER",
        }
    }

    /// Case-insensitive lookup of a category code.
    pub fn from_code(code: &str) -> Option<Self> {
        let upper = code.to_uppercase();
        Self::ALL.iter().copied().find(|c| c.code() == upper)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_medical: bool,
    pub category: String,
}

/// Label an entity as medical or non-medical and resolve its display category.
///
/// An entity that carried no label at all is displayed under `OTHER` but is
/// still medical: only an explicitly blacklisted label counts as non-medical.
pub fn classify(entity: &Entity) -> Classification {
    let is_medical = match entity.label.as_deref() {
        Some(label) => NonMedicalCategory::from_code(label).is_none(),
        None => true,
    };
    Classification {
        is_medical,
        category: entity.category().to_string(),
    }
}

const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

/// Display colour hint for a medical category. Never affects classification.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "CONDITION" => "#ef4444",
        "MEDICATION" => "#10b981",
        "SYMPTOM" => "#8b5cf6",
        "BODY_PART" => "#06b6d4",
        "PROCEDURE" => "#ec4899",
        "TEST" => "#84cc16",
        "DOSAGE" => "#f59e0b",
        "TREATMENT" => "#0ea5e9",
        "DIAGNOSIS" => "#dc2626",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}
