use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One independent binary detector's output for an X-ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pathology {
    pub name: String,
    pub detected: bool,
    /// Calibrated confidence in [0, 1]; not normalised across the list.
    pub probability: f64,
}

impl Pathology {
    pub fn new(name: impl Into<String>, detected: bool, probability: f64) -> Self {
        Self {
            name: name.into(),
            detected,
            probability,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    #[default]
    Probability,
    Detected,
}

impl FromStr for SortBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "probability" => Ok(Self::Probability),
            "detected" => Ok(Self::Detected),
            other => Err(CoreError::InvalidInput(format!(
                "unknown pathology sort: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FilterBy {
    #[default]
    All,
    Detected,
    NotDetected,
}

impl FilterBy {
    pub fn admits(self, pathology: &Pathology) -> bool {
        match self {
            Self::All => true,
            Self::Detected => pathology.detected,
            Self::NotDetected => !pathology.detected,
        }
    }
}

impl FromStr for FilterBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "detected" => Ok(Self::Detected),
            "not-detected" => Ok(Self::NotDetected),
            other => Err(CoreError::InvalidInput(format!(
                "unknown pathology filter: {}",
                other
            ))),
        }
    }
}

/// Display-only confidence tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SeverityBand {
    Minimal,
    Low,
    Moderate,
    High,
}

impl SeverityBand {
    /// Lower bounds are inclusive. NaN falls through to `Minimal`.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.8 {
            Self::High
        } else if probability >= 0.6 {
            Self::Moderate
        } else if probability >= 0.4 {
            Self::Low
        } else {
            Self::Minimal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
            Self::Minimal => "minimal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High Confidence",
            Self::Moderate => "Moderate Confidence",
            Self::Low => "Low Confidence",
            Self::Minimal => "Minimal Confidence",
        }
    }

    pub fn guide(self) -> &'static str {
        match self {
            Self::High => "High (80%+): Strong indication",
            Self::Moderate => "Moderate (60-79%): Possible finding",
            Self::Low => "Low (40-59%): Weak indication",
            Self::Minimal => "Minimal (<40%): Unlikely",
        }
    }

    /// Bands from most to least confident, legend order.
    pub const DESCENDING: [SeverityBand; 4] =
        [Self::High, Self::Moderate, Self::Low, Self::Minimal];
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PathologySummary {
    pub detected: usize,
    pub not_detected: usize,
    pub total: usize,
}

impl PathologySummary {
    pub fn of(pathologies: &[Pathology]) -> Self {
        let detected = pathologies.iter().filter(|p| p.detected).count();
        Self {
            detected,
            not_detected: pathologies.len() - detected,
            total: pathologies.len(),
        }
    }
}
