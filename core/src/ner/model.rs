use serde::{Deserialize, Serialize};

/// Category used when an entity arrives without any label field.
pub const DEFAULT_CATEGORY: &str = "OTHER";

/// A span of text extracted from a medical document by the NER service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    /// Resolved label; `None` when the service sent no usable label field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pos: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pos: Option<u32>,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        let label: String = label.into();
        Self {
            text: text.into(),
            label: resolve_label(&[Some(&label)]),
            confidence: None,
            start_pos: None,
            end_pos: None,
        }
    }

    pub fn unlabelled(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: None,
            confidence: None,
            start_pos: None,
            end_pos: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence.clamp(0.0, 1.0));
        self
    }

    pub fn with_span(mut self, start_pos: u32, end_pos: u32) -> Self {
        self.start_pos = Some(start_pos);
        self.end_pos = Some(end_pos);
        self
    }

    /// Display category, original casing preserved.
    pub fn category(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Character span, only when both ends are present and ordered.
    pub fn span(&self) -> Option<(u32, u32)> {
        match (self.start_pos, self.end_pos) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }
}

/// Pick the first non-empty label among the alternate field names
/// (`label`, `entity_type`, `type`, in that order).
pub fn resolve_label(candidates: &[Option<&String>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlabelled_entity_defaults_to_other() {
        let e = Entity::unlabelled("fever");
        assert_eq!(e.category(), "OTHER");
    }

    #[test]
    fn empty_label_is_treated_as_missing() {
        let e = Entity::new("fever", "");
        assert!(e.label.is_none());
        assert_eq!(e.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn label_resolution_prefers_first_non_empty() {
        let label = String::new();
        let entity_type = "Symptom".to_string();
        let ty = "CONDITION".to_string();
        let resolved = resolve_label(&[Some(&label), Some(&entity_type), Some(&ty)]);
        assert_eq!(resolved.as_deref(), Some("Symptom"));
        assert_eq!(resolve_label(&[None, None, None]), None);
    }

    #[test]
    fn span_requires_ordered_bounds() {
        assert_eq!(Entity::new("a", "TEST").with_span(3, 9).span(), Some((3, 9)));
        assert_eq!(Entity::new("a", "TEST").with_span(9, 3).span(), None);
        assert_eq!(Entity::new("a", "TEST").span(), None);
    }

    #[test]
    fn confidence_is_clamped() {
        let e = Entity::new("a", "TEST").with_confidence(1.7);
        assert_eq!(e.confidence, Some(1.0));
    }
}
