use medlens_core::ner::classify::{classify, NonMedicalCategory};
use medlens_core::ner::grouping::group_entities;
use medlens_core::ner::model::Entity;
use medlens_core::records::parser::entity_from_value;
use serde_json::json;

#[test]
fn classifier_matches_documented_examples() {
    assert!(!classify(&Entity::new("Jane", "PERSON")).is_medical);
    assert!(classify(&Entity::new("asthma", "CONDITION")).is_medical);

    let bare = entity_from_value(&json!({}), 1).expect("entity");
    let c = classify(&bare);
    assert_eq!(c.category, "OTHER");
    assert!(c.is_medical);
}

#[test]
fn every_blacklisted_code_is_non_medical_in_any_case() {
    for code in NonMedicalCategory::ALL {
        let upper = Entity::new("x", code.code());
        let lower = Entity::new("x", code.code().to_lowercase());
        assert!(!classify(&upper).is_medical, "{}", code.code());
        assert!(!classify(&lower).is_medical, "{}", code.code());
    }
}

#[test]
fn grouped_total_never_exceeds_input() {
    let with_blacklisted: Vec<Entity> = vec![
        Entity::new("pain", "SYMPTOM"),
        Entity::new("Mumbai", "GPE"),
        Entity::new("aspirin", "MEDICATION"),
        Entity::new("3", "CARDINAL"),
    ];
    let groups = group_entities(&with_blacklisted);
    assert!(groups.entity_count() < with_blacklisted.len());

    let all_medical: Vec<Entity> = vec![
        Entity::new("pain", "SYMPTOM"),
        Entity::new("aspirin", "MEDICATION"),
        Entity::new("MRI", "TEST"),
    ];
    let groups = group_entities(&all_medical);
    assert_eq!(groups.entity_count(), all_medical.len());

    assert!(group_entities(&[]).is_empty());
}

#[test]
fn alias_fields_feed_grouping() {
    let entities: Vec<Entity> = [
        json!({"text": "wheezing", "entity_type": "SYMPTOM", "confidence": 0.7}),
        json!({"text": "salbutamol", "type": "MEDICATION"}),
        json!({"text": "Dr. Mehta", "label": "", "entity_type": "PERSON"}),
        json!({"text": "dyspnea", "label": "SYMPTOM", "type": "DATE"}),
    ]
    .iter()
    .filter_map(|v| entity_from_value(v, 7))
    .collect();

    let groups = group_entities(&entities);
    let cats: Vec<&str> = groups.categories().collect();
    assert_eq!(cats, vec!["SYMPTOM", "MEDICATION"]);
    let symptoms: Vec<&str> = groups
        .get("SYMPTOM")
        .expect("symptoms")
        .iter()
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(symptoms, vec!["wheezing", "dyspnea"]);
}
