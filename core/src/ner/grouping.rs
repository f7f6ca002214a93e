use super::classify::classify;
use super::model::Entity;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityGroup {
    pub category: String,
    pub entities: Vec<Entity>,
}

/// Medical entities partitioned by category, groups in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityGroups {
    groups: Vec<EntityGroup>,
}

impl EntityGroups {
    pub fn get(&self, category: &str) -> Option<&[Entity]> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.entities.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.category.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityGroup> {
        self.groups.iter()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total entities across all groups.
    pub fn entity_count(&self) -> usize {
        self.groups.iter().map(|g| g.entities.len()).sum()
    }

    fn push(&mut self, category: String, entity: Entity) {
        match self.groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.entities.push(entity),
            None => self.groups.push(EntityGroup {
                category,
                entities: vec![entity],
            }),
        }
    }
}

impl<'a> IntoIterator for &'a EntityGroups {
    type Item = &'a EntityGroup;
    type IntoIter = std::slice::Iter<'a, EntityGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Keep medical entities only and group them by their display category.
///
/// Relative order inside each group follows the input. Grouping keys are not
/// case-normalised: `Symptom` and `SYMPTOM` form separate groups.
pub fn group_entities(entities: &[Entity]) -> EntityGroups {
    let mut groups = EntityGroups::default();
    for entity in entities {
        let classification = classify(entity);
        if classification.is_medical {
            groups.push(classification.category, entity.clone());
        }
    }
    tracing::debug!(
        input = entities.len(),
        medical = groups.entity_count(),
        groups = groups.len(),
        "grouped entities"
    );
    groups
}
