use super::model::{FilterBy, Pathology, SortBy};
use std::cmp::Ordering;

/// Sort, then filter, a pathology list. The input is left untouched.
///
/// The sort is stable, so pathologies that compare equal keep their input order.
pub fn rank_pathologies(
    pathologies: &[Pathology],
    sort_by: SortBy,
    filter_by: FilterBy,
) -> Vec<Pathology> {
    let mut ranked = pathologies.to_vec();
    match sort_by {
        SortBy::Name => ranked.sort_by(|a, b| a.name.cmp(&b.name)),
        SortBy::Probability => ranked.sort_by(by_probability_desc),
        SortBy::Detected => ranked.sort_by(|a, b| {
            b.detected
                .cmp(&a.detected)
                .then_with(|| by_probability_desc(a, b))
        }),
    }
    ranked.retain(|p| filter_by.admits(p));
    ranked
}

fn by_probability_desc(a: &Pathology, b: &Pathology) -> Ordering {
    rank_value(b.probability)
        .partial_cmp(&rank_value(a.probability))
        .unwrap_or(Ordering::Equal)
}

// NaN ranks as zero confidence.
fn rank_value(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability
    }
}
