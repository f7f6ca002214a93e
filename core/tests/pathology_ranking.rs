use medlens_core::xray::model::{FilterBy, Pathology, PathologySummary, SeverityBand, SortBy};
use medlens_core::xray::ranking::rank_pathologies;

fn names(list: &[Pathology]) -> Vec<&str> {
    list.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn ranking_examples() {
    let input = vec![
        Pathology::new("B", false, 0.9),
        Pathology::new("A", true, 0.5),
    ];
    assert_eq!(
        names(&rank_pathologies(&input, SortBy::Detected, FilterBy::All)),
        vec!["A", "B"]
    );
    assert_eq!(
        names(&rank_pathologies(&input, SortBy::Probability, FilterBy::All)),
        vec!["B", "A"]
    );
    assert_eq!(
        names(&rank_pathologies(&input, SortBy::Probability, FilterBy::Detected)),
        vec!["A"]
    );
}

#[test]
fn filter_preserves_sorted_order() {
    let input = vec![
        Pathology::new("Edema", true, 0.41),
        Pathology::new("Mass", false, 0.2),
        Pathology::new("Consolidation", true, 0.77),
        Pathology::new("Atelectasis", true, 0.93),
    ];
    let sorted = rank_pathologies(&input, SortBy::Name, FilterBy::All);
    let filtered = rank_pathologies(&input, SortBy::Name, FilterBy::Detected);
    let expected: Vec<&str> = names(&sorted)
        .into_iter()
        .filter(|n| *n != "Mass")
        .collect();
    assert_eq!(names(&filtered), expected);
    assert_eq!(PathologySummary::of(&input).detected, 3);
}

#[test]
fn severity_boundary() {
    assert_eq!(SeverityBand::from_probability(0.79), SeverityBand::Moderate);
    assert_eq!(SeverityBand::from_probability(0.80), SeverityBand::High);
    assert_eq!(SeverityBand::from_probability(0.59).as_str(), "low");
    assert_eq!(SeverityBand::from_probability(0.1).label(), "Minimal Confidence");
}
