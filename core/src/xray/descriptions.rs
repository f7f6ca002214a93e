const PATHOLOGY_DESCRIPTIONS: &[(&str, &str)] = &[
    ("Atelectasis", "Collapse or closure of a lung resulting in reduced or absent gas exchange"),
    ("Cardiomegaly", "Enlargement of the heart, often indicating heart disease"),
    ("Effusion", "Accumulation of fluid in the pleural space around the lungs"),
    ("Infiltration", "Abnormal accumulation of substances in lung tissue"),
    ("Mass", "Abnormal growth or tumor in lung tissue"),
    ("Nodule", "Small, round growth in the lungs that may be benign or malignant"),
    ("Pneumonia", "Infection that inflames air sacs in one or both lungs"),
    ("Pneumothorax", "Collapsed lung due to air leaking into the chest cavity"),
    ("Consolidation", "Lung tissue filled with liquid instead of air"),
    ("Edema", "Fluid accumulation in lung tissue"),
    ("Emphysema", "Condition where air sacs in lungs are damaged"),
    ("Fibrosis", "Scarring and thickening of lung tissue"),
    ("Pleural_Thickening", "Thickening of the pleural lining around the lungs"),
    ("Hernia", "Protrusion of an organ through the wall that contains it"),
];

pub const NO_DESCRIPTION: &str = "No description available";

/// Plain-language description for the chest X-ray findings the detector reports.
pub fn describe_pathology(name: &str) -> &'static str {
    PATHOLOGY_DESCRIPTIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, d)| *d)
        .unwrap_or(NO_DESCRIPTION)
}

pub fn display_name(name: &str) -> String {
    name.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_findings() {
        assert!(describe_pathology("Cardiomegaly").starts_with("Enlargement of the heart"));
        assert_eq!(describe_pathology("cardiomegaly"), NO_DESCRIPTION);
        assert_eq!(describe_pathology("Lung Lesion"), NO_DESCRIPTION);
    }

    #[test]
    fn underscores_become_spaces() {
        assert_eq!(display_name("Pleural_Thickening"), "Pleural Thickening");
        assert_eq!(display_name("Edema"), "Edema");
    }
}
