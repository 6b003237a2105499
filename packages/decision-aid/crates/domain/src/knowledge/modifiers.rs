use std::collections::BTreeMap;

/// Demographic prior multipliers. Labels missing from a table are neutral (1.0);
/// rejecting unknown labels is the caller's job.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModifierTable {
    age: BTreeMap<String, f64>,
    sex: BTreeMap<String, f64>,
}

impl ModifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_age(mut self, label: impl Into<String>, multiplier: f64) -> Self {
        self.age.insert(label.into(), multiplier);
        self
    }

    pub fn with_sex(mut self, label: impl Into<String>, multiplier: f64) -> Self {
        self.sex.insert(label.into(), multiplier);
        self
    }

    pub fn age_multiplier(&self, age_group: &str) -> f64 {
        self.age.get(age_group).copied().unwrap_or(1.0)
    }

    pub fn sex_multiplier(&self, sex: &str) -> f64 {
        self.sex.get(sex).copied().unwrap_or(1.0)
    }

    pub fn age_groups(&self) -> impl Iterator<Item = &str> {
        self.age.keys().map(String::as_str)
    }

    pub fn sexes(&self) -> impl Iterator<Item = &str> {
        self.sex.keys().map(String::as_str)
    }

    pub fn knows_age_group(&self, age_group: &str) -> bool {
        self.age.contains_key(age_group)
    }

    pub fn knows_sex(&self, sex: &str) -> bool {
        self.sex.contains_key(sex)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&'static str, &str, f64)> {
        self.age
            .iter()
            .map(|(l, m)| ("age", l.as_str(), *m))
            .chain(self.sex.iter().map(|(l, m)| ("sex", l.as_str(), *m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_labels_are_neutral() {
        let table = ModifierTable::new().with_age("65_plus", 1.4).with_sex("female", 0.9);
        assert_eq!(table.age_multiplier("65_plus"), 1.4);
        assert_eq!(table.age_multiplier("toddler"), 1.0);
        assert_eq!(table.sex_multiplier("female"), 0.9);
        assert_eq!(table.sex_multiplier(""), 1.0);
    }

    #[test]
    fn test_label_listing_is_sorted() {
        let table = ModifierTable::new()
            .with_age("under_40", 1.0)
            .with_age("40_to_64", 1.0)
            .with_age("65_plus", 1.0);
        let groups: Vec<_> = table.age_groups().collect();
        assert_eq!(groups, vec!["40_to_64", "65_plus", "under_40"]);
        assert!(table.knows_age_group("65_plus"));
        assert!(!table.knows_sex("female"));
    }
}
