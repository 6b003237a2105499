use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Group name used when a catalog lists its symptoms without grouping.
pub const UNGROUPED: &str = "General";

/// A display grouping of symptoms (e.g. by body system).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SymptomGroup {
    pub name: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl SymptomGroup {
    pub fn new(name: impl Into<String>, symptoms: Vec<String>) -> Self {
        Self {
            name: name.into(),
            symptoms,
        }
    }
}

pub fn deserialize_symptom_groups<'de, D>(deserializer: D) -> Result<Vec<SymptomGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GroupsOrFlat {
        Grouped(Vec<SymptomGroup>),
        Flat(Vec<String>),
    }

    match GroupsOrFlat::deserialize(deserializer)? {
        GroupsOrFlat::Grouped(groups) => Ok(groups),
        GroupsOrFlat::Flat(names) if names.is_empty() => Ok(Vec::new()),
        GroupsOrFlat::Flat(names) => Ok(vec![SymptomGroup::new(UNGROUPED, names)]),
    }
}
