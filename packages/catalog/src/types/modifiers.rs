use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Demographic multipliers applied to every prior before evidence is combined.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ModifierSpec {
    /// Age-group label -> multiplier
    #[serde(default)]
    pub age: BTreeMap<String, f64>,

    /// Sex label -> multiplier
    #[serde(default)]
    pub sex: BTreeMap<String, f64>,
}
