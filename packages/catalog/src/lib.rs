pub mod types;
pub use types::*;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A complete knowledge base description, readable from JSON, TOML or YAML.
///
/// The document is only a data shape: range checks live in [`CatalogValidator`]
/// and the inference-ready form is built by the domain crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Catalog metadata (name, version, etc.)
    #[serde(default)]
    pub metadata: CatalogMetadata,

    /// Likelihood used for any symptom a diagnosis does not document
    #[serde(default = "types::default_likelihood")]
    pub default_likelihood: f64,

    /// Qualitative label -> probability
    #[serde(default = "types::standard_scale")]
    pub scale: BTreeMap<String, f64>,

    /// The symptom universe, either a flat list or a list of display groups
    #[serde(deserialize_with = "types::deserialize_symptom_groups")]
    #[schemars(schema_with = "symptom_groups_schema")]
    pub symptoms: Vec<SymptomGroup>,

    /// Diagnosis name -> prior and likelihood table
    #[serde(default)]
    pub diagnoses: BTreeMap<String, DiagnosisSpec>,

    /// Demographic prior multipliers
    #[serde(default)]
    pub modifiers: ModifierSpec,
}

/// Descriptive metadata, never consulted by inference
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CatalogDocument {
    /// All symptom names in declaration order, across groups.
    pub fn symptom_names(&self) -> impl Iterator<Item = &str> {
        self.symptoms
            .iter()
            .flat_map(|g| g.symptoms.iter().map(String::as_str))
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(CatalogDocument)
    }
}

fn symptom_groups_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
    use schemars::schema::{Schema, SchemaObject};

    let grouped_schema = gen.subschema_for::<Vec<SymptomGroup>>();
    let flat_schema = gen.subschema_for::<Vec<String>>();

    Schema::Object(SchemaObject {
        subschemas: Some(Box::new(schemars::schema::SubschemaValidation {
            any_of: Some(vec![grouped_schema, flat_schema]),
            ..Default::default()
        })),
        ..Default::default()
    })
}
