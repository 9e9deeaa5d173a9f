//! Fixture loading from YAML files

use serde::Deserialize;
use std::path::Path;

/// A single test case from a fixture file
#[derive(Debug, Clone, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub desc: String,
    pub xpointer: String,
    #[serde(default)]
    pub xml: String,
    /// Attributes treated as DTD-declared `ID`
    #[serde(default = "default_id_attributes")]
    pub id_attributes: Vec<String>,
    /// Attributes carrying a schema `ID` annotation
    #[serde(default)]
    pub schema_id_attributes: Vec<String>,
    /// Labels of the events that resolve, in document order
    #[serde(default)]
    pub selected: Vec<String>,
    /// Labels after which `is_child_fragment_resolved` holds; unchecked when absent
    #[serde(default)]
    pub child_resolved: Option<Vec<String>>,
    /// Expected parse error key
    #[serde(default)]
    pub error: Option<String>,
    /// Expected unsupported scheme names
    #[serde(default)]
    pub warnings: Vec<String>,
}

fn default_id_attributes() -> Vec<String> {
    vec!["id".to_string()]
}

/// Load all test cases from a YAML fixture file
pub fn load_fixtures(path: &Path) -> Vec<TestCase> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read fixture file {:?}: {}", path, e));
    serde_yaml::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture file {:?}: {}", path, e))
}

/// Load fixtures from the standard fixtures directory
pub fn load_fixtures_by_name(name: &str) -> Vec<TestCase> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.yaml", name));
    load_fixtures(&path)
}
