//! Raw serde schema for the stack manifest
//!
//! These types mirror the on-disk YAML one-to-one. Validation beyond what
//! serde enforces (non-empty `api`, closed component kinds, order
//! resolution) happens in the loader, which converts them into plan types.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawManifest {
    pub api: String,

    #[serde(default)]
    pub settings: RawSettings,

    #[serde(default)]
    pub components: Vec<RawComponent>,

    #[serde(default)]
    pub order: Vec<RawOrderEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(crate) struct RawSettings {
    pub kubectl_command: Vec<String>,
    pub registry: Option<String>,
    pub secrets_file: String,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            kubectl_command: vec!["kubectl".to_string()],
            registry: None,
            secrets_file: "./secrets.yml".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawComponent {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub path: String,

    /// Absent in older manifests; those build from `<path>/Dockerfile`
    /// with an allow-everything platform policy.
    #[serde(default)]
    pub build: Option<RawBuildSettings>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBuildSettings {
    pub context: String,
    pub dockerfile: String,
    pub platforms: RawPlatforms,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlatforms {
    pub compose: RawPolicy,
    pub kubernetes: RawPolicy,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPolicy {
    pub build: bool,
    pub push: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOrderEntry {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,
}
