//! Deployment plan types
//!
//! A [`DeploymentPlan`] is the validated, in-memory form of the manifest.
//! It is constructed once at startup and never mutated afterwards; the
//! sequencer only reads from it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::sequencer::Platform;

/// Kind of a deployable component. Closed set; anything else in the
/// manifest is a load-time error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ComponentKind {
    Database,
    Microservice,
    Application,
}

impl ComponentKind {
    /// Parse a manifest `type` value, `None` for anything outside the set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "database" => Some(ComponentKind::Database),
            "microservice" => Some(ComponentKind::Microservice),
            "application" => Some(ComponentKind::Application),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Database => "database",
            ComponentKind::Microservice => "microservice",
            ComponentKind::Application => "application",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a component is built and pushed on a given platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformPolicy {
    pub build: bool,
    pub push: bool,
}

impl Default for PlatformPolicy {
    fn default() -> Self {
        // Manifests without build settings build and push everywhere.
        Self {
            build: true,
            push: true,
        }
    }
}

/// Per-component build configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Build context, relative to the project root
    pub context: PathBuf,
    /// Dockerfile path, relative to the context
    pub dockerfile: PathBuf,
    pub compose: PlatformPolicy,
    pub kubernetes: PlatformPolicy,
}

/// One deployable unit defined in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    id: String,
    pub name: String,
    pub kind: ComponentKind,
    /// Source/build context, relative to the project root
    pub path: PathBuf,
    pub build: Option<BuildSettings>,
}

impl Component {
    pub fn new(
        api: &str,
        name: String,
        kind: ComponentKind,
        path: PathBuf,
        build: Option<BuildSettings>,
    ) -> Self {
        let id = format!("{}-{}-{}", api, kind, name);
        Self {
            id,
            name,
            kind,
            path,
            build,
        }
    }

    /// Globally unique identifier, `{api}-{type}-{name}`. Immutable; the
    /// sole key used for ordering lookups and image tags.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Build/push policy for the given platform
    pub fn policy(&self, platform: Platform) -> PlatformPolicy {
        match &self.build {
            Some(build) => match platform {
                Platform::Compose => build.compose,
                Platform::Kubernetes => build.kubernetes,
            },
            None => PlatformPolicy::default(),
        }
    }

    /// Build context directory, relative to the project root
    pub fn build_context(&self) -> &Path {
        match &self.build {
            Some(build) => &build.context,
            None => &self.path,
        }
    }

    /// Dockerfile location, relative to the build context
    pub fn dockerfile(&self) -> PathBuf {
        match &self.build {
            Some(build) => build.dockerfile.clone(),
            None => PathBuf::from("Dockerfile"),
        }
    }

    /// Generated cluster configuration, conventionally next to the sources
    pub fn config_file(&self) -> PathBuf {
        self.path.join("kubernetes.yml")
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Tool settings from the manifest `settings` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Cluster CLI invocation, e.g. `["kubectl"]` or `["minikube", "kubectl", "--"]`
    pub kubectl_command: Vec<String>,
    /// Registry host; absent means the default public registry
    pub registry: Option<String>,
    /// Secrets file applied before any component on Kubernetes
    pub secrets_file: PathBuf,
}

/// The validated, immutable deployment plan
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub api: String,
    pub settings: Settings,
    components: BTreeMap<String, Component>,
    order: Vec<String>,
}

impl DeploymentPlan {
    pub(crate) fn new(
        api: String,
        settings: Settings,
        components: BTreeMap<String, Component>,
        order: Vec<String>,
    ) -> Self {
        debug_assert!(order.iter().all(|id| components.contains_key(id)));
        Self {
            api,
            settings,
            components,
            order,
        }
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// Components in deployment order. This is exactly the manifest `order`
    /// sequence; a component omitted from `order` never appears here.
    pub fn ordered(&self) -> impl Iterator<Item = &Component> {
        self.order.iter().filter_map(|id| self.components.get(id))
    }

    pub fn ordered_count(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_kind_parse_closed_set() {
        assert_eq!(
            ComponentKind::parse("database"),
            Some(ComponentKind::Database)
        );
        assert_eq!(
            ComponentKind::parse("microservice"),
            Some(ComponentKind::Microservice)
        );
        assert_eq!(
            ComponentKind::parse("application"),
            Some(ComponentKind::Application)
        );
        assert_eq!(ComponentKind::parse("daemon"), None);
        assert_eq!(ComponentKind::parse("Database"), None);
    }

    #[test]
    fn component_id_form() {
        let component = Component::new(
            "shop",
            "cart".to_string(),
            ComponentKind::Microservice,
            PathBuf::from("src/Cart"),
            None,
        );
        assert_eq!(component.id(), "shop-microservice-cart");
    }

    #[test]
    fn component_without_build_settings_uses_defaults() {
        let component = Component::new(
            "shop",
            "cart".to_string(),
            ComponentKind::Microservice,
            PathBuf::from("src/Cart"),
            None,
        );
        assert_eq!(component.build_context(), Path::new("src/Cart"));
        assert_eq!(component.dockerfile(), PathBuf::from("Dockerfile"));
        let policy = component.policy(Platform::Kubernetes);
        assert!(policy.build);
        assert!(policy.push);
    }

    #[test]
    fn component_policy_selects_platform() {
        let component = Component::new(
            "shop",
            "web".to_string(),
            ComponentKind::Application,
            PathBuf::from("src/Web"),
            Some(BuildSettings {
                context: PathBuf::from("src/Web"),
                dockerfile: PathBuf::from("Dockerfile"),
                compose: PlatformPolicy {
                    build: true,
                    push: false,
                },
                kubernetes: PlatformPolicy {
                    build: true,
                    push: true,
                },
            }),
        );
        assert!(!component.policy(Platform::Compose).push);
        assert!(component.policy(Platform::Kubernetes).push);
    }

    #[test]
    fn config_file_is_next_to_sources() {
        let component = Component::new(
            "shop",
            "db".to_string(),
            ComponentKind::Database,
            PathBuf::from("src/Db"),
            None,
        );
        assert_eq!(component.config_file(), PathBuf::from("src/Db/kubernetes.yml"));
    }
}
