//! Manifest loading
//!
//! Loading is two-pass: first every declared component is materialized into
//! an index keyed by `(kind, name)`, then the manifest `order` list is
//! resolved against that index. Order entries that name an unknown
//! component are skipped, not rejected, and a component missing from
//! `order` is simply never deployed. Manifest authors rely on both: the
//! order list is how a defined component is switched off.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StackError, StackResult};

use super::plan::{BuildSettings, Component, ComponentKind, DeploymentPlan, PlatformPolicy, Settings};
use super::schema::{RawBuildSettings, RawManifest};

/// Load and validate a stack manifest.
///
/// Fails with [`StackError::ManifestNotFound`] when the file is absent and
/// [`StackError::ManifestInvalid`] on any structural or semantic problem.
/// Never produces a partially valid plan.
pub fn load(path: &Path) -> StackResult<DeploymentPlan> {
    if !path.is_file() {
        return Err(StackError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let raw: RawManifest =
        serde_yaml_ng::from_str(&content).map_err(|e| StackError::ManifestInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if raw.api.trim().is_empty() {
        return Err(StackError::ManifestInvalid {
            path: path.to_path_buf(),
            message: "invalid API name".to_string(),
        });
    }

    let settings = Settings {
        kubectl_command: raw.settings.kubectl_command,
        registry: raw.settings.registry,
        secrets_file: PathBuf::from(raw.settings.secrets_file),
    };

    // Pass 1: materialize every declared component.
    let mut components = BTreeMap::new();
    let mut index: HashMap<(ComponentKind, String), String> = HashMap::new();

    for entry in raw.components {
        let kind = ComponentKind::parse(&entry.kind).ok_or_else(|| StackError::ManifestInvalid {
            path: path.to_path_buf(),
            message: format!("invalid component type '{}'", entry.kind),
        })?;

        let component = Component::new(
            &raw.api,
            entry.name.clone(),
            kind,
            PathBuf::from(entry.path),
            entry.build.map(build_settings),
        );

        index.insert((kind, entry.name), component.id().to_string());
        components.insert(component.id().to_string(), component);
    }

    // Pass 2: resolve the declared order, skipping dangling entries.
    let mut order = Vec::new();
    for entry in raw.order {
        let Some(kind) = ComponentKind::parse(&entry.kind) else {
            continue;
        };
        if let Some(id) = index.get(&(kind, entry.name)) {
            order.push(id.clone());
        }
    }

    Ok(DeploymentPlan::new(raw.api, settings, components, order))
}

fn build_settings(raw: RawBuildSettings) -> BuildSettings {
    BuildSettings {
        context: PathBuf::from(raw.context),
        dockerfile: PathBuf::from(raw.dockerfile),
        compose: PlatformPolicy {
            build: raw.platforms.compose.build,
            push: raw.platforms.compose.push,
        },
        kubernetes: PlatformPolicy {
            build: raw.platforms.kubernetes.build,
            push: raw.platforms.kubernetes.push,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stack.yml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    const BASIC: &str = "\
api: shop
components:
  - name: db
    type: database
    path: src/Db
  - name: cart
    type: microservice
    path: src/Cart
  - name: web
    type: application
    path: src/Web
order:
  - { name: db, type: database }
  - { name: cart, type: microservice }
  - { name: web, type: application }
";

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("stack.yml")).unwrap_err();
        assert!(matches!(err, StackError::ManifestNotFound { .. }));
    }

    #[test]
    fn load_basic_manifest() {
        let (_dir, path) = write_manifest(BASIC);
        let plan = load(&path).unwrap();
        assert_eq!(plan.api, "shop");
        assert_eq!(plan.component_count(), 3);
        let ids: Vec<_> = plan.ordered().map(|c| c.id().to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "shop-database-db",
                "shop-microservice-cart",
                "shop-application-web"
            ]
        );
    }

    #[test]
    fn load_default_settings() {
        let (_dir, path) = write_manifest(BASIC);
        let plan = load(&path).unwrap();
        assert_eq!(plan.settings.kubectl_command, vec!["kubectl".to_string()]);
        assert_eq!(plan.settings.registry, None);
        assert_eq!(plan.settings.secrets_file, PathBuf::from("./secrets.yml"));
    }

    #[test]
    fn load_explicit_settings() {
        let (_dir, path) = write_manifest(
            "\
api: shop
settings:
  kubectl_command: [minikube, kubectl, --]
  registry: localhost:5000
  secrets_file: ./k8s/secrets.yml
components: []
order: []
",
        );
        let plan = load(&path).unwrap();
        assert_eq!(
            plan.settings.kubectl_command,
            vec!["minikube", "kubectl", "--"]
        );
        assert_eq!(plan.settings.registry.as_deref(), Some("localhost:5000"));
        assert_eq!(plan.settings.secrets_file, PathBuf::from("./k8s/secrets.yml"));
    }

    #[test]
    fn load_empty_api_is_invalid() {
        let (_dir, path) = write_manifest("api: \"\"\ncomponents: []\norder: []\n");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, StackError::ManifestInvalid { .. }));
    }

    #[test]
    fn load_missing_api_is_invalid() {
        let (_dir, path) = write_manifest("components: []\norder: []\n");
        let err = load(&path).unwrap_err();
        assert!(matches!(err, StackError::ManifestInvalid { .. }));
    }

    #[test]
    fn load_unknown_component_type_is_invalid() {
        let (_dir, path) = write_manifest(
            "\
api: shop
components:
  - name: db
    type: daemon
    path: src/Db
order: []
",
        );
        let err = load(&path).unwrap_err();
        match err {
            StackError::ManifestInvalid { message, .. } => {
                assert!(message.contains("invalid component type 'daemon'"));
            }
            other => panic!("expected ManifestInvalid, got {:?}", other),
        }
    }

    #[test]
    fn load_incomplete_build_settings_is_invalid() {
        let (_dir, path) = write_manifest(
            "\
api: shop
components:
  - name: cart
    type: microservice
    path: src/Cart
    build:
      context: src/Cart
order: []
",
        );
        let err = load(&path).unwrap_err();
        assert!(matches!(err, StackError::ManifestInvalid { .. }));
    }

    #[test]
    fn dangling_order_entry_is_skipped() {
        let (_dir, path) = write_manifest(
            "\
api: shop
components:
  - name: db
    type: database
    path: src/Db
order:
  - { name: db, type: database }
  - { name: ghost, type: microservice }
  - { name: db, type: microservice }
",
        );
        let plan = load(&path).unwrap();
        let ids: Vec<_> = plan.ordered().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["shop-database-db"]);
    }

    #[test]
    fn component_omitted_from_order_is_never_deployed() {
        let (_dir, path) = write_manifest(
            "\
api: shop
components:
  - name: db
    type: database
    path: src/Db
  - name: cart
    type: microservice
    path: src/Cart
order:
  - { name: cart, type: microservice }
",
        );
        let plan = load(&path).unwrap();
        assert_eq!(plan.component_count(), 2);
        let ids: Vec<_> = plan.ordered().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["shop-microservice-cart"]);
        // Still defined, just not deployed.
        assert!(plan.get("shop-database-db").is_some());
    }

    #[test]
    fn load_build_settings() {
        let (_dir, path) = write_manifest(
            "\
api: shop
components:
  - name: cart
    type: microservice
    path: src/Cart
    build:
      context: src/Cart
      dockerfile: docker/Dockerfile.cart
      platforms:
        compose: { build: true, push: false }
        kubernetes: { build: false, push: false }
order:
  - { name: cart, type: microservice }
",
        );
        let plan = load(&path).unwrap();
        let cart = plan.get("shop-microservice-cart").unwrap();
        let build = cart.build.as_ref().unwrap();
        assert_eq!(build.context, PathBuf::from("src/Cart"));
        assert_eq!(build.dockerfile, PathBuf::from("docker/Dockerfile.cart"));
        assert!(!build.compose.push);
        assert!(!build.kubernetes.build);
    }
}
