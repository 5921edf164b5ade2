use std::sync::Arc;

use async_trait::async_trait;

use super::{manifest_name, pinned_version, AdapterError, EcosystemAdapter};
use crate::models::{DependencyDescriptor, DependencyVersion};
use crate::registry::Source;

const MANIFEST: &str = "package.json";

/// npm packages: name, version and `dependencies` all come from `package.json`.
pub struct JavascriptAdapter {
    source: Arc<dyn Source>,
}

impl JavascriptAdapter {
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl EcosystemAdapter for JavascriptAdapter {
    async fn fetch_kit_version(&self, repo: &str) -> Result<DependencyDescriptor, AdapterError> {
        let manifest = self.source.fetch_manifest(repo, MANIFEST).await?;

        Ok(DependencyDescriptor {
            name: manifest_name(&manifest, repo, MANIFEST)?,
            version: manifest
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string),
        })
    }

    async fn fetch_dependency_version(
        &self,
        repo: &str,
        dependency: &str,
    ) -> Result<DependencyVersion, AdapterError> {
        let manifest = self.source.fetch_manifest(repo, MANIFEST).await?;

        Ok(DependencyVersion {
            project_version: manifest
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string),
            project_name: manifest_name(&manifest, repo, MANIFEST)?,
            pinned_version: pinned_version(&manifest, "dependencies", dependency),
        })
    }
}
