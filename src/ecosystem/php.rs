use std::sync::Arc;

use async_trait::async_trait;

use super::{latest_tag, manifest_name, pinned_version, AdapterError, EcosystemAdapter};
use crate::models::{DependencyDescriptor, DependencyVersion};
use crate::registry::Source;

const MANIFEST: &str = "composer.json";

/// Composer packages are versioned by git tag; `composer.json` only
/// supplies the package name and the `require` map.
pub struct PhpAdapter {
    source: Arc<dyn Source>,
}

impl PhpAdapter {
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl EcosystemAdapter for PhpAdapter {
    async fn fetch_kit_version(&self, repo: &str) -> Result<DependencyDescriptor, AdapterError> {
        let manifest = self.source.fetch_manifest(repo, MANIFEST).await?;
        let tags = self.source.fetch_tags(repo).await?;

        Ok(DependencyDescriptor {
            name: manifest_name(&manifest, repo, MANIFEST)?,
            version: latest_tag(&tags),
        })
    }

    async fn fetch_dependency_version(
        &self,
        repo: &str,
        dependency: &str,
    ) -> Result<DependencyVersion, AdapterError> {
        let tags = self.source.fetch_tags(repo).await?;
        let manifest = self.source.fetch_manifest(repo, MANIFEST).await?;

        Ok(DependencyVersion {
            project_version: latest_tag(&tags),
            project_name: manifest_name(&manifest, repo, MANIFEST)?,
            pinned_version: pinned_version(&manifest, "require", dependency),
        })
    }
}
