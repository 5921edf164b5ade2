use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::{DependencyDescriptor, DependencyVersion, Ecosystem};
use crate::registry::{FetchError, Source, Tag};

pub mod javascript;
pub mod php;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{repo}/{file} has no `{field}` field")]
    MissingField {
        repo: String,
        file: &'static str,
        field: &'static str,
    },
}

/// Reads versions out of one ecosystem's manifests.
#[async_trait]
pub trait EcosystemAdapter: Send + Sync {
    /// Name and version of a kit, the root of an ecosystem's tree.
    async fn fetch_kit_version(&self, repo: &str) -> Result<DependencyDescriptor, AdapterError>;

    /// Own name and version of `repo`, plus the version it pins for `dependency`.
    async fn fetch_dependency_version(
        &self,
        repo: &str,
        dependency: &str,
    ) -> Result<DependencyVersion, AdapterError>;
}

impl Ecosystem {
    pub fn adapter(self, source: Arc<dyn Source>) -> Box<dyn EcosystemAdapter> {
        match self {
            Ecosystem::Javascript => Box::new(javascript::JavascriptAdapter::new(source)),
            Ecosystem::Php => Box::new(php::PhpAdapter::new(source)),
        }
    }
}

/// The manifest's `name`, which every ecosystem requires.
fn manifest_name(manifest: &Value, repo: &str, file: &'static str) -> Result<String, AdapterError> {
    manifest
        .get("name")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| AdapterError::MissingField {
            repo: repo.to_string(),
            file,
            field: "name",
        })
}

/// `manifest[section][dependency]` as a string, if declared.
fn pinned_version(manifest: &Value, section: &str, dependency: &str) -> Option<String> {
    manifest
        .get(section)
        .and_then(|deps| deps.get(dependency))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Tag lists come most recent first.
fn latest_tag(tags: &[Tag]) -> Option<String> {
    tags.first().map(|t| t.name.clone())
}
