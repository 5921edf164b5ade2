//! Async HTTP access to the source host that publishes project manifests and tags.
//!
//! [`Source`] is the seam the ecosystem adapters depend on; [`github`] is the
//! production implementation. Every call issues exactly one request and never
//! retries.

pub mod github;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("{url} did not return valid JSON: {source}")]
    InvalidJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{url} returned an unexpected payload: {message}")]
    Malformed { url: String, message: String },
}

/// A version-control tag. Only the name is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub name: String,
}

#[async_trait]
pub trait Source: Send + Sync {
    /// Fetch and parse `file` from the default branch of `repo`.
    async fn fetch_manifest(&self, repo: &str, file: &str) -> Result<Value, FetchError>;

    /// Tags of `repo` in the order the host returns them (most recent first).
    async fn fetch_tags(&self, repo: &str) -> Result<Vec<Tag>, FetchError>;
}
