use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{FetchError, Source, Tag};
use crate::config::SourceConfig;

/// Reads manifests from the raw-content host and tags from the REST API.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: SourceConfig,
}

impl GitHubClient {
    pub fn new(config: SourceConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self { client, config })
    }

    pub fn manifest_url(&self, repo: &str, file: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.config.raw_base.trim_end_matches('/'),
            self.config.organization,
            repo,
            self.config.branch,
            file
        )
    }

    pub fn tags_url(&self, repo: &str) -> String {
        format!(
            "{}/repos/{}/{}/tags",
            self.config.api_base.trim_end_matches('/'),
            self.config.organization,
            repo
        )
    }

    /// GET `url` and parse the body as JSON.
    pub async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!(%url, "fetching");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Raw hosts answer with text/plain; parse regardless of content type.
        let body = response.text().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&body).map_err(|source| FetchError::InvalidJson {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl Source for GitHubClient {
    async fn fetch_manifest(&self, repo: &str, file: &str) -> Result<Value, FetchError> {
        let url = self.manifest_url(repo, file);
        self.fetch_json(&url).await
    }

    async fn fetch_tags(&self, repo: &str) -> Result<Vec<Tag>, FetchError> {
        let url = self.tags_url(repo);
        let data = self.fetch_json(&url).await?;
        serde_json::from_value(data).map_err(|e| FetchError::Malformed {
            url,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GitHubClient {
        GitHubClient::new(SourceConfig {
            raw_base: server.base_url(),
            api_base: server.base_url(),
            organization: "acme".to_string(),
            branch: "master".to_string(),
            user_agent: "kit-deps-checkr-test".to_string(),
            request_timeout_secs: Some(5),
        })
        .unwrap()
    }

    #[test]
    fn test_urls_follow_host_layout() {
        let client = GitHubClient::new(SourceConfig::default()).unwrap();
        assert_eq!(
            client.manifest_url("php-kit", "composer.json"),
            "https://raw.githubusercontent.com/prismicio/php-kit/master/composer.json"
        );
        assert_eq!(
            client.tags_url("php-kit"),
            "https://api.github.com/repos/prismicio/php-kit/tags"
        );
    }

    #[test]
    fn test_invalid_user_agent_fails_client_build() {
        let err = GitHubClient::new(SourceConfig {
            user_agent: "kit-deps\nchecker".to_string(),
            ..SourceConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, FetchError::Client(_)));
        assert!(err.to_string().starts_with("could not build HTTP client"));
    }

    #[tokio::test]
    async fn test_fetch_manifest_sends_user_agent() {
        let server = MockServer::start_async().await;
        let mock = server.mock_async(|when, then| {
            when.method(GET)
                .path("/acme/javascript-kit/master/package.json")
                .header("user-agent", "kit-deps-checkr-test");
            then.status(200)
                .header("content-type", "text/plain")
                .body(r#"{"name":"prismic-javascript","version":"1.2.0"}"#);
        })
        .await;

        let client = client_for(&server);
        let manifest = client
            .fetch_manifest("javascript-kit", "package.json")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(manifest["version"], "1.2.0");
    }

    #[tokio::test]
    async fn test_fetch_tags_keeps_api_order() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/repos/acme/php-kit/tags");
            then.status(200).json_body(json!([
                {"name": "4.1.0", "commit": {"sha": "abc"}},
                {"name": "4.0.0", "commit": {"sha": "def"}}
            ]));
        })
        .await;

        let tags = client_for(&server).fetch_tags("php-kit").await.unwrap();
        let names: Vec<&str> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["4.1.0", "4.0.0"]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/acme/missing/master/package.json");
            then.status(404).body("404: Not Found");
        })
        .await;

        let err = client_for(&server)
            .fetch_manifest("missing", "package.json")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_non_json_body_is_reported() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/acme/broken/master/package.json");
            then.status(200).body("<html>not json</html>");
        })
        .await;

        let err = client_for(&server)
            .fetch_manifest("broken", "package.json")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidJson { .. }));
    }

    #[tokio::test]
    async fn test_tags_payload_must_be_a_list() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/repos/acme/php-kit/tags");
            then.status(200)
                .json_body(json!({"message": "API rate limit exceeded"}));
        })
        .await;

        let err = client_for(&server).fetch_tags("php-kit").await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let client = GitHubClient::new(SourceConfig {
            raw_base: "http://127.0.0.1:1".to_string(),
            ..SourceConfig::default()
        })
        .unwrap();

        let err = client.fetch_manifest("x", "package.json").await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. }));
    }
}
