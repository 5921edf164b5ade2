use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::models::Ecosystem;

/// Root configuration structure, deserialized from `.kit-deps-checkr/config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where manifests and tags are fetched from.
    pub source: SourceConfig,
    /// Web server settings.
    pub server: ServerConfig,
    /// The project tree, one root per ecosystem.
    #[serde(rename = "ecosystems")]
    pub tree: ProjectTree,
}

/// Remote source-hosting endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Raw file host; manifests live at `<raw_base>/<org>/<repo>/<branch>/<file>`.
    pub raw_base: String,
    /// REST API host; tags live at `<api_base>/repos/<org>/<repo>/tags`.
    pub api_base: String,
    pub organization: String,
    pub branch: String,
    pub user_agent: String,
    /// Per-request timeout. Unset means no timeout.
    pub request_timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            raw_base: "https://raw.githubusercontent.com".to_string(),
            api_base: "https://api.github.com".to_string(),
            organization: "prismicio".to_string(),
            branch: "master".to_string(),
            user_agent: concat!("kit-deps-checkr/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Ordered list of ecosystem roots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ProjectTree {
    pub roots: Vec<EcosystemRoot>,
}

/// A kit and the projects that depend on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EcosystemRoot {
    pub ecosystem: Ecosystem,
    /// Repository of the kit itself.
    pub repo: String,
    #[serde(default)]
    pub projects: Vec<ProjectNode>,
}

/// A project identified by its repository, with its own dependents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectNode {
    pub repo: String,
    #[serde(default)]
    pub projects: Vec<ProjectNode>,
}

impl ProjectNode {
    pub fn leaf(repo: &str) -> Self {
        ProjectNode {
            repo: repo.to_string(),
            projects: Vec::new(),
        }
    }

    pub fn with(repo: &str, projects: Vec<ProjectNode>) -> Self {
        ProjectNode {
            repo: repo.to_string(),
            projects,
        }
    }
}

impl ProjectTree {
    /// Each ecosystem may root at most one tree; reports are keyed by ecosystem.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for root in &self.roots {
            if !seen.insert(root.ecosystem) {
                bail!("ecosystem `{}` is configured more than once", root.ecosystem);
            }
        }
        Ok(())
    }
}

/// Number of nodes in a forest of project nodes, descendants included.
pub fn node_count(nodes: &[ProjectNode]) -> usize {
    nodes.iter().map(|n| 1 + node_count(&n.projects)).sum()
}

impl Default for ProjectTree {
    /// The prismic kits and their starters.
    fn default() -> Self {
        ProjectTree {
            roots: vec![
                EcosystemRoot {
                    ecosystem: Ecosystem::Javascript,
                    repo: "javascript-kit".to_string(),
                    projects: vec![
                        ProjectNode::with("prismic-nodejs", vec![ProjectNode::leaf("nodejs-sdk")]),
                        ProjectNode::leaf("prismic-cli"),
                        ProjectNode::leaf("reactjs-starter"),
                    ],
                },
                EcosystemRoot {
                    ecosystem: Ecosystem::Php,
                    repo: "php-kit".to_string(),
                    projects: vec![
                        ProjectNode::leaf("php-plain-starter"),
                        ProjectNode::with(
                            "SymfonyBundle",
                            vec![ProjectNode::leaf("php-symfony-starter")],
                        ),
                        ProjectNode::leaf("php-quickstart"),
                        ProjectNode::leaf("php-website"),
                        ProjectNode::leaf("php-blog"),
                        ProjectNode::leaf("php-laravel-starter"),
                    ],
                },
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            server: ServerConfig::default(),
            tree: ProjectTree::default(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<cwd>/.kit-deps-checkr/config.toml`
/// 3. `~/.config/kit-deps-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(cwd: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local = cwd.join(".kit-deps-checkr").join("config.toml");
    if local.exists() {
        return read_config(&local);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config: PathBuf = home
            .join(".config")
            .join("kit-deps-checkr")
            .join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    tracing::debug!("no config file found, using built-in project tree");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading config");
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.tree.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_tree() {
        let tree = ProjectTree::default();
        assert_eq!(tree.roots.len(), 2);
        assert_eq!(tree.roots[0].ecosystem, Ecosystem::Javascript);
        assert_eq!(tree.roots[0].repo, "javascript-kit");
        assert_eq!(node_count(&tree.roots[0].projects), 4);
        assert_eq!(tree.roots[1].ecosystem, Ecosystem::Php);
        assert_eq!(node_count(&tree.roots[1].projects), 7);
        assert_eq!(tree.roots[1].projects[1].repo, "SymfonyBundle");
    }

    #[test]
    fn test_parse_config_preserves_order() {
        let toml = r#"
[source]
organization = "acme"

[[ecosystems]]
ecosystem = "php"
repo = "php-kit"

[[ecosystems.projects]]
repo = "zeta"

[[ecosystems.projects]]
repo = "alpha"

[[ecosystems.projects.projects]]
repo = "alpha-child"

[[ecosystems]]
ecosystem = "javascript"
repo = "js-kit"
"#;
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{}", toml).unwrap();
        let config = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap();

        assert_eq!(config.source.organization, "acme");
        assert_eq!(config.source.branch, "master");
        assert_eq!(config.server.bind, "127.0.0.1:3000");

        let roots = &config.tree.roots;
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].ecosystem, Ecosystem::Php);
        let repos: Vec<&str> = roots[0].projects.iter().map(|p| p.repo.as_str()).collect();
        assert_eq!(repos, vec!["zeta", "alpha"]);
        assert_eq!(roots[0].projects[1].projects[0].repo, "alpha-child");
        assert!(roots[1].projects.is_empty());
    }

    #[test]
    fn test_project_local_config() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".kit-deps-checkr");
        std::fs::create_dir(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[server]\nbind = \"0.0.0.0:8080\"\n",
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        // No [[ecosystems]] given: the built-in tree applies.
        assert_eq!(config.tree, ProjectTree::default());
    }

    #[test]
    fn test_example_config_matches_builtin_tree() {
        let config: Config = toml::from_str(include_str!("../config.example.toml")).unwrap();
        assert_eq!(config.tree, ProjectTree::default());
        assert_eq!(config.source.request_timeout_secs, None);
    }

    #[test]
    fn test_unknown_ecosystem_is_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[[ecosystems]]\necosystem = \"cobol\"\nrepo = \"x\"\n").unwrap();
        assert!(load_config(Path::new("/nonexistent"), Some(f.path())).is_err());
    }

    #[test]
    fn test_duplicate_ecosystem_is_rejected() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            "[[ecosystems]]\necosystem = \"php\"\nrepo = \"a\"\n\n[[ecosystems]]\necosystem = \"php\"\nrepo = \"b\"\n"
        )
        .unwrap();
        let err = load_config(Path::new("/nonexistent"), Some(f.path())).unwrap_err();
        assert!(err.to_string().contains("`php` is configured more than once"));
    }

    #[test]
    fn test_default_user_agent_carries_version() {
        let agent = SourceConfig::default().user_agent;
        assert_eq!(agent, format!("kit-deps-checkr/{}", env!("CARGO_PKG_VERSION")));
    }
}
