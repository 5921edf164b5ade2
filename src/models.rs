use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A project's own published name and version.
///
/// When checking a project's dependents, this is the dependency they are
/// expected to pin.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyDescriptor {
    pub name: String,
    pub version: Option<String>,
}

/// What a downstream project says about itself and about one dependency.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyVersion {
    pub project_version: Option<String>,
    pub project_name: String,
    pub pinned_version: Option<String>,
}

/// One parent → child edge of the project tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    /// Identifier (repository name) of the child project.
    pub name: String,
    /// Published name of the parent project.
    pub dependency: String,
    /// Version of the parent pinned in the child's manifest.
    pub expected: Option<String>,
    /// Version the child project is at.
    pub is: Option<String>,
    /// Version the parent project is currently at.
    pub current: Option<String>,
}

impl ReportRecord {
    /// Whether the pinned version of the parent matches the parent's current version.
    pub fn status(&self) -> VersionStatus {
        match (self.expected.as_deref(), self.current.as_deref()) {
            (Some(pinned), Some(current)) => {
                if normalize_version(pinned) == normalize_version(current) {
                    VersionStatus::InSync
                } else {
                    VersionStatus::Drift
                }
            }
            _ => VersionStatus::Unknown,
        }
    }
}

impl Serialize for ReportRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("dependency", &self.dependency)?;
        map.serialize_entry("expected", &self.expected)?;
        map.serialize_entry("is", &self.is)?;
        map.serialize_entry("current", &self.current)?;
        map.serialize_entry("status", &self.status())?;
        map.end()
    }
}

/// Strip range operators and a leading `v` so `^1.2.0`, `v1.2.0` and
/// `1.2.0` compare equal.
pub fn normalize_version(raw: &str) -> &str {
    let trimmed = raw
        .trim()
        .trim_start_matches(|c: char| matches!(c, '^' | '~' | '=' | '<' | '>') || c.is_whitespace());
    trimmed
        .strip_prefix(|c: char| c == 'v' || c == 'V')
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionStatus {
    InSync,
    Drift,
    Unknown,
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionStatus::InSync => write!(f, "in sync"),
            VersionStatus::Drift => write!(f, "drift"),
            VersionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Javascript,
    Php,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Javascript => write!(f, "javascript"),
            Ecosystem::Php => write!(f, "php"),
        }
    }
}

/// Report records of one ecosystem, in pre-order of its project tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EcosystemReport {
    pub ecosystem: Ecosystem,
    pub records: Vec<ReportRecord>,
}

/// Ecosystem reports keyed by ecosystem name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullReport {
    pub ecosystems: Vec<EcosystemReport>,
}

impl FullReport {
    pub fn records(&self) -> impl Iterator<Item = &ReportRecord> {
        self.ecosystems.iter().flat_map(|e| e.records.iter())
    }

    pub fn has_drift(&self) -> bool {
        self.records().any(|r| r.status() == VersionStatus::Drift)
    }
}

impl Serialize for FullReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.ecosystems.len()))?;
        for report in &self.ecosystems {
            map.serialize_entry(&report.ecosystem.to_string(), &report.records)?;
        }
        map.end()
    }
}
