//! Report assembly and rendering.
//!
//! - [`run`] walks every ecosystem root of the project tree and builds a [`FullReport`].
//! - [`terminal`] renders a colored table with a summary box; respects `--verbose` / `--quiet`.
//! - [`html`] renders the page served by the web route.

pub mod html;
pub mod terminal;

use std::sync::Arc;

use thiserror::Error;

use crate::config::ProjectTree;
use crate::ecosystem::AdapterError;
use crate::models::{EcosystemReport, FullReport};
use crate::registry::Source;
use crate::walker;

/// The check is all-or-nothing: any failed fetch aborts the whole report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("report generation failed: {0}")]
    Generation(#[from] AdapterError),
}

/// Check every ecosystem of `tree`, one after the other.
pub async fn run(source: Arc<dyn Source>, tree: &ProjectTree) -> Result<FullReport, ReportError> {
    let mut report = FullReport::default();

    for root in &tree.roots {
        tracing::info!(ecosystem = %root.ecosystem, kit = %root.repo, "checking ecosystem");

        let adapter = root.ecosystem.adapter(source.clone());
        let kit = adapter.fetch_kit_version(&root.repo).await?;
        let records = walker::check(adapter.as_ref(), &kit, &root.projects).await?;

        tracing::info!(
            ecosystem = %root.ecosystem,
            kit = %kit.name,
            version = kit.version.as_deref().unwrap_or("none"),
            records = records.len(),
            "ecosystem checked"
        );

        report.ecosystems.push(EcosystemReport {
            ecosystem: root.ecosystem,
            records,
        });
    }

    Ok(report)
}
