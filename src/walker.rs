//! Depth-first walk of a project tree.
//!
//! Each child is fetched only after its previous sibling's whole subtree is
//! done, so at most one request is in flight and records come out in pre-order.

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::config::ProjectNode;
use crate::ecosystem::{AdapterError, EcosystemAdapter};
use crate::models::{DependencyDescriptor, ReportRecord};

/// One record per node under `children`, checking each child against `parent`.
pub fn check<'a>(
    adapter: &'a dyn EcosystemAdapter,
    parent: &'a DependencyDescriptor,
    children: &'a [ProjectNode],
) -> BoxFuture<'a, Result<Vec<ReportRecord>, AdapterError>> {
    async move {
        let mut records = Vec::new();

        for child in children {
            let found = adapter
                .fetch_dependency_version(&child.repo, &parent.name)
                .await?;

            tracing::debug!(
                project = %child.repo,
                dependency = %parent.name,
                pinned = ?found.pinned_version,
                version = ?found.project_version,
                "checked edge"
            );

            records.push(ReportRecord {
                name: child.repo.clone(),
                dependency: parent.name.clone(),
                expected: found.pinned_version,
                is: found.project_version.clone(),
                current: parent.version.clone(),
            });

            let descriptor = DependencyDescriptor {
                name: found.project_name,
                version: found.project_version,
            };
            records.extend(check(adapter, &descriptor, &child.projects).await?);
        }

        Ok(records)
    }
    .boxed()
}
