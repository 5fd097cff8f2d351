// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Versioned job documents: create-or-replace, update, lookup, list.

use crate::RegistryError;
use jk_coord::{CoordClient, StoreError};
use jk_core::{JobData, JobDocument, Paths};
use tracing::debug;

/// CRUD over job documents in one namespace.
///
/// Jobs are append/update-only here: deletion is an administrative
/// action outside this registry. There is no compare-and-swap — writers
/// racing on the same `(group, name)` without external mutual exclusion
/// (in practice, the leader-election recipe) can silently overwrite each
/// other's version bump.
#[derive(Clone)]
pub struct JobRegistry {
    client: CoordClient,
    paths: Paths,
}

impl JobRegistry {
    pub fn new(client: CoordClient, paths: Paths) -> Self {
        Self { client, paths }
    }

    /// Every job document in the namespace.
    ///
    /// Walks the group directories and reads each job node individually;
    /// the composite view is not an atomic snapshot and carries no order
    /// guarantee. Callers needing determinism sort explicitly.
    pub async fn get_all_jobs(&self) -> Result<Vec<JobDocument>, RegistryError> {
        let mut jobs = Vec::new();
        for group in self.client.get_children(&self.paths.jobs()).await? {
            for child in self.client.get_children(&group.path).await? {
                jobs.push(JobDocument::from_child(&child.path, &child.data)?);
            }
        }
        Ok(jobs)
    }

    /// Create or replace the job at `(group, name)`. Never fails `NotFound`.
    ///
    /// The version bump lands in the caller's record before the write:
    /// if the write then fails, the in-memory record is one ahead of
    /// storage and must not be reused for a retry without re-reading.
    pub async fn save_job(
        &self,
        group: &str,
        name: &str,
        data: &mut JobData,
    ) -> Result<(), RegistryError> {
        data.increment_version();
        let path = self.paths.job(group, name);
        let bytes = data.to_bytes()?;
        debug!(%path, version = data.version, "saving job");
        if self.client.check_exists(&path).await? {
            self.client.set_data(&path, &bytes).await?;
        } else {
            self.client.create(&path, &bytes).await?;
        }
        Ok(())
    }

    /// Replace an existing job. Fails `NotFound` when it does not exist;
    /// same bump-before-write caveat as [`save_job`].
    ///
    /// [`save_job`]: JobRegistry::save_job
    pub async fn update_job(
        &self,
        group: &str,
        name: &str,
        data: &mut JobData,
    ) -> Result<(), RegistryError> {
        data.increment_version();
        let path = self.paths.job(group, name);
        let bytes = data.to_bytes()?;
        debug!(%path, version = data.version, "updating job");
        self.client.set_data(&path, &bytes).await?;
        Ok(())
    }

    /// The job at `(group, name)`, or `None` when absent. Absence is an
    /// answer here, not an error.
    pub async fn get_job(
        &self,
        group: &str,
        name: &str,
    ) -> Result<Option<JobDocument>, RegistryError> {
        self.get_job_by_path(&self.paths.job(group, name)).await
    }

    /// The job at an already-derived path, or `None` when absent.
    pub async fn get_job_by_path(
        &self,
        path: &str,
    ) -> Result<Option<JobDocument>, RegistryError> {
        match self.client.get_data(path).await {
            Ok(child) => Ok(Some(JobDocument::from_child(&child.path, &child.data)?)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
