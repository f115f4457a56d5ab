//! JSON-file entity registry.

use async_trait::async_trait;
use dagschema_models::{NewPhase, NewProject, NewWorker, PhaseId, ProjectId, WorkerId, WorkerRole};
use dagschema_reconcile::{
    EntityLookup, EntityMatch, EntityRegistry, RegistryError, RegistryResult, RegistryState,
};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::atomic::{atomic_write_json, read_json_or_default};
use crate::error::Result;

/// Registry persisted as a single JSON document.
///
/// ```text
/// registry.json
/// {
///   "projects": [...],
///   "phases":   [...],
///   "workers":  [...],
///   "links":    [...]
/// }
/// ```
///
/// The whole document is rewritten atomically after every change. A change
/// is applied to a copy first, so a failed write leaves both the file and
/// the in-memory view untouched. Writers are serialized by the state lock;
/// the file write itself runs on the blocking pool.
pub struct JsonRegistry {
    path: PathBuf,
    state: Mutex<RegistryState>,
}

impl JsonRegistry {
    /// Opens the registry at `path`. A missing file is an empty registry.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state: RegistryState = read_json_or_default(&path)?;
        info!(
            path = %path.display(),
            projects = state.projects.len(),
            workers = state.workers.len(),
            "Loaded registry"
        );
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a copy of the current contents.
    pub async fn snapshot(&self) -> RegistryState {
        self.state.lock().await.clone()
    }

    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut RegistryState) -> RegistryResult<T>,
    ) -> RegistryResult<T> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let value = change(&mut next)?;

        let path = self.path.clone();
        let next = tokio::task::spawn_blocking(move || {
            atomic_write_json(&path, &next).map(|()| next)
        })
        .await
        .map_err(|e| RegistryError::Backend(Box::new(e)))??;
        *state = next;
        debug!(path = %self.path.display(), "Saved registry");
        Ok(value)
    }
}

#[async_trait]
impl EntityLookup for JsonRegistry {
    async fn find_projects_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>> {
        Ok(self.state.lock().await.find_projects(names))
    }

    async fn find_workers_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>> {
        Ok(self.state.lock().await.find_workers(names))
    }
}

#[async_trait]
impl EntityRegistry for JsonRegistry {
    async fn create_project(&self, project: NewProject) -> RegistryResult<ProjectId> {
        self.mutate(|state| Ok(state.insert_project(project))).await
    }

    async fn create_default_phase(
        &self,
        project_id: &ProjectId,
        phase: NewPhase,
    ) -> RegistryResult<PhaseId> {
        self.mutate(|state| state.insert_phase(project_id, phase))
            .await
    }

    async fn create_worker_placeholder(&self, worker: NewWorker) -> RegistryResult<WorkerId> {
        self.mutate(|state| Ok(state.insert_worker(worker))).await
    }

    async fn link_worker_to_project(
        &self,
        worker_id: &WorkerId,
        project_id: &ProjectId,
        role: WorkerRole,
    ) -> RegistryResult<bool> {
        {
            let state = self.state.lock().await;
            if state.links.iter().any(|l| l.joins(worker_id, project_id)) {
                return Ok(false);
            }
        }
        self.mutate(|state| state.upsert_link(worker_id, project_id, role))
            .await
    }
}
