//! In-memory registry.
//!
//! Keeps everything in a [`RegistryState`] behind a tokio `RwLock`. Used by
//! tests and by callers that only need a throwaway registry.

use async_trait::async_trait;
use dagschema_models::{NewPhase, NewProject, NewWorker, PhaseId, ProjectId, WorkerId, WorkerRole};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::RegistryResult;
use crate::registry::{EntityLookup, EntityMatch, EntityRegistry};
use crate::state::RegistryState;

/// Registry that lives only as long as the value.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-filled with the given state.
    pub fn with_state(state: RegistryState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Returns a copy of the current contents.
    pub async fn snapshot(&self) -> RegistryState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl EntityLookup for InMemoryRegistry {
    async fn find_projects_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>> {
        Ok(self.state.read().await.find_projects(names))
    }

    async fn find_workers_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>> {
        Ok(self.state.read().await.find_workers(names))
    }
}

#[async_trait]
impl EntityRegistry for InMemoryRegistry {
    async fn create_project(&self, project: NewProject) -> RegistryResult<ProjectId> {
        let id = self.state.write().await.insert_project(project);
        debug!(project_id = %id, "Stored project in memory");
        Ok(id)
    }

    async fn create_default_phase(
        &self,
        project_id: &ProjectId,
        phase: NewPhase,
    ) -> RegistryResult<PhaseId> {
        self.state.write().await.insert_phase(project_id, phase)
    }

    async fn create_worker_placeholder(&self, worker: NewWorker) -> RegistryResult<WorkerId> {
        let id = self.state.write().await.insert_worker(worker);
        debug!(worker_id = %id, "Stored worker in memory");
        Ok(id)
    }

    async fn link_worker_to_project(
        &self,
        worker_id: &WorkerId,
        project_id: &ProjectId,
        role: WorkerRole,
    ) -> RegistryResult<bool> {
        self.state
            .write()
            .await
            .upsert_link(worker_id, project_id, role)
    }
}
