//! Capability traits for the entity registry.
//!
//! The reconciler never talks to a database directly. It reads through
//! [`EntityLookup`] and writes through [`EntityRegistry`], so any backend
//! (the web application's database, a JSON file, an in-memory map) can
//! sit behind it.

use async_trait::async_trait;
use dagschema_models::{NewPhase, NewProject, NewWorker, PhaseId, ProjectId, WorkerId, WorkerRole};

use crate::error::RegistryResult;

/// An existing entity returned by a name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMatch {
    pub id: String,
    pub name: String,
}

impl EntityMatch {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read access to known projects and workers.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Returns stored projects whose name equals one of `names`.
    ///
    /// Comparison is case-insensitive on whitespace-normalized names.
    async fn find_projects_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>>;

    /// Returns stored workers whose name equals one of `names`.
    ///
    /// Comparison is case-insensitive on whitespace-normalized names.
    async fn find_workers_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>>;
}

/// Read and write access to projects, phases, workers and links.
#[async_trait]
pub trait EntityRegistry: EntityLookup {
    /// Creates a project.
    async fn create_project(&self, project: NewProject) -> RegistryResult<ProjectId>;

    /// Creates a phase under an existing project.
    async fn create_default_phase(
        &self,
        project_id: &ProjectId,
        phase: NewPhase,
    ) -> RegistryResult<PhaseId>;

    /// Creates a placeholder worker.
    async fn create_worker_placeholder(&self, worker: NewWorker) -> RegistryResult<WorkerId>;

    /// Links a worker to a project, returning true if a new link was stored.
    ///
    /// Must be an idempotent upsert: linking an already linked pair is a
    /// no-op returning false, never an error or a duplicate.
    async fn link_worker_to_project(
        &self,
        worker_id: &WorkerId,
        project_id: &ProjectId,
        role: WorkerRole,
    ) -> RegistryResult<bool>;
}
