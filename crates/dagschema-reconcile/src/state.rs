//! Registry contents shared by the in-memory and file-backed registries.

use dagschema_models::{
    NewPhase, NewProject, NewWorker, PhaseId, PhaseRecord, ProjectId, ProjectLink, ProjectRecord,
    WorkerId, WorkerRecord, WorkerRole,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{RegistryError, RegistryResult};
use crate::normalize::match_key;
use crate::registry::EntityMatch;

/// Everything a registry stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryState {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub phases: Vec<PhaseRecord>,
    #[serde(default)]
    pub workers: Vec<WorkerRecord>,
    #[serde(default)]
    pub links: Vec<ProjectLink>,
}

fn matches_any<'a>(
    records: impl Iterator<Item = (&'a str, &'a str)>,
    names: &[String],
) -> Vec<EntityMatch> {
    let wanted: HashSet<String> = names.iter().map(|n| match_key(n)).collect();
    records
        .filter(|(_, name)| wanted.contains(&match_key(name)))
        .map(|(id, name)| EntityMatch::new(id, name))
        .collect()
}

impl RegistryState {
    /// Projects whose name matches one of `names`, case-insensitively.
    pub fn find_projects(&self, names: &[String]) -> Vec<EntityMatch> {
        matches_any(
            self.projects.iter().map(|p| (p.id.as_str(), p.name.as_str())),
            names,
        )
    }

    /// Workers whose name matches one of `names`, case-insensitively.
    pub fn find_workers(&self, names: &[String]) -> Vec<EntityMatch> {
        matches_any(
            self.workers
                .iter()
                .map(|w| (w.id.as_str(), w.full_name.as_str())),
            names,
        )
    }

    pub fn insert_project(&mut self, project: NewProject) -> ProjectId {
        let record = ProjectRecord::from_new(project);
        let id = record.id.clone();
        self.projects.push(record);
        id
    }

    /// Adds a phase; the project must exist.
    pub fn insert_phase(&mut self, project_id: &ProjectId, phase: NewPhase) -> RegistryResult<PhaseId> {
        if !self.has_project(project_id) {
            return Err(RegistryError::Rejected(format!(
                "phase references unknown project {}",
                project_id
            )));
        }
        let record = PhaseRecord::from_new(project_id.clone(), phase);
        let id = record.id.clone();
        self.phases.push(record);
        Ok(id)
    }

    pub fn insert_worker(&mut self, worker: NewWorker) -> WorkerId {
        let record = WorkerRecord::from_new(worker);
        let id = record.id.clone();
        self.workers.push(record);
        id
    }

    /// Links a worker to a project unless the pair is already linked.
    ///
    /// Returns `true` if a new link was stored. Both ends must exist.
    pub fn upsert_link(
        &mut self,
        worker_id: &WorkerId,
        project_id: &ProjectId,
        role: WorkerRole,
    ) -> RegistryResult<bool> {
        if !self.has_project(project_id) {
            return Err(RegistryError::Rejected(format!(
                "link references unknown project {}",
                project_id
            )));
        }
        if !self.workers.iter().any(|w| &w.id == worker_id) {
            return Err(RegistryError::Rejected(format!(
                "link references unknown worker {}",
                worker_id
            )));
        }
        if self.links.iter().any(|l| l.joins(worker_id, project_id)) {
            return Ok(false);
        }
        self.links.push(ProjectLink {
            worker_id: worker_id.clone(),
            project_id: project_id.clone(),
            role,
        });
        Ok(true)
    }

    /// Phases belonging to a project.
    pub fn phases_of(&self, project_id: &ProjectId) -> Vec<&PhaseRecord> {
        self.phases
            .iter()
            .filter(|p| &p.project_id == project_id)
            .collect()
    }

    /// Links pointing at a project.
    pub fn links_of(&self, project_id: &ProjectId) -> Vec<&ProjectLink> {
        self.links
            .iter()
            .filter(|l| &l.project_id == project_id)
            .collect()
    }

    fn has_project(&self, project_id: &ProjectId) -> bool {
        self.projects.iter().any(|p| &p.id == project_id)
    }
}
