//! Registry entity types.
//!
//! These are the records a registry backend stores for projects, their
//! phases, workers and worker/project links, plus the creation requests
//! the reconciler sends to it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PhaseId, ProjectId, WorkerId};

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Project exists but work has not started.
    #[default]
    Planning,
    /// Work is ongoing.
    Active,
    /// Work is paused.
    OnHold,
    /// Work is finished.
    Completed,
    /// Project was abandoned.
    Cancelled,
}

/// Role of a worker, both on the account and on a project link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    /// Regular crew member.
    #[default]
    Worker,
    /// Assisting crew member.
    Assistant,
    /// Project manager.
    Manager,
    /// Administrator.
    Admin,
}

impl WorkerRole {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerRole::Worker => "worker",
            WorkerRole::Assistant => "assistant",
            WorkerRole::Manager => "manager",
            WorkerRole::Admin => "admin",
        }
    }
}

/// Request to create a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
}

/// Request to create a phase within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPhase {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
}

/// Request to create a placeholder worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorker {
    pub full_name: String,
    pub role: WorkerRole,
    /// Placeholders have no onboarded account behind them yet.
    pub is_placeholder: bool,
}

impl NewWorker {
    /// Creates a placeholder worker request with the default role.
    pub fn placeholder(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            role: WorkerRole::Worker,
            is_placeholder: true,
        }
    }
}

/// A stored project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub budget: f64,
    pub created_at: DateTime<Utc>,
}

impl ProjectRecord {
    /// Builds a record from a creation request, assigning a fresh ID.
    pub fn from_new(new: NewProject) -> Self {
        Self {
            id: ProjectId::new(),
            name: new.name,
            description: new.description,
            status: new.status,
            start_date: new.start_date,
            end_date: new.end_date,
            budget: new.budget,
            created_at: Utc::now(),
        }
    }
}

/// A stored project phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub id: PhaseId,
    pub project_id: ProjectId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub budget: f64,
}

impl PhaseRecord {
    /// Builds a record from a creation request, assigning a fresh ID.
    pub fn from_new(project_id: ProjectId, new: NewPhase) -> Self {
        Self {
            id: PhaseId::new(),
            project_id,
            name: new.name,
            start_date: new.start_date,
            end_date: new.end_date,
            budget: new.budget,
        }
    }
}

/// A stored worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRecord {
    pub id: WorkerId,
    pub full_name: String,
    #[serde(default)]
    pub role: WorkerRole,
    #[serde(default)]
    pub is_placeholder: bool,
    pub created_at: DateTime<Utc>,
}

impl WorkerRecord {
    /// Builds a record from a creation request, assigning a fresh ID.
    pub fn from_new(new: NewWorker) -> Self {
        Self {
            id: WorkerId::new(),
            full_name: new.full_name,
            role: new.role,
            is_placeholder: new.is_placeholder,
            created_at: Utc::now(),
        }
    }
}

/// Association of a worker with a project. Unique per (worker, project).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectLink {
    pub worker_id: WorkerId,
    pub project_id: ProjectId,
    pub role: WorkerRole,
}

impl ProjectLink {
    /// Returns true if this link joins the given worker and project.
    pub fn joins(&self, worker_id: &WorkerId, project_id: &ProjectId) -> bool {
        &self.worker_id == worker_id && &self.project_id == project_id
    }
}
