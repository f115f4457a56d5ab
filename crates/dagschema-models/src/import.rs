//! Results of reconciling a schedule against a registry.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::{ProjectId, WorkerId};

/// Names a schedule would introduce, computed without writing anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    /// Addresses with no matching project.
    pub new_projects: Vec<String>,
    /// Worker names with no matching worker.
    pub new_workers: Vec<String>,
}

impl ImportPreview {
    /// Returns true if applying the schedule would create nothing.
    pub fn is_empty(&self) -> bool {
        self.new_projects.is_empty() && self.new_workers.is_empty()
    }
}

/// Outcome of applying a schedule to a registry.
///
/// The mappings cover every address and worker in the schedule, whether the
/// entity already existed or was created by this import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoImportResult {
    pub created_projects: usize,
    pub created_workers: usize,
    /// Worker/project links newly stored; pairs that were already linked
    /// are not counted.
    pub created_links: usize,
    /// Normalized address -> project.
    pub project_mapping: BTreeMap<String, ProjectId>,
    /// Normalized worker name -> worker.
    pub worker_mapping: BTreeMap<String, WorkerId>,
}

impl AutoImportResult {
    /// Returns true if the import created no new entities.
    pub fn created_nothing(&self) -> bool {
        self.created_projects == 0 && self.created_workers == 0
    }
}
