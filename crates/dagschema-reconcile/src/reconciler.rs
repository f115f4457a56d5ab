//! Schedule reconciliation.
//!
//! Matches the addresses and worker names of a parsed schedule against a
//! registry, and in apply mode creates whatever is missing and links every
//! scheduled worker to the project at their address.
//!
//! Apply runs in three strictly ordered phases: projects, workers, links.
//! A failure in any phase aborts the call, leaving everything created by
//! the earlier phases in place. Re-running apply is safe because matching
//! reuses those entities and linking is an upsert.

use chrono::{Days, NaiveDate};
use dagschema_models::{
    AutoImportResult, ImportPreview, NewPhase, NewProject, NewWorker, ParsedSchedule, ProjectId,
    ProjectStatus, WorkerId, WorkerRole,
};
use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use crate::error::{ReconcileError, Result};
use crate::normalize::{match_key, unique_names};
use crate::registry::{EntityLookup, EntityMatch, EntityRegistry};

/// Budget given to projects created from a schedule.
pub const DEFAULT_PROJECT_BUDGET: f64 = 10_000.0;

/// Length of projects created from a schedule, in days.
pub const DEFAULT_PROJECT_DURATION_DAYS: u64 = 30;

/// Name of the phase every created project starts with.
pub const DEFAULT_PHASE_NAME: &str = "General";

/// Values used when creating projects from a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDefaults {
    pub budget: f64,
    pub duration_days: u64,
    pub phase_name: String,
}

impl Default for ImportDefaults {
    fn default() -> Self {
        Self {
            budget: DEFAULT_PROJECT_BUDGET,
            duration_days: DEFAULT_PROJECT_DURATION_DAYS,
            phase_name: DEFAULT_PHASE_NAME.to_string(),
        }
    }
}

/// Reconciles parsed schedules against a registry.
#[derive(Debug, Clone, Default)]
pub struct ScheduleReconciler {
    defaults: ImportDefaults,
}

impl ScheduleReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: ImportDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ImportDefaults {
        &self.defaults
    }

    /// Lists the addresses and worker names that do not exist yet.
    ///
    /// Read-only; nothing is created.
    pub async fn preview<L>(&self, schedule: &ParsedSchedule, lookup: &L) -> Result<ImportPreview>
    where
        L: EntityLookup + ?Sized,
    {
        let addresses = schedule_addresses(schedule);
        let workers = schedule_workers(schedule);

        let known_projects = existing_projects(lookup, &addresses).await?;
        let known_workers = existing_workers(lookup, &workers).await?;

        let preview = ImportPreview {
            new_projects: addresses
                .into_iter()
                .filter(|a| !known_projects.contains_key(&match_key(a)))
                .collect(),
            new_workers: workers
                .into_iter()
                .filter(|w| !known_workers.contains_key(&match_key(w)))
                .collect(),
        };

        debug!(
            new_projects = preview.new_projects.len(),
            new_workers = preview.new_workers.len(),
            "Previewed schedule import"
        );

        Ok(preview)
    }

    /// Creates missing projects and workers, then links workers to projects.
    pub async fn apply<R>(&self, schedule: &ParsedSchedule, registry: &R) -> Result<AutoImportResult>
    where
        R: EntityRegistry + ?Sized,
    {
        let mut result = AutoImportResult::default();

        // Projects
        let addresses = schedule_addresses(schedule);
        let known_projects = existing_projects(registry, &addresses).await?;
        let mut project_ids: HashMap<String, ProjectId> = HashMap::new();

        for address in addresses {
            let key = match_key(&address);
            let id = match known_projects.get(&key) {
                Some(id) => {
                    debug!(address = %address, project_id = %id, "Reusing existing project");
                    ProjectId::from_string(id.clone())
                }
                None => {
                    let id = self.create_project(registry, &address, schedule.work_date).await?;
                    result.created_projects += 1;
                    id
                }
            };
            project_ids.insert(key, id.clone());
            result.project_mapping.insert(address, id);
        }

        // Workers
        let workers = schedule_workers(schedule);
        let known_workers = existing_workers(registry, &workers).await?;
        let mut worker_ids: HashMap<String, WorkerId> = HashMap::new();

        for name in workers {
            let key = match_key(&name);
            let id = match known_workers.get(&key) {
                Some(id) => {
                    debug!(worker = %name, worker_id = %id, "Reusing existing worker");
                    WorkerId::from_string(id.clone())
                }
                None => {
                    let id = registry
                        .create_worker_placeholder(NewWorker::placeholder(name.clone()))
                        .await
                        .map_err(ReconcileError::creation("worker", name.clone()))?;
                    info!(worker = %name, worker_id = %id, "Created placeholder worker");
                    result.created_workers += 1;
                    id
                }
            };
            worker_ids.insert(key, id.clone());
            result.worker_mapping.insert(name, id);
        }

        // Links
        let links = plan_links(schedule, &project_ids, &worker_ids);
        let inserted = try_join_all(links.iter().map(|(worker_id, project_id, role)| async move {
            registry
                .link_worker_to_project(worker_id, project_id, *role)
                .await
                .map_err(ReconcileError::creation(
                    "link",
                    format!("{} -> {}", worker_id, project_id),
                ))
        }))
        .await?;
        result.created_links = inserted.into_iter().filter(|created| *created).count();

        info!(
            work_date = %schedule.work_date,
            created_projects = result.created_projects,
            created_workers = result.created_workers,
            created_links = result.created_links,
            linked_pairs = links.len(),
            "Applied schedule import"
        );

        Ok(result)
    }

    async fn create_project<R>(
        &self,
        registry: &R,
        address: &str,
        work_date: NaiveDate,
    ) -> Result<ProjectId>
    where
        R: EntityRegistry + ?Sized,
    {
        let end_date = work_date
            .checked_add_days(Days::new(self.defaults.duration_days))
            .unwrap_or(NaiveDate::MAX);

        let project = NewProject {
            name: address.to_string(),
            description: format!(
                "Automatically imported from the daily schedule of {}",
                work_date
            ),
            status: ProjectStatus::Planning,
            start_date: work_date,
            end_date,
            budget: self.defaults.budget,
        };
        let id = registry
            .create_project(project)
            .await
            .map_err(ReconcileError::creation("project", address))?;

        let phase = NewPhase {
            name: self.defaults.phase_name.clone(),
            start_date: work_date,
            end_date,
            budget: self.defaults.budget,
        };
        registry
            .create_default_phase(&id, phase)
            .await
            .map_err(ReconcileError::creation("phase", self.defaults.phase_name.as_str()))?;

        info!(address = %address, project_id = %id, "Created project from schedule");
        Ok(id)
    }
}

/// Previews with the default settings.
pub async fn preview<L>(schedule: &ParsedSchedule, lookup: &L) -> Result<ImportPreview>
where
    L: EntityLookup + ?Sized,
{
    ScheduleReconciler::new().preview(schedule, lookup).await
}

/// Applies with the default settings.
pub async fn apply<R>(schedule: &ParsedSchedule, registry: &R) -> Result<AutoImportResult>
where
    R: EntityRegistry + ?Sized,
{
    ScheduleReconciler::new().apply(schedule, registry).await
}

fn schedule_addresses(schedule: &ParsedSchedule) -> Vec<String> {
    unique_names(schedule.items.iter().map(|item| item.address.as_str()))
}

fn schedule_workers(schedule: &ParsedSchedule) -> Vec<String> {
    unique_names(schedule.all_worker_names())
}

/// Indexes lookup results by match key. The first match for a key wins.
fn index_matches(matches: Vec<EntityMatch>) -> HashMap<String, String> {
    let mut index = HashMap::new();
    for m in matches {
        index.entry(match_key(&m.name)).or_insert(m.id);
    }
    index
}

async fn existing_projects<L>(lookup: &L, names: &[String]) -> Result<HashMap<String, String>>
where
    L: EntityLookup + ?Sized,
{
    if names.is_empty() {
        return Ok(HashMap::new());
    }
    let matches = lookup
        .find_projects_by_name(names)
        .await
        .map_err(ReconcileError::lookup("projects"))?;
    Ok(index_matches(matches))
}

async fn existing_workers<L>(lookup: &L, names: &[String]) -> Result<HashMap<String, String>>
where
    L: EntityLookup + ?Sized,
{
    if names.is_empty() {
        return Ok(HashMap::new());
    }
    let matches = lookup
        .find_workers_by_name(names)
        .await
        .map_err(ReconcileError::lookup("workers"))?;
    Ok(index_matches(matches))
}

/// One link per distinct (worker, project) pair; the first role seen wins.
fn plan_links(
    schedule: &ParsedSchedule,
    project_ids: &HashMap<String, ProjectId>,
    worker_ids: &HashMap<String, WorkerId>,
) -> Vec<(WorkerId, ProjectId, WorkerRole)> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for item in &schedule.items {
        let Some(project_id) = project_ids.get(&match_key(&item.address)) else {
            continue;
        };
        for worker in &item.workers {
            let Some(worker_id) = worker_ids.get(&match_key(&worker.name)) else {
                continue;
            };
            if !seen.insert((worker_id.clone(), project_id.clone())) {
                continue;
            }
            let role = if worker.is_assistant {
                WorkerRole::Assistant
            } else {
                WorkerRole::Worker
            };
            links.push((worker_id.clone(), project_id.clone(), role));
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RegistryError, RegistryResult};
    use crate::memory::InMemoryRegistry;
    use crate::state::RegistryState;
    use async_trait::async_trait;
    use dagschema_models::PhaseId;
    use dagschema_parser::parse_with_today;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SCHEDULE: &str = "\
Dagschema maandag
Hoofdstraat 123 Amsterdam 08:00-16:00:
- Jan de Vries
- Jane Smith [assist]
Materiaaldepot Almere 07:30-15:30:
- jan  de vries
- Kees Bakker
Hoofdstraat 123 amsterdam 16:00-18:00:
- Kees Bakker
Afwezig: Peter van der Laan
";

    fn schedule() -> ParsedSchedule {
        parse_with_today(SCHEDULE, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap())
    }

    /// Wraps the in-memory registry, failing chosen operations and counting links.
    #[derive(Default)]
    struct FlakyRegistry {
        inner: InMemoryRegistry,
        fail_lookup: bool,
        fail_project_creation: bool,
        fail_phase_creation: bool,
        fail_worker_creation: bool,
        fail_link: bool,
        link_calls: AtomicUsize,
    }

    #[async_trait]
    impl EntityLookup for FlakyRegistry {
        async fn find_projects_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>> {
            if self.fail_lookup {
                return Err(RegistryError::Unavailable("connection refused".to_string()));
            }
            self.inner.find_projects_by_name(names).await
        }

        async fn find_workers_by_name(&self, names: &[String]) -> RegistryResult<Vec<EntityMatch>> {
            self.inner.find_workers_by_name(names).await
        }
    }

    #[async_trait]
    impl EntityRegistry for FlakyRegistry {
        async fn create_project(&self, project: NewProject) -> RegistryResult<ProjectId> {
            if self.fail_project_creation {
                return Err(RegistryError::Unavailable("database offline".to_string()));
            }
            self.inner.create_project(project).await
        }

        async fn create_default_phase(
            &self,
            project_id: &ProjectId,
            phase: NewPhase,
        ) -> RegistryResult<PhaseId> {
            if self.fail_phase_creation {
                return Err(RegistryError::Rejected("phase budget exceeds project".to_string()));
            }
            self.inner.create_default_phase(project_id, phase).await
        }

        async fn create_worker_placeholder(&self, worker: NewWorker) -> RegistryResult<WorkerId> {
            if self.fail_worker_creation {
                return Err(RegistryError::Rejected("quota exceeded".to_string()));
            }
            self.inner.create_worker_placeholder(worker).await
        }

        async fn link_worker_to_project(
            &self,
            worker_id: &WorkerId,
            project_id: &ProjectId,
            role: WorkerRole,
        ) -> RegistryResult<bool> {
            self.link_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_link {
                return Err(RegistryError::Unavailable("link table locked".to_string()));
            }
            self.inner
                .link_worker_to_project(worker_id, project_id, role)
                .await
        }
    }

    #[tokio::test]
    async fn test_preview_on_empty_registry() {
        let registry = InMemoryRegistry::new();
        let preview = preview(&schedule(), &registry).await.unwrap();

        assert_eq!(
            preview.new_projects,
            vec!["Hoofdstraat 123 Amsterdam", "Materiaaldepot Almere"]
        );
        assert_eq!(
            preview.new_workers,
            vec!["Jan de Vries", "Jane Smith", "Kees Bakker", "Peter van der Laan"]
        );
        assert!(registry.snapshot().await.projects.is_empty());
    }

    #[tokio::test]
    async fn test_preview_subtracts_existing() {
        let registry = InMemoryRegistry::new();
        registry
            .create_worker_placeholder(NewWorker::placeholder("KEES BAKKER"))
            .await
            .unwrap();

        let preview = preview(&schedule(), &registry).await.unwrap();
        assert!(!preview.new_workers.contains(&"Kees Bakker".to_string()));
        assert_eq!(preview.new_workers.len(), 3);
    }

    #[tokio::test]
    async fn test_apply_creates_entities_and_links() {
        let registry = InMemoryRegistry::new();
        let result = apply(&schedule(), &registry).await.unwrap();

        assert_eq!(result.created_projects, 2);
        assert_eq!(result.created_workers, 4);
        assert_eq!(result.project_mapping.len(), 2);
        assert_eq!(result.worker_mapping.len(), 4);

        let state = registry.snapshot().await;
        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.phases.len(), 2);
        assert!(state.phases.iter().all(|p| p.name == DEFAULT_PHASE_NAME));
        assert!(state.workers.iter().all(|w| w.is_placeholder));
        assert!(state.workers.iter().all(|w| w.role == WorkerRole::Worker));

        // Hoofdstraat: Jan, Jane, Kees (second block). Depot: Jan, Kees.
        assert_eq!(state.links.len(), 5);
        assert_eq!(result.created_links, 5);

        let jane = &result.worker_mapping["Jane Smith"];
        let jane_link = state.links.iter().find(|l| &l.worker_id == jane).unwrap();
        assert_eq!(jane_link.role, WorkerRole::Assistant);
    }

    #[tokio::test]
    async fn test_apply_project_defaults() {
        let registry = InMemoryRegistry::new();
        let schedule = schedule();
        apply(&schedule, &registry).await.unwrap();

        let state = registry.snapshot().await;
        let project = &state.projects[0];
        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(project.start_date, schedule.work_date);
        assert_eq!(project.end_date, NaiveDate::from_ymd_opt(2026, 11, 25).unwrap());
        assert_eq!(project.budget, DEFAULT_PROJECT_BUDGET);
        assert!(project.description.contains("2026-10-26"));
    }

    #[tokio::test]
    async fn test_apply_with_custom_defaults() {
        let registry = InMemoryRegistry::new();
        let reconciler = ScheduleReconciler::with_defaults(ImportDefaults {
            budget: 2_500.0,
            duration_days: 7,
            phase_name: "Opstart".to_string(),
        });
        assert_eq!(reconciler.defaults().phase_name, "Opstart");
        assert_eq!(ScheduleReconciler::new().defaults(), &ImportDefaults::default());
        reconciler.apply(&schedule(), &registry).await.unwrap();

        let state = registry.snapshot().await;
        assert!(state.projects.iter().all(|p| p.budget == 2_500.0));
        assert!(state
            .projects
            .iter()
            .all(|p| p.end_date == NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()));
        assert!(state.phases.iter().all(|p| p.name == "Opstart"));
    }

    #[tokio::test]
    async fn test_apply_full_match_creates_nothing() {
        let registry = FlakyRegistry::default();
        for name in ["hoofdstraat 123 amsterdam", "MATERIAALDEPOT ALMERE"] {
            let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
            registry
                .create_project(NewProject {
                    name: name.to_string(),
                    description: String::new(),
                    status: ProjectStatus::Active,
                    start_date: day,
                    end_date: day,
                    budget: 0.0,
                })
                .await
                .unwrap();
        }
        for name in ["Jan de Vries", "jane smith", "Kees Bakker", "Peter van der Laan"] {
            registry
                .create_worker_placeholder(NewWorker::placeholder(name))
                .await
                .unwrap();
        }

        let result = apply(&schedule(), &registry).await.unwrap();
        assert!(result.created_nothing());
        assert_eq!(result.created_links, 5);
        assert_eq!(result.project_mapping.len(), 2);
        assert_eq!(result.worker_mapping.len(), 4);
        assert_eq!(registry.link_calls.load(Ordering::SeqCst), 5);

        let state = registry.inner.snapshot().await;
        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.workers.len(), 4);
        assert!(state.phases.is_empty());
        assert_eq!(state.links.len(), 5);
    }

    #[tokio::test]
    async fn test_reapply_is_safe() {
        let registry = InMemoryRegistry::new();
        let first = apply(&schedule(), &registry).await.unwrap();
        let second = apply(&schedule(), &registry).await.unwrap();

        assert!(second.created_nothing());
        assert_eq!(first.created_links, 5);
        assert_eq!(second.created_links, 0);
        assert_eq!(first.project_mapping, second.project_mapping);
        assert_eq!(first.worker_mapping, second.worker_mapping);

        let state = registry.snapshot().await;
        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.workers.len(), 4);
        assert_eq!(state.links.len(), 5);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_surfaced() {
        let registry = FlakyRegistry {
            fail_lookup: true,
            ..Default::default()
        };

        let err = preview(&schedule(), &registry).await.unwrap_err();
        assert!(matches!(err, ReconcileError::LookupFailure { entity: "projects", .. }));

        let err = apply(&schedule(), &registry).await.unwrap_err();
        assert!(matches!(err, ReconcileError::LookupFailure { .. }));
        assert!(registry.inner.snapshot().await.projects.is_empty());
    }

    #[tokio::test]
    async fn test_creation_failure_aborts_after_projects() {
        let registry = FlakyRegistry {
            fail_worker_creation: true,
            ..Default::default()
        };

        let err = apply(&schedule(), &registry).await.unwrap_err();
        match err {
            ReconcileError::CreationFailure { entity, name, .. } => {
                assert_eq!(entity, "worker");
                assert_eq!(name, "Jan de Vries");
            }
            other => panic!("Expected creation failure, got {:?}", other),
        }

        // Projects were created first; no links were attempted.
        let state = registry.inner.snapshot().await;
        assert_eq!(state.projects.len(), 2);
        assert!(state.workers.is_empty());
        assert_eq!(registry.link_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_project_creation_failure_aborts_before_anything_is_stored() {
        let registry = FlakyRegistry {
            fail_project_creation: true,
            ..Default::default()
        };

        let err = apply(&schedule(), &registry).await.unwrap_err();
        match err {
            ReconcileError::CreationFailure { entity, name, .. } => {
                assert_eq!(entity, "project");
                assert_eq!(name, "Hoofdstraat 123 Amsterdam");
            }
            other => panic!("Expected creation failure, got {:?}", other),
        }

        let state = registry.inner.snapshot().await;
        assert!(state.projects.is_empty());
        assert!(state.workers.is_empty());
        assert_eq!(registry.link_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_phase_creation_failure_leaves_project_without_phase() {
        let registry = FlakyRegistry {
            fail_phase_creation: true,
            ..Default::default()
        };

        let err = apply(&schedule(), &registry).await.unwrap_err();
        match err {
            ReconcileError::CreationFailure { entity, name, .. } => {
                assert_eq!(entity, "phase");
                assert_eq!(name, DEFAULT_PHASE_NAME);
            }
            other => panic!("Expected creation failure, got {:?}", other),
        }

        let state = registry.inner.snapshot().await;
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.projects[0].name, "Hoofdstraat 123 Amsterdam");
        assert!(state.phases.is_empty());
        assert!(state.workers.is_empty());
        assert_eq!(registry.link_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_link_failure_is_surfaced_after_workers() {
        let registry = FlakyRegistry {
            fail_link: true,
            ..Default::default()
        };

        let err = apply(&schedule(), &registry).await.unwrap_err();
        match err {
            ReconcileError::CreationFailure { entity, name, .. } => {
                assert_eq!(entity, "link");
                assert!(name.contains(" -> "));
            }
            other => panic!("Expected creation failure, got {:?}", other),
        }

        let state = registry.inner.snapshot().await;
        assert_eq!(state.projects.len(), 2);
        assert_eq!(state.phases.len(), 2);
        assert_eq!(state.workers.len(), 4);
        assert!(state.links.is_empty());
        assert!(registry.link_calls.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn test_preview_against_prefilled_registry() {
        let mut state = RegistryState::default();
        state.insert_worker(NewWorker::placeholder("Jane  Smith"));
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        state.insert_project(NewProject {
            name: "Materiaaldepot Almere".to_string(),
            description: String::new(),
            status: ProjectStatus::Active,
            start_date: day,
            end_date: day,
            budget: 0.0,
        });
        let registry = InMemoryRegistry::with_state(state);

        let preview = preview(&schedule(), &registry).await.unwrap();
        assert_eq!(preview.new_projects, vec!["Hoofdstraat 123 Amsterdam"]);
        assert_eq!(
            preview.new_workers,
            vec!["Jan de Vries", "Kees Bakker", "Peter van der Laan"]
        );
    }

    #[tokio::test]
    async fn test_empty_schedule_touches_nothing() {
        let registry = FlakyRegistry {
            fail_lookup: true,
            ..Default::default()
        };
        let empty = parse_with_today("", NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());

        let result = apply(&empty, &registry).await.unwrap();
        assert_eq!(result, AutoImportResult::default());
    }

    #[test]
    fn test_plan_links_dedupes_pairs() {
        let schedule = schedule();
        let mut project_ids = HashMap::new();
        project_ids.insert(match_key("Hoofdstraat 123 Amsterdam"), ProjectId::from_string("p1"));
        project_ids.insert(match_key("Materiaaldepot Almere"), ProjectId::from_string("p2"));
        let mut worker_ids = HashMap::new();
        worker_ids.insert(match_key("Jan de Vries"), WorkerId::from_string("w1"));
        worker_ids.insert(match_key("Jane Smith"), WorkerId::from_string("w2"));
        worker_ids.insert(match_key("Kees Bakker"), WorkerId::from_string("w3"));

        let links = plan_links(&schedule, &project_ids, &worker_ids);
        assert_eq!(links.len(), 5);
        assert_eq!(
            links[1],
            (
                WorkerId::from_string("w2"),
                ProjectId::from_string("p1"),
                WorkerRole::Assistant
            )
        );
    }
}
