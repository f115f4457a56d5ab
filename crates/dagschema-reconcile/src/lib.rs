//! Reconciles parsed daily schedules against project and worker registries.
//!
//! A parsed schedule names locations and people. This crate decides which
//! of them already exist in a registry and, when asked, creates the rest:
//!
//! - **preview**: lists new addresses and worker names without writing
//! - **apply**: creates missing projects (with a default phase) and
//!   placeholder workers, then links every scheduled worker to the project
//!   at their address
//!
//! Registries are reached only through the [`EntityLookup`] and
//! [`EntityRegistry`] traits. [`InMemoryRegistry`] is provided for tests
//! and short-lived use.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dagschema_reconcile::{InMemoryRegistry, ScheduleReconciler};
//!
//! # async fn example() -> dagschema_reconcile::Result<()> {
//! # let today = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();
//! # let schedule = dagschema_models::ParsedSchedule::empty(today);
//! let registry = InMemoryRegistry::new();
//! let reconciler = ScheduleReconciler::new();
//!
//! let preview = reconciler.preview(&schedule, &registry).await?;
//! println!("{} new locations", preview.new_projects.len());
//!
//! let result = reconciler.apply(&schedule, &registry).await?;
//! println!("created {} workers", result.created_workers);
//! # Ok(())
//! # }
//! ```
//!
//! # Matching
//!
//! Names are compared case-insensitively after collapsing whitespace.
//! There is no fuzzy matching: `Hoofdstraat 123` and `hoofdstraat 123 `
//! are the same location, `Hoofdstraat 123 Amsterdam` is another one.

pub mod error;
pub mod memory;
pub mod normalize;
pub mod reconciler;
pub mod registry;
pub mod state;

pub use error::{ReconcileError, RegistryError, RegistryResult, Result};
pub use memory::InMemoryRegistry;
pub use normalize::{match_key, normalize_name, unique_names};
pub use reconciler::{
    apply, preview, ImportDefaults, ScheduleReconciler, DEFAULT_PHASE_NAME,
    DEFAULT_PROJECT_BUDGET, DEFAULT_PROJECT_DURATION_DAYS,
};
pub use registry::{EntityLookup, EntityMatch, EntityRegistry};
pub use state::RegistryState;
