//! File-backed entity registry.
//!
//! This crate provides a crash-safe [`JsonRegistry`] implementing the
//! reconciler's registry traits, using atomic file operations (write to a
//! temp file, then rename).
//!
//! # Example
//!
//! ```no_run
//! use dagschema_persistence::JsonRegistry;
//! use dagschema_reconcile::ScheduleReconciler;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = JsonRegistry::open("/home/user/.dagschema/registry.json").await?;
//! let schedule = dagschema_parser::parse("Dagschema maandag\nKerkstraat 1 07:00-15:00\n- Jan");
//!
//! let result = ScheduleReconciler::new().apply(&schedule, &registry).await?;
//! println!("created {} projects", result.created_projects);
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod error;
pub mod json_registry;

pub use error::{PersistenceError, Result};
pub use json_registry::JsonRegistry;
