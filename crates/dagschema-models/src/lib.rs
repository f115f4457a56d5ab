//! Core data models for daily schedule import.
//!
//! This crate provides the value types shared by the parser, the
//! reconciler and the registry backends: the parsed schedule itself,
//! the entity records a registry stores, and the import result.

pub mod entity;
pub mod ids;
pub mod import;
pub mod schedule;

// Re-export main types
pub use entity::{
    NewPhase, NewProject, NewWorker, PhaseRecord, ProjectLink, ProjectRecord, ProjectStatus,
    WorkerRecord, WorkerRole,
};
pub use ids::{PhaseId, ProjectId, WorkerId};
pub use import::{AutoImportResult, ImportPreview};
pub use schedule::{
    Category, ParsedAbsence, ParsedSchedule, ParsedScheduleItem, ParsedWorker, UNKNOWN_ADDRESS,
};
