//! Human-readable and JSON rendering of command results.

use dagschema_models::{AutoImportResult, ImportPreview, ParsedSchedule};
use dagschema_reconcile::RegistryState;
use serde::Serialize;
use std::fmt::Write;

use crate::cli::OutputFormat;

/// Renders `value` as pretty JSON or with the given table renderer.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> String,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::Table => Ok(table(value)),
    }
}

pub fn schedule_table(schedule: &ParsedSchedule) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Work date: {}", schedule.work_date.format("%A %Y-%m-%d"));

    if schedule.items.is_empty() {
        let _ = writeln!(out, "\nNo schedule blocks found.");
    }
    for item in &schedule.items {
        let _ = writeln!(
            out,
            "\n{} - {}  {} [{}]",
            item.start_time, item.end_time, item.address, item.category
        );
        for worker in &item.workers {
            let marker = if worker.is_assistant { " (assistant)" } else { "" };
            let _ = writeln!(out, "  - {}{}", worker.name, marker);
        }
    }

    if !schedule.absences.is_empty() {
        let _ = writeln!(out, "\nAbsent:");
        for absence in &schedule.absences {
            let _ = writeln!(out, "  - {}", absence.worker_name);
        }
    }

    let _ = writeln!(
        out,
        "\n{} blocks, {} workers, {} absences",
        schedule.items.len(),
        schedule.worker_count(),
        schedule.absences.len()
    );
    out
}

pub fn preview_table(preview: &ImportPreview) -> String {
    if preview.is_empty() {
        return "Nothing new: all locations and workers already exist.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "New locations ({}):", preview.new_projects.len());
    for name in &preview.new_projects {
        let _ = writeln!(out, "  + {}", name);
    }
    let _ = writeln!(out, "New workers ({}):", preview.new_workers.len());
    for name in &preview.new_workers {
        let _ = writeln!(out, "  + {}", name);
    }
    out
}

pub fn import_table(result: &AutoImportResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Created {} projects, {} workers; {} links",
        result.created_projects, result.created_workers, result.created_links
    );
    let _ = writeln!(out, "\nLocations:");
    for (address, id) in &result.project_mapping {
        let _ = writeln!(out, "  {:<40} {}", address, id);
    }
    let _ = writeln!(out, "\nWorkers:");
    for (name, id) in &result.worker_mapping {
        let _ = writeln!(out, "  {:<40} {}", name, id);
    }
    out
}

pub fn registry_table(state: &RegistryState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Projects ({}):", state.projects.len());
    for project in &state.projects {
        let _ = writeln!(
            out,
            "  {:<40} {:?}  {} .. {}  phases: {}  workers: {}",
            project.name,
            project.status,
            project.start_date,
            project.end_date,
            state.phases_of(&project.id).len(),
            state.links_of(&project.id).len()
        );
    }

    let _ = writeln!(out, "\nWorkers ({}):", state.workers.len());
    for worker in &state.workers {
        let placeholder = if worker.is_placeholder { "  (placeholder)" } else { "" };
        let _ = writeln!(
            out,
            "  {:<40} {}{}",
            worker.full_name,
            worker.role.as_str(),
            placeholder
        );
    }
    out
}
