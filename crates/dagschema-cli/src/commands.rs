//! Command handlers for CLI subcommands.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use dagschema_models::ParsedSchedule;
use dagschema_persistence::JsonRegistry;
use dagschema_reconcile::{ImportDefaults, ScheduleReconciler};
use tracing::info;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config;
use crate::output;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command, returning what should be printed.
pub async fn execute(cli: &Cli) -> Result<String> {
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let state_dir = config::state_dir(cli.state_dir.as_deref());
    let registry_path = config::registry_file(cli.registry.as_deref(), &state_dir);

    match &cli.command {
        Commands::Parse { input, format } => cmd_parse(input, today, *format),
        Commands::Preview { input, format } => {
            cmd_preview(input, today, &registry_path, *format).await
        }
        Commands::Apply {
            input,
            format,
            budget,
            duration_days,
            phase_name,
        } => {
            let mut defaults = ImportDefaults::default();
            if let Some(budget) = budget {
                defaults.budget = *budget;
            }
            if let Some(days) = duration_days {
                defaults.duration_days = *days;
            }
            if let Some(name) = phase_name {
                defaults.phase_name = name.clone();
            }
            cmd_apply(input, today, &registry_path, defaults, *format).await
        }
        Commands::Registry { format } => cmd_registry(&registry_path, *format).await,
    }
}

/// Reads schedule text from a file, or from stdin when `input` is `-`.
fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    let path = PathBuf::from(input);
    std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read schedule {}: {}", path.display(), e).into())
}

fn load_schedule(input: &str, today: NaiveDate) -> Result<ParsedSchedule> {
    let text = read_input(input)?;
    let schedule = dagschema_parser::parse_with_today(&text, today);
    if schedule.items.is_empty() {
        tracing::warn!(input = %input, "No schedule blocks found in input");
    }
    Ok(schedule)
}

fn cmd_parse(input: &str, today: NaiveDate, format: OutputFormat) -> Result<String> {
    let schedule = load_schedule(input, today)?;
    Ok(output::render(&schedule, format, output::schedule_table)?)
}

async fn cmd_preview(
    input: &str,
    today: NaiveDate,
    registry_path: &Path,
    format: OutputFormat,
) -> Result<String> {
    let schedule = load_schedule(input, today)?;
    let registry = JsonRegistry::open(registry_path).await?;

    let preview = ScheduleReconciler::new()
        .preview(&schedule, &registry)
        .await?;

    Ok(output::render(&preview, format, output::preview_table)?)
}

async fn cmd_apply(
    input: &str,
    today: NaiveDate,
    registry_path: &Path,
    defaults: ImportDefaults,
    format: OutputFormat,
) -> Result<String> {
    let schedule = load_schedule(input, today)?;
    let registry = JsonRegistry::open(registry_path).await?;

    info!(
        registry = %registry_path.display(),
        work_date = %schedule.work_date,
        "Applying schedule"
    );

    let result = ScheduleReconciler::with_defaults(defaults)
        .apply(&schedule, &registry)
        .await?;

    Ok(output::render(&result, format, output::import_table)?)
}

async fn cmd_registry(registry_path: &Path, format: OutputFormat) -> Result<String> {
    let registry = JsonRegistry::open(registry_path).await?;
    let state = registry.snapshot().await;
    Ok(output::render(&state, format, output::registry_table)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    const SCHEDULE: &str = "\
Dagschema woensdag
Hoofdstraat 123 Amsterdam 08:00-16:00:
- Jan de Vries
- Jane Smith [assist]
Absent: Sarah Johnson
";

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("dagschema").chain(args.iter().copied()))
    }

    #[tokio::test]
    async fn test_parse_command_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("schema.txt");
        std::fs::write(&input, SCHEDULE).unwrap();
        let input = input.to_string_lossy().to_string();

        let out = execute(&cli(&["--today", "2026-10-21", "parse", &input, "-f", "json"]))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["workDate"], "2026-10-28");
        assert_eq!(value["items"][0]["workers"][1]["isAssistant"], true);
    }

    #[tokio::test]
    async fn test_preview_then_apply_then_registry() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("schema.txt");
        std::fs::write(&input, SCHEDULE).unwrap();
        let input = input.to_string_lossy().to_string();
        let state = dir.path().join("state").to_string_lossy().to_string();

        let preview = execute(&cli(&["-s", &state, "preview", &input])).await.unwrap();
        assert!(preview.contains("New locations (1):"));
        assert!(preview.contains("New workers (3):"));

        let applied = execute(&cli(&["-s", &state, "apply", &input, "--budget", "500"]))
            .await
            .unwrap();
        assert!(applied.starts_with("Created 1 projects, 3 workers; 2 links"));

        let reapplied = execute(&cli(&["-s", &state, "apply", &input])).await.unwrap();
        assert!(reapplied.starts_with("Created 0 projects, 0 workers; 0 links"));

        let preview = execute(&cli(&["-s", &state, "preview", &input])).await.unwrap();
        assert!(preview.starts_with("Nothing new"));

        let listing = execute(&cli(&["-s", &state, "registry", "-f", "json"]))
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&listing).unwrap();
        assert_eq!(value["projects"][0]["budget"], 500.0);
        assert_eq!(value["links"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.txt").to_string_lossy().to_string();
        let err = execute(&cli(&["parse", &missing])).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read schedule"));
    }
}
