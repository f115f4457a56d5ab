//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Version string with git hash and build date, e.g. `0.1.0 (abc1234, 2026-10-19)`.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Dagschema - parse daily work schedules and import them into a registry
#[derive(Parser, Debug)]
#[command(name = "dagschema")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "DAGSCHEMA_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Path to the registry file (default: <state dir>/registry.json)
    #[arg(short, long, env = "DAGSCHEMA_REGISTRY", global = true)]
    pub registry: Option<PathBuf>,

    /// Reference date for resolving weekday names (YYYY-MM-DD, default: today)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a schedule and print the result
    Parse {
        /// Schedule file, or '-' for stdin
        #[arg(required = true)]
        input: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show which locations and workers a schedule would create
    Preview {
        /// Schedule file, or '-' for stdin
        #[arg(required = true)]
        input: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create missing locations and workers and link them
    Apply {
        /// Schedule file, or '-' for stdin
        #[arg(required = true)]
        input: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Budget for newly created projects
        #[arg(long)]
        budget: Option<f64>,

        /// Length of newly created projects in days
        #[arg(long)]
        duration_days: Option<u64>,

        /// Name of the default phase for newly created projects
        #[arg(long)]
        phase_name: Option<String>,
    },

    /// List the contents of the registry
    Registry {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse_command() {
        let cli = Cli::parse_from(["dagschema", "parse", "schema.txt"]);
        match cli.command {
            Commands::Parse { input, format } => {
                assert_eq!(input, "schema.txt");
                assert_eq!(format, OutputFormat::Table);
            }
            _ => panic!("Expected Parse command"),
        }
    }

    #[test]
    fn test_cli_apply_overrides() {
        let cli = Cli::parse_from([
            "dagschema",
            "apply",
            "-",
            "--format",
            "json",
            "--budget",
            "2500",
            "--phase-name",
            "Opstart",
        ]);
        match cli.command {
            Commands::Apply {
                input,
                format,
                budget,
                duration_days,
                phase_name,
            } => {
                assert_eq!(input, "-");
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(budget, Some(2500.0));
                assert_eq!(duration_days, None);
                assert_eq!(phase_name.as_deref(), Some("Opstart"));
            }
            _ => panic!("Expected Apply command"),
        }
    }

    #[test]
    fn test_cli_today_override() {
        let cli = Cli::parse_from(["dagschema", "--today", "2026-10-21", "preview", "-"]);
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2026, 10, 21));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["dagschema"]).is_err());
    }

    #[test]
    fn test_cli_verbose() {
        let cli = Cli::parse_from(["dagschema", "-vv", "registry"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_cli_help() {
        Cli::command().debug_assert();
    }
}
