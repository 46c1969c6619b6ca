//! `docnav check` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{
    CliSettings, NavigationConfig, Severity, ValidationReport, resolve_config_path,
};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site base path (overrides config, same as for export).
    #[arg(long, env = "DOCNAV_BASE_PATH")]
    base_path: Option<String>,

    /// Treat warnings as failures.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output (show loading and discovery logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or the report fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let path = resolve_config_path(self.config.as_deref())?;
        output.highlight(&format!("Checking {}", path.display()));

        let mut config = NavigationConfig::load_from_file(&path)?;
        config.apply_cli_settings(&CliSettings {
            base_path: self.base_path,
        });
        let report = config.validate();

        for issue in report.issues() {
            match issue.severity {
                Severity::Error => output.error(&issue.to_string()),
                Severity::Warning => output.warning(&issue.to_string()),
            }
        }

        output.info(&format!(
            "{} groups, {} links",
            config.sidebar.len(),
            config.sidebar.iter().map(|g| g.items.len()).sum::<usize>()
        ));

        let summary = summarize(&report);
        report
            .into_result(self.strict)
            .map_err(|_| CliError::Validation(summary.clone()))?;

        output.success(&summary);
        Ok(())
    }
}

/// One-line tally of a report, e.g. `1 error, 2 warnings`.
fn summarize(report: &ValidationReport) -> String {
    if report.is_empty() {
        return "No issues found".to_owned();
    }
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    format!(
        "{}, {}",
        plural(report.errors().count(), "error"),
        plural(report.warnings().count(), "warning")
    )
}
