//! `docnav export` command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use docnav_config::{CliSettings, Format, NavigationConfig};

use crate::error::CliError;
use crate::output::Output;

/// Output encodings accepted by `--format`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportFormat {
    Json,
    Toml,
    Yaml,
}

impl From<ExportFormat> for Format {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Json => Self::Json,
            ExportFormat::Toml => Self::Toml,
            ExportFormat::Yaml => Self::Yaml,
        }
    }
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output encoding.
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
    format: ExportFormat,

    /// Site base path (overrides config).
    #[arg(long, env = "DOCNAV_BASE_PATH")]
    base_path: Option<String>,

    /// Enable verbose output (show loading and discovery logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or validation fails, or stdout is closed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        output.data(&self.render()?)?;
        Ok(())
    }

    /// Load, validate and encode the configuration.
    fn render(self) -> Result<String, CliError> {
        let cli_settings = CliSettings {
            base_path: self.base_path,
        };
        let config = NavigationConfig::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            groups = config.sidebar.len(),
            format = ?self.format,
            "Exporting navigation config"
        );
        Ok(config.to_string_with(self.format.into())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    const VALID: &str = r#"
title = "Atri"
description = "Atri docs"
base = "/atri_qq/"

[[sidebar]]
text = "开始"

[[sidebar.items]]
text = "配置你的项目"
link = "/primary/configure"

[[sidebar.items]]
text = "运行你的插件"
link = "/primary/run"
"#;

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("docnav.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn args(config: PathBuf, format: ExportFormat, base_path: Option<&str>) -> ExportArgs {
        ExportArgs {
            config: Some(config),
            format,
            base_path: base_path.map(str::to_owned),
            verbose: false,
        }
    }

    #[test]
    fn test_export_json_uses_consumer_keys() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(temp_dir.path(), VALID);

        let rendered = args(path, ExportFormat::Json, None).render().unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["basePath"], "/atri_qq/");
        assert_eq!(json["sidebar"][0]["text"], "开始");
        assert_eq!(json["sidebar"][0]["items"][1]["link"], "/primary/run");
        assert!(json["sidebar"][0].get("collapsible").is_none());
    }

    #[test]
    fn test_export_applies_base_path_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(temp_dir.path(), VALID);

        let rendered = args(path, ExportFormat::Json, Some("/preview/"))
            .render()
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["basePath"], "/preview/");
    }

    #[test]
    fn test_export_toml_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(temp_dir.path(), VALID);

        let rendered = args(path.clone(), ExportFormat::Toml, None).render().unwrap();

        let original = NavigationConfig::load(Some(&path), None).unwrap();
        let exported = NavigationConfig::from_str_with(Format::Toml, &rendered).unwrap();
        assert_eq!(exported, original);
    }

    #[test]
    fn test_export_refuses_invalid_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write(temp_dir.path(), &VALID.replace("/primary/run", "primary/run"));

        let err = args(path, ExportFormat::Json, None).render().unwrap_err();

        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("primary/run"));
    }

    #[test]
    fn test_export_format_conversion() {
        assert_eq!(Format::from(ExportFormat::Json), Format::Json);
        assert_eq!(Format::from(ExportFormat::Toml), Format::Toml);
        assert_eq!(Format::from(ExportFormat::Yaml), Format::Yaml);
    }
}
