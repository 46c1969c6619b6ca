//! Persisted encodings of [`NavigationConfig`].
//!
//! Decoding goes through [`serde_ignored`] so keys the model does not know
//! about are reported instead of silently vanishing.

use std::fmt;
use std::path::Path;

use crate::ConfigError;
use crate::sidebar::NavigationConfig;

/// Supported document encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Toml,
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toml => f.write_str("toml"),
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Decoded configuration together with the keys the decoder skipped.
#[derive(Debug)]
pub struct Decoded {
    pub config: NavigationConfig,
    /// Dotted paths of unrecognized keys (e.g. `sidebar.0.icon`).
    pub ignored: Vec<String>,
}

impl NavigationConfig {
    /// Parse a configuration document.
    ///
    /// Unknown keys are logged at warning level and otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns a parse error naming the missing or mistyped field.
    pub fn from_str_with(format: Format, content: &str) -> Result<Self, ConfigError> {
        let decoded = decode(format, content)?;
        for key in &decoded.ignored {
            tracing::warn!(key = %key, format = %format, "Ignoring unknown configuration key");
        }
        Ok(decoded.config)
    }

    /// Serialize the configuration in the given format.
    ///
    /// JSON output is pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if the encoder rejects the value.
    pub fn to_string_with(&self, format: Format) -> Result<String, ConfigError> {
        match format {
            Format::Toml => {
                toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            Format::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
            Format::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
            }
        }
    }
}

/// Decode a document and collect unknown keys.
///
/// # Errors
///
/// Returns the decoder's error for syntax errors and structural defects.
pub fn decode(format: Format, content: &str) -> Result<Decoded, ConfigError> {
    let mut ignored = Vec::new();

    let config = match format {
        Format::Toml => {
            deserialize_tracking(toml::Deserializer::parse(content)?, &mut ignored)?
        }
        Format::Json => {
            let mut deserializer = serde_json::Deserializer::from_str(content);
            let config = deserialize_tracking(&mut deserializer, &mut ignored)?;
            deserializer.end()?;
            config
        }
        Format::Yaml => {
            deserialize_tracking(serde_yaml::Deserializer::from_str(content), &mut ignored)?
        }
    };

    Ok(Decoded { config, ignored })
}

fn deserialize_tracking<'de, D>(
    deserializer: D,
    ignored: &mut Vec<String>,
) -> Result<NavigationConfig, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
        ignored.push(path.to_string());
    })
}
