//! Tool configuration loaded from `stylegen.yaml`.
//!
//! Every field is optional. A missing file means defaults; a file that does
//! not parse, or that names an unknown field, is a `Config` error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{io_error, tool_error, ErrorKind, StyleGenError};
use crate::macros::utils::is_identifier;
use crate::macros::writer::Indent;
use crate::validation::Targets;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "stylegen.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Type a `@RegisterStyle` extension must extend.
    pub environment_type: String,
    /// Type a `@ConvenienceModifierForStyle` extension must extend.
    pub view_type: String,
    /// Spaces per indentation level in generated code.
    pub indent_width: usize,
    /// Extension of the source files `generate` and `check` pick up.
    pub file_extension: String,
    /// Appended to the file stem of each generated file.
    pub output_suffix: String,
    /// Comment written at the top of each generated file.
    pub header: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment_type: "EnvironmentValues".to_string(),
            view_type: "View".to_string(),
            indent_width: 4,
            file_extension: "swift".to_string(),
            output_suffix: "+Generated".to_string(),
            header: Some("// Generated by stylegen. Do not edit.".to_string()),
        }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// An explicit path must exist. Without one, `stylegen.yaml` in the
    /// working directory is used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, StyleGenError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| io_error(path.display(), e))?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, StyleGenError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), StyleGenError> {
        if self.indent_width == 0 {
            return Err(config_error("indent_width must be at least 1"));
        }
        for (field, value) in [
            ("environment_type", &self.environment_type),
            ("view_type", &self.view_type),
        ] {
            if !is_identifier(value) {
                return Err(config_error(format!(
                    "{} must be a type name, found `{}`",
                    field, value
                )));
            }
        }
        if self.file_extension.is_empty() || self.file_extension.starts_with('.') {
            return Err(config_error(
                "file_extension must be non-empty and given without the leading dot",
            ));
        }
        if self.output_suffix.is_empty() {
            return Err(config_error(
                "output_suffix must be non-empty, or generated files would overwrite their sources",
            ));
        }
        Ok(())
    }

    pub fn targets(&self) -> Targets {
        Targets {
            environment_type: self.environment_type.clone(),
            view_type: self.view_type.clone(),
        }
    }

    pub fn indent(&self) -> Indent {
        Indent::spaces(self.indent_width)
    }

    /// Output path for `source`: `<stem><suffix>.<ext>`, next to the source
    /// or under `out_dir`.
    pub fn output_path(&self, source: &Path, out_dir: Option<&Path>) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = format!("{}{}.{}", stem, self.output_suffix, self.file_extension);
        match out_dir {
            Some(dir) => dir.join(file_name),
            None => source.with_file_name(file_name),
        }
    }

    /// True for files this tool wrote itself.
    pub fn is_generated_file(&self, path: &Path) -> bool {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().ends_with(&self.output_suffix))
            .unwrap_or(false)
    }
}

fn config_error(message: impl Into<String>) -> StyleGenError {
    tool_error(ErrorKind::Config {
        message: message.into(),
    })
}
