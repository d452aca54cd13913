//! Project configuration: an optional YAML file merged with command-line
//! overrides.
//!
//! ```yaml
//! module: crate
//! input: openapi.yaml
//! output: src/generated
//! packages:
//!   models: models
//!   api: api
//! fileNaming:
//!   modelSuffix: _model.rs
//!   apiSuffix: _api.rs
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::generator::codegen::Layout;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "oas3-scaffold.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("no input specification: pass --input or set `input` in the config file")]
  MissingInput,

  #[error("failed to read config {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse config {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
  pub module: Option<String>,
  pub input: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub packages: Packages,
  pub file_naming: FileNaming,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Packages {
  pub models: Option<String>,
  pub api: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileNaming {
  pub model_suffix: Option<String>,
  pub api_suffix: Option<String>,
}

impl FileConfig {
  pub fn from_yaml(content: &str, path: &Path) -> Result<Self, ConfigError> {
    // An empty document deserializes to unit, not a mapping.
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  pub async fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_yaml(&content, path)
  }

  /// Loads `explicit` when given, otherwise [`DEFAULT_CONFIG_FILE`] if it
  /// exists, otherwise an empty configuration.
  pub async fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
    match explicit {
      Some(path) => Self::load(path).await,
      None => {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if tokio::fs::try_exists(default_path).await.unwrap_or(false) {
          Self::load(default_path).await
        } else {
          Ok(Self::default())
        }
      }
    }
  }
}

/// Values given on the command line. Each one that is set wins over the file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
  pub module: Option<String>,
  pub input: Option<PathBuf>,
  pub output: Option<PathBuf>,
  pub models_dir: Option<String>,
  pub api_dir: Option<String>,
  pub model_suffix: Option<String>,
  pub api_suffix: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
  pub input: PathBuf,
  pub layout: Layout,
}

impl FileConfig {
  /// Merges `overrides` over the file values and fills the rest with defaults.
  /// Empty strings count as unset.
  pub fn resolve(self, overrides: Overrides) -> Result<ResolvedConfig, ConfigError> {
    let input = overrides
      .input
      .or(self.input)
      .filter(|path| !path.as_os_str().is_empty())
      .ok_or(ConfigError::MissingInput)?;

    let output = overrides
      .output
      .or(self.output)
      .filter(|path| !path.as_os_str().is_empty());

    let layout = Layout::builder()
      .maybe_module(non_empty(overrides.module.or(self.module)))
      .maybe_output(output)
      .maybe_models_dir(non_empty(overrides.models_dir.or(self.packages.models)))
      .maybe_api_dir(non_empty(overrides.api_dir.or(self.packages.api)))
      .maybe_model_suffix(non_empty(overrides.model_suffix.or(self.file_naming.model_suffix)))
      .maybe_api_suffix(non_empty(overrides.api_suffix.or(self.file_naming.api_suffix)))
      .build();

    Ok(ResolvedConfig { input, layout })
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
