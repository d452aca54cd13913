use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub fn from_path(path: &Path) -> Self {
    path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(Self::default(), Self::from_extension)
  }
}

/// Memory-maps an OpenAPI document and parses it as JSON or YAML, chosen by
/// file extension.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open OpenAPI spec {}", path.display()))?;

    Ok(Self {
      file,
      format: SpecFormat::from_path(path),
    })
  }

  pub fn parse(&self) -> anyhow::Result<oas3::Spec> {
    let content = std::str::from_utf8(self.file.as_slice()).context("OpenAPI spec is not valid UTF-8")?;
    let spec = match self.format {
      SpecFormat::Json => oas3::from_json(content).context("failed to parse OpenAPI JSON")?,
      SpecFormat::Yaml => oas3::from_yaml(content).context("failed to parse OpenAPI YAML")?,
    };
    Ok(spec)
  }

  pub async fn load(path: &Path) -> anyhow::Result<oas3::Spec> {
    Self::open(path).await?.parse()
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  const MINIMAL_JSON: &str = r#"{
    "openapi": "3.0.0",
    "info": { "title": "Minimal", "version": "1.0.0" },
    "paths": {}
  }"#;

  const MINIMAL_YAML: &str = "openapi: 3.0.0\ninfo:\n  title: Minimal\n  version: 1.0.0\npaths: {}\n";

  #[test]
  fn test_format_from_path() {
    assert_eq!(SpecFormat::from_path(&PathBuf::from("api.yaml")), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_path(&PathBuf::from("api.YML")), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_path(&PathBuf::from("api.json")), SpecFormat::Json);
    assert_eq!(SpecFormat::from_path(&PathBuf::from("api")), SpecFormat::Json);
  }

  #[tokio::test]
  async fn test_load_json_and_yaml() {
    let dir = tempfile::tempdir().unwrap();

    let json_path = dir.path().join("openapi.json");
    std::fs::write(&json_path, MINIMAL_JSON).unwrap();
    let spec = SpecLoader::load(&json_path).await.unwrap();
    assert_eq!(spec.info.title, "Minimal");

    let yaml_path = dir.path().join("openapi.yaml");
    std::fs::write(&yaml_path, MINIMAL_YAML).unwrap();
    let spec = SpecLoader::load(&yaml_path).await.unwrap();
    assert_eq!(spec.info.version, "1.0.0");
  }

  #[tokio::test]
  async fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = SpecLoader::load(&dir.path().join("missing.json")).await;
    assert!(result.is_err());
  }
}
