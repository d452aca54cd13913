use std::{
  collections::BTreeMap,
  path::{Component, Path, PathBuf},
};

use proc_macro2::TokenStream;

use super::{
  ast::{ApiGroups, Model},
  naming::identifiers::{to_file_stem, to_rust_field_name},
  schema_graph::SchemaGraph,
};

pub mod apis;
pub mod mod_file;
pub mod models;

#[cfg(test)]
mod tests;

const RUST_EXTENSION: &str = ".rs";
const SOURCE_ROOT: &str = "src";

pub const DEFAULT_MODULE: &str = "crate";
pub const DEFAULT_MODELS_DIR: &str = "models";
pub const DEFAULT_API_DIR: &str = "api";
pub const DEFAULT_MODEL_SUFFIX: &str = "_model.rs";
pub const DEFAULT_API_SUFFIX: &str = "_api.rs";

#[derive(Debug, Clone)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

impl CodeMetadata {
  pub fn from_spec(spec: &oas3::Spec) -> Self {
    Self {
      title: spec.info.title.clone(),
      version: spec.info.version.clone(),
      description: spec.info.description.clone(),
    }
  }
}

/// Where generated files go and how they are named.
#[derive(Debug, Clone, bon::Builder)]
pub struct Layout {
  /// Project module the generated packages live under.
  #[builder(into, default = DEFAULT_MODULE.to_string())]
  pub module: String,
  /// Output directory, relative to the project root. `None` writes into the
  /// current directory.
  #[builder(into)]
  pub output: Option<PathBuf>,
  #[builder(into, default = DEFAULT_MODELS_DIR.to_string())]
  pub models_dir: String,
  #[builder(into, default = DEFAULT_API_DIR.to_string())]
  pub api_dir: String,
  #[builder(into, default = DEFAULT_MODEL_SUFFIX.to_string())]
  pub model_suffix: String,
  #[builder(into, default = DEFAULT_API_SUFFIX.to_string())]
  pub api_suffix: String,
}

impl Default for Layout {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl Layout {
  /// Directory every file is written beneath.
  pub fn output_root(&self) -> &Path {
    self.output.as_deref().unwrap_or(Path::new("."))
  }

  /// Rust path the API files import models from: the project module, then
  /// the output directory, then the models directory.
  ///
  /// Only the part of the output directory after its last `src` component
  /// counts, since `src` is the crate root. An absolute directory without a
  /// `src` component contributes its final component only.
  ///
  /// ```text
  /// module = crate, output = None,                    models = models => crate::models
  /// module = crate, output = src/generated,           models = models => crate::generated::models
  /// module = crate, output = /work/app/src/generated, models = models => crate::generated::models
  /// ```
  pub fn models_import_path(&self) -> String {
    let mut segments = vec![self.module.clone()];

    if let Some(output) = &self.output {
      let components: Vec<&str> = output
        .components()
        .filter_map(|component| match component {
          Component::Normal(part) => part.to_str(),
          _ => None,
        })
        .collect();

      let start = match components.iter().rposition(|part| *part == SOURCE_ROOT) {
        Some(src) => src + 1,
        None if output.is_absolute() => components.len().saturating_sub(1),
        None => 0,
      };
      segments.extend(components[start..].iter().copied().map(module_ident));
    }

    segments.extend(
      self
        .models_dir
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .map(module_ident),
    );
    segments.join("::")
  }

  pub(crate) fn model_module(&self, model_name: &str) -> String {
    module_ident(&format!("{}{}", to_file_stem(model_name), self.model_suffix.trim_end_matches(RUST_EXTENSION)))
  }

  pub(crate) fn api_module(&self, tag: &str) -> String {
    module_ident(&format!("{}{}", to_file_stem(tag), self.api_suffix.trim_end_matches(RUST_EXTENSION)))
  }

  fn models_path(&self) -> PathBuf {
    PathBuf::from(&self.models_dir)
  }

  fn api_path(&self) -> PathBuf {
    PathBuf::from(&self.api_dir)
  }
}

fn module_ident(name: &str) -> String {
  to_rust_field_name(name)
}

fn module_file_name(module: &str) -> String {
  format!("{}{RUST_EXTENSION}", module.trim_start_matches("r#"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GeneratedFileKind {
  Model,
  Api,
  Module,
}

/// One rendered source file, with its path relative to [`Layout::output_root`].
#[derive(Debug, Clone)]
pub struct GeneratedFile {
  pub path: PathBuf,
  pub kind: GeneratedFileKind,
  pub code: String,
}

/// Renders one file per model, one per tag group and a `mod.rs` for every
/// directory that received files.
pub(crate) fn generate_files(
  models: &[Model],
  apis: &ApiGroups,
  graph: &SchemaGraph,
  layout: &Layout,
  metadata: &CodeMetadata,
  source_path: &str,
) -> anyhow::Result<Vec<GeneratedFile>> {
  let mut files = vec![];
  let mut modules: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();

  let model_generator = models::ModelGenerator::new(graph);
  for model in models {
    let module = layout.model_module(&model.name);
    let code = generate_source(&model_generator.generate(model), metadata, source_path)?;
    files.push(GeneratedFile {
      path: layout.models_path().join(module_file_name(&module)),
      kind: GeneratedFileKind::Model,
      code,
    });
    modules.entry(layout.models_path()).or_default().push(module);
  }

  let models_import = layout.models_import_path();
  for (tag, operations) in apis {
    let module = layout.api_module(tag);
    let tokens = apis::ApiGenerator::new(tag, operations, &models_import).generate()?;
    let code = generate_source(&tokens, metadata, source_path)?;
    files.push(GeneratedFile {
      path: layout.api_path().join(module_file_name(&module)),
      kind: GeneratedFileKind::Api,
      code,
    });
    modules.entry(layout.api_path()).or_default().push(module);
  }

  for (dir, mut module_names) in modules {
    module_names.sort();
    module_names.dedup();
    let tokens = mod_file::generate_mod_file(&module_names);
    files.push(GeneratedFile {
      path: dir.join(format!("mod{RUST_EXTENSION}")),
      kind: GeneratedFileKind::Module,
      code: generate_source(&tokens, metadata, source_path)?,
    });
  }

  Ok(files)
}

/// Formats `code` with `prettyplease` behind the auto-generated header.
pub(crate) fn generate_source(code: &TokenStream, metadata: &CodeMetadata, source_path: &str) -> anyhow::Result<String> {
  let syntax_tree = syn::parse2::<syn::File>(code.clone())?;
  let formatted = prettyplease::unparse(&syntax_tree);

  let description = metadata
    .description
    .as_deref()
    .map(|d| format!("//!\n//! {}\n", d.trim_end().replace('\n', "\n//! ")))
    .unwrap_or_default();

  Ok(format!(
    r"//! AUTO-GENERATED CODE - DO NOT EDIT!
//!
//! {}
//! Source: {}
//! Version: {}
//! Generated by `oas3-scaffold`
{description}
{formatted}",
    metadata.title, source_path, metadata.version
  ))
}
