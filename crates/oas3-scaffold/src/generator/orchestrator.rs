//! Orchestration for the OpenAPI translation pipeline.
//!
//! The `Orchestrator` runs both collectors over a parsed document, analyzes
//! the resulting model graph for reference cycles, and optionally renders the
//! result into Rust source files.
//!
//! ## Usage
//!
//! ```text
//! let orchestrator = Orchestrator::new(spec);
//! let output = orchestrator.generate(&Layout::default(), "openapi.json")?;
//! println!("{} files, {} warnings", output.files.len(), output.stats.warnings.len());
//! ```

use super::{
  api_collector::{collect_apis, unbound_models},
  ast::{ApiGroups, Model},
  codegen::{self, CodeMetadata, GeneratedFile, Layout},
  metrics::GenerationStats,
  model_collector::collect_models,
  schema_graph::SchemaGraph,
};

pub struct Orchestrator {
  spec: oas3::Spec,
}

/// Models and operations extracted from one document.
#[derive(Debug, Clone)]
pub struct Collected {
  pub models: Vec<Model>,
  pub apis: ApiGroups,
  pub stats: GenerationStats,
}

#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  pub files: Vec<GeneratedFile>,
  pub stats: GenerationStats,
}

impl Orchestrator {
  pub fn new(spec: oas3::Spec) -> Self {
    Self { spec }
  }

  pub fn metadata(&self) -> CodeMetadata {
    CodeMetadata::from_spec(&self.spec)
  }

  /// Runs both collectors. Each call starts from an empty registry, so
  /// repeated calls on the same document return equal results.
  pub fn collect(&self) -> Collected {
    let mut stats = GenerationStats::default();

    let models = collect_models(&self.spec);
    stats.record_models(&models.models);
    stats.record_warnings(models.warnings);

    let apis = collect_apis(&self.spec);
    stats.record_api_groups(&apis.groups);
    stats.record_warnings(apis.warnings);
    stats.record_warnings(unbound_models(&apis.groups, &models.models));

    Collected {
      models: models.models,
      apis: apis.groups,
      stats,
    }
  }

  /// Collects and renders every file for `layout`. Nothing is written to disk.
  pub fn generate(&self, layout: &Layout, source_path: &str) -> anyhow::Result<GeneratedOutput> {
    let Collected {
      models,
      apis,
      mut stats,
    } = self.collect();

    let graph = SchemaGraph::build(&models);
    stats.record_cycles(graph.cycles().to_vec());

    let files = codegen::generate_files(&models, &apis, &graph, layout, &self.metadata(), source_path)?;

    Ok(GeneratedOutput { files, stats })
  }
}
