use oas3::Spec;

use super::{ast::Model, metrics::GenerationWarning, type_mapper::TypeMapper};

#[derive(Debug, Default, Clone)]
pub struct ModelCollection {
  pub models: Vec<Model>,
  pub warnings: Vec<GenerationWarning>,
}

/// Collects one model per object schema reachable from `components.schemas`.
///
/// Component schemas are visited in name order. A component already
/// materialized through an earlier reference is not traversed again, so every
/// declared object appears exactly once.
pub fn collect_models(spec: &Spec) -> ModelCollection {
  let mut mapper = TypeMapper::new(spec);

  if let Some(components) = &spec.components {
    for schema_name in components.schemas.keys() {
      mapper.resolve_named(schema_name);
    }
  }

  let mapped = mapper.into_models();
  ModelCollection {
    models: mapped.models,
    warnings: mapped.warnings,
  }
}
