use strum::Display;

use crate::generator::ast::{ApiGroups, Model};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub models_generated: usize,
  pub declared_models: usize,
  pub nested_models: usize,
  pub operations_converted: usize,
  pub tags_generated: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
  pub files_written: usize,
}

impl GenerationStats {
  pub fn record_model(&mut self, model: &Model) {
    self.models_generated += 1;
    if model.is_synthesized() {
      self.nested_models += 1;
    } else {
      self.declared_models += 1;
    }
  }

  pub fn record_models(&mut self, models: &[Model]) {
    for model in models {
      self.record_model(model);
    }
  }

  pub fn record_api_groups(&mut self, groups: &ApiGroups) {
    self.tags_generated += groups.len();
    self.operations_converted += groups.values().map(Vec::len).sum::<usize>();
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_files(&mut self, count: usize) {
    self.files_written += count;
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

/// Non-fatal findings reported alongside the generated models and APIs.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Reference '{ref_path}' in '{context}' does not point to a known schema")]
  UnresolvedReference { ref_path: String, context: String },
  #[strum(to_string = "Reference to '{schema_name}' re-enters itself through '{context}', typed as unknown")]
  CyclicReference { schema_name: String, context: String },
  #[strum(to_string = "Model name '{model_name}' is produced by more than one schema")]
  DuplicateModelName { model_name: String },
  #[strum(to_string = "Property '{json_name}' of '{model_name}' clashes with another field, renamed to '{field_name}'")]
  DuplicateFieldName {
    model_name: String,
    json_name: String,
    field_name: String,
  },
  #[strum(to_string = "[{method} {path}] request body not mapped: {reason}")]
  UnmappedRequestBody { method: String, path: String, reason: String },
  #[strum(to_string = "[{method} {path}] response {status} not mapped: {reason}")]
  UnmappedResponse {
    method: String,
    path: String,
    status: String,
    reason: String,
  },
  #[strum(to_string = "[{method} {path}] '{model_name}' is not an object schema, so no model is generated for it")]
  UnboundModel {
    method: String,
    path: String,
    model_name: String,
  },
}

impl GenerationWarning {
  /// Warnings that mean a declared item produced no output binding.
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::UnmappedRequestBody { .. } | Self::UnmappedResponse { .. })
  }

  /// Warnings shown even without `--verbose`.
  pub fn needs_attention(&self) -> bool {
    self.is_skipped_item() || matches!(self, Self::UnboundModel { .. })
  }
}
