use oas3::Spec;
use serde_json::{Value, json};

use crate::generator::ast::{Model, TypeRef};

pub(super) fn parse_spec(spec_json: &str) -> Spec {
  oas3::from_json(spec_json).expect("failed to parse test spec")
}

pub(super) fn spec_with(paths: Value, schemas: Value) -> Spec {
  let spec_json = json!({
    "openapi": "3.1.0",
    "info": { "title": "Test API", "version": "1.0.0" },
    "paths": paths,
    "components": { "schemas": schemas }
  });
  parse_spec(&spec_json.to_string())
}

pub(super) fn spec_with_schemas(schemas: Value) -> Spec {
  spec_with(json!({}), schemas)
}

pub(super) fn model<'a>(models: &'a [Model], name: &str) -> &'a Model {
  models
    .iter()
    .find(|model| model.name == name)
    .unwrap_or_else(|| panic!("model {name} not collected"))
}

pub(super) fn field_type<'a>(models: &'a [Model], model_name: &str, json_name: &str) -> &'a TypeRef {
  &model(models, model_name)
    .field(json_name)
    .unwrap_or_else(|| panic!("{model_name}.{json_name} missing"))
    .type_ref
}

pub(super) fn model_names(models: &[Model]) -> Vec<&str> {
  models.iter().map(|model| model.name.as_str()).collect()
}
