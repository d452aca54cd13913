//! Flattens paths and methods into operations grouped by tag.

use std::collections::{BTreeMap, BTreeSet};

use http::Method;
use oas3::{
  Spec,
  spec::{MediaType, ObjectOrReference, Operation as SpecOperation},
};

use super::{
  ast::{ApiGroups, Model, Operation, RequestBodyRef, ResponseRef},
  metrics::GenerationWarning,
  naming::{
    constants::JSON_MEDIA_TYPE,
    identifiers::to_rust_type_name,
    operations::{derive_operation_id, tag_key, to_route_path},
  },
};
use crate::utils::parse_schema_ref_path;

const SUCCESS_STATUS_PREFIX: char = '2';

#[derive(Debug, Default, Clone)]
pub struct ApiCollection {
  pub groups: ApiGroups,
  pub warnings: Vec<GenerationWarning>,
}

/// Builds one [`Operation`] per path and method, grouped under the first tag.
///
/// Paths are visited in lexicographic order and methods in declaration order,
/// so each tag group lists its operations deterministically. A document
/// without paths produces an empty collection.
pub fn collect_apis(spec: &Spec) -> ApiCollection {
  let mut collection = ApiCollection::default();

  let Some(paths) = &spec.paths else {
    return collection;
  };

  for (path, path_item) in paths {
    for (method, operation) in path_item.methods() {
      let converted = OperationMapper {
        spec,
        method: &method,
        path,
        warnings: &mut collection.warnings,
      }
      .map(operation);

      collection
        .groups
        .entry(tag_key(&operation.tags))
        .or_default()
        .push(converted);
    }
  }

  collection
}

/// Reports bound names that no collected model carries, such as a reference to
/// an array or primitive component. The binding itself is kept.
pub fn unbound_models(groups: &ApiGroups, models: &[Model]) -> Vec<GenerationWarning> {
  let known: BTreeSet<&str> = models.iter().map(|model| model.name.as_str()).collect();

  let mut warnings = vec![];
  for operation in groups.values().flatten() {
    for model_name in operation.model_refs() {
      if !known.contains(model_name) {
        warnings.push(GenerationWarning::UnboundModel {
          method: operation.method.to_string(),
          path: operation.source_path.clone(),
          model_name: model_name.to_string(),
        });
      }
    }
  }
  warnings
}

struct OperationMapper<'a> {
  spec: &'a Spec,
  method: &'a Method,
  path: &'a str,
  warnings: &'a mut Vec<GenerationWarning>,
}

impl OperationMapper<'_> {
  fn map(mut self, operation: &SpecOperation) -> Operation {
    let request_body = self.request_body(operation);
    let response = self.response(operation);

    Operation::builder()
      .operation_id(derive_operation_id(
        self.method.as_str(),
        self.path,
        operation.operation_id.as_deref(),
      ))
      .method(self.method.clone())
      .path(to_route_path(self.path))
      .source_path(self.path)
      .maybe_summary(operation.summary.clone())
      .maybe_description(operation.description.clone())
      .maybe_request_body(request_body)
      .maybe_response(response)
      .build()
  }

  fn request_body(&mut self, operation: &SpecOperation) -> Option<RequestBodyRef> {
    let body_ref = operation.request_body.as_ref()?;

    let binding = match body_ref.resolve(self.spec) {
      Ok(body) => json_model_name(&body.content),
      Err(err) => Err(format!("cannot resolve request body: {err}")),
    };

    match binding {
      Ok(model_name) => Some(RequestBodyRef { model_name }),
      Err(reason) => {
        self.warnings.push(GenerationWarning::UnmappedRequestBody {
          method: self.method.to_string(),
          path: self.path.to_string(),
          reason,
        });
        None
      }
    }
  }

  /// Picks the first successful response, in ascending status order, that
  /// binds to a named JSON model. Failures of earlier candidates are reported
  /// only when no later candidate binds.
  fn response(&mut self, operation: &SpecOperation) -> Option<ResponseRef> {
    let responses = operation.responses.as_ref()?;
    let mut rejected = vec![];

    for (status, response_ref) in responses {
      if !status.starts_with(SUCCESS_STATUS_PREFIX) {
        continue;
      }

      let binding = match response_ref.resolve(self.spec) {
        Ok(response) if response.content.is_empty() => continue,
        Ok(response) => json_model_name(&response.content),
        Err(err) => Err(format!("cannot resolve response: {err}")),
      };

      match binding {
        Ok(model_name) => {
          return Some(ResponseRef {
            model_name,
            status: status.clone(),
          });
        }
        Err(reason) => rejected.push((status.clone(), reason)),
      }
    }

    self
      .warnings
      .extend(rejected.into_iter().map(|(status, reason)| GenerationWarning::UnmappedResponse {
        method: self.method.to_string(),
        path: self.path.to_string(),
        status,
        reason,
      }));
    None
  }
}

/// Model bound to the `application/json` entry of a content map, or the
/// reason none is.
fn json_model_name(content: &BTreeMap<String, MediaType>) -> Result<String, String> {
  let media_type = content
    .get(JSON_MEDIA_TYPE)
    .ok_or_else(|| format!("no {JSON_MEDIA_TYPE} content"))?;

  match &media_type.schema {
    None => Err(format!("{JSON_MEDIA_TYPE} content has no schema")),
    Some(ObjectOrReference::Object(_)) => Err("inline schema".to_string()),
    Some(ObjectOrReference::Ref { ref_path, .. }) => parse_schema_ref_path(ref_path)
      .map(|schema_name| to_rust_type_name(&schema_name))
      .ok_or_else(|| format!("reference '{ref_path}' is not a component schema")),
  }
}
