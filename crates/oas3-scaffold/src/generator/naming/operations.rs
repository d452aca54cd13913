use crate::generator::naming::identifiers::{capitalize_first, to_rust_type_name};

/// Identifier exposed for an operation.
///
/// A declared `operationId` keeps its spelling with the first character
/// upper-cased. Without one, an id is synthesized from method and path and
/// converted to `PascalCase`.
///
/// ```text
/// (GET, /users/{id}, Some("getUser")) => "GetUser"
/// (GET, /users/{id}, None)            => "GetUsersById"
/// ```
pub(crate) fn derive_operation_id(method: &str, path: &str, operation_id: Option<&str>) -> String {
  match operation_id.map(str::trim).filter(|id| !id.is_empty()) {
    Some(id) => capitalize_first(id),
    None => to_rust_type_name(&generate_operation_id(method, path)),
  }
}

/// Builds an id from the lower-cased method and the path segments, replacing
/// templated segments with `by_<name>`.
pub(crate) fn generate_operation_id(method: &str, path: &str) -> String {
  let path_parts = path
    .split('/')
    .filter(|s| !s.is_empty())
    .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
      Some(param) => format!("by_{param}"),
      None => s.to_string(),
    })
    .collect::<Vec<_>>();

  let method = method.to_lowercase();
  if path_parts.is_empty() {
    method
  } else {
    format!("{method}_{}", path_parts.join("_"))
  }
}

/// Rewrites path template braces into colon-prefixed route parameters.
///
/// ```text
/// /pets/{id}/owners/{ownerId} => /pets/:id/owners/:ownerId
/// ```
pub(crate) fn to_route_path(path: &str) -> String {
  path.replace('{', ":").replace('}', "")
}

/// Grouping key for an operation: its first tag lower-cased, or `default`.
pub(crate) fn tag_key(tags: &[String]) -> String {
  tags
    .first()
    .map(|tag| tag.trim().to_lowercase())
    .filter(|tag| !tag.is_empty())
    .unwrap_or_else(|| super::DEFAULT_TAG.to_string())
}
