use crate::generator::naming::constants::SCHEMA_REF_PREFIX;

/// Parses a schema `$ref` path and extracts the referenced schema name.
///
/// Only internal schema components (`#/components/schemas/<name>`) yield a
/// name; external documents and other component kinds return `None`.
pub fn parse_schema_ref_path(ref_path: &str) -> Option<String> {
  ref_path
    .strip_prefix(SCHEMA_REF_PREFIX)
    .filter(|name| !name.is_empty() && !name.contains('/'))
    .map(ToString::to_string)
}
