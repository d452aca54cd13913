use oas3::spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet};

/// Extension methods for `ObjectSchema` to query its type properties conveniently.
pub(crate) trait SchemaExt {
  /// Returns the single `SchemaType` if exactly one is defined, None otherwise.
  fn single_type(&self) -> Option<SchemaType>;

  /// Returns the non-null type from a two-type nullable set (e.g., `[string, null]` -> `string`).
  fn non_null_type(&self) -> Option<SchemaType>;

  /// Returns the type tag the schema is dispatched on: its single type, or the
  /// non-null half of a nullable pair. A lone `null` has no usable tag.
  fn type_tag(&self) -> Option<SchemaType>;

  /// Returns the array item schema, unless it is missing or a boolean schema.
  fn item_schema(&self) -> Option<&ObjectOrReference<ObjectSchema>>;
}

impl SchemaExt for ObjectSchema {
  fn single_type(&self) -> Option<SchemaType> {
    match &self.schema_type {
      Some(SchemaTypeSet::Single(t)) => Some(*t),
      _ => None,
    }
  }

  fn non_null_type(&self) -> Option<SchemaType> {
    match &self.schema_type {
      Some(SchemaTypeSet::Multiple(types)) if types.len() == 2 && types.contains(&SchemaType::Null) => {
        types.iter().find(|t| **t != SchemaType::Null).copied()
      }
      _ => None,
    }
  }

  fn type_tag(&self) -> Option<SchemaType> {
    self
      .single_type()
      .or_else(|| self.non_null_type())
      .filter(|t| *t != SchemaType::Null)
  }

  fn item_schema(&self) -> Option<&ObjectOrReference<ObjectSchema>> {
    match self.items.as_deref()? {
      Schema::Object(item) => Some(item.as_ref()),
      Schema::Boolean(_) => None,
    }
  }
}
