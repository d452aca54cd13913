//! Recursive schema-to-type mapping.
//!
//! The mapper turns one schema node into a [`TypeRef`] and, as a side effect,
//! registers a [`Model`] for every object schema it meets at any depth.
//! Anonymous objects are named after their position: `parent + Property`
//! for properties and `parent + Item` for array items.
//!
//! Named references (`#/components/schemas/X`) go through a memo table keyed
//! by component name. Object components are entered into the table before
//! their properties are visited, so self-referential and mutually recursive
//! schemas resolve to a plain model reference instead of recursing forever.

use std::collections::{BTreeMap, BTreeSet};

use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, SchemaType},
};

use crate::{
  generator::{
    ast::{Field, Model, TypeRef},
    metrics::GenerationWarning,
    naming::{
      constants::{ITEM_SUFFIX, SCHEMA_REF_PREFIX},
      identifiers::{capitalize_first, to_rust_field_name, to_rust_type_name},
    },
  },
  utils::{SchemaExt, parse_schema_ref_path},
};

#[derive(Debug, Clone)]
enum NamedSchema {
  /// A non-object component whose resolution is still on the stack.
  Pending,
  Resolved(TypeRef),
}

/// Models and warnings accumulated by one mapping pass.
#[derive(Debug, Default)]
pub(crate) struct MappedModels {
  pub models: Vec<Model>,
  pub warnings: Vec<GenerationWarning>,
}

pub(crate) struct TypeMapper<'a> {
  spec: &'a Spec,
  models: Vec<Model>,
  named: BTreeMap<String, NamedSchema>,
  model_names: BTreeSet<String>,
  warnings: Vec<GenerationWarning>,
}

impl<'a> TypeMapper<'a> {
  pub(crate) fn new(spec: &'a Spec) -> Self {
    Self {
      spec,
      models: vec![],
      named: BTreeMap::new(),
      model_names: BTreeSet::new(),
      warnings: vec![],
    }
  }

  /// Maps `node` using `name` as the candidate identifier should it turn out
  /// to be an object.
  pub(crate) fn resolve(&mut self, name: &str, node: &ObjectOrReference<ObjectSchema>) -> TypeRef {
    match node {
      ObjectOrReference::Ref { ref_path, .. } => self.resolve_reference(ref_path, name),
      ObjectOrReference::Object(schema) => self.resolve_schema(name, schema, None),
    }
  }

  /// Maps the component schema declared under `schema_name`.
  ///
  /// Each component is traversed at most once per mapper; later calls return
  /// the memoized type.
  pub(crate) fn resolve_named(&mut self, schema_name: &str) -> TypeRef {
    self.resolve_component(schema_name, schema_name)
  }

  pub(crate) fn into_models(self) -> MappedModels {
    MappedModels {
      models: self.models,
      warnings: self.warnings,
    }
  }

  fn resolve_reference(&mut self, ref_path: &str, context: &str) -> TypeRef {
    match parse_schema_ref_path(ref_path) {
      Some(schema_name) => self.resolve_component(&schema_name, context),
      None => {
        self.warnings.push(GenerationWarning::UnresolvedReference {
          ref_path: ref_path.to_string(),
          context: context.to_string(),
        });
        TypeRef::Unknown
      }
    }
  }

  fn resolve_component(&mut self, schema_name: &str, context: &str) -> TypeRef {
    match self.named.get(schema_name) {
      Some(NamedSchema::Resolved(type_ref)) => return type_ref.clone(),
      Some(NamedSchema::Pending) => {
        self.warnings.push(GenerationWarning::CyclicReference {
          schema_name: schema_name.to_string(),
          context: context.to_string(),
        });
        return TypeRef::Unknown;
      }
      None => {}
    }

    let spec = self.spec;
    let Some(node) = spec
      .components
      .as_ref()
      .and_then(|components| components.schemas.get(schema_name))
    else {
      self.warnings.push(GenerationWarning::UnresolvedReference {
        ref_path: format!("{SCHEMA_REF_PREFIX}{schema_name}"),
        context: context.to_string(),
      });
      return TypeRef::Unknown;
    };

    let type_ref = match node {
      ObjectOrReference::Object(schema) if schema.type_tag() == Some(SchemaType::Object) => {
        let type_ref = TypeRef::model(to_rust_type_name(schema_name));
        self
          .named
          .insert(schema_name.to_string(), NamedSchema::Resolved(type_ref.clone()));
        self.register_object(schema_name, schema, schema_name);
        return type_ref;
      }
      ObjectOrReference::Object(schema) => {
        self.named.insert(schema_name.to_string(), NamedSchema::Pending);
        self.resolve_schema(schema_name, schema, Some(schema_name))
      }
      ObjectOrReference::Ref { ref_path, .. } => {
        self.named.insert(schema_name.to_string(), NamedSchema::Pending);
        self.resolve_reference(ref_path, schema_name)
      }
    };

    self
      .named
      .insert(schema_name.to_string(), NamedSchema::Resolved(type_ref.clone()));
    type_ref
  }

  fn resolve_schema(&mut self, name: &str, schema: &ObjectSchema, original_name: Option<&str>) -> TypeRef {
    match schema.type_tag() {
      Some(SchemaType::String) => TypeRef::String,
      Some(SchemaType::Integer) => TypeRef::Integer,
      Some(SchemaType::Number) => TypeRef::Number,
      Some(SchemaType::Boolean) => TypeRef::Boolean,
      Some(SchemaType::Array) => {
        let item = match schema.item_schema() {
          Some(item) => self.resolve(&format!("{name}{ITEM_SUFFIX}"), item),
          None => TypeRef::Unknown,
        };
        TypeRef::array_of(item)
      }
      Some(SchemaType::Object) => self.register_object(name, schema, original_name.unwrap_or_default()),
      Some(SchemaType::Null) | None => TypeRef::Unknown,
    }
  }

  /// Resolves every property, then pushes the model. Nested models therefore
  /// land in the registry before the model that contains them.
  fn register_object(&mut self, name: &str, schema: &ObjectSchema, original_name: &str) -> TypeRef {
    let model_name = to_rust_type_name(name);

    let mut fields = Vec::with_capacity(schema.properties.len());
    for (prop_name, prop_schema) in &schema.properties {
      let type_ref = self.resolve(&format!("{name}{}", capitalize_first(prop_name)), prop_schema);
      fields.push(Field {
        name: to_rust_field_name(prop_name),
        type_ref,
        json_name: prop_name.clone(),
        description: property_description(prop_schema),
        required: schema.required.contains(prop_name),
      });
    }
    let renamed = deduplicate_field_names(&model_name, &mut fields);
    self.warnings.extend(renamed);

    if !self.model_names.insert(model_name.clone()) {
      self.warnings.push(GenerationWarning::DuplicateModelName {
        model_name: model_name.clone(),
      });
    }

    self.models.push(Model {
      name: model_name.clone(),
      original_name: original_name.to_string(),
      fields,
      description: schema.description.clone(),
    });

    TypeRef::Model(model_name)
  }
}

/// Later fields whose Rust name is already taken get a `_2`, `_3`, ... suffix.
/// The JSON key is untouched, so the renamed field keeps its `serde(rename)`.
fn deduplicate_field_names(model_name: &str, fields: &mut [Field]) -> Vec<GenerationWarning> {
  let mut indices_by_name: BTreeMap<String, Vec<usize>> = BTreeMap::new();
  for (i, field) in fields.iter().enumerate() {
    indices_by_name.entry(field.name.clone()).or_default().push(i);
  }

  let mut taken: BTreeSet<String> = indices_by_name.keys().cloned().collect();
  let mut warnings = vec![];

  for (name, colliding_indices) in indices_by_name.into_iter().filter(|(_, v)| v.len() > 1) {
    let base = name.trim_start_matches("r#");
    let mut suffix_num = 1;
    for &idx in &colliding_indices[1..] {
      let renamed = loop {
        suffix_num += 1;
        let candidate = format!("{base}_{suffix_num}");
        if taken.insert(candidate.clone()) {
          break candidate;
        }
      };
      warnings.push(GenerationWarning::DuplicateFieldName {
        model_name: model_name.to_string(),
        json_name: fields[idx].json_name.clone(),
        field_name: renamed.clone(),
      });
      fields[idx].name = renamed;
    }
  }

  warnings
}

fn property_description(node: &ObjectOrReference<ObjectSchema>) -> Option<String> {
  match node {
    ObjectOrReference::Object(schema) => schema.description.clone(),
    ObjectOrReference::Ref { description, .. } => description.clone(),
  }
}
