use serde_json::json;

use super::support::{field_type, model, model_names, spec_with_schemas};
use crate::generator::{ast::TypeRef, metrics::GenerationWarning, type_mapper::TypeMapper};

#[test]
fn test_primitive_mappings() {
  let spec = spec_with_schemas(json!({
    "Text": { "type": "string" },
    "Count": { "type": "integer" },
    "Ratio": { "type": "number" },
    "Flag": { "type": "boolean" },
    "MaybeText": { "type": ["string", "null"] },
    "Anything": {},
    "Nothing": { "type": "null" },
    "Either": { "type": ["string", "integer"] }
  }));

  let cases = [
    ("Text", TypeRef::String),
    ("Count", TypeRef::Integer),
    ("Ratio", TypeRef::Number),
    ("Flag", TypeRef::Boolean),
    ("MaybeText", TypeRef::String),
    ("Anything", TypeRef::Unknown),
    ("Nothing", TypeRef::Unknown),
    ("Either", TypeRef::Unknown),
  ];

  let mut mapper = TypeMapper::new(&spec);
  for (name, expected) in cases {
    assert_eq!(mapper.resolve_named(name), expected, "failed for {name}");
  }

  let mapped = mapper.into_models();
  assert!(mapped.models.is_empty());
  assert!(mapped.warnings.is_empty());
}

#[test]
fn test_array_of_strings_emits_no_model() {
  let spec = spec_with_schemas(json!({
    "Tags": { "type": "array", "items": { "type": "string" } },
    "Untyped": { "type": "array" }
  }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(mapper.resolve_named("Tags"), TypeRef::array_of(TypeRef::String));
  assert_eq!(mapper.resolve_named("Untyped"), TypeRef::array_of(TypeRef::Unknown));
  assert!(mapper.into_models().models.is_empty());
}

#[test]
fn test_nested_object_is_named_after_its_parent() {
  let spec = spec_with_schemas(json!({
    "Person": {
      "type": "object",
      "required": ["name"],
      "properties": {
        "name": { "type": "string" },
        "profile": {
          "type": "object",
          "properties": { "bio": { "type": "string", "description": "Short bio" } }
        }
      }
    }
  }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(mapper.resolve_named("Person"), TypeRef::model("Person"));
  let models = mapper.into_models().models;

  assert_eq!(model_names(&models), ["PersonProfile", "Person"]);
  assert_eq!(field_type(&models, "Person", "profile"), &TypeRef::model("PersonProfile"));
  assert_eq!(model(&models, "Person").original_name, "Person");
  assert!(model(&models, "PersonProfile").is_synthesized());

  let person = model(&models, "Person");
  assert!(person.field("name").is_some_and(|field| field.required));
  assert!(person.field("profile").is_some_and(|field| !field.required));

  let bio = model(&models, "PersonProfile").field("bio").unwrap();
  assert_eq!(bio.description.as_deref(), Some("Short bio"));
}

#[test]
fn test_array_item_object_uses_item_suffix() {
  let spec = spec_with_schemas(json!({
    "Pets": {
      "type": "array",
      "items": { "type": "object", "properties": { "id": { "type": "integer" } } }
    }
  }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(
    mapper.resolve_named("Pets"),
    TypeRef::array_of(TypeRef::model("PetsItem"))
  );
  let models = mapper.into_models().models;
  assert_eq!(model_names(&models), ["PetsItem"]);
  assert_eq!(field_type(&models, "PetsItem", "id"), &TypeRef::Integer);
}

#[test]
fn test_empty_object_still_yields_model() {
  let spec = spec_with_schemas(json!({ "Empty": { "type": "object" } }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(mapper.resolve_named("Empty"), TypeRef::model("Empty"));
  let models = mapper.into_models().models;
  assert_eq!(model_names(&models), ["Empty"]);
  assert!(models[0].fields.is_empty());
}

#[test]
fn test_object_without_type_tag_is_unknown() {
  let spec = spec_with_schemas(json!({
    "Loose": { "properties": { "id": { "type": "string" } } }
  }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(mapper.resolve_named("Loose"), TypeRef::Unknown);
  assert!(mapper.into_models().models.is_empty());
}

#[test]
fn test_self_reference_terminates() {
  let spec = spec_with_schemas(json!({
    "Node": {
      "type": "object",
      "properties": {
        "value": { "type": "string" },
        "parent": { "$ref": "#/components/schemas/Node" },
        "children": { "type": "array", "items": { "$ref": "#/components/schemas/Node" } }
      }
    }
  }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(mapper.resolve_named("Node"), TypeRef::model("Node"));
  let mapped = mapper.into_models();

  assert_eq!(model_names(&mapped.models), ["Node"]);
  assert_eq!(
    field_type(&mapped.models, "Node", "children"),
    &TypeRef::array_of(TypeRef::model("Node"))
  );
  assert_eq!(field_type(&mapped.models, "Node", "parent"), &TypeRef::model("Node"));
  assert!(mapped.warnings.is_empty());
}

#[test]
fn test_mutual_references_resolve_once() {
  let spec = spec_with_schemas(json!({
    "Author": {
      "type": "object",
      "properties": { "books": { "type": "array", "items": { "$ref": "#/components/schemas/Book" } } }
    },
    "Book": {
      "type": "object",
      "properties": { "author": { "$ref": "#/components/schemas/Author" } }
    }
  }));

  let mut mapper = TypeMapper::new(&spec);
  mapper.resolve_named("Author");
  mapper.resolve_named("Book");
  let models = mapper.into_models().models;

  assert_eq!(model_names(&models), ["Book", "Author"]);
  assert_eq!(field_type(&models, "Book", "author"), &TypeRef::model("Author"));
}

#[test]
fn test_alias_cycle_degrades_to_unknown() {
  let spec = spec_with_schemas(json!({
    "Tree": { "type": "array", "items": { "$ref": "#/components/schemas/Tree" } }
  }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(mapper.resolve_named("Tree"), TypeRef::array_of(TypeRef::Unknown));
  let mapped = mapper.into_models();

  assert!(mapped.models.is_empty());
  assert_eq!(
    mapped.warnings,
    [GenerationWarning::CyclicReference {
      schema_name: "Tree".to_string(),
      context: "TreeItem".to_string(),
    }]
  );
}

#[test]
fn test_alias_to_object_reuses_target_model() {
  let spec = spec_with_schemas(json!({
    "Owner": { "$ref": "#/components/schemas/Person" },
    "Person": { "type": "object", "properties": { "id": { "type": "integer" } } }
  }));

  let mut mapper = TypeMapper::new(&spec);
  assert_eq!(mapper.resolve_named("Owner"), TypeRef::model("Person"));
  assert_eq!(mapper.resolve_named("Person"), TypeRef::model("Person"));
  assert_eq!(model_names(&mapper.into_models().models), ["Person"]);
}

#[test]
fn test_unresolved_references_warn() {
  let spec = spec_with_schemas(json!({
    "Person": {
      "type": "object",
      "properties": {
        "pet": { "$ref": "#/components/schemas/Missing" },
        "remote": { "$ref": "other.yaml#/components/schemas/Remote" }
      }
    }
  }));

  let mut mapper = TypeMapper::new(&spec);
  mapper.resolve_named("Person");
  let mapped = mapper.into_models();

  assert_eq!(field_type(&mapped.models, "Person", "pet"), &TypeRef::Unknown);
  assert_eq!(field_type(&mapped.models, "Person", "remote"), &TypeRef::Unknown);
  assert_eq!(
    mapped.warnings,
    [
      GenerationWarning::UnresolvedReference {
        ref_path: "#/components/schemas/Missing".to_string(),
        context: "PersonPet".to_string(),
      },
      GenerationWarning::UnresolvedReference {
        ref_path: "other.yaml#/components/schemas/Remote".to_string(),
        context: "PersonRemote".to_string(),
      },
    ]
  );
}

#[test]
fn test_field_names_follow_rust_rules() {
  let spec = spec_with_schemas(json!({
    "Item": {
      "type": "object",
      "properties": {
        "first-name": { "type": "string" },
        "type": { "type": "string" },
        "createdAt": { "type": "string" }
      }
    }
  }));

  let mut mapper = TypeMapper::new(&spec);
  mapper.resolve_named("Item");
  let models = mapper.into_models().models;
  let item = model(&models, "Item");

  let names: Vec<(&str, &str)> = item
    .fields
    .iter()
    .map(|field| (field.json_name.as_str(), field.name.as_str()))
    .collect();
  assert_eq!(
    names,
    [("createdAt", "created_at"), ("first-name", "first_name"), ("type", "r#type")]
  );
}

#[test]
fn test_colliding_field_names_get_suffixes() {
  let spec = spec_with_schemas(json!({
    "User": {
      "type": "object",
      "properties": {
        "userId": { "type": "string" },
        "user_id": { "type": "integer" },
        "user_id_2": { "type": "boolean" }
      }
    },
    "Tag": {
      "type": "object",
      "properties": {
        "$": { "type": "string" },
        "%": { "type": "string" }
      }
    }
  }));

  let mut mapper = TypeMapper::new(&spec);
  mapper.resolve_named("Tag");
  mapper.resolve_named("User");
  let mapped = mapper.into_models();

  let names = |model_name: &str| -> Vec<(String, String)> {
    model(&mapped.models, model_name)
      .fields
      .iter()
      .map(|field| (field.json_name.clone(), field.name.clone()))
      .collect()
  };

  assert_eq!(
    names("User"),
    [
      ("userId".to_string(), "user_id".to_string()),
      ("user_id".to_string(), "user_id_3".to_string()),
      ("user_id_2".to_string(), "user_id_2".to_string()),
    ]
  );
  assert_eq!(
    names("Tag"),
    [
      ("$".to_string(), "field".to_string()),
      ("%".to_string(), "field_2".to_string()),
    ]
  );
  assert_eq!(
    mapped.warnings,
    [
      GenerationWarning::DuplicateFieldName {
        model_name: "Tag".to_string(),
        json_name: "%".to_string(),
        field_name: "field_2".to_string(),
      },
      GenerationWarning::DuplicateFieldName {
        model_name: "User".to_string(),
        json_name: "user_id".to_string(),
        field_name: "user_id_3".to_string(),
      },
    ]
  );
}
