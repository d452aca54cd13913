use std::path::Path;

use super::format;
use crate::generator::codegen::{CodeMetadata, Layout, generate_source, mod_file::generate_mod_file};

#[test]
fn test_default_layout() {
  let layout = Layout::default();
  assert_eq!(layout.module, "crate");
  assert_eq!(layout.models_dir, "models");
  assert_eq!(layout.api_dir, "api");
  assert_eq!(layout.model_suffix, "_model.rs");
  assert_eq!(layout.api_suffix, "_api.rs");
  assert_eq!(layout.output_root(), Path::new("."));
}

#[test]
fn test_models_import_path() {
  let cases = [
    (Layout::default(), "crate::models"),
    (Layout::builder().output("generated").build(), "crate::generated::models"),
    (Layout::builder().output("src/generated").build(), "crate::generated::models"),
    (
      Layout::builder().module("petstore").output("./out").models_dir("dto/v1").build(),
      "petstore::out::dto::v1",
    ),
    (Layout::builder().output("api-gen").build(), "crate::api_gen::models"),
    (Layout::builder().output("src").build(), "crate::models"),
    (Layout::builder().output("app/src/out").build(), "crate::out::models"),
    (
      Layout::builder().output("/work/app/src/generated").models_dir("dto").build(),
      "crate::generated::dto",
    ),
    (Layout::builder().output("/tmp/scaffold").build(), "crate::scaffold::models"),
  ];
  for (layout, expected) in cases {
    assert_eq!(layout.models_import_path(), expected);
  }
}

#[test]
fn test_module_names() {
  let layout = Layout::default();
  assert_eq!(layout.model_module("PetOwnerAddress"), "pet_owner_address_model");
  assert_eq!(layout.api_module("pets"), "pets_api");
  assert_eq!(layout.api_module("pet store"), "pet_store_api");

  let bare = Layout::builder().model_suffix(".rs").build();
  assert_eq!(bare.model_module("Pet"), "pet");
  assert_eq!(bare.model_module("Type"), "r#type");
}

#[test]
fn test_mod_file_declares_and_reexports() {
  let code = format(generate_mod_file(&["pet_model".to_string(), "r#type".to_string()]));
  assert!(code.contains("mod pet_model;"));
  assert!(code.contains("pub use pet_model::*;"));
  assert!(code.contains("mod r#type;"));
  assert!(code.contains("pub use r#type::*;"));
}

#[test]
fn test_generate_source_header() {
  let metadata = CodeMetadata {
    title: "Petstore".to_string(),
    version: "1.0.0".to_string(),
    description: Some("Line one\nLine two".to_string()),
  };
  let code = generate_source(&quote::quote! { pub struct Empty {} }, &metadata, "petstore.json").unwrap();

  assert!(code.starts_with("//! AUTO-GENERATED CODE - DO NOT EDIT!\n"));
  assert!(code.contains("//! Petstore\n"));
  assert!(code.contains("//! Source: petstore.json\n"));
  assert!(code.contains("//! Version: 1.0.0\n"));
  assert!(code.contains("//! Line one\n//! Line two\n"));
  assert!(code.contains("pub struct Empty {}"));
}
