use http::Method;

use super::format;
use crate::generator::{
  ast::{Operation, RequestBodyRef, ResponseRef},
  codegen::apis::{ApiGenerator, api_trait_name, routes_const_name},
};

fn operations() -> Vec<Operation> {
  vec![
    Operation::builder()
      .operation_id("ListPets")
      .method(Method::GET)
      .path("/pets")
      .source_path("/pets")
      .summary("List all pets".to_string())
      .response(ResponseRef {
        model_name: "PetPage".to_string(),
        status: "200".to_string(),
      })
      .build(),
    Operation::builder()
      .operation_id("CreatePet")
      .method(Method::POST)
      .path("/pets")
      .source_path("/pets")
      .request_body(RequestBodyRef {
        model_name: "NewPet".to_string(),
      })
      .response(ResponseRef {
        model_name: "Pet".to_string(),
        status: "201".to_string(),
      })
      .build(),
    Operation::builder()
      .operation_id("DeletePetsByPetId")
      .method(Method::DELETE)
      .path("/pets/:petId")
      .source_path("/pets/{petId}")
      .description("Removes a pet.".to_string())
      .build(),
  ]
}

#[test]
fn test_api_trait_and_routes() {
  let operations = operations();
  let code = format(ApiGenerator::new("pets", &operations, "crate::models").generate().unwrap());

  assert!(code.contains("use crate::models::*;"));
  assert!(code.contains("pub trait PetsApi: Send + Sync {"));
  assert!(code.contains("type Error;"));
  assert!(code.contains("fn list_pets("));
  assert!(code.contains("Result<PetPage, Self::Error>"));
  assert!(code.contains("fn create_pet("));
  assert!(code.contains("body: NewPet"));
  assert!(code.contains("Result<Pet, Self::Error>"));
  assert!(code.contains("fn delete_pets_by_pet_id("));
  assert!(code.contains("Result<(), Self::Error>"));
  assert!(code.contains("/// List all pets"));
  assert!(code.contains("/// `GET /pets`"));
  assert!(code.contains("/// Removes a pet."));
  assert!(code.contains("/// `DELETE /pets/:petId`"));
  assert!(code.contains("pub const PETS_ROUTES: &[(&str, &str, &str)]"));
  assert!(code.contains("(\"POST\", \"/pets\", \"CreatePet\")"));
  assert!(code.contains("(\"DELETE\", \"/pets/:petId\", \"DeletePetsByPetId\")"));
}

#[test]
fn test_group_without_models_skips_import() {
  let operations = vec![
    Operation::builder()
      .operation_id("GetHealth")
      .method(Method::GET)
      .path("/health")
      .source_path("/health")
      .build(),
  ];
  let code = format(ApiGenerator::new("default", &operations, "crate::models").generate().unwrap());

  assert!(!code.contains("use crate::models"));
  assert!(code.contains("pub trait DefaultApi: Send + Sync {"));
  assert!(code.contains("fn get_health(&self)"));
}

#[test]
fn test_duplicate_operation_ids_get_unique_methods() {
  let operation = Operation::builder()
    .operation_id("GetPet")
    .method(Method::GET)
    .path("/pets/:id")
    .source_path("/pets/{id}")
    .build();
  let operations = vec![operation.clone(), operation];
  let code = format(ApiGenerator::new("pets", &operations, "crate::models").generate().unwrap());

  assert!(code.contains("fn get_pet(&self)"));
  assert!(code.contains("fn get_pet_2(&self)"));
}

#[test]
fn test_invalid_models_import_path_fails() {
  let operations = operations();
  let result = ApiGenerator::new("pets", &operations, "crate::").generate();
  assert!(result.is_err());
}

#[test]
fn test_tag_identifiers() {
  let cases = [
    ("pets", "PetsApi", "PETS_ROUTES"),
    ("pet store", "PetStoreApi", "PET_STORE_ROUTES"),
    ("default", "DefaultApi", "DEFAULT_ROUTES"),
  ];
  for (tag, trait_name, const_name) in cases {
    assert_eq!(api_trait_name(tag), trait_name);
    assert_eq!(routes_const_name(tag), const_name);
  }
}
