use std::fmt;

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use serde::Serialize;

/// Target type resolved for a single schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeRef {
  String,
  Integer,
  Number,
  Boolean,
  Array(Box<TypeRef>),
  /// Reference to a generated model, by its Rust type name.
  Model(String),
  /// A schema without a recognized type, or one that could not be resolved.
  Unknown,
}

impl TypeRef {
  #[must_use]
  pub fn array_of(item: TypeRef) -> Self {
    Self::Array(Box::new(item))
  }

  #[must_use]
  pub fn model(name: impl Into<String>) -> Self {
    Self::Model(name.into())
  }

  /// Name of the model this type ultimately points at, looking through arrays.
  #[must_use]
  pub fn model_name(&self) -> Option<&str> {
    match self {
      Self::Model(name) => Some(name),
      Self::Array(item) => item.model_name(),
      _ => None,
    }
  }
}

impl fmt::Display for TypeRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::String => f.write_str("String"),
      Self::Integer => f.write_str("i64"),
      Self::Number => f.write_str("f64"),
      Self::Boolean => f.write_str("bool"),
      Self::Array(item) => write!(f, "Vec<{item}>"),
      Self::Model(name) => f.write_str(name),
      Self::Unknown => f.write_str("serde_json::Value"),
    }
  }
}

impl ToTokens for TypeRef {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let ty = match self {
      Self::String => quote! { String },
      Self::Integer => quote! { i64 },
      Self::Number => quote! { f64 },
      Self::Boolean => quote! { bool },
      Self::Array(item) => quote! { Vec<#item> },
      Self::Model(name) => {
        let ident = format_ident!("{}", name);
        quote! { #ident }
      }
      Self::Unknown => quote! { serde_json::Value },
    };
    ty.to_tokens(tokens);
  }
}

/// One property of a generated model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
  /// Rust field identifier (`snake_case`, possibly a raw identifier).
  pub name: String,
  pub type_ref: TypeRef,
  /// Property key as declared in the document.
  pub json_name: String,
  pub description: Option<String>,
  pub required: bool,
}

/// A named record produced for every object schema encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Model {
  pub name: String,
  /// Component key the model was declared under; empty for synthesized models.
  pub original_name: String,
  pub fields: Vec<Field>,
  pub description: Option<String>,
}

impl Model {
  #[must_use]
  pub fn is_synthesized(&self) -> bool {
    self.original_name.is_empty()
  }

  #[cfg(test)]
  pub fn field(&self, json_name: &str) -> Option<&Field> {
    self.fields.iter().find(|field| field.json_name == json_name)
  }
}
