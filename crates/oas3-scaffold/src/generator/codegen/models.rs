use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::generator::{
  ast::{Documentation, Field, Model, TypeRef},
  schema_graph::SchemaGraph,
};

pub(crate) struct ModelGenerator<'a> {
  graph: &'a SchemaGraph,
}

impl<'a> ModelGenerator<'a> {
  pub(crate) fn new(graph: &'a SchemaGraph) -> Self {
    Self { graph }
  }

  pub(crate) fn generate(&self, model: &Model) -> TokenStream {
    let name = format_ident!("{}", model.name);
    let docs = Documentation::from_optional(model.description.as_deref());
    let fields = model.fields.iter().map(|field| self.generate_field(model, field));

    let sibling_import = model
      .fields
      .iter()
      .any(|field| field.type_ref.model_name().is_some_and(|target| target != model.name))
      .then(|| quote! { use super::*; });

    quote! {
      use serde::{Deserialize, Serialize};
      #sibling_import

      #docs
      #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
      pub struct #name {
        #(#fields),*
      }
    }
  }

  fn generate_field(&self, model: &Model, field: &Field) -> TokenStream {
    let name = format_ident!("{}", field.name);
    let docs = Documentation::from_optional(field.description.as_deref());
    let ty = self.field_type(model, &field.type_ref);

    let rename = (field.name.trim_start_matches("r#") != field.json_name).then(|| {
      let json_name = &field.json_name;
      quote! { #[serde(rename = #json_name)] }
    });

    if field.required {
      quote! {
        #docs
        #rename
        pub #name: #ty
      }
    } else {
      quote! {
        #docs
        #rename
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub #name: Option<#ty>
      }
    }
  }

  /// Boxes direct references that close a cycle back to `model`; `Vec`
  /// already provides the indirection for collections.
  fn field_type(&self, model: &Model, type_ref: &TypeRef) -> TokenStream {
    match type_ref {
      TypeRef::Model(target) if self.graph.needs_indirection(&model.name, target) => quote! { Box<#type_ref> },
      _ => quote! { #type_ref },
    }
  }
}
