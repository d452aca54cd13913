use std::collections::BTreeSet;

use anyhow::Context;
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};

use crate::generator::{
  ast::{Documentation, Operation},
  naming::identifiers::{capitalize_first, to_rust_const_name, to_rust_field_name, to_rust_type_name},
};

/// Renders the trait and route table for one tag group.
pub(crate) struct ApiGenerator<'a> {
  tag: &'a str,
  operations: &'a [Operation],
  models_import: &'a str,
}

impl<'a> ApiGenerator<'a> {
  pub(crate) fn new(tag: &'a str, operations: &'a [Operation], models_import: &'a str) -> Self {
    Self {
      tag,
      operations,
      models_import,
    }
  }

  pub(crate) fn generate(&self) -> anyhow::Result<TokenStream> {
    let import = self.models_import_tokens()?;
    let trait_fragment = ApiTraitFragment::new(self.tag, self.operations);
    let routes = RoutesFragment::new(self.tag, self.operations);

    Ok(quote! {
      #import

      #trait_fragment

      #routes
    })
  }

  fn models_import_tokens(&self) -> anyhow::Result<Option<TokenStream>> {
    let uses_models = self.operations.iter().any(|op| op.model_refs().next().is_some());
    if !uses_models {
      return Ok(None);
    }
    let path = syn::parse_str::<syn::Path>(self.models_import)
      .with_context(|| format!("invalid models import path '{}'", self.models_import))?;
    Ok(Some(quote! { use #path::*; }))
  }
}

/// `<Tag>Api` identifier for a tag key.
pub(crate) fn api_trait_name(tag: &str) -> String {
  format!("{}Api", to_rust_type_name(&capitalize_first(tag)).trim_start_matches("r#"))
}

/// `<TAG>_ROUTES` identifier for a tag key.
pub(crate) fn routes_const_name(tag: &str) -> String {
  format!("{}_ROUTES", to_rust_const_name(tag))
}

struct ApiTraitFragment<'a> {
  name: String,
  operations: &'a [Operation],
}

impl<'a> ApiTraitFragment<'a> {
  fn new(tag: &str, operations: &'a [Operation]) -> Self {
    Self {
      name: api_trait_name(tag),
      operations,
    }
  }
}

impl ToTokens for ApiTraitFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let name = format_ident!("{}", self.name);

    let mut seen = BTreeSet::new();
    let methods = self.operations.iter().map(|operation| {
      let method_name = unique_method_name(&operation.operation_id, &mut seen);
      ApiMethodFragment { operation, method_name }
    });

    tokens.extend(quote! {
      pub trait #name: Send + Sync {
        type Error;

        #(#methods)*
      }
    });
  }
}

fn unique_method_name(operation_id: &str, seen: &mut BTreeSet<String>) -> String {
  let base = to_rust_field_name(operation_id);
  let mut candidate = base.clone();
  let mut suffix = 2;
  while !seen.insert(candidate.clone()) {
    candidate = format!("{}_{suffix}", base.trim_start_matches("r#"));
    suffix += 1;
  }
  candidate
}

struct ApiMethodFragment<'a> {
  operation: &'a Operation,
  method_name: String,
}

impl ApiMethodFragment<'_> {
  fn docs(&self) -> Documentation {
    let operation = self.operation;
    let mut docs = Documentation::from_optional(operation.summary.as_deref());
    if let Some(description) = operation.description.as_deref() {
      for (i, line) in Documentation::from_raw(description).lines().iter().enumerate() {
        if i == 0 {
          docs.push_paragraph(line.clone());
        } else {
          docs.push(line.clone());
        }
      }
    }
    docs.push_paragraph(format!("`{} {}`", operation.method, operation.path));
    docs
  }
}

impl ToTokens for ApiMethodFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let name = format_ident!("{}", self.method_name);
    let docs = self.docs();

    let body_param = self.operation.request_body.as_ref().map(|body| {
      let model = format_ident!("{}", body.model_name);
      quote! { , body: #model }
    });

    let output = match &self.operation.response {
      Some(response) => {
        let model = format_ident!("{}", response.model_name);
        quote! { #model }
      }
      None => quote! { () },
    };

    tokens.extend(quote! {
      #docs
      fn #name(&self #body_param) -> impl std::future::Future<Output = Result<#output, Self::Error>> + Send;
    });
  }
}

struct RoutesFragment<'a> {
  name: String,
  operations: &'a [Operation],
}

impl<'a> RoutesFragment<'a> {
  fn new(tag: &str, operations: &'a [Operation]) -> Self {
    Self {
      name: routes_const_name(tag),
      operations,
    }
  }
}

impl ToTokens for RoutesFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let name = format_ident!("{}", self.name);
    let routes = self.operations.iter().map(|operation| {
      let method = operation.method.as_str();
      let path = &operation.path;
      let operation_id = &operation.operation_id;
      quote! { (#method, #path, #operation_id) }
    });

    tokens.extend(quote! {
      /// `(method, path, operation id)` for every operation in this group.
      pub const #name: &[(&str, &str, &str)] = &[#(#routes),*];
    });
  }
}
