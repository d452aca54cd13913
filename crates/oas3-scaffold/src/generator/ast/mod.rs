mod documentation;
pub(super) mod types;

use std::collections::BTreeMap;

pub use documentation::Documentation;
use http::Method;
use serde::{Serialize, Serializer};
pub use types::{Field, Model, TypeRef};

/// Model bound to an operation's JSON request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestBodyRef {
  pub model_name: String,
}

/// Model bound to an operation's first successful JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRef {
  pub model_name: String,
  /// Status code exactly as declared (`200`, `201`, `2XX`).
  pub status: String,
}

/// One HTTP method bound to one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, bon::Builder)]
pub struct Operation {
  #[builder(into)]
  pub operation_id: String,
  #[serde(serialize_with = "serialize_method")]
  pub method: Method,
  /// Route path with template parameters rewritten to `:param`.
  #[builder(into)]
  pub path: String,
  /// Path as declared in the document.
  #[builder(into)]
  pub source_path: String,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub request_body: Option<RequestBodyRef>,
  pub response: Option<ResponseRef>,
}

impl Operation {
  /// Model names this operation refers to, request body first.
  pub fn model_refs(&self) -> impl Iterator<Item = &str> {
    self
      .request_body
      .iter()
      .map(|body| body.model_name.as_str())
      .chain(self.response.iter().map(|response| response.model_name.as_str()))
  }
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(method.as_str())
}

/// Operations grouped by lower-cased tag, in tag order.
pub type ApiGroups = BTreeMap<String, Vec<Operation>>;
