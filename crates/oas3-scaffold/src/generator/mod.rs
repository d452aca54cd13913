pub(crate) mod api_collector;
pub(crate) mod ast;
pub mod codegen;
pub(crate) mod metrics;
pub(crate) mod model_collector;
pub(crate) mod naming;
pub mod orchestrator;
pub(crate) mod schema_graph;
pub(crate) mod type_mapper;

#[cfg(test)]
mod tests;
