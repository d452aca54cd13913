use std::collections::{BTreeMap, BTreeSet};

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use super::ast::Model;

/// Reference graph between collected models.
///
/// An edge `A -> B` exists when a field of `A` has type `B` or `Vec<B>`.
/// Strongly connected components of this graph are the reference cycles.
#[derive(Debug, Default)]
pub(crate) struct SchemaGraph {
  dependencies: BTreeMap<String, BTreeSet<String>>,
  cyclic_schemas: BTreeSet<String>,
  cycles: Vec<Vec<String>>,
}

impl SchemaGraph {
  pub(crate) fn build(models: &[Model]) -> Self {
    let mut dependencies: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for model in models {
      let deps = dependencies.entry(model.name.clone()).or_default();
      deps.extend(
        model
          .fields
          .iter()
          .filter_map(|field| field.type_ref.model_name())
          .map(String::from),
      );
    }

    let cycles = detect_cycles(&dependencies);
    let cyclic_schemas = cycles.iter().flatten().cloned().collect();

    Self {
      dependencies,
      cyclic_schemas,
      cycles,
    }
  }

  /// Cycles in deterministic order, each listing its members sorted by name.
  pub(crate) fn cycles(&self) -> &[Vec<String>] {
    &self.cycles
  }

  pub(crate) fn is_cyclic(&self, schema_name: &str) -> bool {
    self.cyclic_schemas.contains(schema_name)
  }

  /// Whether `from` and `to` sit on a common reference cycle. A field of
  /// `from` holding `to` inline needs indirection to have a finite size.
  pub(crate) fn needs_indirection(&self, from: &str, to: &str) -> bool {
    if !self.is_cyclic(from) || !self.is_cyclic(to) {
      return false;
    }
    if from == to {
      return self.dependencies.get(from).is_some_and(|deps| deps.contains(to));
    }
    self
      .cycles
      .iter()
      .any(|cycle| cycle.iter().any(|n| n == from) && cycle.iter().any(|n| n == to))
  }
}

fn detect_cycles(dependencies: &BTreeMap<String, BTreeSet<String>>) -> Vec<Vec<String>> {
  let mut graph = DiGraphMap::<&str, ()>::new();
  for (node, deps) in dependencies {
    graph.add_node(node.as_str());
    for dep in deps {
      graph.add_edge(node.as_str(), dep.as_str(), ());
    }
  }

  let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut names: Vec<String> = scc.into_iter().map(String::from).collect();
      names.sort();
      names
    })
    .collect();
  cycles.sort();
  cycles
}
