use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;
use serde::Serialize;

use crate::{
  generator::{
    ast::{Model, Operation},
    orchestrator::Orchestrator,
  },
  ui::{Colors, colors::table_color, term_width},
  utils::spec::SpecLoader,
};

const TABLE_PRESET: &str = "  ── ──            ";
const NONE_MARKER: &str = "-";

#[derive(Debug, Serialize)]
struct OperationListing<'a> {
  tag: &'a str,
  #[serde(flatten)]
  operation: &'a Operation,
}

fn new_table(headers: &[&str], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset(TABLE_PRESET)
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(table_color(colors.label())));
  }
  table.set_header(row);
  table
}

async fn collect(input: &Path) -> anyhow::Result<Orchestrator> {
  Ok(Orchestrator::new(SpecLoader::load(input).await?))
}

pub async fn list_operations(input: &Path, json: bool, colors: &Colors) -> anyhow::Result<()> {
  let collected = collect(input).await?.collect();

  let listings: Vec<OperationListing<'_>> = collected
    .apis
    .iter()
    .flat_map(|(tag, operations)| operations.iter().map(move |operation| OperationListing { tag, operation }))
    .collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&listings)?);
    return Ok(());
  }

  let mut table = new_table(
    &["OPERATION ID", "METHOD", "PATH", "TAG", "REQUEST", "RESPONSE"],
    colors,
  );

  for OperationListing { tag, operation } in listings {
    let request = operation
      .request_body
      .as_ref()
      .map_or(NONE_MARKER, |body| body.model_name.as_str());
    let response = operation.response.as_ref().map_or_else(
      || NONE_MARKER.to_string(),
      |response| format!("{} ({})", response.model_name, response.status),
    );

    let mut row = Row::new();
    row.add_cell(
      Cell::new(&operation.operation_id)
        .fg(table_color(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(operation.method.as_str())
        .fg(table_color(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&operation.path).fg(table_color(colors.primary())));
    row.add_cell(Cell::new(tag).fg(table_color(colors.info())));
    row.add_cell(Cell::new(request).fg(table_color(colors.primary())));
    row.add_cell(Cell::new(response).fg(table_color(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");
  print_warning_count(collected.stats.warnings.len(), colors);

  Ok(())
}

pub async fn list_models(input: &Path, json: bool, colors: &Colors) -> anyhow::Result<()> {
  let collected = collect(input).await?.collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&collected.models)?);
    return Ok(());
  }

  let mut table = new_table(&["MODEL", "ORIGIN", "FIELDS"], colors);
  for model in &collected.models {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&model.name)
        .fg(table_color(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(model_origin(model)).fg(table_color(colors.info())));
    row.add_cell(Cell::new(field_summary(model)).fg(table_color(colors.primary())));
    table.add_row(row);
  }

  println!("{table}");
  print_warning_count(collected.stats.warnings.len(), colors);

  Ok(())
}

fn model_origin(model: &Model) -> &str {
  if model.is_synthesized() {
    "nested"
  } else {
    &model.original_name
  }
}

/// `name: Type` per field, optional fields marked with `?`.
fn field_summary(model: &Model) -> String {
  if model.fields.is_empty() {
    return NONE_MARKER.to_string();
  }
  model
    .fields
    .iter()
    .map(|field| {
      let marker = if field.required { "" } else { "?" };
      format!("{}{marker}: {}", field.json_name, field.type_ref)
    })
    .join(", ")
}

fn print_warning_count(count: usize, colors: &Colors) {
  use crossterm::style::Stylize;

  if count > 0 {
    eprintln!(
      "{}",
      format!("{count} warning(s); run `generate --verbose` for details").with(colors.warning())
    );
  }
}
