use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  config::FileConfig,
  generator::{
    codegen::{GeneratedFile, GeneratedFileKind, Layout},
    metrics::GenerationStats,
    orchestrator::Orchestrator,
  },
  ui::{Colors, GenerateCommand},
  utils::spec::SpecLoader,
};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// Everything a generate run needs once the config file and flags are merged.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub layout: Layout,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub async fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let file = FileConfig::discover(command.config.as_deref()).await?;
    let resolved = file.resolve(command.overrides())?;

    Ok(Self {
      input: resolved.input,
      layout: resolved.layout,
      verbose: command.verbose,
      quiet: command.quiet,
    })
  }
}

/// Writes each file under `root`, creating directories as needed. Returns the
/// number of files written.
pub(crate) async fn write_files(root: &Path, files: &[GeneratedFile]) -> anyhow::Result<usize> {
  for file in files {
    let path = root.join(&file.path);
    if let Some(parent) = path.parent() {
      tokio::fs::create_dir_all(parent)
        .await
        .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(&path, &file.code)
      .await
      .with_context(|| format!("failed to write {}", path.display()))?;
  }
  Ok(files.len())
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        message.with(self.colors.primary())
      );
    }
  }

  fn detail(&self, message: &str) {
    if self.config.verbose {
      println!("            {}", message.with(self.colors.info()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(&format!("Loading OpenAPI spec from: {}", self.config.input.display()));
  }

  fn log_layout(&self) {
    let layout = &self.config.layout;
    self.detail(&format!("models: {}/*{}", layout.models_dir, layout.model_suffix));
    self.detail(&format!("apis:   {}/*{}", layout.api_dir, layout.api_suffix));
    self.detail(&format!("import: {}", layout.models_import_path()));
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Models generated:", stats.models_generated.to_string());
    self.stat("", format!("{} declared", stats.declared_models));
    self.stat("", format!("{} nested", stats.nested_models));
    self.stat("Operations converted:", stats.operations_converted.to_string());
    self.stat("API groups:", stats.tags_generated.to_string());
    self.stat("Files written:", stats.files_written.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  /// Skipped and unbound items are always shown; other warnings only with
  /// `--verbose`.
  fn print_warnings(&self, stats: &GenerationStats) {
    let shown: Vec<_> = stats
      .warnings
      .iter()
      .filter(|warning| warning.needs_attention() || self.config.verbose)
      .collect();
    if shown.is_empty() {
      return;
    }

    println!();
    for warning in shown {
      let label = if warning.is_skipped_item() { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.warning()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_file(&self, root: &Path, file: &GeneratedFile) {
    let kind = match file.kind {
      GeneratedFileKind::Model => "model",
      GeneratedFileKind::Api => "api",
      GeneratedFileKind::Module => "mod",
    };
    self.detail(&format!("{kind:>5}  {}", root.join(&file.path).display()));
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated models and API scaffolding".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<GenerationStats> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let spec = SpecLoader::load(&config.input).await?;

  logger.info("Collecting models and operations...");
  logger.log_layout();
  let orchestrator = Orchestrator::new(spec);
  let source_path = config.input.display().to_string();
  let output = orchestrator.generate(&config.layout, &source_path)?;

  let root = config.layout.output_root();
  logger.info(&format!("Writing to: {}", root.display()));
  for file in &output.files {
    logger.log_file(root, file);
  }

  let mut stats = output.stats;
  stats.record_files(write_files(root, &output.files).await?);

  logger.print_statistics(&stats);
  logger.log_success();
  Ok(stats)
}
