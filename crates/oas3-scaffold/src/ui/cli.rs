use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "oas3-scaffold")]
#[command(author, version, about = "OpenAPI to Rust model and API scaffold generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from an OpenAPI specification
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate model and API files from an OpenAPI specification
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Default, Clone)]
pub struct GenerateCommand {
  /// YAML config file (defaults to ./oas3-scaffold.yaml when present)
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Path to the OpenAPI JSON or YAML specification
  #[arg(short, long, value_name = "FILE")]
  pub input: Option<PathBuf>,

  /// Directory the models and api packages are written under
  #[arg(short, long, value_name = "DIR")]
  pub output: Option<PathBuf>,

  /// Project module generated imports start from
  #[arg(long, value_name = "MODULE")]
  pub module: Option<String>,

  /// Directory name for model files
  #[arg(long, value_name = "DIR")]
  pub models_dir: Option<String>,

  /// Directory name for API files
  #[arg(long, value_name = "DIR")]
  pub api_dir: Option<String>,

  /// File name suffix for model files
  #[arg(long, value_name = "SUFFIX")]
  pub model_suffix: Option<String>,

  /// File name suffix for API files
  #[arg(long, value_name = "SUFFIX")]
  pub api_suffix: Option<String>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

impl GenerateCommand {
  pub fn overrides(&self) -> Overrides {
    Overrides {
      module: self.module.clone(),
      input: self.input.clone(),
      output: self.output.clone(),
      models_dir: self.models_dir.clone(),
      api_dir: self.api_dir.clone(),
      model_suffix: self.model_suffix.clone(),
      api_suffix: self.api_suffix.clone(),
    }
  }
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the operations and the models they bind
  Operations {
    /// Path to the OpenAPI JSON or YAML specification
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
  },
  /// List the models collected from the component schemas
  Models {
    /// Path to the OpenAPI JSON or YAML specification
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
  },
}
