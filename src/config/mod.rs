pub mod cli;
pub mod policy;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{RecommendError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
pub const INPUT_EXTENSIONS: [&str; 3] = ["csv", "tsv", "xlsx"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "title-recommender")]
#[command(about = "Recommends SEO product titles from related-keyword metrics")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults apply when it is missing)
    #[arg(short, long, default_value = "title-recommender.toml")]
    pub config: String,

    /// Recommend titles for a single seed keyword
    #[arg(short, long, conflicts_with = "input")]
    pub seed: Option<String>,

    /// CSV/TSV/XLSX file with product titles in the first column
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Use the built-in keyword catalog instead of the remote sources
    #[arg(long)]
    pub offline: bool,

    /// Number of batch rows echoed to stdout
    #[arg(long, default_value = "20")]
    pub preview_rows: usize,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_file(&self) -> &str {
        self.input.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match (&self.seed, &self.input) {
            (None, None) => {
                return Err(RecommendError::ConfigError {
                    message: "either --seed or --input is required".to_string(),
                })
            }
            (Some(_), Some(_)) => {
                return Err(RecommendError::ConfigError {
                    message: "--seed and --input cannot be combined".to_string(),
                })
            }
            (None, Some(input)) => {
                validate_path("input", input)?;
                validate_file_extensions("input", std::slice::from_ref(input), &INPUT_EXTENSIONS)?;
            }
            (Some(_), None) => {}
        }

        validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}
