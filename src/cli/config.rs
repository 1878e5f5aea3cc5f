use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::lifecycle::config::NarratorConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "screen-narration",
    version,
    about = "Turns UI focus, menu and dialog changes into accessibility events"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: screen-narration.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a scripted UI scenario and print the events it produces
    Replay {
        /// Path to the scenario YAML file
        #[arg(long)]
        scenario: String,

        /// Output format: json or speech
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Poll interval in milliseconds
        #[arg(long)]
        poll_interval_ms: Option<u64>,

        /// Debounce window in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Start with narration switched off
        #[arg(long)]
        disabled: bool,
    },

    /// Print the structural pattern catalogs in priority order
    Catalog,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `screen-narration.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub narrator: NarratorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_json")]
    pub format: String,

    pub path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            path: None,
        }
    }
}

fn default_json() -> String { "json".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("screen-narration.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build a NarratorConfig: CLI flags override the config file.
pub fn build_narrator_config(
    file: &NarratorConfig,
    poll_interval_ms: Option<u64>,
    debounce_ms: Option<u64>,
    disabled: bool,
) -> NarratorConfig {
    NarratorConfig {
        enabled: file.enabled && !disabled,
        poll_interval_ms: poll_interval_ms.unwrap_or(file.poll_interval_ms),
        debounce_ms: debounce_ms.unwrap_or(file.debounce_ms),
    }
}
