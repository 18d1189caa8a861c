// Settings persistence: global configuration for the twain command.
// Uses platform-native config dir: e.g. ~/Library/Application Support/twain/settings.json
// on macOS, ~/.config/twain/settings.json on Linux.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use twain_diff::DiffOracle;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwainSettings {
    #[serde(default)]
    pub diff: DiffSettings,
    #[serde(default)]
    pub render: RenderSettings,
}

/// Which external program produces the unified diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffSettings {
    #[serde(default = "default_program")]
    pub program: String,
    /// Arguments placed before the two file paths. Must request unified output.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_program() -> String {
    DiffOracle::default().program
}

fn default_args() -> Vec<String> {
    DiffOracle::default().args
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

impl DiffSettings {
    pub fn oracle(&self) -> DiffOracle {
        DiffOracle::new(self.program.clone(), self.args.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    #[serde(default)]
    pub format: OutputFormat,
    /// Maximum display width of the from column in text output.
    #[serde(default = "default_column_width")]
    pub column_width: usize,
}

fn default_column_width() -> usize {
    60
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            column_width: default_column_width(),
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("twain").join("settings.json"))
}

/// Load settings from the platform config dir, or defaults.
pub fn load_settings() -> TwainSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => TwainSettings::default(),
    }
}

/// Load settings from an explicit file. A missing file yields defaults; an
/// unparsable one is logged and ignored.
pub fn load_settings_from(path: &Path) -> TwainSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                TwainSettings::default()
            }
        },
        Err(_) => TwainSettings::default(),
    }
}
