use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::category::IconRuleConfig;
use crate::error::{PromptIndexError, Result};
use crate::parser::ParseMode;
use crate::walker::{IgnoreConfig, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXCLUDED_FILES};

pub const CONFIG_FILE: &str = "prompt-index.toml";

/// Default output file name (relative to root)
pub const DEFAULT_OUTPUT_FILE: &str = "prompts.json";

/// Category name used for markdown files directly under the root
pub const DEFAULT_ROOT_CATEGORY: &str = "ルート";

/// Icon of the root category
pub const DEFAULT_ROOT_ICON: &str = "🏠";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# prompt-index configuration file
# Location: <root>/prompt-index.toml

[walk]
# Top-level directories that never become categories
# (names starting with "." are always skipped)
exclude_dirs = [".git", "node_modules", "__pycache__"]

# File names never converted into prompts (glob patterns, case-sensitive)
exclude_files = ["README.md", "readme.md"]

[parser]
# "sections"   : split each file at H1-H3 headings
# "whole-file" : one prompt per file
mode = "sections"

[output]
# Output path, relative to the root
file = "prompts.json"
# Category for markdown files directly under the root
root_category = "ルート"
root_icon = "🏠"

# Extra icon rules, checked before the builtin ones
# [[icons]]
# keywords = ["料理", "recipe"]
# icon = "🍳"
"#;

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub walk: WalkConfig,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Extra icon rules (evaluated before builtins)
    #[serde(default)]
    pub icons: Vec<IconRuleConfig>,
}

/// Tree walking configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalkConfig {
    /// Top-level directories to skip
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// File name patterns to skip
    #[serde(default = "default_exclude_files")]
    pub exclude_files: Vec<String>,
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_exclude_files() -> Vec<String> {
    DEFAULT_EXCLUDED_FILES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: default_exclude_dirs(),
            exclude_files: default_exclude_files(),
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ParserConfig {
    #[serde(default)]
    pub mode: ParseMode,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_file")]
    pub file: PathBuf,

    #[serde(default = "default_root_category")]
    pub root_category: String,

    #[serde(default = "default_root_icon")]
    pub root_icon: String,
}

fn default_output_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

fn default_root_category() -> String {
    DEFAULT_ROOT_CATEGORY.to_string()
}

fn default_root_icon() -> String {
    DEFAULT_ROOT_ICON.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: default_output_file(),
            root_category: default_root_category(),
            root_icon: default_root_icon(),
        }
    }
}

impl Config {
    /// Load config from the project root
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| PromptIndexError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to the project root
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;

        let content = toml::to_string_pretty(self)?;

        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(root: &Path) -> Result<PathBuf> {
        let path = root.join(CONFIG_FILE);
        fs::create_dir_all(root)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        self.list()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "walk.exclude_dirs" => self.walk.exclude_dirs = parse_string_list(value),
            "walk.exclude_files" => self.walk.exclude_files = parse_string_list(value),
            "parser.mode" => self.parser.mode = value.parse()?,
            "output.file" => self.output.file = PathBuf::from(value.trim()),
            "output.root_category" => self.output.root_category = value.trim().to_string(),
            "output.root_icon" => self.output.root_icon = value.trim().to_string(),
            _ => {
                return Err(PromptIndexError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        vec![
            (
                "walk.exclude_dirs".to_string(),
                format!("{:?}", self.walk.exclude_dirs),
            ),
            (
                "walk.exclude_files".to_string(),
                format!("{:?}", self.walk.exclude_files),
            ),
            ("parser.mode".to_string(), self.parser.mode.to_string()),
            (
                "output.file".to_string(),
                self.output.file.display().to_string(),
            ),
            (
                "output.root_category".to_string(),
                self.output.root_category.clone(),
            ),
            ("output.root_icon".to_string(), self.output.root_icon.clone()),
        ]
    }

    /// Convert to IgnoreConfig for the tree walker
    pub fn to_ignore_config(&self) -> Result<IgnoreConfig> {
        IgnoreConfig::new(&self.walk.exclude_dirs, &self.walk.exclude_files)
    }

    /// Resolve the output path against the root
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output.file)
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();

    // JSON array format: ["a", "b"]
    let inner = if trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
