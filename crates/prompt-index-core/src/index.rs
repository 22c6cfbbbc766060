//! Prompt index aggregation and output
//!
//! Walks the root, collects category groups and writes them as one JSON array.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::category::IconClassifier;
use crate::config::Config;
use crate::error::Result;
use crate::parser::PromptRecord;
use crate::walker::TreeWalker;

/// Prompts sharing a folder of origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    #[serde(rename = "category")]
    pub name: String,
    pub icon: String,
    pub prompts: Vec<PromptRecord>,
}

/// All categories of one build, serialized as a bare JSON array
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptIndex {
    pub categories: Vec<CategoryGroup>,
}

impl PromptIndex {
    /// Walk `root` with the given config
    pub fn collect(root: &Path, config: &Config) -> Result<Self> {
        let walker = TreeWalker::new(root)
            .ignore(config.to_ignore_config()?)
            .mode(config.parser.mode)
            .classifier(IconClassifier::with_config(&config.icons))
            .root_category(&config.output.root_category, &config.output.root_icon);

        Ok(Self {
            categories: walker.walk()?,
        })
    }

    pub fn total_prompts(&self) -> usize {
        self.categories.iter().map(|c| c.prompts.len()).sum()
    }

    /// Pretty JSON (2-space indent, non-ASCII kept as is)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON to `path`, replacing any previous file
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Outcome of a build run
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub index: PromptIndex,
    pub output: PathBuf,
    /// False for dry runs
    pub written: bool,
}

/// Collect the index under `root` and write it to the configured output path
pub fn build(root: &Path, config: &Config, dry_run: bool) -> Result<BuildResult> {
    let index = PromptIndex::collect(root, config)?;
    let output = config.output_path(root);

    if !dry_run {
        index.write(&output)?;
        info!(
            output = %output.display(),
            categories = index.categories.len(),
            prompts = index.total_prompts(),
            "wrote index"
        );
    }

    Ok(BuildResult {
        index,
        output,
        written: !dry_run,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseMode;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "README.md", "# Readme\nnot a prompt");
        write(root, "hello.md", "# 挨拶\nこんにちは、世界 #日本語");
        write(
            root,
            "ChatGPT/basic.md",
            "# Summarize\nSummarize the text #要約\n## Translate\nTranslate it #翻訳",
        );
        write(root, "ChatGPT/advanced/chain.md", "Step by step reasoning #cot");
        write(root, "Writing/empty.md", "");
        tmp
    }

    #[test]
    fn build_writes_expected_json() {
        let tmp = sample_tree();
        let result = build(tmp.path(), &Config::default(), false).unwrap();

        assert!(result.written);
        assert_eq!(result.output, tmp.path().join("prompts.json"));
        assert_eq!(result.index.categories.len(), 2);
        assert_eq!(result.index.total_prompts(), 4);

        let text = fs::read_to_string(&result.output).unwrap();
        assert!(text.contains("こんにちは、世界"));
        assert!(text.contains("\n  {\n    \"category\": \"ルート\""));

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        let categories = json.as_array().unwrap();
        assert_eq!(categories[0]["category"], "ルート");
        assert_eq!(categories[0]["icon"], "🏠");
        assert_eq!(categories[0]["prompts"][0]["title"], "挨拶");
        assert_eq!(categories[0]["prompts"][0]["file"], "hello.md");

        assert_eq!(categories[1]["category"], "ChatGPT");
        assert_eq!(categories[1]["icon"], "🤖");
        let prompts = categories[1]["prompts"].as_array().unwrap();
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[0]["file"], "ChatGPT/advanced/chain.md");
        assert_eq!(prompts[0]["title"], "chain");
        assert_eq!(prompts[0]["tags"], serde_json::json!(["advanced", "cot"]));
        assert_eq!(prompts[1]["title"], "Summarize");
        assert_eq!(prompts[1]["desc"], "Summarize the text");
        assert_eq!(prompts[2]["tags"], serde_json::json!(["翻訳"]));
    }

    #[test]
    fn build_is_idempotent() {
        let tmp = sample_tree();
        let output = tmp.path().join("prompts.json");

        build(tmp.path(), &Config::default(), false).unwrap();
        let first = fs::read(&output).unwrap();
        build(tmp.path(), &Config::default(), false).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn dry_run_does_not_write() {
        let tmp = sample_tree();
        let result = build(tmp.path(), &Config::default(), true).unwrap();

        assert!(!result.written);
        assert!(!result.output.exists());
        assert_eq!(result.index.total_prompts(), 4);
    }

    #[test]
    fn build_uses_config() {
        let tmp = sample_tree();
        let mut config = Config::default();
        config.parser.mode = ParseMode::WholeFile;
        config.output.file = PathBuf::from("dist/index.json");
        config.walk.exclude_dirs.push("ChatGPT".to_string());

        let result = build(tmp.path(), &config, false).unwrap();
        assert!(tmp.path().join("dist/index.json").exists());
        assert_eq!(result.index.categories.len(), 1);
        assert_eq!(result.index.categories[0].prompts[0].title, "hello");
    }

    #[test]
    fn empty_tree_writes_empty_array() {
        let tmp = TempDir::new().unwrap();
        let result = build(tmp.path(), &Config::default(), false).unwrap();
        assert_eq!(fs::read_to_string(result.output).unwrap(), "[]");
    }
}
