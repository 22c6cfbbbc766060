//! Markdown tree walker
//!
//! ルート直下のmdファイルと、サブフォルダ（カテゴリ）配下のmdファイルを
//! 収集して`CategoryGroup`の一覧を作る。
//!
//! - ルート直下: 非再帰。ファイル名順。1件以上あれば「ルート」カテゴリ
//! - サブフォルダ: 名前順。配下を再帰的に収集（相対パス順）
//! - サブフォルダ内でさらに深い階層のファイルは、最初のディレクトリ名を
//!   タグの先頭に追加する

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::category::IconClassifier;
use crate::config::{DEFAULT_ROOT_CATEGORY, DEFAULT_ROOT_ICON};
use crate::error::{PromptIndexError, Result};
use crate::index::CategoryGroup;
use crate::parser::{parse_document, ParseMode, PromptRecord};

const MARKDOWN_EXTENSION: &str = "md";

/// Default top-level directories that never become categories
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", "__pycache__"];

/// Default file names that are never parsed
pub const DEFAULT_EXCLUDED_FILES: &[&str] = &["README.md", "readme.md"];

/// Configuration for directory/file exclusion
#[derive(Debug, Clone, Default)]
pub struct IgnoreConfig {
    /// Top-level directory names to skip (exact match)
    pub excluded_dirs: Vec<String>,
    /// File name patterns to skip (case-sensitive globs)
    pub excluded_files: Vec<Pattern>,
}

impl IgnoreConfig {
    /// Build from directory names and file name patterns
    pub fn new(dirs: &[String], files: &[String]) -> Result<Self> {
        let excluded_files = files
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| PromptIndexError::InvalidPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            excluded_dirs: dirs.to_vec(),
            excluded_files,
        })
    }

    /// Create with default exclusions
    pub fn with_defaults() -> Self {
        Self {
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            excluded_files: DEFAULT_EXCLUDED_FILES
                .iter()
                .filter_map(|p| Pattern::new(p).ok())
                .collect(),
        }
    }

    /// Check if a top-level directory should be skipped
    ///
    /// Hidden directories (leading `.`) are always skipped.
    pub fn should_skip_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Check if a file name should be skipped
    pub fn should_skip_file(&self, name: &str) -> bool {
        self.excluded_files.iter().any(|p| p.matches(name))
    }
}

/// Walks a root directory and parses every eligible markdown file
pub struct TreeWalker {
    root: PathBuf,
    ignore: IgnoreConfig,
    mode: ParseMode,
    classifier: IconClassifier,
    root_category: String,
    root_icon: String,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: IgnoreConfig::with_defaults(),
            mode: ParseMode::default(),
            classifier: IconClassifier::builtin(),
            root_category: DEFAULT_ROOT_CATEGORY.to_string(),
            root_icon: DEFAULT_ROOT_ICON.to_string(),
        }
    }

    pub fn ignore(mut self, ignore: IgnoreConfig) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn classifier(mut self, classifier: IconClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Name and icon of the category holding root-level files
    pub fn root_category(mut self, name: impl Into<String>, icon: impl Into<String>) -> Self {
        self.root_category = name.into();
        self.root_icon = icon.into();
        self
    }

    /// Collect all non-empty categories: root first, then subfolders by name
    pub fn walk(&self) -> Result<Vec<CategoryGroup>> {
        if !self.root.is_dir() {
            return Err(PromptIndexError::RootNotFound {
                path: self.root.clone(),
            });
        }

        let mut groups = Vec::new();

        let mut root_prompts = Vec::new();
        for file in self.root_files()? {
            root_prompts.extend(self.parse_file(&self.root.join(&file), &file)?);
        }
        if !root_prompts.is_empty() {
            info!(category = %self.root_category, prompts = root_prompts.len(), "root category");
            groups.push(CategoryGroup {
                name: self.root_category.clone(),
                icon: self.root_icon.clone(),
                prompts: root_prompts,
            });
        }

        for (name, dir) in self.category_dirs()? {
            let prompts = self.walk_category(&name, &dir)?;
            if prompts.is_empty() {
                debug!(category = %name, "no prompts, skipped");
                continue;
            }

            let icon = self.classifier.classify(&name).to_string();
            info!(category = %name, %icon, prompts = prompts.len(), "category");
            groups.push(CategoryGroup {
                name,
                icon,
                prompts,
            });
        }

        Ok(groups)
    }

    /// Markdown files directly under the root (file names, sorted)
    fn root_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || !is_markdown(&path) {
                continue;
            }

            let name = match path.file_name() {
                Some(n) => n.to_string_lossy().into_owned(),
                None => continue,
            };
            if self.ignore.should_skip_file(&name) {
                debug!(file = %name, "excluded");
                continue;
            }
            files.push(PathBuf::from(name));
        }

        files.sort();
        Ok(files)
    }

    /// Immediate subdirectories eligible as categories (sorted by name)
    fn category_dirs(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut dirs = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }

            let name = match path.file_name() {
                Some(n) => n.to_string_lossy().into_owned(),
                None => continue,
            };
            if self.ignore.should_skip_dir(&name) {
                debug!(dir = %name, "excluded");
                continue;
            }
            dirs.push((name, path));
        }

        dirs.sort();
        Ok(dirs)
    }

    /// Parse every markdown file below a category folder
    fn walk_category(&self, name: &str, dir: &Path) -> Result<Vec<PromptRecord>> {
        let mut files: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !path.is_file() || !is_markdown(path) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if self.ignore.should_skip_file(&file_name) {
                debug!(file = %path.display(), "excluded");
                continue;
            }

            if let Ok(relative) = path.strip_prefix(dir) {
                files.push(relative.to_path_buf());
            }
        }

        files.sort();

        let mut prompts = Vec::new();
        for relative in files {
            let source = Path::new(name).join(&relative);
            let mut records = self.parse_file(&dir.join(&relative), &source)?;

            if let Some(folder_tag) = nested_folder_tag(&relative) {
                for record in &mut records {
                    record.prepend_tag(&folder_tag);
                }
            }
            prompts.extend(records);
        }

        Ok(prompts)
    }

    fn parse_file(&self, path: &Path, relative: &Path) -> Result<Vec<PromptRecord>> {
        let text = read_lossy(path)?;
        let records = parse_document(&text, relative, self.mode);
        debug!(file = %relative.display(), records = records.len(), "parsed");
        Ok(records)
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}

/// First directory of a path nested deeper than the category folder
fn nested_folder_tag(relative: &Path) -> Option<String> {
    let mut components = relative.components();
    let first = components.next()?;
    components.next()?;
    Some(first.as_os_str().to_string_lossy().into_owned())
}

/// Read a file as UTF-8, dropping invalid byte sequences
pub fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(file = %path.display(), "invalid UTF-8 dropped");
            let bytes = e.into_bytes();
            Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn walk(root: &Path) -> Vec<CategoryGroup> {
        TreeWalker::new(root).walk().unwrap()
    }

    #[test]
    fn ignore_config_defaults() {
        let config = IgnoreConfig::with_defaults();
        assert!(config.should_skip_dir(".git"));
        assert!(config.should_skip_dir("node_modules"));
        assert!(config.should_skip_dir("__pycache__"));
        assert!(config.should_skip_dir(".hidden"));
        assert!(!config.should_skip_dir("AI"));

        assert!(config.should_skip_file("README.md"));
        assert!(config.should_skip_file("readme.md"));
        assert!(!config.should_skip_file("Readme.md"));
        assert!(!config.should_skip_file("prompt.md"));
    }

    #[test]
    fn ignore_config_glob_patterns() {
        let config = IgnoreConfig::new(&[], &["draft-*.md".to_string()]).unwrap();
        assert!(config.should_skip_file("draft-1.md"));
        assert!(!config.should_skip_file("final.md"));
        assert!(config.should_skip_dir(".cache"));

        assert!(matches!(
            IgnoreConfig::new(&[], &["[".to_string()]),
            Err(PromptIndexError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn nested_folder_tag_only_for_deeper_files() {
        assert_eq!(nested_folder_tag(Path::new("x.md")), None);
        assert_eq!(nested_folder_tag(Path::new("sub/x.md")), Some("sub".to_string()));
        assert_eq!(nested_folder_tag(Path::new("sub/deep/x.md")), Some("sub".to_string()));
    }

    #[test]
    fn walk_groups_root_then_sorted_folders() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "b.md", "second root prompt");
        write(root, "a.md", "first root prompt");
        write(root, "Zeta/z.md", "zeta prompt body");
        write(root, "AI/gpt.md", "# Ask\nask something #ai");

        let groups = walk(root);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["ルート", "AI", "Zeta"]);

        assert_eq!(groups[0].icon, "🏠");
        assert_eq!(groups[0].prompts[0].source_path, "a.md");
        assert_eq!(groups[0].prompts[1].source_path, "b.md");

        assert_eq!(groups[1].icon, "🤖");
        assert_eq!(groups[1].prompts[0].title, "Ask");
        assert_eq!(groups[1].prompts[0].source_path, "AI/gpt.md");
        assert_eq!(groups[2].icon, "📄");
    }

    #[test]
    fn walk_injects_nested_folder_tag() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "CategoryA/top.md", "top level #one");
        write(root, "CategoryA/sub/x.md", "# X\nnested body #two\n## Y\nmore #sub #three");

        let groups = walk(root);
        assert_eq!(groups.len(), 1);
        let prompts = &groups[0].prompts;
        assert_eq!(prompts.len(), 3);

        // sorted by relative path: "sub/x.md" < "top.md"
        assert_eq!(prompts[0].source_path, "CategoryA/sub/x.md");
        assert_eq!(prompts[0].tags, vec!["sub", "two"]);
        assert_eq!(prompts[1].tags, vec!["sub", "three"]);
        assert_eq!(prompts[2].source_path, "CategoryA/top.md");
        assert_eq!(prompts[2].tags, vec!["one"]);
    }

    #[test]
    fn walk_skips_readme_everywhere() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "README.md", "root readme text");
        write(root, "Cat/README.md", "category readme");
        write(root, "Cat/deep/README.md", "nested readme");
        write(root, "Cat/readme.md", "lowercase readme");
        write(root, "Cat/Readme.md", "mixed case is kept");

        let groups = walk(root);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Cat");
        assert_eq!(groups[0].prompts.len(), 1);
        assert_eq!(groups[0].prompts[0].source_path, "Cat/Readme.md");
    }

    #[test]
    fn walk_skips_excluded_and_hidden_dirs_and_empty_categories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, ".git/notes.md", "hidden prompt text");
        write(root, ".drafts/x.md", "hidden prompt text");
        write(root, "node_modules/pkg/x.md", "vendored text");
        write(root, "Empty/blank.md", "   \n");
        write(root, "Headings/only.md", "# Title only");
        write(root, "Other/notes.txt", "not markdown");
        write(root, "Misc/ok.md", "a real prompt");

        let groups = walk(root);
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Misc"]);
        assert_eq!(groups[0].icon, "📂");
    }

    #[test]
    fn walk_whole_file_mode() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(root, "x.md", "# Intro\nHello world #tag1\n\n## Part2\nBody text #tag1 #tag2");

        let groups = TreeWalker::new(root).mode(ParseMode::WholeFile).walk().unwrap();
        assert_eq!(groups[0].prompts.len(), 1);
        assert_eq!(groups[0].prompts[0].title, "x");
        assert_eq!(groups[0].prompts[0].tags, vec!["tag1", "tag2"]);
    }

    #[test]
    fn walk_custom_root_category() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "x.md", "root level prompt");

        let groups = TreeWalker::new(tmp.path())
            .root_category("Root", "🏡")
            .walk()
            .unwrap();
        assert_eq!(groups[0].name, "Root");
        assert_eq!(groups[0].icon, "🏡");
    }

    #[test]
    fn walk_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let err = TreeWalker::new(tmp.path().join("missing")).walk().unwrap_err();
        assert!(matches!(err, PromptIndexError::RootNotFound { .. }));
    }

    #[test]
    fn read_lossy_drops_invalid_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.md");
        let mut bytes = "こんにちは".as_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(b" world");
        fs::write(&path, bytes).unwrap();

        assert_eq!(read_lossy(&path).unwrap(), "こんにちは world");
    }
}
