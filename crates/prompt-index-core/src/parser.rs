//! Markdown document parser
//!
//! 1つのmdファイルを0個以上の`PromptRecord`に変換する。
//!
//! 分割方式は2種類：
//! - `ParseMode::Sections`: H1〜H3見出しごとに分割（デフォルト）
//! - `ParseMode::WholeFile`: ファイル全体を1レコードとして扱う
//!
//! タイトル・説明・タグの抽出ルールはどちらも共通。

use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PromptIndexError, Result};

/// Maximum description length in characters
pub const DESCRIPTION_MAX_CHARS: usize = 80;

/// Minimum length of a line prefix to be used as description
const DESCRIPTION_MIN_CHARS: usize = 5;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,3}\s+(.+)").expect("heading regex is valid"));

// `#` + word characters, including kana/kanji (U+3040..U+9FFF)
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([\w\x{3040}-\x{9FFF}]+)").expect("tag regex is valid"));

/// How a document is split into records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Split at H1-H3 headings
    #[default]
    Sections,
    /// One record per file
    WholeFile,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sections => "sections",
            Self::WholeFile => "whole-file",
        }
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParseMode {
    type Err = PromptIndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "sections" | "section" => Ok(Self::Sections),
            "whole-file" | "whole_file" | "file" => Ok(Self::WholeFile),
            other => Err(PromptIndexError::InvalidParseMode {
                value: other.to_string(),
            }),
        }
    }
}

/// One extracted prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub title: String,
    /// First eligible body line, at most 80 characters
    #[serde(rename = "desc")]
    pub description: String,
    /// Trimmed body text (never empty)
    pub content: String,
    /// Unique tags in first-occurrence order
    pub tags: Vec<String>,
    /// Root-relative path with `/` separators
    #[serde(rename = "file")]
    pub source_path: String,
}

impl PromptRecord {
    /// Put `tag` at the front of the tag list, dropping any later duplicate
    pub fn prepend_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
        self.tags.insert(0, tag.to_string());
    }
}

/// Parse one document into records
///
/// `relative_path` is the file path relative to the project root. It is used
/// for the `file` field and, when a section has no heading, for the title
/// (file stem).
pub fn parse_document(text: &str, relative_path: &Path, mode: ParseMode) -> Vec<PromptRecord> {
    let source_path = to_slash(relative_path);
    let stem = relative_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match mode {
        ParseMode::Sections => split_sections(trimmed)
            .into_iter()
            .filter_map(|section| section_to_record(&section, &stem, &source_path))
            .collect(),
        ParseMode::WholeFile => build_record(stem, trimmed, &source_path)
            .into_iter()
            .collect(),
    }
}

/// Split at every line starting with 1-3 `#` and a space (except the first line)
fn split_sections(text: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if !current.is_empty() && is_section_start(line) {
            sections.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }
    if !current.is_empty() {
        sections.push(current.join("\n"));
    }

    sections
}

fn is_section_start(line: &str) -> bool {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    (1..=3).contains(&hashes) && line[hashes..].starts_with(' ')
}

fn section_to_record(section: &str, stem: &str, source_path: &str) -> Option<PromptRecord> {
    let lines: Vec<&str> = section.trim().lines().collect();
    let first = lines.first()?;

    let (title, body_lines) = match HEADING_RE.captures(first) {
        Some(caps) => (caps[1].trim().to_string(), &lines[1..]),
        None => (stem.to_string(), &lines[..]),
    };

    let body = body_lines.join("\n");
    build_record(title, body.trim(), source_path)
}

fn build_record(title: String, body: &str, source_path: &str) -> Option<PromptRecord> {
    if body.is_empty() {
        return None;
    }

    Some(PromptRecord {
        title,
        description: extract_description(body),
        content: body.to_string(),
        tags: extract_tags(body),
        source_path: source_path.to_string(),
    })
}

/// Description from the first line whose leading run (up to `#` or a backtick)
/// has at least 5 characters, trimmed and cut to 80 characters
///
/// Every body line is checked in order, not only the first one: a body that
/// opens with a code fence or a short line still gets the next eligible line.
pub fn extract_description(body: &str) -> String {
    for line in body.lines() {
        let end = line.find(|c: char| c == '#' || c == '`').unwrap_or(line.len());
        let run = &line[..end];
        if run.chars().count() >= DESCRIPTION_MIN_CHARS {
            return run.trim().chars().take(DESCRIPTION_MAX_CHARS).collect();
        }
    }
    String::new()
}

/// Inline `#tag` markers, unique by first occurrence
pub fn extract_tags(body: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for caps in TAG_RE.captures_iter(body) {
        let tag = &caps[1];
        if seen.insert(tag.to_string()) {
            tags.push(tag.to_string());
        }
    }

    tags
}

/// Path as a `/`-separated string
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
