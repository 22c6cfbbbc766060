//! Icon Rule Store
//!
//! アイコンルールのランタイムストア。
//! 設定ファイルのルールをビルトインの前に差し込んで保持する。

use serde::{Deserialize, Serialize};

use super::builtin::{IconRule, BUILTIN_ICON_RULES, FALLBACK_ICON};

/// アイコンルールのランタイムストア（評価順を保持）
#[derive(Debug, Clone)]
pub struct IconRuleStore {
    rules: Vec<IconRule>,
    fallback: String,
}

impl IconRuleStore {
    /// ビルトインルールのみで初期化
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_ICON_RULES.iter().map(IconRule::from).collect(),
            fallback: FALLBACK_ICON.to_string(),
        }
    }

    /// 設定ファイルのルールを追加
    ///
    /// - 設定のルールはビルトインより先に評価される
    /// - 設定内の順序はそのまま維持
    pub fn with_config(mut self, config: &[IconRuleConfig]) -> Self {
        let custom = config.iter().map(|entry| IconRule {
            keywords: entry.keywords.clone(),
            icon: entry.icon.clone(),
        });
        self.rules.splice(0..0, custom);
        self
    }

    /// 全ルールを取得（評価順）
    pub fn all(&self) -> &[IconRule] {
        &self.rules
    }

    /// フォールバックアイコン
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl Default for IconRuleStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `prompt-index.toml`の`[[icons]]`エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRuleConfig {
    /// キーワード
    pub keywords: Vec<String>,
    /// アイコン
    pub icon: String,
}
