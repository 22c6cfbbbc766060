//! Builtin Icon Rules
//!
//! コード内で定義されるビルトインのアイコンルール。
//! 宣言順が優先順位になる（先に書いたものが勝つ）。

/// どのルールにもマッチしなかった場合のアイコン
pub const FALLBACK_ICON: &str = "📄";

/// ビルトインのアイコンルール（評価順）
pub const BUILTIN_ICON_RULES: &[BuiltinIconRule] = &[
    BuiltinIconRule {
        keywords: &["LP", "ランディング", "landing"],
        icon: "🖥️",
    },
    BuiltinIconRule {
        keywords: &["AI", "人工知能", "GPT", "ChatGPT"],
        icon: "🤖",
    },
    BuiltinIconRule {
        keywords: &["ライティング", "writing", "コピー", "セールス"],
        icon: "✍️",
    },
    BuiltinIconRule {
        keywords: &["ビジネス", "business", "業務"],
        icon: "💼",
    },
    BuiltinIconRule {
        keywords: &["分析", "リサーチ", "調査", "research"],
        icon: "🔍",
    },
    BuiltinIconRule {
        keywords: &["マーケ", "marketing", "広告", "SNS"],
        icon: "📣",
    },
    BuiltinIconRule {
        keywords: &["エキスパ", "システム", "system"],
        icon: "⚙️",
    },
    BuiltinIconRule {
        keywords: &["その他", "other", "misc"],
        icon: "📂",
    },
];

/// ビルトインルールの静的定義
#[derive(Debug, Clone)]
pub struct BuiltinIconRule {
    /// マッチ対象のキーワード（大文字小文字を区別しない部分一致）
    pub keywords: &'static [&'static str],
    /// マッチ時のアイコン
    pub icon: &'static str,
}

/// ランタイムのアイコンルール
///
/// ビルトインまたは`prompt-index.toml`の`[[icons]]`から構築される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRule {
    /// キーワード
    pub keywords: Vec<String>,
    /// アイコン
    pub icon: String,
}

impl IconRule {
    /// カテゴリ名がこのルールにマッチするか
    ///
    /// `lowered_name` は小文字化済みであること。
    pub fn matches(&self, lowered_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| lowered_name.contains(&k.to_lowercase()))
    }
}

impl From<&BuiltinIconRule> for IconRule {
    fn from(builtin: &BuiltinIconRule) -> Self {
        Self {
            keywords: builtin.keywords.iter().map(|s| s.to_string()).collect(),
            icon: builtin.icon.to_string(),
        }
    }
}
