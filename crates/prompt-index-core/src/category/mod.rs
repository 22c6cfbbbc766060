//! # Category Module
//!
//! カテゴリ（フォルダ）名から表示用アイコンを決定する機能を提供する。
//!
//! ## 設計目的
//!
//! prompts.json の各カテゴリには1文字のアイコンが付く。
//! フォルダ名に含まれるキーワードでアイコンを自動判定する：
//!
//! - **LP**: `LP`, `ランディング`, `landing` → 🖥️
//! - **AI**: `AI`, `GPT`, `ChatGPT` → 🤖
//! - **Writing**: `ライティング`, `writing`, `コピー` → ✍️
//! - 以下、ビジネス / 分析 / マーケ / システム / その他
//!
//! ルールは宣言順に評価され、最初にマッチしたものが採用される。
//! どれにもマッチしない場合はフォールバックアイコン（📄）。
//!
//! ## モジュール構成
//!
//! - `builtin`: ビルトインのアイコンルール定義
//! - `store`: ルールのランタイムストア（設定ファイルのルールを先頭に追加）
//! - `classifier`: 分類器
//!
//! ## 使用例
//!
//! ```rust
//! use prompt_index_core::category::{IconClassifier, FALLBACK_ICON};
//!
//! let classifier = IconClassifier::builtin();
//! assert_eq!(classifier.classify("ChatGPT活用"), "🤖");
//! assert_eq!(classifier.classify("landing-pages"), "🖥️");
//! assert_eq!(classifier.classify("日記"), FALLBACK_ICON);
//! ```

mod builtin;
mod classifier;
mod store;

// Re-exports
pub use builtin::{BuiltinIconRule, IconRule, BUILTIN_ICON_RULES, FALLBACK_ICON};
pub use classifier::IconClassifier;
pub use store::{IconRuleConfig, IconRuleStore};
