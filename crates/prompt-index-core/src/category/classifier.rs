//! Icon Classifier
//!
//! カテゴリ名をIconRuleStoreのルールに基づいてアイコンに変換する。

use super::store::{IconRuleConfig, IconRuleStore};

/// アイコン分類器
#[derive(Debug, Clone, Default)]
pub struct IconClassifier {
    store: IconRuleStore,
}

impl IconClassifier {
    /// 新規分類器を作成
    pub fn new(store: IconRuleStore) -> Self {
        Self { store }
    }

    /// ビルトインルールのみで分類器を構築
    pub fn builtin() -> Self {
        Self::new(IconRuleStore::builtin())
    }

    /// 設定ファイルのルールを加えて分類器を構築
    pub fn with_config(config: &[IconRuleConfig]) -> Self {
        Self::new(IconRuleStore::builtin().with_config(config))
    }

    /// カテゴリ名からアイコンを決定
    ///
    /// 最初にマッチしたルールのアイコンを返す。マッチなしはフォールバック。
    pub fn classify(&self, name: &str) -> &str {
        let lowered = name.to_lowercase();
        self.store
            .all()
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.icon.as_str())
            .unwrap_or_else(|| self.store.fallback())
    }
}
