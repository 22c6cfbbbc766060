pub mod category;
pub mod config;
pub mod error;
pub mod index;
pub mod parser;
pub mod walker;

pub use config::Config;
pub use error::{PromptIndexError, Result};
pub use index::{build, BuildResult, CategoryGroup, PromptIndex};
pub use parser::{extract_description, extract_tags, parse_document, ParseMode, PromptRecord};
pub use walker::{read_lossy, IgnoreConfig, TreeWalker};

// Icon classification
pub use category::{
    BuiltinIconRule, IconClassifier, IconRule, IconRuleConfig, IconRuleStore, BUILTIN_ICON_RULES,
    FALLBACK_ICON,
};
