use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptIndexError {
    #[error("Root directory does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid parser mode: '{value}' - expected 'sections' or 'whole-file'")]
    InvalidParseMode { value: String },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, PromptIndexError>;

impl PromptIndexError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RootNotFound { .. } => 3,
            Self::ConfigParse { .. }
            | Self::ConfigKeyNotFound { .. }
            | Self::InvalidParseMode { .. }
            | Self::InvalidPattern { .. } => 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_serialize_error_converts_with_generic_exit_code() {
        let toml_err = <toml::ser::Error as serde::ser::Error>::custom("unsupported value");
        let err: PromptIndexError = toml_err.into();
        assert!(matches!(err, PromptIndexError::TomlSer(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn exit_codes() {
        let err = PromptIndexError::RootNotFound {
            path: PathBuf::from("missing"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = PromptIndexError::ConfigKeyNotFound {
            key: "nope".to_string(),
        };
        assert_eq!(err.exit_code(), 4);
    }
}
