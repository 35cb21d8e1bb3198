use crate::engine::DefineError;
use modelspace_config::ConfigError;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

///
/// ImportError
///
/// Every failure aborts the whole import; nothing is partially returned.
///

#[derive(Debug, ThisError)]
pub enum ImportError {
    #[error("io error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid table name format: '{0}'")]
    InvalidTableNameFormat(String),

    #[error("namespace '{0}' has no container")]
    MissingNamespace(String),

    #[error("path '{}' is relative and no base directory was given", .0.display())]
    RelativeRoot(PathBuf),

    #[error("no factory registered for model file '{0}'")]
    UnknownModel(String),

    #[error("invalid model definition in '{}': {message}", path.display())]
    Definition { path: PathBuf, message: String },

    #[error("failed to define model '{model}': {source}")]
    Define { model: String, source: DefineError },

    #[error("associate hook of model '{model}' failed: {source}")]
    Associate { model: String, source: DefineError },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ImportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
