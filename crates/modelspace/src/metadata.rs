//! Metadata handed to every model factory.

use crate::{SEPARATOR, error::ImportError, namespace::qualify};
use modelspace_config::SNAKE_CASE;
use modelspace_utils::case::snake_case;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

///
/// ModelMetadata
///
/// Derived from the file name and its effective namespace:
///
/// | field | top level | namespace `base` |
/// |---|---|---|
/// | `schema` | `None` | `Some("base")` |
/// | `schema_name` | `""` | `"base"` |
/// | `model_name` | `Fake` | `base.Fake` |
/// | `table_name` | `fake` | `fake` |
/// | `complete_table_name` | `fake` | `base.fake` |
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    pub schema: Option<String>,
    pub schema_name: String,
    pub model_name: String,
    pub table_name: String,
    pub complete_table_name: String,
    pub separator: String,
}

impl ModelMetadata {
    #[must_use]
    pub fn new(namespace: &str, name: &str, table_name: &str) -> Self {
        let schema = (!namespace.is_empty()).then(|| namespace.to_string());

        Self {
            schema,
            schema_name: namespace.to_string(),
            model_name: qualify(namespace, name, SEPARATOR),
            table_name: table_name.to_string(),
            complete_table_name: qualify(namespace, table_name, SEPARATOR),
            separator: SEPARATOR.to_string(),
        }
    }
}

///
/// TableNameFormat
///
/// Maps a model name to its table name. A named format is only checked when
/// it is first applied, so configuration carrying an unknown tag loads fine
/// and fails on the first model file.
///

#[derive(Clone)]
pub enum TableNameFormat {
    Named(String),
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl TableNameFormat {
    #[must_use]
    pub fn named(tag: impl Into<String>) -> Self {
        Self::Named(tag.into())
    }

    pub fn custom<F>(format: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(format))
    }

    /// Produce the table name for a model name.
    pub fn format(&self, name: &str) -> Result<String, ImportError> {
        match self {
            Self::Custom(format) => Ok(format(name)),
            Self::Named(tag) if tag == SNAKE_CASE => Ok(snake_case(name)),
            Self::Named(tag) => Err(ImportError::InvalidTableNameFormat(tag.clone())),
        }
    }
}

impl Default for TableNameFormat {
    fn default() -> Self {
        Self::Named(SNAKE_CASE.to_string())
    }
}

impl fmt::Debug for TableNameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tag) => f.debug_tuple("Named").field(tag).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

///
/// TESTS
///
