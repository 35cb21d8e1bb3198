//! Modelspace — load model definitions from a directory tree.
//!
//! Every model file below a root directory is turned into a model through a
//! factory, registered under a namespace derived from its directory, and
//! collected into a nested [`ModelSpace`]. Once every model exists, each
//! model's associate hook runs against the full space so relationships can
//! be wired regardless of load order.

pub mod engine;
pub mod error;
pub mod import;
pub mod metadata;
pub mod namespace;
pub mod options;
pub mod source;
pub mod space;
pub mod walk;

pub use modelspace_config as config;

pub use engine::{Associate, DefineError, Engine};
pub use error::ImportError;
pub use import::{Importer, import_models};
pub use metadata::{ModelMetadata, TableNameFormat};
pub use options::ImportOptions;
pub use source::{DeclarativeSource, FactoryRegistry, ModelFactory, ModelFile, ModelSource};
pub use space::{LoadedModel, ModelRegistry, ModelSpace, SpaceNode};

/// Separator joining namespace segments and model names.
pub const SEPARATOR: &str = ".";

/// Reserved directory whose files fan out across the configured schemas.
pub const SCHEMA_DIR: &str = "schema";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Associate, DefineError, Engine, ImportError, ImportOptions, Importer, ModelMetadata,
        ModelSource, ModelSpace, SpaceNode, TableNameFormat, import_models,
    };
}
