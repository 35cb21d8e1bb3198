//! Contracts between the loader and the model engine it feeds.

use crate::{metadata::ModelMetadata, space::ModelSpace};
use std::path::Path;

/// Error raised by user code: a model factory or an associate hook.
pub type DefineError = Box<dyn std::error::Error + Send + Sync>;

///
/// Engine
///
/// The external model engine. `import` registers one model found at `path`;
/// the engine hands itself and its type system to `define`, which runs the
/// model's factory with the computed metadata.
///

pub trait Engine {
    type Types;
    type Model;

    fn import<F>(
        &mut self,
        path: &Path,
        metadata: &ModelMetadata,
        define: F,
    ) -> Result<Self::Model, DefineError>
    where
        F: FnOnce(&Self, &Self::Types) -> Result<Self::Model, DefineError>;
}

///
/// Associate
///
/// Relationship hook run once per model after every model is loaded.
/// `models` is the whole space; `scoped` is the container of the model's own
/// namespace (the whole space for top-level models).
///
/// Hooks must not depend on state another hook sets, since they run in
/// discovery order. The default does nothing.
///

pub trait Associate: Sized {
    fn associate(
        &self,
        _models: &ModelSpace<Self>,
        _scoped: &ModelSpace<Self>,
    ) -> Result<(), DefineError> {
        Ok(())
    }
}
