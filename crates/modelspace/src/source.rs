//! Where model factories come from.
//!
//! A [`ModelSource`] turns a discovered file into a factory. Two sources are
//! provided: [`FactoryRegistry`], where factories are registered up front
//! under the file they stand for, and [`DeclarativeSource`], which parses
//! the file as TOML and feeds the definition to a builder closure.

use crate::{
    engine::{DefineError, Engine},
    error::ImportError,
    metadata::ModelMetadata,
};
use serde::de::DeserializeOwned;
use std::{
    collections::HashMap,
    fmt, fs,
    marker::PhantomData,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

/// A model factory: `(engine, types, metadata) -> model`.
pub type ModelFactory<E> = Arc<
    dyn Fn(
            &E,
            &<E as Engine>::Types,
            &ModelMetadata,
        ) -> Result<<E as Engine>::Model, DefineError>
        + Send
        + Sync,
>;

///
/// ModelFile
/// a model file found under the root
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

impl ModelFile {
    #[must_use]
    pub fn new(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();

        Self {
            path: path.to_path_buf(),
            relative,
        }
    }

    /// Root-relative path with `/` separators on every platform.
    #[must_use]
    pub fn key(&self) -> String {
        relative_key(&self.relative)
    }
}

fn relative_key(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

///
/// ModelSource
///

pub trait ModelSource<E: Engine> {
    /// Extension (without the dot) of files this source understands.
    fn extension(&self) -> &str;

    fn load(&self, file: &ModelFile) -> Result<ModelFactory<E>, ImportError>;
}

///
/// FactoryRegistry
///
/// Factories compiled into the program, keyed by root-relative file path.
/// The file on disk marks where the model lives; its contents are not read.
///

pub struct FactoryRegistry<E: Engine> {
    extension: String,
    factories: HashMap<String, ModelFactory<E>>,
}

impl<E: Engine> FactoryRegistry<E> {
    pub const DEFAULT_EXTENSION: &'static str = "rs";

    #[must_use]
    pub fn new() -> Self {
        Self::with_extension(Self::DEFAULT_EXTENSION)
    }

    #[must_use]
    pub fn with_extension(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            factories: HashMap::new(),
        }
    }

    /// Register the factory for the file at `relative` (e.g. `base/Animal.rs`).
    pub fn register<F>(&mut self, relative: impl AsRef<Path>, factory: F) -> &mut Self
    where
        F: Fn(&E, &E::Types, &ModelMetadata) -> Result<E::Model, DefineError>
            + Send
            + Sync
            + 'static,
    {
        self.factories
            .insert(relative_key(relative.as_ref()), Arc::new(factory));
        self
    }

    #[must_use]
    pub fn contains(&self, relative: impl AsRef<Path>) -> bool {
        self.factories.contains_key(&relative_key(relative.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<E: Engine> Default for FactoryRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Engine> fmt::Debug for FactoryRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.factories.keys().collect();
        keys.sort();

        f.debug_struct("FactoryRegistry")
            .field("extension", &self.extension)
            .field("factories", &keys)
            .finish()
    }
}

impl<E: Engine> ModelSource<E> for FactoryRegistry<E> {
    fn extension(&self) -> &str {
        &self.extension
    }

    fn load(&self, file: &ModelFile) -> Result<ModelFactory<E>, ImportError> {
        let key = file.key();

        self.factories
            .get(&key)
            .cloned()
            .ok_or(ImportError::UnknownModel(key))
    }
}

///
/// DeclarativeSource
///
/// Each model file is a TOML document deserialized into `D`; `build` turns
/// the definition into a model once the engine asks for it.
///

pub struct DeclarativeSource<E: Engine, D> {
    extension: String,
    build: Arc<
        dyn Fn(&E, &E::Types, &ModelMetadata, &D) -> Result<E::Model, DefineError> + Send + Sync,
    >,
    _definition: PhantomData<fn() -> D>,
}

impl<E: Engine, D> DeclarativeSource<E, D> {
    pub const DEFAULT_EXTENSION: &'static str = "toml";

    pub fn new<F>(build: F) -> Self
    where
        F: Fn(&E, &E::Types, &ModelMetadata, &D) -> Result<E::Model, DefineError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            extension: Self::DEFAULT_EXTENSION.to_string(),
            build: Arc::new(build),
            _definition: PhantomData,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl<E, D> ModelSource<E> for DeclarativeSource<E, D>
where
    E: Engine + 'static,
    D: DeserializeOwned + Send + Sync + 'static,
{
    fn extension(&self) -> &str {
        &self.extension
    }

    fn load(&self, file: &ModelFile) -> Result<ModelFactory<E>, ImportError> {
        let text = fs::read_to_string(&file.path).map_err(|e| ImportError::io(&file.path, e))?;
        let definition: D = toml::from_str(&text).map_err(|e| ImportError::Definition {
            path: file.path.clone(),
            message: e.to_string(),
        })?;

        let build = Arc::clone(&self.build);

        Ok(Arc::new(
            move |engine: &E, types: &E::Types, metadata: &ModelMetadata| {
                build(engine, types, metadata, &definition)
            },
        ))
    }
}
