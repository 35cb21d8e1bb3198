//! Import driver: resolve the root, walk it, then run the associate pass.

use crate::{
    SEPARATOR,
    engine::{Associate, Engine},
    error::ImportError,
    options::ImportOptions,
    source::ModelSource,
    space::{ModelRegistry, ModelSpace},
    walk::walk,
};
use modelspace_config::{CONFIG_FILE_NAME, ImportConfig};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, trace};

/// Load every model below `models_dir` and return the nested space.
///
/// Any failure (filesystem, configuration, factory or associate hook)
/// aborts the import; no partially built space is ever returned.
pub fn import_models<E, S>(
    engine: &mut E,
    source: &S,
    models_dir: impl AsRef<Path>,
    options: &ImportOptions,
) -> Result<ModelSpace<E::Model>, ImportError>
where
    E: Engine,
    E::Model: Associate,
    S: ModelSource<E> + ?Sized,
{
    let root = options.resolve_root(models_dir.as_ref())?;
    let registry = walk(engine, source, &root, options)?;

    info!(
        root = %root.display(),
        models = registry.loaded.len(),
        "loaded models"
    );

    if options.associate {
        associate_all(&registry)?;
    }

    Ok(registry.into_space())
}

/// Run every model's associate hook in discovery order.
///
/// Stops at the first failing hook; later hooks do not run. A model whose
/// namespace container was later overwritten by a colliding model is scoped
/// to the whole space.
pub fn associate_all<M: Associate>(registry: &ModelRegistry<M>) -> Result<(), ImportError> {
    for loaded in &registry.loaded {
        let scoped = registry
            .space
            .namespace_container(&loaded.namespace, SEPARATOR)
            .unwrap_or_else(|_| {
                trace!(
                    model = %loaded.qualified_name(),
                    "namespace overwritten, scoping to the whole space"
                );
                &registry.space
            });

        debug!(model = %loaded.qualified_name(), "associating model");

        loaded
            .model
            .associate(&registry.space, scoped)
            .map_err(|source| ImportError::Associate {
                model: loaded.qualified_name(),
                source,
            })?;
    }

    Ok(())
}

///
/// Importer
///
/// Owns an engine, a model source and the options to import with.
///

pub struct Importer<E, S> {
    engine: E,
    source: S,
    options: ImportOptions,
}

impl<E, S> Importer<E, S>
where
    E: Engine,
    E::Model: Associate,
    S: ModelSource<E>,
{
    pub fn new(engine: E, source: S) -> Self {
        Self {
            engine,
            source,
            options: ImportOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    pub const fn options(&self) -> &ImportOptions {
        &self.options
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Import everything below `models_dir`.
    pub fn import(
        &mut self,
        models_dir: impl AsRef<Path>,
    ) -> Result<ModelSpace<E::Model>, ImportError> {
        import_models(&mut self.engine, &self.source, models_dir, &self.options)
    }

    /// Import as described by a `modelspace.toml`.
    ///
    /// The config replaces the current options except `ignore_file`. A
    /// relative `models_dir` resolves against the directory holding the
    /// config file, which is also the default models directory. Config files
    /// are never loaded as models.
    pub fn import_with_config(
        &mut self,
        config_path: impl AsRef<Path>,
    ) -> Result<ModelSpace<E::Model>, ImportError> {
        let config_path = config_path.as_ref();
        let config_path =
            fs::canonicalize(config_path).map_err(|e| ImportError::io(config_path, e))?;
        let config = ImportConfig::from_file(&config_path)?;
        let base_dir = config_path
            .parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

        let mut options = ImportOptions::from_config(&config).base_dir(Some(base_dir.clone()));
        options.ignore_file = self.options.ignore_file.clone();
        if !options.is_excluded(CONFIG_FILE_NAME) {
            options.exclude.push(CONFIG_FILE_NAME.to_string());
        }
        self.options = options;

        let models_dir = config.models_dir.unwrap_or(base_dir);

        self.import(models_dir)
    }
}
