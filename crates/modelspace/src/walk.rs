//! Depth-first directory walk that registers every model file it meets.
//!
//! Entries are visited in the order the platform lists them. Nothing here
//! depends on that order except which of two colliding models wins.

use crate::{
    SCHEMA_DIR, SEPARATOR,
    engine::Engine,
    error::ImportError,
    metadata::ModelMetadata,
    namespace::namespace_from_path,
    options::ImportOptions,
    source::{ModelFile, ModelSource},
    space::{LoadedModel, ModelRegistry},
};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, trace};

/// Walk `root` and register every model file below it.
///
/// The returned registry holds the nested space and the flat list of
/// loaded models in discovery order.
pub fn walk<E, S>(
    engine: &mut E,
    source: &S,
    root: &Path,
    options: &ImportOptions,
) -> Result<ModelRegistry<E::Model>, ImportError>
where
    E: Engine,
    S: ModelSource<E> + ?Sized,
{
    let mut walker = Walker {
        engine,
        source,
        root,
        options,
        ignore_file: options.resolve_ignore_file()?,
        registry: ModelRegistry::new(),
    };
    walker.read_dir(root)?;

    Ok(walker.registry)
}

///
/// Walker
///

struct Walker<'a, E: Engine, S: ?Sized> {
    engine: &'a mut E,
    source: &'a S,
    root: &'a Path,
    options: &'a ImportOptions,
    ignore_file: Option<PathBuf>,
    registry: ModelRegistry<E::Model>,
}

impl<E, S> Walker<'_, E, S>
where
    E: Engine,
    S: ModelSource<E> + ?Sized,
{
    fn read_dir(&mut self, dir: &Path) -> Result<(), ImportError> {
        let entries = fs::read_dir(dir).map_err(|e| ImportError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ImportError::io(dir, e))?;
            let path = entry.path();

            // the entry point that started the import is never a model
            if self.ignore_file.as_deref() == Some(path.as_path()) {
                trace!(path = %path.display(), "skipping caller file");
                continue;
            }

            // follows symlinks
            let stat = fs::metadata(&path).map_err(|e| ImportError::io(&path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if stat.is_dir() {
                self.visit_dir(&path, &name)?;
            } else if stat.is_file() {
                self.visit_file(&path, &name)?;
            }
        }

        Ok(())
    }

    fn visit_dir(&mut self, path: &Path, name: &str) -> Result<(), ImportError> {
        let options = self.options;

        if options.is_skipped_dir(name) {
            trace!(path = %path.display(), "skipping reserved directory");
            return Ok(());
        }
        if !options.recursive {
            trace!(path = %path.display(), "skipping directory, recursion disabled");
            return Ok(());
        }

        let parent = namespace_from_path(self.root, path, SEPARATOR);

        if parent.is_empty() && name == SCHEMA_DIR && !options.schemas.is_empty() {
            // no container of its own; its contents land in every schema
            for schema in &options.schemas {
                self.registry.space.ensure_space(schema);
            }
        } else {
            // containers exist before anything is written below them
            for namespace in self.fan_out(&parent) {
                self.registry
                    .space
                    .namespace_container_mut(&namespace, SEPARATOR)?
                    .ensure_space(name);
            }
        }

        self.read_dir(path)
    }

    fn visit_file(&mut self, path: &Path, file_name: &str) -> Result<(), ImportError> {
        let options = self.options;

        if path.extension().and_then(OsStr::to_str) != Some(self.source.extension()) {
            trace!(path = %path.display(), "skipping file with foreign extension");
            return Ok(());
        }
        if options.is_excluded(file_name) {
            trace!(path = %path.display(), "skipping excluded file");
            return Ok(());
        }
        let Some(name) = path.file_stem().map(|stem| stem.to_string_lossy().into_owned()) else {
            return Ok(());
        };

        let table_name = options.table_name_format.format(&name)?;
        let namespace = namespace_from_path(self.root, path, SEPARATOR);
        let factory = self.source.load(&ModelFile::new(self.root, path))?;

        for effective in self.fan_out(&namespace) {
            let metadata = ModelMetadata::new(&effective, &name, &table_name);

            let model = self
                .engine
                .import(path, &metadata, |engine, types| {
                    factory(engine, types, &metadata)
                })
                .map_err(|source| ImportError::Define {
                    model: metadata.model_name.clone(),
                    source,
                })?;
            let model = Arc::new(model);

            self.registry
                .space
                .namespace_container_mut(&effective, SEPARATOR)?
                .insert_model(&name, Arc::clone(&model));

            debug!(
                model = %metadata.model_name,
                table = %metadata.complete_table_name,
                path = %path.display(),
                "registered model"
            );

            self.registry.loaded.push(LoadedModel {
                namespace: effective,
                name: name.clone(),
                model,
            });
        }

        Ok(())
    }

    // Namespaces a file or directory is registered under. Anything below the
    // top-level schema directory is repeated once per configured schema.
    fn fan_out(&self, namespace: &str) -> Vec<String> {
        let schemas = &self.options.schemas;

        let rest = match namespace.strip_prefix(SCHEMA_DIR) {
            Some("") => Some(""),
            Some(rest) => rest.strip_prefix(SEPARATOR),
            None => None,
        };

        match rest {
            Some(rest) if !schemas.is_empty() => schemas
                .iter()
                .map(|schema| {
                    if rest.is_empty() {
                        schema.clone()
                    } else {
                        format!("{schema}{SEPARATOR}{rest}")
                    }
                })
                .collect(),
            _ => vec![namespace.to_string()],
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::DefineError, source::FactoryRegistry};

    struct NullEngine;

    impl Engine for NullEngine {
        type Types = ();
        type Model = String;

        fn import<F>(
            &mut self,
            _path: &Path,
            _metadata: &ModelMetadata,
            define: F,
        ) -> Result<Self::Model, DefineError>
        where
            F: FnOnce(&Self, &Self::Types) -> Result<Self::Model, DefineError>,
        {
            define(self, &())
        }
    }

    fn fan_out(schemas: &[&str], namespace: &str) -> Vec<String> {
        let mut engine = NullEngine;
        let source = FactoryRegistry::<NullEngine>::new();
        let options = ImportOptions::new().schemas(schemas.iter().copied());
        let walker = Walker {
            engine: &mut engine,
            source: &source,
            root: Path::new("/models"),
            options: &options,
            ignore_file: None,
            registry: ModelRegistry::new(),
        };

        walker.fan_out(namespace)
    }

    #[test]
    fn schema_namespace_fans_out() {
        assert_eq!(fan_out(&["a", "b"], "schema"), vec!["a", "b"]);
    }

    #[test]
    fn nested_schema_namespace_keeps_its_tail() {
        assert_eq!(fan_out(&["a", "b"], "schema.sub"), vec!["a.sub", "b.sub"]);
    }

    #[test]
    fn unrelated_namespaces_do_not_fan_out() {
        assert_eq!(fan_out(&["a"], "schemas"), vec!["schemas"]);
        assert_eq!(fan_out(&["a"], "base.schema"), vec!["base.schema"]);
        assert_eq!(fan_out(&["a"], ""), vec![""]);
    }

    #[test]
    fn schema_namespace_without_schemas_is_ordinary() {
        assert_eq!(fan_out(&[], "schema"), vec!["schema"]);
    }
}
