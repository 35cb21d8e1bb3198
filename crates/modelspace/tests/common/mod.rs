//! Shared fixtures: an in-memory engine, a recording model and temp trees.

#![allow(dead_code)]

use modelspace::{
    Associate, DefineError, Engine, FactoryRegistry, ModelMetadata, ModelSpace,
};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, Once},
};
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

///
/// Types
///

#[derive(Debug, Default)]
pub struct Types {
    pub integer: &'static str,
}

///
/// TestEngine
/// records the model name of every import, in order
///

#[derive(Debug, Default)]
pub struct TestEngine {
    pub types: Types,
    pub imported: Vec<String>,
}

impl Engine for TestEngine {
    type Types = Types;
    type Model = TestModel;

    fn import<F>(
        &mut self,
        _path: &Path,
        metadata: &ModelMetadata,
        define: F,
    ) -> Result<Self::Model, DefineError>
    where
        F: FnOnce(&Self, &Self::Types) -> Result<Self::Model, DefineError>,
    {
        let model = define(&*self, &self.types)?;
        self.imported.push(metadata.model_name.clone());

        Ok(model)
    }
}

///
/// AssociateCall
/// model paths visible through each argument of one hook call
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssociateCall {
    pub all: Vec<String>,
    pub scoped: Vec<String>,
}

///
/// TestModel
///

#[derive(Debug)]
pub struct TestModel {
    pub meta: ModelMetadata,
    pub fields: Vec<String>,
    pub fail_associate: bool,
    pub calls: Mutex<Vec<AssociateCall>>,
}

impl TestModel {
    pub fn new(meta: &ModelMetadata) -> Self {
        Self {
            meta: meta.clone(),
            fields: Vec::new(),
            fail_associate: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<AssociateCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Associate for TestModel {
    fn associate(
        &self,
        models: &ModelSpace<Self>,
        scoped: &ModelSpace<Self>,
    ) -> Result<(), DefineError> {
        self.calls.lock().unwrap().push(AssociateCall {
            all: model_paths(models),
            scoped: model_paths(scoped),
        });

        if self.fail_associate {
            return Err(format!("{} cannot associate", self.meta.model_name).into());
        }

        Ok(())
    }
}

pub fn model_paths<M>(space: &ModelSpace<M>) -> Vec<String> {
    space.models().into_iter().map(|(path, _)| path).collect()
}

pub fn keys<M>(space: &ModelSpace<M>) -> Vec<String> {
    space.keys().cloned().collect()
}

/// Plain factory used for every registered model file.
pub fn define_model(
    _engine: &TestEngine,
    _types: &Types,
    meta: &ModelMetadata,
) -> Result<TestModel, DefineError> {
    Ok(TestModel::new(meta))
}

///
/// Fixture
/// a temp directory populated with empty files
///

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new(files: &[&str]) -> Self {
        init_tracing();

        let dir = tempfile::tempdir().unwrap();
        let fixture = Self { dir };
        for file in files {
            fixture.write(file, "");
        }

        fixture
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();

        path
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.dir.path().join(relative)).unwrap();
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Registry with [`define_model`] registered for every given path.
pub fn registry(files: &[&str]) -> FactoryRegistry<TestEngine> {
    let mut registry = FactoryRegistry::new();
    for file in files {
        registry.register(file, define_model);
    }

    registry
}
