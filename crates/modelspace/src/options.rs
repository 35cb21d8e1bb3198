use crate::{error::ImportError, metadata::TableNameFormat};
use modelspace_config::{ImportConfig, VENDOR_DIR};
use std::{
    fs,
    path::{Path, PathBuf},
};

///
/// ImportOptions
///
/// `ignore_file` names the entry point that started the import so it is
/// never mistaken for a model. `base_dir` resolves a relative models
/// directory.
///

#[derive(Clone, Debug)]
pub struct ImportOptions {
    pub recursive: bool,
    pub associate: bool,
    pub table_name_format: TableNameFormat,
    pub exclude: Vec<String>,
    pub schemas: Vec<String>,
    pub skip_dirs: Vec<String>,
    pub ignore_file: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            associate: true,
            table_name_format: TableNameFormat::default(),
            exclude: Vec::new(),
            schemas: Vec::new(),
            skip_dirs: vec![VENDOR_DIR.to_string()],
            ignore_file: None,
            base_dir: None,
        }
    }
}

impl ImportOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a parsed configuration file.
    #[must_use]
    pub fn from_config(config: &ImportConfig) -> Self {
        Self {
            recursive: config.recursive,
            associate: config.associate,
            table_name_format: TableNameFormat::named(config.table_name_format.clone()),
            exclude: config.exclude.clone(),
            schemas: config.schemas.clone(),
            skip_dirs: config.skip_dirs.clone(),
            ignore_file: None,
            base_dir: None,
        }
    }

    /// Load options from a `modelspace.toml`; relative paths resolve
    /// against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let path = path.as_ref();
        let path = fs::canonicalize(path).map_err(|e| ImportError::io(path, e))?;
        let config = ImportConfig::from_file(&path)?;

        Ok(Self::from_config(&config).base_dir(path.parent().map(Path::to_path_buf)))
    }

    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn associate(mut self, associate: bool) -> Self {
        self.associate = associate;
        self
    }

    #[must_use]
    pub fn table_name_format(mut self, format: TableNameFormat) -> Self {
        self.table_name_format = format;
        self
    }

    #[must_use]
    pub fn exclude<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = files.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn schemas<I, S>(mut self, schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schemas = schemas.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn skip_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn ignore_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.ignore_file = Some(file.into());
        self
    }

    #[must_use]
    pub fn base_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.base_dir = dir;
        self
    }

    /// Turn the models directory into the absolute root to walk.
    pub fn resolve_root(&self, models_dir: &Path) -> Result<PathBuf, ImportError> {
        self.resolve(models_dir)
    }

    /// Absolute path of `ignore_file`, resolved like the models directory.
    pub fn resolve_ignore_file(&self) -> Result<Option<PathBuf>, ImportError> {
        self.ignore_file
            .as_deref()
            .map(|file| self.resolve(file))
            .transpose()
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, ImportError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        match &self.base_dir {
            Some(base) if base.is_absolute() => Ok(base.join(path)),
            _ => Err(ImportError::RelativeRoot(path.to_path_buf())),
        }
    }

    pub(crate) fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|name| name == file_name)
    }

    pub(crate) fn is_skipped_dir(&self, dir_name: &str) -> bool {
        self.skip_dirs.iter().any(|name| name == dir_name)
    }
}

///
/// TESTS
///
