//! The nested model mapping and the registry built while walking.

use crate::{
    SEPARATOR,
    error::ImportError,
    namespace::{qualify, segments},
};
use derive_more::Deref;
use std::{collections::BTreeMap, sync::Arc};

///
/// SpaceNode
///

#[derive(Debug)]
pub enum SpaceNode<M> {
    Space(ModelSpace<M>),
    Model(Arc<M>),
}

impl<M> SpaceNode<M> {
    #[must_use]
    pub const fn as_space(&self) -> Option<&ModelSpace<M>> {
        match self {
            Self::Space(space) => Some(space),
            Self::Model(_) => None,
        }
    }

    #[must_use]
    pub const fn as_model(&self) -> Option<&Arc<M>> {
        match self {
            Self::Model(model) => Some(model),
            Self::Space(_) => None,
        }
    }
}

impl<M> Clone for SpaceNode<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Space(space) => Self::Space(space.clone()),
            Self::Model(model) => Self::Model(Arc::clone(model)),
        }
    }
}

///
/// ModelSpace
///
/// Name → nested space or model. Dereferences to the underlying map for
/// lookups and iteration.
///

#[derive(Debug, Deref)]
pub struct ModelSpace<M>(BTreeMap<String, SpaceNode<M>>);

impl<M> ModelSpace<M> {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Resolve a namespace to the container it designates.
    ///
    /// Every segment must already name a nested space.
    pub fn namespace_container(
        &self,
        namespace: &str,
        separator: &str,
    ) -> Result<&Self, ImportError> {
        let mut space = self;
        for segment in segments(namespace, separator) {
            space = match space.0.get(segment) {
                Some(SpaceNode::Space(inner)) => inner,
                _ => return Err(ImportError::MissingNamespace(namespace.to_string())),
            };
        }

        Ok(space)
    }

    /// Mutable counterpart of [`Self::namespace_container`].
    pub fn namespace_container_mut(
        &mut self,
        namespace: &str,
        separator: &str,
    ) -> Result<&mut Self, ImportError> {
        let mut space = self;
        for segment in segments(namespace, separator) {
            space = match space.0.get_mut(segment) {
                Some(SpaceNode::Space(inner)) => inner,
                _ => return Err(ImportError::MissingNamespace(namespace.to_string())),
            };
        }

        Ok(space)
    }

    /// Make sure `name` holds a nested space, replacing a model stored there.
    pub fn ensure_space(&mut self, name: &str) -> &mut Self {
        let node = self
            .0
            .entry(name.to_string())
            .or_insert_with(|| SpaceNode::Space(Self::new()));

        // at most one pass converts a model into an empty space
        loop {
            match node {
                SpaceNode::Space(space) => return space,
                SpaceNode::Model(_) => *node = SpaceNode::Space(Self::new()),
            }
        }
    }

    /// Store a model under `name`. The last write wins.
    pub fn insert_model(&mut self, name: &str, model: Arc<M>) -> Option<SpaceNode<M>> {
        self.0.insert(name.to_string(), SpaceNode::Model(model))
    }

    /// Look up a model by its dotted path, e.g. `base.Animal`.
    #[must_use]
    pub fn model(&self, path: &str) -> Option<&Arc<M>> {
        let (namespace, name) = path.rsplit_once(SEPARATOR).unwrap_or(("", path));

        self.namespace_container(namespace, SEPARATOR)
            .ok()?
            .0
            .get(name)?
            .as_model()
    }

    /// Look up a nested space by its dotted path.
    #[must_use]
    pub fn space(&self, path: &str) -> Option<&Self> {
        self.namespace_container(path, SEPARATOR).ok()
    }

    /// Every model in the space, depth first, paired with its dotted path.
    #[must_use]
    pub fn models(&self) -> Vec<(String, Arc<M>)> {
        let mut out = Vec::new();
        self.collect_models("", &mut out);

        out
    }

    fn collect_models(&self, prefix: &str, out: &mut Vec<(String, Arc<M>)>) {
        for (name, node) in &self.0 {
            let path = qualify(prefix, name, SEPARATOR);
            match node {
                SpaceNode::Space(space) => space.collect_models(&path, out),
                SpaceNode::Model(model) => out.push((path, Arc::clone(model))),
            }
        }
    }
}

impl<M> Default for ModelSpace<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for ModelSpace<M> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

///
/// LoadedModel
/// one entry of the flat discovery-order list
///

#[derive(Debug)]
pub struct LoadedModel<M> {
    pub namespace: String,
    pub name: String,
    pub model: Arc<M>,
}

impl<M> LoadedModel<M> {
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name, SEPARATOR)
    }
}

///
/// ModelRegistry
///

#[derive(Debug)]
pub struct ModelRegistry<M> {
    pub space: ModelSpace<M>,
    pub loaded: Vec<LoadedModel<M>>,
}

impl<M> ModelRegistry<M> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            space: ModelSpace::new(),
            loaded: Vec::new(),
        }
    }

    /// Hand the nested mapping over to the caller.
    #[must_use]
    pub fn into_space(self) -> ModelSpace<M> {
        self.space
    }
}

impl<M> Default for ModelRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
