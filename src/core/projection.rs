//! Projection definitions and the registry that hands them to maps
//!
//! A projection pairs a drawing surface bounding box with the vector path of
//! every region drawn in that coordinate system. Registries are assembled once
//! through [`ProjectionRegistryBuilder`] and are immutable afterwards, so maps
//! built from the same registry can never observe each other's changes.

use crate::{
    core::{constants::BOUNDS_KEY, geo::SurfaceSize},
    prelude::HashMap,
    MapError, Result,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Bounding box plus region paths for one named projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionDefinition {
    name: String,
    bounds: SurfaceSize,
    paths: BTreeMap<String, String>,
}

impl ProjectionDefinition {
    pub fn new(name: impl Into<String>, bounds: SurfaceSize) -> Self {
        Self {
            name: name.into(),
            bounds,
            paths: BTreeMap::new(),
        }
    }

    /// Add a region path, builder style
    pub fn with_path(mut self, key: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        self.insert_path(key, path)?;
        Ok(self)
    }

    /// Add or replace a region path. The bounds key is reserved.
    pub fn insert_path(&mut self, key: impl Into<String>, path: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key == BOUNDS_KEY {
            return Err(MapError::ReservedKey(key));
        }
        self.paths.insert(key, path.into());
        Ok(())
    }

    /// Build from a path table shaped like `{"bounds": [w, h], "<key>": "<svg path>", ...}`
    pub fn from_value(name: impl Into<String>, table: &Value) -> Result<Self> {
        let name = name.into();
        let object = table.as_object().ok_or_else(|| {
            MapError::InvalidProjection(format!("{name}: path table must be an object"))
        })?;

        let bounds = object
            .get(BOUNDS_KEY)
            .and_then(Value::as_array)
            .and_then(|pair| match pair.as_slice() {
                [w, h] => Some(SurfaceSize::new(w.as_f64()?, h.as_f64()?)),
                _ => None,
            })
            .ok_or_else(|| {
                MapError::InvalidProjection(format!("{name}: missing [width, height] bounds"))
            })?;

        let mut definition = Self::new(name, bounds);
        for (key, path) in object.iter().filter(|(key, _)| key.as_str() != BOUNDS_KEY) {
            let path = path.as_str().ok_or_else(|| {
                MapError::InvalidProjection(format!("{}: path '{key}' is not a string", definition.name))
            })?;
            definition.insert_path(key.as_str(), path)?;
        }

        Ok(definition)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> SurfaceSize {
        self.bounds
    }

    pub fn path(&self, key: &str) -> Option<&str> {
        self.paths.get(key).map(String::as_str)
    }

    /// Region paths in key order
    pub fn paths(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn path_keys(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Immutable lookup of projection definitions by identifier
#[derive(Debug, Default)]
pub struct ProjectionRegistry {
    definitions: HashMap<String, Arc<ProjectionDefinition>>,
}

impl ProjectionRegistry {
    pub fn builder() -> ProjectionRegistryBuilder {
        ProjectionRegistryBuilder::default()
    }

    /// Resolve a projection, failing when nothing is registered under `id`
    pub fn get(&self, id: &str) -> Result<Arc<ProjectionDefinition>> {
        self.definitions
            .get(id)
            .cloned()
            .ok_or_else(|| MapError::UnknownProjection(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ProjectionRegistryBuilder {
    definitions: HashMap<String, Arc<ProjectionDefinition>>,
}

impl ProjectionRegistryBuilder {
    /// Register a definition under its own name
    pub fn register(mut self, definition: ProjectionDefinition) -> Result<Self> {
        let id = definition.name().to_string();
        if self.definitions.contains_key(&id) {
            return Err(MapError::DuplicateProjection(id));
        }
        self.definitions.insert(id, Arc::new(definition));
        Ok(self)
    }

    pub fn build(self) -> ProjectionRegistry {
        ProjectionRegistry {
            definitions: self.definitions,
        }
    }
}
