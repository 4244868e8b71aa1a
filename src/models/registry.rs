use std::collections::BTreeMap;

use super::definition::ModelDefinition;
use super::{log, person_metadata};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Model type already registered: {0}")]
    Duplicate(String),
}

/// Mapping from model-type key to its definition.
///
/// Built once at startup and shared read-only; `lookup` returning `None`
/// is an ordinary outcome used to refuse navigation.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    definitions: BTreeMap<&'static str, ModelDefinition>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The record types the dashboard ships with
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for definition in [person_metadata::definition(), log::definition()] {
            // keys are distinct literals
            let _ = registry.register(definition);
        }
        registry
    }

    pub fn register(&mut self, definition: ModelDefinition) -> Result<(), RegistryError> {
        if self.definitions.contains_key(definition.key) {
            return Err(RegistryError::Duplicate(definition.key.to_string()));
        }
        tracing::debug!("Registered model type '{}'", definition.key);
        self.definitions.insert(definition.key, definition);
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Option<&ModelDefinition> {
        self.definitions.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
