//! Common registry entry state composed into every registry entity.
//!
//! Instead of an inheritance chain rooted at a catch-all registry object
//! type, each entity composes a [`RegistryEntry`] value carrying the
//! identity and descriptive state shared by all registry objects, and
//! exposes it uniformly through the [`RegistryEntity`] capability trait.

use super::error::RegistryDomainError;
use super::ids::ObjectKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity and descriptive state shared by all registry objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    key: ObjectKey,
    name: String,
    description: Option<String>,
    #[serde(default)]
    slots: HashMap<String, serde_json::Value>,
}

impl RegistryEntry {
    /// Creates a registry entry with a fresh key and a validated name.
    ///
    /// The name is trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Self::with_key(ObjectKey::new(), name)
    }

    /// Creates a registry entry with an existing key and a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn with_key(key: ObjectKey, name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RegistryDomainError::EmptyName);
        }
        Ok(Self {
            key,
            name: trimmed.to_owned(),
            description: None,
            slots: HashMap::new(),
        })
    }

    /// Sets the human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an extension slot value under the given slot name.
    ///
    /// A slot already present under the same name is replaced.
    #[must_use]
    pub fn with_slot(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.slots.insert(name.into(), value);
        self
    }

    /// Returns the registry key.
    #[must_use]
    pub const fn key(&self) -> ObjectKey {
        self.key
    }

    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the extension slot value stored under the given name.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&serde_json::Value> {
        self.slots.get(name)
    }

    /// Returns all extension slots.
    #[must_use]
    pub const fn slots(&self) -> &HashMap<String, serde_json::Value> {
        &self.slots
    }
}

/// Capability trait for types that carry a [`RegistryEntry`].
pub trait RegistryEntity {
    /// Returns the registry entry of this entity.
    fn entry(&self) -> &RegistryEntry;

    /// Returns the registry key of this entity.
    fn key(&self) -> ObjectKey {
        self.entry().key()
    }

    /// Returns the name of this entity.
    fn name(&self) -> &str {
        self.entry().name()
    }

    /// Returns the description of this entity, if set.
    fn description(&self) -> Option<&str> {
        self.entry().description()
    }
}
