//! Taxonomy entities: concepts and classification schemes.

use super::entry::{RegistryEntity, RegistryEntry};
use super::error::RegistryDomainError;
use super::ids::ObjectKey;
use serde::{Deserialize, Serialize};

/// A taxonomy element within a classification scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    entry: RegistryEntry,
    value: Option<String>,
    classification_scheme: Option<ObjectKey>,
}

impl Concept {
    /// Creates a concept with a validated registry name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            entry: RegistryEntry::new(name)?,
            value: None,
            classification_scheme: None,
        })
    }

    /// Sets the taxonomy value of this concept.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the key of the owning classification scheme.
    #[must_use]
    pub const fn with_classification_scheme(mut self, scheme: ObjectKey) -> Self {
        self.classification_scheme = Some(scheme);
        self
    }

    /// Returns the taxonomy value, if set.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the key of the owning classification scheme, if set.
    #[must_use]
    pub const fn classification_scheme(&self) -> Option<ObjectKey> {
        self.classification_scheme
    }
}

impl RegistryEntity for Concept {
    fn entry(&self) -> &RegistryEntry {
        &self.entry
    }
}

/// A taxonomy under which concepts are classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationScheme {
    entry: RegistryEntry,
    external: bool,
}

impl ClassificationScheme {
    /// Creates an internal classification scheme with a validated registry
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            entry: RegistryEntry::new(name)?,
            external: false,
        })
    }

    /// Marks the scheme as external: its structure is maintained outside
    /// the registry and concepts referencing it are not validated against
    /// registry content.
    #[must_use]
    pub const fn with_external(mut self, external: bool) -> Self {
        self.external = external;
        self
    }

    /// Returns whether the scheme is external.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        self.external
    }
}

impl RegistryEntity for ClassificationScheme {
    fn entry(&self) -> &RegistryEntry {
        &self.entry
    }
}
