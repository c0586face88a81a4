//! Service and service binding entities.

use super::entry::{RegistryEntity, RegistryEntry};
use super::error::RegistryDomainError;
use super::ids::ObjectKey;
use serde::{Deserialize, Serialize};

/// A service offered by an organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    entry: RegistryEntry,
    organization: Option<ObjectKey>,
}

impl Service {
    /// Creates a service with a validated registry name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            entry: RegistryEntry::new(name)?,
            organization: None,
        })
    }

    /// Sets the key of the providing organization.
    #[must_use]
    pub const fn with_organization(mut self, organization: ObjectKey) -> Self {
        self.organization = Some(organization);
        self
    }

    /// Returns the key of the providing organization, if set.
    #[must_use]
    pub const fn organization(&self) -> Option<ObjectKey> {
        self.organization
    }
}

impl RegistryEntity for Service {
    fn entry(&self) -> &RegistryEntry {
        &self.entry
    }
}

/// A technical binding through which a service can be accessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBinding {
    entry: RegistryEntry,
    service: Option<ObjectKey>,
    access_uri: Option<String>,
}

impl ServiceBinding {
    /// Creates a service binding with a validated registry name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            entry: RegistryEntry::new(name)?,
            service: None,
            access_uri: None,
        })
    }

    /// Sets the key of the bound service.
    #[must_use]
    pub const fn with_service(mut self, service: ObjectKey) -> Self {
        self.service = Some(service);
        self
    }

    /// Sets the URI at which the service is accessed.
    #[must_use]
    pub fn with_access_uri(mut self, access_uri: impl Into<String>) -> Self {
        self.access_uri = Some(access_uri.into());
        self
    }

    /// Returns the key of the bound service, if set.
    #[must_use]
    pub const fn service(&self) -> Option<ObjectKey> {
        self.service
    }

    /// Returns the access URI, if set.
    #[must_use]
    pub fn access_uri(&self) -> Option<&str> {
        self.access_uri.as_deref()
    }
}

impl RegistryEntity for ServiceBinding {
    fn entry(&self) -> &RegistryEntry {
        &self.entry
    }
}
