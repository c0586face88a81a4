//! Provider port for registry storage, lookup, and ownership tracking.
//!
//! Failures flow through two distinct channels. A [`ProviderError`] means
//! the provider itself could not process the call and aborts the whole
//! operation. An [`ItemRejection`] means one submitted item was refused
//! while the provider stayed healthy; bulk operations fold rejections into
//! the aggregate response and keep processing the remaining items.

use crate::registry::domain::{
    Association, CapabilityLevel, CapabilityProfile, ClassificationScheme, Concept, ObjectKey,
    Organization, PartyId, Service, ServiceBinding,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Outcome of one save or delete primitive: the key of the processed
/// object, or the rejection that kept it out of the registry.
pub type ItemOutcome = Result<ObjectKey, ItemRejection>;

/// Registry provider contract.
///
/// Every operation takes the submitting party explicitly; the provider
/// enforces and records object ownership per party. Saves have upsert
/// semantics: an object absent from the registry is created, an object
/// already present is replaced whole.
#[async_trait]
pub trait RegistryProvider: Send + Sync {
    /// Returns the immutable capability profile of this provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Internal`] when the provider cannot report
    /// its profile.
    async fn capability_profile(&self) -> ProviderResult<CapabilityProfile>;

    /// Saves an organization on behalf of the submitting party.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error; rejections of the submitted object surface in the
    /// [`ItemOutcome`].
    async fn save_organization(
        &self,
        organization: &Organization,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Saves a service on behalf of the submitting party.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn save_service(
        &self,
        service: &Service,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Saves a service binding on behalf of the submitting party.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn save_service_binding(
        &self,
        binding: &ServiceBinding,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Saves a concept on behalf of the submitting party.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn save_concept(
        &self,
        concept: &Concept,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Saves a classification scheme on behalf of the submitting party.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn save_classification_scheme(
        &self,
        scheme: &ClassificationScheme,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Saves an association on behalf of the submitting party.
    ///
    /// Providers reject associations whose source or target object is not
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn save_association(
        &self,
        association: &Association,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Deletes the organization with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error; an absent key or a key owned by another party surfaces in
    /// the [`ItemOutcome`].
    async fn delete_organization(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Deletes the service with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn delete_service(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Deletes the service binding with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn delete_service_binding(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Deletes the concept with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn delete_concept(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Deletes the classification scheme with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn delete_classification_scheme(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Deletes the association with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error.
    async fn delete_association(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Sets the confirmation state of the association with the given key.
    ///
    /// Unlike a full save, this write is authorized for any party owning
    /// an endpoint of the association, not only the party that submitted
    /// it: confirmation is the one mutation the non-submitting endpoint
    /// owner performs.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the provider encounters an internal
    /// error; an absent key or a submitter owning neither endpoint
    /// surfaces in the [`ItemOutcome`].
    async fn set_association_confirmation(
        &self,
        key: &ObjectKey,
        confirmed: bool,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome>;

    /// Finds an organization by key.
    ///
    /// Returns `None` when the organization does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Internal`] when the lookup fails.
    async fn find_organization(&self, key: &ObjectKey) -> ProviderResult<Option<Organization>>;

    /// Finds an association by key.
    ///
    /// Returns `None` when the association does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Internal`] when the lookup fails.
    async fn find_association(&self, key: &ObjectKey) -> ProviderResult<Option<Association>>;

    /// Returns all associations owned by the given party.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Internal`] when the lookup fails.
    async fn associations_owned_by(&self, owner: &PartyId) -> ProviderResult<Vec<Association>>;

    /// Returns the owner of the registry object with the given key,
    /// whatever its kind.
    ///
    /// Returns `None` when no object carries the key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Internal`] when the lookup fails.
    async fn object_owner(&self, key: &ObjectKey) -> ProviderResult<Option<PartyId>>;
}

/// Call-level errors returned by registry providers. These abort the whole
/// operation rather than a single item.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Provider-internal failure.
    #[error("registry provider internal error: {0}")]
    Internal(Arc<dyn std::error::Error + Send + Sync>),

    /// The operation is gated at a capability level the provider does not
    /// report.
    #[error("operation requires capability level {required}, provider reports level {reported}")]
    UnsupportedCapability {
        /// Level the operation requires.
        required: CapabilityLevel,
        /// Level the provider reports.
        reported: CapabilityLevel,
    },
}

impl ProviderError {
    /// Wraps a provider-internal error.
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Arc::new(err))
    }
}

/// Per-item rejections folded into a bulk response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemRejection {
    /// No object with the given key is present in the registry.
    #[error("object is not present in the registry")]
    NotFound,

    /// The object is owned by a party other than the submitter.
    #[error("object is owned by another party")]
    NotOwner,

    /// The registry refused the object.
    #[error("object rejected by the registry: {0}")]
    Invalid(String),
}
