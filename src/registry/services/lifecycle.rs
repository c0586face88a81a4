//! Business life cycle service: bulk save/delete operations and the
//! association confirmation workflow.

use crate::registry::{
    domain::{
        Association, CapabilityProfile, ClassificationScheme, Concept, ObjectKey, Organization,
        PartyId, RegistryEntity, Service, ServiceBinding,
    },
    ports::{ItemRejection, ProviderError, RegistryProvider},
    services::bulk::BulkResponse,
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for business life cycle operations.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    /// The provider failed at call level.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The association named in a confirmation call does not exist.
    #[error("association not found: {0}")]
    AssociationNotFound(ObjectKey),

    /// The caller owns neither endpoint of the association.
    #[error("party {caller} owns neither endpoint of association {association}")]
    NotAssociationOwner {
        /// The calling party.
        caller: PartyId,
        /// Key of the association the call named.
        association: ObjectKey,
    },

    /// The provider rejected the confirmation state write-back.
    #[error("association confirmation update was rejected: {0}")]
    AssociationRejected(ItemRejection),

    /// A caller-owned association could not be cleared while replacing
    /// the owned set.
    #[error("could not clear caller-owned association {key} during replace: {rejection}")]
    ReplaceFailed {
        /// Key of the stale association.
        key: ObjectKey,
        /// Rejection drawn by the clearing delete.
        rejection: ItemRejection,
    },
}

/// Result type for business life cycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Business-level life cycle facade over a registry provider.
///
/// The service carries the calling party as connection context; every
/// provider call is submitted on that party's behalf. Bulk operations
/// process their input sequentially and allow partial commits: a rejected
/// item is folded into the [`BulkResponse`] and processing continues,
/// while a provider-internal error aborts the whole call.
#[derive(Clone)]
pub struct BusinessLifecycleService<P>
where
    P: RegistryProvider,
{
    provider: Arc<P>,
    caller: PartyId,
}

impl<P> BusinessLifecycleService<P>
where
    P: RegistryProvider,
{
    /// Creates a life cycle service acting on behalf of the given party.
    #[must_use]
    pub const fn new(provider: Arc<P>, caller: PartyId) -> Self {
        Self { provider, caller }
    }

    /// Returns the calling party this service submits on behalf of.
    #[must_use]
    pub const fn caller(&self) -> PartyId {
        self.caller
    }

    /// Returns the capability profile of the underlying provider.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider cannot
    /// report its profile.
    pub async fn capability_profile(&self) -> LifecycleResult<CapabilityProfile> {
        Ok(self.provider.capability_profile().await?)
    }

    /// Saves the given organizations. Objects absent from the registry are
    /// created; objects already present are replaced whole.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level; per-item rejections surface in the response instead.
    pub async fn save_organizations(
        &self,
        organizations: &[Organization],
    ) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for organization in organizations {
            let outcome = self
                .provider
                .save_organization(organization, &self.caller)
                .await?;
            response.record(organization.key(), outcome);
        }
        Ok(response)
    }

    /// Saves the given services.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn save_services(&self, services: &[Service]) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for service in services {
            let outcome = self.provider.save_service(service, &self.caller).await?;
            response.record(service.key(), outcome);
        }
        Ok(response)
    }

    /// Saves the given service bindings.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn save_service_bindings(
        &self,
        bindings: &[ServiceBinding],
    ) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for binding in bindings {
            let outcome = self
                .provider
                .save_service_binding(binding, &self.caller)
                .await?;
            response.record(binding.key(), outcome);
        }
        Ok(response)
    }

    /// Saves the given concepts.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn save_concepts(&self, concepts: &[Concept]) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for concept in concepts {
            let outcome = self.provider.save_concept(concept, &self.caller).await?;
            response.record(concept.key(), outcome);
        }
        Ok(response)
    }

    /// Saves the given classification schemes.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn save_classification_schemes(
        &self,
        schemes: &[ClassificationScheme],
    ) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for scheme in schemes {
            let outcome = self
                .provider
                .save_classification_scheme(scheme, &self.caller)
                .await?;
            response.record(scheme.key(), outcome);
        }
        Ok(response)
    }

    /// Saves the given associations.
    ///
    /// With `replace` set, the caller's existing owned associations that
    /// are not among the submitted keys are deleted first, so that the
    /// caller's owned set afterwards equals the submitted set. Without
    /// `replace`, the submitted associations are merged additively and
    /// existing non-overlapping associations are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level, or [`LifecycleError::ReplaceFailed`] when a stale
    /// caller-owned association cannot be cleared during a replace.
    pub async fn save_associations(
        &self,
        associations: &[Association],
        replace: bool,
    ) -> LifecycleResult<BulkResponse> {
        if replace {
            self.clear_stale_associations(associations).await?;
        }
        let mut response = BulkResponse::new();
        for association in associations {
            let outcome = self
                .provider
                .save_association(association, &self.caller)
                .await?;
            response.record(association.key(), outcome);
        }
        Ok(response)
    }

    /// Deletes the organizations with the given keys.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level; per-item rejections surface in the response instead.
    pub async fn delete_organizations(&self, keys: &[ObjectKey]) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for key in keys {
            let outcome = self.provider.delete_organization(key, &self.caller).await?;
            response.record(*key, outcome);
        }
        Ok(response)
    }

    /// Deletes the services with the given keys.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn delete_services(&self, keys: &[ObjectKey]) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for key in keys {
            let outcome = self.provider.delete_service(key, &self.caller).await?;
            response.record(*key, outcome);
        }
        Ok(response)
    }

    /// Deletes the service bindings with the given keys.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn delete_service_bindings(
        &self,
        keys: &[ObjectKey],
    ) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for key in keys {
            let outcome = self
                .provider
                .delete_service_binding(key, &self.caller)
                .await?;
            response.record(*key, outcome);
        }
        Ok(response)
    }

    /// Deletes the concepts with the given keys.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn delete_concepts(&self, keys: &[ObjectKey]) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for key in keys {
            let outcome = self.provider.delete_concept(key, &self.caller).await?;
            response.record(*key, outcome);
        }
        Ok(response)
    }

    /// Deletes the classification schemes with the given keys.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn delete_classification_schemes(
        &self,
        keys: &[ObjectKey],
    ) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for key in keys {
            let outcome = self
                .provider
                .delete_classification_scheme(key, &self.caller)
                .await?;
            response.record(*key, outcome);
        }
        Ok(response)
    }

    /// Deletes the associations with the given keys.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Provider`] when the provider fails at
    /// call level.
    pub async fn delete_associations(&self, keys: &[ObjectKey]) -> LifecycleResult<BulkResponse> {
        let mut response = BulkResponse::new();
        for key in keys {
            let outcome = self.provider.delete_association(key, &self.caller).await?;
            response.record(*key, outcome);
        }
        Ok(response)
    }

    /// Confirms an association on behalf of the caller.
    ///
    /// Intramural associations (both endpoints owned by the same party)
    /// need no confirmation and the call returns without effect, as it
    /// does for an extramural association that is already confirmed.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AssociationNotFound`] when no association
    /// carries the key, [`LifecycleError::NotAssociationOwner`] when the
    /// caller owns neither endpoint, and [`LifecycleError::Provider`] when
    /// the provider fails at call level.
    pub async fn confirm_association(&self, key: &ObjectKey) -> LifecycleResult<()> {
        self.set_confirmation(key, true).await
    }

    /// Undoes a previous confirmation of an association on behalf of the
    /// caller.
    ///
    /// Intramural associations and extramural associations that are not
    /// confirmed are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::AssociationNotFound`] when no association
    /// carries the key, [`LifecycleError::NotAssociationOwner`] when the
    /// caller owns neither endpoint, and [`LifecycleError::Provider`] when
    /// the provider fails at call level.
    pub async fn unconfirm_association(&self, key: &ObjectKey) -> LifecycleResult<()> {
        self.set_confirmation(key, false).await
    }

    /// Deletes the caller's owned associations that are not among the
    /// submitted keys.
    async fn clear_stale_associations(&self, submitted: &[Association]) -> LifecycleResult<()> {
        let submitted_keys: HashSet<ObjectKey> =
            submitted.iter().map(RegistryEntity::key).collect();
        let owned = self.provider.associations_owned_by(&self.caller).await?;
        for stale in owned
            .iter()
            .filter(|association| !submitted_keys.contains(&association.key()))
        {
            let outcome = self
                .provider
                .delete_association(&stale.key(), &self.caller)
                .await?;
            if let Err(rejection) = outcome {
                return Err(LifecycleError::ReplaceFailed {
                    key: stale.key(),
                    rejection,
                });
            }
        }
        Ok(())
    }

    /// Loads an association and verifies the caller owns at least one
    /// endpoint.
    async fn load_owned_association(&self, key: &ObjectKey) -> LifecycleResult<Loaded> {
        let Some(association) = self.provider.find_association(key).await? else {
            return Err(LifecycleError::AssociationNotFound(*key));
        };
        let source_owner = self.provider.object_owner(&association.source()).await?;
        let target_owner = self.provider.object_owner(&association.target()).await?;
        let caller_owns =
            source_owner == Some(self.caller) || target_owner == Some(self.caller);
        if !caller_owns {
            return Err(LifecycleError::NotAssociationOwner {
                caller: self.caller,
                association: *key,
            });
        }
        let intramural = source_owner.is_some() && source_owner == target_owner;
        Ok(Loaded {
            association,
            intramural,
        })
    }

    /// Drives a confirmation-state change through the provider.
    ///
    /// The provider's confirmation write is authorized for either endpoint
    /// owner, so the non-submitting owner can confirm an association it
    /// did not save.
    async fn set_confirmation(&self, key: &ObjectKey, confirmed: bool) -> LifecycleResult<()> {
        let Loaded {
            association,
            intramural,
        } = self.load_owned_association(key).await?;
        if intramural || association.is_confirmed() == confirmed {
            return Ok(());
        }
        match self
            .provider
            .set_association_confirmation(key, confirmed, &self.caller)
            .await?
        {
            Ok(_) => Ok(()),
            Err(rejection) => Err(LifecycleError::AssociationRejected(rejection)),
        }
    }
}

/// An association loaded for a confirmation call, together with its
/// intramural/extramural classification.
struct Loaded {
    association: Association,
    intramural: bool,
}
