//! Thread-safe in-memory implementation of the registry provider port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::{
    domain::{
        Association, CapabilityLevel, CapabilityProfile, ClassificationScheme, Concept, ObjectKey,
        Organization, PartyId, RegistryEntity, Service, ServiceBinding,
    },
    ports::{ItemOutcome, ItemRejection, ProviderError, ProviderResult, RegistryProvider},
};

/// Specification version reported by the in-memory provider.
const SPECIFICATION_VERSION: &str = "1.0";

/// A stored registry object together with its ownership and audit state.
#[derive(Debug, Clone)]
struct StoredRecord<T> {
    object: T,
    owner: PartyId,
    stored_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct RegistryState {
    organizations: HashMap<ObjectKey, StoredRecord<Organization>>,
    services: HashMap<ObjectKey, StoredRecord<Service>>,
    bindings: HashMap<ObjectKey, StoredRecord<ServiceBinding>>,
    concepts: HashMap<ObjectKey, StoredRecord<Concept>>,
    schemes: HashMap<ObjectKey, StoredRecord<ClassificationScheme>>,
    associations: HashMap<ObjectKey, StoredRecord<Association>>,
}

impl RegistryState {
    /// Returns the owner of the object with the given key, across all
    /// entity kinds.
    fn owner_of(&self, key: &ObjectKey) -> Option<PartyId> {
        self.organizations
            .get(key)
            .map(|record| record.owner)
            .or_else(|| self.services.get(key).map(|record| record.owner))
            .or_else(|| self.bindings.get(key).map(|record| record.owner))
            .or_else(|| self.concepts.get(key).map(|record| record.owner))
            .or_else(|| self.schemes.get(key).map(|record| record.owner))
            .or_else(|| self.associations.get(key).map(|record| record.owner))
    }
}

/// Upserts an object into a record map.
///
/// An existing record owned by another party is rejected; otherwise the
/// object is replaced whole and the storage timestamp refreshed, keeping
/// the original owner.
fn upsert<T: Clone>(
    map: &mut HashMap<ObjectKey, StoredRecord<T>>,
    key: ObjectKey,
    object: &T,
    submitter: &PartyId,
    stored_at: DateTime<Utc>,
) -> ItemOutcome {
    let owner = match map.get(&key) {
        Some(record) if record.owner != *submitter => return Err(ItemRejection::NotOwner),
        Some(record) => record.owner,
        None => *submitter,
    };
    map.insert(
        key,
        StoredRecord {
            object: object.clone(),
            owner,
            stored_at,
        },
    );
    Ok(key)
}

/// Removes an object from a record map on behalf of the submitting party.
fn remove<T>(
    map: &mut HashMap<ObjectKey, StoredRecord<T>>,
    key: &ObjectKey,
    submitter: &PartyId,
) -> ItemOutcome {
    match map.get(key) {
        None => Err(ItemRejection::NotFound),
        Some(record) if record.owner != *submitter => Err(ItemRejection::NotOwner),
        Some(_) => {
            map.remove(key);
            Ok(*key)
        }
    }
}

/// Thread-safe in-memory registry provider.
///
/// Serves as the reference provider implementation and as the backing for
/// the test suites. Ownership is recorded per object at first save and
/// enforced on replacement and deletion.
#[derive(Debug)]
pub struct InMemoryRegistry<C> {
    state: Arc<RwLock<RegistryState>>,
    clock: Arc<C>,
    profile: CapabilityProfile,
}

impl<C> Clone for InMemoryRegistry<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
            profile: self.profile.clone(),
        }
    }
}

impl<C> InMemoryRegistry<C> {
    /// Creates an empty in-memory registry reporting capability level 1.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(RegistryState::default())),
            clock,
            profile: CapabilityProfile::new(SPECIFICATION_VERSION, CapabilityLevel::Level1),
        }
    }

    /// Overrides the capability profile reported by this provider.
    #[must_use]
    pub fn with_profile(mut self, profile: CapabilityProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Returns when the object with the given key was last stored, across
    /// all entity kinds.
    ///
    /// Returns `None` when no object carries the key.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Internal`] when the lookup fails.
    pub fn stored_at(&self, key: &ObjectKey) -> ProviderResult<Option<DateTime<Utc>>> {
        let state = self.read_state()?;
        let stored_at = state
            .organizations
            .get(key)
            .map(|record| record.stored_at)
            .or_else(|| state.services.get(key).map(|record| record.stored_at))
            .or_else(|| state.bindings.get(key).map(|record| record.stored_at))
            .or_else(|| state.concepts.get(key).map(|record| record.stored_at))
            .or_else(|| state.schemes.get(key).map(|record| record.stored_at))
            .or_else(|| state.associations.get(key).map(|record| record.stored_at));
        Ok(stored_at)
    }

    fn read_state(&self) -> ProviderResult<RwLockReadGuard<'_, RegistryState>> {
        self.state
            .read()
            .map_err(|err| ProviderError::internal(io::Error::other(err.to_string())))
    }

    fn write_state(&self) -> ProviderResult<RwLockWriteGuard<'_, RegistryState>> {
        self.state
            .write()
            .map_err(|err| ProviderError::internal(io::Error::other(err.to_string())))
    }
}

impl<C: Clock> InMemoryRegistry<C> {
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

#[async_trait]
impl<C: Clock + Send + Sync> RegistryProvider for InMemoryRegistry<C> {
    async fn capability_profile(&self) -> ProviderResult<CapabilityProfile> {
        Ok(self.profile.clone())
    }

    async fn save_organization(
        &self,
        organization: &Organization,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let stored_at = self.now();
        let mut state = self.write_state()?;
        Ok(upsert(
            &mut state.organizations,
            organization.key(),
            organization,
            submitter,
            stored_at,
        ))
    }

    async fn save_service(
        &self,
        service: &Service,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let stored_at = self.now();
        let mut state = self.write_state()?;
        Ok(upsert(
            &mut state.services,
            service.key(),
            service,
            submitter,
            stored_at,
        ))
    }

    async fn save_service_binding(
        &self,
        binding: &ServiceBinding,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let stored_at = self.now();
        let mut state = self.write_state()?;
        Ok(upsert(
            &mut state.bindings,
            binding.key(),
            binding,
            submitter,
            stored_at,
        ))
    }

    async fn save_concept(
        &self,
        concept: &Concept,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let stored_at = self.now();
        let mut state = self.write_state()?;
        Ok(upsert(
            &mut state.concepts,
            concept.key(),
            concept,
            submitter,
            stored_at,
        ))
    }

    async fn save_classification_scheme(
        &self,
        scheme: &ClassificationScheme,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let stored_at = self.now();
        let mut state = self.write_state()?;
        Ok(upsert(
            &mut state.schemes,
            scheme.key(),
            scheme,
            submitter,
            stored_at,
        ))
    }

    async fn save_association(
        &self,
        association: &Association,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let stored_at = self.now();
        let mut state = self.write_state()?;
        if state.owner_of(&association.source()).is_none() {
            return Ok(Err(ItemRejection::Invalid(format!(
                "source object {} is not registered",
                association.source()
            ))));
        }
        if state.owner_of(&association.target()).is_none() {
            return Ok(Err(ItemRejection::Invalid(format!(
                "target object {} is not registered",
                association.target()
            ))));
        }
        Ok(upsert(
            &mut state.associations,
            association.key(),
            association,
            submitter,
            stored_at,
        ))
    }

    async fn delete_organization(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let mut state = self.write_state()?;
        Ok(remove(&mut state.organizations, key, submitter))
    }

    async fn delete_service(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let mut state = self.write_state()?;
        Ok(remove(&mut state.services, key, submitter))
    }

    async fn delete_service_binding(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let mut state = self.write_state()?;
        Ok(remove(&mut state.bindings, key, submitter))
    }

    async fn delete_concept(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let mut state = self.write_state()?;
        Ok(remove(&mut state.concepts, key, submitter))
    }

    async fn delete_classification_scheme(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let mut state = self.write_state()?;
        Ok(remove(&mut state.schemes, key, submitter))
    }

    async fn delete_association(
        &self,
        key: &ObjectKey,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let mut state = self.write_state()?;
        Ok(remove(&mut state.associations, key, submitter))
    }

    async fn set_association_confirmation(
        &self,
        key: &ObjectKey,
        confirmed: bool,
        submitter: &PartyId,
    ) -> ProviderResult<ItemOutcome> {
        let stored_at = self.now();
        let mut state = self.write_state()?;
        let Some(record) = state.associations.get(key) else {
            return Ok(Err(ItemRejection::NotFound));
        };
        let source = record.object.source();
        let target = record.object.target();
        let submitter_owns_endpoint = state.owner_of(&source) == Some(*submitter)
            || state.owner_of(&target) == Some(*submitter);
        if !submitter_owns_endpoint {
            return Ok(Err(ItemRejection::NotOwner));
        }
        let Some(stored) = state.associations.get_mut(key) else {
            return Ok(Err(ItemRejection::NotFound));
        };
        if confirmed {
            stored.object.confirm();
        } else {
            stored.object.unconfirm();
        }
        stored.stored_at = stored_at;
        Ok(Ok(*key))
    }

    async fn find_organization(&self, key: &ObjectKey) -> ProviderResult<Option<Organization>> {
        let state = self.read_state()?;
        Ok(state
            .organizations
            .get(key)
            .map(|record| record.object.clone()))
    }

    async fn find_association(&self, key: &ObjectKey) -> ProviderResult<Option<Association>> {
        let state = self.read_state()?;
        Ok(state
            .associations
            .get(key)
            .map(|record| record.object.clone()))
    }

    async fn associations_owned_by(&self, owner: &PartyId) -> ProviderResult<Vec<Association>> {
        let state = self.read_state()?;
        Ok(state
            .associations
            .values()
            .filter(|record| record.owner == *owner)
            .map(|record| record.object.clone())
            .collect())
    }

    async fn object_owner(&self, key: &ObjectKey) -> ProviderResult<Option<PartyId>> {
        let state = self.read_state()?;
        Ok(state.owner_of(key))
    }
}
