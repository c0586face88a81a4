//! Provider-backed organization hierarchy queries.
//!
//! Parent, root, and descendant queries need sight of the whole
//! organization forest, so they run against the provider rather than a
//! single in-memory node. All queries here are gated at capability
//! level 1.

use crate::registry::{
    domain::{CapabilityLevel, ObjectKey, Organization, RegistryEntity},
    ports::{ProviderError, RegistryProvider},
};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by organization hierarchy queries.
#[derive(Debug, Clone, Error)]
pub enum HierarchyError {
    /// The provider failed at call level, or does not support hierarchy
    /// queries.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The organization named in the query does not exist.
    #[error("organization not found: {0}")]
    OrganizationNotFound(ObjectKey),

    /// An organization references a parent or child that is not in the
    /// registry.
    #[error("organization {referrer} references missing organization {missing}")]
    MissingOrganization {
        /// Key of the organization holding the dangling link.
        referrer: ObjectKey,
        /// Key the dangling link points at.
        missing: ObjectKey,
    },

    /// The parent chain of the organization contains a cycle.
    #[error("parent chain of organization {0} contains a cycle")]
    ParentCycle(ObjectKey),
}

/// Result type for organization hierarchy queries.
pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Read-side service answering organization hierarchy queries against a
/// registry provider.
#[derive(Clone)]
pub struct OrganizationQueryService<P>
where
    P: RegistryProvider,
{
    provider: Arc<P>,
}

impl<P> OrganizationQueryService<P>
where
    P: RegistryProvider,
{
    /// Creates a hierarchy query service.
    #[must_use]
    pub const fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Returns the parent of the organization with the given key.
    ///
    /// `None` when the organization has no parent.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::OrganizationNotFound`] when the key names
    /// no organization, [`HierarchyError::MissingOrganization`] when the
    /// parent link dangles, and [`HierarchyError::Provider`] when the
    /// provider fails or reports capability level 0.
    pub async fn parent_organization(
        &self,
        key: &ObjectKey,
    ) -> HierarchyResult<Option<Organization>> {
        self.ensure_level_one().await?;
        let organization = self.load(key).await?;
        let Some(parent_key) = organization.parent_organization() else {
            return Ok(None);
        };
        match self.provider.find_organization(&parent_key).await? {
            Some(parent) => Ok(Some(parent)),
            None => Err(HierarchyError::MissingOrganization {
                referrer: organization.key(),
                missing: parent_key,
            }),
        }
    }

    /// Returns the root ancestor of the organization with the given key,
    /// reached by following parent links until an organization without a
    /// parent.
    ///
    /// An organization without a parent reports no root rather than
    /// itself; this mirrors the documented registry contract even though
    /// a root accessor returning `None` for a root node is surprising.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::OrganizationNotFound`] when the key names
    /// no organization, [`HierarchyError::MissingOrganization`] when a
    /// parent link dangles, [`HierarchyError::ParentCycle`] when the
    /// parent chain loops, and [`HierarchyError::Provider`] when the
    /// provider fails or reports capability level 0.
    pub async fn root_organization(&self, key: &ObjectKey) -> HierarchyResult<Option<Organization>> {
        self.ensure_level_one().await?;
        let start = self.load(key).await?;
        let Some(first_parent) = start.parent_organization() else {
            return Ok(None);
        };
        let mut visited: HashSet<ObjectKey> = HashSet::new();
        visited.insert(start.key());
        let mut referrer = start.key();
        let mut parent_key = first_parent;
        loop {
            if !visited.insert(parent_key) {
                return Err(HierarchyError::ParentCycle(*key));
            }
            let Some(parent) = self.provider.find_organization(&parent_key).await? else {
                return Err(HierarchyError::MissingOrganization {
                    referrer,
                    missing: parent_key,
                });
            };
            match parent.parent_organization() {
                None => return Ok(Some(parent)),
                Some(next) => {
                    referrer = parent.key();
                    parent_key = next;
                }
            }
        }
    }

    /// Returns all descendants of the organization with the given key,
    /// breadth-first.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::OrganizationNotFound`] when the key names
    /// no organization, [`HierarchyError::MissingOrganization`] when a
    /// child link dangles, and [`HierarchyError::Provider`] when the
    /// provider fails or reports capability level 0.
    pub async fn descendant_organizations(
        &self,
        key: &ObjectKey,
    ) -> HierarchyResult<Vec<Organization>> {
        self.ensure_level_one().await?;
        let start = self.load(key).await?;
        let mut seen: HashSet<ObjectKey> = HashSet::new();
        seen.insert(start.key());
        let mut queue: VecDeque<(ObjectKey, ObjectKey)> = start
            .child_organization_keys()
            .iter()
            .map(|child| (start.key(), *child))
            .collect();
        let mut descendants = Vec::new();
        while let Some((referrer, child_key)) = queue.pop_front() {
            if !seen.insert(child_key) {
                continue;
            }
            let Some(child) = self.provider.find_organization(&child_key).await? else {
                return Err(HierarchyError::MissingOrganization {
                    referrer,
                    missing: child_key,
                });
            };
            queue.extend(
                child
                    .child_organization_keys()
                    .iter()
                    .map(|grandchild| (child_key, *grandchild)),
            );
            descendants.push(child);
        }
        Ok(descendants)
    }

    /// Returns the number of immediate children of the organization with
    /// the given key.
    ///
    /// # Errors
    ///
    /// Returns [`HierarchyError::OrganizationNotFound`] when the key names
    /// no organization, and [`HierarchyError::Provider`] when the provider
    /// fails or reports capability level 0.
    pub async fn child_organization_count(&self, key: &ObjectKey) -> HierarchyResult<usize> {
        self.ensure_level_one().await?;
        Ok(self.load(key).await?.child_organization_count())
    }

    /// Verifies the provider reports capability level 1.
    async fn ensure_level_one(&self) -> HierarchyResult<()> {
        let profile = self.provider.capability_profile().await?;
        if profile.supports(CapabilityLevel::Level1) {
            Ok(())
        } else {
            Err(HierarchyError::Provider(
                ProviderError::UnsupportedCapability {
                    required: CapabilityLevel::Level1,
                    reported: profile.capability_level(),
                },
            ))
        }
    }

    /// Loads an organization or fails with a not-found error.
    async fn load(&self, key: &ObjectKey) -> HierarchyResult<Organization> {
        self.provider
            .find_organization(key)
            .await?
            .ok_or(HierarchyError::OrganizationNotFound(*key))
    }
}
