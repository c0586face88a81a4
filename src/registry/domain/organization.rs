//! Organization aggregate: users, services, contact details, and
//! hierarchy links.

use super::address::{PostalAddress, TelephoneNumber};
use super::entry::{RegistryEntity, RegistryEntry};
use super::error::RegistryDomainError;
use super::ids::ObjectKey;
use super::service::Service;
use super::user::User;
use serde::{Deserialize, Serialize};

/// An organization registered in the registry.
///
/// An organization owns its affiliated users and services, designates one
/// user as its primary contact, and participates in a tree of
/// organizations: the parent owns the collection of child keys while each
/// child carries a non-owning back-reference to its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    entry: RegistryEntry,
    postal_address: Option<PostalAddress>,
    telephone_numbers: Vec<TelephoneNumber>,
    primary_contact: Option<ObjectKey>,
    users: Vec<User>,
    services: Vec<Service>,
    parent: Option<ObjectKey>,
    child_keys: Vec<ObjectKey>,
}

impl Organization {
    /// Creates an organization with a validated registry name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            entry: RegistryEntry::new(name)?,
            postal_address: None,
            telephone_numbers: Vec::new(),
            primary_contact: None,
            users: Vec::new(),
            services: Vec::new(),
            parent: None,
            child_keys: Vec::new(),
        })
    }

    /// Sets the description on the underlying registry entry.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.entry = self.entry.with_description(description);
        self
    }

    /// Returns the postal address, if set.
    #[must_use]
    pub const fn postal_address(&self) -> Option<&PostalAddress> {
        self.postal_address.as_ref()
    }

    /// Sets the postal address.
    pub fn set_postal_address(&mut self, address: PostalAddress) {
        self.postal_address = Some(address);
    }

    /// Replaces all organization-level telephone numbers.
    pub fn set_telephone_numbers(&mut self, numbers: Vec<TelephoneNumber>) {
        self.telephone_numbers = numbers;
    }

    /// Returns the organization-level telephone numbers matching the given
    /// type filter.
    ///
    /// A `None` filter returns all numbers.
    #[must_use]
    pub fn telephone_numbers(&self, phone_type: Option<&str>) -> Vec<&TelephoneNumber> {
        self.telephone_numbers
            .iter()
            .filter(|number| number.matches_type(phone_type))
            .collect()
    }

    /// Returns the affiliated users. One of them may be designated as the
    /// primary contact. The slice may be empty but never contains two
    /// users with the same key.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Adds an affiliated user.
    ///
    /// A user already present under the same key is replaced rather than
    /// duplicated.
    pub fn add_user(&mut self, user: User) {
        match self.users.iter().position(|existing| existing.key() == user.key()) {
            Some(index) => {
                if let Some(slot) = self.users.get_mut(index) {
                    *slot = user;
                }
            }
            None => self.users.push(user),
        }
    }

    /// Adds a collection of users, element-wise.
    pub fn add_users(&mut self, users: impl IntoIterator<Item = User>) {
        for user in users {
            self.add_user(user);
        }
    }

    /// Removes the user with the given key.
    ///
    /// Returns the removed user, or `None` when no user carries the key.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::PrimaryContactRemoval`] when the key
    /// designates the current primary contact; the designation must be
    /// moved to another user first.
    pub fn remove_user(&mut self, key: &ObjectKey) -> Result<Option<User>, RegistryDomainError> {
        if self.primary_contact.as_ref() == Some(key) {
            return Err(RegistryDomainError::PrimaryContactRemoval(*key));
        }
        let removed = self
            .users
            .iter()
            .position(|user| user.key() == *key)
            .map(|index| self.users.remove(index));
        Ok(removed)
    }

    /// Removes a collection of users by key.
    ///
    /// Returns the removed users. Keys not present are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::PrimaryContactRemoval`] when any key
    /// designates the current primary contact; in that case no user is
    /// removed.
    pub fn remove_users(&mut self, keys: &[ObjectKey]) -> Result<Vec<User>, RegistryDomainError> {
        if let Some(contact) = self.primary_contact {
            if keys.contains(&contact) {
                return Err(RegistryDomainError::PrimaryContactRemoval(contact));
            }
        }
        let mut removed = Vec::new();
        for key in keys {
            if let Some(user) = self.remove_user(key)? {
                removed.push(user);
            }
        }
        Ok(removed)
    }

    /// Designates the primary contact of this organization.
    ///
    /// If the user is not yet a member of the user set it is added; if it
    /// is already a member no duplicate entry is created. Once
    /// established, the primary contact is always a member of the user
    /// set.
    pub fn set_primary_contact(&mut self, user: User) {
        let key = user.key();
        if !self.users.iter().any(|existing| existing.key() == key) {
            self.users.push(user);
        }
        self.primary_contact = Some(key);
    }

    /// Returns the primary contact, resolved from the user set.
    ///
    /// `None` until a primary contact has been established.
    #[must_use]
    pub fn primary_contact(&self) -> Option<&User> {
        let key = self.primary_contact?;
        self.users.iter().find(|user| user.key() == key)
    }

    /// Returns the child services of this organization.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Adds a child service.
    ///
    /// A service already present under the same key is replaced rather
    /// than duplicated.
    pub fn add_service(&mut self, service: Service) {
        match self
            .services
            .iter()
            .position(|existing| existing.key() == service.key())
        {
            Some(index) => {
                if let Some(slot) = self.services.get_mut(index) {
                    *slot = service;
                }
            }
            None => self.services.push(service),
        }
    }

    /// Adds a collection of services, element-wise.
    pub fn add_services(&mut self, services: impl IntoIterator<Item = Service>) {
        for service in services {
            self.add_service(service);
        }
    }

    /// Removes the service with the given key.
    ///
    /// Returns the removed service, or `None` when no service carries the
    /// key.
    pub fn remove_service(&mut self, key: &ObjectKey) -> Option<Service> {
        self.services
            .iter()
            .position(|service| service.key() == *key)
            .map(|index| self.services.remove(index))
    }

    /// Removes a collection of services by key.
    ///
    /// Returns the removed services. Keys not present are skipped.
    pub fn remove_services(&mut self, keys: &[ObjectKey]) -> Vec<Service> {
        keys.iter()
            .filter_map(|key| self.remove_service(key))
            .collect()
    }

    /// Returns the key of the parent organization.
    ///
    /// `None` when this organization has no parent.
    #[must_use]
    pub const fn parent_organization(&self) -> Option<ObjectKey> {
        self.parent
    }

    /// Returns the keys of the immediate child organizations.
    #[must_use]
    pub fn child_organization_keys(&self) -> &[ObjectKey] {
        &self.child_keys
    }

    /// Returns the number of immediate child organizations.
    #[must_use]
    pub const fn child_organization_count(&self) -> usize {
        self.child_keys.len()
    }

    /// Attaches a child organization, wiring both sides of the link.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::SelfParent`] when the child is this
    /// organization itself, or [`RegistryDomainError::ChildAlreadyAttached`]
    /// when the child already has a parent (including this one).
    pub fn add_child_organization(
        &mut self,
        child: &mut Organization,
    ) -> Result<(), RegistryDomainError> {
        if child.key() == self.key() {
            return Err(RegistryDomainError::SelfParent(self.key()));
        }
        if let Some(parent) = child.parent {
            return Err(RegistryDomainError::ChildAlreadyAttached {
                child: child.key(),
                parent,
            });
        }
        child.parent = Some(self.key());
        self.child_keys.push(child.key());
        Ok(())
    }

    /// Attaches a collection of child organizations, element-wise.
    ///
    /// # Errors
    ///
    /// Returns the first error from
    /// [`Organization::add_child_organization`]; children attached before
    /// the failing element stay attached.
    pub fn add_child_organizations<'a>(
        &mut self,
        children: impl IntoIterator<Item = &'a mut Organization>,
    ) -> Result<(), RegistryDomainError> {
        for child in children {
            self.add_child_organization(child)?;
        }
        Ok(())
    }

    /// Detaches a child organization, unwiring both sides of the link.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::NotAChild`] when the organization is
    /// not attached to this parent.
    pub fn remove_child_organization(
        &mut self,
        child: &mut Organization,
    ) -> Result<(), RegistryDomainError> {
        if child.parent != Some(self.key()) {
            return Err(RegistryDomainError::NotAChild {
                child: child.key(),
                parent: self.key(),
            });
        }
        child.parent = None;
        self.child_keys.retain(|key| *key != child.key());
        Ok(())
    }

    /// Detaches a collection of child organizations, element-wise.
    ///
    /// # Errors
    ///
    /// Returns the first error from
    /// [`Organization::remove_child_organization`]; children detached
    /// before the failing element stay detached.
    pub fn remove_child_organizations<'a>(
        &mut self,
        children: impl IntoIterator<Item = &'a mut Organization>,
    ) -> Result<(), RegistryDomainError> {
        for child in children {
            self.remove_child_organization(child)?;
        }
        Ok(())
    }
}

impl RegistryEntity for Organization {
    fn entry(&self) -> &RegistryEntry {
        &self.entry
    }
}
