//! User entity affiliated with an organization.

use super::address::TelephoneNumber;
use super::entry::{RegistryEntity, RegistryEntry};
use super::error::RegistryDomainError;
use serde::{Deserialize, Serialize};

/// A user affiliated with an organization.
///
/// One user of an organization can be designated as its primary contact;
/// see [`super::Organization::set_primary_contact`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    entry: RegistryEntry,
    person_name: Option<String>,
    email: Option<String>,
    telephone_numbers: Vec<TelephoneNumber>,
}

impl User {
    /// Creates a user with a validated registry name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            entry: RegistryEntry::new(name)?,
            person_name: None,
            email: None,
            telephone_numbers: Vec::new(),
        })
    }

    /// Sets the formatted person name.
    #[must_use]
    pub fn with_person_name(mut self, person_name: impl Into<String>) -> Self {
        self.person_name = Some(person_name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Adds a telephone number.
    #[must_use]
    pub fn with_telephone_number(mut self, number: TelephoneNumber) -> Self {
        self.telephone_numbers.push(number);
        self
    }

    /// Returns the formatted person name, if set.
    #[must_use]
    pub fn person_name(&self) -> Option<&str> {
        self.person_name.as_deref()
    }

    /// Returns the email address, if set.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Replaces all telephone numbers of this user.
    pub fn set_telephone_numbers(&mut self, numbers: Vec<TelephoneNumber>) {
        self.telephone_numbers = numbers;
    }

    /// Returns the telephone numbers matching the given type filter.
    ///
    /// A `None` filter returns all numbers.
    #[must_use]
    pub fn telephone_numbers(&self, phone_type: Option<&str>) -> Vec<&TelephoneNumber> {
        self.telephone_numbers
            .iter()
            .filter(|number| number.matches_type(phone_type))
            .collect()
    }
}

impl RegistryEntity for User {
    fn entry(&self) -> &RegistryEntry {
        &self.entry
    }
}
