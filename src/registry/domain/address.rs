//! Postal address and telephone number value types.

use serde::{Deserialize, Serialize};

/// Structured postal address attached to an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    street_number: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state_or_province: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    address_type: Option<String>,
}

impl PostalAddress {
    /// Creates an empty postal address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the street number.
    #[must_use]
    pub fn with_street_number(mut self, street_number: impl Into<String>) -> Self {
        self.street_number = Some(street_number.into());
        self
    }

    /// Sets the street name.
    #[must_use]
    pub fn with_street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Sets the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Sets the state or province.
    #[must_use]
    pub fn with_state_or_province(mut self, state_or_province: impl Into<String>) -> Self {
        self.state_or_province = Some(state_or_province.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the address type (for example "office" or "billing").
    #[must_use]
    pub fn with_address_type(mut self, address_type: impl Into<String>) -> Self {
        self.address_type = Some(address_type.into());
        self
    }

    /// Returns the street number, if set.
    #[must_use]
    pub fn street_number(&self) -> Option<&str> {
        self.street_number.as_deref()
    }

    /// Returns the street name, if set.
    #[must_use]
    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    /// Returns the city, if set.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Returns the state or province, if set.
    #[must_use]
    pub fn state_or_province(&self) -> Option<&str> {
        self.state_or_province.as_deref()
    }

    /// Returns the postal code, if set.
    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    /// Returns the country, if set.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Returns the address type, if set.
    #[must_use]
    pub fn address_type(&self) -> Option<&str> {
        self.address_type.as_deref()
    }
}

/// Telephone number with an optional type discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelephoneNumber {
    number: String,
    phone_type: Option<String>,
}

impl TelephoneNumber {
    /// Creates a telephone number without a type.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            phone_type: None,
        }
    }

    /// Sets the phone type (for example "office" or "mobile").
    #[must_use]
    pub fn with_phone_type(mut self, phone_type: impl Into<String>) -> Self {
        self.phone_type = Some(phone_type.into());
        self
    }

    /// Returns the number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the phone type, if set.
    #[must_use]
    pub fn phone_type(&self) -> Option<&str> {
        self.phone_type.as_deref()
    }

    /// Returns whether this number matches the given type filter.
    ///
    /// A `None` filter matches every number; a `Some` filter matches only
    /// numbers carrying exactly that type.
    #[must_use]
    pub fn matches_type(&self, filter: Option<&str>) -> bool {
        filter.is_none_or(|wanted| self.phone_type.as_deref() == Some(wanted))
    }
}
