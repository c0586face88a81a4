//! Associations between registry objects.

use super::entry::{RegistryEntity, RegistryEntry};
use super::error::{ParseAssociationTypeError, RegistryDomainError};
use super::ids::ObjectKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical association types between registry objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationType {
    /// The source object is related to the target object.
    RelatedTo,
    /// The source object has the target object as a child.
    HasChild,
    /// The source object has the target object as a parent.
    HasParent,
    /// The source object has the target object as a member.
    HasMember,
    /// The source object contains the target object.
    Contains,
    /// The source object is equivalent to the target object.
    EquivalentTo,
    /// The source object supersedes the target object.
    Supersedes,
    /// The source object uses the target object.
    Uses,
    /// The source object replaces the target object.
    Replaces,
}

impl AssociationType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RelatedTo => "related_to",
            Self::HasChild => "has_child",
            Self::HasParent => "has_parent",
            Self::HasMember => "has_member",
            Self::Contains => "contains",
            Self::EquivalentTo => "equivalent_to",
            Self::Supersedes => "supersedes",
            Self::Uses => "uses",
            Self::Replaces => "replaces",
        }
    }
}

impl TryFrom<&str> for AssociationType {
    type Error = ParseAssociationTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "related_to" => Ok(Self::RelatedTo),
            "has_child" => Ok(Self::HasChild),
            "has_parent" => Ok(Self::HasParent),
            "has_member" => Ok(Self::HasMember),
            "contains" => Ok(Self::Contains),
            "equivalent_to" => Ok(Self::EquivalentTo),
            "supersedes" => Ok(Self::Supersedes),
            "uses" => Ok(Self::Uses),
            "replaces" => Ok(Self::Replaces),
            _ => Err(ParseAssociationTypeError(value.to_owned())),
        }
    }
}

impl fmt::Display for AssociationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, directed link between two registry objects.
///
/// Whether an association is intramural (both endpoints owned by the same
/// party) or extramural (endpoints owned by different parties) is a
/// property of the endpoint owners and is decided by the provider, not
/// stored here. Only extramural associations carry a meaningful
/// confirmation state; intramural associations need no confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    entry: RegistryEntry,
    source: ObjectKey,
    target: ObjectKey,
    association_type: AssociationType,
    confirmed: bool,
}

impl Association {
    /// Creates an unconfirmed association between two registry objects.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryDomainError::EmptyName`] when the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        source: ObjectKey,
        target: ObjectKey,
        association_type: AssociationType,
    ) -> Result<Self, RegistryDomainError> {
        Ok(Self {
            entry: RegistryEntry::new(name)?,
            source,
            target,
            association_type,
            confirmed: false,
        })
    }

    /// Returns the key of the source object.
    #[must_use]
    pub const fn source(&self) -> ObjectKey {
        self.source
    }

    /// Returns the key of the target object.
    #[must_use]
    pub const fn target(&self) -> ObjectKey {
        self.target
    }

    /// Returns the association type.
    #[must_use]
    pub const fn association_type(&self) -> AssociationType {
        self.association_type
    }

    /// Returns whether the association has been confirmed.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Marks the association as confirmed. Idempotent.
    pub const fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Clears the confirmation state. Idempotent.
    pub const fn unconfirm(&mut self) {
        self.confirmed = false;
    }
}

impl RegistryEntity for Association {
    fn entry(&self) -> &RegistryEntry {
        &self.entry
    }
}
