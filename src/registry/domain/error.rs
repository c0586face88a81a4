//! Error types for registry domain validation.

use super::ids::ObjectKey;
use thiserror::Error;

/// Errors returned while constructing or editing registry domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryDomainError {
    /// The registry entry name is empty after trimming.
    #[error("registry entry name must not be empty")]
    EmptyName,

    /// The user is the designated primary contact and cannot be removed.
    #[error("user {0} is the primary contact and cannot be removed")]
    PrimaryContactRemoval(ObjectKey),

    /// An organization cannot be its own parent.
    #[error("organization {0} cannot be attached as its own child")]
    SelfParent(ObjectKey),

    /// The child organization is already attached to a parent.
    #[error("organization {child} is already attached to parent {parent}")]
    ChildAlreadyAttached {
        /// Key of the child organization being attached.
        child: ObjectKey,
        /// Key of the parent the child is currently attached to.
        parent: ObjectKey,
    },

    /// The organization is not a child of the parent it is being detached
    /// from.
    #[error("organization {child} is not a child of organization {parent}")]
    NotAChild {
        /// Key of the organization being detached.
        child: ObjectKey,
        /// Key of the organization the detach was requested on.
        parent: ObjectKey,
    },
}

/// Error returned while parsing association types from their canonical
/// string form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown association type: {0}")]
pub struct ParseAssociationTypeError(pub String);
