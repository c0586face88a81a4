//! Domain model for business registry access.
//!
//! The registry domain models the information model of a business registry:
//! keyed registry entries, organizations with users, services, and a
//! parent/child hierarchy, taxonomy entities, and associations between
//! registry objects, while keeping all provider concerns outside of the
//! domain boundary.

mod address;
mod association;
mod capability;
mod concept;
mod entry;
mod error;
mod ids;
mod organization;
mod service;
mod user;

pub use address::{PostalAddress, TelephoneNumber};
pub use association::{Association, AssociationType};
pub use capability::{CapabilityLevel, CapabilityProfile};
pub use concept::{ClassificationScheme, Concept};
pub use entry::{RegistryEntity, RegistryEntry};
pub use error::{ParseAssociationTypeError, RegistryDomainError};
pub use ids::{ObjectKey, PartyId};
pub use organization::Organization;
pub use service::{Service, ServiceBinding};
pub use user::User;
