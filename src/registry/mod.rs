//! Business registry access for Registrar.
//!
//! This module implements the business-level registry contract: a typed
//! information model, bulk life cycle operations with partial-commit
//! semantics, association confirmation, and provider-backed organization
//! hierarchy queries. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
