//! Registrar: typed access to a business registry.
//!
//! This crate provides a strongly typed client-side contract for a business
//! registry: the information model (organizations, users, services,
//! concepts, classification schemes, and associations), the provider port
//! that registry backends implement, and the business-level life cycle
//! services that drive bulk save/delete and association confirmation
//! workflows against a provider.
//!
//! # Architecture
//!
//! Registrar follows hexagonal architecture principles:
//!
//! - **Domain**: Pure registry information model with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces implemented by registry providers
//! - **Adapters**: Concrete provider implementations (in-memory reference
//!   provider)
//!
//! # Modules
//!
//! - [`registry`]: Registry information model, provider port, and life
//!   cycle services

pub mod registry;
