//! Port contracts implemented by registry providers.

pub mod provider;

pub use provider::{ItemOutcome, ItemRejection, ProviderError, ProviderResult, RegistryProvider};
