//! In-memory registry provider.

mod registry;

pub use registry::InMemoryRegistry;
