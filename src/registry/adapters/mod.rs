//! Adapter implementations of the registry provider port.

pub mod memory;
