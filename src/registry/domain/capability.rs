//! Provider capability negotiation types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Capability level reported by a registry provider.
///
/// The level gates which optional operations a provider supports: level 0
/// covers the core life cycle operations, level 1 additionally covers the
/// organization hierarchy queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityLevel {
    /// Core business life cycle operations.
    Level0,
    /// Core operations plus organization hierarchy queries.
    Level1,
}

impl CapabilityLevel {
    /// Returns the numeric level value.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 1,
        }
    }
}

impl fmt::Display for CapabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Immutable capability descriptor of a registry provider.
///
/// The profile is queried once per provider connection and never mutated;
/// callers branch on [`CapabilityProfile::supports`] to decide whether an
/// optional operation is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    version: String,
    level: CapabilityLevel,
}

impl CapabilityProfile {
    /// Creates a capability profile.
    #[must_use]
    pub fn new(version: impl Into<String>, level: CapabilityLevel) -> Self {
        Self {
            version: version.into(),
            level,
        }
    }

    /// Returns the specification version implemented by the provider.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the capability level reported by the provider.
    #[must_use]
    pub const fn capability_level(&self) -> CapabilityLevel {
        self.level
    }

    /// Returns whether the provider supports operations gated at the given
    /// level.
    #[must_use]
    pub fn supports(&self, level: CapabilityLevel) -> bool {
        self.level >= level
    }
}
