//! Orchestration services for business-level registry operations.

mod bulk;
mod hierarchy;
mod lifecycle;

pub use bulk::{BulkFailure, BulkResponse};
pub use hierarchy::{HierarchyError, HierarchyResult, OrganizationQueryService};
pub use lifecycle::{BusinessLifecycleService, LifecycleError, LifecycleResult};
