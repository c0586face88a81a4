//! Shared test helpers for in-memory registry integration tests.

use mockable::DefaultClock;
use registrar::registry::{
    adapters::memory::InMemoryRegistry,
    domain::{Organization, PartyId, RegistryEntity},
    services::BusinessLifecycleService,
};
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// In-memory provider type used throughout the integration tests.
pub type TestRegistry = InMemoryRegistry<DefaultClock>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh in-memory registry for each test.
#[fixture]
pub fn registry() -> Arc<TestRegistry> {
    Arc::new(InMemoryRegistry::new(Arc::new(DefaultClock)))
}

/// Provides a calling party identity for tests.
#[fixture]
pub fn caller() -> PartyId {
    PartyId::new()
}

/// Builds a life cycle service over the given registry for the given
/// party.
pub fn lifecycle_service(
    registry: &Arc<TestRegistry>,
    caller: PartyId,
) -> BusinessLifecycleService<TestRegistry> {
    BusinessLifecycleService::new(Arc::clone(registry), caller)
}

/// Saves the given organizations and asserts the whole batch committed.
///
/// # Errors
///
/// Returns an error if the bulk save fails at call level or if any
/// submitted organization drew a per-item rejection.
pub fn save_organizations_fully(
    rt: &Runtime,
    service: &BusinessLifecycleService<TestRegistry>,
    organizations: &[Organization],
) -> eyre::Result<()> {
    let response = rt.block_on(service.save_organizations(organizations))?;
    eyre::ensure!(
        response.is_fully_successful(),
        "expected every organization to commit, got failures: {:?}",
        response.failures()
    );
    eyre::ensure!(
        response.successes().len() == organizations.len(),
        "expected {} successes, got {}",
        organizations.len(),
        response.successes().len()
    );
    for organization in organizations {
        eyre::ensure!(
            response.successes().contains(&organization.key()),
            "organization {} missing from successes",
            organization.key()
        );
    }
    Ok(())
}
