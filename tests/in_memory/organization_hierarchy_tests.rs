//! Organization hierarchy query tests against the in-memory registry.

use crate::in_memory::helpers::{
    TestRegistry, caller, lifecycle_service, registry, runtime, save_organizations_fully,
};
use mockable::DefaultClock;
use registrar::registry::{
    adapters::memory::InMemoryRegistry,
    domain::{
        CapabilityLevel, CapabilityProfile, ObjectKey, Organization, PartyId, RegistryEntity,
    },
    ports::ProviderError,
    services::{HierarchyError, OrganizationQueryService},
};
use rstest::rstest;
use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Saves a three-level organization chain and returns it in root-first
/// order.
fn seed_chain(rt: &Runtime, registry: &Arc<TestRegistry>, caller: PartyId) -> [Organization; 3] {
    let service = lifecycle_service(registry, caller);
    let mut root = Organization::new("Root Holdings").expect("valid organization");
    let mut middle = Organization::new("Middle Division").expect("valid organization");
    let mut leaf = Organization::new("Leaf Branch").expect("valid organization");
    root.add_child_organization(&mut middle)
        .expect("attach should succeed");
    middle
        .add_child_organization(&mut leaf)
        .expect("attach should succeed");
    save_organizations_fully(
        rt,
        &service,
        &[root.clone(), middle.clone(), leaf.clone()],
    )
    .expect("seed save");
    [root, middle, leaf]
}

/// Tests parent and root resolution along a saved chain, including the
/// parentless-root contract.
#[rstest]
fn parent_and_root_follow_saved_links(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let [root, middle, leaf] = seed_chain(&rt, &registry, caller);
    let queries = OrganizationQueryService::new(Arc::clone(&registry));

    let parent = rt
        .block_on(queries.parent_organization(&leaf.key()))
        .expect("parent query");
    assert_eq!(parent, Some(middle));

    let found_root = rt
        .block_on(queries.root_organization(&leaf.key()))
        .expect("root query");
    assert_eq!(found_root, Some(root.clone()));

    // A parentless organization reports no root rather than itself.
    let no_root = rt
        .block_on(queries.root_organization(&root.key()))
        .expect("root query");
    assert_eq!(no_root, None);
}

/// Tests descendant traversal and child counting across the saved chain.
#[rstest]
fn descendants_and_child_counts(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let [root, middle, leaf] = seed_chain(&rt, &registry, caller);
    let queries = OrganizationQueryService::new(Arc::clone(&registry));

    let descendants = rt
        .block_on(queries.descendant_organizations(&root.key()))
        .expect("descendants query");
    let keys: HashSet<ObjectKey> = descendants.iter().map(RegistryEntity::key).collect();
    assert_eq!(keys, HashSet::from([middle.key(), leaf.key()]));

    let count = rt
        .block_on(queries.child_organization_count(&middle.key()))
        .expect("count query");
    assert_eq!(count, 1);
}

/// Tests that hierarchy queries on an unknown organization fail.
#[rstest]
fn queries_on_unknown_organizations_fail(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
) {
    let rt = runtime.expect("runtime creation");
    let queries = OrganizationQueryService::new(registry);
    let missing = ObjectKey::new();

    let result = rt.block_on(queries.descendant_organizations(&missing));

    assert!(matches!(
        result,
        Err(HierarchyError::OrganizationNotFound(key)) if key == missing
    ));
}

/// Tests that a level-0 provider rejects hierarchy queries while still
/// accepting life cycle calls.
#[rstest]
fn level_zero_providers_reject_hierarchy_queries(runtime: io::Result<Runtime>, caller: PartyId) {
    let rt = runtime.expect("runtime creation");
    let registry = Arc::new(
        InMemoryRegistry::new(Arc::new(DefaultClock))
            .with_profile(CapabilityProfile::new("1.0", CapabilityLevel::Level0)),
    );
    let service = lifecycle_service(&registry, caller);
    let organization = Organization::new("Acme Corp").expect("valid organization");
    save_organizations_fully(&rt, &service, std::slice::from_ref(&organization))
        .expect("level 0 providers still accept saves");
    let queries = OrganizationQueryService::new(registry);

    let result = rt.block_on(queries.parent_organization(&organization.key()));

    assert!(matches!(
        result,
        Err(HierarchyError::Provider(
            ProviderError::UnsupportedCapability {
                required: CapabilityLevel::Level1,
                reported: CapabilityLevel::Level0,
            }
        ))
    ));
}
