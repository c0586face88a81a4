//! Bulk save and delete tests against the in-memory registry.
//!
//! Exercises partial commits, ownership checks, and whole-batch
//! replacement through the public life cycle facade.

use crate::in_memory::helpers::{
    TestRegistry, caller, lifecycle_service, registry, runtime, save_organizations_fully,
};
use registrar::registry::{
    domain::{
        Association, AssociationType, CapabilityLevel, Concept, ObjectKey, Organization, PartyId,
        RegistryEntity, Service,
    },
    ports::{ItemRejection, RegistryProvider},
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Tests that a bulk save commits every valid item and a later lookup
/// returns the saved state.
#[rstest]
fn bulk_save_commits_and_round_trips(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);
    let organizations = vec![
        Organization::new("Acme Corp").expect("valid organization"),
        Organization::new("Globex").expect("valid organization"),
    ];

    save_organizations_fully(&rt, &service, &organizations).expect("bulk save");

    for organization in &organizations {
        let found = rt
            .block_on(registry.find_organization(&organization.key()))
            .expect("lookup");
        assert_eq!(found.as_ref(), Some(organization));
    }
}

/// Tests that one rejected item does not keep the rest of the batch from
/// committing.
#[rstest]
fn rejected_item_does_not_abort_the_batch(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);
    let organization = Organization::new("Acme Corp").expect("valid organization");
    save_organizations_fully(&rt, &service, std::slice::from_ref(&organization))
        .expect("seed save");

    let dangling = Association::new(
        "dangling",
        organization.key(),
        ObjectKey::new(),
        AssociationType::RelatedTo,
    )
    .expect("valid association");
    let valid = Association::new(
        "valid",
        organization.key(),
        organization.key(),
        AssociationType::RelatedTo,
    )
    .expect("valid association");

    let response = rt
        .block_on(service.save_associations(&[dangling.clone(), valid.clone()], false))
        .expect("bulk save");

    assert_eq!(response.successes(), &[valid.key()]);
    assert_eq!(response.failures().len(), 1);
    let failure = response.failures().first().expect("one failure");
    assert_eq!(failure.key(), dangling.key());
    assert!(
        matches!(failure.rejection(), ItemRejection::Invalid(_)),
        "dangling endpoints should draw an invalid rejection"
    );
    let found = rt
        .block_on(registry.find_association(&valid.key()))
        .expect("lookup");
    assert_eq!(found, Some(valid));
}

/// Tests that deleting a saved object removes it and that the key then
/// draws a not-found rejection.
#[rstest]
fn delete_removes_and_reports_missing_keys(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);
    let organization = Organization::new("Acme Corp").expect("valid organization");
    save_organizations_fully(&rt, &service, std::slice::from_ref(&organization))
        .expect("seed save");

    let first = rt
        .block_on(service.delete_organizations(&[organization.key()]))
        .expect("first delete");
    assert!(first.is_fully_successful());
    assert!(
        rt.block_on(registry.find_organization(&organization.key()))
            .expect("lookup")
            .is_none()
    );

    let second = rt
        .block_on(service.delete_organizations(&[organization.key()]))
        .expect("second delete");
    let failure = second.failures().first().expect("one failure");
    assert_eq!(failure.rejection(), &ItemRejection::NotFound);
}

/// Tests that one party cannot save over or delete another party's
/// objects.
#[rstest]
fn objects_are_guarded_by_owner(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let owner_service = lifecycle_service(&registry, caller);
    let intruder_service = lifecycle_service(&registry, PartyId::new());
    let service = Service::new("Quote Service").expect("valid service");
    let seed = rt
        .block_on(owner_service.save_services(std::slice::from_ref(&service)))
        .expect("seed save");
    assert!(seed.is_fully_successful());

    let overwrite = rt
        .block_on(intruder_service.save_services(std::slice::from_ref(&service)))
        .expect("overwrite call");
    let failure = overwrite.failures().first().expect("one failure");
    assert_eq!(failure.rejection(), &ItemRejection::NotOwner);

    let delete = rt
        .block_on(intruder_service.delete_services(&[service.key()]))
        .expect("delete call");
    let failure = delete.failures().first().expect("one failure");
    assert_eq!(failure.rejection(), &ItemRejection::NotOwner);
}

/// Tests the `replace` flag on association saves: the caller's owned set
/// afterwards equals the submitted set, and other parties' associations
/// are untouched.
#[rstest]
fn replace_swaps_only_the_callers_owned_set(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);
    let bystander = PartyId::new();
    let bystander_service = lifecycle_service(&registry, bystander);
    let mine = Organization::new("Mine").expect("valid organization");
    let theirs = Organization::new("Theirs").expect("valid organization");
    save_organizations_fully(&rt, &service, std::slice::from_ref(&mine)).expect("seed save");
    save_organizations_fully(&rt, &bystander_service, std::slice::from_ref(&theirs))
        .expect("seed save");

    let stale = Association::new(
        "stale",
        mine.key(),
        mine.key(),
        AssociationType::RelatedTo,
    )
    .expect("valid association");
    let bystanders = Association::new(
        "bystanders",
        theirs.key(),
        theirs.key(),
        AssociationType::RelatedTo,
    )
    .expect("valid association");
    let replacement = Association::new(
        "replacement",
        mine.key(),
        theirs.key(),
        AssociationType::Uses,
    )
    .expect("valid association");
    rt.block_on(service.save_associations(std::slice::from_ref(&stale), false))
        .expect("seed association save");
    rt.block_on(bystander_service.save_associations(std::slice::from_ref(&bystanders), false))
        .expect("seed association save");

    let response = rt
        .block_on(service.save_associations(std::slice::from_ref(&replacement), true))
        .expect("replace save");

    assert!(response.is_fully_successful());
    let owned = rt
        .block_on(registry.associations_owned_by(&caller))
        .expect("lookup");
    assert_eq!(owned.len(), 1);
    assert_eq!(owned.first().map(Association::key), Some(replacement.key()));
    let untouched = rt
        .block_on(registry.associations_owned_by(&bystander))
        .expect("lookup");
    assert_eq!(untouched.len(), 1);
    assert_eq!(untouched.first().map(Association::key), Some(bystanders.key()));
}

/// Tests that concepts survive a save and delete cycle alongside other
/// object kinds without cross-talk.
#[rstest]
fn object_kinds_are_stored_independently(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);
    let concept = Concept::new("NAICS 541511").expect("valid concept");
    let organization = Organization::new("Acme Corp").expect("valid organization");
    rt.block_on(service.save_concepts(std::slice::from_ref(&concept)))
        .expect("concept save");
    save_organizations_fully(&rt, &service, std::slice::from_ref(&organization))
        .expect("organization save");

    // Deleting the concept under the organization kind misses.
    let wrong_kind = rt
        .block_on(service.delete_organizations(&[concept.key()]))
        .expect("delete call");
    let failure = wrong_kind.failures().first().expect("one failure");
    assert_eq!(failure.rejection(), &ItemRejection::NotFound);

    let right_kind = rt
        .block_on(service.delete_concepts(&[concept.key()]))
        .expect("delete call");
    assert!(right_kind.is_fully_successful());
    assert!(
        rt.block_on(registry.find_organization(&organization.key()))
            .expect("lookup")
            .is_some()
    );
}

/// Tests that the provider reports its capability profile through the
/// facade.
#[rstest]
fn capability_profile_is_reported(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);

    let profile = rt
        .block_on(service.capability_profile())
        .expect("profile call");

    assert_eq!(profile.version(), "1.0");
    assert_eq!(profile.capability_level(), CapabilityLevel::Level1);
    assert!(profile.supports(CapabilityLevel::Level0));
}
