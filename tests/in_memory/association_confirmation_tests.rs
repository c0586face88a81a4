//! Association confirmation workflow tests against the in-memory
//! registry.

use crate::in_memory::helpers::{
    TestRegistry, caller, lifecycle_service, registry, runtime, save_organizations_fully,
};
use registrar::registry::{
    domain::{Association, AssociationType, ObjectKey, Organization, PartyId, RegistryEntity},
    ports::RegistryProvider,
    services::LifecycleError,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Saves one organization per party and an association from the caller's
/// organization to the other party's, returning the association key.
fn seed_extramural(
    rt: &Runtime,
    registry: &Arc<TestRegistry>,
    caller: PartyId,
    other: PartyId,
) -> ObjectKey {
    let service = lifecycle_service(registry, caller);
    let other_service = lifecycle_service(registry, other);
    let mine = Organization::new("Mine").expect("valid organization");
    let theirs = Organization::new("Theirs").expect("valid organization");
    save_organizations_fully(rt, &service, std::slice::from_ref(&mine)).expect("seed save");
    save_organizations_fully(rt, &other_service, std::slice::from_ref(&theirs))
        .expect("seed save");
    let association = Association::new(
        "mine-relates-to-theirs",
        mine.key(),
        theirs.key(),
        AssociationType::RelatedTo,
    )
    .expect("valid association");
    let response = rt
        .block_on(service.save_associations(std::slice::from_ref(&association), false))
        .expect("seed association save");
    assert!(response.is_fully_successful());
    association.key()
}

/// Tests that either endpoint owner may confirm an extramural
/// association and that repeated confirmation is a no-op.
#[rstest]
fn either_endpoint_owner_confirms_idempotently(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let other = PartyId::new();
    let key = seed_extramural(&rt, &registry, caller, other);
    let service = lifecycle_service(&registry, caller);
    let other_service = lifecycle_service(&registry, other);

    // The state-changing write comes from the owner who did not submit
    // the association.
    rt.block_on(other_service.confirm_association(&key))
        .expect("target owner confirm");
    rt.block_on(service.confirm_association(&key))
        .expect("source owner confirm is a no-op");

    let stored = rt
        .block_on(registry.find_association(&key))
        .expect("lookup")
        .expect("association exists");
    assert!(stored.is_confirmed());
}

/// Tests that unconfirming reverts a confirmation and leaves an already
/// unconfirmed association untouched.
#[rstest]
fn unconfirm_reverts_a_confirmation(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let key = seed_extramural(&rt, &registry, caller, PartyId::new());
    let service = lifecycle_service(&registry, caller);

    rt.block_on(service.unconfirm_association(&key))
        .expect("unconfirm before any confirm is a no-op");
    rt.block_on(service.confirm_association(&key))
        .expect("confirm");
    rt.block_on(service.unconfirm_association(&key))
        .expect("unconfirm");

    let stored = rt
        .block_on(registry.find_association(&key))
        .expect("lookup")
        .expect("association exists");
    assert!(!stored.is_confirmed());
}

/// Tests that a party owning neither endpoint cannot touch the
/// confirmation state.
#[rstest]
fn outsiders_cannot_confirm(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let key = seed_extramural(&rt, &registry, caller, PartyId::new());
    let outsider = PartyId::new();
    let outsider_service = lifecycle_service(&registry, outsider);

    let result = rt.block_on(outsider_service.confirm_association(&key));

    assert!(matches!(
        result,
        Err(LifecycleError::NotAssociationOwner { caller: who, association })
            if who == outsider && association == key
    ));
    let stored = rt
        .block_on(registry.find_association(&key))
        .expect("lookup")
        .expect("association exists");
    assert!(!stored.is_confirmed());
}

/// Tests that confirming an intramural association leaves it untouched.
#[rstest]
fn intramural_confirmation_is_a_no_op(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);
    let left = Organization::new("Left Division").expect("valid organization");
    let right = Organization::new("Right Division").expect("valid organization");
    save_organizations_fully(&rt, &service, &[left.clone(), right.clone()]).expect("seed save");
    let association = Association::new(
        "left-uses-right",
        left.key(),
        right.key(),
        AssociationType::Uses,
    )
    .expect("valid association");
    rt.block_on(service.save_associations(std::slice::from_ref(&association), false))
        .expect("seed association save");

    rt.block_on(service.confirm_association(&association.key()))
        .expect("confirm is a no-op");

    let stored = rt
        .block_on(registry.find_association(&association.key()))
        .expect("lookup")
        .expect("association exists");
    assert_eq!(stored, association);
}

/// Tests that confirmation calls on unknown keys fail.
#[rstest]
fn confirming_an_unknown_association_fails(
    runtime: io::Result<Runtime>,
    registry: Arc<TestRegistry>,
    caller: PartyId,
) {
    let rt = runtime.expect("runtime creation");
    let service = lifecycle_service(&registry, caller);
    let missing = ObjectKey::new();

    let result = rt.block_on(service.confirm_association(&missing));

    assert!(matches!(
        result,
        Err(LifecycleError::AssociationNotFound(key)) if key == missing
    ));
}
