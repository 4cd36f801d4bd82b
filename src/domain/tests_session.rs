use crate::domain::test_helpers::{lobby, member};
use crate::domain::{AdmissionBlock, Phase};
use crate::errors::domain::{ConflictKind, DomainError};

fn conflict_kind(err: DomainError) -> ConflictKind {
    match err {
        DomainError::Conflict(kind, _) => kind,
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn new_lobby_is_open_for_signup() {
    let s = lobby("Catan", 3, 4, "alice");
    assert!(s.is_open_for_signup());
    assert!(s.is_owned_by("alice"));
    assert!(!s.is_owned_by("bob"));
    assert!(s.roster.is_empty());
}

#[test]
fn open_signup_only_from_initial() {
    let mut s = lobby("Catan", 3, 4, "alice");
    s.phase = Phase::Initial;
    assert!(!s.is_open_for_signup());
    s.open_signup().expect("Initial -> Signup");
    assert_eq!(s.phase, Phase::Signup);

    // Re-opening, or opening from any later phase, is rejected.
    assert_eq!(
        conflict_kind(s.open_signup().unwrap_err()),
        ConflictKind::WrongPhase
    );
    s.phase = Phase::Active;
    assert_eq!(
        conflict_kind(s.open_signup().unwrap_err()),
        ConflictKind::WrongPhase
    );
}

#[test]
fn admission_blocks_in_rule_order() {
    let mut s = lobby("Catan", 1, 2, "alice");

    // Owner is excluded even with room to spare.
    assert_eq!(s.admission_block("alice"), Some(AdmissionBlock::IsOwner));

    assert_eq!(s.admission_block("bob"), None);
    s.admit(member(s.id, "bob", "Bob")).unwrap();
    s.admit(member(s.id, "carol", "Carol")).unwrap();

    // Full roster blocks further admissions.
    assert_eq!(s.admission_block("dave"), Some(AdmissionBlock::Full));
    assert_eq!(
        conflict_kind(s.admit(member(s.id, "dave", "Dave")).unwrap_err()),
        ConflictKind::SessionFull
    );

    // Phase closed outranks everything once started.
    s.start("alice").unwrap();
    assert_eq!(s.admission_block("dave"), Some(AdmissionBlock::PhaseClosed));
    assert_eq!(s.admission_block("alice"), Some(AdmissionBlock::PhaseClosed));
}

#[test]
fn can_admit_accounts_for_existing_membership() {
    let mut s = lobby("Catan", 1, 4, "alice");
    assert!(s.can_admit("bob"));
    s.admit(member(s.id, "bob", "Bob")).unwrap();
    // Already a member: joining again would be a no-op, not an admission.
    assert!(!s.can_admit("bob"));
    assert!(s.can_admit("carol"));
    assert!(!s.can_admit("alice"));
}

#[test]
fn admit_rejects_duplicate_identity() {
    let mut s = lobby("Catan", 1, 4, "alice");
    s.admit(member(s.id, "bob", "Bob")).unwrap();
    let err = s.admit(member(s.id, "bob", "Bobby")).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_, _)));
    assert_eq!(s.roster.len(), 1);
    assert_eq!(s.roster[0].display_name, "Bob");
}

#[test]
fn roster_preserves_join_order() {
    let mut s = lobby("Catan", 1, 4, "alice");
    for user in ["bob", "carol", "dave"] {
        s.admit(member(s.id, user, user)).unwrap();
    }
    let order: Vec<&str> = s.roster.iter().map(|m| m.user.as_str()).collect();
    assert_eq!(order, vec!["bob", "carol", "dave"]);
}

#[test]
fn start_precondition_order_owner_then_phase_then_threshold() {
    let mut s = lobby("Catan", 2, 4, "alice");
    s.admit(member(s.id, "bob", "Bob")).unwrap();

    // Non-owner fails on ownership even though the threshold also fails.
    assert_eq!(
        conflict_kind(s.start("bob").unwrap_err()),
        ConflictKind::NotOwner
    );

    // Owner below threshold fails on the threshold.
    assert_eq!(
        conflict_kind(s.start("alice").unwrap_err()),
        ConflictKind::InsufficientPlayers
    );
    assert_eq!(s.phase, Phase::Signup);

    s.admit(member(s.id, "carol", "Carol")).unwrap();
    s.start("alice").unwrap();
    assert_eq!(s.phase, Phase::Active);

    // Active session: owner check still wins over phase for a non-owner,
    // and the owner now fails on phase. No backward transition happens.
    assert_eq!(
        conflict_kind(s.start("bob").unwrap_err()),
        ConflictKind::NotOwner
    );
    assert_eq!(
        conflict_kind(s.start("alice").unwrap_err()),
        ConflictKind::WrongPhase
    );
    assert_eq!(s.phase, Phase::Active);
}

#[test]
fn start_from_initial_is_rejected() {
    let mut s = lobby("Catan", 0, 4, "alice");
    s.phase = Phase::Initial;
    assert_eq!(
        conflict_kind(s.start("alice").unwrap_err()),
        ConflictKind::WrongPhase
    );
    assert_eq!(s.phase, Phase::Initial);
}

#[test]
fn withdraw_checks_phase_before_membership() {
    let mut s = lobby("Catan", 1, 4, "alice");
    s.admit(member(s.id, "bob", "Bob")).unwrap();
    s.start("alice").unwrap();

    // Even an actual member gets the phase conflict once started.
    assert_eq!(
        conflict_kind(s.withdraw("bob").unwrap_err()),
        ConflictKind::WrongPhase
    );
}

#[test]
fn withdraw_removes_exactly_one_entry() {
    let mut s = lobby("Catan", 1, 4, "alice");
    s.admit(member(s.id, "bob", "Bob")).unwrap();
    s.admit(member(s.id, "carol", "Carol")).unwrap();

    let removed = s.withdraw("bob").unwrap();
    assert_eq!(removed.user, "bob");
    assert_eq!(s.roster.len(), 1);
    assert!(s.member("bob").is_none());

    assert_eq!(
        conflict_kind(s.withdraw("bob").unwrap_err()),
        ConflictKind::NotAMember
    );
}

#[test]
fn deletable_only_by_owner_during_signup() {
    let mut s = lobby("Catan", 0, 4, "alice");
    assert_eq!(
        conflict_kind(s.ensure_deletable_by("bob").unwrap_err()),
        ConflictKind::NotOwner
    );
    s.ensure_deletable_by("alice").unwrap();

    s.start("alice").unwrap();
    assert_eq!(
        conflict_kind(s.ensure_deletable_by("alice").unwrap_err()),
        ConflictKind::WrongPhase
    );
}

#[test]
fn unsatisfiable_threshold_is_not_validated_but_never_starts() {
    // min > max is a caller precondition, deliberately not enforced.
    let mut s = lobby("Oops", 5, 2, "alice");
    s.admit(member(s.id, "bob", "Bob")).unwrap();
    s.admit(member(s.id, "carol", "Carol")).unwrap();
    assert!(s.is_full());
    assert_eq!(
        conflict_kind(s.start("alice").unwrap_err()),
        ConflictKind::InsufficientPlayers
    );
}
