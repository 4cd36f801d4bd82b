//! Property tests: invariants hold under arbitrary operation sequences.

use proptest::prelude::*;

use crate::domain::test_helpers::{lobby, member};
use crate::domain::{Phase, Session};

const USERS: [&str; 6] = ["alice", "bob", "carol", "dave", "eve", "frank"];

#[derive(Debug, Clone)]
enum Op {
    Admit(usize),
    Withdraw(usize),
    Start(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..USERS.len()).prop_map(Op::Admit),
        (0..USERS.len()).prop_map(Op::Withdraw),
        (0..USERS.len()).prop_map(Op::Start),
    ]
}

fn phase_rank(phase: Phase) -> u8 {
    match phase {
        Phase::Initial => 0,
        Phase::Signup => 1,
        Phase::Active => 2,
        Phase::Finished => 3,
    }
}

fn assert_invariants(s: &Session) {
    assert!(
        s.roster.len() <= s.max_players as usize,
        "capacity exceeded: {} > {}",
        s.roster.len(),
        s.max_players
    );
    for (i, m) in s.roster.iter().enumerate() {
        assert!(
            !s.roster[i + 1..].iter().any(|other| other.user == m.user),
            "duplicate roster identity: {}",
            m.user
        );
        assert_ne!(m.user, s.owner, "owner found in roster");
    }
}

proptest! {
    #[test]
    fn invariants_hold_for_any_op_sequence(
        min in 0u32..5,
        max in 1u32..5,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        // USERS[0] owns the session; admits of index 0 must always fail.
        let mut s = lobby("Props", min, max, USERS[0]);
        let mut last_rank = phase_rank(s.phase);

        for op in ops {
            let roster_before = s.roster.len();
            match op {
                Op::Admit(i) => {
                    let user = USERS[i];
                    let ok = s.admit(member(s.id, user, user)).is_ok();
                    if ok {
                        prop_assert_eq!(s.roster.len(), roster_before + 1);
                        prop_assert_ne!(user, s.owner.as_str());
                        prop_assert_eq!(s.phase, Phase::Signup);
                    } else {
                        prop_assert_eq!(s.roster.len(), roster_before);
                    }
                }
                Op::Withdraw(i) => {
                    let ok = s.withdraw(USERS[i]).is_ok();
                    if ok {
                        prop_assert_eq!(s.roster.len(), roster_before - 1);
                    } else {
                        prop_assert_eq!(s.roster.len(), roster_before);
                    }
                }
                Op::Start(i) => {
                    let ok = s.start(USERS[i]).is_ok();
                    if ok {
                        prop_assert_eq!(USERS[i], s.owner.as_str());
                        prop_assert_eq!(s.phase, Phase::Active);
                        prop_assert!(s.roster.len() as u32 >= s.min_players);
                    }
                }
            }

            // Phase never moves backward.
            let rank = phase_rank(s.phase);
            prop_assert!(rank >= last_rank, "phase moved backward");
            last_rank = rank;

            assert_invariants(&s);
        }
    }

    #[test]
    fn roster_is_frozen_after_start(
        joins in prop::collection::vec(1..USERS.len(), 1..6),
    ) {
        let mut s = lobby("Frozen", 0, USERS.len() as u32, USERS[0]);
        for i in joins {
            let _ = s.admit(member(s.id, USERS[i], USERS[i]));
        }
        s.start(USERS[0]).unwrap();
        let frozen = s.roster.clone();

        for user in USERS {
            prop_assert!(s.admit(member(s.id, user, user)).is_err());
            prop_assert!(s.withdraw(user).is_err());
        }
        prop_assert_eq!(&s.roster, &frozen);
    }
}
