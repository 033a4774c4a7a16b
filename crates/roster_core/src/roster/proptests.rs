//! Property tests over arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::BTreeSet;

use crate::models::{Location, Player, PlayerId, Team};
use crate::roster::{RosterSession, RosterSnapshot};

const TEAMS: usize = 3;
const PER_TEAM: i64 = 4;
const RESERVES: i64 = 5;

#[derive(Debug, Clone)]
enum Op {
    Move { player: PlayerId, from: Location, to: Location },
    Link { reserve: PlayerId, team_index: usize, active: PlayerId },
    Unlink { active: PlayerId },
    Undo,
}

fn all_ids() -> Vec<PlayerId> {
    let team_ids = (0..TEAMS as i64).flat_map(|t| (0..PER_TEAM).map(move |i| t * 10 + i + 1));
    team_ids.chain((0..RESERVES).map(|i| 100 + i)).collect()
}

fn seeded() -> RosterSession {
    let teams = (0..TEAMS)
        .map(|t| {
            let players =
                (0..PER_TEAM).map(|i| Player::new(t as i64 * 10 + i + 1, "p")).collect();
            Team::new(t, format!("Time {}", t)).with_players(players)
        })
        .collect();
    let reserves = (0..RESERVES).map(|i| Player::new(100 + i, "r")).collect();
    let snapshot = RosterSnapshot { teams, reserves, shadowed: Vec::new() };
    RosterSession::from_snapshot(snapshot).unwrap()
}

// team index one past the end exercises TargetInvalid
fn location() -> impl Strategy<Value = Location> {
    prop_oneof![(0..=TEAMS).prop_map(Location::Team), Just(Location::Reserve)]
}

fn player_id() -> impl Strategy<Value = PlayerId> {
    proptest::sample::select(all_ids())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (player_id(), location(), location())
            .prop_map(|(player, from, to)| Op::Move { player, from, to }),
        3 => (player_id(), 0..=TEAMS, player_id())
            .prop_map(|(reserve, team_index, active)| Op::Link { reserve, team_index, active }),
        2 => player_id().prop_map(|active| Op::Unlink { active }),
        2 => Just(Op::Undo),
    ]
}

fn apply(session: &mut RosterSession, op: &Op) -> bool {
    let result = match *op {
        Op::Move { player, from, to } => session.move_player(player, from, to).map(|_| ()),
        Op::Link { reserve, team_index, active } => {
            session.link_rotation(reserve, team_index, active).map(|_| ())
        }
        Op::Unlink { active } => session.unlink_rotation(active).map(|_| ()),
        Op::Undo => session.undo().map(|_| ()),
    };
    result.is_ok()
}

/// Rosters compared as sets: team order kept, pool order ignored.
fn normalized(session: &RosterSession) -> RosterSnapshot {
    let mut snapshot = session.snapshot();
    snapshot.reserves.sort_by_key(|p| p.id);
    snapshot
}

fn placed_ids(session: &RosterSession) -> BTreeSet<PlayerId> {
    session.store().all_player_ids().into_iter().collect()
}

proptest! {
    #[test]
    fn prop_location_uniqueness_holds(ops in proptest::collection::vec(op(), 1..60)) {
        let mut session = seeded();
        let expected: BTreeSet<PlayerId> = all_ids().into_iter().collect();

        for op in &ops {
            apply(&mut session, op);
            prop_assert!(session.check_invariants().is_ok(), "after {:?}", op);
            prop_assert_eq!(placed_ids(&session), expected.clone());
            prop_assert_eq!(session.store().player_count(), expected.len());
        }
    }

    #[test]
    fn prop_rejected_ops_change_nothing(ops in proptest::collection::vec(op(), 1..60)) {
        let mut session = seeded();

        for op in &ops {
            let before = session.store().clone();
            let depth = session.history().len();
            if !apply(&mut session, op) {
                prop_assert_eq!(session.store(), &before, "after {:?}", op);
                prop_assert_eq!(session.history().len(), depth);
            }
        }
    }

    #[test]
    fn prop_undo_reverses_each_committed_op(ops in proptest::collection::vec(op(), 1..60)) {
        let mut session = seeded();

        for op in &ops {
            if matches!(op, Op::Undo) {
                continue;
            }
            let before = normalized(&session);
            if apply(&mut session, op) {
                session.undo().unwrap();
                prop_assert_eq!(normalized(&session), before.clone(), "undo of {:?}", op);
                // replay so the sequence keeps making progress
                prop_assert!(apply(&mut session, op));
            }
        }
    }
}
