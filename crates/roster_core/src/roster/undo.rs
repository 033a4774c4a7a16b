//! Single-step undo
//!
//! Pops the newest history entry and applies its inverse straight against
//! the store. The entry's own preconditions are not re-checked: the state
//! after a committed change always satisfies its inverse.

use tracing::{debug, error};

use crate::error::{Result, RosterError, DIVERGENCE_TARGET};

use super::history::HistoryEntry;
use super::session::RosterSession;

impl RosterSession {
    /// Reverses the most recent change and returns the entry that was undone.
    pub fn undo(&mut self) -> Result<HistoryEntry> {
        let Some(entry) = self.history.pop() else {
            return Err(RosterError::NothingToUndo.reported("undo"));
        };

        let applied = self.apply_entry(entry.inverse());

        if applied.is_none() {
            // keep the entry so the stack still matches what was committed
            self.history.push(entry);
            error!(target: DIVERGENCE_TARGET, ?entry, "undo could not apply inverse");
            return Err(RosterError::HistoryDiverged(format!("{:?}", entry)));
        }

        debug!(op = entry.kind(), remaining = self.history.len(), "undo applied");
        Ok(entry)
    }

    /// Replays `entry` against the store without precondition checks.
    fn apply_entry(&mut self, entry: HistoryEntry) -> Option<()> {
        match entry {
            // an inverted move lands back on its original slot
            HistoryEntry::Move { player, from, to, from_position } => {
                self.store.relocate(player, from, to, Some(from_position)).map(|_| ())
            }
            HistoryEntry::RotationLink { active, reserve, team_index } => {
                self.store.attach_shadow(team_index, active, reserve)
            }
            HistoryEntry::RotationUnlink { active, reserve, team_index } => {
                self.store.detach_shadow(team_index, active, reserve)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::RosterError;
    use crate::models::{Location, PlayerState};
    use crate::roster::fixtures::sample_response;
    use crate::roster::{HistoryEntry, RosterSession};

    fn session() -> RosterSession {
        RosterSession::from_response(sample_response()).unwrap()
    }

    #[test]
    fn test_undo_empty_history() {
        let mut s = session();
        let before = s.store().clone();

        assert_eq!(s.undo(), Err(RosterError::NothingToUndo));
        assert_eq!(s.store(), &before);
    }

    #[test]
    fn test_undo_move_restores_exact_order() {
        let mut s = session();
        let before = s.store().clone();

        s.move_player(1, Location::Team(0), Location::Reserve).unwrap();
        s.undo().unwrap();

        assert_eq!(s.store(), &before);
        assert_eq!(s.location_of(1), Some(PlayerState::InTeam(0)));
        assert!(!s.can_undo());
    }

    #[test]
    fn test_undo_link() {
        let mut s = session();
        let before = s.store().clone();

        s.link_rotation(11, 1, 3).unwrap();
        s.undo().unwrap();

        assert_eq!(s.store().player(3).unwrap().paired_with, None);
        assert_eq!(s.reserves().iter().filter(|p| p.id == 11).count(), 1);
        assert_eq!(s.location_of(11), Some(PlayerState::InReserve));
        // reserve comes back at the end of the pool
        let ids: Vec<i64> = s.reserves().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(s.teams(), before.teams());
    }

    #[test]
    fn test_undo_unlink_relinks() {
        let mut s = session();
        s.link_rotation(10, 0, 2).unwrap();
        s.unlink_rotation(2).unwrap();

        s.undo().unwrap();

        assert_eq!(s.store().player(2).unwrap().paired_with, Some(10));
        assert_eq!(s.location_of(10), Some(PlayerState::ShadowPaired { owner: 2 }));
        assert_eq!(s.history().len(), 1);
    }

    #[test]
    fn test_undo_walks_back_one_step_at_a_time() {
        let mut s = session();
        let initial = s.store().clone();

        s.move_player(10, Location::Reserve, Location::Team(1)).unwrap();
        s.link_rotation(11, 0, 1).unwrap();
        s.move_player(1, Location::Team(0), Location::Team(1)).unwrap();

        s.undo().unwrap();
        let team0: Vec<i64> = s.team_roster(0).unwrap().iter().map(|p| p.id).collect();
        let team1: Vec<i64> = s.team_roster(1).unwrap().iter().map(|p| p.id).collect();
        assert_eq!(team0, vec![1, 2]);
        assert_eq!(team1, vec![3, 10]);
        assert_eq!(s.store().player(1).unwrap().paired_with, Some(11));

        s.undo().unwrap();
        s.undo().unwrap();
        assert!(s.check_invariants().is_ok());
        assert_eq!(s.store(), &initial);
        assert_eq!(s.undo(), Err(RosterError::NothingToUndo));
    }

    #[test]
    fn test_undo_of_stale_entry_is_kept_and_reported() {
        let mut s = session();
        let before = s.store().clone();
        // link that was never applied to the store
        let stale = HistoryEntry::RotationLink { active: 2, reserve: 10, team_index: 0 };
        s.history.push(stale);

        let err = s.undo().unwrap_err();

        assert!(matches!(err, RosterError::HistoryDiverged(_)));
        assert!(err.is_logic_bug());
        assert_eq!(s.history().entries(), &[stale]);
        assert_eq!(s.store(), &before);
    }
}
