//! Move engine - the only mutation surface over the roster
//!
//! ## Operations
//! - move_player: team/reserve → team/reserve (append at destination)
//! - link_rotation: reserve shadows an active player
//! - unlink_rotation / unlink_rotation_exact: reserve returns to the pool
//!
//! Every operation checks all preconditions before touching the store, so a
//! rejected call leaves roster and history exactly as they were.

use crate::error::{Result, RosterError};
use crate::models::{Location, PlayerId};

use super::history::HistoryEntry;
use super::session::RosterSession;

impl RosterSession {
    /// Moves `player` from `from` to the end of `to`.
    pub fn move_player(
        &mut self,
        player: PlayerId,
        from: Location,
        to: Location,
    ) -> Result<HistoryEntry> {
        self.check_move(player, from, to).map_err(|e| e.reported("move"))?;

        let Some(from_position) = self.store.relocate(player, from, to, None) else {
            return Err(RosterError::SourceNotFound { player, location: from }.reported("move"));
        };
        Ok(self.commit(HistoryEntry::Move { player, from, to, from_position }))
    }

    fn check_move(&self, player: PlayerId, from: Location, to: Location) -> Result<()> {
        if !self.store.contains_at(from, player) {
            return Err(RosterError::SourceNotFound { player, location: from });
        }
        if !self.store.has_location(to) {
            return Err(RosterError::TargetInvalid { location: to });
        }
        // a linked active player can't sit in the pool
        let linked = self.store.player(player).is_some_and(|p| p.is_paired());
        if to == Location::Reserve && linked {
            return Err(RosterError::AlreadyPaired { player });
        }
        Ok(())
    }

    /// Rotates `reserve` in as the shadow partner of `active` on `team_index`.
    ///
    /// Only players currently in the reserve pool can be linked. A reserve
    /// that is already shadowing someone, or an active that already has a
    /// partner, is a hard `AlreadyPaired` failure.
    pub fn link_rotation(
        &mut self,
        reserve: PlayerId,
        team_index: usize,
        active: PlayerId,
    ) -> Result<HistoryEntry> {
        self.check_link(reserve, team_index, active).map_err(|e| e.reported("link_rotation"))?;

        if self.store.attach_shadow(team_index, active, reserve).is_none() {
            let err = RosterError::SourceNotFound { player: reserve, location: Location::Reserve };
            return Err(err.reported("link_rotation"));
        }
        Ok(self.commit(HistoryEntry::RotationLink { active, reserve, team_index }))
    }

    fn check_link(&self, reserve: PlayerId, team_index: usize, active: PlayerId) -> Result<()> {
        let team = Location::Team(team_index);
        if !self.store.has_location(team) {
            return Err(RosterError::TargetInvalid { location: team });
        }

        if self.store.shadowed(reserve).is_some() {
            return Err(RosterError::AlreadyPaired { player: reserve });
        }
        if !self.store.contains_at(Location::Reserve, reserve) {
            return Err(RosterError::SourceNotFound { player: reserve, location: Location::Reserve });
        }

        let Some(active_player) = self
            .store
            .team_roster(team_index)
            .and_then(|roster| roster.iter().find(|p| p.id == active))
        else {
            return Err(RosterError::SourceNotFound { player: active, location: team });
        };
        if active_player.is_paired() {
            return Err(RosterError::AlreadyPaired { player: active });
        }
        Ok(())
    }

    /// Ends whatever rotation link `active` currently has.
    ///
    /// An active with no link means the caller's view is stale and is
    /// reported as `LinkMismatch`.
    pub fn unlink_rotation(&mut self, active: PlayerId) -> Result<HistoryEntry> {
        let Some(team_index) = self.team_of(active) else {
            let err = if self.store.player(active).is_some() {
                RosterError::LinkMismatch { active, expected: None, found: None }
            } else {
                RosterError::UnknownPlayer { player: active }
            };
            return Err(err.reported("unlink_rotation"));
        };

        let found = self.store.player(active).and_then(|p| p.paired_with);
        let Some(reserve) = found else {
            let err = RosterError::LinkMismatch { active, expected: None, found: None };
            return Err(err.reported("unlink_rotation"));
        };

        self.unlink_rotation_exact(active, reserve, team_index)
    }

    /// Ends the link `active -> reserve` on `team_index`, which must be the
    /// current state.
    pub fn unlink_rotation_exact(
        &mut self,
        active: PlayerId,
        reserve: PlayerId,
        team_index: usize,
    ) -> Result<HistoryEntry> {
        self.check_unlink(active, reserve, team_index)
            .map_err(|e| e.reported("unlink_rotation"))?;

        if self.store.detach_shadow(team_index, active, reserve).is_none() {
            let err = RosterError::LinkMismatch { active, expected: Some(reserve), found: None };
            return Err(err.reported("unlink_rotation"));
        }
        Ok(self.commit(HistoryEntry::RotationUnlink { active, reserve, team_index }))
    }

    fn check_unlink(&self, active: PlayerId, reserve: PlayerId, team_index: usize) -> Result<()> {
        let team = Location::Team(team_index);
        if !self.store.has_location(team) {
            return Err(RosterError::TargetInvalid { location: team });
        }

        let Some(active_player) = self
            .store
            .team_roster(team_index)
            .and_then(|roster| roster.iter().find(|p| p.id == active))
        else {
            return Err(RosterError::SourceNotFound { player: active, location: team });
        };

        if active_player.paired_with != Some(reserve) {
            return Err(RosterError::LinkMismatch {
                active,
                expected: Some(reserve),
                found: active_player.paired_with,
            });
        }
        Ok(())
    }
}
