//! RosterStore - authoritative in-memory roster state
//!
//! Teams, the reserve pool, and the shadow area where a reserve lives while
//! it is rotation-linked to an active player. Public API is read-only; the
//! write primitives below are only reachable from the session's move/undo
//! paths and check structural containment, nothing more.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::error::{Result, RosterError};
use crate::models::{Location, Player, PlayerId, PlayerState, Team};

/// Serializable view of the whole roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RosterSnapshot {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub reserves: Vec<Player>,
    /// Reserves currently linked to an active player.
    #[serde(default)]
    pub shadowed: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterStore {
    teams: Vec<Team>,
    reserves: Vec<Player>,
    shadows: BTreeMap<PlayerId, Player>,
}

impl RosterStore {
    /// Builds a store from a snapshot, rejecting broken invariants.
    ///
    /// Team indices are renumbered to their list position.
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Result<Self> {
        let RosterSnapshot { mut teams, reserves, shadowed } = snapshot;

        for (position, team) in teams.iter_mut().enumerate() {
            if team.index != position {
                debug!(from = team.index, to = position, team = %team.name, "renumbering team");
                team.index = position;
            }
        }

        let mut shadows = BTreeMap::new();
        for player in shadowed {
            let id = player.id;
            if shadows.insert(id, player).is_some() {
                return Err(RosterError::InvalidSnapshot(format!(
                    "player {} is shadowed twice",
                    id
                )));
            }
        }

        let store = Self { teams, reserves, shadows };
        store.check_invariants().map_err(RosterError::InvalidSnapshot)?;
        Ok(store)
    }

    pub fn to_snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            teams: self.teams.clone(),
            reserves: self.reserves.clone(),
            shadowed: self.shadows.values().cloned().collect(),
        }
    }

    // ========================
    // Queries
    // ========================

    pub fn location_of(&self, player_id: PlayerId) -> Option<PlayerState> {
        if let Some(team) = self.teams.iter().find(|t| t.contains(player_id)) {
            return Some(PlayerState::InTeam(team.index));
        }
        if self.reserves.iter().any(|p| p.id == player_id) {
            return Some(PlayerState::InReserve);
        }
        if self.shadows.contains_key(&player_id) {
            return self.owner_of(player_id).map(|owner| PlayerState::ShadowPaired { owner });
        }
        None
    }

    pub fn team_roster(&self, index: usize) -> Option<&[Player]> {
        self.teams.get(index).map(|t| t.players.as_slice())
    }

    pub fn reserves(&self) -> &[Player] {
        &self.reserves
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn shadowed(&self, player_id: PlayerId) -> Option<&Player> {
        self.shadows.get(&player_id)
    }

    /// Active player whose `paired_with` points at `reserve_id`.
    pub fn owner_of(&self, reserve_id: PlayerId) -> Option<PlayerId> {
        self.teams
            .iter()
            .flat_map(|t| t.players.iter())
            .find(|p| p.paired_with == Some(reserve_id))
            .map(|p| p.id)
    }

    pub fn has_location(&self, location: Location) -> bool {
        match location {
            Location::Team(index) => index < self.teams.len(),
            Location::Reserve => true,
        }
    }

    pub fn contains_at(&self, location: Location, player_id: PlayerId) -> bool {
        self.list(location).is_some_and(|list| list.iter().any(|p| p.id == player_id))
    }

    /// Any player the session knows about, wherever it lives.
    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.teams
            .iter()
            .flat_map(|t| t.players.iter())
            .chain(self.reserves.iter())
            .find(|p| p.id == player_id)
            .or_else(|| self.shadows.get(&player_id))
    }

    pub fn all_player_ids(&self) -> Vec<PlayerId> {
        self.teams
            .iter()
            .flat_map(|t| t.players.iter())
            .chain(self.reserves.iter())
            .chain(self.shadows.values())
            .map(|p| p.id)
            .collect()
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|t| t.players.len()).sum::<usize>()
            + self.reserves.len()
            + self.shadows.len()
    }

    /// Location uniqueness, skill ranges and link symmetry.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::new();
        for id in self.all_player_ids() {
            if !seen.insert(id) {
                return Err(format!("player {} appears in more than one location", id));
            }
        }

        let everyone = self
            .teams
            .iter()
            .flat_map(|t| t.players.iter())
            .chain(self.reserves.iter())
            .chain(self.shadows.values());
        for player in everyone {
            if let Err(err) = player.skills.validate() {
                return Err(format!("player {}: {}", player.id, err));
            }
        }

        for (position, team) in self.teams.iter().enumerate() {
            if team.index != position {
                return Err(format!("team at position {} has index {}", position, team.index));
            }
        }

        if let Some(p) = self.reserves.iter().find(|p| p.paired_with.is_some()) {
            return Err(format!("reserve player {} carries a rotation link", p.id));
        }

        for (id, shadow) in &self.shadows {
            if shadow.id != *id {
                return Err(format!("shadow slot {} holds player {}", id, shadow.id));
            }
            if shadow.paired_with.is_some() {
                return Err(format!("shadowed player {} carries a rotation link", id));
            }
        }

        let mut linked = HashSet::new();
        for active in self.teams.iter().flat_map(|t| t.players.iter()) {
            let Some(reserve_id) = active.paired_with else {
                continue;
            };
            if !self.shadows.contains_key(&reserve_id) {
                return Err(format!(
                    "player {} is linked to {}, which is not shadowed",
                    active.id, reserve_id
                ));
            }
            if !linked.insert(reserve_id) {
                return Err(format!("reserve {} is linked to more than one player", reserve_id));
            }
        }

        if let Some(orphan) = self.shadows.keys().find(|id| !linked.contains(*id)) {
            return Err(format!("shadowed player {} has no owner", orphan));
        }

        Ok(())
    }

    // ========================
    // Write primitives (crate-private)
    // ========================

    fn list(&self, location: Location) -> Option<&Vec<Player>> {
        match location {
            Location::Team(index) => self.teams.get(index).map(|t| &t.players),
            Location::Reserve => Some(&self.reserves),
        }
    }

    fn list_mut(&mut self, location: Location) -> Option<&mut Vec<Player>> {
        match location {
            Location::Team(index) => self.teams.get_mut(index).map(|t| &mut t.players),
            Location::Reserve => Some(&mut self.reserves),
        }
    }

    /// Removes `player_id` from `from` and inserts it into `to` at
    /// `position` (clamped), or appends when `position` is `None`.
    ///
    /// Returns the index the player had in `from`. Nothing changes when
    /// either list is missing or the player is not in `from`.
    pub(crate) fn relocate(
        &mut self,
        player_id: PlayerId,
        from: Location,
        to: Location,
        position: Option<usize>,
    ) -> Option<usize> {
        if !self.has_location(to) {
            return None;
        }
        let origin = self.list_mut(from)?;
        let from_position = origin.iter().position(|p| p.id == player_id)?;
        let player = origin.remove(from_position);

        // `to` was checked above
        let destination = self.list_mut(to)?;
        match position {
            Some(at) => destination.insert(at.min(destination.len()), player),
            None => destination.push(player),
        }
        Some(from_position)
    }

    /// Links `reserve_id` (must be in the pool) to `active_id` (must be in
    /// `team_index`) and moves the reserve record into the shadow area.
    pub(crate) fn attach_shadow(
        &mut self,
        team_index: usize,
        active_id: PlayerId,
        reserve_id: PlayerId,
    ) -> Option<()> {
        let active_position = self.teams.get(team_index)?.position_of(active_id)?;
        let reserve_position = self.reserves.iter().position(|p| p.id == reserve_id)?;

        let reserve = self.reserves.remove(reserve_position);
        self.teams[team_index].players[active_position].paired_with = Some(reserve_id);
        self.shadows.insert(reserve_id, reserve);
        Some(())
    }

    /// Clears the link `active_id -> reserve_id` and returns the reserve to
    /// the pool. The pool gets the reserve at most once.
    pub(crate) fn detach_shadow(
        &mut self,
        team_index: usize,
        active_id: PlayerId,
        reserve_id: PlayerId,
    ) -> Option<()> {
        let active_position = self.teams.get(team_index)?.position_of(active_id)?;
        if self.teams[team_index].players[active_position].paired_with != Some(reserve_id) {
            return None;
        }

        self.teams[team_index].players[active_position].paired_with = None;
        if let Some(reserve) = self.shadows.remove(&reserve_id) {
            if !self.reserves.iter().any(|p| p.id == reserve_id) {
                self.reserves.push(reserve);
            }
        }
        Some(())
    }

    pub(crate) fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut Player> {
        if self.shadows.contains_key(&player_id) {
            return self.shadows.get_mut(&player_id);
        }
        self.teams
            .iter_mut()
            .flat_map(|t| t.players.iter_mut())
            .chain(self.reserves.iter_mut())
            .find(|p| p.id == player_id)
    }
}
