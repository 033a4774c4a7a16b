//! Roster session - one game screen's worth of roster state
//!
//! Owns the [`RosterStore`] and its [`HistoryStack`]. Structural changes go
//! through the move engine (`moves.rs`) and `undo()` (`undo.rs`); both live
//! as separate `impl RosterSession` blocks.
//!
//! The session is single-threaded: every method runs to completion under
//! `&mut self`. Callers sharing one across threads wrap it in a lock
//! (`Arc<RwLock<RosterSession>>`).

use tracing::{debug, info};

use crate::balancing::{
    BalanceRequest, BalanceResponse, BalancingService, TeamRotationSuggestions,
};
use crate::error::{Result, RosterError};
use crate::models::{Location, Player, PlayerId, PlayerState, SkillUpdate, Team};

use super::history::{HistoryEntry, HistoryStack};
use super::store::{RosterSnapshot, RosterStore};

#[derive(Debug, Clone)]
pub struct RosterSession {
    pub(super) store: RosterStore,
    pub(super) history: HistoryStack,
    pub(super) suggestions: Vec<TeamRotationSuggestions>,
}

impl RosterSession {
    /// Asks the balancing service for initial teams and seeds a session.
    ///
    /// A service error means no session.
    pub fn start<S: BalancingService + ?Sized>(
        service: &S,
        request: &BalanceRequest,
    ) -> Result<Self> {
        info!(
            players = request.players.len(),
            team_size = request.team_size,
            "requesting team balancing"
        );
        let response = service
            .balance(request)
            .map_err(|e| RosterError::from(e).reported("start"))?;
        Self::from_response(response)
    }

    pub fn from_response(response: BalanceResponse) -> Result<Self> {
        let store = RosterStore::from_snapshot(response.snapshot())
            .map_err(|e| e.reported("from_response"))?;
        info!(
            teams = store.team_count(),
            reserves = store.reserves().len(),
            "roster session seeded"
        );
        Ok(Self {
            store,
            history: HistoryStack::new(),
            suggestions: response.rotation_suggestions,
        })
    }

    /// Restores a session from a snapshot (e.g. a replay script); history starts empty.
    pub fn from_snapshot(snapshot: RosterSnapshot) -> Result<Self> {
        let store =
            RosterStore::from_snapshot(snapshot).map_err(|e| e.reported("from_snapshot"))?;
        Ok(Self { store, history: HistoryStack::new(), suggestions: Vec::new() })
    }

    pub fn with_suggestions(mut self, suggestions: Vec<TeamRotationSuggestions>) -> Self {
        self.suggestions = suggestions;
        self
    }

    // ========================
    // Read-only access
    // ========================

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn location_of(&self, player_id: PlayerId) -> Option<PlayerState> {
        self.store.location_of(player_id)
    }

    pub fn team_roster(&self, index: usize) -> Option<&[Player]> {
        self.store.team_roster(index)
    }

    pub fn reserves(&self) -> &[Player] {
        self.store.reserves()
    }

    pub fn teams(&self) -> &[Team] {
        self.store.teams()
    }

    pub fn suggestions(&self) -> &[TeamRotationSuggestions] {
        &self.suggestions
    }

    pub fn snapshot(&self) -> RosterSnapshot {
        self.store.to_snapshot()
    }

    pub fn check_invariants(&self) -> Result<()> {
        self.store.check_invariants().map_err(RosterError::InvalidSnapshot)
    }

    /// Team a player is active in, if any.
    pub(crate) fn team_of(&self, player_id: PlayerId) -> Option<usize> {
        match self.store.location_of(player_id)?.location()? {
            Location::Team(index) => Some(index),
            Location::Reserve => None,
        }
    }

    // ========================
    // Skill editing (out-of-band)
    // ========================

    /// Updates skills / setter flag in place. Location, links and history
    /// are untouched.
    pub fn edit_skills(&mut self, player_id: PlayerId, update: &SkillUpdate) -> Result<()> {
        update.validate().map_err(|e| e.reported("edit_skills"))?;

        let Some(player) = self.store.player_mut(player_id) else {
            return Err(RosterError::UnknownPlayer { player: player_id }.reported("edit_skills"));
        };
        update.apply(player);
        debug!(player = player_id, "skills edited");
        Ok(())
    }

    /// Drops all state for the session (screen closed).
    pub fn clear(&mut self) {
        self.store = RosterStore::default();
        self.history.clear();
        self.suggestions.clear();
    }

    pub(super) fn commit(&mut self, entry: HistoryEntry) -> HistoryEntry {
        debug!(op = entry.kind(), depth = self.history.len() + 1, ?entry, "roster change");
        self.history.push(entry);
        debug_assert!(self.store.check_invariants().is_ok());
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BalancingError;
    use crate::models::Skills;
    use crate::roster::fixtures::sample_response;

    #[test]
    fn test_start_seeds_from_service() {
        let service = |_: &BalanceRequest| -> std::result::Result<BalanceResponse, BalancingError> {
            Ok(sample_response())
        };
        let request = BalanceRequest::new(Vec::new(), 2);

        let session = RosterSession::start(&service, &request).unwrap();
        assert_eq!(session.teams().len(), 2);
        assert_eq!(session.reserves().len(), 2);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_start_fails_without_session_on_service_error() {
        let service = |_: &BalanceRequest| -> std::result::Result<BalanceResponse, BalancingError> {
            Err(BalancingError::Unavailable("503".to_string()))
        };
        let request = BalanceRequest::new(Vec::new(), 6);

        let err = RosterSession::start(&service, &request).unwrap_err();
        assert_eq!(err, RosterError::Balancing(BalancingError::Unavailable("503".to_string())));
    }

    #[test]
    fn test_invalid_response_rejected() {
        let mut response = sample_response();
        response.reserves.push(Player::new(2, "Bia clone"));
        assert!(matches!(
            RosterSession::from_response(response),
            Err(RosterError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_edit_skills_keeps_location_and_history() {
        let mut session = RosterSession::from_response(sample_response()).unwrap();
        let update = SkillUpdate { skills: Some(Skills::uniform(5)), is_setter: Some(true) };

        session.edit_skills(10, &update).unwrap();

        assert_eq!(session.location_of(10), Some(PlayerState::InReserve));
        assert!(session.store().player(10).unwrap().is_setter);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_edit_skills_rejects_bad_values_and_unknown_players() {
        let mut session = RosterSession::from_response(sample_response()).unwrap();
        let before = session.snapshot();

        let bad = SkillUpdate { skills: Some(Skills::uniform(0)), is_setter: None };
        assert!(matches!(session.edit_skills(1, &bad), Err(RosterError::InvalidSkill { .. })));

        let ok = SkillUpdate { skills: None, is_setter: Some(true) };
        assert_eq!(
            session.edit_skills(404, &ok),
            Err(RosterError::UnknownPlayer { player: 404 })
        );
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_clear() {
        let mut session = RosterSession::from_response(sample_response()).unwrap();
        session.clear();
        assert!(session.teams().is_empty());
        assert!(session.reserves().is_empty());
        assert!(!session.can_undo());
    }
}
