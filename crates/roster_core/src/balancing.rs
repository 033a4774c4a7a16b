//! Balancing service seam
//!
//! Initial team assignment is computed remotely. This module only carries the
//! request/response shapes and the trait the session is seeded through.

use serde::{Deserialize, Serialize};

use crate::error::BalancingError;
use crate::models::{Player, PlayerId, Team};
use crate::roster::RosterSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceRequest {
    pub players: Vec<Player>,
    pub team_size: usize,
}

impl BalanceRequest {
    pub fn new(players: Vec<Player>, team_size: usize) -> Self {
        Self { players, team_size }
    }
}

/// Skill distance between a reserve and an active player; lower is closer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RotationCandidate {
    pub reserve_id: PlayerId,
    pub active_id: PlayerId,
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRotationSuggestions {
    pub team_index: usize,
    #[serde(default)]
    pub candidates: Vec<RotationCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalanceResponse {
    pub teams: Vec<Team>,
    #[serde(default)]
    pub reserves: Vec<Player>,
    /// UI ranking hints only; roster correctness never depends on them.
    #[serde(default)]
    pub rotation_suggestions: Vec<TeamRotationSuggestions>,
}

impl BalanceResponse {
    pub fn snapshot(&self) -> RosterSnapshot {
        RosterSnapshot {
            teams: self.teams.clone(),
            reserves: self.reserves.clone(),
            shadowed: Vec::new(),
        }
    }
}

pub trait BalancingService {
    fn balance(&self, request: &BalanceRequest) -> Result<BalanceResponse, BalancingError>;
}

impl<F> BalancingService for F
where
    F: Fn(&BalanceRequest) -> Result<BalanceResponse, BalancingError>,
{
    fn balance(&self, request: &BalanceRequest) -> Result<BalanceResponse, BalancingError> {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_defaults() {
        let json = r#"{"teams": [{"index": 0, "name": "A", "players": [{"id": 1, "name": "Ana"}]}]}"#;
        let response: BalanceResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.teams.len(), 1);
        assert!(response.reserves.is_empty());
        assert!(response.rotation_suggestions.is_empty());
        assert!(response.snapshot().shadowed.is_empty());
    }

    #[test]
    fn test_closure_as_service() {
        let service = |request: &BalanceRequest| -> Result<BalanceResponse, BalancingError> {
            Ok(BalanceResponse {
                teams: vec![Team::new(0, "Único").with_players(request.players.clone())],
                reserves: Vec::new(),
                rotation_suggestions: Vec::new(),
            })
        };

        let request = BalanceRequest::new(vec![Player::new(1, "Ana")], 6);
        let response = service.balance(&request).unwrap();
        assert_eq!(response.teams[0].players.len(), 1);
    }
}
