//! Rotation partner ranking
//!
//! Orders the balancing service's reserve→active distances for one active
//! player. Presentation helper only: the engine links whoever the caller
//! picks.

use serde::{Deserialize, Serialize};

use crate::balancing::TeamRotationSuggestions;
use crate::models::{Player, PlayerId};
use crate::roster::RosterSession;

/// Visual emphasis tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    /// Closest candidate
    Primary,
    /// Second closest
    Secondary,
    Normal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedCandidate {
    pub reserve_id: PlayerId,
    pub distance: f64,
    pub emphasis: Emphasis,
}

/// Candidates for `active_id` on `team_index` that are still in `available`,
/// closest first. Each reserve appears once with its smallest distance;
/// non-finite distances are skipped.
pub fn rank_candidates(
    suggestions: &[TeamRotationSuggestions],
    team_index: usize,
    active_id: PlayerId,
    available: &[Player],
) -> Vec<RankedCandidate> {
    let mut candidates: Vec<(PlayerId, f64)> = suggestions
        .iter()
        .filter(|s| s.team_index == team_index)
        .flat_map(|s| s.candidates.iter())
        .filter(|c| c.active_id == active_id && c.distance.is_finite())
        .filter(|c| available.iter().any(|p| p.id == c.reserve_id))
        .map(|c| (c.reserve_id, c.distance))
        .collect();

    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut seen = Vec::new();
    candidates.retain(|(id, _)| {
        if seen.contains(id) {
            false
        } else {
            seen.push(*id);
            true
        }
    });

    candidates
        .into_iter()
        .enumerate()
        .map(|(rank, (reserve_id, distance))| RankedCandidate {
            reserve_id,
            distance,
            emphasis: match rank {
                0 => Emphasis::Primary,
                1 => Emphasis::Secondary,
                _ => Emphasis::Normal,
            },
        })
        .collect()
}

impl RosterSession {
    /// Ranked partners for an active player, against the current pool.
    pub fn rotation_candidates(&self, active_id: PlayerId) -> Vec<RankedCandidate> {
        let Some(team_index) = self.team_of(active_id) else {
            return Vec::new();
        };
        rank_candidates(self.suggestions(), team_index, active_id, self.reserves())
    }
}
