use serde::{Deserialize, Serialize};
use std::fmt;

use super::player::{Player, PlayerId};

/// A list a player can be moved between.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Team(usize),
    Reserve,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Team(index) => write!(f, "team {}", index),
            Location::Reserve => write!(f, "reserve"),
        }
    }
}

/// Where a player currently lives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    InTeam(usize),
    InReserve,
    /// Linked as the rotation partner of `owner`, listed nowhere else.
    ShadowPaired { owner: PlayerId },
}

impl PlayerState {
    /// The movable list backing this state, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            PlayerState::InTeam(index) => Some(Location::Team(*index)),
            PlayerState::InReserve => Some(Location::Reserve),
            PlayerState::ShadowPaired { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub index: usize,
    pub name: String,
    /// Insertion order, kept for display stability.
    #[serde(default)]
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self { index, name: name.into(), players: Vec::new() }
    }

    pub fn with_players(mut self, players: Vec<Player>) -> Self {
        self.players = players;
        self
    }

    pub fn position_of(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.position_of(player_id).is_some()
    }
}
