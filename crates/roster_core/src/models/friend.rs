use serde::{Deserialize, Serialize};

use super::player::{HasPlayerId, Player, PlayerId, Skills};

/// A saved contact that can be invited to a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Friend {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub is_setter: bool,
}

impl Friend {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), skills: Skills::default(), is_setter: false }
    }

    pub fn to_player(&self) -> Player {
        Player {
            skills: self.skills,
            is_setter: self.is_setter,
            ..Player::new(self.id, self.name.clone())
        }
    }
}

impl HasPlayerId for Friend {
    fn player_id(&self) -> PlayerId {
        self.id
    }
}

/// A named set of friends that usually play together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub member_ids: Vec<PlayerId>,
}

impl Group {
    pub fn new(id: i64, name: impl Into<String>, member_ids: Vec<PlayerId>) -> Self {
        Self { id, name: name.into(), member_ids }
    }
}
