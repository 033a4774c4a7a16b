use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Session-unique player identifier.
///
/// Account-backed players use their persistent id. Offline temporaries get a
/// positive id from [`crate::IdAllocator`]; imported snapshots may also carry
/// negative synthetic ids.
pub type PlayerId = i64;

pub const MIN_SKILL: u8 = 1;
pub const MAX_SKILL: u8 = 5;
pub const DEFAULT_SKILL: u8 = 3;

/// Anything that carries a player id (players, friends, raw ids).
pub trait HasPlayerId {
    fn player_id(&self) -> PlayerId;
}

impl HasPlayerId for PlayerId {
    fn player_id(&self) -> PlayerId {
        *self
    }
}

/// Volleyball skill ratings, each in `1..=5`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Skills {
    pub attack: u8,
    pub block: u8,
    pub defense: u8,
    pub serve: u8,
    pub reception: u8,
}

impl Default for Skills {
    fn default() -> Self {
        Self::uniform(DEFAULT_SKILL)
    }
}

impl Skills {
    pub fn uniform(value: u8) -> Self {
        Self { attack: value, block: value, defense: value, serve: value, reception: value }
    }

    fn fields(&self) -> [(&'static str, u8); 5] {
        [
            ("attack", self.attack),
            ("block", self.block),
            ("defense", self.defense),
            ("serve", self.serve),
            ("reception", self.reception),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (attribute, value) in self.fields() {
            if !(MIN_SKILL..=MAX_SKILL).contains(&value) {
                return Err(RosterError::InvalidSkill { attribute, value });
            }
        }
        Ok(())
    }
}

/// A participant in one game session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub skills: Skills,
    /// Levantador
    #[serde(default)]
    pub is_setter: bool,
    /// Reserve currently rotated in this player's shadow (id lookup, not ownership).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_with: Option<PlayerId>,
    /// Created locally, not backed by an account.
    #[serde(default)]
    pub temporary: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            skills: Skills::default(),
            is_setter: false,
            paired_with: None,
            temporary: false,
        }
    }

    /// Offline participant with flat default skills.
    pub fn temporary(id: PlayerId, name: impl Into<String>, skill: u8) -> Self {
        Self { skills: Skills::uniform(skill), temporary: true, ..Self::new(id, name) }
    }

    pub fn with_skills(mut self, skills: Skills) -> Self {
        self.skills = skills;
        self
    }

    pub fn setter(mut self) -> Self {
        self.is_setter = true;
        self
    }

    pub fn is_paired(&self) -> bool {
        self.paired_with.is_some()
    }
}

impl HasPlayerId for Player {
    fn player_id(&self) -> PlayerId {
        self.id
    }
}

/// Out-of-band skill edit. `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SkillUpdate {
    #[serde(default)]
    pub skills: Option<Skills>,
    #[serde(default)]
    pub is_setter: Option<bool>,
}

impl SkillUpdate {
    pub fn validate(&self) -> Result<()> {
        match &self.skills {
            Some(skills) => skills.validate(),
            None => Ok(()),
        }
    }

    /// Touches only skill data; location and links belong to the engine.
    pub(crate) fn apply(&self, player: &mut Player) {
        if let Some(skills) = self.skills {
            player.skills = skills;
        }
        if let Some(is_setter) = self.is_setter {
            player.is_setter = is_setter;
        }
    }
}
