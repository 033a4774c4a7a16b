// Roster data model: players, teams, locations, friends/groups

pub mod friend;
pub mod player;
pub mod team;

pub use friend::{Friend, Group};
pub use player::{
    HasPlayerId, Player, PlayerId, SkillUpdate, Skills, DEFAULT_SKILL, MAX_SKILL, MIN_SKILL,
};
pub use team::{Location, PlayerState, Team};
