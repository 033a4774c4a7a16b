//! # roster_core - Volleyball Roster Assignment & Rotation Engine
//!
//! Client-side core for a pickup volleyball organizer: turns a pasted chat
//! list and selected friends into a balancing request, then lets the
//! organizer rearrange the balanced teams with full undo.
//!
//! ## Features
//! - Chat-list parsing (✅ / 💰 markers)
//! - Collision-free temporary ids for unregistered players
//! - Player moves between teams and the reserve pool
//! - Rotation links: a reserve shadows one active player
//! - Single-step undo over every committed change
//! - JSON command API for the UI layer

// Method naming conventions - would require API changes
#![allow(clippy::should_implement_trait)]

pub mod api;
pub mod balancing;
pub mod config;
pub mod draft;
pub mod error;
pub mod id_alloc;
pub mod models;
pub mod parser;
pub mod roster;
pub mod selection;
pub mod suggest;

// Re-export main API functions
pub use api::{
    apply_commands, apply_commands_json, parse_roster_text_json, CommandBatchRequest,
    CommandBatchResponse, RosterCommand,
};
pub use balancing::{BalanceRequest, BalanceResponse, BalancingService};
pub use config::RosterConfig;
pub use draft::RosterDraft;
pub use error::{BalancingError, ConfigError, Result, RosterError};
pub use id_alloc::{allocate_temporary_id, IdAllocator};
pub use models::{Friend, Group, Location, Player, PlayerId, PlayerState, Team};
pub use parser::parse_roster_text;
pub use roster::{HistoryEntry, HistoryStack, RosterSession, RosterSnapshot, RosterStore};
pub use selection::{SelectionKind, SelectionModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
