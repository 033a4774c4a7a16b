//! Reversible record of committed roster changes.

use serde::{Deserialize, Serialize};

use crate::models::{Location, PlayerId};

/// One committed change, carrying what is needed to reverse it exactly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HistoryEntry {
    Move {
        player: PlayerId,
        from: Location,
        to: Location,
        /// Index the player had in `from` before the move.
        from_position: usize,
    },
    RotationLink {
        active: PlayerId,
        reserve: PlayerId,
        team_index: usize,
    },
    RotationUnlink {
        active: PlayerId,
        reserve: PlayerId,
        team_index: usize,
    },
}

impl HistoryEntry {
    /// The change that undoes this one.
    pub fn inverse(&self) -> HistoryEntry {
        match *self {
            HistoryEntry::Move { player, from, to, from_position } => {
                HistoryEntry::Move { player, from: to, to: from, from_position }
            }
            HistoryEntry::RotationLink { active, reserve, team_index } => {
                HistoryEntry::RotationUnlink { active, reserve, team_index }
            }
            HistoryEntry::RotationUnlink { active, reserve, team_index } => {
                HistoryEntry::RotationLink { active, reserve, team_index }
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HistoryEntry::Move { .. } => "move",
            HistoryEntry::RotationLink { .. } => "rotation_link",
            HistoryEntry::RotationUnlink { .. } => "rotation_unlink",
        }
    }
}

/// Append-only until popped; no redo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
