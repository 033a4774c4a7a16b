//! Friend/group selection used while assembling a roster.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use crate::error::{Result, RosterError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Friend,
    Group,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SelectionKey {
    pub kind: SelectionKind,
    pub id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: HashSet<SelectionKey>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `(kind, id)`. Returns whether it is now selected.
    ///
    /// A missing id is rejected without touching the selection.
    pub fn toggle(&mut self, kind: SelectionKind, id: Option<i64>) -> Result<bool> {
        let Some(id) = id else {
            warn!(?kind, "ignoring selection toggle without id");
            return Err(RosterError::InvalidSelectionId);
        };

        let key = SelectionKey { kind, id };
        if self.selected.remove(&key) {
            Ok(false)
        } else {
            self.selected.insert(key);
            Ok(true)
        }
    }

    pub fn is_selected(&self, kind: SelectionKind, id: i64) -> bool {
        self.selected.contains(&SelectionKey { kind, id })
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids of one kind, sorted for stable output.
    pub fn ids(&self, kind: SelectionKind) -> Vec<i64> {
        let mut ids: Vec<i64> =
            self.selected.iter().filter(|k| k.kind == kind).map(|k| k.id).collect();
        ids.sort_unstable();
        ids
    }
}
