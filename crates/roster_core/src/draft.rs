//! RosterDraft: candidate list for the balancing request
//!
//! Combines checked friends, checked groups and names pasted from a chat
//! list. Pasted names that match a friend reuse that friend; the rest become
//! temporary players with locally allocated ids.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::balancing::BalanceRequest;
use crate::config::AssemblyConfig;
use crate::error::Result;
use crate::id_alloc::IdAllocator;
use crate::models::{Friend, Group, Player, PlayerId};
use crate::selection::{SelectionKind, SelectionModel};

/// Case- and spacing-insensitive name key ("  ana  Maria" == "Ana Maria").
fn name_key(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

pub struct RosterDraft<'a> {
    friends: &'a [Friend],
    groups: &'a [Group],
    config: AssemblyConfig,
}

impl<'a> RosterDraft<'a> {
    pub fn new(friends: &'a [Friend], groups: &'a [Group], config: AssemblyConfig) -> Self {
        Self { friends, groups, config }
    }

    fn friend(&self, id: PlayerId) -> Option<&'a Friend> {
        self.friends.iter().find(|f| f.id == id)
    }

    /// Selected friends, then members of selected groups, then pasted names.
    /// First occurrence wins; order is otherwise kept.
    pub fn candidates(
        &self,
        selection: &SelectionModel,
        pasted_names: &[String],
        allocator: &mut IdAllocator,
    ) -> Result<Vec<Player>> {
        let mut drafted: Vec<Player> = Vec::new();
        let mut included: HashSet<PlayerId> = HashSet::new();

        let mut include = |friend: &Friend, drafted: &mut Vec<Player>| {
            if included.insert(friend.id) {
                drafted.push(friend.to_player());
            }
        };

        for friend in self.friends {
            if selection.is_selected(SelectionKind::Friend, friend.id) {
                include(friend, &mut drafted);
            }
        }

        for group in self.groups {
            if !selection.is_selected(SelectionKind::Group, group.id) {
                continue;
            }
            for member_id in &group.member_ids {
                match self.friend(*member_id) {
                    Some(friend) => include(friend, &mut drafted),
                    None => warn!(group = group.id, member = member_id, "unknown group member"),
                }
            }
        }

        let mut temporary_names: HashSet<String> = HashSet::new();
        for name in pasted_names {
            let key = name_key(name);
            if key.is_empty() {
                continue;
            }

            if let Some(friend) = self.friends.iter().find(|f| name_key(&f.name) == key) {
                include(friend, &mut drafted);
                continue;
            }

            // 같은 이름 반복 붙여넣기는 한 명으로 취급
            if !temporary_names.insert(key) {
                continue;
            }

            let id = allocator.allocate(self.friends, &drafted)?;
            debug!(id, name = %name, "temporary player drafted");
            drafted.push(Player::temporary(id, name.trim(), self.config.default_skill));
        }

        Ok(drafted)
    }

    pub fn request(
        &self,
        selection: &SelectionModel,
        pasted_names: &[String],
        allocator: &mut IdAllocator,
    ) -> Result<BalanceRequest> {
        let players = self.candidates(selection, pasted_names, allocator)?;
        Ok(BalanceRequest::new(players, self.config.team_size))
    }
}
