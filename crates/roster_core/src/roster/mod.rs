// Roster assignment & rotation engine
// store (state) → moves (mutations) → history/undo

pub mod history;
pub mod moves;
pub mod session;
pub mod store;
pub mod undo;

pub use history::{HistoryEntry, HistoryStack};
pub use session::RosterSession;
pub use store::{RosterSnapshot, RosterStore};

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::balancing::BalanceResponse;
    use crate::models::{Player, Team};

    /// Two teams (1,2 | 3) and reserves 10, 11.
    pub(crate) fn sample_response() -> BalanceResponse {
        BalanceResponse {
            teams: vec![
                Team::new(0, "Time A").with_players(vec![
                    Player::new(1, "Ana").setter(),
                    Player::new(2, "Bia"),
                ]),
                Team::new(1, "Time B").with_players(vec![Player::new(3, "Caio")]),
            ],
            reserves: vec![Player::new(10, "Davi"), Player::new(11, "Edu")],
            rotation_suggestions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod proptests;
