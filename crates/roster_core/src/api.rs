//! JSON API for the UI layer
//!
//! String in, string out. Every call returns an `ApiResponse<T>` envelope;
//! domain failures land in `error` with a stable code, never as a panic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::RosterError;
use crate::models::{Location, PlayerId, SkillUpdate};
use crate::parser::parse_roster_text;
use crate::roster::{HistoryEntry, RosterSession, RosterSnapshot};

/// API version for schema compatibility
pub const API_VERSION: &str = "v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub schema_version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: &str, message: &str) -> Self {
        Self { code: code.to_string(), message: message.to_string() }
    }
}

impl From<&RosterError> for ApiError {
    fn from(err: &RosterError) -> Self {
        Self::new(err.code(), &err.to_string())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            schema_version: API_VERSION.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// One UI action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RosterCommand {
    Move { player: PlayerId, from: Location, to: Location },
    Link { reserve: PlayerId, team_index: usize, active: PlayerId },
    Unlink { active: PlayerId },
    Undo,
    EditSkills { player: PlayerId, update: SkillUpdate },
}

impl RosterCommand {
    /// Runs the command. `Ok(None)` means success without a history entry.
    pub fn apply(&self, session: &mut RosterSession) -> Result<Option<HistoryEntry>, RosterError> {
        match self {
            RosterCommand::Move { player, from, to } => {
                session.move_player(*player, *from, *to).map(Some)
            }
            RosterCommand::Link { reserve, team_index, active } => {
                session.link_rotation(*reserve, *team_index, *active).map(Some)
            }
            RosterCommand::Unlink { active } => session.unlink_rotation(*active).map(Some),
            RosterCommand::Undo => session.undo().map(Some),
            RosterCommand::EditSkills { player, update } => {
                session.edit_skills(*player, update).map(|_| None)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandBatchRequest {
    pub schema_version: Option<String>,
    pub snapshot: RosterSnapshot,
    #[serde(default)]
    pub commands: Vec<RosterCommand>,
    /// Stop at the first failed command instead of reporting and continuing.
    #[serde(default)]
    pub stop_on_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandOutcome {
    pub index: usize,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<HistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandBatchResponse {
    pub snapshot: RosterSnapshot,
    pub history: Vec<HistoryEntry>,
    pub outcomes: Vec<CommandOutcome>,
}

/// Seeds a session from `request.snapshot` and applies the commands in order.
pub fn apply_commands(request: &CommandBatchRequest) -> Result<CommandBatchResponse, RosterError> {
    let mut session = RosterSession::from_snapshot(request.snapshot.clone())?;
    let mut outcomes = Vec::with_capacity(request.commands.len());

    for (index, command) in request.commands.iter().enumerate() {
        match command.apply(&mut session) {
            Ok(entry) => outcomes.push(CommandOutcome { index, ok: true, entry, error: None }),
            Err(err) => {
                outcomes.push(CommandOutcome {
                    index,
                    ok: false,
                    entry: None,
                    error: Some(ApiError::from(&err)),
                });
                if request.stop_on_error {
                    break;
                }
            }
        }
    }

    Ok(CommandBatchResponse {
        snapshot: session.snapshot(),
        history: session.history().entries().to_vec(),
        outcomes,
    })
}

/// JSON wrapper around [`apply_commands`].
///
/// # Returns
/// JSON string containing `ApiResponse<CommandBatchResponse>`
pub fn apply_commands_json(request_json: &str) -> String {
    let request: CommandBatchRequest = match serde_json::from_str(request_json) {
        Ok(req) => req,
        Err(e) => {
            error!("Failed to parse CommandBatchRequest: {}", e);
            let error = ApiError::new("INVALID_JSON", &format!("Invalid JSON format: {}", e));
            return ApiResponse::<CommandBatchResponse>::error(error).to_json();
        }
    };

    if let Some(version) = request.schema_version.as_deref() {
        if version != API_VERSION {
            warn!("Unsupported schema version: {}", version);
            let error = ApiError::new(
                "UNSUPPORTED_SCHEMA",
                &format!("Unsupported schema version: {}", version),
            );
            return ApiResponse::<CommandBatchResponse>::error(error).to_json();
        }
    }

    match apply_commands(&request) {
        Ok(response) => {
            let failed = response.outcomes.iter().filter(|o| !o.ok).count();
            info!(commands = request.commands.len(), failed, "command batch applied");
            ApiResponse::success(response).to_json()
        }
        Err(err) => ApiResponse::<CommandBatchResponse>::error(ApiError::from(&err)).to_json(),
    }
}

/// # Returns
/// JSON string containing `ApiResponse<Vec<String>>`
pub fn parse_roster_text_json(text: &str) -> String {
    ApiResponse::success(parse_roster_text(text)).to_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn snapshot_json() -> Value {
        json!({
            "teams": [
                {"index": 0, "name": "A", "players": [{"id": 1, "name": "Ana"}, {"id": 2, "name": "Bia"}]},
                {"index": 1, "name": "B", "players": [{"id": 3, "name": "Caio"}]}
            ],
            "reserves": [{"id": 10, "name": "Davi"}]
        })
    }

    #[test]
    fn test_command_json_shape() {
        let command: RosterCommand = serde_json::from_value(json!({
            "op": "move", "player": 1, "from": {"team": 0}, "to": "reserve"
        }))
        .unwrap();
        assert_eq!(
            command,
            RosterCommand::Move { player: 1, from: Location::Team(0), to: Location::Reserve }
        );

        let command: RosterCommand = serde_json::from_value(json!({"op": "undo"})).unwrap();
        assert_eq!(command, RosterCommand::Undo);
    }

    #[test]
    fn test_batch_reports_each_outcome() {
        let request = json!({
            "schema_version": "v1",
            "snapshot": snapshot_json(),
            "commands": [
                {"op": "link", "reserve": 10, "team_index": 0, "active": 2},
                {"op": "link", "reserve": 10, "team_index": 1, "active": 3},
                {"op": "move", "player": 3, "from": {"team": 1}, "to": {"team": 0}},
                {"op": "unlink", "active": 2},
                {"op": "undo"},
                {"op": "edit_skills", "player": 10, "update": {"is_setter": true}}
            ]
        });

        let output: Value = serde_json::from_str(&apply_commands_json(&request.to_string())).unwrap();

        assert_eq!(output["success"], true);
        let outcomes = output["data"]["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), 6);
        assert_eq!(outcomes[1]["ok"], false);
        assert_eq!(outcomes[1]["error"]["code"], "ALREADY_PAIRED");
        assert_eq!(outcomes[4]["entry"]["op"], "rotation_unlink");
        assert_eq!(outcomes[5]["ok"], true);

        // link, move remain after the undo
        assert_eq!(output["data"]["history"].as_array().unwrap().len(), 2);
        assert_eq!(output["data"]["snapshot"]["shadowed"][0]["id"], 10);
        assert_eq!(output["data"]["snapshot"]["shadowed"][0]["is_setter"], true);
    }

    #[test]
    fn test_stop_on_error() {
        let request = json!({
            "snapshot": snapshot_json(),
            "stop_on_error": true,
            "commands": [
                {"op": "undo"},
                {"op": "move", "player": 1, "from": {"team": 0}, "to": "reserve"}
            ]
        });

        let output: Value = serde_json::from_str(&apply_commands_json(&request.to_string())).unwrap();
        let outcomes = output["data"]["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0]["error"]["code"], "NOTHING_TO_UNDO");
        assert_eq!(output["data"]["snapshot"]["teams"][0]["players"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_inputs() {
        let output: Value = serde_json::from_str(&apply_commands_json("{oops")).unwrap();
        assert_eq!(output["success"], false);
        assert_eq!(output["error"]["code"], "INVALID_JSON");

        let request = json!({"schema_version": "v9", "snapshot": snapshot_json()});
        let output: Value = serde_json::from_str(&apply_commands_json(&request.to_string())).unwrap();
        assert_eq!(output["error"]["code"], "UNSUPPORTED_SCHEMA");

        let mut snapshot = snapshot_json();
        snapshot["reserves"] = json!([{"id": 1, "name": "Ana"}]);
        let request = json!({"snapshot": snapshot});
        let output: Value = serde_json::from_str(&apply_commands_json(&request.to_string())).unwrap();
        assert_eq!(output["error"]["code"], "INVALID_SNAPSHOT");
    }

    #[test]
    fn test_parse_roster_text_json() {
        let output: Value =
            serde_json::from_str(&parse_roster_text_json("1- Maria ✅\n2- Pedro\n3- Ana 💰"))
                .unwrap();
        assert_eq!(output["success"], true);
        assert_eq!(output["data"], json!(["Maria", "Ana"]));
        assert_eq!(output["schema_version"], "v1");
    }
}
