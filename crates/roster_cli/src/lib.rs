//! Roster CLI library
//!
//! File-driven wrappers over roster_core so scripted runs and tests share
//! one code path with the `roster` binary.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use roster_core::api::{apply_commands, CommandBatchRequest, CommandBatchResponse};
use roster_core::{
    parse_roster_text, IdAllocator, PlayerId, RosterCommand, RosterConfig, RosterSnapshot,
};

/// Config from an explicit file, else from `ROSTER_CONFIG_PATH`, else defaults.
pub fn load_config(path: Option<&Path>) -> Result<RosterConfig> {
    match path {
        Some(path) => RosterConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => RosterConfig::from_env().context("Failed to load config from environment"),
    }
}

/// Names of confirmed or paid players in a pasted chat list.
pub fn run_parse(input: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read roster text: {}", input.display()))?;
    let names = parse_roster_text(&text);
    info!(lines = text.lines().count(), names = names.len(), "roster text parsed");
    Ok(names)
}

/// One fresh temporary id avoiding every id in `exclude`.
pub fn run_alloc(exclude: &[PlayerId], config: &RosterConfig) -> Result<PlayerId> {
    let mut allocator = IdAllocator::new(config.allocator.clone());
    let id = allocator
        .allocate::<PlayerId, PlayerId>(exclude, &[])
        .context("Failed to allocate temporary id")?;
    Ok(id)
}

/// Seeds a session from a snapshot file and applies a JSON command list.
pub fn run_replay(
    snapshot: &Path,
    commands: &Path,
    stop_on_error: bool,
) -> Result<CommandBatchResponse> {
    let snapshot_json = fs::read_to_string(snapshot)
        .with_context(|| format!("Failed to read snapshot: {}", snapshot.display()))?;
    let snapshot: RosterSnapshot =
        serde_json::from_str(&snapshot_json).context("Failed to parse snapshot JSON")?;

    let commands_json = fs::read_to_string(commands)
        .with_context(|| format!("Failed to read commands: {}", commands.display()))?;
    let commands: Vec<RosterCommand> =
        serde_json::from_str(&commands_json).context("Failed to parse command list JSON")?;

    let request = CommandBatchRequest { schema_version: None, snapshot, commands, stop_on_error };
    let response = apply_commands(&request).context("Failed to seed roster from snapshot")?;

    let failed = response.outcomes.iter().filter(|o| !o.ok).count();
    info!(applied = response.outcomes.len(), failed, "replay finished");
    Ok(response)
}

/// Pretty JSON to `out`, or stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    match out {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
