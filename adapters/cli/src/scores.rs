//! JSON persistence of the leaderboard between runs.

use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Context, Result};
use energy_grid_system_scoring::Leaderboard;
use tracing::info;

/// Reads the leaderboard stored at `path`, starting fresh when the file does
/// not exist yet.
pub(crate) fn load(path: &Path) -> Result<Leaderboard> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no leaderboard found, starting fresh");
            return Ok(Leaderboard::default());
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read leaderboard {}", path.display()));
        }
    };
    let leaderboard: Leaderboard = serde_json::from_str(&json)
        .with_context(|| format!("malformed leaderboard {}", path.display()))?;
    info!(
        path = %path.display(),
        entries = leaderboard.entries().len(),
        "leaderboard loaded"
    );
    Ok(leaderboard)
}

/// Writes the leaderboard to `path` as pretty-printed JSON.
pub(crate) fn save(path: &Path, leaderboard: &Leaderboard) -> Result<()> {
    let json =
        serde_json::to_string_pretty(leaderboard).context("failed to encode leaderboard")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write leaderboard {}", path.display()))
}
