//! File storage for saved sessions and the leaderboard

use std::path::Path;

use anyhow::Context;
use tokio::fs;
use tracing::{debug, info};

use crate::{
    persistence::{self, LeaderboardRecord, SessionSnapshot},
    state::Leaderboard,
};

pub async fn write_session(path: &Path, snapshot: &SessionSnapshot) -> anyhow::Result<()> {
    let bytes = persistence::encode(snapshot)?;
    fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write session to {}", path.display()))?;
    debug!("Session written to {}", path.display());
    Ok(())
}

pub async fn read_session(path: &Path) -> anyhow::Result<SessionSnapshot> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read session from {}", path.display()))?;
    Ok(persistence::decode(&bytes)?)
}

pub async fn write_leaderboard(path: &Path, board: &Leaderboard) -> anyhow::Result<()> {
    let bytes = LeaderboardRecord::from_board(board).encode()?;
    fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write leaderboard to {}", path.display()))?;
    debug!("Leaderboard written to {}", path.display());
    Ok(())
}

/// Load a previously written leaderboard into `board`. A missing file is not an error.
pub async fn read_leaderboard(path: &Path, board: &Leaderboard) -> anyhow::Result<()> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        info!("No leaderboard at {}, starting empty", path.display());
        return Ok(());
    }

    let bytes = fs::read(path)
        .await
        .with_context(|| format!("Failed to read leaderboard from {}", path.display()))?;
    LeaderboardRecord::decode(&bytes)
        .with_context(|| format!("Leaderboard at {} is unreadable", path.display()))?
        .apply_to(board);
    info!("Leaderboard loaded from {} ({} entries)", path.display(), board.len());
    Ok(())
}
