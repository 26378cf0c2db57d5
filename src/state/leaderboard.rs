//! Bounded best-times leaderboard shared by every session in the process

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Number of best times kept on the board.
pub const LEADERBOARD_CAPACITY: usize = 3;

static GLOBAL_LEADERBOARD: OnceLock<Leaderboard> = OnceLock::new();

/// A player's best time in seconds. Lower is better.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// What a submission did to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// New name added while the board had room.
    Inserted,
    /// Existing name got a new score.
    Replaced { previous: u32 },
    /// New name pushed the worst entry off a full board.
    Evicted { name: String, score: u32 },
    /// Board left unchanged.
    Discarded,
}

/// Top-[`LEADERBOARD_CAPACITY`] best times across distinct names.
#[derive(Debug, Default)]
pub struct Leaderboard {
    best_times: Mutex<HashMap<String, u32>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide board that ranks every game played.
    pub fn global() -> &'static Leaderboard {
        GLOBAL_LEADERBOARD.get_or_init(Leaderboard::new)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u32>> {
        self.best_times.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Offer `score` for `name`.
    ///
    /// Until the board is full every submission is stored, overwriting any
    /// earlier score for the same name even when it is worse. Once full, a
    /// known name only takes a strictly lower score, and a new name only gets
    /// in by strictly beating the worst entry. Ties never evict.
    pub fn submit(&self, name: &str, score: u32) -> SubmitOutcome {
        let mut best_times = self.lock();

        if best_times.len() < LEADERBOARD_CAPACITY {
            return match best_times.insert(name.to_string(), score) {
                Some(previous) => {
                    if score > previous {
                        warn!(
                            "Leaderboard not full yet: {} overwritten with worse time {}s (was {}s)",
                            name, score, previous
                        );
                    } else {
                        info!("Leaderboard: {} updated to {}s (was {}s)", name, score, previous);
                    }
                    SubmitOutcome::Replaced { previous }
                }
                None => {
                    info!("Leaderboard: {} added with {}s", name, score);
                    SubmitOutcome::Inserted
                }
            };
        }

        if let Some(stored) = best_times.get_mut(name) {
            if score < *stored {
                let previous = std::mem::replace(stored, score);
                info!("Leaderboard: {} improved to {}s (was {}s)", name, score, previous);
                return SubmitOutcome::Replaced { previous };
            }
            debug!("Leaderboard: {}s does not improve {}'s {}s", score, name, stored);
            return SubmitOutcome::Discarded;
        }

        let worst = best_times
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(worst_name, &worst_score)| (worst_name.clone(), worst_score));

        match worst {
            Some((worst_name, worst_score)) if score < worst_score => {
                best_times.remove(&worst_name);
                best_times.insert(name.to_string(), score);
                info!(
                    "Leaderboard: {} entered with {}s, evicting {} ({}s)",
                    name, score, worst_name, worst_score
                );
                SubmitOutcome::Evicted {
                    name: worst_name,
                    score: worst_score,
                }
            }
            _ => {
                debug!("Leaderboard: {}s for {} does not beat the board", score, name);
                SubmitOutcome::Discarded
            }
        }
    }

    /// Entries ordered by score, then name.
    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .lock()
            .iter()
            .map(|(name, &score)| LeaderboardEntry {
                name: name.clone(),
                score,
            })
            .collect();
        entries.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.name.cmp(&b.name)));
        entries
    }

    pub fn best_for(&self, name: &str) -> Option<u32> {
        self.lock().get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Replay persisted entries through [`Leaderboard::submit`].
    pub fn restore<I>(&self, entries: I)
    where
        I: IntoIterator<Item = LeaderboardEntry>,
    {
        for entry in entries {
            self.submit(&entry.name, entry.score);
        }
        debug!("Leaderboard restored with {} entries", self.len());
    }
}
