//! The gamification aggregate.
//!
//! [`GamificationStore`] owns one user's [`GamificationState`], runs every
//! mutation through the pure [`apply`] transition, and writes the whole
//! snapshot to its [`SnapshotStore`] after each applied change. Writes are
//! optimistic: a failed save keeps the in-memory change and is reported in
//! the [`MutationReport`], and [`GamificationStore::flush`] retries it.
//!
//! The store takes `&mut self` for every mutation, so callers observe a
//! snapshot either before or after a call, never in between. Hosts that
//! share one store across threads wrap it in a `Mutex`.

use tracing::{debug, info, warn};

use super::achievement::AchievementDefinition;
use super::badge::Badge;
use super::state::{apply, GamificationState, Operation, Outcome};
use super::streak::StreakCategory;
use crate::clock::{Clock, SystemClock};
use crate::error::{GamificationError, StorageError};
use crate::events::Event;
use crate::leveling::LevelProgress;
use crate::storage::SnapshotStore;

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_SNAPSHOT_KEY: &str = "gamification-storage";

/// Undrained events kept by a store; older ones are dropped first.
pub const MAX_PENDING_EVENTS: usize = 1024;

/// How the initial state was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet; started from the initial snapshot.
    Fresh,
    /// A stored snapshot was used. `repaired` is true if its derived
    /// fields had to be brought back in line.
    Restored { repaired: bool },
    /// The stored snapshot was unreadable; started from the initial one.
    Recovered { reason: String },
}

/// Whether a mutation reached durable storage.
#[derive(Debug)]
pub enum Persistence {
    Saved,
    /// The call was ignored, so there was nothing to write.
    Skipped,
    /// In-memory state changed but the write failed. Retry with `flush`.
    Failed(StorageError),
}

impl Persistence {
    pub fn is_failed(&self) -> bool {
        matches!(self, Persistence::Failed(_))
    }
}

#[derive(Debug)]
pub struct MutationReport {
    pub outcome: Outcome,
    pub persistence: Persistence,
}

pub struct GamificationStore<S, C = SystemClock> {
    state: GamificationState,
    storage: S,
    key: String,
    clock: C,
    events: Vec<Event>,
    unsaved: bool,
}

impl<S: SnapshotStore> GamificationStore<S, SystemClock> {
    /// Open with the wall clock and the default key.
    pub fn open_default(storage: S) -> (Self, LoadOutcome) {
        Self::open(storage, DEFAULT_SNAPSHOT_KEY, SystemClock)
    }
}

impl<S: SnapshotStore, C: Clock> GamificationStore<S, C> {
    /// Restore the snapshot stored under `key`, or start fresh.
    ///
    /// Never fails: unreadable or mismatched snapshots fall back to the
    /// initial state and are reported as [`LoadOutcome::Recovered`].
    pub fn open(storage: S, key: impl Into<String>, clock: C) -> (Self, LoadOutcome) {
        let key = key.into();
        let (state, outcome) = match storage.load(&key) {
            Ok(None) => (GamificationState::initial(), LoadOutcome::Fresh),
            Ok(Some(raw)) => match serde_json::from_str::<GamificationState>(&raw) {
                Ok(mut state) => {
                    let repaired = state.repair();
                    if repaired {
                        warn!(key = %key, "stored snapshot violated invariants; repaired on load");
                    }
                    (state, LoadOutcome::Restored { repaired })
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "corrupt snapshot; starting from initial state");
                    (
                        GamificationState::initial(),
                        LoadOutcome::Recovered {
                            reason: e.to_string(),
                        },
                    )
                }
            },
            Err(e) => {
                warn!(key = %key, error = %e, "snapshot load failed; starting from initial state");
                (
                    GamificationState::initial(),
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                    },
                )
            }
        };
        debug!(key = %key, ?outcome, xp = state.xp, "gamification store opened");

        let store = Self {
            state,
            storage,
            key,
            clock,
            events: Vec::new(),
            unsaved: false,
        };
        (store, outcome)
    }

    pub fn snapshot(&self) -> &GamificationState {
        &self.state
    }

    pub fn progress(&self) -> LevelProgress {
        self.state.progress()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// True if the last applied change has not reached storage.
    pub fn needs_flush(&self) -> bool {
        self.unsaved
    }

    /// Teardown, handing back the final state.
    pub fn into_state(self) -> GamificationState {
        self.state
    }

    /// Return and clear the events produced since the last drain.
    ///
    /// Long-lived hosts should drain regularly: only the newest
    /// [`MAX_PENDING_EVENTS`] are kept.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn add_xp(&mut self, amount: u64, reason: Option<&str>) -> MutationReport {
        self.run(Operation::AddXp {
            amount,
            reason: reason.map(str::to_string),
        })
    }

    /// Like [`add_xp`](Self::add_xp) for callers holding a signed amount.
    /// Negative amounts are rejected.
    pub fn add_xp_signed(&mut self, amount: i64, reason: Option<&str>) -> Result<MutationReport, GamificationError> {
        let amount = u64::try_from(amount).map_err(|_| GamificationError::NegativeXp(amount))?;
        Ok(self.add_xp(amount, reason))
    }

    pub fn award_badge(&mut self, badge: Badge) -> MutationReport {
        self.run(Operation::AwardBadge(badge))
    }

    pub fn update_streak(&mut self, category: StreakCategory, increment: bool) -> MutationReport {
        self.run(Operation::UpdateStreak {
            category,
            increment,
        })
    }

    /// Streak update for stringly-typed callers; unknown names are
    /// rejected with [`GamificationError::InvalidCategory`].
    pub fn update_streak_by_name(&mut self, category: &str, increment: bool) -> Result<MutationReport, GamificationError> {
        let category = category.parse::<StreakCategory>()?;
        Ok(self.update_streak(category, increment))
    }

    pub fn update_achievement(&mut self, id: &str, progress: u64) -> MutationReport {
        self.run(Operation::UpdateAchievement {
            id: id.to_string(),
            progress,
        })
    }

    pub fn reset(&mut self) -> MutationReport {
        self.run(Operation::Reset)
    }

    /// Start tracking externally defined achievements. Ids already tracked
    /// keep their progress. Returns how many were added; nothing is written
    /// when that is zero.
    pub fn provision_achievements(
        &mut self,
        defs: &[AchievementDefinition],
    ) -> Result<(usize, Persistence), GamificationError> {
        let added = self.state.achievements.provision(defs)?;
        if added == 0 {
            return Ok((0, Persistence::Skipped));
        }
        let now = self.clock.now();
        info!(added, "achievements provisioned");
        self.record(vec![Event::AchievementsProvisioned { added, at: now }]);
        Ok((added, self.persist()))
    }

    /// Write the current snapshot again. The retry hook for a failed save.
    pub fn flush(&mut self) -> Result<(), StorageError> {
        match self.persist() {
            Persistence::Failed(e) => Err(e),
            _ => Ok(()),
        }
    }

    fn run(&mut self, op: Operation) -> MutationReport {
        let now = self.clock.now();
        let reason = match &op {
            Operation::AddXp { reason, .. } => reason.clone(),
            _ => None,
        };

        let outcome = apply(&mut self.state, op, now);
        if !outcome.is_applied() {
            debug!(?outcome, "mutation ignored");
            return MutationReport {
                outcome,
                persistence: Persistence::Skipped,
            };
        }

        self.log_outcome(&outcome, reason.as_deref());
        self.record(Event::from_outcome(&outcome, reason.as_deref(), now));
        let persistence = self.persist();
        MutationReport {
            outcome,
            persistence,
        }
    }

    fn record(&mut self, events: Vec<Event>) {
        self.events.extend(events);
        let overflow = self.events.len().saturating_sub(MAX_PENDING_EVENTS);
        if overflow > 0 {
            self.events.drain(..overflow);
            debug!(dropped = overflow, "event buffer full; oldest events dropped");
        }
    }

    fn log_outcome(&self, outcome: &Outcome, reason: Option<&str>) {
        match outcome {
            Outcome::XpAdded {
                amount,
                xp,
                previous_level,
                level,
            } => {
                debug!(amount, xp, reason = reason.unwrap_or(""), "xp added");
                if level > previous_level {
                    info!(from = previous_level, to = level, "level up");
                }
            }
            Outcome::BadgeAwarded { id } => info!(badge = %id, "badge awarded"),
            Outcome::AchievementUpdated {
                id,
                newly_completed: true,
                ..
            } => info!(achievement = %id, "achievement completed"),
            Outcome::Reset => info!("gamification state reset"),
            other => debug!(outcome = ?other, "mutation applied"),
        }
    }

    fn persist(&mut self) -> Persistence {
        let result = serde_json::to_string(&self.state)
            .map_err(|e| StorageError::PersistenceFailure {
                key: self.key.clone(),
                message: e.to_string(),
            })
            .and_then(|raw| self.storage.save(&self.key, &raw));

        match result {
            Ok(()) => {
                self.unsaved = false;
                Persistence::Saved
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "snapshot not persisted; in-memory state kept");
                self.unsaved = true;
                Persistence::Failed(e)
            }
        }
    }
}
