//! The gamification snapshot and its pure transition function.
//!
//! [`apply`] takes a snapshot, one [`Operation`] and the current time, and
//! mutates the snapshot in place. Every operation is total: input that can
//! be rejected (negative XP, unknown category names) is rejected before an
//! `Operation` can be built. It performs no I/O; persistence is the store's
//! job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::achievement::AchievementTracker;
use super::badge::{Badge, BadgeRegistry};
use super::streak::{StreakCategory, Streaks};
use crate::leveling::{level_from_xp, LevelProgress, MAX_XP};

/// Complete serializable state of one user's gamification profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationState {
    pub xp: u64,
    /// Always equal to `level_from_xp(xp)`.
    pub level: u64,
    pub badges: BadgeRegistry,
    pub streaks: Streaks,
    pub achievements: AchievementTracker,
}

impl GamificationState {
    /// xp=0, level=1, no badges, four zeroed streaks, no achievements.
    pub fn initial() -> Self {
        Self {
            xp: 0,
            level: 1,
            badges: BadgeRegistry::new(),
            streaks: Streaks::new(),
            achievements: AchievementTracker::new(),
        }
    }

    pub fn progress(&self) -> LevelProgress {
        LevelProgress::from_xp(self.xp)
    }

    /// Bring a deserialized snapshot back in line with the invariants.
    /// Returns true if anything had to change.
    pub fn repair(&mut self) -> bool {
        let mut changed = false;
        if self.xp > MAX_XP {
            self.xp = MAX_XP;
            changed = true;
        }
        let level = level_from_xp(self.xp);
        if self.level != level {
            self.level = level;
            changed = true;
        }
        changed |= self.streaks.repair();
        changed |= self.badges.repair();
        changed |= self.achievements.repair();
        changed
    }
}

impl Default for GamificationState {
    fn default() -> Self {
        Self::initial()
    }
}

/// One of the five mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    AddXp {
        amount: u64,
        /// Audit only; has no effect on state.
        reason: Option<String>,
    },
    AwardBadge(Badge),
    UpdateStreak {
        category: StreakCategory,
        increment: bool,
    },
    UpdateAchievement {
        id: String,
        progress: u64,
    },
    Reset,
}

/// What a transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    XpAdded {
        amount: u64,
        xp: u64,
        previous_level: u64,
        level: u64,
    },
    BadgeAwarded {
        id: String,
    },
    BadgeAlreadyEarned {
        id: String,
    },
    StreakUpdated {
        category: StreakCategory,
        current: u32,
        longest: u32,
    },
    AchievementUpdated {
        id: String,
        completed: bool,
        newly_completed: bool,
    },
    UnknownAchievement {
        id: String,
    },
    Reset,
}

impl Outcome {
    /// False for calls that were ignored and left state untouched.
    pub fn is_applied(&self) -> bool {
        !matches!(
            self,
            Outcome::BadgeAlreadyEarned { .. } | Outcome::UnknownAchievement { .. }
        )
    }

    pub fn leveled_up(&self) -> bool {
        matches!(self, Outcome::XpAdded { previous_level, level, .. } if level > previous_level)
    }
}

/// Apply `op` to `state` at time `now`.
pub fn apply(state: &mut GamificationState, op: Operation, now: DateTime<Utc>) -> Outcome {
    match op {
        Operation::AddXp { amount, reason: _ } => {
            let previous_level = state.level;
            state.xp = state.xp.saturating_add(amount).min(MAX_XP);
            state.level = level_from_xp(state.xp);
            Outcome::XpAdded {
                amount,
                xp: state.xp,
                previous_level,
                level: state.level,
            }
        }
        Operation::AwardBadge(badge) => {
            let id = badge.id.clone();
            if state.badges.award(badge, now) {
                Outcome::BadgeAwarded { id }
            } else {
                Outcome::BadgeAlreadyEarned { id }
            }
        }
        Operation::UpdateStreak {
            category,
            increment,
        } => {
            let streak = state.streaks.update(category, increment, now);
            Outcome::StreakUpdated {
                category,
                current: streak.current_count,
                longest: streak.longest_count,
            }
        }
        Operation::UpdateAchievement { id, progress } => {
            match state.achievements.update(&id, progress, now) {
                Some(change) => Outcome::AchievementUpdated {
                    id,
                    completed: change.completed,
                    newly_completed: change.newly_completed,
                },
                None => Outcome::UnknownAchievement { id },
            }
        }
        Operation::Reset => {
            *state = GamificationState::initial();
            Outcome::Reset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::achievement::AchievementDefinition;
    use crate::gamification::badge::{BadgeCategory, BadgeRarity};
    use crate::text::LocalizedText;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 7, 30, 0).unwrap()
    }

    fn add_xp(amount: u64) -> Operation {
        Operation::AddXp {
            amount,
            reason: None,
        }
    }

    #[test]
    fn add_250_xp_reaches_level_three() {
        let mut state = GamificationState::initial();
        let outcome = apply(&mut state, add_xp(250), t0());
        assert_eq!(state.xp, 250);
        assert_eq!(state.level, 3);
        assert_eq!(state.progress().xp_into_level, 50);
        assert!(outcome.leveled_up());
    }

    #[test]
    fn reason_does_not_affect_state() {
        let mut with_reason = GamificationState::initial();
        let mut without = GamificationState::initial();
        apply(
            &mut with_reason,
            Operation::AddXp {
                amount: 40,
                reason: Some("quiz".into()),
            },
            t0(),
        );
        apply(&mut without, add_xp(40), t0());
        assert_eq!(with_reason, without);
    }

    #[test]
    fn xp_is_capped_below_the_last_level_boundary() {
        let mut state = GamificationState::initial();
        state.xp = u64::MAX - 1;
        state.repair();
        assert_eq!(state.xp, MAX_XP);

        apply(&mut state, add_xp(10), t0());
        assert_eq!(state.xp, MAX_XP);
        assert_eq!(state.level, level_from_xp(MAX_XP));
        assert!(state.xp < crate::leveling::xp_for_level(state.level));
    }

    #[test]
    fn ignored_outcomes_are_not_applied() {
        let mut state = GamificationState::initial();
        let outcome = apply(
            &mut state,
            Operation::UpdateAchievement {
                id: "ghost".into(),
                progress: 1,
            },
            t0(),
        );
        assert!(!outcome.is_applied());
        assert_eq!(state, GamificationState::initial());
    }

    #[test]
    fn reset_restores_initial_snapshot() {
        let mut state = GamificationState::initial();
        apply(&mut state, add_xp(900), t0());
        apply(
            &mut state,
            Operation::AwardBadge(Badge::new(
                "b1",
                LocalizedText::new("B", "B"),
                LocalizedText::new("d", "d"),
                "icon",
                BadgeRarity::Epic,
                BadgeCategory::Special,
            )),
            t0(),
        );
        apply(
            &mut state,
            Operation::UpdateStreak {
                category: StreakCategory::Login,
                increment: true,
            },
            t0(),
        );
        state
            .achievements
            .provision(&[AchievementDefinition::new(
                "a1",
                LocalizedText::new("t", "t"),
                LocalizedText::new("d", "d"),
                3,
            )])
            .unwrap();

        assert_eq!(apply(&mut state, Operation::Reset, t0()), Outcome::Reset);
        assert_eq!(state, GamificationState::initial());
    }

    #[test]
    fn repair_recomputes_stale_level() {
        let mut state = GamificationState::initial();
        state.xp = 420;
        assert!(state.repair());
        assert_eq!(state.level, 5);
        assert!(!state.repair());
    }

    #[test]
    fn snapshot_with_empty_streak_map_reads_every_category() {
        let state: GamificationState = serde_json::from_str(
            r#"{"xp":0,"level":1,"badges":[],"streaks":{},"achievements":[]}"#,
        )
        .unwrap();
        for category in StreakCategory::ALL {
            let streak = state.streaks.get(category);
            assert_eq!((streak.current_count, streak.longest_count), (0, 0));
        }
        assert_eq!(state, GamificationState::initial());
    }

    #[test]
    fn snapshot_uses_camel_case_fields() {
        let json = serde_json::to_value(GamificationState::initial()).unwrap();
        assert_eq!(json["xp"], 0);
        assert_eq!(json["level"], 1);
        assert!(json["badges"].as_array().unwrap().is_empty());
        assert_eq!(json["streaks"]["login"]["longestCount"], 0);
    }
}
