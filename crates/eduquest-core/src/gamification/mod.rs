//! XP, levels, streaks, badges and achievements for one user.

pub mod achievement;
pub mod badge;
pub mod catalog;
pub mod state;
pub mod store;
pub mod streak;

pub use achievement::{Achievement, AchievementChange, AchievementDefinition, AchievementTracker};
pub use badge::{Badge, BadgeCategory, BadgeRarity, BadgeRegistry};
pub use state::{apply, GamificationState, Operation, Outcome};
pub use store::{
    GamificationStore, LoadOutcome, MutationReport, Persistence, DEFAULT_SNAPSHOT_KEY,
    MAX_PENDING_EVENTS,
};
pub use streak::{Streak, StreakCategory, Streaks};
