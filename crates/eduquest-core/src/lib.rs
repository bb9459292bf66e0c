//! # EduQuest Core Library
//!
//! This library provides the gamification engine behind the EduQuest
//! school dashboard. All operations are available through the standalone
//! CLI binary; any UI is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Leveling**: pure XP/level arithmetic, callable without any state
//! - **Gamification**: streaks, badges and achievements, a pure transition
//!   function over the snapshot, and the store that persists it
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`GamificationStore`]: the aggregate callers mutate
//! - [`GamificationState`]: the serializable snapshot
//! - [`Database`]: durable snapshot storage
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod gamification;
pub mod leveling;
pub mod storage;
pub mod text;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, GamificationError, Result, StorageError};
pub use events::Event;
pub use gamification::{
    Achievement, AchievementDefinition, Badge, BadgeCategory, BadgeRarity, GamificationState,
    GamificationStore, LoadOutcome, MutationReport, Operation, Outcome, Persistence, Streak,
    StreakCategory, DEFAULT_SNAPSHOT_KEY,
};
pub use leveling::{
    level_from_xp, level_name, xp_for_level, xp_progress_within_level, LevelProgress, LevelTier,
    MAX_XP,
};
pub use storage::{Config, Database, MemoryStore, SnapshotStore};
pub use text::{Locale, LocalizedText};
