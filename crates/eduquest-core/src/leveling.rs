//! XP and level arithmetic.
//!
//! Levels are linear: every level takes [`XP_PER_LEVEL`] points. All
//! functions here are pure and can be called without a store, e.g. to
//! preview "XP to next level".

use serde::{Deserialize, Serialize};

use crate::text::Locale;

/// XP needed to complete one level.
pub const XP_PER_LEVEL: u64 = 100;

/// Highest XP total a profile can hold: one point short of the last level
/// boundary that fits in a `u64`. Above it `xp_for_level` would saturate and
/// a level would no longer bracket its XP.
pub const MAX_XP: u64 = (u64::MAX / XP_PER_LEVEL) * XP_PER_LEVEL - 1;

/// XP threshold required to complete `level` (the minimum XP for `level + 1`).
///
/// `xp_for_level(0) == 0`.
pub fn xp_for_level(level: u64) -> u64 {
    level.saturating_mul(XP_PER_LEVEL)
}

/// Level reached with `xp` total points. Always `>= 1`.
pub fn level_from_xp(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}

/// XP earned past the last level boundary.
pub fn xp_progress_within_level(xp: u64) -> u64 {
    xp % XP_PER_LEVEL
}

/// Rank label for a level.
pub fn level_name(level: u64) -> LevelTier {
    LevelTier::for_level(level)
}

/// Rank bands. Upper bounds are inclusive; `Legend` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTier {
    Novice,
    Apprentice,
    Scholar,
    Expert,
    Master,
    Legend,
}

impl LevelTier {
    pub fn for_level(level: u64) -> Self {
        match level {
            0..=5 => LevelTier::Novice,
            6..=10 => LevelTier::Apprentice,
            11..=20 => LevelTier::Scholar,
            21..=35 => LevelTier::Expert,
            36..=50 => LevelTier::Master,
            _ => LevelTier::Legend,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (LevelTier::Novice, Locale::En) => "Novice",
            (LevelTier::Novice, Locale::Es) => "Novato",
            (LevelTier::Apprentice, Locale::En) => "Apprentice",
            (LevelTier::Apprentice, Locale::Es) => "Aprendiz",
            (LevelTier::Scholar, Locale::En) => "Scholar",
            (LevelTier::Scholar, Locale::Es) => "Erudito",
            (LevelTier::Expert, Locale::En) => "Expert",
            (LevelTier::Expert, Locale::Es) => "Experto",
            (LevelTier::Master, Locale::En) => "Master",
            (LevelTier::Master, Locale::Es) => "Maestro",
            (LevelTier::Legend, Locale::En) => "Legend",
            (LevelTier::Legend, Locale::Es) => "Leyenda",
        }
    }
}

/// Everything a progress bar needs for a given XP total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub xp: u64,
    pub level: u64,
    pub tier: LevelTier,
    pub xp_into_level: u64,
    pub xp_to_next_level: u64,
}

impl LevelProgress {
    pub fn from_xp(xp: u64) -> Self {
        let level = level_from_xp(xp);
        let floor = xp_for_level(level - 1);
        let ceiling = xp_for_level(level);
        Self {
            xp,
            level,
            tier: LevelTier::for_level(level),
            xp_into_level: xp - floor,
            xp_to_next_level: ceiling.saturating_sub(xp),
        }
    }

    /// Fraction of the current level completed, in `0.0..1.0`.
    pub fn fraction(&self) -> f64 {
        self.xp_into_level as f64 / XP_PER_LEVEL as f64
    }
}
