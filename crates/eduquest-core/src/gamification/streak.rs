//! Per-category streak counters.
//!
//! The four categories are fixed. An increment extends the current run and
//! raises the historical best when passed; a break zeroes the current run
//! but never touches the best.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::GamificationError;
use crate::text::{Locale, LocalizedText};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakCategory {
    Homework,
    Attendance,
    Reading,
    Login,
}

impl StreakCategory {
    pub const ALL: [StreakCategory; 4] = [
        StreakCategory::Homework,
        StreakCategory::Attendance,
        StreakCategory::Reading,
        StreakCategory::Login,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StreakCategory::Homework => "homework",
            StreakCategory::Attendance => "attendance",
            StreakCategory::Reading => "reading",
            StreakCategory::Login => "login",
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (StreakCategory::Homework, Locale::En) => "Homework",
            (StreakCategory::Homework, Locale::Es) => "Tareas",
            (StreakCategory::Attendance, Locale::En) => "Attendance",
            (StreakCategory::Attendance, Locale::Es) => "Asistencia",
            (StreakCategory::Reading, Locale::En) => "Reading",
            (StreakCategory::Reading, Locale::Es) => "Lectura",
            (StreakCategory::Login, Locale::En) => "Daily login",
            (StreakCategory::Login, Locale::Es) => "Inicio de sesión diario",
        }
    }

    pub fn localized(&self) -> LocalizedText {
        LocalizedText::new(self.label(Locale::En), self.label(Locale::Es))
    }
}

impl FromStr for StreakCategory {
    type Err = GamificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "homework" => Ok(StreakCategory::Homework),
            "attendance" => Ok(StreakCategory::Attendance),
            "reading" => Ok(StreakCategory::Reading),
            "login" => Ok(StreakCategory::Login),
            _ => Err(GamificationError::InvalidCategory(s.to_string())),
        }
    }
}

impl fmt::Display for StreakCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub category: StreakCategory,
    pub current_count: u32,
    pub longest_count: u32,
    /// `None` until the first update after creation or reset.
    pub last_updated: Option<DateTime<Utc>>,
}

impl Streak {
    pub fn new(category: StreakCategory) -> Self {
        Self {
            category,
            current_count: 0,
            longest_count: 0,
            last_updated: None,
        }
    }

    pub fn increment(&mut self, now: DateTime<Utc>) {
        self.current_count = self.current_count.saturating_add(1);
        self.longest_count = self.longest_count.max(self.current_count);
        self.last_updated = Some(now);
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.current_count = 0;
        self.last_updated = Some(now);
    }
}

/// Exactly one [`Streak`] per [`StreakCategory`].
///
/// Deserialization zero-fills any category the stored map lacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<StreakCategory, Streak>",
    into = "BTreeMap<StreakCategory, Streak>"
)]
pub struct Streaks(BTreeMap<StreakCategory, Streak>);

impl From<BTreeMap<StreakCategory, Streak>> for Streaks {
    fn from(mut map: BTreeMap<StreakCategory, Streak>) -> Self {
        for category in StreakCategory::ALL {
            map.entry(category).or_insert_with(|| Streak::new(category));
        }
        Self(map)
    }
}

impl From<Streaks> for BTreeMap<StreakCategory, Streak> {
    fn from(streaks: Streaks) -> Self {
        streaks.0
    }
}

impl Streaks {
    pub fn new() -> Self {
        Self(
            StreakCategory::ALL
                .iter()
                .map(|c| (*c, Streak::new(*c)))
                .collect(),
        )
    }

    pub fn get(&self, category: StreakCategory) -> &Streak {
        // Outside this module `new` and `From<BTreeMap>` are the only ways
        // in, and both fill all four categories.
        &self.0[&category]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Streak> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply one update and return the touched streak. Other categories
    /// are left alone, timestamps included.
    pub fn update(&mut self, category: StreakCategory, increment: bool, now: DateTime<Utc>) -> &Streak {
        let streak = self
            .0
            .entry(category)
            .or_insert_with(|| Streak::new(category));
        if increment {
            streak.increment(now);
        } else {
            streak.reset(now);
        }
        streak
    }

    /// Restore invariants on a deserialized map: fill missing categories,
    /// realign mismatched `category` fields, lift `longest` to `current`.
    /// Returns true if anything changed.
    pub fn repair(&mut self) -> bool {
        let mut changed = false;
        for category in StreakCategory::ALL {
            let streak = self.0.entry(category).or_insert_with(|| {
                changed = true;
                Streak::new(category)
            });
            if streak.category != category {
                streak.category = category;
                changed = true;
            }
            if streak.longest_count < streak.current_count {
                streak.longest_count = streak.current_count;
                changed = true;
            }
        }
        changed
    }
}

impl Default for Streaks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 7, 30, 0).unwrap()
    }

    #[test]
    fn parses_fixed_categories_only() {
        assert_eq!("Homework".parse::<StreakCategory>(), Ok(StreakCategory::Homework));
        assert_eq!(" login ".parse::<StreakCategory>(), Ok(StreakCategory::Login));
        assert_eq!(
            "chores".parse::<StreakCategory>(),
            Err(GamificationError::InvalidCategory("chores".into()))
        );
    }

    #[test]
    fn new_streaks_cover_all_categories_zeroed() {
        let streaks = Streaks::new();
        assert_eq!(streaks.len(), 4);
        for streak in streaks.iter() {
            assert_eq!(streak.current_count, 0);
            assert_eq!(streak.longest_count, 0);
            assert!(streak.last_updated.is_none());
        }
    }

    #[test]
    fn homework_increments_then_breaks() {
        let mut streaks = Streaks::new();
        for _ in 0..3 {
            streaks.update(StreakCategory::Homework, true, t0());
        }
        let hw = streaks.get(StreakCategory::Homework);
        assert_eq!((hw.current_count, hw.longest_count), (3, 3));

        let hw = streaks.update(StreakCategory::Homework, false, t0());
        assert_eq!((hw.current_count, hw.longest_count), (0, 3));
    }

    #[test]
    fn update_only_stamps_its_category() {
        let mut streaks = Streaks::new();
        streaks.update(StreakCategory::Reading, true, t0());
        streaks.update(StreakCategory::Reading, false, t0() + Duration::days(1));

        assert_eq!(
            streaks.get(StreakCategory::Reading).last_updated,
            Some(t0() + Duration::days(1))
        );
        assert!(streaks.get(StreakCategory::Homework).last_updated.is_none());
        assert!(streaks.get(StreakCategory::Login).last_updated.is_none());
    }

    #[test]
    fn repair_fills_missing_and_lifts_longest() {
        let mut streaks = Streaks(BTreeMap::new());
        streaks.0.insert(
            StreakCategory::Login,
            Streak {
                category: StreakCategory::Login,
                current_count: 4,
                longest_count: 2,
                last_updated: None,
            },
        );
        assert!(streaks.repair());
        assert_eq!(streaks.len(), 4);
        assert_eq!(streaks.get(StreakCategory::Login).longest_count, 4);
        assert!(!streaks.repair());
    }

    #[test]
    fn deserializing_partial_map_fills_every_category() {
        let streaks: Streaks =
            serde_json::from_str(r#"{"reading":{"category":"reading","currentCount":2,"longestCount":5,"lastUpdated":null}}"#)
                .unwrap();
        assert_eq!(streaks.len(), 4);
        assert_eq!(streaks.get(StreakCategory::Reading).longest_count, 5);
        for category in StreakCategory::ALL {
            assert_eq!(streaks.get(category).category, category);
        }

        let empty: Streaks = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Streaks::new());
    }

    #[test]
    fn serializes_as_lowercase_keyed_map() {
        let json = serde_json::to_value(Streaks::new()).unwrap();
        assert_eq!(json["homework"]["currentCount"], 0);
        assert!(json.get("attendance").is_some());
    }

    proptest! {
        #[test]
        fn longest_never_decreases(ops in proptest::collection::vec(any::<bool>(), 0..200)) {
            let mut streaks = Streaks::new();
            let mut last_longest = 0;
            for increment in ops {
                let s = streaks.update(StreakCategory::Attendance, increment, t0());
                prop_assert!(s.longest_count >= last_longest);
                prop_assert!(s.longest_count >= s.current_count);
                if !increment {
                    prop_assert_eq!(s.current_count, 0);
                }
                last_longest = s.longest_count;
            }
        }
    }
}
