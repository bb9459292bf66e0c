//! Earned badges, in award order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::text::LocalizedText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeCategory {
    Academic,
    Attendance,
    Behavior,
    Participation,
    Special,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub icon: String,
    pub rarity: BadgeRarity,
    pub category: BadgeCategory,
    /// Set once by the registry at award time.
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

impl Badge {
    pub fn new(
        id: impl Into<String>,
        name: LocalizedText,
        description: LocalizedText,
        icon: impl Into<String>,
        rarity: BadgeRarity,
        category: BadgeCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name,
            description,
            icon: icon.into(),
            rarity,
            category,
            earned_at: None,
        }
    }
}

/// Append-only, deduplicated by `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeRegistry(Vec<Badge>);

impl BadgeRegistry {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|b| b.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Badge> {
        self.0.iter().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Badge> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append `badge` stamped with `now`. Returns false, leaving the
    /// registry untouched, if the id was already earned. Any `earned_at`
    /// supplied by the caller is ignored.
    pub fn award(&mut self, mut badge: Badge, now: DateTime<Utc>) -> bool {
        if self.contains(&badge.id) {
            return false;
        }
        badge.earned_at = Some(now);
        self.0.push(badge);
        true
    }

    /// Drop later duplicates from a deserialized list, keeping the first
    /// award. Returns true if anything was removed.
    pub fn repair(&mut self) -> bool {
        let before = self.0.len();
        let mut seen = HashSet::new();
        self.0.retain(|b| seen.insert(b.id.clone()));
        self.0.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn badge(id: &str, name: &str) -> Badge {
        Badge::new(
            id,
            LocalizedText::new(name, name),
            LocalizedText::new("desc", "desc"),
            "star",
            BadgeRarity::Common,
            BadgeCategory::Academic,
        )
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 7, 30, 0).unwrap()
    }

    #[test]
    fn award_stamps_earned_at() {
        let mut registry = BadgeRegistry::new();
        assert!(registry.award(badge("b1", "First"), t0()));
        assert_eq!(registry.get("b1").unwrap().earned_at, Some(t0()));
    }

    #[test]
    fn duplicate_award_keeps_first_fields() {
        let mut registry = BadgeRegistry::new();
        registry.award(badge("b1", "First"), t0());
        let again = registry.award(badge("b1", "Renamed"), t0() + Duration::hours(1));

        assert!(!again);
        assert_eq!(registry.len(), 1);
        let kept = registry.get("b1").unwrap();
        assert_eq!(kept.name.en, "First");
        assert_eq!(kept.earned_at, Some(t0()));
    }

    #[test]
    fn caller_earned_at_is_ignored() {
        let mut registry = BadgeRegistry::new();
        let mut b = badge("b2", "Second");
        b.earned_at = Some(t0() - Duration::days(30));
        registry.award(b, t0());
        assert_eq!(registry.get("b2").unwrap().earned_at, Some(t0()));
    }

    #[test]
    fn award_order_is_preserved() {
        let mut registry = BadgeRegistry::new();
        registry.award(badge("a", "A"), t0());
        registry.award(badge("c", "C"), t0());
        registry.award(badge("b", "B"), t0());
        let ids: Vec<_> = registry.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "b"]);
    }

    #[test]
    fn repair_removes_later_duplicates() {
        let mut registry = BadgeRegistry(vec![badge("x", "one"), badge("y", "y"), badge("x", "two")]);
        assert!(registry.repair());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("x").unwrap().name.en, "one");
    }
}
