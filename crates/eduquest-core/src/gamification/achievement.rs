//! Progress-to-target goals.
//!
//! `completed` always mirrors `progress >= target`, so it can flip back to
//! false when progress is corrected downward. `completed_at` records the
//! first time the target was reached and is never cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::GamificationError;
use crate::text::LocalizedText;

/// An externally provisioned goal, before any progress is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub target: u64,
}

impl AchievementDefinition {
    pub fn new(
        id: impl Into<String>,
        title: LocalizedText,
        description: LocalizedText,
        target: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title,
            description,
            target,
        }
    }

    pub fn validate(&self) -> Result<(), GamificationError> {
        if self.target == 0 {
            return Err(GamificationError::InvalidTarget {
                id: self.id.clone(),
                target: self.target,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub progress: u64,
    pub target: u64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Achievement {
    fn from_definition(def: &AchievementDefinition) -> Self {
        Self {
            id: def.id.clone(),
            title: def.title.clone(),
            description: def.description.clone(),
            progress: 0,
            target: def.target,
            completed: false,
            completed_at: None,
        }
    }

    /// Fraction of the target reached, capped at 1.0.
    pub fn fraction(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        (self.progress as f64 / self.target as f64).min(1.0)
    }
}

/// Result of a progress update on a known achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementChange {
    pub completed: bool,
    /// True only on the call that stamped `completed_at`.
    pub newly_completed: bool,
}

/// Achievements keyed by unique `id`, in provisioning order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementTracker(Vec<Achievement>);

impl AchievementTracker {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.0.iter().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Achievement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Start tracking every definition whose id is new. Existing entries
    /// keep their progress. All definitions are validated before any is
    /// inserted; returns how many were added.
    pub fn provision(&mut self, defs: &[AchievementDefinition]) -> Result<usize, GamificationError> {
        for def in defs {
            def.validate()?;
        }
        let mut added = 0;
        for def in defs {
            if self.get(&def.id).is_none() {
                self.0.push(Achievement::from_definition(def));
                added += 1;
            }
        }
        Ok(added)
    }

    /// Set progress on `id`. Returns `None` for an unknown id.
    ///
    /// `completed_at` is stamped the first time an update finds the
    /// achievement complete and never again.
    pub fn update(&mut self, id: &str, progress: u64, now: DateTime<Utc>) -> Option<AchievementChange> {
        let achievement = self.0.iter_mut().find(|a| a.id == id)?;

        achievement.progress = progress;
        achievement.completed = progress >= achievement.target;

        // A restored snapshot may already be complete but unstamped.
        let newly_completed = achievement.completed && achievement.completed_at.is_none();
        if newly_completed {
            achievement.completed_at = Some(now);
        }

        Some(AchievementChange {
            completed: achievement.completed,
            newly_completed,
        })
    }

    /// Restore invariants on a deserialized list: drop later duplicate ids
    /// and recompute `completed`. Returns true if anything changed.
    pub fn repair(&mut self) -> bool {
        let before = self.0.len();
        let mut seen = HashSet::new();
        self.0.retain(|a| seen.insert(a.id.clone()));
        let mut changed = self.0.len() != before;

        for achievement in &mut self.0 {
            let completed = achievement.progress >= achievement.target;
            if achievement.completed != completed {
                achievement.completed = completed;
                changed = true;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn def(id: &str, target: u64) -> AchievementDefinition {
        AchievementDefinition::new(
            id,
            LocalizedText::new("Title", "Título"),
            LocalizedText::new("Desc", "Desc"),
            target,
        )
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 7, 30, 0).unwrap()
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut tracker = AchievementTracker::new();
        assert!(tracker.update("missing", 3, t0()).is_none());
        assert!(tracker.is_empty());
    }

    #[test]
    fn completion_is_stamped_once_and_survives_regression() {
        let mut tracker = AchievementTracker::new();
        tracker.provision(&[def("a1", 5)]).unwrap();

        let change = tracker.update("a1", 5, t0()).unwrap();
        assert!(change.completed && change.newly_completed);
        assert_eq!(tracker.get("a1").unwrap().completed_at, Some(t0()));

        let change = tracker.update("a1", 2, t0() + Duration::days(1)).unwrap();
        assert!(!change.completed);
        let a1 = tracker.get("a1").unwrap();
        assert!(!a1.completed);
        assert_eq!(a1.completed_at, Some(t0()));

        // Reaching the target again does not restamp.
        let change = tracker.update("a1", 9, t0() + Duration::days(2)).unwrap();
        assert!(change.completed && !change.newly_completed);
        assert_eq!(tracker.get("a1").unwrap().completed_at, Some(t0()));
    }

    #[test]
    fn provision_is_idempotent_and_keeps_progress() {
        let mut tracker = AchievementTracker::new();
        assert_eq!(tracker.provision(&[def("a1", 5), def("a2", 3)]).unwrap(), 2);
        tracker.update("a1", 4, t0());

        assert_eq!(tracker.provision(&[def("a1", 50)]).unwrap(), 0);
        let a1 = tracker.get("a1").unwrap();
        assert_eq!((a1.progress, a1.target), (4, 5));
    }

    #[test]
    fn provision_rejects_zero_target_atomically() {
        let mut tracker = AchievementTracker::new();
        let err = tracker.provision(&[def("ok", 1), def("bad", 0)]).unwrap_err();
        assert_eq!(
            err,
            GamificationError::InvalidTarget {
                id: "bad".into(),
                target: 0
            }
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn fraction_caps_at_one() {
        let mut tracker = AchievementTracker::new();
        tracker.provision(&[def("a", 4)]).unwrap();
        tracker.update("a", 2, t0());
        assert!((tracker.get("a").unwrap().fraction() - 0.5).abs() < f64::EPSILON);
        tracker.update("a", 40, t0());
        assert!((tracker.get("a").unwrap().fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn repaired_completion_is_stamped_by_next_update() {
        let mut tracker = AchievementTracker::new();
        tracker.provision(&[def("a1", 5)]).unwrap();
        tracker.0[0].progress = 7;
        assert!(tracker.repair());
        assert!(tracker.get("a1").unwrap().completed_at.is_none());

        let change = tracker.update("a1", 9, t0()).unwrap();
        assert!(change.completed && change.newly_completed);
        assert_eq!(tracker.get("a1").unwrap().completed_at, Some(t0()));

        let change = tracker.update("a1", 10, t0() + Duration::days(1)).unwrap();
        assert!(!change.newly_completed);
        assert_eq!(tracker.get("a1").unwrap().completed_at, Some(t0()));
    }

    #[test]
    fn repair_recomputes_completed() {
        let mut tracker = AchievementTracker::new();
        tracker.provision(&[def("a", 2)]).unwrap();
        tracker.0[0].progress = 3;
        assert!(tracker.repair());
        assert!(tracker.get("a").unwrap().completed);
    }
}
