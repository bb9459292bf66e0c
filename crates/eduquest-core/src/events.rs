use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::{Outcome, StreakCategory};

/// Every applied mutation produces one or more Events.
/// The UI drains them for toasts; audit sinks persist them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    XpAdded {
        amount: u64,
        total_xp: u64,
        reason: Option<String>,
        at: DateTime<Utc>,
    },
    LevelUp {
        from_level: u64,
        to_level: u64,
        at: DateTime<Utc>,
    },
    BadgeAwarded {
        badge_id: String,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        category: StreakCategory,
        current_count: u32,
        longest_count: u32,
        at: DateTime<Utc>,
    },
    AchievementProgress {
        achievement_id: String,
        completed: bool,
        at: DateTime<Utc>,
    },
    AchievementCompleted {
        achievement_id: String,
        at: DateTime<Utc>,
    },
    AchievementsProvisioned {
        added: usize,
        at: DateTime<Utc>,
    },
    StateReset {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Events for an applied outcome. Ignored outcomes produce none.
    pub fn from_outcome(outcome: &Outcome, reason: Option<&str>, at: DateTime<Utc>) -> Vec<Event> {
        match outcome {
            Outcome::XpAdded {
                amount,
                xp,
                previous_level,
                level,
            } => {
                let mut events = vec![Event::XpAdded {
                    amount: *amount,
                    total_xp: *xp,
                    reason: reason.map(str::to_string),
                    at,
                }];
                if level > previous_level {
                    events.push(Event::LevelUp {
                        from_level: *previous_level,
                        to_level: *level,
                        at,
                    });
                }
                events
            }
            Outcome::BadgeAwarded { id } => vec![Event::BadgeAwarded {
                badge_id: id.clone(),
                at,
            }],
            Outcome::StreakUpdated {
                category,
                current,
                longest,
            } => vec![Event::StreakUpdated {
                category: *category,
                current_count: *current,
                longest_count: *longest,
                at,
            }],
            Outcome::AchievementUpdated {
                id,
                completed,
                newly_completed,
            } => {
                let mut events = vec![Event::AchievementProgress {
                    achievement_id: id.clone(),
                    completed: *completed,
                    at,
                }];
                if *newly_completed {
                    events.push(Event::AchievementCompleted {
                        achievement_id: id.clone(),
                        at,
                    });
                }
                events
            }
            Outcome::Reset => vec![Event::StateReset { at }],
            Outcome::BadgeAlreadyEarned { .. } | Outcome::UnknownAchievement { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_up_follows_xp_event() {
        let at = Utc::now();
        let outcome = Outcome::XpAdded {
            amount: 150,
            xp: 150,
            previous_level: 1,
            level: 2,
        };
        let events = Event::from_outcome(&outcome, Some("homework"), at);
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], Event::XpAdded { reason: Some(r), .. } if r == "homework"));
        assert!(matches!(events[1], Event::LevelUp { from_level: 1, to_level: 2, .. }));
    }

    #[test]
    fn ignored_outcomes_emit_nothing() {
        let outcome = Outcome::UnknownAchievement { id: "x".into() };
        assert!(Event::from_outcome(&outcome, None, Utc::now()).is_empty());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Event::StateReset { at: Utc::now() }).unwrap();
        assert_eq!(json["type"], "StateReset");
    }
}
