use clap::Subcommand;
use eduquest_core::gamification::catalog;
use eduquest_core::{Config, Outcome, Persistence};

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum AchievementAction {
    /// Start tracking the built-in achievements
    Provision,
    /// Set progress on an achievement
    Update {
        id: String,
        progress: u64,
    },
    /// Show tracked achievements
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(config: &Config, action: AchievementAction) -> CliResult {
    let mut store = open_store(config)?;
    match action {
        AchievementAction::Provision => {
            let (added, persistence) = store.provision_achievements(&catalog::achievements())?;
            if let Persistence::Failed(_) = persistence {
                store.flush()?;
            }
            println!("{added} achievement(s) provisioned");
        }
        AchievementAction::Update { id, progress } => {
            let report = store.update_achievement(&id, progress);
            super::ensure_persisted(&mut store, &report)?;
            match report.outcome {
                Outcome::AchievementUpdated {
                    id,
                    completed,
                    newly_completed,
                } => {
                    if newly_completed {
                        println!("Achievement completed: {id}");
                    } else {
                        println!("{id}: progress {progress} (completed: {completed})");
                    }
                }
                Outcome::UnknownAchievement { id } => {
                    println!("No such achievement: {id} (ignored)");
                }
                _ => {}
            }
        }
        AchievementAction::List { json } => {
            let achievements = &store.snapshot().achievements;
            if json {
                println!("{}", serde_json::to_string_pretty(achievements)?);
                return Ok(());
            }
            if achievements.is_empty() {
                println!("No achievements tracked. Run 'achievement provision' first.");
            }
            for a in achievements.iter() {
                let mark = if a.completed { "x" } else { " " };
                println!(
                    "  [{mark}] {} - {} ({}/{})",
                    a.id,
                    a.title.get(config.display.locale),
                    a.progress,
                    a.target
                );
            }
        }
    }
    Ok(())
}
