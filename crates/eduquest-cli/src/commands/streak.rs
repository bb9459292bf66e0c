use clap::Subcommand;
use eduquest_core::{Config, Outcome};

use super::{ensure_persisted, open_store, CliResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Extend a streak by one
    Bump {
        /// homework, attendance, reading or login
        category: String,
    },
    /// Break a streak (the best run is kept)
    Break {
        /// homework, attendance, reading or login
        category: String,
    },
    /// Show all streaks
    List {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(config: &Config, action: StreakAction) -> CliResult {
    match action {
        StreakAction::Bump { category } => update(config, &category, true),
        StreakAction::Break { category } => update(config, &category, false),
        StreakAction::List { json } => {
            let store = open_store(config)?;
            let streaks = &store.snapshot().streaks;
            if json {
                println!("{}", serde_json::to_string_pretty(streaks)?);
                return Ok(());
            }
            for streak in streaks.iter() {
                println!(
                    "  {:<22} current {:>3}  best {:>3}",
                    streak.category.label(config.display.locale),
                    streak.current_count,
                    streak.longest_count
                );
            }
            Ok(())
        }
    }
}

fn update(config: &Config, category: &str, increment: bool) -> CliResult {
    let mut store = open_store(config)?;
    let report = store.update_streak_by_name(category, increment)?;
    ensure_persisted(&mut store, &report)?;
    if let Outcome::StreakUpdated {
        category,
        current,
        longest,
    } = report.outcome
    {
        println!("{category}: current {current}, best {longest}");
    }
    Ok(())
}
