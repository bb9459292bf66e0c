use clap::Subcommand;
use eduquest_core::gamification::catalog;
use eduquest_core::{Config, Outcome};

use super::{ensure_persisted, open_store, CliResult};

#[derive(Subcommand)]
pub enum BadgeAction {
    /// Award a badge from the built-in catalog
    Award {
        /// Catalog badge ID (e.g. "first-login", "bookworm")
        id: String,
    },
    /// List earned badges in award order
    List {
        #[arg(long)]
        json: bool,
    },
    /// List every badge that can be awarded
    Catalog,
}

pub fn run(config: &Config, action: BadgeAction) -> CliResult {
    let locale = config.display.locale;
    match action {
        BadgeAction::Award { id } => {
            let badge = catalog::badge(&id).ok_or_else(|| format!("unknown badge: {id}"))?;
            let mut store = open_store(config)?;
            let report = store.award_badge(badge);
            ensure_persisted(&mut store, &report)?;
            match report.outcome {
                Outcome::BadgeAwarded { id } => println!("Badge awarded: {id}"),
                Outcome::BadgeAlreadyEarned { id } => println!("Badge already earned: {id}"),
                _ => {}
            }
        }
        BadgeAction::List { json } => {
            let store = open_store(config)?;
            let badges = &store.snapshot().badges;
            if json {
                println!("{}", serde_json::to_string_pretty(badges)?);
                return Ok(());
            }
            if badges.is_empty() {
                println!("No badges earned yet.");
            }
            for badge in badges.iter() {
                let earned = badge
                    .earned_at
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!(
                    "  {} - {} [{:?}] {}",
                    badge.id,
                    badge.name.get(locale),
                    badge.rarity,
                    earned
                );
            }
        }
        BadgeAction::Catalog => {
            for badge in catalog::badges() {
                println!("  {} - {}", badge.id, badge.name.get(locale));
                println!("    {}", badge.description.get(locale));
            }
        }
    }
    Ok(())
}
