use clap::Subcommand;
use eduquest_core::{Config, LevelProgress, Outcome};

use super::{ensure_persisted, open_store, CliResult};

#[derive(Subcommand)]
pub enum XpAction {
    /// Grant experience points
    Add {
        /// Amount to add (must not be negative)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        /// Why the XP was granted (recorded in the audit log only)
        #[arg(long)]
        reason: Option<String>,
    },
    /// Show level and progress for an XP total without touching saved state
    Preview {
        xp: u64,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(config: &Config, action: XpAction) -> CliResult {
    let locale = config.display.locale;
    match action {
        XpAction::Add { amount, reason } => {
            let mut store = open_store(config)?;
            let report = store.add_xp_signed(amount, reason.as_deref())?;
            ensure_persisted(&mut store, &report)?;

            if let Outcome::XpAdded {
                amount,
                xp,
                previous_level,
                level,
            } = report.outcome
            {
                println!("+{amount} XP (total {xp})");
                if level > previous_level {
                    let tier = LevelProgress::from_xp(xp).tier;
                    println!("Level up! {previous_level} -> {level} ({})", tier.label(locale));
                }
            }
        }
        XpAction::Preview { xp, json } => {
            let progress = LevelProgress::from_xp(xp);
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!(
                    "Level {} ({}), {} XP into level, {} XP to next",
                    progress.level,
                    progress.tier.label(locale),
                    progress.xp_into_level,
                    progress.xp_to_next_level
                );
            }
        }
    }
    Ok(())
}
