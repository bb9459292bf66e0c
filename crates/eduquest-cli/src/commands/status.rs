use eduquest_core::Config;

use super::{open_store, CliResult};

pub fn run(config: &Config, json: bool) -> CliResult {
    let store = open_store(config)?;
    let locale = config.display.locale;

    if json {
        println!("{}", serde_json::to_string_pretty(store.snapshot())?);
        return Ok(());
    }

    let progress = store.progress();
    let state = store.snapshot();
    println!("XP:      {}", state.xp);
    println!("Level:   {} ({})", state.level, progress.tier.label(locale));
    println!(
        "Next:    {} XP to level {} [{:.0}%]",
        progress.xp_to_next_level,
        state.level + 1,
        progress.fraction() * 100.0
    );
    println!("Badges:  {}", state.badges.len());
    let completed = state.achievements.iter().filter(|a| a.completed).count();
    println!("Achievements: {}/{} completed", completed, state.achievements.len());
    Ok(())
}
