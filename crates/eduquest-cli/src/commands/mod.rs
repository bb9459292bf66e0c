pub mod achievement;
pub mod badge;
pub mod config;
pub mod reset;
pub mod status;
pub mod streak;
pub mod xp;

use eduquest_core::{
    Config, Database, GamificationStore, LoadOutcome, MutationReport, Persistence, Result,
    SystemClock,
};

pub type CliResult = std::result::Result<(), Box<dyn std::error::Error>>;
pub type Store = GamificationStore<Database, SystemClock>;

/// Open the configured database and restore the stored snapshot.
pub fn open_store(config: &Config) -> Result<Store> {
    let db = Database::open(&config.storage.db_file)?;
    let (store, outcome) = GamificationStore::open(db, config.storage.snapshot_key.as_str(), SystemClock);
    if let LoadOutcome::Recovered { reason } = outcome {
        eprintln!("warning: stored progress was unreadable and has been reset ({reason})");
    }
    Ok(store)
}

/// Retry a failed write once before giving up.
pub fn ensure_persisted(store: &mut Store, report: &MutationReport) -> Result<()> {
    if let Persistence::Failed(first) = &report.persistence {
        tracing::warn!(error = %first, "retrying snapshot write");
        store.flush()?;
    }
    Ok(())
}
