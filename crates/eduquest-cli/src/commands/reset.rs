use eduquest_core::Config;

use super::{ensure_persisted, open_store, CliResult};

pub fn run(config: &Config) -> CliResult {
    let mut store = open_store(config)?;
    let report = store.reset();
    ensure_persisted(&mut store, &report)?;
    println!("progress reset");
    Ok(())
}
