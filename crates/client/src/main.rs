//! `skirmish`: plays the built-in arena (or one from `SKIRMISH_LAYOUT`)
//! headlessly and prints a JSON summary on stdout.
//!
//! ```bash
//! SKIRMISH_SEED=7 RUST_LOG=runtime=debug cargo run -p dungeon-client
//! ```

use anyhow::Result;
use dungeon_client::{SkirmishConfig, logging};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SkirmishConfig::from_env();
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    tracing::info!("Starting skirmish");
    let summary = dungeon_client::run(&config)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
