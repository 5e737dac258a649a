//! Headless skirmish runner.
//!
//! Builds a runtime from the environment, lets [`Autopilot`] play the player
//! against the enemy AI and reports how it went. Visual effects are paced
//! like a renderer would see them, then settled immediately.

pub mod autopilot;
pub mod config;
pub mod logging;
pub mod summary;

pub use autopilot::Autopilot;
pub use config::SkirmishConfig;
pub use summary::RunSummary;

use anyhow::{Context, Result};
use game_content::{ArchetypeCatalog, ArenaLayout, ConfigLoader, MapLoader};
use game_core::{GameConfig, SpellRegistry};
use runtime::{AiProvider, PlayerProvider, Runtime, RuntimeConfig, TickOutcome};

/// Plays one skirmish to an outcome or the tick limit.
pub fn run(config: &SkirmishConfig) -> Result<RunSummary> {
    let game = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    let layout = match &config.layout_path {
        Some(path) => MapLoader::load(path)?,
        None => ArenaLayout::builtin(),
    };

    let catalog = ArchetypeCatalog::builtin();
    let registry = SpellRegistry::standard();
    let arena = layout
        .build_world(&catalog, &registry, &game.player)
        .context("failed to build arena")?;
    tracing::info!(
        width = layout.width(),
        height = layout.height(),
        enemies = arena.spawns.len(),
        seed = config.seed,
        "arena ready"
    );

    let mut runtime = Runtime::builder()
        .config(RuntimeConfig {
            game,
            seed: config.seed,
            pace_effects: true,
        })
        .arena(arena)
        .catalog(catalog)
        .registry(registry)
        .player_provider(PlayerProvider::new(Autopilot::new()))
        .npc_provider(AiProvider::new())
        .build()
        .context("failed to build runtime")?;

    let mut steps = 0;
    while steps < config.max_steps && runtime.outcome().is_none() {
        steps += 1;
        match runtime.step()? {
            TickOutcome::Resolving => runtime.session_mut().settle_effects(),
            TickOutcome::AwaitingInput | TickOutcome::Yielded => {}
        }
    }

    match runtime.outcome() {
        Some(outcome) => tracing::info!(?outcome, steps, "skirmish over"),
        None => tracing::warn!(steps, "tick limit reached"),
    }
    Ok(RunSummary::collect(&runtime, config.seed, steps))
}
