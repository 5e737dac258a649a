//! High-level runtime orchestrator.
//!
//! The runtime owns the session and the scheduler and exposes a builder-based
//! API for clients to drive the simulation one tick at a time.

use game_content::{Arena, ArchetypeCatalog};
use game_core::{EntityId, GameConfig, GridWorld, SpellRegistry};

use crate::api::{ActionProvider, ProviderKind, Result, RuntimeError};
use crate::scheduler::{TickOutcome, TurnScheduler};
use crate::session::{Outcome, Session};

/// Runtime configuration shared across the orchestrator and the session.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Seeds every random choice the enemies make.
    pub seed: u64,
    /// Hold the caster after each visible effect until the host settles it.
    pub pace_effects: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            seed: 0,
            pace_effects: false,
        }
    }
}

/// Main runtime that orchestrates turn resolution.
pub struct Runtime {
    session: Session,
    scheduler: TurnScheduler,

    // Action providers (injected by user)
    player_provider: Option<Box<dyn ActionProvider>>,
    npc_provider: Option<Box<dyn ActionProvider>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Runs one scheduler tick.
    ///
    /// Requires both player and NPC providers to be configured.
    pub fn step(&mut self) -> Result<TickOutcome> {
        let player = self
            .player_provider
            .as_mut()
            .ok_or(RuntimeError::ProviderNotSet {
                kind: ProviderKind::Player,
            })?;
        let npc = self
            .npc_provider
            .as_mut()
            .ok_or(RuntimeError::ProviderNotSet {
                kind: ProviderKind::Npc,
            })?;

        self.scheduler
            .tick(&mut self.session, player.as_mut(), npc.as_mut())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.session.outcome()
    }

    /// Set the player action provider
    pub fn set_player_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Set the NPC action provider
    pub fn set_npc_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.npc_provider = Some(Box::new(provider));
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<GridWorld>,
    catalog: ArchetypeCatalog,
    registry: SpellRegistry,
    player_provider: Option<Box<dyn ActionProvider>>,
    npc_provider: Option<Box<dyn ActionProvider>>,
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeBuilder {
    /// Create a new builder with the stock bestiary and spell list.
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            catalog: ArchetypeCatalog::builtin(),
            registry: SpellRegistry::standard(),
            player_provider: None,
            npc_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide a populated world
    pub fn world(mut self, world: GridWorld) -> Self {
        self.world = Some(world);
        self
    }

    /// Provide a world built from a layout
    pub fn arena(mut self, arena: Arena) -> Self {
        self.world = Some(arena.world);
        self
    }

    pub fn catalog(mut self, catalog: ArchetypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn registry(mut self, registry: SpellRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set player action provider (optional)
    pub fn player_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Set NPC action provider (optional)
    pub fn npc_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.npc_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime.
    ///
    /// The player is registered first, then every live actor that carries an
    /// archetype, in id order. Terrain, pickups and plain creatures never act.
    pub fn build(self) -> Result<Runtime> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;

        let mut scheduler = TurnScheduler::new(self.config.game.scheduler_step_budget);
        if world.is_alive(EntityId::PLAYER) {
            scheduler.register(EntityId::PLAYER);
        }
        for actor in world.live_actors() {
            let Some(key) = actor.archetype.as_deref() else {
                continue;
            };
            if actor.id.is_player() {
                continue;
            }
            if !self.catalog.contains(key) {
                return Err(RuntimeError::UnknownArchetype {
                    entity: actor.id,
                    key: key.to_owned(),
                });
            }
            scheduler.register(actor.id);
        }

        tracing::info!(
            actors = scheduler.order().len(),
            seed = self.config.seed,
            "runtime ready"
        );

        let session = Session::new(
            world,
            self.config.game,
            self.registry,
            self.catalog,
            self.config.seed,
        )
        .with_paced_effects(self.config.pace_effects);

        Ok(Runtime {
            session,
            scheduler,
            player_provider: self.player_provider,
            npc_provider: self.npc_provider,
        })
    }
}
