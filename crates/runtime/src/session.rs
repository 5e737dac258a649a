//! Run-scoped session context.
//!
//! A [`Session`] replaces every process-wide registry a dungeon run needs:
//! the world, which spells and archetypes exist, the drop ledger, what the
//! player has discovered, per-enemy cast memory and the event log. It is
//! handed to providers and the scheduler explicitly and dies with the run.

use std::collections::{BTreeMap, BTreeSet};

use game_content::{Archetype, ArchetypeCatalog, DropLedger};
use game_core::{
    Actor, ActorTemplate, CastError, CastReport, EntityId, Faction, GameConfig, GridError,
    GridWorld, Position, Spell, SpellKind, SpellRegistry,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::api::{Result, RuntimeError};
use crate::events::{EventLog, TurnEvent};
use crate::providers::ai::AiContext;

/// A multi-turn cast somebody has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastProgress {
    pub spell: SpellKind,
    pub slot: usize,
    /// Nominal caster-relative target chosen on the first sub-turn.
    pub target: Position,
    pub next_turn: u32,
}

/// Per-enemy state that outlives a single decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnemyMemory {
    pub cast: Option<CastProgress>,
    /// Own turns still to skip after a multi-turn cast.
    pub rest: u32,
}

/// What the player has discovered this run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Codex {
    enemies: BTreeSet<String>,
    spells: BTreeSet<String>,
}

impl Codex {
    /// Returns true the first time `name` is seen.
    pub fn see_enemy(&mut self, name: &str) -> bool {
        self.enemies.insert(name.to_ascii_uppercase())
    }

    pub fn learn_spell(&mut self, kind: SpellKind) -> bool {
        self.spells.insert(kind.name().to_owned())
    }

    pub fn enemies(&self) -> impl Iterator<Item = &str> + '_ {
        self.enemies.iter().map(String::as_str)
    }

    pub fn spells(&self) -> impl Iterator<Item = &str> + '_ {
        self.spells.iter().map(String::as_str)
    }

    pub fn knows_enemy(&self, name: &str) -> bool {
        self.enemies.contains(&name.to_ascii_uppercase())
    }

    pub fn knows_spell(&self, kind: SpellKind) -> bool {
        self.spells.contains(kind.name())
    }
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
}

pub struct Session {
    world: GridWorld,
    config: GameConfig,
    registry: SpellRegistry,
    catalog: ArchetypeCatalog,
    drops: DropLedger,
    codex: Codex,
    memory: BTreeMap<EntityId, EnemyMemory>,
    events: EventLog,
    rng: StdRng,
    /// Summons waiting to be appended to the turn order.
    joined: Vec<EntityId>,
    pace_effects: bool,
}

impl Session {
    pub fn new(
        world: GridWorld,
        config: GameConfig,
        registry: SpellRegistry,
        catalog: ArchetypeCatalog,
        seed: u64,
    ) -> Self {
        let mut codex = Codex::default();
        if let Some(player) = world.actor(EntityId::PLAYER) {
            for (_, slot) in player.spells.equipped() {
                codex.learn_spell(slot.spell.kind);
            }
        }

        Self {
            world,
            config,
            registry,
            catalog,
            drops: DropLedger::new(),
            codex,
            memory: BTreeMap::new(),
            events: EventLog::new(),
            rng: StdRng::seed_from_u64(seed),
            joined: Vec::new(),
            pace_effects: false,
        }
    }

    /// Holds the caster's turn after every cast that hit something, until
    /// [`Session::settle_effects`] is called.
    pub fn with_paced_effects(mut self, pace: bool) -> Self {
        self.pace_effects = pace;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GridWorld {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &SpellRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &ArchetypeCatalog {
        &self.catalog
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn codex(&self) -> &Codex {
        &self.codex
    }

    pub fn drops(&self) -> &DropLedger {
        &self.drops
    }

    pub fn player(&self) -> Option<&Actor> {
        self.world.actor(EntityId::PLAYER)
    }

    pub fn memory(&self, entity: EntityId) -> EnemyMemory {
        self.memory.get(&entity).cloned().unwrap_or_default()
    }

    pub fn memory_mut(&mut self, entity: EntityId) -> &mut EnemyMemory {
        self.memory.entry(entity).or_default()
    }

    pub fn archetype_of(&self, entity: EntityId) -> Option<&Archetype> {
        let key = self.world.actor(entity)?.archetype.as_deref()?;
        self.catalog.get(key)
    }

    pub fn record(&mut self, event: TurnEvent) {
        self.events.push(event);
    }

    /// Victory once no hostile creature is left, defeat once the player is gone.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.world.is_alive(EntityId::PLAYER) {
            return Some(Outcome::Defeat);
        }
        let hostiles = self
            .world
            .live_actors()
            .any(|actor| actor.faction == Faction::Hostile);
        (!hostiles).then_some(Outcome::Victory)
    }

    // ========================================================================
    // Visual pacing
    // ========================================================================

    /// True while any live actor is held by an in-flight effect.
    pub fn is_resolving(&self) -> bool {
        self.world.live_actors().any(|actor| actor.keep_turn)
    }

    /// Releases every actor held by a visual effect.
    pub fn settle_effects(&mut self) {
        let held: Vec<EntityId> = self
            .world
            .actors()
            .filter(|actor| actor.keep_turn)
            .map(|actor| actor.id)
            .collect();
        for id in held {
            if let Some(actor) = self.world.actor_mut(id) {
                actor.keep_turn = false;
            }
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Moves `entity` one offset; the player also collects pickups.
    pub fn step_actor(
        &mut self,
        entity: EntityId,
        offset: Position,
    ) -> std::result::Result<Position, GridError> {
        let from = self
            .world
            .actor(entity)
            .ok_or(GridError::UnknownEntity(entity))?
            .position;
        let to = self.world.step(entity, offset)?;
        self.events.push(TurnEvent::Moved { entity, from, to });

        if entity.is_player() {
            let letters = self.world.collect_pickups(entity)?;
            if !letters.is_empty() {
                tracing::info!(letters = ?letters, "picked up letters");
                self.events.push(TurnEvent::PickedUp { entity, letters });
            }
        }
        Ok(to)
    }

    /// Casts `spell` and settles its consequences: deaths drop letters,
    /// summons queue for the turn order.
    ///
    /// A targeting rejection leaves the session untouched.
    pub fn cast(
        &mut self,
        spell: Spell,
        target: Position,
        turn: u32,
    ) -> std::result::Result<CastReport, CastError> {
        let caster = spell.caster;
        let report = spell.cast(&mut self.world, target, false, turn)?;

        tracing::info!(
            caster = %caster,
            spell = spell.name(),
            target = ?report.target,
            turn,
            combo = report.combo,
            "cast"
        );
        self.events.push(TurnEvent::Cast {
            entity: caster,
            spell: report.spell,
            target: report.target,
            turn,
            combo: report.combo,
        });
        if self.world.is_alive(EntityId::PLAYER) {
            self.codex.learn_spell(report.spell);
        }

        for hit in &report.effects.hits {
            self.events.push(TurnEvent::Damaged {
                entity: hit.target,
                amount: hit.outcome.dealt,
                stun: hit.outcome.stun,
            });
        }
        for knock in &report.effects.moved {
            self.events.push(TurnEvent::Knocked {
                entity: knock.entity,
                from: knock.from,
                to: knock.to,
            });
        }
        for &entity in &report.effects.destroyed {
            self.on_destroyed(entity)?;
        }
        for &entity in &report.effects.summoned {
            self.on_summoned(caster, entity);
        }

        if self.pace_effects && !report.effects.is_empty()
            && let Some(actor) = self.world.actor_mut(caster)
        {
            actor.keep_turn = true;
        }

        Ok(report)
    }

    /// Spends `entity`'s letters on the spell named by `word`.
    pub fn craft(&mut self, entity: EntityId, word: &str) -> Result<usize> {
        let actor = self
            .world
            .actor_mut(entity)
            .ok_or(RuntimeError::MissingActor(entity))?;
        let slot = actor.craft_spell(word, &self.registry)?;
        let kind = self.registry.resolve(word).map_err(game_core::SpellBookError::from)?;

        tracing::info!(entity = %entity, spell = kind.name(), slot, "crafted spell");
        self.codex.learn_spell(kind);
        self.events.push(TurnEvent::Crafted {
            entity,
            spell: kind,
            slot,
        });
        Ok(slot)
    }

    /// Records every hostile archetype the player can currently see.
    pub fn survey(&mut self) {
        let Some(player) = self.world.actor(EntityId::PLAYER) else {
            return;
        };
        let origin = player.position;
        let radius = self.config.default_vision_radius as i32;

        let seen: Vec<String> = self
            .world
            .live_actors()
            .filter(|actor| actor.faction == Faction::Hostile)
            .filter(|actor| {
                let offset = actor.position - origin;
                offset.chebyshev() <= radius && self.world.check_line_of_sight(offset, origin)
            })
            .map(|actor| actor.name.clone())
            .collect();

        for name in seen {
            if self.codex.see_enemy(&name) {
                tracing::debug!(enemy = %name, "codex entry");
            }
        }
    }

    /// Summons that should join the turn order, in summon order.
    pub(crate) fn take_joined(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.joined)
    }

    /// Borrowed view for one enemy decision.
    pub(crate) fn ai_context(&mut self, entity: EntityId) -> Result<AiContext<'_>> {
        let actor = self
            .world
            .actor(entity)
            .ok_or(RuntimeError::MissingActor(entity))?;
        let key = actor.archetype.clone().unwrap_or_default();
        let archetype = self
            .catalog
            .get(&key)
            .ok_or(RuntimeError::UnknownArchetype { entity, key })?;
        let vision_radius = archetype.vision(self.config.default_vision_radius);
        let memory = self.memory.entry(entity).or_default();

        Ok(AiContext::new(
            actor,
            &self.world,
            archetype,
            memory,
            vision_radius,
            &mut self.rng,
        ))
    }

    fn on_destroyed(&mut self, entity: EntityId) -> std::result::Result<(), CastError> {
        let Some(actor) = self.world.actor(entity) else {
            return Ok(());
        };
        let name = actor.name.clone();
        let at = actor.position;
        let drops_letter = actor.faction == Faction::Hostile && actor.archetype.is_some();

        tracing::info!(entity = %entity, name = %name, "destroyed");
        self.events.push(TurnEvent::Destroyed {
            entity,
            name: name.clone(),
        });
        self.memory.remove(&entity);

        if drops_letter && let Some(letter) = self.drops.next_drop(&name) {
            match self.world.spawn(&ActorTemplate::pickup(letter), at) {
                Ok(_) => self.events.push(TurnEvent::Dropped { letter, at }),
                Err(GridError::TileFull { .. }) => {
                    tracing::warn!(letter = %letter, position = ?at, "no room to drop letter");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }

    fn on_summoned(&mut self, summoner: EntityId, entity: EntityId) {
        let Some(actor) = self.world.actor(entity) else {
            return;
        };
        let name = actor.name.clone();
        let acts = actor
            .archetype
            .as_deref()
            .is_some_and(|key| self.catalog.contains(key));

        tracing::info!(summoner = %summoner, entity = %entity, name = %name, "summoned");
        self.events.push(TurnEvent::Summoned {
            entity,
            summoner,
            name,
        });
        if acts {
            self.joined.push(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{DamageType, GameError};

    fn session_with(hostiles: &[(i32, i32, u32)]) -> Session {
        let mut world = GridWorld::new(7, 7);
        world.fill_floor().unwrap();
        world
            .spawn_player(
                &ActorTemplate::creature("PLAYER", Faction::Ally, 5)
                    .with_spells(SpellKind::PLAYER_LOADOUT),
                Position::new(3, 3),
            )
            .unwrap();
        let catalog = ArchetypeCatalog::builtin();
        let bat = catalog.get("bat").unwrap().template("bat");
        for &(x, y, hp) in hostiles {
            let mut template = bat.clone();
            template.max_health = hp;
            world.spawn(&template, Position::new(x, y)).unwrap();
        }
        Session::new(world, GameConfig::default(), SpellRegistry::standard(), catalog, 7)
    }

    fn bat_at(session: &Session, position: Position) -> EntityId {
        session
            .world()
            .live_actors()
            .find(|actor| actor.position == position && actor.name == "BAT")
            .unwrap()
            .id
    }

    #[test]
    fn kill_drops_next_letter_and_pickup_collects_it() {
        let mut session = session_with(&[(4, 3, 1), (3, 4, 1)]);
        let zap = Spell::new(SpellKind::Zap, EntityId::PLAYER);

        session.cast(zap, Position::new(1, 0), 0).unwrap();
        session.cast(zap, Position::new(0, 1), 0).unwrap();

        assert_eq!(session.drops().dropped_so_far("bat"), "BA");
        let dropped: Vec<char> = session
            .events()
            .iter()
            .filter_map(|event| match event {
                TurnEvent::Dropped { letter, .. } => Some(*letter),
                _ => None,
            })
            .collect();
        assert_eq!(dropped, ['B', 'A']);

        session.step_actor(EntityId::PLAYER, Position::new(1, 0)).unwrap();
        assert_eq!(session.player().unwrap().letters, vec!['B']);
    }

    #[test]
    fn rejected_cast_leaves_log_untouched() {
        let mut session = session_with(&[(6, 6, 1)]);
        let zap = Spell::new(SpellKind::Zap, EntityId::PLAYER);
        let err = session.cast(zap, Position::new(3, 3), 0).unwrap_err();
        assert!(err.is_rejection());
        assert!(session.events().is_empty());
    }

    #[test]
    fn golem_summon_joins_turn_order() {
        let mut session = session_with(&[]);
        let golem = Spell::new(SpellKind::Golem, EntityId::PLAYER);
        let report = session.cast(golem, Position::new(1, 0), 0).unwrap();

        let joined = session.take_joined();
        assert_eq!(joined, report.effects.summoned);
        assert!(session.take_joined().is_empty());
    }

    #[test]
    fn barrier_summon_stays_out_of_turn_order() {
        let mut session = session_with(&[]);
        let barrier = Spell::new(SpellKind::Barrier, EntityId::PLAYER);
        session.cast(barrier, Position::new(1, 0), 0).unwrap();
        assert!(session.take_joined().is_empty());
    }

    #[test]
    fn outcome_tracks_player_and_hostiles() {
        let mut session = session_with(&[(4, 3, 1)]);
        assert_eq!(session.outcome(), None);

        let bat = bat_at(&session, Position::new(4, 3));
        session.world_mut().damage(bat, 5, DamageType::Normal, 0).unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Victory));

        session
            .world_mut()
            .damage(EntityId::PLAYER, 9, DamageType::Normal, 0)
            .unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Defeat));
    }

    #[test]
    fn survey_records_visible_hostiles_only() {
        let mut session = session_with(&[(5, 3, 1)]);
        session
            .world_mut()
            .spawn(&ActorTemplate::wall(), Position::new(4, 3))
            .unwrap();
        session.survey();
        assert!(!session.codex().knows_enemy("bat"));

        session.world_mut().step(EntityId::PLAYER, Position::new(0, 1)).unwrap();
        session.survey();
        assert!(session.codex().knows_enemy("BAT"));
    }

    #[test]
    fn paced_casts_hold_the_caster() {
        let mut session = session_with(&[(4, 3, 3)]).with_paced_effects(true);
        let zap = Spell::new(SpellKind::Zap, EntityId::PLAYER);
        session.cast(zap, Position::new(1, 0), 0).unwrap();
        assert!(session.is_resolving());
        session.settle_effects();
        assert!(!session.is_resolving());
    }

    #[test]
    fn crafting_needs_letters() {
        let mut session = session_with(&[]);
        assert!(session.craft(EntityId::PLAYER, "bite").is_err());

        session.world_mut().actor_mut(EntityId::PLAYER).unwrap().letters =
            vec!['B', 'I', 'T', 'E'];
        // every player slot is taken by the default loadout
        let err = session.craft(EntityId::PLAYER, "bite").unwrap_err();
        assert_eq!(err.error_code(), "BOOK_NO_FREE_SLOT");
    }
}
