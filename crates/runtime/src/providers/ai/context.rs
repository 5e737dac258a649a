//! Blackboard for one enemy decision.

use game_content::Archetype;
use game_core::{Actor, EntityId, GridWorld, Position, SpellKind};
use rand::rngs::StdRng;

use crate::session::EnemyMemory;

/// What an enemy commits to this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Cast from `slot` at a caster-relative `target`, sub-turn `turn`.
    Cast {
        slot: usize,
        spell: SpellKind,
        target: Position,
        turn: u32,
    },
    /// Step by a movement offset.
    Move(Position),
    /// Spend a turn of the post-cast rest period.
    Rest,
    /// Stay put.
    Hold,
}

/// Read-only view of the session for one entity, plus the decision slot.
///
/// The `'a` lifetime keeps the context from outliving the session borrow it
/// was carved from; it is built and dropped within a single turn.
pub struct AiContext<'a> {
    pub entity: EntityId,
    pub actor: &'a Actor,
    pub world: &'a GridWorld,
    pub archetype: &'a Archetype,
    pub memory: &'a EnemyMemory,
    /// Chebyshev radius this enemy notices opponents within.
    pub vision_radius: u32,
    pub rng: &'a mut StdRng,
    decision: Option<Decision>,
}

impl<'a> AiContext<'a> {
    pub fn new(
        actor: &'a Actor,
        world: &'a GridWorld,
        archetype: &'a Archetype,
        memory: &'a EnemyMemory,
        vision_radius: u32,
        rng: &'a mut StdRng,
    ) -> Self {
        Self {
            entity: actor.id,
            actor,
            world,
            archetype,
            memory,
            vision_radius,
            rng,
            decision: None,
        }
    }

    pub fn position(&self) -> Position {
        self.actor.position
    }

    /// Records the decision; the first one wins.
    pub fn decide(&mut self, decision: Decision) {
        if self.decision.is_none() {
            self.decision = Some(decision);
        }
    }

    pub fn decision(&self) -> Option<Decision> {
        self.decision
    }

    /// Live actors this enemy fights.
    pub fn opponents(&self) -> impl Iterator<Item = &'a Actor> + 'a {
        let faction = self.actor.faction;
        self.world
            .live_actors()
            .filter(move |other| faction.is_hostile_to(other.faction))
    }

    /// True if `offset` from here is in range and not solid.
    pub fn can_move(&self, offset: Position) -> bool {
        self.world.can_enter(self.position() + offset)
    }
}
