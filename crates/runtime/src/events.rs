//! Session event log.
//!
//! Everything the scheduler and providers do is appended here in order, so a
//! renderer or a test can replay what happened during a tick without diffing
//! the world.

use game_core::{EntityId, Position, SpellKind};
use serde::Serialize;

/// High-level occurrences produced while resolving turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnEvent {
    /// An entity was handed control (once per turn, not per poll).
    TurnStarted { entity: EntityId, round: u32 },

    /// A stunned entity lost its slot.
    Stunned { entity: EntityId, remaining: u32 },

    Moved {
        entity: EntityId,
        from: Position,
        to: Position,
    },

    Cast {
        entity: EntityId,
        spell: SpellKind,
        target: Position,
        turn: u32,
        combo: bool,
    },

    /// A multi-turn cast could no longer resolve its target.
    CastAbandoned { entity: EntityId, spell: SpellKind },

    Damaged {
        entity: EntityId,
        amount: i32,
        stun: u32,
    },

    Knocked {
        entity: EntityId,
        from: Position,
        to: Position,
    },

    Rested { entity: EntityId, remaining: u32 },

    Waited { entity: EntityId },

    Destroyed { entity: EntityId, name: String },

    Summoned {
        entity: EntityId,
        summoner: EntityId,
        name: String,
    },

    Dropped { letter: char, at: Position },

    PickedUp { entity: EntityId, letters: Vec<char> },

    Crafted {
        entity: EntityId,
        spell: SpellKind,
        slot: usize,
    },

    RoundCompleted { round: u32 },
}

impl TurnEvent {
    /// Entity the event is about, when there is exactly one.
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            TurnEvent::TurnStarted { entity, .. }
            | TurnEvent::Stunned { entity, .. }
            | TurnEvent::Moved { entity, .. }
            | TurnEvent::Cast { entity, .. }
            | TurnEvent::CastAbandoned { entity, .. }
            | TurnEvent::Damaged { entity, .. }
            | TurnEvent::Knocked { entity, .. }
            | TurnEvent::Rested { entity, .. }
            | TurnEvent::Waited { entity }
            | TurnEvent::Destroyed { entity, .. }
            | TurnEvent::Summoned { entity, .. }
            | TurnEvent::PickedUp { entity, .. }
            | TurnEvent::Crafted { entity, .. } => Some(*entity),
            TurnEvent::Dropped { .. } | TurnEvent::RoundCompleted { .. } => None,
        }
    }
}

/// Append-only list of [`TurnEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<TurnEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TurnEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TurnEvent> + ExactSizeIterator + '_ {
        self.events.iter()
    }

    /// Events appended after the first `cursor` entries.
    pub fn since(&self, cursor: usize) -> &[TurnEvent] {
        self.events.get(cursor..).unwrap_or(&[])
    }

    pub fn for_entity(&self, entity: EntityId) -> impl Iterator<Item = &TurnEvent> + '_ {
        self.events
            .iter()
            .filter(move |event| event.entity() == Some(entity))
    }
}
