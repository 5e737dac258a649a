//! Player-side provider driven by an input source.

use std::collections::VecDeque;

use game_core::{EntityId, GridError, Position, Spell};

use crate::api::{ActionProvider, Result, RuntimeError, TurnStatus};
use crate::events::TurnEvent;
use crate::session::{CastProgress, Session};

/// Intents are polled at most this many times per tick so a chatty input
/// source cannot spin the scheduler forever.
const MAX_INTENTS_PER_TICK: usize = 16;

/// One thing the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIntent {
    /// Cardinal step.
    Move(Position),
    /// Ready the spell in a slot (0-9).
    Prepare(usize),
    /// Drop the prepared spell.
    Cancel,
    /// Fire the prepared spell at a player-relative target.
    Cast(Position),
    /// Spend collected letters on a spell.
    Craft(String),
    /// Pass the turn.
    Wait,
}

/// Non-blocking source of player intents.
///
/// Returning `None` means "nothing yet"; the scheduler parks on the player
/// and asks again next tick.
pub trait InputSource {
    fn next_intent(&mut self, session: &Session, prepared: Option<usize>) -> Option<PlayerIntent>;
}

/// Replays a fixed list of intents; handy for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<PlayerIntent>,
}

impl ScriptedInput {
    pub fn new(intents: impl IntoIterator<Item = PlayerIntent>) -> Self {
        Self {
            queue: intents.into_iter().collect(),
        }
    }

    pub fn push(&mut self, intent: PlayerIntent) {
        self.queue.push_back(intent);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_intent(&mut self, _session: &Session, _prepared: Option<usize>) -> Option<PlayerIntent> {
        self.queue.pop_front()
    }
}

/// Turns intents into session actions.
///
/// At the start of each player turn every cooldown ticks down by one and
/// the codex is refreshed with whatever is in view. Moving, casting and
/// waiting end the turn; preparing, cancelling and crafting do not, and
/// neither does an action that fails (a blocked step, a rejected target).
///
/// A multi-turn spell, once its first sub-turn lands, plays out on its own:
/// every follow-up dispatch continues the cast at the same target without
/// asking the input source and without starting a fresh turn.
pub struct PlayerProvider<I> {
    input: I,
    prepared: Option<usize>,
    turn_open: bool,
    channeling: Option<CastProgress>,
}

impl<I: InputSource> PlayerProvider<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            prepared: None,
            turn_open: false,
            channeling: None,
        }
    }

    pub fn prepared(&self) -> Option<usize> {
        self.prepared
    }

    /// The multi-turn cast in progress, if any.
    pub fn channeling(&self) -> Option<&CastProgress> {
        self.channeling.as_ref()
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    fn begin_turn(&mut self, entity: EntityId, session: &mut Session) {
        if let Some(actor) = session.world_mut().actor_mut(entity) {
            actor.spells.recharge(1);
        }
        session.survey();
        self.turn_open = true;
    }

    /// Applies one intent; `Ok(true)` when it consumed the turn.
    fn apply(&mut self, entity: EntityId, intent: PlayerIntent, session: &mut Session) -> Result<bool> {
        match intent {
            PlayerIntent::Move(offset) => {
                if offset.chebyshev() != 1 || (offset.x != 0 && offset.y != 0) {
                    tracing::debug!(offset = ?offset, "ignoring non-cardinal move");
                    return Ok(false);
                }
                match session.step_actor(entity, offset) {
                    Ok(_) => Ok(true),
                    Err(GridError::Blocked { .. } | GridError::OutOfBounds { .. }) => Ok(false),
                    Err(err) => Err(err.into()),
                }
            }
            PlayerIntent::Prepare(slot) => {
                let actor = session
                    .world()
                    .actor(entity)
                    .ok_or(RuntimeError::MissingActor(entity))?;
                match actor.spells.prepare_check(slot) {
                    Ok(spell) => {
                        tracing::debug!(slot, spell = spell.name(), "prepared spell");
                        self.prepared = Some(slot);
                    }
                    Err(err) => tracing::debug!(slot, reason = %err, "cannot prepare"),
                }
                Ok(false)
            }
            PlayerIntent::Cancel => {
                self.prepared = None;
                Ok(false)
            }
            PlayerIntent::Cast(target) => self.cast(entity, target, session),
            PlayerIntent::Craft(word) => match session.craft(entity, &word) {
                Ok(_) => Ok(false),
                Err(RuntimeError::SpellBook(err)) => {
                    tracing::debug!(word = %word, reason = %err, "cannot craft");
                    Ok(false)
                }
                Err(err) => Err(err),
            },
            PlayerIntent::Wait => {
                session.record(TurnEvent::Waited { entity });
                Ok(true)
            }
        }
    }

    fn cast(&mut self, entity: EntityId, target: Position, session: &mut Session) -> Result<bool> {
        let Some(slot) = self.prepared else {
            tracing::debug!("cast without a prepared spell");
            return Ok(false);
        };
        let spell = {
            let actor = session
                .world()
                .actor(entity)
                .ok_or(RuntimeError::MissingActor(entity))?;
            match actor.spells.prepare_check(slot) {
                Ok(spell) => spell,
                Err(err) => {
                    tracing::debug!(slot, reason = %err, "prepared spell no longer available");
                    self.prepared = None;
                    return Ok(false);
                }
            }
        };

        match session.cast(spell, target, 0) {
            Ok(report) => {
                let padding = session.config().cooldown_padding;
                if let Some(actor) = session.world_mut().actor_mut(entity) {
                    actor.spells.mark_cast(slot, padding)?;
                }
                self.prepared = None;
                if report.combo {
                    self.channeling = Some(CastProgress {
                        spell: spell.kind,
                        slot,
                        target,
                        next_turn: 1,
                    });
                }
                Ok(true)
            }
            Err(err) if err.is_rejection() => {
                tracing::debug!(spell = spell.name(), target = ?target, reason = %err, "target rejected");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Runs the next sub-turn of a committed cast.
    fn continue_cast(
        &mut self,
        entity: EntityId,
        progress: CastProgress,
        session: &mut Session,
    ) -> Result<()> {
        let spell = Spell::new(progress.spell, entity);
        match session.cast(spell, progress.target, progress.next_turn) {
            Ok(report) => {
                if report.combo {
                    self.channeling = Some(CastProgress {
                        next_turn: progress.next_turn + 1,
                        ..progress
                    });
                }
                Ok(())
            }
            Err(err) if err.is_rejection() => {
                // later sub-turns of the stock spells never reject
                tracing::error!(
                    spell = spell.name(),
                    turn = progress.next_turn,
                    reason = %err,
                    "multi-turn cast rejected mid-way"
                );
                session.record(TurnEvent::CastAbandoned {
                    entity,
                    spell: spell.kind,
                });
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl<I: InputSource> ActionProvider for PlayerProvider<I> {
    fn take_turn(&mut self, entity: EntityId, session: &mut Session) -> Result<TurnStatus> {
        if let Some(progress) = self.channeling.take() {
            self.continue_cast(entity, progress, session)?;
            return Ok(TurnStatus::Done);
        }

        if !self.turn_open {
            self.begin_turn(entity, session);
        }

        for _ in 0..MAX_INTENTS_PER_TICK {
            let Some(intent) = self.input.next_intent(session, self.prepared) else {
                return Ok(TurnStatus::Waiting);
            };
            if self.apply(entity, intent, session)? {
                self.turn_open = false;
                return Ok(TurnStatus::Done);
            }
        }
        Ok(TurnStatus::Waiting)
    }
}
