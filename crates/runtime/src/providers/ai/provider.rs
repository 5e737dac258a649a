//! Enemy action provider.

use behavior_tree::Behavior;
use game_core::{EntityId, GridError, Spell};

use super::{Decision, presets};
use crate::api::{ActionProvider, Result, TurnStatus};
use crate::events::TurnEvent;
use crate::session::{CastProgress, Session};

/// Runs the standard enemy tree for any actor with an archetype.
///
/// Enemies ignore cooldowns; the only pacing they get is the rest period
/// after a multi-turn cast.
#[derive(Debug, Default, Clone, Copy)]
pub struct AiProvider;

impl AiProvider {
    pub fn new() -> Self {
        Self
    }

    fn commit(&self, entity: EntityId, decision: Decision, session: &mut Session) -> Result<()> {
        match decision {
            Decision::Cast {
                slot,
                spell,
                target,
                turn,
            } => {
                let spell = Spell::new(spell, entity);
                match session.cast(spell, target, turn) {
                    Ok(report) => {
                        let rest_turns = session.archetype_of(entity).map_or(0, |a| a.rest_turns);
                        let memory = session.memory_mut(entity);
                        if report.combo {
                            memory.cast = Some(CastProgress {
                                spell: spell.kind,
                                slot,
                                target,
                                next_turn: turn + 1,
                            });
                        } else {
                            memory.cast = None;
                            if spell.params().turns > 1 {
                                memory.rest = rest_turns;
                            }
                        }
                    }
                    Err(err) if err.is_rejection() => {
                        if turn > 0 {
                            // later sub-turns of the stock spells never reject
                            tracing::error!(
                                entity = %entity,
                                spell = spell.name(),
                                turn,
                                reason = %err,
                                "abandoning multi-turn cast"
                            );
                            session.memory_mut(entity).cast = None;
                            session.record(TurnEvent::CastAbandoned {
                                entity,
                                spell: spell.kind,
                            });
                        } else {
                            session.record(TurnEvent::Waited { entity });
                        }
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Decision::Move(offset) => match session.step_actor(entity, offset) {
                Ok(_) => {}
                Err(GridError::Blocked { .. } | GridError::OutOfBounds { .. }) => {
                    session.record(TurnEvent::Waited { entity });
                }
                Err(err) => return Err(err.into()),
            },
            Decision::Rest => {
                let memory = session.memory_mut(entity);
                memory.rest = memory.rest.saturating_sub(1);
                let remaining = memory.rest;
                session.record(TurnEvent::Rested { entity, remaining });
            }
            Decision::Hold => session.record(TurnEvent::Waited { entity }),
        }
        Ok(())
    }
}

impl ActionProvider for AiProvider {
    fn take_turn(&mut self, entity: EntityId, session: &mut Session) -> Result<TurnStatus> {
        let decision = {
            let mut ctx = session.ai_context(entity)?;
            let tree = presets::standard_enemy();
            tree.tick(&mut ctx);
            ctx.decision().unwrap_or(Decision::Hold)
        };

        tracing::debug!(entity = %entity, decision = ?decision, "enemy decision");
        self.commit(entity, decision, session)?;
        Ok(TurnStatus::Done)
    }
}
