//! Abstraction for sourcing player and NPC intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the scheduler
//! can run with human input, scripted fixtures, or AI policies.
use game_core::EntityId;

use super::errors::Result;
use crate::events::TurnEvent;
use crate::session::Session;

/// Whether the acting entity finished its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// A committed action consumed the turn.
    Done,
    /// Nothing was committed yet; ask again on the next tick.
    Waiting,
}

/// Drives one entity's turn against the live session.
///
/// Implementations mutate the session directly (move, cast) and report
/// whether the turn is over. Returning [`TurnStatus::Waiting`] leaves the
/// scheduler parked on the same entity, which is how a human player's
/// non-blocking input polling is modeled.
pub trait ActionProvider {
    fn take_turn(&mut self, entity: EntityId, session: &mut Session) -> Result<TurnStatus>;
}

impl<P: ActionProvider + ?Sized> ActionProvider for Box<P> {
    fn take_turn(&mut self, entity: EntityId, session: &mut Session) -> Result<TurnStatus> {
        (**self).take_turn(entity, session)
    }
}

/// Ends every turn immediately without acting.
/// Useful for testing or as a fallback.
pub struct WaitActionProvider;

impl ActionProvider for WaitActionProvider {
    fn take_turn(&mut self, entity: EntityId, session: &mut Session) -> Result<TurnStatus> {
        session.record(TurnEvent::Waited { entity });
        Ok(TurnStatus::Done)
    }
}
