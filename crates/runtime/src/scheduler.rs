//! Round-robin turn scheduler.
//!
//! The scheduler is ticked by the host (a frame loop, a test, the headless
//! client). Each tick dispatches turns until one of three things happens:
//! the player provider has no input yet, a paced effect is still playing, or
//! the per-tick step budget runs out. Control never blocks on input.

use game_core::{EntityId, TurnOrder};

use crate::api::{ActionProvider, Result, RuntimeError, TurnStatus};
use crate::events::TurnEvent;
use crate::session::Session;

/// Why a tick returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Parked on the player until its provider produces an intent.
    AwaitingInput,
    /// An actor is held by an in-flight effect; call
    /// [`Session::settle_effects`] once it has been shown.
    Resolving,
    /// Step budget spent; tick again to continue.
    Yielded,
}

#[derive(Debug, Clone)]
pub struct TurnScheduler {
    order: TurnOrder,
    step_budget: u32,
    /// Entity whose turn is in progress, cleared when the cursor moves.
    acting: Option<EntityId>,
    round: u32,
}

impl TurnScheduler {
    pub fn new(step_budget: u32) -> Self {
        Self {
            order: TurnOrder::new(),
            step_budget: step_budget.max(1),
            acting: None,
            round: 1,
        }
    }

    /// Appends `entity` to the end of the turn order.
    pub fn register(&mut self, entity: EntityId) -> bool {
        self.order.register(entity)
    }

    pub fn order(&self) -> &TurnOrder {
        &self.order
    }

    /// Current round, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn step_budget(&self) -> u32 {
        self.step_budget
    }

    /// Runs turns until input is needed, an effect is playing, or the
    /// budget is spent.
    ///
    /// A combo keeps the same actor in control: after a turn that leaves
    /// its combo flag set, the flag is cleared and the actor is dispatched
    /// again before the cursor moves.
    pub fn tick(
        &mut self,
        session: &mut Session,
        player: &mut dyn ActionProvider,
        npc: &mut dyn ActionProvider,
    ) -> Result<TickOutcome> {
        let mut steps: u32 = 0;

        loop {
            if session.is_resolving() {
                return Ok(TickOutcome::Resolving);
            }

            for entity in session.take_joined() {
                if self.order.register(entity) {
                    tracing::debug!(entity = %entity, "joined turn order");
                }
            }

            if steps >= self.step_budget {
                tracing::debug!(steps, "step budget spent");
                return Ok(TickOutcome::Yielded);
            }

            if self.purge_dead(session) {
                self.complete_round(session);
            }
            let entity = self.order.current().ok_or(RuntimeError::EmptyRoster)?;
            steps += 1;

            if self.skip_if_stunned(entity, session) {
                self.advance(session);
                continue;
            }

            if self.acting != Some(entity) {
                self.acting = Some(entity);
                session.record(TurnEvent::TurnStarted {
                    entity,
                    round: self.round,
                });
            }

            let provider: &mut dyn ActionProvider = if entity.is_player() {
                &mut *player
            } else {
                &mut *npc
            };
            if provider.take_turn(entity, session)? == TurnStatus::Waiting {
                return Ok(TickOutcome::AwaitingInput);
            }

            let combo = session
                .world_mut()
                .actor_mut(entity)
                .filter(|actor| actor.is_alive())
                .is_some_and(|actor| std::mem::take(&mut actor.combo));
            if !combo {
                self.advance(session);
            }
        }
    }

    /// Drops dead actors; true when that carried the cursor past the end.
    fn purge_dead(&mut self, session: &Session) -> bool {
        let world = session.world();
        let purged = self.order.purge(|id| !world.is_alive(id));
        for entity in &purged.removed {
            tracing::debug!(entity = %entity, "removed from turn order");
        }
        purged.wrapped
    }

    /// Spends one point of stun instead of a turn.
    fn skip_if_stunned(&self, entity: EntityId, session: &mut Session) -> bool {
        let Some(actor) = session.world_mut().actor_mut(entity) else {
            return false;
        };
        if actor.stun == 0 {
            return false;
        }
        actor.stun -= 1;
        let remaining = actor.stun;
        tracing::debug!(entity = %entity, remaining, "stunned, skipping turn");
        session.record(TurnEvent::Stunned { entity, remaining });
        true
    }

    /// Hands the cursor to the next live actor; a wrap completes the round.
    fn advance(&mut self, session: &mut Session) {
        self.acting = None;

        let current = self.order.current();
        let current_dead = current.is_some_and(|id| !session.world().is_alive(id));
        let wrapped = if current_dead {
            // removal already leaves the cursor on the successor
            let was_last = self.order.cursor() + 1 == self.order.len();
            if let Some(id) = current {
                self.order.remove(id);
            }
            was_last
        } else {
            self.order.advance()
        };

        if wrapped {
            self.complete_round(session);
        }
    }

    /// Sweeps the dead and closes the round. The cursor is at the front
    /// here, so the sweep cannot wrap again.
    fn complete_round(&mut self, session: &mut Session) {
        self.purge_dead(session);
        tracing::info!(round = self.round, actors = self.order.len(), "round complete");
        session.record(TurnEvent::RoundCompleted { round: self.round });
        self.round += 1;
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new(game_core::GameConfig::DEFAULT_STEP_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WaitActionProvider;
    use game_content::ArchetypeCatalog;
    use game_core::{ActorTemplate, DamageType, Faction, GameConfig, GridWorld, Position, SpellRegistry};

    /// Always has nothing to do.
    struct Idle;

    impl ActionProvider for Idle {
        fn take_turn(&mut self, _entity: EntityId, _session: &mut Session) -> Result<TurnStatus> {
            Ok(TurnStatus::Waiting)
        }
    }

    /// Kills `victim` on the first turn it gets.
    struct Assassin {
        victim: EntityId,
    }

    impl ActionProvider for Assassin {
        fn take_turn(&mut self, _entity: EntityId, session: &mut Session) -> Result<TurnStatus> {
            if session.world().is_alive(self.victim) {
                session
                    .world_mut()
                    .damage(self.victim, 5, DamageType::Normal, 0)?;
            }
            Ok(TurnStatus::Done)
        }
    }

    fn rounds(session: &Session) -> Vec<u32> {
        session
            .events()
            .iter()
            .filter_map(|event| match event {
                TurnEvent::RoundCompleted { round } => Some(*round),
                _ => None,
            })
            .collect()
    }

    fn setup(hostiles: usize) -> (Session, TurnScheduler) {
        let mut world = GridWorld::new(8, 8);
        world.fill_floor().unwrap();
        world
            .spawn_player(
                &ActorTemplate::creature("PLAYER", Faction::Ally, 5),
                Position::new(0, 0),
            )
            .unwrap();
        let mut scheduler = TurnScheduler::new(64);
        scheduler.register(EntityId::PLAYER);
        for i in 0..hostiles {
            let id = world
                .spawn(
                    &ActorTemplate::creature("BAT", Faction::Hostile, 1),
                    Position::new(i as i32 + 2, 5),
                )
                .unwrap();
            scheduler.register(id);
        }
        let session = Session::new(
            world,
            GameConfig::default(),
            SpellRegistry::standard(),
            ArchetypeCatalog::builtin(),
            5,
        );
        (session, scheduler)
    }

    fn started(session: &Session) -> Vec<EntityId> {
        session
            .events()
            .iter()
            .filter_map(|event| match event {
                TurnEvent::TurnStarted { entity, .. } => Some(*entity),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn parks_on_player_without_input() {
        let (mut session, mut scheduler) = setup(2);
        let outcome = scheduler
            .tick(&mut session, &mut Idle, &mut WaitActionProvider)
            .unwrap();
        assert_eq!(outcome, TickOutcome::AwaitingInput);

        // polling again does not restart the turn
        scheduler
            .tick(&mut session, &mut Idle, &mut WaitActionProvider)
            .unwrap();
        assert_eq!(started(&session), vec![EntityId::PLAYER]);
    }

    #[test]
    fn budget_yields() {
        let (mut session, mut scheduler) = setup(2);
        scheduler.step_budget = 5;
        let outcome = scheduler
            .tick(&mut session, &mut WaitActionProvider, &mut WaitActionProvider)
            .unwrap();
        assert_eq!(outcome, TickOutcome::Yielded);
        assert_eq!(started(&session).len(), 5);
        assert_eq!(scheduler.round(), 2);
    }

    #[test]
    fn stunned_actor_loses_its_slot() {
        let (mut session, mut scheduler) = setup(1);
        let bat = scheduler.order().iter().nth(1).unwrap();
        session.world_mut().actor_mut(bat).unwrap().stun = 2;
        scheduler.step_budget = 4;

        scheduler
            .tick(&mut session, &mut WaitActionProvider, &mut WaitActionProvider)
            .unwrap();

        assert_eq!(started(&session), vec![EntityId::PLAYER, EntityId::PLAYER]);
        assert_eq!(session.world().actor(bat).unwrap().stun, 0);
    }

    #[test]
    fn dead_actors_are_dropped_before_their_turn() {
        let (mut session, mut scheduler) = setup(3);
        let second = scheduler.order().iter().nth(2).unwrap();
        session
            .world_mut()
            .damage(second, 5, DamageType::Normal, 0)
            .unwrap();
        scheduler.step_budget = 3;

        scheduler
            .tick(&mut session, &mut WaitActionProvider, &mut WaitActionProvider)
            .unwrap();

        assert!(!started(&session).contains(&second));
        assert!(!scheduler.order().contains(second));
        assert_eq!(scheduler.order().len(), 3);
    }

    #[test]
    fn empty_roster_is_an_error() {
        let (mut session, _) = setup(0);
        let mut scheduler = TurnScheduler::new(8);
        let err = scheduler
            .tick(&mut session, &mut WaitActionProvider, &mut WaitActionProvider)
            .unwrap_err();
        assert_eq!(err, RuntimeError::EmptyRoster);
    }

    #[test]
    fn rounds_are_reported() {
        let (mut session, mut scheduler) = setup(1);
        scheduler.step_budget = 4;
        scheduler
            .tick(&mut session, &mut WaitActionProvider, &mut WaitActionProvider)
            .unwrap();
        assert_eq!(rounds(&session), vec![1, 2]);
        assert_eq!(scheduler.round(), 3);
    }

    #[test]
    fn killing_the_last_in_order_still_closes_the_round() {
        let (mut session, mut scheduler) = setup(2);
        let first = scheduler.order().iter().nth(1).unwrap();
        let last = scheduler.order().iter().nth(2).unwrap();
        scheduler.step_budget = 3;

        scheduler
            .tick(
                &mut session,
                &mut WaitActionProvider,
                &mut Assassin { victim: last },
            )
            .unwrap();

        assert_eq!(
            started(&session),
            vec![EntityId::PLAYER, first, EntityId::PLAYER]
        );
        assert_eq!(rounds(&session), vec![1]);
        assert_eq!(scheduler.round(), 2);
        assert!(!scheduler.order().contains(last));
        assert!(session.events().iter().any(|event| matches!(
            event,
            TurnEvent::TurnStarted { entity, round: 2 } if *entity == EntityId::PLAYER
        )));
    }
}
