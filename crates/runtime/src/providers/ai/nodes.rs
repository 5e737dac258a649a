//! Leaf nodes of the enemy behavior tree.
//!
//! Nodes only inspect the context and record a [`Decision`]; nothing here
//! touches the world.

use behavior_tree::{Behavior, Status};
use game_core::{Position, Spell, rotations};
use rand::seq::SliceRandom;

use super::{AiContext, Decision};

/// Keeps going with a multi-turn cast at its stored target and sub-turn.
pub struct ContinueCast;

impl Behavior<AiContext<'_>> for ContinueCast {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let Some(progress) = ctx.memory.cast else {
            return Status::Failure;
        };
        ctx.decide(Decision::Cast {
            slot: progress.slot,
            spell: progress.spell,
            target: progress.target,
            turn: progress.next_turn,
        });
        Status::Success
    }
}

/// Casts the first equipped spell, in slot order, whose opening sub-turn
/// would hit a live opponent.
///
/// Melee candidates are the four cardinal neighbours in shuffled order;
/// ranged candidates are the vectors to every opponent, nearest first.
pub struct AttackWithSpells;

impl Behavior<AiContext<'_>> for AttackWithSpells {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let equipped: Vec<(usize, Spell)> = ctx
            .actor
            .spells
            .equipped()
            .map(|(slot, equipped)| (slot, equipped.spell))
            .collect();

        for (slot, spell) in equipped {
            let reach = spell.params().reach;
            let mut candidates = Vec::new();
            if reach.melee() {
                let mut melee = rotations(&[Position::new(1, 0)]);
                melee.shuffle(&mut *ctx.rng);
                candidates.extend(melee);
            }
            if reach.ranged() {
                candidates.extend(ranged_candidates(ctx));
            }

            let chosen = candidates.into_iter().find(|target| {
                spell
                    .plan(ctx.world, *target, false, 0)
                    .is_ok_and(|plan| plan.threatens(ctx.world, ctx.actor))
            });

            if let Some(target) = chosen {
                ctx.decide(Decision::Cast {
                    slot,
                    spell: spell.kind,
                    target,
                    turn: 0,
                });
                return Status::Success;
            }
        }
        Status::Failure
    }
}

fn ranged_candidates(ctx: &AiContext<'_>) -> Vec<Position> {
    let origin = ctx.position();
    let mut opponents: Vec<_> = ctx
        .opponents()
        .map(|opponent| (opponent.position - origin, opponent.id))
        .collect();
    opponents.sort_by_key(|(offset, id)| (offset.magnitude_squared(), *id));
    opponents.into_iter().map(|(offset, _)| offset).collect()
}

/// Greedy step toward the nearest opponent in sight.
///
/// Fails when nobody is in view. With a target but no offset that strictly
/// closes the distance the enemy holds position; there is no pathfinding,
/// so it can stall behind obstacles.
pub struct Hunt;

impl Behavior<AiContext<'_>> for Hunt {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let origin = ctx.position();
        let radius = ctx.vision_radius as i32;

        let quarry = ctx
            .opponents()
            .map(|opponent| (opponent.position - origin, opponent.id))
            .filter(|(offset, _)| {
                offset.chebyshev() <= radius && ctx.world.check_line_of_sight(*offset, origin)
            })
            .min_by_key(|(offset, id)| (offset.magnitude_squared(), *id));

        let Some((toward, _)) = quarry else {
            return Status::Failure;
        };

        let current = toward.magnitude_squared();
        let best = ctx
            .archetype
            .movement_offsets()
            .into_iter()
            .filter(|offset| ctx.can_move(*offset))
            .map(|offset| ((toward - offset).magnitude_squared(), offset))
            .min_by_key(|(distance, _)| *distance);

        match best {
            Some((distance, offset)) if distance < current => ctx.decide(Decision::Move(offset)),
            _ => ctx.decide(Decision::Hold),
        }
        Status::Success
    }
}

/// Random step among the archetype's offsets, or stay put if boxed in.
pub struct Wander;

impl Behavior<AiContext<'_>> for Wander {
    fn tick(&self, ctx: &mut AiContext<'_>) -> Status {
        let mut offsets = ctx.archetype.movement_offsets();
        offsets.shuffle(&mut *ctx.rng);

        match offsets.into_iter().find(|offset| ctx.can_move(*offset)) {
            Some(offset) => ctx.decide(Decision::Move(offset)),
            None => ctx.decide(Decision::Hold),
        }
        Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CastProgress, EnemyMemory};
    use game_content::ArchetypeCatalog;
    use game_core::{ActorTemplate, EntityId, Faction, GridWorld, SpellKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Fixture {
        world: GridWorld,
        catalog: ArchetypeCatalog,
        memory: EnemyMemory,
        rng: StdRng,
        enemy: EntityId,
    }

    impl Fixture {
        fn new(key: &str, enemy_at: Position, player_at: Position) -> Self {
            let mut world = GridWorld::new(9, 9);
            world.fill_floor().unwrap();
            world
                .spawn_player(
                    &ActorTemplate::creature("PLAYER", Faction::Ally, 5),
                    player_at,
                )
                .unwrap();
            let catalog = ArchetypeCatalog::builtin();
            let template = catalog.get(key).unwrap().template(key);
            let enemy = world.spawn(&template, enemy_at).unwrap();
            Self {
                world,
                catalog,
                memory: EnemyMemory::default(),
                rng: StdRng::seed_from_u64(3),
                enemy,
            }
        }

        fn decide<B>(&mut self, node: &B) -> (Status, Option<Decision>)
        where
            B: for<'c> Behavior<AiContext<'c>>,
        {
            let actor = self.world.actor(self.enemy).unwrap();
            let key = actor.archetype.clone().unwrap();
            let archetype = self.catalog.get(&key).unwrap();
            let mut ctx = AiContext::new(
                actor,
                &self.world,
                archetype,
                &self.memory,
                8,
                &mut self.rng,
            );
            let status = node.tick(&mut ctx);
            (status, ctx.decision())
        }
    }

    #[test]
    fn continue_cast_replays_stored_progress() {
        let mut fx = Fixture::new("wolf", Position::new(4, 4), Position::new(5, 4));
        assert_eq!(fx.decide(&ContinueCast).0, Status::Failure);

        fx.memory.cast = Some(CastProgress {
            spell: SpellKind::Flurry,
            slot: 1,
            target: Position::new(1, 0),
            next_turn: 3,
        });
        let (status, decision) = fx.decide(&ContinueCast);
        assert_eq!(status, Status::Success);
        assert_eq!(
            decision,
            Some(Decision::Cast {
                slot: 1,
                spell: SpellKind::Flurry,
                target: Position::new(1, 0),
                turn: 3,
            })
        );
    }

    #[test]
    fn attack_picks_adjacent_opponent() {
        let mut fx = Fixture::new("bat", Position::new(4, 4), Position::new(4, 3));
        let (status, decision) = fx.decide(&AttackWithSpells);
        assert_eq!(status, Status::Success);
        assert!(matches!(
            decision,
            Some(Decision::Cast {
                spell: SpellKind::Bite,
                target,
                turn: 0,
                ..
            }) if target == Position::new(0, -1)
        ));
    }

    #[test]
    fn attack_fails_out_of_reach() {
        let mut fx = Fixture::new("bat", Position::new(1, 1), Position::new(7, 7));
        assert_eq!(fx.decide(&AttackWithSpells), (Status::Failure, None));
    }

    #[test]
    fn spider_spits_from_range() {
        let mut fx = Fixture::new("spider", Position::new(1, 4), Position::new(4, 4));
        let (_, decision) = fx.decide(&AttackWithSpells);
        assert!(matches!(
            decision,
            Some(Decision::Cast {
                spell: SpellKind::Spit,
                ..
            })
        ));
    }

    #[test]
    fn hunt_closes_distance() {
        let mut fx = Fixture::new("wolf", Position::new(1, 4), Position::new(6, 4));
        let (status, decision) = fx.decide(&Hunt);
        assert_eq!(status, Status::Success);
        assert_eq!(decision, Some(Decision::Move(Position::new(1, 0))));
    }

    #[test]
    fn hunt_ignores_hidden_opponents() {
        let mut fx = Fixture::new("wolf", Position::new(1, 4), Position::new(6, 4));
        fx.world
            .spawn(&ActorTemplate::wall(), Position::new(3, 4))
            .unwrap();
        assert_eq!(fx.decide(&Hunt), (Status::Failure, None));
    }

    #[test]
    fn hunt_holds_when_no_step_helps() {
        let mut fx = Fixture::new("wolf", Position::new(0, 0), Position::new(2, 0));
        fx.world
            .spawn(&ActorTemplate::creature("ROCK", Faction::Neutral, 1), Position::new(1, 0))
            .unwrap();
        fx.world
            .spawn(&ActorTemplate::creature("ROCK", Faction::Neutral, 1), Position::new(0, 1))
            .unwrap();
        assert_eq!(fx.decide(&Hunt), (Status::Success, Some(Decision::Hold)));
    }

    #[test]
    fn wander_holds_when_boxed_in() {
        let mut fx = Fixture::new("wolf", Position::new(0, 0), Position::new(8, 8));
        for at in [Position::new(1, 0), Position::new(0, 1)] {
            fx.world.spawn(&ActorTemplate::wall(), at).unwrap();
        }
        assert_eq!(fx.decide(&Wander), (Status::Success, Some(Decision::Hold)));
    }

    #[test]
    fn wander_is_deterministic_per_seed() {
        let mut a = Fixture::new("bat", Position::new(4, 4), Position::new(8, 8));
        let mut b = Fixture::new("bat", Position::new(4, 4), Position::new(8, 8));
        assert_eq!(a.decide(&Wander), b.decide(&Wander));
    }
}
