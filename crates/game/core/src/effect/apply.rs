use crate::area::Area;
use crate::grid::{GridError, GridWorld};
use crate::state::{EntityId, Position};

use super::{Effect, EffectReport, Hit, Knockback};

impl Effect {
    /// Applies the effect to every matching occupant of `area`, cast by `caster`.
    ///
    /// Tiles are deduplicated and each occupant is affected at most once, so
    /// an occupant knocked onto a later square of the same area is not hit
    /// twice. Per occupant the steps run in order: damage and stun, linear
    /// knockback, radial knockback, summon, custom action. An occupant
    /// destroyed by the damage step skips the rest.
    pub fn apply(
        &self,
        world: &mut GridWorld,
        area: &Area,
        caster: EntityId,
    ) -> Result<EffectReport, GridError> {
        let caster_position = world
            .actor(caster)
            .ok_or(GridError::UnknownEntity(caster))?
            .position;

        let mut report = EffectReport::default();
        let mut touched: Vec<EntityId> = Vec::new();
        let mut summoned = false;

        for tile in area.tiles_from(caster_position) {
            // snapshot: damage and pushes edit this tile while we walk it
            let occupants: Vec<EntityId> = world.occupant_ids(tile).to_vec();

            for id in occupants {
                if touched.contains(&id) {
                    continue;
                }
                match world.actor(id) {
                    Some(actor) if self.applies_to(actor) => touched.push(id),
                    _ => continue,
                }

                if self.damage != 0 || self.stun > 0 {
                    let outcome = world.damage(id, self.damage, self.damage_type, self.stun)?;
                    report.hits.push(Hit {
                        target: id,
                        outcome,
                    });
                    if outcome.destroyed {
                        report.destroyed.push(id);
                        continue;
                    }
                }

                if let Some(vector) = self.knockback {
                    self.knock(world, id, vector, &mut report)?;
                }

                if let Some(strength) = self.radial {
                    let position = world
                        .actor(id)
                        .ok_or(GridError::UnknownEntity(id))?
                        .position;
                    let away = position - caster_position - area.origin;
                    if !away.is_zero() {
                        let vector = away.scaled_to(strength as f64);
                        self.knock(world, id, vector, &mut report)?;
                    }
                }

                if let Some(template) = &self.summon
                    && !summoned
                {
                    summoned = true;
                    let at = world
                        .actor(id)
                        .ok_or(GridError::UnknownEntity(id))?
                        .position;
                    match world.spawn(template, at) {
                        Ok(entity) => report.summoned.push(entity),
                        Err(GridError::TileFull { .. }) => report.blocked_summons += 1,
                        Err(err) => return Err(err),
                    }
                }

                if let Some(action) = self.action
                    && let Some(actor) = world.actor_mut(id)
                {
                    action(self, actor);
                    report.actions.push(id);
                }
            }
        }

        Ok(report)
    }

    fn knock(
        &self,
        world: &mut GridWorld,
        id: EntityId,
        vector: Position,
        report: &mut EffectReport,
    ) -> Result<(), GridError> {
        let from = world
            .actor(id)
            .ok_or(GridError::UnknownEntity(id))?
            .position;
        let to = world.push(id, vector, self.teleport)?;
        if to != from {
            report.moved.push(Knockback {
                entity: id,
                from,
                to,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::area::Area;
    use crate::effect::Effect;
    use crate::grid::GridWorld;
    use crate::state::{
        Actor, ActorTemplate, DamageType, DensitySet, EntityId, Faction, FactionSet, Position,
    };

    fn arena() -> (GridWorld, EntityId) {
        let mut world = GridWorld::new(9, 9);
        world.fill_floor().unwrap();
        let player = world
            .spawn_player(
                &ActorTemplate::creature("PLAYER", Faction::Ally, 5),
                Position::new(4, 4),
            )
            .unwrap();
        (world, player)
    }

    fn hostile(world: &mut GridWorld, x: i32, y: i32) -> EntityId {
        world
            .spawn(&ActorTemplate::creature("BAT", Faction::Hostile, 3), Position::new(x, y))
            .unwrap()
    }

    #[test]
    fn filter_skips_caster_faction() {
        let (mut world, player) = arena();
        let bat = hostile(&mut world, 5, 4);
        let effect = Effect::on(FactionSet::HOSTILE).with_damage(1, DamageType::Fire);
        let area = Area::circle(Position::ORIGIN, 1.0, true);

        let report = effect.apply(&mut world, &area, player).unwrap();
        assert_eq!(report.hits.len(), 1);
        assert_eq!(world.actor(bat).unwrap().health.current, 2);
        assert_eq!(world.actor(player).unwrap().health.current, 5);
    }

    #[test]
    fn duplicate_squares_apply_once() {
        let (mut world, player) = arena();
        let bat = hostile(&mut world, 5, 4);
        let effect = Effect::on(FactionSet::HOSTILE).with_damage(1, DamageType::Normal);
        let area = Area {
            origin: Position::new(1, 0),
            squares: vec![Position::new(1, 0), Position::new(1, 0)],
        };
        effect.apply(&mut world, &area, player).unwrap();
        assert_eq!(world.actor(bat).unwrap().health.current, 2);
    }

    #[test]
    fn radial_push_moves_outward_and_stuns() {
        let (mut world, player) = arena();
        let east = hostile(&mut world, 5, 4);
        let south = hostile(&mut world, 4, 5);
        let effect = Effect::on(FactionSet::HOSTILE).with_radial(2).with_stun(1);
        let area = Area::circle(Position::ORIGIN, 1.0, true);

        let report = effect.apply(&mut world, &area, player).unwrap();
        assert_eq!(report.moved.len(), 2);
        assert_eq!(world.actor(east).unwrap().position, Position::new(7, 4));
        assert_eq!(world.actor(south).unwrap().position, Position::new(4, 7));
        assert_eq!(world.actor(east).unwrap().stun, 1);
        assert_eq!(world.actor(south).unwrap().stun, 1);
    }

    #[test]
    fn destroyed_occupant_skips_knockback() {
        let (mut world, player) = arena();
        let bat = hostile(&mut world, 5, 4);
        let effect = Effect::on(FactionSet::HOSTILE)
            .with_damage(5, DamageType::Normal)
            .with_knockback(Position::new(2, 0), false);
        let area = Area::point(Position::new(1, 0));

        let report = effect.apply(&mut world, &area, player).unwrap();
        assert_eq!(report.destroyed, vec![bat]);
        assert!(report.moved.is_empty());
        assert_eq!(world.actor(bat).unwrap().position, Position::new(5, 4));
    }

    #[test]
    fn summon_triggers_once_per_application() {
        let (mut world, player) = arena();
        let golem = ActorTemplate::creature("GOLEM", Faction::Ally, 3);
        let effect = Effect::on(FactionSet::NEUTRAL)
            .with_densities(DensitySet::EMPTY)
            .with_summon(golem);
        let area = Area::line(Position::ORIGIN, Position::new(3, 0), true);

        let report = effect.apply(&mut world, &area, player).unwrap();
        assert_eq!(report.summoned.len(), 1);
        let summoned = world.actor(report.summoned[0]).unwrap();
        assert_eq!(summoned.position, Position::new(5, 4));
        assert_eq!(summoned.faction, Faction::Ally);
    }

    #[test]
    fn custom_action_runs_on_each_target() {
        fn mark(_: &Effect, actor: &mut Actor) {
            actor.stun += 7;
        }
        let (mut world, player) = arena();
        let effect = Effect::on(FactionSet::ALLY).with_action(mark);
        let report = effect
            .apply(&mut world, &Area::point(Position::ORIGIN), player)
            .unwrap();
        assert_eq!(report.actions, vec![player]);
        assert_eq!(world.actor(player).unwrap().stun, 7);
    }
}
