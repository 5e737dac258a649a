//! Snap chains and effect plans for every spell kind.

use crate::area::Area;
use crate::combat::Affinities;
use crate::effect::Effect;
use crate::grid::GridWorld;
use crate::state::{Actor, ActorTemplate, DamageType, DensitySet, FactionSet, Position};
use crate::targeting::{EntityFilter, TargetResolver, snap_to_line, snap_to_range};

use super::{CastError, CastPlan, CastStep, Reach, SpellKind, SpellParams};

pub(super) fn params(kind: SpellKind) -> SpellParams {
    use SpellKind::*;
    let (lower, upper, turns, reach, description) = match kind {
        Zap => (1.0, 1.0, 1, Reach::Melee, "Shock an adjacent creature."),
        Flare => (0.0, 2.0, 1, Reach::Both, "Burst of fire around a nearby square."),
        Push => (0.0, 0.0, 1, Reach::Melee, "Blast adjacent creatures away and stun them."),
        Bolt => (1.0, 5.0, 1, Reach::Ranged, "Lightning at the first creature in a line."),
        Jump => (1.0, 2.0, 1, Reach::None, "Leap to an open square."),
        Recharge => (0.0, 0.0, 1, Reach::None, "Shorten every cooldown."),
        Beam => (1.0, 4.0, 1, Reach::Ranged, "Piercing ray along a straight line."),
        Freeze => (1.0, 3.0, 1, Reach::Ranged, "Ice cross that stuns."),
        Golem => (1.0, 1.5, 1, Reach::None, "Raise an allied golem."),
        Barrier => (1.0, 1.5, 1, Reach::None, "Raise a wall."),
        Bite => (1.0, 1.0, 1, Reach::Melee, "Bite an adjacent creature."),
        Spit => (2.0, 4.0, 1, Reach::Ranged, "Spit at a creature from afar."),
        Flurry => (1.0, 1.0, 5, Reach::Melee, "Wind up, then strike four times."),
    };
    SpellParams {
        lower,
        upper,
        turns,
        reach,
        description,
    }
}

/// Custom action of the Recharge spell.
pub fn recharge_action(_effect: &Effect, actor: &mut Actor) {
    actor.spells.recharge(1);
}

fn golem(caster: &Actor) -> ActorTemplate {
    ActorTemplate::creature("GOLEM", caster.faction, 3)
        .with_archetype("golem")
        .with_weight(2)
        .with_spells([SpellKind::Bite])
}

fn barrier() -> ActorTemplate {
    ActorTemplate {
        name: "BARRIER".into(),
        max_health: 3,
        affinities: Affinities::NONE,
        ..ActorTemplate::wall()
    }
}

pub(super) fn plan(
    kind: SpellKind,
    world: &GridWorld,
    caster: &Actor,
    target: Position,
    crit: bool,
    turn: u32,
) -> Result<CastPlan, CastError> {
    let p = params(kind);
    let resolver = TargetResolver::new(world, caster.position);
    let foes = caster.faction.opponents();
    let own = caster.faction.as_set();
    let power = if crit { 2 } else { 1 };
    let radius = if crit { 1.5 } else { 1.0 };

    let plan = match kind {
        SpellKind::Zap | SpellKind::Bite => {
            let target = snap_to_range(target, p.upper, p.lower)?;
            CastPlan::single(
                target,
                Effect::on(foes).with_damage(power, DamageType::Normal),
                Area::point(target),
            )
        }
        SpellKind::Flare => {
            let target = snap_to_range(target, p.upper, p.lower)?;
            CastPlan::single(
                target,
                Effect::on(foes).with_damage(1, DamageType::Fire),
                Area::circle(target, radius, true),
            )
        }
        SpellKind::Push => {
            let target = snap_to_range(target, p.upper, p.lower)?;
            CastPlan::single(
                target,
                Effect::on(foes).with_radial(2).with_stun(1),
                Area::circle(target, radius, true),
            )
        }
        SpellKind::Bolt => {
            let target = snap_to_line(target, true)
                .and_then(|t| resolver.snap_to_visible(t, false, 0.0))
                .and_then(|t| snap_to_range(t, p.upper, p.lower))
                .and_then(|t| resolver.snap_to_entity(t, &EntityFilter::creature_of(foes)))?;
            CastPlan::single(
                target,
                Effect::on(foes).with_damage(power, DamageType::Electric),
                Area::point(target),
            )
        }
        SpellKind::Jump => {
            let target = snap_to_range(target, p.upper, p.lower)
                .and_then(|t| resolver.snap_to_entity(t, &EntityFilter::open_floor()))?;
            CastPlan::single(
                target,
                Effect::on(own).with_knockback(target, true),
                Area::point(Position::ORIGIN),
            )
        }
        SpellKind::Recharge => {
            let target = snap_to_range(target, p.upper, p.lower)?;
            CastPlan::single(
                target,
                Effect::on(own).with_action(recharge_action),
                Area::point(Position::ORIGIN),
            )
        }
        SpellKind::Beam => {
            let target = snap_to_line(target, false)
                .and_then(|t| snap_to_range(t, p.upper, p.lower))
                .and_then(|t| resolver.snap_to_visible(t, true, p.lower))?;
            CastPlan::single(
                target,
                Effect::on(foes).with_damage(power, DamageType::Normal),
                Area::line(Position::ORIGIN, target, true),
            )
        }
        SpellKind::Freeze => {
            let target = snap_to_line(target, false)
                .and_then(|t| snap_to_range(t, p.upper, p.lower))
                .and_then(|t| resolver.snap_to_visible(t, false, p.lower))?;
            let radii: &[i32] = if crit { &[1, 2] } else { &[1] };
            CastPlan::single(
                target,
                Effect::on(foes).with_damage(1, DamageType::Ice).with_stun(2),
                Area::cross(target, radii, false),
            )
        }
        SpellKind::Golem => {
            let target = snap_to_range(target, p.upper, p.lower)
                .and_then(|t| resolver.snap_to_entity(t, &EntityFilter::open_floor()))?;
            CastPlan::single(
                target,
                floor_effect().with_summon(golem(caster)),
                Area::point(target),
            )
        }
        SpellKind::Barrier => {
            let target = snap_to_range(target, p.upper, p.lower)
                .and_then(|t| resolver.snap_to_entity(t, &EntityFilter::open_floor()))?;
            CastPlan::single(
                target,
                floor_effect().with_summon(barrier()),
                Area::point(target),
            )
        }
        SpellKind::Spit => {
            let target = snap_to_line(target, true)
                .and_then(|t| resolver.snap_to_visible(t, false, p.lower))
                .and_then(|t| snap_to_range(t, p.upper, p.lower))?;
            CastPlan::single(
                target,
                Effect::on(foes).with_damage(power, DamageType::Normal),
                Area::point(target),
            )
        }
        SpellKind::Flurry => flurry(target, foes, power, turn, p.turns)?,
    };

    Ok(plan)
}

fn floor_effect() -> Effect {
    Effect::on(FactionSet::NEUTRAL).with_densities(DensitySet::EMPTY)
}

/// Wind-up on sub-turn 0, then one strike per sub-turn. Every sub-turn but
/// the last keeps control with the caster.
fn flurry(
    target: Position,
    foes: FactionSet,
    power: i32,
    turn: u32,
    turns: u32,
) -> Result<CastPlan, CastError> {
    let target = snap_to_range(target, 1.0, 1.0)?;
    let effect = if turn == 0 {
        Effect::on(foes)
    } else {
        Effect::on(foes).with_damage(power, DamageType::Normal)
    };
    Ok(CastPlan {
        target,
        steps: vec![CastStep {
            effect,
            area: Area::point(target),
            delay_ms: if turn == 0 { 0 } else { 150 },
        }],
        combo: turn + 1 < turns,
    })
}
