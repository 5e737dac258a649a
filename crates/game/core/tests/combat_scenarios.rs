use game_core::{
    ActorTemplate, CastError, DamageType, DamageTypes, DensitySet, EntityId, Faction, GridWorld,
    Position, Spell, SpellKind, TargetRejection, get_line, snap_to_range,
};
use game_core::combat::{Affinities, calculate_damage};

fn arena(width: u32, height: u32, caster_at: Position) -> GridWorld {
    let mut world = GridWorld::new(width, height);
    world.fill_floor().unwrap();
    let player = ActorTemplate::creature("PLAYER", Faction::Ally, 5);
    world.spawn_player(&player, caster_at).unwrap();
    world
}

fn hostile(world: &mut GridWorld, at: Position, health: u32) -> EntityId {
    world
        .spawn(&ActorTemplate::creature("BAT", Faction::Hostile, health), at)
        .unwrap()
}

#[test]
fn bolt_hits_visible_creature() {
    let mut world = arena(8, 3, Position::new(0, 1));
    let bat = hostile(&mut world, Position::new(3, 1), 3);

    let report = Spell::new(SpellKind::Bolt, EntityId::PLAYER)
        .cast(&mut world, Position::new(3, 0), false, 0)
        .unwrap();

    assert_eq!(report.target, Position::new(3, 0));
    assert!(!report.combo);
    assert_eq!(world.actor(bat).unwrap().health.current, 2);
    assert!(!world.actor(EntityId::PLAYER).unwrap().combo);
}

#[test]
fn bolt_behind_wall_is_rejected_without_mutation() {
    let mut world = arena(8, 3, Position::new(0, 1));
    let bat = hostile(&mut world, Position::new(3, 1), 3);
    world.spawn(&ActorTemplate::wall(), Position::new(1, 1)).unwrap();

    let err = Spell::new(SpellKind::Bolt, EntityId::PLAYER)
        .cast(&mut world, Position::new(3, 0), false, 0)
        .unwrap_err();

    assert_eq!(err, CastError::Rejected(TargetRejection::Blocked));
    assert_eq!(world.actor(bat).unwrap().health.current, 3);
    assert_eq!(world.actor(EntityId::PLAYER).unwrap().position, Position::new(0, 1));
}

#[test]
fn push_scatters_adjacent_hostiles_and_stuns_them() {
    let mut world = arena(9, 9, Position::new(4, 4));
    let east = hostile(&mut world, Position::new(5, 4), 3);
    let south = hostile(&mut world, Position::new(4, 5), 3);

    Spell::new(SpellKind::Push, EntityId::PLAYER)
        .cast(&mut world, Position::ORIGIN, false, 0)
        .unwrap();

    let east = world.actor(east).unwrap();
    let south = world.actor(south).unwrap();
    assert_eq!(east.position, Position::new(7, 4));
    assert_eq!(south.position, Position::new(4, 7));
    assert_eq!((east.stun, south.stun), (1, 1));
    assert_eq!(east.health.current, 3);
}

#[test]
fn failed_casts_never_mutate() {
    let mut world = arena(10, 10, Position::new(5, 5));
    hostile(&mut world, Position::new(6, 5), 2);
    world.spawn(&ActorTemplate::wall(), Position::new(5, 6)).unwrap();

    for kind in SpellKind::ALL {
        for x in -6..=6 {
            for y in -6..=6 {
                let before = snapshot(&world);
                let result = Spell::new(kind, EntityId::PLAYER).plan(&world, Position::new(x, y), false, 0);
                let mut probe = world.clone();
                let cast = Spell::new(kind, EntityId::PLAYER).cast(&mut probe, Position::new(x, y), false, 0);
                assert_eq!(result.is_ok(), cast.is_ok());
                if cast.is_err() {
                    assert_eq!(before, snapshot(&probe), "{kind} at ({x}, {y}) mutated on failure");
                }
            }
        }
    }
}

fn snapshot(world: &GridWorld) -> Vec<(EntityId, Position, u32, u32, bool)> {
    world
        .actors()
        .map(|a| (a.id, a.position, a.health.current, a.stun, a.destroyed))
        .collect()
}

#[test]
fn snap_to_range_is_idempotent() {
    for x in -9..=9 {
        for y in -9..=9 {
            for upper in [0.0, 1.0, 1.5, 2.0, 3.0, 5.0] {
                let once = snap_to_range(Position::new(x, y), upper, 0.0);
                if let Ok(target) = once {
                    assert_eq!(snap_to_range(target, upper, 0.0), once);
                }
            }
        }
    }
}

#[test]
fn raycast_to_self_reports_start() {
    let world = arena(4, 4, Position::new(1, 1));
    let p = Position::new(2, 2);
    let hit = world.raycast(p, p, DensitySet::empty(), false);
    assert_eq!(hit.last_open, Some(p));
    assert_eq!(hit.blocker, None);
}

#[test]
fn line_length_matches_dominant_axis() {
    for (start, end) in [((0, 0), (5, 2)), ((3, -1), (-4, 6)), ((2, 2), (2, 2)), ((-1, 0), (0, -7))] {
        let start = Position::from(start);
        let end = Position::from(end);
        let diff = end - start;
        let line = get_line(start, end, false);
        assert_eq!(line.len() as i32, diff.x.abs().max(diff.y.abs()) + 1);
        assert_eq!(*line.last().unwrap(), end);
    }
}

#[test]
fn invulnerability_overrides_resistance_and_vulnerability() {
    for ty in [DamageType::Normal, DamageType::Fire, DamageType::Ice, DamageType::Electric] {
        let all: DamageTypes = [ty].into_iter().collect();
        let affinities = Affinities {
            resistances: all,
            vulnerabilities: all,
            invulnerabilities: all,
        };
        for amount in 1..10 {
            assert_eq!(calculate_damage(amount, ty, &affinities), 0);
        }
    }
}
