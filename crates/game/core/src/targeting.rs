//! Snap chain turning a nominal target vector into a valid target.
//!
//! Each snap narrows or rejects a caster-relative offset. Spells compose a
//! fixed sequence of snaps with `and_then`, so the first rejection
//! short-circuits the rest:
//!
//! ```ignore
//! let target = snap_to_line(nominal, true)
//!     .and_then(|t| resolver.snap_to_visible(t, false, 0.0))
//!     .and_then(|t| snap_to_range(t, 5.0, 1.0))
//!     .and_then(|t| resolver.snap_to_entity(t, &filter))?;
//! ```

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::GridWorld;
use crate::state::{Density, DensitySet, FactionSet, Position};

/// Why a nominal target could not be resolved.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TargetRejection {
    /// Zero vector, or a direction that rounds to nothing.
    #[error("target has no direction")]
    NoDirection,

    #[error("target distance {distance:.2} outside [{lower}, {upper}]")]
    OutOfRange { distance: f64, lower: f64, upper: f64 },

    /// Line of fire blocked before it left the caster's square.
    #[error("line of fire blocked")]
    Blocked,

    /// Square holds nothing the spell may affect.
    #[error("no valid occupant at offset {0}")]
    NoValidOccupant(Position),
}

impl GameError for TargetRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoDirection => "TARGET_NO_DIRECTION",
            Self::OutOfRange { .. } => "TARGET_OUT_OF_RANGE",
            Self::Blocked => "TARGET_BLOCKED",
            Self::NoValidOccupant(_) => "TARGET_NO_VALID_OCCUPANT",
        }
    }
}

/// Outcome of one snap step.
pub type Snap = Result<Position, TargetRejection>;

/// Occupant requirements for [`TargetResolver::snap_to_entity`].
///
/// Empty sets mean "no requirement".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntityFilter {
    pub affected: FactionSet,
    pub avoid: FactionSet,
    pub densities: DensitySet,
}

impl EntityFilter {
    pub fn creature_of(affected: FactionSet) -> Self {
        Self {
            affected,
            avoid: FactionSet::empty(),
            densities: DensitySet::CREATURE,
        }
    }

    /// Open floor with nothing solid on it.
    pub fn open_floor() -> Self {
        Self {
            affected: FactionSet::empty(),
            avoid: FactionSet::empty(),
            densities: DensitySet::EMPTY,
        }
    }
}

/// Projects the target onto the nearest allowed direction, keeping its
/// Chebyshev length.
///
/// Without diagonals the unit direction is shrunk by
/// [`GameConfig::CARDINAL_SNAP_SCALE`] before rounding, which leaves at most
/// one non-zero axis.
pub fn snap_to_line(target: Position, diagonals: bool) -> Snap {
    let length = target.chebyshev();
    if length == 0 {
        return Err(TargetRejection::NoDirection);
    }

    let scale = if diagonals {
        1.0
    } else {
        GameConfig::CARDINAL_SNAP_SCALE
    };
    let direction = target.scaled_to(scale);
    if direction.is_zero() {
        return Err(TargetRejection::NoDirection);
    }
    Ok(direction * length)
}

/// Clamps the target to `upper`, then rejects it outside `[lower, upper]`.
pub fn snap_to_range(target: Position, upper: f64, lower: f64) -> Snap {
    let target = if target.magnitude() > upper {
        target.scaled_to(upper)
    } else {
        target
    };

    let distance = target.magnitude();
    if distance > upper || distance < lower {
        return Err(TargetRejection::OutOfRange {
            distance,
            lower,
            upper,
        });
    }
    Ok(target)
}

/// World-dependent snaps for a caster standing at `origin`.
#[derive(Clone, Copy, Debug)]
pub struct TargetResolver<'a> {
    world: &'a GridWorld,
    origin: Position,
}

impl<'a> TargetResolver<'a> {
    pub fn new(world: &'a GridWorld, origin: Position) -> Self {
        Self { world, origin }
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Pulls the target back to what the caster can actually hit.
    ///
    /// Walls always block; creatures block unless `pierce`. A creature in the
    /// way becomes the new target. `lower` is re-checked after snapping.
    pub fn snap_to_visible(&self, target: Position, pierce: bool, lower: f64) -> Snap {
        let blocking = if pierce {
            DensitySet::WALL
        } else {
            DensitySet::SOLID
        };
        let hit = self
            .world
            .raycast(self.origin, self.origin + target, blocking, true);

        let creature = hit
            .blocker
            .and_then(|id| self.world.actor(id))
            .filter(|actor| actor.density == Density::Creature);

        let snapped = match (creature, hit.last_open) {
            (Some(actor), _) => actor.position - self.origin,
            (None, Some(open)) => open - self.origin,
            (None, None) => return Err(TargetRejection::Blocked),
        };

        let distance = snapped.magnitude();
        if distance < lower {
            return Err(TargetRejection::OutOfRange {
                distance,
                lower,
                upper: f64::INFINITY,
            });
        }
        Ok(snapped)
    }

    /// Accepts the target only if the occupants of its square pass `filter`.
    pub fn snap_to_entity(&self, target: Position, filter: &EntityFilter) -> Snap {
        let tile = self.origin + target;
        let occupants: Vec<_> = self.world.occupants_at(tile).collect();

        let affected = filter.affected.is_empty()
            || occupants.iter().any(|a| filter.affected.has(a.faction));
        let avoided = occupants.iter().any(|a| filter.avoid.has(a.faction));
        let density = filter.densities.is_empty()
            || occupants.iter().any(|a| filter.densities.has(a.density));
        let needs_open = filter.densities.has(Density::Empty)
            && occupants
                .iter()
                .any(|a| DensitySet::SOLID.has(a.density));

        if affected && !avoided && density && !needs_open {
            Ok(target)
        } else {
            Err(TargetRejection::NoValidOccupant(target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorTemplate, Faction};

    fn arena() -> GridWorld {
        let mut world = GridWorld::new(10, 10);
        world.fill_floor().unwrap();
        world
    }

    #[test]
    fn line_snap_keeps_chebyshev_length() {
        assert_eq!(snap_to_line(Position::new(3, 1), false), Ok(Position::new(3, 0)));
        assert_eq!(snap_to_line(Position::new(1, -4), false), Ok(Position::new(0, -4)));
        assert_eq!(snap_to_line(Position::new(3, 2), true), Ok(Position::new(3, 3)));
        assert_eq!(snap_to_line(Position::ORIGIN, true), Err(TargetRejection::NoDirection));
    }

    #[test]
    fn exact_diagonal_has_no_cardinal_direction() {
        assert_eq!(snap_to_line(Position::new(2, 2), false), Err(TargetRejection::NoDirection));
    }

    #[test]
    fn range_clamps_then_rechecks() {
        assert_eq!(snap_to_range(Position::new(6, 0), 5.0, 1.0), Ok(Position::new(5, 0)));
        assert!(snap_to_range(Position::ORIGIN, 5.0, 1.0).is_err());
        // (3, 4) scaled to 2 rounds to (1, 2), still longer than 2
        assert!(snap_to_range(Position::new(3, 4), 2.0, 0.0).is_err());
        assert_eq!(snap_to_range(Position::new(4, 3), 0.0, 0.0), Ok(Position::ORIGIN));
    }

    #[test]
    fn range_snap_is_idempotent() {
        for x in -7..=7 {
            for y in -7..=7 {
                for (upper, lower) in [(1.0, 1.0), (2.0, 0.0), (5.0, 1.0), (1.5, 0.0), (4.0, 2.0)] {
                    let once = snap_to_range(Position::new(x, y), upper, lower);
                    if let Ok(target) = once {
                        assert_eq!(snap_to_range(target, upper, lower), Ok(target));
                    }
                }
            }
        }
    }

    #[test]
    fn visible_snaps_onto_first_creature() {
        let mut world = arena();
        world
            .spawn(&ActorTemplate::creature("BAT", Faction::Hostile, 1), Position::new(4, 2))
            .unwrap();
        let resolver = TargetResolver::new(&world, Position::new(2, 2));
        assert_eq!(resolver.snap_to_visible(Position::new(5, 0), false, 0.0), Ok(Position::new(2, 0)));
        assert_eq!(resolver.snap_to_visible(Position::new(5, 0), true, 0.0), Ok(Position::new(5, 0)));
    }

    #[test]
    fn wall_next_to_caster_blocks() {
        let mut world = arena();
        world.spawn(&ActorTemplate::wall(), Position::new(3, 2)).unwrap();
        let resolver = TargetResolver::new(&world, Position::new(2, 2));
        assert_eq!(
            resolver.snap_to_visible(Position::new(3, 0), false, 0.0),
            Err(TargetRejection::Blocked)
        );
    }

    #[test]
    fn wall_further_out_shortens_target() {
        let mut world = arena();
        world.spawn(&ActorTemplate::wall(), Position::new(5, 2)).unwrap();
        let resolver = TargetResolver::new(&world, Position::new(2, 2));
        assert_eq!(resolver.snap_to_visible(Position::new(4, 0), true, 0.0), Ok(Position::new(2, 0)));
        assert!(resolver.snap_to_visible(Position::new(4, 0), true, 3.0).is_err());
    }

    #[test]
    fn entity_filter_checks_faction_and_density() {
        let mut world = arena();
        world
            .spawn(&ActorTemplate::creature("BAT", Faction::Hostile, 1), Position::new(3, 2))
            .unwrap();
        let resolver = TargetResolver::new(&world, Position::new(2, 2));

        let hostile = EntityFilter::creature_of(FactionSet::HOSTILE);
        assert!(resolver.snap_to_entity(Position::new(1, 0), &hostile).is_ok());
        assert!(resolver.snap_to_entity(Position::new(0, 1), &hostile).is_err());

        let allies = EntityFilter::creature_of(FactionSet::ALLY);
        assert!(resolver.snap_to_entity(Position::new(1, 0), &allies).is_err());

        let avoid = EntityFilter {
            avoid: FactionSet::HOSTILE,
            ..EntityFilter::default()
        };
        assert!(resolver.snap_to_entity(Position::new(1, 0), &avoid).is_err());
    }

    #[test]
    fn open_floor_rejects_occupied_square() {
        let mut world = arena();
        world
            .spawn(&ActorTemplate::creature("BAT", Faction::Hostile, 1), Position::new(3, 2))
            .unwrap();
        let resolver = TargetResolver::new(&world, Position::new(2, 2));
        let floor = EntityFilter::open_floor();
        assert!(resolver.snap_to_entity(Position::new(1, 0), &floor).is_err());
        assert!(resolver.snap_to_entity(Position::new(0, 1), &floor).is_ok());
        // off the map there is no floor at all
        assert!(resolver.snap_to_entity(Position::new(-5, 0), &floor).is_err());
    }
}
