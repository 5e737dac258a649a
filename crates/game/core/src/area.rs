//! Area shapes expanded into explicit square lists.
//!
//! Squares are offsets relative to the caster. `origin` is the resolved target
//! the shape was built around; radial knockback pushes away from it.

use crate::grid::{get_line, rotations};
use crate::state::Position;

/// Shape an effect is applied over.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Point,
    Line { end: Position, offset_start: bool },
    Cross { radii: Vec<i32>, exclude_origin: bool },
    Circle { radius: f64, include_origin: bool },
    Cone { end: Position },
}

/// Origin plus the squares a shape covers. May contain duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Area {
    pub origin: Position,
    pub squares: Vec<Position>,
}

impl Area {
    pub fn from_shape(origin: Position, shape: &Shape) -> Self {
        match shape {
            Shape::Point => Self::point(origin),
            Shape::Line { end, offset_start } => Self::line(origin, *end, *offset_start),
            Shape::Cross {
                radii,
                exclude_origin,
            } => Self::cross(origin, radii, *exclude_origin),
            Shape::Circle {
                radius,
                include_origin,
            } => Self::circle(origin, *radius, *include_origin),
            Shape::Cone { end } => Self::cone(origin, *end),
        }
    }

    pub fn point(origin: Position) -> Self {
        Self {
            origin,
            squares: vec![origin],
        }
    }

    /// Digital line from `origin` to `end`, inclusive of `end`.
    pub fn line(origin: Position, end: Position, offset_start: bool) -> Self {
        Self {
            origin,
            squares: get_line(origin, end, offset_start),
        }
    }

    /// Cardinal arms at each radius, origin last unless excluded.
    pub fn cross(origin: Position, radii: &[i32], exclude_origin: bool) -> Self {
        let base: Vec<Position> = radii.iter().map(|r| Position::new(*r, 0)).collect();
        let mut squares: Vec<Position> = rotations(&base)
            .into_iter()
            .map(|offset| origin + offset)
            .collect();
        if !exclude_origin {
            squares.push(origin);
        }
        Self { origin, squares }
    }

    /// Every offset with Euclidean length ≤ `radius`.
    pub fn circle(origin: Position, radius: f64, include_origin: bool) -> Self {
        let reach = radius.max(0.0).floor() as i32;
        let mut squares = Vec::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                let offset = Position::new(dx, dy);
                let magnitude = offset.magnitude();
                if magnitude <= radius && (include_origin || magnitude > 0.0) {
                    squares.push(origin + offset);
                }
            }
        }
        Self { origin, squares }
    }

    // TODO: triangular cone along origin → end; until then cones cover nothing.
    pub fn cone(origin: Position, _end: Position) -> Self {
        Self {
            origin,
            squares: Vec::new(),
        }
    }

    pub fn contains(&self, square: Position) -> bool {
        self.squares.contains(&square)
    }

    /// Absolute tiles for a caster standing on `caster`, duplicates removed
    /// in first-occurrence order.
    pub fn tiles_from(&self, caster: Position) -> Vec<Position> {
        let mut tiles: Vec<Position> = Vec::with_capacity(self.squares.len());
        for square in &self.squares {
            let tile = *square + caster;
            if !tiles.contains(&tile) {
                tiles.push(tile);
            }
        }
        tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_of_radius_one_is_plus_shape() {
        let area = Area::circle(Position::ORIGIN, 1.0, true);
        assert_eq!(area.squares.len(), 5);
        assert!(area.contains(Position::ORIGIN));
        assert!(!area.contains(Position::new(1, 1)));
    }

    #[test]
    fn crit_circle_includes_diagonals() {
        let area = Area::circle(Position::new(2, 0), 1.5, false);
        assert_eq!(area.squares.len(), 8);
        assert!(area.contains(Position::new(3, 1)));
        assert!(!area.contains(Position::new(2, 0)));
    }

    #[test]
    fn cross_expands_each_radius() {
        let area = Area::cross(Position::ORIGIN, &[1, 2], false);
        assert_eq!(area.squares.len(), 9);
        assert_eq!(area.squares.last(), Some(&Position::ORIGIN));
        assert!(area.contains(Position::new(0, -2)));

        let hollow = Area::cross(Position::ORIGIN, &[1], true);
        assert!(!hollow.contains(Position::ORIGIN));
    }

    #[test]
    fn line_skips_origin_when_offset() {
        let area = Area::line(Position::ORIGIN, Position::new(3, 0), true);
        assert_eq!(
            area.squares,
            vec![Position::new(1, 0), Position::new(2, 0), Position::new(3, 0)]
        );
    }

    #[test]
    fn cone_is_empty() {
        assert!(Area::cone(Position::ORIGIN, Position::new(3, 0)).squares.is_empty());
    }

    #[test]
    fn tiles_are_deduplicated_in_order() {
        let area = Area {
            origin: Position::ORIGIN,
            squares: vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 0)],
        };
        assert_eq!(
            area.tiles_from(Position::new(5, 5)),
            vec![Position::new(6, 5), Position::new(5, 6)]
        );
    }
}
