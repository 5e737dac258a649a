use crate::state::{DensitySet, Position};

use super::GridWorld;

impl GridWorld {
    /// True if a ray from `origin` reaches `origin + square` without hitting a wall.
    pub fn check_line_of_sight(&self, square: Position, origin: Position) -> bool {
        let target = origin + square;
        self.raycast(origin, target, DensitySet::WALL, true).last_open == Some(target)
    }

    /// Keeps the offsets that are visible from `origin`.
    pub fn filter_line_of_sight(
        &self,
        squares: impl IntoIterator<Item = Position>,
        origin: Position,
    ) -> Vec<Position> {
        squares
            .into_iter()
            .filter(|square| self.check_line_of_sight(*square, origin))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorTemplate, Faction};

    #[test]
    fn walls_hide_squares_creatures_do_not() {
        let mut world = GridWorld::new(6, 3);
        world.fill_floor().unwrap();
        world.spawn(&ActorTemplate::wall(), Position::new(2, 0)).unwrap();
        world
            .spawn(&ActorTemplate::creature("BAT", Faction::Hostile, 1), Position::new(2, 2))
            .unwrap();

        let origin = Position::new(0, 0);
        assert!(!world.check_line_of_sight(Position::new(4, 0), origin));
        assert!(world.check_line_of_sight(Position::new(1, 0), origin));

        let row = Position::new(0, 2);
        assert!(world.check_line_of_sight(Position::new(4, 0), row));

        let visible = world.filter_line_of_sight(
            [Position::new(1, 0), Position::new(3, 0), Position::new(0, 1)],
            origin,
        );
        assert_eq!(visible, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn own_square_is_not_visible() {
        let mut world = GridWorld::new(2, 2);
        world.fill_floor().unwrap();
        assert!(!world.check_line_of_sight(Position::ORIGIN, Position::new(1, 1)));
    }
}
