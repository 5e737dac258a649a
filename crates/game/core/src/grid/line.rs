//! Digital line stepping and rotational symmetry.

use crate::state::{Position, round_half_even};

/// Square visited at `step` of `steps` along `start → start + diff`.
///
/// The dominant axis advances by exactly one per step; the other coordinate
/// is interpolated and rounded half-to-even.
pub(crate) fn step_square(start: Position, diff: Position, step: i32, steps: i32) -> Position {
    let t = step as f64 / steps as f64;
    Position::new(
        round_half_even(start.x as f64 + diff.x as f64 * t),
        round_half_even(start.y as f64 + diff.y as f64 * t),
    )
}

/// Number of steps on the dominant axis. Ties pick the x axis.
pub(crate) fn dominant_steps(diff: Position) -> i32 {
    if diff.y.abs() > diff.x.abs() {
        diff.y.abs()
    } else {
        diff.x.abs()
    }
}

/// Squares from `start` to `end` inclusive.
///
/// The result has `max(|dx|, |dy|) + 1` squares, one fewer when `offset`
/// skips the start square, and always ends on `end`.
pub fn get_line(start: Position, end: Position, offset: bool) -> Vec<Position> {
    let diff = end - start;
    let steps = dominant_steps(diff);
    if steps == 0 {
        return if offset { Vec::new() } else { vec![start] };
    }

    let first = if offset { 1 } else { 0 };
    (first..=steps)
        .map(|step| step_square(start, diff, step, steps))
        .collect()
}

/// Expands base offsets by 0°, 90°, 180° and 270° rotations about the origin.
///
/// Used for cross-shaped areas and for per-archetype movement offsets.
pub fn rotations(base: &[Position]) -> Vec<Position> {
    let mut squares = Vec::with_capacity(base.len() * 4);
    let mut current: Vec<Position> = base.to_vec();
    for _ in 0..4 {
        squares.extend(current.iter().copied());
        for square in &mut current {
            *square = square.rotate_quarter();
        }
    }
    squares
}
