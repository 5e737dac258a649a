use crate::state::{DensitySet, EntityId, Position};

use super::GridWorld;
use super::line::{dominant_steps, step_square};

/// Result of a raycast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RayHit {
    /// Last square the ray passed through without being blocked.
    pub last_open: Option<Position>,
    /// Occupant that stopped the ray, if any.
    pub blocker: Option<EntityId>,
}

impl RayHit {
    const NONE: Self = Self {
        last_open: None,
        blocker: None,
    };
}

impl GridWorld {
    /// Walks the digital line from `start` to `end`.
    ///
    /// Stops on the first square holding an occupant whose density is in
    /// `blocking` and reports the previous open square plus that occupant.
    /// Leaving the map stops the ray with no blocker. `offset_first` skips
    /// the start square.
    pub fn raycast(
        &self,
        start: Position,
        end: Position,
        blocking: DensitySet,
        offset_first: bool,
    ) -> RayHit {
        let diff = end - start;
        let steps = dominant_steps(diff);

        if steps == 0 {
            if offset_first || !self.in_range(start) {
                return RayHit::NONE;
            }
            return match self.first_blocker(start, blocking) {
                Some(blocker) => RayHit {
                    last_open: None,
                    blocker: Some(blocker.id),
                },
                None => RayHit {
                    last_open: Some(start),
                    blocker: None,
                },
            };
        }

        let mut previous = None;
        let first = if offset_first { 1 } else { 0 };
        for step in first..=steps {
            let square = step_square(start, diff, step, steps);
            if !self.in_range(square) {
                return RayHit {
                    last_open: previous,
                    blocker: None,
                };
            }
            if let Some(blocker) = self.first_blocker(square, blocking) {
                return RayHit {
                    last_open: previous,
                    blocker: Some(blocker.id),
                };
            }
            previous = Some(square);
        }

        RayHit {
            last_open: Some(end),
            blocker: None,
        }
    }
}
