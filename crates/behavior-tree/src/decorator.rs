//! Decorator nodes wrapping a single child.

use crate::{Behavior, BoxedBehavior, Status};

/// Flips the child's status.
pub struct Inverter<'a, C> {
    child: BoxedBehavior<'a, C>,
}

impl<'a, C> Inverter<'a, C> {
    pub fn new(child: BoxedBehavior<'a, C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for Inverter<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        self.child.tick(ctx).invert()
    }
}

/// Runs the child for its side effects and reports success regardless.
pub struct AlwaysSucceed<'a, C> {
    child: BoxedBehavior<'a, C>,
}

impl<'a, C> AlwaysSucceed<'a, C> {
    pub fn new(child: BoxedBehavior<'a, C>) -> Self {
        Self { child }
    }
}

impl<C> Behavior<C> for AlwaysSucceed<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let _ = self.child.tick(ctx);
        Status::Success
    }
}
