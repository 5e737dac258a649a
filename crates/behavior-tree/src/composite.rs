//! Composite nodes: [`Sequence`] (AND) and [`Selector`] (OR).

use crate::{Behavior, BoxedBehavior, Status};

/// Ticks children left to right until one fails.
pub struct Sequence<'a, C> {
    children: Vec<BoxedBehavior<'a, C>>,
}

impl<'a, C> Sequence<'a, C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedBehavior<'a, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_failure() {
                return Status::Failure;
            }
        }
        Status::Success
    }
}

/// Ticks children left to right until one succeeds.
///
/// This is the priority list of a decision: the first alternative that
/// commits wins and the rest are never evaluated.
pub struct Selector<'a, C> {
    children: Vec<BoxedBehavior<'a, C>>,
}

impl<'a, C> Selector<'a, C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<BoxedBehavior<'a, C>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<'_, C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}
