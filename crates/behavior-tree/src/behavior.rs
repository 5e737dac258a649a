//! Core behavior trait and node status.

/// Outcome of ticking a node.
///
/// There is no `Running`: a turn-based decision either commits this tick or
/// hands control to the next alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
        }
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        if ok { Status::Success } else { Status::Failure }
    }
}

/// A behavior tree node evaluated against a context `C`.
///
/// The context is usually a short-lived view borrowing game state for one
/// decision, so nodes carry no `'static` or thread-safety bounds and trees are
/// cheap to assemble right before they are ticked.
pub trait Behavior<C> {
    /// Evaluates the node. Nodes may read and mutate the context.
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Owned, type-erased node living at most as long as `'a`.
pub type BoxedBehavior<'a, C> = Box<dyn Behavior<C> + 'a>;

impl<C, B: Behavior<C> + ?Sized> Behavior<C> for Box<B> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

/// Leaf node wrapping a closure.
pub struct Action<F> {
    run: F,
}

impl<F> Action<F> {
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<C, F: Fn(&mut C) -> Status> Behavior<C> for Action<F> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.run)(ctx)
    }
}

/// Leaf node that succeeds when a read-only predicate holds.
pub struct Condition<F> {
    check: F,
}

impl<F> Condition<F> {
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<C, F: Fn(&C) -> bool> Behavior<C> for Condition<F> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.check)(ctx).into()
    }
}
