//! Shorthand constructors returning boxed nodes.
//!
//! `selector(vec![sequence(vec![condition(..), action(..)]), ..])` reads the
//! way the tree is drawn.

use crate::{Action, AlwaysSucceed, BoxedBehavior, Condition, Inverter, Selector, Sequence, Status};

#[inline]
pub fn sequence<'a, C: 'a>(children: Vec<BoxedBehavior<'a, C>>) -> BoxedBehavior<'a, C> {
    Box::new(Sequence::new(children))
}

#[inline]
pub fn selector<'a, C: 'a>(children: Vec<BoxedBehavior<'a, C>>) -> BoxedBehavior<'a, C> {
    Box::new(Selector::new(children))
}

#[inline]
pub fn inverter<'a, C: 'a>(child: BoxedBehavior<'a, C>) -> BoxedBehavior<'a, C> {
    Box::new(Inverter::new(child))
}

#[inline]
pub fn always_succeed<'a, C: 'a>(child: BoxedBehavior<'a, C>) -> BoxedBehavior<'a, C> {
    Box::new(AlwaysSucceed::new(child))
}

#[inline]
pub fn action<'a, C, F>(run: F) -> BoxedBehavior<'a, C>
where
    F: Fn(&mut C) -> Status + 'a,
{
    Box::new(Action::new(run))
}

#[inline]
pub fn condition<'a, C, F>(check: F) -> BoxedBehavior<'a, C>
where
    F: Fn(&C) -> bool + 'a,
{
    Box::new(Condition::new(check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Behavior;

    #[test]
    fn guarded_fallback() {
        // increment while below 2, otherwise reset
        let tree = selector(vec![
            sequence(vec![
                condition(|n: &i32| *n < 2),
                action(|n: &mut i32| {
                    *n += 1;
                    Status::Success
                }),
            ]),
            action(|n: &mut i32| {
                *n = 0;
                Status::Success
            }),
        ]);

        let mut n = 0;
        let seen: Vec<i32> = (0..4)
            .map(|_| {
                tree.tick(&mut n);
                n
            })
            .collect();
        assert_eq!(seen, [1, 2, 0, 1]);
    }

    #[test]
    fn inverted_guard() {
        let tree = inverter(always_succeed(condition(|_: &()| false)));
        assert_eq!(tree.tick(&mut ()), Status::Failure);
    }
}
