//! Ready-made enemy trees.
//!
//! ```text
//! standard_enemy()
//!   └─ Selector
//!       ├─ ContinueCast
//!       ├─ Sequence [resting?, Rest]
//!       ├─ AttackWithSpells
//!       ├─ Hunt
//!       └─ Wander
//! ```

use behavior_tree::{BoxedBehavior, Status, action, condition, selector, sequence};

use super::nodes::{AttackWithSpells, ContinueCast, Hunt, Wander};
use super::{AiContext, Decision};

/// The one tree every archetype runs; archetype data changes its inputs,
/// not its shape.
pub fn standard_enemy<'c>() -> BoxedBehavior<'c, AiContext<'c>> {
    selector(vec![
        Box::new(ContinueCast),
        rest(),
        Box::new(AttackWithSpells),
        Box::new(Hunt),
        Box::new(Wander),
    ])
}

fn rest<'c>() -> BoxedBehavior<'c, AiContext<'c>> {
    sequence(vec![
        condition(|ctx: &AiContext<'c>| ctx.memory.rest > 0),
        action(|ctx: &mut AiContext<'c>| {
            ctx.decide(Decision::Rest);
            Status::Success
        }),
    ])
}
