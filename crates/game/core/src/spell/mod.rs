//! Spells: target resolution chains bound to effect plans.
//!
//! A [`Spell`] is a [`SpellKind`] owned by one caster. Planning a cast runs
//! the kind's snap chain and yields a [`CastPlan`] without touching the
//! world; casting applies that plan. Multi-turn progress lives outside the
//! spell, in whoever drives the caster.
mod book;
mod catalog;
mod error;
mod registry;

use crate::area::Area;
use crate::effect::{Effect, EffectReport};
use crate::grid::GridWorld;
use crate::state::{Actor, EntityId, Position};

pub use book::{SpellBook, SpellSlot};
pub use catalog::recharge_action;
pub use error::{CastError, RegistryError, SpellBookError};
pub use registry::SpellRegistry;

/// Every spell the game knows.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum SpellKind {
    Zap,
    Flare,
    Push,
    Bolt,
    Jump,
    Recharge,
    Beam,
    Freeze,
    Golem,
    Barrier,
    Bite,
    Spit,
    Flurry,
}

impl SpellKind {
    pub const ALL: [SpellKind; 13] = [
        SpellKind::Zap,
        SpellKind::Flare,
        SpellKind::Push,
        SpellKind::Bolt,
        SpellKind::Jump,
        SpellKind::Recharge,
        SpellKind::Beam,
        SpellKind::Freeze,
        SpellKind::Golem,
        SpellKind::Barrier,
        SpellKind::Bite,
        SpellKind::Spit,
        SpellKind::Flurry,
    ];

    /// Default player loadout for slots 1..9 then 0.
    pub const PLAYER_LOADOUT: [SpellKind; 10] = [
        SpellKind::Zap,
        SpellKind::Flare,
        SpellKind::Push,
        SpellKind::Bolt,
        SpellKind::Jump,
        SpellKind::Recharge,
        SpellKind::Beam,
        SpellKind::Freeze,
        SpellKind::Golem,
        SpellKind::Barrier,
    ];

    /// Upper-case display name; its length drives cooldowns.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// How the AI looks for targets with a spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reach {
    /// Try the four cardinal neighbours.
    Melee,
    /// Aim at every opposing actor.
    Ranged,
    Both,
    /// Utility spell the AI never picks on its own.
    None,
}

impl Reach {
    pub fn melee(self) -> bool {
        matches!(self, Reach::Melee | Reach::Both)
    }

    pub fn ranged(self) -> bool {
        matches!(self, Reach::Ranged | Reach::Both)
    }
}

/// Static casting parameters of a spell kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpellParams {
    pub lower: f64,
    pub upper: f64,
    /// Sub-turns a cast spans; 1 for ordinary spells.
    pub turns: u32,
    pub reach: Reach,
    pub description: &'static str,
}

/// One effect, the area it covers and the animation delay before it.
#[derive(Clone, Debug)]
pub struct CastStep {
    pub effect: Effect,
    pub area: Area,
    pub delay_ms: u32,
}

/// Fully resolved cast, ready to apply.
#[derive(Clone, Debug)]
pub struct CastPlan {
    /// Resolved caster-relative target.
    pub target: Position,
    pub steps: Vec<CastStep>,
    /// Caster keeps control after this sub-turn.
    pub combo: bool,
}

impl CastPlan {
    pub(crate) fn single(target: Position, effect: Effect, area: Area) -> Self {
        Self {
            target,
            steps: vec![CastStep {
                effect,
                area,
                delay_ms: 0,
            }],
            combo: false,
        }
    }

    /// True if any step's area covers a live opponent of `caster`.
    pub fn threatens(&self, world: &GridWorld, caster: &Actor) -> bool {
        self.steps.iter().any(|step| {
            step.area.tiles_from(caster.position).into_iter().any(|tile| {
                world.occupants_at(tile).any(|occupant| {
                    occupant.is_alive() && caster.faction.is_hostile_to(occupant.faction)
                })
            })
        })
    }
}

/// Result of a successful cast.
#[derive(Clone, Debug)]
pub struct CastReport {
    pub spell: SpellKind,
    pub target: Position,
    pub combo: bool,
    pub effects: EffectReport,
}

/// A spell bound to its caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub kind: SpellKind,
    pub caster: EntityId,
}

impl Spell {
    pub fn new(kind: SpellKind, caster: EntityId) -> Self {
        Self { kind, caster }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn params(&self) -> SpellParams {
        catalog::params(self.kind)
    }

    /// Resolves `target` for sub-turn `turn` without mutating anything.
    pub fn plan(
        &self,
        world: &GridWorld,
        target: Position,
        crit: bool,
        turn: u32,
    ) -> Result<CastPlan, CastError> {
        let caster = world
            .actor(self.caster)
            .ok_or(CastError::MissingCaster(self.caster))?;
        let turn = turn.min(self.params().turns.saturating_sub(1));
        catalog::plan(self.kind, world, caster, target, crit, turn)
    }

    /// Plans and applies a cast.
    ///
    /// On a rejected target nothing is mutated and the error is returned.
    /// Otherwise every step is applied and the caster's combo flag is set
    /// from the plan. Crowded tiles never fail a step: a knockback with no
    /// room stays put and a summon with no room is counted as blocked. A
    /// [`GridError`](crate::grid::GridError) past planning means an occupant vanished mid-cast; the
    /// steps already applied are not rolled back.
    pub fn cast(
        &self,
        world: &mut GridWorld,
        target: Position,
        crit: bool,
        turn: u32,
    ) -> Result<CastReport, CastError> {
        let plan = self.plan(world, target, crit, turn)?;

        let mut effects = EffectReport::default();
        for step in &plan.steps {
            effects.merge(step.effect.apply(world, &step.area, self.caster)?);
        }
        if let Some(caster) = world.actor_mut(self.caster) {
            caster.combo = plan.combo;
        }

        Ok(CastReport {
            spell: self.kind,
            target: plan.target,
            combo: plan.combo,
            effects,
        })
    }
}
