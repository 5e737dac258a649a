//! Spell effects and the engine that applies them over an area.
//!
//! An [`Effect`] is plain data: damage, knockback, stun, an applicability
//! filter, an optional summon and an optional custom action. [`Effect::apply`]
//! walks an [`Area`](crate::area::Area) and mutates every matching occupant,
//! returning an [`EffectReport`] of what happened.
mod apply;
mod report;

use crate::state::{Actor, ActorTemplate, DamageType, DensitySet, FactionSet, Position};

pub use report::{EffectReport, Hit, Knockback};

/// Callback run on each affected occupant after the built-in steps.
pub type CustomAction = fn(&Effect, &mut Actor);

/// Effect applied to every valid occupant of an area.
#[derive(Clone, Debug)]
pub struct Effect {
    /// Damage dealt; negative heals.
    pub damage: i32,
    pub damage_type: DamageType,
    /// Fixed push vector.
    pub knockback: Option<Position>,
    /// Push strength directed away from the area origin.
    pub radial: Option<i32>,
    /// Pushes ignore weight and obstacles on the way.
    pub teleport: bool,
    pub stun: u32,
    /// Factions the effect touches.
    pub affected: FactionSet,
    /// Densities the effect touches.
    pub densities: DensitySet,
    pub action: Option<CustomAction>,
    /// Spawned on the first affected occupant's square.
    pub summon: Option<ActorTemplate>,
}

impl Effect {
    /// Effect touching creatures of the given factions and doing nothing yet.
    pub fn on(affected: FactionSet) -> Self {
        Self {
            damage: 0,
            damage_type: DamageType::Normal,
            knockback: None,
            radial: None,
            teleport: false,
            stun: 0,
            affected,
            densities: DensitySet::CREATURE,
            action: None,
            summon: None,
        }
    }

    pub fn with_damage(mut self, damage: i32, damage_type: DamageType) -> Self {
        self.damage = damage;
        self.damage_type = damage_type;
        self
    }

    pub fn with_stun(mut self, stun: u32) -> Self {
        self.stun = stun;
        self
    }

    pub fn with_knockback(mut self, vector: Position, teleport: bool) -> Self {
        self.knockback = Some(vector);
        self.teleport = teleport;
        self
    }

    pub fn with_radial(mut self, strength: i32) -> Self {
        self.radial = Some(strength);
        self
    }

    pub fn with_densities(mut self, densities: DensitySet) -> Self {
        self.densities = densities;
        self
    }

    pub fn with_action(mut self, action: CustomAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_summon(mut self, template: ActorTemplate) -> Self {
        self.summon = Some(template);
        self
    }

    pub fn applies_to(&self, actor: &Actor) -> bool {
        !actor.destroyed && self.affected.has(actor.faction) && self.densities.has(actor.density)
    }

    /// True if the effect would hurt something.
    pub fn is_harmful(&self) -> bool {
        self.damage > 0 || self.stun > 0
    }
}
