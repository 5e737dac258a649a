//! Damage calculation and application.

use crate::state::{DamageType, DamageTypes};

/// Per-actor reaction to damage types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affinities {
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: DamageTypes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vulnerabilities: DamageTypes,
    #[cfg_attr(feature = "serde", serde(default))]
    pub invulnerabilities: DamageTypes,
}

impl Affinities {
    pub const NONE: Self = Self {
        resistances: DamageTypes::empty(),
        vulnerabilities: DamageTypes::empty(),
        invulnerabilities: DamageTypes::empty(),
    };

    /// Immune to every damage type (map walls).
    pub const IMMUNE: Self = Self {
        resistances: DamageTypes::empty(),
        vulnerabilities: DamageTypes::empty(),
        invulnerabilities: DamageTypes::all(),
    };
}

/// Modify an incoming damage amount by the target's affinities.
///
/// # Formula
///
/// ```text
/// if resistant:    damage = floor(damage / 2)
/// if vulnerable:   damage = damage * 2
/// if invulnerable: damage = 0
/// ```
///
/// The steps run in that order, so invulnerability always wins. Only positive
/// amounts are modified; negative amounts are healing and pass through.
pub fn calculate_damage(amount: i32, damage_type: DamageType, affinities: &Affinities) -> i32 {
    if amount <= 0 {
        return amount;
    }

    let mut damage = amount;
    if affinities.resistances.has(damage_type) {
        damage = damage.div_euclid(2);
    }
    if affinities.vulnerabilities.has(damage_type) {
        damage *= 2;
    }
    if affinities.invulnerabilities.has(damage_type) {
        damage = 0;
    }
    damage
}

/// Stun carried by a hit. Invulnerability to the hit's type cancels it.
pub fn calculate_stun(stun: u32, damage_type: DamageType, affinities: &Affinities) -> u32 {
    if affinities.invulnerabilities.has(damage_type) {
        0
    } else {
        stun
    }
}

/// Apply damage (or healing, when negative) to current HP.
///
/// # Returns
///
/// New HP value, floored at 0 and capped at `maximum`.
pub fn apply_damage(current_hp: u32, maximum_hp: u32, damage: i32) -> u32 {
    if damage >= 0 {
        current_hp.saturating_sub(damage as u32)
    } else {
        current_hp
            .saturating_add(damage.unsigned_abs())
            .min(maximum_hp)
    }
}
