use crate::spell::SpellKind;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Chebyshev radius within which enemies notice and hunt opponents.
    pub default_vision_radius: u32,
    /// Actor slots the scheduler resolves per tick before yielding.
    pub scheduler_step_budget: u32,
    /// Added to a spell's name length to get its cooldown after casting.
    pub cooldown_padding: u32,
    pub player: PlayerProfile,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_OCCUPANTS_PER_TILE: usize = 6;
    pub const SPELL_SLOTS: usize = 10;

    /// Shrink applied to a unit direction before rounding when diagonals are
    /// not allowed. Anything below 1/√2 keeps exact diagonals from rounding
    /// to a corner.
    pub const CARDINAL_SNAP_SCALE: f64 = 0.7;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_VISION_RADIUS: u32 = 8;
    pub const DEFAULT_STEP_BUDGET: u32 = 512;
    pub const DEFAULT_COOLDOWN_PADDING: u32 = 1;

    pub fn new() -> Self {
        Self {
            default_vision_radius: Self::DEFAULT_VISION_RADIUS,
            scheduler_step_budget: Self::DEFAULT_STEP_BUDGET,
            cooldown_padding: Self::DEFAULT_COOLDOWN_PADDING,
            player: PlayerProfile::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Starting stats and loadout of the player character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerProfile {
    pub health: u32,
    pub weight: u32,
    /// Spell identifiers for slots 1, 2, ... in order; slot 0 comes last.
    pub spells: Vec<String>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            health: 5,
            weight: 1,
            spells: SpellKind::PLAYER_LOADOUT
                .iter()
                .map(|kind| kind.as_ref().to_owned())
                .collect(),
        }
    }
}
