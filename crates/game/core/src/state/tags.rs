//! Classification tags that gate targeting and effect application.
//!
//! Single tags are plain enums (parsed from content files through `strum`),
//! sets of tags are `bitflags` so filters stay `Copy` and cheap to test.

use bitflags::bitflags;

/// Alignment tag deciding who may target whom.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// Terrain, pickups and anything nobody fights over.
    #[default]
    Neutral,
    /// Monsters.
    Hostile,
    /// The player and its summons.
    Ally,
}

impl Faction {
    pub const fn as_set(self) -> FactionSet {
        match self {
            Faction::Neutral => FactionSet::NEUTRAL,
            Faction::Hostile => FactionSet::HOSTILE,
            Faction::Ally => FactionSet::ALLY,
        }
    }

    /// Factions this one fights. Neutral fights nobody.
    pub const fn opponents(self) -> FactionSet {
        match self {
            Faction::Neutral => FactionSet::empty(),
            Faction::Hostile => FactionSet::ALLY,
            Faction::Ally => FactionSet::HOSTILE,
        }
    }

    pub fn is_hostile_to(self, other: Faction) -> bool {
        self.opponents().contains(other.as_set())
    }
}

/// Occupancy class of a grid entity.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Density {
    /// Walkable floor.
    #[default]
    Empty,
    Creature,
    Wall,
    Pickup,
}

impl Density {
    pub const fn as_set(self) -> DensitySet {
        match self {
            Density::Empty => DensitySet::EMPTY,
            Density::Creature => DensitySet::CREATURE,
            Density::Wall => DensitySet::WALL,
            Density::Pickup => DensitySet::PICKUP,
        }
    }
}

/// Damage type tag used for resistances and vulnerabilities.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageType {
    #[default]
    Normal,
    Fire,
    Ice,
    Electric,
}

impl DamageType {
    pub const fn as_set(self) -> DamageTypes {
        match self {
            DamageType::Normal => DamageTypes::NORMAL,
            DamageType::Fire => DamageTypes::FIRE,
            DamageType::Ice => DamageTypes::ICE,
            DamageType::Electric => DamageTypes::ELECTRIC,
        }
    }
}

bitflags! {
    /// Set of factions an effect or filter accepts.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FactionSet: u8 {
        const NEUTRAL = 1 << 0;
        const HOSTILE = 1 << 1;
        const ALLY    = 1 << 2;
    }
}

impl FactionSet {
    pub fn has(self, faction: Faction) -> bool {
        self.contains(faction.as_set())
    }
}

bitflags! {
    /// Set of densities, used for raycast blockers and applicability filters.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DensitySet: u8 {
        const EMPTY    = 1 << 0;
        const CREATURE = 1 << 1;
        const WALL     = 1 << 2;
        const PICKUP   = 1 << 3;

        const SOLID = Self::CREATURE.bits() | Self::WALL.bits();
    }
}

impl DensitySet {
    pub fn has(self, density: Density) -> bool {
        self.contains(density.as_set())
    }
}

bitflags! {
    /// Set of damage types (resistances, vulnerabilities, invulnerabilities).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DamageTypes: u8 {
        const NORMAL   = 1 << 0;
        const FIRE     = 1 << 1;
        const ICE      = 1 << 2;
        const ELECTRIC = 1 << 3;
    }
}

impl DamageTypes {
    pub fn has(self, damage_type: DamageType) -> bool {
        self.contains(damage_type.as_set())
    }
}

impl FromIterator<DamageType> for DamageTypes {
    fn from_iter<I: IntoIterator<Item = DamageType>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DamageTypes::empty(), |set, ty| set | ty.as_set())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponents_are_symmetric_between_ally_and_hostile() {
        assert!(Faction::Ally.is_hostile_to(Faction::Hostile));
        assert!(Faction::Hostile.is_hostile_to(Faction::Ally));
        assert!(!Faction::Neutral.is_hostile_to(Faction::Hostile));
        assert!(!Faction::Ally.is_hostile_to(Faction::Ally));
    }

    #[test]
    fn tags_parse_case_insensitively() {
        assert_eq!("HOSTILE".parse::<Faction>().unwrap(), Faction::Hostile);
        assert_eq!("wall".parse::<Density>().unwrap(), Density::Wall);
        assert_eq!("Electric".parse::<DamageType>().unwrap(), DamageType::Electric);
    }

    #[test]
    fn solid_covers_creatures_and_walls() {
        assert!(DensitySet::SOLID.has(Density::Creature));
        assert!(DensitySet::SOLID.has(Density::Wall));
        assert!(!DensitySet::SOLID.has(Density::Pickup));
    }
}
