//! Enemy archetype descriptors.
//!
//! One generic enemy is parameterized by an [`Archetype`]: hit points, how it
//! moves, which spells it knows and how it reacts to damage types. The runtime
//! never branches on a monster's name; everything it needs comes from here.

use std::collections::BTreeMap;

use game_core::combat::Affinities;
use game_core::{ActorTemplate, DamageType, DamageTypes, Faction, Position, SpellKind, rotations};

/// How an archetype gets around the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Movement {
    /// One square in a cardinal direction.
    #[default]
    Ground,
    /// Cardinal steps plus knight-style hops over whatever is in between.
    Flying,
}

impl Movement {
    /// Candidate move offsets, generated from one quadrant by four-fold rotation.
    pub fn offsets(self) -> Vec<Position> {
        match self {
            Movement::Ground => rotations(&[Position::new(1, 0)]),
            Movement::Flying => rotations(&[
                Position::new(1, 0),
                Position::new(2, 1),
                Position::new(1, 2),
            ]),
        }
    }
}

/// Data-driven description of an enemy kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Archetype {
    /// Display name; also the word whose letters the enemy drops.
    pub name: String,
    pub hit_points: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement: Movement,
    /// Equipped spells, in slot order.
    pub spells: Vec<SpellKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Vec<DamageType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub vulnerabilities: Vec<DamageType>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub invulnerabilities: Vec<DamageType>,
    /// Sprite identifier handed to the renderer.
    pub visual: String,
    /// Overrides the configured default vision radius.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vision_radius: Option<u32>,
    /// Own turns skipped after finishing a multi-turn cast.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rest_turns: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_faction"))]
    pub faction: Faction,
}

#[cfg(feature = "serde")]
fn default_weight() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_faction() -> Faction {
    Faction::Hostile
}

impl Archetype {
    /// Hostile ground walker with no affinities.
    pub fn new(name: impl Into<String>, hit_points: u32, spells: &[SpellKind]) -> Self {
        let name = name.into();
        Self {
            visual: name.to_ascii_lowercase(),
            name: name.to_ascii_uppercase(),
            hit_points,
            movement: Movement::Ground,
            spells: spells.to_vec(),
            resistances: Vec::new(),
            vulnerabilities: Vec::new(),
            invulnerabilities: Vec::new(),
            vision_radius: None,
            rest_turns: 0,
            weight: 1,
            faction: Faction::Hostile,
        }
    }

    fn flying(mut self) -> Self {
        self.movement = Movement::Flying;
        self
    }

    fn resists(mut self, types: &[DamageType]) -> Self {
        self.resistances = types.to_vec();
        self
    }

    fn weak_to(mut self, types: &[DamageType]) -> Self {
        self.vulnerabilities = types.to_vec();
        self
    }

    fn immune_to(mut self, types: &[DamageType]) -> Self {
        self.invulnerabilities = types.to_vec();
        self
    }

    fn heavy(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    fn resting(mut self, turns: u32) -> Self {
        self.rest_turns = turns;
        self
    }

    fn allied(mut self) -> Self {
        self.faction = Faction::Ally;
        self
    }

    pub fn affinities(&self) -> Affinities {
        Affinities {
            resistances: self.resistances.iter().copied().collect::<DamageTypes>(),
            vulnerabilities: self.vulnerabilities.iter().copied().collect::<DamageTypes>(),
            invulnerabilities: self.invulnerabilities.iter().copied().collect::<DamageTypes>(),
        }
    }

    pub fn movement_offsets(&self) -> Vec<Position> {
        self.movement.offsets()
    }

    pub fn vision(&self, default_radius: u32) -> u32 {
        self.vision_radius.unwrap_or(default_radius)
    }

    /// Spawnable template tagged with `key` so the runtime can find this
    /// archetype again when the actor takes its turn.
    pub fn template(&self, key: &str) -> ActorTemplate {
        ActorTemplate::creature(self.name.clone(), self.faction, self.hit_points)
            .with_archetype(key)
            .with_weight(self.weight)
            .with_affinities(self.affinities())
            .with_spells(self.spells.iter().copied())
    }
}

/// Archetypes keyed by lower-case identifier.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArchetypeCatalog {
    entries: BTreeMap<String, Archetype>,
}

impl ArchetypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock bestiary.
    pub fn builtin() -> Self {
        use DamageType::*;
        use SpellKind::*;

        let mut catalog = Self::new();
        catalog.insert("bat", Archetype::new("Bat", 1, &[Bite]).flying());
        catalog.insert("spider", Archetype::new("Spider", 2, &[Bite, Spit]).weak_to(&[Fire]));
        catalog.insert(
            "wolf",
            Archetype::new("Wolf", 3, &[Flurry]).heavy(2).resting(2),
        );
        catalog.insert(
            "slime",
            Archetype::new("Slime", 3, &[Spit])
                .resists(&[Normal])
                .weak_to(&[Fire])
                .heavy(3),
        );
        catalog.insert(
            "orc",
            Archetype::new("Orc", 5, &[Flurry, Bite])
                .weak_to(&[Electric])
                .heavy(2)
                .resting(3),
        );
        catalog.insert(
            "shade",
            Archetype::new("Shade", 2, &[Spit])
                .flying()
                .immune_to(&[Normal])
                .weak_to(&[Fire]),
        );
        catalog.insert(
            "golem",
            Archetype::new("Golem", 3, &[Bite])
                .resists(&[Ice])
                .heavy(2)
                .allied(),
        );
        catalog
    }

    /// Adds or replaces an archetype, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, archetype: Archetype) -> Option<Archetype> {
        self.entries
            .insert(key.into().to_ascii_lowercase(), archetype)
    }

    pub fn get(&self, key: &str) -> Option<&Archetype> {
        self.entries.get(&key.to_ascii_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Archetype)> + '_ {
        self.entries.iter().map(|(key, archetype)| (key.as_str(), archetype))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Archetype)> for ArchetypeCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Archetype)>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for (key, archetype) in iter {
            catalog.insert(key, archetype);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Density;

    #[test]
    fn flying_offsets_cover_knight_moves() {
        let offsets = Movement::Flying.offsets();
        assert_eq!(offsets.len(), 12);
        assert!(offsets.contains(&Position::new(-1, 2)));
        assert!(offsets.contains(&Position::new(0, -1)));
        assert_eq!(Movement::Ground.offsets().len(), 4);
    }

    #[test]
    fn template_carries_archetype_key_and_affinities() {
        let catalog = ArchetypeCatalog::builtin();
        let slime = catalog.get("SLIME").unwrap();
        let template = slime.template("slime");

        assert_eq!(template.archetype.as_deref(), Some("slime"));
        assert_eq!(template.name, "SLIME");
        assert_eq!(template.density, Density::Creature);
        assert_eq!(template.weight, 3);
        assert!(template.affinities.resistances.has(DamageType::Normal));
        assert!(template.affinities.vulnerabilities.has(DamageType::Fire));
    }

    #[test]
    fn golem_is_an_ally() {
        let catalog = ArchetypeCatalog::builtin();
        assert_eq!(catalog.get("golem").unwrap().faction, Faction::Ally);
        assert_eq!(catalog.get("bat").unwrap().faction, Faction::Hostile);
    }

    #[test]
    fn vision_falls_back_to_default() {
        let mut bat = Archetype::new("bat", 1, &[]);
        assert_eq!(bat.vision(8), 8);
        bat.vision_radius = Some(3);
        assert_eq!(bat.vision(8), 3);
    }
}
