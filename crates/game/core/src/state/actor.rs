//! Grid occupants: creatures, walls, floors and pickups.

use crate::combat::{self, Affinities};
use crate::spell::{SpellBook, SpellBookError, SpellKind, SpellRegistry};

use super::{Density, DamageType, EntityId, Faction, Position, ResourceMeter};

/// Construction arguments for anything placed on the grid.
///
/// Summon specs and content archetypes both resolve to a template; the grid
/// assigns the id and position when spawning.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    /// Display name, upper-case by convention ("BAT", "WALL").
    pub name: String,
    /// Archetype key driving AI and drops; `None` for terrain and the player.
    pub archetype: Option<String>,
    pub faction: Faction,
    pub density: Density,
    pub max_health: u32,
    pub weight: u32,
    pub solid: bool,
    pub affinities: Affinities,
    pub spells: Vec<SpellKind>,
    /// Letter carried by a pickup tile.
    pub letter: Option<char>,
}

impl ActorTemplate {
    /// Solid hostile-or-allied creature with one hit point per `max_health`.
    pub fn creature(name: impl Into<String>, faction: Faction, max_health: u32) -> Self {
        Self {
            name: name.into(),
            archetype: None,
            faction,
            density: Density::Creature,
            max_health,
            weight: 1,
            solid: true,
            affinities: Affinities::NONE,
            spells: Vec::new(),
            letter: None,
        }
    }

    /// Indestructible map wall.
    pub fn wall() -> Self {
        Self {
            name: "WALL".into(),
            archetype: None,
            faction: Faction::Neutral,
            density: Density::Wall,
            max_health: 1,
            weight: 1,
            solid: true,
            affinities: Affinities::IMMUNE,
            spells: Vec::new(),
            letter: None,
        }
    }

    /// Walkable floor tile.
    pub fn floor() -> Self {
        Self {
            name: "FLOOR".into(),
            archetype: None,
            faction: Faction::Neutral,
            density: Density::Empty,
            max_health: 1,
            weight: 1,
            solid: false,
            affinities: Affinities::IMMUNE,
            spells: Vec::new(),
            letter: None,
        }
    }

    /// Collectible letter tile dropped by a defeated enemy.
    pub fn pickup(letter: char) -> Self {
        Self {
            name: letter.to_string(),
            archetype: None,
            faction: Faction::Neutral,
            density: Density::Pickup,
            max_health: 1,
            weight: 1,
            solid: false,
            affinities: Affinities::IMMUNE,
            spells: Vec::new(),
            letter: Some(letter),
        }
    }

    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight.max(1);
        self
    }

    pub fn with_affinities(mut self, affinities: Affinities) -> Self {
        self.affinities = affinities;
        self
    }

    pub fn with_spells(mut self, spells: impl IntoIterator<Item = SpellKind>) -> Self {
        self.spells = spells.into_iter().collect();
        self
    }
}

/// What a single hit did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health change after affinities (negative when healed).
    pub dealt: i32,
    /// Stun applied after invulnerability.
    pub stun: u32,
    /// True only on the hit that brought health to zero.
    pub destroyed: bool,
}

/// Live state of a grid occupant.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub archetype: Option<String>,
    pub position: Position,
    pub faction: Faction,
    pub density: Density,
    pub health: ResourceMeter,
    /// Turns left to skip.
    pub stun: u32,
    pub affinities: Affinities,
    /// Knockback divisor, at least 1.
    pub weight: u32,
    pub solid: bool,
    pub destroyed: bool,
    /// Grants another action before the turn order advances.
    pub combo: bool,
    /// Withholds scheduler advancement while a visual effect plays.
    pub keep_turn: bool,
    pub letter: Option<char>,
    /// Letters collected from pickups, in pickup order.
    pub letters: Vec<char>,
    pub spells: SpellBook,
}

impl Actor {
    pub fn from_template(id: EntityId, position: Position, template: &ActorTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            archetype: template.archetype.clone(),
            position,
            faction: template.faction,
            density: template.density,
            health: ResourceMeter::full(template.max_health),
            stun: 0,
            affinities: template.affinities,
            weight: template.weight.max(1),
            solid: template.solid,
            destroyed: false,
            combo: false,
            keep_turn: false,
            letter: template.letter,
            letters: Vec::new(),
            spells: SpellBook::with_loadout(id, &template.spells),
        }
    }

    /// Alive creature that participates in combat.
    pub fn is_alive(&self) -> bool {
        !self.destroyed && self.density == Density::Creature
    }

    pub fn is_stunned(&self) -> bool {
        self.stun > 0
    }

    /// Applies damage (or healing), stun and destruction.
    ///
    /// Stun keeps the larger of the current and incoming values. Health is
    /// floored at zero and the destroyed flag flips exactly once.
    pub fn take_damage(&mut self, amount: i32, damage_type: DamageType, stun: u32) -> DamageOutcome {
        if self.destroyed {
            return DamageOutcome::default();
        }

        let dealt = combat::calculate_damage(amount, damage_type, &self.affinities);
        let stun = combat::calculate_stun(stun, damage_type, &self.affinities);

        self.stun = self.stun.max(stun);
        self.health.current = combat::apply_damage(self.health.current, self.health.maximum, dealt);

        let destroyed = self.health.is_empty();
        if destroyed {
            self.destroyed = true;
        }

        DamageOutcome {
            dealt,
            stun,
            destroyed,
        }
    }

    /// Spends collected letters to craft the spell `word` names.
    ///
    /// Letters are only consumed when the spell book accepts the spell.
    pub fn craft_spell(
        &mut self,
        word: &str,
        registry: &SpellRegistry,
    ) -> Result<usize, SpellBookError> {
        let word = word.to_ascii_uppercase();
        let mut remaining = self.letters.clone();
        for letter in word.chars() {
            let index = remaining
                .iter()
                .position(|held| held.to_ascii_uppercase() == letter)
                .ok_or_else(|| SpellBookError::MissingLetters(word.clone()))?;
            remaining.remove(index);
        }

        let slot = self.spells.craft(&word, self.id, registry)?;
        self.letters = remaining;
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DamageTypes;

    fn bat() -> Actor {
        let template = ActorTemplate::creature("BAT", Faction::Hostile, 3);
        Actor::from_template(EntityId(4), Position::new(2, 2), &template)
    }

    #[test]
    fn destruction_triggers_once() {
        let mut actor = bat();
        let first = actor.take_damage(5, DamageType::Normal, 0);
        assert!(first.destroyed);
        assert_eq!(actor.health.current, 0);

        let second = actor.take_damage(5, DamageType::Normal, 0);
        assert!(!second.destroyed);
        assert!(actor.destroyed);
    }

    #[test]
    fn stun_keeps_maximum() {
        let mut actor = bat();
        actor.take_damage(0, DamageType::Ice, 3);
        actor.take_damage(0, DamageType::Ice, 1);
        assert_eq!(actor.stun, 3);
    }

    #[test]
    fn invulnerable_type_blocks_damage_and_stun() {
        let mut actor = bat();
        actor.affinities.invulnerabilities = DamageTypes::ICE;
        let outcome = actor.take_damage(2, DamageType::Ice, 2);
        assert_eq!(outcome, DamageOutcome::default());
        assert_eq!(actor.health.current, 3);
        assert_eq!(actor.stun, 0);
    }

    #[test]
    fn healing_is_capped() {
        let mut actor = bat();
        actor.take_damage(2, DamageType::Normal, 0);
        actor.take_damage(-5, DamageType::Normal, 0);
        assert_eq!(actor.health.current, 3);
    }

    #[test]
    fn crafting_spends_letters_only_on_success() {
        let registry = SpellRegistry::standard();
        let mut actor = bat();
        actor.letters = vec!['B', 'I', 'T', 'E', 'Z'];

        assert!(actor.craft_spell("zap", &registry).is_err());
        assert_eq!(actor.letters.len(), 5);

        let slot = actor.craft_spell("bite", &registry).unwrap();
        assert_eq!(slot, 1);
        assert_eq!(actor.letters, vec!['Z']);
    }
}
