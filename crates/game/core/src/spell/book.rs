use crate::config::GameConfig;
use crate::state::EntityId;

use super::{Spell, SpellBookError, SpellKind, SpellRegistry};

const SLOTS: usize = GameConfig::SPELL_SLOTS;

/// An equipped spell and the turns left before it can be prepared again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellSlot {
    pub spell: Spell,
    pub cooldown: u32,
}

/// Fixed set of numbered spell slots.
///
/// Slots follow keyboard order: 1 through 9, then 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellBook {
    slots: [Option<SpellSlot>; SLOTS],
}

impl SpellBook {
    /// Slot index for the `n`th loadout entry.
    fn loadout_slot(n: usize) -> usize {
        (n + 1) % SLOTS
    }

    /// Equips `kinds` into slots 1, 2, ... 9, 0. Extra entries are ignored.
    pub fn with_loadout(caster: EntityId, kinds: &[SpellKind]) -> Self {
        let mut book = Self::default();
        for (n, kind) in kinds.iter().take(SLOTS).enumerate() {
            book.slots[Self::loadout_slot(n)] = Some(SpellSlot {
                spell: Spell::new(*kind, caster),
                cooldown: 0,
            });
        }
        book
    }

    /// Replaces a slot's spell, returning what was there.
    pub fn equip(&mut self, slot: usize, spell: Spell) -> Result<Option<SpellSlot>, SpellBookError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(SpellBookError::InvalidSlot(slot))?;
        Ok(entry.replace(SpellSlot { spell, cooldown: 0 }))
    }

    pub fn slot(&self, slot: usize) -> Option<&SpellSlot> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Equipped slots in keyboard order.
    pub fn equipped(&self) -> impl Iterator<Item = (usize, &SpellSlot)> + '_ {
        (1..SLOTS)
            .chain(std::iter::once(0))
            .filter_map(|index| self.slot(index).map(|slot| (index, slot)))
    }

    pub fn knows(&self, kind: SpellKind) -> bool {
        self.slots.iter().flatten().any(|slot| slot.spell.kind == kind)
    }

    /// Returns the slot's spell if it may be prepared now.
    pub fn prepare_check(&self, slot: usize) -> Result<Spell, SpellBookError> {
        let entry = self
            .slots
            .get(slot)
            .ok_or(SpellBookError::InvalidSlot(slot))?
            .as_ref()
            .ok_or(SpellBookError::EmptySlot(slot))?;
        if entry.cooldown > 0 {
            return Err(SpellBookError::OnCooldown {
                slot,
                remaining: entry.cooldown,
            });
        }
        Ok(entry.spell)
    }

    /// Starts the slot's cooldown: name length plus `padding` turns.
    pub fn mark_cast(&mut self, slot: usize, padding: u32) -> Result<u32, SpellBookError> {
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(SpellBookError::InvalidSlot(slot))?
            .as_mut()
            .ok_or(SpellBookError::EmptySlot(slot))?;
        entry.cooldown = entry.spell.name().len() as u32 + padding;
        Ok(entry.cooldown)
    }

    /// Reduces every cooldown by `turns`, stopping at zero.
    pub fn recharge(&mut self, turns: u32) {
        for slot in self.slots.iter_mut().flatten() {
            slot.cooldown = slot.cooldown.saturating_sub(turns);
        }
    }

    /// Equips the spell named by `word` in the first free slot from 1 on.
    ///
    /// The new slot starts with a cooldown equal to the word's length.
    pub fn craft(
        &mut self,
        word: &str,
        caster: EntityId,
        registry: &SpellRegistry,
    ) -> Result<usize, SpellBookError> {
        let kind = registry.resolve(word)?;
        if self.knows(kind) {
            return Err(SpellBookError::AlreadyKnown(kind));
        }
        let index = (1..SLOTS)
            .chain(std::iter::once(0))
            .find(|index| self.slots[*index].is_none())
            .ok_or(SpellBookError::NoFreeSlot)?;
        self.slots[index] = Some(SpellSlot {
            spell: Spell::new(kind, caster),
            cooldown: word.chars().count() as u32,
        });
        Ok(index)
    }
}
