use std::collections::BTreeMap;

use crate::state::EntityId;

use super::{RegistryError, Spell, SpellKind};

/// Maps spell identifiers to spell kinds.
///
/// Identifiers are matched case-insensitively. Lookups happen once, when a
/// loadout is built or a word is crafted, never per cast.
#[derive(Clone, Debug, Default)]
pub struct SpellRegistry {
    entries: BTreeMap<String, SpellKind>,
}

impl SpellRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in spell under its display name.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for kind in SpellKind::ALL {
            registry.entries.insert(kind.name().to_owned(), kind);
        }
        registry
    }

    pub fn register(
        &mut self,
        identifier: impl AsRef<str>,
        kind: SpellKind,
    ) -> Result<(), RegistryError> {
        let key = identifier.as_ref().to_ascii_uppercase();
        if self.entries.contains_key(&key) {
            return Err(RegistryError::Duplicate(key));
        }
        self.entries.insert(key, kind);
        Ok(())
    }

    pub fn resolve(&self, identifier: &str) -> Result<SpellKind, RegistryError> {
        self.entries
            .get(&identifier.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| RegistryError::UnknownSpell(identifier.to_owned()))
    }

    /// Resolves an identifier and binds it to a caster.
    pub fn build(&self, identifier: &str, caster: EntityId) -> Result<Spell, RegistryError> {
        self.resolve(identifier).map(|kind| Spell::new(kind, caster))
    }

    /// Registered identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(&identifier.to_ascii_uppercase())
    }
}
