use super::EntityId;

/// Round-robin roster shared by the player and every enemy.
///
/// Order is registration order. The cursor names the next actor to act and is
/// corrected whenever an earlier entry is removed, so nobody is skipped or
/// visited twice within a sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOrder {
    roster: Vec<EntityId>,
    cursor: usize,
}

/// What a [`TurnOrder::purge`] took out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Purged {
    /// Removed entities in roster order.
    pub removed: Vec<EntityId>,
    /// Removing them pushed the cursor past the last entry, so the sweep
    /// is over even though nobody advanced it.
    pub wrapped: bool,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity. Returns false if it was already registered.
    pub fn register(&mut self, entity: EntityId) -> bool {
        if self.roster.contains(&entity) {
            return false;
        }
        self.roster.push(entity);
        true
    }

    /// Removes an entity and keeps the cursor on the same upcoming actor.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        self.take(entity).is_some()
    }

    /// Removes an entity; `Some(true)` when the cursor ran off the end and
    /// went back to the front, which closes the round.
    fn take(&mut self, entity: EntityId) -> Option<bool> {
        let index = self.roster.iter().position(|id| *id == entity)?;
        self.roster.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        let wrapped = self.cursor > 0 && self.cursor >= self.roster.len();
        if self.cursor >= self.roster.len() {
            self.cursor = 0;
        }
        Some(wrapped)
    }

    /// Removes every entity matching `is_dead`.
    pub fn purge(&mut self, mut is_dead: impl FnMut(EntityId) -> bool) -> Purged {
        let removed: Vec<EntityId> = self.roster.iter().copied().filter(|id| is_dead(*id)).collect();
        let mut wrapped = false;
        for entity in &removed {
            wrapped |= self.take(*entity).unwrap_or(false);
        }
        Purged { removed, wrapped }
    }

    pub fn current(&self) -> Option<EntityId> {
        self.roster.get(self.cursor).copied()
    }

    /// Moves the cursor forward. Returns true when it wrapped to the front.
    pub fn advance(&mut self) -> bool {
        if self.roster.is_empty() {
            self.cursor = 0;
            return false;
        }
        self.cursor += 1;
        if self.cursor >= self.roster.len() {
            self.cursor = 0;
            return true;
        }
        false
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn contains(&self, entity: EntityId) -> bool {
        self.roster.contains(&entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.roster.iter().copied()
    }
}
