//! Spatial index of grid occupants.
//!
//! [`GridWorld`] is the single mutable resource combat works against: it owns
//! every [`Actor`] and tracks which of them stand on which tile. Destroyed
//! actors leave the tile index immediately but keep their record so that the
//! scheduler and drop logic can still read their last state.
mod error;
pub mod line;
mod raycast;
mod visibility;

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{
    Actor, ActorTemplate, DamageOutcome, DamageType, Density, DensitySet, EntityId, Position,
};

pub use error::GridError;
pub use line::{get_line, rotations};
pub use raycast::RayHit;

pub type OccupantSlots = ArrayVec<EntityId, { GameConfig::MAX_OCCUPANTS_PER_TILE }>;

/// Bounded grid with per-tile occupant lists and an actor arena.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridWorld {
    width: i32,
    height: i32,
    occupancy: BTreeMap<Position, OccupantSlots>,
    actors: BTreeMap<EntityId, Actor>,
    next_entity_id: u32,
}

impl GridWorld {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            occupancy: BTreeMap::new(),
            actors: BTreeMap::new(),
            // 0 is reserved for the player
            next_entity_id: 1,
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn in_range(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Ids standing on a tile, in arrival order.
    pub fn occupant_ids(&self, position: Position) -> &[EntityId] {
        self.occupancy
            .get(&position)
            .map(|slots| slots.as_slice())
            .unwrap_or(&[])
    }

    pub fn occupants_at(&self, position: Position) -> impl Iterator<Item = &Actor> + '_ {
        self.occupant_ids(position)
            .iter()
            .filter_map(|id| self.actors.get(id))
    }

    /// First occupant whose density is in `densities`.
    pub fn first_blocker(&self, position: Position, densities: DensitySet) -> Option<&Actor> {
        self.occupants_at(position)
            .find(|actor| densities.has(actor.density))
    }

    /// True if an entity could step onto the tile: in range, nothing solid
    /// on it and a free occupant slot.
    pub fn can_enter(&self, position: Position) -> bool {
        self.in_range(position)
            && self.has_room(position)
            && !self.occupants_at(position).any(|actor| actor.solid)
    }

    pub fn has_room(&self, position: Position) -> bool {
        self.occupant_ids(position).len() < GameConfig::MAX_OCCUPANTS_PER_TILE
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.values()
    }

    /// Creatures that are still standing.
    pub fn live_actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.values().filter(|actor| actor.is_alive())
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.actor(id).is_some_and(Actor::is_alive)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Places a new entity and returns its freshly allocated id.
    pub fn spawn(
        &mut self,
        template: &ActorTemplate,
        position: Position,
    ) -> Result<EntityId, GridError> {
        let id = EntityId(self.next_entity_id);
        self.insert(id, template, position)?;
        self.next_entity_id += 1;
        Ok(id)
    }

    /// Places the player under the reserved id.
    pub fn spawn_player(
        &mut self,
        template: &ActorTemplate,
        position: Position,
    ) -> Result<EntityId, GridError> {
        self.insert(EntityId::PLAYER, template, position)?;
        Ok(EntityId::PLAYER)
    }

    fn insert(
        &mut self,
        id: EntityId,
        template: &ActorTemplate,
        position: Position,
    ) -> Result<(), GridError> {
        if self.actors.contains_key(&id) {
            return Err(GridError::DuplicateEntity(id));
        }
        self.ensure_in_range(position)?;
        self.add_occupant(position, id)?;
        self.actors
            .insert(id, Actor::from_template(id, position, template));
        Ok(())
    }

    /// Lays a floor tile on every in-range square that has no occupant yet.
    pub fn fill_floor(&mut self) -> Result<usize, GridError> {
        let floor = ActorTemplate::floor();
        let mut placed = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let position = Position::new(x, y);
                if self.occupant_ids(position).is_empty() {
                    self.spawn(&floor, position)?;
                    placed += 1;
                }
            }
        }
        Ok(placed)
    }

    /// Deletes an entity entirely, returning its final record.
    pub fn remove(&mut self, id: EntityId) -> Option<Actor> {
        let actor = self.actors.remove(&id)?;
        self.remove_occupant(actor.position, id);
        Some(actor)
    }

    /// Moves an entity by one offset if the destination can be entered.
    pub fn step(&mut self, id: EntityId, offset: Position) -> Result<Position, GridError> {
        let from = self.actor(id).ok_or(GridError::UnknownEntity(id))?.position;
        let to = from + offset;
        self.ensure_in_range(to)?;
        if !self.can_enter(to) {
            return Err(GridError::Blocked { entity: id, position: to });
        }
        self.relocate(id, to)?;
        Ok(to)
    }

    /// Knocks an entity along `vector`.
    ///
    /// Without `teleport` the vector is floor-divided by the entity's weight
    /// and the entity slides until the last open square before a wall or
    /// creature. With `teleport` it lands on the destination only if that
    /// square is in range and not solid. A landing tile with no free slot
    /// leaves the entity where it was.
    pub fn push(
        &mut self,
        id: EntityId,
        vector: Position,
        teleport: bool,
    ) -> Result<Position, GridError> {
        let actor = self.actor(id).ok_or(GridError::UnknownEntity(id))?;
        let from = actor.position;

        let destination = if teleport {
            let to = from + vector;
            if self.can_enter(to) { Some(to) } else { None }
        } else {
            let weight = actor.weight.max(1) as i32;
            let scaled = Position::new(vector.x.div_euclid(weight), vector.y.div_euclid(weight));
            if scaled.is_zero() {
                None
            } else {
                self.raycast(from, from + scaled, DensitySet::SOLID, true)
                    .last_open
                    .filter(|to| self.has_room(*to))
            }
        };

        match destination {
            Some(to) if to != from => {
                self.relocate(id, to)?;
                Ok(to)
            }
            _ => Ok(from),
        }
    }

    /// Applies a hit and detaches the entity from the grid if it died.
    pub fn damage(
        &mut self,
        id: EntityId,
        amount: i32,
        damage_type: DamageType,
        stun: u32,
    ) -> Result<DamageOutcome, GridError> {
        let actor = self.actor_mut(id).ok_or(GridError::UnknownEntity(id))?;
        let outcome = actor.take_damage(amount, damage_type, stun);
        if outcome.destroyed {
            let position = actor.position;
            self.remove_occupant(position, id);
        }
        Ok(outcome)
    }

    /// Picks up every pickup on the entity's tile, returning the letters.
    pub fn collect_pickups(&mut self, id: EntityId) -> Result<Vec<char>, GridError> {
        let position = self.actor(id).ok_or(GridError::UnknownEntity(id))?.position;
        let pickups: Vec<EntityId> = self
            .occupants_at(position)
            .filter(|actor| actor.density == Density::Pickup)
            .map(|actor| actor.id)
            .collect();

        let mut letters = Vec::new();
        for pickup in pickups {
            if let Some(letter) = self.remove(pickup).and_then(|actor| actor.letter) {
                letters.push(letter);
            }
        }
        if let Some(actor) = self.actor_mut(id) {
            actor.letters.extend(letters.iter().copied());
        }
        Ok(letters)
    }

    fn relocate(&mut self, id: EntityId, to: Position) -> Result<(), GridError> {
        let from = self.actor(id).ok_or(GridError::UnknownEntity(id))?.position;
        if from == to {
            return Ok(());
        }
        self.add_occupant(to, id)?;
        self.remove_occupant(from, id);
        if let Some(actor) = self.actor_mut(id) {
            actor.position = to;
        }
        Ok(())
    }

    fn ensure_in_range(&self, position: Position) -> Result<(), GridError> {
        if self.in_range(position) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                position,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    fn add_occupant(&mut self, position: Position, id: EntityId) -> Result<(), GridError> {
        let slots = self.occupancy.entry(position).or_default();
        if slots.contains(&id) {
            return Ok(());
        }
        slots.try_push(id).map_err(|_| GridError::TileFull {
            position,
            capacity: GameConfig::MAX_OCCUPANTS_PER_TILE,
        })
    }

    fn remove_occupant(&mut self, position: Position, id: EntityId) {
        if let Some(slots) = self.occupancy.get_mut(&position) {
            if let Some(index) = slots.iter().position(|occupant| *occupant == id) {
                slots.remove(index);
            }
            if slots.is_empty() {
                self.occupancy.remove(&position);
            }
        }
    }
}
