//! A scripted player that plays well enough to finish a skirmish.

use std::collections::BTreeSet;

use game_core::{Actor, EntityId, Faction, Position, Spell, rotations};
use runtime::{InputSource, PlayerIntent, Session};

/// Greedy player input.
///
/// Each poll it tries, in order: firing the spell it just prepared, preparing
/// the first ready spell that would hit a hostile, crafting a word it has
/// the letters for, stepping toward the nearest hostile, and finally waiting.
#[derive(Debug, Default)]
pub struct Autopilot {
    /// Slot and target picked when the spell was prepared.
    aim: Option<(usize, Position)>,
    tried_words: BTreeSet<String>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_attack(session: &Session, player: &Actor) -> Option<(usize, Position)> {
        let world = session.world();
        let hostiles: Vec<Position> = world
            .live_actors()
            .filter(|actor| actor.faction == Faction::Hostile)
            .map(|actor| actor.position - player.position)
            .collect();

        player
            .spells
            .equipped()
            .filter(|(_, slot)| slot.cooldown == 0)
            .find_map(|(index, slot)| {
                let spell: Spell = slot.spell;
                let reach = spell.params().reach;
                let mut candidates = Vec::new();
                if reach.melee() {
                    candidates.extend(rotations(&[Position::new(1, 0)]));
                    candidates.push(Position::ORIGIN);
                }
                if reach.ranged() {
                    candidates.extend(hostiles.iter().copied());
                }
                candidates
                    .into_iter()
                    .find(|target| {
                        spell
                            .plan(world, *target, false, 0)
                            .is_ok_and(|plan| plan.threatens(world, player))
                    })
                    .map(|target| (index, target))
            })
    }

    fn find_craft(&mut self, session: &Session, player: &Actor) -> Option<String> {
        let word = session
            .registry()
            .names()
            .filter(|name| !self.tried_words.contains(*name))
            .filter(|name| {
                session
                    .registry()
                    .resolve(name)
                    .is_ok_and(|kind| !player.spells.knows(kind))
            })
            .find(|name| {
                let mut letters = player.letters.clone();
                name.chars().all(|c| {
                    letters
                        .iter()
                        .position(|l| *l == c)
                        .map(|i| letters.swap_remove(i))
                        .is_some()
                })
            })?
            .to_owned();
        self.tried_words.insert(word.clone());
        Some(word)
    }

    fn approach(session: &Session, player: &Actor) -> Option<Position> {
        let world = session.world();
        let target = world
            .live_actors()
            .filter(|actor| actor.faction == Faction::Hostile)
            .map(|actor| actor.position - player.position)
            .min_by_key(|offset| offset.magnitude_squared())?;

        let current = target.magnitude_squared();
        rotations(&[Position::new(1, 0)])
            .into_iter()
            .filter(|offset| world.can_enter(player.position + *offset))
            .map(|offset| ((target - offset).magnitude_squared(), offset))
            .filter(|(distance, _)| *distance < current)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, offset)| offset)
    }
}

impl InputSource for Autopilot {
    fn next_intent(&mut self, session: &Session, prepared: Option<usize>) -> Option<PlayerIntent> {
        let player = session.world().actor(EntityId::PLAYER)?;

        if let Some((slot, target)) = self.aim.take()
            && prepared == Some(slot)
        {
            return Some(PlayerIntent::Cast(target));
        }

        if let Some((slot, target)) = Self::find_attack(session, player) {
            self.aim = Some((slot, target));
            return Some(PlayerIntent::Prepare(slot));
        }

        if let Some(word) = self.find_craft(session, player) {
            return Some(PlayerIntent::Craft(word));
        }

        Some(match Self::approach(session, player) {
            Some(offset) => PlayerIntent::Move(offset),
            None => PlayerIntent::Wait,
        })
    }
}
