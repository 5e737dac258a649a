use crate::state::{DamageOutcome, EntityId, Position};

/// One damage or stun application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub target: EntityId,
    pub outcome: DamageOutcome,
}

/// One knockback that changed a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Knockback {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
}

/// Everything an effect application changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectReport {
    pub hits: Vec<Hit>,
    pub moved: Vec<Knockback>,
    pub destroyed: Vec<EntityId>,
    pub summoned: Vec<EntityId>,
    /// Summons that found no room on their tile.
    pub blocked_summons: u32,
    /// Occupants a custom action ran on.
    pub actions: Vec<EntityId>,
}

impl EffectReport {
    pub fn merge(&mut self, other: EffectReport) {
        self.hits.extend(other.hits);
        self.moved.extend(other.moved);
        self.destroyed.extend(other.destroyed);
        self.summoned.extend(other.summoned);
        self.blocked_summons += other.blocked_summons;
        self.actions.extend(other.actions);
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
            && self.moved.is_empty()
            && self.summoned.is_empty()
            && self.actions.is_empty()
            && self.blocked_summons == 0
    }

    /// Total health removed across all hits.
    pub fn damage_dealt(&self) -> i32 {
        self.hits
            .iter()
            .map(|hit| hit.outcome.dealt.max(0))
            .sum()
    }
}
