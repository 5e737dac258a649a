//! End-of-run report printed as JSON.
use serde::Serialize;

use game_core::EntityId;
use runtime::{Codex, Outcome, Runtime, TurnEvent};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub steps: u32,
    pub rounds: u32,
    /// `None` when the tick limit ran out first.
    pub outcome: Option<Outcome>,
    pub player_health: u32,
    pub kills: usize,
    pub casts: usize,
    pub letters: Vec<char>,
    pub codex: Codex,
    pub events: usize,
}

impl RunSummary {
    pub fn collect(runtime: &Runtime, seed: u64, steps: u32) -> Self {
        let session = runtime.session();
        let player = session.player();
        let count = |pred: fn(&TurnEvent) -> bool| session.events().iter().filter(|e| pred(e)).count();

        Self {
            seed,
            steps,
            rounds: runtime.scheduler().round().saturating_sub(1),
            outcome: runtime.outcome(),
            player_health: player.map_or(0, |p| p.health.current),
            kills: count(|event| {
                matches!(event, TurnEvent::Destroyed { entity, .. } if *entity != EntityId::PLAYER)
            }),
            casts: count(|event| {
                matches!(event, TurnEvent::Cast { entity, .. } if entity.is_player())
            }),
            letters: player.map(|p| p.letters.clone()).unwrap_or_default(),
            codex: session.codex().clone(),
            events: session.events().len(),
        }
    }
}
