use tank_arena_core::{Event, EventKind};
use tracing::info;

/// How a stage ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every enemy on the roster was destroyed.
    Victory,
    /// The base fell or the player ran out of tanks.
    Defeat,
}

/// Decides the stage outcome. The first decision is final.
#[derive(Debug, Default)]
pub(crate) struct StageReferee {
    outcome: Option<Outcome>,
}

impl StageReferee {
    pub(crate) const SUBSCRIPTIONS: &'static [EventKind] = &[
        EventKind::LastEnemyDestroyed,
        EventKind::PlayerOutOfLives,
        EventKind::BaseHit,
    ];

    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub(crate) fn handle(&mut self, event: &Event) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = match event {
            Event::LastEnemyDestroyed => Outcome::Victory,
            Event::PlayerOutOfLives | Event::BaseHit { .. } => Outcome::Defeat,
            _ => return,
        };
        info!(?outcome, "stage decided");
        self.outcome = Some(outcome);
    }
}
