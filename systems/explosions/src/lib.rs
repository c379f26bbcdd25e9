#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Blast and score-label factories reacting to destruction events.
//!
//! Every factory here is a pure function of the event it receives: none of
//! them needs to look at the world, so they only depend on the core contracts.

use tank_arena_core::{
    Command, Event, EventKind, ExplosionKind, Faction, PointsKind, Rect, SoundId, UNIT_SIZE,
};
use tracing::debug;

/// Spawns a large explosion wherever a tank is torn down.
#[derive(Debug, Default)]
pub struct TankExplosions;

impl TankExplosions {
    /// Topics the factory listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::TankDestroyed];

    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits the blast and its sound for a destroyed tank.
    pub fn handle(&mut self, event: &Event, out: &mut Vec<Command>) {
        let Event::TankDestroyed { tank } = event else {
            return;
        };
        out.push(Command::SpawnExplosion {
            kind: ExplosionKind::Tank,
            rect: Rect::centered(tank.rect.center(), ExplosionKind::Tank.size()),
            tank: Some(*tank),
        });
        out.push(Command::PlaySound {
            sound: SoundId::TankExplosion,
        });
    }
}

/// Spawns the explosion that marks a lost base.
#[derive(Debug, Default)]
pub struct BaseExplosions;

impl BaseExplosions {
    /// Topics the factory listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::BaseHit];

    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits the blast and its sound for the struck base.
    pub fn handle(&mut self, event: &Event, out: &mut Vec<Command>) {
        let Event::BaseHit { center, .. } = event else {
            return;
        };
        out.push(Command::SpawnExplosion {
            kind: ExplosionKind::Base,
            rect: Rect::centered(*center, ExplosionKind::Base.size()),
            tank: None,
        });
        out.push(Command::PlaySound {
            sound: SoundId::BaseExplosion,
        });
    }
}

/// Configuration parameters required to construct the points factory.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    power_up_points: u32,
}

impl Config {
    /// Creates a configuration awarding `power_up_points` per collected power-up.
    #[must_use]
    pub const fn new(power_up_points: u32) -> Self {
        Self { power_up_points }
    }
}

/// Spawns floating score labels for destroyed enemies and collected power-ups.
#[derive(Debug)]
pub struct PointsFactory {
    power_up_points: u32,
}

impl PointsFactory {
    /// Topics the factory listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] =
        &[EventKind::TankExplosionDestroyed, EventKind::PowerUpPick];

    /// Creates the factory using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            power_up_points: config.power_up_points,
        }
    }

    /// Emits a points label when an enemy explosion ends or a power-up is picked.
    ///
    /// Enemies destroyed without value, such as those wiped out by a grenade,
    /// leave no label.
    pub fn handle(&mut self, event: &Event, out: &mut Vec<Command>) {
        let (center, value, kind) = match event {
            Event::TankExplosionDestroyed { tank, center, .. } => {
                if tank.faction != Faction::Enemy || tank.value == 0 {
                    return;
                }
                (*center, tank.value, PointsKind::Tank)
            }
            Event::PowerUpPick { center, .. } => (*center, self.power_up_points, PointsKind::PowerUp),
            _ => return,
        };
        debug!(value, ?kind, "points awarded");
        out.push(Command::SpawnPoints {
            rect: Rect::centered(center, UNIT_SIZE),
            value,
            kind,
        });
    }
}
