#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic enemy spawner working through a stage's enemy roster.

use tank_arena_core::{Command, Event, EventKind, Faction, Point, SpawnerTunables, TankKind};
use tracing::{debug, info, warn};

/// Configuration parameters required to construct the enemy spawner.
#[derive(Clone, Debug)]
pub struct Config {
    interval: u32,
    count_limit: u32,
    flashing_ordinals: Vec<u32>,
    roster: Vec<TankKind>,
    positions: Vec<Point>,
}

impl Config {
    /// Creates a configuration spawning `roster` in order, cycling through `positions`.
    #[must_use]
    pub fn new(tunables: &SpawnerTunables, roster: Vec<TankKind>, positions: Vec<Point>) -> Self {
        Self {
            interval: tunables.interval,
            count_limit: tunables.count_limit,
            flashing_ordinals: tunables.flashing_ordinals.clone(),
            roster,
            positions,
        }
    }
}

/// System that releases enemies on a fixed cadence while capping how many are alive.
#[derive(Debug)]
pub struct EnemySpawner {
    config: Config,
    timer: u32,
    alive: u32,
    next: usize,
    next_position: usize,
    warned: bool,
}

impl EnemySpawner {
    /// Topics the spawner listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::TankExplosionDestroyed];

    /// Creates a spawner whose first enemy appears on the first poll.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            timer: config.interval,
            config,
            alive: 0,
            next: 0,
            next_position: 0,
            warned: false,
        }
    }

    /// Enemies spawned and not yet finished exploding.
    #[must_use]
    pub const fn alive(&self) -> u32 {
        self.alive
    }

    /// Roster entries still waiting to spawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.config.roster.len().saturating_sub(self.next)
    }

    /// Advances the spawn timer by one tick, emitting a spawn command when due.
    pub fn update(&mut self, out: &mut Vec<Command>) {
        self.timer = self.timer.saturating_add(1);
        if self.timer <= self.config.interval {
            return;
        }
        let Some(&kind) = self.config.roster.get(self.next) else {
            return;
        };
        if self.alive >= self.config.count_limit {
            return;
        }
        let Some(&position) = self.config.positions.get(self.next_position) else {
            if !self.warned {
                warn!("enemy spawner has no spawn positions");
                self.warned = true;
            }
            return;
        };

        self.timer = 0;
        self.next += 1;
        self.next_position = (self.next_position + 1) % self.config.positions.len();
        self.alive += 1;

        let ordinal = u32::try_from(self.next).unwrap_or(u32::MAX);
        let flashing = self.config.flashing_ordinals.contains(&ordinal);
        debug!(?kind, ordinal, flashing, x = position.x, y = position.y, "enemy spawn");
        out.push(Command::SpawnTank {
            kind,
            position,
            flashing,
            appearing: true,
        });
    }

    /// Frees a slot once an enemy's explosion has finished.
    pub fn handle(&mut self, event: &Event, out: &mut Vec<Command>) {
        let Event::TankExplosionDestroyed { tank, .. } = event else {
            return;
        };
        if tank.faction != Faction::Enemy {
            return;
        }
        self.alive = self.alive.saturating_sub(1);
        if self.alive == 0 && self.remaining() == 0 {
            info!("last enemy destroyed");
            out.push(Command::Publish {
                event: Event::LastEnemyDestroyed,
            });
        }
    }
}
