#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Power-up drops, their effects and the timed effects they start.

mod timers;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tank_arena_core::{Command, Event, EventKind, Point, PowerUpKind, SoundId, UNIT_SIZE};
use tank_arena_world::{query, World};
use tracing::{debug, trace};

pub use timers::{base_ring, FreezeTimer, ShovelTimer};

/// Drops a power-up somewhere in the arena whenever a flashing enemy is destroyed.
#[derive(Debug)]
pub struct PowerUpFactory {
    rng: ChaCha8Rng,
}

impl PowerUpFactory {
    /// Topics the factory listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::TankFlashingDestroyed];

    /// Creates a factory whose drops are fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Emits a power-up spawn with a random kind on a random unit cell.
    pub fn handle(&mut self, event: &Event, world: &World, out: &mut Vec<Command>) {
        let Event::TankFlashingDestroyed { .. } = event else {
            return;
        };

        let roll = self.rng.gen::<f64>();
        let index = (roll * PowerUpKind::ALL.len() as f64).floor() as usize;
        let kind = PowerUpKind::ALL
            .get(index)
            .copied()
            .unwrap_or(PowerUpKind::Timer);

        let bounds = query::bounds(world);
        let columns = (bounds.width / UNIT_SIZE).max(1);
        let rows = (bounds.height / UNIT_SIZE).max(1);
        let position = Point::new(
            bounds.x + UNIT_SIZE * self.rng.gen_range(0..columns),
            bounds.y + UNIT_SIZE * self.rng.gen_range(0..rows),
        );

        debug!(?kind, x = position.x, y = position.y, "power-up dropped");
        out.push(Command::SpawnPowerUp { kind, position });
    }
}

/// Configuration parameters required to construct the power-up handler.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    helmet_ticks: u32,
}

impl Config {
    /// Creates a configuration shielding helmet pickers for `helmet_ticks`.
    #[must_use]
    pub const fn new(helmet_ticks: u32) -> Self {
        Self { helmet_ticks }
    }
}

/// Applies the effect of every collected power-up.
#[derive(Debug)]
pub struct PowerUpHandler {
    helmet_ticks: u32,
}

impl PowerUpHandler {
    /// Topics the handler listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::PowerUpPick];

    /// Creates a handler using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            helmet_ticks: config.helmet_ticks,
        }
    }

    /// Emits the commands realising the picked power-up.
    pub fn handle(&mut self, event: &Event, world: &World, out: &mut Vec<Command>) {
        let Event::PowerUpPick { kind, tank, .. } = event else {
            return;
        };
        debug!(?kind, tank = tank.get(), "power-up picked");
        out.push(Command::PlaySound {
            sound: SoundId::PowerUpPick,
        });

        match kind {
            PowerUpKind::Grenade => {
                for enemy in query::enemy_tanks(world) {
                    trace!(tank = enemy.id.get(), "grenade");
                    out.push(Command::DestroyTank {
                        tank: enemy.id,
                        forfeit_points: true,
                    });
                }
            }
            PowerUpKind::Helmet => out.push(Command::ShieldTank {
                tank: *tank,
                duration: self.helmet_ticks,
            }),
            PowerUpKind::Shovel => out.push(Command::Publish {
                event: Event::ShovelStart,
            }),
            PowerUpKind::Star => out.push(Command::UpgradeTank { tank: *tank }),
            PowerUpKind::Tank => out.push(Command::Publish {
                event: Event::ExtraLife,
            }),
            PowerUpKind::Timer => out.push(Command::Publish {
                event: Event::Freeze,
            }),
        }
    }
}
