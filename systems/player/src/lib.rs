#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player-side systems: the score and lives ledger, respawning and keyboard control.

use std::collections::BTreeMap;

use tank_arena_core::{Command, Direction, Event, EventKind, Faction, Key, Point, TankKind};
use tank_arena_world::{query, World};
use tracing::{debug, info, trace};

/// Keeps the player's lives, score and kill tally.
#[derive(Debug)]
pub struct PlayerLedger {
    lives: u32,
    score: u32,
    kills: BTreeMap<TankKind, u32>,
}

impl PlayerLedger {
    /// Topics the ledger listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[
        EventKind::PointsCreated,
        EventKind::TankPlayerDestroyed,
        EventKind::TankEnemyDestroyed,
        EventKind::ExtraLife,
    ];

    /// Creates a ledger with `lives` spare tanks and no score.
    #[must_use]
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            score: 0,
            kills: BTreeMap::new(),
        }
    }

    /// Spare tanks left.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Points collected so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Enemies of `kind` destroyed for points.
    #[must_use]
    pub fn kills(&self, kind: TankKind) -> u32 {
        self.kills.get(&kind).copied().unwrap_or(0)
    }

    /// Enemies destroyed for points, across every kind.
    #[must_use]
    pub fn total_kills(&self) -> u32 {
        self.kills.values().sum()
    }

    /// Books the event, announcing when the player has no tank left to lose.
    pub fn handle(&mut self, event: &Event, out: &mut Vec<Command>) {
        match event {
            Event::PointsCreated { value, .. } => {
                self.score = self.score.saturating_add(*value);
            }
            Event::TankPlayerDestroyed { .. } => {
                if self.lives == 0 {
                    info!(score = self.score, "player out of lives");
                    out.push(Command::Publish {
                        event: Event::PlayerOutOfLives,
                    });
                } else {
                    self.lives -= 1;
                    debug!(lives = self.lives, "player lost a life");
                }
            }
            Event::TankEnemyDestroyed { tank } if tank.value > 0 => {
                *self.kills.entry(tank.kind).or_insert(0) += 1;
            }
            Event::ExtraLife => {
                self.lives = self.lives.saturating_add(1);
                debug!(lives = self.lives, "extra life");
            }
            _ => {}
        }
    }
}

/// Brings the player back once the previous tank's explosion has played out.
#[derive(Debug)]
pub struct Respawn {
    position: Point,
    active: bool,
}

impl Respawn {
    /// Topics the factory listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] =
        &[EventKind::TankExplosionDestroyed, EventKind::PlayerOutOfLives];

    /// Creates a factory respawning the player at `position`.
    #[must_use]
    pub const fn new(position: Point) -> Self {
        Self {
            position,
            active: true,
        }
    }

    /// Reports whether the player will be respawned.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Emits a fresh appearing player tank when the old one's explosion ends.
    pub fn handle(&mut self, event: &Event, out: &mut Vec<Command>) {
        match event {
            Event::PlayerOutOfLives => self.active = false,
            Event::TankExplosionDestroyed { tank, .. }
                if self.active && tank.faction == Faction::Player =>
            {
                debug!(x = self.position.x, y = self.position.y, "player respawn");
                out.push(Command::SpawnTank {
                    kind: TankKind::Player,
                    position: self.position,
                    flashing: false,
                    appearing: true,
                });
            }
            _ => {}
        }
    }
}

/// Turns key presses into commands for the player's tank.
#[derive(Debug, Default)]
pub struct InputController {
    held: Vec<Direction>,
}

impl InputController {
    /// Topics the controller listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::KeyPressed, EventKind::KeyReleased];

    /// Creates a controller with no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arrow keys currently held, oldest first.
    #[must_use]
    pub fn held(&self) -> &[Direction] {
        &self.held
    }

    /// Steers, stops or fires the player's tank.
    ///
    /// Releasing the arrow the tank is heading along falls back to the most
    /// recently pressed arrow still held, or stops the tank.
    pub fn handle(&mut self, event: &Event, world: &World, out: &mut Vec<Command>) {
        match event {
            Event::KeyPressed { key } => {
                if let Some(direction) = key.direction() {
                    self.held.retain(|held| *held != direction);
                    self.held.push(direction);
                }
                let Some(tank) = query::player_tank(world) else {
                    trace!(?key, "no player tank to control");
                    return;
                };
                match (key, key.direction()) {
                    (_, Some(direction)) => out.push(Command::SteerTank {
                        tank: tank.id,
                        direction,
                    }),
                    (Key::Fire, None) => out.push(Command::FireTank { tank: tank.id }),
                    _ => {}
                }
            }
            Event::KeyReleased { key } => {
                let Some(released) = key.direction() else {
                    return;
                };
                self.held.retain(|held| *held != released);
                let Some(tank) = query::player_tank(world) else {
                    return;
                };
                if tank.direction != released {
                    return;
                }
                match self.held.last() {
                    Some(&direction) => out.push(Command::SteerTank {
                        tank: tank.id,
                        direction,
                    }),
                    None => out.push(Command::StopTank { tank: tank.id }),
                }
            }
            _ => {}
        }
    }
}
