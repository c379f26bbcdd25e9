#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded controllers steering and firing every enemy tank.
//!
//! Each enemy gets its own controller with a private `ChaCha8Rng`, seeded from
//! the configured AI seed and the tank identifier, so a replay with the same
//! tunables makes the same decisions in the same order.

use std::cmp::Ordering;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tank_arena_core::{AiTunables, Command, Direction, EntityId, Event, EventKind, Point};
use tank_arena_world::{query, World};
use tracing::{debug, trace};

/// Container owning one controller per living enemy tank.
#[derive(Debug)]
pub struct AiControllers {
    tunables: AiTunables,
    controllers: Vec<Controller>,
    frozen: bool,
}

impl AiControllers {
    /// Topics the container listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[
        EventKind::EnemyCreated,
        EventKind::TankDestroyed,
        EventKind::Freeze,
        EventKind::Unfreeze,
    ];

    /// Creates an empty container using the supplied tunables.
    #[must_use]
    pub fn new(tunables: AiTunables) -> Self {
        Self {
            tunables,
            controllers: Vec::new(),
            frozen: false,
        }
    }

    /// Number of enemy tanks under control.
    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Reports whether no enemy is under control.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Reports whether the enemies are frozen.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Tracks enemy arrivals and departures and the freeze power-up.
    pub fn handle(&mut self, event: &Event) {
        match event {
            Event::EnemyCreated { enemy, .. } => {
                let seed = self.tunables.seed.wrapping_add(u64::from(enemy.get()));
                self.controllers.push(Controller::new(*enemy, seed));
                debug!(tank = enemy.get(), frozen = self.frozen, "ai controller attached");
            }
            Event::TankDestroyed { tank } => {
                if let Some(index) = self
                    .controllers
                    .iter()
                    .position(|controller| controller.tank == tank.id)
                {
                    let _ = self.controllers.swap_remove(index);
                    debug!(tank = tank.id.get(), "ai controller detached");
                }
            }
            Event::Freeze => self.frozen = true,
            Event::Unfreeze => self.frozen = false,
            _ => {}
        }
    }

    /// Runs one decision step for every controller, unless frozen.
    pub fn update(&mut self, world: &World, out: &mut Vec<Command>) {
        if self.frozen {
            return;
        }
        let base = query::base(world).map(|base| base.rect.origin());
        for controller in &mut self.controllers {
            controller.update(&self.tunables, world, base, out);
        }
    }
}

#[derive(Debug)]
struct Controller {
    tank: EntityId,
    rng: ChaCha8Rng,
    shoot_timer: u32,
    direction_timer: u32,
}

impl Controller {
    fn new(tank: EntityId, seed: u64) -> Self {
        Self {
            tank,
            rng: ChaCha8Rng::seed_from_u64(seed),
            shoot_timer: 0,
            direction_timer: 0,
        }
    }

    fn update(
        &mut self,
        tunables: &AiTunables,
        world: &World,
        base: Option<Point>,
        out: &mut Vec<Command>,
    ) {
        let Some(tank) = query::tank(world, self.tank).filter(|tank| !tank.destroyed) else {
            trace!(tank = self.tank.get(), "controller waiting for teardown");
            return;
        };

        self.shoot_timer += 1;
        if self.shoot_timer >= tunables.shoot_interval {
            self.shoot_timer = 0;
            if self.rng.gen::<f64>() < tunables.shoot_probability {
                out.push(Command::FireTank { tank: self.tank });
            }
        }

        self.direction_timer += 1;
        if self.direction_timer < tunables.direction_interval {
            return;
        }
        self.direction_timer = 0;
        if self.rng.gen::<f64>() >= tunables.direction_probability {
            return;
        }
        let Some(base) = base else {
            return;
        };

        let wander = self.rng.gen::<f64>() < tunables.wander_threshold;
        let direction = match heading(base, tank.rect.origin(), wander) {
            Heading::Toward(direction) => direction,
            Heading::Among(options) => self.pick(options),
        };
        out.push(Command::SteerTank {
            tank: self.tank,
            direction,
        });
    }

    fn pick(&mut self, options: &[Direction]) -> Direction {
        let index = (self.rng.gen::<f64>() * options.len() as f64).floor() as usize;
        options
            .get(index)
            .or_else(|| options.last())
            .copied()
            .unwrap_or(Direction::Down)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    Toward(Direction),
    Among(&'static [Direction]),
}

/// Picks where to head given the base and tank corners.
///
/// Only a base straight ahead on the tank's row, or anywhere below it, is
/// pursued; a base above the tank leaves the choice to chance.
fn heading(base: Point, tank: Point, wander: bool) -> Heading {
    use Direction::{Down, Left, Right, Up};

    match (base.y.cmp(&tank.y), base.x.cmp(&tank.x)) {
        (Ordering::Greater, _) if wander => Heading::Among(&[Up, Left, Right]),
        (Ordering::Greater, _) => Heading::Toward(Down),
        (Ordering::Equal, Ordering::Less) if wander => Heading::Among(&[Up, Down, Right]),
        (Ordering::Equal, Ordering::Less) => Heading::Toward(Left),
        (Ordering::Equal, Ordering::Greater) if wander => Heading::Among(&[Up, Left, Down]),
        (Ordering::Equal, Ordering::Greater) => Heading::Toward(Right),
        (Ordering::Equal, Ordering::Equal) => Heading::Toward(Down),
        (Ordering::Less, _) => Heading::Among(&[Up, Down, Left, Right]),
    }
}
