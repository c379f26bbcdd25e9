#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Systems that put bullets into the arena and clean up after them.

use tank_arena_core::{
    Command, Direction, Event, EventKind, ExplosionKind, Point, Rect,
};
use tank_arena_world::{query, query::TankSnapshot, World};
use tracing::trace;

/// Spawns a bullet at the muzzle of every tank that fires.
#[derive(Debug, Default)]
pub struct BulletFactory;

impl BulletFactory {
    /// Topics the factory listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::TankShoot];

    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits a spawn command for the bullet fired by the tank named in `event`.
    pub fn handle(&mut self, event: &Event, world: &World, out: &mut Vec<Command>) {
        let Event::TankShoot { tank } = event else {
            return;
        };
        let Some(shooter) = query::tank(world, *tank).filter(|shooter| !shooter.destroyed) else {
            trace!(tank = tank.get(), "shot from a tank no longer on the field");
            return;
        };

        out.push(Command::SpawnBullet {
            owner: shooter.id,
            owner_faction: shooter.faction,
            rect: Rect::square(muzzle(&shooter), shooter.bullet_size),
            direction: shooter.direction,
            speed: shooter.bullet_speed,
            bullet_type: shooter.bullet_type,
        });
    }
}

/// Upper-left corner of a bullet leaving `tank`: centred across the barrel,
/// one pixel inside the leading edge.
#[must_use]
pub fn muzzle(tank: &TankSnapshot) -> Point {
    let rect = tank.rect;
    let size = tank.bullet_size;
    let across_x = rect.left() + rect.width / 2 - size / 2;
    let across_y = rect.top() + rect.height / 2 - size / 2;
    match tank.direction {
        Direction::Right => Point::new(rect.right() - 1, across_y),
        Direction::Left => Point::new(rect.left() + 1, across_y),
        Direction::Up => Point::new(across_x, rect.top() + 1),
        Direction::Down => Point::new(across_x, rect.bottom() - 1),
    }
}

/// Leaves a small explosion wherever a bullet ends on something solid.
#[derive(Debug, Default)]
pub struct BulletExplosions;

impl BulletExplosions {
    /// Topics the factory listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::BulletDestroyed];

    /// Creates the factory.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits an explosion for bullets torn down with the explode flag set.
    pub fn handle(&mut self, event: &Event, out: &mut Vec<Command>) {
        let Event::BulletDestroyed {
            explode: true,
            center,
            ..
        } = event
        else {
            return;
        };
        out.push(Command::SpawnExplosion {
            kind: ExplosionKind::Bullet,
            rect: Rect::centered(*center, ExplosionKind::Bullet.size()),
            tank: None,
        });
    }
}
