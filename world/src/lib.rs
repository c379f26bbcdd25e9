#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena state for Tank Arena.
//!
//! The world owns every live entity, the event bus and the entity registry.
//! Everything that happens in the arena is announced through [`publish`]:
//! the registry, the collision detector, the entities themselves and the
//! reactive systems all listen on the same bus. Systems never touch the world
//! directly; they answer events with [`Command`] values which [`apply`]
//! executes before the publishing call returns.
//!
//! Destruction is two-phase. Reactions only flag an entity; the entity is torn
//! down at the start of its next update, inside [`update_sprites`].

mod animation;
mod bullet;
mod bus;
mod collision;
mod effects;
pub mod level;
mod registry;
mod scenery;
mod sprite;
mod tank;
mod visual;
mod wall;

use std::collections::BTreeMap;

use tank_arena_core::{
    Command, Direction, EntityId, Event, EventKind, Faction, Rect, Scenery, Services, SystemId,
    Tunables, UNIT_SIZE, WallMaterial, ARENA_BOUNDS, WELCOME_BANNER,
};
use tracing::{debug, trace};

pub use bullet::Bullet;
pub use bus::Subscriber;
pub use effects::{Explosion, Points, PowerUp};
pub use level::{parse_map, LevelError, MapItem};
pub use scenery::{Base, Water};
pub use sprite::{Body, Sprite};
pub use tank::{Tank, TankStateKind};
pub use wall::{HitSides, Wall};

use bus::EventBus;
use registry::Registry;
use visual::Stage;

const GROUND_Z: i32 = 0;
const CANOPY_Z: i32 = 1;
const PICKUP_Z: i32 = 5;
const BLAST_Z: i32 = 10;

/// Receives events on behalf of the reactive systems subscribed to the bus.
pub trait Reactor {
    /// Handles `event` for `system`, pushing any resulting commands into `out`.
    fn react(&mut self, system: SystemId, event: &Event, world: &World, out: &mut Vec<Command>);
}

/// Reactor for a world that runs without reactive systems.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSystems;

impl Reactor for NoSystems {
    fn react(&mut self, _system: SystemId, _event: &Event, _world: &World, _out: &mut Vec<Command>) {}
}

/// Represents the authoritative Tank Arena world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    services: Services,
    tunables: Tunables,
    bounds: Rect,
    bus: EventBus,
    registry: Registry,
    sprites: BTreeMap<EntityId, Sprite>,
    next_entity: u32,
    tick: u64,
}

impl World {
    /// Creates an empty world over the standard arena.
    #[must_use]
    pub fn new(services: Services, tunables: Tunables) -> Self {
        Self::with_bounds(services, tunables, ARENA_BOUNDS)
    }

    /// Creates an empty world whose entities must stay inside `bounds`.
    #[must_use]
    pub fn with_bounds(services: Services, tunables: Tunables, bounds: Rect) -> Self {
        let mut bus = EventBus::default();
        bus.subscribe(
            Subscriber::Registry,
            &[EventKind::SpriteCreated, EventKind::SpriteDestroyed],
        );
        bus.subscribe(Subscriber::CollisionDetector, &[EventKind::SpriteMoved]);
        Self {
            banner: WELCOME_BANNER,
            services,
            tunables,
            bounds,
            bus,
            registry: Registry::default(),
            sprites: BTreeMap::new(),
            next_entity: 0,
            tick: 0,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        self.next_entity = self.next_entity.wrapping_add(1);
        EntityId::new(self.next_entity)
    }

    fn live_tank_mut(&mut self, id: EntityId) -> Option<&mut Sprite> {
        let sprite = self
            .sprites
            .get_mut(&id)
            .filter(|sprite| !sprite.is_destroyed() && sprite.as_tank().is_some());
        if sprite.is_none() {
            trace!(tank = id.get(), "command names no live tank");
        }
        sprite
    }
}

/// Registers `subscriber` for `kinds`. Repeated subscriptions are ignored.
pub fn subscribe(world: &mut World, subscriber: Subscriber, kinds: &[EventKind]) {
    world.bus.subscribe(subscriber, kinds);
}

/// Removes `subscriber` from every topic.
pub fn unsubscribe(world: &mut World, subscriber: Subscriber) {
    world.bus.unsubscribe(subscriber);
}

/// Delivers `event` to the subscribers of its topic, in subscription order.
///
/// The subscriber list is copied before the first delivery. Subscribers added
/// during delivery first hear the next event; subscribers removed during
/// delivery still hear this one unless they are entities already torn down.
pub fn publish(world: &mut World, event: Event, systems: &mut dyn Reactor) {
    let kind = event.kind();
    trace!(topic = kind.name(), "publish");
    for subscriber in world.bus.snapshot(kind) {
        match subscriber {
            Subscriber::Registry => track(world, &event),
            Subscriber::CollisionDetector => {
                if let Event::SpriteMoved { sprite } = event {
                    collision::detect(world, sprite, systems);
                }
            }
            Subscriber::Sprite(id) => notify(world, id, &event, systems),
            Subscriber::System(system) => {
                let mut commands = Vec::new();
                systems.react(system, &event, world, &mut commands);
                for command in commands {
                    apply(world, command, systems);
                }
            }
        }
    }
}

fn track(world: &mut World, event: &Event) {
    match event {
        Event::SpriteCreated { sprite, .. } => {
            if let Some(z) = world.sprites.get(sprite).map(Sprite::z) {
                world.registry.insert(*sprite, z);
            }
        }
        Event::SpriteDestroyed { sprite, .. } => world.registry.remove(*sprite),
        _ => {}
    }
}

fn notify(world: &mut World, id: EntityId, event: &Event, systems: &mut dyn Reactor) {
    let Some(sprite) = world.sprites.get(&id) else {
        trace!(entity = id.get(), "event for an entity already torn down");
        return;
    };
    if sprite.is_destroyed() {
        return;
    }

    let other = match event {
        Event::Collision { initiator, sprite } => {
            let other = if *initiator == id {
                *sprite
            } else if *sprite == id {
                *initiator
            } else {
                return;
            };
            match world.sprites.get(&other) {
                Some(other) => Some(other.contact()),
                None => return,
            }
        }
        _ => None,
    };

    let resolve_limit = world.tunables.collision_resolve_limit;
    let mut commands = Vec::new();
    if let Some(sprite) = world.sprites.get_mut(&id) {
        sprite.notify(event, other.as_ref(), resolve_limit, &mut commands);
    }
    for command in commands {
        apply(world, command, systems);
    }
}

fn spawn(world: &mut World, sprite: Sprite, systems: &mut dyn Reactor) {
    let id = sprite.id();
    let kind = sprite.kind();
    let topics = sprite.topics();
    debug!(entity = id.get(), ?kind, rect = ?sprite.rect(), "spawned");
    let _ = world.sprites.insert(id, sprite);
    publish(world, Event::SpriteCreated { sprite: id, kind }, systems);
    world.bus.subscribe(Subscriber::Sprite(id), topics);
    refresh_visuals(world, id);
}

fn teardown(world: &mut World, id: EntityId, systems: &mut dyn Reactor) {
    world.bus.unsubscribe(Subscriber::Sprite(id));
    let Some(kind) = world.sprites.get(&id).map(Sprite::kind) else {
        return;
    };
    publish(world, Event::SpriteDestroyed { sprite: id, kind }, systems);
    let Some(mut sprite) = world.sprites.remove(&id) else {
        return;
    };
    sprite.release(world.services.scene.as_mut());
    debug!(entity = id.get(), ?kind, "torn down");
    for event in sprite.farewell() {
        publish(world, event, systems);
    }
}

fn refresh_visuals(world: &mut World, id: EntityId) {
    let World {
        services,
        sprites,
        tunables,
        ..
    } = world;
    let Some(sprite) = sprites.get_mut(&id) else {
        return;
    };
    let mut stage = Stage {
        scene: services.scene.as_mut(),
        assets: services.assets.as_ref(),
        retry_ticks: tunables.texture_retry_ticks,
    };
    sprite.sync_visuals(&mut stage);
}

/// Updates every registered entity once, in draw order.
///
/// Entities created during the pass are first updated on the next call.
pub fn update_sprites(world: &mut World, systems: &mut dyn Reactor) {
    world.tick = world.tick.saturating_add(1);
    for id in world.registry.snapshot() {
        update_sprite(world, id, systems);
    }
}

fn update_sprite(world: &mut World, id: EntityId, systems: &mut dyn Reactor) {
    let Some(sprite) = world.sprites.get_mut(&id) else {
        return;
    };
    if sprite.is_destroyed() {
        teardown(world, id, systems);
        return;
    }
    if sprite.advance() {
        publish(world, Event::SpriteMoved { sprite: id }, systems);
    }

    let spawn_grace = world.tunables.spawn_grace_ticks;
    let World {
        services, sprites, ..
    } = &mut *world;
    let Some(sprite) = sprites.get_mut(&id) else {
        return;
    };
    let milestone = sprite.animate(spawn_grace, services.scene.as_mut());
    refresh_visuals(world, id);
    if let Some(event) = milestone {
        publish(world, event, systems);
    }
}

/// Releases every entity and subscription. The world is empty afterwards.
pub fn shutdown(world: &mut World) {
    let sprites = std::mem::take(&mut world.sprites);
    for (_, mut sprite) in sprites {
        sprite.release(world.services.scene.as_mut());
    }
    world.registry.clear();
    world.bus.clear();
    debug!(tick = world.tick, "world shut down");
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, systems: &mut dyn Reactor) {
    match command {
        Command::SpawnTank {
            kind,
            position,
            flashing,
            appearing,
        } => {
            let id = world.allocate_id();
            let direction = match kind.faction() {
                Faction::Player => Direction::Up,
                Faction::Enemy => Direction::Down,
            };
            let sprite = Sprite::new(
                id,
                Rect::square(position, UNIT_SIZE),
                GROUND_Z,
                Body::Tank(Tank::new(kind, flashing, appearing)),
            )
            .with_motion(direction, 0, Tank::normal_speed(kind));
            spawn(world, sprite, systems);
            let announcement = match kind.faction() {
                Faction::Player => Event::PlayerTankCreated { tank: id },
                Faction::Enemy => Event::EnemyCreated {
                    enemy: id,
                    kind,
                    flashing,
                },
            };
            publish(world, announcement, systems);
        }
        Command::SpawnBullet {
            owner,
            owner_faction,
            rect,
            direction,
            speed,
            bullet_type,
        } => {
            let id = world.allocate_id();
            let sprite = Sprite::new(
                id,
                rect,
                GROUND_Z,
                Body::Bullet(Bullet::new(owner, owner_faction, bullet_type)),
            )
            .with_motion(direction, speed, speed);
            spawn(world, sprite, systems);
        }
        Command::SpawnExplosion { kind, rect, tank } => {
            let id = world.allocate_id();
            let sprite = Sprite::new(id, rect, BLAST_Z, Body::Explosion(Explosion::new(kind, tank)));
            spawn(world, sprite, systems);
        }
        Command::SpawnPoints { rect, value, kind } => {
            let id = world.allocate_id();
            let duration = world.tunables.points_ticks;
            let sprite = Sprite::new(
                id,
                rect,
                PICKUP_Z,
                Body::Points(Points::new(value, kind, duration)),
            );
            spawn(world, sprite, systems);
            publish(
                world,
                Event::PointsCreated {
                    points: id,
                    value,
                    kind,
                },
                systems,
            );
        }
        Command::SpawnPowerUp { kind, position } => {
            let id = world.allocate_id();
            let sprite = Sprite::new(
                id,
                Rect::square(position, UNIT_SIZE),
                PICKUP_Z,
                Body::PowerUp(PowerUp::new(kind)),
            );
            spawn(world, sprite, systems);
        }
        Command::SpawnScenery { scenery, position } => {
            let id = world.allocate_id();
            let (body, z) = match scenery {
                Scenery::BrickWall => (Body::Wall(Wall::new(WallMaterial::Brick)), GROUND_Z),
                Scenery::SteelWall => (Body::Wall(Wall::new(WallMaterial::Steel)), GROUND_Z),
                Scenery::Base => (Body::Base(Base::default()), GROUND_Z),
                Scenery::Water => (Body::Water(Water::new()), GROUND_Z),
                Scenery::Trees => (Body::Trees, CANOPY_Z),
            };
            let sprite = Sprite::new(id, Rect::square(position, scenery.size()), z, body);
            spawn(world, sprite, systems);
        }
        Command::DestroySprite { sprite } => match world.sprites.get_mut(&sprite) {
            Some(target) => target.destroy(),
            None => trace!(entity = sprite.get(), "destroy names no live entity"),
        },
        Command::DestroyTank {
            tank,
            forfeit_points,
        } => {
            if let Some(sprite) = world.live_tank_mut(tank) {
                if forfeit_points {
                    if let Some(tank) = sprite.as_tank_mut() {
                        tank.forfeit_value();
                    }
                }
                sprite.destroy();
            }
        }
        Command::SteerTank { tank, direction } => {
            if let Some(sprite) = world.live_tank_mut(tank) {
                sprite.set_direction(direction);
                let speed = sprite.normal_speed();
                sprite.set_speed(speed);
            }
        }
        Command::StopTank { tank } => {
            if let Some(sprite) = world.live_tank_mut(tank) {
                sprite.set_speed(0);
            }
        }
        Command::FireTank { tank } => {
            let fired = world
                .live_tank_mut(tank)
                .and_then(Sprite::as_tank_mut)
                .is_some_and(Tank::reserve_bullet);
            if fired {
                publish(world, Event::TankShoot { tank }, systems);
            }
        }
        Command::UpgradeTank { tank } => {
            if let Some(state) = world.live_tank_mut(tank).and_then(Sprite::as_tank_mut) {
                state.upgrade();
                debug!(tank = tank.get(), level = state.upgrade_level(), "tank upgraded");
            }
        }
        Command::ShieldTank { tank, duration } => {
            let World {
                services, sprites, ..
            } = &mut *world;
            let Some(state) = sprites
                .get_mut(&tank)
                .filter(|sprite| !sprite.is_destroyed())
                .and_then(Sprite::as_tank_mut)
            else {
                trace!(tank = tank.get(), "shield names no live tank");
                return;
            };
            if !state.shield(duration, services.scene.as_mut()) {
                trace!(tank = tank.get(), "appearing tank ignores shield");
            }
        }
        Command::PlaySound { sound } => world.services.sound.play(sound),
        Command::Publish { event } => publish(world, event, systems),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tank_arena_core::{
        BulletType, Direction, EntityId, EventKind, Faction, Rect, TankKind, Tunables,
        WallMaterial,
    };

    use super::{Body, HitSides, Sprite, Subscriber, TankStateKind, World};

    /// Read-only view of a tank.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TankSnapshot {
        /// Identifier of the tank.
        pub id: EntityId,
        /// Tank model.
        pub kind: TankKind,
        /// Side the tank fights for.
        pub faction: Faction,
        /// Current bounds.
        pub rect: Rect,
        /// Facing direction.
        pub direction: Direction,
        /// Current speed, zero when stopped.
        pub speed: i32,
        /// Behaviour phase.
        pub state: TankStateKind,
        /// Bullets absorbed so far.
        pub hit_count: u32,
        /// Bullets needed to destroy the tank.
        pub hit_limit: u32,
        /// Upgrade level between 0 and 3.
        pub upgrade_level: u8,
        /// Strength of fired bullets.
        pub bullet_type: BulletType,
        /// Speed of fired bullets.
        pub bullet_speed: i32,
        /// Side length of fired bullets.
        pub bullet_size: i32,
        /// Bullets allowed in flight at once.
        pub bullets_limit: u32,
        /// Bullets currently in flight.
        pub bullets_in_flight: u32,
        /// Score awarded for destroying the tank.
        pub value: u32,
        /// Whether the tank carries a power-up.
        pub flashing: bool,
        /// Whether the tank is flagged for teardown.
        pub destroyed: bool,
    }

    /// Read-only view of the base.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BaseSnapshot {
        /// Identifier of the base.
        pub id: EntityId,
        /// Bounds of the base.
        pub rect: Rect,
        /// Whether a bullet struck the base.
        pub hit: bool,
    }

    /// Read-only view of a wall tile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WallSnapshot {
        /// Identifier of the wall.
        pub id: EntityId,
        /// Bounds of the wall.
        pub rect: Rect,
        /// Construction material.
        pub material: WallMaterial,
        /// Sides eroded so far.
        pub sides: HitSides,
        /// Whether the wall is flagged for teardown.
        pub destroyed: bool,
    }

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of completed entity update passes.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// Arena bounds entities must stay inside.
    #[must_use]
    pub fn bounds(world: &World) -> Rect {
        world.bounds
    }

    /// Tunables the world was created with.
    #[must_use]
    pub fn tunables(world: &World) -> &Tunables {
        &world.tunables
    }

    /// Looks up a live entity.
    #[must_use]
    pub fn sprite(world: &World, id: EntityId) -> Option<&Sprite> {
        world.sprites.get(&id)
    }

    /// Registered entities in draw order.
    #[must_use]
    pub fn sprites(world: &World) -> Vec<&Sprite> {
        world
            .registry
            .snapshot()
            .into_iter()
            .filter_map(|id| world.sprites.get(&id))
            .collect()
    }

    /// Identifiers of registered entities in draw order.
    #[must_use]
    pub fn entity_ids(world: &World) -> Vec<EntityId> {
        world.registry.snapshot()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn entity_count(world: &World) -> usize {
        world.registry.len()
    }

    /// Reports whether `subscriber` listens to `kind`.
    #[must_use]
    pub fn is_subscribed(world: &World, subscriber: Subscriber, kind: EventKind) -> bool {
        world.bus.is_subscribed(subscriber, kind)
    }

    /// Snapshot of a live tank.
    #[must_use]
    pub fn tank(world: &World, id: EntityId) -> Option<TankSnapshot> {
        world.sprites.get(&id).and_then(snapshot_tank)
    }

    /// Every registered tank in draw order.
    #[must_use]
    pub fn tanks(world: &World) -> Vec<TankSnapshot> {
        sprites(world).into_iter().filter_map(snapshot_tank).collect()
    }

    /// Registered enemy tanks not yet flagged for teardown.
    #[must_use]
    pub fn enemy_tanks(world: &World) -> Vec<TankSnapshot> {
        tanks(world)
            .into_iter()
            .filter(|tank| tank.faction == Faction::Enemy && !tank.destroyed)
            .collect()
    }

    /// The player's tank, if one is on the field.
    #[must_use]
    pub fn player_tank(world: &World) -> Option<TankSnapshot> {
        tanks(world)
            .into_iter()
            .find(|tank| tank.faction == Faction::Player && !tank.destroyed)
    }

    /// The base, if the map placed one.
    #[must_use]
    pub fn base(world: &World) -> Option<BaseSnapshot> {
        sprites(world).into_iter().find_map(|sprite| match sprite.body() {
            Body::Base(base) => Some(BaseSnapshot {
                id: sprite.id(),
                rect: sprite.rect(),
                hit: base.is_hit(),
            }),
            _ => None,
        })
    }

    /// Every registered wall tile in draw order.
    #[must_use]
    pub fn walls(world: &World) -> Vec<WallSnapshot> {
        sprites(world)
            .into_iter()
            .filter_map(|sprite| match sprite.body() {
                Body::Wall(wall) => Some(WallSnapshot {
                    id: sprite.id(),
                    rect: sprite.rect(),
                    material: wall.material(),
                    sides: wall.sides(),
                    destroyed: sprite.is_destroyed(),
                }),
                _ => None,
            })
            .collect()
    }

    fn snapshot_tank(sprite: &Sprite) -> Option<TankSnapshot> {
        let tank = sprite.as_tank()?;
        Some(TankSnapshot {
            id: sprite.id(),
            kind: tank.kind(),
            faction: tank.faction(),
            rect: sprite.rect(),
            direction: sprite.direction(),
            speed: sprite.speed(),
            state: tank.state(),
            hit_count: tank.hit_count(),
            hit_limit: tank.hit_limit(),
            upgrade_level: tank.upgrade_level(),
            bullet_type: tank.bullet_type(),
            bullet_speed: tank.bullet_speed(),
            bullet_size: tank.bullet_size(),
            bullets_limit: tank.bullets_limit(),
            bullets_in_flight: tank.bullets_in_flight(),
            value: tank.value(),
            flashing: tank.is_flashing(),
            destroyed: sprite.is_destroyed(),
        })
    }
}
