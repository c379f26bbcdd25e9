#![allow(dead_code)]

use tank_arena_core::{
    BulletType, Command, Direction, EntityId, Event, EventKind, Faction, Point, Rect, Scenery,
    Services, SystemId, TankKind, Tunables, BULLET_SIZE,
};
use tank_arena_world::{apply, subscribe, update_sprites, Reactor, Subscriber, World};

/// Reactor that keeps every event it hears, in delivery order.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Reactor for Recorder {
    fn react(&mut self, _system: SystemId, event: &Event, _world: &World, _out: &mut Vec<Command>) {
        self.events.push(event.clone());
    }
}

impl Recorder {
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }

    pub fn last_created(&self) -> EntityId {
        self.events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::SpriteCreated { sprite, .. } => Some(*sprite),
                _ => None,
            })
            .expect("an entity was created")
    }
}

pub fn observed_world(services: Services, bounds: Rect) -> World {
    let mut world = World::with_bounds(services, Tunables::default(), bounds);
    subscribe(
        &mut world,
        Subscriber::System(SystemId::Observer),
        &EventKind::ALL,
    );
    world
}

pub fn run(world: &mut World, systems: &mut dyn Reactor, ticks: usize) {
    for _ in 0..ticks {
        update_sprites(world, systems);
    }
}

pub fn spawn(world: &mut World, recorder: &mut Recorder, command: Command) -> EntityId {
    apply(world, command, recorder);
    recorder.last_created()
}

pub fn spawn_scenery(world: &mut World, recorder: &mut Recorder, scenery: Scenery, x: i32, y: i32) -> EntityId {
    spawn(
        world,
        recorder,
        Command::SpawnScenery {
            scenery,
            position: Point::new(x, y),
        },
    )
}

pub fn spawn_tank(world: &mut World, recorder: &mut Recorder, kind: TankKind, x: i32, y: i32) -> EntityId {
    spawn(
        world,
        recorder,
        Command::SpawnTank {
            kind,
            position: Point::new(x, y),
            flashing: false,
            appearing: false,
        },
    )
}

pub struct Shot {
    pub owner: EntityId,
    pub faction: Faction,
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub speed: i32,
    pub bullet_type: BulletType,
}

impl Shot {
    pub fn enemy(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            owner: EntityId::new(9_999),
            faction: Faction::Enemy,
            x,
            y,
            direction,
            speed: 5,
            bullet_type: BulletType::Normal,
        }
    }

    pub fn player(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            faction: Faction::Player,
            ..Self::enemy(x, y, direction)
        }
    }

    pub fn enhanced(mut self) -> Self {
        self.bullet_type = BulletType::Enhanced;
        self
    }

    pub fn fire(self, world: &mut World, recorder: &mut Recorder) -> EntityId {
        spawn(
            world,
            recorder,
            Command::SpawnBullet {
                owner: self.owner,
                owner_faction: self.faction,
                rect: Rect::new(self.x, self.y, BULLET_SIZE, BULLET_SIZE),
                direction: self.direction,
                speed: self.speed,
                bullet_type: self.bullet_type,
            },
        )
    }
}

pub fn destroyed_count(recorder: &Recorder, id: EntityId) -> usize {
    recorder.count(|event| matches!(event, Event::SpriteDestroyed { sprite, .. } if *sprite == id))
}
