use tank_arena_core::{
    Command, EntityId, EntityKind, Event, EventKind, Point, Rect, Scenery, Services, SystemId, TankKind,
    Tunables,
};
use tank_arena_system_bullets::{muzzle, BulletExplosions, BulletFactory};
use tank_arena_world::{self as world, query, Reactor, Subscriber, World};

const OPEN_FIELD: Rect = Rect::new(0, 0, 400, 400);

#[derive(Default)]
struct Arsenal {
    factory: BulletFactory,
    explosions: BulletExplosions,
    log: Vec<Event>,
}

impl Reactor for Arsenal {
    fn react(&mut self, system: SystemId, event: &Event, world: &World, out: &mut Vec<Command>) {
        match system {
            SystemId::BulletFactory => self.factory.handle(event, world, out),
            SystemId::BulletExplosions => self.explosions.handle(event, out),
            SystemId::Observer => self.log.push(event.clone()),
            _ => {}
        }
    }
}

impl Arsenal {
    fn created(&self, kind: EntityKind) -> Vec<EntityId> {
        self.log
            .iter()
            .filter_map(|event| match event {
                Event::SpriteCreated { sprite, kind: created } if *created == kind => Some(*sprite),
                _ => None,
            })
            .collect()
    }
}

fn armed_world() -> World {
    let mut world = World::with_bounds(Services::headless(), Tunables::default(), OPEN_FIELD);
    world::subscribe(
        &mut world,
        Subscriber::System(SystemId::BulletFactory),
        BulletFactory::SUBSCRIPTIONS,
    );
    world::subscribe(
        &mut world,
        Subscriber::System(SystemId::BulletExplosions),
        BulletExplosions::SUBSCRIPTIONS,
    );
    world::subscribe(
        &mut world,
        Subscriber::System(SystemId::Observer),
        &EventKind::ALL,
    );
    world
}

fn spawn_tank(
    world: &mut World,
    systems: &mut Arsenal,
    kind: TankKind,
    x: i32,
    y: i32,
) -> EntityId {
    world::apply(
        world,
        Command::SpawnTank {
            kind,
            position: Point::new(x, y),
            flashing: false,
            appearing: false,
        },
        systems,
    );
    *systems
        .created(EntityKind::Tank)
        .last()
        .expect("tank spawned")
}

#[test]
fn firing_spawns_a_bullet_at_the_muzzle() {
    let mut world = armed_world();
    let mut systems = Arsenal::default();
    let tank = spawn_tank(&mut world, &mut systems, TankKind::Player, 100, 200);
    let shooter = query::tank(&world, tank).expect("tank on the field");

    world::apply(&mut world, Command::FireTank { tank }, &mut systems);

    let bullets = systems.created(EntityKind::Bullet);
    assert_eq!(bullets.len(), 1, "expected exactly one bullet");
    let bullet = query::sprite(&world, bullets[0]).expect("bullet in flight");
    assert_eq!(bullet.rect(), Rect::square(muzzle(&shooter), shooter.bullet_size));
    assert_eq!(bullet.direction(), shooter.direction);
    assert_eq!(bullet.speed(), shooter.bullet_speed);
    assert_eq!(
        query::tank(&world, tank).map(|tank| tank.bullets_in_flight),
        Some(1)
    );
}

#[test]
fn power_tanks_fire_fast_bullets() {
    let mut world = armed_world();
    let mut systems = Arsenal::default();
    let basic = spawn_tank(&mut world, &mut systems, TankKind::Basic, 50, 50);
    let power = spawn_tank(&mut world, &mut systems, TankKind::Power, 200, 50);

    world::apply(&mut world, Command::FireTank { tank: basic }, &mut systems);
    world::apply(&mut world, Command::FireTank { tank: power }, &mut systems);

    let speeds: Vec<i32> = systems
        .created(EntityKind::Bullet)
        .into_iter()
        .filter_map(|id| query::sprite(&world, id).map(|bullet| bullet.speed()))
        .collect();
    assert_eq!(speeds, vec![5, 8]);
}

#[test]
fn bullet_on_steel_explodes_and_frees_the_slot() {
    let mut world = armed_world();
    let mut systems = Arsenal::default();
    world::apply(
        &mut world,
        Command::SpawnScenery {
            scenery: Scenery::SteelWall,
            position: Point::new(108, 150),
        },
        &mut systems,
    );
    let tank = spawn_tank(&mut world, &mut systems, TankKind::Player, 100, 200);

    world::apply(&mut world, Command::FireTank { tank }, &mut systems);
    for _ in 0..12 {
        world::update_sprites(&mut world, &mut systems);
    }

    let endings: Vec<&Event> = systems
        .log
        .iter()
        .filter(|event| matches!(event, Event::BulletDestroyed { .. }))
        .collect();
    assert_eq!(endings.len(), 1, "bullet should end exactly once");
    assert!(
        matches!(endings[0], Event::BulletDestroyed { explode: true, owner, .. } if *owner == tank),
        "unexpected ending {:?}",
        endings[0]
    );
    assert_eq!(systems.created(EntityKind::Explosion).len(), 1);
    assert_eq!(
        query::tank(&world, tank).map(|tank| tank.bullets_in_flight),
        Some(0)
    );
    assert_eq!(query::walls(&world).len(), 1, "steel survives normal bullets");
}

#[test]
fn dead_tanks_do_not_fire() {
    let mut world = armed_world();
    let mut systems = Arsenal::default();
    let tank = spawn_tank(&mut world, &mut systems, TankKind::Basic, 100, 100);
    let mut factory = BulletFactory::new();
    let mut out = Vec::new();

    world::apply(
        &mut world,
        Command::DestroyTank {
            tank,
            forfeit_points: false,
        },
        &mut systems,
    );
    factory.handle(&Event::TankShoot { tank }, &world, &mut out);

    assert!(out.is_empty(), "unexpected commands: {out:?}");
}
