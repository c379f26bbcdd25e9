mod common;

use common::{destroyed_count, observed_world, run, spawn, spawn_scenery, spawn_tank, Recorder, Shot};
use tank_arena_core::{
    BulletType, Command, Direction, EntityId, EntityKind, Event, EventKind, ExplosionKind, Faction,
    Point, PointsKind, PowerUpKind, Rect, Scenery, Services, SystemId, TankKind, TankSummary,
    Tunables, ARENA_BOUNDS, BULLET_SPEED_FAST,
};
use tank_arena_world::{
    apply, publish, query, shutdown, subscribe, unsubscribe, Reactor, Subscriber, TankStateKind,
    World,
};

fn arena() -> (World, Recorder) {
    (
        observed_world(Services::headless(), ARENA_BOUNDS),
        Recorder::default(),
    )
}

fn shoot_count(recorder: &Recorder, tank: EntityId) -> usize {
    recorder.count(|event| matches!(event, Event::TankShoot { tank: id } if *id == tank))
}

#[test]
fn destroying_twice_tears_down_once() {
    let (mut world, mut recorder) = arena();
    let trees = spawn_scenery(&mut world, &mut recorder, Scenery::Trees, 64, 64);

    apply(&mut world, Command::DestroySprite { sprite: trees }, &mut recorder);
    apply(&mut world, Command::DestroySprite { sprite: trees }, &mut recorder);
    run(&mut world, &mut recorder, 3);
    apply(&mut world, Command::DestroySprite { sprite: trees }, &mut recorder);
    run(&mut world, &mut recorder, 2);

    assert_eq!(destroyed_count(&recorder, trees), 1);
    assert_eq!(query::entity_count(&world), 0);
    assert!(query::sprite(&world, trees).is_none());
}

#[test]
fn teardown_drops_every_subscription() {
    let (mut world, mut recorder) = arena();
    let tank = spawn_tank(&mut world, &mut recorder, TankKind::Basic, 100, 100);
    for kind in [
        EventKind::Collision,
        EventKind::OutOfBounds,
        EventKind::BulletDestroyed,
    ] {
        assert!(query::is_subscribed(&world, Subscriber::Sprite(tank), kind));
    }

    apply(
        &mut world,
        Command::DestroyTank {
            tank,
            forfeit_points: false,
        },
        &mut recorder,
    );
    run(&mut world, &mut recorder, 1);

    for kind in EventKind::ALL {
        assert!(!query::is_subscribed(&world, Subscriber::Sprite(tank), kind));
    }
}

#[test]
fn registry_keeps_draw_order() {
    let (mut world, mut recorder) = arena();
    let trees = spawn_scenery(&mut world, &mut recorder, Scenery::Trees, 64, 64);
    let wall = spawn_scenery(&mut world, &mut recorder, Scenery::BrickWall, 128, 64);
    let power_up = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnPowerUp {
            kind: PowerUpKind::Star,
            position: Point::new(200, 200),
        },
    );
    let water = spawn_scenery(&mut world, &mut recorder, Scenery::Water, 64, 200);

    assert_eq!(
        query::entity_ids(&world),
        vec![wall, water, trees, power_up]
    );
    assert!(query::sprites(&world).iter().all(|sprite| sprite.has_visual()));
}

#[test]
fn shield_blocks_hits_until_it_expires() {
    let (mut world, mut recorder) = arena();
    let tank = spawn_tank(&mut world, &mut recorder, TankKind::Player, 200, 200);
    apply(
        &mut world,
        Command::ShieldTank { tank, duration: 5 },
        &mut recorder,
    );

    let deflected = Shot::enemy(180, 211, Direction::Right).fire(&mut world, &mut recorder);
    run(&mut world, &mut recorder, 5);

    let snapshot = query::tank(&world, tank).expect("tank alive");
    assert_eq!(snapshot.state, TankStateKind::Invincible);
    assert_eq!(snapshot.hit_count, 0);
    assert!(query::sprite(&world, tank)
        .and_then(|sprite| sprite.as_tank())
        .is_some_and(|tank| tank.has_shield_overlay()));
    assert!(recorder.events.iter().any(|event| matches!(
        event,
        Event::BulletDestroyed { bullet, explode: false, .. } if *bullet == deflected
    )));

    run(&mut world, &mut recorder, 1);
    assert_eq!(
        query::tank(&world, tank).expect("tank alive").state,
        TankStateKind::Normal
    );
    assert_eq!(
        recorder.count(|event| matches!(event, Event::TankInvincibleEnd { .. })),
        1
    );

    let _fatal = Shot::enemy(180, 211, Direction::Right).fire(&mut world, &mut recorder);
    run(&mut world, &mut recorder, 4);
    assert_eq!(destroyed_count(&recorder, tank), 1);
    assert_eq!(
        recorder.count(|event| matches!(event, Event::TankPlayerDestroyed { .. })),
        1
    );
}

#[test]
fn appearing_tanks_become_active() {
    let (mut world, mut recorder) = arena();
    let enemy = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnTank {
            kind: TankKind::Fast,
            position: Point::new(64, 16),
            flashing: false,
            appearing: true,
        },
    );
    let player = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnTank {
            kind: TankKind::Player,
            position: Point::new(160, 400),
            flashing: false,
            appearing: true,
        },
    );
    assert_eq!(
        query::tank(&world, enemy).expect("enemy alive").state,
        TankStateKind::Appearing
    );

    run(&mut world, &mut recorder, 60);
    assert_eq!(
        recorder.count(|event| matches!(event, Event::TankAppearingEnd { .. })),
        2
    );
    assert_eq!(
        query::tank(&world, enemy).expect("enemy alive").state,
        TankStateKind::Normal
    );
    assert_eq!(
        query::tank(&world, player).expect("player alive").state,
        TankStateKind::Invincible
    );

    let grace = Tunables::default().spawn_grace_ticks as usize;
    run(&mut world, &mut recorder, grace);
    assert_eq!(
        query::tank(&world, player).expect("player alive").state,
        TankStateKind::Normal
    );
}

#[test]
fn appearing_tanks_ignore_controls() {
    let (mut world, mut recorder) = arena();
    let tank = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnTank {
            kind: TankKind::Basic,
            position: Point::new(64, 16),
            flashing: false,
            appearing: true,
        },
    );

    apply(&mut world, Command::FireTank { tank }, &mut recorder);
    apply(&mut world, Command::ShieldTank { tank, duration: 50 }, &mut recorder);
    apply(
        &mut world,
        Command::SteerTank {
            tank,
            direction: Direction::Down,
        },
        &mut recorder,
    );
    run(&mut world, &mut recorder, 3);

    let snapshot = query::tank(&world, tank).expect("tank alive");
    assert_eq!(shoot_count(&recorder, tank), 0);
    assert_eq!(snapshot.state, TankStateKind::Appearing);
    assert_eq!(snapshot.rect.origin(), Point::new(64, 16));
}

#[test]
fn firing_respects_the_bullet_limit() {
    let (mut world, mut recorder) = arena();
    let tank = spawn_tank(&mut world, &mut recorder, TankKind::Player, 200, 200);

    apply(&mut world, Command::FireTank { tank }, &mut recorder);
    apply(&mut world, Command::FireTank { tank }, &mut recorder);
    assert_eq!(shoot_count(&recorder, tank), 1);
    assert_eq!(
        query::tank(&world, tank).expect("tank alive").bullets_in_flight,
        1
    );

    publish(
        &mut world,
        Event::BulletDestroyed {
            bullet: EntityId::new(500),
            owner: tank,
            explode: false,
            center: Point::new(0, 0),
        },
        &mut recorder,
    );
    assert_eq!(
        query::tank(&world, tank).expect("tank alive").bullets_in_flight,
        0
    );
    apply(&mut world, Command::FireTank { tank }, &mut recorder);
    assert_eq!(shoot_count(&recorder, tank), 2);
}

#[test]
fn upgrades_stop_at_level_three() {
    let (mut world, mut recorder) = arena();
    let tank = spawn_tank(&mut world, &mut recorder, TankKind::Player, 200, 200);

    for _ in 0..5 {
        apply(&mut world, Command::UpgradeTank { tank }, &mut recorder);
    }

    let snapshot = query::tank(&world, tank).expect("tank alive");
    assert_eq!(snapshot.upgrade_level, 3);
    assert_eq!(snapshot.bullet_speed, BULLET_SPEED_FAST);
    assert_eq!(snapshot.bullets_limit, 2);
    assert_eq!(snapshot.bullet_type, BulletType::Enhanced);
}

#[test]
fn forfeited_tanks_are_worth_nothing() {
    let (mut world, mut recorder) = arena();
    let tank = spawn_tank(&mut world, &mut recorder, TankKind::Armor, 200, 200);

    apply(
        &mut world,
        Command::DestroyTank {
            tank,
            forfeit_points: true,
        },
        &mut recorder,
    );
    run(&mut world, &mut recorder, 1);

    let summary = recorder
        .events
        .iter()
        .find_map(|event| match event {
            Event::TankDestroyed { tank } => Some(*tank),
            _ => None,
        })
        .expect("destruction announced");
    assert_eq!(summary.value, 0);
    assert_eq!(summary.kind, TankKind::Armor);
}

#[test]
fn commands_for_missing_tanks_are_ignored() {
    let (mut world, mut recorder) = arena();
    let ghost = EntityId::new(777);
    for command in [
        Command::SteerTank {
            tank: ghost,
            direction: Direction::Left,
        },
        Command::StopTank { tank: ghost },
        Command::FireTank { tank: ghost },
        Command::UpgradeTank { tank: ghost },
        Command::ShieldTank {
            tank: ghost,
            duration: 10,
        },
        Command::DestroySprite { sprite: ghost },
    ] {
        apply(&mut world, command, &mut recorder);
    }
    assert!(recorder.events.is_empty());
}

#[test]
fn player_tank_picks_up_power_ups() {
    let (mut world, mut recorder) = arena();
    let power_up = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnPowerUp {
            kind: PowerUpKind::Helmet,
            position: Point::new(140, 96),
        },
    );
    let tank = spawn_tank(&mut world, &mut recorder, TankKind::Player, 100, 100);
    apply(
        &mut world,
        Command::SteerTank {
            tank,
            direction: Direction::Right,
        },
        &mut recorder,
    );

    run(&mut world, &mut recorder, 8);

    let picks: Vec<_> = recorder
        .events
        .iter()
        .filter_map(|event| match event {
            Event::PowerUpPick {
                power_up: picked,
                kind,
                tank: by,
                ..
            } => Some((*picked, *kind, *by)),
            _ => None,
        })
        .collect();
    assert_eq!(picks, vec![(power_up, PowerUpKind::Helmet, tank)]);
    assert_eq!(
        recorder.count(
            |event| matches!(event, Event::PowerUpDestroyed { power_up: id } if *id == power_up)
        ),
        1
    );
}

/// Spawns a power-up whenever a flashing enemy appears.
#[derive(Default)]
struct Restocker {
    spawned: usize,
}

impl Reactor for Restocker {
    fn react(&mut self, _system: SystemId, event: &Event, _world: &World, out: &mut Vec<Command>) {
        if let Event::EnemyCreated { flashing: true, .. } = event {
            self.spawned += 1;
            out.push(Command::SpawnPowerUp {
                kind: PowerUpKind::Timer,
                position: Point::new(300, 300),
            });
        }
    }
}

#[test]
fn subscribers_added_during_delivery_wait_for_the_next_event() {
    let mut world = World::new(Services::headless(), Tunables::default());
    subscribe(
        &mut world,
        Subscriber::System(SystemId::PowerUpFactory),
        &[EventKind::EnemyCreated],
    );
    let mut restocker = Restocker::default();
    apply(
        &mut world,
        Command::SpawnPowerUp {
            kind: PowerUpKind::Star,
            position: Point::new(100, 100),
        },
        &mut restocker,
    );
    let stale = query::entity_ids(&world)[0];

    apply(
        &mut world,
        Command::SpawnTank {
            kind: TankKind::Basic,
            position: Point::new(32, 16),
            flashing: true,
            appearing: true,
        },
        &mut restocker,
    );

    assert_eq!(restocker.spawned, 1);
    let power_ups: Vec<_> = query::sprites(&world)
        .into_iter()
        .filter(|sprite| sprite.kind() == EntityKind::PowerUp)
        .map(|sprite| (sprite.id(), sprite.is_destroyed()))
        .collect();
    assert_eq!(power_ups.len(), 2);
    assert_eq!(power_ups[0], (stale, true));
    assert!(!power_ups[1].1, "the fresh power-up must survive");
}

#[test]
fn points_labels_expire() {
    let (mut world, mut recorder) = arena();
    let points = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnPoints {
            rect: Rect::new(100, 100, 32, 32),
            value: 300,
            kind: PointsKind::Tank,
        },
    );
    assert!(recorder.events.iter().any(|event| matches!(
        event,
        Event::PointsCreated { points: id, value: 300, kind: PointsKind::Tank } if *id == points
    )));

    let lifetime = Tunables::default().points_ticks as usize;
    run(&mut world, &mut recorder, lifetime + 1);
    assert_eq!(destroyed_count(&recorder, points), 0);
    run(&mut world, &mut recorder, 1);
    assert_eq!(
        recorder.count(|event| matches!(event, Event::PointsDestroyed { points: id } if *id == points)),
        1
    );
}

#[test]
fn tank_explosions_report_the_tank_when_done() {
    let (mut world, mut recorder) = arena();
    let tank = TankSummary {
        id: EntityId::new(42),
        kind: TankKind::Power,
        faction: Faction::Enemy,
        value: 300,
        flashing: false,
        rect: Rect::new(100, 100, 32, 32),
    };
    let explosion = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnExplosion {
            kind: ExplosionKind::Tank,
            rect: Rect::centered(tank.rect.center(), ExplosionKind::Tank.size()),
            tank: Some(tank),
        },
    );
    let puff = spawn(
        &mut world,
        &mut recorder,
        Command::SpawnExplosion {
            kind: ExplosionKind::Bullet,
            rect: Rect::new(10, 10, 32, 32),
            tank: None,
        },
    );

    run(&mut world, &mut recorder, 40);

    let reported: Vec<_> = recorder
        .events
        .iter()
        .filter_map(|event| match event {
            Event::TankExplosionDestroyed {
                explosion: id,
                tank,
                center,
            } => Some((*id, *tank, *center)),
            _ => None,
        })
        .collect();
    assert_eq!(reported, vec![(explosion, tank, tank.rect.center())]);
    assert_eq!(destroyed_count(&recorder, puff), 1);
}

#[test]
fn shutdown_empties_the_world() {
    let (mut world, mut recorder) = arena();
    let _tank = spawn_tank(&mut world, &mut recorder, TankKind::Player, 200, 200);
    let _wall = spawn_scenery(&mut world, &mut recorder, Scenery::BrickWall, 64, 64);
    run(&mut world, &mut recorder, 2);

    shutdown(&mut world);

    assert_eq!(query::entity_count(&world), 0);
    assert!(query::tanks(&world).is_empty());
    assert!(!query::is_subscribed(
        &world,
        Subscriber::System(SystemId::Observer),
        EventKind::Collision
    ));
}

/// Destroys the owner of every bullet it hears about.
#[derive(Default)]
struct Executioner {
    sentenced: Vec<EntityId>,
}

impl Reactor for Executioner {
    fn react(&mut self, system: SystemId, event: &Event, _world: &World, out: &mut Vec<Command>) {
        if let (SystemId::BulletExplosions, Event::BulletDestroyed { owner, .. }) = (system, event) {
            self.sentenced.push(*owner);
            out.push(Command::DestroyTank {
                tank: *owner,
                forfeit_points: false,
            });
        }
    }
}

fn bullet_gone(owner: EntityId) -> Event {
    Event::BulletDestroyed {
        bullet: EntityId::new(500),
        owner,
        explode: false,
        center: Point::new(0, 0),
    }
}

#[test]
fn subscribers_flagged_during_delivery_ignore_it() {
    let (mut world, mut recorder) = arena();
    subscribe(
        &mut world,
        Subscriber::System(SystemId::BulletExplosions),
        &[EventKind::BulletDestroyed],
    );
    let tank = spawn_tank(&mut world, &mut recorder, TankKind::Player, 200, 200);
    apply(&mut world, Command::FireTank { tank }, &mut recorder);

    let mut executioner = Executioner::default();
    publish(&mut world, bullet_gone(tank), &mut executioner);

    assert_eq!(executioner.sentenced, vec![tank]);
    let snapshot = query::tank(&world, tank).expect("flagged tanks linger until their update");
    assert!(snapshot.destroyed);
    assert_eq!(
        snapshot.bullets_in_flight, 1,
        "the tank was flagged before its turn in the delivery"
    );
}

#[test]
fn unsubscribed_systems_hear_nothing_more() {
    let (mut world, mut recorder) = arena();
    let system = Subscriber::System(SystemId::BulletExplosions);
    subscribe(&mut world, system, &[EventKind::BulletDestroyed]);
    let first = spawn_tank(&mut world, &mut recorder, TankKind::Player, 100, 200);
    let second = spawn_tank(&mut world, &mut recorder, TankKind::Player, 200, 200);
    for tank in [first, second] {
        apply(&mut world, Command::FireTank { tank }, &mut recorder);
    }

    let mut executioner = Executioner::default();
    publish(&mut world, bullet_gone(first), &mut executioner);
    unsubscribe(&mut world, system);
    publish(&mut world, bullet_gone(second), &mut executioner);

    assert!(!query::is_subscribed(&world, system, EventKind::BulletDestroyed));
    assert_eq!(executioner.sentenced, vec![first]);
    let survivor = query::tank(&world, second).expect("second tank alive");
    assert!(!survivor.destroyed);
    assert_eq!(survivor.bullets_in_flight, 0, "the slot still returns to its owner");
}
