use tank_arena_core::{
    AiTunables, Command, Direction, EntityId, Event, Point, Rect, Scenery, Services, SystemId,
    TankKind, Tunables,
};
use tank_arena_system_ai::AiControllers;
use tank_arena_world::{self as world, query, Reactor, Subscriber, World};

const OPEN_FIELD: Rect = Rect::new(0, 0, 400, 400);

struct Pilots {
    ai: AiControllers,
}

impl Reactor for Pilots {
    fn react(&mut self, system: SystemId, event: &Event, _world: &World, _out: &mut Vec<Command>) {
        if system == SystemId::AiControllers {
            self.ai.handle(event);
        }
    }
}

fn decisive() -> AiTunables {
    AiTunables {
        shoot_interval: 15,
        shoot_probability: 0.0,
        direction_interval: 20,
        direction_probability: 1.0,
        wander_threshold: 0.0,
        seed: 7,
    }
}

fn setup(tunables: AiTunables) -> (World, Pilots) {
    let mut world = World::with_bounds(Services::headless(), Tunables::default(), OPEN_FIELD);
    world::subscribe(
        &mut world,
        Subscriber::System(SystemId::AiControllers),
        AiControllers::SUBSCRIPTIONS,
    );
    (
        world,
        Pilots {
            ai: AiControllers::new(tunables),
        },
    )
}

fn place(world: &mut World, pilots: &mut Pilots, command: Command) {
    world::apply(world, command, pilots);
}

fn enemy_at(world: &mut World, pilots: &mut Pilots, x: i32, y: i32) -> EntityId {
    place(
        world,
        pilots,
        Command::SpawnTank {
            kind: TankKind::Basic,
            position: Point::new(x, y),
            flashing: false,
            appearing: false,
        },
    );
    query::enemy_tanks(world)
        .last()
        .map(|tank| tank.id)
        .expect("enemy spawned")
}

fn base_at(world: &mut World, pilots: &mut Pilots, x: i32, y: i32) {
    place(
        world,
        pilots,
        Command::SpawnScenery {
            scenery: Scenery::Base,
            position: Point::new(x, y),
        },
    );
}

fn decide(world: &World, pilots: &mut Pilots, ticks: usize) -> Vec<Command> {
    let mut out = Vec::new();
    for _ in 0..ticks {
        pilots.ai.update(world, &mut out);
    }
    out
}

#[test]
fn enemies_head_for_a_base_below_them() {
    let (mut world, mut pilots) = setup(decisive());
    base_at(&mut world, &mut pilots, 200, 300);
    let tank = enemy_at(&mut world, &mut pilots, 100, 100);

    let commands = decide(&world, &mut pilots, 20);

    assert_eq!(
        commands,
        vec![Command::SteerTank {
            tank,
            direction: Direction::Down,
        }]
    );
}

#[test]
fn enemies_on_the_base_row_turn_towards_it() {
    let (mut world, mut pilots) = setup(decisive());
    base_at(&mut world, &mut pilots, 32, 300);
    let tank = enemy_at(&mut world, &mut pilots, 200, 300);

    let commands = decide(&world, &mut pilots, 20);

    assert_eq!(
        commands,
        vec![Command::SteerTank {
            tank,
            direction: Direction::Left,
        }]
    );
}

#[test]
fn without_a_base_enemies_only_shoot() {
    let tunables = AiTunables {
        shoot_probability: 1.0,
        ..decisive()
    };
    let (mut world, mut pilots) = setup(tunables);
    let tank = enemy_at(&mut world, &mut pilots, 100, 100);

    let commands = decide(&world, &mut pilots, 30);

    assert_eq!(
        commands,
        vec![Command::FireTank { tank }, Command::FireTank { tank }]
    );
}

#[test]
fn frozen_enemies_wait_for_the_thaw() {
    let (mut world, mut pilots) = setup(decisive());
    base_at(&mut world, &mut pilots, 200, 300);
    let _early = enemy_at(&mut world, &mut pilots, 100, 100);

    place(
        &mut world,
        &mut pilots,
        Command::Publish {
            event: Event::Freeze,
        },
    );
    let _late = enemy_at(&mut world, &mut pilots, 300, 100);
    assert!(decide(&world, &mut pilots, 40).is_empty(), "frozen enemies act");

    place(
        &mut world,
        &mut pilots,
        Command::Publish {
            event: Event::Unfreeze,
        },
    );
    assert_eq!(decide(&world, &mut pilots, 20).len(), 2);
}

#[test]
fn destroyed_enemies_lose_their_controller() {
    let (mut world, mut pilots) = setup(decisive());
    let tank = enemy_at(&mut world, &mut pilots, 100, 100);
    let _other = enemy_at(&mut world, &mut pilots, 200, 100);
    assert_eq!(pilots.ai.len(), 2);

    place(
        &mut world,
        &mut pilots,
        Command::DestroyTank {
            tank,
            forfeit_points: false,
        },
    );
    world::update_sprites(&mut world, &mut pilots);

    assert_eq!(pilots.ai.len(), 1);
}

#[test]
fn identical_seeds_make_identical_decisions() {
    let run = || {
        let (mut world, mut pilots) = setup(AiTunables::default());
        base_at(&mut world, &mut pilots, 200, 300);
        let _left = enemy_at(&mut world, &mut pilots, 32, 16);
        let _right = enemy_at(&mut world, &mut pilots, 300, 16);
        decide(&world, &mut pilots, 400)
    };

    let first = run();
    assert!(!first.is_empty(), "expected some decisions");
    assert_eq!(first, run());
}
