#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Composition root that assembles a playable Tank Arena stage.
//!
//! [`Game`] owns the world together with every reactive system, wires their
//! subscriptions and drives the fixed tick order: queued key events first,
//! then the entity pass, then the polled systems (AI controllers, enemy
//! spawner, freeze timer and shovel timer).

mod referee;
mod systems;

use std::collections::VecDeque;

use tank_arena_core::{
    Command, Event, Key, Services, StageDescriptor, StageError, SystemId, TankKind,
    Tunables, PLAYER_SPAWN,
};
use tank_arena_system_player::PlayerLedger;
use tank_arena_system_power_ups::base_ring;
use tank_arena_system_spawning::EnemySpawner;
use tank_arena_world::{self as world, parse_map, query, LevelError, Subscriber, World};
use thiserror::Error;
use tracing::{info, warn};

pub use referee::Outcome;

use systems::Systems;

/// Errors raised while assembling a stage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// The stage descriptor cannot be played.
    #[error(transparent)]
    Stage(#[from] StageError),
    /// The stage map could not be parsed.
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// A running stage: the world plus every system reacting to it.
#[derive(Debug)]
pub struct Game {
    world: World,
    systems: Systems,
    pending: VecDeque<Event>,
}

impl Game {
    /// Builds the stage described by `stage` and places the player's tank.
    pub fn new(
        services: Services,
        tunables: Tunables,
        stage: &StageDescriptor,
    ) -> Result<Self, GameError> {
        Self::build(services, tunables, stage, false)
    }

    /// Builds the stage like [`Game::new`], recording every published event.
    pub fn with_journal(
        services: Services,
        tunables: Tunables,
        stage: &StageDescriptor,
    ) -> Result<Self, GameError> {
        Self::build(services, tunables, stage, true)
    }

    fn build(
        services: Services,
        tunables: Tunables,
        stage: &StageDescriptor,
        record: bool,
    ) -> Result<Self, GameError> {
        stage.validate()?;
        let items = parse_map(&stage.map)?;

        let systems = Systems::new(&tunables, stage.enemies.clone(), record);
        let mut world = World::new(services, tunables);
        for system in Systems::WIRING {
            world::subscribe(
                &mut world,
                Subscriber::System(system),
                Systems::subscriptions(system),
            );
        }
        if record {
            world::subscribe(
                &mut world,
                Subscriber::System(SystemId::Observer),
                Systems::subscriptions(SystemId::Observer),
            );
        }

        let mut game = Self {
            world,
            systems,
            pending: VecDeque::new(),
        };

        let bounds = query::bounds(&game.world);
        for item in &items {
            game.apply(Command::SpawnScenery {
                scenery: item.scenery,
                position: item.position(bounds),
            });
        }
        match query::base(&game.world) {
            Some(base) => game.systems.shovel.set_layout(base_ring(base.rect, bounds)),
            None => warn!("stage map has no base"),
        }

        game.apply(Command::SpawnTank {
            kind: TankKind::Player,
            position: PLAYER_SPAWN,
            flashing: false,
            appearing: true,
        });
        info!(
            items = items.len(),
            enemies = stage.enemies.len(),
            "stage started"
        );
        Ok(game)
    }

    /// Queues a key press, delivered at the start of the next tick.
    pub fn press(&mut self, key: Key) {
        self.pending.push_back(Event::KeyPressed { key });
    }

    /// Queues a key release, delivered at the start of the next tick.
    pub fn release(&mut self, key: Key) {
        self.pending.push_back(Event::KeyReleased { key });
    }

    /// Applies `command` immediately, outside the tick order.
    pub fn apply(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.systems);
    }

    /// Advances the stage by one tick.
    pub fn tick(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            world::publish(&mut self.world, event, &mut self.systems);
        }
        world::update_sprites(&mut self.world, &mut self.systems);

        let mut commands = Vec::new();
        self.systems.ai.update(&self.world, &mut commands);
        self.flush(&mut commands);
        self.systems.spawner.update(&mut commands);
        self.flush(&mut commands);
        self.systems.freeze.update(&mut commands);
        self.flush(&mut commands);
        self.systems.shovel.update(&self.world, &mut commands);
        self.flush(&mut commands);
    }

    fn flush(&mut self, commands: &mut Vec<Command>) {
        for command in commands.drain(..) {
            self.apply(command);
        }
    }

    /// Tears the stage down, releasing every visual.
    pub fn finish(&mut self) {
        world::shutdown(&mut self.world);
        info!(
            tick = query::tick(&self.world),
            score = self.systems.ledger.score(),
            outcome = ?self.outcome(),
            "stage finished"
        );
    }

    /// Read-only access to the world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Lives, score and kills of the player.
    #[must_use]
    pub const fn ledger(&self) -> &PlayerLedger {
        &self.systems.ledger
    }

    /// The enemy spawner working through the stage roster.
    #[must_use]
    pub const fn spawner(&self) -> &EnemySpawner {
        &self.systems.spawner
    }

    /// How the stage ended, if it has.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.systems.referee.outcome()
    }

    /// Enemies still to be beaten: waiting on the roster or alive on the field.
    #[must_use]
    pub fn enemies_left(&self) -> usize {
        self.systems.spawner.remaining() + self.systems.spawner.alive() as usize
    }

    /// Every event published so far with the tick it was published on, when recording.
    #[must_use]
    pub fn journal(&self) -> Option<&[(u64, Event)]> {
        self.systems.journal.as_deref()
    }

    /// Banner greeting the player.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        query::welcome_banner(&self.world)
    }
}
