use tank_arena_core::{
    Command, Event, EventKind, SystemId, TankKind, Tunables, ENEMY_SPAWNS, PLAYER_SPAWN,
};
use tank_arena_system_ai::AiControllers;
use tank_arena_system_bullets::{BulletExplosions, BulletFactory};
use tank_arena_system_explosions::{
    self as explosions, BaseExplosions, PointsFactory, TankExplosions,
};
use tank_arena_system_player::{InputController, PlayerLedger, Respawn};
use tank_arena_system_power_ups::{
    self as power_ups, FreezeTimer, PowerUpFactory, PowerUpHandler, ShovelTimer,
};
use tank_arena_system_spawning::{self as spawning, EnemySpawner};
use tank_arena_world::{query, Reactor, World};

use crate::referee::StageReferee;

/// Every reactive system of a running stage, routed by [`SystemId`].
#[derive(Debug)]
pub(crate) struct Systems {
    pub(crate) input: InputController,
    pub(crate) bullet_factory: BulletFactory,
    pub(crate) bullet_explosions: BulletExplosions,
    pub(crate) tank_explosions: TankExplosions,
    pub(crate) base_explosions: BaseExplosions,
    pub(crate) points: PointsFactory,
    pub(crate) power_up_factory: PowerUpFactory,
    pub(crate) power_up_handler: PowerUpHandler,
    pub(crate) freeze: FreezeTimer,
    pub(crate) shovel: ShovelTimer,
    pub(crate) ai: AiControllers,
    pub(crate) spawner: EnemySpawner,
    pub(crate) ledger: PlayerLedger,
    pub(crate) respawn: Respawn,
    pub(crate) referee: StageReferee,
    pub(crate) journal: Option<Vec<(u64, Event)>>,
}

impl Systems {
    /// Every system in subscription order. The observer is wired separately.
    pub(crate) const WIRING: [SystemId; 15] = [
        SystemId::Input,
        SystemId::BulletFactory,
        SystemId::BulletExplosions,
        SystemId::TankExplosions,
        SystemId::BaseExplosions,
        SystemId::Points,
        SystemId::PowerUpFactory,
        SystemId::PowerUpHandler,
        SystemId::FreezeTimer,
        SystemId::ShovelTimer,
        SystemId::AiControllers,
        SystemId::EnemySpawner,
        SystemId::Player,
        SystemId::Respawn,
        SystemId::Referee,
    ];

    pub(crate) fn new(tunables: &Tunables, roster: Vec<TankKind>, record: bool) -> Self {
        Self {
            input: InputController::new(),
            bullet_factory: BulletFactory::new(),
            bullet_explosions: BulletExplosions::new(),
            tank_explosions: TankExplosions::new(),
            base_explosions: BaseExplosions::new(),
            points: PointsFactory::new(explosions::Config::new(tunables.power_up_points)),
            power_up_factory: PowerUpFactory::new(tunables.power_up_seed),
            power_up_handler: PowerUpHandler::new(power_ups::Config::new(tunables.helmet_ticks)),
            freeze: FreezeTimer::new(tunables.freeze_ticks),
            shovel: ShovelTimer::new(tunables.shovel_ticks),
            ai: AiControllers::new(tunables.ai.clone()),
            spawner: EnemySpawner::new(spawning::Config::new(
                &tunables.spawner,
                roster,
                ENEMY_SPAWNS.to_vec(),
            )),
            ledger: PlayerLedger::new(tunables.player_lives),
            respawn: Respawn::new(PLAYER_SPAWN),
            referee: StageReferee::new(),
            journal: record.then(Vec::new),
        }
    }

    /// Topics `system` is subscribed to.
    pub(crate) fn subscriptions(system: SystemId) -> &'static [EventKind] {
        match system {
            SystemId::Input => InputController::SUBSCRIPTIONS,
            SystemId::BulletFactory => BulletFactory::SUBSCRIPTIONS,
            SystemId::BulletExplosions => BulletExplosions::SUBSCRIPTIONS,
            SystemId::TankExplosions => TankExplosions::SUBSCRIPTIONS,
            SystemId::BaseExplosions => BaseExplosions::SUBSCRIPTIONS,
            SystemId::Points => PointsFactory::SUBSCRIPTIONS,
            SystemId::PowerUpFactory => PowerUpFactory::SUBSCRIPTIONS,
            SystemId::PowerUpHandler => PowerUpHandler::SUBSCRIPTIONS,
            SystemId::FreezeTimer => FreezeTimer::SUBSCRIPTIONS,
            SystemId::ShovelTimer => ShovelTimer::SUBSCRIPTIONS,
            SystemId::AiControllers => AiControllers::SUBSCRIPTIONS,
            SystemId::EnemySpawner => EnemySpawner::SUBSCRIPTIONS,
            SystemId::Player => PlayerLedger::SUBSCRIPTIONS,
            SystemId::Respawn => Respawn::SUBSCRIPTIONS,
            SystemId::Referee => StageReferee::SUBSCRIPTIONS,
            SystemId::Observer => &EventKind::ALL,
        }
    }
}

impl Reactor for Systems {
    fn react(&mut self, system: SystemId, event: &Event, world: &World, out: &mut Vec<Command>) {
        match system {
            SystemId::Input => self.input.handle(event, world, out),
            SystemId::BulletFactory => self.bullet_factory.handle(event, world, out),
            SystemId::BulletExplosions => self.bullet_explosions.handle(event, out),
            SystemId::TankExplosions => self.tank_explosions.handle(event, out),
            SystemId::BaseExplosions => self.base_explosions.handle(event, out),
            SystemId::Points => self.points.handle(event, out),
            SystemId::PowerUpFactory => self.power_up_factory.handle(event, world, out),
            SystemId::PowerUpHandler => self.power_up_handler.handle(event, world, out),
            SystemId::FreezeTimer => self.freeze.handle(event),
            SystemId::ShovelTimer => self.shovel.handle(event, world, out),
            SystemId::AiControllers => self.ai.handle(event),
            SystemId::EnemySpawner => self.spawner.handle(event, out),
            SystemId::Player => self.ledger.handle(event, out),
            SystemId::Respawn => self.respawn.handle(event, out),
            SystemId::Referee => self.referee.handle(event),
            SystemId::Observer => {
                if let Some(journal) = &mut self.journal {
                    journal.push((query::tick(world), event.clone()));
                }
            }
        }
    }
}
