#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tank Arena simulation kernel.
//!
//! This crate defines the message surface that connects the authoritative
//! world, the reactive systems and the adapters. The world publishes [`Event`]
//! values through its event bus; systems subscribed to an [`EventKind`] react
//! by returning [`Command`] values, which the world applies before the
//! publishing call returns. Every reaction therefore completes within the tick
//! that caused it.

pub mod geometry;
pub mod services;
pub mod tunables;

use serde::{Deserialize, Serialize};

pub use geometry::{Point, Rect};
pub use services::{
    AssetLookup, SceneGraph, Services, SoundId, SoundLog, SoundPlayer, TextureId, VisualHandle,
};
pub use tunables::{AiTunables, SpawnerTunables, StageDescriptor, StageError, Tunables};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tank Arena.";

/// Side length of a tank, the base and other full-size entities.
pub const UNIT_SIZE: i32 = 32;

/// Side length of a wall tile and the map grid step.
pub const TILE_SIZE: i32 = UNIT_SIZE / 2;

/// Playable field. Entities leaving it are reported as out of bounds.
pub const ARENA_BOUNDS: Rect = Rect::new(UNIT_SIZE, TILE_SIZE, 13 * UNIT_SIZE, 13 * UNIT_SIZE);

/// Where the player's tank appears.
pub const PLAYER_SPAWN: Point = Point::new(
    ARENA_BOUNDS.x + 4 * UNIT_SIZE,
    ARENA_BOUNDS.y + 12 * UNIT_SIZE,
);

/// Enemy spawn points, cycled in order.
pub const ENEMY_SPAWNS: [Point; 3] = [
    Point::new(ARENA_BOUNDS.x + 6 * UNIT_SIZE, ARENA_BOUNDS.y),
    Point::new(ARENA_BOUNDS.x + 12 * UNIT_SIZE, ARENA_BOUNDS.y),
    Point::new(ARENA_BOUNDS.x, ARENA_BOUNDS.y),
];

/// Highest upgrade level a tank can reach.
pub const MAX_UPGRADE_LEVEL: u8 = 3;

/// Side length of a bullet.
pub const BULLET_SIZE: i32 = 10;

/// Pixels per move for a regular bullet.
pub const BULLET_SPEED_NORMAL: i32 = 5;

/// Pixels per move for a fast bullet.
pub const BULLET_SPEED_FAST: i32 = 8;

/// Unique identifier assigned to an entity for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cardinal facing and travel direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards decreasing y.
    Up,
    /// Towards increasing y.
    Down,
    /// Towards decreasing x.
    Left,
    /// Towards increasing x.
    Right,
}

impl Direction {
    /// Lowercase name used in texture names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Reports whether the direction travels along the y axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// Side a tank fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Faction {
    /// Controlled through keyboard input.
    Player,
    /// Controlled by the AI.
    Enemy,
}

/// Tank model, which fixes speed, armor and score value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankKind {
    /// The player's tank.
    Player,
    /// Slow enemy worth 100 points.
    Basic,
    /// Fast enemy worth 200 points.
    Fast,
    /// Enemy firing fast bullets, worth 300 points.
    Power,
    /// Enemy taking four hits, worth 400 points.
    Armor,
}

impl TankKind {
    /// Enemy kinds in roster order.
    pub const ENEMIES: [TankKind; 4] = [Self::Basic, Self::Fast, Self::Power, Self::Armor];

    /// Name used in texture names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Player => "player1",
            Self::Basic => "basic",
            Self::Fast => "fast",
            Self::Power => "power",
            Self::Armor => "armor",
        }
    }

    /// Side the tank kind belongs to.
    #[must_use]
    pub const fn faction(self) -> Faction {
        match self {
            Self::Player => Faction::Player,
            Self::Basic | Self::Fast | Self::Power | Self::Armor => Faction::Enemy,
        }
    }
}

/// Bullet strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletType {
    /// Chips brick one side at a time and bounces off steel.
    Normal,
    /// Destroys any wall in one hit.
    Enhanced,
}

/// Wall construction material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallMaterial {
    /// Destructible by any bullet.
    Brick,
    /// Destructible by enhanced bullets only.
    Steel,
}

/// Static scenery that can appear in a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scenery {
    /// Brick wall tile.
    BrickWall,
    /// Steel wall tile.
    SteelWall,
    /// The base the player defends.
    Base,
    /// Water, impassable for tanks.
    Water,
    /// Foliage drawn above tanks.
    Trees,
}

impl Scenery {
    /// Side length of the scenery square.
    #[must_use]
    pub const fn size(self) -> i32 {
        match self {
            Self::BrickWall | Self::SteelWall => TILE_SIZE,
            Self::Base | Self::Water | Self::Trees => UNIT_SIZE,
        }
    }
}

/// Broad category of an entity, used for capability checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Player or enemy tank.
    Tank,
    /// Bullet in flight.
    Bullet,
    /// Brick or steel wall tile.
    Wall,
    /// The base.
    Base,
    /// Water tile.
    Water,
    /// Trees tile.
    Trees,
    /// Collectible power-up.
    PowerUp,
    /// Floating score label.
    Points,
    /// Explosion animation.
    Explosion,
}

/// Explosion animation flavour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExplosionKind {
    /// Small puff where a bullet ended.
    Bullet,
    /// Large blast where a tank was destroyed.
    Tank,
    /// Large blast where the base was hit.
    Base,
}

impl ExplosionKind {
    /// Side length of the explosion square.
    #[must_use]
    pub const fn size(self) -> i32 {
        match self {
            Self::Bullet => UNIT_SIZE,
            Self::Tank | Self::Base => UNIT_SIZE * 2,
        }
    }
}

/// Power-up effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PowerUpKind {
    /// Destroys every enemy on the field.
    Grenade,
    /// Shields the player tank.
    Helmet,
    /// Armors the base walls with steel for a while.
    Shovel,
    /// Upgrades the player tank.
    Star,
    /// Grants an extra life.
    Tank,
    /// Freezes every enemy for a while.
    Timer,
}

impl PowerUpKind {
    /// Every power-up kind in roll order.
    pub const ALL: [PowerUpKind; 6] = [
        Self::Grenade,
        Self::Helmet,
        Self::Shovel,
        Self::Star,
        Self::Tank,
        Self::Timer,
    ];

    /// Name used in texture names.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grenade => "grenade",
            Self::Helmet => "helmet",
            Self::Shovel => "shovel",
            Self::Star => "star",
            Self::Tank => "tank",
            Self::Timer => "timer",
        }
    }
}

/// Reason a points label was awarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointsKind {
    /// Enemy tank destroyed.
    Tank,
    /// Power-up collected.
    PowerUp,
}

/// Keys recognised by the input controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Steer up.
    Up,
    /// Steer down.
    Down,
    /// Steer left.
    Left,
    /// Steer right.
    Right,
    /// Shoot.
    Fire,
    /// Start or pause.
    Start,
    /// Menu selection.
    Select,
}

impl Key {
    /// Direction bound to the key, if it is an arrow.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Fire | Self::Start | Self::Select => None,
        }
    }
}

/// Identifies a reactive system subscribed to the event bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SystemId {
    /// Translates key events into tank commands.
    Input,
    /// Spawns bullets for firing tanks.
    BulletFactory,
    /// Spawns explosions where bullets end.
    BulletExplosions,
    /// Spawns explosions where tanks are destroyed.
    TankExplosions,
    /// Spawns the explosion when the base is hit.
    BaseExplosions,
    /// Spawns points labels.
    Points,
    /// Spawns power-ups for flashing enemies.
    PowerUpFactory,
    /// Applies collected power-ups.
    PowerUpHandler,
    /// Ends enemy freezes.
    FreezeTimer,
    /// Swaps the base walls for steel and back.
    ShovelTimer,
    /// Drives enemy tanks.
    AiControllers,
    /// Spawns enemy tanks.
    EnemySpawner,
    /// Tracks score and lives.
    Player,
    /// Respawns the player tank.
    Respawn,
    /// Decides when the stage is won or lost.
    Referee,
    /// Records every published event.
    Observer,
}

/// Identity and state of a tank captured when it leaves the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TankSummary {
    /// Identifier of the tank.
    pub id: EntityId,
    /// Tank model.
    pub kind: TankKind,
    /// Side the tank fought for.
    pub faction: Faction,
    /// Score awarded for destroying the tank. Zero when forfeited.
    pub value: u32,
    /// Whether the tank carried a power-up.
    pub flashing: bool,
    /// Last position of the tank.
    pub rect: Rect,
}

/// Events published on the world's event bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// An entity entered the world.
    SpriteCreated {
        /// Identifier of the new entity.
        sprite: EntityId,
        /// Category of the new entity.
        kind: EntityKind,
    },
    /// An entity was torn down.
    SpriteDestroyed {
        /// Identifier of the removed entity.
        sprite: EntityId,
        /// Category of the removed entity.
        kind: EntityKind,
    },
    /// An entity advanced along its direction.
    SpriteMoved {
        /// Identifier of the entity that moved.
        sprite: EntityId,
    },
    /// Two entities overlap after `initiator` moved.
    Collision {
        /// Entity whose move caused the overlap.
        initiator: EntityId,
        /// Entity that was overlapped.
        sprite: EntityId,
    },
    /// An entity moved partially or fully outside the arena.
    OutOfBounds {
        /// Entity outside the bounds.
        sprite: EntityId,
        /// Arena bounds it violated.
        bounds: Rect,
    },
    /// A tank fired.
    TankShoot {
        /// Tank that fired.
        tank: EntityId,
    },
    /// A tank was torn down.
    TankDestroyed {
        /// The destroyed tank.
        tank: TankSummary,
    },
    /// The player's tank was torn down.
    TankPlayerDestroyed {
        /// The destroyed tank.
        tank: TankSummary,
    },
    /// An enemy tank was torn down.
    TankEnemyDestroyed {
        /// The destroyed tank.
        tank: TankSummary,
    },
    /// A power-up carrying enemy tank was torn down.
    TankFlashingDestroyed {
        /// The destroyed tank.
        tank: TankSummary,
    },
    /// A tank finished its appearing animation.
    TankAppearingEnd {
        /// Tank that became active.
        tank: EntityId,
    },
    /// A tank's shield expired.
    TankInvincibleEnd {
        /// Tank that lost its shield.
        tank: EntityId,
    },
    /// A bullet was torn down.
    BulletDestroyed {
        /// The removed bullet.
        bullet: EntityId,
        /// Tank that fired the bullet.
        owner: EntityId,
        /// Whether the bullet should leave an explosion.
        explode: bool,
        /// Last center of the bullet.
        center: Point,
    },
    /// The base was hit by a bullet.
    BaseHit {
        /// The base.
        base: EntityId,
        /// Center of the base.
        center: Point,
    },
    /// A tank explosion finished playing.
    TankExplosionDestroyed {
        /// The removed explosion.
        explosion: EntityId,
        /// Tank that caused the explosion.
        tank: TankSummary,
        /// Center of the explosion.
        center: Point,
    },
    /// The base explosion finished playing.
    BaseExplosionDestroyed {
        /// The removed explosion.
        explosion: EntityId,
    },
    /// A points label was created.
    PointsCreated {
        /// The new label.
        points: EntityId,
        /// Score shown by the label.
        value: u32,
        /// Why the score was awarded.
        kind: PointsKind,
    },
    /// A points label expired.
    PointsDestroyed {
        /// The removed label.
        points: EntityId,
    },
    /// The enemy spawner created a tank.
    EnemyCreated {
        /// The new enemy.
        enemy: EntityId,
        /// Model of the new enemy.
        kind: TankKind,
        /// Whether the enemy carries a power-up.
        flashing: bool,
    },
    /// The last enemy of the stage finished exploding.
    LastEnemyDestroyed,
    /// A player tank was created.
    PlayerTankCreated {
        /// The new tank.
        tank: EntityId,
    },
    /// The player collected a power-up.
    PowerUpPick {
        /// The collected power-up.
        power_up: EntityId,
        /// Effect of the power-up.
        kind: PowerUpKind,
        /// Tank that collected it.
        tank: EntityId,
        /// Center of the power-up.
        center: Point,
    },
    /// A power-up was torn down.
    PowerUpDestroyed {
        /// The removed power-up.
        power_up: EntityId,
    },
    /// Enemies stop acting.
    Freeze,
    /// Enemies resume acting.
    Unfreeze,
    /// The base walls turn to steel.
    ShovelStart,
    /// The base walls turn back to brick.
    ShovelEnd,
    /// The player gains a life.
    ExtraLife,
    /// The player lost a tank with no lives left.
    PlayerOutOfLives,
    /// A key went down.
    KeyPressed {
        /// Key pressed.
        key: Key,
    },
    /// A key went up.
    KeyReleased {
        /// Key released.
        key: Key,
    },
}

/// Topic an [`Event`] is published under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    /// [`Event::SpriteCreated`].
    SpriteCreated,
    /// [`Event::SpriteDestroyed`].
    SpriteDestroyed,
    /// [`Event::SpriteMoved`].
    SpriteMoved,
    /// [`Event::Collision`].
    Collision,
    /// [`Event::OutOfBounds`].
    OutOfBounds,
    /// [`Event::TankShoot`].
    TankShoot,
    /// [`Event::TankDestroyed`].
    TankDestroyed,
    /// [`Event::TankPlayerDestroyed`].
    TankPlayerDestroyed,
    /// [`Event::TankEnemyDestroyed`].
    TankEnemyDestroyed,
    /// [`Event::TankFlashingDestroyed`].
    TankFlashingDestroyed,
    /// [`Event::TankAppearingEnd`].
    TankAppearingEnd,
    /// [`Event::TankInvincibleEnd`].
    TankInvincibleEnd,
    /// [`Event::BulletDestroyed`].
    BulletDestroyed,
    /// [`Event::BaseHit`].
    BaseHit,
    /// [`Event::TankExplosionDestroyed`].
    TankExplosionDestroyed,
    /// [`Event::BaseExplosionDestroyed`].
    BaseExplosionDestroyed,
    /// [`Event::PointsCreated`].
    PointsCreated,
    /// [`Event::PointsDestroyed`].
    PointsDestroyed,
    /// [`Event::EnemyCreated`].
    EnemyCreated,
    /// [`Event::LastEnemyDestroyed`].
    LastEnemyDestroyed,
    /// [`Event::PlayerTankCreated`].
    PlayerTankCreated,
    /// [`Event::PowerUpPick`].
    PowerUpPick,
    /// [`Event::PowerUpDestroyed`].
    PowerUpDestroyed,
    /// [`Event::Freeze`].
    Freeze,
    /// [`Event::Unfreeze`].
    Unfreeze,
    /// [`Event::ShovelStart`].
    ShovelStart,
    /// [`Event::ShovelEnd`].
    ShovelEnd,
    /// [`Event::ExtraLife`].
    ExtraLife,
    /// [`Event::PlayerOutOfLives`].
    PlayerOutOfLives,
    /// [`Event::KeyPressed`].
    KeyPressed,
    /// [`Event::KeyReleased`].
    KeyReleased,
}

impl EventKind {
    /// Every topic, in declaration order.
    pub const ALL: [EventKind; 31] = [
        Self::SpriteCreated,
        Self::SpriteDestroyed,
        Self::SpriteMoved,
        Self::Collision,
        Self::OutOfBounds,
        Self::TankShoot,
        Self::TankDestroyed,
        Self::TankPlayerDestroyed,
        Self::TankEnemyDestroyed,
        Self::TankFlashingDestroyed,
        Self::TankAppearingEnd,
        Self::TankInvincibleEnd,
        Self::BulletDestroyed,
        Self::BaseHit,
        Self::TankExplosionDestroyed,
        Self::BaseExplosionDestroyed,
        Self::PointsCreated,
        Self::PointsDestroyed,
        Self::EnemyCreated,
        Self::LastEnemyDestroyed,
        Self::PlayerTankCreated,
        Self::PowerUpPick,
        Self::PowerUpDestroyed,
        Self::Freeze,
        Self::Unfreeze,
        Self::ShovelStart,
        Self::ShovelEnd,
        Self::ExtraLife,
        Self::PlayerOutOfLives,
        Self::KeyPressed,
        Self::KeyReleased,
    ];

    /// Stable topic name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpriteCreated => "Sprite.Created",
            Self::SpriteDestroyed => "Sprite.Destroyed",
            Self::SpriteMoved => "Sprite.Moved",
            Self::Collision => "Collision",
            Self::OutOfBounds => "OutOfBounds",
            Self::TankShoot => "Tank.Shoot",
            Self::TankDestroyed => "Tank.Destroyed",
            Self::TankPlayerDestroyed => "Tank.PlayerDestroyed",
            Self::TankEnemyDestroyed => "Tank.EnemyDestroyed",
            Self::TankFlashingDestroyed => "Tank.FlashingDestroyed",
            Self::TankAppearingEnd => "Tank.AppearingEnd",
            Self::TankInvincibleEnd => "Tank.InvincibleEnd",
            Self::BulletDestroyed => "Bullet.Destroyed",
            Self::BaseHit => "Base.Hit",
            Self::TankExplosionDestroyed => "TankExplosion.Destroyed",
            Self::BaseExplosionDestroyed => "BaseExplosion.Destroyed",
            Self::PointsCreated => "PointsFactory.PointsCreated",
            Self::PointsDestroyed => "Points.Destroyed",
            Self::EnemyCreated => "EnemyFactory.EnemyCreated",
            Self::LastEnemyDestroyed => "EnemyFactory.LastEnemyDestroyed",
            Self::PlayerTankCreated => "PlayerTankFactory.PlayerTankCreated",
            Self::PowerUpPick => "PowerUp.Pick",
            Self::PowerUpDestroyed => "PowerUp.Destroyed",
            Self::Freeze => "PowerUpHandler.Freeze",
            Self::Unfreeze => "FreezeTimer.Unfreeze",
            Self::ShovelStart => "PowerUpHandler.ShovelStart",
            Self::ShovelEnd => "ShovelHandler.ShovelEnd",
            Self::ExtraLife => "PowerUpHandler.ExtraLife",
            Self::PlayerOutOfLives => "Player.OutOfLives",
            Self::KeyPressed => "Keyboard.KeyPressed",
            Self::KeyReleased => "Keyboard.KeyReleased",
        }
    }
}

impl Event {
    /// Topic the event is published under.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SpriteCreated { .. } => EventKind::SpriteCreated,
            Self::SpriteDestroyed { .. } => EventKind::SpriteDestroyed,
            Self::SpriteMoved { .. } => EventKind::SpriteMoved,
            Self::Collision { .. } => EventKind::Collision,
            Self::OutOfBounds { .. } => EventKind::OutOfBounds,
            Self::TankShoot { .. } => EventKind::TankShoot,
            Self::TankDestroyed { .. } => EventKind::TankDestroyed,
            Self::TankPlayerDestroyed { .. } => EventKind::TankPlayerDestroyed,
            Self::TankEnemyDestroyed { .. } => EventKind::TankEnemyDestroyed,
            Self::TankFlashingDestroyed { .. } => EventKind::TankFlashingDestroyed,
            Self::TankAppearingEnd { .. } => EventKind::TankAppearingEnd,
            Self::TankInvincibleEnd { .. } => EventKind::TankInvincibleEnd,
            Self::BulletDestroyed { .. } => EventKind::BulletDestroyed,
            Self::BaseHit { .. } => EventKind::BaseHit,
            Self::TankExplosionDestroyed { .. } => EventKind::TankExplosionDestroyed,
            Self::BaseExplosionDestroyed { .. } => EventKind::BaseExplosionDestroyed,
            Self::PointsCreated { .. } => EventKind::PointsCreated,
            Self::PointsDestroyed { .. } => EventKind::PointsDestroyed,
            Self::EnemyCreated { .. } => EventKind::EnemyCreated,
            Self::LastEnemyDestroyed => EventKind::LastEnemyDestroyed,
            Self::PlayerTankCreated { .. } => EventKind::PlayerTankCreated,
            Self::PowerUpPick { .. } => EventKind::PowerUpPick,
            Self::PowerUpDestroyed { .. } => EventKind::PowerUpDestroyed,
            Self::Freeze => EventKind::Freeze,
            Self::Unfreeze => EventKind::Unfreeze,
            Self::ShovelStart => EventKind::ShovelStart,
            Self::ShovelEnd => EventKind::ShovelEnd,
            Self::ExtraLife => EventKind::ExtraLife,
            Self::PlayerOutOfLives => EventKind::PlayerOutOfLives,
            Self::KeyPressed { .. } => EventKind::KeyPressed,
            Self::KeyReleased { .. } => EventKind::KeyReleased,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Creates a tank of the provided kind.
    SpawnTank {
        /// Model of the new tank.
        kind: TankKind,
        /// Upper-left corner of the new tank.
        position: Point,
        /// Whether the tank carries a power-up.
        flashing: bool,
        /// Whether the tank starts with the appearing animation.
        appearing: bool,
    },
    /// Creates a bullet fired by `owner`.
    SpawnBullet {
        /// Tank that fired the bullet.
        owner: EntityId,
        /// Side of the tank that fired.
        owner_faction: Faction,
        /// Initial bounds of the bullet.
        rect: Rect,
        /// Travel direction.
        direction: Direction,
        /// Pixels per move.
        speed: i32,
        /// Strength of the bullet.
        bullet_type: BulletType,
    },
    /// Creates an explosion animation.
    SpawnExplosion {
        /// Explosion flavour.
        kind: ExplosionKind,
        /// Bounds of the explosion.
        rect: Rect,
        /// Tank that exploded, for tank explosions.
        tank: Option<TankSummary>,
    },
    /// Creates a floating points label.
    SpawnPoints {
        /// Bounds of the label.
        rect: Rect,
        /// Score shown.
        value: u32,
        /// Why the score was awarded.
        kind: PointsKind,
    },
    /// Creates a collectible power-up.
    SpawnPowerUp {
        /// Effect of the power-up.
        kind: PowerUpKind,
        /// Upper-left corner of the power-up.
        position: Point,
    },
    /// Creates a piece of static scenery.
    SpawnScenery {
        /// What to create.
        scenery: Scenery,
        /// Upper-left corner in arena pixels.
        position: Point,
    },
    /// Flags an entity for teardown on its next update.
    DestroySprite {
        /// Entity to destroy.
        sprite: EntityId,
    },
    /// Flags a tank for teardown, optionally forfeiting its score value.
    DestroyTank {
        /// Tank to destroy.
        tank: EntityId,
        /// Whether destroying the tank awards no points.
        forfeit_points: bool,
    },
    /// Points a tank in a direction and sets it moving at its normal speed.
    SteerTank {
        /// Tank to steer.
        tank: EntityId,
        /// New direction.
        direction: Direction,
    },
    /// Stops a tank.
    StopTank {
        /// Tank to stop.
        tank: EntityId,
    },
    /// Asks a tank to fire.
    FireTank {
        /// Tank that should fire.
        tank: EntityId,
    },
    /// Raises a tank's upgrade level.
    UpgradeTank {
        /// Tank to upgrade.
        tank: EntityId,
    },
    /// Puts a tank into the invincible state.
    ShieldTank {
        /// Tank to shield.
        tank: EntityId,
        /// Shield duration in ticks.
        duration: u32,
    },
    /// Plays a sound effect.
    PlaySound {
        /// Sound to play.
        sound: SoundId,
    },
    /// Publishes an event on the bus.
    Publish {
        /// Event to publish.
        event: Event,
    },
}
