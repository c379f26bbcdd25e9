//! Entities living in the arena and their reactions to bus events.
//!
//! Every entity shares the same movement and lifecycle data; what differs
//! lives in its [`Body`]. Reactions to collisions only ever see a [`Contact`]
//! snapshot of the other party, taken right before delivery.

use tank_arena_core::{
    BulletType, Command, Direction, EntityId, EntityKind, Event, EventKind, ExplosionKind, Faction,
    Rect, SceneGraph, SoundId, TankSummary, WallMaterial, TILE_SIZE,
};
use tracing::debug;

use crate::{
    bullet::Bullet,
    effects::{Explosion, Points, PowerUp},
    scenery::{Base, Water},
    tank::Tank,
    visual::{Stage, Visual},
    wall::Wall,
};

const TANK_TOPICS: &[EventKind] = &[
    EventKind::Collision,
    EventKind::OutOfBounds,
    EventKind::BulletDestroyed,
];
const BULLET_TOPICS: &[EventKind] = &[EventKind::Collision, EventKind::OutOfBounds];
const TARGET_TOPICS: &[EventKind] = &[EventKind::Collision];
const POWER_UP_TOPICS: &[EventKind] = &[EventKind::Collision, EventKind::EnemyCreated];

/// Largest offset a turning tank snaps across to line up with the tile grid.
const TURN_TOLERANCE: i32 = TILE_SIZE - 1;

/// Entity-specific state.
#[derive(Debug)]
pub enum Body {
    /// Player or enemy tank.
    Tank(Tank),
    /// Bullet in flight.
    Bullet(Bullet),
    /// Brick or steel wall tile.
    Wall(Wall),
    /// The base.
    Base(Base),
    /// Water tile.
    Water(Water),
    /// Trees tile.
    Trees,
    /// Collectible power-up.
    PowerUp(PowerUp),
    /// Floating score label.
    Points(Points),
    /// Explosion animation.
    Explosion(Explosion),
}

/// What the other party of a collision is, as far as a reaction cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    Tank {
        faction: Faction,
        collidable: bool,
        destructible: bool,
    },
    Bullet {
        owner: EntityId,
        owner_faction: Faction,
        bullet_type: BulletType,
    },
    Wall {
        material: WallMaterial,
    },
    Base {
        hit_by: Option<EntityId>,
    },
    Water,
    Passive,
}

/// Snapshot of the other party of a collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Contact {
    pub(crate) id: EntityId,
    pub(crate) rect: Rect,
    pub(crate) direction: Direction,
    pub(crate) role: Role,
}

impl Contact {
    fn blocks_tanks(&self) -> bool {
        match self.role {
            Role::Wall { .. } | Role::Base { .. } | Role::Water => true,
            Role::Tank { collidable, .. } => collidable,
            Role::Bullet { .. } | Role::Passive => false,
        }
    }

    fn blocks_normal_bullets(&self) -> bool {
        matches!(
            self.role,
            Role::Wall {
                material: WallMaterial::Steel
            }
        )
    }
}

/// A simulated object with a position, a lifecycle and a body.
#[derive(Debug)]
pub struct Sprite {
    id: EntityId,
    rect: Rect,
    direction: Direction,
    previous_direction: Direction,
    turned: bool,
    speed: i32,
    normal_speed: i32,
    z: i32,
    move_frequency: u32,
    move_timer: u32,
    destroyed: bool,
    visual: Visual,
    pub(crate) body: Body,
}

impl Sprite {
    pub(crate) fn new(id: EntityId, rect: Rect, z: i32, body: Body) -> Self {
        Self {
            id,
            rect,
            direction: Direction::Up,
            previous_direction: Direction::Up,
            turned: false,
            speed: 0,
            normal_speed: 0,
            z,
            move_frequency: 1,
            move_timer: 0,
            destroyed: false,
            visual: Visual::default(),
            body,
        }
    }

    /// Sets the initial heading and speeds.
    pub(crate) fn with_motion(mut self, direction: Direction, speed: i32, normal_speed: i32) -> Self {
        self.direction = direction;
        self.previous_direction = direction;
        self.speed = speed;
        self.normal_speed = normal_speed;
        self
    }

    /// Identifier of the entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Current bounds.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Facing and travel direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Pixels moved per step. Zero when stopped.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }

    /// Speed used when the entity is set moving.
    #[must_use]
    pub const fn normal_speed(&self) -> i32 {
        self.normal_speed
    }

    /// Draw order. Higher values draw on top.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Whether the entity is flagged for teardown on its next update.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Entity-specific state.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Whether the entity currently owns a scene visual.
    #[must_use]
    pub const fn has_visual(&self) -> bool {
        self.visual.is_shown()
    }

    /// Broad category of the entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self.body {
            Body::Tank(_) => EntityKind::Tank,
            Body::Bullet(_) => EntityKind::Bullet,
            Body::Wall(_) => EntityKind::Wall,
            Body::Base(_) => EntityKind::Base,
            Body::Water(_) => EntityKind::Water,
            Body::Trees => EntityKind::Trees,
            Body::PowerUp(_) => EntityKind::PowerUp,
            Body::Points(_) => EntityKind::Points,
            Body::Explosion(_) => EntityKind::Explosion,
        }
    }

    /// Whether the entity takes part in collision reactions.
    #[must_use]
    pub const fn is_collidable(&self) -> bool {
        match &self.body {
            Body::Tank(tank) => tank.is_collidable(),
            Body::Bullet(_) | Body::Wall(_) | Body::Base(_) | Body::Water(_) | Body::PowerUp(_) => {
                true
            }
            Body::Trees | Body::Points(_) | Body::Explosion(_) => false,
        }
    }

    /// Whether a hostile bullet can currently destroy the entity.
    #[must_use]
    pub const fn can_be_destroyed(&self) -> bool {
        match &self.body {
            Body::Tank(tank) => tank.can_be_destroyed(),
            Body::Wall(wall) => !wall.blocks_normal_bullets(),
            Body::Bullet(_) | Body::Base(_) => true,
            Body::Water(_) | Body::Trees | Body::PowerUp(_) | Body::Points(_) | Body::Explosion(_) => {
                false
            }
        }
    }

    /// Whether normal bullets bounce off the entity without damaging it.
    #[must_use]
    pub const fn blocks_normal_bullets(&self) -> bool {
        match &self.body {
            Body::Wall(wall) => wall.blocks_normal_bullets(),
            _ => false,
        }
    }

    /// Tank state, if the entity is a tank.
    #[must_use]
    pub const fn as_tank(&self) -> Option<&Tank> {
        match &self.body {
            Body::Tank(tank) => Some(tank),
            _ => None,
        }
    }

    pub(crate) fn as_tank_mut(&mut self) -> Option<&mut Tank> {
        match &mut self.body {
            Body::Tank(tank) => Some(tank),
            _ => None,
        }
    }

    /// Topics the entity listens to while alive.
    pub(crate) const fn topics(&self) -> &'static [EventKind] {
        match self.body {
            Body::Tank(_) => TANK_TOPICS,
            Body::Bullet(_) => BULLET_TOPICS,
            Body::Wall(_) | Body::Base(_) => TARGET_TOPICS,
            Body::PowerUp(_) => POWER_UP_TOPICS,
            Body::Water(_) | Body::Trees | Body::Points(_) | Body::Explosion(_) => &[],
        }
    }

    /// Flags the entity for teardown. Repeated calls have no further effect.
    pub(crate) fn destroy(&mut self) {
        if !self.destroyed {
            debug!(entity = self.id.get(), kind = ?self.kind(), "flagged for teardown");
        }
        self.destroyed = true;
    }

    /// Points the entity in `direction`, remembering that it turned.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if direction == self.direction {
            return;
        }
        self.previous_direction = self.direction;
        self.direction = direction;
        self.turned = true;
    }

    pub(crate) fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    pub(crate) fn contact(&self) -> Contact {
        let role = match &self.body {
            Body::Tank(tank) => Role::Tank {
                faction: tank.faction(),
                collidable: tank.is_collidable(),
                destructible: tank.can_be_destroyed(),
            },
            Body::Bullet(bullet) => Role::Bullet {
                owner: bullet.owner(),
                owner_faction: bullet.owner_faction(),
                bullet_type: bullet.bullet_type(),
            },
            Body::Wall(wall) => Role::Wall {
                material: wall.material(),
            },
            Body::Base(base) => Role::Base {
                hit_by: base.hit_by(),
            },
            Body::Water(_) => Role::Water,
            Body::Trees | Body::PowerUp(_) | Body::Points(_) | Body::Explosion(_) => Role::Passive,
        };
        Contact {
            id: self.id,
            rect: self.rect,
            direction: self.direction,
            role,
        }
    }

    /// Summary handed to listeners once a tank leaves the field.
    pub(crate) fn tank_summary(&self) -> Option<TankSummary> {
        self.as_tank().map(|tank| TankSummary {
            id: self.id,
            kind: tank.kind(),
            faction: tank.faction(),
            value: tank.value(),
            flashing: tank.is_flashing(),
            rect: self.rect,
        })
    }

    /// Advances along the current direction. Returns `true` when the entity moved.
    pub(crate) fn advance(&mut self) -> bool {
        if let Body::Tank(tank) = &self.body {
            if !tank.can_move() {
                return false;
            }
            if self.turned {
                self.smooth_turn();
            }
        }

        self.move_timer += 1;
        if self.move_timer < self.move_frequency || self.speed == 0 {
            return false;
        }
        self.move_timer = 0;
        match self.direction {
            Direction::Up => self.rect.y -= self.speed,
            Direction::Down => self.rect.y += self.speed,
            Direction::Left => self.rect.x -= self.speed,
            Direction::Right => self.rect.x += self.speed,
        }
        self.turned = false;
        true
    }

    /// Snaps a tank that changed axis onto the tile grid so it fits corridors.
    fn smooth_turn(&mut self) {
        if self.direction.is_vertical() == self.previous_direction.is_vertical() {
            return;
        }
        if self.direction.is_vertical() {
            self.rect.x += grid_offset(self.rect.x + self.rect.width / 2);
        } else {
            self.rect.y += grid_offset(self.rect.y + self.rect.height / 2);
        }
    }

    /// Clamps the leading edge back inside `bounds` along the travel axis.
    pub(crate) fn resolve_out_of_bounds(&mut self, bounds: Rect) {
        match self.direction {
            Direction::Right => self.rect.x = bounds.right() - self.rect.width + 1,
            Direction::Left => self.rect.x = bounds.left(),
            Direction::Up => self.rect.y = bounds.top(),
            Direction::Down => self.rect.y = bounds.bottom() - self.rect.height + 1,
        }
    }

    /// Backs out of `other` along the travel axis, leaving one pixel of clearance.
    fn push_back(&mut self, other: Rect, limit: i32) {
        let delta = match self.direction {
            Direction::Right => self.rect.right() - other.left() + 1,
            Direction::Left => self.rect.left() - other.right() - 1,
            Direction::Up => self.rect.top() - other.bottom() - 1,
            Direction::Down => self.rect.bottom() - other.top() + 1,
        };
        if delta.abs() > limit {
            return;
        }
        if self.direction.is_vertical() {
            self.rect.y -= delta;
        } else {
            self.rect.x -= delta;
        }
    }

    /// Reacts to an event delivered on one of the entity's topics.
    ///
    /// `other` is the opposite party for collisions the entity takes part in.
    pub(crate) fn notify(
        &mut self,
        event: &Event,
        other: Option<&Contact>,
        resolve_limit: i32,
        out: &mut Vec<Command>,
    ) {
        match event {
            Event::Collision { initiator, .. } => {
                if let Some(other) = other {
                    self.collide(*initiator == self.id, other, resolve_limit, out);
                }
            }
            Event::OutOfBounds { sprite, bounds } if *sprite == self.id => {
                if matches!(self.body, Body::Tank(_)) {
                    self.resolve_out_of_bounds(*bounds);
                } else if let Body::Bullet(bullet) = &self.body {
                    if bullet.fired_by_player() {
                        out.push(Command::PlaySound {
                            sound: SoundId::BulletHitSteel,
                        });
                    }
                    self.destroy();
                }
            }
            Event::BulletDestroyed { owner, .. } if *owner == self.id => {
                if let Some(tank) = self.as_tank_mut() {
                    tank.release_bullet();
                }
            }
            Event::EnemyCreated { flashing: true, .. } => {
                if matches!(self.body, Body::PowerUp(_)) {
                    self.destroy();
                }
            }
            _ => {}
        }
    }

    fn collide(&mut self, initiated: bool, other: &Contact, resolve_limit: i32, out: &mut Vec<Command>) {
        let id = self.id;
        let mut doomed = false;
        let mut push_back = false;
        match &mut self.body {
            Body::Tank(tank) => match other.role {
                Role::Bullet {
                    owner,
                    owner_faction,
                    ..
                } => {
                    if owner != id && owner_faction != tank.faction() && tank.can_be_destroyed() {
                        doomed = tank.hit();
                    }
                }
                _ => push_back = initiated && other.blocks_tanks(),
            },
            Body::Bullet(bullet) => match other.role {
                Role::Bullet { owner_faction, .. } => {
                    if !bullet.is_friendly_with(owner_faction) {
                        bullet.set_explode(false);
                        doomed = true;
                    }
                }
                _ if !initiated => {}
                Role::Wall { .. } => {
                    if bullet.fired_by_player() {
                        let sound = if other.blocks_normal_bullets() {
                            SoundId::BulletHitSteel
                        } else {
                            SoundId::BulletHitBrick
                        };
                        out.push(Command::PlaySound { sound });
                    }
                    doomed = true;
                }
                Role::Base { hit_by } => doomed = hit_by.map_or(true, |by| by == id),
                Role::Tank {
                    faction,
                    collidable,
                    destructible,
                } => {
                    let hostile = !bullet.is_friendly_with(faction);
                    if other.id != bullet.owner() && hostile && collidable {
                        bullet.set_explode(destructible);
                        doomed = true;
                    }
                }
                Role::Water | Role::Passive => {}
            },
            Body::Wall(wall) => {
                if let (false, Role::Bullet { bullet_type, .. }) = (initiated, other.role) {
                    doomed = wall.hit(bullet_type, other.direction);
                }
            }
            Body::Base(base) => {
                if let (false, Role::Bullet { .. }) = (initiated, other.role) {
                    if base.strike(other.id) {
                        debug!(base = id.get(), bullet = other.id.get(), "base hit");
                        out.push(Command::Publish {
                            event: Event::BaseHit {
                                base: id,
                                center: self.rect.center(),
                            },
                        });
                    }
                }
            }
            Body::PowerUp(power_up) => {
                let picked = !initiated
                    && matches!(
                        other.role,
                        Role::Tank {
                            faction: Faction::Player,
                            ..
                        }
                    );
                if picked {
                    out.push(Command::Publish {
                        event: Event::PowerUpPick {
                            power_up: id,
                            kind: power_up.kind(),
                            tank: other.id,
                            center: self.rect.center(),
                        },
                    });
                    doomed = true;
                }
            }
            Body::Water(_) | Body::Trees | Body::Points(_) | Body::Explosion(_) => {}
        }

        if push_back {
            self.push_back(other.rect, resolve_limit);
        }
        if doomed {
            self.destroy();
        }
    }

    /// Runs the per-tick hook after movement. May return an event to publish.
    pub(crate) fn animate(&mut self, spawn_grace: u32, scene: &mut dyn SceneGraph) -> Option<Event> {
        let id = self.id;
        let moving = self.speed != 0;
        match &mut self.body {
            Body::Tank(tank) => tank.tick(id, moving, spawn_grace, scene),
            Body::Water(water) => {
                water.update();
                None
            }
            Body::PowerUp(power_up) => {
                power_up.update();
                None
            }
            Body::Points(points) => {
                if points.update() {
                    self.destroy();
                }
                None
            }
            Body::Explosion(explosion) => {
                if explosion.update() {
                    self.destroy();
                }
                None
            }
            Body::Bullet(_) | Body::Wall(_) | Body::Base(_) | Body::Trees => None,
        }
    }

    /// Pushes the current appearance to the scene graph.
    pub(crate) fn sync_visuals(&mut self, stage: &mut Stage<'_>) {
        let (texture, visible) = match &self.body {
            Body::Tank(tank) => (tank.texture_name(self.direction), true),
            Body::Bullet(_) => (Bullet::texture_name(self.direction), true),
            Body::Wall(wall) => (wall.texture_name().to_owned(), true),
            Body::Base(base) => (base.texture_name().to_owned(), true),
            Body::Water(water) => (water.texture_name(), true),
            Body::Trees => ("trees".to_owned(), true),
            Body::PowerUp(power_up) => (power_up.texture_name(), power_up.is_visible()),
            Body::Points(points) => (points.texture_name(), true),
            Body::Explosion(explosion) => (explosion.texture_name(), true),
        };
        self.visual.sync(stage, &texture, self.rect, self.z, visible);

        match &mut self.body {
            Body::Tank(tank) => {
                if let Some((shield, overlay)) = tank.shield_overlay() {
                    overlay.sync(stage, &shield, self.rect, self.z + 1, true);
                }
            }
            Body::Wall(wall) => wall.sync_masks(stage.scene, self.rect, self.z),
            _ => {}
        }
    }

    /// Releases every scene resource the entity owns.
    pub(crate) fn release(&mut self, scene: &mut dyn SceneGraph) {
        self.visual.release(scene);
        match &mut self.body {
            Body::Tank(tank) => tank.release(scene),
            Body::Wall(wall) => wall.release(scene),
            _ => {}
        }
    }

    /// Events announcing the entity's teardown to the rest of the game.
    pub(crate) fn farewell(&self) -> Vec<Event> {
        match &self.body {
            Body::Tank(_) => {
                let Some(tank) = self.tank_summary() else {
                    return Vec::new();
                };
                let mut events = vec![Event::TankDestroyed { tank }];
                match tank.faction {
                    Faction::Player => events.push(Event::TankPlayerDestroyed { tank }),
                    Faction::Enemy => {
                        events.push(Event::TankEnemyDestroyed { tank });
                        if tank.flashing {
                            events.push(Event::TankFlashingDestroyed { tank });
                        }
                    }
                }
                events
            }
            Body::Bullet(bullet) => vec![Event::BulletDestroyed {
                bullet: self.id,
                owner: bullet.owner(),
                explode: bullet.explodes(),
                center: self.rect.center(),
            }],
            Body::PowerUp(_) => vec![Event::PowerUpDestroyed { power_up: self.id }],
            Body::Points(_) => vec![Event::PointsDestroyed { points: self.id }],
            Body::Explosion(explosion) => match (explosion.kind(), explosion.tank()) {
                (ExplosionKind::Tank, Some(tank)) => {
                    vec![Event::TankExplosionDestroyed {
                        explosion: self.id,
                        tank,
                        center: self.rect.center(),
                    }]
                }
                (ExplosionKind::Base, _) => {
                    vec![Event::BaseExplosionDestroyed { explosion: self.id }]
                }
                _ => Vec::new(),
            },
            Body::Wall(_) | Body::Base(_) | Body::Water(_) | Body::Trees => Vec::new(),
        }
    }
}

/// Offset moving a center coordinate onto the nearest grid line, if close enough.
fn grid_offset(center: i32) -> i32 {
    let snapped = (center + TILE_SIZE / 2).div_euclid(TILE_SIZE) * TILE_SIZE;
    let offset = snapped - center;
    if offset.abs() < TURN_TOLERANCE {
        offset
    } else {
        0
    }
}
