//! Tank data and the Appearing / Normal / Invincible state machine.

use tank_arena_core::{
    BulletType, Direction, EntityId, Event, Faction, SceneGraph, TankKind, BULLET_SIZE,
    BULLET_SPEED_FAST, BULLET_SPEED_NORMAL, MAX_UPGRADE_LEVEL,
};
use tracing::debug;

use crate::{
    animation::{Animation, Blink},
    visual::Visual,
};

const APPEAR_FRAMES: &[u8] = &[1, 2, 3, 4, 3, 2, 1, 2, 3, 4, 3, 2, 1];
const APPEAR_FRAME_TICKS: u32 = 3;
const TRACK_FRAMES: &[u8] = &[1, 2];
const TRACK_FRAME_TICKS: u32 = 2;
const SHIELD_FRAMES: &[u8] = &[1, 2];
const SHIELD_FRAME_TICKS: u32 = 2;
const FLASH_PERIOD: u32 = 7;

/// Observable phase of a tank's behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TankStateKind {
    /// Materialising: cannot move, shoot, collide or be destroyed.
    Appearing,
    /// Fully active.
    Normal,
    /// Active but immune to bullets.
    Invincible,
}

#[derive(Debug)]
pub(crate) enum TankState {
    Appearing {
        animation: Animation,
    },
    Normal,
    Invincible {
        shield: Animation,
        timer: u32,
        duration: u32,
        overlay: Visual,
    },
}

impl TankState {
    fn appearing() -> Self {
        Self::Appearing {
            animation: Animation::new(APPEAR_FRAMES, APPEAR_FRAME_TICKS, false),
        }
    }

    fn invincible(duration: u32) -> Self {
        Self::Invincible {
            shield: Animation::new(SHIELD_FRAMES, SHIELD_FRAME_TICKS, true),
            timer: 0,
            duration,
            overlay: Visual::default(),
        }
    }

    const fn kind(&self) -> TankStateKind {
        match self {
            Self::Appearing { .. } => TankStateKind::Appearing,
            Self::Normal => TankStateKind::Normal,
            Self::Invincible { .. } => TankStateKind::Invincible,
        }
    }

    const fn is_active(&self) -> bool {
        !matches!(self, Self::Appearing { .. })
    }
}

/// Per-kind starting attributes.
struct Profile {
    normal_speed: i32,
    value: u32,
    hit_limit: u32,
    bullet_speed: i32,
}

const fn profile(kind: TankKind) -> Profile {
    match kind {
        TankKind::Player => Profile {
            normal_speed: 2,
            value: 0,
            hit_limit: 1,
            bullet_speed: BULLET_SPEED_NORMAL,
        },
        TankKind::Basic => Profile {
            normal_speed: 2,
            value: 100,
            hit_limit: 1,
            bullet_speed: BULLET_SPEED_NORMAL,
        },
        TankKind::Fast => Profile {
            normal_speed: 3,
            value: 200,
            hit_limit: 1,
            bullet_speed: BULLET_SPEED_NORMAL,
        },
        TankKind::Power => Profile {
            normal_speed: 2,
            value: 300,
            hit_limit: 1,
            bullet_speed: BULLET_SPEED_FAST,
        },
        TankKind::Armor => Profile {
            normal_speed: 2,
            value: 400,
            hit_limit: 4,
            bullet_speed: BULLET_SPEED_NORMAL,
        },
    }
}

/// Tank-specific state carried by a tank entity.
#[derive(Debug)]
pub struct Tank {
    kind: TankKind,
    hit_count: u32,
    hit_limit: u32,
    bullets_limit: u32,
    bullets_in_flight: u32,
    bullet_speed: i32,
    bullet_type: BulletType,
    upgrade_level: u8,
    value: u32,
    flashing: bool,
    flash: Blink,
    track: Animation,
    pub(crate) state: TankState,
}

impl Tank {
    pub(crate) fn new(kind: TankKind, flashing: bool, appearing: bool) -> Self {
        let profile = profile(kind);
        Self {
            kind,
            hit_count: 0,
            hit_limit: profile.hit_limit,
            bullets_limit: 1,
            bullets_in_flight: 0,
            bullet_speed: profile.bullet_speed,
            bullet_type: BulletType::Normal,
            upgrade_level: 0,
            value: profile.value,
            flashing,
            flash: Blink::new(FLASH_PERIOD),
            track: Animation::new(TRACK_FRAMES, TRACK_FRAME_TICKS, true),
            state: if appearing {
                TankState::appearing()
            } else {
                TankState::Normal
            },
        }
    }

    pub(crate) const fn normal_speed(kind: TankKind) -> i32 {
        profile(kind).normal_speed
    }

    /// Tank model.
    #[must_use]
    pub const fn kind(&self) -> TankKind {
        self.kind
    }

    /// Side the tank fights for.
    #[must_use]
    pub const fn faction(&self) -> Faction {
        self.kind.faction()
    }

    /// Current behaviour phase.
    #[must_use]
    pub const fn state(&self) -> TankStateKind {
        self.state.kind()
    }

    /// Bullets absorbed so far.
    #[must_use]
    pub const fn hit_count(&self) -> u32 {
        self.hit_count
    }

    /// Bullets needed to destroy the tank.
    #[must_use]
    pub const fn hit_limit(&self) -> u32 {
        self.hit_limit
    }

    /// Bullets the tank may have in flight at once.
    #[must_use]
    pub const fn bullets_limit(&self) -> u32 {
        self.bullets_limit
    }

    /// Bullets currently in flight.
    #[must_use]
    pub const fn bullets_in_flight(&self) -> u32 {
        self.bullets_in_flight
    }

    /// Speed given to bullets fired by the tank.
    #[must_use]
    pub const fn bullet_speed(&self) -> i32 {
        self.bullet_speed
    }

    /// Side length of bullets fired by the tank.
    #[must_use]
    pub const fn bullet_size(&self) -> i32 {
        BULLET_SIZE
    }

    /// Strength of bullets fired by the tank.
    #[must_use]
    pub const fn bullet_type(&self) -> BulletType {
        self.bullet_type
    }

    /// Upgrade level between 0 and 3.
    #[must_use]
    pub const fn upgrade_level(&self) -> u8 {
        self.upgrade_level
    }

    /// Score awarded for destroying the tank.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Whether the tank carries a power-up.
    #[must_use]
    pub const fn is_flashing(&self) -> bool {
        self.flashing
    }

    /// Whether the tank can take part in collisions.
    #[must_use]
    pub const fn is_collidable(&self) -> bool {
        self.state.is_active()
    }

    /// Whether a bullet hit would count against the tank.
    #[must_use]
    pub const fn can_be_destroyed(&self) -> bool {
        matches!(self.state, TankState::Normal)
    }

    /// Whether the tank may move.
    #[must_use]
    pub const fn can_move(&self) -> bool {
        self.state.is_active()
    }

    /// Whether the tank may fire.
    #[must_use]
    pub const fn can_shoot(&self) -> bool {
        self.state.is_active()
    }

    pub(crate) fn forfeit_value(&mut self) {
        self.value = 0;
    }

    /// Registers a bullet hit. Returns `true` once the hit limit is reached.
    pub(crate) fn hit(&mut self) -> bool {
        self.hit_count += 1;
        self.hit_count >= self.hit_limit
    }

    /// Reserves a bullet slot. Returns `false` when the tank may not fire now.
    pub(crate) fn reserve_bullet(&mut self) -> bool {
        if !self.can_shoot() || self.bullets_in_flight >= self.bullets_limit {
            return false;
        }
        self.bullets_in_flight += 1;
        true
    }

    pub(crate) fn release_bullet(&mut self) {
        self.bullets_in_flight = self.bullets_in_flight.saturating_sub(1);
    }

    /// Raises the upgrade level, saturating at the maximum.
    pub(crate) fn upgrade(&mut self) {
        if self.upgrade_level >= MAX_UPGRADE_LEVEL {
            return;
        }
        self.upgrade_level += 1;
        match self.upgrade_level {
            1 => self.bullet_speed = BULLET_SPEED_FAST,
            2 => self.bullets_limit = 2,
            _ => self.bullet_type = BulletType::Enhanced,
        }
    }

    /// Enters or refreshes the invincible state. Appearing tanks are unaffected.
    pub(crate) fn shield(&mut self, duration: u32, scene: &mut dyn SceneGraph) -> bool {
        if !self.state.is_active() {
            return false;
        }
        self.transition(TankState::invincible(duration), scene);
        true
    }

    /// Swaps the state, releasing whatever the previous state owned.
    pub(crate) fn transition(&mut self, next: TankState, scene: &mut dyn SceneGraph) {
        debug!(from = ?self.state.kind(), to = ?next.kind(), "tank state transition");
        let previous = std::mem::replace(&mut self.state, next);
        if let TankState::Invincible { mut overlay, .. } = previous {
            overlay.release(scene);
        }
    }

    /// Advances animations and timers by one tick.
    pub(crate) fn tick(
        &mut self,
        id: EntityId,
        moving: bool,
        spawn_grace: u32,
        scene: &mut dyn SceneGraph,
    ) -> Option<Event> {
        if self.state.is_active() {
            if moving {
                self.track.update();
            }
            if self.flashing && self.hit_count == 0 {
                self.flash.update();
            }
        }

        match &mut self.state {
            TankState::Appearing { animation } => {
                animation.update();
                if !animation.is_completed() {
                    return None;
                }
                let next = match self.kind.faction() {
                    Faction::Player => TankState::invincible(spawn_grace),
                    Faction::Enemy => TankState::Normal,
                };
                self.transition(next, scene);
                Some(Event::TankAppearingEnd { tank: id })
            }
            TankState::Normal => None,
            TankState::Invincible {
                shield,
                timer,
                duration,
                ..
            } => {
                shield.update();
                *timer += 1;
                if *timer <= *duration {
                    return None;
                }
                self.transition(TankState::Normal, scene);
                Some(Event::TankInvincibleEnd { tank: id })
            }
        }
    }

    pub(crate) fn texture_name(&self, direction: Direction) -> String {
        if let TankState::Appearing { animation } = &self.state {
            return format!("appear_{}", animation.frame());
        }
        let mut name = format!(
            "tank_{}_{}_c0_t{}",
            self.kind.name(),
            direction.name(),
            self.track.frame()
        );
        if self.flashing && self.flash.is_on() && self.hit_count == 0 {
            name.push_str("_f");
        }
        if self.kind == TankKind::Player && self.upgrade_level > 0 {
            name.push_str(&format!("_s{}", self.upgrade_level));
        }
        name
    }

    /// Shield overlay texture and visual, while invincible.
    pub(crate) fn shield_overlay(&mut self) -> Option<(String, &mut Visual)> {
        match &mut self.state {
            TankState::Invincible {
                shield, overlay, ..
            } => Some((format!("shield_{}", shield.frame()), overlay)),
            TankState::Appearing { .. } | TankState::Normal => None,
        }
    }

    /// Whether a shield overlay is currently present in the scene.
    #[must_use]
    pub fn has_shield_overlay(&self) -> bool {
        match &self.state {
            TankState::Invincible { overlay, .. } => overlay.is_shown(),
            TankState::Appearing { .. } | TankState::Normal => false,
        }
    }

    pub(crate) fn release(&mut self, scene: &mut dyn SceneGraph) {
        self.transition(TankState::Normal, scene);
    }
}
