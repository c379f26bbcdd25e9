//! Short-lived entities: power-ups, points labels and explosions.

use tank_arena_core::{ExplosionKind, PointsKind, PowerUpKind, TankSummary};

use crate::animation::{Animation, Blink};

const POWER_UP_BLINK: u32 = 7;
const SMALL_BLAST: &[u8] = &[1, 2, 3];
const SMALL_BLAST_TICKS: u32 = 2;
const BIG_BLAST: &[u8] = &[1, 2, 3, 4, 5, 3];
const BIG_BLAST_TICKS: u32 = 3;

/// Collectible power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PowerUp {
    kind: PowerUpKind,
    blink: Blink,
}

impl PowerUp {
    pub(crate) const fn new(kind: PowerUpKind) -> Self {
        Self {
            kind,
            blink: Blink::new(POWER_UP_BLINK),
        }
    }

    /// Effect granted on pickup.
    #[must_use]
    pub const fn kind(&self) -> PowerUpKind {
        self.kind
    }

    pub(crate) fn update(&mut self) {
        self.blink.update();
    }

    pub(crate) const fn is_visible(&self) -> bool {
        self.blink.is_on()
    }

    pub(crate) fn texture_name(&self) -> String {
        format!("powerup_{}", self.kind.name())
    }
}

/// Floating score label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Points {
    value: u32,
    kind: PointsKind,
    timer: u32,
    duration: u32,
}

impl Points {
    pub(crate) const fn new(value: u32, kind: PointsKind, duration: u32) -> Self {
        Self {
            value,
            kind,
            timer: 0,
            duration,
        }
    }

    /// Score shown.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Why the score was awarded.
    #[must_use]
    pub const fn kind(&self) -> PointsKind {
        self.kind
    }

    /// Advances the lifetime. Returns `true` once it has run out.
    pub(crate) fn update(&mut self) -> bool {
        self.timer += 1;
        self.timer > self.duration
    }

    pub(crate) fn texture_name(&self) -> String {
        format!("points_{}", self.value)
    }
}

/// Explosion animation that removes itself once played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Explosion {
    kind: ExplosionKind,
    animation: Animation,
    tank: Option<TankSummary>,
}

impl Explosion {
    pub(crate) const fn new(kind: ExplosionKind, tank: Option<TankSummary>) -> Self {
        let animation = match kind {
            ExplosionKind::Bullet => Animation::new(SMALL_BLAST, SMALL_BLAST_TICKS, false),
            ExplosionKind::Tank | ExplosionKind::Base => {
                Animation::new(BIG_BLAST, BIG_BLAST_TICKS, false)
            }
        };
        Self {
            kind,
            animation,
            tank,
        }
    }

    /// Explosion flavour.
    #[must_use]
    pub const fn kind(&self) -> ExplosionKind {
        self.kind
    }

    /// Tank whose destruction caused the explosion.
    #[must_use]
    pub const fn tank(&self) -> Option<TankSummary> {
        self.tank
    }

    /// Advances the animation. Returns `true` when it had already finished.
    pub(crate) fn update(&mut self) -> bool {
        if self.animation.is_completed() {
            return true;
        }
        self.animation.update();
        false
    }

    pub(crate) fn texture_name(&self) -> String {
        match self.kind {
            ExplosionKind::Bullet => format!("bullet_explosion_{}", self.animation.frame()),
            ExplosionKind::Tank | ExplosionKind::Base => {
                format!("big_explosion_{}", self.animation.frame())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_expire_after_duration() {
        let mut points = Points::new(200, PointsKind::Tank, 3);
        assert!(!points.update());
        assert!(!points.update());
        assert!(!points.update());
        assert!(points.update());
    }

    #[test]
    fn bullet_explosion_finishes_after_its_frames() {
        let mut explosion = Explosion::new(ExplosionKind::Bullet, None);
        let mut updates = 0;
        while !explosion.update() {
            updates += 1;
        }
        assert_eq!(updates, SMALL_BLAST.len() as u32 * SMALL_BLAST_TICKS);
        assert_eq!(explosion.texture_name(), "bullet_explosion_3");
    }

    #[test]
    fn power_up_blinks() {
        let mut power_up = PowerUp::new(PowerUpKind::Star);
        assert!(power_up.is_visible());
        for _ in 0..POWER_UP_BLINK {
            power_up.update();
        }
        assert!(!power_up.is_visible());
        assert_eq!(power_up.texture_name(), "powerup_star");
    }
}
