//! Static map features other than walls.

use tank_arena_core::EntityId;

use crate::animation::Animation;

const WATER_FRAMES: &[u8] = &[1, 2];
const WATER_FRAME_TICKS: u32 = 30;

/// The base the player defends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Base {
    hit_by: Option<EntityId>,
}

impl Base {
    /// Whether a bullet has struck the base.
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        self.hit_by.is_some()
    }

    /// Bullet that struck the base, if any.
    #[must_use]
    pub const fn hit_by(&self) -> Option<EntityId> {
        self.hit_by
    }

    /// Records the first bullet to strike the base. Returns `false` if it was already hit.
    pub(crate) fn strike(&mut self, bullet: EntityId) -> bool {
        if self.hit_by.is_some() {
            return false;
        }
        self.hit_by = Some(bullet);
        true
    }

    pub(crate) const fn texture_name(&self) -> &'static str {
        if self.hit_by.is_some() {
            "base_destroyed"
        } else {
            "base"
        }
    }
}

/// Animated water tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Water {
    animation: Animation,
}

impl Water {
    pub(crate) const fn new() -> Self {
        Self {
            animation: Animation::new(WATER_FRAMES, WATER_FRAME_TICKS, true),
        }
    }

    pub(crate) fn update(&mut self) {
        self.animation.update();
    }

    pub(crate) fn texture_name(&self) -> String {
        format!("water_{}", self.animation.frame())
    }
}
