//! Brick and steel wall tiles with per-side erosion.

use tank_arena_core::{BulletType, Direction, Rect, SceneGraph, VisualHandle, WallMaterial};

/// Which sides of a wall tile have absorbed a normal bullet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HitSides {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

impl HitSides {
    /// Left side hit.
    #[must_use]
    pub const fn left(&self) -> bool {
        self.left
    }

    /// Right side hit.
    #[must_use]
    pub const fn right(&self) -> bool {
        self.right
    }

    /// Top side hit.
    #[must_use]
    pub const fn top(&self) -> bool {
        self.top
    }

    /// Bottom side hit.
    #[must_use]
    pub const fn bottom(&self) -> bool {
        self.bottom
    }

    /// Reports whether no side has been hit yet.
    #[must_use]
    pub const fn is_intact(&self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }

    /// Marks the side struck by a bullet travelling in `direction`.
    /// Returns `true` when that side or its opposite was already marked.
    fn mark(&mut self, direction: Direction) -> bool {
        let (side, opposite) = match direction {
            Direction::Right => (&mut self.left, self.right),
            Direction::Left => (&mut self.right, self.left),
            Direction::Down => (&mut self.top, self.bottom),
            Direction::Up => (&mut self.bottom, self.top),
        };
        let collapse = *side || opposite;
        *side = true;
        collapse
    }
}

/// Wall-specific state carried by a wall entity.
#[derive(Debug)]
pub struct Wall {
    material: WallMaterial,
    sides: HitSides,
    masks: Vec<VisualHandle>,
    masks_stale: bool,
}

impl Wall {
    pub(crate) fn new(material: WallMaterial) -> Self {
        Self {
            material,
            sides: HitSides::default(),
            masks: Vec::new(),
            masks_stale: false,
        }
    }

    /// Construction material.
    #[must_use]
    pub const fn material(&self) -> WallMaterial {
        self.material
    }

    /// Sides eroded so far.
    #[must_use]
    pub const fn sides(&self) -> HitSides {
        self.sides
    }

    /// Whether normal bullets bounce off without damage.
    #[must_use]
    pub const fn blocks_normal_bullets(&self) -> bool {
        matches!(self.material, WallMaterial::Steel)
    }

    /// Applies a bullet impact. Returns `true` when the wall collapses.
    pub(crate) fn hit(&mut self, bullet_type: BulletType, bullet_direction: Direction) -> bool {
        if bullet_type == BulletType::Enhanced {
            return true;
        }
        if self.blocks_normal_bullets() {
            return false;
        }
        self.masks_stale = true;
        self.sides.mark(bullet_direction)
    }

    pub(crate) fn texture_name(&self) -> &'static str {
        match self.material {
            WallMaterial::Brick => "wall_brick",
            WallMaterial::Steel => "wall_steel",
        }
    }

    /// Rebuilds the half-tile masks covering eroded sides.
    pub(crate) fn sync_masks(&mut self, scene: &mut dyn SceneGraph, rect: Rect, z: i32) {
        if !self.masks_stale {
            return;
        }
        self.masks_stale = false;
        self.release(scene);

        let half_width = rect.width / 2;
        let half_height = rect.height / 2;
        let mut regions = Vec::with_capacity(4);
        if self.sides.top {
            regions.push(Rect::new(rect.x, rect.y, rect.width, half_height));
        }
        if self.sides.bottom {
            regions.push(Rect::new(rect.x, rect.y + half_height, rect.width, half_height));
        }
        if self.sides.left {
            regions.push(Rect::new(rect.x, rect.y, half_width, rect.height));
        }
        if self.sides.right {
            regions.push(Rect::new(rect.x + half_width, rect.y, half_width, rect.height));
        }
        self.masks = regions
            .into_iter()
            .map(|region| scene.create_visual(region, z + 1, None))
            .collect();
    }

    #[cfg(test)]
    pub(crate) fn mask_count(&self) -> usize {
        self.masks.len()
    }

    pub(crate) fn release(&mut self, scene: &mut dyn SceneGraph) {
        for handle in self.masks.drain(..) {
            scene.remove(handle);
        }
    }
}
