//! Bullets in flight.

use tank_arena_core::{BulletType, Direction, EntityId, Faction};

/// Bullet-specific state carried by a bullet entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bullet {
    owner: EntityId,
    owner_faction: Faction,
    bullet_type: BulletType,
    explode: bool,
}

impl Bullet {
    pub(crate) const fn new(owner: EntityId, owner_faction: Faction, bullet_type: BulletType) -> Self {
        Self {
            owner,
            owner_faction,
            bullet_type,
            explode: true,
        }
    }

    /// Tank that fired the bullet.
    #[must_use]
    pub const fn owner(&self) -> EntityId {
        self.owner
    }

    /// Side of the tank that fired the bullet.
    #[must_use]
    pub const fn owner_faction(&self) -> Faction {
        self.owner_faction
    }

    /// Strength of the bullet.
    #[must_use]
    pub const fn bullet_type(&self) -> BulletType {
        self.bullet_type
    }

    /// Whether the bullet leaves an explosion when it ends.
    #[must_use]
    pub const fn explodes(&self) -> bool {
        self.explode
    }

    pub(crate) fn set_explode(&mut self, explode: bool) {
        self.explode = explode;
    }

    pub(crate) const fn fired_by_player(&self) -> bool {
        matches!(self.owner_faction, Faction::Player)
    }

    /// Bullets of two enemy tanks pass through each other.
    pub(crate) const fn is_friendly_with(&self, other: Faction) -> bool {
        matches!(self.owner_faction, Faction::Enemy) && matches!(other, Faction::Enemy)
    }

    pub(crate) fn texture_name(direction: Direction) -> String {
        format!("bullet_{}", direction.name())
    }
}
