//! Collaborators the simulation talks to without owning their internals.
//!
//! Rendering, texture loading and audio all live outside the kernel. The
//! world receives a [`Services`] bundle at construction and only ever calls
//! through these traits, so a headless run and a windowed run execute exactly
//! the same simulation code.

use std::{
    cell::RefCell,
    collections::hash_map::DefaultHasher,
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

use crate::Rect;

/// Opaque handle to a texture resolved by an [`AssetLookup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(u64);

impl TextureId {
    /// Creates a texture identifier from its raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the raw identifier value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Opaque handle to a visual node owned by a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(u32);

impl VisualHandle {
    /// Creates a visual handle from its raw value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the raw handle value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Sound effects the simulation can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SoundId {
    /// Player bullet striking steel or leaving the arena.
    BulletHitSteel,
    /// Player bullet striking brick.
    BulletHitBrick,
    /// Tank blowing up.
    TankExplosion,
    /// Base blowing up.
    BaseExplosion,
    /// Power-up collected.
    PowerUpPick,
}

impl SoundId {
    /// Asset name of the sound effect.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BulletHitSteel => "bullet_hit_1",
            Self::BulletHitBrick => "bullet_hit_2",
            Self::TankExplosion => "explosion_1",
            Self::BaseExplosion => "explosion_2",
            Self::PowerUpPick => "powerup_pick",
        }
    }
}

/// Retained-mode scene that renders entity visuals.
pub trait SceneGraph {
    /// Creates a visual covering `rect` at depth `z`. A missing texture draws a solid mask.
    fn create_visual(&mut self, rect: Rect, z: i32, texture: Option<TextureId>) -> VisualHandle;

    /// Moves an existing visual.
    fn update_position(&mut self, visual: VisualHandle, rect: Rect);

    /// Swaps the texture shown by an existing visual.
    fn update_texture(&mut self, visual: VisualHandle, texture: TextureId);

    /// Shows or hides an existing visual.
    fn set_visible(&mut self, visual: VisualHandle, visible: bool);

    /// Releases a visual. The handle must not be used afterwards.
    fn remove(&mut self, visual: VisualHandle);
}

/// Resolves texture names to loaded textures.
pub trait AssetLookup {
    /// Returns the texture registered under `name`, or `None` while it is still loading.
    fn texture(&self, name: &str) -> Option<TextureId>;
}

/// Fire-and-forget audio output.
pub trait SoundPlayer {
    /// Starts playing the provided sound effect.
    fn play(&mut self, sound: SoundId);
}

/// Bundle of collaborators handed to the world at construction.
pub struct Services {
    /// Scene graph receiving visual updates.
    pub scene: Box<dyn SceneGraph>,
    /// Texture lookup used when visuals change appearance.
    pub assets: Box<dyn AssetLookup>,
    /// Audio sink for sound effects.
    pub sound: Box<dyn SoundPlayer>,
}

impl Services {
    /// Bundles the provided collaborators.
    #[must_use]
    pub fn new(
        scene: Box<dyn SceneGraph>,
        assets: Box<dyn AssetLookup>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        Self {
            scene,
            assets,
            sound,
        }
    }

    /// Services that render nothing, resolve every texture and stay silent.
    #[must_use]
    pub fn headless() -> Self {
        Self::new(
            Box::<HeadlessScene>::default(),
            Box::new(PreloadedAssets),
            Box::new(SilentSound),
        )
    }

    /// Replaces the sound player, keeping the other collaborators.
    #[must_use]
    pub fn with_sound(mut self, sound: Box<dyn SoundPlayer>) -> Self {
        self.sound = sound;
        self
    }

    /// Replaces the asset lookup, keeping the other collaborators.
    #[must_use]
    pub fn with_assets(mut self, assets: Box<dyn AssetLookup>) -> Self {
        self.assets = assets;
        self
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

/// Scene graph that hands out handles and tracks how many visuals are alive.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u32,
    live: usize,
}

impl HeadlessScene {
    /// Number of visuals created and not yet removed.
    #[must_use]
    pub const fn live_visuals(&self) -> usize {
        self.live
    }
}

impl SceneGraph for HeadlessScene {
    fn create_visual(&mut self, _rect: Rect, _z: i32, _texture: Option<TextureId>) -> VisualHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        self.live += 1;
        VisualHandle::new(self.next_handle)
    }

    fn update_position(&mut self, _visual: VisualHandle, _rect: Rect) {}

    fn update_texture(&mut self, _visual: VisualHandle, _texture: TextureId) {}

    fn set_visible(&mut self, _visual: VisualHandle, _visible: bool) {}

    fn remove(&mut self, _visual: VisualHandle) {
        self.live = self.live.saturating_sub(1);
    }
}

/// Asset lookup that treats every texture as already loaded.
#[derive(Clone, Copy, Debug, Default)]
pub struct PreloadedAssets;

impl AssetLookup for PreloadedAssets {
    fn texture(&self, name: &str) -> Option<TextureId> {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Some(TextureId::new(hasher.finish()))
    }
}

/// Sound player that discards every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSound;

impl SoundPlayer for SilentSound {
    fn play(&mut self, _sound: SoundId) {}
}

/// Sound player that records every request into a shared log.
///
/// Clones share the same log, so a caller can keep one clone for inspection
/// while the world owns another.
#[derive(Clone, Debug, Default)]
pub struct SoundLog {
    played: Rc<RefCell<Vec<SoundId>>>,
}

impl SoundLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sounds played so far, oldest first.
    #[must_use]
    pub fn played(&self) -> Vec<SoundId> {
        self.played.borrow().clone()
    }

    /// Number of times `sound` was played.
    #[must_use]
    pub fn count(&self, sound: SoundId) -> usize {
        self.played.borrow().iter().filter(|played| **played == sound).count()
    }
}

impl SoundPlayer for SoundLog {
    fn play(&mut self, sound: SoundId) {
        self.played.borrow_mut().push(sound);
    }
}
