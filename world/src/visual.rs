//! Bridges entity appearance to the scene graph.
//!
//! An entity states which texture it wants each tick; the visual only talks
//! to the scene graph when something changed. Textures that are not loaded
//! yet are retried on a fixed tick backoff instead of failing.

use tank_arena_core::{AssetLookup, Rect, SceneGraph, VisualHandle};
use tracing::trace;

#[derive(Debug, Default)]
pub(crate) struct Visual {
    handle: Option<VisualHandle>,
    wanted: Option<String>,
    shown: Option<String>,
    retry_in: u32,
    placed: Option<Rect>,
    visible: bool,
}

/// Scene collaborators needed to refresh a visual.
pub(crate) struct Stage<'a> {
    pub(crate) scene: &'a mut dyn SceneGraph,
    pub(crate) assets: &'a dyn AssetLookup,
    pub(crate) retry_ticks: u32,
}

impl Visual {
    /// Brings the scene node in line with `texture`, `rect` and `visible`.
    pub(crate) fn sync(&mut self, stage: &mut Stage<'_>, texture: &str, rect: Rect, z: i32, visible: bool) {
        if self.wanted.as_deref() != Some(texture) {
            self.wanted = Some(texture.to_owned());
            self.retry_in = 0;
        }

        if self.shown != self.wanted {
            if self.retry_in > 0 {
                self.retry_in -= 1;
            } else {
                match stage.assets.texture(texture) {
                    Some(id) => {
                        match self.handle {
                            Some(handle) => stage.scene.update_texture(handle, id),
                            None => {
                                self.handle = Some(stage.scene.create_visual(rect, z, Some(id)));
                                self.placed = Some(rect);
                                self.visible = true;
                            }
                        }
                        self.shown = self.wanted.clone();
                    }
                    None => {
                        trace!(texture, "texture not loaded yet, retrying later");
                        self.retry_in = stage.retry_ticks;
                    }
                }
            }
        }

        let Some(handle) = self.handle else {
            return;
        };
        if self.placed != Some(rect) {
            stage.scene.update_position(handle, rect);
            self.placed = Some(rect);
        }
        if self.visible != visible {
            stage.scene.set_visible(handle, visible);
            self.visible = visible;
        }
    }

    pub(crate) fn release(&mut self, scene: &mut dyn SceneGraph) {
        if let Some(handle) = self.handle.take() {
            scene.remove(handle);
        }
        self.shown = None;
        self.placed = None;
    }

    pub(crate) const fn is_shown(&self) -> bool {
        self.handle.is_some()
    }
}
