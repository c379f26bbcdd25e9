use tank_arena_core::{Command, Event, EventKind, Point, Rect, Scenery, TILE_SIZE};
use tank_arena_world::{query, World};
use tracing::{debug, warn};

/// Ends an enemy freeze once its duration has run out.
#[derive(Debug)]
pub struct FreezeTimer {
    duration: u32,
    timer: u32,
    active: bool,
}

impl FreezeTimer {
    /// Topics the timer listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::Freeze];

    /// Creates an idle timer lasting `duration` ticks once started.
    #[must_use]
    pub const fn new(duration: u32) -> Self {
        Self {
            duration,
            timer: 0,
            active: false,
        }
    }

    /// Reports whether a freeze is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Starts the timer, or restarts it when a freeze is already running.
    pub fn handle(&mut self, event: &Event) {
        if let Event::Freeze = event {
            self.active = true;
            self.timer = 0;
        }
    }

    /// Advances the timer, announcing the thaw once the duration has passed.
    pub fn update(&mut self, out: &mut Vec<Command>) {
        if !self.active {
            return;
        }
        self.timer += 1;
        if self.timer > self.duration {
            self.active = false;
            debug!("freeze over");
            out.push(Command::Publish {
                event: Event::Unfreeze,
            });
        }
    }
}

/// Swaps the walls around the base for steel, and back to brick when time runs out.
#[derive(Debug)]
pub struct ShovelTimer {
    duration: u32,
    timer: u32,
    active: bool,
    layout: Vec<Point>,
}

impl ShovelTimer {
    /// Topics the timer listens to.
    pub const SUBSCRIPTIONS: &'static [EventKind] = &[EventKind::ShovelStart];

    /// Creates an idle timer lasting `duration` ticks, with no wall layout yet.
    #[must_use]
    pub const fn new(duration: u32) -> Self {
        Self {
            duration,
            timer: 0,
            active: false,
            layout: Vec::new(),
        }
    }

    /// Sets the wall tiles guarding the base.
    pub fn set_layout(&mut self, layout: Vec<Point>) {
        self.layout = layout;
    }

    /// Reports whether the base walls are steel.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Rebuilds the base walls in steel. Repeated starts while active are ignored.
    pub fn handle(&mut self, event: &Event, world: &World, out: &mut Vec<Command>) {
        if !matches!(event, Event::ShovelStart) || self.active {
            return;
        }
        self.active = true;
        self.timer = 0;
        self.rebuild(Scenery::SteelWall, world, out);
    }

    /// Advances the timer, restoring brick once the duration has passed.
    pub fn update(&mut self, world: &World, out: &mut Vec<Command>) {
        if !self.active {
            return;
        }
        self.timer += 1;
        if self.timer <= self.duration {
            return;
        }
        self.active = false;
        self.rebuild(Scenery::BrickWall, world, out);
        out.push(Command::Publish {
            event: Event::ShovelEnd,
        });
    }

    fn rebuild(&self, scenery: Scenery, world: &World, out: &mut Vec<Command>) {
        if self.layout.is_empty() {
            warn!("shovel timer has no base wall layout");
            return;
        }
        for wall in query::walls(world) {
            if !wall.destroyed && self.layout.contains(&wall.rect.origin()) {
                out.push(Command::DestroySprite { sprite: wall.id });
            }
        }
        for &position in &self.layout {
            out.push(Command::SpawnScenery { scenery, position });
        }
        debug!(?scenery, tiles = self.layout.len(), "base walls rebuilt");
    }
}

/// Wall tiles enclosing `base`, row by row, keeping only those inside `bounds`.
#[must_use]
pub fn base_ring(base: Rect, bounds: Rect) -> Vec<Point> {
    let columns = base.width / TILE_SIZE + 2;
    let rows = base.height / TILE_SIZE + 2;
    let mut ring = Vec::new();
    for row in 0..rows {
        for column in 0..columns {
            let tile = Rect::new(
                base.x + (column - 1) * TILE_SIZE,
                base.y + (row - 1) * TILE_SIZE,
                TILE_SIZE,
                TILE_SIZE,
            );
            if !tile.intersects(&base) && bounds.contains(&tile) {
                ring.push(tile.origin());
            }
        }
    }
    ring
}
