//! Overlap and bounds checks run whenever an entity moves.

use tank_arena_core::{EntityId, Event};
use tracing::trace;

use crate::{publish, Reactor, Sprite, World};

/// Reports every live entity overlapping `mover`, then whether `mover` left the arena.
///
/// Entities already flagged for teardown when the move happened take no part:
/// a flagged mover reports no contacts and flagged candidates are skipped. The
/// mover's rectangle is re-read for every candidate, so a push-back made by an
/// earlier collision reaction is honoured by the remaining checks.
pub(crate) fn detect(world: &mut World, mover: EntityId, systems: &mut dyn Reactor) {
    let flagged = |world: &World, id: EntityId| {
        world.sprites.get(&id).map_or(true, Sprite::is_destroyed)
    };
    let view: &World = world;
    let candidates: Vec<EntityId> = if flagged(view, mover) {
        trace!(entity = mover.get(), "flagged mover reports no contacts");
        Vec::new()
    } else {
        view.registry
            .snapshot()
            .into_iter()
            .filter(|other| *other != mover && !flagged(view, *other))
            .collect()
    };
    for other in candidates {
        let (Some(moving), Some(candidate)) = (world.sprites.get(&mover), world.sprites.get(&other))
        else {
            continue;
        };
        if moving.rect().intersects(&candidate.rect()) {
            trace!(initiator = mover.get(), sprite = other.get(), "collision");
            publish(
                world,
                Event::Collision {
                    initiator: mover,
                    sprite: other,
                },
                systems,
            );
        }
    }

    let Some(moving) = world.sprites.get(&mover) else {
        return;
    };
    if !world.bounds.contains(&moving.rect()) {
        let bounds = world.bounds;
        publish(
            world,
            Event::OutOfBounds {
                sprite: mover,
                bounds,
            },
            systems,
        );
    }
}
