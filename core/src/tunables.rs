//! Tick-based tuning knobs and stage descriptors.
//!
//! Every duration is a number of simulation ticks. All structures deserialize
//! with per-field defaults so configuration files only need to mention the
//! values they override.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TankKind;

/// Parameters governing enemy AI cadence and decision weights.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTunables {
    /// Ticks between shoot rolls.
    pub shoot_interval: u32,
    /// Probability that a shoot roll fires.
    pub shoot_probability: f64,
    /// Ticks between steering rolls.
    pub direction_interval: u32,
    /// Probability that a steering roll picks a new direction.
    pub direction_probability: f64,
    /// Below this roll the controller wanders instead of heading for the base.
    pub wander_threshold: f64,
    /// Seed mixed with each tank identifier to seed its controller.
    pub seed: u64,
}

impl Default for AiTunables {
    fn default() -> Self {
        Self {
            shoot_interval: 15,
            shoot_probability: 0.7,
            direction_interval: 20,
            direction_probability: 0.6,
            wander_threshold: 0.4,
            seed: 0x7a2e_5c41_9b0d_33f1,
        }
    }
}

/// Parameters governing the enemy spawner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerTunables {
    /// Ticks between spawns.
    pub interval: u32,
    /// Maximum number of enemies alive at once.
    pub count_limit: u32,
    /// One-based spawn ordinals that produce power-up carrying enemies.
    pub flashing_ordinals: Vec<u32>,
}

impl Default for SpawnerTunables {
    fn default() -> Self {
        Self {
            interval: 150,
            count_limit: 4,
            flashing_ordinals: vec![4, 11, 18],
        }
    }
}

/// Complete set of simulation tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Enemy AI settings.
    pub ai: AiTunables,
    /// Enemy spawner settings.
    pub spawner: SpawnerTunables,
    /// Shield duration granted by the helmet power-up.
    pub helmet_ticks: u32,
    /// Shield duration granted to a freshly spawned player tank.
    pub spawn_grace_ticks: u32,
    /// Duration of the timer power-up freeze.
    pub freeze_ticks: u32,
    /// Duration of the shovel power-up steel ring.
    pub shovel_ticks: u32,
    /// Lifetime of a floating points label.
    pub points_ticks: u32,
    /// Score granted for collecting a power-up.
    pub power_up_points: u32,
    /// Seed for power-up kind and placement rolls.
    pub power_up_seed: u64,
    /// Largest push-back a tank accepts when resolving an overlap.
    pub collision_resolve_limit: i32,
    /// Spare lives the player starts with.
    pub player_lives: u32,
    /// Ticks to wait before retrying a texture that was not loaded yet.
    pub texture_retry_ticks: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            ai: AiTunables::default(),
            spawner: SpawnerTunables::default(),
            helmet_ticks: 345,
            spawn_grace_ticks: 150,
            freeze_ticks: 300,
            shovel_ticks: 300,
            points_ticks: 20,
            power_up_points: 500,
            power_up_seed: 0x3c6e_f372_fe94_f82b,
            collision_resolve_limit: 10,
            player_lives: 2,
            texture_retry_ticks: 5,
        }
    }
}

/// Errors raised when a stage descriptor cannot be played.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    /// The stage lists no enemies, so it could never be cleared.
    #[error("stage declares no enemy tanks")]
    NoEnemies,
    /// The roster contains the player tank kind.
    #[error("enemy roster entry {index} uses the player tank kind")]
    PlayerInRoster {
        /// Zero-based roster position of the offending entry.
        index: usize,
    },
}

/// Static description of a playable stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageDescriptor {
    /// Map string of `Kind(column,row)` items separated by `;`.
    pub map: String,
    /// Enemy tank kinds in spawn order.
    pub enemies: Vec<TankKind>,
}

impl StageDescriptor {
    /// Checks that the stage can be played.
    pub fn validate(&self) -> Result<(), StageError> {
        if self.enemies.is_empty() {
            return Err(StageError::NoEnemies);
        }
        if let Some(index) = self
            .enemies
            .iter()
            .position(|kind| *kind == TankKind::Player)
        {
            return Err(StageError::PlayerInRoster { index });
        }
        Ok(())
    }
}

impl Default for StageDescriptor {
    fn default() -> Self {
        let mut map = String::from(
            "BrickWall(11,23);BrickWall(12,23);BrickWall(13,23);BrickWall(14,23);\
             BrickWall(11,24);BrickWall(14,24);BrickWall(11,25);BrickWall(14,25);\
             Base(12,24);",
        );
        for row in 4..10 {
            for column in [4, 5, 20, 21] {
                map.push_str(&format!("BrickWall({column},{row});"));
            }
        }
        map.push_str("SteelWall(12,12);SteelWall(13,12);SteelWall(12,13);SteelWall(13,13);");
        map.push_str("Water(4,14);Water(20,14);Trees(8,16);Trees(16,16)");

        let mut enemies = Vec::with_capacity(20);
        enemies.extend([TankKind::Basic; 10]);
        enemies.extend([TankKind::Fast; 5]);
        enemies.extend([TankKind::Power; 3]);
        enemies.extend([TankKind::Armor; 2]);

        Self { map, enemies }
    }
}
