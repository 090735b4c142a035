//! Duel Arena - simulation core for a two-player side-view brawler
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics, combat, projectiles, items, status)
//! - `config`: Arena layout and tunables, loadable from JSON
//!
//! Rendering, input mapping, asset loading and menu screens live outside this
//! crate. Hosts drive the simulation through [`sim::Arena`] and consume
//! [`sim::GameEvent`]s.

pub mod config;
pub mod sim;

pub use config::{MatchConfig, Preset};

/// Simulation constants
pub mod consts {
    /// Fixed simulation step in milliseconds (~60 Hz)
    pub const SIM_STEP_MS: f32 = 16.0;
    /// Maximum substeps per host tick to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World bounds
    pub const WORLD_WIDTH: f32 = 1200.0;
    /// Anything below this y has fallen out of the world
    pub const FALL_OUT_Y: f32 = 800.0;
    /// Where fallen characters reappear
    pub const RESPAWN_X: f32 = 600.0;
    pub const RESPAWN_Y: f32 = 100.0;

    /// Vertical motion, units per tick
    pub const GRAVITY: f32 = 1.0;
    pub const JUMP_VELOCITY: f32 = -21.0;
    /// How far a falling bottom edge may sit below a platform top and still land
    pub const LANDING_TOLERANCE: f32 = 5.0;
    pub const ITEM_LANDING_TOLERANCE: f32 = 10.0;

    /// Character defaults
    pub const MAX_HEALTH: i32 = 100;
    pub const CHARACTER_WIDTH: f32 = 60.0;
    pub const CHARACTER_HEIGHT: f32 = 90.0;
    pub const BASE_MOVE_SPEED: f32 = 4.0;

    /// Terrain and buff speed multipliers
    pub const ICE_SPEED_MULTIPLIER: f32 = 1.5;
    pub const ICE_ADRENALINE_SPEED_MULTIPLIER: f32 = 2.0;
    pub const ADRENALINE_SPEED_MULTIPLIER: f32 = 1.5;

    /// Timed status windows (ms)
    pub const INVINCIBILITY_MS: f32 = 300.0;
    pub const ADRENALINE_DURATION_MS: f32 = 10_000.0;
    pub const ADRENALINE_PULSE_MS: f32 = 250.0;
    pub const ADRENALINE_PULSE_HEAL: i32 = 1;

    /// Bullets fly flat at this speed and vanish this far past an edge
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BULLET_CULL_MARGIN: f32 = 50.0;

    /// Thrown ball
    pub const BALL_SIZE: f32 = 60.0;
    pub const BALL_LAUNCH_SPEED_X: f32 = 10.0;
    pub const BALL_LAUNCH_SPEED_Y: f32 = -15.0;
    pub const BALL_WALL_MARGIN: f32 = 5.0;
    pub const BALL_CULL_MARGIN: f32 = 100.0;

    /// Items
    pub const ITEM_SIZE: f32 = 40.0;
    pub const ITEM_SPAWN_Y: f32 = 0.0;
    /// Pickup point sits this far above the character's feet
    pub const PICKUP_FOOT_OFFSET: f32 = 10.0;
    pub const BANDAGE_HEAL: i32 = 20;
    pub const VEST_MAX_DURABILITY: i32 = 100;
}
