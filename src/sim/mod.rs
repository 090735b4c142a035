//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (and only in the optional item spawner)
//! - Stable iteration order (player one before player two, projectiles in spawn order)
//! - No rendering, audio or input-device dependencies

pub mod collision;
pub mod combat;
pub mod geometry;
pub mod physics;
pub mod projectile;
pub mod spawn;
pub mod state;
pub mod status;
pub mod tick;
pub mod weapons;

pub use combat::{apply_damage, can_strike};
pub use geometry::{Platform, Rect, Terrain};
pub use spawn::{ItemSpawner, SpawnEntry, SpawnSchedule};
pub use state::{
    Arena, Character, DamageTint, Facing, GameEvent, Item, ItemKind, MatchPhase, MeleeHitbox,
    PlayerId, Projectile, ProjectileKind,
};
pub use status::ItemEffect;
pub use tick::{PlayerInput, step, tick};
pub use weapons::{Armor, Mitigation, Weapon, WeaponClass, WeaponSpec, mitigate};
