//! Projectile motion and collision
//!
//! Each [`ProjectileKind`] maps to a [`MotionProfile`]; the stepping code reads
//! the profile instead of branching on the kind.

use super::collision::touches_any;
use super::combat::{apply_damage, can_strike};
use super::state::{Arena, Projectile, ProjectileKind, split_pair};
use crate::consts::*;

/// Movement-and-collision policy for a projectile kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Falls under gravity
    pub gravity: bool,
    /// Reflects off the left and right world edges
    pub bounces_off_walls: bool,
    /// Disappears on touching any platform
    pub stopped_by_platforms: bool,
    /// How far past a horizontal edge it may travel before being culled
    pub cull_margin: f32,
}

const BULLET_PROFILE: MotionProfile = MotionProfile {
    gravity: false,
    bounces_off_walls: false,
    stopped_by_platforms: false,
    cull_margin: BULLET_CULL_MARGIN,
};

const BALL_PROFILE: MotionProfile = MotionProfile {
    gravity: true,
    bounces_off_walls: true,
    stopped_by_platforms: true,
    cull_margin: BALL_CULL_MARGIN,
};

impl ProjectileKind {
    pub fn profile(self) -> &'static MotionProfile {
        match self {
            ProjectileKind::Bullet => &BULLET_PROFILE,
            ProjectileKind::ThrownBall => &BALL_PROFILE,
        }
    }
}

/// Move a projectile one step and cull it if it left the world
pub fn step_projectile(proj: &mut Projectile, world_width: f32) {
    if !proj.active {
        return;
    }
    let profile = proj.kind.profile();

    if profile.gravity {
        proj.vel.y += GRAVITY;
    }
    proj.pos += proj.vel;

    if profile.bounces_off_walls {
        let right_limit = world_width - BALL_WALL_MARGIN - proj.size.x;
        if proj.pos.x < BALL_WALL_MARGIN && proj.vel.x < 0.0 {
            proj.vel.x = -proj.vel.x;
            proj.pos.x = BALL_WALL_MARGIN;
        } else if proj.pos.x > right_limit && proj.vel.x > 0.0 {
            proj.vel.x = -proj.vel.x;
            proj.pos.x = right_limit;
        }
    }

    let margin = profile.cull_margin;
    if proj.pos.y > FALL_OUT_Y || proj.pos.x < -margin || proj.pos.x > world_width + margin {
        proj.active = false;
    }
}

/// Projectile phase: move everything, resolve hits, then drop dead projectiles
pub fn advance_projectiles(arena: &mut Arena) {
    let Arena {
        world_width,
        platforms,
        characters,
        projectiles,
        events,
        ..
    } = arena;

    for proj in projectiles.iter_mut() {
        step_projectile(proj, *world_width);
        if !proj.active {
            continue;
        }

        let (owner, target) = split_pair(characters, proj.owner);
        if proj.rect().intersects(&target.body()) && can_strike(owner, target) {
            apply_damage(target, proj.weapon, events);
            proj.active = false;
            continue;
        }

        if proj.kind.profile().stopped_by_platforms && touches_any(platforms, &proj.rect()) {
            proj.active = false;
        }
    }

    projectiles.retain(|p| p.active);
}
