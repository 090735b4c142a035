//! Gravity, platform landing and horizontal movement
//!
//! Velocities are in units per fixed step. Characters, items and thrown balls
//! all share the same gravity constant.

use super::collision::{blocked_sideways, find_landing, terrain_underfoot};
use super::geometry::{Platform, Rect};
use super::state::{Character, GameEvent, Item};
use crate::consts::*;

/// Advance a character's vertical motion by one step
///
/// Returns true if the character fell out of the world and was respawned.
pub fn apply_gravity(character: &mut Character, platforms: &[Platform]) -> bool {
    character.vel_y += GRAVITY;
    let body = character.body();

    if let Some(platform) = find_landing(platforms, &body, character.vel_y, LANDING_TOLERANCE) {
        character.pos.y = platform.top() - character.size.y;
        character.vel_y = 0.0;
        character.grounded = true;
        character.double_jump_available = true;
        return false;
    }

    character.pos.y += character.vel_y;
    character.grounded = false;

    if character.pos.y > FALL_OUT_Y {
        log::debug!("{:?} fell out of the world, respawning", character.id);
        character.pos.x = RESPAWN_X;
        character.pos.y = RESPAWN_Y;
        character.vel_y = 0.0;
        return true;
    }
    false
}

/// Apply the character's move intent for one step
///
/// The move is rejected outright if it would push into the side of a platform.
pub fn move_horizontal(character: &mut Character, platforms: &[Platform]) {
    if character.move_intent == 0 || character.crouching {
        return;
    }
    let new_x = character.pos.x + f32::from(character.move_intent) * character.move_speed;
    let candidate = Rect::new(new_x, character.pos.y, character.size.x, character.size.y);
    if !blocked_sideways(platforms, &candidate) {
        character.pos.x = new_x;
    }
}

/// Try to jump. Grounded characters jump freely; airborne ones get one extra.
pub fn jump(character: &mut Character) -> bool {
    if character.crouching {
        return false;
    }
    if character.grounded {
        character.grounded = false;
    } else if character.double_jump_available {
        character.double_jump_available = false;
    } else {
        return false;
    }
    character.vel_y = JUMP_VELOCITY;
    true
}

/// Refresh terrain flags and the speed they imply
pub fn update_terrain(character: &mut Character, platforms: &[Platform]) {
    let (grass, ice) = terrain_underfoot(platforms, &character.body());
    character.on_grass = grass;
    character.on_ice = ice;
    character.refresh_move_speed();
}

/// Let a falling item drop until it settles on a platform or the floor
pub fn settle_item(item: &mut Item, platforms: &[Platform]) {
    if item.grounded {
        return;
    }
    item.vel_y += GRAVITY;
    let rect = item.rect();

    if let Some(platform) = find_landing(platforms, &rect, item.vel_y, ITEM_LANDING_TOLERANCE) {
        item.pos.y = platform.top() - rect.height;
        item.vel_y = 0.0;
        item.grounded = true;
        return;
    }

    item.pos.y += item.vel_y;
    if item.pos.y > FALL_OUT_Y {
        item.pos.y = FALL_OUT_Y - rect.height;
        item.vel_y = 0.0;
        item.grounded = true;
    }
}

/// Physics phase: move every character and item
pub fn integrate(
    characters: &mut [Character; 2],
    items: &mut [Item],
    platforms: &[Platform],
    events: &mut Vec<GameEvent>,
) {
    for character in characters.iter_mut() {
        move_horizontal(character, platforms);
        if apply_gravity(character, platforms) {
            events.push(GameEvent::Respawned {
                player: character.id,
            });
        }
        update_terrain(character, platforms);
    }
    for item in items.iter_mut() {
        settle_item(item, platforms);
    }
}
