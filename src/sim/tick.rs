//! Fixed timestep simulation tick
//!
//! Host time is banked in the arena and spent in fixed steps. Each step runs the
//! phases in a fixed order:
//!
//! 1. physics (movement, gravity, landing, terrain, falling items)
//! 2. melee hits
//! 3. projectiles
//! 4. timers, then pickups
//! 5. win check

use super::combat::{attack, resolve_melee};
use super::physics::{integrate, jump};
use super::projectile::advance_projectiles;
use super::state::{Arena, Facing, GameEvent, MatchPhase, PlayerId};
use super::status::{advance_status, resolve_pickups};
use crate::consts::*;

/// One frame of input for a single character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// -1, 0 or 1
    pub move_dir: i8,
    pub crouch: bool,
    /// One-shot
    pub jump: bool,
    /// One-shot
    pub attack: bool,
}

/// Advance the arena by `dt_ms` of host time. Returns the number of fixed steps run.
///
/// At most [`MAX_SUBSTEPS`] run per call; time beyond that is dropped. A finished
/// match runs nothing.
pub fn tick(arena: &mut Arena, dt_ms: f32) -> u32 {
    if arena.is_over() || dt_ms.is_nan() || dt_ms <= 0.0 {
        return 0;
    }
    arena.accumulator_ms += dt_ms;

    let mut substeps = 0;
    while arena.accumulator_ms >= SIM_STEP_MS && substeps < MAX_SUBSTEPS {
        step(arena);
        arena.accumulator_ms -= SIM_STEP_MS;
        substeps += 1;
    }
    if arena.accumulator_ms >= SIM_STEP_MS {
        log::debug!("Dropping {:.1}ms of backlog", arena.accumulator_ms);
        arena.accumulator_ms = 0.0;
    }
    substeps
}

/// Run exactly one fixed step
pub fn step(arena: &mut Arena) {
    if arena.is_over() {
        return;
    }

    {
        let Arena {
            platforms,
            characters,
            items,
            events,
            ..
        } = arena;
        integrate(characters, items, platforms, events);
    }
    resolve_melee(arena);
    advance_projectiles(arena);
    advance_status(arena, SIM_STEP_MS);
    resolve_pickups(arena);
    check_winner(arena);

    arena.time_ticks += 1;
}

/// End the match once someone is out of health
fn check_winner(arena: &mut Arena) {
    // Player one is checked first, so a double knockout goes to player two
    let Some(loser) = PlayerId::ALL
        .into_iter()
        .find(|&p| !arena.character(p).is_alive())
    else {
        return;
    };
    let winner = loser.other();
    arena.phase = MatchPhase::Over { winner };
    log::info!(
        "Match over after {} ticks: {:?} wins",
        arena.time_ticks,
        winner
    );
    arena.events.push(GameEvent::MatchOver { winner });
}

impl Arena {
    /// See [`tick`]
    pub fn tick(&mut self, dt_ms: f32) -> u32 {
        tick(self, dt_ms)
    }

    /// Set walking direction. Non-zero intents also turn the character.
    ///
    /// Ignored while crouching.
    pub fn set_move_intent(&mut self, player: PlayerId, dir: i8) {
        if self.is_over() {
            return;
        }
        let character = self.character_mut(player);
        if character.crouching {
            return;
        }
        let dir = dir.signum();
        character.move_intent = dir;
        match dir {
            -1 => character.facing = Facing::Left,
            1 => character.facing = Facing::Right,
            _ => {}
        }
    }

    /// Crouching stops the character in place
    pub fn set_crouching(&mut self, player: PlayerId, crouching: bool) {
        if self.is_over() {
            return;
        }
        let character = self.character_mut(player);
        character.crouching = crouching;
        if crouching {
            character.move_intent = 0;
        }
    }

    pub fn jump(&mut self, player: PlayerId) -> bool {
        if self.is_over() {
            return false;
        }
        jump(self.character_mut(player))
    }

    /// Use the held weapon. Returns false if on cooldown or out of ammo.
    pub fn attack(&mut self, player: PlayerId) -> bool {
        if self.is_over() {
            return false;
        }
        attack(self, player)
    }

    /// Feed a full frame of input for one character
    pub fn apply_input(&mut self, player: PlayerId, input: &PlayerInput) {
        self.set_crouching(player, input.crouch);
        self.set_move_intent(player, input.move_dir);
        if input.jump {
            self.jump(player);
        }
        if input.attack {
            self.attack(player);
        }
    }
}
