//! Pickups and timed status effects
//!
//! Items map to an [`ItemEffect`] through a single table. Timers (melee
//! windows, invincibility, weapon cooldowns, adrenaline) all count down here.

use super::state::{Arena, Character, GameEvent, ItemKind};
use super::weapons::{Armor, Weapon};
use crate::consts::*;

/// What picking up an item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Heal(i32),
    FullHeal,
    Adrenaline,
    Equip(Weapon),
    Wear(Armor),
}

impl ItemKind {
    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::Bandage => ItemEffect::Heal(BANDAGE_HEAL),
            ItemKind::Medkit => ItemEffect::FullHeal,
            ItemKind::Adrenaline => ItemEffect::Adrenaline,
            ItemKind::Knife => ItemEffect::Equip(Weapon::Knife),
            ItemKind::Ball => ItemEffect::Equip(Weapon::Ball),
            ItemKind::Rifle => ItemEffect::Equip(Weapon::Rifle),
            ItemKind::Sniper => ItemEffect::Equip(Weapon::Sniper),
            ItemKind::LightArmor => ItemEffect::Wear(Armor::Light),
            ItemKind::BulletproofVest => ItemEffect::Wear(Armor::Vest),
        }
    }
}

/// Start (or refresh) the adrenaline buff
pub fn activate_adrenaline(character: &mut Character) {
    if !character.is_adrenaline_active() {
        character.adrenaline_pulse_ms = 0.0;
    }
    character.adrenaline_ms = ADRENALINE_DURATION_MS;
    character.refresh_move_speed();
}

/// Apply an item's effect to a character
pub fn apply_item(character: &mut Character, kind: ItemKind, events: &mut Vec<GameEvent>) {
    match kind.effect() {
        ItemEffect::Heal(amount) => {
            if character.heal(amount) {
                events.push(GameEvent::HealthChanged {
                    player: character.id,
                    health: character.health,
                });
            }
        }
        ItemEffect::FullHeal => {
            if character.heal(MAX_HEALTH) {
                events.push(GameEvent::HealthChanged {
                    player: character.id,
                    health: character.health,
                });
            }
        }
        ItemEffect::Adrenaline => activate_adrenaline(character),
        ItemEffect::Equip(weapon) => character.equip_weapon(weapon),
        ItemEffect::Wear(armor) => character.equip_armor(armor),
    }
}

/// Count down every timer on a character by `dt_ms`
pub fn advance_timers(character: &mut Character, dt_ms: f32, events: &mut Vec<GameEvent>) {
    if character.invincible_ms > 0.0 {
        character.invincible_ms = (character.invincible_ms - dt_ms).max(0.0);
        if character.invincible_ms == 0.0 {
            character.damage_tint = None;
        }
    }

    if let Some(strike) = character.melee.as_mut() {
        strike.remaining_ms -= dt_ms;
        if strike.remaining_ms <= 0.0 {
            character.melee = None;
        }
    }

    for cooldown in character.cooldowns.iter_mut() {
        *cooldown = (*cooldown - dt_ms).max(0.0);
    }

    if !character.is_adrenaline_active() {
        return;
    }
    character.adrenaline_pulse_ms += dt_ms;
    while character.adrenaline_pulse_ms >= ADRENALINE_PULSE_MS && character.is_adrenaline_active() {
        character.adrenaline_pulse_ms -= ADRENALINE_PULSE_MS;
        if character.heal(ADRENALINE_PULSE_HEAL) {
            events.push(GameEvent::HealthChanged {
                player: character.id,
                health: character.health,
            });
        }
        character.adrenaline_ms -= ADRENALINE_PULSE_MS;
        if character.adrenaline_ms <= 0.0 {
            character.adrenaline_ms = 0.0;
            character.adrenaline_pulse_ms = 0.0;
            character.refresh_move_speed();
            log::debug!("{:?} adrenaline wore off", character.id);
        }
    }
}

/// Pickup phase: each character collects at most one item under its feet
pub fn resolve_pickups(arena: &mut Arena) {
    let Arena {
        characters,
        items,
        events,
        pickup_requires_crouch,
        ..
    } = arena;

    for character in characters.iter_mut() {
        if *pickup_requires_crouch && !character.crouching {
            continue;
        }
        let point = character.pickup_point();
        // Newest item wins when several overlap
        let Some(index) = items.iter().rposition(|item| item.rect().contains(point)) else {
            continue;
        };
        let item = items.remove(index);
        apply_item(character, item.kind, events);
        log::debug!("{:?} picked up {}", character.id, item.kind.as_str());
        events.push(GameEvent::ItemPickedUp {
            player: character.id,
            kind: item.kind,
        });
    }
}

/// Status phase: tick every character's timers
pub fn advance_status(arena: &mut Arena, dt_ms: f32) {
    let Arena {
        characters, events, ..
    } = arena;
    for character in characters.iter_mut() {
        advance_timers(character, dt_ms, events);
    }
}
