//! Weapon dispatch and hit resolution
//!
//! `attack` turns the held weapon into a melee strike or a projectile. Damage
//! from any source goes through [`apply_damage`], which consults the armor
//! table and honors the invincibility window.

use glam::Vec2;

use super::state::{
    Arena, Character, DamageTint, Facing, GameEvent, MeleeHitbox, PlayerId, Projectile,
    ProjectileKind, split_pair,
};
use super::weapons::{Armor, Weapon, WeaponClass, mitigate};
use crate::consts::*;

/// Crouch-based concealment: a crouching target can only be hit by a
/// crouching attacker.
#[inline]
pub fn can_strike(attacker: &Character, target: &Character) -> bool {
    attacker.crouching || !target.crouching
}

/// Use the held weapon. Returns false when nothing happened (cooldown, no ammo).
pub fn attack(arena: &mut Arena, player: PlayerId) -> bool {
    let weapon = arena.character(player).weapon;
    match weapon.spec().class {
        WeaponClass::Melee { active_ms } => {
            let character = arena.character_mut(player);
            character.melee = Some(MeleeHitbox {
                weapon,
                remaining_ms: active_ms,
            });
            let facing = character.facing;
            arena.events.push(GameEvent::MeleeStarted {
                player,
                weapon,
                facing,
            });
            true
        }
        WeaponClass::Thrown => fire(arena, player, weapon, ProjectileKind::ThrownBall),
        WeaponClass::Firearm => fire(arena, player, weapon, ProjectileKind::Bullet),
    }
}

/// Spend a charge of `weapon` and launch a projectile
fn fire(arena: &mut Arena, player: PlayerId, weapon: Weapon, kind: ProjectileKind) -> bool {
    let slot = weapon.index();
    let character = arena.character(player);
    if character.ammo[slot] == 0 || character.cooldowns[slot] > 0.0 {
        return false;
    }

    let id = arena.next_entity_id();
    let character = arena.character_mut(player);
    character.ammo[slot] -= 1;
    if let Some(cooldown) = weapon.spec().cooldown_ms {
        character.cooldowns[slot] = cooldown;
    }

    let facing = character.facing;
    let (pos, vel, size) = match kind {
        ProjectileKind::Bullet => {
            let offset_x = match facing {
                Facing::Right => character.size.x * 0.4,
                Facing::Left => -character.size.x * 0.1,
            };
            (
                character.pos + Vec2::new(offset_x, character.size.y * 0.5),
                Vec2::new(BULLET_SPEED * facing.sign(), 0.0),
                character.size,
            )
        }
        ProjectileKind::ThrownBall => (
            character.pos,
            Vec2::new(BALL_LAUNCH_SPEED_X * facing.sign(), BALL_LAUNCH_SPEED_Y),
            Vec2::splat(BALL_SIZE),
        ),
    };

    let depleted = character.ammo[slot] == 0;
    if depleted {
        character.weapon = Weapon::Fist;
    }

    let projectile = Projectile {
        id,
        kind,
        weapon,
        owner: player,
        pos,
        vel,
        size,
        active: true,
    };
    arena.events.push(GameEvent::ProjectileSpawned {
        id,
        kind,
        pos,
        direction: projectile.direction(),
        owner: player,
    });
    arena.projectiles.push(projectile);
    if depleted {
        log::debug!("{:?} ran out of {}", player, weapon.as_str());
        arena.events.push(GameEvent::WeaponDepleted { player, weapon });
    }
    true
}

/// Apply a hit from `weapon` to `target`
///
/// Returns the health removed, or `None` if the target was invincible.
pub fn apply_damage(
    target: &mut Character,
    weapon: Weapon,
    events: &mut Vec<GameEvent>,
) -> Option<i32> {
    if target.is_invincible() {
        return None;
    }

    let outcome = mitigate(weapon, target.armor);

    if target.armor == Armor::Vest && outcome.durability_cost > 0 {
        target.vest_durability -= outcome.durability_cost;
        if target.vest_durability <= 0 {
            target.equip_armor(Armor::None);
            log::debug!("{:?} lost their vest", target.id);
            events.push(GameEvent::ArmorBroken { player: target.id });
        }
    }

    if outcome.damage <= 0 {
        return Some(0);
    }

    target.health = (target.health - outcome.damage).max(0);
    target.invincible_ms = INVINCIBILITY_MS;
    let tint = if outcome.absorbed {
        DamageTint::Absorbed
    } else {
        DamageTint::Wounded
    };
    target.damage_tint = Some(tint);

    log::debug!(
        "{:?} hit by {} for {} (health {})",
        target.id,
        weapon.as_str(),
        outcome.damage,
        target.health
    );
    events.push(GameEvent::Struck {
        target: target.id,
        weapon,
        damage: outcome.damage,
        tint,
    });
    events.push(GameEvent::HealthChanged {
        player: target.id,
        health: target.health,
    });
    Some(outcome.damage)
}

/// Combat phase: land active melee strikes on the opponent
pub fn resolve_melee(arena: &mut Arena) {
    let Arena {
        characters, events, ..
    } = arena;

    for attacker_id in PlayerId::ALL {
        let (attacker, target) = split_pair(characters, attacker_id);
        let Some(strike) = attacker.melee else {
            continue;
        };
        if !attacker.reach().intersects(&target.body()) {
            continue;
        }
        if can_strike(attacker, target) {
            apply_damage(target, strike.weapon, events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;

    /// Two fighters standing face to face, touching reach
    fn close_quarters() -> Arena {
        let mut arena = Arena::new(&MatchConfig::default());
        let y = 450.0 - CHARACTER_HEIGHT;
        arena.characters[0].pos = Vec2::new(400.0, y);
        arena.characters[1].pos = Vec2::new(400.0 + CHARACTER_WIDTH + 10.0, y);
        arena
    }

    #[test]
    fn test_fist_melee_hits() {
        let mut arena = close_quarters();
        assert!(attack(&mut arena, PlayerId::One));
        resolve_melee(&mut arena);
        assert_eq!(arena.characters[1].health, MAX_HEALTH - 2);
        assert!(arena.characters[1].is_invincible());
        assert_eq!(arena.characters[1].damage_tint, Some(DamageTint::Wounded));
    }

    #[test]
    fn test_invincibility_blocks_repeat_hits() {
        let mut arena = close_quarters();
        arena.characters[0].equip_weapon(Weapon::Knife);
        attack(&mut arena, PlayerId::One);
        resolve_melee(&mut arena);
        resolve_melee(&mut arena);
        resolve_melee(&mut arena);
        assert_eq!(arena.characters[1].health, MAX_HEALTH - 5);
    }

    #[test]
    fn test_crouching_target_dodges_standing_attacker() {
        let mut arena = close_quarters();
        arena.characters[1].crouching = true;
        attack(&mut arena, PlayerId::One);
        resolve_melee(&mut arena);
        assert_eq!(arena.characters[1].health, MAX_HEALTH);

        // Crouching attacker gets through
        arena.characters[0].crouching = true;
        resolve_melee(&mut arena);
        assert_eq!(arena.characters[1].health, MAX_HEALTH - 2);
    }

    #[test]
    fn test_light_armor_absorbs_fist() {
        let mut events = Vec::new();
        let mut arena = close_quarters();
        let target = &mut arena.characters[1];
        target.equip_armor(Armor::Light);
        assert_eq!(apply_damage(target, Weapon::Fist, &mut events), Some(0));
        assert_eq!(target.health, MAX_HEALTH);
        assert!(!target.is_invincible());
        assert!(events.is_empty());

        assert_eq!(apply_damage(target, Weapon::Knife, &mut events), Some(2));
        assert_eq!(target.damage_tint, Some(DamageTint::Absorbed));
    }

    #[test]
    fn test_sniper_breaks_vest() {
        let mut events = Vec::new();
        let mut arena = close_quarters();
        let target = &mut arena.characters[1];
        target.equip_armor(Armor::Vest);
        for _ in 0..3 {
            target.invincible_ms = 0.0;
            apply_damage(target, Weapon::Sniper, &mut events);
        }
        assert_eq!(target.armor, Armor::None);
        assert_eq!(target.health, MAX_HEALTH - 30);
        assert!(events.contains(&GameEvent::ArmorBroken {
            player: PlayerId::Two
        }));
    }

    #[test]
    fn test_rifle_cooldown_and_ammo() {
        let mut arena = close_quarters();
        arena.characters[0].equip_weapon(Weapon::Rifle);
        assert!(attack(&mut arena, PlayerId::One));
        assert!(!attack(&mut arena, PlayerId::One));
        assert_eq!(arena.projectiles.len(), 1);
        assert_eq!(arena.characters[0].ammo(Weapon::Rifle), Some(19));
        assert_eq!(arena.projectiles[0].vel, Vec2::new(BULLET_SPEED, 0.0));
    }

    #[test]
    fn test_ball_reverts_to_fist() {
        let mut arena = close_quarters();
        arena.characters[1].equip_weapon(Weapon::Ball);
        for _ in 0..3 {
            assert!(attack(&mut arena, PlayerId::Two));
        }
        let thrower = &arena.characters[1];
        assert_eq!(thrower.weapon, Weapon::Fist);
        assert_eq!(thrower.ammo(Weapon::Ball), Some(0));
        assert_eq!(arena.projectiles.len(), 3);
        // Player two faces left, so balls fly left and up
        assert!(arena.projectiles.iter().all(|p| p.vel.x < 0.0 && p.vel.y < 0.0));
        assert!(arena.events.iter().any(|e| matches!(
            e,
            GameEvent::ProjectileSpawned {
                direction: Facing::Left,
                owner: PlayerId::Two,
                ..
            }
        )));
        assert!(arena.events.contains(&GameEvent::WeaponDepleted {
            player: PlayerId::Two,
            weapon: Weapon::Ball
        }));
    }

    #[test]
    fn test_bullet_spawn_offsets() {
        let mut arena = close_quarters();
        arena.characters[0].equip_weapon(Weapon::Sniper);
        attack(&mut arena, PlayerId::One);
        let c = &arena.characters[0];
        let p = &arena.projectiles[0];
        assert!((p.pos.x - (c.pos.x + c.size.x * 0.4)).abs() < 1e-4);
        assert!((p.pos.y - (c.pos.y + c.size.y * 0.5)).abs() < 1e-4);
        assert_eq!(p.weapon, Weapon::Sniper);
    }
}
