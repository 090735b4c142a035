//! Weapon and armor data tables
//!
//! Every weapon- or armor-dependent number lives here, keyed by enum index.
//! Adding a weapon means adding a row, not touching the resolver.

use serde::{Deserialize, Serialize};

/// Held weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Fist,
    Knife,
    Ball,
    Rifle,
    Sniper,
}

impl Weapon {
    pub const COUNT: usize = 5;
    pub const ALL: [Weapon; Weapon::COUNT] = [
        Weapon::Fist,
        Weapon::Knife,
        Weapon::Ball,
        Weapon::Rifle,
        Weapon::Sniper,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn spec(self) -> &'static WeaponSpec {
        &WEAPON_SPECS[self.index()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Fist => "Fist",
            Weapon::Knife => "Knife",
            Weapon::Ball => "Ball",
            Weapon::Rifle => "Rifle",
            Weapon::Sniper => "Sniper",
        }
    }
}

/// Worn armor. At most one piece at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Armor {
    #[default]
    None,
    Light,
    Vest,
}

impl Armor {
    pub const COUNT: usize = 3;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// How a weapon delivers its hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeaponClass {
    /// Spawns a hitbox beside the wielder for `active_ms`
    Melee { active_ms: f32 },
    /// Lobs a gravity-bound ball
    Thrown,
    /// Fires a straight bullet
    Firearm,
}

/// Static weapon parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub class: WeaponClass,
    /// Charges granted on equip; `None` for unlimited melee weapons
    pub max_ammo: Option<u8>,
    /// Minimum time between shots; `None` when ungated
    pub cooldown_ms: Option<f32>,
}

impl WeaponSpec {
    pub fn is_melee(&self) -> bool {
        matches!(self.class, WeaponClass::Melee { .. })
    }
}

/// Indexed by [`Weapon::index`]
pub const WEAPON_SPECS: [WeaponSpec; Weapon::COUNT] = [
    // Fist
    WeaponSpec {
        class: WeaponClass::Melee { active_ms: 500.0 },
        max_ammo: None,
        cooldown_ms: None,
    },
    // Knife
    WeaponSpec {
        class: WeaponClass::Melee { active_ms: 200.0 },
        max_ammo: None,
        cooldown_ms: None,
    },
    // Ball
    WeaponSpec {
        class: WeaponClass::Thrown,
        max_ammo: Some(3),
        cooldown_ms: None,
    },
    // Rifle
    WeaponSpec {
        class: WeaponClass::Firearm,
        max_ammo: Some(20),
        cooldown_ms: Some(500.0),
    },
    // Sniper
    WeaponSpec {
        class: WeaponClass::Firearm,
        max_ammo: Some(5),
        cooldown_ms: Some(2000.0),
    },
];

/// Result of one weapon hitting one armor type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mitigation {
    /// Health removed from the target
    pub damage: i32,
    /// Vest durability removed (zero unless the vest is involved)
    pub durability_cost: i32,
    /// The armor changed the outcome of this hit
    pub absorbed: bool,
}

const fn hit(damage: i32) -> Mitigation {
    Mitigation {
        damage,
        durability_cost: 0,
        absorbed: false,
    }
}

const fn soaked(damage: i32, durability_cost: i32) -> Mitigation {
    Mitigation {
        damage,
        durability_cost,
        absorbed: true,
    }
}

/// Rows by [`Weapon::index`], columns by [`Armor::index`] (None, Light, Vest)
pub const DAMAGE_TABLE: [[Mitigation; Armor::COUNT]; Weapon::COUNT] = [
    [hit(2), soaked(0, 0), hit(2)],
    [hit(5), soaked(2, 0), hit(5)],
    [hit(20), hit(20), hit(20)],
    [hit(5), hit(5), soaked(2, 10)],
    [hit(30), hit(30), soaked(10, 40)],
];

/// Look up the outcome of `weapon` striking a target wearing `armor`
#[inline]
pub fn mitigate(weapon: Weapon, armor: Armor) -> Mitigation {
    DAMAGE_TABLE[weapon.index()][armor.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_table_unarmored() {
        assert_eq!(mitigate(Weapon::Fist, Armor::None).damage, 2);
        assert_eq!(mitigate(Weapon::Knife, Armor::None).damage, 5);
        assert_eq!(mitigate(Weapon::Ball, Armor::None).damage, 20);
        assert_eq!(mitigate(Weapon::Rifle, Armor::None).damage, 5);
        assert_eq!(mitigate(Weapon::Sniper, Armor::None).damage, 30);
    }

    #[test]
    fn test_light_armor_only_stops_melee() {
        let fist = mitigate(Weapon::Fist, Armor::Light);
        assert_eq!(fist.damage, 0);
        assert!(fist.absorbed);
        assert_eq!(mitigate(Weapon::Knife, Armor::Light).damage, 2);
        assert!(!mitigate(Weapon::Rifle, Armor::Light).absorbed);
        assert_eq!(mitigate(Weapon::Sniper, Armor::Light).damage, 30);
    }

    #[test]
    fn test_vest_costs_durability_on_firearms() {
        let rifle = mitigate(Weapon::Rifle, Armor::Vest);
        assert_eq!((rifle.damage, rifle.durability_cost), (2, 10));
        let sniper = mitigate(Weapon::Sniper, Armor::Vest);
        assert_eq!((sniper.damage, sniper.durability_cost), (10, 40));
        // Vest does nothing against melee or the ball
        assert_eq!(mitigate(Weapon::Fist, Armor::Vest), mitigate(Weapon::Fist, Armor::None));
        assert_eq!(mitigate(Weapon::Ball, Armor::Vest).durability_cost, 0);
    }

    #[test]
    fn test_weapon_specs() {
        assert!(Weapon::Fist.spec().is_melee());
        assert!(Weapon::Knife.spec().is_melee());
        assert_eq!(
            Weapon::Knife.spec().class,
            WeaponClass::Melee { active_ms: 200.0 }
        );
        assert_eq!(Weapon::Sniper.spec().class, WeaponClass::Firearm);
        assert_eq!(Weapon::Ball.spec().max_ammo, Some(3));
        assert_eq!(Weapon::Rifle.spec().max_ammo, Some(20));
        assert_eq!(Weapon::Sniper.spec().max_ammo, Some(5));
        assert_eq!(Weapon::Rifle.spec().cooldown_ms, Some(500.0));
        assert_eq!(Weapon::Sniper.spec().cooldown_ms, Some(2000.0));
        for weapon in Weapon::ALL {
            assert_eq!(Weapon::ALL[weapon.index()], weapon);
        }
    }
}
