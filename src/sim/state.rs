//! Match state and core simulation types
//!
//! Everything the simulation mutates lives in [`Arena`]. Entity types here
//! carry data and small accessors only; behavior lives in the phase modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Platform, Rect};
use super::weapons::{Armor, Weapon};
use crate::config::MatchConfig;
use crate::consts::*;

/// Handle for one of the two character slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// The opposing slot
    #[inline]
    pub const fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Which way a character looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    Playing,
    Over { winner: PlayerId },
}

/// Cosmetic hint for how a hit looked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageTint {
    /// Armor took the brunt (drawn yellow)
    Absorbed,
    /// Straight to health (drawn red)
    Wounded,
}

/// A live melee strike. Its rectangle tracks the wielder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeleeHitbox {
    pub weapon: Weapon,
    pub remaining_ms: f32,
}

/// A fighter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: PlayerId,
    /// Top-left corner of the body
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub health: i32,
    pub facing: Facing,
    pub crouching: bool,
    /// -1, 0 or 1
    pub move_intent: i8,
    pub move_speed: f32,
    pub base_move_speed: f32,
    pub weapon: Weapon,
    /// Remaining charges per weapon, indexed by [`Weapon::index`]
    pub ammo: [u8; Weapon::COUNT],
    /// Remaining cooldown per weapon in ms
    pub cooldowns: [f32; Weapon::COUNT],
    pub armor: Armor,
    pub vest_durability: i32,
    pub invincible_ms: f32,
    pub damage_tint: Option<DamageTint>,
    pub adrenaline_ms: f32,
    /// Time banked toward the next adrenaline pulse
    pub adrenaline_pulse_ms: f32,
    pub on_grass: bool,
    pub on_ice: bool,
    pub grounded: bool,
    pub double_jump_available: bool,
    pub melee: Option<MeleeHitbox>,
}

impl Character {
    pub fn new(id: PlayerId, pos: Vec2, facing: Facing, size: Vec2, base_move_speed: f32) -> Self {
        Self {
            id,
            pos,
            vel_y: 0.0,
            size,
            health: MAX_HEALTH,
            facing,
            crouching: false,
            move_intent: 0,
            move_speed: base_move_speed,
            base_move_speed,
            weapon: Weapon::Fist,
            ammo: [0; Weapon::COUNT],
            cooldowns: [0.0; Weapon::COUNT],
            armor: Armor::None,
            vest_durability: 0,
            invincible_ms: 0.0,
            damage_tint: None,
            adrenaline_ms: 0.0,
            adrenaline_pulse_ms: 0.0,
            on_grass: false,
            on_ice: false,
            grounded: false,
            double_jump_available: true,
            melee: None,
        }
    }

    /// Body rectangle
    #[inline]
    pub fn body(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    #[inline]
    pub fn is_adrenaline_active(&self) -> bool {
        self.adrenaline_ms > 0.0
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Crouching in grass hides the character from view
    #[inline]
    pub fn is_concealed(&self) -> bool {
        self.on_grass && self.crouching
    }

    /// Charges left for `weapon`, or `None` for melee weapons
    pub fn ammo(&self, weapon: Weapon) -> Option<u8> {
        weapon.spec().max_ammo.map(|_| self.ammo[weapon.index()])
    }

    /// Strike zone beside the body on the facing side
    pub fn reach(&self) -> Rect {
        let width = self.size.x;
        let height = self.size.y * 0.8;
        let x = match self.facing {
            Facing::Right => self.pos.x + self.size.x,
            Facing::Left => self.pos.x - width,
        };
        Rect::new(x, self.pos.y + self.size.y * 0.1, width, height)
    }

    /// Rectangle of the active melee strike, if any
    pub fn melee_rect(&self) -> Option<Rect> {
        self.melee.map(|_| self.reach())
    }

    /// Point that must fall inside an item to collect it
    pub fn pickup_point(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x / 2.0,
            self.bottom() - PICKUP_FOOT_OFFSET,
        )
    }

    /// Add health, capped at the maximum. Returns true if health changed.
    pub fn heal(&mut self, amount: i32) -> bool {
        let before = self.health;
        self.health = (self.health + amount).clamp(0, MAX_HEALTH);
        self.health != before
    }

    /// Recompute move speed from terrain and buffs
    pub fn refresh_move_speed(&mut self) {
        let multiplier = match (self.on_ice, self.is_adrenaline_active()) {
            (true, true) => ICE_ADRENALINE_SPEED_MULTIPLIER,
            (true, false) => ICE_SPEED_MULTIPLIER,
            (false, true) => ADRENALINE_SPEED_MULTIPLIER,
            (false, false) => 1.0,
        };
        self.move_speed = self.base_move_speed * multiplier;
    }

    /// Arm a weapon, refilling its charges. Clears every pending cooldown.
    pub fn equip_weapon(&mut self, weapon: Weapon) {
        self.weapon = weapon;
        if let Some(max) = weapon.spec().max_ammo {
            self.ammo[weapon.index()] = max;
        }
        self.cooldowns = [0.0; Weapon::COUNT];
    }

    /// Put on armor, replacing whatever was worn
    pub fn equip_armor(&mut self, armor: Armor) {
        self.armor = armor;
        self.vest_durability = if armor == Armor::Vest {
            VEST_MAX_DURABILITY
        } else {
            0
        };
    }
}

/// Projectile flavors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Flat, constant-speed shot
    Bullet,
    /// Gravity-bound ball that bounces off the side walls
    ThrownBall,
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    /// Weapon that fired it, for damage lookup
    pub weapon: Weapon,
    pub owner: PlayerId,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Projectile {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    pub fn direction(&self) -> Facing {
        if self.vel.x < 0.0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Bandage,
    Medkit,
    Adrenaline,
    Knife,
    Ball,
    Rifle,
    Sniper,
    LightArmor,
    BulletproofVest,
}

impl ItemKind {
    pub const ALL: [ItemKind; 9] = [
        ItemKind::Bandage,
        ItemKind::Medkit,
        ItemKind::Adrenaline,
        ItemKind::Knife,
        ItemKind::Ball,
        ItemKind::Rifle,
        ItemKind::Sniper,
        ItemKind::LightArmor,
        ItemKind::BulletproofVest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Bandage => "Bandage",
            ItemKind::Medkit => "Medkit",
            ItemKind::Adrenaline => "Adrenaline",
            ItemKind::Knife => "Knife",
            ItemKind::Ball => "Ball",
            ItemKind::Rifle => "Rifle",
            ItemKind::Sniper => "Sniper",
            ItemKind::LightArmor => "Light Armor",
            ItemKind::BulletproofVest => "Bulletproof Vest",
        }
    }
}

/// A pickup lying in (or falling into) the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub kind: ItemKind,
    pub pos: Vec2,
    pub vel_y: f32,
    pub grounded: bool,
}

impl Item {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, Vec2::splat(ITEM_SIZE))
    }
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    HealthChanged {
        player: PlayerId,
        health: i32,
    },
    MatchOver {
        winner: PlayerId,
    },
    ProjectileSpawned {
        id: u32,
        kind: ProjectileKind,
        pos: Vec2,
        direction: Facing,
        owner: PlayerId,
    },
    ItemSpawned {
        id: u32,
        kind: ItemKind,
        x: f32,
    },
    ItemPickedUp {
        player: PlayerId,
        kind: ItemKind,
    },
    MeleeStarted {
        player: PlayerId,
        weapon: Weapon,
        facing: Facing,
    },
    Struck {
        target: PlayerId,
        weapon: Weapon,
        damage: i32,
        tint: DamageTint,
    },
    ArmorBroken {
        player: PlayerId,
    },
    WeaponDepleted {
        player: PlayerId,
        weapon: Weapon,
    },
    Respawned {
        player: PlayerId,
    },
}

/// One match worth of simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub world_width: f32,
    pub platforms: Vec<Platform>,
    /// Indexed by [`PlayerId::index`]
    pub characters: [Character; 2],
    pub projectiles: Vec<Projectile>,
    pub items: Vec<Item>,
    pub phase: MatchPhase,
    /// Fixed steps simulated so far
    pub time_ticks: u64,
    /// Only crouching characters collect items
    pub pickup_requires_crouch: bool,
    /// Pending notifications, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Host time not yet consumed by a fixed step
    pub(crate) accumulator_ms: f32,
    next_id: u32,
}

impl Arena {
    /// Build a fresh match from a config
    pub fn new(config: &MatchConfig) -> Self {
        let make = |id: PlayerId, facing: Facing| {
            Character::new(
                id,
                config.spawn_points[id.index()],
                facing,
                config.character_size,
                config.base_move_speed,
            )
        };
        log::info!(
            "New match: {} platforms, world width {}",
            config.platforms.len(),
            config.world_width
        );
        Self {
            world_width: config.world_width,
            platforms: config.platforms.clone(),
            characters: [
                make(PlayerId::One, Facing::Right),
                make(PlayerId::Two, Facing::Left),
            ],
            projectiles: Vec::new(),
            items: Vec::new(),
            phase: MatchPhase::Playing,
            time_ticks: 0,
            pickup_requires_crouch: config.pickup_requires_crouch,
            events: Vec::new(),
            accumulator_ms: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn character(&self, player: PlayerId) -> &Character {
        &self.characters[player.index()]
    }

    #[inline]
    pub fn character_mut(&mut self, player: PlayerId) -> &mut Character {
        &mut self.characters[player.index()]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, MatchPhase::Over { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            MatchPhase::Over { winner } => Some(winner),
            MatchPhase::Playing => None,
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop an item at the top of the world; physics carries it down
    pub fn spawn_item(&mut self, kind: ItemKind, x: f32) -> u32 {
        let id = self.next_entity_id();
        self.items.push(Item {
            id,
            kind,
            pos: Vec2::new(x, ITEM_SPAWN_Y),
            vel_y: 0.0,
            grounded: false,
        });
        log::debug!("Spawned {} (#{}) at x={}", kind.as_str(), id, x);
        self.events.push(GameEvent::ItemSpawned { id, kind, x });
        id
    }
}

/// Borrow an attacker and its opponent mutably at the same time
pub fn split_pair(
    characters: &mut [Character; 2],
    attacker: PlayerId,
) -> (&mut Character, &mut Character) {
    let [one, two] = characters;
    match attacker {
        PlayerId::One => (one, two),
        PlayerId::Two => (two, one),
    }
}
