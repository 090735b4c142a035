//! Match configuration
//!
//! Arena layout and character tunables. Stored as JSON; anything missing or
//! unreadable falls back to the classic arena.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::geometry::{Platform, Terrain};
use crate::sim::spawn::SpawnSchedule;

/// Built-in configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// The standard four-platform arena with the normal drop timetable
    #[default]
    Classic,
    /// Same arena, items drop ten times as often
    Sandbox,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Sandbox => "Sandbox",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "sandbox" | "sand" => Some(Preset::Sandbox),
            _ => None,
        }
    }
}

/// Everything needed to set up a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub world_width: f32,
    /// Body width and height shared by both characters
    pub character_size: Vec2,
    /// Walking speed in units per tick before terrain and buffs
    pub base_move_speed: f32,
    /// Top-left start positions for player one and two
    pub spawn_points: [Vec2; 2],
    pub platforms: Vec<Platform>,
    /// Only crouching characters pick items up
    #[serde(default)]
    pub pickup_requires_crouch: bool,
    #[serde(default)]
    pub item_schedule: SpawnSchedule,
}

impl Default for MatchConfig {
    fn default() -> Self {
        let ground_y = 450.0 - CHARACTER_HEIGHT;
        Self {
            world_width: WORLD_WIDTH,
            character_size: Vec2::new(CHARACTER_WIDTH, CHARACTER_HEIGHT),
            base_move_speed: BASE_MOVE_SPEED,
            spawn_points: [Vec2::new(200.0, ground_y), Vec2::new(900.0, ground_y)],
            platforms: vec![
                // Ground
                Platform::new(100.0, 450.0, 1000.0, 100.0, Terrain::Normal),
                Platform::new(210.0, 280.0, 210.0, 1.0, Terrain::Grass),
                Platform::new(775.0, 280.0, 210.0, 1.0, Terrain::Ice),
                Platform::new(500.0, 100.0, 200.0, 1.0, Terrain::Normal),
            ],
            pickup_requires_crouch: false,
            item_schedule: SpawnSchedule::default(),
        }
    }
}

impl MatchConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        if preset == Preset::Sandbox {
            config.item_schedule = config.item_schedule.scaled(0.1);
        }
        config
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to the default arena on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read {}: {}; using default config", path.display(), err);
                return Self::default();
            }
        };

        let config = match Self::from_json(&json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Bad config in {}: {}; using default config", path.display(), err);
                return Self::default();
            }
        };

        let problems = config.validate();
        if !problems.is_empty() {
            for problem in &problems {
                log::warn!("{}: {}", path.display(), problem);
            }
            log::warn!("Using default config");
            return Self::default();
        }

        log::info!("Loaded config from {}", path.display());
        config
    }

    /// Write as pretty JSON. Failures are logged, not returned.
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match self.to_json() {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Config saved to {}", path.display()),
                Err(err) => log::warn!("Could not write {}: {}", path.display(), err),
            },
            Err(err) => log::warn!("Could not serialize config: {}", err),
        }
    }

    /// Human-readable list of everything wrong with this config
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !(self.world_width > 0.0) {
            problems.push(format!("world_width must be positive, got {}", self.world_width));
        }
        if !(self.character_size.x > 0.0 && self.character_size.y > 0.0) {
            problems.push(format!(
                "character_size must be positive, got {:?}",
                self.character_size
            ));
        }
        if !(self.base_move_speed > 0.0) {
            problems.push(format!(
                "base_move_speed must be positive, got {}",
                self.base_move_speed
            ));
        }
        for (i, spawn) in self.spawn_points.iter().enumerate() {
            if spawn.x < 0.0 || spawn.x + self.character_size.x > self.world_width {
                problems.push(format!("spawn point {} is outside the world", i + 1));
            }
        }
        for (i, platform) in self.platforms.iter().enumerate() {
            if platform.rect.width <= 0.0 || platform.rect.height <= 0.0 {
                problems.push(format!("platform {} has no area", i));
            }
        }

        let schedule = &self.item_schedule;
        if schedule.x_min > schedule.x_max {
            problems.push(format!(
                "item_schedule x range is inverted ({} > {})",
                schedule.x_min, schedule.x_max
            ));
        }
        for entry in &schedule.entries {
            let interval = entry.interval_ms;
            // Zero or negative disables an entry; anything else must be a real interval
            if !interval.is_finite() || (interval > 0.0 && interval < SIM_STEP_MS) {
                problems.push(format!(
                    "item_schedule interval for {} must be at least {}ms, got {}",
                    entry.kind.as_str(),
                    SIM_STEP_MS,
                    interval
                ));
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ItemKind;

    #[test]
    fn test_default_is_valid() {
        assert!(MatchConfig::default().validate().is_empty());
        assert!(MatchConfig::from_preset(Preset::Sandbox).validate().is_empty());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(Preset::from_str("SANDBOX"), Some(Preset::Sandbox));
        assert_eq!(Preset::from_str(Preset::Classic.as_str()), Some(Preset::Classic));
        assert_eq!(Preset::from_str("deathmatch"), None);
    }

    #[test]
    fn test_sandbox_drops_faster() {
        let classic = MatchConfig::from_preset(Preset::Classic);
        let sandbox = MatchConfig::from_preset(Preset::Sandbox);
        assert_eq!(sandbox.platforms, classic.platforms);
        assert!(
            (sandbox.item_schedule.entries[0].interval_ms - 2_000.0).abs() < 1e-3,
            "bandage interval should shrink tenfold"
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let config = MatchConfig {
            pickup_requires_crouch: true,
            ..MatchConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(MatchConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "world_width": 800.0,
            "character_size": [40.0, 60.0],
            "base_move_speed": 3.0,
            "spawn_points": [[100.0, 0.0], [600.0, 0.0]],
            "platforms": [
                { "rect": { "x": 0.0, "y": 300.0, "width": 800.0, "height": 20.0 } }
            ]
        }"#;
        let config = MatchConfig::from_json(json).unwrap();
        assert_eq!(config.platforms[0].terrain, Terrain::Normal);
        assert!(!config.pickup_requires_crouch);
        assert_eq!(config.item_schedule.entries.len(), ItemKind::ALL.len());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_catches_problems() {
        let mut config = MatchConfig::default();
        config.world_width = 0.0;
        config.item_schedule.x_min = 900.0;
        config.item_schedule.x_max = 100.0;
        let problems = config.validate();
        assert!(problems.iter().any(|p| p.contains("world_width")));
        assert!(problems.iter().any(|p| p.contains("inverted")));
    }

    #[test]
    fn test_validate_rejects_tiny_interval() {
        let mut config = MatchConfig::default();
        config.item_schedule.entries[0].interval_ms = 1e-9;
        let problems = config.validate();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("Bandage"));

        // Disabled entries are fine
        config.item_schedule.entries[0].interval_ms = 0.0;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_load_rejects_tiny_interval() {
        let path = std::env::temp_dir().join("duel_arena_tiny_interval.json");
        let mut config = MatchConfig::default();
        config.item_schedule.entries[0].interval_ms = 1e-9;
        config.save(&path);
        assert_eq!(MatchConfig::load(&path), MatchConfig::default());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_falls_back() {
        let missing = std::env::temp_dir().join("duel_arena_missing_config.json");
        let _ = std::fs::remove_file(&missing);
        assert_eq!(MatchConfig::load(&missing), MatchConfig::default());

        let garbled = std::env::temp_dir().join("duel_arena_garbled_config.json");
        std::fs::write(&garbled, "{ not json").unwrap();
        assert_eq!(MatchConfig::load(&garbled), MatchConfig::default());
        let _ = std::fs::remove_file(&garbled);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("duel_arena_saved_config.json");
        let mut config = MatchConfig::from_preset(Preset::Sandbox);
        config.base_move_speed = 6.0;
        config.save(&path);
        assert_eq!(MatchConfig::load(&path), config);
        let _ = std::fs::remove_file(&path);
    }
}
