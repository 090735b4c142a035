//! Timed item drops
//!
//! The simulation never spawns items on its own. An [`ItemSpawner`] owned by the
//! host decides when and where, using a seeded RNG so a given schedule and seed
//! always produce the same drops.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::{Arena, ItemKind};

/// Most drops a single entry may produce in one `poll`. Anything beyond is discarded.
pub const MAX_DROPS_PER_POLL: usize = 8;

/// One item kind and how often it drops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub kind: ItemKind,
    /// Time between drops. Zero or negative disables the entry.
    pub interval_ms: f32,
}

impl SpawnEntry {
    pub const fn new(kind: ItemKind, interval_ms: f32) -> Self {
        Self { kind, interval_ms }
    }
}

/// Drop timetable plus the horizontal band items fall into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub entries: Vec<SpawnEntry>,
    pub x_min: f32,
    pub x_max: f32,
    pub seed: u64,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            entries: vec![
                SpawnEntry::new(ItemKind::Bandage, 20_000.0),
                SpawnEntry::new(ItemKind::Medkit, 30_000.0),
                SpawnEntry::new(ItemKind::Adrenaline, 60_000.0),
                SpawnEntry::new(ItemKind::Knife, 45_000.0),
                SpawnEntry::new(ItemKind::Ball, 60_000.0),
                SpawnEntry::new(ItemKind::Rifle, 70_000.0),
                SpawnEntry::new(ItemKind::Sniper, 90_000.0),
                SpawnEntry::new(ItemKind::LightArmor, 55_000.0),
                SpawnEntry::new(ItemKind::BulletproofVest, 65_000.0),
            ],
            x_min: 100.0,
            x_max: 1000.0,
            seed: 0x5eed,
        }
    }
}

impl SpawnSchedule {
    /// Same schedule with every interval multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        let mut out = self.clone();
        for entry in &mut out.entries {
            entry.interval_ms *= factor;
        }
        out
    }
}

/// Runs a [`SpawnSchedule`] against host time
#[derive(Debug, Clone)]
pub struct ItemSpawner {
    schedule: SpawnSchedule,
    /// Time since the last drop, per entry
    elapsed_ms: Vec<f32>,
    rng: Pcg32,
}

impl ItemSpawner {
    pub fn new(schedule: &SpawnSchedule) -> Self {
        Self {
            elapsed_ms: vec![0.0; schedule.entries.len()],
            rng: Pcg32::seed_from_u64(schedule.seed),
            schedule: schedule.clone(),
        }
    }

    fn roll_x(&mut self) -> f32 {
        let (lo, hi) = (self.schedule.x_min, self.schedule.x_max);
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }

    /// Advance by `dt_ms` and return every drop that came due, in schedule order
    pub fn poll(&mut self, dt_ms: f32) -> Vec<(ItemKind, f32)> {
        let mut due = Vec::new();
        for i in 0..self.schedule.entries.len() {
            let SpawnEntry { kind, interval_ms } = self.schedule.entries[i];
            if !interval_ms.is_finite() || interval_ms <= 0.0 {
                continue;
            }
            self.elapsed_ms[i] += dt_ms;
            let count = (self.elapsed_ms[i] / interval_ms).floor();
            if !(count >= 1.0) {
                continue;
            }
            self.elapsed_ms[i] %= interval_ms;
            if count > MAX_DROPS_PER_POLL as f32 {
                log::warn!(
                    "{} drops of {} due at once, keeping {}",
                    count,
                    kind.as_str(),
                    MAX_DROPS_PER_POLL
                );
            }
            for _ in 0..(count as usize).min(MAX_DROPS_PER_POLL) {
                let x = self.roll_x();
                due.push((kind, x));
            }
        }
        due
    }

    /// Poll and drop whatever came due straight into `arena`
    pub fn drive(&mut self, arena: &mut Arena, dt_ms: f32) -> usize {
        if arena.is_over() {
            return 0;
        }
        let due = self.poll(dt_ms);
        for &(kind, x) in &due {
            arena.spawn_item(kind, x);
        }
        due.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchConfig;

    fn quick() -> SpawnSchedule {
        SpawnSchedule {
            entries: vec![
                SpawnEntry::new(ItemKind::Bandage, 100.0),
                SpawnEntry::new(ItemKind::Rifle, 250.0),
                SpawnEntry::new(ItemKind::Sniper, 0.0),
            ],
            ..SpawnSchedule::default()
        }
    }

    #[test]
    fn test_nothing_due_early() {
        let mut spawner = ItemSpawner::new(&quick());
        assert!(spawner.poll(99.0).is_empty());
    }

    #[test]
    fn test_intervals_fire_in_order() {
        let mut spawner = ItemSpawner::new(&quick());
        let kinds: Vec<ItemKind> = spawner.poll(250.0).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![ItemKind::Bandage, ItemKind::Bandage, ItemKind::Rifle]
        );
        // Leftover 50ms carries over
        assert_eq!(spawner.poll(50.0).len(), 1);
    }

    #[test]
    fn test_positions_in_band_and_seeded() {
        let mut a = ItemSpawner::new(&quick());
        let mut b = ItemSpawner::new(&quick());
        let drops_a = a.poll(5_000.0);
        let drops_b = b.poll(5_000.0);
        assert_eq!(drops_a, drops_b);
        assert!(drops_a.iter().all(|&(_, x)| (100.0..1000.0).contains(&x)));
    }

    #[test]
    fn test_degenerate_band() {
        let schedule = SpawnSchedule {
            x_min: 400.0,
            x_max: 400.0,
            ..quick()
        };
        let mut spawner = ItemSpawner::new(&schedule);
        assert!(spawner.poll(100.0).iter().all(|&(_, x)| x == 400.0));
    }

    #[test]
    fn test_tiny_interval_is_bounded() {
        let schedule = SpawnSchedule {
            entries: vec![SpawnEntry::new(ItemKind::Bandage, 1e-9)],
            ..SpawnSchedule::default()
        };
        let mut spawner = ItemSpawner::new(&schedule);
        assert_eq!(spawner.poll(16.0).len(), MAX_DROPS_PER_POLL);
        assert!(spawner.poll(16.0).len() <= MAX_DROPS_PER_POLL);
    }

    #[test]
    fn test_non_finite_interval_never_fires() {
        let schedule = SpawnSchedule {
            entries: vec![
                SpawnEntry::new(ItemKind::Bandage, f32::NAN),
                SpawnEntry::new(ItemKind::Medkit, f32::INFINITY),
            ],
            ..SpawnSchedule::default()
        };
        let mut spawner = ItemSpawner::new(&schedule);
        assert!(spawner.poll(1_000_000.0).is_empty());
    }

    #[test]
    fn test_scaled() {
        let schedule = SpawnSchedule::default().scaled(0.5);
        assert_eq!(schedule.entries[0].interval_ms, 10_000.0);
    }

    #[test]
    fn test_drive_spawns_into_arena() {
        let mut arena = Arena::new(&MatchConfig::default());
        let mut spawner = ItemSpawner::new(&quick());
        assert_eq!(spawner.drive(&mut arena, 100.0), 1);
        assert_eq!(arena.items.len(), 1);
        assert_eq!(arena.items[0].kind, ItemKind::Bandage);
    }
}
