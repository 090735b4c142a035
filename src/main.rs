//! Duel Arena headless runner
//!
//! Plays a scripted match between two simple bots and logs every event.
//!
//! ```text
//! duel-arena [classic|sandbox|path/to/config.json]
//! ```
//!
//! Set `RUST_LOG=debug` to see hits, pickups and spawns.

use duel_arena::consts::*;
use duel_arena::sim::{Arena, GameEvent, ItemSpawner, PlayerId, PlayerInput};
use duel_arena::{MatchConfig, Preset};

/// Host frame length fed to the simulation
const FRAME_MS: f32 = SIM_STEP_MS;
/// Give up after this much simulated time
const MATCH_LIMIT_MS: f32 = 5.0 * 60.0 * 1000.0;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(arg) => match Preset::from_str(&arg) {
            Some(preset) => {
                log::info!("Using {} preset", preset.as_str());
                MatchConfig::from_preset(preset)
            }
            None => MatchConfig::load(&arg),
        },
        None => MatchConfig::default(),
    };

    let mut arena = Arena::new(&config);
    let mut spawner = ItemSpawner::new(&config.item_schedule);
    let mut elapsed_ms = 0.0;

    while !arena.is_over() && elapsed_ms < MATCH_LIMIT_MS {
        for player in PlayerId::ALL {
            let input = bot_input(&arena, player);
            arena.apply_input(player, &input);
        }
        spawner.drive(&mut arena, FRAME_MS);
        arena.tick(FRAME_MS);
        elapsed_ms += FRAME_MS;

        for event in arena.drain_events() {
            report(&event);
        }
    }

    let [one, two] = &arena.characters;
    match arena.winner() {
        Some(winner) => println!(
            "{:?} wins after {:.1}s ({} vs {})",
            winner,
            elapsed_ms / 1000.0,
            one.health,
            two.health
        ),
        None => println!(
            "Time limit reached after {} ticks ({} vs {})",
            arena.time_ticks, one.health, two.health
        ),
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::HealthChanged { player, health } => {
            log::info!("{:?} health {}", player, health)
        }
        GameEvent::MatchOver { winner } => log::info!("Match over, {:?} wins", winner),
        GameEvent::ItemPickedUp { player, kind } => {
            log::info!("{:?} picked up {}", player, kind.as_str())
        }
        other => log::debug!("{:?}", other),
    }
}

/// Walk toward the nearest item (or the opponent) and swing or shoot when lined up
fn bot_input(arena: &Arena, me: PlayerId) -> PlayerInput {
    let bot = arena.character(me);
    let foe = arena.character(me.other());
    let center = bot.body().center_x();

    let target = arena
        .items
        .iter()
        .filter(|item| item.grounded)
        .map(|item| item.rect())
        .min_by(|a, b| {
            (a.center_x() - center)
                .abs()
                .total_cmp(&(b.center_x() - center).abs())
        })
        .unwrap_or_else(|| foe.body());

    let dx = target.center_x() - center;
    let foe_dx = foe.body().center_x() - center;
    let facing_foe = foe_dx * bot.facing.sign() > 0.0;

    let move_dir = if dx.abs() > bot.size.x / 2.0 {
        dx.signum() as i8
    } else if !facing_foe {
        foe_dx.signum() as i8
    } else {
        0
    };

    let in_reach = foe_dx.abs() < bot.size.x * 2.0;
    let ranged = !bot.weapon.spec().is_melee();
    let attack = facing_foe && (in_reach || ranged);
    // Hop up toward anything sitting on a higher ledge, now and then
    let jump = bot.grounded && target.bottom() < bot.bottom() - 50.0 && arena.time_ticks % 30 == 0;

    PlayerInput {
        move_dir,
        crouch: false,
        jump,
        attack,
    }
}
