//! Arsenal Simulation Core
//!
//! Headless ECS-симуляция оружия на Bevy 0.16:
//! - weapons: выбор оружия, cooldown, Projectile / AreaEffect / Beam
//! - targeting: capability-интерфейсы хоста (spatial queries, Damageable, Freezable)
//! - combat: цели (Health, Frost), полёт снарядов, смерть
//!
//! Rendering, VFX, UI и physics движка — на стороне хоста (events + traits).

use bevy::ecs::event::event_update_system;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Публичные модули
pub mod combat;
pub mod logger;
pub mod targeting;
pub mod weapons;

// Re-export для удобства
pub use combat::{CombatPlugin, Dead, EntityDied, Frost, Health, Projectile, ProjectileHit};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use targeting::{Damageable, Freezable, Hurtbox, RayHit, SpatialQuery, TargetCapabilities};
pub use weapons::{
    FireWeaponIntent, SwitchWeaponIntent, Weapon, WeaponConfig, WeaponManager, WeaponPresence, WeaponSwitched,
    WeaponVisualEvent, WeaponsPlugin,
};

/// Настройки симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Частота FixedUpdate (Hz)
    pub tick_hz: f64,
    /// Seed для DeterministicRng
    pub rng_seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            rng_seed: 42,
        }
    }
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Берёт `SimulationConfig` из world, если хост вставил его заранее.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.rng_seed));
        }

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_hz))
            .insert_resource(config)
            .add_plugins((WeaponsPlugin, CombatPlugin));
    }
}

/// Seeded ChaCha8 для всего, что в симуляции случайно (сейчас: jitter луча)
///
/// Один поток на world: порядок систем фиксирован, поэтому тот же seed
/// даёт те же пути луча.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    /// Исходный seed (для логов и SimulationConfig)
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (real-time clock)
///
/// Для воспроизводимого прогона хост ставит `TimeUpdateStrategy::ManualDuration`
/// и крутит `app.update()` (см. headless bin).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SimulationConfig {
            rng_seed: seed,
            ..default()
        })
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// App без real-time clock: хост сам шагает симуляцию через `step_simulation`
///
/// Удобно для тестов и для хостов со своим game loop.
pub fn create_stepped_app(seed: u64) -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .insert_resource(SimulationConfig {
            rng_seed: seed,
            ..default()
        })
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Один тик симуляции длиной `delta` секунд (FixedUpdate schedule)
///
/// `First` здесь не запускается, поэтому event buffers свапаем сами:
/// событие живёт два тика, системы FixedUpdate успевают его прочитать.
pub fn step_simulation(app: &mut App, delta: f32) {
    let world = app.world_mut();
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(delta));
    world.run_schedule(FixedUpdate);

    if let Err(error) = world.run_system_cached(event_update_system) {
        log_error(&format!("Event buffers not updated: {}", error));
    }
}

/// Байтовый отпечаток всех компонентов `T` (Debug-формат, по порядку entity)
///
/// Два прогона с одним seed должны давать одинаковые отпечатки `Health`,
/// `Frost` и т.п. Порядок итерации query не стабилен, поэтому сортируем.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut rows: Vec<(u64, String)> = world
        .query::<(Entity, &T)>()
        .iter(world)
        .map(|(entity, component)| (entity.to_bits(), format!("{:?}", component)))
        .collect();
    rows.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    rows.into_iter()
        .flat_map(|(bits, row)| bits.to_le_bytes().into_iter().chain(row.into_bytes()))
        .collect()
}
