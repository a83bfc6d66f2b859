//! Weapons module — выбор оружия, cooldown, алгоритмы стрельбы
//!
//! Core (чистый Rust, тестируется без App):
//! - `Cooldown` — fire-readiness одного оружия
//! - `Weapon` + `WeaponKind` — Projectile / AreaEffect / Beam
//! - `WeaponManager` — активный индекс, switch, per-tick dispatch
//!
//! ECS adapters (systems.rs):
//! - intents → switch / fire
//! - `WeaponVisualEvent`, `WeaponSwitched` → presentation layer
//! - `EffectParams` компонент обновляется каждый тик

use bevy::prelude::*;

pub mod config;
pub mod cooldown;
pub mod effects;
pub mod events;
pub mod manager;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod test_support;

pub use config::{WeaponConfig, WeaponKindConfig};
pub use cooldown::Cooldown;
pub use effects::{EffectParams, Rgb};
pub use events::{FireWeaponIntent, SwitchWeaponIntent, VisualCue, WeaponSwitched, WeaponVisualEvent};
pub use manager::{drive_active_weapon, SwitchNotifier, SwitchRejected, TickReport, WeaponManager, WeaponRack};
pub use weapon::{
    AreaParams, BeamParams, BeamSession, BeamState, FireOutcome, FireRejected, Muzzle, ProjectileLaunch,
    ProjectileParams, ProjectileSpawner, Weapon, WeaponContext, WeaponFx, WeaponKind,
};

/// Drawn / holstered — переключает только `WeaponManager`
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub enum WeaponPresence {
    #[default]
    Holstered,
    Drawn,
}

/// Все weapon системы (combat идёт после них)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct WeaponSystems;

/// Weapons Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. start_weapon_managers — новые managers активируют index 0
/// 2. process_switch_intents — switch до тика, чтобы fire шёл в новое оружие
/// 3. tick_active_weapons — cooldown, channel, effect params, fire
pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<FireWeaponIntent>()
            .add_event::<SwitchWeaponIntent>()
            .add_event::<WeaponSwitched>()
            .add_event::<WeaponVisualEvent>();

        app.add_systems(
            FixedUpdate,
            (
                systems::start_weapon_managers,
                systems::process_switch_intents,
                systems::tick_active_weapons,
            )
                .chain()
                .in_set(WeaponSystems),
        );
    }
}
