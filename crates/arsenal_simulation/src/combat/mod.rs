//! Combat module — всё, что происходит с целями после выстрела
//!
//! - Health / Frost: Damageable / Freezable capabilities
//! - Projectile flight + ProjectileHit → урон
//! - Thaw, death bookkeeping

use bevy::prelude::*;

pub mod damage;
pub mod health;
pub mod projectile;

pub use damage::{Dead, EntityDied};
pub use health::{EcsTargets, Frost, Health};
pub use projectile::{Projectile, ProjectileHit};

use crate::weapons::WeaponSystems;

/// Combat Plugin
///
/// Порядок выполнения (FixedUpdate, после WeaponSystems):
/// 1. move_projectiles — полёт + hit detection
/// 2. process_projectile_hits — урон от снарядов
/// 3. thaw_frozen — таймеры заморозки
/// 4. detect_deaths — Dead + EntityDied
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileHit>().add_event::<EntityDied>();

        app.add_systems(
            FixedUpdate,
            (
                projectile::move_projectiles,
                projectile::process_projectile_hits,
                health::thaw_frozen,
                damage::detect_deaths,
            )
                .chain()
                .after(WeaponSystems),
        );
    }
}
