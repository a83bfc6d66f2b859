//! Targeting — внешние capability-интерфейсы, которые потребляет оружие
//!
//! Core оружия не знает, кто отвечает на spatial queries:
//! - `SpatialQuery` — overlap сферой + raycast (physics хоста)
//! - `TargetCapabilities` — optional lookup `Damageable` / `Freezable` у entity
//!
//! Default backend для headless симуляции — `HurtboxSpatialQuery`
//! (сферы `Hurtbox` + `Transform`). Хост с настоящей физикой подставляет свой.

use bevy::prelude::*;

pub mod hurtbox;

pub use hurtbox::{ray_sphere, Hurtbox, HurtboxSpatialQuery};

/// Результат raycast: первое препятствие вдоль луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Точка попадания (world space)
    pub point: Vec3,
    /// Во что попали
    pub entity: Entity,
    /// Дистанция от origin до `point`
    pub distance: f32,
}

/// Spatial queries хоста
///
/// Отказ backend'а (нет physics world и т.п.) выражается пустым результатом,
/// а не ошибкой.
pub trait SpatialQuery {
    /// Все entity, пересекающие сферу. Без дубликатов, порядок не гарантирован.
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<Entity>;

    /// Первое препятствие вдоль `direction` не дальше `max_distance`
    fn raycast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<RayHit>;
}

/// Capability: entity может получать урон
pub trait Damageable {
    fn take_damage(&mut self, amount: f32);
}

/// Capability: entity может быть заморожен
pub trait Freezable {
    fn freeze(&mut self);
}

/// Optional capability lookup по entity
///
/// `None` = у entity нет capability. Это не ошибка, оружие просто пропускает цель.
pub trait TargetCapabilities {
    fn damageable(&mut self, entity: Entity) -> Option<&mut dyn Damageable>;
    fn freezable(&mut self, entity: Entity) -> Option<&mut dyn Freezable>;
}
