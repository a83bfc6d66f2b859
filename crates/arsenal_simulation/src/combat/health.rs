//! Health / Frost — capability компоненты целей
//!
//! - `Health` = Damageable (float HP, непрерывный урон от луча)
//! - `Frost` = Freezable (заморозка с таймером оттаивания)
//! - `EcsTargets` — optional capability lookup по этим компонентам

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::targeting::{Damageable, Freezable, TargetCapabilities};

/// Здоровье цели
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}

impl Damageable for Health {
    fn take_damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }
}

/// Заморозка (Freezable capability)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Frost {
    /// Сколько длится заморозка (секунды)
    pub duration: f32,
    /// Осталось до оттаивания (0 = не заморожен)
    pub remaining: f32,
    /// Сколько раз замораживали (для UI / тестов)
    pub times_frozen: u32,
}

impl Default for Frost {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl Frost {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
            times_frozen: 0,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn thaw(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }
}

impl Freezable for Frost {
    fn freeze(&mut self) {
        // Повторная заморозка обновляет таймер, не суммирует
        self.remaining = self.duration;
        self.times_frozen += 1;
    }
}

/// SystemParam: capability lookup по Health / Frost
#[derive(SystemParam)]
pub struct EcsTargets<'w, 's> {
    health: Query<'w, 's, &'static mut Health>,
    frost: Query<'w, 's, &'static mut Frost>,
}

impl TargetCapabilities for EcsTargets<'_, '_> {
    fn damageable(&mut self, entity: Entity) -> Option<&mut dyn Damageable> {
        let health = self.health.get_mut(entity).ok()?;
        Some(health.into_inner() as &mut dyn Damageable)
    }

    fn freezable(&mut self, entity: Entity) -> Option<&mut dyn Freezable> {
        let frost = self.frost.get_mut(entity).ok()?;
        Some(frost.into_inner() as &mut dyn Freezable)
    }
}

/// System: оттаивание
pub fn thaw_frozen(mut frozen: Query<&mut Frost>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut frost in frozen.iter_mut() {
        if frost.is_frozen() {
            frost.thaw(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamps_at_zero() {
        let mut health = Health::new(10.0);
        health.take_damage(4.0);
        assert_eq!(health.current, 6.0);

        health.take_damage(100.0);
        assert_eq!(health.current, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_frost_freeze_and_thaw() {
        let mut frost = Frost::new(2.0);
        assert!(!frost.is_frozen());

        frost.freeze();
        assert!(frost.is_frozen());
        assert_eq!(frost.times_frozen, 1);

        frost.thaw(1.5);
        assert!(frost.is_frozen());

        frost.thaw(1.0);
        assert!(!frost.is_frozen());
        assert_eq!(frost.remaining, 0.0);
    }

    #[test]
    fn test_refreeze_resets_timer() {
        let mut frost = Frost::new(2.0);
        frost.freeze();
        frost.thaw(1.5);

        frost.freeze();
        assert_eq!(frost.remaining, 2.0);
        assert_eq!(frost.times_frozen, 2);
    }
}
