//! Death bookkeeping
//!
//! Урон применяется через `Damageable` (beam, projectile hits), здесь только
//! ловим переход alive → dead по изменённому `Health`.

use bevy::prelude::*;

use super::health::Health;
use crate::log_info;

/// Событие: entity умер (health <= 0)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
}

/// Компонент-маркер: entity мертв
///
/// Деспавн не автоматический — хост решает, что делать с трупом.
#[derive(Component, Debug)]
pub struct Dead;

/// System: Changed<Health> → Dead + EntityDied
pub fn detect_deaths(
    mut commands: Commands,
    changed: Query<(Entity, &Health), (Changed<Health>, Without<Dead>)>,
    mut died: EventWriter<EntityDied>,
) {
    for (entity, health) in changed.iter() {
        if health.is_alive() {
            continue;
        }

        commands.entity(entity).insert(Dead);
        died.write(EntityDied { entity });

        log_info(&format!("💀 Entity {:?} died", entity));
    }
}
