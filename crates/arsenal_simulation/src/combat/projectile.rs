//! Projectile flight (минимальная projectile-physics подсистема)
//!
//! Оружие только спавнит `Projectile` — урон применяет снаряд:
//! 1. move_projectiles — sweep raycast по пути за тик → ProjectileHit
//! 2. process_projectile_hits — ProjectileHit → Damageable

use bevy::prelude::*;

use super::health::EcsTargets;
use crate::{log, log_warning};
use crate::targeting::{HurtboxSpatialQuery, SpatialQuery, TargetCapabilities};

/// Летящий снаряд
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Projectile {
    /// Wielder, который выстрелил (для предотвращения self-hit)
    pub shooter: Entity,
    /// Скорость (м/с, world space)
    pub velocity: Vec3,
    /// Урон при попадании
    pub impact_damage: f32,
    /// Осталось жить (секунды)
    pub lifetime: f32,
}

/// Event: снаряд попал в цель
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ProjectileHit {
    pub shooter: Entity,
    pub target: Entity,
    pub damage: f32,
    pub impact_point: Vec3,
}

/// System: полёт снарядов + sweep hit detection
pub fn move_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    spatial: HurtboxSpatialQuery,
    mut hits: EventWriter<ProjectileHit>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut projectile) in projectiles.iter_mut() {
        let travel = projectile.velocity * delta;

        if let Ok(direction) = Dir3::new(travel) {
            let hit = spatial
                .raycast(transform.translation, direction, travel.length())
                .filter(|hit| hit.entity != projectile.shooter);

            if let Some(hit) = hit {
                hits.write(ProjectileHit {
                    shooter: projectile.shooter,
                    target: hit.entity,
                    damage: projectile.impact_damage,
                    impact_point: hit.point,
                });
                commands.entity(entity).despawn();
                continue;
            }
        }

        transform.translation += travel;
        projectile.lifetime -= delta;

        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// System: обработка ProjectileHit событий → нанесение урона
pub fn process_projectile_hits(mut hit_events: EventReader<ProjectileHit>, mut targets: EcsTargets) {
    for hit in hit_events.read() {
        if hit.shooter == hit.target {
            log_warning(&format!("SELF-HIT DETECTED! Entity {:?} hit itself!", hit.shooter));
            continue;
        }

        // Без Damageable (стена, проп) — снаряд просто разбился
        let Some(target) = targets.damageable(hit.target) else {
            continue;
        };
        target.take_damage(hit.damage);

        log(&format!(
            "🎯 Projectile hit: shooter={:?} → target={:?} dmg={} at {:?}",
            hit.shooter, hit.target, hit.damage, hit.impact_point
        ));
    }
}
