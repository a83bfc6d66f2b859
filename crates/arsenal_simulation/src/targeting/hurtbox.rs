//! Hurtbox spheres — default `SpatialQuery` backend
//!
//! Brute-force по всем `Hurtbox`. Для headless симуляции и тестов хватает,
//! engine bindings подставляют physics движка.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{RayHit, SpatialQuery};
use crate::combat::Projectile;

/// Сферический hurtbox вокруг `Transform::translation`
///
/// Позиция берётся из локального `Transform`: hurtbox entities — root.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Hurtbox {
    /// Радиус сферы (метры)
    pub radius: f32,
}

impl Default for Hurtbox {
    fn default() -> Self {
        Self { radius: 0.5 }
    }
}

/// SystemParam: spatial queries по hurtbox'ам
///
/// Projectiles исключены фильтром, чтобы `move_projectiles` мог
/// мутировать их `Transform` в той же системе.
#[derive(SystemParam)]
pub struct HurtboxSpatialQuery<'w, 's> {
    hurtboxes: Query<'w, 's, (Entity, &'static Transform, &'static Hurtbox), Without<Projectile>>,
}

impl SpatialQuery for HurtboxSpatialQuery<'_, '_> {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<Entity> {
        self.hurtboxes
            .iter()
            .filter(|(_, transform, hurtbox)| {
                transform.translation.distance(center) <= radius + hurtbox.radius
            })
            .map(|(entity, _, _)| entity)
            .collect()
    }

    fn raycast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<RayHit> {
        self.hurtboxes
            .iter()
            .filter_map(|(entity, transform, hurtbox)| {
                let distance = ray_sphere(origin, direction, transform.translation, hurtbox.radius)?;
                (distance <= max_distance).then(|| RayHit {
                    point: origin + *direction * distance,
                    entity,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Пересечение луча со сферой: дистанция до входа
///
/// Луч, стартующий внутри сферы, её игнорирует (так стрелок не попадает
/// в собственный hurtbox).
pub fn ray_sphere(origin: Vec3, direction: Dir3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }

    let b = offset.dot(*direction);
    if b > 0.0 {
        // Сфера позади
        return None;
    }

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    Some(-b - discriminant.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_sphere_in_front() {
        let distance = ray_sphere(Vec3::ZERO, Dir3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), 1.0);
        let distance = distance.expect("sphere in front must be hit");
        assert!((distance - 9.0).abs() < 1e-5, "distance = {}", distance);
    }

    #[test]
    fn test_ray_misses_sphere_behind() {
        assert!(ray_sphere(Vec3::ZERO, Dir3::NEG_Z, Vec3::new(0.0, 0.0, 10.0), 1.0).is_none());
    }

    #[test]
    fn test_ray_misses_sphere_to_the_side() {
        assert!(ray_sphere(Vec3::ZERO, Dir3::NEG_Z, Vec3::new(3.0, 0.0, -10.0), 1.0).is_none());
    }

    #[test]
    fn test_ray_from_inside_sphere_ignores_it() {
        assert!(ray_sphere(Vec3::ZERO, Dir3::NEG_Z, Vec3::ZERO, 1.0).is_none());
    }
}
