//! Test doubles для weapon core (без App)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use super::events::VisualCue;
use super::weapon::{Muzzle, ProjectileLaunch, ProjectileSpawner, WeaponContext, WeaponFx};
use crate::combat::{Frost, Health};
use crate::targeting::{ray_sphere, Damageable, Freezable, RayHit, SpatialQuery, TargetCapabilities};

/// Сферы в мире (entity, center, radius)
#[derive(Default)]
pub struct FakeSpatial {
    pub bodies: Vec<(Entity, Vec3, f32)>,
}

impl SpatialQuery for FakeSpatial {
    fn overlap_sphere(&self, center: Vec3, radius: f32) -> Vec<Entity> {
        self.bodies
            .iter()
            .filter(|(_, position, body_radius)| position.distance(center) <= radius + body_radius)
            .map(|(entity, _, _)| *entity)
            .collect()
    }

    fn raycast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<RayHit> {
        self.bodies
            .iter()
            .filter_map(|(entity, position, radius)| {
                let distance = ray_sphere(origin, direction, *position, *radius)?;
                (distance <= max_distance).then(|| RayHit {
                    point: origin + *direction * distance,
                    entity: *entity,
                    distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[derive(Default)]
pub struct FakeTargets {
    pub health: HashMap<Entity, Health>,
    pub frost: HashMap<Entity, Frost>,
}

impl TargetCapabilities for FakeTargets {
    fn damageable(&mut self, entity: Entity) -> Option<&mut dyn Damageable> {
        self.health.get_mut(&entity).map(|health| health as &mut dyn Damageable)
    }

    fn freezable(&mut self, entity: Entity) -> Option<&mut dyn Freezable> {
        self.frost.get_mut(&entity).map(|frost| frost as &mut dyn Freezable)
    }
}

#[derive(Default)]
pub struct RecordingFx {
    pub cues: Vec<VisualCue>,
}

impl WeaponFx for RecordingFx {
    fn play_one_shot(&mut self) {
        self.cues.push(VisualCue::OneShot);
    }

    fn set_beam_enabled(&mut self, enabled: bool) {
        self.cues.push(VisualCue::BeamEnabled(enabled));
    }

    fn set_beam_path(&mut self, from: Vec3, to: Vec3) {
        self.cues.push(VisualCue::BeamPath { from, to });
    }
}

#[derive(Default)]
pub struct RecordingSpawner {
    pub launches: Vec<ProjectileLaunch>,
}

impl ProjectileSpawner for RecordingSpawner {
    fn spawn_projectile(&mut self, launch: ProjectileLaunch) {
        self.launches.push(launch);
    }
}

/// Стенд: оружие в origin смотрит в -Z
pub struct Rig {
    pub muzzle: Muzzle,
    pub spatial: FakeSpatial,
    pub targets: FakeTargets,
    pub fx: RecordingFx,
    pub projectiles: RecordingSpawner,
    pub rng: ChaCha8Rng,
    next_entity: u32,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            muzzle: Muzzle {
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
            },
            spatial: FakeSpatial::default(),
            targets: FakeTargets::default(),
            fx: RecordingFx::default(),
            projectiles: RecordingSpawner::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
            next_entity: 1,
        }
    }

    /// Тело без capabilities (стена, проп)
    pub fn add_body(&mut self, position: Vec3, radius: f32) -> Entity {
        let entity = Entity::from_raw(self.next_entity);
        self.next_entity += 1;
        self.spatial.bodies.push((entity, position, radius));
        entity
    }

    pub fn add_damageable(&mut self, position: Vec3, hp: f32) -> Entity {
        let entity = self.add_body(position, 0.5);
        self.targets.health.insert(entity, Health::new(hp));
        entity
    }

    pub fn add_freezable(&mut self, position: Vec3) -> Entity {
        let entity = self.add_body(position, 0.5);
        self.targets.frost.insert(entity, Frost::default());
        entity
    }

    pub fn health(&self, entity: Entity) -> f32 {
        self.targets.health[&entity].current
    }

    pub fn times_frozen(&self, entity: Entity) -> u32 {
        self.targets.frost[&entity].times_frozen
    }

    pub fn ctx(&mut self, delta: f32) -> WeaponContext<'_> {
        WeaponContext {
            muzzle: self.muzzle,
            delta,
            spatial: &self.spatial,
            targets: &mut self.targets,
            fx: &mut self.fx,
            projectiles: &mut self.projectiles,
            rng: &mut self.rng,
        }
    }
}
