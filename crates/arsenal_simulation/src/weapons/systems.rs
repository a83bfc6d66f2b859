//! Weapon systems (ECS adapters вокруг core)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::collections::HashSet;

use super::events::{FireWeaponIntent, SwitchWeaponIntent, VisualCue, WeaponSwitched, WeaponVisualEvent};
use super::manager::{drive_active_weapon, SwitchNotifier, WeaponManager, WeaponRack};
use super::weapon::{Muzzle, ProjectileLaunch, ProjectileSpawner, Weapon, WeaponContext, WeaponFx};
use super::{EffectParams, WeaponPresence};
use crate::combat::{EcsTargets, Projectile};
use crate::targeting::HurtboxSpatialQuery;
use crate::{log, log_error, DeterministicRng};

// ============================================================================
// Adapters
// ============================================================================

/// WeaponFx → WeaponVisualEvent
struct VisualEvents<'a, 'w> {
    weapon: Entity,
    events: &'a mut EventWriter<'w, WeaponVisualEvent>,
}

impl WeaponFx for VisualEvents<'_, '_> {
    fn play_one_shot(&mut self) {
        self.events.write(WeaponVisualEvent {
            weapon: self.weapon,
            cue: VisualCue::OneShot,
        });
    }

    fn set_beam_enabled(&mut self, enabled: bool) {
        self.events.write(WeaponVisualEvent {
            weapon: self.weapon,
            cue: VisualCue::BeamEnabled(enabled),
        });
    }

    fn set_beam_path(&mut self, from: Vec3, to: Vec3) {
        self.events.write(WeaponVisualEvent {
            weapon: self.weapon,
            cue: VisualCue::BeamPath { from, to },
        });
    }
}

/// ProjectileSpawner → Projectile entity через Commands
struct ProjectileCommands<'a, 'w, 's> {
    shooter: Entity,
    commands: &'a mut Commands<'w, 's>,
}

impl ProjectileSpawner for ProjectileCommands<'_, '_, '_> {
    fn spawn_projectile(&mut self, launch: ProjectileLaunch) {
        self.commands.spawn((
            Transform::from_translation(launch.position).with_rotation(launch.rotation),
            Projectile {
                shooter: self.shooter,
                velocity: launch.velocity,
                impact_damage: launch.impact_damage,
                lifetime: launch.lifetime,
            },
        ));
    }
}

/// WeaponRack → WeaponPresence + cancel beam channel
#[derive(SystemParam)]
pub struct PresenceRack<'w, 's> {
    weapons: Query<'w, 's, (&'static mut Weapon, &'static mut WeaponPresence)>,
    visuals: EventWriter<'w, WeaponVisualEvent>,
}

impl WeaponRack for PresenceRack<'_, '_> {
    fn is_available(&self, weapon: Entity) -> bool {
        self.weapons.contains(weapon)
    }

    fn deactivate(&mut self, weapon: Entity) {
        let Ok((mut stats, mut presence)) = self.weapons.get_mut(weapon) else {
            log_error(&format!("Weapon {:?} missing Weapon component", weapon));
            return;
        };

        let mut fx = VisualEvents {
            weapon,
            events: &mut self.visuals,
        };
        if stats.cancel_channel(&mut fx) {
            log(&format!("⚡ Channel of {} cancelled (holstered)", stats.name));
        }

        *presence = WeaponPresence::Holstered;
    }

    fn activate(&mut self, weapon: Entity) {
        let Ok((_, mut presence)) = self.weapons.get_mut(weapon) else {
            log_error(&format!("Weapon {:?} missing Weapon component", weapon));
            return;
        };

        *presence = WeaponPresence::Drawn;
    }
}

/// SwitchNotifier → WeaponSwitched event
struct SwitchEvents<'a, 'w> {
    wielder: Entity,
    events: &'a mut EventWriter<'w, WeaponSwitched>,
}

impl SwitchNotifier for SwitchEvents<'_, '_> {
    fn weapon_switched(&mut self, index: usize) {
        self.events.write(WeaponSwitched {
            wielder: self.wielder,
            index,
        });
    }
}

// ============================================================================
// Systems
// ============================================================================

/// System: новые WeaponManager активируют index 0
pub fn start_weapon_managers(
    mut managers: Query<(Entity, &mut WeaponManager), Added<WeaponManager>>,
    mut rack: PresenceRack,
    mut switched: EventWriter<WeaponSwitched>,
) {
    for (wielder, mut manager) in managers.iter_mut() {
        let mut notifier = SwitchEvents {
            wielder,
            events: &mut switched,
        };

        if let Some(weapon) = manager.active_weapon() {
            if !rack.is_available(weapon) {
                log_error(&format!("Wielder {:?}: weapon {:?} unavailable, nothing drawn", wielder, weapon));
            }
        }
        manager.start(&mut rack, &mut notifier);

        log(&format!(
            "Wielder {:?} armed with {} weapons (active: {:?})",
            wielder,
            manager.len(),
            manager.active_index()
        ));
    }
}

/// System: SwitchWeaponIntent → WeaponManager::switch_to
pub fn process_switch_intents(
    mut intents: EventReader<SwitchWeaponIntent>,
    mut managers: Query<&mut WeaponManager>,
    mut rack: PresenceRack,
    mut switched: EventWriter<WeaponSwitched>,
) {
    for intent in intents.read() {
        let Ok(mut manager) = managers.get_mut(intent.wielder) else {
            log_error(&format!("Wielder {:?} missing WeaponManager", intent.wielder));
            continue;
        };

        let mut notifier = SwitchEvents {
            wielder: intent.wielder,
            events: &mut switched,
        };

        match manager.switch_to(intent.index, &mut rack, &mut notifier) {
            Ok(()) => log(&format!("🔁 Wielder {:?} switched to weapon {}", intent.wielder, intent.index)),
            Err(rejected) => log(&format!("Switch ignored for {:?}: {:?}", intent.wielder, rejected)),
        }
    }
}

/// World pose entity: локальный `Transform`, собранный вверх по `ChildOf`
///
/// Не зависит от `GlobalTransform` propagation (stepped app без TransformPlugin).
/// Родитель без `Transform` считается root.
fn world_pose(entity: Entity, poses: &Query<(&Transform, Option<&ChildOf>)>) -> Option<Transform> {
    let (local, mut parent) = poses.get(entity).ok()?;
    let mut pose = *local;

    while let Some(child_of) = parent {
        let Ok((parent_local, next)) = poses.get(child_of.parent()) else {
            break;
        };
        pose = parent_local.mul_transform(pose);
        parent = next;
    }

    Some(pose)
}

/// System: per-tick dispatch активного оружия
///
/// Для каждого wielder: cooldown + beam channel → EffectParams → fire
/// (если в этом тике был FireWeaponIntent). Muzzle = world pose оружия,
/// так что оружие можно парентить к wielder.
pub fn tick_active_weapons(
    mut commands: Commands,
    time: Res<Time>,
    mut fire_intents: EventReader<FireWeaponIntent>,
    managers: Query<(Entity, &WeaponManager)>,
    mut weapons: Query<(&mut Weapon, &mut EffectParams)>,
    poses: Query<(&Transform, Option<&ChildOf>)>,
    spatial: HurtboxSpatialQuery,
    mut targets: EcsTargets,
    mut visuals: EventWriter<WeaponVisualEvent>,
    mut rng: ResMut<DeterministicRng>,
) {
    let fire_requests: HashSet<Entity> = fire_intents.read().map(|intent| intent.wielder).collect();
    let delta = time.delta_secs();
    let now = time.elapsed_secs();

    for (wielder, manager) in managers.iter() {
        let Some(weapon_entity) = manager.active_weapon() else {
            continue;
        };
        let (Ok((mut weapon, mut effects)), Some(pose)) =
            (weapons.get_mut(weapon_entity), world_pose(weapon_entity, &poses))
        else {
            log_error(&format!("Active weapon {:?} of {:?} missing components", weapon_entity, wielder));
            continue;
        };

        let mut fx = VisualEvents {
            weapon: weapon_entity,
            events: &mut visuals,
        };
        let mut projectiles = ProjectileCommands {
            shooter: wielder,
            commands: &mut commands,
        };
        let mut ctx = WeaponContext {
            muzzle: Muzzle::from_transform(&pose),
            delta,
            spatial: &spatial,
            targets: &mut targets,
            fx: &mut fx,
            projectiles: &mut projectiles,
            rng: &mut rng.rng,
        };

        let was_channeling = weapon.is_channeling();
        let report = drive_active_weapon(&mut weapon, &mut ctx, now, fire_requests.contains(&wielder));
        *effects = report.effects;

        if was_channeling && !weapon.is_channeling() {
            log(&format!("⚡ {} channel finished, cooldown started", weapon.name));
        }

        match report.fire {
            Some(Ok(outcome)) => log(&format!("🔥 {:?} fired {}: {:?}", wielder, weapon.name, outcome)),
            Some(Err(rejected)) => log(&format!("{:?} fire rejected ({}): {:?}", wielder, weapon.name, rejected)),
            None => {}
        }
    }
}
