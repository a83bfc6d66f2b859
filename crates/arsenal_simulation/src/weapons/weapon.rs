//! Weapon component + три алгоритма стрельбы
//!
//! Architecture:
//! - `Weapon` владеет `Cooldown` и variant-специфичным состоянием (`WeaponKind`)
//! - Коллабораторы приходят через `WeaponContext` (trait objects),
//!   поэтому state machine можно шагать в тестах без `App`
//! - Beam channel = явная state machine (`BeamState`), продвигается раз в тик
//!
//! Variants:
//! - Projectile: spawn снаряда, урон на стороне снаряда
//! - AreaEffect: overlap сферой → `freeze()` каждому Freezable
//! - Beam: 2 секунды channel, raycast + урон каждый тик

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::cooldown::Cooldown;
use super::effects::{fire_effect, frost_effect, lightning_effect, EffectParams};
use crate::targeting::{SpatialQuery, TargetCapabilities};

/// Почему выстрел отклонён (не ошибка, просто "ничего не произошло")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejected {
    /// Cooldown ещё не восстановился
    OnCooldown,
    /// Beam уже в channel, перезапуск посреди burst запрещён
    Channeling,
}

/// Результат успешного выстрела
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOutcome {
    /// Снаряд запущен с этой начальной скоростью
    Launched { velocity: Vec3 },
    /// Сколько Freezable целей заморожено
    Froze { affected: usize },
    /// Beam channel начался
    ChannelStarted,
}

/// Позиция + ориентация ствола (world space)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Muzzle {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Muzzle {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            rotation: transform.rotation,
        }
    }

    /// Forward = -Z (Bevy convention)
    pub fn forward(&self) -> Dir3 {
        self.rotation * Dir3::NEG_Z
    }
}

/// Запрос на spawn снаряда
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileLaunch {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub impact_damage: f32,
    pub lifetime: f32,
}

/// Визуальные эффекты оружия (fire-and-forget)
pub trait WeaponFx {
    fn play_one_shot(&mut self);
    fn set_beam_enabled(&mut self, enabled: bool);
    fn set_beam_path(&mut self, from: Vec3, to: Vec3);
}

/// Projectile-physics подсистема (внешняя для core)
pub trait ProjectileSpawner {
    fn spawn_projectile(&mut self, launch: ProjectileLaunch);
}

/// Всё, что нужно оружию на один тик / выстрел
pub struct WeaponContext<'a> {
    pub muzzle: Muzzle,
    /// Длительность тика (секунды)
    pub delta: f32,
    pub spatial: &'a dyn SpatialQuery,
    pub targets: &'a mut dyn TargetCapabilities,
    pub fx: &'a mut dyn WeaponFx,
    pub projectiles: &'a mut dyn ProjectileSpawner,
    /// Детерминистичный RNG (косметический jitter луча)
    pub rng: &'a mut ChaCha8Rng,
}

// ============================================================================
// Variant parameters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ProjectileParams {
    /// Начальная скорость (м/с)
    pub speed: f32,
    /// Урон при попадании (применяет снаряд, не оружие)
    pub impact_damage: f32,
    /// Время жизни снаряда (секунды)
    pub lifetime: f32,
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct AreaParams {
    /// Радиус заморозки вокруг оружия (метры)
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct BeamParams {
    /// Дальность луча (метры)
    pub max_distance: f32,
    /// Длительность channel (секунды)
    pub burst_duration: f32,
    /// Доля пути start→end для визуальной точки
    pub visual_reach: f32,
    /// Максимальная длина jitter визуальной точки (метры)
    pub jitter: f32,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            max_distance: 30.0,
            burst_duration: 2.0,
            visual_reach: 0.8,
            jitter: 0.2,
        }
    }
}

/// Transient состояние одного channel
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct BeamSession {
    pub elapsed_in_burst: f32,
    pub start_point: Vec3,
    /// Конец луча (обрезан препятствием, если было попадание)
    pub end_point: Vec3,
    /// Что луч задел в последнем тике
    pub last_hit: Option<Entity>,
}

#[derive(Debug, Clone, PartialEq, Default, Reflect)]
pub enum BeamState {
    #[default]
    Idle,
    Channeling(BeamSession),
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum WeaponKind {
    Projectile(ProjectileParams),
    AreaEffect(AreaParams),
    Beam { params: BeamParams, state: BeamState },
}

// ============================================================================
// Weapon
// ============================================================================

/// Weapon component
///
/// Видимость (drawn/holstered) не здесь — ей управляет `WeaponManager`
/// через `WeaponPresence`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform, EffectParams, super::WeaponPresence)]
pub struct Weapon {
    pub name: String,
    pub damage_per_second: f32,
    pub cooldown: Cooldown,
    pub kind: WeaponKind,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage_per_second: f32, cooldown: f32, kind: WeaponKind) -> Self {
        Self {
            name: name.into(),
            damage_per_second,
            cooldown: Cooldown::new(cooldown),
            kind,
        }
    }

    pub fn is_channeling(&self) -> bool {
        matches!(
            self.kind,
            WeaponKind::Beam {
                state: BeamState::Channeling(_),
                ..
            }
        )
    }

    /// Активный beam session (None если не channel)
    pub fn beam_session(&self) -> Option<&BeamSession> {
        match &self.kind {
            WeaponKind::Beam {
                state: BeamState::Channeling(session),
                ..
            } => Some(session),
            _ => None,
        }
    }

    /// Параметры визуала на момент `time` (чистая функция)
    pub fn effect_parameters(&self, time: f32) -> EffectParams {
        match self.kind {
            WeaponKind::Projectile(_) => fire_effect(time),
            WeaponKind::AreaEffect(_) => frost_effect(time),
            WeaponKind::Beam { .. } => lightning_effect(time),
        }
    }

    /// Тик: cooldown, затем шаг beam channel (если идёт)
    pub fn tick(&mut self, ctx: &mut WeaponContext) {
        self.cooldown.tick(ctx.delta);

        if let WeaponKind::Beam { params, state } = &mut self.kind {
            advance_channel(params, state, &mut self.cooldown, self.damage_per_second, ctx);
        }
    }

    /// Выстрел. Cooldown/channel проверяет само оружие.
    pub fn fire(&mut self, ctx: &mut WeaponContext) -> Result<FireOutcome, FireRejected> {
        if self.is_channeling() {
            return Err(FireRejected::Channeling);
        }
        if !self.cooldown.is_ready() {
            return Err(FireRejected::OnCooldown);
        }

        match &mut self.kind {
            WeaponKind::Projectile(params) => {
                let velocity = *ctx.muzzle.forward() * params.speed;
                ctx.projectiles.spawn_projectile(ProjectileLaunch {
                    position: ctx.muzzle.position,
                    rotation: ctx.muzzle.rotation,
                    velocity,
                    impact_damage: params.impact_damage,
                    lifetime: params.lifetime,
                });
                ctx.fx.play_one_shot();
                self.cooldown.fire()?;

                Ok(FireOutcome::Launched { velocity })
            }
            WeaponKind::AreaEffect(params) => {
                let mut affected = 0;
                for entity in ctx.spatial.overlap_sphere(ctx.muzzle.position, params.radius) {
                    // Без Freezable — просто пропускаем
                    if let Some(target) = ctx.targets.freezable(entity) {
                        target.freeze();
                        affected += 1;
                    }
                }
                ctx.fx.play_one_shot();
                self.cooldown.fire()?;

                Ok(FireOutcome::Froze { affected })
            }
            WeaponKind::Beam { state, .. } => {
                let start = ctx.muzzle.position;
                *state = BeamState::Channeling(BeamSession {
                    elapsed_in_burst: 0.0,
                    start_point: start,
                    end_point: start,
                    last_hit: None,
                });
                ctx.fx.set_beam_enabled(true);

                Ok(FireOutcome::ChannelStarted)
            }
        }
    }

    /// Принудительно прервать channel (weapon убрали посреди burst)
    ///
    /// Визуал выключается, оставшиеся тики урона пропускаются,
    /// cooldown не трогаем. Возвращает true если channel был.
    pub fn cancel_channel(&mut self, fx: &mut dyn WeaponFx) -> bool {
        let WeaponKind::Beam { state, .. } = &mut self.kind else {
            return false;
        };
        if !matches!(state, BeamState::Channeling(_)) {
            return false;
        }

        *state = BeamState::Idle;
        fx.set_beam_enabled(false);
        true
    }
}

/// Один шаг channel
///
/// Последний тик обрезается до остатка burst, поэтому полный channel
/// наносит ровно `damage_per_second * burst_duration`.
fn advance_channel(
    params: &BeamParams,
    state: &mut BeamState,
    cooldown: &mut Cooldown,
    damage_per_second: f32,
    ctx: &mut WeaponContext,
) {
    let BeamState::Channeling(session) = state else {
        return;
    };

    let remaining = params.burst_duration - session.elapsed_in_burst;
    let step = ctx.delta.min(remaining).max(0.0);

    let start = ctx.muzzle.position;
    let forward = ctx.muzzle.forward();
    let mut end = start + *forward * params.max_distance;
    session.last_hit = None;

    if let Some(hit) = ctx.spatial.raycast(start, forward, params.max_distance) {
        end = hit.point;
        session.last_hit = Some(hit.entity);
        if let Some(target) = ctx.targets.damageable(hit.entity) {
            target.take_damage(damage_per_second * step);
        }
    }

    session.start_point = start;
    session.end_point = end;

    // Jitter только косметика: на урон и hit detection не влияет
    let jitter = random_offset(ctx.rng, params.jitter);
    ctx.fx.set_beam_path(start, start.lerp(end, params.visual_reach) + jitter);

    session.elapsed_in_burst += step;

    if step >= remaining {
        *state = BeamState::Idle;
        ctx.fx.set_beam_enabled(false);
        cooldown.start();
    }
}

/// Случайный offset длиной ≤ `max_length`
fn random_offset(rng: &mut ChaCha8Rng, max_length: f32) -> Vec3 {
    let offset = Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    );
    offset.clamp_length_max(1.0) * max_length
}
