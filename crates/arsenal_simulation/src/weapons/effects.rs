//! Effect parameters — скалярные параметры визуала от времени
//!
//! Чистые функции от `time` (секунды симуляции). Presentation layer читает
//! `EffectParams` компонент оружия и сам решает, куда их подать.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Линейный RGB цвет (0.0-1.0 на канал)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// Параметры визуала оружия на текущий тик
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct EffectParams {
    pub intensity: f32,
    pub color: Rgb,
}

// Fire: emission пульсирует от тлеющего к раскалённому
const FIRE_COLD: Rgb = Rgb::new(1.0, 0.25, 0.0);
const FIRE_HOT: Rgb = Rgb::new(1.0, 0.85, 0.3);

// Ice
const FROST_DEEP: Rgb = Rgb::new(0.1, 0.35, 0.9);
const FROST_PALE: Rgb = Rgb::new(0.75, 0.95, 1.0);

// Lightning
const SPARK_DIM: Rgb = Rgb::new(0.3, 0.35, 1.0);
const SPARK_BRIGHT: Rgb = Rgb::new(0.95, 0.95, 1.0);

/// sin, нормализованный в [0, 1]
pub fn normalized_sine(phase: f32) -> f32 {
    (phase.sin() + 1.0) * 0.5
}

/// Projectile: emission ∈ [0, 2]
pub fn fire_effect(time: f32) -> EffectParams {
    let wave = normalized_sine(time * 2.0);
    EffectParams {
        intensity: wave * 2.0,
        color: FIRE_COLD.lerp(FIRE_HOT, wave),
    }
}

/// Area effect: frost amount ∈ [0, 1]
pub fn frost_effect(time: f32) -> EffectParams {
    let wave = normalized_sine(time * 1.5);
    EffectParams {
        intensity: wave,
        color: FROST_DEEP.lerp(FROST_PALE, wave),
    }
}

/// Beam: electricity ∈ [0, 1], квадрат подчёркивает пики
pub fn lightning_effect(time: f32) -> EffectParams {
    let wave = normalized_sine(time * 8.0);
    let spike = wave * wave;
    EffectParams {
        intensity: spike,
        color: SPARK_DIM.lerp(SPARK_BRIGHT, spike),
    }
}
