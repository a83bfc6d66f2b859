//! Weapon events (input intents + presentation outputs)
//!
//! Host → ECS: `FireWeaponIntent`, `SwitchWeaponIntent`
//! ECS → Host: `WeaponVisualEvent`, `WeaponSwitched`

use bevy::prelude::*;

/// Wielder хочет стрелять в этом тике (кнопка зажата)
#[derive(Event, Debug, Clone)]
pub struct FireWeaponIntent {
    pub wielder: Entity,
}

/// Wielder хочет переключиться на оружие с индексом `index`
#[derive(Event, Debug, Clone)]
pub struct SwitchWeaponIntent {
    pub wielder: Entity,
    pub index: usize,
}

/// Selection changed — новый активный индекс уже закоммичен
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct WeaponSwitched {
    pub wielder: Entity,
    pub index: usize,
}

/// Визуальная команда для presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualCue {
    OneShot,
    BeamEnabled(bool),
    BeamPath { from: Vec3, to: Vec3 },
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct WeaponVisualEvent {
    pub weapon: Entity,
    pub cue: VisualCue,
}
