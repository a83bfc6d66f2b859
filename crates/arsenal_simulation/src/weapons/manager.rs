//! WeaponManager — выбор активного оружия и per-tick dispatch
//!
//! # Switch order
//! 1. deactivate текущего (beam channel прерывается)
//! 2. commit нового `active`
//! 3. activate нового
//! 4. notify selector
//!
//! Перед шагом 1 rack подтверждает, что новое оружие можно активировать,
//! иначе switch отклоняется целиком.
//!
//! Так два оружия никогда не активны одновременно, а notifier видит
//! уже закоммиченное состояние.

use bevy::prelude::*;

use super::effects::EffectParams;
use super::weapon::{FireOutcome, FireRejected, Weapon, WeaponContext};

/// Switch отклонён (state не изменился)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchRejected {
    OutOfRange { index: usize, len: usize },
    /// Weapon entity по индексу нельзя активировать (stale reference)
    Unavailable { index: usize },
}

/// Activation оружия (drawn/holstered + cancel channel)
pub trait WeaponRack {
    /// Можно ли активировать weapon (entity жив и это оружие)
    fn is_available(&self, weapon: Entity) -> bool;
    fn deactivate(&mut self, weapon: Entity);
    fn activate(&mut self, weapon: Entity);
}

/// Selection notifier (presentation: подсветка слота и т.п.)
pub trait SwitchNotifier {
    fn weapon_switched(&mut self, index: usize);
}

/// Weapon manager component (на wielder entity)
///
/// Ссылается на weapon entities (не владеет ими). Список не меняется
/// после создания, индексы стабильны.
///
/// Инвариант: `active` = Some(i), i < len, если список не пуст; None если пуст.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WeaponManager {
    weapons: Vec<Entity>,
    active: Option<usize>,
}

impl WeaponManager {
    pub fn new(weapons: Vec<Entity>) -> Self {
        let active = if weapons.is_empty() { None } else { Some(0) };
        Self { weapons, active }
    }

    pub fn weapons(&self) -> &[Entity] {
        &self.weapons
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_weapon(&self) -> Option<Entity> {
        self.active.and_then(|index| self.weapons.get(index).copied())
    }

    /// Startup: активировать index 0 (если есть оружие) и оповестить selector
    pub fn start(&mut self, rack: &mut dyn WeaponRack, notifier: &mut dyn SwitchNotifier) {
        let (Some(index), Some(weapon)) = (self.active, self.active_weapon()) else {
            return;
        };
        if !rack.is_available(weapon) {
            return;
        }

        rack.activate(weapon);
        notifier.weapon_switched(index);
    }

    /// Переключиться на `index`
    ///
    /// Out of range или недоступное оружие → `SwitchRejected`,
    /// активное оружие не трогаем.
    pub fn switch_to(
        &mut self,
        index: usize,
        rack: &mut dyn WeaponRack,
        notifier: &mut dyn SwitchNotifier,
    ) -> Result<(), SwitchRejected> {
        let Some(&next) = self.weapons.get(index) else {
            return Err(SwitchRejected::OutOfRange {
                index,
                len: self.weapons.len(),
            });
        };
        if !rack.is_available(next) {
            return Err(SwitchRejected::Unavailable { index });
        }

        if let Some(current) = self.active_weapon() {
            rack.deactivate(current);
        }

        self.active = Some(index);
        rack.activate(next);
        notifier.weapon_switched(index);

        Ok(())
    }
}

/// Что произошло с активным оружием за тик
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub effects: EffectParams,
    /// None = fire не запрашивали
    pub fire: Option<Result<FireOutcome, FireRejected>>,
}

/// Per-tick dispatch активного оружия
///
/// Порядок: cooldown + channel → effect parameters → fire.
/// Effect parameters считаются каждый тик, fire gated cooldown'ом самого оружия.
pub fn drive_active_weapon(
    weapon: &mut Weapon,
    ctx: &mut WeaponContext,
    time: f32,
    fire_requested: bool,
) -> TickReport {
    weapon.tick(ctx);
    let effects = weapon.effect_parameters(time);
    let fire = fire_requested.then(|| weapon.fire(ctx));

    TickReport { effects, fire }
}
