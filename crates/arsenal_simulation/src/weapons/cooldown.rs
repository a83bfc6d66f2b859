//! Cooldown timer одного оружия
//!
//! Инвариант: `elapsed` сбрасывается в 0 при переходе в ready,
//! ready становится true только когда `elapsed >= duration`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::weapon::FireRejected;

#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Cooldown {
    ready: bool,
    /// Прошло с момента выстрела (секунды), растёт только пока не ready
    elapsed: f32,
    /// Время восстановления (секунды)
    duration: f32,
}

impl Cooldown {
    /// Новый таймер, сразу готов к выстрелу
    pub fn new(duration: f32) -> Self {
        Self {
            ready: true,
            elapsed: 0.0,
            duration,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Продвинуть таймер на `delta` секунд
    pub fn tick(&mut self, delta: f32) {
        if self.ready {
            return;
        }

        self.elapsed += delta;
        if self.elapsed >= self.duration {
            self.ready = true;
            self.elapsed = 0.0;
        }
    }

    /// Выстрел: ready → recovering
    ///
    /// Пока не ready — `FireRejected::OnCooldown`, состояние не меняется.
    pub fn fire(&mut self) -> Result<(), FireRejected> {
        if !self.ready {
            return Err(FireRejected::OnCooldown);
        }

        self.start();
        Ok(())
    }

    /// Начать восстановление без проверки ready (конец beam channel)
    pub fn start(&mut self) {
        self.ready = false;
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cooldown_is_ready() {
        let cooldown = Cooldown::new(1.0);
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.elapsed(), 0.0);
    }

    #[test]
    fn test_fire_then_reject() {
        let mut cooldown = Cooldown::new(1.0);

        assert_eq!(cooldown.fire(), Ok(()));
        assert!(!cooldown.is_ready());
        assert_eq!(cooldown.fire(), Err(FireRejected::OnCooldown));
    }

    #[test]
    fn test_ready_after_cumulative_ticks() {
        // duration 1.0, тики по 0.4: ready только после третьего (1.2 ≥ 1.0)
        let mut cooldown = Cooldown::new(1.0);
        cooldown.fire().unwrap();

        cooldown.tick(0.4);
        assert!(!cooldown.is_ready());

        cooldown.tick(0.4);
        assert!(!cooldown.is_ready());
        assert_eq!(cooldown.fire(), Err(FireRejected::OnCooldown));

        cooldown.tick(0.4);
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.elapsed(), 0.0);
        assert_eq!(cooldown.fire(), Ok(()));
    }

    #[test]
    fn test_tick_while_ready_does_not_accumulate() {
        let mut cooldown = Cooldown::new(1.0);
        cooldown.tick(5.0);
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.elapsed(), 0.0);
    }

    #[test]
    fn test_start_restarts_recovery() {
        let mut cooldown = Cooldown::new(1.0);
        cooldown.fire().unwrap();
        cooldown.tick(0.5);

        cooldown.start();
        assert!(!cooldown.is_ready());
        assert_eq!(cooldown.elapsed(), 0.0);

        cooldown.tick(0.5);
        assert!(!cooldown.is_ready(), "elapsed must restart from zero");
        cooldown.tick(0.5);
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_exact_duration_makes_ready() {
        let mut cooldown = Cooldown::new(1.0);
        cooldown.fire().unwrap();

        cooldown.tick(0.5);
        cooldown.tick(0.5);
        assert!(cooldown.is_ready());
    }
}
