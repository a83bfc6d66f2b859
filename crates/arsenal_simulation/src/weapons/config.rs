//! Weapon presets
//!
//! `WeaponConfig` — immutable blueprint (serde, хост может грузить из данных),
//! `build()` даёт свежий `Weapon` с ready cooldown и idle beam.

use serde::{Deserialize, Serialize};

use super::weapon::{AreaParams, BeamParams, BeamState, ProjectileParams, Weapon, WeaponKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WeaponKindConfig {
    Projectile(ProjectileParams),
    AreaEffect(AreaParams),
    Beam(BeamParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    pub name: String,
    pub damage_per_second: f32,
    /// Cooldown после выстрела / конца channel (секунды)
    pub cooldown: f32,
    pub kind: WeaponKindConfig,
}

impl WeaponConfig {
    /// Fire bolt (projectile)
    pub fn fire_bolt() -> Self {
        Self {
            name: "Fire Bolt".into(),
            damage_per_second: 0.0,
            cooldown: 0.5,
            kind: WeaponKindConfig::Projectile(ProjectileParams {
                speed: 20.0,
                impact_damage: 25.0,
                lifetime: 3.0,
            }),
        }
    }

    /// Ice nova (area freeze)
    pub fn ice_nova() -> Self {
        Self {
            name: "Ice Nova".into(),
            damage_per_second: 0.0,
            cooldown: 2.0,
            kind: WeaponKindConfig::AreaEffect(AreaParams { radius: 5.0 }),
        }
    }

    /// Lightning (channeled beam)
    pub fn lightning() -> Self {
        Self {
            name: "Lightning".into(),
            damage_per_second: 30.0,
            cooldown: 3.0,
            kind: WeaponKindConfig::Beam(BeamParams::default()),
        }
    }

    pub fn build(&self) -> Weapon {
        let kind = match &self.kind {
            WeaponKindConfig::Projectile(params) => WeaponKind::Projectile(params.clone()),
            WeaponKindConfig::AreaEffect(params) => WeaponKind::AreaEffect(params.clone()),
            WeaponKindConfig::Beam(params) => WeaponKind::Beam {
                params: params.clone(),
                state: BeamState::Idle,
            },
        };

        Weapon::new(self.name.clone(), self.damage_per_second, self.cooldown, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_gives_ready_weapon() {
        for config in [WeaponConfig::fire_bolt(), WeaponConfig::ice_nova(), WeaponConfig::lightning()] {
            let weapon = config.build();
            assert!(weapon.cooldown.is_ready(), "{} not ready", weapon.name);
            assert_eq!(weapon.cooldown.duration(), config.cooldown);
            assert!(!weapon.is_channeling());
        }
    }

    #[test]
    fn test_lightning_burst_is_two_seconds() {
        let WeaponKindConfig::Beam(params) = WeaponConfig::lightning().kind else {
            panic!("lightning must be a beam");
        };
        assert_eq!(params.burst_duration, 2.0);
        assert_eq!(params.visual_reach, 0.8);
        assert!(params.jitter <= 0.2);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "name": "Frost Ring",
            "damage_per_second": 0.0,
            "cooldown": 1.5,
            "kind": { "type": "area_effect", "radius": 8.0 }
        }"#;

        let config: WeaponConfig = serde_json::from_str(json).expect("valid config");
        assert_eq!(config.kind, WeaponKindConfig::AreaEffect(AreaParams { radius: 8.0 }));

        let weapon = config.build();
        assert_eq!(weapon.name, "Frost Ring");
        assert!(matches!(weapon.kind, WeaponKind::AreaEffect(AreaParams { radius }) if radius == 8.0));
    }
}
