//! Headless демо арсенала
//!
//! Wielder с тремя оружиями стреляет по манекенам. Каждый `app.update()`
//! продвигает время ровно на один fixed тик (TimeUpdateStrategy::ManualDuration),
//! поэтому прогон воспроизводим.

use arsenal_simulation::combat::{Frost, Health};
use arsenal_simulation::logger::{set_log_level, LogLevel};
use arsenal_simulation::targeting::Hurtbox;
use arsenal_simulation::weapons::{FireWeaponIntent, SwitchWeaponIntent, WeaponConfig, WeaponManager};
use arsenal_simulation::{create_headless_app, init_logger, log_info, SimulationPlugin};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

const DT: f32 = 1.0 / 60.0;

fn main() {
    init_logger();
    // Per-tick debug (fire/reject/switch) слишком шумный для демо
    set_log_level(LogLevel::Info);

    let seed = 42;
    log_info(&format!("Starting arsenal headless simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)));

    let world = app.world_mut();
    let weapons = vec![
        world.spawn(WeaponConfig::fire_bolt().build()).id(),
        world.spawn(WeaponConfig::ice_nova().build()).id(),
        world.spawn(WeaponConfig::lightning().build()).id(),
    ];
    let wielder = world.spawn(WeaponManager::new(weapons)).id();

    let dummies: Vec<Entity> = (0..3)
        .map(|i| {
            world
                .spawn((
                    Name::new(format!("Dummy {}", i)),
                    Transform::from_xyz(i as f32 * 1.5 - 1.5, 0.0, -4.0 - 3.0 * i as f32),
                    Hurtbox::default(),
                    Health::new(100.0),
                    Frost::default(),
                ))
                .id()
        })
        .collect();

    // 10 секунд: каждые 2 секунды следующее оружие
    for tick in 0..600 {
        if tick % 120 == 0 {
            let index = (tick / 120) % 3;
            app.world_mut().send_event(SwitchWeaponIntent { wielder, index });
        }
        if tick % 20 == 0 {
            app.world_mut().send_event(FireWeaponIntent { wielder });
        }

        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let report: Vec<String> = dummies
                .iter()
                .filter_map(|dummy| world.get::<Health>(*dummy))
                .map(|health| format!("{:.1}", health.current))
                .collect();
            log_info(&format!("Tick {}: dummy health [{}]", tick, report.join(", ")));
        }
    }

    log_info("Simulation complete!");
}
