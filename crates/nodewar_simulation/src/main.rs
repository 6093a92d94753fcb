//! Headless симуляция NODEWAR
//!
//! Запускает Bevy App без рендера: root база + случайный пилот (seeded).
//! Usage: nodewar_simulation [tuning.json]

use bevy::prelude::*;
use nodewar_simulation::input::{random_pilot_step, PilotOdds};
use nodewar_simulation::{
    advance_simulation, alive_base_count, create_headless_app_with_tuning, log_error, log_info,
    network_snapshot, spawn_root_base, ArtilleryTuning, BaseDeployed, BaseDestroyed,
    SelectBaseIntent, SpawnRequested,
};

const TICK_COUNT: usize = 3000;
const TICK_DELTA: f32 = 1.0 / 60.0;

fn load_tuning() -> ArtilleryTuning {
    let Some(path) = std::env::args().nth(1) else {
        return ArtilleryTuning::default();
    };

    let parsed = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|json| ArtilleryTuning::from_json_str(&json).map_err(|err| err.to_string()));

    match parsed {
        Ok(tuning) => tuning,
        Err(err) => {
            log_error(&format!("Failed to load tuning from {}: {}", path, err));
            ArtilleryTuning::default()
        }
    }
}

fn main() {
    let seed = 42;
    println!("Starting NODEWAR headless simulation (seed: {})", seed);

    let mut app = create_headless_app_with_tuning(seed, load_tuning());

    let root = spawn_root_base(app.world_mut(), Vec3::ZERO);
    app.world_mut().send_event(SelectBaseIntent { entity: root });

    let mut deployed_total = 0;
    let mut destroyed_total = 0;

    for tick in 0..TICK_COUNT {
        random_pilot_step(app.world_mut(), PilotOdds::default());
        advance_simulation(app.world_mut(), TICK_DELTA);

        // Presentation здесь нет - просто считаем и выбрасываем события
        let world = app.world_mut();
        deployed_total += world.resource_mut::<Events<BaseDeployed>>().drain().count();
        destroyed_total += world.resource_mut::<Events<BaseDestroyed>>().drain().count();
        world.resource_mut::<Events<SpawnRequested>>().clear();

        if tick % 100 == 0 {
            println!(
                "Tick {}: {} bases alive ({} deployed, {} destroyed)",
                tick,
                alive_base_count(app.world_mut()),
                deployed_total,
                destroyed_total
            );
        }
    }

    let snapshot = network_snapshot(app.world_mut());
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(err) => log_error(&format!("Snapshot serialization failed: {}", err)),
    }

    log_info("Simulation complete!");
}
