//! NODEWAR Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: артиллерийское строительство сети баз.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game state (прицел, заряд, баллистика, дерево баз)
//! - Движок = presentation (визуалы, камера, эффекты, физика через CollisionService)
//!
//! Один fixed tick (FixedUpdate, порядок `SimSet`):
//! Selection → Control (aim/ammo/charge) → Fire → Ballistics → Impact → Cleanup

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ballistics;
pub mod config;
pub mod impact;
pub mod input;
pub mod logger;
pub mod network;
pub mod shared;
pub mod shooting;

// Re-export базовых типов для удобства
pub use ballistics::{
    BallisticsPlugin, CollisionService, CollisionWorld, HeadlessCollision, Kinematics, PayloadKind,
    Projectile, ProjectileImpact, SweepHit,
};
pub use config::{ArtilleryTuning, TuningError, BASE_MAX_HEALTH};
pub use impact::ImpactPlugin;
pub use input::{ActionState, ControlInput};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use network::{
    alive_base_count, network_snapshot, spawn_root_base, BaseDamaged, BaseDeployed, BaseDestroyed,
    BaseNode, BaseSnapshot, CenterCameraRequest, ChildBases, Health, NetworkPlugin, ParentBase,
    SelectBaseIntent, Selected,
};
pub use shared::{SpawnKind, SpawnRequested};
pub use shooting::{AimState, AmmoKind, ChargePhase, ChargeState, FireRequested, ShootingPlugin};

/// Фазы одного simulation tick (FixedUpdate), выполняются строго по порядку
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// SelectBaseIntent → Selected + сброс заряда
    Selection,
    /// Aim, ammo toggle, charge FSM (читают ControlInput)
    Control,
    /// FireRequested → Projectile
    Fire,
    /// Интегрирование снарядов + sweep
    Ballistics,
    /// ProjectileImpact → deploy / damage
    Impact,
    /// Despawn снарядов, сброс input edges, снятие выбора с мёртвой базы
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub tuning: ArtilleryTuning,
}

impl SimulationPlugin {
    pub fn with_tuning(tuning: ArtilleryTuning) -> Self {
        Self { tuning }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Невалидный tuning не роняет симуляцию - откатываемся на defaults
        let tuning = match self.tuning.validate() {
            Ok(()) => self.tuning.clone(),
            Err(err) => {
                log_error(&format!("Invalid artillery tuning ({}), using defaults", err));
                ArtilleryTuning::default()
            }
        };

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .insert_resource(tuning)
            .add_event::<SpawnRequested>()
            .configure_sets(
                FixedUpdate,
                (
                    SimSet::Selection,
                    SimSet::Control,
                    SimSet::Fire,
                    SimSet::Ballistics,
                    SimSet::Impact,
                    SimSet::Cleanup,
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((NetworkPlugin, ShootingPlugin, BallisticsPlugin, ImpactPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with_tuning(seed, ArtilleryTuning::default())
}

pub fn create_headless_app_with_tuning(seed: u64, tuning: ArtilleryTuning) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin::with_tuning(tuning))
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Один детерминированный simulation tick длиной `delta_secs`
///
/// Сдвигает `Time<Fixed>` и прогоняет FixedUpdate ровно один раз -
/// без привязки к wall clock. Перед tick ротируются event буферы (как `First`
/// в обычном `App::update`): событие живёт текущий и следующий tick.
pub fn advance_simulation(world: &mut World, delta_secs: f32) {
    let Ok(delta) = Duration::try_from_secs_f32(delta_secs) else {
        log_error(&format!("advance_simulation: invalid delta {}", delta_secs));
        return;
    };

    let Some(mut time) = world.get_resource_mut::<Time<Fixed>>() else {
        log_error("advance_simulation: Time<Fixed> missing, SimulationPlugin not added?");
        return;
    };

    time.advance_by(delta);
    rotate_event_buffers(world);
    world.run_schedule(FixedUpdate);
}

/// Double-buffer ротация всех событий симуляции
///
/// Без неё непрочитанные хостом события копятся всю сессию.
fn rotate_event_buffers(world: &mut World) {
    rotate_events::<SpawnRequested>(world);
    rotate_events::<SelectBaseIntent>(world);
    rotate_events::<CenterCameraRequest>(world);
    rotate_events::<BaseDeployed>(world);
    rotate_events::<BaseDamaged>(world);
    rotate_events::<BaseDestroyed>(world);
    rotate_events::<FireRequested>(world);
    rotate_events::<ProjectileImpact>(world);
}

fn rotate_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot мира для сравнения детерминизма
///
/// Entity index + Debug представление компонента, отсортировано по index.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
