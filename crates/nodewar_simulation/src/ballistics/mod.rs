//! Ballistics domain - снаряды в полёте
//!
//! ECS ответственность:
//! - Kinematics (velocity + gravity), интегрирование по fixed tick
//! - Sweep через CollisionService, только первый контакт → ProjectileImpact
//! - Despawn отработавших снарядов
//!
//! Физический движок подключается через `CollisionWorld` (trait object).

use bevy::prelude::*;

pub mod collision;
pub mod components;
pub mod integrator;

#[cfg(test)]
mod integrator_tests;

// Re-export основных типов
pub use collision::*;
pub use components::*;
pub use integrator::*;

use crate::SimSet;

/// Ballistics Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. integrate_projectiles - SimSet::Ballistics
/// 2. despawn_spent_projectiles - SimSet::Cleanup (после ImpactResolver)
pub struct BallisticsPlugin;

impl Plugin for BallisticsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollisionWorld>()
            .add_event::<ProjectileImpact>();

        app.add_systems(
            FixedUpdate,
            (
                integrate_projectiles.in_set(SimSet::Ballistics),
                despawn_spent_projectiles.in_set(SimSet::Cleanup),
            ),
        );
    }
}
