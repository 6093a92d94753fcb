//! Shooting domain - прицеливание, заряд и выстрел
//!
//! Содержит:
//! - AimController (heading + AmmoKind, переключение боеприпаса)
//! - ChargeController (ping-pong заряд, FireRequested на release)
//! - FireDispatcher (FireRequested → Projectile + SpawnRequested)

use bevy::prelude::*;

pub mod aim;
pub mod charge;
pub mod fire;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod aim_tests;
#[cfg(test)]
mod charge_tests;

// Re-export all components and functions
pub use aim::*;
pub use charge::*;
pub use fire::*;

use crate::input::{clear_input_edges, ControlInput};
use crate::SimSet;

/// Shooting Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. advance_aim → toggle_ammo → advance_charge - SimSet::Control
/// 2. dispatch_fire - SimSet::Fire (тот же tick, что и release)
/// 3. clear_input_edges - SimSet::Cleanup (edges живут ровно один tick)
pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AimState>()
            .init_resource::<ChargeState>()
            .init_resource::<ControlInput>()
            .add_event::<FireRequested>();

        app.add_systems(
            FixedUpdate,
            (
                (advance_aim, toggle_ammo, advance_charge)
                    .chain()
                    .in_set(SimSet::Control),
                dispatch_fire.in_set(SimSet::Fire),
                clear_input_edges.in_set(SimSet::Cleanup),
            ),
        );
    }
}
