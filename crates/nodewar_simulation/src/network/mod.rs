//! Base network module - дерево баз игрока
//!
//! ECS ответственность:
//! - Дерево: ParentBase (weak back-ref) + ChildBases (append-only)
//! - Здоровье и уничтожение (state flip, без каскада)
//! - Selection protocol (SelectBaseIntent → Selected + charge reset + camera request)
//!
//! Presentation ответственность:
//! - Highlight ring, health bar, кабели между базами (читает `network_snapshot`)
//! - Плавное движение камеры по CenterCameraRequest

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod snapshot;
pub mod systems;


// Re-export основных типов
pub use components::*;
pub use events::*;
pub use snapshot::{alive_base_count, network_snapshot, BaseSnapshot};
pub use systems::{
    apply_base_damage, attach_child_base, clear_dead_selection, process_select_intents,
    spawn_root_base, NetworkEvents,
};

use crate::SimSet;

/// Network Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. process_select_intents - SimSet::Selection (до aim/charge)
/// 2. clear_dead_selection - SimSet::Cleanup (после impact resolution)
pub struct NetworkPlugin;

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SelectBaseIntent>()
            .add_event::<CenterCameraRequest>()
            .add_event::<BaseDeployed>()
            .add_event::<BaseDamaged>()
            .add_event::<BaseDestroyed>();

        app.add_systems(
            FixedUpdate,
            (
                process_select_intents.in_set(SimSet::Selection),
                clear_dead_selection.in_set(SimSet::Cleanup),
            ),
        );
    }
}
