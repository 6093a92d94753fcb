//! Read model для presentation (health bars, highlight, кабели между базами)
//!
//! Presentation читает сеть только через snapshot - ECS компоненты остаются
//! внутренним представлением симуляции.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::network::{BaseNode, ChildBases, Health, ParentBase, Selected};

/// Снимок одной базы (entity ids - `Entity::to_bits`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSnapshot {
    pub id: u64,
    pub position: [f32; 3],
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub selected: bool,
    pub parent: Option<u64>,
    /// Позиция родителя (для кабеля); None у root
    pub parent_position: Option<[f32; 3]>,
    pub children: Vec<u64>,
}

/// Снимок всей сети, отсортированный по Entity index (детерминированный порядок)
pub fn network_snapshot(world: &mut World) -> Vec<BaseSnapshot> {
    let mut query = world.query_filtered::<(
        Entity,
        &Transform,
        &Health,
        &ChildBases,
        Option<&ParentBase>,
        Has<Selected>,
    ), With<BaseNode>>();

    let mut rows: Vec<_> = query
        .iter(world)
        .map(|(entity, transform, health, children, parent, selected)| {
            (
                entity,
                transform.translation,
                *health,
                children.clone(),
                parent.map(|p| p.0),
                selected,
            )
        })
        .collect();
    rows.sort_by_key(|(entity, ..)| entity.index());

    rows.into_iter()
        .map(|(entity, position, health, children, parent, selected)| {
            let parent_position = parent
                .and_then(|p| world.get::<Transform>(p))
                .map(|t| t.translation.to_array());

            BaseSnapshot {
                id: entity.to_bits(),
                position: position.to_array(),
                health: health.current,
                max_health: health.max,
                alive: health.is_alive(),
                selected,
                parent: parent.map(|p| p.to_bits()),
                parent_position,
                children: children.iter().map(|c| c.to_bits()).collect(),
            }
        })
        .collect()
}

/// Количество живых баз
pub fn alive_base_count(world: &mut World) -> usize {
    let mut query = world.query_filtered::<&Health, With<BaseNode>>();
    query.iter(world).filter(|health| health.is_alive()).count()
}
