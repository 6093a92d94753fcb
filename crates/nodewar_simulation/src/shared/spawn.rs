//! Spawn announcements (ECS → presentation)
//!
//! Симуляция сама создаёт свои entities через `Commands` (ECS - arena),
//! а presentation слой узнаёт о них из `SpawnRequested` и создаёт визуалы.
//! ExplosionEffect - чисто косметика: entity в ECS нет, только запрос.

use bevy::prelude::*;

/// Что заспавнено (или что нужно проиграть)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnKind {
    /// Снаряд, который при попадании разворачивает новую базу
    DeployProjectile,
    /// Бомба (детонация + урон базе)
    BombProjectile,
    /// Косметический взрыв (fire-and-forget)
    ExplosionEffect,
    /// Новая base node
    BaseEntity,
}

/// Event: core заспавнил entity / запросил эффект
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpawnRequested {
    pub kind: SpawnKind,

    /// Simulation entity (None для ExplosionEffect)
    pub entity: Option<Entity>,

    /// World position спавна
    pub position: Vec3,
}

impl SpawnRequested {
    pub fn effect(position: Vec3) -> Self {
        Self {
            kind: SpawnKind::ExplosionEffect,
            entity: None,
            position,
        }
    }
}
