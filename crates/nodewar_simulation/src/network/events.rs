//! Base network events
//!
//! Input → ECS: `SelectBaseIntent` (entity picked).
//! ECS → presentation: центрирование камеры, deployment, урон, уничтожение.

use bevy::prelude::*;

/// Event: игрок кликнул по базе (entity pick уже отфильтрован input слоем)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectBaseIntent {
    pub entity: Entity,
}

/// Event: presentation должен центрировать камеру на выбранной базе
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CenterCameraRequest {
    pub base: Entity,
    pub position: Vec3,
}

/// Event: новая база прикреплена к сети
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BaseDeployed {
    pub base: Entity,
    pub parent: Entity,
    pub position: Vec3,
}

/// Event: база получила урон (`remaining == 0` - удар был смертельным)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseDamaged {
    pub base: Entity,
    pub amount: i32,
    pub remaining: i32,
}

/// Event: база уничтожена (health <= 0)
///
/// Дети НЕ уничтожаются каскадом - их `ParentBase` продолжает указывать сюда.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BaseDestroyed {
    pub base: Entity,
    pub parent: Option<Entity>,
    pub position: Vec3,
}
