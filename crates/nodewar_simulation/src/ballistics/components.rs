//! Ballistics компоненты: Projectile + Kinematics capability

use bevy::prelude::*;

/// Что снаряд делает при первом контакте
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PayloadKind {
    /// Развернуть новую базу в точке попадания (родитель = creator)
    DeployBase,
    /// Детонация: урон базе (если попали в базу) + взрыв
    Detonate,
}

/// Снаряд в полёте
///
/// Автоматически добавляет Kinematics, Transform через Required Components.
/// `in_flight == false` - impact уже выпущен, снаряд ждёт despawn в Cleanup.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Kinematics, Transform)]
pub struct Projectile {
    pub payload: PayloadKind,

    /// База-источник (обязательна для DeployBase, None для бомб)
    pub creator: Option<Entity>,

    pub in_flight: bool,
}

impl Projectile {
    pub fn new(payload: PayloadKind, creator: Option<Entity>) -> Self {
        Self {
            payload,
            creator,
            in_flight: true,
        }
    }
}

/// Moving capability: скорость + собственная гравитация
///
/// Ортогональна Health - снаряд не Damageable, база не движется.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct Kinematics {
    pub velocity: Vec3,
    pub gravity: f32,
}

impl Kinematics {
    pub fn new(velocity: Vec3, gravity: f32) -> Self {
        Self { velocity, gravity }
    }

    /// velocity.y -= gravity * dt, возвращает смещение за tick
    pub fn step(&mut self, delta: f32) -> Vec3 {
        self.velocity.y -= self.gravity * delta;
        self.velocity * delta
    }
}
