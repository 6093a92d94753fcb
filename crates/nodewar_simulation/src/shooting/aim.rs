//! AimController - heading выбранной базы + выбор боеприпаса

use bevy::prelude::*;

use crate::ballistics::PayloadKind;
use crate::config::ArtilleryTuning;
use crate::input::ControlInput;
use crate::shared::SpawnKind;

/// Тип боеприпаса, выбранный игроком
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum AmmoKind {
    /// Снаряд-база: при попадании разворачивает новую base node
    #[default]
    Node,
    /// Бомба: детонирует и наносит урон базе
    Bomb,
}

impl AmmoKind {
    pub fn toggled(self) -> Self {
        match self {
            AmmoKind::Node => AmmoKind::Bomb,
            AmmoKind::Bomb => AmmoKind::Node,
        }
    }

    /// Что снаряд делает при попадании
    pub fn payload(self) -> PayloadKind {
        match self {
            AmmoKind::Node => PayloadKind::DeployBase,
            AmmoKind::Bomb => PayloadKind::Detonate,
        }
    }

    pub fn spawn_kind(self) -> SpawnKind {
        match self {
            AmmoKind::Node => SpawnKind::DeployProjectile,
            AmmoKind::Bomb => SpawnKind::BombProjectile,
        }
    }
}

/// Состояние прицеливания (один экземпляр на симуляцию)
///
/// - `selected` - выбранная база (0 или 1), пишет только network::process_select_intents
/// - `heading` - угол в радианах, без нормализации (wrap через sin/cos)
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct AimState {
    pub selected: Option<Entity>,
    pub heading: f32,
    pub ammo: AmmoKind,
}

impl AimState {
    /// heading += axis * rotation_speed * dt
    pub fn rotate(&mut self, axis: f32, rotation_speed: f32, delta: f32) {
        let axis = if axis.is_finite() {
            axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.heading += axis * rotation_speed * delta;
    }

    pub fn direction(&self) -> Vec3 {
        heading_direction(self.heading)
    }
}

/// Горизонтальный unit vector для heading (поворот +Z вокруг +Y)
pub fn heading_direction(heading: f32) -> Vec3 {
    Vec3::new(heading.sin(), 0.0, heading.cos())
}

/// Система: поворот прицела от aim_axis (только при выбранной базе)
pub fn advance_aim(
    input: Res<ControlInput>,
    tuning: Res<ArtilleryTuning>,
    time: Res<Time<Fixed>>,
    mut aim: ResMut<AimState>,
) {
    if aim.selected.is_none() {
        return;
    }

    aim.rotate(input.aim_axis, tuning.rotation_speed, time.delta_secs());
}

/// Система: переключение боеприпаса по edge switch_ammo
///
/// Летящие снаряды не затрагиваются - payload фиксируется при выстреле.
pub fn toggle_ammo(input: Res<ControlInput>, mut aim: ResMut<AimState>) {
    if aim.selected.is_none() || !input.switch_ammo.just_pressed {
        return;
    }

    aim.ammo = aim.ammo.toggled();
    crate::log_info(&format!("Switched ammo to {:?}", aim.ammo));
}
