//! Gameplay tuning (aim, charge, launch, ballistics, base health)
//!
//! Один `Resource` на всю симуляцию - системы читают его через `Res<ArtilleryTuning>`.
//! Runtime-параметры (tick rate, seed) сюда не относятся, они в `lib.rs`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;


/// Базовое здоровье base node (3 попадания бомбой)
pub const BASE_MAX_HEALTH: i32 = 3;

/// Gameplay tuning артиллерийского цикла
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtilleryTuning {
    /// Скорость поворота прицела, рад/с
    pub rotation_speed: f32,

    /// Постоянная вертикальная добавка к скорости запуска
    pub upward_bias: f32,

    /// Сила запуска при power 0
    pub min_launch_force: f32,

    /// Сила запуска при power 1
    pub max_launch_force: f32,

    /// Скорость заряда (1.0 = полный заряд за секунду)
    pub charge_speed: f32,

    /// Высота спавна снаряда над выбранной базой
    pub muzzle_offset: f32,

    /// Гравитация для снарядов (units/s², положительная = вниз)
    pub gravity: f32,

    /// Здоровье новой базы (root и развёрнутых)
    pub base_max_health: i32,

    /// Урон одной детонации
    pub bomb_damage: i32,

    /// Снаряды ниже этой высоты удаляются без impact
    pub kill_floor_y: f32,
}

impl Default for ArtilleryTuning {
    fn default() -> Self {
        Self {
            rotation_speed: 3.0,
            upward_bias: 5.0,
            min_launch_force: 4.0,
            max_launch_force: 20.0,
            charge_speed: 1.0,
            muzzle_offset: 2.0,
            gravity: 9.8,
            base_max_health: BASE_MAX_HEALTH,
            bomb_damage: 1,
            kill_floor_y: -100.0,
        }
    }
}

impl ArtilleryTuning {
    /// Парсинг tuning из JSON (отсутствующие поля = defaults)
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Self =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("rotation_speed", self.rotation_speed),
            ("upward_bias", self.upward_bias),
            ("min_launch_force", self.min_launch_force),
            ("max_launch_force", self.max_launch_force),
            ("charge_speed", self.charge_speed),
            ("muzzle_offset", self.muzzle_offset),
            ("gravity", self.gravity),
            ("kill_floor_y", self.kill_floor_y),
        ];
        if let Some(&(name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(TuningError::NotFinite(name));
        }

        if self.charge_speed <= 0.0 {
            return Err(TuningError::NonPositive("charge_speed"));
        }
        if self.base_max_health <= 0 {
            return Err(TuningError::NonPositive("base_max_health"));
        }
        if self.bomb_damage <= 0 {
            return Err(TuningError::NonPositive("bomb_damage"));
        }
        if self.min_launch_force < 0.0 || self.min_launch_force >= self.max_launch_force {
            return Err(TuningError::InvalidForceRange {
                min: self.min_launch_force,
                max: self.max_launch_force,
            });
        }

        Ok(())
    }
}

/// Ошибки загрузки/валидации tuning
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    Parse(String),
    NotFinite(&'static str),
    NonPositive(&'static str),
    InvalidForceRange { min: f32, max: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(reason) => write!(f, "failed to parse tuning: {}", reason),
            TuningError::NotFinite(field) => write!(f, "tuning field `{}` is not finite", field),
            TuningError::NonPositive(field) => write!(f, "tuning field `{}` must be > 0", field),
            TuningError::InvalidForceRange { min, max } => write!(
                f,
                "launch force range is invalid (min {} must be >= 0 and < max {})",
                min, max
            ),
        }
    }
}

impl std::error::Error for TuningError {}
