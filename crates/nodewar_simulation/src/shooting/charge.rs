//! ChargeController - ping-pong заряд силы выстрела
//!
//! FSM: Idle → Charging (fire pressed) → Idle (fire released → FireRequested).
//! Пока кнопка зажата, level ходит 0 → 1 → 0 → 1 ... (не останавливается на 1).

use bevy::prelude::*;

use crate::config::ArtilleryTuning;
use crate::input::ControlInput;
use crate::network::{BaseNode, Health};
use crate::shooting::{AimState, AmmoKind};

/// Расстояние до границы, на котором level прилипает к 0/1 (f32 накопление при 60Hz)
pub const RAMP_SNAP: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargePhase {
    #[default]
    Idle,
    Charging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampDirection {
    #[default]
    Up,
    Down,
}

impl RampDirection {
    pub fn sign(self) -> f32 {
        match self {
            RampDirection::Up => 1.0,
            RampDirection::Down => -1.0,
        }
    }
}

/// Состояние заряда (один экземпляр на симуляцию)
///
/// Инвариант: 0.0 ≤ level ≤ 1.0; в Idle level == 0.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ChargeState {
    pub phase: ChargePhase,
    pub level: f32,
    pub direction: RampDirection,
}

impl ChargeState {
    pub fn is_charging(&self) -> bool {
        self.phase == ChargePhase::Charging
    }

    /// Idle → Charging (level 0, direction Up)
    pub fn begin(&mut self) {
        self.phase = ChargePhase::Charging;
        self.level = 0.0;
        self.direction = RampDirection::Up;
    }

    /// Один tick удержания: level += dir * speed * dt, clamp, разворот на границах
    pub fn advance(&mut self, delta: f32, charge_speed: f32) {
        if !self.is_charging() {
            return;
        }

        let step = self.direction.sign() * charge_speed * delta;
        self.level = (self.level + step).clamp(0.0, 1.0);

        // Прилипание только по направлению движения (иначе старт с 0 залипнет)
        match self.direction {
            RampDirection::Up if self.level > 1.0 - RAMP_SNAP => self.level = 1.0,
            RampDirection::Down if self.level < RAMP_SNAP => self.level = 0.0,
            _ => {}
        }

        if self.level == 1.0 {
            self.direction = RampDirection::Down;
        } else if self.level == 0.0 {
            self.direction = RampDirection::Up;
        }
    }

    /// Charging → Idle, возвращает захваченный level (None если не заряжали)
    pub fn release(&mut self) -> Option<f32> {
        if !self.is_charging() {
            return None;
        }

        let captured = self.level;
        *self = Self::default();
        Some(captured)
    }

    /// Сброс в Idle/0 без выстрела
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}

/// Event: заряд отпущен → FireDispatcher должен выстрелить
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FireRequested {
    /// База, с которой стреляем (выбранная на момент release)
    pub base: Entity,

    /// Захваченный level [0, 1]
    pub power: f32,

    pub ammo: AmmoKind,
}

/// Система: ChargeController
///
/// Порядок внутри tick: pressed → held → released.
/// Без живой выбранной базы Charging невозможен (незавершённый заряд сбрасывается).
pub fn advance_charge(
    input: Res<ControlInput>,
    aim: Res<AimState>,
    tuning: Res<ArtilleryTuning>,
    time: Res<Time<Fixed>>,
    bases: Query<&Health, With<BaseNode>>,
    mut charge: ResMut<ChargeState>,
    mut fire_requests: EventWriter<FireRequested>,
) {
    let selected = aim
        .selected
        .filter(|base| bases.get(*base).is_ok_and(|health| health.is_alive()));

    let Some(selected) = selected else {
        if charge.is_charging() {
            charge.cancel();
        }
        return;
    };

    if input.fire.just_pressed {
        charge.begin();
    }

    if input.fire.held {
        charge.advance(time.delta_secs(), tuning.charge_speed);
    }

    if input.fire.just_released {
        if let Some(power) = charge.release() {
            fire_requests.write(FireRequested {
                base: selected,
                power,
                ammo: aim.ammo,
            });
            crate::log(&format!(
                "🔫 Fire released: base {:?}, power {:.2}, ammo {:?}",
                selected, power, aim.ammo
            ));
        }
    }
}
