//! Абстрактный input для симуляции
//!
//! Симуляция не знает про клавиатуру/мышь/геймпад - input-binding слой
//! (движок, headless runner, тесты) пишет сюда уже готовые сигналы:
//! - `aim_axis` - непрерывная ось поворота [-1, 1]
//! - `fire` - edge/level состояние кнопки выстрела
//! - `switch_ammo` - edge смены боеприпаса
//!
//! Edges живут один tick: `clear_input_edges` сбрасывает их в конце FixedUpdate.

use bevy::prelude::*;

pub mod scripted;

pub use scripted::{random_pilot_step, PilotOdds};

/// Edge/level состояние одного действия
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub just_pressed: bool,
    pub held: bool,
    pub just_released: bool,
}

impl ActionState {
    /// Кнопка нажата (повторное нажатие без release не даёт нового edge)
    pub fn press(&mut self) {
        if !self.held {
            self.just_pressed = true;
        }
        self.held = true;
    }

    pub fn release(&mut self) {
        if self.held {
            self.just_released = true;
        }
        self.held = false;
    }

    /// Одиночное нажатие (press + release в пределах одного tick)
    pub fn tap(&mut self) {
        self.press();
        self.release();
    }

    pub fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Последний сэмпл input'а, который читают Aim/Charge системы
#[derive(Resource, Debug, Clone, Default)]
pub struct ControlInput {
    /// Ось поворота прицела, [-1, 1]
    pub aim_axis: f32,
    pub fire: ActionState,
    pub switch_ammo: ActionState,
}

impl ControlInput {
    pub fn set_aim_axis(&mut self, axis: f32) {
        self.aim_axis = if axis.is_finite() {
            axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }
}

/// Система: сброс edges в конце tick (level-состояния остаются)
pub fn clear_input_edges(mut input: ResMut<ControlInput>) {
    input.fire.clear_edges();
    input.switch_ammo.clear_edges();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_edges() {
        let mut action = ActionState::default();

        action.press();
        assert!(action.just_pressed && action.held && !action.just_released);

        // Удержание без release - новых edges нет
        action.clear_edges();
        action.press();
        assert!(!action.just_pressed);
        assert!(action.held);

        action.release();
        assert!(action.just_released);
        assert!(!action.held);

        // Повторный release без нажатия - edge не появляется
        action.clear_edges();
        action.release();
        assert!(!action.just_released);
    }

    #[test]
    fn test_tap_sets_both_edges() {
        let mut action = ActionState::default();
        action.tap();
        assert!(action.just_pressed);
        assert!(action.just_released);
        assert!(!action.held);
    }

    #[test]
    fn test_aim_axis_clamped() {
        let mut input = ControlInput::default();

        input.set_aim_axis(3.0);
        assert_eq!(input.aim_axis, 1.0);

        input.set_aim_axis(-0.5);
        assert_eq!(input.aim_axis, -0.5);

        input.set_aim_axis(f32::NAN);
        assert_eq!(input.aim_axis, 0.0);
    }
}
