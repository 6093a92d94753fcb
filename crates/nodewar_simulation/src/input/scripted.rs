//! Случайный "пилот" для headless прогонов
//!
//! Пишет в ControlInput / SelectBaseIntent так же, как это делал бы input слой
//! движка, но решения берёт из `DeterministicRng` - один seed даёт одну сессию.

use bevy::prelude::*;
use rand::Rng;

use crate::input::ControlInput;
use crate::network::{BaseNode, Health, SelectBaseIntent};
use crate::DeterministicRng;

/// Вероятности действий за один tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PilotOdds {
    pub change_axis: f64,
    pub press_fire: f64,
    pub release_fire: f64,
    pub switch_ammo: f64,
    pub reselect: f64,
}

impl Default for PilotOdds {
    fn default() -> Self {
        Self {
            change_axis: 0.05,
            press_fire: 0.02,
            release_fire: 0.03,
            switch_ammo: 0.005,
            reselect: 0.004,
        }
    }
}

/// Один tick случайного input. Вызывать перед `advance_simulation`.
pub fn random_pilot_step(world: &mut World, odds: PilotOdds) {
    let mut alive_bases: Vec<Entity> = world
        .query_filtered::<(Entity, &Health), With<BaseNode>>()
        .iter(world)
        .filter(|(_, health)| health.is_alive())
        .map(|(entity, _)| entity)
        .collect();
    alive_bases.sort_by_key(|entity| entity.index());

    let Some(mut rng) = world.get_resource_mut::<DeterministicRng>() else {
        crate::log_error("random_pilot_step: DeterministicRng missing");
        return;
    };
    let rng = &mut rng.rng;

    let reselect = if !alive_bases.is_empty() && rng.gen_bool(odds.reselect) {
        Some(alive_bases[rng.gen_range(0..alive_bases.len())])
    } else {
        None
    };
    let axis = rng
        .gen_bool(odds.change_axis)
        .then(|| rng.gen_range(-1.0f32..=1.0));
    let press = rng.gen_bool(odds.press_fire);
    let release = rng.gen_bool(odds.release_fire);
    let switch = rng.gen_bool(odds.switch_ammo);

    if let Some(mut input) = world.get_resource_mut::<ControlInput>() {
        if let Some(axis) = axis {
            input.set_aim_axis(axis);
        }
        if input.fire.held {
            if release {
                input.fire.release();
            }
        } else if press {
            input.fire.press();
        }
        if switch {
            input.switch_ammo.tap();
        }
    }

    if let Some(entity) = reselect {
        world.send_event(SelectBaseIntent { entity });
    }
}
