//! Tests for ChargeController.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use proptest::prelude::*;

    use crate::network::{spawn_root_base, SelectBaseIntent};
    use crate::shooting::{AmmoKind, ChargePhase, ChargeState, FireRequested, RampDirection};
    use crate::{advance_simulation, create_headless_app, ControlInput};

    fn charging() -> ChargeState {
        let mut charge = ChargeState::default();
        charge.begin();
        charge
    }

    fn fire_requests(app: &mut App) -> Vec<FireRequested> {
        app.world_mut()
            .resource_mut::<Events<FireRequested>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_reaches_full_then_ramps_down() {
        let mut charge = charging();

        // charge_speed 1.0: 4 * 0.25 = ровно 1 секунда
        for _ in 0..4 {
            charge.advance(0.25, 1.0);
        }
        assert_eq!(charge.level, 1.0);
        assert_eq!(charge.direction, RampDirection::Down);

        charge.advance(0.25, 1.0);
        assert_eq!(charge.level, 0.75);
    }

    #[test]
    fn test_ping_pong_back_to_zero() {
        let mut charge = charging();

        for _ in 0..8 {
            charge.advance(0.25, 1.0);
        }
        assert_eq!(charge.level, 0.0);
        assert_eq!(charge.direction, RampDirection::Up);

        charge.advance(0.25, 1.0);
        assert_eq!(charge.level, 0.25);
    }

    #[test]
    fn test_overshoot_clamped() {
        let mut charge = charging();
        charge.advance(0.7, 2.0);
        assert_eq!(charge.level, 1.0);
        assert_eq!(charge.direction, RampDirection::Down);
    }

    #[test]
    fn test_full_charge_at_sixty_hz() {
        let mut charge = charging();

        // 1/60 не представимо точно в f32 - накопление не должно застревать под 1.0
        for _ in 0..60 {
            charge.advance(1.0 / 60.0, 1.0);
        }
        assert_eq!(charge.level, 1.0);
        assert_eq!(charge.direction, RampDirection::Down);

        for _ in 0..60 {
            charge.advance(1.0 / 60.0, 1.0);
        }
        assert_eq!(charge.level, 0.0);
        assert_eq!(charge.direction, RampDirection::Up);
    }

    #[test]
    fn test_held_second_reaches_full_power() {
        let mut app = create_headless_app(42);
        let root = spawn_root_base(app.world_mut(), Vec3::ZERO);
        app.world_mut().send_event(SelectBaseIntent { entity: root });
        advance_simulation(app.world_mut(), 1.0 / 60.0);

        // Tick нажатия тоже считается удержанием: 60 tick = 1 секунда
        app.world_mut().resource_mut::<ControlInput>().fire.press();
        for _ in 0..60 {
            advance_simulation(app.world_mut(), 1.0 / 60.0);
        }

        let charge = *app.world().resource::<ChargeState>();
        assert_eq!(charge.level, 1.0);
        assert_eq!(charge.direction, RampDirection::Down);

        app.world_mut().resource_mut::<ControlInput>().fire.release();
        advance_simulation(app.world_mut(), 1.0 / 60.0);
        // Release tick: held == false, level не двигается
        let requests = fire_requests(&mut app);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].power, 1.0);
    }

    #[test]
    fn test_release_and_cancel() {
        let mut charge = ChargeState::default();

        // Idle: advance и release ничего не делают
        charge.advance(0.5, 1.0);
        assert_eq!(charge.level, 0.0);
        assert_eq!(charge.release(), None);

        charge.begin();
        charge.advance(0.5, 1.0);
        assert_eq!(charge.release(), Some(0.5));
        assert_eq!(charge, ChargeState::default());

        charge.begin();
        charge.advance(0.5, 1.0);
        charge.cancel();
        assert_eq!(charge.phase, ChargePhase::Idle);
        assert_eq!(charge.level, 0.0);
    }

    #[test]
    fn test_hold_and_release_fires_once() {
        let mut app = create_headless_app(42);
        let root = spawn_root_base(app.world_mut(), Vec3::ZERO);
        app.world_mut().send_event(SelectBaseIntent { entity: root });
        advance_simulation(app.world_mut(), 0.25);

        app.world_mut().resource_mut::<ControlInput>().fire.press();
        advance_simulation(app.world_mut(), 0.25);
        advance_simulation(app.world_mut(), 0.25);
        assert!(fire_requests(&mut app).is_empty());

        app.world_mut().resource_mut::<ControlInput>().fire.release();
        advance_simulation(app.world_mut(), 0.25);

        let requests = fire_requests(&mut app);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].base, root);
        assert_eq!(requests[0].power, 0.5);
        assert_eq!(requests[0].ammo, AmmoKind::Node);
        assert_eq!(*app.world().resource::<ChargeState>(), ChargeState::default());

        // Следующий tick без input - второго выстрела нет
        advance_simulation(app.world_mut(), 0.25);
        assert!(fire_requests(&mut app).is_empty());
    }

    #[test]
    fn test_tap_fires_minimum_power() {
        let mut app = create_headless_app(42);
        let root = spawn_root_base(app.world_mut(), Vec3::ZERO);
        app.world_mut().send_event(SelectBaseIntent { entity: root });
        app.world_mut().resource_mut::<ControlInput>().fire.tap();
        advance_simulation(app.world_mut(), 0.25);

        let requests = fire_requests(&mut app);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].power, 0.0);
    }

    #[test]
    fn test_no_charge_without_selection() {
        let mut app = create_headless_app(42);
        spawn_root_base(app.world_mut(), Vec3::ZERO);

        app.world_mut().resource_mut::<ControlInput>().fire.press();
        advance_simulation(app.world_mut(), 0.25);
        assert!(!app.world().resource::<ChargeState>().is_charging());

        app.world_mut().resource_mut::<ControlInput>().fire.release();
        advance_simulation(app.world_mut(), 0.25);
        assert!(fire_requests(&mut app).is_empty());
    }

    proptest! {
        #[test]
        fn prop_level_stays_in_unit_range(
            deltas in prop::collection::vec(0.0f32..0.5, 1..300),
            charge_speed in 0.1f32..5.0,
        ) {
            let mut charge = charging();
            for delta in deltas {
                charge.advance(delta, charge_speed);
                prop_assert!((0.0..=1.0).contains(&charge.level));
            }
        }
    }
}
