//! Tests for AimController.

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use bevy::prelude::*;
    use proptest::prelude::*;

    use crate::ballistics::PayloadKind;
    use crate::network::{spawn_root_base, SelectBaseIntent};
    use crate::shared::SpawnKind;
    use crate::shooting::{heading_direction, AimState, AmmoKind};
    use crate::{advance_simulation, create_headless_app, ControlInput};

    #[test]
    fn test_rotate_accumulates() {
        let mut aim = AimState::default();

        aim.rotate(1.0, 3.0, 0.5);
        assert_eq!(aim.heading, 1.5);

        aim.rotate(-0.5, 3.0, 0.5);
        assert_eq!(aim.heading, 0.75);
    }

    #[test]
    fn test_rotate_clamps_axis() {
        let mut aim = AimState::default();

        aim.rotate(5.0, 2.0, 0.25);
        assert_eq!(aim.heading, 0.5);

        // NaN с input устройства не портит heading
        aim.rotate(f32::NAN, 2.0, 0.25);
        assert_eq!(aim.heading, 0.5);
    }

    #[test]
    fn test_heading_direction() {
        assert_eq!(heading_direction(0.0), Vec3::Z);

        let right = heading_direction(FRAC_PI_2);
        assert!((right - Vec3::X).length() < 1e-6);

        let aim = AimState {
            heading: 1.234,
            ..default()
        };
        assert!((aim.direction().length() - 1.0).abs() < 1e-6);
        assert_eq!(aim.direction().y, 0.0);
    }

    #[test]
    fn test_ammo_toggle_and_mapping() {
        assert_eq!(AmmoKind::default(), AmmoKind::Node);
        assert_eq!(AmmoKind::Node.toggled(), AmmoKind::Bomb);
        assert_eq!(AmmoKind::Bomb.toggled(), AmmoKind::Node);

        assert_eq!(AmmoKind::Node.payload(), PayloadKind::DeployBase);
        assert_eq!(AmmoKind::Bomb.payload(), PayloadKind::Detonate);
        assert_eq!(AmmoKind::Node.spawn_kind(), SpawnKind::DeployProjectile);
        assert_eq!(AmmoKind::Bomb.spawn_kind(), SpawnKind::BombProjectile);
    }

    #[test]
    fn test_aim_ignored_without_selection() {
        let mut app = create_headless_app(42);
        spawn_root_base(app.world_mut(), Vec3::ZERO);

        {
            let mut input = app.world_mut().resource_mut::<ControlInput>();
            input.set_aim_axis(1.0);
            input.switch_ammo.tap();
        }
        advance_simulation(app.world_mut(), 0.25);

        let aim = app.world().resource::<AimState>();
        assert_eq!(aim.heading, 0.0);
        assert_eq!(aim.ammo, AmmoKind::Node);
    }

    #[test]
    fn test_aim_and_toggle_with_selection() {
        let mut app = create_headless_app(42);
        let root = spawn_root_base(app.world_mut(), Vec3::ZERO);
        app.world_mut().send_event(SelectBaseIntent { entity: root });

        {
            let mut input = app.world_mut().resource_mut::<ControlInput>();
            input.set_aim_axis(1.0);
            input.switch_ammo.tap();
        }
        advance_simulation(app.world_mut(), 0.25);

        // rotation_speed 3.0 * 0.25
        let aim = app.world().resource::<AimState>().clone();
        assert_eq!(aim.heading, 0.75);
        assert_eq!(aim.ammo, AmmoKind::Bomb);

        // Edge уже сброшен - второй tick не переключает обратно
        advance_simulation(app.world_mut(), 0.25);
        let aim = app.world().resource::<AimState>();
        assert_eq!(aim.ammo, AmmoKind::Bomb);
        assert_eq!(aim.heading, 1.5);
    }

    proptest! {
        #[test]
        fn prop_heading_is_sum_of_samples(
            samples in prop::collection::vec((-1.0f32..=1.0, 0.0f32..0.1), 0..200),
            rotation_speed in 0.1f32..5.0,
        ) {
            let mut aim = AimState::default();
            let mut expected = 0.0f64;

            for (axis, delta) in &samples {
                aim.rotate(*axis, rotation_speed, *delta);
                expected += *axis as f64 * rotation_speed as f64 * *delta as f64;
            }

            prop_assert!((aim.heading as f64 - expected).abs() < 1e-2);
        }
    }
}
