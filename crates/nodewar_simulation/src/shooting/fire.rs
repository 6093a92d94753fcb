//! FireDispatcher - превращает FireRequested в летящий снаряд

use bevy::prelude::*;

use crate::ballistics::{Kinematics, PayloadKind, Projectile};
use crate::config::ArtilleryTuning;
use crate::network::{BaseNode, Health};
use crate::shared::SpawnRequested;
use crate::shooting::{heading_direction, AimState, FireRequested};

/// Сила выстрела: линейная интерполяция min → max по power
///
/// power вне [0, 1] (и NaN) зажимается.
pub fn launch_force(min_force: f32, max_force: f32, power: f32) -> f32 {
    let t = if power.is_nan() {
        0.0
    } else {
        power.clamp(0.0, 1.0)
    };
    min_force * (1.0 - t) + max_force * t
}

/// Начальная скорость: heading * force + вертикальная составляющая
///
/// Вертикаль не зависит от силы - дальность регулируется только горизонталью.
pub fn launch_velocity(heading: f32, force: f32, upward_bias: f32) -> Vec3 {
    heading_direction(heading) * force + Vec3::Y * upward_bias
}

/// Точка вылета: над базой на muzzle_offset (чтобы не задеть собственную сферу)
pub fn muzzle_position(base_position: Vec3, muzzle_offset: f32) -> Vec3 {
    base_position + Vec3::Y * muzzle_offset
}

/// Система: FireRequested → Projectile entity + SpawnRequested для presentation
pub fn dispatch_fire(
    mut commands: Commands,
    mut requests: EventReader<FireRequested>,
    aim: Res<AimState>,
    tuning: Res<ArtilleryTuning>,
    bases: Query<(&Transform, &Health), With<BaseNode>>,
    mut spawned: EventWriter<SpawnRequested>,
) {
    for request in requests.read() {
        let Ok((transform, health)) = bases.get(request.base) else {
            crate::log_warning(&format!(
                "FireRequested: base {:?} not found, shot dropped",
                request.base
            ));
            continue;
        };

        if !health.is_alive() {
            crate::log_warning(&format!(
                "FireRequested: base {:?} is destroyed, shot dropped",
                request.base
            ));
            continue;
        }

        let force = launch_force(tuning.min_launch_force, tuning.max_launch_force, request.power);
        let velocity = launch_velocity(aim.heading, force, tuning.upward_bias);
        let origin = muzzle_position(transform.translation, tuning.muzzle_offset);

        let payload = request.ammo.payload();
        // Creator нужен только для развёртывания (родитель новой базы)
        let creator = (payload == PayloadKind::DeployBase).then_some(request.base);

        let projectile = commands
            .spawn((
                Projectile::new(payload, creator),
                Kinematics::new(velocity, tuning.gravity),
                Transform::from_translation(origin),
            ))
            .id();

        spawned.write(SpawnRequested {
            kind: request.ammo.spawn_kind(),
            entity: Some(projectile),
            position: origin,
        });

        crate::log(&format!(
            "🚀 Projectile {:?} ({:?}) launched from {:?}: force {:.2}, velocity {:?}",
            projectile, payload, request.base, force, velocity
        ));
    }
}
