//! TrajectoryIntegrator - полёт снарядов под гравитацией до первого контакта

use bevy::prelude::*;

use crate::ballistics::{
    BodyKind, CollisionBody, CollisionWorld, Kinematics, PayloadKind, Projectile, SweepHit,
};
use crate::config::ArtilleryTuning;
use crate::network::{BaseNode, Health};

/// Допуск на проекцию контакта вдоль sweep (float шум движка)
pub const SWEEP_TOLERANCE: f32 = 1e-4;

/// Event: снаряд встретил первый контакт → ImpactResolver
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileImpact {
    pub projectile: Entity,
    pub payload: PayloadKind,
    pub creator: Option<Entity>,

    /// Во что попали (None - земля/статика)
    pub struck: Option<Entity>,

    pub point: Vec3,
}

/// Почему контакт от коллаборатора отброшен
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepRejection {
    /// Контакт позади точки старта
    BehindStart,
    /// Контакт дальше конца отрезка
    PastEnd,
    /// Коллаборатор вернул сам снаряд
    SelfHit,
}

/// Проверка контакта: проекция на отрезок должна попасть в [0, 1]
pub fn validate_hit(
    from: Vec3,
    motion: Vec3,
    hit: SweepHit,
    projectile: Entity,
) -> Result<SweepHit, SweepRejection> {
    if hit.entity == Some(projectile) {
        return Err(SweepRejection::SelfHit);
    }

    let length_squared = motion.length_squared();
    if length_squared <= f32::EPSILON {
        // Нулевой шаг: принимаем только контакт в самой точке старта
        return if hit.point.distance(from) <= SWEEP_TOLERANCE {
            Ok(hit)
        } else {
            Err(SweepRejection::PastEnd)
        };
    }

    let t = (hit.point - from).dot(motion) / length_squared;
    if t < -SWEEP_TOLERANCE {
        Err(SweepRejection::BehindStart)
    } else if t > 1.0 + SWEEP_TOLERANCE {
        Err(SweepRejection::PastEnd)
    } else {
        Ok(hit)
    }
}

/// Система: интегрирование снарядов (SimSet::Ballistics)
///
/// 1. sync_bodies - живые базы + снаряды в полёте
/// 2. Стабильный snapshot снарядов (sorted by Entity index)
/// 3. Для каждого: velocity.y -= g*dt → sweep → impact или перемещение
///
/// Снаряд с `in_flight == false` больше не обрабатывается (только первый контакт).
pub fn integrate_projectiles(
    mut collision: ResMut<CollisionWorld>,
    time: Res<Time<Fixed>>,
    tuning: Res<ArtilleryTuning>,
    mut projectiles: Query<
        (Entity, &mut Projectile, &mut Kinematics, &mut Transform),
        Without<BaseNode>,
    >,
    bases: Query<(Entity, &Transform, &Health), (With<BaseNode>, Without<Projectile>)>,
    mut impacts: EventWriter<ProjectileImpact>,
) {
    let delta = time.delta_secs();

    let mut in_flight: Vec<(Entity, Vec3)> = projectiles
        .iter()
        .filter(|(_, projectile, ..)| projectile.in_flight)
        .map(|(entity, _, _, transform)| (entity, transform.translation))
        .collect();
    in_flight.sort_by_key(|(entity, _)| entity.index());

    if in_flight.is_empty() {
        return;
    }

    let mut bodies: Vec<CollisionBody> = bases
        .iter()
        .filter(|(_, _, health)| health.is_alive())
        .map(|(entity, transform, _)| CollisionBody {
            entity,
            center: transform.translation,
            kind: BodyKind::Base,
        })
        .collect();
    bodies.sort_by_key(|body| body.entity.index());
    bodies.extend(in_flight.iter().map(|(entity, position)| CollisionBody {
        entity: *entity,
        center: *position,
        kind: BodyKind::Projectile,
    }));
    collision.0.sync_bodies(&bodies);

    for (entity, _) in in_flight {
        let Ok((_, mut projectile, mut kinematics, mut transform)) = projectiles.get_mut(entity)
        else {
            continue;
        };

        if !projectile.in_flight {
            continue;
        }

        let from = transform.translation;
        let motion = kinematics.step(delta);

        let hit = match collision.0.sweep(from, motion, entity) {
            Some(hit) => match validate_hit(from, motion, hit, entity) {
                Ok(hit) => Some(hit),
                Err(reason) => {
                    crate::log(&format!(
                        "Projectile {:?}: contact {:?} rejected ({:?})",
                        entity, hit.point, reason
                    ));
                    None
                }
            },
            None => None,
        };

        match hit {
            Some(hit) => {
                transform.translation = hit.point;
                projectile.in_flight = false;

                impacts.write(ProjectileImpact {
                    projectile: entity,
                    payload: projectile.payload,
                    creator: projectile.creator,
                    struck: hit.entity,
                    point: hit.point,
                });

                crate::log(&format!(
                    "💢 Projectile {:?} ({:?}) hit {:?} at {:?}",
                    entity, projectile.payload, hit.entity, hit.point
                ));
            }
            None => {
                transform.translation = from + motion;

                if transform.translation.y < tuning.kill_floor_y {
                    projectile.in_flight = false;
                    crate::log_warning(&format!(
                        "Projectile {:?} fell below kill floor {:.1}, discarded",
                        entity, tuning.kill_floor_y
                    ));
                }
            }
        }
    }
}

/// Система: despawn отработавших снарядов (SimSet::Cleanup)
pub fn despawn_spent_projectiles(mut commands: Commands, projectiles: Query<(Entity, &Projectile)>) {
    for (entity, projectile) in projectiles.iter() {
        if !projectile.in_flight {
            commands.entity(entity).despawn();
        }
    }
}
