//! Impact domain - что происходит после первого контакта снаряда
//!
//! - DeployBase → новая дочерняя база в точке попадания (родитель = creator)
//! - Detonate → урон базе (если попали в базу) + взрыв в точке попадания

use bevy::prelude::*;

use crate::ballistics::{PayloadKind, ProjectileImpact};
use crate::config::ArtilleryTuning;
use crate::network::{
    apply_base_damage, attach_child_base, BaseNode, ChildBases, Health, NetworkEvents, ParentBase,
};
use crate::shared::SpawnRequested;
use crate::SimSet;


/// Система: ImpactResolver (SimSet::Impact)
///
/// Impacts обрабатываются синхронно в том же tick, что и контакт -
/// presentation видит уже обновлённую сеть.
pub fn resolve_impacts(
    mut commands: Commands,
    mut impacts: EventReader<ProjectileImpact>,
    tuning: Res<ArtilleryTuning>,
    mut bases: Query<
        (&Transform, &mut Health, &mut ChildBases, Option<&ParentBase>),
        With<BaseNode>,
    >,
    mut events: NetworkEvents,
) {
    for impact in impacts.read() {
        match impact.payload {
            PayloadKind::DeployBase => {
                deploy_base(&mut commands, &mut events, &tuning, &mut bases, impact);
            }
            PayloadKind::Detonate => {
                if let Some(struck) = impact.struck {
                    if let Ok((transform, mut health, _, parent)) = bases.get_mut(struck) {
                        apply_base_damage(
                            &mut commands,
                            &mut events,
                            struck,
                            &mut health,
                            transform.translation,
                            parent.map(|p| p.0),
                            tuning.bomb_damage,
                        );
                    }
                }

                // Взрыв всегда, даже в землю
                events.spawned.write(SpawnRequested::effect(impact.point));
            }
        }
    }
}

fn deploy_base(
    commands: &mut Commands,
    events: &mut NetworkEvents,
    tuning: &ArtilleryTuning,
    bases: &mut Query<
        (&Transform, &mut Health, &mut ChildBases, Option<&ParentBase>),
        With<BaseNode>,
    >,
    impact: &ProjectileImpact,
) {
    let Some(creator) = impact.creator else {
        crate::log_warning(&format!(
            "Deploy projectile {:?} has no creator, deployment rejected",
            impact.projectile
        ));
        return;
    };

    let Ok((_, health, mut children, _)) = bases.get_mut(creator) else {
        crate::log_warning(&format!(
            "Deploy projectile {:?}: creator {:?} is gone, deployment rejected",
            impact.projectile, creator
        ));
        return;
    };

    let deployed = attach_child_base(
        commands,
        events,
        creator,
        &health,
        &mut children,
        impact.point,
        tuning.base_max_health,
    );

    if deployed.is_none() {
        crate::log_warning(&format!(
            "Deploy projectile {:?}: creator {:?} is destroyed, deployment rejected",
            impact.projectile, creator
        ));
    }
}

/// Impact Plugin
pub struct ImpactPlugin;

impl Plugin for ImpactPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, resolve_impacts.in_set(SimSet::Impact));
    }
}
