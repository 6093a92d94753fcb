//! Base network systems: provisioning, deployment, damage, selection.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::config::{ArtilleryTuning, BASE_MAX_HEALTH};
use crate::network::{
    BaseDamaged, BaseDeployed, BaseDestroyed, BaseNode, CenterCameraRequest, ChildBases,
    DamageOutcome, Destroyed, Health, ParentBase, SelectBaseIntent, Selected,
};
use crate::shared::{SpawnKind, SpawnRequested};
use crate::shooting::{AimState, ChargeState};

/// Event writers, которые трогает любая мутация сети
#[derive(SystemParam)]
pub struct NetworkEvents<'w> {
    pub spawned: EventWriter<'w, SpawnRequested>,
    pub deployed: EventWriter<'w, BaseDeployed>,
    pub damaged: EventWriter<'w, BaseDamaged>,
    pub destroyed: EventWriter<'w, BaseDestroyed>,
}

/// Создаёт root базу (externally provisioned, без родителя)
///
/// Вызывается хостом при загрузке уровня, до первого tick.
pub fn spawn_root_base(world: &mut World, position: Vec3) -> Entity {
    let max_health = world
        .get_resource::<ArtilleryTuning>()
        .map(|tuning| tuning.base_max_health)
        .unwrap_or(BASE_MAX_HEALTH);

    let entity = world
        .spawn((
            BaseNode,
            Health::new(max_health),
            Transform::from_translation(position),
        ))
        .id();

    world.send_event(SpawnRequested {
        kind: SpawnKind::BaseEntity,
        entity: Some(entity),
        position,
    });

    crate::log_info(&format!("🏠 Root base {:?} provisioned at {:?}", entity, position));
    entity
}

/// Создаёт дочернюю базу и добавляет её в `ChildBases` родителя
///
/// Единственная точка роста дерева: родитель обязан быть жив в момент
/// attachment. Для мёртвого родителя возвращает None и ничего не создаёт.
pub fn attach_child_base(
    commands: &mut Commands,
    events: &mut NetworkEvents,
    parent: Entity,
    parent_health: &Health,
    parent_children: &mut ChildBases,
    position: Vec3,
    max_health: i32,
) -> Option<Entity> {
    if !parent_health.is_alive() {
        return None;
    }

    let child = commands
        .spawn((
            BaseNode,
            Health::new(max_health),
            ParentBase(parent),
            Transform::from_translation(position),
        ))
        .id();

    parent_children.push(child);

    events.spawned.write(SpawnRequested {
        kind: SpawnKind::BaseEntity,
        entity: Some(child),
        position,
    });
    events.deployed.write(BaseDeployed {
        base: child,
        parent,
        position,
    });

    crate::log(&format!(
        "🌱 Base {:?} deployed at {:?} (parent {:?}, {} children)",
        child,
        position,
        parent,
        parent_children.len()
    ));

    Some(child)
}

/// Наносит урон базе
///
/// Уничтожение - только state flip (Health == 0 + маркер `Destroyed`):
/// entity остаётся, из `ChildBases` родителя не удаляется, дети не трогаются.
pub fn apply_base_damage(
    commands: &mut Commands,
    events: &mut NetworkEvents,
    base: Entity,
    health: &mut Health,
    position: Vec3,
    parent: Option<Entity>,
    amount: i32,
) -> DamageOutcome {
    let outcome = health.take_damage(amount);

    match outcome {
        DamageOutcome::Damaged { remaining } => {
            events.damaged.write(BaseDamaged {
                base,
                amount,
                remaining,
            });
            crate::log(&format!(
                "💥 Base {:?} hit for {} (HP: {}/{})",
                base, amount, remaining, health.max
            ));
        }
        DamageOutcome::Destroyed => {
            events.damaged.write(BaseDamaged {
                base,
                amount,
                remaining: 0,
            });
            events.destroyed.write(BaseDestroyed {
                base,
                parent,
                position,
            });
            // Взрыв на месте базы (косметика, core не ждёт завершения)
            events.spawned.write(SpawnRequested::effect(position));

            if let Ok(mut entity_commands) = commands.get_entity(base) {
                entity_commands.insert(Destroyed);
            }

            crate::log_info(&format!("☠️ Base {:?} destroyed (parent {:?})", base, parent));
        }
        DamageOutcome::Ignored => {
            crate::log(&format!("Damage {} on base {:?} ignored (already dead)", amount, base));
        }
    }

    outcome
}

/// Система: обработка SelectBaseIntent
///
/// 1. Проверяем что target - живая база (иначе no-op, charge не сбрасывается)
/// 2. Снимаем Selected с предыдущей базы
/// 3. Ставим Selected на новую, сбрасываем charge в Idle/0
/// 4. Просим presentation центрировать камеру
pub fn process_select_intents(
    mut commands: Commands,
    mut intents: EventReader<SelectBaseIntent>,
    mut aim: ResMut<AimState>,
    mut charge: ResMut<ChargeState>,
    bases: Query<(&Transform, &Health), With<BaseNode>>,
    mut center_requests: EventWriter<CenterCameraRequest>,
) {
    for intent in intents.read() {
        let Ok((transform, health)) = bases.get(intent.entity) else {
            crate::log_warning(&format!(
                "SelectBaseIntent: {:?} is not a base, ignored",
                intent.entity
            ));
            continue;
        };

        if !health.is_alive() {
            crate::log_warning(&format!(
                "SelectBaseIntent: base {:?} is destroyed, ignored",
                intent.entity
            ));
            continue;
        }

        if let Some(previous) = aim.selected.take() {
            if let Ok(mut entity_commands) = commands.get_entity(previous) {
                entity_commands.remove::<Selected>();
            }
        }

        commands.entity(intent.entity).insert(Selected);
        aim.selected = Some(intent.entity);

        // Незавершённый заряд выбрасывается - выстрела не будет
        if charge.is_charging() {
            crate::log(&format!(
                "Charge {:.2} discarded by selection change",
                charge.level
            ));
        }
        charge.cancel();

        center_requests.write(CenterCameraRequest {
            base: intent.entity,
            position: transform.translation,
        });

        crate::log(&format!("🎯 Selected base {:?}", intent.entity));
    }
}

/// Система: снимает выбор с уничтоженной базы
///
/// Гарантирует инвариант: Charging никогда не идёт без живой выбранной базы.
pub fn clear_dead_selection(
    mut commands: Commands,
    mut aim: ResMut<AimState>,
    mut charge: ResMut<ChargeState>,
    bases: Query<&Health, With<BaseNode>>,
) {
    let Some(selected) = aim.selected else {
        return;
    };

    if bases.get(selected).is_ok_and(|health| health.is_alive()) {
        return;
    }

    aim.selected = None;
    charge.cancel();

    if let Ok(mut entity_commands) = commands.get_entity(selected) {
        entity_commands.remove::<Selected>();
    }

    crate::log_info(&format!("Selected base {:?} is gone, selection cleared", selected));
}
