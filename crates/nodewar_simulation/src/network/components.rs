//! Base network компоненты: BaseNode, Health, parent/child links, markers
//!
//! Capability-модель вместо иерархии классов:
//! - `Health` - Damageable capability (есть у баз)
//! - `Kinematics` (ballistics) - moving capability (есть у снарядов)
//!
//! Дерево баз хранится прямо в компонентах:
//! - `ParentBase` - weak back-reference (только lookup, не владение)
//! - `ChildBases` - упорядоченный список детей (append-only)

use bevy::prelude::*;
use crate::config::BASE_MAX_HEALTH;

/// Base node - узел растущей сети игрока
///
/// Автоматически добавляет Health, ChildBases, Transform через Required Components.
/// Root база не имеет `ParentBase`; все остальные получают его при создании.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Health, ChildBases, Transform)]
pub struct BaseNode;

/// Здоровье базы
///
/// Инвариант: 0 ≤ current ≤ max; `current == 0` ⇔ база уничтожена.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(BASE_MAX_HEALTH)
    }
}

/// Результат `Health::take_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Урон применён, база жива
    Damaged { remaining: i32 },
    /// Этот удар уничтожил базу
    Destroyed,
    /// База уже мертва или amount <= 0 - ничего не изменилось
    Ignored,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Доля здоровья [0, 1] (для health bar в presentation)
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if amount <= 0 || !self.is_alive() {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount).max(0);

        if self.is_alive() {
            DamageOutcome::Damaged {
                remaining: self.current,
            }
        } else {
            DamageOutcome::Destroyed
        }
    }
}

/// Weak back-reference на родительскую базу
///
/// Родитель мог быть уничтожен после создания ребёнка - ссылка остаётся
/// (orphan state), presentation должен терпеть мёртвого родителя.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ParentBase(pub Entity);

/// Упорядоченный список дочерних баз (в порядке deployment)
#[derive(Component, Debug, Clone, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ChildBases(pub Vec<Entity>);

impl ChildBases {
    pub fn push(&mut self, child: Entity) {
        self.0.push(child);
    }

    pub fn contains(&self, child: Entity) -> bool {
        self.0.contains(&child)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.0.iter().copied()
    }
}

/// Маркер: база выбрана игроком (highlight в presentation)
///
/// Инвариант: не более одной базы с этим маркером.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Selected;

/// Маркер: база уничтожена (Health == 0)
///
/// Entity не деспавнится - дети продолжают ссылаться на неё через `ParentBase`.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Destroyed;
