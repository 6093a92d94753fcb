//! Collision seam: sweep-запросы траектории
//!
//! Симуляция не владеет физикой - движок (или headless реализация) отвечает
//! на вопрос "что первым встретит отрезок from → from + motion".

use bevy::prelude::*;

/// Первый контакт на отрезке
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub point: Vec3,

    /// None - статичный мир (земля, стены)
    pub entity: Option<Entity>,
}

/// Тип тела для sync_bodies (определяет радиус в headless реализации)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Base,
    Projectile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBody {
    pub entity: Entity,
    pub center: Vec3,
    pub kind: BodyKind,
}

/// Коллаборатор для TrajectoryIntegrator
///
/// Возвращает не больше одного (первого) контакта. `ignore` - сам снаряд.
pub trait CollisionService: Send + Sync {
    fn sweep(&self, from: Vec3, motion: Vec3, ignore: Entity) -> Option<SweepHit>;

    /// Обновление динамических тел перед sweep-ами текущего tick.
    /// Движок с собственной физикой держит тела сам и игнорирует вызов.
    fn sync_bodies(&mut self, _bodies: &[CollisionBody]) {}
}

/// Resource-обёртка над активной реализацией
#[derive(Resource)]
pub struct CollisionWorld(pub Box<dyn CollisionService>);

impl CollisionWorld {
    pub fn new(service: impl CollisionService + 'static) -> Self {
        Self(Box::new(service))
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(HeadlessCollision::default())
    }
}

pub const DEFAULT_GROUND_Y: f32 = 0.0;
pub const DEFAULT_BASE_RADIUS: f32 = 1.0;
pub const DEFAULT_PROJECTILE_RADIUS: f32 = 0.25;

/// Аналитическая коллизия без движка: плоскость земли + сферы тел
#[derive(Debug, Clone)]
pub struct HeadlessCollision {
    pub ground_y: f32,
    pub base_radius: f32,
    pub projectile_radius: f32,
    bodies: Vec<CollisionBody>,
}

impl Default for HeadlessCollision {
    fn default() -> Self {
        Self {
            ground_y: DEFAULT_GROUND_Y,
            base_radius: DEFAULT_BASE_RADIUS,
            projectile_radius: DEFAULT_PROJECTILE_RADIUS,
            bodies: Vec::new(),
        }
    }
}

impl HeadlessCollision {
    pub fn bodies(&self) -> &[CollisionBody] {
        &self.bodies
    }

    fn radius(&self, kind: BodyKind) -> f32 {
        match kind {
            BodyKind::Base => self.base_radius,
            BodyKind::Projectile => self.projectile_radius,
        }
    }
}

impl CollisionService for HeadlessCollision {
    fn sweep(&self, from: Vec3, motion: Vec3, ignore: Entity) -> Option<SweepHit> {
        let mut best: Option<(f32, SweepHit)> =
            segment_plane_y(from, motion, self.ground_y).map(|t| {
                (
                    t,
                    SweepHit {
                        point: from + motion * t,
                        entity: None,
                    },
                )
            });

        for body in self.bodies.iter().filter(|body| body.entity != ignore) {
            let Some(t) = segment_sphere(from, motion, body.center, self.radius(body.kind)) else {
                continue;
            };

            if best.as_ref().map_or(true, |(best_t, _)| t < *best_t) {
                best = Some((
                    t,
                    SweepHit {
                        point: from + motion * t,
                        entity: Some(body.entity),
                    },
                ));
            }
        }

        best.map(|(_, hit)| hit)
    }

    fn sync_bodies(&mut self, bodies: &[CollisionBody]) {
        self.bodies.clear();
        self.bodies.extend_from_slice(bodies);
    }
}

/// Пересечение отрезка с горизонтальной плоскостью (только сверху вниз)
///
/// Возвращает параметр t ∈ [0, 1].
pub fn segment_plane_y(from: Vec3, motion: Vec3, plane_y: f32) -> Option<f32> {
    let end_y = from.y + motion.y;
    if from.y < plane_y || end_y >= plane_y {
        return None;
    }

    Some((from.y - plane_y) / (from.y - end_y))
}

/// Вход отрезка в сферу
///
/// Старт внутри сферы не считается контактом (иначе тело "застревает").
pub fn segment_sphere(from: Vec3, motion: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let offset = from - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }

    let a = motion.length_squared();
    if a <= f32::EPSILON {
        return None;
    }

    let b = 2.0 * offset.dot(motion);
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}
