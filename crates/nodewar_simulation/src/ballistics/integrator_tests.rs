//! Tests for TrajectoryIntegrator.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::ballistics::{
        validate_hit, CollisionService, CollisionWorld, Kinematics, PayloadKind, Projectile,
        ProjectileImpact, SweepHit, SweepRejection,
    };
    use crate::{advance_simulation, create_headless_app};

    /// Коллаборатор, который всегда отвечает одним и тем же контактом
    struct ScriptedCollision {
        hit: Option<SweepHit>,
    }

    impl CollisionService for ScriptedCollision {
        fn sweep(&self, _from: Vec3, _motion: Vec3, _ignore: Entity) -> Option<SweepHit> {
            self.hit
        }
    }

    fn spawn_projectile(app: &mut App, position: Vec3, velocity: Vec3, gravity: f32) -> Entity {
        app.world_mut()
            .spawn((
                Projectile::new(PayloadKind::Detonate, None),
                Kinematics::new(velocity, gravity),
                Transform::from_translation(position),
            ))
            .id()
    }

    fn impacts(app: &mut App) -> Vec<ProjectileImpact> {
        app.world_mut()
            .resource_mut::<Events<ProjectileImpact>>()
            .drain()
            .collect()
    }

    #[test]
    fn test_kinematics_step_applies_gravity_first() {
        let mut kinematics = Kinematics::new(Vec3::new(0.0, 5.0, 4.0), 10.0);
        let motion = kinematics.step(0.5);

        assert_eq!(kinematics.velocity, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(motion, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_validate_hit() {
        let projectile = Entity::from_raw(3);
        let from = Vec3::ZERO;
        let motion = Vec3::new(0.0, 0.0, 2.0);
        let hit_at = |z: f32, entity: Option<Entity>| SweepHit {
            point: Vec3::new(0.0, 0.0, z),
            entity,
        };

        assert!(validate_hit(from, motion, hit_at(1.0, None), projectile).is_ok());
        assert!(validate_hit(from, motion, hit_at(0.0, None), projectile).is_ok());
        assert!(validate_hit(from, motion, hit_at(2.0, None), projectile).is_ok());
        assert_eq!(
            validate_hit(from, motion, hit_at(-1.0, None), projectile),
            Err(SweepRejection::BehindStart)
        );
        assert_eq!(
            validate_hit(from, motion, hit_at(5.0, None), projectile),
            Err(SweepRejection::PastEnd)
        );
        assert_eq!(
            validate_hit(from, motion, hit_at(1.0, Some(projectile)), projectile),
            Err(SweepRejection::SelfHit)
        );
    }

    #[test]
    fn test_free_flight_without_contact() {
        let mut app = create_headless_app(42);
        app.insert_resource(CollisionWorld::new(ScriptedCollision { hit: None }));
        let projectile = spawn_projectile(&mut app, Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 0.0, 8.0), 0.0);

        advance_simulation(app.world_mut(), 0.25);
        advance_simulation(app.world_mut(), 0.25);

        let position = app.world().get::<Transform>(projectile).map(|t| t.translation);
        assert_eq!(position, Some(Vec3::new(0.0, 10.0, 4.0)));
        assert!(impacts(&mut app).is_empty());
    }

    #[test]
    fn test_first_contact_only() {
        let mut app = create_headless_app(42);
        let point = Vec3::new(0.0, 10.0, 1.0);
        app.insert_resource(CollisionWorld::new(ScriptedCollision {
            hit: Some(SweepHit { point, entity: None }),
        }));
        let projectile = spawn_projectile(&mut app, Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 0.0, 8.0), 0.0);

        advance_simulation(app.world_mut(), 0.25);
        let first = impacts(&mut app);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].projectile, projectile);
        assert_eq!(first[0].point, point);
        assert_eq!(first[0].payload, PayloadKind::Detonate);

        // Коллаборатор продолжает сообщать контакт - снаряд уже despawned
        for _ in 0..5 {
            advance_simulation(app.world_mut(), 0.25);
        }
        assert!(impacts(&mut app).is_empty());
        assert!(app.world().get::<Projectile>(projectile).is_none());
    }

    #[test]
    fn test_misreported_contact_ignored() {
        let mut app = create_headless_app(42);
        app.insert_resource(CollisionWorld::new(ScriptedCollision {
            hit: Some(SweepHit {
                point: Vec3::new(0.0, 10.0, -5.0),
                entity: None,
            }),
        }));
        let projectile = spawn_projectile(&mut app, Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 0.0, 8.0), 0.0);

        advance_simulation(app.world_mut(), 0.25);

        assert!(impacts(&mut app).is_empty());
        let state = app.world().get::<Projectile>(projectile).copied();
        assert!(state.is_some_and(|p| p.in_flight));
        let position = app.world().get::<Transform>(projectile).map(|t| t.translation);
        assert_eq!(position, Some(Vec3::new(0.0, 10.0, 2.0)));
    }

    #[test]
    fn test_kill_floor_discards_without_impact() {
        let mut app = create_headless_app(42);
        app.insert_resource(CollisionWorld::new(ScriptedCollision { hit: None }));
        let projectile = spawn_projectile(&mut app, Vec3::new(0.0, -99.0, 0.0), Vec3::new(0.0, -10.0, 0.0), 9.8);

        advance_simulation(app.world_mut(), 0.25);

        assert!(impacts(&mut app).is_empty());
        assert!(app.world().get::<Projectile>(projectile).is_none());
    }

    #[test]
    fn test_headless_ground_impact() {
        let mut app = create_headless_app(42);
        let projectile = spawn_projectile(&mut app, Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 5.0, 4.0), 9.8);

        let mut impact = None;
        for _ in 0..600 {
            advance_simulation(app.world_mut(), 1.0 / 60.0);
            if let Some(found) = impacts(&mut app).pop() {
                impact = Some(found);
                break;
            }
        }

        let impact = impact.expect("projectile should land");
        assert_eq!(impact.projectile, projectile);
        assert_eq!(impact.struck, None);
        assert!(impact.point.y.abs() < 1e-4);
        // Аналитически: t = (5 + sqrt(25 + 4*4.9*2)) / 9.8 ≈ 1.328, z ≈ 5.31
        assert!((impact.point.z - 5.31).abs() < 0.2, "z = {}", impact.point.z);
    }
}
