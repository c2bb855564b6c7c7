//! Pocket detection: a ball whose center drops below the table plane by more
//! than its radius has gone down a pocket.

use pool_engine::{PhysicsAdapter, Scene};

use crate::balls::{Ball, BallKind, BallRegistry, BALL_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PocketEvent {
    Numbered(u8),
    Cue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PocketDetector {
    threshold: f32,
}

impl Default for PocketDetector {
    fn default() -> Self {
        Self::new(-BALL_RADIUS)
    }
}

impl PocketDetector {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Check one ball and apply its hole behavior. A numbered ball leaves the
    /// world for good; the cue ball is put back on its spot.
    pub fn check(
        &self,
        ball: &mut Ball,
        physics: &mut impl PhysicsAdapter,
        scene: &mut Scene,
    ) -> Option<PocketEvent> {
        if ball.pocketed {
            return None;
        }
        let pos = physics.position(ball.entity)?;
        if pos.y >= self.threshold {
            return None;
        }

        physics.stop(ball.entity);
        match ball.kind {
            BallKind::Numbered => {
                physics.remove_body(ball.entity);
                ball.pocketed = true;
                scene.set_visible(ball.entity, false);
                log::debug!("Ball {} dropped", ball.id);
                Some(PocketEvent::Numbered(ball.id))
            }
            BallKind::Cue => {
                physics.set_position(ball.entity, ball.start);
                if let Some(entity) = scene.get_mut(ball.entity) {
                    entity.pos = ball.start;
                }
                log::debug!("Cue ball dropped, respotted");
                Some(PocketEvent::Cue)
            }
        }
    }

    /// Check every ball, in id order.
    pub fn scan(
        &self,
        registry: &mut BallRegistry,
        physics: &mut impl PhysicsAdapter,
        scene: &mut Scene,
    ) -> Vec<PocketEvent> {
        registry
            .iter_mut()
            .filter_map(|ball| self.check(ball, physics, scene))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balls::RackLayout;
    use crate::testing::rack;
    use glam::Vec3;

    #[test]
    fn ball_above_threshold_is_ignored() {
        let (mut registry, mut physics, mut scene) = rack();
        let detector = PocketDetector::default();
        let three = registry.get_ball(3).unwrap().entity;
        physics.place(three, Vec3::new(0.5, -0.5 * BALL_RADIUS, 0.0));
        assert!(detector.scan(&mut registry, &mut physics, &mut scene).is_empty());
    }

    #[test]
    fn numbered_ball_leaves_once() {
        let (mut registry, mut physics, mut scene) = rack();
        let detector = PocketDetector::default();
        let three = registry.get_ball(3).unwrap().entity;
        physics.place(three, Vec3::new(1.3, -0.1, 0.6));
        physics.set_motion(three, Vec3::new(0.0, -1.0, 0.0), Vec3::ONE);

        let events = detector.scan(&mut registry, &mut physics, &mut scene);
        assert_eq!(events, vec![PocketEvent::Numbered(3)]);
        assert!(registry.get_ball(3).unwrap().pocketed);
        assert!(!physics.has_body(three));
        assert_eq!(scene.get(three).map(|e| e.visible), Some(false));

        assert!(detector.scan(&mut registry, &mut physics, &mut scene).is_empty());
    }

    #[test]
    fn cue_ball_is_respotted() {
        let (mut registry, mut physics, mut scene) = rack();
        let detector = PocketDetector::default();
        let cue = registry.cue().entity;
        let start = RackLayout::default().cue_spot;
        physics.place(cue, Vec3::new(-1.3, -0.2, 0.6));
        physics.set_motion(cue, Vec3::new(0.3, -2.0, 0.0), Vec3::ONE);

        let events = detector.scan(&mut registry, &mut physics, &mut scene);
        assert_eq!(events, vec![PocketEvent::Cue]);
        assert!(!registry.cue().pocketed);
        assert!(physics.has_body(cue));
        assert_eq!(physics.position(cue), Some(start));
        assert_eq!(physics.velocity(cue), Some(Vec3::ZERO));
        assert_eq!(physics.angular_velocity(cue), Some(Vec3::ZERO));
        assert_eq!(scene.get(cue).map(|e| e.pos), Some(start));

        // Back on the spot, so nothing more to report.
        assert!(detector.scan(&mut registry, &mut physics, &mut scene).is_empty());
    }

    #[test]
    fn several_balls_in_one_step_report_in_id_order() {
        let (mut registry, mut physics, mut scene) = rack();
        let detector = PocketDetector::default();
        for id in [12u8, 2] {
            let entity = registry.get_ball(id).unwrap().entity;
            physics.place(entity, Vec3::new(0.0, -1.0, 0.7));
        }
        let events = detector.scan(&mut registry, &mut physics, &mut scene);
        assert_eq!(events, vec![PocketEvent::Numbered(2), PocketEvent::Numbered(12)]);
    }

    #[test]
    fn real_world_drop_is_detected() {
        let mut physics = pool_engine::PhysicsWorld::new(Vec3::new(0.0, -9.8, 0.0));
        let mut scene = Scene::new();
        let entities = std::array::from_fn(|i| pool_engine::EntityId(i as u32 + 1));
        let mut registry =
            BallRegistry::create_rack(&RackLayout::default(), entities, &mut physics, &mut scene);
        let detector = PocketDetector::default();

        // No table: every ball falls, and each is reported exactly once.
        let mut events = Vec::new();
        for _ in 0..30 {
            physics.step(1.0 / 60.0);
            events.extend(detector.scan(&mut registry, &mut physics, &mut scene));
        }
        let numbered = events.iter().filter(|e| matches!(e, PocketEvent::Numbered(_))).count();
        assert_eq!(numbered, 15);
        assert!(events.contains(&PocketEvent::Cue));
    }
}
