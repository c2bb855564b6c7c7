//! "Has the table stopped moving?" from per-body sleep states.

use std::collections::BTreeSet;

use pool_engine::PhysicsAdapter;

use crate::balls::BallRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlingMonitor {
    settle_frames: u32,
    settled_for: u32,
}

impl SettlingMonitor {
    pub fn new(settle_frames: u32) -> Self {
        Self {
            settle_frames: settle_frames.max(1),
            settled_for: 0,
        }
    }

    pub fn set_settle_frames(&mut self, settle_frames: u32) {
        self.settle_frames = settle_frames.max(1);
    }

    /// The cue ball and every numbered ball still on the table are asleep.
    /// Pocketed balls are ignored.
    pub fn is_settled(
        &self,
        registry: &BallRegistry,
        physics: &impl PhysicsAdapter,
        on_table: &BTreeSet<u8>,
    ) -> bool {
        if physics.sleep_state(registry.cue().entity).is_awake() {
            return false;
        }
        registry
            .iter()
            .filter(|b| !b.is_cue() && !b.pocketed && on_table.contains(&b.id))
            .all(|b| !physics.sleep_state(b.entity).is_awake())
    }

    /// Debounced `is_settled`: true once it has held for `settle_frames`
    /// consecutive polls.
    pub fn poll(
        &mut self,
        registry: &BallRegistry,
        physics: &impl PhysicsAdapter,
        on_table: &BTreeSet<u8>,
    ) -> bool {
        if self.is_settled(registry, physics, on_table) {
            self.settled_for = self.settled_for.saturating_add(1);
        } else {
            self.settled_for = 0;
        }
        self.settled_for >= self.settle_frames
    }

    pub fn reset(&mut self) {
        self.settled_for = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::rack;
    use glam::Vec3;

    fn all_on_table() -> BTreeSet<u8> {
        (1..=15).collect()
    }

    #[test]
    fn fresh_rack_is_settled() {
        let (registry, physics, _) = rack();
        let monitor = SettlingMonitor::new(2);
        assert!(monitor.is_settled(&registry, &physics, &all_on_table()));
    }

    #[test]
    fn moving_cue_blocks_settling() {
        let (registry, mut physics, _) = rack();
        let monitor = SettlingMonitor::new(2);
        physics.set_motion(registry.cue().entity, Vec3::X, Vec3::ZERO);
        assert!(!monitor.is_settled(&registry, &physics, &all_on_table()));
    }

    #[test]
    fn pocketed_and_off_table_balls_are_ignored() {
        let (mut registry, mut physics, _) = rack();
        let monitor = SettlingMonitor::new(2);
        let seven = registry.get_ball(7).unwrap().entity;
        physics.set_motion(seven, Vec3::Y, Vec3::ZERO);

        let mut on_table = all_on_table();
        assert!(!monitor.is_settled(&registry, &physics, &on_table));

        registry.get_ball_mut(7).unwrap().pocketed = true;
        assert!(monitor.is_settled(&registry, &physics, &on_table));

        registry.get_ball_mut(7).unwrap().pocketed = false;
        on_table.remove(&7);
        assert!(monitor.is_settled(&registry, &physics, &on_table));
    }

    #[test]
    fn poll_debounces_and_resets() {
        let (registry, mut physics, _) = rack();
        let mut monitor = SettlingMonitor::new(2);
        let on_table = all_on_table();

        assert!(!monitor.poll(&registry, &physics, &on_table));
        assert!(monitor.poll(&registry, &physics, &on_table));

        // One awake sample restarts the count.
        let cue = registry.cue().entity;
        physics.set_sleeping(cue, false);
        assert!(!monitor.poll(&registry, &physics, &on_table));
        physics.set_sleeping(cue, true);
        assert!(!monitor.poll(&registry, &physics, &on_table));
        assert!(monitor.poll(&registry, &physics, &on_table));

        monitor.reset();
        assert!(!monitor.poll(&registry, &physics, &on_table));
    }
}
