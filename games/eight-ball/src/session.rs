//! One match on one table: balls, pocket detection, settling and rules,
//! stepped in a fixed order against any physics backend.

use glam::Vec3;

use pool_engine::{PhysicsAdapter, Scene};

use crate::balls::BallRegistry;
use crate::config::MatchConfig;
use crate::error::RuleError;
use crate::pocket::{PocketDetector, PocketEvent};
use crate::rules::{Phase, RuleMachine};
use crate::settle::SettlingMonitor;
use crate::ui::UiSink;

pub struct Session {
    registry: BallRegistry,
    detector: PocketDetector,
    monitor: SettlingMonitor,
    rules: RuleMachine,
    /// Shot direction in the table plane, radians from +X toward +Z.
    aim: f32,
}

impl Session {
    pub fn new(config: MatchConfig, registry: BallRegistry) -> Self {
        Self {
            registry,
            detector: PocketDetector::default(),
            monitor: SettlingMonitor::new(config.settle_frames),
            rules: RuleMachine::new(config),
            aim: 0.0,
        }
    }

    pub fn configure(&mut self, config: MatchConfig) {
        self.monitor.set_settle_frames(config.settle_frames);
        self.rules.set_config(config);
    }

    pub fn registry(&self) -> &BallRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleMachine {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.rules.phase()
    }

    pub fn aim(&self) -> f32 {
        self.aim
    }

    pub fn set_aim(&mut self, radians: f32) {
        if radians.is_finite() {
            self.aim = radians;
        }
    }

    pub fn aim_direction(&self) -> Vec3 {
        Vec3::new(self.aim.cos(), 0.0, self.aim.sin())
    }

    /// Re-rack and start a fresh match.
    pub fn start_game(&mut self, physics: &mut impl PhysicsAdapter, scene: &mut Scene, ui: &mut dyn UiSink) {
        self.registry.reset(physics, scene);
        self.monitor.reset();
        self.rules.start_game(ui);
    }

    /// Strike the cue ball along the current aim. Nothing moves unless the
    /// rules accept the shot.
    pub fn try_shoot(&mut self, strength: f32, physics: &mut impl PhysicsAdapter) -> Result<f32, RuleError> {
        let impulse = self.rules.shoot(strength)?;
        let cue = self.registry.cue();
        let center = physics.position(cue.entity).unwrap_or(cue.start);
        physics.apply_impulse(cue.entity, self.aim_direction() * impulse, center);
        self.monitor.reset();
        log::info!("{} shoots ({:.2})", self.rules.turn(), impulse);
        Ok(impulse)
    }

    /// One fixed step: physics, pockets, rules, settling, timers, poses.
    /// Returns the balls that dropped this step.
    pub fn step<P: PhysicsAdapter>(
        &mut self,
        dt: f32,
        physics: &mut P,
        scene: &mut Scene,
        ui: &mut dyn UiSink,
    ) -> Vec<PocketEvent> {
        physics.step(dt);

        let pocketed = self.detector.scan(&mut self.registry, physics, scene);
        for &event in &pocketed {
            if let Err(err) = self.rules.on_pocket(event, ui) {
                log::debug!("Pocket ignored: {}", err);
            }
        }

        if self.rules.phase() == Phase::TurnWaiting
            && self.monitor.poll(&self.registry, &*physics, self.rules.on_table())
        {
            self.monitor.reset();
            if let Err(err) = self.rules.on_settled(ui) {
                log::warn!("Settle ignored: {}", err);
            }
        }

        for err in self.rules.advance(dt, ui) {
            log::debug!("{}", err);
        }

        scene.sync_poses(&*physics);
        pocketed
    }
}
