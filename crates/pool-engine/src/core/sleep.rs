//! Sleep-state hysteresis for dynamic bodies.
//!
//! A body becomes *sleepy* once `|v|² + |ω|²` drops under `speed_limit²`, and
//! only falls asleep after staying sleepy for `time_limit` seconds. Any sample
//! above the limit wakes it again. This keeps near-zero solver jitter from
//! flapping the state every step.

use serde::{Deserialize, Serialize};

/// Share of `speed_limit` a contact must leave behind to wake a sleeping body.
const CONTACT_WAKE_FRACTION: f32 = 0.1;

/// Whether a body is still moving, as far as game logic is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepState {
    Awake,
    Sleeping,
}

impl SleepState {
    pub fn is_awake(self) -> bool {
        self == SleepState::Awake
    }
}

/// Thresholds shared by every tracked body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SleepConfig {
    /// Combined linear + angular speed below which a body counts as sleepy.
    pub speed_limit: f32,
    /// Seconds a body must stay sleepy before it sleeps.
    pub time_limit: f32,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            speed_limit: 2.0,
            time_limit: 0.1,
        }
    }
}

/// Per-body tracker fed once per fixed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepTracker {
    config: SleepConfig,
    sleepy_for: Option<f32>,
    state: SleepState,
}

impl SleepTracker {
    pub fn new(config: SleepConfig) -> Self {
        Self {
            config,
            sleepy_for: None,
            state: SleepState::Awake,
        }
    }

    pub fn state(&self) -> SleepState {
        self.state
    }

    pub fn is_sleeping(&self) -> bool {
        self.state == SleepState::Sleeping
    }

    /// Feed one step worth of motion. Returns `true` exactly on the step the
    /// body falls asleep, so the caller can freeze it.
    pub fn observe(&mut self, linear_speed: f32, angular_speed: f32, dt: f32) -> bool {
        let speed_sq = linear_speed * linear_speed + angular_speed * angular_speed;
        let limit_sq = self.config.speed_limit * self.config.speed_limit;

        if speed_sq >= limit_sq {
            self.wake();
            return false;
        }
        if self.state == SleepState::Sleeping {
            return false;
        }

        let sleepy_for = self.sleepy_for.map_or(0.0, |t| t + dt);
        self.sleepy_for = Some(sleepy_for);
        if sleepy_for >= self.config.time_limit {
            self.state = SleepState::Sleeping;
            return true;
        }
        false
    }

    /// A contact disturbed a sleeping body. It wakes and runs the sleepy
    /// countdown again, unless the contact left it practically still (a
    /// resting neighbour). Returns whether it woke.
    pub fn contact(&mut self, linear_speed: f32, angular_speed: f32) -> bool {
        if self.state == SleepState::Awake {
            return false;
        }
        let speed_sq = linear_speed * linear_speed + angular_speed * angular_speed;
        let wake_limit = self.config.speed_limit * CONTACT_WAKE_FRACTION;
        if speed_sq >= wake_limit * wake_limit {
            self.wake();
            return true;
        }
        false
    }

    /// Force the body awake (impulse, teleport).
    pub fn wake(&mut self) {
        self.sleepy_for = None;
        self.state = SleepState::Awake;
    }
}
