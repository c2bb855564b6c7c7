//! Match tuning, loadable from JSON. Missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seconds on the shot clock at the start of every turn.
    pub turn_seconds: u32,
    /// Delay before the opponent's turn after the clock runs out.
    pub out_of_time_delay: f32,
    /// Delay between the table settling and the next turn.
    pub turn_delay: f32,
    /// Delay between the 8 ball dropping and the end screen.
    pub game_over_delay: f32,
    /// Consecutive settled steps required before a shot is finished.
    pub settle_frames: u32,
    /// Strength bar gain per fixed step while charging.
    pub charge_rate: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            turn_seconds: 30,
            out_of_time_delay: 1.0,
            turn_delay: 0.5,
            game_over_delay: 2.0,
            settle_frames: 2,
            charge_rate: 0.01,
        }
    }
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: MatchConfig = serde_json::from_str(json)?;
        config.settle_frames = config.settle_frames.max(1);
        config.turn_seconds = config.turn_seconds.max(1);
        Ok(config)
    }
}
