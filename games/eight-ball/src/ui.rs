//! What the match tells the player, and how it reaches the page.
//!
//! Rules talk to a [`UiSink`]. The game shell uses [`UiLog`], which buffers
//! notifications; each frame they are encoded as engine `GameEvent`s, and the
//! page can also pull them as JSON.

use std::collections::BTreeSet;

use serde::Serialize;

use pool_engine::GameEvent;

use crate::balls::Group;
use crate::rules::{Groups, Player};

/// Game event kinds sent to the page.
pub mod game_events {
    /// a = player (1 or 2)
    pub const TURN: f32 = 1.0;
    /// a = seconds left
    pub const TIMER: f32 = 2.0;
    /// a = bitmask of ball ids on the table, b/c = player 1/2 group code
    pub const BALLS: f32 = 3.0;
    /// a = phase code, b = winner (0 while undecided)
    pub const STATE: f32 = 4.0;
    /// a = strength bar fill in [0, 1]
    pub const STRENGTH: f32 = 5.0;
}

pub trait UiSink {
    fn update_turn(&mut self, player: Player);
    fn update_balls(&mut self, on_table: &BTreeSet<u8>, groups: Groups);
    fn update_timer(&mut self, seconds: u32);
    fn log(&mut self, message: &str);
    fn show_end_message(&mut self, title: &str, body: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiNotification {
    Turn { player: Player },
    Balls { on_table: Vec<u8>, player1: Group, player2: Group },
    Timer { seconds: u32 },
    Log { message: String },
    EndMessage { title: String, body: String },
}

impl UiNotification {
    /// Compact form for the shared event buffer. Text-only notifications
    /// travel through the JSON stream alone.
    pub fn to_event(&self) -> Option<GameEvent> {
        match self {
            UiNotification::Turn { player } => {
                Some(GameEvent::new(game_events::TURN, player.index() as f32, 0.0, 0.0))
            }
            UiNotification::Timer { seconds } => {
                Some(GameEvent::new(game_events::TIMER, *seconds as f32, 0.0, 0.0))
            }
            UiNotification::Balls { on_table, player1, player2 } => {
                let mask = on_table.iter().fold(0u32, |mask, &id| mask | 1 << id);
                Some(GameEvent::new(
                    game_events::BALLS,
                    mask as f32,
                    player1.code(),
                    player2.code(),
                ))
            }
            UiNotification::Log { .. } | UiNotification::EndMessage { .. } => None,
        }
    }
}

/// Buffering sink. Log lines are mirrored to the `log` facade.
#[derive(Debug, Default)]
pub struct UiLog {
    pending: Vec<UiNotification>,
}

impl UiLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[UiNotification] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<UiNotification> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl UiSink for UiLog {
    fn update_turn(&mut self, player: Player) {
        self.pending.push(UiNotification::Turn { player });
    }

    fn update_balls(&mut self, on_table: &BTreeSet<u8>, groups: Groups) {
        self.pending.push(UiNotification::Balls {
            on_table: on_table.iter().copied().collect(),
            player1: groups.player1,
            player2: groups.player2,
        });
    }

    fn update_timer(&mut self, seconds: u32) {
        self.pending.push(UiNotification::Timer { seconds });
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.pending.push(UiNotification::Log {
            message: message.to_string(),
        });
    }

    fn show_end_message(&mut self, title: &str, body: &str) {
        self.pending.push(UiNotification::EndMessage {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

pub fn to_json(notifications: &[UiNotification]) -> Result<String, serde_json::Error> {
    serde_json::to_string(notifications)
}
