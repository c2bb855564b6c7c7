//! Eight-ball turn and rule state machine.
//!
//! ```text
//! NotStarted -> Turn -> TurnWaiting -> Paused -> Turn -> ... -> GameOver
//!               Turn -> OutOfTime -> Turn            (shot clock expired)
//! ```
//!
//! The machine never touches physics. It is fed pocket events and "table has
//! settled" signals, reports through a [`UiSink`], and keeps its own clock:
//! every delayed continuation is a [`Scheduler`] task whose handle is kept so
//! a preempting transition can cancel it.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use pool_engine::{Scheduler, TaskHandle};

use crate::balls::{Group, EIGHT_BALL};
use crate::config::MatchConfig;
use crate::error::RuleError;
use crate::pocket::PocketEvent;
use crate::ui::UiSink;

/// Full strength bar maps to this impulse (N·s) on the cue ball.
pub const STRENGTH_SCALE: f32 = 1.4;

const TICK_INTERVAL: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Turn,
    TurnWaiting,
    Paused,
    OutOfTime,
    GameOver,
}

impl Phase {
    pub fn code(self) -> f32 {
        match self {
            Phase::NotStarted => 0.0,
            Phase::Turn => 1.0,
            Phase::TurnWaiting => 2.0,
            Phase::Paused => 3.0,
            Phase::OutOfTime => 4.0,
            Phase::GameOver => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Player::Player1 => 1,
            Player::Player2 => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player{}", self.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Groups {
    pub player1: Group,
    pub player2: Group,
}

impl Default for Groups {
    fn default() -> Self {
        Self {
            player1: Group::Unassigned,
            player2: Group::Unassigned,
        }
    }
}

impl Groups {
    pub fn of(&self, player: Player) -> Group {
        match player {
            Player::Player1 => self.player1,
            Player::Player2 => self.player2,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.player1 != Group::Unassigned
    }

    /// Give `player` the group, the opponent the other one.
    fn assign(&mut self, player: Player, group: Group) {
        match player {
            Player::Player1 => {
                self.player1 = group;
                self.player2 = group.complement();
            }
            Player::Player2 => {
                self.player2 = group;
                self.player1 = group.complement();
            }
        }
    }
}

/// Delayed continuations the machine schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    TimerTick,
    StartTurn,
    EndGame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub phase: Phase,
    pub turn: Player,
    pub on_table: BTreeSet<u8>,
    pub groups: Groups,
    pub pocketing_occurred: bool,
    pub timer: u32,
    /// Decided the moment the 8 drops; the end screen follows after a delay.
    pub pending_winner: Option<Player>,
    pub winner: Option<Player>,
    timer_task: Option<TaskHandle>,
    turn_task: Option<TaskHandle>,
    end_task: Option<TaskHandle>,
}

impl MatchState {
    fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            turn: Player::Player1,
            on_table: (1..=15).collect(),
            groups: Groups::default(),
            pocketing_occurred: false,
            timer: 0,
            pending_winner: None,
            winner: None,
            timer_task: None,
            turn_task: None,
            end_task: None,
        }
    }

    pub fn eight_pocketed(&self) -> bool {
        self.pending_winner.is_some()
    }
}

pub struct RuleMachine {
    config: MatchConfig,
    state: MatchState,
    scheduler: Scheduler<Deferred>,
}

impl RuleMachine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            state: MatchState::new(),
            scheduler: Scheduler::new(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Applies to delays scheduled from now on.
    pub fn set_config(&mut self, config: MatchConfig) {
        self.config = config;
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn turn(&self) -> Player {
        self.state.turn
    }

    pub fn groups(&self) -> Groups {
        self.state.groups
    }

    pub fn on_table(&self) -> &BTreeSet<u8> {
        &self.state.on_table
    }

    pub fn timer(&self) -> u32 {
        self.state.timer
    }

    pub fn winner(&self) -> Option<Player> {
        self.state.winner
    }

    pub fn loser(&self) -> Option<Player> {
        self.state.winner.map(Player::opponent)
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Start (or restart) a match from any phase. The caller re-racks the balls.
    pub fn start_game(&mut self, ui: &mut dyn UiSink) {
        self.scheduler.clear();
        self.state = MatchState::new();
        log::info!("New game");
        self.start_turn(ui);
    }

    fn start_turn(&mut self, ui: &mut dyn UiSink) {
        if self.state.phase == Phase::GameOver {
            return;
        }
        self.scheduler.cancel_slot(&mut self.state.turn_task);
        self.scheduler.cancel_slot(&mut self.state.timer_task);

        self.state.timer = self.config.turn_seconds;
        self.state.phase = Phase::Turn;
        ui.update_turn(self.state.turn);
        ui.update_balls(&self.state.on_table, self.state.groups);
        ui.update_timer(self.state.timer);
        ui.log(&format!("{} to play", self.state.turn));

        self.state.timer_task = Some(self.scheduler.schedule(TICK_INTERVAL, Deferred::TimerTick));
    }

    fn timer_tick(&mut self, ui: &mut dyn UiSink) -> Result<(), RuleError> {
        if self.state.phase != Phase::Turn {
            return Err(RuleError::StaleTimer(Deferred::TimerTick));
        }
        self.state.timer = self.state.timer.saturating_sub(1);
        ui.update_timer(self.state.timer);

        if self.state.timer > 0 {
            self.state.timer_task = Some(self.scheduler.schedule(TICK_INTERVAL, Deferred::TimerTick));
            return Ok(());
        }

        ui.log(&format!("{} ran out of time", self.state.turn));
        self.state.phase = Phase::OutOfTime;
        self.state.turn = self.state.turn.opponent();
        self.state.turn_task = Some(
            self.scheduler
                .schedule(self.config.out_of_time_delay, Deferred::StartTurn),
        );
        Ok(())
    }

    /// Take the shot. Returns the impulse magnitude for the cue ball.
    pub fn shoot(&mut self, strength: f32) -> Result<f32, RuleError> {
        if self.state.phase != Phase::Turn {
            return Err(RuleError::InvalidTransition {
                command: "shoot",
                phase: self.state.phase,
            });
        }
        self.scheduler.cancel_slot(&mut self.state.timer_task);
        let clamped = if strength.is_nan() { 0.0 } else { strength.clamp(0.0, 1.0) };
        self.state.phase = Phase::TurnWaiting;
        log::debug!("{} shoots at {:.2}", self.state.turn, clamped);
        Ok(clamped * STRENGTH_SCALE)
    }

    pub fn on_pocket(&mut self, event: PocketEvent, ui: &mut dyn UiSink) -> Result<(), RuleError> {
        let phase = self.state.phase;
        if matches!(phase, Phase::NotStarted | Phase::GameOver) || self.state.eight_pocketed() {
            return Err(RuleError::InvalidTransition { command: "pocket", phase });
        }
        let shooter = self.state.turn;

        let id = match event {
            PocketEvent::Cue => {
                ui.log(&format!("Cue ball pocketed by {}!", shooter));
                return Ok(());
            }
            PocketEvent::Numbered(id) => id,
        };
        if !self.state.on_table.remove(&id) {
            return Err(RuleError::UnknownBallId(id));
        }

        if id == EIGHT_BALL {
            let winner = if self.state.on_table.len() > 1 {
                ui.log(&format!("Game over! 8 ball pocketed too early by {}", shooter));
                shooter.opponent()
            } else {
                shooter
            };
            self.state.pending_winner = Some(winner);
            self.scheduler.cancel_slot(&mut self.state.timer_task);
            self.scheduler.cancel_slot(&mut self.state.turn_task);
            self.state.end_task = Some(
                self.scheduler
                    .schedule(self.config.game_over_delay, Deferred::EndGame),
            );
        } else if !self.state.groups.is_assigned() {
            let group = Group::of_ball(id);
            self.state.groups.assign(shooter, group);
            self.state.pocketing_occurred = true;
            ui.log(&format!("{} takes the {:?} balls", shooter, group).to_lowercase());
        } else if self.state.groups.of(shooter) == Group::of_ball(id) {
            self.state.pocketing_occurred = true;
            ui.log(&format!("{} pocketed ball {}, continue pocketing", shooter, id));
        } else {
            self.state.pocketing_occurred = false;
            ui.log(&format!("{} pocketed opponent's ball!", shooter));
        }

        ui.update_balls(&self.state.on_table, self.state.groups);
        Ok(())
    }

    /// The table came to rest after a shot.
    pub fn on_settled(&mut self, _ui: &mut dyn UiSink) -> Result<(), RuleError> {
        if self.state.phase != Phase::TurnWaiting {
            return Err(RuleError::InvalidTransition {
                command: "settle",
                phase: self.state.phase,
            });
        }
        if self.state.eight_pocketed() {
            return Ok(());
        }

        if !self.state.pocketing_occurred {
            self.state.turn = self.state.turn.opponent();
        }
        self.state.pocketing_occurred = false;
        self.state.phase = Phase::Paused;
        self.state.turn_task = Some(
            self.scheduler
                .schedule(self.config.turn_delay, Deferred::StartTurn),
        );
        Ok(())
    }

    fn end_game(&mut self, winner: Player, ui: &mut dyn UiSink) {
        self.scheduler.clear();
        self.state.timer_task = None;
        self.state.turn_task = None;
        self.state.end_task = None;
        self.state.phase = Phase::GameOver;
        self.state.winner = Some(winner);
        ui.show_end_message(&format!("{} wins!", winner), "Thanks for playing!");
        log::info!("Game over, {} wins", winner);
    }

    /// Run one deferred action now.
    pub fn fire(&mut self, action: Deferred, ui: &mut dyn UiSink) -> Result<(), RuleError> {
        match action {
            Deferred::TimerTick => self.timer_tick(ui),
            Deferred::StartTurn => {
                self.state.turn_task = None;
                if self.state.phase == Phase::GameOver {
                    return Err(RuleError::StaleTimer(action));
                }
                self.start_turn(ui);
                Ok(())
            }
            Deferred::EndGame => {
                self.state.end_task = None;
                match (self.state.phase, self.state.pending_winner) {
                    (Phase::GameOver, _) | (_, None) => Err(RuleError::StaleTimer(action)),
                    (_, Some(winner)) => {
                        self.end_game(winner, ui);
                        Ok(())
                    }
                }
            }
        }
    }

    /// Advance the match clock and run whatever came due. Errors from stale
    /// continuations are returned for logging; they never stop the match.
    pub fn advance(&mut self, dt: f32, ui: &mut dyn UiSink) -> Vec<RuleError> {
        let mut errors = Vec::new();
        for (handle, action) in self.scheduler.advance(dt) {
            if self.state.timer_task == Some(handle) {
                self.state.timer_task = None;
            }
            if let Err(err) = self.fire(action, ui) {
                errors.push(err);
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{UiLog, UiNotification};

    const DT: f32 = 1.0 / 60.0;

    fn started() -> (RuleMachine, UiLog) {
        let mut rules = RuleMachine::new(MatchConfig::default());
        let mut ui = UiLog::new();
        rules.start_game(&mut ui);
        (rules, ui)
    }

    fn run(rules: &mut RuleMachine, ui: &mut UiLog, seconds: f32) -> Vec<RuleError> {
        let steps = (seconds / DT).round() as usize;
        let mut errors = Vec::new();
        for _ in 0..steps {
            errors.extend(rules.advance(DT, ui));
        }
        errors
    }

    fn logs(ui: &UiLog) -> Vec<String> {
        ui.pending()
            .iter()
            .filter_map(|n| match n {
                UiNotification::Log { message } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_game_opens_player1_turn() {
        let (rules, ui) = started();
        assert_eq!(rules.phase(), Phase::Turn);
        assert_eq!(rules.turn(), Player::Player1);
        assert_eq!(rules.timer(), 30);
        assert_eq!(rules.on_table().len(), 15);
        assert_eq!(rules.groups(), Groups::default());
        assert_eq!(rules.pending_tasks(), 1);
        assert_eq!(ui.pending()[0], UiNotification::Turn { player: Player::Player1 });
        assert!(logs(&ui).contains(&"player1 to play".to_string()));
    }

    #[test]
    fn timer_ticks_once_per_second() {
        let (mut rules, mut ui) = started();
        run(&mut rules, &mut ui, 3.0);
        assert_eq!(rules.timer(), 27);
        assert_eq!(rules.phase(), Phase::Turn);
    }

    #[test]
    fn shoot_returns_scaled_strength() {
        let (mut rules, _) = started();
        let impulse = rules.shoot(0.5).unwrap();
        assert!((impulse - 0.7).abs() < 1e-6);
        assert_eq!(rules.phase(), Phase::TurnWaiting);
        // Timer tick was cancelled with the shot.
        assert_eq!(rules.pending_tasks(), 0);
    }

    #[test]
    fn shoot_clamps_strength() {
        let (mut rules, _) = started();
        assert!((rules.shoot(3.0).unwrap() - STRENGTH_SCALE).abs() < 1e-6);
        let (mut rules, _) = started();
        assert_eq!(rules.shoot(-1.0).unwrap(), 0.0);
        let (mut rules, _) = started();
        assert_eq!(rules.shoot(f32::NAN).unwrap(), 0.0);
    }

    #[test]
    fn shoot_outside_turn_changes_nothing() {
        let mut rules = RuleMachine::new(MatchConfig::default());
        assert_eq!(
            rules.shoot(1.0),
            Err(RuleError::InvalidTransition { command: "shoot", phase: Phase::NotStarted })
        );

        let (mut rules, _) = started();
        rules.shoot(1.0).unwrap();
        let before = rules.state().clone();
        assert!(rules.shoot(1.0).is_err());
        assert_eq!(rules.state(), &before);
    }

    #[test]
    fn scenario_first_pocket_assigns_groups_and_keeps_turn() {
        let (mut rules, mut ui) = started();
        rules.shoot(0.8).unwrap();
        rules.on_pocket(PocketEvent::Numbered(3), &mut ui).unwrap();

        assert_eq!(rules.groups().player1, Group::Solid);
        assert_eq!(rules.groups().player2, Group::Striped);
        assert!(rules.state().pocketing_occurred);
        assert!(!rules.on_table().contains(&3));

        rules.on_settled(&mut ui).unwrap();
        assert_eq!(rules.phase(), Phase::Paused);
        assert_eq!(rules.turn(), Player::Player1);
        assert!(!rules.state().pocketing_occurred);

        run(&mut rules, &mut ui, 0.5);
        assert_eq!(rules.phase(), Phase::Turn);
        assert_eq!(rules.turn(), Player::Player1);
        assert_eq!(rules.timer(), 30);
    }

    #[test]
    fn scenario_opponent_ball_passes_turn() {
        let (mut rules, mut ui) = started();
        rules.shoot(0.8).unwrap();
        rules.on_pocket(PocketEvent::Numbered(2), &mut ui).unwrap();
        rules.on_settled(&mut ui).unwrap();
        run(&mut rules, &mut ui, 0.5);
        assert_eq!(rules.turn(), Player::Player1);

        rules.shoot(0.8).unwrap();
        rules.on_pocket(PocketEvent::Numbered(10), &mut ui).unwrap();
        assert!(!rules.state().pocketing_occurred);
        assert!(logs(&ui).contains(&"player1 pocketed opponent's ball!".to_string()));
        rules.on_settled(&mut ui).unwrap();
        run(&mut rules, &mut ui, 0.5);
        assert_eq!(rules.turn(), Player::Player2);
        assert_eq!(rules.phase(), Phase::Turn);
        // Groups never change once assigned.
        assert_eq!(rules.groups().player1, Group::Solid);
    }

    #[test]
    fn own_ball_continues() {
        let (mut rules, mut ui) = started();
        rules.shoot(0.8).unwrap();
        rules.on_pocket(PocketEvent::Numbered(12), &mut ui).unwrap();
        rules.on_settled(&mut ui).unwrap();
        run(&mut rules, &mut ui, 0.5);

        rules.shoot(0.8).unwrap();
        rules.on_pocket(PocketEvent::Numbered(9), &mut ui).unwrap();
        assert!(logs(&ui).contains(&"player1 pocketed ball 9, continue pocketing".to_string()));
        rules.on_settled(&mut ui).unwrap();
        assert_eq!(rules.turn(), Player::Player1);
        assert_eq!(rules.groups().player1, Group::Striped);
    }

    #[test]
    fn empty_shot_passes_turn() {
        let (mut rules, mut ui) = started();
        rules.shoot(0.3).unwrap();
        rules.on_settled(&mut ui).unwrap();
        run(&mut rules, &mut ui, 0.5);
        assert_eq!(rules.turn(), Player::Player2);
        assert_eq!(rules.phase(), Phase::Turn);
    }

    #[test]
    fn last_pocket_of_a_shot_decides() {
        let (mut rules, mut ui) = started();
        rules.shoot(1.0).unwrap();
        rules.on_pocket(PocketEvent::Numbered(1), &mut ui).unwrap();
        rules.on_pocket(PocketEvent::Numbered(11), &mut ui).unwrap();
        rules.on_settled(&mut ui).unwrap();
        assert_eq!(rules.turn(), Player::Player2);
    }

    #[test]
    fn cue_pocket_leaves_flag_alone() {
        let (mut rules, mut ui) = started();
        rules.shoot(1.0).unwrap();
        rules.on_pocket(PocketEvent::Numbered(5), &mut ui).unwrap();
        rules.on_pocket(PocketEvent::Cue, &mut ui).unwrap();
        assert!(rules.state().pocketing_occurred);
        assert!(logs(&ui).contains(&"Cue ball pocketed by player1!".to_string()));
    }

    #[test]
    fn scratch_alone_passes_turn() {
        let (mut rules, mut ui) = started();
        rules.shoot(0.8).unwrap();
        rules.on_pocket(PocketEvent::Cue, &mut ui).unwrap();
        assert!(!rules.state().pocketing_occurred);
        assert_eq!(rules.on_table().len(), 15);

        rules.on_settled(&mut ui).unwrap();
        run(&mut rules, &mut ui, 0.5);
        assert_eq!(rules.phase(), Phase::Turn);
        assert_eq!(rules.turn(), Player::Player2);
        assert!(!rules.groups().is_assigned());
    }

    #[test]
    fn scenario_early_eight_loses() {
        let (mut rules, mut ui) = started();
        rules.shoot(1.0).unwrap();
        for id in [1u8, 2, 3, 4, 5, 6, 7, 9, 10] {
            rules.on_pocket(PocketEvent::Numbered(id), &mut ui).unwrap();
        }
        assert_eq!(rules.on_table().len(), 6);
        rules.on_pocket(PocketEvent::Numbered(8), &mut ui).unwrap();
        assert_eq!(rules.on_table().len(), 5);

        // Further events are ignored while the end screen is pending.
        assert!(rules.on_pocket(PocketEvent::Numbered(11), &mut ui).is_err());
        assert!(rules.on_table().contains(&11));
        rules.on_settled(&mut ui).unwrap();
        assert_eq!(rules.phase(), Phase::TurnWaiting);

        run(&mut rules, &mut ui, 1.9);
        assert_eq!(rules.phase(), Phase::TurnWaiting);
        run(&mut rules, &mut ui, 0.2);
        assert_eq!(rules.phase(), Phase::GameOver);
        assert_eq!(rules.winner(), Some(Player::Player2));
        assert_eq!(rules.loser(), Some(Player::Player1));
        assert_eq!(rules.pending_tasks(), 0);
        assert!(ui.pending().contains(&UiNotification::EndMessage {
            title: "player2 wins!".to_string(),
            body: "Thanks for playing!".to_string(),
        }));
    }

    #[test]
    fn eight_last_wins() {
        let (mut rules, mut ui) = started();
        rules.shoot(1.0).unwrap();
        for id in (1..=15).filter(|&id| id != 8 && id != 15) {
            rules.on_pocket(PocketEvent::Numbered(id), &mut ui).unwrap();
        }
        rules.on_pocket(PocketEvent::Numbered(8), &mut ui).unwrap();
        run(&mut rules, &mut ui, 2.0);
        assert_eq!(rules.winner(), Some(Player::Player1));
    }

    #[test]
    fn scenario_shot_clock_expires() {
        let (mut rules, mut ui) = started();
        run(&mut rules, &mut ui, 30.0);
        assert_eq!(rules.phase(), Phase::OutOfTime);
        assert_eq!(rules.turn(), Player::Player2);
        assert_eq!(rules.timer(), 0);
        assert!(logs(&ui).contains(&"player1 ran out of time".to_string()));

        run(&mut rules, &mut ui, 1.0);
        assert_eq!(rules.phase(), Phase::Turn);
        assert_eq!(rules.turn(), Player::Player2);
        assert_eq!(rules.timer(), 30);
    }

    #[test]
    fn ignored_pocket_events() {
        let mut rules = RuleMachine::new(MatchConfig::default());
        let mut ui = UiLog::new();
        assert!(matches!(
            rules.on_pocket(PocketEvent::Numbered(3), &mut ui),
            Err(RuleError::InvalidTransition { .. })
        ));

        rules.start_game(&mut ui);
        assert_eq!(
            rules.on_pocket(PocketEvent::Numbered(0), &mut ui),
            Err(RuleError::UnknownBallId(0))
        );
        assert_eq!(
            rules.on_pocket(PocketEvent::Numbered(16), &mut ui),
            Err(RuleError::UnknownBallId(16))
        );
        rules.on_pocket(PocketEvent::Numbered(4), &mut ui).unwrap();
        assert_eq!(
            rules.on_pocket(PocketEvent::Numbered(4), &mut ui),
            Err(RuleError::UnknownBallId(4))
        );
    }

    #[test]
    fn settle_only_while_waiting() {
        let (mut rules, mut ui) = started();
        assert!(rules.on_settled(&mut ui).is_err());
        assert_eq!(rules.phase(), Phase::Turn);
    }

    #[test]
    fn stale_callbacks_are_reported() {
        let (mut rules, mut ui) = started();
        rules.shoot(0.5).unwrap();
        assert_eq!(
            rules.fire(Deferred::TimerTick, &mut ui),
            Err(RuleError::StaleTimer(Deferred::TimerTick))
        );
        assert_eq!(
            rules.fire(Deferred::EndGame, &mut ui),
            Err(RuleError::StaleTimer(Deferred::EndGame))
        );
    }

    #[test]
    fn game_over_is_terminal() {
        let (mut rules, mut ui) = started();
        rules.shoot(1.0).unwrap();
        rules.on_pocket(PocketEvent::Numbered(8), &mut ui).unwrap();
        run(&mut rules, &mut ui, 2.0);
        assert_eq!(rules.phase(), Phase::GameOver);

        assert!(rules.shoot(1.0).is_err());
        assert!(rules.on_pocket(PocketEvent::Numbered(1), &mut ui).is_err());
        assert_eq!(
            rules.fire(Deferred::StartTurn, &mut ui),
            Err(RuleError::StaleTimer(Deferred::StartTurn))
        );
        run(&mut rules, &mut ui, 5.0);
        assert_eq!(rules.phase(), Phase::GameOver);
    }

    #[test]
    fn restart_cancels_everything() {
        let (mut rules, mut ui) = started();
        rules.shoot(1.0).unwrap();
        rules.on_pocket(PocketEvent::Numbered(8), &mut ui).unwrap();
        rules.start_game(&mut ui);

        assert_eq!(rules.phase(), Phase::Turn);
        assert_eq!(rules.on_table().len(), 15);
        assert!(!rules.state().eight_pocketed());
        run(&mut rules, &mut ui, 2.5);
        assert_eq!(rules.phase(), Phase::Turn);
        assert_eq!(rules.winner(), None);
        assert_eq!(rules.timer(), 28);
    }
}
