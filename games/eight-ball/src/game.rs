//! Eight-ball on a 9 ft table: Rapier3D physics, pocket detection, shot clock
//! and turn rules. The page drives it through custom events and the space bar.

use glam::Vec3;
use pool_engine::{
    EngineContext, EntityId, Game, GameConfig, GameEvent, InputEvent, InputQueue, PhysicsAdapter,
    SoundEvent,
};

use crate::balls::{BallRegistry, RackLayout, BALL_COUNT};
use crate::config::MatchConfig;
use crate::error::ConfigError;
use crate::rules::Phase;
use crate::session::Session;
use crate::strength::StrengthBar;
use crate::table::{build_table, LENGTH, WIDTH};
use crate::ui::{self, game_events, UiLog, UiNotification};

/// Room around the playing surface for the rails and the cue.
const WORLD_MARGIN: f32 = 0.5;

const KEY_SPACE: u32 = 32;

/// Notifications kept for `drain_ui_json` when the page stops pulling.
const MAX_BACKLOG: usize = 256;

/// Custom event kinds from the page.
mod events {
    pub const START: u32 = 1;
    /// a = strength in [0, 1]
    pub const SHOOT: u32 = 2;
    /// a = aim angle in radians, from +X toward +Z
    pub const AIM: u32 = 3;
}

mod sounds {
    pub const BALL_HIT: u32 = 1;
    pub const POCKET: u32 = 2;
    pub const CUE_STRIKE: u32 = 3;
}

pub struct EightBallGame {
    config: MatchConfig,
    session: Option<Session>,
    strength: StrengthBar,
    ui: UiLog,
    backlog: Vec<UiNotification>,
    last_phase: Phase,
    table_id: Option<EntityId>,
}

impl EightBallGame {
    pub fn new() -> Self {
        let config = MatchConfig::default();
        Self {
            config,
            session: None,
            strength: StrengthBar::new(config.charge_rate),
            ui: UiLog::new(),
            backlog: Vec::new(),
            last_phase: Phase::NotStarted,
            table_id: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn strength(&self) -> &StrengthBar {
        &self.strength
    }

    /// Replace the match tuning. Delays already running keep their length.
    pub fn load_config(&mut self, json: &str) -> Result<(), ConfigError> {
        let config = MatchConfig::from_json(json)?;
        self.config = config;
        self.strength.set_rate(config.charge_rate);
        if let Some(session) = self.session.as_mut() {
            session.configure(config);
        }
        log::info!("Match config loaded: {:?}", config);
        Ok(())
    }

    /// Everything the rules reported since the last call, as a JSON array.
    pub fn drain_ui_json(&mut self) -> String {
        let backlog = std::mem::take(&mut self.backlog);
        match ui::to_json(&backlog) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("UI stream not serializable: {}", err);
                "[]".to_string()
            }
        }
    }

    fn flush_ui(&mut self, ctx: &mut EngineContext) {
        for notification in self.ui.drain() {
            if let Some(event) = notification.to_event() {
                ctx.emit_event(event);
            }
            self.backlog.push(notification);
        }
        if self.backlog.len() > MAX_BACKLOG {
            let excess = self.backlog.len() - MAX_BACKLOG;
            self.backlog.drain(..excess);
        }
    }
}

impl Default for EightBallGame {
    fn default() -> Self {
        Self::new()
    }
}

fn shoot(session: &mut Session, strength: f32, ctx: &mut EngineContext) {
    match session.try_shoot(strength, &mut ctx.physics) {
        Ok(_) => ctx.emit_sound(SoundEvent(sounds::CUE_STRIKE)),
        Err(err) => log::debug!("Shot ignored: {}", err),
    }
}

impl Game for EightBallGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: LENGTH + 2.0 * WORLD_MARGIN,
            world_depth: WIDTH + 2.0 * WORLD_MARGIN,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            max_instances: 32,
            max_sounds: 16,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.table_id = Some(build_table(ctx));

        let entities: [EntityId; BALL_COUNT] = std::array::from_fn(|_| ctx.next_id());
        let registry = BallRegistry::create_rack(
            &RackLayout::default(),
            entities,
            &mut ctx.physics,
            &mut ctx.scene,
        );
        self.session = Some(Session::new(self.config, registry));
        log::info!("Eight-ball ready, waiting for start");
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind: events::START, .. } => {
                    self.strength.cancel();
                    session.start_game(&mut ctx.physics, &mut ctx.scene, &mut self.ui);
                }
                InputEvent::Custom { kind: events::SHOOT, a, .. } => {
                    self.strength.cancel();
                    shoot(session, a, ctx);
                }
                InputEvent::Custom { kind: events::AIM, a, .. } => session.set_aim(a),
                InputEvent::KeyDown { key_code: KEY_SPACE } if session.phase() == Phase::Turn => {
                    self.strength.begin();
                }
                InputEvent::KeyUp { key_code: KEY_SPACE } => {
                    if let Some(value) = self.strength.release() {
                        shoot(session, value, ctx);
                    }
                }
                _ => {}
            }
        }

        if self.strength.is_charging() {
            if session.phase() == Phase::Turn {
                self.strength.charge();
                ctx.emit_event(GameEvent::new(game_events::STRENGTH, self.strength.value(), 0.0, 0.0));
            } else {
                self.strength.cancel();
            }
        }

        let pocketed = session.step(ctx.fixed_dt, &mut ctx.physics, &mut ctx.scene, &mut self.ui);
        for _ in &pocketed {
            ctx.emit_sound(SoundEvent(sounds::POCKET));
        }

        for pair in ctx.physics.take_collisions() {
            let registry = session.registry();
            if pair.started
                && registry.by_entity(pair.entity_a).is_some()
                && registry.by_entity(pair.entity_b).is_some()
            {
                ctx.emit_sound(SoundEvent(sounds::BALL_HIT));
            }
        }

        let phase = session.phase();
        if phase != self.last_phase {
            let winner = session.rules().winner().map_or(0.0, |p| p.index() as f32);
            ctx.emit_event(GameEvent::new(game_events::STATE, phase.code(), winner, 0.0));
            self.last_phase = phase;
        }

        self.flush_ui(ctx);
    }
}
