use pool_engine::{
    build_render_buffer, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    ProtocolLayout, RenderBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner through
/// `export_game!`, because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frame_counter: u32,
    /// Flat buffer of sound event IDs for SharedArrayBuffer reads.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            render_buffer: RenderBuffer::new(),
            timestep: FixedTimestep::new(config.fixed_dt),
            layout: ProtocolLayout::from_config(&config),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            config,
            game,
            initialized: false,
            frame_counter: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        #[cfg(feature = "physics")]
        self.ctx.scene.sync_poses(&self.ctx.physics);
        self.rebuild_outputs();
        self.initialized = true;
        log::debug!(
            "runner ready: {} entities, buffer {} floats",
            self.ctx.scene.len(),
            self.layout.buffer_total_floats
        );
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: zero or more fixed steps, then rebuild the output buffers.
    ///
    /// Pending input is delivered to the first fixed step of the frame only, and
    /// stays queued when the frame is too short to run a step.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps > 0 {
            let mut frame_input = InputQueue::new();
            for event in self.input.drain() {
                frame_input.push(event);
            }
            let idle = InputQueue::new();
            for step in 0..steps {
                let input = if step == 0 { &frame_input } else { &idle };
                self.game.update(&mut self.ctx, input);
            }
        }

        self.rebuild_outputs();
        self.frame_counter = self.frame_counter.wrapping_add(1);
    }

    fn rebuild_outputs(&mut self) {
        build_render_buffer(
            self.ctx.scene.iter(),
            &mut self.render_buffer,
            self.layout.max_instances,
        );

        self.ctx.events.truncate(self.layout.max_events);
        self.sound_buffer.clear();
        self.sound_buffer.extend(
            self.ctx
                .sounds
                .iter()
                .take(self.layout.max_sounds)
                .map(|sound| sound.0 as u8),
        );
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Game-specific exports (config loading, UI drains) go through here.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn frame_counter(&self) -> u32 {
        self.frame_counter
    }

    pub fn alpha(&self) -> f32 {
        self.timestep.alpha()
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.as_floats().as_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_depth(&self) -> f32 {
        self.config.world_depth
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
