pub mod balls;
pub mod config;
pub mod error;
pub mod game;
pub mod pocket;
pub mod rules;
pub mod session;
pub mod settle;
pub mod strength;
pub mod table;
pub mod ui;

#[cfg(test)]
mod testing;

pub use game::EightBallGame;

pool_web::export_game!(EightBallGame, "eight-ball");

/// Rule notifications since the last call, as a JSON array.
#[wasm_bindgen]
pub fn game_drain_ui() -> String {
    with_runner(|r| r.game_mut().drain_ui_json()).unwrap_or_else(|| "[]".to_string())
}

/// Load match tuning from JSON. Returns `false` and keeps the old settings
/// when the JSON does not parse.
#[wasm_bindgen]
pub fn game_load_config(json: &str) -> bool {
    with_runner(|r| match r.game_mut().load_config(json) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("{}", err);
            false
        }
    })
    .unwrap_or(false)
}
