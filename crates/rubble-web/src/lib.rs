mod app;
mod input;
mod observer;
mod scene;
mod sink;

use wasm_bindgen::prelude::*;

pub use scene::VoxelScene;

/// WASM entry point. Sets the panic hook and initializes logging.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("logger init failed");
    log::info!("Rubble starting...");
}

/// Host clock in milliseconds, on the same timeline as rAF timestamps.
pub(crate) fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
