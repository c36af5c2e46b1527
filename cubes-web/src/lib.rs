/// Cubes Web - WebGL2 renderer for the rotating-cubes scene
///
/// Draws the scene from `cubes-core` into a `<canvas>` on every animation
/// frame and saves screenshots as client-side downloads.

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod download;
#[cfg(target_arch = "wasm32")]
pub mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod gl;

#[cfg(target_arch = "wasm32")]
pub use app::App;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point: install the panic hook and console logger.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    log::info!("cubes-web initialized");
    Ok(())
}

/// Start the scene on `#canvas` with `#screenshot` as the capture button.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn run() -> Result<App, JsValue> {
    App::new("#canvas", Some("#screenshot".to_string()))
}
