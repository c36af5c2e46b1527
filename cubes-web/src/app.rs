/// The exported `App`: frame loop, screenshot button and capture
use cubes_core::{screenshot_file_name, PixelSize, SceneConfig, Stage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use web_sys::{Blob, EventTarget, HtmlCanvasElement};

use crate::canvas::CanvasTarget;
use crate::download::BlobSaver;
use crate::frame_loop::FrameLoop;

/// Everything a frame touches. Only the frame loop advances the stage clock.
struct Shared {
    stage: Stage,
    target: CanvasTarget,
}

/// Force one render, then hand the fresh canvas pixels to `saver` as PNG.
///
/// The browser may clear the drawing buffer once it has been composited,
/// so the blob has to come from the frame drawn right here.
fn capture(shared: &RefCell<Shared>, saver: Rc<BlobSaver>) -> Result<(), JsValue> {
    let canvas = {
        let mut guard = shared.try_borrow_mut().map_err(|_| "renderer is busy")?;
        let state = &mut *guard;
        state.stage.render(&mut state.target)?;
        state.target.canvas().clone()
    };

    let file_name = screenshot_file_name(PixelSize::new(canvas.width(), canvas.height()));
    let callback = Closure::once_into_js(move |blob: JsValue| match blob.dyn_into::<Blob>() {
        Ok(blob) => {
            if let Err(err) = saver.save(&blob, &file_name) {
                log::error!("failed to save {file_name}: {err:?}");
            }
        }
        Err(_) => log::error!("canvas produced no image for {file_name}"),
    });
    canvas.to_blob(callback.unchecked_ref())
}

/// The running scene: a frame loop on one canvas plus an optional
/// screenshot button.
#[wasm_bindgen]
pub struct App {
    shared: Rc<RefCell<Shared>>,
    saver: Rc<BlobSaver>,
    frame_loop: FrameLoop,
    button: Option<(EventTarget, Closure<dyn FnMut()>)>,
}

#[wasm_bindgen]
impl App {
    /// Start animating the canvas matched by `canvas_selector`. Clicking the
    /// element matched by `button_selector` saves a screenshot.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_selector: &str, button_selector: Option<String>) -> Result<App, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .query_selector(canvas_selector)?
            .ok_or("canvas not found")?
            .dyn_into()?;

        let stage = Stage::new(&SceneConfig::default());
        let target = CanvasTarget::new(window.clone(), canvas, &stage.scene)?;
        let shared = Rc::new(RefCell::new(Shared { stage, target }));
        let saver = Rc::new(BlobSaver::new(document.clone()));

        let frame_loop = {
            let shared = shared.clone();
            FrameLoop::start(window, move |timestamp| {
                let Ok(mut guard) = shared.try_borrow_mut() else {
                    return true;
                };
                let state = &mut *guard;
                match state.stage.frame(timestamp, &mut state.target) {
                    Ok(()) => true,
                    Err(err) => {
                        log::error!("frame failed: {err:?}");
                        false
                    }
                }
            })?
        };

        let button = match button_selector {
            Some(selector) => {
                let element: EventTarget = document
                    .query_selector(&selector)?
                    .ok_or("screenshot button not found")?
                    .into();
                let shared = shared.clone();
                let saver = saver.clone();
                let on_click = Closure::wrap(Box::new(move || {
                    if let Err(err) = capture(&shared, saver.clone()) {
                        log::error!("screenshot failed: {err:?}");
                    }
                }) as Box<dyn FnMut()>);
                element
                    .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
                Some((element, on_click))
            }
            None => None,
        };

        log::info!("animating {canvas_selector}");
        Ok(App {
            shared,
            saver,
            frame_loop,
            button,
        })
    }

    /// Render the current frame and download it as `screencapture-<W>x<H>.png`.
    pub fn screenshot(&self) -> Result<(), JsValue> {
        capture(&self.shared, self.saver.clone())
    }

    /// Stop the animation. The last frame stays on the canvas.
    pub fn stop(&self) {
        if self.frame_loop.is_running() {
            self.frame_loop.stop();
            log::info!("frame loop stopped");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Last stored animation time in seconds
    #[wasm_bindgen(getter)]
    pub fn time(&self) -> f64 {
        self.shared.borrow().stage.state().seconds()
    }

    /// Current drawing-buffer width and height in pixels
    #[wasm_bindgen(getter, js_name = bufferSize)]
    pub fn buffer_size(&self) -> Vec<u32> {
        let shared = self.shared.borrow();
        let canvas = shared.target.canvas();
        vec![canvas.width(), canvas.height()]
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.frame_loop.stop();
        if let Some((element, on_click)) = self.button.take() {
            element
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
                .ok();
        }
    }
}
