/// `requestAnimationFrame` loop with a stop hook
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A `requestAnimationFrame` loop that keeps rescheduling itself until
/// stopped, dropped, or its callback returns `false`.
pub struct FrameLoop {
    window: Window,
    pending: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
    callback: FrameCallback,
}

impl FrameLoop {
    /// Schedule `on_frame` for the next refresh. It receives the
    /// refresh timestamp in milliseconds.
    pub fn start<F>(window: Window, mut on_frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        // The closure reschedules itself, so it needs a handle to its own
        // slot. The cycle is broken when the loop is dropped.
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let stopped = Rc::new(Cell::new(false));

        let slot = callback.clone();
        let next = pending.clone();
        let halted = stopped.clone();
        let win = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            next.set(None);
            if halted.get() {
                return;
            }
            if !on_frame(timestamp) {
                log::info!("frame loop stopped by its callback");
                halted.set(true);
                return;
            }
            if halted.get() {
                return;
            }

            // schedule next
            let slot = slot.borrow();
            let Some(closure) = slot.as_ref() else {
                return;
            };
            match win.request_animation_frame(closure.as_ref().unchecked_ref()) {
                Ok(id) => next.set(Some(id)),
                Err(err) => log::error!("failed to schedule frame: {err:?}"),
            }
        }) as Box<dyn FnMut(f64)>));

        let id = {
            let slot = callback.borrow();
            let closure = slot.as_ref().ok_or("frame callback missing")?;
            window.request_animation_frame(closure.as_ref().unchecked_ref())?
        };
        pending.set(Some(id));

        Ok(Self {
            window,
            pending,
            stopped,
            callback,
        })
    }

    /// Cancel the scheduled frame, if any. The loop does not resume.
    pub fn stop(&self) {
        self.stopped.set(true);
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::error!("failed to cancel frame: {err:?}");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.callback.borrow_mut().take();
    }
}
