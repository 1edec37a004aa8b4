use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rubble_persist::library::ModelLibrary;
use rubble_render::adapter::RenderAdapter;
use rubble_sim::engine::Engine;
use wasm_bindgen::prelude::*;

use crate::input::InputState;
use crate::observer::{EventQueue, JsCallbacks};
use crate::sink::JsInstanceSink;

type RafClosure = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Frames further apart than this are treated as a backgrounded tab.
const MAX_FRAME_GAP_MS: f64 = 100.0;

/// Everything one mounted view owns.
pub struct SceneState {
    pub engine: Engine,
    pub adapter: RenderAdapter<JsInstanceSink>,
    pub library: ModelLibrary,
    pub input: Rc<RefCell<InputState>>,
    last_frame_time: f64,
}

impl SceneState {
    pub fn new(engine: Engine, adapter: RenderAdapter<JsInstanceSink>) -> Self {
        Self {
            engine,
            adapter,
            library: ModelLibrary::new(),
            input: Rc::new(RefCell::new(InputState::default())),
            last_frame_time: 0.0,
        }
    }

    /// One display refresh: controls, then voxel motion, then redraw.
    fn frame(&mut self, timestamp: f64) {
        let delta = timestamp - self.last_frame_time;
        let resumed = self.last_frame_time > 0.0 && delta > MAX_FRAME_GAP_MS;
        self.last_frame_time = timestamp;

        let yaw = self.input.borrow_mut().take_orbit();
        if yaw != 0.0 {
            self.engine.orbit_camera(yaw);
        }
        // First frame back from a background tab only resyncs the frame clock.
        if !resumed {
            self.engine.tick(timestamp);
        }
        self.adapter.frame(&mut self.engine);
    }
}

/// The requestAnimationFrame loop. The closure is created once and
/// reschedules itself until cancelled.
pub struct FrameLoop {
    closure: RafClosure,
    pending: Rc<Cell<Option<i32>>>,
    stopped: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start(
        state: Rc<RefCell<SceneState>>,
        events: EventQueue,
        callbacks: Rc<JsCallbacks>,
    ) -> Self {
        let closure: RafClosure = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let stopped = Rc::new(Cell::new(false));

        let closure_clone = closure.clone();
        let pending_clone = pending.clone();
        let stopped_clone = stopped.clone();

        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            pending_clone.set(None);
            state.borrow_mut().frame(timestamp);
            callbacks.flush(&events);

            // A callback may have disposed the scene.
            if stopped_clone.get() {
                return;
            }
            pending_clone.set(schedule(&closure_clone));
        }) as Box<dyn FnMut(f64)>));

        pending.set(schedule(&closure));
        Self {
            closure,
            pending,
            stopped,
        }
    }

    /// Cancel the pending frame and drop the closure.
    pub fn cancel(&self) {
        self.stopped.set(true);
        if let Some(id) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        self.closure.borrow_mut().take();
    }
}

fn schedule(closure: &RafClosure) -> Option<i32> {
    let window = web_sys::window().expect("no global window");
    let slot = closure.borrow();
    let f = slot.as_ref()?;
    match window.request_animation_frame(f.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("rAF registration failed: {e:?}");
            None
        }
    }
}
