use std::cell::RefCell;
use std::rc::Rc;

use rubble_core::types::Phase;
use rubble_sim::engine::{Callbacks, EngineObserver};
use wasm_bindgen::prelude::*;

/// Engine notification waiting to be delivered to JS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    Phase(Phase),
    Count(usize),
}

pub type EventQueue = Rc<RefCell<Vec<SceneEvent>>>;

/// Observer that queues events instead of calling into JS while the engine
/// is borrowed. JS handlers are then free to call back into the scene.
pub fn queued_observer(queue: &EventQueue) -> Box<dyn EngineObserver> {
    let phases = queue.clone();
    let counts = queue.clone();
    Box::new(Callbacks {
        on_phase: move |p| phases.borrow_mut().push(SceneEvent::Phase(p)),
        on_count: move |n| counts.borrow_mut().push(SceneEvent::Count(n)),
    })
}

/// The host's `onPhaseChange` / `onCountChange` handlers.
pub struct JsCallbacks {
    pub on_phase: Option<js_sys::Function>,
    pub on_count: Option<js_sys::Function>,
}

impl JsCallbacks {
    /// Drain the queue and deliver each event in order.
    pub fn flush(&self, queue: &EventQueue) {
        let events = std::mem::take(&mut *queue.borrow_mut());
        for event in events {
            let (handler, arg) = match event {
                SceneEvent::Phase(p) => (&self.on_phase, JsValue::from_str(p.as_str())),
                SceneEvent::Count(n) => (&self.on_count, JsValue::from_f64(n as f64)),
            };
            if let Some(f) = handler {
                if let Err(e) = f.call1(&JsValue::NULL, &arg) {
                    log::warn!("Scene callback threw: {e:?}");
                }
            }
        }
    }
}
