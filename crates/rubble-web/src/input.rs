use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Radians of orbit per pixel of horizontal drag.
const ORBIT_PER_PIXEL: f32 = 0.005;

/// Drag state accumulated between frames.
#[derive(Debug, Default)]
pub struct InputState {
    pub drag_dx: f32,
    pub button_down: bool,
}

impl InputState {
    /// Consume the accumulated drag as an orbit angle.
    pub fn take_orbit(&mut self) -> f32 {
        let yaw = -self.drag_dx * ORBIT_PER_PIXEL;
        self.drag_dx = 0.0;
        yaw
    }
}

/// Register mouse listeners on the canvas once.
/// Closures are leaked via `.forget()` since they live as long as the canvas.
pub fn register_input_listeners(
    canvas: &web_sys::HtmlCanvasElement,
    state: Rc<RefCell<InputState>>,
) {
    let target: &web_sys::EventTarget = canvas.as_ref();

    // mousemove
    {
        let state = state.clone();
        let closure =
            Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
                let mut s = state.borrow_mut();
                if s.button_down {
                    s.drag_dx += e.movement_x() as f32;
                }
            });
        target
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .expect("failed to add mousemove listener");
        closure.forget();
    }

    // mousedown
    {
        let state = state.clone();
        let closure =
            Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
                if e.button() == 0 {
                    state.borrow_mut().button_down = true;
                }
            });
        target
            .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
            .expect("failed to add mousedown listener");
        closure.forget();
    }

    // mouseup / mouseleave
    for event in ["mouseup", "mouseleave"] {
        let state = state.clone();
        let closure = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_: web_sys::MouseEvent| {
            state.borrow_mut().button_down = false;
        });
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .expect("failed to add mouseup listener");
        closure.forget();
    }
}
