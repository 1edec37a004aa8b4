use rubble_render::sink::InstanceSink;
use wasm_bindgen::prelude::*;

/// Forwards instance data to a JS renderer object.
///
/// The object may define `upload(bytes: Uint8Array, count)`,
/// `camera(bytes: Uint8Array)` and `release()`; missing methods are skipped.
pub struct JsInstanceSink {
    target: JsValue,
}

impl JsInstanceSink {
    pub fn new(target: JsValue) -> Self {
        Self { target }
    }

    fn call(&self, method: &str, args: &js_sys::Array) {
        if self.target.is_undefined() || self.target.is_null() {
            return;
        }
        let f = match js_sys::Reflect::get(&self.target, &JsValue::from_str(method)) {
            Ok(f) => f,
            Err(_) => return,
        };
        let Some(f) = f.dyn_ref::<js_sys::Function>() else {
            return;
        };
        if let Err(e) = f.apply(&self.target, args) {
            log::warn!("Renderer {method}() threw: {e:?}");
        }
    }
}

impl InstanceSink for JsInstanceSink {
    fn upload(&mut self, bytes: &[u8], count: usize) {
        let data = js_sys::Uint8Array::from(bytes);
        let args = js_sys::Array::of2(&data, &JsValue::from_f64(count as f64));
        self.call("upload", &args);
    }

    fn set_camera(&mut self, bytes: &[u8]) {
        let data = js_sys::Uint8Array::from(bytes);
        self.call("camera", &js_sys::Array::of1(&data));
    }

    fn release(&mut self) {
        self.call("release", &js_sys::Array::new());
        self.target = JsValue::UNDEFINED;
    }
}
