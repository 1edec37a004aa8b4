use std::cell::RefCell;
use std::rc::Rc;

use rubble_core::config::EngineConfig;
use rubble_core::types::TargetCell;
use rubble_persist::snapshot::{export_snapshot, import_snapshot};
use rubble_render::adapter::RenderAdapter;
use rubble_sim::engine::Engine;
use rubble_world::Model;
use wasm_bindgen::prelude::*;

use crate::app::{FrameLoop, SceneState};
use crate::input;
use crate::now_ms;
use crate::observer::{queued_observer, EventQueue, JsCallbacks};
use crate::sink::JsInstanceSink;

/// Handle to one mounted voxel view. Create one per canvas and `dispose()`
/// it on unmount.
#[wasm_bindgen]
pub struct VoxelScene {
    state: Rc<RefCell<SceneState>>,
    events: EventQueue,
    callbacks: Rc<JsCallbacks>,
    frame_loop: RefCell<Option<FrameLoop>>,
}

#[wasm_bindgen]
impl VoxelScene {
    /// `renderer` receives instance uploads, `on_phase` gets phase names,
    /// `on_count` gets voxel counts. `config_ron` overrides tuning constants.
    #[wasm_bindgen(constructor)]
    pub fn new(
        renderer: JsValue,
        on_phase: Option<js_sys::Function>,
        on_count: Option<js_sys::Function>,
        config_ron: Option<String>,
    ) -> Result<VoxelScene, JsValue> {
        let config = match config_ron.as_deref() {
            Some(text) => EngineConfig::from_ron_str(text).map_err(to_js)?,
            None => EngineConfig::default(),
        };
        let events = EventQueue::default();
        let adapter = RenderAdapter::new(config.voxel_size, JsInstanceSink::new(renderer));
        let engine = Engine::new(config, queued_observer(&events));

        Ok(Self {
            state: Rc::new(RefCell::new(SceneState::new(engine, adapter))),
            events,
            callbacks: Rc::new(JsCallbacks { on_phase, on_count }),
            frame_loop: RefCell::new(None),
        })
    }

    /// Enable drag-to-orbit on a canvas.
    pub fn attach_canvas(&self, canvas: &web_sys::HtmlCanvasElement) {
        let input = self.state.borrow().input.clone();
        input::register_input_listeners(canvas, input);
    }

    /// Start the frame loop. Calling it twice has no effect.
    pub fn start(&self) {
        let mut slot = self.frame_loop.borrow_mut();
        if slot.is_some() {
            return;
        }
        *slot = Some(FrameLoop::start(
            self.state.clone(),
            self.events.clone(),
            self.callbacks.clone(),
        ));
        log::info!("Frame loop started");
    }

    /// Stop the frame loop and release renderer resources.
    pub fn dispose(&self) {
        if let Some(frame_loop) = self.frame_loop.borrow_mut().take() {
            frame_loop.cancel();
        }
        self.state.borrow_mut().adapter.dispose();
    }

    /// Load a built-in model by name (`campus`, `eagle`, `cat`).
    pub fn load_model(&self, name: &str) -> Result<(), JsValue> {
        let cells = self.cells_for(name)?;
        self.with_engine(|e| e.load_initial_model(&cells, now_ms()));
        Ok(())
    }

    /// Load a model and settle it as a fresh scene.
    pub fn new_scene(&self, name: &str) -> Result<(), JsValue> {
        let cells = self.cells_for(name)?;
        self.with_engine(|e| e.new_scene(&cells, now_ms()));
        Ok(())
    }

    /// Load voxels from a JSON snapshot.
    pub fn load_cells_json(&self, json: &str) -> Result<(), JsValue> {
        let cells = import_snapshot(json).map_err(to_js)?;
        self.with_engine(|e| e.load_initial_model(&cells, now_ms()));
        Ok(())
    }

    pub fn trigger_skydive(&self) -> bool {
        self.with_engine(|e| e.trigger_skydive(now_ms()))
    }

    pub fn dismantle(&self) -> bool {
        self.with_engine(|e| e.dismantle(now_ms()))
    }

    /// Rebuild into a built-in or saved model.
    pub fn rebuild(&self, name: &str) -> Result<bool, JsValue> {
        let cells = self.cells_for(name)?;
        Ok(self.with_engine(|e| e.rebuild(&cells, now_ms())))
    }

    /// Rebuild into cells from a JSON document.
    pub fn rebuild_cells_json(&self, json: &str) -> Result<bool, JsValue> {
        let cells = import_snapshot(json).map_err(to_js)?;
        Ok(self.with_engine(|e| e.rebuild(&cells, now_ms())))
    }

    /// Save an uploaded JSON file to the model library. Returns its name.
    pub fn import_model(&self, filename: &str, json: &str) -> Result<String, JsValue> {
        let mut state = self.state.borrow_mut();
        let model = state.library.import_file(filename, json).map_err(to_js)?;
        Ok(model.name.clone())
    }

    /// Saved model names, newest first.
    pub fn saved_models(&self) -> js_sys::Array {
        self.state
            .borrow()
            .library
            .names()
            .map(JsValue::from_str)
            .collect()
    }

    pub fn set_auto_rotate(&self, enabled: bool) {
        self.state.borrow_mut().engine.set_auto_rotate(enabled);
    }

    pub fn handle_resize(&self, width: u32, height: u32) {
        self.state.borrow_mut().engine.handle_resize(width, height);
    }

    /// Current voxel positions and colors as pretty JSON.
    pub fn export_snapshot(&self) -> Result<String, JsValue> {
        export_snapshot(self.state.borrow().engine.voxels()).map_err(to_js)
    }

    pub fn phase(&self) -> String {
        self.state.borrow().engine.phase().as_str().to_string()
    }

    pub fn count(&self) -> usize {
        self.state.borrow().engine.voxel_count()
    }
}

impl VoxelScene {
    /// Run an engine operation, then deliver its notifications with the
    /// state borrow released.
    fn with_engine<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let result = f(&mut self.state.borrow_mut().engine);
        self.callbacks.flush(&self.events);
        result
    }

    /// Saved models shadow built-ins of the same name.
    fn cells_for(&self, name: &str) -> Result<Vec<TargetCell>, JsValue> {
        let state = self.state.borrow();
        if let Some(saved) = state.library.find(name) {
            return Ok(saved.cells.clone());
        }
        let model: Model = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
        Ok(model.generate(state.engine.config().seed))
    }
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
