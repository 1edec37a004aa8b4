use rubble_core::config::EngineConfig;
use rubble_core::types::{Phase, TargetCell};

use crate::camera::CameraRig;
use crate::integrator;
use crate::planner::{self, RebuildPlan};
use crate::state_machine::{PhaseMachine, Trigger};
use crate::store::VoxelStore;

/// Receives engine notifications. Both methods default to no-ops.
pub trait EngineObserver {
    fn on_phase_change(&mut self, _phase: Phase) {}
    fn on_count_change(&mut self, _count: usize) {}
}

/// Observer that ignores everything.
pub struct NullObserver;

impl EngineObserver for NullObserver {}

/// Adapts a pair of closures into an [`EngineObserver`].
pub struct Callbacks<P, C> {
    pub on_phase: P,
    pub on_count: C,
}

impl<P, C> EngineObserver for Callbacks<P, C>
where
    P: FnMut(Phase),
    C: FnMut(usize),
{
    fn on_phase_change(&mut self, phase: Phase) {
        (self.on_phase)(phase)
    }

    fn on_count_change(&mut self, count: usize) {
        (self.on_count)(count)
    }
}

/// What one call to [`Engine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub phase: Phase,
    /// Phase changed during this tick.
    pub transitioned: bool,
    /// Voxel transforms changed during this tick.
    pub moved: bool,
}

/// The voxel scene: store, current rebuild plan, camera and phase.
///
/// One engine per mounted view. All time-dependent calls take `now_ms`
/// from the host's frame clock.
pub struct Engine {
    config: EngineConfig,
    store: VoxelStore,
    plan: Option<RebuildPlan>,
    machine: PhaseMachine,
    camera: CameraRig,
    observer: Box<dyn EngineObserver>,
    dismantle_count: u32,
    dirty: bool,
}

impl Engine {
    pub fn new(config: EngineConfig, observer: Box<dyn EngineObserver>) -> Self {
        let camera = CameraRig::new(&config);
        Self {
            config,
            store: VoxelStore::new(),
            plan: None,
            machine: PhaseMachine::new(),
            camera,
            observer,
            dismantle_count: 0,
            dirty: false,
        }
    }

    /// Engine with no observer, for tools and tests.
    pub fn headless(config: EngineConfig) -> Self {
        Self::new(config, Box::new(NullObserver))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    pub fn voxels(&self) -> &VoxelStore {
        &self.store
    }

    pub fn voxel_count(&self) -> usize {
        self.store.len()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// The active rebuild plan, present only while rebuilding.
    pub fn plan(&self) -> Option<&RebuildPlan> {
        self.plan.as_ref()
    }

    /// Whether voxel transforms changed since the last call; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Replace the voxel store wholesale and drop any in-flight rebuild.
    ///
    /// The phase is left alone, except that an interrupted rebuild settles to
    /// STABLE since there is no plan left to follow.
    pub fn load_initial_model(&mut self, cells: &[TargetCell], now_ms: f64) {
        self.store = VoxelStore::from_cells(cells, self.config.lightness_jitter, self.config.seed);
        self.plan = None;
        self.dirty = true;
        log::info!("Loaded model with {} voxels", self.store.len());

        if self.phase() == Phase::Rebuilding {
            self.machine.fire(Trigger::Settle, now_ms);
        }
        self.observer.on_count_change(self.store.len());
        self.observer.on_phase_change(self.phase());
    }

    /// Load a model and put it at rest, as a fresh scene.
    pub fn new_scene(&mut self, cells: &[TargetCell], now_ms: f64) {
        self.load_initial_model(cells, now_ms);
        self.transition(Trigger::Settle, now_ms);
    }

    /// Start the skydive. Only valid from INTRO.
    pub fn trigger_skydive(&mut self, now_ms: f64) -> bool {
        self.transition(Trigger::Drop, now_ms)
    }

    /// Explode the structure. Only valid from STABLE.
    pub fn dismantle(&mut self, now_ms: f64) -> bool {
        if !self.transition(Trigger::Dismantle, now_ms) {
            log::warn!("Dismantle ignored in phase {}", self.phase());
            return false;
        }
        self.dismantle_count = self.dismantle_count.wrapping_add(1);
        integrator::scatter(self.store.as_mut_slice(), &self.config, self.dismantle_count);
        true
    }

    /// Plan a rebuild onto `targets` and start moving voxels toward it.
    ///
    /// Ignored while already rebuilding (and before the scene has landed).
    pub fn rebuild(&mut self, targets: &[TargetCell], now_ms: f64) -> bool {
        if !matches!(self.phase(), Phase::Stable | Phase::Dismantling) {
            log::warn!("Rebuild ignored in phase {}", self.phase());
            return false;
        }

        let plan = planner::plan(self.store.as_slice(), targets, &self.config);
        log::info!(
            "Rebuilding {} voxels onto {} targets ({} rubble)",
            self.store.len(),
            targets.len(),
            plan.rubble_count()
        );
        self.store.halt_all();
        self.plan = Some(plan);
        self.transition(Trigger::Rebuild, now_ms)
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.camera.auto_rotate = enabled;
    }

    /// Manual orbit from user input. Ignored until the skydive has landed.
    pub fn orbit_camera(&mut self, yaw: f32) -> bool {
        if !self.camera.controls_enabled {
            return false;
        }
        self.camera.orbit(yaw);
        true
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// Advance one frame: controls first, then the active phase's motion rule.
    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        self.camera.update_controls(&self.config);

        let before = self.phase();
        let mut moved = false;

        match before {
            Phase::Intro => self.camera.intro_sweep(now_ms, &self.config),
            Phase::Dropping => {
                let elapsed = self.machine.elapsed_ms(now_ms);
                if self.camera.drop_to(elapsed, &self.config) {
                    self.camera.land(&self.config);
                    self.transition(Trigger::DropComplete, now_ms);
                }
            }
            Phase::Stable => {}
            Phase::Dismantling => {
                integrator::step_dismantle(self.store.as_mut_slice(), &self.config);
                moved = true;
            }
            Phase::Rebuilding => {
                let elapsed = self.machine.elapsed_ms(now_ms);
                let done = match &self.plan {
                    Some(plan) => integrator::step_rebuild(
                        self.store.as_mut_slice(),
                        &plan.assignments,
                        elapsed,
                        &self.config,
                    ),
                    None => true,
                };
                moved = true;
                if done {
                    self.plan = None;
                    self.transition(Trigger::RebuildComplete, now_ms);
                }
            }
        }

        self.dirty |= moved;
        TickReport {
            phase: self.phase(),
            transitioned: self.phase() != before,
            moved,
        }
    }

    fn transition(&mut self, trigger: Trigger, now_ms: f64) -> bool {
        match self.machine.fire(trigger, now_ms) {
            Some(phase) => {
                self.observer.on_phase_change(phase);
                true
            }
            None => false,
        }
    }
}
