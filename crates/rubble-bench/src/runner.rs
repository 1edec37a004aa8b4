use std::time::Instant;

use rubble_core::config::EngineConfig;
use rubble_core::types::Phase;
use rubble_sim::engine::Engine;

use crate::scenes::SceneConfig;

/// Fixed host clock: one tick per 60 Hz frame.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub voxels: usize,
    pub targets: usize,
    pub rubble: usize,
    pub dropped: usize,
    pub plan_ms: f64,
    /// Ticks from the rebuild call until the scene was STABLE again.
    pub ticks_to_stable: u32,
    pub converged: bool,
    /// Per-tick integrator cost during the rebuild.
    pub timings: TimingSeries,
}

/// Drives a headless engine through load, skydive, dismantle and rebuild.
pub struct BenchmarkRunner {
    config: EngineConfig,
    tick_limit: u32,
}

impl BenchmarkRunner {
    pub fn new(config: EngineConfig, tick_limit: u32) -> Self {
        Self { config, tick_limit }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, scene: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({} -> {})...",
            scene.name,
            scene.initial.name(),
            scene.target.name()
        );

        let seed = self.config.seed;
        let initial = scene.initial.generate(seed);
        let targets = scene.target.generate(seed);

        let mut engine = Engine::headless(self.config.clone());
        let mut now = 0.0;
        engine.load_initial_model(&initial, now);
        engine.trigger_skydive(now);
        while engine.phase() == Phase::Dropping {
            now += FRAME_MS;
            engine.tick(now);
        }

        if scene.dismantle_ticks > 0 {
            engine.dismantle(now);
            for _ in 0..scene.dismantle_ticks {
                now += FRAME_MS;
                engine.tick(now);
            }
        }

        let plan_start = Instant::now();
        engine.rebuild(&targets, now);
        let plan_ms = plan_start.elapsed().as_secs_f64() * 1000.0;

        let (rubble, dropped) = engine
            .plan()
            .map(|p| (p.rubble_count(), p.dropped))
            .unwrap_or_default();

        let mut tick_times = Vec::new();
        let mut ticks = 0u32;
        while engine.phase() == Phase::Rebuilding && ticks < self.tick_limit {
            now += FRAME_MS;
            let tick_start = Instant::now();
            engine.tick(now);
            tick_times.push(tick_start.elapsed().as_secs_f64() * 1000.0);
            ticks += 1;
        }
        let converged = engine.phase() == Phase::Stable;
        if !converged {
            log::warn!("  '{}' still rebuilding after {} ticks", scene.name, ticks);
        }

        let timings = compute_timings(&tick_times);
        log::info!(
            "  Done: plan={:.2}ms, ticks={}, mean tick={:.3}ms",
            plan_ms,
            ticks,
            timings.mean_ms
        );

        BenchmarkResult {
            scene_name: scene.name.to_string(),
            voxels: engine.voxel_count(),
            targets: targets.len(),
            rubble,
            dropped,
            plan_ms,
            ticks_to_stable: ticks,
            converged,
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
