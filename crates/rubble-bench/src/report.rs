use std::path::Path;

use crate::runner::BenchmarkResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

/// Which measurement regressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Plan,
    Tick,
    Convergence,
}

impl Metric {
    fn label(self) -> &'static str {
        match self {
            Metric::Plan => "plan time",
            Metric::Tick => "mean tick",
            Metric::Convergence => "ticks to stable",
        }
    }
}

/// A scene whose metric grew past the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene: String,
    pub metric: Metric,
    pub pct_change: f64,
}

/// Load a baseline from a JSON file. Returns None if the file doesn't exist.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

fn pct_change(current: f64, base: f64) -> Option<f64> {
    (base > 0.0).then(|| (current - base) / base * 100.0)
}

/// Compare current results against a baseline. Scenes missing from the
/// baseline are skipped.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    let mut regressions = Vec::new();

    for result in current {
        let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        else {
            continue;
        };

        let checks = [
            (Metric::Plan, result.plan_ms, base.plan_ms),
            (Metric::Tick, result.timings.mean_ms, base.timings.mean_ms),
            (
                Metric::Convergence,
                result.ticks_to_stable as f64,
                base.ticks_to_stable as f64,
            ),
        ];
        for (metric, now, then) in checks {
            if let Some(pct) = pct_change(now, then) {
                if pct > threshold_pct {
                    regressions.push(Regression {
                        scene: result.scene_name.clone(),
                        metric,
                        pct_change: pct,
                    });
                }
            }
        }
    }

    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Voxels | Targets | Rubble | Dropped | Plan (ms) | Ticks | Mean tick (ms) | P95 tick (ms) | Max tick (ms) |\n");
    out.push_str("|-------|--------|---------|--------|---------|-----------|-------|----------------|---------------|---------------|\n");

    for r in results {
        let ticks = if r.converged {
            r.ticks_to_stable.to_string()
        } else {
            format!("{}+", r.ticks_to_stable)
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:.2} | {} | {:.3} | {:.3} | {:.3} |\n",
            r.scene_name,
            r.voxels,
            r.targets,
            r.rubble,
            r.dropped,
            r.plan_ms,
            ticks,
            r.timings.mean_ms,
            r.timings.p95_ms,
            r.timings.max_ms,
        ));
    }

    out
}

/// Format a comparison report showing regressions.
pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {:.0}% threshold. No regressions detected.\n",
            threshold_pct
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "REGRESSIONS DETECTED (>{:.0}% threshold):\n",
        threshold_pct
    ));
    for r in regressions {
        out.push_str(&format!(
            "  - {} ({}): +{:.1}%\n",
            r.scene,
            r.metric.label(),
            r.pct_change
        ));
    }
    out
}
