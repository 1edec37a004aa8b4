use rubble_core::math::color_distance;
use rubble_core::types::Rgb;

/// Greedy nearest-color search over a palette of source voxels.
#[derive(Debug, Clone, Copy)]
pub struct ColorMatcher {
    /// A candidate closer than this ends the scan immediately.
    early_exit: f32,
}

impl ColorMatcher {
    pub fn new(early_exit: f32) -> Self {
        Self { early_exit }
    }

    /// Index of the best unclaimed palette entry for `target`, or `None` if all are taken.
    ///
    /// Scans in palette order keeping the strict minimum; the first candidate under
    /// the early-exit threshold is accepted without looking further.
    pub fn best_match(&self, palette: &[Rgb], taken: &[bool], target: Rgb) -> Option<usize> {
        let mut best_dist = f32::INFINITY;
        let mut best_idx = None;

        for (i, &color) in palette.iter().enumerate() {
            if taken[i] {
                continue;
            }
            let d = color_distance(color, target);
            if d < best_dist {
                best_dist = d;
                best_idx = Some(i);
                if d < self.early_exit {
                    break;
                }
            }
        }

        best_idx
    }
}
