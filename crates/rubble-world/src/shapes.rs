use std::collections::HashMap;

use glam::IVec3;
use rubble_core::math::round_half_up;
use rubble_core::types::TargetCell;

use crate::palette;

/// Grid of occupied cells keyed by rounded position.
///
/// Placing a block where one already exists replaces its color but keeps its
/// original slot, so output order is first-placement order.
#[derive(Debug, Default)]
pub struct BlockMap {
    index: HashMap<IVec3, usize>,
    cells: Vec<TargetCell>,
}

impl BlockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snap `(x, y, z)` to the grid and occupy it with `color`.
    pub fn set_block(&mut self, x: f32, y: f32, z: f32, color: u32) {
        let key = IVec3::new(
            round_half_up(x) as i32,
            round_half_up(y) as i32,
            round_half_up(z) as i32,
        );
        let cell = TargetCell::new(key.x as f32, key.y as f32, key.z as f32, color);
        match self.index.get(&key) {
            Some(&slot) => self.cells[slot] = cell,
            None => {
                self.index.insert(key, self.cells.len());
                self.cells.push(cell);
            }
        }
    }

    /// Fill an ellipsoid: radius `r` horizontally, `r * squash` vertically.
    pub fn sphere(&mut self, cx: f32, cy: f32, cz: f32, r: f32, color: u32, squash: f32) {
        let r2 = r * r;
        let x_min = (cx - r).floor() as i32;
        let x_max = (cx + r).ceil() as i32;
        let y_min = (cy - r * squash).floor() as i32;
        let y_max = (cy + r * squash).ceil() as i32;
        let z_min = (cz - r).floor() as i32;
        let z_max = (cz + r).ceil() as i32;

        for x in x_min..=x_max {
            for y in y_min..=y_max {
                for z in z_min..=z_max {
                    let dx = x as f32 - cx;
                    let dy = (y as f32 - cy) / squash;
                    let dz = z as f32 - cz;
                    if dx * dx + dy * dy + dz * dz <= r2 {
                        self.set_block(x as f32, y as f32, z as f32, color);
                    }
                }
            }
        }
    }

    /// Four-block trunk with a round canopy on top.
    pub fn tree(&mut self, x: f32, z: f32, y_base: f32) {
        for i in 0..4 {
            self.set_block(x, y_base + i as f32, z, palette::WOOD);
        }
        self.sphere(x, y_base + 4.0, z, 2.5, palette::LAWN, 1.0);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn into_cells(self) -> Vec<TargetCell> {
        self.cells
    }
}
