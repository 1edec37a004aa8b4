//! Procedural voxel layouts. Each returns deduplicated cells in placement order.
//!
//! Decorative scatter (fountain mist, leaf clumps) is drawn from the
//! deterministic voxel hash so a given seed always yields the same layout.

use rubble_core::constants::FLOOR_Y;
use rubble_core::rng::{self, STREAM_GENERATOR};
use rubble_core::types::TargetCell;

use crate::palette::*;
use crate::shapes::BlockMap;

/// University campus: paved mall, trellis, fountain, student union,
/// brutalist library, engineering block with skybridge, tree rows.
pub fn campus(seed: u32) -> Vec<TargetCell> {
    let mut map = BlockMap::new();
    let floor = FLOOR_Y + 1.0;
    let f = |v: i32| v as f32;

    // The mall: striped pavers flanked by lawn
    for z in -40i32..=40 {
        for x in -8..=8 {
            let strip = z.abs() % 4 == 0;
            map.set_block(f(x), floor, f(z), if strip { DARK_CONCRETE } else { CONCRETE });
        }
        for x in -22i32..=22 {
            if x.abs() > 8 {
                map.set_block(f(x), floor, f(z), LAWN);
            }
        }
    }

    // Trellis: paired columns, double cross beams, longitudinal canopy
    for z in (15..=35).step_by(5) {
        for y in 0..8 {
            for x in [-6, -5, 5, 6] {
                map.set_block(f(x), floor + f(y), f(z), WHITE);
            }
        }
        for x in -7..=7 {
            map.set_block(f(x), floor + 8.0, f(z), WHITE);
            map.set_block(f(x), floor + 9.0, f(z), WHITE);
        }
    }
    for z in 15..=35 {
        for x in (-6..=6).step_by(3) {
            map.set_block(f(x), floor + 9.0, f(z), WHITE);
        }
        map.set_block(-6.0, floor + 8.0, f(z), WHITE);
        map.set_block(6.0, floor + 8.0, f(z), WHITE);
    }

    // Fountain: basin, rim, raised seating
    for x in -10..=10 {
        for z in -10..=10 {
            let dist = ((x * x + z * z) as f32).sqrt();
            if dist < 9.0 {
                map.set_block(f(x), floor, f(z), WATER);
            }
            if dist < 9.5 && dist > 8.5 {
                map.set_block(f(x), floor + 0.5, f(z), CONCRETE);
            }
            if dist < 4.0 {
                map.set_block(f(x), floor + 1.0, f(z), CONCRETE);
            }
        }
    }
    for i in 0..15 {
        let r = |k: u32| rng::unit(i, STREAM_GENERATOR + k, seed);
        map.set_block(
            (r(0) - 0.5) * 5.0,
            floor + 2.0 + r(1) * 2.0,
            (r(2) - 0.5) * 5.0,
            WHITE,
        );
    }

    // Student union: brick with a glass front, orange trim, entrance cutout
    for z in -15i32..=15 {
        for x in -35..=-15 {
            let front = x == -15;
            let glass_front = front && z % 4 != 0;
            for y in 0..14 {
                if front && z.abs() < 4 && y < 6 {
                    continue;
                }
                let mut color = BRICK;
                if glass_front && y > 1 {
                    color = GLASS;
                }
                if y == 13 {
                    color = ORANGE;
                }
                if x == -35 && y % 4 == 2 && z % 2 == 0 {
                    color = GLASS;
                }
                map.set_block(f(x), floor + f(y), f(z), color);
            }
        }
    }
    for z in (-12..=12).step_by(4) {
        for x in (-14..=-11).step_by(3) {
            map.set_block(f(x), floor + 1.0, f(z), WOOD);
        }
    }

    // Library: L-shaped concrete slab with slit windows
    let library_height = 18;
    for z in -20..=20 {
        for x in 15..=30 {
            if x > 15 || z > -15 {
                for y in 0..library_height {
                    let mut color = CONCRETE;
                    if x == 15 && z % 3 == 0 && y > 2 && y < 16 {
                        color = BLACK;
                    }
                    if y == library_height - 1 {
                        color = ORANGE;
                    }
                    map.set_block(f(x), floor + f(y), f(z), color);
                }
            }
        }
    }

    // Engineering: gold-finned glass blocks joined by a raised skybridge
    for x in -20i32..=20 {
        for z in -45..=-32 {
            if x.abs() < 10 {
                for y in 6..11 {
                    map.set_block(f(x), floor + f(y), f(z), GLASS);
                }
                if x.abs() == 9 && z == -40 {
                    for y in 0..6 {
                        map.set_block(f(x), floor + f(y), f(z), CONCRETE);
                    }
                }
            } else {
                for y in 0..12 {
                    let fin = x % 2 == 0;
                    map.set_block(f(x), floor + f(y), f(z), if fin { GOLD } else { GLASS });
                }
            }
        }
    }

    // Tree rows along the mall, clear of the fountain
    for z in (-35i32..=35).step_by(8) {
        if z.abs() < 12 {
            continue;
        }
        map.tree(-12.0, f(z), floor);
        map.tree(12.0, f(z), floor);
    }

    map.into_cells()
}

/// Eagle perched on a leafy branch.
pub fn eagle(seed: u32) -> Vec<TargetCell> {
    let mut map = BlockMap::new();

    // Branch with occasional leaf clumps
    for (i, x) in (-8..8).enumerate() {
        let xf = x as f32;
        let y = (xf * 0.2).sin() * 1.5;
        let z = (xf * 0.1).cos() * 1.5;
        map.sphere(xf, y, z, 1.8, WOOD, 1.0);
        let r = |k: u32| rng::unit(i as u32, STREAM_GENERATOR + k, seed);
        if r(0) > 0.7 {
            map.sphere(xf, y + 2.0, z + (r(1) - 0.5) * 3.0, 1.5, GREEN, 1.0);
        }
    }

    let (ex, ey, ez) = (0.0f32, 2.0f32, 2.0f32);

    // Body and chest
    map.sphere(ex, ey + 6.0, ez, 4.5, DARK, 1.4);
    for x in -2..=2 {
        for y in 4..=9 {
            map.set_block(ex + x as f32, ey + y as f32, ez + 3.0, LIGHT);
        }
    }

    // Folded wings
    for x in [-4.0, -3.0, 3.0, 4.0] {
        for y in 4..=10 {
            for z in -2..=3 {
                map.set_block(x, ey + y as f32, ez + z as f32, DARK);
            }
        }
    }

    // Tail
    for x in -2..=2 {
        for y in 0..=4 {
            for z in -5..=-3 {
                map.set_block(ex + x as f32, ey + y as f32, ez + z as f32, WHITE);
            }
        }
    }

    // Head
    let (hy, hz) = (ey + 12.0, ez + 1.0);
    map.sphere(ex, hy, hz, 2.8, WHITE, 1.0);
    map.sphere(ex, hy - 2.0, hz, 2.5, WHITE, 1.0);

    for (dx, dy) in [(-2.0, 0.0), (-2.0, 1.0), (2.0, 0.0), (2.0, 1.0)] {
        map.set_block(ex + dx, ey + dy, ez, TALON);
    }

    // Beak
    for (dx, dz) in [(0.0, 1.0), (0.0, 2.0), (1.0, 1.0), (-1.0, 1.0)] {
        map.set_block(ex + dx, hy, hz + 2.0 + dz, GOLD);
    }
    map.set_block(ex, hy - 1.0, hz + 3.0, GOLD);

    // Eyes with highlights
    for dx in [-1.5, 1.5] {
        map.set_block(ex + dx, hy + 0.5, hz + 1.5, BLACK);
        map.set_block(ex + dx, hy + 1.5, hz + 1.5, WHITE);
    }

    map.into_cells()
}

/// Sitting cat with a curled tail.
pub fn cat() -> Vec<TargetCell> {
    let mut map = BlockMap::new();
    let cy = FLOOR_Y + 1.0;
    let (cx, cz) = (0.0f32, 0.0f32);

    // Haunches
    map.sphere(cx - 3.0, cy + 2.0, cz, 2.2, DARK, 1.2);
    map.sphere(cx + 3.0, cy + 2.0, cz, 2.2, DARK, 1.2);

    // Tapering body with a white bib
    for y in 0..7 {
        let yf = y as f32;
        let r = 3.5 - yf * 0.2;
        map.sphere(cx, cy + 2.0 + yf, cz, r, DARK, 1.0);
        map.sphere(cx, cy + 2.0 + yf, cz + 2.0, r * 0.6, WHITE, 1.0);
    }

    // Front legs
    for y in 0..5 {
        let yf = cy + y as f32;
        for dx in [-1.5, 1.5] {
            map.set_block(cx + dx, yf, cz + 3.0, WHITE);
            map.set_block(cx + dx, yf, cz + 2.0, WHITE);
        }
    }

    // Head and ears
    let chy = cy + 9.0;
    map.sphere(cx, chy, cz, 3.2, LIGHT, 0.8);
    for side in [-2.0f32, 2.0] {
        map.set_block(cx + side, chy + 3.0, cz, DARK);
        map.set_block(cx + side * 0.8, chy + 3.0, cz + 1.0, WHITE);
        map.set_block(cx + side, chy + 4.0, cz, DARK);
    }

    // Tail curling around the front
    for i in 0..12 {
        let a = i as f32 * 0.3;
        let (tx, tz) = (a.cos() * 4.5, a.sin() * 4.5);
        if tz > -2.0 {
            map.set_block(cx + tx, cy, cz + tz, DARK);
            map.set_block(cx + tx, cy + 1.0, cz + tz, DARK);
        }
    }

    // Eyes and nose
    map.set_block(cx - 1.0, chy + 0.5, cz + 2.5, GOLD);
    map.set_block(cx + 1.0, chy + 0.5, cz + 2.5, GOLD);
    map.set_block(cx - 1.0, chy + 0.5, cz + 3.0, BLACK);
    map.set_block(cx + 1.0, chy + 0.5, cz + 3.0, BLACK);
    map.set_block(cx, chy, cz + 3.0, TALON);

    map.into_cells()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_unique(cells: &[TargetCell]) {
        let mut seen = HashSet::new();
        for c in cells {
            let key = (c.x as i32, c.y as i32, c.z as i32);
            assert!(seen.insert(key), "duplicate cell at {key:?}");
            assert_eq!(c.x.fract(), 0.0);
            assert_eq!(c.y.fract(), 0.0);
            assert_eq!(c.z.fract(), 0.0);
        }
    }

    #[test]
    fn test_campus_unique_and_sizable() {
        let cells = campus(0);
        assert_unique(&cells);
        assert!(cells.len() > 10_000, "campus too small: {}", cells.len());
        assert!(cells.iter().all(|c| c.y >= FLOOR_Y + 1.0));
    }

    #[test]
    fn test_campus_has_landmarks() {
        let cells = campus(0);
        for color in [ORANGE, LAWN, WATER, BRICK, GLASS, GOLD, WHITE, BLACK] {
            assert!(cells.iter().any(|c| c.color == color), "missing color {color:06x}");
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(campus(5), campus(5));
        assert_eq!(eagle(5), eagle(5));
    }

    #[test]
    fn test_eagle_unique() {
        let cells = eagle(1);
        assert_unique(&cells);
        assert!(cells.len() > 300);
        assert!(cells.iter().any(|c| c.color == TALON));
    }

    #[test]
    fn test_cat_unique_and_grounded() {
        let cells = cat();
        assert_unique(&cells);
        let lowest = cells.iter().map(|c| c.y).fold(f32::MAX, f32::min);
        assert!(lowest >= FLOOR_Y, "cat sinks below floor: {lowest}");
        assert!(cells.iter().any(|c| c.color == GOLD));
    }
}
