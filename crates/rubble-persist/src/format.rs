use serde::{Deserialize, Serialize};

/// One exported voxel. Coordinates are rounded to two decimals, color is `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub c: String,
}

/// One imported voxel. Accepts both exported snapshots (`c: "#rrggbb"`) and
/// generator-style cells (`color: 0xRRGGBB` as a number). `color` wins when both exist.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportEntry {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub c: Option<String>,
}
