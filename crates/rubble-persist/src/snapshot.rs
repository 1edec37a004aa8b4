use rubble_core::constants::EXPORT_DECIMALS;
use rubble_core::math::round_to_decimals;
use rubble_core::types::{Rgb, TargetCell};
use rubble_sim::store::VoxelStore;

use crate::error::PersistError;
use crate::format::{ImportEntry, SnapshotEntry};

/// Flatten the store into exportable entries, one per voxel in id order.
pub fn snapshot_entries(store: &VoxelStore) -> Vec<SnapshotEntry> {
    store
        .iter()
        .map(|v| SnapshotEntry {
            id: v.id,
            x: export_coord(v.position.x),
            y: export_coord(v.position.y),
            z: export_coord(v.position.z),
            c: v.color.to_hex_string(),
        })
        .collect()
}

/// Rounded coordinate with negative zero folded to zero.
fn export_coord(v: f32) -> f32 {
    let rounded = round_to_decimals(v, EXPORT_DECIMALS);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Pretty-printed JSON dump of current voxel positions and colors.
pub fn export_snapshot(store: &VoxelStore) -> Result<String, PersistError> {
    let entries = snapshot_entries(store);
    let json = serde_json::to_string_pretty(&entries)?;
    log::info!("Exported snapshot of {} voxels ({} bytes)", entries.len(), json.len());
    Ok(json)
}

/// Parse a JSON voxel array back into cells ready for `load_initial_model`.
///
/// Entry ids are ignored; order is preserved.
pub fn import_snapshot(json: &str) -> Result<Vec<TargetCell>, PersistError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(PersistError::NotAnArray);
    }
    let entries: Vec<ImportEntry> = serde_json::from_value(value)?;

    let cells = entries
        .into_iter()
        .enumerate()
        .map(|(index, e)| {
            let color = match (e.color, e.c.as_deref()) {
                (Some(hex), _) => hex,
                (None, Some(s)) => Rgb::parse_hex_str(s)
                    .map_err(|source| PersistError::BadColor { index, source })?
                    .to_hex(),
                (None, None) => return Err(PersistError::MissingColor { index }),
            };
            Ok(TargetCell::new(e.x, e.y, e.z, color))
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Imported snapshot of {} voxels", cells.len());
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rubble_sim::store::SimVoxel;

    fn store_with(positions: &[Vec3]) -> VoxelStore {
        let cells: Vec<TargetCell> = positions
            .iter()
            .map(|p| TargetCell::new(p.x, p.y, p.z, 0xB94A18))
            .collect();
        VoxelStore::from_cells(&cells, 0.05, 4)
    }

    #[test]
    fn test_export_rounds_coordinates() {
        let store = store_with(&[Vec3::new(1.23456, -11.5, 0.004)]);
        let entries = snapshot_entries(&store);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 0);
        assert!((entries[0].x - 1.23).abs() < 1e-6);
        assert_eq!(entries[0].y, -11.5);
        assert_eq!(entries[0].z, 0.0);
        assert!(entries[0].c.starts_with('#') && entries[0].c.len() == 7);
    }

    #[test]
    fn test_export_has_no_negative_zero() {
        let store = store_with(&[Vec3::new(-0.004, -0.001, -0.0)]);
        let entries = snapshot_entries(&store);
        assert!(entries[0].x.is_sign_positive());
        assert!(entries[0].y.is_sign_positive());
        assert!(entries[0].z.is_sign_positive());

        let json = export_snapshot(&store).expect("export");
        assert!(!json.contains("-0.0"), "{json}");
    }

    #[test]
    fn test_export_is_pretty_json_array() {
        let store = store_with(&[Vec3::ZERO, Vec3::ONE]);
        let json = export_snapshot(&store).expect("export");
        assert!(json.starts_with('['));
        assert!(json.contains("\n"));
        assert!(json.contains("\"c\": \"#"));
    }

    #[test]
    fn test_roundtrip_within_precision() {
        let positions = [
            Vec3::new(3.14159, -7.777, 12.0),
            Vec3::new(-0.333, 100.456, -45.001),
            Vec3::new(0.0, -11.5, 8.5),
        ];
        let store = store_with(&positions);
        let json = export_snapshot(&store).expect("export");
        let cells = import_snapshot(&json).expect("import");

        assert_eq!(cells.len(), store.len());
        for (cell, v) in cells.iter().zip(store.iter()) {
            assert!(cell.position().distance(v.position) < 0.01, "{cell:?} vs {v:?}");
            assert_eq!(cell.color, v.color.to_hex());
        }
    }

    #[test]
    fn test_roundtrip_through_reload_keeps_colors() {
        let store = store_with(&[Vec3::ZERO]);
        let cells = import_snapshot(&export_snapshot(&store).expect("export")).expect("import");
        let reloaded = VoxelStore::from_cells(&cells, 0.0, 0);
        let original: &SimVoxel = store.get(0).expect("voxel");
        assert_eq!(reloaded.get(0).expect("voxel").color.to_hex(), original.color.to_hex());
    }

    #[test]
    fn test_import_numeric_color_wins() {
        let json = r##"[{"x": 1, "y": 2, "z": 3, "color": 255, "c": "#ff0000"}]"##;
        let cells = import_snapshot(json).expect("import");
        assert_eq!(cells[0].color, 0x0000FF);
        assert_eq!(cells[0].position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_import_rejects_non_array() {
        assert!(matches!(
            import_snapshot(r#"{"x": 1}"#),
            Err(PersistError::NotAnArray)
        ));
        assert!(matches!(import_snapshot("not json"), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_import_missing_color() {
        let err = import_snapshot(r#"[{"x": 0, "y": 0, "z": 0}]"#).unwrap_err();
        assert!(matches!(err, PersistError::MissingColor { index: 0 }));
    }

    #[test]
    fn test_import_bad_hex() {
        let err = import_snapshot(r##"[{"x": 0, "y": 0, "z": 0, "c": "#zzzzzz"}]"##).unwrap_err();
        assert!(matches!(err, PersistError::BadColor { index: 0, .. }));
    }
}
