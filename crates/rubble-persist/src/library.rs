use rubble_core::types::TargetCell;

use crate::error::PersistError;
use crate::snapshot::import_snapshot;

/// A user-supplied shape kept for later builds or rebuilds.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedModel {
    pub name: String,
    pub cells: Vec<TargetCell>,
}

/// Named cell lists, newest first.
#[derive(Debug, Clone, Default)]
pub struct ModelLibrary {
    models: Vec<SavedModel>,
}

impl ModelLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model at the front. A model with the same name is replaced.
    pub fn insert(&mut self, name: impl Into<String>, cells: Vec<TargetCell>) {
        let name = name.into();
        self.models.retain(|m| m.name != name);
        log::info!("Saved model '{}' ({} voxels)", name, cells.len());
        self.models.insert(0, SavedModel { name, cells });
    }

    /// Import a JSON file's contents under a name derived from its file name.
    pub fn import_file(&mut self, filename: &str, json: &str) -> Result<&SavedModel, PersistError> {
        let cells = import_snapshot(json)?;
        self.insert(name_from_filename(filename), cells);
        Ok(&self.models[0])
    }

    pub fn find(&self, name: &str) -> Option<&SavedModel> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<SavedModel> {
        let idx = self.models.iter().position(|m| m.name == name)?;
        Some(self.models.remove(idx))
    }

    pub fn list(&self) -> &[SavedModel] {
        &self.models
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Display name for an uploaded file: the trailing `.json` is dropped.
pub fn name_from_filename(filename: &str) -> String {
    filename
        .strip_suffix(".json")
        .unwrap_or(filename)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(n: usize) -> Vec<TargetCell> {
        (0..n).map(|i| TargetCell::new(i as f32, 0.0, 0.0, 0xFFFFFF)).collect()
    }

    #[test]
    fn test_newest_first() {
        let mut lib = ModelLibrary::new();
        lib.insert("tower", cells(3));
        lib.insert("bridge", cells(5));
        let names: Vec<&str> = lib.names().collect();
        assert_eq!(names, vec!["bridge", "tower"]);
    }

    #[test]
    fn test_same_name_replaces() {
        let mut lib = ModelLibrary::new();
        lib.insert("tower", cells(3));
        lib.insert("bridge", cells(5));
        lib.insert("tower", cells(7));
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.list()[0].name, "tower");
        assert_eq!(lib.find("tower").expect("tower").cells.len(), 7);
    }

    #[test]
    fn test_name_from_filename() {
        assert_eq!(name_from_filename("castle.json"), "castle");
        assert_eq!(name_from_filename("castle.json.bak"), "castle.json.bak");
        assert_eq!(name_from_filename("castle"), "castle");
    }

    #[test]
    fn test_import_file() {
        let mut lib = ModelLibrary::new();
        let json = r##"[{"x": 0, "y": 1, "z": 2, "c": "#00ff00"}, {"x": 1, "y": 1, "z": 2, "color": 16711680}]"##;
        let model = lib.import_file("frog.json", json).expect("import");
        assert_eq!(model.name, "frog");
        assert_eq!(model.cells.len(), 2);
        assert_eq!(model.cells[0].color, 0x00FF00);
        assert_eq!(model.cells[1].color, 0xFF0000);
    }

    #[test]
    fn test_failed_import_leaves_library_untouched() {
        let mut lib = ModelLibrary::new();
        lib.insert("tower", cells(1));
        assert!(lib.import_file("bad.json", "{}").is_err());
        assert_eq!(lib.len(), 1);
        assert!(lib.find("bad").is_none());
    }

    #[test]
    fn test_remove() {
        let mut lib = ModelLibrary::new();
        lib.insert("tower", cells(1));
        assert!(lib.remove("tower").is_some());
        assert!(lib.remove("tower").is_none());
        assert!(lib.is_empty());
    }
}
