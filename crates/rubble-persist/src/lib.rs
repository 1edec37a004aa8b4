pub mod error;
pub mod format;
pub mod library;
pub mod snapshot;

pub use error::PersistError;
pub use format::{ImportEntry, SnapshotEntry};
pub use library::{name_from_filename, ModelLibrary, SavedModel};
pub use snapshot::{export_snapshot, import_snapshot};
