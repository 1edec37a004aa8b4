/// Destination for packed instance data: a GPU buffer in the browser, or a
/// recorder in tests and tools.
pub trait InstanceSink {
    /// Replace the instance data. `bytes` holds `count` packed instances.
    fn upload(&mut self, bytes: &[u8], count: usize);

    /// Per-frame camera uniforms.
    fn set_camera(&mut self, _bytes: &[u8]) {}

    /// Free everything held for the scene.
    fn release(&mut self);
}

/// Sink that keeps the last upload and counts calls.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub uploads: usize,
    pub last_count: usize,
    pub last_bytes: Vec<u8>,
    pub released: bool,
}

impl InstanceSink for RecordingSink {
    fn upload(&mut self, bytes: &[u8], count: usize) {
        self.uploads += 1;
        self.last_count = count;
        self.last_bytes.clear();
        self.last_bytes.extend_from_slice(bytes);
    }

    fn release(&mut self) {
        self.last_bytes = Vec::new();
        self.last_count = 0;
        self.released = true;
    }
}
