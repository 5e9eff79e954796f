use crate::engine::{EngineConfig, InspectionEngine};
use crate::fields::{FieldTable, StreamKind, derived};
use crate::probe::{self, ProbeError};
use crate::text::WideString;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Upper bound on what `open_buffer_init` reserves up front.
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// The engine shipped with this crate: header probes from [`crate::probe`]
/// plus the derived fields and reports.
#[derive(Debug, Default)]
pub struct BuiltinEngine {
    config: EngineConfig,
    pending: Option<Vec<u8>>,
    table: Option<FieldTable>,
}

impl BuiltinEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The analyzed source, if any.
    pub const fn table(&self) -> Option<&FieldTable> {
        self.table.as_ref()
    }
}

impl InspectionEngine for BuiltinEngine {
    fn open(&mut self, path: &[u16]) -> Result<(), ProbeError> {
        let path = String::from_utf16(path)
            .map(PathBuf::from)
            .map_err(|_| ProbeError::Malformed("path is not valid UTF-16".into()))?;
        let data = fs::read(&path)?;
        let mut table = probe::probe(&data)?;
        derived::complete(&mut table, data.len() as u64, Some(path.as_path()));
        debug!(path = %path.display(), streams = table.streams().count(), "Opened file");
        self.table = Some(table);
        Ok(())
    }

    fn open_buffer_init(&mut self, total_size: u64) {
        let capacity = usize::try_from(total_size)
            .unwrap_or(MAX_PREALLOCATION)
            .min(MAX_PREALLOCATION);
        self.table = None;
        self.pending = Some(Vec::with_capacity(capacity));
    }

    fn open_buffer_continue(&mut self, chunk: &[u8]) {
        trace!(bytes = chunk.len(), "Buffer chunk");
        self.pending.get_or_insert_with(Vec::new).extend_from_slice(chunk);
    }

    fn open_buffer_finalize(&mut self) -> Result<(), ProbeError> {
        let data = self.pending.take().unwrap_or_default();
        let mut table = probe::probe(&data)?;
        derived::complete(&mut table, data.len() as u64, None);
        debug!(bytes = data.len(), "Opened buffer");
        self.table = Some(table);
        Ok(())
    }

    fn close(&mut self) {
        self.pending = None;
        self.table = None;
    }

    fn lookup(&self, kind: StreamKind, index: usize, name: &[u16]) -> Option<WideString> {
        let name = String::from_utf16_lossy(name);
        self.table
            .as_ref()?
            .get(kind, index, &name)
            .map(WideString::from)
    }

    fn count(&self, kind: StreamKind) -> usize {
        self.table.as_ref().map_or(0, |t| t.count(kind))
    }

    fn option(&mut self, name: &[u16], value: &[u16]) -> WideString {
        let name = String::from_utf16_lossy(name);
        let value = String::from_utf16_lossy(value);
        trace!(%name, %value, "Engine option");
        WideString::from(self.config.apply(&name, &value))
    }

    fn inform(&self) -> WideString {
        self.table
            .as_ref()
            .map(|table| WideString::from(self.config.report.render(table, self.config.complete)))
            .unwrap_or_default()
    }
}
