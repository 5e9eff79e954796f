//! The inspection engine behind a [`crate::Session`].
//!
//! Engines speak wide text only: paths, field names, option names and every
//! returned value are UTF-16. The session owns the conversion to and from the
//! caller's narrow encoding, so an engine never sees caller bytes.
mod builtin;
mod options;

use crate::fields::StreamKind;
use crate::probe::ProbeError;
use crate::text::WideString;
pub use builtin::BuiltinEngine;
pub use options::EngineConfig;

pub trait InspectionEngine: Send {
    /// Reads and analyzes the file at `path`.
    fn open(&mut self, path: &[u16]) -> Result<(), ProbeError>;

    /// Starts a buffered open of `total_size` bytes.
    fn open_buffer_init(&mut self, total_size: u64);

    /// Feeds the next chunk of a buffered open.
    fn open_buffer_continue(&mut self, chunk: &[u8]);

    /// Analyzes everything fed since [`Self::open_buffer_init`].
    fn open_buffer_finalize(&mut self) -> Result<(), ProbeError>;

    /// Drops the analyzed source. Options are kept.
    fn close(&mut self);

    /// Value of `name` in stream `index` of `kind`, `None` when absent.
    fn lookup(&self, kind: StreamKind, index: usize, name: &[u16]) -> Option<WideString>;

    /// Value of `name`, empty when absent or nothing is open.
    fn get(&self, kind: StreamKind, index: usize, name: &[u16]) -> WideString {
        self.lookup(kind, index, name).unwrap_or_default()
    }

    fn count(&self, kind: StreamKind) -> usize;

    /// Sets or queries an engine option. An empty answer means success.
    fn option(&mut self, name: &[u16], value: &[u16]) -> WideString;

    /// The report in the configured output format, empty when nothing is open.
    fn inform(&self) -> WideString;
}
