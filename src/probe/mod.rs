//! Header-only container probes used by the built-in engine.
//!
//! Each probe recognizes one family of containers from its leading bytes and
//! fills a [`FieldTable`] with the raw fields it can read from the headers.
//! Audio parameters and tags come from symphonia's demuxers; only what they do
//! not expose (video dimensions, image headers, MPEG-4 box layout) is read by
//! hand. Payload data is never decoded.
mod demux;
pub mod error;
mod mp3;
mod mp4;
mod ogg;
mod png;
pub mod reader;
mod wav;

use crate::fields::FieldTable;
pub use error::ProbeError;
use tracing::{debug, trace};

pub trait Probe: Send + Sync {
    /// General `Format` value this probe reports.
    fn name(&self) -> &'static str;

    /// Cheap check on the leading bytes.
    fn sniff(&self, data: &[u8]) -> bool;

    fn parse(&self, data: &[u8], table: &mut FieldTable) -> Result<(), ProbeError>;
}

// Weaker signatures last: MPEG Audio frame sync can appear at the start of
// unrelated data.
static PROBES: [&dyn Probe; 5] = [
    &png::PngProbe,
    &mp4::Mp4Probe,
    &wav::WavProbe,
    &ogg::OggProbe,
    &mp3::Mp3Probe,
];

pub fn probes() -> &'static [&'static dyn Probe] {
    &PROBES
}

/// Runs the first probe that recognizes `data`.
pub fn probe(data: &[u8]) -> Result<FieldTable, ProbeError> {
    if data.is_empty() {
        return Err(ProbeError::Empty);
    }
    let probe = PROBES
        .iter()
        .find(|p| p.sniff(data))
        .ok_or(ProbeError::Unrecognized)?;
    debug!(format = probe.name(), bytes = data.len(), "Probing source");

    let mut table = FieldTable::new();
    table.general_mut().set("Format", probe.name());
    probe.parse(data, &mut table)?;
    trace!(?table, "Probe finished");
    Ok(table)
}
