use crate::fields::humanize;
use crate::fields::{FieldTable, Stream, StreamKind};
use std::path::Path;

/// Bits per second for `bytes` played over `duration_ms`. `None` when the
/// duration is zero or the rate does not fit a `u64`.
pub fn bit_rate(bytes: u64, duration_ms: u64) -> Option<u64> {
    if duration_ms == 0 {
        return None;
    }
    let bps = u128::from(bytes) * 8000 / u128::from(duration_ms);
    u64::try_from(bps).ok()
}

/// Fills in the fields computed from what a probe found: naming fields for
/// files, stream counts, the overall duration and bit rate, and the
/// human-readable `/String` variants.
pub fn complete(table: &mut FieldTable, file_size: u64, path: Option<&Path>) {
    let counts = StreamKind::ALL.map(|kind| (kind, table.count(kind)));

    let general = table.general_mut();
    if let Some(path) = path {
        general.set("CompleteName", path.display());
        if let Some(folder) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            general.set("FolderName", folder.display());
        }
        if let Some(stem) = path.file_stem() {
            general.set("FileName", stem.to_string_lossy());
        }
        if let Some(ext) = path.extension() {
            general.set("FileExtension", ext.to_string_lossy());
        }
    }
    general.set("FileSize", file_size);
    for (kind, count) in counts.iter().skip(1) {
        if *count > 0 {
            general.set(&format!("{kind}Count"), count);
        }
    }

    let longest = table
        .streams()
        .filter(|(_, s)| s.kind != StreamKind::General)
        .filter_map(|(_, s)| s.get_u64("Duration"))
        .max();
    let general = table.general_mut();
    if let Some(longest) = longest {
        general.set_default("Duration", longest);
    }
    if let Some(bps) = general
        .get_u64("Duration")
        .and_then(|duration| bit_rate(file_size, duration))
    {
        general.set_default("OverallBitRate", bps);
    }

    let mut seen = [0usize; 7];
    for stream in table.streams_mut() {
        let kind = stream.kind;
        let slot = StreamKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        stream.set("StreamKind", kind);
        stream.set("StreamKindID", seen[slot]);
        stream.set("StreamCount", counts[slot].1);
        seen[slot] += 1;
        add_strings(stream);
    }
}

fn add_strings(stream: &mut Stream) {
    if let Some(ms) = stream.get_u64("Duration") {
        stream.set("Duration/String", humanize::duration(ms));
        stream.set("Duration/String3", humanize::duration_clock(ms));
    }
    for name in ["BitRate", "OverallBitRate"] {
        if let Some(bps) = stream.get_u64(name) {
            stream.set(&format!("{name}/String"), humanize::bit_rate(bps));
        }
    }
    for name in ["FileSize", "StreamSize"] {
        if let Some(bytes) = stream.get_u64(name) {
            stream.set(&format!("{name}/String"), humanize::file_size(bytes));
        }
    }
    for name in ["BitRate_Mode", "OverallBitRate_Mode"] {
        if let Some(mode) = stream.get(name).and_then(humanize::bit_rate_mode) {
            stream.set(&format!("{name}/String"), mode);
        }
    }
    if let Some(hz) = stream.get_u64("SamplingRate") {
        stream.set("SamplingRate/String", humanize::sampling_rate(hz));
    }
    if let Some(count) = stream.get_u64("Channel(s)") {
        stream.set("Channel(s)/String", humanize::channels(count));
    }
    if let Some(bits) = stream.get_u64("BitDepth") {
        stream.set("BitDepth/String", humanize::bit_depth(bits));
    }
    if let Some(fps) = stream.get_f64("FrameRate") {
        stream.set("FrameRate/String", humanize::frame_rate(fps));
    }

    let width = stream.get_u64("Width");
    let height = stream.get_u64("Height");
    if let Some(w) = width {
        stream.set("Width/String", humanize::pixels(w));
    }
    if let Some(h) = height {
        stream.set("Height/String", humanize::pixels(h));
    }
    if stream.kind == StreamKind::Video
        && let (Some(w), Some(h)) = (width, height)
        && h > 0
    {
        let ratio = w as f64 / h as f64;
        stream.set_default("DisplayAspectRatio", format!("{ratio:.3}"));
        stream.set("DisplayAspectRatio/String", humanize::aspect_ratio(ratio));
    }
}
