use crate::fields::derived::bit_rate;
use crate::fields::{FieldTable, Stream, StreamKind};
use crate::probe::demux;
use crate::probe::reader::{Boxes, be_u16, be_u32, be_u64, find_box, fourcc, slice, u8_at};
use crate::probe::{Probe, ProbeError};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tracing::{trace, warn};

pub struct Mp4Probe;

/// Top-level box types that can open an ISO base media or QuickTime file.
const LEADING_BOXES: [&[u8; 4]; 5] = [b"ftyp", b"moov", b"mdat", b"free", b"wide"];

/// `(version, timescale, duration)` from an mvhd or mdhd payload.
fn media_header(payload: &[u8]) -> Option<(u8, u32, u64)> {
    let version = u8_at(payload, 0)?;
    if version == 1 {
        Some((version, be_u32(payload, 20)?, be_u64(payload, 24)?))
    } else {
        Some((version, be_u32(payload, 12)?, u64::from(be_u32(payload, 16)?)))
    }
}

fn creation_time(payload: &[u8]) -> Option<DateTime<Utc>> {
    let seconds = match u8_at(payload, 0)? {
        1 => be_u64(payload, 4)?,
        _ => u64::from(be_u32(payload, 4)?),
    };
    if seconds == 0 {
        return None;
    }
    // Seconds since 1904-01-01 00:00:00 UTC.
    let epoch = Utc.with_ymd_and_hms(1904, 1, 1, 0, 0, 0).single()?;
    epoch.checked_add_signed(TimeDelta::try_seconds(i64::try_from(seconds).ok()?)?)
}

fn to_millis(duration: u64, timescale: u32) -> Option<u64> {
    (timescale > 0).then(|| duration.saturating_mul(1000) / u64::from(timescale))
}

fn brand_profile(brand: &str) -> Option<&'static str> {
    Some(match brand {
        "isom" => "Base Media",
        "iso2" => "Base Media / Version 2",
        "mp41" => "Base Media / Version 1",
        "mp42" => "Base Media / Version 2",
        "M4A" => "Apple audio with iTunes info",
        "M4V" => "Apple video",
        "qt" => "QuickTime",
        "3gp4" => "3GPP Media Release 4",
        "3gp5" => "3GPP Media Release 5",
        "3gp6" => "3GPP Media Release 6",
        "dash" => "DASH",
        _ => return None,
    })
}

fn codec_name(code: &[u8]) -> Option<&'static str> {
    Some(match code {
        b"avc1" | b"avc3" => "AVC",
        b"hvc1" | b"hev1" => "HEVC",
        b"av01" => "AV1",
        b"vp09" => "VP9",
        b"mp4v" => "MPEG-4 Visual",
        b"jpeg" => "JPEG",
        b"apcn" | b"apch" | b"apcs" | b"apco" | b"ap4h" => "ProRes",
        b"mp4a" => "AAC",
        b"ac-3" => "AC-3",
        b"ec-3" => "E-AC-3",
        b"Opus" => "Opus",
        b"fLaC" => "FLAC",
        b"alac" => "ALAC",
        b".mp3" => "MPEG Audio",
        b"sowt" | b"twos" | b"lpcm" | b"in24" | b"fl32" => "PCM",
        b"tx3g" => "Timed Text",
        b"wvtt" => "WebVTT",
        b"stpp" => "TTML",
        b"c608" => "EIA-608",
        b"tmcd" => "QuickTime TC",
        _ => return None,
    })
}

fn is_lossless(format: &str) -> bool {
    matches!(format, "FLAC" | "ALAC" | "PCM")
}

/// ISO 639-2/T code packed as three 5-bit letters offset by 0x60.
fn language(packed: u16) -> Option<String> {
    let code: String = [10u16, 5, 0]
        .iter()
        .map(|shift| char::from((((packed >> shift) & 0x1F) as u8).wrapping_add(0x60)))
        .collect();
    (code.chars().all(|c| c.is_ascii_lowercase()) && code != "und").then_some(code)
}

fn read_ftyp(payload: &[u8], general: &mut Stream) {
    let Some(major) = slice(payload, 0, 4).map(fourcc) else {
        return;
    };
    let compatible: Vec<String> = payload
        .get(8..)
        .unwrap_or_default()
        .chunks_exact(4)
        .map(fourcc)
        .collect();
    if major == "qt" {
        general.set("Format", "QuickTime");
    }
    if let Some(profile) = brand_profile(&major) {
        general.set("Format_Profile", profile);
    }
    if compatible.is_empty() {
        general.set("CodecID", &major);
    } else {
        general.set("CodecID", format!("{major} ({})", compatible.join("/")));
    }
}

fn stream_kind(handler: &[u8]) -> StreamKind {
    match handler {
        b"vide" => StreamKind::Video,
        b"soun" => StreamKind::Audio,
        b"text" | b"sbtl" | b"subt" | b"clcp" => StreamKind::Text,
        _ => StreamKind::Other,
    }
}

/// Sample entry fields: dimensions for video, layout for audio.
fn read_sample_entry(kind: StreamKind, stsd: &[u8], stream: &mut Stream) {
    // stsd: version/flags(4) entry_count(4), then the first sample entry box.
    let Some((code, entry)) = Boxes::new(stsd.get(8..).unwrap_or_default()).next() else {
        return;
    };
    stream.set("CodecID", fourcc(&code));
    let format = codec_name(&code).unwrap_or("Unknown");
    stream.set("Format", format);
    match kind {
        StreamKind::Video => {
            if let (Some(w), Some(h)) = (be_u16(entry, 24), be_u16(entry, 26)) {
                stream.set("Width", w).set("Height", h);
            }
        }
        StreamKind::Audio => {
            if let Some(channels) = be_u16(entry, 16) {
                stream.set("Channel(s)", channels);
            }
            if let Some(rate) = be_u32(entry, 24).map(|r| r >> 16).filter(|r| *r > 0) {
                stream.set("SamplingRate", rate);
            }
            if format == "PCM"
                && let Some(bits) = be_u16(entry, 18)
            {
                stream.set("BitDepth", bits);
            }
            let mode = if is_lossless(format) { "Lossless" } else { "Lossy" };
            stream.set("Compression_Mode", mode);
        }
        StreamKind::Other if &code == b"tmcd" => {
            stream.set("Type", "Time code");
        }
        _ => {}
    }
}

/// `(sample_count, total_bytes)` from an stsz payload.
fn sample_sizes(stsz: &[u8]) -> Option<(u64, u64)> {
    let sample_size = u64::from(be_u32(stsz, 4)?);
    let count = u64::from(be_u32(stsz, 8)?);
    if sample_size != 0 {
        return Some((count, sample_size.checked_mul(count)?));
    }
    let total = stsz
        .get(12..)?
        .chunks_exact(4)
        .take(usize::try_from(count).ok()?)
        .map(|c| u64::from(u32::from_be_bytes([c[0], c[1], c[2], c[3]])))
        .sum();
    Some((count, total))
}

/// Adds the stream a trak describes and returns its kind.
fn read_track(trak: &[u8], table: &mut FieldTable) -> Option<StreamKind> {
    let mdia = find_box(trak, b"mdia")?;
    let handler = find_box(mdia, b"hdlr")
        .and_then(|h| slice(h, 8, 4))
        .unwrap_or(&b"    "[..]);
    let kind = stream_kind(handler);
    trace!(handler = %fourcc(handler), ?kind, "MPEG-4 track");
    let stream = table.push_stream(kind);

    if let Some(tkhd) = find_box(trak, b"tkhd") {
        let id_offset = if u8_at(tkhd, 0) == Some(1) { 20 } else { 12 };
        if let Some(id) = be_u32(tkhd, id_offset) {
            stream.set("ID", id);
        }
    }
    let mut duration_ms = None;
    if let Some(mdhd) = find_box(mdia, b"mdhd")
        && let Some((version, timescale, duration)) = media_header(mdhd)
    {
        duration_ms = to_millis(duration, timescale);
        if let Some(ms) = duration_ms {
            stream.set("Duration", ms);
        }
        let lang_offset = if version == 1 { 32 } else { 20 };
        if let Some(lang) = be_u16(mdhd, lang_offset).and_then(language) {
            stream.set("Language", lang);
        }
    }

    let Some(stbl) = find_box(mdia, b"minf").and_then(|minf| find_box(minf, b"stbl")) else {
        return Some(kind);
    };
    if let Some(stsd) = find_box(stbl, b"stsd") {
        read_sample_entry(kind, stsd, stream);
    }
    if let Some((count, bytes)) = find_box(stbl, b"stsz").and_then(sample_sizes) {
        stream.set("StreamSize", bytes);
        if let Some(ms) = duration_ms.filter(|ms| *ms > 0) {
            if let Some(rate) = bit_rate(bytes, ms) {
                stream.set("BitRate", rate);
            }
            if kind == StreamKind::Video {
                stream
                    .set("FrameCount", count)
                    .set("FrameRate", format!("{:.3}", count as f64 * 1000.0 / ms as f64));
            }
        }
    }
    Some(kind)
}

/// Codec parameters and iTunes tags for the audio tracks. `audio` pairs
/// the demuxer's track id (the trak's position in moov) with the audio
/// stream index it produced.
fn read_audio_with_demuxer(data: &[u8], audio: &[(u32, usize)], table: &mut FieldTable) {
    let demuxed = match demux::open(data, "mp4") {
        Ok(demuxed) => demuxed,
        Err(err) => {
            warn!(%err, "MPEG-4 audio left to the box headers");
            return;
        }
    };
    demuxed.apply_tags(table.general_mut());
    for &(track, index) in audio {
        if let (Some(params), Some(stream)) = (
            demuxed.track(track),
            table.stream_mut(StreamKind::Audio, index),
        ) {
            demux::fill_audio(params, stream);
        }
    }
}

impl Probe for Mp4Probe {
    fn name(&self) -> &'static str {
        "MPEG-4"
    }

    fn sniff(&self, data: &[u8]) -> bool {
        slice(data, 4, 4).is_some_and(|kind| LEADING_BOXES.iter().any(|b| &b[..] == kind))
    }

    fn parse(&self, data: &[u8], table: &mut FieldTable) -> Result<(), ProbeError> {
        let mut found_moov = false;
        let mut audio = Vec::new();
        for (kind, payload) in Boxes::new(data) {
            match &kind {
                b"ftyp" => read_ftyp(payload, table.general_mut()),
                b"moov" => {
                    found_moov = true;
                    let mut trak_index = 0u32;
                    for (child, body) in Boxes::new(payload) {
                        match &child {
                            b"mvhd" => {
                                let general = table.general_mut();
                                if let Some((_, timescale, duration)) = media_header(body)
                                    && let Some(ms) = to_millis(duration, timescale)
                                {
                                    general.set("Duration", ms);
                                }
                                if let Some(date) = creation_time(body) {
                                    general.set(
                                        "Encoded_Date",
                                        date.format("%Y-%m-%d %H:%M:%S UTC"),
                                    );
                                }
                            }
                            b"trak" => {
                                if read_track(body, table) == Some(StreamKind::Audio) {
                                    audio.push((trak_index, table.count(StreamKind::Audio) - 1));
                                }
                                trak_index += 1;
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
        if !found_moov {
            warn!("MPEG-4 data without a moov box, only the file type is known");
        }
        if !audio.is_empty() {
            read_audio_with_demuxer(data, &audio, table);
        }
        Ok(())
    }
}
