use crate::fields::derived::bit_rate;
use crate::fields::{FieldTable, StreamKind};
use crate::probe::demux;
use crate::probe::reader::{be_u32, slice, u8_at};
use crate::probe::{Probe, ProbeError};
use tracing::trace;

/// How far past the ID3 tag we look for the first frame.
const SYNC_SEARCH_LIMIT: usize = 64 * 1024;
const ID3V1_LEN: usize = 128;

pub struct Mp3Probe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Version {
    V1,
    V2,
    V25,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameHeader {
    version: Version,
    layer: u8,
    bitrate: u32,
    sample_rate: u32,
    padding: bool,
    channels: u8,
}

const BITRATES_V1: [[u32; 15]; 3] = [
    [0, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448],
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320, 384],
    [0, 32, 40, 48, 56, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320],
];
const BITRATES_V2: [[u32; 15]; 2] = [
    [0, 32, 48, 56, 64, 80, 96, 112, 128, 144, 160, 176, 192, 224, 256],
    [0, 8, 16, 24, 32, 40, 48, 56, 64, 80, 96, 112, 128, 144, 160],
];

impl FrameHeader {
    fn parse(bytes: &[u8]) -> Option<Self> {
        let &[b0, b1, b2, b3] = slice(bytes, 0, 4)? else {
            return None;
        };
        if b0 != 0xFF || b1 & 0xE0 != 0xE0 {
            return None;
        }
        let version = match (b1 >> 3) & 0x03 {
            0 => Version::V25,
            2 => Version::V2,
            3 => Version::V1,
            _ => return None,
        };
        let layer = match (b1 >> 1) & 0x03 {
            1 => 3,
            2 => 2,
            3 => 1,
            _ => return None,
        };
        let bitrate_index = usize::from(b2 >> 4);
        if bitrate_index == 0 || bitrate_index == 15 {
            return None;
        }
        let kbps = match version {
            Version::V1 => BITRATES_V1[usize::from(layer - 1)][bitrate_index],
            _ if layer == 1 => BITRATES_V2[0][bitrate_index],
            _ => BITRATES_V2[1][bitrate_index],
        };
        let base_rate = match (b2 >> 2) & 0x03 {
            0 => 44_100,
            1 => 48_000,
            2 => 32_000,
            _ => return None,
        };
        let sample_rate = match version {
            Version::V1 => base_rate,
            Version::V2 => base_rate / 2,
            Version::V25 => base_rate / 4,
        };
        Some(Self {
            version,
            layer,
            bitrate: kbps * 1000,
            sample_rate,
            padding: (b2 >> 1) & 0x01 == 1,
            channels: if b3 >> 6 == 3 { 1 } else { 2 },
        })
    }

    fn samples_per_frame(self) -> u32 {
        match (self.layer, self.version) {
            (1, _) => 384,
            (3, Version::V2 | Version::V25) => 576,
            _ => 1152,
        }
    }

    fn frame_len(self) -> usize {
        let body = self.samples_per_frame() / 8 * self.bitrate / self.sample_rate;
        let padding = match (self.padding, self.layer) {
            (false, _) => 0,
            (true, 1) => 4,
            (true, _) => 1,
        };
        body as usize + padding
    }

    /// Offset of a Xing/Info tag inside the first frame.
    fn xing_offset(self) -> usize {
        4 + match (self.version, self.channels) {
            (Version::V1, 1) => 17,
            (Version::V1, _) => 32,
            (_, 1) => 9,
            _ => 17,
        }
    }

    fn same_stream(self, other: Self) -> bool {
        self.version == other.version
            && self.layer == other.layer
            && self.sample_rate == other.sample_rate
    }
}

/// Total length of a leading ID3v2 tag, footer included.
fn id3v2_len(data: &[u8]) -> usize {
    if !data.starts_with(b"ID3") {
        return 0;
    }
    let Some(size) = slice(data, 6, 4)
        .map(|b| b.iter().fold(0usize, |acc, &x| (acc << 7) | usize::from(x & 0x7F)))
    else {
        return 0;
    };
    let footer = if u8_at(data, 5).unwrap_or_default() & 0x10 != 0 { 10 } else { 0 };
    (10 + size + footer).min(data.len())
}

fn id3v1_len(data: &[u8]) -> usize {
    match data.len().checked_sub(ID3V1_LEN) {
        Some(start) if data[start..].starts_with(b"TAG") => ID3V1_LEN,
        _ => 0,
    }
}

fn find_first_frame(audio: &[u8]) -> Option<(usize, FrameHeader)> {
    let limit = audio.len().min(SYNC_SEARCH_LIMIT);
    (0..limit).find_map(|pos| {
        let header = FrameHeader::parse(&audio[pos..])?;
        let next = pos + header.frame_len();
        let confirmed = next + 4 > audio.len()
            || FrameHeader::parse(&audio[next..]).is_some_and(|h| h.same_stream(header));
        confirmed.then_some((pos, header))
    })
}

impl Probe for Mp3Probe {
    fn name(&self) -> &'static str {
        "MPEG Audio"
    }

    fn sniff(&self, data: &[u8]) -> bool {
        data.starts_with(b"ID3") || FrameHeader::parse(data).is_some()
    }

    fn parse(&self, data: &[u8], table: &mut FieldTable) -> Result<(), ProbeError> {
        let mut demuxed = demux::open(data, "mp3")?;
        demuxed.add_id3v1(data);
        demuxed.apply_tags(table.general_mut());
        let params = demuxed
            .first_track()
            .ok_or_else(|| ProbeError::Malformed("no MPEG Audio frame found".into()))?;

        // Bit rate, version, layer and the Xing/Info tag are not exposed by the
        // demuxer, so the first frame header is read here.
        let start = id3v2_len(data);
        let end = data.len() - id3v1_len(&data[start..]);
        let audio = &data[start..end];
        let (offset, header) = find_first_frame(audio)
            .ok_or_else(|| ProbeError::Malformed("no MPEG Audio frame found".into()))?;
        trace!(offset, ?header, "First MPEG Audio frame");
        let audio = &audio[offset..];
        let stream_size = audio.len() as u64;

        let xing = header.xing_offset();
        let (mode, tagged_bytes) = match slice(audio, xing, 4) {
            Some(tag @ (b"Xing" | b"Info")) => {
                let flags = be_u32(audio, xing + 4).unwrap_or_default();
                let bytes_offset = if flags & 0x01 != 0 { xing + 12 } else { xing + 8 };
                let bytes = (flags & 0x02 != 0)
                    .then(|| be_u32(audio, bytes_offset))
                    .flatten()
                    .map_or(stream_size, u64::from);
                let mode = if tag == b"Xing" { "VBR" } else { "CBR" };
                (mode, Some(bytes))
            }
            _ => ("CBR", None),
        };

        // Without a frame count from the demuxer, assume a constant rate.
        let duration = demux::duration_ms(params).or_else(|| {
            stream_size
                .checked_mul(8000)
                .map(|bits| bits / u64::from(header.bitrate))
        });
        let bitrate = tagged_bytes
            .zip(duration)
            .and_then(|(bytes, ms)| bit_rate(bytes, ms))
            .unwrap_or(u64::from(header.bitrate));

        let version = match header.version {
            Version::V1 => "Version 1",
            Version::V2 => "Version 2",
            Version::V25 => "Version 2.5",
        };
        let stream = table.push_stream(StreamKind::Audio);
        demux::fill_audio(params, stream);
        stream
            .set("Format_Version", version)
            .set("Format_Profile", format!("Layer {}", header.layer))
            .set("BitRate_Mode", mode)
            .set("BitRate", bitrate)
            .set("StreamSize", stream_size);
        if let Some(ms) = duration {
            stream.set("Duration", ms);
        }
        table.general_mut().set("OverallBitRate_Mode", mode);
        Ok(())
    }
}
