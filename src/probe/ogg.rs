use crate::fields::{FieldTable, Stream, StreamKind};
use crate::probe::demux;
use crate::probe::reader::{be_u32, le_u32, slice, u8_at};
use crate::probe::{Probe, ProbeError};
use symphonia::core::codecs::{CODEC_TYPE_OPUS, CODEC_TYPE_VORBIS, CodecParameters};
use tracing::{trace, warn};

const BEGINNING_OF_STREAM: u8 = 0x02;

pub struct OggProbe;

/// `(serial, identification packet)` for each logical stream. Beginning of
/// stream pages come first and carry nothing but that packet.
fn identification_packets(mut data: &[u8]) -> Vec<(u32, &[u8])> {
    let mut out = Vec::new();
    while data.starts_with(b"OggS") {
        let (Some(header_type), Some(serial), Some(segments)) =
            (u8_at(data, 5), le_u32(data, 14), u8_at(data, 26))
        else {
            break;
        };
        if header_type & BEGINNING_OF_STREAM == 0 {
            break;
        }
        let segments = usize::from(segments);
        let Some(lacing) = slice(data, 27, segments) else {
            break;
        };
        let body_len: usize = lacing.iter().map(|&l| usize::from(l)).sum();
        let Some(body) = slice(data, 27 + segments, body_len) else {
            break;
        };
        out.push((serial, body));
        data = &data[27 + segments + body_len..];
    }
    out
}

fn be_u24(data: &[u8], offset: usize) -> Option<u32> {
    slice(data, offset, 3).map(|b| u32::from_be_bytes([0, b[0], b[1], b[2]]))
}

/// Theora has no audio demuxer mapping, so its header is read here.
fn read_theora(serial: u32, header: &[u8], video: &mut Stream) {
    video.set("ID", serial).set("Format", "Theora");
    if let (Some(w), Some(h)) = (be_u24(header, 14), be_u24(header, 17)) {
        video.set("Width", w).set("Height", h);
    }
    if let (Some(num), Some(den)) = (be_u32(header, 22), be_u32(header, 26))
        && den > 0
    {
        video.set("FrameRate", format!("{:.3}", f64::from(num) / f64::from(den)));
    }
}

/// Bit rate fields from the Vorbis identification header, which leads the
/// codec's extra data.
fn read_vorbis_rates(params: &CodecParameters, audio: &mut Stream) {
    let Some(ident) = params.extra_data.as_deref() else {
        return;
    };
    let maximum = le_u32(ident, 16).unwrap_or_default();
    let nominal = le_u32(ident, 20).unwrap_or_default();
    let minimum = le_u32(ident, 24).unwrap_or_default();
    let mode = if maximum == nominal && minimum == nominal { "CBR" } else { "VBR" };
    audio.set("BitRate_Mode", mode);
    if nominal > 0 && nominal != u32::MAX {
        audio.set("BitRate", nominal);
    }
}

impl Probe for OggProbe {
    fn name(&self) -> &'static str {
        "Ogg"
    }

    fn sniff(&self, data: &[u8]) -> bool {
        data.starts_with(b"OggS")
    }

    fn parse(&self, data: &[u8], table: &mut FieldTable) -> Result<(), ProbeError> {
        let streams = identification_packets(data);
        if streams.is_empty() {
            return Err(ProbeError::Malformed("Ogg without a beginning-of-stream page".into()));
        }
        for (serial, header) in &streams {
            if header.starts_with(b"\x80theora") {
                read_theora(*serial, header, table.push_stream(StreamKind::Video));
            } else {
                trace!(serial, "Ogg logical stream left to the demuxer");
            }
        }

        let demuxed = match demux::open(data, "ogg") {
            Ok(demuxed) => demuxed,
            // A video-only file has no stream the demuxer can map.
            Err(err) if table.count(StreamKind::Video) > 0 => {
                warn!(%err, "No readable audio in Ogg file");
                return Ok(());
            }
            Err(err) => return Err(err),
        };
        demuxed.apply_tags(table.general_mut());
        for (id, params) in &demuxed.tracks {
            let audio = table.push_stream(StreamKind::Audio);
            audio.set("ID", id);
            demux::fill_audio(params, audio);
            match params.codec {
                CODEC_TYPE_VORBIS => read_vorbis_rates(params, audio),
                CODEC_TYPE_OPUS => {
                    audio.set("BitRate_Mode", "VBR");
                }
                _ => {}
            }
        }
        Ok(())
    }
}
