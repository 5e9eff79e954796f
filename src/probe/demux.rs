//! Stream parameters and tags from symphonia's demuxers.
//!
//! Containers whose audio side symphonia understands (Wave, Ogg, MPEG Audio,
//! MPEG-4) are opened here, and the codec parameters of each track are
//! translated into raw fields. Packets are never read.
use crate::fields::Stream;
use crate::probe::ProbeError;
use std::io::Cursor;
use symphonia::core::codecs::{
    CODEC_TYPE_AAC, CODEC_TYPE_ADPCM_IMA_WAV, CODEC_TYPE_ADPCM_MS, CODEC_TYPE_ALAC,
    CODEC_TYPE_FLAC, CODEC_TYPE_MP1, CODEC_TYPE_MP2, CODEC_TYPE_MP3, CODEC_TYPE_NULL,
    CODEC_TYPE_OPUS, CODEC_TYPE_PCM_ALAW, CODEC_TYPE_PCM_F32LE, CODEC_TYPE_PCM_F64LE,
    CODEC_TYPE_PCM_MULAW, CODEC_TYPE_PCM_S8, CODEC_TYPE_PCM_S16BE, CODEC_TYPE_PCM_S16LE,
    CODEC_TYPE_PCM_S24LE, CODEC_TYPE_PCM_S32LE, CODEC_TYPE_PCM_U8, CODEC_TYPE_VORBIS,
    CodecParameters, CodecType,
};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{BufReader, MediaSourceStream};
use symphonia::core::meta::{MetadataBuilder, MetadataOptions, MetadataRevision, StandardTagKey};
use symphonia::core::probe::Hint;
use symphonia_metadata::id3v1;
use tracing::{debug, trace};

const ID3V1_LEN: usize = 128;

/// What the demuxer reported for one source.
#[derive(Debug, Default)]
pub struct Demuxed {
    /// `(track id, parameters)` for every track with a known codec.
    pub tracks: Vec<(u32, CodecParameters)>,
    /// General stream tags, first occurrence of each name wins.
    pub tags: Vec<(&'static str, String)>,
}

impl Demuxed {
    pub fn track(&self, id: u32) -> Option<&CodecParameters> {
        self.tracks
            .iter()
            .find(|(track_id, _)| *track_id == id)
            .map(|(_, params)| params)
    }

    pub fn first_track(&self) -> Option<&CodecParameters> {
        self.tracks.first().map(|(_, params)| params)
    }

    fn add_tags(&mut self, revision: &MetadataRevision) {
        for tag in revision.tags() {
            let name = match tag.std_key {
                Some(StandardTagKey::TrackTitle) => "Title",
                Some(StandardTagKey::Artist) => "Performer",
                Some(StandardTagKey::Album) => "Album",
                _ => continue,
            };
            if self.tags.iter().all(|(known, _)| *known != name) {
                let value = tag.value.to_string();
                self.tags
                    .push((name, value.trim_matches(['\0', ' ']).trim().to_owned()));
            }
        }
    }

    /// Tags of a trailing ID3v1 block, below everything found so far.
    pub fn add_id3v1(&mut self, data: &[u8]) {
        let Some(start) = data.len().checked_sub(ID3V1_LEN) else {
            return;
        };
        let mut builder = MetadataBuilder::new();
        match id3v1::read_id3v1(&mut BufReader::new(&data[start..]), &mut builder) {
            Ok(()) => self.add_tags(&builder.metadata()),
            Err(err) => trace!(%err, "No ID3v1 tag"),
        }
    }

    /// Writes the collected tags to the General stream.
    pub fn apply_tags(&self, general: &mut Stream) {
        for (name, value) in &self.tags {
            general.set_default(name, value);
        }
    }
}

/// Opens `data` with the demuxer registered for its signature. `extension`
/// is only a hint.
pub fn open(data: &[u8], extension: &str) -> Result<Demuxed, ProbeError> {
    let mut hint = Hint::new();
    hint.with_extension(extension);
    let source = MediaSourceStream::new(Box::new(Cursor::new(data.to_vec())), Default::default());
    let mut probed = symphonia::default::get_probe().format(
        &hint,
        source,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let mut demuxed = Demuxed::default();
    // Tags met before the container (leading ID3v2) rank above the container's own.
    if let Some(metadata) = probed.metadata.get()
        && let Some(revision) = metadata.current()
    {
        demuxed.add_tags(revision);
    }
    if let Some(revision) = probed.format.metadata().skip_to_latest() {
        demuxed.add_tags(revision);
    }
    demuxed.tracks = probed
        .format
        .tracks()
        .iter()
        .filter(|track| track.codec_params.codec != CODEC_TYPE_NULL)
        .map(|track| (track.id, track.codec_params.clone()))
        .collect();
    debug!(
        tracks = demuxed.tracks.len(),
        tags = demuxed.tags.len(),
        "Demuxer opened source"
    );
    Ok(demuxed)
}

/// `(Format, Format_Settings, lossless)` for a codec.
pub fn codec_info(codec: CodecType) -> (&'static str, Option<&'static str>, bool) {
    match codec {
        CODEC_TYPE_PCM_U8 => ("PCM", Some("Little / Unsigned"), true),
        CODEC_TYPE_PCM_S8 | CODEC_TYPE_PCM_S16LE | CODEC_TYPE_PCM_S24LE | CODEC_TYPE_PCM_S32LE => {
            ("PCM", Some("Little / Signed"), true)
        }
        CODEC_TYPE_PCM_S16BE => ("PCM", Some("Big / Signed"), true),
        CODEC_TYPE_PCM_F32LE | CODEC_TYPE_PCM_F64LE => ("PCM", Some("Float"), true),
        CODEC_TYPE_PCM_ALAW => ("A-law", None, false),
        CODEC_TYPE_PCM_MULAW => ("Mu-law", None, false),
        CODEC_TYPE_ADPCM_MS | CODEC_TYPE_ADPCM_IMA_WAV => ("ADPCM", None, false),
        CODEC_TYPE_MP1 | CODEC_TYPE_MP2 | CODEC_TYPE_MP3 => ("MPEG Audio", None, false),
        CODEC_TYPE_AAC => ("AAC", None, false),
        CODEC_TYPE_VORBIS => ("Vorbis", None, false),
        CODEC_TYPE_OPUS => ("Opus", None, false),
        CODEC_TYPE_FLAC => ("FLAC", None, true),
        CODEC_TYPE_ALAC => ("ALAC", None, true),
        _ => ("Unknown", None, false),
    }
}

/// Wave format tag for a codec, as MediaInfo prints it in `CodecID`.
pub fn wave_codec_id(codec: CodecType) -> Option<&'static str> {
    Some(match codec {
        CODEC_TYPE_PCM_U8 | CODEC_TYPE_PCM_S16LE | CODEC_TYPE_PCM_S24LE | CODEC_TYPE_PCM_S32LE => {
            "1"
        }
        CODEC_TYPE_ADPCM_MS => "2",
        CODEC_TYPE_PCM_F32LE | CODEC_TYPE_PCM_F64LE => "3",
        CODEC_TYPE_PCM_ALAW => "6",
        CODEC_TYPE_PCM_MULAW => "7",
        CODEC_TYPE_ADPCM_IMA_WAV => "11",
        _ => return None,
    })
}

/// Width of one coded sample, for codecs that store samples directly.
fn implied_bits(codec: CodecType) -> Option<u32> {
    Some(match codec {
        CODEC_TYPE_PCM_U8 | CODEC_TYPE_PCM_S8 | CODEC_TYPE_PCM_ALAW | CODEC_TYPE_PCM_MULAW => 8,
        CODEC_TYPE_PCM_S16LE | CODEC_TYPE_PCM_S16BE => 16,
        CODEC_TYPE_PCM_S24LE => 24,
        CODEC_TYPE_PCM_S32LE | CODEC_TYPE_PCM_F32LE => 32,
        CODEC_TYPE_PCM_F64LE => 64,
        _ => return None,
    })
}

/// Significant bits per sample.
pub fn bit_depth(params: &CodecParameters) -> Option<u32> {
    params.bits_per_sample.or_else(|| implied_bits(params.codec))
}

/// Bits each sample occupies in the stream, padding included.
pub fn coded_bits(params: &CodecParameters) -> Option<u32> {
    params
        .bits_per_coded_sample
        .or_else(|| implied_bits(params.codec))
}

pub fn channels(params: &CodecParameters) -> Option<usize> {
    params.channels.map(|channels| channels.count())
}

/// Playable length in milliseconds: frames minus encoder delay and padding.
pub fn duration_ms(params: &CodecParameters) -> Option<u64> {
    let frames = params.n_frames?;
    let trimmed = frames
        .saturating_sub(params.delay.map_or(0, u64::from))
        .saturating_sub(params.padding.map_or(0, u64::from));
    let ms = match params.time_base {
        Some(base) if base.denom > 0 => {
            u128::from(trimmed) * u128::from(base.numer) * 1000 / u128::from(base.denom)
        }
        _ => {
            let rate = params.sample_rate.filter(|rate| *rate > 0)?;
            u128::from(trimmed) * 1000 / u128::from(rate)
        }
    };
    u64::try_from(ms).ok()
}

/// Fields every audio track shares. Container specific fields are left to
/// the caller.
pub fn fill_audio(params: &CodecParameters, stream: &mut Stream) {
    let (format, settings, lossless) = codec_info(params.codec);
    stream.set("Format", format);
    if let Some(settings) = settings {
        stream.set("Format_Settings", settings);
    }
    if let Some(channels) = channels(params) {
        stream.set("Channel(s)", channels);
    }
    if let Some(rate) = params.sample_rate {
        stream.set("SamplingRate", rate);
    }
    if let Some(bits) = bit_depth(params) {
        stream.set("BitDepth", bits);
    }
    if let Some(frames) = params.n_frames {
        stream.set("SamplingCount", frames);
    }
    if let Some(ms) = duration_ms(params) {
        stream.set("Duration", ms);
    }
    stream.set(
        "Compression_Mode",
        if lossless { "Lossless" } else { "Lossy" },
    );
}
