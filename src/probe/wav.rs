use crate::fields::{FieldTable, StreamKind};
use crate::probe::demux;
use crate::probe::reader::slice;
use crate::probe::{Probe, ProbeError};
use symphonia::core::codecs::CODEC_TYPE_NULL;
use tracing::trace;

pub struct WavProbe;

impl Probe for WavProbe {
    fn name(&self) -> &'static str {
        "Wave"
    }

    fn sniff(&self, data: &[u8]) -> bool {
        data.starts_with(b"RIFF") && slice(data, 8, 4) == Some(&b"WAVE"[..])
    }

    fn parse(&self, data: &[u8], table: &mut FieldTable) -> Result<(), ProbeError> {
        let demuxed = demux::open(data, "wav")?;
        let params = demuxed
            .first_track()
            .filter(|params| params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| ProbeError::Malformed("Wave without a usable fmt chunk".into()))?;
        trace!(?params, "Wave format");
        demuxed.apply_tags(table.general_mut());

        let audio = table.push_stream(StreamKind::Audio);
        demux::fill_audio(params, audio);
        audio.set("BitRate_Mode", "CBR");
        if let Some(id) = demux::wave_codec_id(params.codec) {
            audio.set("CodecID", id);
        }

        // Codecs storing plain samples: size and rate follow from the layout.
        if let (Some(bits), Some(channels), Some(rate)) = (
            demux::coded_bits(params),
            demux::channels(params),
            params.sample_rate,
        ) {
            let channels = channels as u64;
            audio.set("BitRate", u64::from(rate) * u64::from(bits) * channels);
            if let Some(frames) = params.n_frames {
                audio.set("StreamSize", frames.saturating_mul(u64::from(bits) / 8 * channels));
            }
        }
        table.general_mut().set("OverallBitRate_Mode", "CBR");
        Ok(())
    }
}
