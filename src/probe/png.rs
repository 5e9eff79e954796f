use crate::fields::{FieldTable, StreamKind};
use crate::probe::reader::{be_u32, slice, u8_at};
use crate::probe::{Probe, ProbeError};

const SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

pub struct PngProbe;

impl Probe for PngProbe {
    fn name(&self) -> &'static str {
        "PNG"
    }

    fn sniff(&self, data: &[u8]) -> bool {
        data.starts_with(SIGNATURE)
    }

    fn parse(&self, data: &[u8], table: &mut FieldTable) -> Result<(), ProbeError> {
        // The first chunk must be IHDR: length(4) type(4) data(13).
        if slice(data, 12, 4) != Some(&b"IHDR"[..]) {
            return Err(ProbeError::Malformed("PNG without leading IHDR chunk".into()));
        }
        let ihdr = slice(data, 16, 13).ok_or(ProbeError::Truncated("PNG header"))?;
        let width = be_u32(ihdr, 0).unwrap_or_default();
        let height = be_u32(ihdr, 4).unwrap_or_default();
        let bit_depth = u8_at(ihdr, 8).unwrap_or_default();
        let color_space = match u8_at(ihdr, 9) {
            Some(0) => "Y",
            Some(2 | 3) => "RGB",
            Some(4) => "YA",
            Some(6) => "RGBA",
            _ => return Err(ProbeError::Malformed("unknown PNG color type".into())),
        };

        table
            .push_stream(StreamKind::Image)
            .set("Format", "PNG")
            .set("Width", width)
            .set("Height", height)
            .set("ColorSpace", color_space)
            .set("BitDepth", bit_depth)
            .set("Compression_Mode", "Lossless");
        Ok(())
    }
}
