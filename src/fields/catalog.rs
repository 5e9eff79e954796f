use crate::fields::StreamKind;

/// A field the built-in engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    pub name: &'static str,
    /// Label in the text report; `None` keeps the field out of the curated view.
    pub label: Option<&'static str>,
    pub description: &'static str,
}

const fn shown(name: &'static str, label: &'static str, description: &'static str) -> Parameter {
    Parameter {
        name,
        label: Some(label),
        description,
    }
}

const fn hidden(name: &'static str, description: &'static str) -> Parameter {
    Parameter {
        name,
        label: None,
        description,
    }
}

const COMMON: [Parameter; 3] = [
    hidden("StreamKind", "Stream type name"),
    hidden("StreamKindID", "Number of the stream within its kind (base=0)"),
    hidden("StreamCount", "Count of streams of this kind"),
];

const GENERAL: &[Parameter] = &[
    shown("CompleteName", "Complete name", "Complete name (folder + name + extension)"),
    hidden("FolderName", "Folder name only"),
    hidden("FileName", "File name only, without extension"),
    hidden("FileExtension", "File extension only"),
    shown("Format", "Format", "Container format"),
    shown("Format_Profile", "Format profile", "Profile of the container format"),
    shown("CodecID", "Codec ID", "Brand or codec identifier of the container"),
    shown("FileSize", "File size", "File size in bytes"),
    shown("Duration", "Duration", "Play time of the file in ms"),
    shown(
        "OverallBitRate_Mode",
        "Overall bit rate mode",
        "Bit rate mode of all streams (VBR, CBR)",
    ),
    shown("OverallBitRate", "Overall bit rate", "Bit rate of all streams in bps"),
    shown("Title", "Title", "Title of the file"),
    shown("Album", "Album", "Name of the album"),
    shown("Performer", "Performer", "Main performer of the track"),
    shown("Encoded_Date", "Encoded date", "UTC time the file was created"),
    hidden("VideoCount", "Count of video streams"),
    hidden("AudioCount", "Count of audio streams"),
    hidden("TextCount", "Count of text streams"),
    hidden("OtherCount", "Count of other streams"),
    hidden("ImageCount", "Count of image streams"),
    hidden("MenuCount", "Count of menu streams"),
];

const VIDEO: &[Parameter] = &[
    shown("ID", "ID", "Track identifier in the container"),
    shown("Format", "Format", "Format used"),
    shown("Format_Profile", "Format profile", "Profile of the format"),
    shown("CodecID", "Codec ID", "Codec identifier as found in the container"),
    shown("Duration", "Duration", "Play time of the stream in ms"),
    shown("BitRate", "Bit rate", "Bit rate in bps"),
    shown("Width", "Width", "Width in pixels"),
    shown("Height", "Height", "Height in pixels"),
    shown("DisplayAspectRatio", "Display aspect ratio", "Width divided by height"),
    shown("FrameRate", "Frame rate", "Frames per second"),
    hidden("FrameCount", "Number of frames"),
    shown("BitDepth", "Bit depth", "Bits per pixel component"),
    shown("StreamSize", "Stream size", "Stream size in bytes"),
    shown("Language", "Language", "Language code"),
];

const AUDIO: &[Parameter] = &[
    shown("ID", "ID", "Track identifier in the container"),
    shown("Format", "Format", "Format used"),
    shown("Format_Version", "Format version", "Version of the format"),
    shown("Format_Profile", "Format profile", "Profile of the format"),
    shown("Format_Settings", "Format settings", "Settings needed for decoding"),
    shown("CodecID", "Codec ID", "Codec identifier as found in the container"),
    shown("Duration", "Duration", "Play time of the stream in ms"),
    shown("BitRate_Mode", "Bit rate mode", "Bit rate mode (VBR, CBR)"),
    shown("BitRate", "Bit rate", "Bit rate in bps"),
    shown("Channel(s)", "Channel(s)", "Number of channels"),
    shown("SamplingRate", "Sampling rate", "Sampling rate in Hz"),
    hidden("SamplingCount", "Number of samples per channel"),
    shown("BitDepth", "Bit depth", "Resolution in bits per sample"),
    shown("Compression_Mode", "Compression mode", "Lossy or Lossless"),
    shown("StreamSize", "Stream size", "Stream size in bytes"),
    shown("Language", "Language", "Language code"),
];

const TEXT: &[Parameter] = &[
    shown("ID", "ID", "Track identifier in the container"),
    shown("Format", "Format", "Format used"),
    shown("CodecID", "Codec ID", "Codec identifier as found in the container"),
    shown("Duration", "Duration", "Play time of the stream in ms"),
    shown("Language", "Language", "Language code"),
];

const OTHER: &[Parameter] = &[
    shown("ID", "ID", "Track identifier in the container"),
    shown("Type", "Type", "Kind of data carried"),
    shown("Format", "Format", "Format used"),
    shown("Duration", "Duration", "Play time of the stream in ms"),
];

const IMAGE: &[Parameter] = &[
    shown("Format", "Format", "Format used"),
    shown("Width", "Width", "Width in pixels"),
    shown("Height", "Height", "Height in pixels"),
    shown("ColorSpace", "Color space", "Color components (RGB, Y, ...)"),
    shown("BitDepth", "Bit depth", "Bits per pixel component"),
    shown("Compression_Mode", "Compression mode", "Lossy or Lossless"),
];

const MENU: &[Parameter] = &[
    shown("ID", "ID", "Track identifier in the container"),
    shown("Format", "Format", "Format used"),
];

/// Parameters of a stream kind, in report order, followed by the ones every
/// stream carries.
pub fn parameters(kind: StreamKind) -> impl Iterator<Item = &'static Parameter> {
    let specific = match kind {
        StreamKind::General => GENERAL,
        StreamKind::Video => VIDEO,
        StreamKind::Audio => AUDIO,
        StreamKind::Text => TEXT,
        StreamKind::Other => OTHER,
        StreamKind::Image => IMAGE,
        StreamKind::Menu => MENU,
    };
    specific.iter().chain(COMMON.iter())
}

/// The `Info_Parameters` listing: every kind with its parameters and what
/// they mean.
pub fn describe_parameters() -> String {
    let mut out = String::new();
    for kind in StreamKind::ALL {
        out.push_str(kind.as_str());
        out.push('\n');
        for parameter in parameters(kind) {
            out.push_str(&format!("{:<41}: {}\n", parameter.name, parameter.description));
        }
        out.push('\n');
    }
    out
}
