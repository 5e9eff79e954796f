use crate::text::{EncodingError, WideString};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Narrow, byte-oriented text encodings understood at the engine boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
    Ascii,
}

// language[_territory][.codeset][@modifier]
static LOCALE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lang>[A-Za-z]+(?:_[A-Za-z0-9]+)?)?(?:\.(?P<codeset>[A-Za-z0-9_.:-]+))?(?:@[A-Za-z0-9_-]+)?$")
        .expect("locale pattern is valid")
});

impl Encoding {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "ASCII",
        }
    }

    /// Maps a POSIX locale name such as `en_US.UTF-8`, `de_DE.ISO-8859-1` or `C`
    /// to the encoding of its codeset.
    ///
    /// Returns `None` for malformed names and for codesets this crate does not
    /// convert. The empty locale and `C`/`POSIX` without a codeset map to ASCII.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let caps = LOCALE_PATTERN.captures(locale.trim())?;
        match caps.name("codeset") {
            Some(codeset) => codeset.as_str().parse().ok(),
            None => match caps.name("lang").map(|l| l.as_str()) {
                None | Some("C" | "POSIX") => Some(Self::Ascii),
                // Locales without an explicit codeset default to Latin-1 in glibc.
                Some(_) => Some(Self::Latin1),
            },
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "utf8" => Ok(Self::Utf8),
            "latin1" | "iso88591" | "l1" => Ok(Self::Latin1),
            "ascii" | "usascii" | "ansix3.41968" => Ok(Self::Ascii),
            _ => Err(format!("unsupported encoding: {s}")),
        }
    }
}

/// Converts caller text in `encoding` to the engine's wide representation.
pub fn to_engine_text(narrow: &[u8], encoding: Encoding) -> Result<WideString, EncodingError> {
    let units = match encoding {
        Encoding::Utf8 => std::str::from_utf8(narrow)
            .map_err(|e| EncodingError::InvalidSequence {
                encoding,
                offset: e.valid_up_to(),
            })?
            .encode_utf16()
            .collect(),
        Encoding::Latin1 => narrow.iter().map(|&b| u16::from(b)).collect(),
        Encoding::Ascii => {
            if let Some(offset) = narrow.iter().position(|b| !b.is_ascii()) {
                return Err(EncodingError::InvalidSequence { encoding, offset });
            }
            narrow.iter().map(|&b| u16::from(b)).collect()
        }
    };
    Ok(WideString::from_units(units))
}

/// Converts engine wide text back to caller text in `encoding`.
pub fn from_engine_text(wide: &[u16], encoding: Encoding) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(wide.len());
    let mut offset = 0;
    for decoded in char::decode_utf16(wide.iter().copied()) {
        let character = decoded.map_err(|_| EncodingError::UnpairedSurrogate { offset })?;
        offset += character.len_utf16();
        match encoding {
            Encoding::Utf8 => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(character.encode_utf8(&mut buf).as_bytes());
            }
            Encoding::Latin1 => {
                let byte = u8::try_from(u32::from(character))
                    .map_err(|_| EncodingError::Unrepresentable { encoding, character })?;
                out.push(byte);
            }
            Encoding::Ascii => {
                if !character.is_ascii() {
                    return Err(EncodingError::Unrepresentable { encoding, character });
                }
                out.push(character as u8);
            }
        }
    }
    Ok(out)
}
