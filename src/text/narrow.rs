use crate::text::Encoding;
use std::borrow::Cow;
use std::fmt;

/// Text returned to the caller, as bytes in the session's [`Encoding`].
///
/// An empty value means "unknown or absent"; see [`crate::Session::lookup`] for
/// a query that tells the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrowText {
    bytes: Vec<u8>,
    encoding: Encoding,
}

impl NarrowText {
    pub const fn new(bytes: Vec<u8>, encoding: Encoding) -> Self {
        Self { bytes, encoding }
    }

    pub const fn empty(encoding: Encoding) -> Self {
        Self::new(Vec::new(), encoding)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Decodes the bytes for display. Latin-1 is always decodable; UTF-8 and
    /// ASCII values produced by a session are valid by construction.
    pub fn to_str(&self) -> Cow<'_, str> {
        match self.encoding {
            Encoding::Utf8 | Encoding::Ascii => String::from_utf8_lossy(&self.bytes),
            Encoding::Latin1 => Cow::Owned(self.bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Parses the value as a number, `None` when empty or not numeric.
    pub fn parse<T: std::str::FromStr>(&self) -> Option<T> {
        self.to_str().trim().parse().ok()
    }
}

impl fmt::Display for NarrowText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

impl PartialEq<str> for NarrowText {
    fn eq(&self, other: &str) -> bool {
        self.to_str() == other
    }
}

impl PartialEq<&str> for NarrowText {
    fn eq(&self, other: &&str) -> bool {
        self.to_str() == *other
    }
}
