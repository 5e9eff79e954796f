//! Conversion between the caller's narrow text and the engine's wide text.
//!
//! The inspection engine speaks UTF-16. Callers speak bytes in a configured
//! [`Encoding`]. Every argument crosses [`to_engine_text`] on the way in and
//! every result crosses [`from_engine_text`] on the way out.
mod encoding;
pub mod error;
mod narrow;
mod wide;

pub use encoding::{Encoding, from_engine_text, to_engine_text};
pub use error::EncodingError;
pub use narrow::NarrowText;
pub use wide::WideString;
