//! # Media Inspector
//!
//! Read technical metadata from media files and in-memory buffers.
//!
//! This crate answers the questions a media player or an upload pipeline asks
//! before touching a single frame: which container, which codecs, how long, how
//! many streams, at what bit rate and resolution.
//!
//! ## Key Features
//!
//! - **Sessions**: Open a file, a buffer or any [`std::io::Read`], query fields, close, reopen.
//! - **Named Fields**: Look up fields such as `Duration`, `Width` or `SamplingRate` per stream kind and index.
//! - **Reports**: Render everything as a text report, as JSON or through a `Kind;%Field%` template.
//! - **Explicit Encodings**: Every argument and answer crosses a narrow/wide text boundary in a configured [`Encoding`], with conversion failures reported as errors.
//! - **Built-in Probes**: Header readers for MPEG-4/QuickTime, Wave, Ogg, MPEG Audio and PNG.
//!
//! ## Usage
//!
//! Create a [`Session`], open a source and ask for fields by name.
//!
//! ```rust,no_run
//! use media_inspector::{Session, StreamKind};
//!
//! fn main() -> color_eyre::Result<()> {
//!     let mut session = Session::default();
//!     session.open_file("assets/sample.mp4")?;
//!
//!     println!("Duration: {} ms", session.get("Duration")?);
//!     println!("Width: {}", session.get_stream(StreamKind::Video, "Width")?);
//!
//!     session.set_option("Output", "JSON")?;
//!     println!("{}", session.full_report()?);
//!
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod engine;
mod error;
pub mod fields;
pub mod probe;
pub mod report;
mod session;
pub mod text;

#[cfg(test)]
mod testdata;

pub use batch::{inspect_file_with_timeout, inspect_many};
pub use engine::{BuiltinEngine, InspectionEngine};
pub use error::InspectError;
pub use fields::StreamKind;
pub use probe::ProbeError;
pub use report::ReportFormat;
pub use session::{Session, Source};
pub use text::{Encoding, EncodingError, NarrowText, WideString};
