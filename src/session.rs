use crate::engine::{BuiltinEngine, EngineConfig, InspectionEngine};
use crate::error::InspectError;
use crate::fields::StreamKind;
use crate::report::ReportFormat;
use crate::text::{Encoding, NarrowText, WideString, from_engine_text, to_engine_text};
use bon::bon;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Size of the chunks [`Session::open_reader`] hands to the engine.
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// What a loaded session was opened from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Buffer { len: u64 },
}

/// One inspection context bound to at most one source at a time.
///
/// A session owns an [`InspectionEngine`] and the narrow [`Encoding`] its caller
/// speaks. Every text argument is converted from that encoding to the engine's
/// wide text on the way in, and every answer is converted back on the way out.
///
/// Queries never fail for missing data: an unloaded session, an unknown stream
/// or an unknown field all answer with empty text. The only query error is a
/// text conversion failure.
///
/// ```rust
/// # use media_inspector::{InspectError, Session, StreamKind};
/// # fn main() -> Result<(), InspectError> {
/// let mut session = Session::default();
/// assert!(session.get("Duration")?.is_empty());
///
/// // Nothing is open yet, so the report is empty too.
/// assert!(session.full_report()?.is_empty());
/// assert_eq!(session.count(StreamKind::Audio), 0);
/// # Ok(())
/// # }
/// ```
///
/// Dropping the session releases the engine and everything it analyzed.
pub struct Session<E: InspectionEngine = BuiltinEngine> {
    engine: E,
    encoding: Encoding,
    source: Option<Source>,
}

#[bon]
impl Session<BuiltinEngine> {
    /// Constructs a `Session` on the built-in engine via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `encoding: Encoding` - (Default: UTF-8) The encoding of every text argument and answer.
    /// * `complete: bool` - (Default: `false`) Whether reports list every stored field
    ///   rather than the curated set.
    /// * `report_format: ReportFormat` - (Default: text) The layout of [`Session::full_report`].
    ///
    /// # Example
    ///
    /// ```rust
    /// # use media_inspector::{Encoding, ReportFormat, Session};
    /// let session = Session::builder()
    ///     .encoding(Encoding::Latin1)
    ///     .report_format(ReportFormat::Json)
    ///     .build();
    /// assert_eq!(session.encoding(), Encoding::Latin1);
    /// ```
    #[builder]
    pub fn new(
        #[builder(default)] encoding: Encoding,
        #[builder(default)] complete: bool,
        #[builder(default)] report_format: ReportFormat,
    ) -> Self {
        let config = EngineConfig {
            report: report_format,
            complete,
        };
        Self::with_engine(BuiltinEngine::new(config), encoding)
    }

    /// Opens and analyzes the file at `path` in a fresh UTF-8 session.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InspectError> {
        let mut session = Self::default();
        session.open_path(path)?;
        Ok(session)
    }

    /// Reads `reader` to the end and analyzes it in a fresh UTF-8 session.
    pub fn read(reader: impl Read) -> Result<Self, InspectError> {
        let mut session = Self::default();
        session.open_reader(reader)?;
        Ok(session)
    }
}

impl Default for Session<BuiltinEngine> {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl<E: InspectionEngine> Session<E> {
    pub fn with_engine(engine: E, encoding: Encoding) -> Self {
        Self {
            engine,
            encoding,
            source: None,
        }
    }

    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub const fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub const fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    fn to_engine(&self, text: &[u8]) -> Result<WideString, InspectError> {
        Ok(to_engine_text(text, self.encoding)?)
    }

    fn to_caller(&self, wide: &[u16]) -> Result<NarrowText, InspectError> {
        let bytes = from_engine_text(wide, self.encoding)?;
        Ok(NarrowText::new(bytes, self.encoding))
    }

    fn ensure_unloaded(&self) -> Result<(), InspectError> {
        match self.source {
            Some(_) => Err(InspectError::AlreadyLoaded),
            None => Ok(()),
        }
    }

    /// Opens the file named by `path`, given as text in the session encoding.
    ///
    /// # Errors
    ///
    /// * [`InspectError::AlreadyLoaded`]: a source is open; [`Session::close`] it first.
    /// * [`InspectError::Encoding`]: `path` is not valid in the session encoding.
    /// * [`InspectError::OpenFile`]: the file is missing, unreadable or not a recognized format.
    ///
    /// The session stays unloaded on every error.
    pub fn open_file(&mut self, path: impl AsRef<[u8]>) -> Result<(), InspectError> {
        self.ensure_unloaded()?;
        let wide = self.to_engine(path.as_ref())?;
        let path = PathBuf::from(wide.to_string_lossy());
        self.load_file(&wide, path)
    }

    /// Opens a native path. Paths that are not valid Unicode are rejected with
    /// [`InspectError::Encoding`], as the engine addresses files by wide text.
    pub fn open_path(&mut self, path: impl AsRef<Path>) -> Result<(), InspectError> {
        self.ensure_unloaded()?;
        let path = path.as_ref();
        let wide = to_engine_text(path.as_os_str().as_encoded_bytes(), Encoding::Utf8)?;
        self.load_file(&wide, path.to_path_buf())
    }

    fn load_file(&mut self, wide: &[u16], path: PathBuf) -> Result<(), InspectError> {
        match self.engine.open(wide) {
            Ok(()) => {
                debug!(path = %path.display(), "Opened source file");
                self.source = Some(Source::File(path));
                Ok(())
            }
            Err(source) => {
                warn!(path = %path.display(), error = %source, "Failed to open source file");
                self.engine.close();
                Err(InspectError::OpenFile { path, source })
            }
        }
    }

    /// Analyzes an in-memory buffer through the engine's init, continue and
    /// finalize steps.
    ///
    /// # Errors
    ///
    /// * [`InspectError::EmptyBuffer`]: `bytes` is empty; the engine is not called.
    /// * [`InspectError::OpenBuffer`]: the engine does not recognize the data.
    pub fn open_buffer(&mut self, bytes: &[u8]) -> Result<(), InspectError> {
        self.ensure_unloaded()?;
        if bytes.is_empty() {
            return Err(InspectError::EmptyBuffer);
        }
        self.engine.open_buffer_init(bytes.len() as u64);
        self.engine.open_buffer_continue(bytes);
        self.finalize_buffer(bytes.len() as u64)
    }

    /// Streams `reader` to the engine in chunks, then analyzes the whole.
    pub fn open_reader(&mut self, mut reader: impl Read) -> Result<(), InspectError> {
        self.ensure_unloaded()?;
        self.engine.open_buffer_init(0);
        let mut chunk = vec![0u8; READ_CHUNK_SIZE];
        let mut total = 0u64;
        loop {
            let read = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.engine.close();
                    return Err(e.into());
                }
            };
            trace!(bytes = read, "Read chunk");
            self.engine.open_buffer_continue(&chunk[..read]);
            total += read as u64;
        }
        if total == 0 {
            self.engine.close();
            return Err(InspectError::EmptyBuffer);
        }
        self.finalize_buffer(total)
    }

    fn finalize_buffer(&mut self, len: u64) -> Result<(), InspectError> {
        match self.engine.open_buffer_finalize() {
            Ok(()) => {
                debug!(bytes = len, "Opened source buffer");
                self.source = Some(Source::Buffer { len });
                Ok(())
            }
            Err(source) => {
                warn!(bytes = len, error = %source, "Failed to open source buffer");
                self.engine.close();
                Err(InspectError::OpenBuffer(source))
            }
        }
    }

    /// Unloads the source. Options and the encoding are kept and the session
    /// can open another source.
    pub fn close(&mut self) {
        self.engine.close();
        if let Some(source) = self.source.take() {
            debug!(?source, "Closed source");
        }
    }

    /// Field `name` of the General stream.
    pub fn get(&self, name: impl AsRef<[u8]>) -> Result<NarrowText, InspectError> {
        self.get_at(StreamKind::General, 0, name)
    }

    /// Field `name` of the first stream of `kind`.
    pub fn get_stream(
        &self,
        kind: StreamKind,
        name: impl AsRef<[u8]>,
    ) -> Result<NarrowText, InspectError> {
        self.get_at(kind, 0, name)
    }

    /// Field `name` of stream `index` of `kind`, empty when absent.
    pub fn get_at(
        &self,
        kind: StreamKind,
        index: usize,
        name: impl AsRef<[u8]>,
    ) -> Result<NarrowText, InspectError> {
        Ok(self
            .lookup(kind, index, name)?
            .unwrap_or(NarrowText::empty(self.encoding)))
    }

    /// Like [`Session::get_at`], but `None` when the field does not exist, so
    /// absence can be told apart from an empty value.
    pub fn lookup(
        &self,
        kind: StreamKind,
        index: usize,
        name: impl AsRef<[u8]>,
    ) -> Result<Option<NarrowText>, InspectError> {
        let name = self.to_engine(name.as_ref())?;
        if !self.is_loaded() {
            return Ok(None);
        }
        self.engine
            .lookup(kind, index, &name)
            .map(|value| self.to_caller(&value))
            .transpose()
    }

    /// Number of streams of `kind`, zero when nothing is open.
    pub fn count(&self, kind: StreamKind) -> usize {
        if self.is_loaded() {
            self.engine.count(kind)
        } else {
            0
        }
    }

    /// Sets or queries an engine option and returns its answer: empty for
    /// success, otherwise a value or an error message such as
    /// `Option not known`.
    pub fn set_option(
        &mut self,
        name: impl AsRef<[u8]>,
        value: impl AsRef<[u8]>,
    ) -> Result<NarrowText, InspectError> {
        let name = self.to_engine(name.as_ref())?;
        let value = self.to_engine(value.as_ref())?;
        let answer = self.engine.option(&name, &value);
        self.to_caller(&answer)
    }

    /// Every known field of every stream in the configured output format.
    /// Empty when nothing is open.
    pub fn full_report(&self) -> Result<NarrowText, InspectError> {
        if !self.is_loaded() {
            return Ok(NarrowText::empty(self.encoding));
        }
        self.to_caller(&self.engine.inform())
    }

    /// General `Duration` in milliseconds.
    pub fn duration_ms(&self) -> Result<Option<u64>, InspectError> {
        Ok(self.get("Duration")?.parse())
    }

    /// General `Format`, the container format name.
    pub fn format(&self) -> Result<NarrowText, InspectError> {
        self.get("Format")
    }

    /// Same as [`Session::format`]; kept for callers that ask for the codec of
    /// a whole file.
    pub fn codec(&self) -> Result<NarrowText, InspectError> {
        self.format()
    }

    /// Every parameter the engine knows with its description.
    pub fn available_parameters(&mut self) -> Result<NarrowText, InspectError> {
        self.set_option("Info_Parameters", "")
    }
}

impl<E: InspectionEngine> Drop for Session<E> {
    fn drop(&mut self) {
        if self.source.is_some() {
            self.close();
        }
    }
}
