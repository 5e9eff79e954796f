use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The logical stream a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StreamKind {
    General,
    Video,
    Audio,
    Text,
    Other,
    Image,
    Menu,
}

impl StreamKind {
    pub const ALL: [Self; 7] = [
        Self::General,
        Self::Video,
        Self::Audio,
        Self::Text,
        Self::Other,
        Self::Image,
        Self::Menu,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Text => "Text",
            Self::Other => "Other",
            Self::Image => "Image",
            Self::Menu => "Menu",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown stream kind: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// One stream's fields, in the order they were discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stream {
    pub kind: StreamKind,
    fields: Vec<Field>,
}

impl Stream {
    pub const fn new(kind: StreamKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
        }
    }

    /// Sets a field, replacing an earlier value under the same name. An empty
    /// value is stored too: a tag that is present but blank differs from one
    /// that is missing.
    pub fn set(&mut self, name: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => field.value = value,
            None => self.fields.push(Field {
                name: name.to_owned(),
                value,
            }),
        }
        self
    }

    /// Sets a field only when it is not present yet.
    pub fn set_default(&mut self, name: &str, value: impl ToString) -> &mut Self {
        if self.get(name).is_none() {
            self.set(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Everything an engine learned about one source. Always holds a General
/// stream at position zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    streams: Vec<Stream>,
}

impl Default for FieldTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldTable {
    /// Creates a table holding only the General stream.
    pub fn new() -> Self {
        Self {
            streams: vec![Stream::new(StreamKind::General)],
        }
    }

    pub fn general(&self) -> &Stream {
        &self.streams[0]
    }

    pub fn general_mut(&mut self) -> &mut Stream {
        &mut self.streams[0]
    }

    /// Appends a new stream of `kind` and returns it for filling in.
    pub fn push_stream(&mut self, kind: StreamKind) -> &mut Stream {
        self.streams.push(Stream::new(kind));
        let last = self.streams.len() - 1;
        &mut self.streams[last]
    }

    pub fn stream(&self, kind: StreamKind, index: usize) -> Option<&Stream> {
        self.streams.iter().filter(|s| s.kind == kind).nth(index)
    }

    pub fn stream_mut(&mut self, kind: StreamKind, index: usize) -> Option<&mut Stream> {
        self.streams.iter_mut().filter(|s| s.kind == kind).nth(index)
    }

    pub fn count(&self, kind: StreamKind) -> usize {
        self.streams.iter().filter(|s| s.kind == kind).count()
    }

    pub fn get(&self, kind: StreamKind, index: usize, name: &str) -> Option<&str> {
        self.stream(kind, index).and_then(|s| s.get(name))
    }

    /// Streams grouped by kind in [`StreamKind::ALL`] order, each with its
    /// index within the kind.
    pub fn streams(&self) -> impl Iterator<Item = (usize, &Stream)> {
        StreamKind::ALL.into_iter().flat_map(move |kind| {
            self.streams
                .iter()
                .filter(move |s| s.kind == kind)
                .enumerate()
        })
    }

    pub fn streams_mut(&mut self) -> impl Iterator<Item = &mut Stream> {
        self.streams.iter_mut()
    }
}
