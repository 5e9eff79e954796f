use crate::fields::{FieldTable, StreamKind};
use regex::{Captures, Regex};
use std::str::FromStr;
use std::sync::OnceLock;

static RE_FIELD: OnceLock<Regex> = OnceLock::new();

fn field_pattern() -> &'static Regex {
    RE_FIELD.get_or_init(|| Regex::new(r"%([A-Za-z0-9_()/]+)%").expect("field pattern is valid"))
}

/// A user-defined report: one `Kind;body` line per stream kind. In a body,
/// `%Name%` is replaced by the field's value (empty when absent) and the
/// two-character sequence `\n` becomes a line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    sections: Vec<(StreamKind, String)>,
}

impl Template {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Applies each section to every stream of its kind, in stream order.
    pub fn render(&self, table: &FieldTable) -> String {
        let mut out = String::new();
        for (kind, body) in &self.sections {
            for (_, stream) in table.streams().filter(|(_, s)| s.kind == *kind) {
                let filled = field_pattern().replace_all(body, |caps: &Captures| {
                    stream.get(&caps[1]).unwrap_or_default().to_owned()
                });
                out.push_str(&filled);
            }
        }
        out
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut sections = Vec::new();
        for line in source.lines().filter(|l| !l.trim().is_empty()) {
            let (kind, body) = line
                .split_once(';')
                .ok_or_else(|| format!("Template line without a stream kind: {line}"))?;
            let kind: StreamKind = kind.trim().parse()?;
            sections.push((kind, body.replace("\\n", "\n").replace("\\r", "\r")));
        }
        if sections.is_empty() {
            return Err("Empty template".to_owned());
        }
        Ok(Self {
            source: source.to_owned(),
            sections,
        })
    }
}
