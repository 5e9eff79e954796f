//! Rendering a [`FieldTable`] as one block of text.
mod json;
mod template;
mod text;

use crate::fields::FieldTable;
use std::fmt;
use std::str::FromStr;
pub use template::Template;

/// The layout `Inform` produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// `Label : value` sections, one per stream.
    #[default]
    Text,
    Json,
    /// Per-kind templates such as `General;%Duration/String3%\n`.
    Template(Template),
}

impl ReportFormat {
    /// Names accepted by the `Output` option besides templates.
    pub const NAMED: [&'static str; 2] = ["Text", "JSON"];

    /// The value `Output_Get` answers with, which `Output` accepts back.
    pub fn option_value(&self) -> String {
        match self {
            Self::Text => "Text".to_owned(),
            Self::Json => "JSON".to_owned(),
            Self::Template(template) => template.source().to_owned(),
        }
    }

    /// Renders `table`. With `complete` every stored field is listed, not only
    /// the curated ones.
    pub fn render(&self, table: &FieldTable, complete: bool) -> String {
        match self {
            Self::Text => text::render(table, complete),
            Self::Json => json::render(table, complete),
            Self::Template(template) => template.render(table),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.option_value())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(';') {
            return s.parse::<Template>().map(Self::Template);
        }
        match s.to_ascii_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Output format not supported: {s}")),
        }
    }
}
