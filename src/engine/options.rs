use crate::fields::catalog;
use crate::probe;
use crate::report::ReportFormat;

pub const OPTION_NOT_KNOWN: &str = "Option not known";

/// Engine-wide settings changed through options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub report: ReportFormat,
    /// Report every stored field instead of the curated set.
    pub complete: bool,
}

impl EngineConfig {
    /// Applies option `name` (case-insensitive) and returns the answer text.
    pub fn apply(&mut self, name: &str, value: &str) -> String {
        match name.trim().to_ascii_lowercase().as_str() {
            "inform" | "output" => match value.parse::<ReportFormat>() {
                Ok(format) => {
                    self.report = format;
                    String::new()
                }
                Err(message) => message,
            },
            "inform_get" | "output_get" => self.report.option_value(),
            "complete" => {
                self.complete = matches!(value.trim(), "1");
                String::new()
            }
            "complete_get" => if self.complete { "1" } else { "" }.to_owned(),
            "info_version" => format!(
                "{} - v{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ),
            "info_parameters" => catalog::describe_parameters(),
            "info_outputformats" => ReportFormat::NAMED.join("\n"),
            "info_formats" => probe::probes()
                .iter()
                .map(|p| p.name())
                .collect::<Vec<_>>()
                .join("\n"),
            _ => OPTION_NOT_KNOWN.to_owned(),
        }
    }
}
