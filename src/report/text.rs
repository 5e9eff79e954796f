use crate::fields::catalog;
use crate::fields::{FieldTable, Stream};

const LABEL_WIDTH: usize = 41;

fn heading(table: &FieldTable, index: usize, stream: &Stream) -> String {
    if table.count(stream.kind) > 1 {
        format!("{} #{}", stream.kind, index + 1)
    } else {
        stream.kind.to_string()
    }
}

/// Curated lines: catalog labels, preferring the `/String` form of a value.
/// Blank values are only listed in the complete report.
fn curated(stream: &Stream, out: &mut String) {
    for parameter in catalog::parameters(stream.kind) {
        let Some(label) = parameter.label else {
            continue;
        };
        let value = stream
            .get(&format!("{}/String", parameter.name))
            .or_else(|| stream.get(parameter.name));
        if let Some(value) = value.filter(|value| !value.is_empty()) {
            out.push_str(&format!("{label:<LABEL_WIDTH$}: {value}\n"));
        }
    }
}

fn complete(stream: &Stream, out: &mut String) {
    for field in stream.fields() {
        out.push_str(&format!("{:<LABEL_WIDTH$}: {}\n", field.name, field.value));
    }
}

pub fn render(table: &FieldTable, all_fields: bool) -> String {
    let mut out = String::new();
    for (index, stream) in table.streams() {
        out.push_str(&heading(table, index, stream));
        out.push('\n');
        if all_fields {
            complete(stream, &mut out);
        } else {
            curated(stream, &mut out);
        }
        out.push('\n');
    }
    out
}
