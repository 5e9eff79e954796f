use crate::fields::{FieldTable, Stream, StreamKind};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use tracing::warn;

#[derive(Serialize)]
struct Document<'a> {
    media: Media<'a>,
}

#[derive(Serialize)]
struct Media<'a> {
    #[serde(rename = "@ref")]
    reference: &'a str,
    track: Vec<Track<'a>>,
}

#[derive(Serialize)]
struct Track<'a> {
    #[serde(rename = "@type")]
    kind: StreamKind,
    #[serde(rename = "@typeorder", skip_serializing_if = "Option::is_none")]
    type_order: Option<String>,
    #[serde(flatten)]
    fields: Fields<'a>,
}

/// A stream's fields as JSON members, in discovery order.
struct Fields<'a> {
    stream: &'a Stream,
    all_fields: bool,
}

impl Serialize for Fields<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for field in self.stream.fields() {
            if self.all_fields || !field.name.contains('/') {
                map.serialize_entry(&field.name, &field.value)?;
            }
        }
        map.end()
    }
}

/// `{"media": {"@ref": ..., "track": [...]}}`. Without `all_fields` the
/// `/String` variants are left out, as they only restate raw values.
pub fn render(table: &FieldTable, all_fields: bool) -> String {
    let track = table
        .streams()
        .map(|(index, stream)| Track {
            kind: stream.kind,
            type_order: (table.count(stream.kind) > 1).then(|| (index + 1).to_string()),
            fields: Fields { stream, all_fields },
        })
        .collect();
    let document = Document {
        media: Media {
            reference: table.general().get("CompleteName").unwrap_or_default(),
            track,
        },
    };
    serde_json::to_string_pretty(&document).unwrap_or_else(|err| {
        warn!(%err, "Could not render JSON report");
        String::new()
    })
}
