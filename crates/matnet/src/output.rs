use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use matnet_frame::{is_known_id, Array, Message, Value};
use serde::Serialize;

/// Elements shown before an array preview is cut off.
const PREVIEW_ELEMENTS: usize = 8;

/// Characters shown before a JSON preview is cut off.
const PREVIEW_CHARS: usize = 60;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    source: &'a str,
    known_id: bool,
    #[serde(flatten)]
    message: &'a Message,
}

/// Per-field layout summary, as printed by `inspect`.
#[derive(Serialize, Debug, PartialEq)]
pub struct FieldSummary {
    pub name: String,
    pub kind: &'static str,
    pub element_type: Option<&'static str>,
    pub shape: Vec<usize>,
    pub elements: usize,
    pub bytes: usize,
}

impl FieldSummary {
    pub fn new(name: &str, value: &Value) -> Self {
        let (element_type, shape, elements, bytes) = match value {
            Value::Scalar(s) => {
                let ty = s.element_type();
                (Some(ty.name()), Vec::new(), 1, ty.width())
            }
            Value::Array(a) => (
                Some(a.element_type().name()),
                a.shape().to_vec(),
                a.len(),
                a.byte_len(),
            ),
            Value::Json(_) => (None, Vec::new(), 0, 0),
        };
        Self {
            name: name.to_string(),
            kind: value.kind(),
            element_type,
            shape,
            elements,
            bytes,
        }
    }
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    source: &'a str,
    id: &'a str,
    known_id: bool,
    frame_bytes: usize,
    fields: &'a [FieldSummary],
}

pub fn print_message(message: &Message, source: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = MessageOutput {
                source,
                known_id: is_known_id(&message.id),
                message,
            };
            if let Some(line) = json_line(&out, source) {
                println!("{line}");
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "KIND", "TYPE", "SHAPE", "VALUE"]);
            for (name, value) in message.payload.iter() {
                let summary = FieldSummary::new(name, value);
                table.add_row(vec![
                    name.to_string(),
                    summary.kind.to_string(),
                    summary.element_type.unwrap_or("-").to_string(),
                    shape_label(&summary.shape),
                    value_preview(value),
                ]);
            }
            println!("{} ({source})", message.id);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "id={} fields={} source={}",
                message.id,
                message.payload.len(),
                source
            );
            for (name, value) in message.payload.iter() {
                println!("  {name}: {}", value_preview(value));
            }
        }
    }
}

pub fn print_summary(
    message: &Message,
    source: &str,
    frame_bytes: usize,
    fields: &[FieldSummary],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = InspectOutput {
                source,
                id: &message.id,
                known_id: is_known_id(&message.id),
                frame_bytes,
                fields,
            };
            if let Some(line) = json_line(&out, source) {
                println!("{line}");
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "KIND", "TYPE", "SHAPE", "ELEMENTS", "BYTES"]);
            for field in fields {
                table.add_row(vec![
                    field.name.clone(),
                    field.kind.to_string(),
                    field.element_type.unwrap_or("-").to_string(),
                    shape_label(&field.shape),
                    field.elements.to_string(),
                    field.bytes.to_string(),
                ]);
            }
            println!("{} ({source}, {frame_bytes} bytes)", message.id);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "id={} known={} bytes={} source={}",
                message.id,
                is_known_id(&message.id),
                frame_bytes,
                source
            );
            for field in fields {
                println!(
                    "  {} {} {} elements={} bytes={}",
                    field.name,
                    field.element_type.unwrap_or(field.kind),
                    shape_label(&field.shape),
                    field.elements,
                    field.bytes
                );
            }
        }
    }
}

/// Serialize one output record. Failures are logged and nothing is printed.
fn json_line<T: Serialize>(value: &T, source: &str) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(line) => Some(line),
        Err(err) => {
            tracing::error!(source, error = %err, "failed serializing output record");
            None
        }
    }
}

pub fn shape_label(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(usize::to_string).collect();
    format!("[{}]", dims.join(", "))
}

pub fn value_preview(value: &Value) -> String {
    match value {
        Value::Scalar(s) => s.to_string(),
        Value::Array(a) => array_preview(a),
        Value::Json(v) => {
            let text = v.to_string();
            if text.chars().count() > PREVIEW_CHARS {
                let cut: String = text.chars().take(PREVIEW_CHARS).collect();
                format!("{cut}...")
            } else {
                text
            }
        }
    }
}

fn array_preview(array: &Array) -> String {
    let shown: Vec<String> = (0..array.len().min(PREVIEW_ELEMENTS))
        .filter_map(|i| array.data().get(i))
        .map(|s| s.to_string())
        .collect();
    let more = if array.len() > PREVIEW_ELEMENTS {
        ", ..."
    } else {
        ""
    };
    format!(
        "{}{} [{}{}]",
        array.element_type(),
        shape_label(array.shape()),
        shown.join(", "),
        more
    )
}

#[cfg(test)]
mod tests {
    use matnet_frame::{ArrayData, Scalar};

    use super::*;

    #[test]
    fn previews() {
        assert_eq!(value_preview(&Value::Scalar(Scalar::U8(3))), "3");

        let small = Array::new(vec![2, 2], ArrayData::I16(vec![1, 2, 3, 4])).unwrap();
        assert_eq!(value_preview(&Value::Array(small)), "i16[2, 2] [1, 2, 3, 4]");

        let big = Array::new(vec![10], ArrayData::U8((0..10).collect())).unwrap();
        assert_eq!(
            value_preview(&Value::Array(big)),
            "u8[10] [0, 1, 2, 3, 4, 5, 6, 7, ...]"
        );

        assert_eq!(
            value_preview(&Value::Json(serde_json::json!({"status": "OK"}))),
            r#"{"status":"OK"}"#
        );
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no json form"))
        }
    }

    #[test]
    fn json_line_skips_records_that_fail_to_serialize() {
        assert_eq!(json_line(&Unserializable, "frame.bin"), None);
        assert_eq!(
            json_line(&serde_json::json!({"ID": "START"}), "frame.bin").as_deref(),
            Some(r#"{"ID":"START"}"#)
        );
    }

    #[test]
    fn field_summary_sizes() {
        let array = Array::new(vec![3, 2], ArrayData::F32(vec![0.0; 6])).unwrap();
        let summary = FieldSummary::new("rawImage_XY", &Value::Array(array));
        assert_eq!(summary.element_type, Some("f32"));
        assert_eq!(summary.shape, vec![3, 2]);
        assert_eq!(summary.elements, 6);
        assert_eq!(summary.bytes, 24);

        let scalar = FieldSummary::new("t", &Value::Scalar(Scalar::F64(1.0)));
        assert_eq!((scalar.kind, scalar.elements, scalar.bytes), ("scalar", 1, 8));

        let json = FieldSummary::new("status", &Value::Json(serde_json::json!("OK")));
        assert_eq!((json.kind, json.element_type), ("json", None));
    }
}
