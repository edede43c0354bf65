//! Conversion between plain JSON records and Firestore typed values
//! (`{"stringValue": "..."}`, `{"integerValue": "42"}`, ...).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::StorageError;

pub type Fields = Map<String, Value>;

pub fn encode_record<R: Serialize>(record: &R) -> Result<Fields, StorageError> {
    match serde_json::to_value(record)? {
        Value::Object(object) => Ok(encode_fields(object)),
        other => Err(StorageError::Decode(format!(
            "records must serialize to an object, got {other}"
        ))),
    }
}

pub fn decode_record<R: DeserializeOwned>(fields: Fields) -> Result<R, StorageError> {
    let object = decode_fields(fields)?;
    Ok(serde_json::from_value(Value::Object(object))?)
}

fn encode_fields(object: Map<String, Value>) -> Fields {
    object
        .into_iter()
        .map(|(name, value)| (name, encode_value(value)))
        .collect()
}

fn decode_fields(fields: Fields) -> Result<Map<String, Value>, StorageError> {
    fields
        .into_iter()
        .map(|(name, value)| decode_value(value).map(|value| (name, value)))
        .collect()
}

pub fn encode_value(value: Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(values) => {
            let values: Vec<Value> = values.into_iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(object) => json!({ "mapValue": { "fields": encode_fields(object) } }),
    }
}

pub fn decode_value(value: Value) -> Result<Value, StorageError> {
    let typed = match value {
        Value::Object(typed) if typed.len() == 1 => typed,
        other => {
            return Err(StorageError::Decode(format!(
                "expected a single typed value, got {other}"
            )))
        }
    };
    let Some((kind, inner)) = typed.into_iter().next() else {
        return Err(StorageError::Decode("empty typed value".to_string()));
    };
    match (kind.as_str(), inner) {
        ("nullValue", _) => Ok(Value::Null),
        ("booleanValue", inner @ Value::Bool(_)) => Ok(inner),
        ("doubleValue", inner @ Value::Number(_)) => Ok(inner),
        ("integerValue", Value::String(s)) => s
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| StorageError::Decode(format!("integerValue `{s}`: {e}"))),
        ("integerValue", inner @ Value::Number(_)) => Ok(inner),
        ("stringValue" | "timestampValue" | "referenceValue", inner @ Value::String(_)) => {
            Ok(inner)
        }
        ("arrayValue", Value::Object(mut array)) => match array.remove("values") {
            None => Ok(Value::Array(Vec::new())),
            Some(Value::Array(values)) => values
                .into_iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Some(other) => Err(StorageError::Decode(format!(
                "arrayValue.values must be an array, got {other}"
            ))),
        },
        ("mapValue", Value::Object(mut map)) => match map.remove("fields") {
            None => Ok(Value::Object(Map::new())),
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            Some(other) => Err(StorageError::Decode(format!(
                "mapValue.fields must be an object, got {other}"
            ))),
        },
        (kind, inner) => Err(StorageError::Decode(format!(
            "unsupported value kind `{kind}`: {inner}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tutorial::Tutorial;
    use crate::models::video::Video;

    fn tutorial() -> Tutorial {
        Tutorial {
            id: 7,
            title: Some("Borrowing".to_string()),
            description: Some("Shared and mutable references".to_string()),
            code_snippets: vec!["let a = &b;".to_string(), "let c = &mut d;".to_string()],
            video_embed: Some("https://www.youtube.com/embed/abc".to_string()),
            code_urls: vec![],
            files_urls: vec!["https://example.com/slides.pdf".to_string()],
        }
    }

    #[test]
    fn encodes_ids_as_decimal_strings() {
        let fields = encode_record(&tutorial()).unwrap();
        assert_eq!(fields["id"], json!({ "integerValue": "7" }));
        assert_eq!(fields["title"], json!({ "stringValue": "Borrowing" }));
        assert_eq!(
            fields["code_urls"],
            json!({ "arrayValue": { "values": [] } })
        );
    }

    #[test]
    fn decodes_what_it_encodes() {
        let fields = encode_record(&tutorial()).unwrap();
        let decoded: Tutorial = decode_record(fields).unwrap();
        assert_eq!(decoded, tutorial());
    }

    #[test]
    fn decodes_store_shaped_document() {
        // Firestore omits `values` for empty arrays
        let fields = json!({
            "id": { "integerValue": "3" },
            "title": { "nullValue": null },
            "video_embed": { "stringValue": "xyz" },
            "extra": { "arrayValue": {} }
        });
        let Value::Object(fields) = fields else {
            unreachable!()
        };
        let video: Video = decode_record(fields).unwrap();
        assert_eq!(
            video,
            Video {
                id: 3,
                title: None,
                video_embed: Some("xyz".to_string()),
            }
        );
    }

    #[test]
    fn rejects_unknown_value_kinds() {
        let result = decode_value(json!({ "geoPointValue": { "latitude": 1.0 } }));
        assert!(matches!(result, Err(StorageError::Decode(_))));
        let result = decode_value(json!({ "integerValue": "seven" }));
        assert!(matches!(result, Err(StorageError::Decode(_))));
    }

    #[test]
    fn nested_maps_survive() {
        let value = json!({ "a": [1, 2.5, { "b": true }] });
        assert_eq!(decode_value(encode_value(value.clone())).unwrap(), value);
    }
}
