use serde_json::json;

use crate::edit::Document;
use crate::error::{NbtError, Result};
use crate::tag::Tag;

/// JSON rendition of a tag tree for CLI dumps. Arrays become plain number
/// arrays; read-only convenience, not part of the codec round trip.
pub fn tag_to_json(tag: &Tag) -> serde_json::Value {
    match tag {
        Tag::Byte(v) => json!(*v),
        Tag::Short(v) => json!(*v),
        Tag::Int(v) => json!(*v),
        Tag::Long(v) => json!(*v),
        Tag::Float(v) => json!(*v),
        Tag::Double(v) => json!(*v),
        Tag::String(s) => json!(s),
        Tag::ByteArray(v) => serde_json::Value::Array(v.iter().map(|x| json!(*x)).collect()),
        Tag::IntArray(v) => serde_json::Value::Array(v.iter().map(|x| json!(*x)).collect()),
        Tag::LongArray(v) => serde_json::Value::Array(v.iter().map(|x| json!(*x)).collect()),
        Tag::List(l) => serde_json::Value::Array(l.iter().map(tag_to_json).collect()),
        Tag::Compound(c) => {
            let mut map = serde_json::Map::with_capacity(c.len());
            for (key, value) in c.iter() {
                map.insert(key.to_string(), tag_to_json(value));
            }
            serde_json::Value::Object(map)
        }
    }
}

pub fn dump_document_json(doc: &Document) -> Result<String> {
    let mut wrapper = serde_json::Map::new();
    wrapper.insert("$rootName".to_string(), json!(doc.root_name()));
    wrapper.insert("root".to_string(), tag_to_json(doc.root()));
    serde_json::to_string_pretty(&serde_json::Value::Object(wrapper))
        .map_err(|e| NbtError::Format(e.to_string()))
}
