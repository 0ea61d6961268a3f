//! Flat JSON objects with rank-ordered keys.

use serde_json::{Map, Value};
use tracing::warn;

use super::{Decode, Encode};
use crate::error::{ErrorKind, Result};
use crate::ordering::{self, KeyStyle};

/// Collects the fields of one entity, then writes them in canonical order.
///
/// Fields are gathered in whatever order the entity contributes them (its own
/// fields first, then the shared recording unit fields) and are only ranked in
/// [`finish`](Self::finish), so fields of the base and specialised entity
/// interleave by rank rather than by who declared them.
pub struct ObjectWriter {
    style: KeyStyle,
    fields: Vec<(&'static str, Value)>,
}
impl ObjectWriter {
    pub(crate) fn new(style: KeyStyle) -> Self {
        Self { style, fields: Vec::new() }
    }

    pub(crate) fn field(&mut self, name: &'static str, value: impl Into<Value>) -> &mut Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Writes `value` only if present.
    pub(crate) fn optional<T: Into<Value>>(&mut self, name: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.field(name, value);
        }
        self
    }

    /// Writes a nested entity if present.
    pub(crate) fn nested<T: Encode>(&mut self, name: &'static str, entity: Option<&T>) -> &mut Self {
        if let Some(entity) = entity {
            let value = super::encode_entity(entity, self.style);
            self.field(name, value);
        }
        self
    }

    /// Writes a sequence of nested entities. Absent and empty sequences are
    /// both omitted.
    pub(crate) fn sequence<T: Encode>(&mut self, name: &'static str, entities: Option<&[T]>) -> &mut Self {
        if let Some(entities) = entities.filter(|e| !e.is_empty()) {
            let values = entities.iter().map(|e| super::encode_entity(e, self.style)).collect::<Vec<_>>();
            self.field(name, Value::Array(values));
        }
        self
    }

    /// Stable-sorts the collected fields by rank and emits them as one object.
    ///
    /// Unknown fields share the same sentinel rank and therefore keep the
    /// order in which they were written, after every known field.
    pub(crate) fn finish(mut self) -> Value {
        self.fields.sort_by(|(a, _), (b, _)| ordering::compare(a, b));
        let mut object = Map::with_capacity(self.fields.len());
        for (name, value) in self.fields {
            object.insert(self.style.key(name).into_owned(), value);
        }
        Value::Object(object)
    }
}

/// A decoded JSON object whose fields are consumed by name.
///
/// Keys are normalised to bare field names on construction, so prefixed and
/// plain documents decode identically and key order never matters. Each
/// decoder removes the fields it understands; whatever is left over when the
/// reader is finished is unknown and gets dropped with a warning.
pub struct ObjectReader {
    entity: &'static str,
    path: String,
    fields: Map<String, Value>,
}
impl ObjectReader {
    pub(crate) fn new(value: Value, entity: &'static str, path: String) -> Result<Self> {
        let Value::Object(object) = value else {
            exn::bail!(ErrorKind::TypeMismatch {
                field: entity.to_string(),
                expected: "an object",
                path,
            });
        };
        let mut fields = Map::with_capacity(object.len());
        for (key, value) in object {
            let field = ordering::field_name(&key).to_string();
            if fields.contains_key(&field) {
                exn::bail!(ErrorKind::DuplicateField { field, path });
            }
            fields.insert(field, value);
        }
        Ok(Self { entity, path, fields })
    }

    /// Removes a field, treating `null` the same as absence.
    fn take(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name).filter(|value| !value.is_null())
    }

    fn mismatch(&self, name: &str, expected: &'static str) -> ErrorKind {
        ErrorKind::TypeMismatch {
            field: name.to_string(),
            expected,
            path: self.path.clone(),
        }
    }

    fn missing(&self, name: &'static str) -> ErrorKind {
        ErrorKind::MissingField {
            entity: self.entity,
            field: name,
            path: self.path.clone(),
        }
    }

    fn child_path(&self, name: &str, index: usize) -> String {
        format!("{}.{name}[{index}]", self.path)
    }

    pub(crate) fn required_u32(&mut self, name: &'static str) -> Result<u32> {
        match self.optional_u32(name)? {
            Some(number) => Ok(number),
            None => exn::bail!(self.missing(name)),
        }
    }

    pub(crate) fn optional_u32(&mut self, name: &'static str) -> Result<Option<u32>> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(number) => Ok(Some(number)),
            None => exn::bail!(self.mismatch(name, "a non-negative 32-bit integer")),
        }
    }

    pub(crate) fn optional_i64(&mut self, name: &'static str) -> Result<Option<i64>> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        match value.as_i64() {
            Some(number) => Ok(Some(number)),
            None => exn::bail!(self.mismatch(name, "an integer")),
        }
    }

    pub(crate) fn required_string(&mut self, name: &'static str) -> Result<String> {
        match self.optional_string(name)? {
            Some(s) => Ok(s),
            None => exn::bail!(self.missing(name)),
        }
    }

    pub(crate) fn optional_string(&mut self, name: &'static str) -> Result<Option<String>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => exn::bail!(self.mismatch(name, "a string")),
        }
    }

    /// A sequence of string groups such as `[["Justus", "Oliver Rohrbeck"]]`.
    /// An empty outer sequence decodes as absent.
    pub(crate) fn optional_string_groups(&mut self, name: &'static str) -> Result<Option<Vec<Vec<String>>>> {
        let Some(items) = self.optional_array(name)? else {
            return Ok(None);
        };
        let groups = items
            .into_iter()
            .map(|group| match group {
                Value::Array(names) => names
                    .into_iter()
                    .map(|n| match n {
                        Value::String(s) => Ok(s),
                        _ => exn::bail!(self.mismatch(name, "a list of string lists")),
                    })
                    .collect::<Result<Vec<_>>>(),
                _ => exn::bail!(self.mismatch(name, "a list of string lists")),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(groups))
    }

    /// A sequence of nested entities. An empty sequence decodes as absent.
    pub(crate) fn optional_sequence<T: Decode>(&mut self, name: &'static str) -> Result<Option<Vec<T>>> {
        let Some(items) = self.optional_array(name)? else {
            return Ok(None);
        };
        let entities = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| super::decode_at::<T>(item, self.child_path(name, index)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(entities))
    }

    /// A sequence of nested entities that must be present and non-empty.
    pub(crate) fn required_sequence<T: Decode>(&mut self, name: &'static str) -> Result<Vec<T>> {
        match self.optional_sequence(name)? {
            Some(entities) => Ok(entities),
            None => exn::bail!(self.missing(name)),
        }
    }

    pub(crate) fn optional_nested<T: Decode>(&mut self, name: &'static str) -> Result<Option<T>> {
        match self.take(name) {
            None => Ok(None),
            Some(value) => Ok(Some(super::decode_at::<T>(value, format!("{}.{name}", self.path))?)),
        }
    }

    fn optional_array(&mut self, name: &'static str) -> Result<Option<Vec<Value>>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Array(items)) if items.is_empty() => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => exn::bail!(self.mismatch(name, "a list")),
        }
    }

    /// Drops every field no decoder consumed.
    pub(crate) fn finish(self) {
        for key in self.fields.keys() {
            warn!(entity = self.entity, path = %self.path, field = %key, "dropping unknown field");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_writer_orders_by_rank_not_insertion() {
        let mut writer = ObjectWriter::new(KeyStyle::Plain);
        writer.field("links", json!({})).field("titel", "A").field("nummer", 1u32);
        let keys: Vec<String> = writer.finish().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["nummer", "titel", "links"]);
    }

    #[test]
    fn test_writer_places_unknown_fields_last_in_written_order() {
        let mut writer = ObjectWriter::new(KeyStyle::Prefixed);
        writer
            .field("zusatz", 1)
            .field("autor", "B")
            .field("anmerkung", 2)
            .field("nummer", 3u32)
            .field("titel", "A");
        let keys: Vec<String> = writer.finish().as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["04_nummer", "08_titel", "09_autor", "99_zusatz", "99_anmerkung"]);
    }

    #[test]
    fn test_writer_skips_absent_values() {
        let mut writer = ObjectWriter::new(KeyStyle::Plain);
        writer.optional("titel", None::<String>).optional("autor", Some("B"));
        assert_eq!(writer.finish(), json!({"autor": "B"}));
    }

    #[test]
    fn test_reader_strips_prefixes() {
        let mut reader = ObjectReader::new(json!({"04_nummer": 5, "titel": "A"}), "episode", "$".into()).unwrap();
        assert_eq!(reader.required_u32("nummer").unwrap(), 5);
        assert_eq!(reader.optional_string("titel").unwrap().as_deref(), Some("A"));
    }

    #[test]
    fn test_reader_rejects_prefixed_and_plain_key_for_same_field() {
        let value = json!({"04_nummer": 1, "nummer": 2, "08_titel": "A", "titel": "B"});
        let err = ObjectReader::new(value, "episode", "$.serie[0]".into()).err().unwrap();
        assert!(matches!(&*err, ErrorKind::DuplicateField { field, path } if field == "nummer" && path == "$.serie[0]"));
    }

    #[test]
    fn test_reader_rejects_different_prefixes_for_same_field() {
        let err = ObjectReader::new(json!({"04_nummer": 1, "05_nummer": 2}), "episode", "$".into()).err().unwrap();
        assert!(matches!(&*err, ErrorKind::DuplicateField { field, .. } if field == "nummer"));
    }

    #[test]
    fn test_reader_treats_null_as_absent() {
        let mut reader = ObjectReader::new(json!({"titel": null, "nummer": null}), "episode", "$".into()).unwrap();
        assert_eq!(reader.optional_string("titel").unwrap(), None);
        let err = reader.required_u32("nummer").unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingField { field: "nummer", .. }));
    }

    #[test]
    fn test_reader_rejects_non_object() {
        let err = ObjectReader::new(json!([1, 2]), "part", "$.serie[0].teile[1]".into()).err().unwrap();
        assert!(matches!(&*err, ErrorKind::TypeMismatch { expected: "an object", .. }));
    }

    #[test]
    fn test_reader_rejects_negative_and_textual_numbers() {
        let mut reader = ObjectReader::new(json!({"nummer": -1, "teilNummer": "7"}), "episode", "$".into()).unwrap();
        assert!(reader.required_u32("nummer").is_err());
        assert!(reader.required_u32("teilNummer").is_err());
    }

    #[test]
    fn test_reader_reads_string_groups() {
        let mut reader = ObjectReader::new(
            json!({"sprecher": [["Justus Jonas", "Oliver Rohrbeck"], ["Erzähler"]]}),
            "episode",
            "$".into(),
        )
        .unwrap();
        let groups = reader.optional_string_groups("sprecher").unwrap().unwrap();
        assert_eq!(groups[0], vec!["Justus Jonas".to_string(), "Oliver Rohrbeck".to_string()]);
        assert_eq!(groups[1], vec!["Erzähler".to_string()]);
    }

    #[test]
    fn test_reader_rejects_malformed_string_groups() {
        let mut reader = ObjectReader::new(json!({"sprecher": ["Justus"]}), "episode", "$".into()).unwrap();
        assert!(reader.optional_string_groups("sprecher").is_err());
    }
}
