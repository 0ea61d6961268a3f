//! Rank-ordered JSON encoding and decoding of the catalog.
//!
//! Every entity is written as one flat JSON object. Numbered entities first
//! contribute their own fields and then hand the same object to the
//! [`RecordingUnit`](crate::models::RecordingUnit) codec, so inherited and
//! specialised fields end up side by side, ordered by the table in
//! [`ordering`](crate::ordering).

mod entities;
mod object;

use exn::ResultExt;
use serde_json::Value;
use tracing::{debug, instrument};

pub use self::object::{ObjectReader, ObjectWriter};
use crate::error::{ErrorKind, Result};
use crate::models::Catalog;
use crate::ordering::KeyStyle;

/// An entity that can write itself into a flat, rank-ordered object.
pub trait Encode {
    /// Adds this entity's fields to `object`. Absent optional values must not
    /// be written.
    fn encode_into(&self, object: &mut ObjectWriter);
}

/// An entity that can be read back from a flat object.
pub trait Decode: Sized {
    /// Name of the entity in error messages.
    const ENTITY: &'static str;

    /// Consumes the fields this entity understands from `object`. Fields left
    /// behind are reported as unknown by the caller.
    fn decode_from(object: &mut ObjectReader) -> Result<Self>;
}

/// Encodes a single entity into a JSON object.
pub fn encode_entity<T: Encode + ?Sized>(entity: &T, style: KeyStyle) -> Value {
    let mut object = ObjectWriter::new(style);
    entity.encode_into(&mut object);
    object.finish()
}

/// Decodes a single entity from a JSON object, regardless of key order or
/// key style.
pub fn decode_entity<T: Decode>(value: Value) -> Result<T> {
    decode_at(value, "$".to_string())
}

pub(crate) fn decode_at<T: Decode>(value: Value, path: String) -> Result<T> {
    let mut object = ObjectReader::new(value, T::ENTITY, path)?;
    let entity = T::decode_from(&mut object)?;
    object.finish();
    Ok(entity)
}

/// Configurable catalog encoder.
///
/// Defaults to prefixed keys and pretty-printed output, which is the format
/// of the published metadata documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    style: KeyStyle,
    compact: bool,
}
impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_style(mut self, style: KeyStyle) -> Self {
        self.style = style;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.compact = !pretty;
        self
    }

    /// Validates the catalog and builds its JSON value tree.
    pub fn to_value(&self, catalog: &Catalog) -> Result<Value> {
        catalog.validate()?;
        Ok(encode_entity(catalog, self.style))
    }

    /// Validates the catalog and writes it as JSON text.
    #[instrument(skip_all, fields(style = %self.style, episodes = catalog.len()))]
    pub fn encode(&self, catalog: &Catalog) -> Result<String> {
        let value = self.to_value(catalog)?;
        let text = match self.compact {
            true => serde_json::to_string(&value),
            false => serde_json::to_string_pretty(&value),
        }
        .or_raise(|| ErrorKind::Serialize)?;
        debug!(bytes = text.len(), "encoded catalog");
        Ok(text)
    }
}

/// Encodes a catalog with the default [`Encoder`].
pub fn encode(catalog: &Catalog) -> Result<String> {
    Encoder::default().encode(catalog)
}

/// Parses JSON text into a validated catalog.
///
/// Both prefixed and plain keys are accepted, in any order. Unknown fields
/// are dropped with a warning; anything else that does not fit the model
/// aborts decoding of the whole document.
#[instrument(skip_all, fields(bytes = text.as_ref().len()))]
pub fn decode(text: impl AsRef<str>) -> Result<Catalog> {
    let value: Value = serde_json::from_str(text.as_ref()).or_raise(|| ErrorKind::MalformedDocument)?;
    decode_value(value)
}

/// Decodes an already parsed JSON value into a validated catalog.
pub fn decode_value(value: Value) -> Result<Catalog> {
    let catalog: Catalog = decode_entity(value)?;
    catalog.validate()?;
    debug!(episodes = catalog.len(), "decoded catalog");
    Ok(catalog)
}
