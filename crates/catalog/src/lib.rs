//! Catalog entities and their rank-ordered JSON representation.
//!
//! A [`Catalog`](models::Catalog) is a strict tree: four collections of
//! [`Episode`](models::Episode)s, which may be split into
//! [`Part`](models::Part)s, all sharing the attributes of
//! [`RecordingUnit`](models::RecordingUnit). The tree is built once (from
//! storage or from text) and only read afterwards.
//!
//! The serialized form is a JSON document in which every object lists its
//! keys in a fixed, curated order (see [`ordering`]) rather than alphabetical
//! or declaration order:
//!
//! ```
//! use dreimeta_catalog::models::{Catalog, Episode, RecordingUnit};
//! use dreimeta_catalog::{Encoder, KeyStyle, decode};
//!
//! let episode = Episode::with_unit(1, RecordingUnit::titled("und der Super-Papagei"));
//! let catalog = Catalog::new(vec![episode]);
//! let text = Encoder::new().key_style(KeyStyle::Plain).pretty(false).encode(&catalog).unwrap();
//! assert_eq!(text, r#"{"serie":[{"nummer":1,"titel":"und der Super-Papagei"}]}"#);
//! assert_eq!(decode(&text).unwrap(), catalog);
//! ```

pub mod codec;
pub mod error;
pub mod models;
pub mod ordering;

pub use crate::codec::{Decode, Encode, Encoder, decode, decode_entity, decode_value, encode, encode_entity};
pub use crate::ordering::KeyStyle;
