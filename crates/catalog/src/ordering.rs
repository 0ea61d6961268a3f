//! Canonical key ordering for serialized catalogs.
//!
//! Every key written by the codec is ranked by its position in [`ORDERING`].
//! The list deliberately repeats `titel`: chapters reuse the name of the
//! recording title, and lookups always resolve to the first occurrence.

use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::{Error, ErrorKind};

/// Rank given to any field that does not appear in [`ORDERING`].
pub const UNKNOWN_RANK: usize = 99;

/// The externally curated output order of every known field name.
pub const ORDERING: [&str; 24] = [
    // Catalog
    "serie",
    "spezial",
    "kurzgeschichten",
    "die_dr3i",
    // Episode
    "nummer",
    "teile",
    // Part
    "teilNummer",
    "buchstabe",
    // Recording unit
    "titel",
    "autor",
    "hörspielskriptautor",
    "beschreibung",
    "veröffentlichungsdatum",
    "kapitel",
    "sprecher",
    "links",
    // Chapter
    "titel",
    "start",
    "end",
    // Links
    "ffmetadata",
    "xld_log",
    "cover",
    "cover_itunes",
    "cover_kosmos",
];

static PREFIXED_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}_(.+)$").unwrap());

/// Zero-based position of the first occurrence of `field`, or [`UNKNOWN_RANK`].
pub fn rank(field: &str) -> usize {
    ORDERING.iter().position(|known| *known == field).unwrap_or(UNKNOWN_RANK)
}

/// The rank of `field`, zero-padded to two digits, followed by the field name.
///
/// ```
/// use dreimeta_catalog::ordering::sort_key;
/// assert_eq!(sort_key("nummer"), "04_nummer");
/// assert_eq!(sort_key("json"), "99_json");
/// ```
pub fn sort_key(field: &str) -> String {
    format!("{:02}_{field}", rank(field))
}

/// Inverse of [`sort_key`]: strips a two-digit rank prefix if there is one.
///
/// The prefix is not checked against the field's actual rank, so documents
/// written with an older ordering still decode.
pub fn field_name(key: &str) -> &str {
    PREFIXED_KEY
        .captures(key)
        .and_then(|captures| captures.get(1))
        .map_or(key, |name| name.as_str())
}

/// Compares two field names by rank.
pub fn compare(a: &str, b: &str) -> Ordering {
    rank(a).cmp(&rank(b))
}

/// How field names are spelled in serialized output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KeyStyle {
    /// Keys carry their rank, e.g. `04_nummer`. Sorting these keys
    /// lexically reproduces the canonical order, which is what the published
    /// documents rely on.
    #[default]
    Prefixed,
    /// Keys are written as bare field names in canonical order.
    Plain,
}
impl KeyStyle {
    /// Spells `field` according to this style.
    pub fn key<'a>(&self, field: &'a str) -> Cow<'a, str> {
        match self {
            KeyStyle::Prefixed => Cow::Owned(sort_key(field)),
            KeyStyle::Plain => Cow::Borrowed(field),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyStyle::Prefixed => "prefixed",
            KeyStyle::Plain => "plain",
        }
    }
}
impl FromStr for KeyStyle {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "prefixed" | "prefix" | "ranked" => Self::Prefixed,
            "plain" | "bare" => Self::Plain,
            _ => exn::bail!(ErrorKind::InvalidValue(format!(
                "key style '{s}', expected \"prefixed\" or \"plain\""
            ))),
        })
    }
}
impl Display for KeyStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("serie", 0)]
    #[case("die_dr3i", 3)]
    #[case("nummer", 4)]
    #[case("teilNummer", 6)]
    #[case("titel", 8)]
    #[case("veröffentlichungsdatum", 12)]
    #[case("links", 15)]
    #[case("start", 17)]
    #[case("end", 18)]
    #[case("cover_kosmos", 23)]
    #[case("json", UNKNOWN_RANK)]
    #[case("", UNKNOWN_RANK)]
    fn test_rank(#[case] field: &str, #[case] expected: usize) {
        assert_eq!(rank(field), expected);
    }

    #[rstest]
    #[case("serie", "00_serie")]
    #[case("nummer", "04_nummer")]
    #[case("hörspielskriptautor", "10_hörspielskriptautor")]
    #[case("xld_log", "20_xld_log")]
    #[case("unbekannt", "99_unbekannt")]
    fn test_sort_key(#[case] field: &str, #[case] expected: &str) {
        assert_eq!(sort_key(field), expected);
    }

    #[rstest]
    #[case("04_nummer", "nummer")]
    #[case("99_json", "json")]
    #[case("nummer", "nummer")]
    #[case("4_nummer", "4_nummer")]
    #[case("04_", "04_")]
    #[case("123_abc", "123_abc")]
    fn test_field_name(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(field_name(key), expected);
    }

    #[test]
    fn test_field_name_inverts_sort_key() {
        for field in ORDERING {
            assert_eq!(field_name(&sort_key(field)), field);
        }
    }

    #[test]
    fn test_prefixed_keys_sort_lexically_in_rank_order() {
        let mut fields = vec!["links", "titel", "nummer", "kapitel", "teile", "autor", "json"];
        fields.sort_by(|a, b| compare(a, b));
        let mut keys: Vec<String> = fields.iter().map(|f| sort_key(f)).collect();
        let ranked = keys.clone();
        keys.sort();
        assert_eq!(keys, ranked);
        assert_eq!(fields, vec!["nummer", "teile", "titel", "autor", "kapitel", "links", "json"]);
    }

    #[rstest]
    #[case("prefixed", KeyStyle::Prefixed)]
    #[case(" Plain ", KeyStyle::Plain)]
    fn test_key_style_from_str(#[case] input: &str, #[case] expected: KeyStyle) {
        assert_eq!(input.parse::<KeyStyle>().unwrap(), expected);
    }

    #[test]
    fn test_key_style_invalid() {
        let err = "sorted".parse::<KeyStyle>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidValue(message) if message.contains("'sorted'")));
    }

    #[test]
    fn test_key_style_spelling() {
        assert_eq!(KeyStyle::Prefixed.key("titel"), "08_titel");
        assert_eq!(KeyStyle::Plain.key("titel"), "titel");
    }
}
