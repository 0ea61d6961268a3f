use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use super::Episode;
use crate::error::{Error, ErrorKind, Result};

/// The four top-level collections of a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionType {
    /// `serie`: the main numbered series
    Series,
    /// `spezial`: special episodes
    Special,
    /// `kurzgeschichten`: short-story episodes
    ShortStories,
    /// `die_dr3i`: the spin-off series
    Spinoff,
}
impl CollectionType {
    /// Every collection type in catalog order.
    pub const ALL: [CollectionType; 4] = [Self::Series, Self::Special, Self::ShortStories, Self::Spinoff];

    /// The serialized key of the collection.
    pub fn key(&self) -> &'static str {
        match self {
            CollectionType::Series => "serie",
            CollectionType::Special => "spezial",
            CollectionType::ShortStories => "kurzgeschichten",
            CollectionType::Spinoff => "die_dr3i",
        }
    }

    /// Display name used on rendered pages.
    pub fn name(&self) -> &'static str {
        match self {
            CollectionType::Series => "Serie",
            CollectionType::Special => "Spezial",
            CollectionType::ShortStories => "Kurzgeschichten",
            CollectionType::Spinoff => "Die Dr3i",
        }
    }

    /// File name of the web page (and its template) for this collection.
    pub fn html_file(&self) -> String {
        format!("{}.html", self.key())
    }
}
impl FromStr for CollectionType {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        match CollectionType::ALL.into_iter().find(|c| c.key().eq_ignore_ascii_case(s)) {
            Some(collection) => Ok(collection),
            None => exn::bail!(ErrorKind::InvalidValue(format!(
                "collection type '{s}', expected one of serie, spezial, kurzgeschichten or die_dr3i"
            ))),
        }
    }
}
impl Display for CollectionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.key())
    }
}

/// The complete metadata document.
///
/// Owns every entity beneath it. Sequences are kept in listing order, which is
/// also the order used when traversing; the key ordering only affects the
/// serialized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// `serie`, must not be empty
    pub series: Vec<Episode>,
    /// `spezial`
    pub specials: Option<Vec<Episode>>,
    /// `kurzgeschichten`
    pub short_stories: Option<Vec<Episode>>,
    /// `die_dr3i`
    pub spinoffs: Option<Vec<Episode>>,
}
impl Catalog {
    pub fn new(series: Vec<Episode>) -> Self {
        Self { series, specials: None, short_stories: None, spinoffs: None }
    }

    /// Episodes of one collection; empty if the collection is absent.
    pub fn collection(&self, collection: CollectionType) -> &[Episode] {
        let episodes = match collection {
            CollectionType::Series => return &self.series,
            CollectionType::Special => &self.specials,
            CollectionType::ShortStories => &self.short_stories,
            CollectionType::Spinoff => &self.spinoffs,
        };
        episodes.as_deref().unwrap_or_default()
    }

    /// Every collection with its episodes, in catalog order, including empty ones.
    pub fn collections(&self) -> impl Iterator<Item = (CollectionType, &[Episode])> {
        CollectionType::ALL.into_iter().map(|c| (c, self.collection(c)))
    }

    /// Total number of episodes over all collections.
    pub fn len(&self) -> usize {
        self.collections().map(|(_, episodes)| episodes.len()).sum()
    }

    /// A catalog is never empty once validated, but one under construction may be.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks the invariants the type system does not enforce:
    ///
    /// - the series collection is not empty,
    /// - episode numbers are unique within each collection, and
    /// - part numbers are unique within each episode.
    pub fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            exn::bail!(ErrorKind::EmptySeries);
        }
        for (collection, episodes) in self.collections() {
            let mut numbers = HashSet::with_capacity(episodes.len());
            for (index, episode) in episodes.iter().enumerate() {
                if !numbers.insert(episode.number()) {
                    exn::bail!(ErrorKind::DuplicateNumber {
                        field: "nummer",
                        number: episode.number(),
                        path: format!("$.{}[{index}]", collection.key()),
                    });
                }
                let mut parts = HashSet::with_capacity(episode.parts().len());
                for (part_index, part) in episode.parts().iter().enumerate() {
                    if !parts.insert(part.number()) {
                        exn::bail!(ErrorKind::DuplicateNumber {
                            field: "teilNummer",
                            number: part.number(),
                            path: format!("$.{}[{index}].teile[{part_index}]", collection.key()),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Part;
    use rstest::rstest;

    fn episodes(numbers: &[u32]) -> Vec<Episode> {
        numbers.iter().copied().map(Episode::new).collect()
    }

    #[rstest]
    #[case("serie", CollectionType::Series)]
    #[case("spezial", CollectionType::Special)]
    #[case("Kurzgeschichten", CollectionType::ShortStories)]
    #[case(" die_dr3i ", CollectionType::Spinoff)]
    fn test_collection_type_from_str(#[case] input: &str, #[case] expected: CollectionType) {
        assert_eq!(input.parse::<CollectionType>().unwrap(), expected);
    }

    #[test]
    fn test_collection_type_rejects_all() {
        // "all" is a command line selector, not a collection.
        let err = "all".parse::<CollectionType>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidValue(message) if message.contains("'all'")));
    }

    #[test]
    fn test_collection_type_html_file() {
        assert_eq!(CollectionType::Spinoff.html_file(), "die_dr3i.html");
    }

    #[test]
    fn test_collections_iterate_in_catalog_order() {
        let mut catalog = Catalog::new(episodes(&[3, 1, 2]));
        catalog.spinoffs = Some(episodes(&[7]));
        let listed: Vec<_> = catalog
            .collections()
            .map(|(c, e)| (c, e.iter().map(Episode::number).collect::<Vec<_>>()))
            .collect();
        assert_eq!(
            listed,
            vec![
                (CollectionType::Series, vec![3, 1, 2]),
                (CollectionType::Special, vec![]),
                (CollectionType::ShortStories, vec![]),
                (CollectionType::Spinoff, vec![7]),
            ]
        );
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_validate_accepts_same_number_in_different_collections() {
        let mut catalog = Catalog::new(episodes(&[1, 2]));
        catalog.specials = Some(episodes(&[1]));
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_series() {
        let err = Catalog::new(vec![]).validate().unwrap_err();
        assert_eq!(&*err, &ErrorKind::EmptySeries);
    }

    #[test]
    fn test_validate_rejects_duplicate_episode_number() {
        let mut catalog = Catalog::new(episodes(&[1]));
        catalog.short_stories = Some(episodes(&[4, 5, 4]));
        let err = catalog.validate().unwrap_err();
        assert_eq!(
            &*err,
            &ErrorKind::DuplicateNumber {
                field: "nummer",
                number: 4,
                path: "$.kurzgeschichten[2]".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_part_number() {
        let mut episode = Episode::new(1);
        episode.parts = Some(vec![Part::new(1), Part::new(1)]);
        let err = Catalog::new(vec![episode]).validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::DuplicateNumber { field: "teilNummer", number: 1, .. }));
    }
}
