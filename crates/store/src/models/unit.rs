use crate::error::{ErrorKind, Result};
use dreimeta_catalog::models::{Chapter, CollectionType, Links, RecordingUnit};
use exn::ResultExt;

/// One episode (`parent_id` is `None`) or part (`parent_id` is its episode).
#[derive(sqlx::FromRow)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct UnitRow {
    pub(crate) unit_id: i64,
    pub(crate) collection: String,
    #[sqlx(default)]
    pub(crate) parent_id: Option<i64>,
    pub(crate) position: i64,
    pub(crate) number: i64,
    pub(crate) letter: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) script_author: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) release_date: Option<String>,
    /// Distinguishes an empty link set from no link set at all.
    pub(crate) has_links: bool,
    pub(crate) link_json: Option<String>,
    pub(crate) link_ffmetadata: Option<String>,
    pub(crate) link_xld_log: Option<String>,
    pub(crate) link_cover: Option<String>,
    pub(crate) link_cover_itunes: Option<String>,
    pub(crate) link_cover_kosmos: Option<String>,
}
impl UnitRow {
    /// Builds a row to insert. The `unit_id` is assigned by the database.
    pub(crate) fn new(
        collection: CollectionType,
        parent_id: Option<i64>,
        position: usize,
        number: u32,
        letter: Option<&str>,
        unit: &RecordingUnit,
    ) -> Result<Self> {
        let links = unit.links.clone().unwrap_or_default();
        Ok(Self {
            unit_id: 0,
            collection: collection.key().to_string(),
            parent_id,
            position: i64::try_from(position).or_raise(|| ErrorKind::InvalidData("position"))?,
            number: i64::from(number),
            letter: letter.map(str::to_string),
            title: unit.title.clone(),
            author: unit.author.clone(),
            script_author: unit.script_author.clone(),
            description: unit.description.clone(),
            release_date: unit.release_date.clone(),
            has_links: unit.links.is_some(),
            link_json: links.json,
            link_ffmetadata: links.ffmetadata,
            link_xld_log: links.xld_log,
            link_cover: links.cover,
            link_cover_itunes: links.cover_itunes,
            link_cover_kosmos: links.cover_kosmos,
        })
    }

    pub(crate) fn collection(&self) -> Result<CollectionType> {
        self.collection.parse::<CollectionType>().or_raise(|| ErrorKind::InvalidData("collection"))
    }

    pub(crate) fn number(&self) -> Result<u32> {
        u32::try_from(self.number).or_raise(|| ErrorKind::InvalidData("number"))
    }

    /// Reassembles the recording unit from this row and the unit's child rows.
    /// Empty child sequences become absent ones.
    pub(crate) fn into_unit(self, chapters: Vec<Chapter>, speakers: Vec<Vec<String>>) -> RecordingUnit {
        let links = self.has_links.then(|| Links {
            json: self.link_json,
            ffmetadata: self.link_ffmetadata,
            xld_log: self.link_xld_log,
            cover: self.link_cover,
            cover_itunes: self.link_cover_itunes,
            cover_kosmos: self.link_cover_kosmos,
        });
        RecordingUnit {
            title: self.title,
            author: self.author,
            script_author: self.script_author,
            description: self.description,
            release_date: self.release_date,
            chapters: Some(chapters).filter(|c| !c.is_empty()),
            speakers: Some(speakers).filter(|s| !s.is_empty()),
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_to_row_and_back() {
        let unit = RecordingUnit {
            title: Some("und der Karpatenhund".to_string()),
            release_date: Some("1979-10-12".to_string()),
            links: Some(Links { cover: Some("serie/003/cover.png".to_string()), ..Default::default() }),
            ..Default::default()
        };
        let row = UnitRow::new(CollectionType::Series, None, 2, 3, None, &unit).unwrap();
        assert_eq!(row.collection, "serie");
        assert_eq!(row.position, 2);
        assert!(row.has_links);
        assert_eq!(row.collection().unwrap(), CollectionType::Series);
        assert_eq!(row.number().unwrap(), 3);
        assert_eq!(row.into_unit(vec![], vec![]), unit);
    }

    #[test]
    fn test_empty_links_survive() {
        let unit = RecordingUnit { links: Some(Links::default()), ..Default::default() };
        let row = UnitRow::new(CollectionType::Special, Some(1), 0, 1, Some("a"), &unit).unwrap();
        assert_eq!(row.letter.as_deref(), Some("a"));
        assert_eq!(row.into_unit(vec![], vec![]).links, Some(Links::default()));
    }

    #[test]
    fn test_invalid_stored_values() {
        let mut row = UnitRow::new(CollectionType::Series, None, 0, 1, None, &RecordingUnit::default()).unwrap();
        row.number = -1;
        row.collection = "hörbuch".to_string();
        assert!(matches!(&*row.number().unwrap_err(), ErrorKind::InvalidData("number")));
        assert!(matches!(&*row.collection().unwrap_err(), ErrorKind::InvalidData("collection")));
    }
}
