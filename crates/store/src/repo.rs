//! Repository for whole catalogs.
//!
//! The catalog is read-mostly and always handled as one unit: saving replaces
//! everything that was stored before, loading rebuilds the complete tree.

use crate::Database;
use crate::error::{ErrorKind, Result};
use crate::models::{ChapterRow, SpeakerRow, UnitRow, group_speakers};
use dreimeta_catalog::models::{Catalog, Chapter, CollectionType, Episode, Part, RecordingUnit};
use exn::{OptionExt, ResultExt};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument};

/// Repository for reading and writing the catalog stored in the database.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
    dry_run: bool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone(), dry_run: false }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    ///
    /// In a dry run, [`save`](Self::save) validates but never writes.
    pub fn new(pool: SqlitePool, dry_run: bool) -> Self {
        Self { pool, dry_run }
    }

    // =========================================================================
    // Write
    // =========================================================================

    /// Replace the stored catalog with `catalog`.
    ///
    /// The catalog is validated first. Deleting the old rows and inserting the
    /// new ones happens in a single transaction, so readers never observe a
    /// partially written catalog.
    #[instrument(skip_all, fields(episodes = catalog.len(), dry_run = self.dry_run))]
    pub async fn save(&self, catalog: &Catalog) -> Result<()> {
        catalog.validate().or_raise(|| ErrorKind::Catalog)?;
        if self.dry_run {
            return Ok(());
        }
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        // Chapters and speakers cascade.
        sqlx::query("DELETE FROM units").execute(&mut *tx).await.or_raise(|| ErrorKind::Database)?;
        for (collection, episodes) in catalog.collections() {
            for (position, episode) in episodes.iter().enumerate() {
                let row = UnitRow::new(collection, None, position, episode.number(), None, &episode.unit)?;
                let episode_id = Self::insert_unit(&mut *tx, row, &episode.unit).await?;
                for (position, part) in episode.parts().iter().enumerate() {
                    let row = UnitRow::new(collection, Some(episode_id), position, part.number(), part.letter(), &part.unit)?;
                    Self::insert_unit(&mut *tx, row, &part.unit).await?;
                }
            }
            debug!(%collection, episodes = episodes.len(), "stored collection");
        }
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        info!("catalog saved");
        Ok(())
    }

    /// Insert one unit with its chapters and speakers, returning its id.
    async fn insert_unit(conn: &mut SqliteConnection, row: UnitRow, unit: &RecordingUnit) -> Result<i64> {
        let unit_id: i64 = sqlx::query_scalar(include_str!("../queries/insert_unit.sql"))
            .bind(row.collection)
            .bind(row.parent_id)
            .bind(row.position)
            .bind(row.number)
            .bind(row.letter)
            .bind(row.title)
            .bind(row.author)
            .bind(row.script_author)
            .bind(row.description)
            .bind(row.release_date)
            .bind(row.has_links)
            .bind(row.link_json)
            .bind(row.link_ffmetadata)
            .bind(row.link_xld_log)
            .bind(row.link_cover)
            .bind(row.link_cover_itunes)
            .bind(row.link_cover_kosmos)
            .fetch_one(&mut *conn)
            .await
            .or_raise(|| ErrorKind::Database)?;
        for (position, chapter) in unit.chapters().iter().enumerate() {
            sqlx::query(include_str!("../queries/insert_chapter.sql"))
                .bind(unit_id)
                .bind(i64::try_from(position).or_raise(|| ErrorKind::InvalidData("chapter position"))?)
                .bind(chapter.title())
                .bind(chapter.start())
                .bind(chapter.end())
                .execute(&mut *conn)
                .await
                .or_raise(|| ErrorKind::Database)?;
        }
        for (group_position, group) in unit.speakers().iter().enumerate() {
            let group_position = i64::try_from(group_position).or_raise(|| ErrorKind::InvalidData("speaker group"))?;
            // Empty groups still take their place in the sequence.
            let names: Vec<Option<&str>> = if group.is_empty() {
                vec![None]
            } else {
                group.iter().map(|name| Some(name.as_str())).collect()
            };
            for (position, name) in names.into_iter().enumerate() {
                sqlx::query(include_str!("../queries/insert_speaker.sql"))
                    .bind(unit_id)
                    .bind(group_position)
                    .bind(i64::try_from(position).or_raise(|| ErrorKind::InvalidData("speaker position"))?)
                    .bind(name)
                    .execute(&mut *conn)
                    .await
                    .or_raise(|| ErrorKind::Database)?;
            }
        }
        Ok(unit_id)
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Load the stored catalog.
    ///
    /// Returns [`ErrorKind::Empty`] if nothing has been saved yet, and
    /// [`ErrorKind::Catalog`] if the stored rows do not form a valid catalog,
    /// including rows that lack any series episode.
    #[instrument(skip_all)]
    pub async fn load(&self) -> Result<Catalog> {
        let units: Vec<UnitRow> = sqlx::query_as(include_str!("../queries/select_units.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let chapter_rows: Vec<ChapterRow> = sqlx::query_as(include_str!("../queries/select_chapters.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        let speaker_rows: Vec<SpeakerRow> = sqlx::query_as(include_str!("../queries/select_speakers.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        debug!(units = units.len(), chapters = chapter_rows.len(), speakers = speaker_rows.len(), "fetched rows");

        let mut chapters: HashMap<i64, Vec<Chapter>> = HashMap::new();
        for row in chapter_rows {
            chapters.entry(row.unit_id).or_default().push(row.into());
        }
        let mut speakers: HashMap<i64, Vec<SpeakerRow>> = HashMap::new();
        for row in speaker_rows {
            speakers.entry(row.unit_id).or_default().push(row);
        }
        let mut unit_of = |row: UnitRow| {
            let unit_id = row.unit_id;
            row.into_unit(
                chapters.remove(&unit_id).unwrap_or_default(),
                group_speakers(speakers.remove(&unit_id).unwrap_or_default()),
            )
        };

        // Episodes come first (ordered by position), parts afterwards.
        let mut collections: BTreeMap<CollectionType, Vec<Episode>> = BTreeMap::new();
        let mut episode_index: HashMap<i64, (CollectionType, usize)> = HashMap::new();
        for row in units {
            let collection = row.collection()?;
            let number = row.number()?;
            match row.parent_id {
                None => {
                    let episodes = collections.entry(collection).or_default();
                    episode_index.insert(row.unit_id, (collection, episodes.len()));
                    episodes.push(Episode::with_unit(number, unit_of(row)));
                },
                Some(parent_id) => {
                    let (collection, index) = *episode_index
                        .get(&parent_id)
                        .ok_or_raise(|| ErrorKind::InvalidData("part without episode"))?;
                    let mut part = Part::with_unit(number, RecordingUnit::default());
                    part.letter = row.letter.clone();
                    part.unit = unit_of(row);
                    collections
                        .get_mut(&collection)
                        .and_then(|episodes| episodes.get_mut(index))
                        .ok_or_raise(|| ErrorKind::InvalidData("part without episode"))?
                        .parts
                        .get_or_insert_with(Vec::new)
                        .push(part);
                },
            }
        }

        if collections.is_empty() {
            exn::bail!(ErrorKind::Empty);
        }
        let catalog = Catalog {
            series: collections.remove(&CollectionType::Series).unwrap_or_default(),
            specials: collections.remove(&CollectionType::Special),
            short_stories: collections.remove(&CollectionType::ShortStories),
            spinoffs: collections.remove(&CollectionType::Spinoff),
        };
        catalog.validate().or_raise(|| ErrorKind::Catalog)?;
        info!(episodes = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Number of stored episodes per collection. Collections without any
    /// episodes are omitted.
    pub async fn counts(&self) -> Result<BTreeMap<CollectionType, u64>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(include_str!("../queries/count_episodes.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        rows.into_iter()
            .map(|(collection, episodes)| {
                Ok((
                    collection.parse::<CollectionType>().or_raise(|| ErrorKind::InvalidData("collection"))?,
                    u64::try_from(episodes).or_raise(|| ErrorKind::InvalidData("episode count"))?,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreimeta_catalog::models::Links;

    fn catalog() -> Catalog {
        let mut first = Episode::with_unit(
            1,
            RecordingUnit {
                title: Some("und der Super-Papagei".to_string()),
                author: Some("Robert Arthur".to_string()),
                chapters: Some(vec![Chapter::from(("Start", 0, 300)), Chapter::new("Ende", Some(300), None)]),
                speakers: Some(vec![
                    vec!["Justus Jonas".to_string(), "Oliver Rohrbeck".to_string()],
                    vec!["Erzähler".to_string()],
                ]),
                links: Some(Links { json: Some("serie/001.json".to_string()), ..Default::default() }),
                ..Default::default()
            },
        );
        let mut part = Part::with_unit(2, RecordingUnit::titled("Teil zwei"));
        part.letter = Some("b".to_string());
        first.parts = Some(vec![Part::new(1), part]);
        // Listing order is not numeric order and must be preserved.
        let mut catalog = Catalog::new(vec![Episode::new(3), first, Episode::new(2)]);
        catalog.specials = Some(vec![Episode::with_unit(1, RecordingUnit::titled("Spezial"))]);
        catalog.spinoffs = Some(vec![Episode::new(1)]);
        catalog
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let catalog = catalog();
        repo.save(&catalog).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), catalog);
        db.close().await;
    }

    #[tokio::test]
    async fn test_save_replaces_previous_catalog() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        repo.save(&catalog()).await.unwrap();
        let smaller = Catalog::new(vec![Episode::new(9)]);
        repo.save(&smaller).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), smaller);
        let chapters: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chapters").fetch_one(db.pool()).await.unwrap();
        assert_eq!(chapters.0, 0);
        db.close().await;
    }

    #[tokio::test]
    async fn test_load_empty_database() {
        let db = Database::connect_in_memory().await.unwrap();
        let err = Repository::from(&db).load().await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Empty));
        db.close().await;
    }

    #[tokio::test]
    async fn test_load_without_series_is_inconsistent() {
        let db = Database::connect_in_memory().await.unwrap();
        sqlx::query("INSERT INTO units (collection, position, number) VALUES ('spezial', 0, 1)")
            .execute(db.pool())
            .await
            .unwrap();
        let err = Repository::from(&db).load().await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Catalog));
        db.close().await;
    }

    #[tokio::test]
    async fn test_empty_speaker_groups_survive() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let speakers = vec![vec!["A".to_string()], vec![], vec!["B".to_string()], vec![]];
        let catalog = Catalog::new(vec![Episode::with_unit(
            1,
            RecordingUnit { speakers: Some(speakers.clone()), ..Default::default() },
        )]);
        repo.save(&catalog).await.unwrap();
        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded.series[0].unit.speakers, Some(speakers));
        db.close().await;
    }

    #[tokio::test]
    async fn test_dry_run_does_not_write() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::new(db.pool().clone(), true);
        repo.save(&catalog()).await.unwrap();
        assert!(repo.counts().await.unwrap().is_empty());
        db.close().await;
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_catalog() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        let err = repo.save(&Catalog::new(vec![Episode::new(1), Episode::new(1)])).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Catalog));
        db.close().await;
    }

    #[tokio::test]
    async fn test_counts() {
        let db = Database::connect_in_memory().await.unwrap();
        let repo = Repository::from(&db);
        repo.save(&catalog()).await.unwrap();
        let counts = repo.counts().await.unwrap();
        assert_eq!(counts.get(&CollectionType::Series), Some(&3));
        assert_eq!(counts.get(&CollectionType::Special), Some(&1));
        assert_eq!(counts.get(&CollectionType::ShortStories), None);
        assert_eq!(counts.get(&CollectionType::Spinoff), Some(&1));
        db.close().await;
    }
}
