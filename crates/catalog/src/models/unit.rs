use super::{Chapter, Links};

/// The attribute set shared by [`Episode`](super::Episode) and [`Part`](super::Part).
///
/// A recording unit on its own never appears in a catalog; it is always
/// embedded in one of the numbered entities. Every attribute is optional, and
/// an optional sequence is either absent or non-empty (empty sequences are
/// dropped when encoding).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingUnit {
    /// `titel`
    pub title: Option<String>,
    /// `autor`
    pub author: Option<String>,
    /// `hörspielskriptautor`
    pub script_author: Option<String>,
    /// `beschreibung`
    pub description: Option<String>,
    /// `veröffentlichungsdatum`, kept verbatim (usually `YYYY-MM-DD`)
    pub release_date: Option<String>,
    /// `kapitel`
    pub chapters: Option<Vec<Chapter>>,
    /// `sprecher`: groups of speaker names, typically role followed by actor
    pub speakers: Option<Vec<Vec<String>>>,
    /// `links`
    pub links: Option<Links>,
}
impl RecordingUnit {
    /// A unit with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Default::default() }
    }

    /// Chapters in recording order; empty if there are none.
    pub fn chapters(&self) -> &[Chapter] {
        self.chapters.as_deref().unwrap_or_default()
    }

    /// Speaker groups in listing order; empty if there are none.
    pub fn speakers(&self) -> &[Vec<String>] {
        self.speakers.as_deref().unwrap_or_default()
    }
}
