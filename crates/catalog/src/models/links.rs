/// External resources associated with a recording.
///
/// Each value is either a path relative to the web data directory or an
/// absolute URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Links {
    /// The recording's own metadata document
    pub json: Option<String>,
    /// FFmpeg metadata file with chapter marks
    pub ffmetadata: Option<String>,
    /// Ripping log of the source CD
    pub xld_log: Option<String>,
    pub cover: Option<String>,
    pub cover_itunes: Option<String>,
    pub cover_kosmos: Option<String>,
}
impl Links {
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The present links with their serialized field names, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("json", &self.json),
            ("ffmetadata", &self.ffmetadata),
            ("xld_log", &self.xld_log),
            ("cover", &self.cover),
            ("cover_itunes", &self.cover_itunes),
            ("cover_kosmos", &self.cover_kosmos),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
    }
}
