use std::fmt::{Display, Formatter, Result as FmtResult};

/// A named time range within a recording.
///
/// Offsets are milliseconds from the start of the recording. Chapters are
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chapter {
    title: String,
    start: Option<i64>,
    end: Option<i64>,
}
impl Chapter {
    pub fn new(title: impl Into<String>, start: Option<i64>, end: Option<i64>) -> Self {
        Self { title: title.into(), start, end }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> Option<i64> {
        self.start
    }

    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Length of the chapter, if both offsets are known.
    pub fn duration(&self) -> Option<i64> {
        Some(self.end? - self.start?)
    }
}
impl<T: Into<String>> From<(T, i64, i64)> for Chapter {
    fn from((title, start, end): (T, i64, i64)) -> Self {
        Chapter::new(title, Some(start), Some(end))
    }
}
impl Display for Chapter {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{} [{start}-{end}]", self.title),
            (Some(start), None) => write!(f, "{} [{start}-]", self.title),
            (None, Some(end)) => write!(f, "{} [-{end}]", self.title),
            (None, None) => write!(f, "{}", self.title),
        }
    }
}
