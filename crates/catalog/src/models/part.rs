use super::RecordingUnit;
use std::ops::Deref;

/// A numbered sub-recording of an [`Episode`](super::Episode).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    number: u32,
    /// `buchstabe`: short discriminator such as `"a"`
    pub letter: Option<String>,
    pub unit: RecordingUnit,
}
impl Part {
    pub fn new(number: u32) -> Self {
        Self::with_unit(number, RecordingUnit::default())
    }

    pub fn with_unit(number: u32, unit: RecordingUnit) -> Self {
        Self { number, letter: None, unit }
    }

    /// `teilNummer`, unique within the owning episode.
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref()
    }
}
impl Deref for Part {
    type Target = RecordingUnit;
    fn deref(&self) -> &Self::Target {
        &self.unit
    }
}
impl AsRef<RecordingUnit> for Part {
    fn as_ref(&self) -> &RecordingUnit {
        &self.unit
    }
}
