use super::{Part, RecordingUnit};
use std::ops::Deref;

/// A numbered top-level recording, optionally split into [`Part`]s.
///
/// The number is fixed at construction; the shared attributes live in the
/// embedded [`RecordingUnit`] and are also reachable through `Deref`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    number: u32,
    /// `teile`
    pub parts: Option<Vec<Part>>,
    pub unit: RecordingUnit,
}
impl Episode {
    pub fn new(number: u32) -> Self {
        Self::with_unit(number, RecordingUnit::default())
    }

    pub fn with_unit(number: u32, unit: RecordingUnit) -> Self {
        Self { number, parts: None, unit }
    }

    /// `nummer`, unique within the containing collection.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Parts in listing order; empty if the episode is not split.
    pub fn parts(&self) -> &[Part] {
        self.parts.as_deref().unwrap_or_default()
    }
}
impl Deref for Episode {
    type Target = RecordingUnit;
    fn deref(&self) -> &Self::Target {
        &self.unit
    }
}
impl AsRef<RecordingUnit> for Episode {
    fn as_ref(&self) -> &RecordingUnit {
        &self.unit
    }
}
