mod chapter;
mod speaker;
mod unit;

pub(crate) use self::chapter::ChapterRow;
pub(crate) use self::speaker::{SpeakerRow, group as group_speakers};
pub(crate) use self::unit::UnitRow;
