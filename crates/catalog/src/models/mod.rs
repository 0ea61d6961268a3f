mod catalog;
mod chapter;
mod episode;
mod links;
mod part;
mod unit;

pub use self::catalog::{Catalog, CollectionType};
pub use self::chapter::Chapter;
pub use self::episode::Episode;
pub use self::links::Links;
pub use self::part::Part;
pub use self::unit::RecordingUnit;
