//! SQLite storage for catalogs.
//!
//! The database holds the same tree as the JSON documents, flattened into
//! three tables:
//! - **units**: episodes and parts, with their recording unit attributes and
//!   links. Parts reference their episode through `parent_id`.
//! - **chapters**: ordered chapter marks per unit.
//! - **speakers**: ordered speaker groups per unit, one row per name.
//!
//! Every sequence carries an explicit `position` column, so loading a catalog
//! reproduces the stored listing order exactly.

mod db;
pub mod error;
mod models;
mod repo;

pub use crate::db::Database;
pub use crate::repo::Repository;
