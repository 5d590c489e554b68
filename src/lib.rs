//! find-dupes: find duplicate files by content hash and remove redundant copies.

pub mod cross_set;
pub mod delete;
pub mod error;
pub mod hash;
pub mod interactive;
pub mod listing;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod tui;
pub mod types;

pub use error::{Error, Result};
