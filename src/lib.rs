// src/lib.rs
pub mod config;
pub mod dev;
pub mod error;
pub mod tables;

pub use config::GenConfig;
pub use error::{KeywordTableError, Result};
pub use tables::{KeywordTable, build_keyword_table};
