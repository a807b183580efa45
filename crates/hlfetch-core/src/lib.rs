//! Core engine for hlfetch.
//!
//! Fetches tree-sitter `highlights.scm` query files, one per language, and
//! lays them out as `<root>/<language>/highlights.scm`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod layout;
pub mod logging;
pub mod runner;
pub mod storage;
