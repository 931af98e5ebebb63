//! Vocabulary Worksheet Library
//!
//! This crate turns English/Korean word lists into printable quizzes:
//! - `worksheet`: word pairs, hide modes, cleaning and shuffling
//! - `pdf`: Korean font lookup, sheet layout, and PDF rendering
//! - `server`: the HTTP form, `/generate` download, and `/health` check

pub mod error;
pub mod pdf;
pub mod server;
pub mod worksheet;

pub use error::{Error, Result};
pub use pdf::{
    build_worksheet, render_worksheet, FontCache, FontLocator, FontStatus, GeneratedDocument,
};
pub use server::{
    router, run_server, run_server_with_config, AppState, ServerConfig, WorksheetForm,
};
pub use worksheet::{HideMode, RenderRequest, WordPair};
