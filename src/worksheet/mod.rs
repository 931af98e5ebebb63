//! Worksheet domain: word pairs, hide modes, and request preparation
//!
//! Everything here is independent of HTTP and PDF output. The server turns
//! form fields into a [`RenderRequest`] through [`prepare_pairs`], and the
//! PDF builder consumes that request.

mod models;
mod prepare;
mod shuffle;

pub use models::{HideMode, RenderRequest, Reveal, WordPair};
pub use prepare::{pair_terms, prepare_pairs};
pub use shuffle::{KeepOrder, PairShuffler, SeededShuffler, ThreadRngShuffler};
