//! # Brain Module
//!
//! Fast, non-network analysis of a question: which topic it belongs to and
//! which canned answer the demo responder gives.
//!
//! ## Components
//! - `rules`: ordered `(matcher, outcome)` tables, first match wins
//! - `tagger`: topic classification
//! - `answers`: canned answer cascade

pub mod answers;
pub mod rules;
pub mod tagger;

pub use answers::respond;
pub use tagger::classify;
