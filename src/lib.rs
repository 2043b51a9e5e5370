//! semlayer: concept-filtered, embedding-ranked document retrieval.
//!
//! A query is matched against a controlled concept vocabulary; documents
//! sharing at least one matched concept form the candidate set, which is
//! ranked by cosine similarity and returned with short snippets.

pub mod app;
pub mod cli;
pub mod concepts;
pub mod config;
pub mod documents;
pub mod error;
pub mod search;
pub mod test_utils;

pub use error::{Result, SemError};
