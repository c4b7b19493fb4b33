//! cefr-pos - POS tagging of CEFR-levelled documents
//!
//! Tags every sentence of a directory of plain-text documents, groups the
//! results by the CEFR level found in each file name, and writes
//! per-document tag dumps, a per-level POS matrix and frequency reports.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod freq;
pub mod level;
pub mod matrix;
pub mod models;
pub mod nlp;
pub mod pipeline;
pub mod reporters;

pub use error::{PipelineError, PipelineResult};
