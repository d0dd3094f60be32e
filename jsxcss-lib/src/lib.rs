//! Extracts inline `style={{ ... }}` objects from JSX into a stylesheet of
//! deduplicated classes and rewrites the markup to reference them.
//!
//! ```text
//! Document ─▶ Rewriter ─┬─▶ parser::declaration ─▶ style::corrections
//!                       │                                 │
//!                       │         style::index  ◀─────────┘
//!                       ▼              │
//!               rewritten markup   style::emit ─▶ stylesheet
//!                       └───────┬──────┘
//!                               ▼
//!                            writer
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod jsxcss_generate;
pub mod parser;
pub mod rewrite;
pub mod style;
pub mod writer;

pub use error::{Error, Result};
