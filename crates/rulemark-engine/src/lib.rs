//! Regex-transform markdown to HTML conversion.
//!
//! No syntax tree, no grammar: a [`Parser`] holds an ordered registry of
//! named transforms, each pairing a pattern with a render function, and
//! `parse` runs them as successive whole-buffer scan-and-replace passes. The
//! output of one transform is the input of the next, so registration order
//! decides correctness - that control belongs to the integrator, and the
//! engine never reorders, deduplicates, or arbitrates overlapping markup.
//!
//! ```
//! use rulemark_engine::Parser;
//!
//! let parser = Parser::new();
//! let html = parser.parse("# Hello\n\n**Bold** text").unwrap();
//! assert!(html.contains("<h1>Hello</h1>"));
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

pub mod captures;
pub mod error;
pub mod features;
pub mod help;
pub mod parser;
pub mod pattern;
pub mod registry;

// Re-export key types for easier usage
pub use captures::CaptureBag;
pub use error::TransformError;
pub use help::DisplayMode;
pub use parser::Parser;
pub use pattern::Flags;
pub use registry::{Registry, RenderFn, Transform, TransformMeta};
