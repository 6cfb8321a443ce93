//! A streaming, group-scoped, destination-dispatching RTF interpreter.
//!
//! The parser walks the byte stream once, maintaining a stack of brace-scoped
//! frames (group.rs) each carrying its own property map (properties.rs) and,
//! optionally, a destination (destination.rs) that RTF text and structural
//! events are routed to. Results are delivered incrementally through the
//! [`Output`] trait rather than built into an in-memory document tree.

mod charset;
mod control;
mod destination;
mod error;
mod field;
mod group;
mod info;
mod lexer;
mod numbering;
mod output;
mod parser;
mod properties;
mod reader;
mod types;

pub use error::{RtfError, RtfResult};
pub use field::{Field, FieldType};
pub use info::DocumentInfo;
pub use numbering::{Numbering, NumberingStyle};
pub use output::{Context, Output};
pub use parser::{ParsedMeta, ParserOptions, parse};
pub use types::{Alignment, Color, ColorTable, Font, FontFamily, FontTable};
