//! Source layout primitives shared by code emitters
//!
//! - `config` - indentation and spacing settings
//! - `writer` - indentation-aware string builder

pub mod config;
pub mod writer;

pub use config::FormatConfig;
pub use writer::SourceWriter;
