//! Frontend: from host declarations to validated entity descriptors
//!
//! - `decl` - declaration model supplied by the host (JSON-loadable)
//! - `discover` - picks entity declarations out of a round
//! - `extract` - classifies fields and builds `EntityDescriptor`s
//! - `names` - derives the companion's package and simple name
//! - `diagnostics` - errors and warnings reported back to the host

pub mod decl;
pub mod diagnostics;
pub mod discover;
pub mod extract;
pub mod names;
