//! Companion class backend
//!
//! The pipeline is:
//! 1. `EntityDescriptor` + `GeneratedName` → `GeneratedClassSpec`
//! 2. `GeneratedClassSpec` → Java source text (`JavaEmitter`)
//! 3. Source text → host artifact sink (`Filer`)
//!
//! ## Module Organization
//!
//! - `spec.rs` - structured class representation and field roles
//! - `java_emitter.rs` - Java serializer, import resolution
//! - `filer.rs` - artifact sinks (in-memory and directory)

pub mod filer;
pub mod java_emitter;
pub mod spec;

pub use filer::{Artifact, DirFiler, Filer, FilerError, MemoryFiler};
pub use java_emitter::JavaEmitter;
pub use spec::{FieldRole, GeneratedClassSpec};
