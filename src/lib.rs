#![forbid(unsafe_code)]
//! realmgen: persistence companion-class generator
//!
//! A host build tool hands realmgen the type declarations of one compilation round.
//! Every declaration carrying the entity marker gets a companion class that extends
//! the persistence base type, mirrors the eligible fields and tags the primary-key and
//! ignored fields with the persistence layer's own annotations.
//!
//! The pipeline is:
//! 1. `frontend::discover` picks entity declarations out of the round
//! 2. `frontend::extract` validates fields and builds an `EntityDescriptor`
//! 3. `frontend::names` derives the companion's package and simple name
//! 4. `backend` builds a `GeneratedClassSpec`, renders Java source and submits it to a `Filer`
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Invalid input
//!   surfaces as a `Diagnostic` or a typed error, never a panic.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod config;
pub mod format;
pub mod frontend;
pub mod processor;

pub use backend::filer::{Artifact, DirFiler, Filer, FilerError, MemoryFiler};
pub use backend::spec::{FieldRole, GeneratedClassSpec};
pub use config::{ConfigError, GeneratorConfig};
pub use format::FormatConfig;
pub use frontend::decl::{
    BoundKind, ClassName, DeclError, DeclId, DeclarationSet, EntityMeta, FieldDecl, QualifiedName, TypeDecl, TypeRef,
};
pub use frontend::diagnostics::{Diagnostic, Severity};
pub use frontend::extract::{EntityDescriptor, FieldDescriptor, GenerateError};
pub use processor::{Processor, RoundOutput};
