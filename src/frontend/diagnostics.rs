//! Diagnostics reported back to the host toolchain
//!
//! Errors fail the build for the declaration they name; warnings never do.

use std::fmt;

use super::decl::QualifiedName;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message attributed to the source declaration it concerns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub origin: Option<QualifiedName>,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            origin: None,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: QualifiedName) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(origin) = &self.origin {
            write!(f, "\n  --> {}", origin)?;
        }
        for note in &self.notes {
            write!(f, "\n  = note: {}", note)?;
        }
        for hint in &self.hints {
            write!(f, "\n  = hint: {}", hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// Message catalog
// ============================================================================

pub mod messages {
    use super::*;
    use crate::frontend::extract::{EntityDescriptor, GenerateError};

    /// Fatal diagnostic for a declaration whose generation was aborted
    pub fn generation_failed(err: &GenerateError) -> Diagnostic {
        let mut diagnostic = Diagnostic::error(err.to_string());
        if let Some(declaration) = err.declaration() {
            diagnostic = diagnostic.with_origin(declaration.clone());
        }
        if let Some(help) = miette::Diagnostic::help(err) {
            diagnostic = diagnostic.with_hint(help.to_string());
        }
        diagnostic
    }

    /// The artifact sink refused a generated file
    pub fn write_failed(artifact: &str, origin: &QualifiedName, cause: &dyn std::error::Error) -> Diagnostic {
        Diagnostic::warning(format!("could not write generated class {}: {}", artifact, cause))
            .with_origin(origin.clone())
            .with_note("a previous write of the same class is assumed to be identical")
    }

    /// The primary key is also listed as ignored; it keeps only the primary-key marker
    pub fn primary_key_ignored(descriptor: &EntityDescriptor) -> Diagnostic {
        Diagnostic::warning(format!(
            "field `{}` is both the primary key and listed in ignores",
            descriptor.primary_key
        ))
        .with_origin(descriptor.qualified_source_name.clone())
        .with_note("the primary-key marker takes precedence; the field is not marked ignored")
        .with_hint(format!("remove `{}` from ignores", descriptor.primary_key))
    }
}
