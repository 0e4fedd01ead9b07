//! Metadata extraction: turn an entity declaration into an `EntityDescriptor`
//!
//! Every field is classified once here. Downstream code never looks at the raw
//! declaration again.

use std::collections::BTreeSet;

use miette::Diagnostic;
use thiserror::Error;

use super::decl::{DeclId, DeclarationSet, QualifiedName, TypeRef};

/// Generation failures that abort a single declaration
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GenerateError {
    #[error("cannot generate a companion for `{declaration}`: every field is static or marked transient")]
    #[diagnostic(
        code(realmgen::no_eligible_fields),
        help("declare at least one instance field without the transient marker")
    )]
    NoEligibleFields { declaration: QualifiedName },

    #[error("declaration #{index} is not part of this round ({len} declarations)")]
    #[diagnostic(
        code(realmgen::unknown_declaration),
        help("pass ids obtained from the same declaration set")
    )]
    UnknownDeclaration { index: usize, len: usize },
}

impl GenerateError {
    pub(crate) fn unknown(set: &DeclarationSet, id: DeclId) -> Self {
        GenerateError::UnknownDeclaration {
            index: id.index(),
            len: set.len(),
        }
    }

    /// Source declaration the failure is attributed to, when it exists
    pub fn declaration(&self) -> Option<&QualifiedName> {
        match self {
            GenerateError::NoEligibleFields { declaration } => Some(declaration),
            GenerateError::UnknownDeclaration { .. } => None,
        }
    }
}

/// Why a field is left out of the companion class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Type-level member
    Static,
    /// Carries the transient marker
    Transient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
    pub exclusion: Option<Exclusion>,
}

impl FieldDescriptor {
    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }
}

/// Typed view of one entity declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub qualified_source_name: QualifiedName,
    pub primary_key: String,
    pub ignores: BTreeSet<String>,
    /// All fields in declaration order, excluded ones included
    pub fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    /// Fields that make it into the companion class, in declaration order
    pub fn eligible_fields(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields.iter().filter(|field| !field.is_excluded())
    }

    /// The primary key is also listed in `ignores`; the ignore entry has no effect
    pub fn primary_key_also_ignored(&self) -> bool {
        self.ignores.contains(&self.primary_key)
            && self.eligible_fields().any(|field| field.name == self.primary_key)
    }
}

/// Build the descriptor for `id`, failing when no field survives exclusion
pub fn extract(set: &DeclarationSet, id: DeclId) -> Result<EntityDescriptor, GenerateError> {
    let decl = set.get(id).ok_or_else(|| GenerateError::unknown(set, id))?;
    let meta = decl.entity.clone().unwrap_or_default();

    let fields: Vec<FieldDescriptor> = decl
        .fields
        .iter()
        .map(|field| {
            let exclusion = if field.is_static {
                Some(Exclusion::Static)
            } else if field.is_transient {
                Some(Exclusion::Transient)
            } else {
                None
            };
            FieldDescriptor {
                name: field.name.clone(),
                ty: field.ty.clone(),
                exclusion,
            }
        })
        .collect();

    let descriptor = EntityDescriptor {
        qualified_source_name: set.qualified_name(id),
        primary_key: meta.primary_key,
        ignores: meta.ignores.into_iter().collect(),
        fields,
    };

    if descriptor.eligible_fields().next().is_none() {
        return Err(GenerateError::NoEligibleFields {
            declaration: descriptor.qualified_source_name,
        });
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::decl::{EntityMeta, FieldDecl, Primitive, TypeDecl};

    fn long() -> TypeRef {
        TypeRef::Primitive(Primitive::Long)
    }

    fn single(decl: TypeDecl) -> (DeclarationSet, DeclId) {
        let mut set = DeclarationSet::new();
        let id = set.add(decl).unwrap();
        (set, id)
    }

    #[test]
    fn test_extract_classifies_fields() {
        let (set, id) = single(
            TypeDecl::new("p", "Photo")
                .with_entity(EntityMeta::new("id").with_ignores(["cachedBitmapRef"]))
                .with_field(FieldDecl::new("id", long()))
                .with_field(FieldDecl::new("COUNTER", long()).static_member())
                .with_field(FieldDecl::new("tempFlag", TypeRef::string()).transient()),
        );
        let descriptor = extract(&set, id).unwrap();
        let exclusions: Vec<_> = descriptor.fields.iter().map(|f| f.exclusion).collect();
        assert_eq!(exclusions, [None, Some(Exclusion::Static), Some(Exclusion::Transient)]);
        assert_eq!(descriptor.eligible_fields().count(), 1);
        assert_eq!(descriptor.qualified_source_name.as_str(), "p.Photo");
    }

    #[test]
    fn test_static_wins_over_transient() {
        let (set, id) = single(
            TypeDecl::new("p", "A")
                .with_entity(EntityMeta::new("id"))
                .with_field(FieldDecl::new("id", long()))
                .with_field(FieldDecl::new("x", long()).static_member().transient()),
        );
        assert_eq!(extract(&set, id).unwrap().fields[1].exclusion, Some(Exclusion::Static));
    }

    #[test]
    fn test_all_excluded_is_error() {
        let (set, id) = single(
            TypeDecl::new("p", "Ghost")
                .with_entity(EntityMeta::new("id"))
                .with_field(FieldDecl::new("a", long()).transient())
                .with_field(FieldDecl::new("b", long()).static_member()),
        );
        let err = extract(&set, id).unwrap_err();
        assert_eq!(
            err,
            GenerateError::NoEligibleFields {
                declaration: QualifiedName::new("p", ["Ghost"])
            }
        );
    }

    #[test]
    fn test_no_fields_is_error() {
        let (set, id) = single(TypeDecl::new("p", "Empty").with_entity(EntityMeta::new("id")));
        assert!(extract(&set, id).is_err());
    }

    #[test]
    fn test_foreign_id_is_error() {
        let mut other = DeclarationSet::new();
        other.add(TypeDecl::new("p", "A")).unwrap();
        let foreign = other.add(TypeDecl::new("p", "B")).unwrap();

        let (set, _) = single(TypeDecl::new("p", "Only").with_entity(EntityMeta::new("id")));
        let err = extract(&set, foreign).unwrap_err();
        assert_eq!(err, GenerateError::UnknownDeclaration { index: 1, len: 1 });
        assert_eq!(err.declaration(), None);
    }

    #[test]
    fn test_primary_key_also_ignored() {
        let (set, id) = single(
            TypeDecl::new("p", "A")
                .with_entity(EntityMeta::new("id").with_ignores(["id"]))
                .with_field(FieldDecl::new("id", long())),
        );
        assert!(extract(&set, id).unwrap().primary_key_also_ignored());
    }

    #[test]
    fn test_error_carries_diagnostic_code() {
        let err = GenerateError::NoEligibleFields {
            declaration: QualifiedName::new("p", ["A"]),
        };
        let code = miette::Diagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("realmgen::no_eligible_fields"));
    }
}
