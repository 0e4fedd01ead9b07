//! In-memory shape of a companion class
//!
//! A `GeneratedClassSpec` is derived from one `EntityDescriptor` and serialized by an
//! emitter. Naming, role assignment and field filtering all happen here so emitters
//! only deal with layout.

use crate::config::GeneratorConfig;
use crate::frontend::decl::{ClassName, QualifiedName};
use crate::frontend::extract::{EntityDescriptor, FieldDescriptor};
use crate::frontend::names::GeneratedName;

/// How a companion field is tagged for the persistence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Normal,
    PrimaryKey,
    Ignored,
}

impl FieldRole {
    /// The primary key wins when a name is also listed in `ignores`
    pub fn of(name: &str, descriptor: &EntityDescriptor) -> Self {
        if name == descriptor.primary_key {
            FieldRole::PrimaryKey
        } else if descriptor.ignores.contains(name) {
            FieldRole::Ignored
        } else {
            FieldRole::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedField {
    pub field: FieldDescriptor,
    pub role: FieldRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClassSpec {
    pub package: String,
    pub simple_name: String,
    pub base_class: ClassName,
    pub primary_key_marker: ClassName,
    pub ignore_marker: ClassName,
    /// Eligible fields in declaration order
    pub fields: Vec<GeneratedField>,
    /// Source declaration this class is generated for
    pub originating: QualifiedName,
}

impl GeneratedClassSpec {
    pub fn build(descriptor: &EntityDescriptor, name: GeneratedName, config: &GeneratorConfig) -> Self {
        let fields = descriptor
            .eligible_fields()
            .map(|field| GeneratedField {
                field: field.clone(),
                role: FieldRole::of(&field.name, descriptor),
            })
            .collect();
        Self {
            package: name.package,
            simple_name: name.simple_name,
            base_class: config.base_class.clone(),
            primary_key_marker: config.primary_key_marker.clone(),
            ignore_marker: config.ignore_marker.clone(),
            fields,
            originating: descriptor.qualified_source_name.clone(),
        }
    }

    pub fn qualified_name(&self) -> String {
        GeneratedName {
            package: self.package.clone(),
            simple_name: self.simple_name.clone(),
        }
        .qualified()
    }

    pub fn marker(&self, role: FieldRole) -> Option<&ClassName> {
        match role {
            FieldRole::Normal => None,
            FieldRole::PrimaryKey => Some(&self.primary_key_marker),
            FieldRole::Ignored => Some(&self.ignore_marker),
        }
    }
}
