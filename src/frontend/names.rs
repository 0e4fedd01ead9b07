//! Companion class naming
//!
//! `com.acme.Outer.Inner.Leaf` with prefix `Realm` becomes `com.acme.RealmOuter_Inner_Leaf`:
//! the nesting chain is flattened with underscores and the companion always lives at
//! top level in the outermost declaration's package.

use super::decl::{DeclId, DeclarationSet};
use super::extract::GenerateError;

const NESTING_SEPARATOR: &str = "_";

/// Resolved location of a generated class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneratedName {
    pub package: String,
    pub simple_name: String,
}

impl GeneratedName {
    /// `package.SimpleName`, or just `SimpleName` in the default package
    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }
}

pub fn generated_name(set: &DeclarationSet, id: DeclId, prefix: &str) -> Result<GeneratedName, GenerateError> {
    let mut decl = set.get(id).ok_or_else(|| GenerateError::unknown(set, id))?;
    let mut name = decl.name.clone();
    while let Some(parent) = decl.enclosing.and_then(|p| set.get(p)) {
        decl = parent;
        name = format!("{}{}{}", decl.name, NESTING_SEPARATOR, name);
    }
    Ok(GeneratedName {
        package: decl.package.clone(),
        simple_name: format!("{}{}", prefix, name),
    })
}
