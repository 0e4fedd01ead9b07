//! Type discovery: find the entity declarations of a round

use std::collections::HashSet;

use super::decl::{DeclId, DeclarationSet};

/// Entity declarations in submission order, deduplicated by qualified name.
///
/// When the host submits the same declaration more than once, the first entry wins.
pub fn discover(set: &DeclarationSet) -> Vec<DeclId> {
    let mut seen = HashSet::new();
    set.ids()
        .filter(|&id| set.get(id).is_some_and(|decl| decl.entity.is_some()))
        .filter(|&id| seen.insert(set.qualified_name(id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::decl::{EntityMeta, TypeDecl};

    #[test]
    fn test_discover_empty_round() {
        assert!(discover(&DeclarationSet::new()).is_empty());
    }

    #[test]
    fn test_discover_skips_unmarked() {
        let mut set = DeclarationSet::new();
        set.add(TypeDecl::new("p", "Plain")).unwrap();
        let marked = set.add(TypeDecl::new("p", "Marked").with_entity(EntityMeta::new("id"))).unwrap();
        assert_eq!(discover(&set), [marked]);
    }

    #[test]
    fn test_discover_keeps_order_and_dedups() {
        let mut set = DeclarationSet::new();
        let b = set.add(TypeDecl::new("p", "B").with_entity(EntityMeta::new("id"))).unwrap();
        let a = set.add(TypeDecl::new("p", "A").with_entity(EntityMeta::new("id"))).unwrap();
        set.add(TypeDecl::new("p", "B").with_entity(EntityMeta::new("other"))).unwrap();
        assert_eq!(discover(&set), [b, a]);
    }

    #[test]
    fn test_discover_nested_and_same_simple_name() {
        let mut set = DeclarationSet::new();
        let outer = set.add(TypeDecl::new("p", "Outer")).unwrap();
        let nested = set
            .add_nested(outer, TypeDecl::new("", "Item").with_entity(EntityMeta::new("id")))
            .unwrap();
        let top = set.add(TypeDecl::new("p", "Item").with_entity(EntityMeta::new("id"))).unwrap();
        assert_eq!(discover(&set), [nested, top]);
    }
}
