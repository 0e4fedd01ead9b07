//! Declaration model supplied by the host build tool
//!
//! A round is a `DeclarationSet`: an arena of type declarations in submission order.
//! Enclosing declarations are referenced by `DeclId` into the same arena, so a nested
//! `Outer.Inner.Leaf` is three entries linked leaf-to-root.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or assembling a declaration round
#[derive(Debug, Error)]
pub enum DeclError {
    #[error("invalid declaration round: {0}")]
    Json(#[from] serde_json::Error),

    #[error("declaration `{declaration}` names enclosing index {index}, but the round only has {len} declarations")]
    UnknownEnclosing {
        declaration: String,
        index: usize,
        len: usize,
    },

    #[error("declaration `{declaration}` is enclosed by itself")]
    EnclosingCycle { declaration: String },
}

/// A type reference that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid type reference `{input}`: {reason}")]
pub struct TypeRefParseError {
    pub input: String,
    pub reason: String,
}

impl TypeRefParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Identities
// ============================================================================

/// Index of a declaration inside its `DeclarationSet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(usize);

impl DeclId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dotted source identity of a declaration, e.g. `com.acme.Outer.Inner`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// Join a package and a chain of simple names (outermost first)
    pub fn new<'a>(package: &str, names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut out = String::from(package);
        for name in names {
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(name);
        }
        Self(out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Entity-level metadata attached to a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    /// Name of the field tagged as the primary key
    #[serde(default)]
    pub primary_key: String,
    /// Field names tagged as ignored by the persistence layer
    #[serde(default)]
    pub ignores: Vec<String>,
}

impl EntityMeta {
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            ignores: Vec::new(),
        }
    }

    pub fn with_ignores<I, S>(mut self, ignores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignores.extend(ignores.into_iter().map(Into::into));
        self
    }
}

/// A field declared on a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Type-level member (Java `static`)
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Carries the field-level transient marker
    #[serde(default, rename = "transient")]
    pub is_transient: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
            is_transient: false,
        }
    }

    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn transient(mut self) -> Self {
        self.is_transient = true;
        self
    }
}

/// A type declaration as seen by the host toolchain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple name
    pub name: String,
    /// Package; only read from the outermost declaration of a chain
    #[serde(default)]
    pub package: String,
    /// Lexically enclosing declaration
    #[serde(default)]
    pub enclosing: Option<DeclId>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    /// Present when the declaration carries the entity marker
    #[serde(default)]
    pub entity: Option<EntityMeta>,
}

impl TypeDecl {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            enclosing: None,
            fields: Vec::new(),
            entity: None,
        }
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_entity(mut self, meta: EntityMeta) -> Self {
        self.entity = Some(meta);
        self
    }
}

#[derive(Deserialize)]
struct RawRound {
    #[serde(default)]
    declarations: Vec<TypeDecl>,
}

/// All declarations visible in one round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationSet {
    decls: Vec<TypeDecl>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a round from JSON of the form `{"declarations": [...]}`
    pub fn from_json(json: &str) -> Result<Self, DeclError> {
        let raw: RawRound = serde_json::from_str(json)?;
        Self::from_decls(raw.declarations)
    }

    /// Build a set from declarations whose `enclosing` links index into `decls`
    pub fn from_decls(decls: Vec<TypeDecl>) -> Result<Self, DeclError> {
        let len = decls.len();
        for decl in &decls {
            if let Some(parent) = decl.enclosing
                && parent.0 >= len
            {
                return Err(DeclError::UnknownEnclosing {
                    declaration: decl.name.clone(),
                    index: parent.0,
                    len,
                });
            }
        }
        // A chain longer than the arena must revisit a declaration.
        for (start, decl) in decls.iter().enumerate() {
            let mut cursor = decl.enclosing;
            let mut steps = 0;
            while let Some(parent) = cursor {
                steps += 1;
                if parent.0 == start || steps > len {
                    return Err(DeclError::EnclosingCycle {
                        declaration: decl.name.clone(),
                    });
                }
                cursor = decls[parent.0].enclosing;
            }
        }
        Ok(Self { decls })
    }

    /// Append a declaration; its `enclosing` link must name an earlier entry
    pub fn add(&mut self, decl: TypeDecl) -> Result<DeclId, DeclError> {
        if let Some(parent) = decl.enclosing
            && parent.0 >= self.decls.len()
        {
            return Err(DeclError::UnknownEnclosing {
                declaration: decl.name,
                index: parent.0,
                len: self.decls.len(),
            });
        }
        self.decls.push(decl);
        Ok(DeclId(self.decls.len() - 1))
    }

    /// Append a declaration nested inside `parent`
    pub fn add_nested(&mut self, parent: DeclId, mut decl: TypeDecl) -> Result<DeclId, DeclError> {
        decl.enclosing = Some(parent);
        self.add(decl)
    }

    pub fn get(&self, id: DeclId) -> Option<&TypeDecl> {
        self.decls.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Ids in submission order
    pub fn ids(&self) -> impl Iterator<Item = DeclId> + '_ {
        (0..self.decls.len()).map(DeclId)
    }

    /// The declaration followed by its enclosing declarations, innermost first
    pub fn enclosing_chain(&self, id: DeclId) -> Vec<&TypeDecl> {
        let mut chain = Vec::new();
        let mut cursor = self.get(id);
        while let Some(decl) = cursor {
            chain.push(decl);
            cursor = decl.enclosing.and_then(|parent| self.get(parent));
        }
        chain
    }

    /// Source identity of a declaration: outermost package plus the nesting chain
    pub fn qualified_name(&self, id: DeclId) -> QualifiedName {
        let chain = self.enclosing_chain(id);
        let package = chain.last().map(|outer| outer.package.as_str()).unwrap_or("");
        QualifiedName::new(package, chain.iter().rev().map(|decl| decl.name.as_str()))
    }
}

// ============================================================================
// Type references
// ============================================================================

/// Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl Primitive {
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Char => "char",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "boolean" => Primitive::Boolean,
            "byte" => Primitive::Byte,
            "short" => Primitive::Short,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "char" => Primitive::Char,
            "float" => Primitive::Float,
            "double" => Primitive::Double,
            _ => return None,
        })
    }
}

/// A possibly nested class name: package plus simple names, outermost first
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName {
    package: String,
    simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    /// Parse `pkg.Outer.Inner` or `pkg/Outer.Inner`.
    ///
    /// Without a `/`, the package is every segment before the first one that starts
    /// with an upper-case letter (or all but the last segment when none does). Packages
    /// or classes that break that convention need the explicit `package/Class` form,
    /// e.g. `com.Example/Foo` for class `Foo` in package `com.Example`.
    pub fn parse(input: &str) -> Result<Self, TypeRefParseError> {
        let trimmed = input.trim();
        if let Some((package, names)) = trimmed.split_once('/') {
            let package_ok = package.is_empty() || package.split('.').all(is_identifier);
            if !package_ok || !names.split('.').all(is_identifier) {
                return Err(TypeRefParseError::new(input, "expected `package/Class`"));
            }
            return Ok(Self {
                package: package.to_string(),
                simple_names: names.split('.').map(str::to_string).collect(),
            });
        }

        let segments: Vec<&str> = trimmed.split('.').collect();
        if segments.iter().any(|s| !is_identifier(s)) {
            return Err(TypeRefParseError::new(input, "expected a dotted identifier"));
        }
        let split = segments
            .iter()
            .position(|s| s.starts_with(|c: char| c.is_ascii_uppercase()))
            .unwrap_or(segments.len() - 1);
        Ok(Self {
            package: segments[..split].join("."),
            simple_names: segments[split..].iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Innermost simple name
    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or("")
    }

    /// Simple name of the top-level class this name lives in
    pub fn top_level_simple_name(&self) -> &str {
        self.simple_names.first().map(String::as_str).unwrap_or("")
    }

    /// `Outer.Inner`, the name as written once the top-level class is imported
    pub fn nested_path(&self) -> String {
        self.simple_names.join(".")
    }

    /// The importable top-level class
    pub fn top_level(&self) -> ClassName {
        Self::new(self.package.clone(), self.top_level_simple_name())
    }

    /// `pkg.Outer.Inner`
    pub fn canonical(&self) -> String {
        QualifiedName::new(&self.package, self.simple_names.iter().map(String::as_str))
            .as_str()
            .to_string()
    }
}

/// Reparses to itself: the explicit `package/Class` form is needed only when the
/// dotted name would split differently.
impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let canonical = self.canonical();
        if Self::parse(&canonical).is_ok_and(|parsed| parsed == *self) {
            f.write_str(&canonical)
        } else {
            write!(f, "{}/{}", self.package, self.nested_path())
        }
    }
}

impl TryFrom<String> for ClassName {
    type Error = TypeRefParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClassName> for String {
    fn from(value: ClassName) -> Self {
        value.to_string()
    }
}

/// Direction of a wildcard bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKind {
    Extends,
    Super,
}

impl BoundKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BoundKind::Extends => "extends",
            BoundKind::Super => "super",
        }
    }
}

/// Declared type of a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Primitive(Primitive),
    Class(ClassName),
    Parameterized { raw: ClassName, args: Vec<TypeRef> },
    Array(Box<TypeRef>),
    /// `?`, `? extends T` or `? super T`; only valid as a type argument
    Wildcard { bound: Option<(BoundKind, Box<TypeRef>)> },
}

impl TypeRef {
    pub fn class(package: &str, simple_name: &str) -> Self {
        TypeRef::Class(ClassName::new(package, simple_name))
    }

    pub fn string() -> Self {
        Self::class("java.lang", "String")
    }

    /// Every class name mentioned by this type, in source order
    pub fn referenced_classes(&self) -> Vec<&ClassName> {
        let mut out = Vec::new();
        self.collect_classes(&mut out);
        out
    }

    fn collect_classes<'a>(&'a self, out: &mut Vec<&'a ClassName>) {
        match self {
            TypeRef::Primitive(_) => {}
            TypeRef::Class(name) => out.push(name),
            TypeRef::Parameterized { raw, args } => {
                out.push(raw);
                for arg in args {
                    arg.collect_classes(out);
                }
            }
            TypeRef::Array(component) => component.collect_classes(out),
            TypeRef::Wildcard { bound } => {
                if let Some((_, ty)) = bound {
                    ty.collect_classes(out);
                }
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.keyword()),
            TypeRef::Class(name) => write!(f, "{}", name),
            TypeRef::Parameterized { raw, args } => {
                write!(f, "{}<", raw)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeRef::Array(component) => write!(f, "{}[]", component),
            TypeRef::Wildcard { bound: None } => f.write_str("?"),
            TypeRef::Wildcard { bound: Some((kind, ty)) } => write!(f, "? {} {}", kind.keyword(), ty),
        }
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = TypeRefParser { input: s, rest: s };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if !parser.rest.is_empty() {
            return Err(TypeRefParseError::new(s, format!("unexpected trailing `{}`", parser.rest)));
        }
        Ok(ty)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = TypeRefParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Recursive-descent parser for
///
/// ```text
/// type := name ('<' arg (',' arg)* '>')? ('[' ']')*
/// name := dotted | dotted '/' dotted
/// arg  := type | '?' (('extends' | 'super') type)?
/// ```
struct TypeRefParser<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> TypeRefParser<'a> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if let Some(rest) = self.rest.strip_prefix(c) {
            self.rest = rest;
            true
        } else {
            false
        }
    }

    /// Consume `word` only when it is not the prefix of a longer identifier
    fn eat_keyword(&mut self, word: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(word) {
            Some(rest) if !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_' || c == '$') => {
                self.rest = rest;
                true
            }
            _ => false,
        }
    }

    fn error(&self, reason: impl Into<String>) -> TypeRefParseError {
        TypeRefParseError::new(self.input, reason)
    }

    fn parse_type(&mut self) -> Result<TypeRef, TypeRefParseError> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$' || c == '.' || c == '/'))
            .unwrap_or(self.rest.len());
        let name = &self.rest[..end];
        if name.is_empty() {
            return Err(self.error("expected a type name"));
        }
        self.rest = &self.rest[end..];

        let mut ty = match Primitive::from_keyword(name) {
            Some(p) => TypeRef::Primitive(p),
            None => {
                let raw = ClassName::parse(name).map_err(|e| self.error(e.reason))?;
                if self.eat('<') {
                    let mut args = vec![self.parse_arg()?];
                    while self.eat(',') {
                        args.push(self.parse_arg()?);
                    }
                    if !self.eat('>') {
                        return Err(self.error("unclosed type argument list"));
                    }
                    TypeRef::Parameterized { raw, args }
                } else {
                    TypeRef::Class(raw)
                }
            }
        };

        while self.eat('[') {
            if !self.eat(']') {
                return Err(self.error("expected `]`"));
            }
            ty = TypeRef::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn parse_arg(&mut self) -> Result<TypeRef, TypeRefParseError> {
        if !self.eat('?') {
            return self.parse_type();
        }
        let kind = if self.eat_keyword("extends") {
            BoundKind::Extends
        } else if self.eat_keyword("super") {
            BoundKind::Super
        } else {
            return Ok(TypeRef::Wildcard { bound: None });
        };
        let bound = self.parse_type()?;
        if matches!(bound, TypeRef::Primitive(_)) {
            return Err(self.error("wildcard bound must be a reference type"));
        }
        Ok(TypeRef::Wildcard {
            bound: Some((kind, Box::new(bound))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // TypeRef parsing tests
    // ========================================

    #[test]
    fn test_parse_primitive() {
        let ty: TypeRef = "long".parse().unwrap();
        assert_eq!(ty, TypeRef::Primitive(Primitive::Long));
    }

    #[test]
    fn test_parse_class_splits_package() {
        let ty: TypeRef = "java.lang.String".parse().unwrap();
        assert_eq!(ty, TypeRef::string());
    }

    #[test]
    fn test_parse_nested_class() {
        let name = ClassName::parse("com.acme.Outer.Inner").unwrap();
        assert_eq!(name.package(), "com.acme");
        assert_eq!(name.simple_name(), "Inner");
        assert_eq!(name.top_level_simple_name(), "Outer");
        assert_eq!(name.nested_path(), "Outer.Inner");
    }

    #[test]
    fn test_parse_default_package_class() {
        let name = ClassName::parse("Photo").unwrap();
        assert_eq!(name.package(), "");
        assert_eq!(name.canonical(), "Photo");
    }

    #[test]
    fn test_parse_explicit_package_separator() {
        let name = ClassName::parse("com.Example/Foo.Bar").unwrap();
        assert_eq!(name.package(), "com.Example");
        assert_eq!(name.nested_path(), "Foo.Bar");
        assert_eq!(name.canonical(), "com.Example.Foo.Bar");
        assert_eq!(name.to_string(), "com.Example/Foo.Bar");
        assert_eq!(ClassName::parse(&name.to_string()).unwrap(), name);

        // Conventional names keep the dotted form
        assert_eq!(ClassName::parse("com.acme/Outer").unwrap().to_string(), "com.acme.Outer");
        assert_eq!(ClassName::parse("/lower").unwrap(), ClassName::new("", "lower"));

        assert!(ClassName::parse("a/b/C").is_err());
        assert!(ClassName::parse("com.acme/").is_err());
    }

    #[test]
    fn test_parse_separator_inside_type_arguments() {
        let ty: TypeRef = "java.util.List<com.Example/Foo>".parse().unwrap();
        let names: Vec<String> = ty.referenced_classes().iter().map(|c| c.package().to_string()).collect();
        assert_eq!(names, ["java.util", "com.Example"]);
        assert_eq!(ty.to_string(), "java.util.List<com.Example/Foo>");
    }

    #[test]
    fn test_parse_parameterized_and_array() {
        let ty: TypeRef = "java.util.Map<java.lang.String, java.util.List<byte[]>>[]".parse().unwrap();
        assert_eq!(ty.to_string(), "java.util.Map<java.lang.String, java.util.List<byte[]>>[]");
        let names: Vec<String> = ty.referenced_classes().iter().map(|c| c.canonical()).collect();
        assert_eq!(names, ["java.util.Map", "java.lang.String", "java.util.List"]);
    }

    #[test]
    fn test_parse_wildcards() {
        let ty: TypeRef = "java.util.List<? extends java.lang.Number>".parse().unwrap();
        let TypeRef::Parameterized { args, .. } = &ty else {
            panic!("expected a parameterized type, got {:?}", ty);
        };
        assert_eq!(
            args[0],
            TypeRef::Wildcard {
                bound: Some((BoundKind::Extends, Box::new(TypeRef::class("java.lang", "Number"))))
            }
        );
        let names: Vec<String> = ty.referenced_classes().iter().map(|c| c.canonical()).collect();
        assert_eq!(names, ["java.util.List", "java.lang.Number"]);

        let ty: TypeRef = "java.util.Map<?, ? super java.util.Date>".parse().unwrap();
        assert_eq!(ty.to_string(), "java.util.Map<?, ? super java.util.Date>");

        // A class whose name merely starts with the keyword is not a bound
        assert!("java.util.List<? extendsFoo>".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_parse_rejects_misplaced_wildcards() {
        assert!("?".parse::<TypeRef>().is_err());
        assert!("java.util.List<?[]>".parse::<TypeRef>().is_err());
        assert!("java.util.List<? extends int>".parse::<TypeRef>().is_err());
        assert!("java.util.List<? super>".parse::<TypeRef>().is_err());
    }

    #[test]
    fn test_from_json_accepts_wildcard_field() {
        let json = r#"{"declarations": [{"name": "A", "fields": [
            {"name": "xs", "type": "java.util.List<? extends java.lang.Number>"}
        ]}]}"#;
        let set = DeclarationSet::from_json(json).unwrap();
        let decl = set.get(DeclId(0)).unwrap();
        assert_eq!(decl.fields[0].ty.to_string(), "java.util.List<? extends java.lang.Number>");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<TypeRef>().is_err());
        assert!("java.util.List<".parse::<TypeRef>().is_err());
        assert!("int[".parse::<TypeRef>().is_err());
        assert!("a..B".parse::<TypeRef>().is_err());
        assert!("String extra".parse::<TypeRef>().is_err());
    }

    // ========================================
    // DeclarationSet tests
    // ========================================

    #[test]
    fn test_qualified_name_uses_outermost_package() {
        let mut set = DeclarationSet::new();
        let outer = set.add(TypeDecl::new("com.acme", "Outer")).unwrap();
        let inner = set.add_nested(outer, TypeDecl::new("ignored.pkg", "Inner")).unwrap();
        let leaf = set.add_nested(inner, TypeDecl::new("", "Leaf")).unwrap();
        assert_eq!(set.qualified_name(leaf).as_str(), "com.acme.Outer.Inner.Leaf");
        assert_eq!(set.enclosing_chain(leaf).len(), 3);
    }

    #[test]
    fn test_add_rejects_unknown_parent() {
        let mut set = DeclarationSet::new();
        let mut decl = TypeDecl::new("p", "Orphan");
        decl.enclosing = Some(DeclId(7));
        assert!(matches!(set.add(decl), Err(DeclError::UnknownEnclosing { index: 7, .. })));
    }

    #[test]
    fn test_from_decls_detects_cycle() {
        let mut a = TypeDecl::new("p", "A");
        let mut b = TypeDecl::new("p", "B");
        a.enclosing = Some(DeclId(1));
        b.enclosing = Some(DeclId(0));
        let err = DeclarationSet::from_decls(vec![a, b]).unwrap_err();
        assert!(matches!(err, DeclError::EnclosingCycle { .. }));
    }

    #[test]
    fn test_from_json_round() {
        let json = r#"{
            "declarations": [
                {
                    "name": "User",
                    "package": "com.realm.annotation.entity",
                    "entity": { "primary_key": "id", "ignores": ["avatar"] },
                    "fields": [
                        { "name": "id", "type": "long" },
                        { "name": "birthday", "type": "java.lang.String", "transient": true },
                        { "name": "COUNT", "type": "int", "static": true }
                    ]
                }
            ]
        }"#;
        let set = DeclarationSet::from_json(json).unwrap();
        let user = set.get(DeclId(0)).unwrap();
        assert_eq!(user.entity.as_ref().unwrap().ignores, ["avatar"]);
        assert!(user.fields[1].is_transient);
        assert!(user.fields[2].is_static);
    }

    #[test]
    fn test_from_json_bad_type_is_error() {
        let json = r#"{"declarations": [{"name": "A", "fields": [{"name": "x", "type": "List<"}]}]}"#;
        assert!(matches!(DeclarationSet::from_json(json), Err(DeclError::Json(_))));
    }
}
