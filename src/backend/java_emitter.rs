//! Java source emitter for companion classes
//!
//! Layout follows conventional generated Java: package line, sorted imports, then a
//! class with fields first and the two constructors after them, one blank line
//! between members.
//!
//! ## Imports
//!
//! Every top-level simple name is claimed by the first class that uses it, with the
//! generated class's own name claimed up front and classes of the generated package
//! claimed before any other. Claimed classes are written by their
//! simple (or nested) name; everything else is written fully qualified. Only claimed
//! classes outside `java.lang`, the generated package and the default package get an
//! `import` line.

use std::collections::{BTreeSet, HashMap};

use super::spec::GeneratedClassSpec;
use crate::format::{FormatConfig, SourceWriter};
use crate::frontend::decl::{ClassName, TypeRef};

const JAVA_LANG: &str = "java.lang";

/// Resolves how each referenced class is spelled in one compilation unit
struct ImportTable {
    /// Top-level simple name -> the top-level class owning it
    claims: HashMap<String, Option<ClassName>>,
    imports: BTreeSet<String>,
}

impl ImportTable {
    fn new(spec: &GeneratedClassSpec) -> Self {
        let mut table = Self {
            claims: HashMap::new(),
            imports: BTreeSet::new(),
        };
        // The class being generated owns its own name.
        table.claims.insert(spec.simple_name.clone(), None);

        let mut referenced = vec![&spec.base_class];
        for field in &spec.fields {
            referenced.extend(spec.marker(field.role));
            referenced.extend(field.field.ty.referenced_classes());
        }

        // Same-package classes shadow `java.lang`, so they claim their names first.
        let (local, other): (Vec<&ClassName>, Vec<&ClassName>) =
            referenced.into_iter().partition(|class| class.package() == spec.package);
        for class in local.into_iter().chain(other) {
            table.claim(class, &spec.package);
        }
        table
    }

    fn claim(&mut self, class: &ClassName, package: &str) {
        let top = class.top_level();
        let simple = top.simple_name().to_string();
        if self.claims.contains_key(&simple) {
            return;
        }
        let importable = !top.package().is_empty() && top.package() != JAVA_LANG && top.package() != package;
        if importable {
            self.imports.insert(top.canonical());
        }
        self.claims.insert(simple, Some(top));
    }

    fn class_name(&self, class: &ClassName) -> String {
        match self.claims.get(class.top_level_simple_name()) {
            Some(Some(owner)) if *owner == class.top_level() => class.nested_path(),
            _ => class.canonical(),
        }
    }

    fn type_name(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Primitive(p) => p.keyword().to_string(),
            TypeRef::Class(class) => self.class_name(class),
            TypeRef::Parameterized { raw, args } => {
                let args: Vec<String> = args.iter().map(|arg| self.type_name(arg)).collect();
                format!("{}<{}>", self.class_name(raw), args.join(", "))
            }
            TypeRef::Array(component) => format!("{}[]", self.type_name(component)),
            TypeRef::Wildcard { bound: None } => "?".to_string(),
            TypeRef::Wildcard { bound: Some((kind, ty)) } => format!("? {} {}", kind.keyword(), self.type_name(ty)),
        }
    }
}

/// Serializes `GeneratedClassSpec`s to Java source text
pub struct JavaEmitter {
    config: FormatConfig,
}

impl JavaEmitter {
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn emit(&self, spec: &GeneratedClassSpec) -> String {
        let imports = ImportTable::new(spec);
        let mut w = SourceWriter::new(self.config.clone());

        if !spec.package.is_empty() {
            w.writeln(&format!("package {};", spec.package));
            w.newline();
        }
        if !imports.imports.is_empty() {
            for import in &imports.imports {
                w.writeln(&format!("import {};", import));
            }
            w.newline();
        }

        w.open_block(&format!(
            "public class {} extends {}",
            spec.simple_name,
            imports.class_name(&spec.base_class)
        ));

        for field in &spec.fields {
            if let Some(marker) = spec.marker(field.role) {
                w.writeln(&format!("@{}", imports.class_name(marker)));
            }
            w.writeln(&format!(
                "public {} {};",
                imports.type_name(&field.field.ty),
                field.field.name
            ));
            w.member_gap();
        }

        w.open_block(&format!("public {}()", spec.simple_name));
        w.close_block();
        w.member_gap();

        let params: Vec<String> = spec
            .fields
            .iter()
            .map(|field| format!("{} {}", imports.type_name(&field.field.ty), field.field.name))
            .collect();
        w.open_block(&format!("public {}({})", spec.simple_name, params.join(", ")));
        for field in &spec.fields {
            w.writeln(&format!("this.{0} = {0};", field.field.name));
        }
        w.close_block();

        w.close_block();
        w.finish()
    }
}
