//! Struct field classification.
//!
//! Every declared field lands in exactly one [`FieldType`] bucket.
//! Embedded fields are tallied under [`FieldType::Embedded`] only, and
//! when their type resolves (through at most one pointer) they also
//! produce an [`EmbeddedType`] record.

use crate::core::ast::{FieldDecl, StructDecl, TypeExpr};
use crate::core::{is_exported, EmbeddedType, FieldType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

const PRIMITIVE_TYPES: &[&str] = &[
    "bool",
    "string",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
    "byte",
    "rune",
    "float32",
    "float64",
    "complex64",
    "complex128",
];

/// Serialization/validation keys counted in `tag_usage`.
pub const RECOGNIZED_TAG_KEYS: &[&str] = &["json", "xml", "yaml", "db", "form", "validate"];

static TAG_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*):""#).expect("static tag regex"));

/// Field tallies for one struct.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldBreakdown {
    pub total_fields: u32,
    pub fields_by_type: BTreeMap<FieldType, u32>,
    pub embedded_types: Vec<EmbeddedType>,
    pub tag_usage: BTreeMap<String, u32>,
}

impl FieldBreakdown {
    fn record(&mut self, field_type: FieldType, count: u32) {
        self.total_fields += count;
        *self.fields_by_type.entry(field_type).or_insert(0) += count;
    }
}

pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// Category of a named field's type expression.
pub fn classify(ty: &TypeExpr) -> FieldType {
    match ty {
        TypeExpr::Ident { name } if is_primitive(name) => FieldType::Primitive,
        TypeExpr::Ident { .. } => FieldType::Composite,
        TypeExpr::Qualified { .. } => FieldType::Composite,
        TypeExpr::Pointer { .. } => FieldType::Pointer,
        TypeExpr::Array { .. } => FieldType::Slice,
        TypeExpr::Map { .. } => FieldType::Map,
        TypeExpr::Chan { .. } => FieldType::Channel,
        TypeExpr::Interface { .. } => FieldType::InterfaceLike,
        TypeExpr::Func { .. } => FieldType::Function,
        TypeExpr::Struct { .. } | TypeExpr::Ellipsis { .. } | TypeExpr::Generic { .. } => {
            FieldType::Composite
        }
    }
}

/// Resolve an embedded field's type. `package` is the declaring package,
/// used for unqualified names. Generic instantiations resolve to their
/// base type. Returns `None` for named fields and for shapes that do not
/// name a type.
pub fn extract_embedded(field: &FieldDecl, package: &str) -> Option<EmbeddedType> {
    if !field.is_embedded() {
        return None;
    }

    let (target, is_pointer) = match &field.ty {
        TypeExpr::Pointer { elem } => (elem.as_ref(), true),
        other => (other, false),
    };
    let target = match target {
        TypeExpr::Generic { base, .. } => base.as_ref(),
        other => other,
    };

    let (name, owner) = match target {
        TypeExpr::Ident { name } => (name.clone(), package.to_string()),
        TypeExpr::Qualified { package, name } => (name.clone(), package.clone()),
        _ => return None,
    };

    Some(EmbeddedType {
        is_exported: is_exported(&name),
        name,
        package: owner,
        is_pointer,
    })
}

/// Recognised tag keys present in a raw tag literal; each key at most once.
pub fn scan_tag_keys(tag: &str) -> Vec<&'static str> {
    let raw = tag.trim().trim_matches('`');
    let mut found: Vec<&'static str> = TAG_KEY
        .captures_iter(raw)
        .filter_map(|cap| {
            let key = cap.get(1)?.as_str();
            RECOGNIZED_TAG_KEYS.iter().copied().find(|k| *k == key)
        })
        .collect();
    found.sort_unstable();
    found.dedup();
    found
}

pub fn classify_struct(decl: &StructDecl, package: &str) -> FieldBreakdown {
    let mut breakdown = FieldBreakdown::default();

    for field in &decl.fields {
        if field.is_embedded() {
            breakdown.record(FieldType::Embedded, 1);
            if let Some(embedded) = extract_embedded(field, package) {
                breakdown.embedded_types.push(embedded);
            }
        } else {
            breakdown.record(classify(&field.ty), field.names.len() as u32);
        }

        if let Some(tag) = &field.tag {
            for key in scan_tag_keys(tag) {
                *breakdown.tag_usage.entry(key.to_string()).or_insert(0) += 1;
            }
        }
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::Signature;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_precedence() {
        assert_eq!(classify(&TypeExpr::ident("int64")), FieldType::Primitive);
        assert_eq!(classify(&TypeExpr::ident("User")), FieldType::Composite);
        assert_eq!(classify(&TypeExpr::ident("error")), FieldType::Composite);
        assert_eq!(
            classify(&TypeExpr::qualified("time", "Time")),
            FieldType::Composite
        );
        assert_eq!(
            classify(&TypeExpr::pointer(TypeExpr::ident("int"))),
            FieldType::Pointer
        );
        assert_eq!(
            classify(&TypeExpr::slice(TypeExpr::ident("string"))),
            FieldType::Slice
        );
        assert_eq!(
            classify(&TypeExpr::map(TypeExpr::ident("string"), TypeExpr::ident("int"))),
            FieldType::Map
        );
        assert_eq!(
            classify(&TypeExpr::chan(TypeExpr::ident("int"))),
            FieldType::Channel
        );
        assert_eq!(
            classify(&TypeExpr::empty_interface()),
            FieldType::InterfaceLike
        );
        assert_eq!(
            classify(&TypeExpr::func(Signature::default())),
            FieldType::Function
        );
        assert_eq!(
            classify(&TypeExpr::Struct { fields: vec![] }),
            FieldType::Composite
        );
    }

    #[test]
    fn test_fixed_size_array_is_slice() {
        let ty = TypeExpr::Array {
            len: Some("16".into()),
            elem: Box::new(TypeExpr::ident("byte")),
        };
        assert_eq!(classify(&ty), FieldType::Slice);
    }

    #[test]
    fn test_extract_embedded_resolves_pointer_and_package() {
        let local = FieldDecl::embedded(TypeExpr::pointer(TypeExpr::ident("baseModel")));
        assert_eq!(
            extract_embedded(&local, "store"),
            Some(EmbeddedType {
                name: "baseModel".into(),
                package: "store".into(),
                is_pointer: true,
                is_exported: false,
            })
        );

        let remote = FieldDecl::embedded(TypeExpr::qualified("sync", "Mutex"));
        assert_eq!(
            extract_embedded(&remote, "store"),
            Some(EmbeddedType {
                name: "Mutex".into(),
                package: "sync".into(),
                is_pointer: false,
                is_exported: true,
            })
        );
    }

    #[test]
    fn test_extract_embedded_resolves_generic_base() {
        let generic = |base: TypeExpr| TypeExpr::Generic {
            base: Box::new(base),
            args: vec![TypeExpr::ident("T")],
        };

        let local = FieldDecl::embedded(generic(TypeExpr::ident("Base")));
        assert_eq!(
            extract_embedded(&local, "store"),
            Some(EmbeddedType {
                name: "Base".into(),
                package: "store".into(),
                is_pointer: false,
                is_exported: true,
            })
        );

        let remote = FieldDecl::embedded(TypeExpr::pointer(generic(TypeExpr::qualified(
            "list", "List",
        ))));
        let embedded = extract_embedded(&remote, "store").unwrap();
        assert_eq!(embedded.name, "List");
        assert_eq!(embedded.package, "list");
        assert!(embedded.is_pointer);
        assert_eq!(remote.ty.base_name(), Some(embedded.name));
    }

    #[test]
    fn test_extract_embedded_ignores_named_fields() {
        let named = FieldDecl::named("mu", TypeExpr::qualified("sync", "Mutex"));
        assert_eq!(extract_embedded(&named, "store"), None);
    }

    #[test]
    fn test_unresolvable_embedded_still_counts() {
        let decl = StructDecl {
            name: "Wrapper".into(),
            fields: vec![FieldDecl::embedded(TypeExpr::pointer(TypeExpr::pointer(
                TypeExpr::ident("T"),
            )))],
            doc: None,
            line: 1,
        };
        let breakdown = classify_struct(&decl, "p");
        assert_eq!(breakdown.total_fields, 1);
        assert_eq!(breakdown.fields_by_type.get(&FieldType::Embedded), Some(&1));
        assert!(breakdown.embedded_types.is_empty());
    }

    #[test]
    fn test_scan_tag_keys() {
        assert_eq!(
            scan_tag_keys(r#"`json:"id,omitempty" db:"user_id" custom:"x"`"#),
            vec!["db", "json"]
        );
        assert_eq!(scan_tag_keys(r#"validate:"required" validate:"min=1""#), vec!["validate"]);
        assert!(scan_tag_keys("").is_empty());
    }

    #[test]
    fn test_classify_struct_tallies() {
        let decl = StructDecl {
            name: "User".into(),
            fields: vec![
                FieldDecl {
                    names: vec!["ID".into(), "Age".into()],
                    ty: TypeExpr::ident("int"),
                    tag: Some(r#"`json:"id" yaml:"id"`"#.into()),
                },
                FieldDecl::named("Tags", TypeExpr::slice(TypeExpr::ident("string")))
                    .with_tag(r#"json:"tags""#),
                FieldDecl::named("OnSave", TypeExpr::func(Signature::default())),
                FieldDecl::embedded(TypeExpr::ident("Base")),
            ],
            doc: None,
            line: 3,
        };

        let breakdown = classify_struct(&decl, "model");
        assert_eq!(breakdown.total_fields, 5);
        assert_eq!(breakdown.fields_by_type[&FieldType::Primitive], 2);
        assert_eq!(breakdown.fields_by_type[&FieldType::Slice], 1);
        assert_eq!(breakdown.fields_by_type[&FieldType::Function], 1);
        assert_eq!(breakdown.fields_by_type[&FieldType::Embedded], 1);
        assert_eq!(breakdown.tag_usage["json"], 2);
        assert_eq!(breakdown.tag_usage["yaml"], 1);
        assert_eq!(breakdown.embedded_types.len(), 1);
        assert_eq!(
            breakdown.total_fields,
            breakdown.fields_by_type.values().sum::<u32>()
        );
    }
}
