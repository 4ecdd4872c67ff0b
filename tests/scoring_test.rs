// End-to-end scoring: entity scorer, field classifier, documentation scorer
// and report assembly through the public API.

mod common;

use codegauge::analysis::documentation;
use codegauge::core::ast::{
    Block, CommClause, DocComment, Expr, FieldDecl, FuncDecl, Param, SelectStmt, Signature, Stmt,
    StructDecl, TypeExpr,
};
use codegauge::{classify, classify_struct, EntityScorer, FieldType, ReportBuilder};
use common::{branchy_function, sample_bundle};
use pretty_assertions::assert_eq;

#[test]
fn test_sequential_branches() {
    let score = EntityScorer::new().score_function(&branchy_function("check", 4));
    assert_eq!(score.cyclomatic, 5);
    assert_eq!(score.nesting_depth, 1);
    assert_eq!(score.cognitive, 4);
    assert_eq!(score.overall, 5.0 + 2.0 + 0.5);
}

#[test]
fn test_select_in_loop() {
    let body = Block::new(vec![Stmt::for_loop(vec![Stmt::Select(SelectStmt {
        cases: vec![CommClause::default(), CommClause::default()],
    })])]);
    let score = EntityScorer::new().score_function(&FuncDecl::new("pump", Some(body)));
    // base 1, for 1, select 1, two comm clauses
    assert_eq!(score.cyclomatic, 5);
    assert_eq!(score.nesting_depth, 2);
    assert_eq!(score.cognitive, 3);
}

#[test]
fn test_logical_operators_in_condition() {
    let cond = Expr::or(Expr::and(Expr::ident("a"), Expr::ident("b")), Expr::ident("c"));
    let body = Block::new(vec![Stmt::if_then(cond, vec![])]);
    let score = EntityScorer::new().score_function(&FuncDecl::new("gate", Some(body)));
    assert_eq!(score.cyclomatic, 2);
    assert_eq!(score.cognitive, 3);
}

#[test]
fn test_scoring_is_deterministic() {
    let func = branchy_function("again", 6);
    let scorer = EntityScorer::new();
    assert_eq!(scorer.score_function(&func), scorer.score_function(&func));
}

#[test]
fn test_signature_with_context_and_error() {
    let signature = Signature {
        type_params: vec![],
        params: vec![
            Param::named("ctx", TypeExpr::qualified("context", "Context")),
            Param {
                names: vec!["a".into(), "b".into()],
                ty: TypeExpr::ident("int"),
            },
            Param::named("opts", TypeExpr::ellipsis(TypeExpr::ident("Option"))),
        ],
        results: vec![Param::unnamed(TypeExpr::ident("error"))],
    };
    let score = EntityScorer::new().score_signature(&signature);
    assert_eq!(score.parameter_count, 4);
    assert_eq!(score.return_count, 1);
    assert!(score.has_variadic);
    assert!(score.returns_error_like);
    assert_eq!(score.interface_param_count, 1);
    assert!((score.score - (2.0 + 0.3 + 1.0 + 0.5)).abs() < 1e-9);
}

#[test]
fn test_field_precedence() {
    assert_eq!(classify(&TypeExpr::ident("uint64")), FieldType::Primitive);
    assert_eq!(classify(&TypeExpr::ident("Config")), FieldType::Composite);
    assert_eq!(classify(&TypeExpr::qualified("time", "Time")), FieldType::Composite);
    assert_eq!(
        classify(&TypeExpr::pointer(TypeExpr::slice(TypeExpr::ident("int")))),
        FieldType::Pointer
    );
    assert_eq!(classify(&TypeExpr::slice(TypeExpr::ident("byte"))), FieldType::Slice);
    assert_eq!(classify(&TypeExpr::chan(TypeExpr::ident("int"))), FieldType::Channel);
    assert_eq!(classify(&TypeExpr::empty_interface()), FieldType::InterfaceLike);
    assert_eq!(classify(&TypeExpr::func(Signature::default())), FieldType::Function);
}

#[test]
fn test_struct_breakdown_invariant() {
    let decl = StructDecl {
        name: "Record".into(),
        fields: vec![
            FieldDecl {
                names: vec!["x".into(), "y".into()],
                ty: TypeExpr::ident("float64"),
                tag: Some(r#"json:"x" yaml:"x""#.into()),
            },
            FieldDecl::named("meta", TypeExpr::map(TypeExpr::ident("string"), TypeExpr::ident("string")))
                .with_tag(r#"json:"meta,omitempty" validate:"required""#),
            FieldDecl::embedded(TypeExpr::pointer(TypeExpr::qualified("log", "Logger"))),
            FieldDecl::embedded(TypeExpr::slice(TypeExpr::ident("int"))),
        ],
        doc: None,
        line: 1,
    };

    let breakdown = classify_struct(&decl, "model");
    assert_eq!(
        breakdown.total_fields,
        breakdown.fields_by_type.values().sum::<u32>()
    );
    assert_eq!(breakdown.fields_by_type.get(&FieldType::Embedded), Some(&2));
    assert_eq!(breakdown.embedded_types.len(), 1);
    assert_eq!(breakdown.embedded_types[0].name, "Logger");
    assert_eq!(breakdown.embedded_types[0].package, "log");
    assert!(breakdown.embedded_types[0].is_pointer);
    assert_eq!(breakdown.tag_usage.get("json"), Some(&2));
    assert_eq!(breakdown.tag_usage.get("validate"), Some(&1));
}

#[test]
fn test_documentation_quality() {
    let doc = DocComment::new([
        "Server represents an HTTP server bound to one address and",
        "provides graceful shutdown once all handlers return.",
        "Example:",
        "\tsrv := NewServer(addr)",
    ]);
    let info = documentation::score(Some(&doc));
    assert!(info.has_comment);
    assert!(info.has_example);
    assert!(info.comment_length > 100);
    assert!((info.quality_score - 1.0).abs() < 1e-9);

    assert_eq!(documentation::score(None).quality_score, 0.0);
}

#[test]
fn test_report_from_bundle() {
    let report = ReportBuilder::new("run-1").with_label("main").build(&sample_bundle());

    assert_eq!(report.snapshot.label.as_deref(), Some("main"));
    assert_eq!(report.functions.len(), 2);
    let dispatch = report.functions.iter().find(|f| f.name == "Dispatch").unwrap();
    assert_eq!(dispatch.complexity.cyclomatic, 5);

    let server = &report.structs[0];
    assert_eq!(server.total_fields, 3);
    assert_eq!(server.embedded_types[0].name, "Mutex");
    assert_eq!(server.tag_usage.get("json"), Some(&1));

    assert_eq!(report.packages.len(), 1);
    assert_eq!(report.packages[0].coupling_score, 2.0);
    assert_eq!(report.packages[0].cohesion_score, 0.0);
    assert_eq!(report.summary.max_cyclomatic, 5);
}

#[test]
fn test_generic_embed_counts_toward_nesting() {
    let decl = StructDecl {
        name: "Cache".into(),
        fields: vec![
            FieldDecl::embedded(TypeExpr::pointer(TypeExpr::Generic {
                base: Box::new(TypeExpr::qualified("list", "List")),
                args: vec![TypeExpr::ident("string")],
            })),
            FieldDecl::named("size", TypeExpr::ident("int")),
        ],
        doc: None,
        line: 1,
    };

    let breakdown = classify_struct(&decl, "cache");
    assert_eq!(breakdown.embedded_types.len(), 1);
    assert_eq!(breakdown.embedded_types[0].name, "List");
    assert_eq!(EntityScorer::new().score_struct(&breakdown).nesting_depth, 1);
}
