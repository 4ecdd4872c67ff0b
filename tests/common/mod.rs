//! Builders shared by the integration tests.
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use codegauge::core::ast::{
    Block, CaseClause, Expr, FieldDecl, FuncDecl, SourceBundle, SourceFile, Stmt, StructDecl,
    TypeExpr,
};
use codegauge::{
    ComplexityScore, DocumentationInfo, FunctionMetrics, PackageMetrics, Report, ReportSnapshot,
    SignatureComplexity, StructMetrics,
};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub fn snapshot(id: &str) -> ReportSnapshot {
    ReportSnapshot::new(id, Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
}

pub fn report(id: &str) -> Report {
    Report::empty(snapshot(id))
}

pub fn function(name: &str, file: &str, line: usize, cyclomatic: u32) -> FunctionMetrics {
    FunctionMetrics {
        name: name.to_string(),
        package: "app".to_string(),
        receiver: None,
        file: PathBuf::from(file),
        line,
        is_exported: true,
        length: 20,
        complexity: ComplexityScore {
            cyclomatic,
            cognitive: 0,
            nesting_depth: 0,
            overall: f64::from(cyclomatic),
        },
        signature: SignatureComplexity::default(),
        documentation: DocumentationInfo::default(),
    }
}

pub fn structure(name: &str, file: &str, line: usize, total_fields: u32) -> StructMetrics {
    let mut fields_by_type = BTreeMap::new();
    if total_fields > 0 {
        fields_by_type.insert(codegauge::FieldType::Primitive, total_fields);
    }
    StructMetrics {
        name: name.to_string(),
        package: "app".to_string(),
        file: PathBuf::from(file),
        line,
        is_exported: true,
        total_fields,
        fields_by_type,
        embedded_types: Vec::new(),
        tag_usage: BTreeMap::new(),
        complexity: ComplexityScore {
            cyclomatic: total_fields * 2,
            cognitive: 0,
            nesting_depth: 0,
            overall: f64::from(total_fields * 2),
        },
        documentation: DocumentationInfo::default(),
    }
}

pub fn package(path: &str, coupling: f64, cohesion: f64, functions: usize) -> PackageMetrics {
    PackageMetrics {
        path: path.to_string(),
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        file_count: 1,
        function_count: functions,
        struct_count: 0,
        interface_count: 0,
        imports: Vec::new(),
        coupling_score: coupling,
        cohesion_score: cohesion,
        average_complexity: 1.0,
    }
}

/// A function whose body has `branches` sequential `if` statements.
pub fn branchy_function(name: &str, branches: usize) -> FuncDecl {
    let stmts = (0..branches)
        .map(|i| Stmt::if_then(Expr::ident(format!("c{i}")), vec![Stmt::ret(vec![])]))
        .collect();
    FuncDecl::new(name, Some(Block::new(stmts)))
}

pub fn sample_bundle() -> SourceBundle {
    let dispatch = FuncDecl::new(
        "Dispatch",
        Some(Block::new(vec![Stmt::switch(vec![
            CaseClause::new(vec![Expr::ident("a")], vec![]),
            CaseClause::new(vec![Expr::ident("b")], vec![]),
            CaseClause::default_arm(vec![]),
        ])])),
    );

    SourceBundle {
        project_path: PathBuf::from("/src/app"),
        files: vec![SourceFile {
            path: PathBuf::from("app/server.go"),
            package: "app".to_string(),
            package_path: None,
            imports: vec!["net/http".to_string(), "context".to_string()],
            functions: vec![dispatch, branchy_function("validate", 3)],
            structs: vec![StructDecl {
                name: "Server".to_string(),
                fields: vec![
                    FieldDecl::named("addr", TypeExpr::ident("string")).with_tag(r#"json:"addr""#),
                    FieldDecl::named("routes", TypeExpr::map(TypeExpr::ident("string"), TypeExpr::ident("Handler"))),
                    FieldDecl::embedded(TypeExpr::qualified("sync", "Mutex")),
                ],
                doc: None,
                line: 5,
            }],
            interfaces: Vec::new(),
        }],
    }
}
