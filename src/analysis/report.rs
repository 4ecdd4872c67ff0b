//! Report assembly: score every entity of a [`SourceBundle`] and roll the
//! results up into packages and a codebase summary.

use super::{documentation, fields};
use crate::complexity::{average_complexity, max_complexity, EntityScorer};
use crate::core::ast::{FuncDecl, InterfaceDecl, SourceBundle, SourceFile, StructDecl};
use crate::core::{
    is_exported, ComplexitySummary, FunctionMetrics, InterfaceMetrics, PackageMetrics, Report,
    ReportSnapshot, StructMetrics,
};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, info, info_span};

pub fn analyze_function(file: &SourceFile, func: &FuncDecl, scorer: &EntityScorer) -> FunctionMetrics {
    FunctionMetrics {
        name: func.name.clone(),
        package: file.package.clone(),
        receiver: func.receiver_type_name(),
        file: file.path.clone(),
        line: func.line,
        is_exported: is_exported(&func.name),
        length: if func.end_line >= func.line && func.body.is_some() {
            func.end_line - func.line + 1
        } else {
            0
        },
        complexity: scorer.score_function(func),
        signature: scorer.score_signature(&func.signature),
        documentation: documentation::score(func.doc.as_ref()),
    }
}

pub fn analyze_struct(file: &SourceFile, decl: &StructDecl, scorer: &EntityScorer) -> StructMetrics {
    let breakdown = fields::classify_struct(decl, &file.package);
    StructMetrics {
        name: decl.name.clone(),
        package: file.package.clone(),
        file: file.path.clone(),
        line: decl.line,
        is_exported: is_exported(&decl.name),
        total_fields: breakdown.total_fields,
        complexity: scorer.score_struct(&breakdown),
        fields_by_type: breakdown.fields_by_type,
        embedded_types: breakdown.embedded_types,
        tag_usage: breakdown.tag_usage,
        documentation: documentation::score(decl.doc.as_ref()),
    }
}

pub fn analyze_interface(
    file: &SourceFile,
    decl: &InterfaceDecl,
    scorer: &EntityScorer,
) -> InterfaceMetrics {
    let (complexity, methods) = scorer.score_interface(decl);
    InterfaceMetrics {
        name: decl.name.clone(),
        package: file.package.clone(),
        file: file.path.clone(),
        line: decl.line,
        is_exported: is_exported(&decl.name),
        method_count: decl.methods.len() as u32,
        embedded_interfaces: decl.embeds.iter().filter_map(|t| t.base_name()).collect(),
        methods,
        complexity,
        documentation: documentation::score(decl.doc.as_ref()),
    }
}

#[derive(Debug, Default)]
struct FileAnalysis {
    functions: Vec<FunctionMetrics>,
    structs: Vec<StructMetrics>,
    interfaces: Vec<InterfaceMetrics>,
}

fn analyze_file(file: &SourceFile, scorer: &EntityScorer) -> FileAnalysis {
    debug!(
        file = %file.path.display(),
        functions = file.functions.len(),
        structs = file.structs.len(),
        interfaces = file.interfaces.len(),
        "Scoring file"
    );
    FileAnalysis {
        functions: file
            .functions
            .iter()
            .map(|f| analyze_function(file, f, scorer))
            .collect(),
        structs: file
            .structs
            .iter()
            .map(|s| analyze_struct(file, s, scorer))
            .collect(),
        interfaces: file
            .interfaces
            .iter()
            .map(|i| analyze_interface(file, i, scorer))
            .collect(),
    }
}

/// Builds a [`Report`] for one analysis run.
#[derive(Clone, Debug)]
pub struct ReportBuilder {
    id: String,
    label: Option<String>,
    timestamp: DateTime<Utc>,
}

impl ReportBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn build(&self, bundle: &SourceBundle) -> Report {
        let _span = info_span!("assemble_report", id = %self.id, files = bundle.files.len()).entered();

        let scorers = package_scorers(bundle);
        let fallback = EntityScorer::new();

        let analyses: Vec<FileAnalysis> = bundle
            .files
            .par_iter()
            .map(|file| {
                let scorer = scorers.get(file.package_path()).unwrap_or(&fallback);
                analyze_file(file, scorer)
            })
            .collect();

        let mut functions = Vec::new();
        let mut structs = Vec::new();
        let mut interfaces = Vec::new();
        for analysis in analyses {
            functions.extend(analysis.functions);
            structs.extend(analysis.structs);
            interfaces.extend(analysis.interfaces);
        }

        functions.sort_by(|a, b| {
            (&a.package, &a.file, a.line, &a.name).cmp(&(&b.package, &b.file, b.line, &b.name))
        });
        structs.sort_by(|a, b| {
            (&a.package, &a.file, a.line, &a.name).cmp(&(&b.package, &b.file, b.line, &b.name))
        });
        interfaces.sort_by(|a, b| {
            (&a.package, &a.file, a.line, &a.name).cmp(&(&b.package, &b.file, b.line, &b.name))
        });

        let packages = aggregate_packages(bundle, &functions);
        let summary = summarize(&functions, &structs, &interfaces, packages.len());

        info!(
            functions = functions.len(),
            structs = structs.len(),
            interfaces = interfaces.len(),
            packages = packages.len(),
            "Report assembled"
        );

        Report {
            snapshot: ReportSnapshot {
                id: self.id.clone(),
                timestamp: self.timestamp,
                project_path: bundle.project_path.clone(),
                label: self.label.clone(),
            },
            functions,
            structs,
            interfaces,
            packages,
            summary,
        }
    }
}

/// One scorer per package, aware of the interfaces that package can see:
/// its own by bare name and every bundled package's by qualified name.
fn package_scorers(bundle: &SourceBundle) -> HashMap<String, EntityScorer> {
    let qualified: BTreeSet<String> = bundle
        .files
        .iter()
        .flat_map(|f| f.interfaces.iter().map(move |i| format!("{}.{}", f.package, i.name)))
        .collect();

    let mut local: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
    for file in &bundle.files {
        local
            .entry(file.package_path())
            .or_default()
            .extend(file.interfaces.iter().map(|i| i.name.clone()));
    }

    local
        .into_iter()
        .map(|(path, names)| {
            let known = names.into_iter().chain(qualified.iter().cloned());
            (path.to_string(), EntityScorer::with_known_interfaces(known))
        })
        .collect()
}

fn aggregate_packages(bundle: &SourceBundle, functions: &[FunctionMetrics]) -> Vec<PackageMetrics> {
    let mut grouped: BTreeMap<&str, Vec<&SourceFile>> = BTreeMap::new();
    for file in &bundle.files {
        grouped.entry(file.package_path()).or_default().push(file);
    }

    grouped
        .into_iter()
        .map(|(path, files)| {
            let name = files[0].package.clone();
            let imports: BTreeSet<String> =
                files.iter().flat_map(|f| f.imports.iter().cloned()).collect();
            let local_types: BTreeSet<&str> = files
                .iter()
                .flat_map(|f| f.structs.iter().map(|s| s.name.as_str()))
                .collect();
            let package_files: BTreeSet<_> = files.iter().map(|f| &f.path).collect();
            let package_functions: Vec<&FunctionMetrics> = functions
                .iter()
                .filter(|f| package_files.contains(&&f.file))
                .collect();

            let bound_methods = package_functions
                .iter()
                .filter(|f| {
                    f.receiver
                        .as_deref()
                        .is_some_and(|r| local_types.contains(r))
                })
                .count();
            let cohesion_score = if package_functions.is_empty() {
                1.0
            } else {
                bound_methods as f64 / package_functions.len() as f64
            };
            let cyclomatic: Vec<u32> = package_functions
                .iter()
                .map(|f| f.complexity.cyclomatic)
                .collect();

            PackageMetrics {
                path: path.to_string(),
                name,
                file_count: files.len(),
                function_count: package_functions.len(),
                struct_count: files.iter().map(|f| f.structs.len()).sum(),
                interface_count: files.iter().map(|f| f.interfaces.len()).sum(),
                coupling_score: imports.len() as f64,
                imports: imports.into_iter().collect(),
                cohesion_score,
                average_complexity: average_complexity(&cyclomatic),
            }
        })
        .collect()
}

pub fn summarize(
    functions: &[FunctionMetrics],
    structs: &[StructMetrics],
    interfaces: &[InterfaceMetrics],
    total_packages: usize,
) -> ComplexitySummary {
    let cyclomatic: Vec<u32> = functions.iter().map(|f| f.complexity.cyclomatic).collect();
    let average_struct_complexity = if structs.is_empty() {
        0.0
    } else {
        structs.iter().map(|s| s.complexity.overall).sum::<f64>() / structs.len() as f64
    };

    let exported_docs: Vec<bool> = functions
        .iter()
        .filter(|f| f.is_exported)
        .map(|f| f.documentation.has_comment)
        .chain(
            structs
                .iter()
                .filter(|s| s.is_exported)
                .map(|s| s.documentation.has_comment),
        )
        .chain(
            interfaces
                .iter()
                .filter(|i| i.is_exported)
                .map(|i| i.documentation.has_comment),
        )
        .collect();
    let documentation_coverage = if exported_docs.is_empty() {
        1.0
    } else {
        exported_docs.iter().filter(|d| **d).count() as f64 / exported_docs.len() as f64
    };

    ComplexitySummary {
        total_functions: functions.len(),
        total_structs: structs.len(),
        total_interfaces: interfaces.len(),
        total_packages,
        average_cyclomatic: average_complexity(&cyclomatic),
        max_cyclomatic: max_complexity(&cyclomatic),
        average_struct_complexity,
        documentation_coverage,
    }
}
