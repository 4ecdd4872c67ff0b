pub mod ast;
pub mod errors;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Scores for one entity. Created once per analysis run and never mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityScore {
    pub cyclomatic: u32,
    pub cognitive: u32,
    pub nesting_depth: u32,
    pub overall: f64,
}

impl ComplexityScore {
    pub fn zero() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignatureComplexity {
    pub parameter_count: u32,
    pub return_count: u32,
    pub has_variadic: bool,
    pub returns_error_like: bool,
    pub interface_param_count: u32,
    pub generic_params: Vec<String>,
    pub score: f64,
}

/// Semantic bucket of a struct field.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Primitive,
    Slice,
    Map,
    Channel,
    InterfaceLike,
    Composite,
    Pointer,
    Function,
    Embedded,
}

impl FieldType {
    /// Contribution of one field of this type to struct cyclomatic complexity.
    pub fn weight(self) -> u32 {
        match self {
            FieldType::Primitive | FieldType::Slice | FieldType::Pointer | FieldType::Composite => 1,
            FieldType::Map | FieldType::Channel | FieldType::InterfaceLike => 2,
            FieldType::Function | FieldType::Embedded => 3,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FieldType::Primitive => "primitive",
            FieldType::Slice => "slice",
            FieldType::Map => "map",
            FieldType::Channel => "channel",
            FieldType::InterfaceLike => "interface",
            FieldType::Composite => "composite",
            FieldType::Pointer => "pointer",
            FieldType::Function => "function",
            FieldType::Embedded => "embedded",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedType {
    pub name: String,
    pub package: String,
    pub is_pointer: bool,
    pub is_exported: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentationInfo {
    pub has_comment: bool,
    pub comment_length: usize,
    pub has_example: bool,
    pub quality_score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionMetrics {
    pub name: String,
    pub package: String,
    /// Receiver type name for methods.
    #[serde(default)]
    pub receiver: Option<String>,
    pub file: PathBuf,
    pub line: usize,
    pub is_exported: bool,
    pub length: usize,
    pub complexity: ComplexityScore,
    pub signature: SignatureComplexity,
    pub documentation: DocumentationInfo,
}

impl FunctionMetrics {
    /// Lookup key used when comparing snapshots: `package.Name` or
    /// `package.Receiver.Name` for methods.
    pub fn key(&self) -> String {
        match &self.receiver {
            Some(recv) => format!("{}.{}.{}", self.package, recv, self.name),
            None => format!("{}.{}", self.package, self.name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructMetrics {
    pub name: String,
    pub package: String,
    pub file: PathBuf,
    pub line: usize,
    pub is_exported: bool,
    pub total_fields: u32,
    pub fields_by_type: BTreeMap<FieldType, u32>,
    pub embedded_types: Vec<EmbeddedType>,
    pub tag_usage: BTreeMap<String, u32>,
    pub complexity: ComplexityScore,
    pub documentation: DocumentationInfo,
}

impl StructMetrics {
    pub fn key(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodMetrics {
    pub name: String,
    pub signature: SignatureComplexity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMetrics {
    pub name: String,
    pub package: String,
    pub file: PathBuf,
    pub line: usize,
    pub is_exported: bool,
    pub method_count: u32,
    pub embedded_interfaces: Vec<String>,
    pub methods: Vec<MethodMetrics>,
    pub complexity: ComplexityScore,
    pub documentation: DocumentationInfo,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageMetrics {
    pub path: String,
    pub name: String,
    pub file_count: usize,
    pub function_count: usize,
    pub struct_count: usize,
    pub interface_count: usize,
    pub imports: Vec<String>,
    pub coupling_score: f64,
    pub cohesion_score: f64,
    pub average_complexity: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexitySummary {
    pub total_functions: usize,
    pub total_structs: usize,
    pub total_interfaces: usize,
    pub total_packages: usize,
    pub average_cyclomatic: f64,
    pub max_cyclomatic: u32,
    pub average_struct_complexity: f64,
    /// Share of exported entities carrying a doc comment, 0.0-1.0.
    pub documentation_coverage: f64,
}

/// Identity of one analysis run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub project_path: PathBuf,
    #[serde(default)]
    pub label: Option<String>,
}

impl ReportSnapshot {
    pub fn new(id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            timestamp,
            project_path: PathBuf::new(),
            label: None,
        }
    }

    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}

/// A full analysis run: every scored entity plus the aggregate summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub snapshot: ReportSnapshot,
    #[serde(default)]
    pub functions: Vec<FunctionMetrics>,
    #[serde(default)]
    pub structs: Vec<StructMetrics>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceMetrics>,
    #[serde(default)]
    pub packages: Vec<PackageMetrics>,
    #[serde(default)]
    pub summary: ComplexitySummary,
}

impl Report {
    pub fn empty(snapshot: ReportSnapshot) -> Self {
        Self {
            snapshot,
            functions: Vec::new(),
            structs: Vec::new(),
            interfaces: Vec::new(),
            packages: Vec::new(),
            summary: ComplexitySummary::default(),
        }
    }
}

/// Go export rule: an identifier is exported when it starts with an upper-case letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}
