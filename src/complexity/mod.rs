pub mod cognitive;
pub mod cyclomatic;
pub mod interfaces;
pub mod signature;
pub mod structs;

use crate::analysis::fields::FieldBreakdown;
use crate::core::ast::{FuncDecl, InterfaceDecl, Signature};
use crate::core::{ComplexityScore, MethodMetrics, SignatureComplexity};

pub use cyclomatic::BranchMetrics;
pub use signature::SignatureScorer;

/// Scores single entities. Pure: identical trees always yield identical scores.
#[derive(Clone, Debug, Default)]
pub struct EntityScorer {
    signatures: SignatureScorer,
}

impl EntityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scorer that treats the given names as interface types when
    /// counting interface-typed parameters.
    pub fn with_known_interfaces<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            signatures: SignatureScorer::with_known_interfaces(names),
        }
    }

    /// Function or method score; declarations without a body score zero.
    pub fn score_function(&self, func: &FuncDecl) -> ComplexityScore {
        let Some(body) = &func.body else {
            return ComplexityScore::zero();
        };

        let branches = cyclomatic::calculate_branch_metrics(body);
        let cognitive = cognitive::calculate_cognitive(body);
        ComplexityScore {
            cyclomatic: branches.cyclomatic,
            cognitive,
            nesting_depth: branches.nesting_depth,
            overall: function_overall(branches.cyclomatic, cognitive, branches.nesting_depth),
        }
    }

    pub fn score_signature(&self, signature: &Signature) -> SignatureComplexity {
        self.signatures.score(signature)
    }

    pub fn score_struct(&self, breakdown: &FieldBreakdown) -> ComplexityScore {
        structs::calculate_struct_complexity(breakdown)
    }

    pub fn score_interface(&self, decl: &InterfaceDecl) -> (ComplexityScore, Vec<MethodMetrics>) {
        interfaces::calculate_interface_complexity(decl, &self.signatures)
    }
}

/// `cyclomatic + cognitive * 0.5 + nesting * 0.5`
pub fn function_overall(cyclomatic: u32, cognitive: u32, nesting_depth: u32) -> f64 {
    cyclomatic as f64 + cognitive as f64 * 0.5 + nesting_depth as f64 * 0.5
}

pub fn max_complexity(complexities: &[u32]) -> u32 {
    complexities.iter().copied().max().unwrap_or(0)
}

pub fn average_complexity(complexities: &[u32]) -> f64 {
    if complexities.is_empty() {
        return 0.0;
    }
    let sum: u32 = complexities.iter().sum();
    sum as f64 / complexities.len() as f64
}
