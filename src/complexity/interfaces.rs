use super::signature::SignatureScorer;
use crate::core::ast::InterfaceDecl;
use crate::core::{ComplexityScore, MethodMetrics};

/// Interface complexity plus per-method signature scores.
///
/// Every method and every embedded interface is one unit of surface;
/// embedded interfaces also count as nesting. Cognitive load is the total
/// number of parameter and result slots across the method set.
pub fn calculate_interface_complexity(
    decl: &InterfaceDecl,
    signatures: &SignatureScorer,
) -> (ComplexityScore, Vec<MethodMetrics>) {
    let methods: Vec<MethodMetrics> = decl
        .methods
        .iter()
        .map(|m| MethodMetrics {
            name: m.name.clone(),
            signature: signatures.score(&m.signature),
        })
        .collect();

    let embedded = decl.embeds.len() as u32;
    let cyclomatic = methods.len() as u32 + embedded;
    let cognitive = methods
        .iter()
        .map(|m| m.signature.parameter_count + m.signature.return_count)
        .sum();

    let score = ComplexityScore {
        cyclomatic,
        cognitive,
        nesting_depth: embedded,
        overall: cyclomatic as f64 + embedded as f64 * 0.5,
    };
    (score, methods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::{InterfaceMethod, Param, Signature, TypeExpr};

    #[test]
    fn test_interface_complexity() {
        let decl = InterfaceDecl {
            name: "ReadCloser".into(),
            methods: vec![InterfaceMethod {
                name: "Stat".into(),
                signature: Signature {
                    type_params: vec![],
                    params: vec![Param::named("name", TypeExpr::ident("string"))],
                    results: vec![
                        Param::unnamed(TypeExpr::ident("FileInfo")),
                        Param::unnamed(TypeExpr::ident("error")),
                    ],
                },
            }],
            embeds: vec![
                TypeExpr::qualified("io", "Reader"),
                TypeExpr::qualified("io", "Closer"),
            ],
            doc: None,
            line: 1,
        };

        let (score, methods) = calculate_interface_complexity(&decl, &SignatureScorer::new());
        assert_eq!(score.cyclomatic, 3);
        assert_eq!(score.nesting_depth, 2);
        assert_eq!(score.cognitive, 3);
        assert_eq!(score.overall, 4.0);
        assert_eq!(methods.len(), 1);
        assert!(methods[0].signature.returns_error_like);
    }

    #[test]
    fn test_empty_interface_is_zero() {
        let decl = InterfaceDecl {
            name: "Any".into(),
            methods: vec![],
            embeds: vec![],
            doc: None,
            line: 1,
        };
        let (score, methods) = calculate_interface_complexity(&decl, &SignatureScorer::new());
        assert_eq!(score, ComplexityScore::zero());
        assert!(methods.is_empty());
    }
}
