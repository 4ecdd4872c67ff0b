use crate::core::ast::{Signature, TypeExpr};
use crate::core::SignatureComplexity;
use std::collections::BTreeSet;

/// Standard-library interfaces recognised without package context.
const WELL_KNOWN_INTERFACES: &[&str] = &[
    "error",
    "any",
    "context.Context",
    "io.Reader",
    "io.Writer",
    "io.Closer",
    "io.ReadWriter",
    "io.ReadCloser",
    "io.WriteCloser",
    "fmt.Stringer",
];

/// Scores callable signatures.
///
/// Interface-typed parameters can only be recognised by name, so the
/// scorer optionally carries the interface names declared in the
/// package being analysed.
#[derive(Clone, Debug, Default)]
pub struct SignatureScorer {
    known_interfaces: BTreeSet<String>,
}

impl SignatureScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_known_interfaces<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_interfaces: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn score(&self, signature: &Signature) -> SignatureComplexity {
        let parameter_count: u32 = signature.params.iter().map(|p| p.arity()).sum();
        let return_count: u32 = signature.results.iter().map(|p| p.arity()).sum();
        let has_variadic = signature
            .params
            .last()
            .is_some_and(|p| matches!(p.ty, TypeExpr::Ellipsis { .. }));
        let returns_error_like = signature.results.iter().any(|p| is_error_like(&p.ty));
        let interface_param_count = signature
            .params
            .iter()
            .filter(|p| self.is_interface_like(&p.ty))
            .map(|p| p.arity())
            .sum();
        let generic_params = signature
            .type_params
            .iter()
            .flat_map(|tp| tp.names.iter().cloned())
            .collect();

        SignatureComplexity {
            parameter_count,
            return_count,
            has_variadic,
            returns_error_like,
            interface_param_count,
            generic_params,
            score: signature_score(
                parameter_count,
                return_count,
                has_variadic,
                interface_param_count,
            ),
        }
    }

    fn is_interface_like(&self, ty: &TypeExpr) -> bool {
        match ty {
            TypeExpr::Interface { .. } => true,
            TypeExpr::Ident { name } => {
                WELL_KNOWN_INTERFACES.contains(&name.as_str())
                    || self.known_interfaces.contains(name)
            }
            TypeExpr::Qualified { package, name } => {
                let qualified = format!("{package}.{name}");
                WELL_KNOWN_INTERFACES.contains(&qualified.as_str())
                    || self.known_interfaces.contains(&qualified)
            }
            TypeExpr::Ellipsis { elem } => self.is_interface_like(elem),
            _ => false,
        }
    }
}

/// `parameters*0.5 + returns*0.3 + 1.0 if variadic + interface params*0.5`
pub fn signature_score(
    parameter_count: u32,
    return_count: u32,
    has_variadic: bool,
    interface_param_count: u32,
) -> f64 {
    let variadic = if has_variadic { 1.0 } else { 0.0 };
    parameter_count as f64 * 0.5
        + return_count as f64 * 0.3
        + variadic
        + interface_param_count as f64 * 0.5
}

fn is_error_like(ty: &TypeExpr) -> bool {
    match ty {
        TypeExpr::Ident { name } => name == "error" || name.ends_with("Error"),
        TypeExpr::Qualified { name, .. } => name.ends_with("Error"),
        TypeExpr::Pointer { elem } => is_error_like(elem),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::{Param, TypeParam};

    fn signature(params: Vec<Param>, results: Vec<Param>) -> Signature {
        Signature {
            type_params: vec![],
            params,
            results,
        }
    }

    #[test]
    fn test_empty_signature_scores_zero() {
        let score = SignatureScorer::new().score(&Signature::default());
        assert_eq!(score, SignatureComplexity::default());
    }

    #[test]
    fn test_grouped_parameters_count_each_name() {
        let sig = signature(
            vec![Param {
                names: vec!["a".into(), "b".into()],
                ty: TypeExpr::ident("int"),
            }],
            vec![
                Param::unnamed(TypeExpr::ident("int")),
                Param::unnamed(TypeExpr::ident("error")),
            ],
        );
        let score = SignatureScorer::new().score(&sig);
        assert_eq!(score.parameter_count, 2);
        assert_eq!(score.return_count, 2);
        assert!(score.returns_error_like);
        assert!((score.score - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_variadic_and_interface_params() {
        let sig = signature(
            vec![
                Param::named("ctx", TypeExpr::qualified("context", "Context")),
                Param::named("r", TypeExpr::ident("Repository")),
                Param::named("args", TypeExpr::ellipsis(TypeExpr::ident("any"))),
            ],
            vec![],
        );
        let score = SignatureScorer::with_known_interfaces(["Repository"]).score(&sig);
        assert!(score.has_variadic);
        assert_eq!(score.interface_param_count, 3);
        // 3*0.5 + 1.0 + 3*0.5
        assert!((score.score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_named_type_is_not_interface() {
        let sig = signature(vec![Param::named("r", TypeExpr::ident("Repository"))], vec![]);
        assert_eq!(SignatureScorer::new().score(&sig).interface_param_count, 0);
    }

    #[test]
    fn test_generic_params_keep_declaration_order() {
        let sig = Signature {
            type_params: vec![
                TypeParam {
                    names: vec!["K".into()],
                    constraint: TypeExpr::ident("comparable"),
                },
                TypeParam {
                    names: vec!["V".into(), "W".into()],
                    constraint: TypeExpr::ident("any"),
                },
            ],
            params: vec![],
            results: vec![],
        };
        let score = SignatureScorer::new().score(&sig);
        assert_eq!(score.generic_params, vec!["K", "V", "W"]);
    }

    #[test]
    fn test_pointer_to_custom_error_is_error_like() {
        let sig = signature(
            vec![],
            vec![Param::unnamed(TypeExpr::pointer(TypeExpr::qualified(
                "apierr", "NotFoundError",
            )))],
        );
        assert!(SignatureScorer::new().score(&sig).returns_error_like);
    }
}
