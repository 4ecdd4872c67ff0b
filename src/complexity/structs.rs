use crate::analysis::fields::FieldBreakdown;
use crate::core::ComplexityScore;

/// Struct complexity from its field tallies.
///
/// Cyclomatic starts at the field count and adds each field's type weight;
/// nesting is the number of resolved embedded types.
pub fn calculate_struct_complexity(breakdown: &FieldBreakdown) -> ComplexityScore {
    let weighted: u32 = breakdown
        .fields_by_type
        .iter()
        .map(|(field_type, count)| field_type.weight() * count)
        .sum();
    let extra: u32 = breakdown
        .fields_by_type
        .iter()
        .map(|(field_type, count)| (field_type.weight() - 1) * count)
        .sum();

    let cyclomatic = breakdown.total_fields + weighted;
    let nesting_depth = breakdown.embedded_types.len() as u32;

    ComplexityScore {
        cyclomatic,
        cognitive: extra,
        nesting_depth,
        overall: cyclomatic as f64 + nesting_depth as f64 * 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EmbeddedType, FieldType};
    use std::collections::BTreeMap;

    fn breakdown(entries: &[(FieldType, u32)], embedded: usize) -> FieldBreakdown {
        let fields_by_type: BTreeMap<_, _> = entries.iter().copied().collect();
        FieldBreakdown {
            total_fields: fields_by_type.values().sum(),
            fields_by_type,
            embedded_types: (0..embedded)
                .map(|i| EmbeddedType {
                    name: format!("E{i}"),
                    package: "p".into(),
                    is_pointer: false,
                    is_exported: true,
                })
                .collect(),
            tag_usage: BTreeMap::new(),
        }
    }

    #[test]
    fn test_empty_struct() {
        let score = calculate_struct_complexity(&FieldBreakdown::default());
        assert_eq!(score, ComplexityScore::zero());
    }

    #[test]
    fn test_weights_and_overall() {
        let b = breakdown(
            &[
                (FieldType::Primitive, 2),
                (FieldType::Map, 1),
                (FieldType::Function, 1),
                (FieldType::Embedded, 1),
            ],
            1,
        );
        let score = calculate_struct_complexity(&b);
        // 5 fields + (2*1 + 1*2 + 1*3 + 1*3)
        assert_eq!(score.cyclomatic, 15);
        assert_eq!(score.nesting_depth, 1);
        assert_eq!(score.cognitive, 5);
        assert_eq!(score.overall, 15.5);
    }
}
