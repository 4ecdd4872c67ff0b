use crate::core::ast::DocComment;
use crate::core::DocumentationInfo;

const PRESENCE_BONUS: f64 = 0.30;
const LENGTH_BONUS: f64 = 0.20;
const DESCRIPTIVE_BONUS: f64 = 0.20;
const EXAMPLE_BONUS: f64 = 0.10;

const DESCRIPTIVE_VERBS: &[&str] = &["represents", "contains", "provides"];

/// Documentation quality for an optional doc comment. Never fails.
pub fn score(doc: Option<&DocComment>) -> DocumentationInfo {
    let Some(doc) = doc else {
        return DocumentationInfo::default();
    };

    let text = doc.text();
    let comment_length = text.chars().count();
    let lowered = text.to_lowercase();
    let mentions_example = lowered.contains("example");

    DocumentationInfo {
        has_comment: true,
        comment_length,
        has_example: mentions_example || doc.lines.iter().any(|l| is_code_line(l)),
        quality_score: quality_score(comment_length, &lowered, mentions_example),
    }
}

fn quality_score(length: usize, lowered: &str, mentions_example: bool) -> f64 {
    let mut quality = PRESENCE_BONUS;
    if length > 50 {
        quality += LENGTH_BONUS;
    }
    if length > 100 {
        quality += LENGTH_BONUS;
    }
    if DESCRIPTIVE_VERBS.iter().any(|verb| lowered.contains(verb)) {
        quality += DESCRIPTIVE_BONUS;
    }
    if mentions_example {
        quality += EXAMPLE_BONUS;
    }
    quality.min(1.0)
}

/// Indented lines and fences are rendered as code by doc tooling.
fn is_code_line(line: &str) -> bool {
    line.starts_with('\t') || line.starts_with("    ") || line.trim_start().starts_with("```")
}
