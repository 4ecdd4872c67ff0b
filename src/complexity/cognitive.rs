//! Cognitive complexity for function bodies.
//!
//! Control constructs cost `1 + nesting`, so deeply nested code scores
//! higher than the same branches laid out flat. `else` and `else if`
//! cost a flat 1, each switch between `&&` and `||` in a condition costs
//! 1, and labeled jumps cost 1. Function literals raise the nesting level
//! of their body without adding cost themselves.

use crate::core::ast::{walk_expr, walk_stmt, BinaryOp, Block, Expr, IfStmt, Stmt, Visit};

pub fn calculate_cognitive(block: &Block) -> u32 {
    let mut visitor = CognitiveVisitor {
        complexity: 0,
        nesting_level: 0,
    };
    visitor.visit_block(block);
    visitor.complexity
}

struct CognitiveVisitor {
    complexity: u32,
    nesting_level: u32,
}

enum StmtClassification {
    Nesting,
    LabeledJump,
    Other,
}

impl CognitiveVisitor {
    fn classify_stmt(stmt: &Stmt) -> StmtClassification {
        match stmt {
            Stmt::For(_)
            | Stmt::Range(_)
            | Stmt::Switch(_)
            | Stmt::TypeSwitch(_)
            | Stmt::Select(_) => StmtClassification::Nesting,
            Stmt::Branch { label: Some(_), .. } => StmtClassification::LabeledJump,
            _ => StmtClassification::Other,
        }
    }

    fn with_nesting(&mut self, f: impl FnOnce(&mut Self)) {
        self.nesting_level += 1;
        f(self);
        self.nesting_level -= 1;
    }

    /// `if` chains: the head pays for its nesting, every `else if` and the
    /// final `else` pay a flat 1 and keep the head's nesting level.
    fn visit_if_chain(&mut self, head: &IfStmt) {
        self.complexity += 1 + self.nesting_level;

        let mut current = head;
        loop {
            if let Some(init) = &current.init {
                self.visit_stmt(init);
            }
            self.visit_condition(&current.cond);
            self.with_nesting(|v| v.visit_block(&current.then_branch));

            match current.else_branch.as_deref() {
                Some(Stmt::If(next)) => {
                    self.complexity += 1;
                    current = next;
                }
                Some(other) => {
                    self.complexity += 1;
                    self.with_nesting(|v| v.visit_stmt(other));
                    break;
                }
                None => break,
            }
        }
    }

    fn visit_condition(&mut self, cond: &Expr) {
        self.complexity += count_logical_sequences(cond, None);
        self.visit_expr(cond);
    }
}

/// Number of operator sequences in a boolean expression: `a && b && c`
/// is one sequence, `a && b || c` is two.
fn count_logical_sequences(expr: &Expr, parent: Option<BinaryOp>) -> u32 {
    match expr {
        Expr::Binary { op, lhs, rhs } if op.is_logical() => {
            let own = u32::from(parent != Some(*op));
            own + count_logical_sequences(lhs, Some(*op)) + count_logical_sequences(rhs, Some(*op))
        }
        Expr::Unary { operand, .. } => count_logical_sequences(operand, None),
        _ => 0,
    }
}

impl Visit for CognitiveVisitor {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::If(head) = stmt {
            self.visit_if_chain(head);
            return;
        }

        match Self::classify_stmt(stmt) {
            StmtClassification::Nesting => {
                self.complexity += 1 + self.nesting_level;
                if let Stmt::For(for_stmt) = stmt {
                    if let Some(cond) = &for_stmt.cond {
                        self.complexity += count_logical_sequences(cond, None);
                    }
                }
                self.with_nesting(|v| walk_stmt(v, stmt));
            }
            StmtClassification::LabeledJump => {
                self.complexity += 1;
            }
            StmtClassification::Other => walk_stmt(self, stmt),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::FuncLit { body, .. } => self.with_nesting(|v| v.visit_block(body)),
            _ => walk_expr(self, expr),
        }
    }
}
