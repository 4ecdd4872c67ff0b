use crate::core::ast::{
    walk_case, walk_comm, walk_stmt, Block, CaseClause, CommClause, Stmt, Visit,
};

/// Cyclomatic complexity and maximum nesting depth of one body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchMetrics {
    pub cyclomatic: u32,
    pub nesting_depth: u32,
}

/// Single tree walk producing both numbers; base cyclomatic is 1.
pub fn calculate_branch_metrics(block: &Block) -> BranchMetrics {
    let mut visitor = CyclomaticVisitor {
        complexity: 1,
        depth: 0,
        max_depth: 0,
    };
    visitor.visit_block(block);
    BranchMetrics {
        cyclomatic: visitor.complexity,
        nesting_depth: visitor.max_depth,
    }
}

struct CyclomaticVisitor {
    complexity: u32,
    depth: u32,
    max_depth: u32,
}

fn is_decision_point(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::If(_)
            | Stmt::For(_)
            | Stmt::Range(_)
            | Stmt::Switch(_)
            | Stmt::TypeSwitch(_)
            | Stmt::Select(_)
    )
}

impl Visit for CyclomaticVisitor {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if !is_decision_point(stmt) {
            walk_stmt(self, stmt);
            return;
        }

        self.complexity += 1;
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        walk_stmt(self, stmt);
        self.depth -= 1;
    }

    fn visit_case(&mut self, case: &CaseClause) {
        self.complexity += 1;
        walk_case(self, case);
    }

    fn visit_comm(&mut self, comm: &CommClause) {
        self.complexity += 1;
        walk_comm(self, comm);
    }
}
