//! Owned syntax tree for the entities codegauge scores.
//!
//! Parsing source text is the job of an external front end; it hands us
//! these trees (usually as JSON inside a [`SourceBundle`]). The shapes
//! mirror a Go-style language: functions and methods with bodies,
//! struct types with tagged fields, and interface types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything the report assembler needs for one analysis run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceBundle {
    #[serde(default)]
    pub project_path: PathBuf,
    #[serde(default)]
    pub files: Vec<SourceFile>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Declared package name (`package store`).
    pub package: String,
    /// Import path / directory of the package; defaults to the package name.
    #[serde(default)]
    pub package_path: Option<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub functions: Vec<FuncDecl>,
    #[serde(default)]
    pub structs: Vec<StructDecl>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceDecl>,
}

impl SourceFile {
    pub fn package_path(&self) -> &str {
        self.package_path.as_deref().unwrap_or(&self.package)
    }
}

/// Lines of a doc comment with the comment markers already stripped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    pub lines: Vec<String>,
}

impl DocComment {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    #[serde(default)]
    pub receiver: Option<Receiver>,
    #[serde(default)]
    pub signature: Signature,
    /// `None` for declarations without a body (assembly stubs, interface methods).
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub doc: Option<DocComment>,
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub end_line: usize,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, body: Option<Block>) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            signature: Signature::default(),
            body,
            doc: None,
            line: 1,
            end_line: 1,
        }
    }

    /// Type name of the receiver with any pointer stripped.
    pub fn receiver_type_name(&self) -> Option<String> {
        self.receiver.as_ref().and_then(|r| r.ty.base_name())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    #[serde(default)]
    pub name: Option<String>,
    pub ty: TypeExpr,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<Param>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    pub names: Vec<String>,
    pub constraint: TypeExpr,
}

/// One parameter group: `a, b int` has two names, `int` in a result list has none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default)]
    pub names: Vec<String>,
    pub ty: TypeExpr,
}

impl Param {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            names: vec![name.into()],
            ty,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { names: vec![], ty }
    }

    /// Number of slots this group occupies in the signature.
    pub fn arity(&self) -> u32 {
        self.names.len().max(1) as u32
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructDecl {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub doc: Option<DocComment>,
    #[serde(default)]
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Empty for embedded fields.
    #[serde(default)]
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Raw tag literal, with or without surrounding backquotes.
    #[serde(default)]
    pub tag: Option<String>,
}

impl FieldDecl {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            names: vec![name.into()],
            ty,
            tag: None,
        }
    }

    pub fn embedded(ty: TypeExpr) -> Self {
        Self {
            names: vec![],
            ty,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<InterfaceMethod>,
    #[serde(default)]
    pub embeds: Vec<TypeExpr>,
    #[serde(default)]
    pub doc: Option<DocComment>,
    #[serde(default)]
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMethod {
    pub name: String,
    #[serde(default)]
    pub signature: Signature,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    Both,
    Send,
    Recv,
}

/// Type expressions as they appear in field, parameter and result positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    Ident {
        name: String,
    },
    Qualified {
        package: String,
        name: String,
    },
    Pointer {
        elem: Box<TypeExpr>,
    },
    /// `len == None` is a slice.
    Array {
        #[serde(default)]
        len: Option<String>,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<InterfaceMethod>,
        #[serde(default)]
        embeds: Vec<TypeExpr>,
    },
    Func {
        signature: Box<Signature>,
    },
    Struct {
        #[serde(default)]
        fields: Vec<FieldDecl>,
    },
    /// `...T` in the final parameter position.
    Ellipsis {
        elem: Box<TypeExpr>,
    },
    /// Generic instantiation, `List[T]`.
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident { name: name.into() }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeExpr) -> Self {
        Self::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        Self::Array {
            len: None,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(elem: TypeExpr) -> Self {
        Self::Chan {
            dir: ChanDir::Both,
            elem: Box::new(elem),
        }
    }

    pub fn func(signature: Signature) -> Self {
        Self::Func {
            signature: Box::new(signature),
        }
    }

    pub fn empty_interface() -> Self {
        Self::Interface {
            methods: vec![],
            embeds: vec![],
        }
    }

    pub fn ellipsis(elem: TypeExpr) -> Self {
        Self::Ellipsis {
            elem: Box::new(elem),
        }
    }

    /// Name of the named type behind at most one pointer.
    pub fn base_name(&self) -> Option<String> {
        match self {
            Self::Ident { name } | Self::Qualified { name, .. } => Some(name.clone()),
            Self::Pointer { elem } => match elem.as_ref() {
                Self::Ident { name } | Self::Qualified { name, .. } => Some(name.clone()),
                Self::Generic { base, .. } => base.base_name(),
                _ => None,
            },
            Self::Generic { base, .. } => base.base_name(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    #[serde(default)]
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub then_branch: Block,
    /// Either a plain block or another `if` (else-if chain).
    #[serde(default)]
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    #[serde(default)]
    pub init: Option<Box<Stmt>>,
    #[serde(default)]
    pub cond: Option<Expr>,
    #[serde(default)]
    pub post: Option<Box<Stmt>>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeStmt {
    #[serde(default)]
    pub key: Option<Expr>,
    #[serde(default)]
    pub value: Option<Expr>,
    pub iterable: Expr,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    #[serde(default)]
    pub init: Option<Box<Stmt>>,
    #[serde(default)]
    pub tag: Option<Expr>,
    #[serde(default)]
    pub cases: Vec<CaseClause>,
}

/// A `case` arm; an empty `exprs` list is the `default` arm.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseClause {
    #[serde(default)]
    pub exprs: Vec<Expr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

impl CaseClause {
    pub fn new(exprs: Vec<Expr>, body: Vec<Stmt>) -> Self {
        Self { exprs, body }
    }

    pub fn default_arm(body: Vec<Stmt>) -> Self {
        Self { exprs: vec![], body }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectStmt {
    #[serde(default)]
    pub cases: Vec<CommClause>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommClause {
    /// Send/receive statement; `None` is the `default` arm.
    #[serde(default)]
    pub comm: Option<Box<Stmt>>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    If(IfStmt),
    For(ForStmt),
    Range(RangeStmt),
    Switch(SwitchStmt),
    TypeSwitch(SwitchStmt),
    Select(SelectStmt),
    Block(Block),
    Labeled {
        label: String,
        stmt: Box<Stmt>,
    },
    Branch {
        token: BranchKind,
        #[serde(default)]
        label: Option<String>,
    },
    Go {
        call: Expr,
    },
    Defer {
        call: Expr,
    },
    Return {
        #[serde(default)]
        results: Vec<Expr>,
    },
    Assign {
        #[serde(default)]
        lhs: Vec<Expr>,
        #[serde(default)]
        rhs: Vec<Expr>,
    },
    Expr {
        expr: Expr,
    },
    /// Declarations, inc/dec, send and anything else without control flow.
    Other,
}

impl Stmt {
    pub fn if_then(cond: Expr, then: Vec<Stmt>) -> Self {
        Self::If(IfStmt {
            init: None,
            cond,
            then_branch: Block::new(then),
            else_branch: None,
        })
    }

    pub fn if_else(cond: Expr, then: Vec<Stmt>, otherwise: Stmt) -> Self {
        Self::If(IfStmt {
            init: None,
            cond,
            then_branch: Block::new(then),
            else_branch: Some(Box::new(otherwise)),
        })
    }

    pub fn for_loop(body: Vec<Stmt>) -> Self {
        Self::For(ForStmt {
            init: None,
            cond: None,
            post: None,
            body: Block::new(body),
        })
    }

    pub fn range(iterable: Expr, body: Vec<Stmt>) -> Self {
        Self::Range(RangeStmt {
            key: None,
            value: None,
            iterable,
            body: Block::new(body),
        })
    }

    pub fn switch(cases: Vec<CaseClause>) -> Self {
        Self::Switch(SwitchStmt {
            init: None,
            tag: None,
            cases,
        })
    }

    pub fn type_switch(cases: Vec<CaseClause>) -> Self {
        Self::TypeSwitch(SwitchStmt {
            init: None,
            tag: None,
            cases,
        })
    }

    pub fn block(stmts: Vec<Stmt>) -> Self {
        Self::Block(Block::new(stmts))
    }

    pub fn expr(expr: Expr) -> Self {
        Self::Expr { expr }
    }

    pub fn ret(results: Vec<Expr>) -> Self {
        Self::Return { results }
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    And,
    Or,
    Compare,
    Arithmetic,
    Bitwise,
}

impl BinaryOp {
    pub fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Ident {
        name: String,
    },
    Literal {
        value: String,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Call {
        func: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    Selector {
        base: Box<Expr>,
        field: String,
    },
    FuncLit {
        #[serde(default)]
        signature: Signature,
        body: Block,
    },
    Other,
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident { name: name.into() }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::And, lhs, rhs)
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Or, lhs, rhs)
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            func: Box::new(Self::ident(name)),
            args,
        }
    }

    pub fn func_lit(body: Vec<Stmt>) -> Self {
        Self::FuncLit {
            signature: Signature::default(),
            body: Block::new(body),
        }
    }
}

/// Read-only traversal over statement trees, in the style of `syn::visit`.
///
/// Override a `visit_*` method to hook a node kind and call the matching
/// `walk_*` function to keep descending.
pub trait Visit {
    fn visit_block(&mut self, block: &Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_case(&mut self, case: &CaseClause) {
        walk_case(self, case);
    }

    fn visit_comm(&mut self, comm: &CommClause) {
        walk_comm(self, comm);
    }
}

pub fn walk_block<V: Visit + ?Sized>(v: &mut V, block: &Block) {
    for stmt in &block.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::If(s) => {
            if let Some(init) = &s.init {
                v.visit_stmt(init);
            }
            v.visit_expr(&s.cond);
            v.visit_block(&s.then_branch);
            if let Some(other) = &s.else_branch {
                v.visit_stmt(other);
            }
        }
        Stmt::For(s) => {
            if let Some(init) = &s.init {
                v.visit_stmt(init);
            }
            if let Some(cond) = &s.cond {
                v.visit_expr(cond);
            }
            if let Some(post) = &s.post {
                v.visit_stmt(post);
            }
            v.visit_block(&s.body);
        }
        Stmt::Range(s) => {
            v.visit_expr(&s.iterable);
            v.visit_block(&s.body);
        }
        Stmt::Switch(s) | Stmt::TypeSwitch(s) => {
            if let Some(init) = &s.init {
                v.visit_stmt(init);
            }
            if let Some(tag) = &s.tag {
                v.visit_expr(tag);
            }
            for case in &s.cases {
                v.visit_case(case);
            }
        }
        Stmt::Select(s) => {
            for comm in &s.cases {
                v.visit_comm(comm);
            }
        }
        Stmt::Block(b) => v.visit_block(b),
        Stmt::Labeled { stmt, .. } => v.visit_stmt(stmt),
        Stmt::Go { call } | Stmt::Defer { call } => v.visit_expr(call),
        Stmt::Expr { expr } => v.visit_expr(expr),
        Stmt::Return { results } => {
            for expr in results {
                v.visit_expr(expr);
            }
        }
        Stmt::Assign { lhs, rhs } => {
            for expr in lhs.iter().chain(rhs) {
                v.visit_expr(expr);
            }
        }
        Stmt::Branch { .. } | Stmt::Other => {}
    }
}

pub fn walk_case<V: Visit + ?Sized>(v: &mut V, case: &CaseClause) {
    for expr in &case.exprs {
        v.visit_expr(expr);
    }
    for stmt in &case.body {
        v.visit_stmt(stmt);
    }
}

pub fn walk_comm<V: Visit + ?Sized>(v: &mut V, comm: &CommClause) {
    if let Some(stmt) = &comm.comm {
        v.visit_stmt(stmt);
    }
    for stmt in &comm.body {
        v.visit_stmt(stmt);
    }
}

pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs);
            v.visit_expr(rhs);
        }
        Expr::Unary { operand, .. } => v.visit_expr(operand),
        Expr::Call { func, args } => {
            v.visit_expr(func);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::Selector { base, .. } => v.visit_expr(base),
        Expr::FuncLit { body, .. } => v.visit_block(body),
        Expr::Ident { .. } | Expr::Literal { .. } | Expr::Other => {}
    }
}
