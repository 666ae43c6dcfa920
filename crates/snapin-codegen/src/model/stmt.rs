//! Statement and expression trees for generated method bodies.
//!
//! Only the handful of constructs the holder pattern needs are modelled:
//! null checks, throws, a monitor block, assignment, try/finally, calls and
//! returns.

use crate::model::CodeType;

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Null,
    This,
    /// `this.<name>`
    FieldRef(String),
    /// A parameter or local.
    Var(String),
    Eq(Box<Expr>, Box<Expr>),
    Ne(Box<Expr>, Box<Expr>),
    /// `new T(args)`
    New { ty: CodeType, args: Vec<Expr> },
    /// `[target.]method(args)`
    Invoke {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
    StringLit(String),
}

impl Expr {
    pub fn field(name: impl Into<String>) -> Self {
        Expr::FieldRef(name.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn equal_to(self, other: Expr) -> Self {
        Expr::Eq(Box::new(self), Box::new(other))
    }

    pub fn not_equal_to(self, other: Expr) -> Self {
        Expr::Ne(Box::new(self), Box::new(other))
    }

    pub fn new_instance(ty: CodeType) -> Self {
        Expr::New {
            ty,
            args: Vec::new(),
        }
    }

    /// Unqualified call on the enclosing instance.
    pub fn invoke(method: impl Into<String>) -> Self {
        Expr::Invoke {
            target: None,
            method: method.into(),
            args: Vec::new(),
        }
    }

    /// Call `method` on `self`.
    pub fn invoke_on(self, method: impl Into<String>) -> Self {
        Expr::Invoke {
            target: Some(Box::new(self)),
            method: method.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument to a call or constructor expression.
    ///
    /// Other expressions are returned unchanged.
    pub fn arg(mut self, arg: Expr) -> Self {
        match &mut self {
            Expr::New { args, .. } | Expr::Invoke { args, .. } => args.push(arg),
            _ => {}
        }
        self
    }

    pub fn args(self, args: impl IntoIterator<Item = Expr>) -> Self {
        args.into_iter().fold(self, Expr::arg)
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    If { cond: Expr, then: Block },
    Throw(Expr),
    Synchronized { lock: Expr, body: Block },
    Assign { target: Expr, value: Expr },
    Expr(Expr),
    Return(Option<Expr>),
    TryFinally { body: Block, finally: Block },
}

/// An ordered list of statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    pub fn push(&mut self, stmt: Stmt) -> &mut Self {
        self.stmts.push(stmt);
        self
    }

    /// `if (cond) throw error;`
    pub fn throw_if(&mut self, cond: Expr, error: Expr) -> &mut Self {
        let mut then = Block::new();
        then.push(Stmt::Throw(error));
        self.push(Stmt::If { cond, then })
    }

    pub fn assign(&mut self, target: Expr, value: Expr) -> &mut Self {
        self.push(Stmt::Assign { target, value })
    }

    /// Invoke `call`, returning its value unless `void_call` is set.
    ///
    /// A void call is followed by a bare `return;`.
    pub fn call_and_return(&mut self, call: Expr, void_call: bool) -> &mut Self {
        if void_call {
            self.push(Stmt::Expr(call));
            self.push(Stmt::Return(None))
        } else {
            self.push(Stmt::Return(Some(call)))
        }
    }
}
