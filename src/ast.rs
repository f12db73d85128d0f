use std::fmt;

/// An abstract syntax tree (AST) node representing an arithmetic expression.
///
/// Every node owns its children exclusively, so the structure is always a
/// tree. Each variant records the byte offset of the token it was built from
/// so evaluation errors can point back into the expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The literal value.
        value:    f64,
        /// Byte offset of the literal.
        position: usize,
    },
    /// A prefix sign applied to an operand (e.g. `-x`).
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Byte offset of the sign.
        position: usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Byte offset of the operator.
        position: usize,
    },
}

impl Expr {
    /// Returns the byte offset associated with this node.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Number { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. } => *position,
        }
    }

    /// Moves the children of this node into `out`, leaving leaves behind.
    fn detach_children(&mut self, out: &mut Vec<Self>) {
        let leaf = || Self::Number { value:    0.0,
                                     position: 0, };
        match self {
            Self::Number { .. } => {},
            Self::UnaryOp { expr, .. } => out.push(std::mem::replace(&mut **expr, leaf())),
            Self::BinaryOp { left, right, .. } => {
                out.push(std::mem::replace(&mut **left, leaf()));
                out.push(std::mem::replace(&mut **right, leaf()));
            },
        }
    }
}

/// Long operator chains build trees as deep as the chain is long, so nodes
/// are torn down with an explicit worklist instead of recursively.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl fmt::Display for Expr {
    /// Renders the tree fully parenthesized, e.g. `(2 + (3 * 4))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::UnaryOp { op, expr, .. } => write!(f, "{op}{expr}"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// Prefix sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `+x`, the operand unchanged.
    Plus,
    /// `-x`, the negated operand.
    Negate,
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

/// Binding strength of prefix signs; higher than any binary operator.
pub const UNARY_PRECEDENCE: u8 = 3;

impl BinaryOperator {
    /// Binding strength of the operator. Larger binds tighter.
    ///
    /// # Example
    /// ```
    /// use memocalc::ast::BinaryOperator;
    ///
    /// assert!(BinaryOperator::Mul.precedence() > BinaryOperator::Sub.precedence());
    /// assert_eq!(BinaryOperator::Add.precedence(), BinaryOperator::Sub.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Plus => "+",
            Self::Negate => "-",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        };
        write!(f, "{s}")
    }
}
