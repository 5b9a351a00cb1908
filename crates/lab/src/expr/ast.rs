use std::f64::consts;

/// A node of a compiled expression.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Number(f64),
    Variable(usize),
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
    Conditional(Box<Node>, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// Functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Function {
    Abs,
    Sign,
    Sqrt,
    Cbrt,
    Exp,
    Expm1,
    Ln,
    Log2,
    Log10,
    Log1p,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Floor,
    Ceil,
    Round,
    Trunc,
    Atan2,
    Pow,
    Hypot,
    Min,
    Max,
}

/// How many arguments a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub(super) fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    pub(super) fn describe(self) -> &'static str {
        match self {
            Arity::Exactly(1) => "1",
            Arity::Exactly(2) => "2",
            Arity::Exactly(_) => "a fixed number of",
            Arity::AtLeast(_) => "at least 1",
        }
    }
}

impl Function {
    pub(super) fn lookup(name: &str) -> Option<Self> {
        let function = match name {
            "abs" => Function::Abs,
            "sign" => Function::Sign,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            "exp" => Function::Exp,
            "expm1" => Function::Expm1,
            "log" | "ln" => Function::Ln,
            "log2" => Function::Log2,
            "log10" => Function::Log10,
            "log1p" => Function::Log1p,
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "asinh" => Function::Asinh,
            "acosh" => Function::Acosh,
            "atanh" => Function::Atanh,
            "floor" => Function::Floor,
            "ceil" => Function::Ceil,
            "round" => Function::Round,
            "trunc" => Function::Trunc,
            "atan2" => Function::Atan2,
            "pow" => Function::Pow,
            "hypot" => Function::Hypot,
            "min" => Function::Min,
            "max" => Function::Max,
            _ => return None,
        };
        Some(function)
    }

    pub(super) fn arity(self) -> Arity {
        match self {
            Function::Atan2 | Function::Pow | Function::Hypot => Arity::Exactly(2),
            Function::Min | Function::Max => Arity::AtLeast(1),
            _ => Arity::Exactly(1),
        }
    }

    /// Applies the function to arguments whose count was checked at parse time.
    fn apply(self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let second = || args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Function::Abs => x.abs(),
            Function::Sign => {
                if x == 0.0 || x.is_nan() {
                    x
                } else {
                    x.signum()
                }
            }
            Function::Sqrt => x.sqrt(),
            Function::Cbrt => x.cbrt(),
            Function::Exp => x.exp(),
            Function::Expm1 => x.exp_m1(),
            Function::Ln => x.ln(),
            Function::Log2 => x.log2(),
            Function::Log10 => x.log10(),
            Function::Log1p => x.ln_1p(),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Asinh => x.asinh(),
            Function::Acosh => x.acosh(),
            Function::Atanh => x.atanh(),
            Function::Floor => x.floor(),
            Function::Ceil => x.ceil(),
            Function::Round => x.round(),
            Function::Trunc => x.trunc(),
            Function::Atan2 => x.atan2(second()),
            Function::Pow => x.powf(second()),
            Function::Hypot => x.hypot(second()),
            Function::Min => extremum(args, f64::min),
            Function::Max => extremum(args, f64::max),
        }
    }
}

/// Folds `args` with `pick`, yielding NaN if any argument is NaN.
fn extremum(args: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    if args.iter().any(|a| a.is_nan()) {
        return f64::NAN;
    }
    args.iter().copied().reduce(pick).unwrap_or(f64::NAN)
}

/// Returns the value of a named constant.
pub(super) fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(consts::PI),
        "e" | "E" => Some(consts::E),
        "LN2" => Some(consts::LN_2),
        "LN10" => Some(consts::LN_10),
        "SQRT2" => Some(consts::SQRT_2),
        _ => None,
    }
}

fn truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

fn boolean(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

impl Node {
    /// Returns the number of nodes on the longest root-to-leaf path.
    pub(super) fn height(&self) -> usize {
        let children = match self {
            Node::Number(_) | Node::Variable(_) => return 1,
            Node::Unary(_, operand) => operand.height(),
            Node::Binary(_, lhs, rhs) | Node::And(lhs, rhs) | Node::Or(lhs, rhs) => {
                lhs.height().max(rhs.height())
            }
            Node::Conditional(cond, then, otherwise) => {
                cond.height().max(then.height()).max(otherwise.height())
            }
            Node::Call(_, args) => args.iter().map(Node::height).max().unwrap_or(0),
        };
        children + 1
    }

    pub(super) fn eval(&self, slots: &[f64; 3]) -> f64 {
        match self {
            Node::Number(value) => *value,
            Node::Variable(slot) => slots[*slot],
            Node::Unary(op, operand) => {
                let x = operand.eval(slots);
                match op {
                    UnaryOp::Neg => -x,
                    UnaryOp::Plus => x,
                    UnaryOp::Not => boolean(!truthy(x)),
                }
            }
            Node::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(slots), rhs.eval(slots));
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Rem => a % b,
                    BinaryOp::Pow => a.powf(b),
                    BinaryOp::Lt => boolean(a < b),
                    BinaryOp::Le => boolean(a <= b),
                    BinaryOp::Gt => boolean(a > b),
                    BinaryOp::Ge => boolean(a >= b),
                    BinaryOp::Eq => boolean(a == b),
                    BinaryOp::Ne => boolean(a != b),
                }
            }
            Node::And(lhs, rhs) => {
                let a = lhs.eval(slots);
                if truthy(a) { rhs.eval(slots) } else { a }
            }
            Node::Or(lhs, rhs) => {
                let a = lhs.eval(slots);
                if truthy(a) { a } else { rhs.eval(slots) }
            }
            Node::Conditional(cond, then, otherwise) => {
                if truthy(cond.eval(slots)) {
                    then.eval(slots)
                } else {
                    otherwise.eval(slots)
                }
            }
            Node::Call(function, args) => {
                let values: Vec<f64> = args.iter().map(|arg| arg.eval(slots)).collect();
                function.apply(&values)
            }
        }
    }
}
