//! A sandboxed compiler for user-supplied arithmetic expressions.
//!
//! User text is never handed to a general-purpose evaluator. It is checked
//! against a character allow-list, parsed by a small recursive-descent parser
//! into an arithmetic AST, and evaluated over `f64`.
//!
//! # Syntax
//!
//! From lowest to highest precedence:
//!
//! | form | operators |
//! |---|---|
//! | conditional | `c ? a : b` |
//! | logical | `\|\|`, then `&&` |
//! | equality | `==`, `!=` |
//! | relational | `<`, `<=`, `>`, `>=` |
//! | additive | `+`, `-` |
//! | multiplicative | `*`, `/`, `%` |
//! | unary | `-`, `+`, `!` |
//! | power | `**` or `^` (right-associative) |
//!
//! Operands are numbers (`2`, `0.5`, `1e-3`), variables, the constants `pi`,
//! `PI`, `e`, `E`, `LN2`, `LN10`, `SQRT2`, calls such as `sin(t)` or
//! `max(a, b, c)`, and groups in `( )` or `[ ]`. Comparisons yield `1` or `0`;
//! a value is true when it is non-zero and not NaN.
//!
//! # Variables
//!
//! A right-hand side `f(t, y)` sees `t` and `y`; an exact solution sees `t`,
//! `y0`, and `t0`. See [`Scope`].

mod ast;
mod error;
mod lexer;
mod parser;

pub use error::ExprError;

use tracing::debug;
use twostep_core::{Exact, InitialCondition, Rhs};

use ast::Node;

/// Deepest nesting the compiler accepts.
///
/// Bounds both the parser's recursion and the height of the compiled tree, so
/// a long chain such as `y + y + ... + y` is rejected like deep parentheses.
pub const MAX_DEPTH: usize = 64;

/// The variables an expression may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// A right-hand side `f(t, y)`.
    Rhs,

    /// An exact solution `y(t)` parameterized by `y0` and `t0`.
    Exact,
}

impl Scope {
    /// Returns the slot index of a variable name in this scope.
    fn slot(self, name: &str) -> Option<usize> {
        match (self, name) {
            (_, "t") => Some(0),
            (Scope::Rhs, "y") | (Scope::Exact, "y0") => Some(1),
            (Scope::Exact, "t0") => Some(2),
            _ => None,
        }
    }

    /// Slot values used to try out a freshly compiled expression.
    fn trial_slots(self) -> [f64; 3] {
        match self {
            Scope::Rhs => [0.1, 0.2, 0.0],
            Scope::Exact => [1.0, 1.0, 0.0],
        }
    }
}

/// A compiled expression, ready to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    scope: Scope,
    root: Node,
}

/// Compiles `source` for the given scope.
///
/// # Errors
///
/// Returns an [`ExprError`] if the text is blank, contains a character
/// outside the allow-list, fails to parse, references an unknown variable or
/// function, calls a function with the wrong number of arguments, or nests
/// deeper than [`MAX_DEPTH`].
pub fn compile(source: &str, scope: Scope) -> Result<Expression, ExprError> {
    if source.trim().is_empty() {
        return Err(ExprError::Empty);
    }

    let tokens = lexer::tokenize(source)?;
    let root = parser::parse(&tokens, scope)?;
    let expression = Expression {
        source: source.to_owned(),
        scope,
        root,
    };

    // Evaluation is total, so the trial only records what the expression
    // yields; non-finite results are accepted.
    let trial = expression.eval(&scope.trial_slots());
    debug!(source, ?scope, trial, "compiled expression");

    Ok(expression)
}

impl Expression {
    /// Returns the source text the expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the scope the expression was compiled for.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Evaluates the expression with the given variable slots.
    fn eval(&self, slots: &[f64; 3]) -> f64 {
        self.root.eval(slots)
    }
}

/// A user-defined right-hand side `f(t, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRhs(Expression);

impl CompiledRhs {
    /// Compiles a right-hand side over `t` and `y`.
    ///
    /// # Errors
    ///
    /// Returns an [`ExprError`] if compilation fails, including for blank text.
    pub fn compile(source: &str) -> Result<Self, ExprError> {
        compile(source, Scope::Rhs).map(Self)
    }

    /// Returns the underlying expression.
    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.0
    }
}

impl Rhs for CompiledRhs {
    fn slope(&self, t: f64, y: f64) -> f64 {
        self.0.eval(&[t, y, 0.0])
    }
}

/// A user-defined exact solution `y(t)` over `t`, `y0`, and `t0`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExact(Expression);

impl CompiledExact {
    /// Compiles an exact solution, treating blank text as "no exact solution".
    ///
    /// # Errors
    ///
    /// Returns an [`ExprError`] if non-blank text fails to compile.
    pub fn compile(source: &str) -> Result<Option<Self>, ExprError> {
        if source.trim().is_empty() {
            return Ok(None);
        }
        compile(source, Scope::Exact).map(|e| Some(Self(e)))
    }

    /// Returns the underlying expression.
    #[must_use]
    pub fn expression(&self) -> &Expression {
        &self.0
    }
}

impl Exact for CompiledExact {
    fn value(&self, t: f64, initial: InitialCondition) -> f64 {
        self.0.eval(&[t, initial.y0, initial.t0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn rhs(source: &str) -> CompiledRhs {
        CompiledRhs::compile(source).expect("should compile")
    }

    #[test]
    fn evaluates_rhs_over_t_and_y() {
        let f = rhs("t + y");
        assert_relative_eq!(f.slope(1.0, 2.0), 3.0);

        let f = rhs("-sin(t) + y");
        assert_relative_eq!(f.slope(0.5, 1.0), 1.0 - 0.5_f64.sin());
    }

    #[test]
    fn caret_is_power() {
        let f = rhs("y^2");
        assert_relative_eq!(f.slope(0.0, 3.0), 9.0);
        assert_eq!(rhs("y^2").expression().root, rhs("y**2").expression().root);
    }

    #[test]
    fn exact_sees_initial_condition() {
        let exact = CompiledExact::compile("y0 * exp(t - t0)")
            .expect("should compile")
            .expect("not blank");
        let ic = InitialCondition::new(1.0, 2.0);
        assert_relative_eq!(exact.value(1.0, ic), 2.0);
        assert_relative_eq!(exact.value(3.0, ic), 2.0 * 2.0_f64.exp());
    }

    #[test]
    fn blank_exact_is_absent() {
        assert_eq!(CompiledExact::compile("   \n"), Ok(None));
    }

    #[test]
    fn blank_rhs_is_rejected() {
        assert_eq!(CompiledRhs::compile(""), Err(ExprError::Empty));
        assert_eq!(CompiledRhs::compile(" \t"), Err(ExprError::Empty));
    }

    #[test]
    fn disallowed_characters_are_rejected() {
        assert_eq!(
            CompiledRhs::compile("; DROP"),
            Err(ExprError::DisallowedCharacter { ch: ';', pos: 0 })
        );
        assert!(matches!(
            CompiledRhs::compile("y + \"x\""),
            Err(ExprError::DisallowedCharacter { ch: '"', .. })
        ));
        assert!(matches!(
            CompiledRhs::compile("{ y }"),
            Err(ExprError::DisallowedCharacter { ch: '{', .. })
        ));
    }

    #[test]
    fn variables_are_scoped() {
        assert!(matches!(
            CompiledRhs::compile("y0 * t"),
            Err(ExprError::UnknownVariable { .. })
        ));
        assert!(matches!(
            CompiledExact::compile("y * t"),
            Err(ExprError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn non_finite_trial_value_is_tolerated() {
        // The exact-solution trial uses t0 = 0.
        let exact = CompiledExact::compile("1 / t0").expect("should compile");
        assert!(exact.is_some());

        let f = rhs("log(y - y)");
        assert_eq!(f.slope(0.0, 1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn long_sums_are_rejected_not_evaluated() {
        for terms in [1_000, 5_000, 200_000] {
            let source = format!("y{}", "+y".repeat(terms));
            assert_eq!(
                CompiledRhs::compile(&source),
                Err(ExprError::TooDeep(MAX_DEPTH))
            );
        }
        let exact = format!("t0{}", "*y0".repeat(5_000));
        assert_eq!(
            CompiledExact::compile(&exact),
            Err(ExprError::TooDeep(MAX_DEPTH))
        );
    }

    #[test]
    fn source_and_scope_are_kept() {
        let f = rhs("2*t");
        assert_eq!(f.expression().source(), "2*t");
        assert_eq!(f.expression().scope(), Scope::Rhs);
    }
}
