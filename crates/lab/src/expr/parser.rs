use super::{
    ExprError, MAX_DEPTH, Scope,
    ast::{BinaryOp, Function, Node, UnaryOp, constant},
    lexer::{Spanned, Token},
};

/// Parses a token stream into an expression tree for `scope`.
pub(super) fn parse(tokens: &[Spanned], scope: Scope) -> Result<Node, ExprError> {
    let mut parser = Parser {
        tokens,
        next: 0,
        scope,
        depth: 0,
    };
    let root = parser.conditional()?;
    match parser.peek() {
        None => Ok(root),
        Some(spanned) => Err(unexpected(spanned)),
    }
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    next: usize,
    scope: Scope,
    depth: usize,
}

/// Rejects a freshly built node whose tree is taller than [`MAX_DEPTH`].
///
/// Every composite node passes through here, so the children are already
/// bounded and measuring the height never recurses past the limit.
fn bounded(node: Node) -> Result<Node, ExprError> {
    if node.height() > MAX_DEPTH {
        return Err(ExprError::TooDeep(MAX_DEPTH));
    }
    Ok(node)
}

fn unexpected(spanned: &Spanned) -> ExprError {
    ExprError::UnexpectedToken {
        found: spanned.token.text(),
        pos: spanned.pos,
    }
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Spanned> {
        self.tokens.get(self.next)
    }

    fn advance(&mut self) -> Result<&'a Spanned, ExprError> {
        let spanned = self.tokens.get(self.next).ok_or(ExprError::UnexpectedEnd)?;
        self.next += 1;
        Ok(spanned)
    }

    /// Consumes the next token if it is `token`.
    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().is_some_and(|s| &s.token == token) {
            self.next += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), ExprError> {
        let spanned = self.advance()?;
        if &spanned.token == token {
            Ok(())
        } else {
            Err(unexpected(spanned))
        }
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ExprError>,
    ) -> Result<T, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn conditional(&mut self) -> Result<Node, ExprError> {
        self.nested(|p| {
            let cond = p.or()?;
            if !p.eat(&Token::Question) {
                return Ok(cond);
            }
            let then = p.conditional()?;
            p.expect(&Token::Colon)?;
            let otherwise = p.conditional()?;
            bounded(Node::Conditional(
                Box::new(cond),
                Box::new(then),
                Box::new(otherwise),
            ))
        })
    }

    fn or(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.and()?;
        while self.eat(&Token::Or) {
            let rhs = self.and()?;
            lhs = bounded(Node::Or(Box::new(lhs), Box::new(rhs)))?;
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.equality()?;
        while self.eat(&Token::And) {
            let rhs = self.equality()?;
            lhs = bounded(Node::And(Box::new(lhs), Box::new(rhs)))?;
        }
        Ok(lhs)
    }

    /// Parses a left-associative chain of `operand` joined by `ops`.
    fn chain(
        &mut self,
        ops: &[(Token, BinaryOp)],
        operand: fn(&mut Self) -> Result<Node, ExprError>,
    ) -> Result<Node, ExprError> {
        let mut lhs = operand(self)?;
        loop {
            let Some(op) = self
                .peek()
                .and_then(|s| ops.iter().find(|(token, _)| *token == s.token))
                .map(|(_, op)| *op)
            else {
                return Ok(lhs);
            };
            self.next += 1;
            let rhs = operand(self)?;
            lhs = bounded(Node::Binary(op, Box::new(lhs), Box::new(rhs)))?;
        }
    }

    fn equality(&mut self) -> Result<Node, ExprError> {
        self.chain(
            &[(Token::Eq, BinaryOp::Eq), (Token::Ne, BinaryOp::Ne)],
            Self::relational,
        )
    }

    fn relational(&mut self) -> Result<Node, ExprError> {
        self.chain(
            &[
                (Token::Lt, BinaryOp::Lt),
                (Token::Le, BinaryOp::Le),
                (Token::Gt, BinaryOp::Gt),
                (Token::Ge, BinaryOp::Ge),
            ],
            Self::additive,
        )
    }

    fn additive(&mut self) -> Result<Node, ExprError> {
        self.chain(
            &[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)],
            Self::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> Result<Node, ExprError> {
        self.chain(
            &[
                (Token::Star, BinaryOp::Mul),
                (Token::Slash, BinaryOp::Div),
                (Token::Percent, BinaryOp::Rem),
            ],
            Self::unary,
        )
    }

    fn unary(&mut self) -> Result<Node, ExprError> {
        let op = match self.peek().map(|s| &s.token) {
            Some(Token::Minus) => UnaryOp::Neg,
            Some(Token::Plus) => UnaryOp::Plus,
            Some(Token::Bang) => UnaryOp::Not,
            _ => return self.power(),
        };
        self.next += 1;
        self.nested(|p| {
            let operand = p.unary()?;
            bounded(Node::Unary(op, Box::new(operand)))
        })
    }

    /// Parses `base ** exponent`, where the exponent may carry a sign and
    /// binds to the right.
    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.primary()?;
        if !self.eat(&Token::Power) {
            return Ok(base);
        }
        let exponent = self.nested(Self::unary)?;
        bounded(Node::Binary(
            BinaryOp::Pow,
            Box::new(base),
            Box::new(exponent),
        ))
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let spanned = self.advance()?;
        let pos = spanned.pos;
        match &spanned.token {
            Token::Number(value) => Ok(Node::Number(*value)),
            Token::LParen => self.group(&Token::RParen),
            Token::LBracket => self.group(&Token::RBracket),
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    self.call(name, pos)
                } else {
                    self.variable(name, pos)
                }
            }
            _ => Err(unexpected(spanned)),
        }
    }

    /// Resolves a bare identifier to a variable slot or a constant.
    fn variable(&self, name: &str, pos: usize) -> Result<Node, ExprError> {
        self.scope
            .slot(name)
            .map(Node::Variable)
            .or_else(|| constant(name).map(Node::Number))
            .ok_or_else(|| ExprError::UnknownVariable {
                name: name.to_owned(),
                pos,
            })
    }

    fn group(&mut self, close: &Token) -> Result<Node, ExprError> {
        let inner = self.conditional()?;
        self.expect(close)?;
        Ok(inner)
    }

    /// Parses a call's arguments; the opening parenthesis is already consumed.
    fn call(&mut self, name: &str, pos: usize) -> Result<Node, ExprError> {
        let function = Function::lookup(name).ok_or_else(|| ExprError::UnknownFunction {
            name: name.to_owned(),
            pos,
        })?;

        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.conditional()?);
                if self.eat(&Token::RParen) {
                    break;
                }
                self.expect(&Token::Comma)?;
            }
        }

        let arity = function.arity();
        if !arity.accepts(args.len()) {
            return Err(ExprError::Arity {
                name: name.to_owned(),
                expected: arity.describe(),
                found: args.len(),
            });
        }

        bounded(Node::Call(function, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::expr::lexer::tokenize;

    fn parse_rhs(source: &str) -> Result<Node, ExprError> {
        parse(&tokenize(source)?, Scope::Rhs)
    }

    fn eval(source: &str, t: f64, y: f64) -> f64 {
        parse_rhs(source)
            .expect("should parse")
            .eval(&[t, y, 0.0])
    }

    #[test]
    fn precedence() {
        assert_eq!(eval("1 + 2 * 3", 0.0, 0.0), 7.0);
        assert_eq!(eval("(1 + 2) * 3", 0.0, 0.0), 9.0);
        assert_eq!(eval("[1 + 2] * 3", 0.0, 0.0), 9.0);
        assert_eq!(eval("10 - 4 - 3", 0.0, 0.0), 3.0);
        assert_eq!(eval("7 % 4 * 2", 0.0, 0.0), 6.0);
        assert_eq!(eval("1 + 2 < 4", 0.0, 0.0), 1.0);
        assert_eq!(eval("1 < 2 == 1", 0.0, 0.0), 1.0);
    }

    #[test]
    fn power_binds_right_and_tighter_than_negation() {
        assert_eq!(eval("2^3^2", 0.0, 0.0), 512.0);
        assert_eq!(eval("-y^2", 0.0, 3.0), -9.0);
        assert_eq!(eval("2^-1", 0.0, 0.0), 0.5);
        assert_eq!(eval("(-2)**2", 0.0, 0.0), 4.0);
    }

    #[test]
    fn conditional_and_logic() {
        assert_eq!(eval("t > 1 ? y : -y", 2.0, 5.0), 5.0);
        assert_eq!(eval("t > 1 ? y : -y", 0.0, 5.0), -5.0);
        assert_eq!(eval("t > 0 && y > 0", 1.0, 1.0), 1.0);
        assert_eq!(eval("t > 0 || y > 0", -1.0, -1.0), 0.0);
        assert_eq!(eval("!t", 0.0, 0.0), 1.0);
        assert_eq!(eval("t < 1 ? 0 : t < 2 ? 1 : 2", 1.5, 0.0), 1.0);
    }

    #[test]
    fn functions_and_constants() {
        assert_relative_eq!(eval("cos(t) - y", 0.0, 0.25), 0.75);
        assert_relative_eq!(eval("sin(pi / 2)", 0.0, 0.0), 1.0);
        assert_relative_eq!(eval("max(t, y, 3)", 1.0, 2.0), 3.0);
        assert_relative_eq!(eval("atan2(1, 1) * 4", 0.0, 0.0), std::f64::consts::PI);
        assert_relative_eq!(eval("log(E)", 0.0, 0.0), 1.0);
    }

    #[test]
    fn unknown_names() {
        assert_eq!(
            parse_rhs("x + 1"),
            Err(ExprError::UnknownVariable {
                name: "x".into(),
                pos: 0
            })
        );
        assert_eq!(
            parse_rhs("y + alert(1)"),
            Err(ExprError::UnknownFunction {
                name: "alert".into(),
                pos: 4
            })
        );
        // A variable is not callable.
        assert!(matches!(parse_rhs("y(2)"), Err(ExprError::UnknownFunction { .. })));
    }

    #[test]
    fn arity_is_checked() {
        assert_eq!(
            parse_rhs("sin(t, y)"),
            Err(ExprError::Arity {
                name: "sin".into(),
                expected: "1",
                found: 2
            })
        );
        assert!(matches!(parse_rhs("pow(2)"), Err(ExprError::Arity { .. })));
        assert!(matches!(parse_rhs("max()"), Err(ExprError::Arity { .. })));
    }

    #[test]
    fn malformed_input() {
        assert_eq!(parse_rhs("t +"), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse_rhs("(t"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(
            parse_rhs("t y"),
            Err(ExprError::UnexpectedToken { pos: 2, .. })
        ));
        assert!(matches!(parse_rhs("(t]"), Err(ExprError::UnexpectedToken { .. })));
        assert!(matches!(parse_rhs("t ? y"), Err(ExprError::UnexpectedEnd)));
        assert!(matches!(parse_rhs(")"), Err(ExprError::UnexpectedToken { .. })));
    }

    #[test]
    fn nesting_is_bounded() {
        let shallow = format!("{}y{}", "(".repeat(20), ")".repeat(20));
        assert!(parse_rhs(&shallow).is_ok());

        let deep = format!("{}y{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse_rhs(&deep), Err(ExprError::TooDeep(MAX_DEPTH)));

        let negations = format!("{}y", "-".repeat(200));
        assert_eq!(parse_rhs(&negations), Err(ExprError::TooDeep(MAX_DEPTH)));
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let short = format!("y{}", "+y".repeat(MAX_DEPTH - 1));
        assert!(parse_rhs(&short).is_ok());

        for op in ["+", "*", "<", "==", "&&", "||"] {
            let long = format!("y{}", format!("{op}y").repeat(5000));
            assert_eq!(
                parse_rhs(&long),
                Err(ExprError::TooDeep(MAX_DEPTH)),
                "chain of {op}"
            );
        }
    }

    #[test]
    fn chains_count_toward_the_depth_of_enclosing_groups() {
        let chain = format!("y{}", "+y".repeat(MAX_DEPTH - 1));
        let wrapped = format!("{chain} + ({chain})");
        assert_eq!(parse_rhs(&wrapped), Err(ExprError::TooDeep(MAX_DEPTH)));

        // Forty groups stay within the parser's nesting limit, but every group
        // is the left operand of two more links.
        let stacked = format!("{}y{}", "(".repeat(40), ")+y+y".repeat(40));
        assert_eq!(parse_rhs(&stacked), Err(ExprError::TooDeep(MAX_DEPTH)));

        let shallow = format!("{}y{}", "(".repeat(10), ")+y+y".repeat(10));
        assert!(parse_rhs(&shallow).is_ok());
    }
}
