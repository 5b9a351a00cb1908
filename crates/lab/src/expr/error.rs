use thiserror::Error;

/// Reasons an expression fails to compile.
///
/// Positions are character offsets into the source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("expression is empty")]
    Empty,

    #[error("character {ch:?} at position {pos} is not allowed")]
    DisallowedCharacter { ch: char, pos: usize },

    #[error("invalid number {text:?} at position {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unexpected `{found}` at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unknown variable `{name}` at position {pos}")]
    UnknownVariable { name: String, pos: usize },

    #[error("unknown function `{name}` at position {pos}")]
    UnknownFunction { name: String, pos: usize },

    #[error("`{name}` takes {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}
