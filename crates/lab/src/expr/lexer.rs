use super::ExprError;

/// Punctuation accepted in addition to ASCII letters, digits, and whitespace.
const ALLOWED_PUNCTUATION: &str = ".,+-*/%^()[]<>=!&|?:";

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Power,
    Slash,
    Percent,
    Bang,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Question,
    Colon,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

impl Token {
    /// Returns the token as it would be written in source.
    pub(super) fn text(&self) -> String {
        let op = match self {
            Token::Number(value) => return value.to_string(),
            Token::Ident(name) => return name.clone(),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Power => "**",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Bang => "!",
            Token::Lt => "<",
            Token::Le => "<=",
            Token::Gt => ">",
            Token::Ge => ">=",
            Token::Eq => "==",
            Token::Ne => "!=",
            Token::And => "&&",
            Token::Or => "||",
            Token::Question => "?",
            Token::Colon => ":",
            Token::Comma => ",",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
        };
        op.to_owned()
    }
}

/// A token and the character offset where it starts.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Spanned {
    pub(super) token: Token,
    pub(super) pos: usize,
}

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch.is_ascii_whitespace() || ALLOWED_PUNCTUATION.contains(ch)
}

/// Splits `source` into tokens.
///
/// Every character is checked against the allow-list before any token is
/// produced. `^` is read as `**`, and `===`/`!==` as `==`/`!=`.
pub(super) fn tokenize(source: &str) -> Result<Vec<Spanned>, ExprError> {
    let chars: Vec<char> = source.chars().collect();

    if let Some((pos, &ch)) = chars.iter().enumerate().find(|(_, ch)| !is_allowed(**ch)) {
        return Err(ExprError::DisallowedCharacter { ch, pos });
    }

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let pos = i;

        if ch.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || (ch == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit))
        {
            let (token, end) = number(&chars, i)?;
            tokens.push(Spanned { token, pos });
            i = end;
            continue;
        }

        if ch.is_ascii_alphabetic() {
            let end = chars[i..]
                .iter()
                .position(|c| !c.is_ascii_alphanumeric())
                .map_or(chars.len(), |n| i + n);
            let name: String = chars[i..end].iter().collect();
            tokens.push(Spanned {
                token: Token::Ident(name),
                pos,
            });
            i = end;
            continue;
        }

        let next = chars.get(i + 1).copied();
        let after = chars.get(i + 2).copied();
        let (token, len) = match (ch, next) {
            ('*', Some('*')) => (Token::Power, 2),
            ('^', _) => (Token::Power, 1),
            ('*', _) => (Token::Star, 1),
            ('+', _) => (Token::Plus, 1),
            ('-', _) => (Token::Minus, 1),
            ('/', _) => (Token::Slash, 1),
            ('%', _) => (Token::Percent, 1),
            ('<', Some('=')) => (Token::Le, 2),
            ('<', _) => (Token::Lt, 1),
            ('>', Some('=')) => (Token::Ge, 2),
            ('>', _) => (Token::Gt, 1),
            ('=', Some('=')) if after == Some('=') => (Token::Eq, 3),
            ('=', Some('=')) => (Token::Eq, 2),
            ('!', Some('=')) if after == Some('=') => (Token::Ne, 3),
            ('!', Some('=')) => (Token::Ne, 2),
            ('!', _) => (Token::Bang, 1),
            ('&', Some('&')) => (Token::And, 2),
            ('|', Some('|')) => (Token::Or, 2),
            ('?', _) => (Token::Question, 1),
            (':', _) => (Token::Colon, 1),
            (',', _) => (Token::Comma, 1),
            ('(', _) => (Token::LParen, 1),
            (')', _) => (Token::RParen, 1),
            ('[', _) => (Token::LBracket, 1),
            (']', _) => (Token::RBracket, 1),
            _ => {
                return Err(ExprError::UnexpectedToken {
                    found: ch.to_string(),
                    pos,
                });
            }
        };
        tokens.push(Spanned { token, pos });
        i += len;
    }

    Ok(tokens)
}

/// Reads a decimal literal starting at `start`, returning it and the index
/// just past it.
fn number(chars: &[char], start: usize) -> Result<(Token, usize), ExprError> {
    let digits_from = |mut i: usize| {
        while chars.get(i).is_some_and(char::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = digits_from(start);
    if chars.get(end) == Some(&'.') {
        end = digits_from(end + 1);
    }

    // An exponent needs at least one digit, otherwise `e` starts the next token.
    if matches!(chars.get(end), Some('e' | 'E')) {
        let mut exp = end + 1;
        if matches!(chars.get(exp), Some('+' | '-')) {
            exp += 1;
        }
        if chars.get(exp).is_some_and(char::is_ascii_digit) {
            end = digits_from(exp);
        }
    }

    let text: String = chars[start..end].iter().collect();
    text.parse::<f64>()
        .map(|value| (Token::Number(value), end))
        .map_err(|_| ExprError::InvalidNumber { text, pos: start })
}
