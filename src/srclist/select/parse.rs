// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parsing of textual selections, e.g.
//!
//! `Name == "2AGLJ0835-4514" || (SqrtTS >= 5 && !(Dist > 10))`
//!
//! "and", "or" and "not" may be spelt `&&`, `||` and `!` or as words. "and"
//! binds tighter than "or". A bare word on the right of a comparison is text.

use std::{iter::Peekable, str::CharIndices};

use super::{CompareOp, Selection, SelectionValue};
use crate::srclist::SelectionParseError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Text(String),
    Number(f64),
    Op(CompareOp),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "'{s}'"),
            Token::Text(s) => write!(f, "\"{s}\""),
            Token::Number(n) => write!(f, "{n}"),
            Token::Op(op) => write!(f, "'{op}'"),
            Token::And => write!(f, "'&&'"),
            Token::Or => write!(f, "'||'"),
            Token::Not => write!(f, "'!'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

pub(super) fn parse_selection(s: &str) -> Result<Selection, SelectionParseError> {
    let tokens = tokenise(s)?;
    if tokens.is_empty() {
        return Err(SelectionParseError::Empty);
    }
    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
    };
    let selection = parser.or()?;
    match parser.tokens.next() {
        None => Ok(selection),
        Some(t) => Err(SelectionParseError::UnexpectedToken {
            expected: "'&&', '||' or the end",
            found: t.to_string(),
        }),
    }
}

fn tokenise(s: &str) -> Result<Vec<Token>, SelectionParseError> {
    let mut tokens = vec![];
    let mut chars = s.char_indices().peekable();
    while let Some(&(pos, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '"' | '\'' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some((_, q)) if q == c => break,
                        Some((_, ch)) => text.push(ch),
                        None => return Err(SelectionParseError::UnterminatedString(pos)),
                    }
                }
                tokens.push(Token::Text(text));
            }
            '=' | '!' | '<' | '>' | '&' | '|' => {
                chars.next();
                let next = chars.peek().map(|&(_, n)| n);
                let (token, pair) = match (c, next) {
                    ('=', Some('=')) => (Token::Op(CompareOp::Eq), true),
                    ('!', Some('=')) => (Token::Op(CompareOp::Ne), true),
                    ('<', Some('=')) => (Token::Op(CompareOp::Le), true),
                    ('>', Some('=')) => (Token::Op(CompareOp::Ge), true),
                    ('&', Some('&')) => (Token::And, true),
                    ('|', Some('|')) => (Token::Or, true),
                    ('<', _) => (Token::Op(CompareOp::Lt), false),
                    ('>', _) => (Token::Op(CompareOp::Gt), false),
                    ('!', _) => (Token::Not, false),
                    _ => return Err(SelectionParseError::UnexpectedChar { pos, ch: c }),
                };
                if pair {
                    chars.next();
                }
                tokens.push(token);
            }
            c if c.is_ascii_digit() || matches!(c, '.' | '-' | '+') => {
                tokens.push(number(&mut chars)?);
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if ch.is_alphanumeric() || ch == '_' {
                        word.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    _ => Token::Ident(word),
                });
            }
            _ => return Err(SelectionParseError::UnexpectedChar { pos, ch: c }),
        }
    }
    Ok(tokens)
}

fn number(chars: &mut Peekable<CharIndices>) -> Result<Token, SelectionParseError> {
    let mut s = String::new();
    while let Some(&(_, ch)) = chars.peek() {
        let after_exponent = matches!(s.chars().last(), Some('e' | 'E'));
        let accept = ch.is_ascii_digit()
            || matches!(ch, '.' | 'e' | 'E')
            || (matches!(ch, '-' | '+') && (s.is_empty() || after_exponent));
        if !accept {
            break;
        }
        s.push(ch);
        chars.next();
    }
    s.parse()
        .map(Token::Number)
        .map_err(|_| SelectionParseError::InvalidNumber(s))
}

struct Parser {
    tokens: Peekable<std::vec::IntoIter<Token>>,
}

impl Parser {
    fn or(&mut self) -> Result<Selection, SelectionParseError> {
        let mut children = vec![self.and()?];
        while self.tokens.next_if_eq(&Token::Or).is_some() {
            children.push(self.and()?);
        }
        Ok(if children.len() == 1 {
            children.remove(0)
        } else {
            Selection::Or(children)
        })
    }

    fn and(&mut self) -> Result<Selection, SelectionParseError> {
        let mut children = vec![self.unary()?];
        while self.tokens.next_if_eq(&Token::And).is_some() {
            children.push(self.unary()?);
        }
        Ok(if children.len() == 1 {
            children.remove(0)
        } else {
            Selection::And(children)
        })
    }

    fn unary(&mut self) -> Result<Selection, SelectionParseError> {
        if self.tokens.next_if_eq(&Token::Not).is_some() {
            return Ok(Selection::Not(Box::new(self.unary()?)));
        }
        if self.tokens.next_if_eq(&Token::LParen).is_some() {
            let inner = self.or()?;
            return match self.tokens.next() {
                Some(Token::RParen) => Ok(inner),
                Some(t) => Err(SelectionParseError::UnexpectedToken {
                    expected: "')'",
                    found: t.to_string(),
                }),
                None => Err(SelectionParseError::UnexpectedEnd("')'")),
            };
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Selection, SelectionParseError> {
        let field = match self.tokens.next() {
            Some(Token::Ident(field)) => field,
            Some(t) => {
                return Err(SelectionParseError::UnexpectedToken {
                    expected: "an attribute name",
                    found: t.to_string(),
                })
            }
            None => return Err(SelectionParseError::UnexpectedEnd("an attribute name")),
        };
        let op = match self.tokens.next() {
            Some(Token::Op(op)) => op,
            Some(t) => {
                return Err(SelectionParseError::UnexpectedToken {
                    expected: "a comparison operator",
                    found: t.to_string(),
                })
            }
            None => return Err(SelectionParseError::UnexpectedEnd("a comparison operator")),
        };
        let value = match self.tokens.next() {
            Some(Token::Number(n)) => SelectionValue::Number(n),
            Some(Token::Text(s) | Token::Ident(s)) => SelectionValue::Text(s),
            Some(t) => {
                return Err(SelectionParseError::UnexpectedToken {
                    expected: "a value",
                    found: t.to_string(),
                })
            }
            None => return Err(SelectionParseError::UnexpectedEnd("a value")),
        };
        Ok(Selection::Compare { field, op, value })
    }
}
