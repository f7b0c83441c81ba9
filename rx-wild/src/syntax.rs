/*!
Pattern syntax: tokenizer and parser.

Supported syntax:
- letters `A`..=`Z` and the wildcard `.`
- repetitions `?`, `*`, `+`
- groups `(...)` and alternatives `|`
- character classes `[...]` and `[^...]` (no `-` ranges)
- back-references `\1`, `\2`, ... (multi-digit allowed)

Everything else is a [`CompileError`].
*/

use logos::Logos;
use thiserror::Error;

use crate::symbol::{Symbol, WILDCARD};

/// Why a pattern failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unbalanced `[` at offset {0}")]
    UnbalancedClass(usize),
    #[error("unbalanced `(` at offset {0}")]
    UnclosedGroup(usize),
    #[error("unmatched `)` at offset {0}")]
    UnmatchedGroupClose(usize),
    #[error("repetition with nothing to repeat at offset {0}")]
    DanglingRepeat(usize),
    #[error("`\\0` does not name a group (offset {0})")]
    BadBackref(usize),
    #[error("unknown escape at offset {0}")]
    UnknownEscape(usize),
    #[error("unexpected character {ch:?} at offset {at}")]
    UnexpectedChar { ch: char, at: usize },
}

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    #[token("(")]
    GroupOpen,

    #[token(")")]
    GroupClose,

    #[token("|")]
    Pipe,

    #[token("?")]
    Question,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token(".")]
    Wildcard,

    #[regex(r"[A-Z]", |lex| Symbol::from_ascii(lex.slice().as_bytes()[0]))]
    Letter(Symbol),

    /// A whole bracketed class; `[^...]` is already resolved to the letters
    /// it admits.
    #[regex(r"\[\^?[A-Z]*\]", class_letters)]
    Class(Vec<Symbol>),

    #[regex(r"\\[0-9]+", |lex| lex.slice()[1..].parse::<usize>().ok())]
    Backref(usize),
}

fn class_letters(lex: &mut logos::Lexer<Token>) -> Vec<Symbol> {
    let inner = &lex.slice()[1..lex.slice().len() - 1];
    match inner.strip_prefix('^') {
        Some(excluded) => Symbol::letters()
            .filter(|s| !excluded.contains(s.to_char()))
            .collect(),
        None => inner.bytes().map(Symbol::from_ascii).collect(),
    }
}

/// What a pattern parses to, before it is lowered to a state graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Ast {
    /// Matches the empty text. Also what a bare `` or `()` parses to.
    Empty,
    Literal(Symbol),
    Class(Vec<Symbol>),
    Group(Box<Ast>),
    Backref(usize),
    Concat(Vec<Ast>),
    Alternate(Vec<Ast>),
    Repeat { kind: Repeat, sub: Box<Ast> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Repeat {
    /// `?`
    ZeroOrOne,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
}

pub(crate) fn parse(pattern: &str) -> Result<Ast, CompileError> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(pattern).spanned() {
        match result {
            Ok(token) => tokens.push((token, span.start)),
            Err(()) => {
                let ch = pattern[span.start..].chars().next().unwrap_or('\0');
                return Err(match ch {
                    '[' => CompileError::UnbalancedClass(span.start),
                    '\\' => CompileError::UnknownEscape(span.start),
                    ch => CompileError::UnexpectedChar {
                        ch,
                        at: span.start,
                    },
                });
            }
        }
    }
    Parser { tokens, at: 0 }.parse()
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    at: usize,
}

impl Parser {
    fn parse(mut self) -> Result<Ast, CompileError> {
        let ast = self.alternation()?;
        match self.tokens.get(self.at) {
            None => Ok(ast),
            Some(&(Token::GroupClose, at)) => {
                Err(CompileError::UnmatchedGroupClose(at))
            }
            // `alternation` only ever stops at `)` or the end of input.
            Some(_) => unreachable!(),
        }
    }

    fn alternation(&mut self) -> Result<Ast, CompileError> {
        let mut terms = vec![self.concat()?];
        while matches!(self.tokens.get(self.at), Some((Token::Pipe, _))) {
            self.at += 1;
            terms.push(self.concat()?);
        }
        Ok(if terms.len() == 1 {
            terms.remove(0)
        } else {
            Ast::Alternate(terms)
        })
    }

    fn concat(&mut self) -> Result<Ast, CompileError> {
        let mut seq: Vec<Ast> = Vec::new();
        loop {
            let Some((token, at)) = self.tokens.get(self.at) else {
                break;
            };
            let at = *at;
            match token {
                Token::Pipe | Token::GroupClose => break,
                Token::Question | Token::Star | Token::Plus => {
                    let kind = match token {
                        Token::Question => Repeat::ZeroOrOne,
                        Token::Star => Repeat::ZeroOrMore,
                        _ => Repeat::OneOrMore,
                    };
                    self.at += 1;
                    let sub =
                        seq.pop().ok_or(CompileError::DanglingRepeat(at))?;
                    seq.push(Ast::Repeat {
                        kind,
                        sub: Box::new(sub),
                    });
                }
                Token::GroupOpen => {
                    self.at += 1;
                    let inner = self.alternation()?;
                    match self.tokens.get(self.at) {
                        Some((Token::GroupClose, _)) => self.at += 1,
                        _ => return Err(CompileError::UnclosedGroup(at)),
                    }
                    seq.push(Ast::Group(Box::new(inner)));
                }
                Token::Wildcard => {
                    self.at += 1;
                    seq.push(Ast::Literal(WILDCARD));
                }
                Token::Letter(s) => {
                    let s = *s;
                    self.at += 1;
                    seq.push(Ast::Literal(s));
                }
                Token::Class(letters) => {
                    let letters = letters.clone();
                    self.at += 1;
                    seq.push(Ast::Class(letters));
                }
                Token::Backref(group) => {
                    let group = *group;
                    self.at += 1;
                    if group == 0 {
                        return Err(CompileError::BadBackref(at));
                    }
                    seq.push(Ast::Backref(group));
                }
            }
        }
        Ok(if seq.is_empty() {
            Ast::Empty
        } else if seq.len() == 1 {
            seq.remove(0)
        } else {
            Ast::Concat(seq)
        })
    }
}
