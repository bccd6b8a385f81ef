//! Jack lexer.
//!
//! Built on `logos` rather than the reference implementation's
//! whitespace/bracket-delimited heuristic: a single maximal-munch regex
//! scans the full run of identifier characters, and the result is
//! classified as a keyword only when it exactly matches one of the 21
//! keyword strings, otherwise as an identifier. This means a run like
//! `game.dispose` or `arr[i]` never needs special-casing for the trailing
//! `.`/`[` — the identifier regex simply never crosses a non-identifier
//! character to begin with.
//!
//! Comments are skipped before tokens are even considered: `//` to end of
//! line, and `/* ... */` spanning any number of physical lines.

use logos::Logos;

use crate::debug::log_lexer;
use crate::error::{CompileError, Result};
use crate::jack::token::{Token, TokenKind, KEYWORDS};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Word(String),

    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    #[regex(r#""[^"\n]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    Str(String),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Equals,
    #[token("~")]
    Tilde,
}

impl RawToken {
    fn symbol_char(&self) -> Option<char> {
        Some(match self {
            Self::LBrace => '{',
            Self::RBrace => '}',
            Self::LParen => '(',
            Self::RParen => ')',
            Self::LBracket => '[',
            Self::RBracket => ']',
            Self::Dot => '.',
            Self::Comma => ',',
            Self::Semi => ';',
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Star => '*',
            Self::Slash => '/',
            Self::Amp => '&',
            Self::Pipe => '|',
            Self::Lt => '<',
            Self::Gt => '>',
            Self::Equals => '=',
            Self::Tilde => '~',
            _ => return None,
        })
    }
}

/// Byte offsets of every line start in `source`, used to map a token span
/// back to a 1-based line number for diagnostics.
fn line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (idx, ch) in source.char_indices() {
        if ch == '\n' {
            starts.push(idx + 1);
        }
    }
    starts
}

fn line_for(line_starts: &[usize], offset: usize) -> usize {
    match line_starts.binary_search(&offset) {
        Ok(idx) => idx + 1,
        Err(idx) => idx,
    }
}

/// Tokenizes `source`, returning an ordered token stream.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let starts = line_starts(source);
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let line = line_for(&starts, span.start);
        let raw = result.map_err(|_| {
            CompileError::lex(line, format!("unrecognised character(s) '{}'", lexer.slice()))
        })?;

        let token = match raw {
            RawToken::Word(word) => {
                if KEYWORDS.contains(&word.as_str()) {
                    Token::new(TokenKind::Keyword, word, line)
                } else {
                    Token::new(TokenKind::Identifier, word, line)
                }
            }
            RawToken::Number(number) => Token::new(TokenKind::IntConst, number, line),
            RawToken::Str(contents) => Token::new(TokenKind::StringConst, contents, line),
            other => {
                let ch = other
                    .symbol_char()
                    .expect("every non-Word/Number/Str variant is a symbol");
                Token::new(TokenKind::Symbol, ch.to_string(), line)
            }
        };
        tokens.push(token);
    }

    log_lexer(&format!("produced {} tokens", tokens.len()));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_member_access_without_special_casing() {
        let tokens = tokenize("game.dispose();").unwrap();
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["game", ".", "dispose", "(", ")", ";"]);
    }

    #[test]
    fn keyword_lookalike_prefix_is_still_an_identifier() {
        let tokens = tokenize("classroom").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn exact_keyword_is_classified_as_keyword() {
        let tokens = tokenize("class").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
    }

    #[test]
    fn block_comment_spans_multiple_lines() {
        let tokens = tokenize("/* a\nb\nc */ let x = 1;").unwrap();
        assert_eq!(tokens[0].lexeme, "let");
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn string_constant_excludes_quotes() {
        let tokens = tokenize("\"hello\"").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringConst);
        assert_eq!(tokens[0].lexeme, "hello");
    }
}
