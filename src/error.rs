//! # Compiler Error Definitions
//!
//! This module centralizes the error type shared by all three binaries
//! (`hackasm`, `vmtranslate`, `jackanalyse`). It leans on `thiserror` to keep
//! message formatting declarative and to preserve `#[source]`/`#[from]`
//! chains back to the underlying I/O failure.

use thiserror::Error;

/// The error type produced by every stage of the toolchain.
#[derive(Error, Debug)]
pub enum CompileError {
    /// Wrapper for standard I/O errors (e.g., file reading/writing).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Raised when a CLI was pointed at a directory with no matching source files.
    #[error("no {extension} source files found in {path}")]
    NoSourceFiles { extension: &'static str, path: String },

    /// Lexical error: malformed token (unterminated string, illegal character, ...).
    #[error("lexical error at line {line}: {message}")]
    LexError { line: usize, message: String },

    /// Syntax error raised by a recursive-descent parser.
    ///
    /// `recoverable` distinguishes a failure at the first token of an
    /// attempted alternative (may be backtracked past) from a failure deeper
    /// into a rule, which is fatal.
    #[error("syntax error at token {position}: {message}")]
    SyntaxError {
        position: usize,
        message: String,
        recoverable: bool,
    },

    /// Semantic error in VM source: invalid segment/command combination.
    #[error("semantic error at line {line}: {message}")]
    SemanticError { line: usize, message: String },

    /// Error while resolving or encoding a Hack assembly instruction.
    #[error("encoding error: {message}")]
    EncodeError { message: String },
}

impl CompileError {
    /// Constructs a `LexError` for the VM/Jack tokenizers.
    pub fn lex(line: usize, message: impl Into<String>) -> Self {
        Self::LexError {
            line,
            message: message.into(),
        }
    }

    /// Constructs a recoverable `SyntaxError` raised on the very first token
    /// of an attempted grammar alternative.
    pub fn recoverable(position: usize, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            position,
            message: message.into(),
            recoverable: true,
        }
    }

    /// Constructs a fatal `SyntaxError` raised after a rule has already
    /// committed past its first token.
    pub fn fatal(position: usize, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            position,
            message: message.into(),
            recoverable: false,
        }
    }

    /// True if this error was raised before a grammar rule committed to its
    /// alternative, i.e. an `alternation`/`optional` caller may try the next
    /// option instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SyntaxError {
                recoverable: true,
                ..
            }
        )
    }

    /// The token position a `SyntaxError` was raised at, if any. Combinators
    /// compare this against the position they snapshotted before attempting
    /// a rule to decide whether the rule consumed any tokens before failing.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::SyntaxError { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Constructs a `SemanticError` for the VM translator (e.g. `pop constant`).
    pub fn semantic(line: usize, message: impl Into<String>) -> Self {
        Self::SemanticError {
            line,
            message: message.into(),
        }
    }

    /// Constructs an `EncodeError` for the Hack assembler.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::EncodeError {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the toolchain.
pub type Result<T> = std::result::Result<T, CompileError>;
