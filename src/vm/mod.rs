//! # VM Translator
//!
//! Lowers a stack-based intermediate language (`.vm`) into Hack assembly.
//! See [`command`] for the command vocabulary, [`parser`] for line
//! classification, [`codegen`] for per-command emission, and [`translator`]
//! for the file/directory-level orchestration including the bootstrap
//! preamble and multi-file static-segment naming.

pub mod codegen;
pub mod command;
pub mod parser;
pub mod translator;

pub use translator::Translator;
