//! # Jack Syntax Analyser
//!
//! Tokenizes Jack source ([`tokenizer`]) and parses the token stream into a
//! parse tree ([`engine`], [`tree`]), which [`xml`] renders to the
//! reference's indented XML form.

pub mod engine;
pub mod token;
pub mod tokenizer;
pub mod tree;
pub mod xml;

use crate::error::Result;
use tree::Node;

/// Tokenizes and parses `source`, returning its parse tree.
pub fn analyse(source: &str) -> Result<Node> {
    let tokens = tokenizer::tokenize(source)?;
    engine::Engine::new(tokens).parse()
}
