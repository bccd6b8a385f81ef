//! Recursive-descent compilation engine.
//!
//! Every grammar production is a method taking `&mut self`; `Engine::rule`
//! used as a value has function-pointer type `fn(&mut Engine) -> Result<Node>`,
//! which is exactly the `Rule` type the three structural combinators below
//! operate on — no trait objects or boxed closures needed since no rule
//! captures anything beyond the engine itself.
//!
//! Backtracking never relies on catching an exception: every primitive
//! failure is a `SyntaxError` tagged with the token position it was raised
//! at. `optional`/`alternation` snapshot the cursor before attempting a
//! rule and compare it to the failure's position — equal means the rule
//! failed without consuming a token and may be backtracked past; anything
//! else means the rule had already committed, so the failure is
//! propagated as fatal.

use crate::debug::log_parser;
use crate::error::{CompileError, Result};
use crate::jack::token::{Token, TokenKind};
use crate::jack::tree::Node;

type Rule = fn(&mut Engine) -> Result<Node>;

pub struct Engine {
    tokens: Vec<Token>,
    pos: usize,
}

impl Engine {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a full `class` and ensures no trailing tokens remain.
    pub fn parse(mut self) -> Result<Node> {
        let class = self.compile_class()?;
        if self.pos != self.tokens.len() {
            return Err(CompileError::fatal(
                self.pos,
                format!("unexpected trailing token '{}'", self.tokens[self.pos].lexeme),
            ));
        }
        Ok(class)
    }

    // --- cursor primitives ---

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Result<Token> {
        let token = self
            .peek()
            .cloned()
            .ok_or_else(|| CompileError::recoverable(self.pos, "unexpected end of input"))?;
        self.pos += 1;
        Ok(token)
    }

    fn is_keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Keyword && t.lexeme == kw)
    }

    fn is_symbol(&self, sym: &str) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Symbol && t.lexeme == sym)
    }

    fn is_identifier(&self) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Identifier)
    }

    fn is_one_of_keywords(&self, kws: &[&str]) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Keyword && kws.contains(&t.lexeme.as_str()))
    }

    fn expect_keyword(&mut self, kw: &str) -> Result<Node> {
        if self.is_keyword(kw) {
            Ok(Node::Terminal(self.advance()?))
        } else {
            Err(CompileError::recoverable(
                self.pos,
                format!("expected keyword '{kw}'"),
            ))
        }
    }

    fn expect_symbol(&mut self, sym: &str) -> Result<Node> {
        if self.is_symbol(sym) {
            Ok(Node::Terminal(self.advance()?))
        } else {
            Err(CompileError::recoverable(
                self.pos,
                format!("expected symbol '{sym}'"),
            ))
        }
    }

    fn expect_identifier(&mut self) -> Result<Node> {
        if self.is_identifier() {
            Ok(Node::Terminal(self.advance()?))
        } else {
            Err(CompileError::recoverable(self.pos, "expected an identifier"))
        }
    }

    // --- structural combinators ---

    /// Attempts `rule`; on a failure that consumed no tokens, silently
    /// succeeds with `None` and leaves the cursor untouched.
    pub fn optional(&mut self, rule: Rule) -> Result<Option<Node>> {
        let snapshot = self.pos;
        match rule(self) {
            Ok(node) => Ok(Some(node)),
            Err(err) if err.position() == Some(snapshot) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Applies `optional(rule)` repeatedly until it stops matching.
    pub fn zero_or_more(&mut self, rule: Rule) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        while let Some(node) = self.optional(rule)? {
            nodes.push(node);
        }
        Ok(nodes)
    }

    /// Tries each rule in order; the first whose first token matches wins.
    /// A rule that fails after consuming tokens aborts the whole attempt
    /// (fatal), rather than falling through to the next alternative.
    pub fn alternation(&mut self, rules: &[Rule]) -> Result<Node> {
        let snapshot = self.pos;
        for rule in rules {
            match rule(self) {
                Ok(node) => return Ok(node),
                Err(err) if err.position() == Some(snapshot) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(CompileError::recoverable(
            snapshot,
            "no alternative matched",
        ))
    }

    // --- grammar: class structure ---

    fn compile_class(&mut self) -> Result<Node> {
        log_parser("compile_class");
        let mut children = vec![self.expect_keyword("class")?, self.expect_identifier()?, self.expect_symbol("{")?];
        children.extend(self.zero_or_more(Self::compile_class_var_dec)?);
        children.extend(self.zero_or_more(Self::compile_subroutine_dec)?);
        children.push(self.expect_symbol("}")?);
        Ok(Node::rule("class", children))
    }

    fn compile_class_var_dec(&mut self) -> Result<Node> {
        let mut children = vec![self.alternation(&[
            (|e: &mut Engine| e.expect_keyword("static")) as Rule,
            (|e: &mut Engine| e.expect_keyword("field")) as Rule,
        ])?];
        children.push(self.compile_type()?);
        children.push(self.expect_identifier()?);
        loop {
            match self.optional(|e| e.expect_symbol(","))? {
                Some(comma) => {
                    children.push(comma);
                    children.push(self.expect_identifier()?);
                }
                None => break,
            }
        }
        children.push(self.expect_symbol(";")?);
        Ok(Node::rule("classVarDec", children))
    }

    fn compile_type(&mut self) -> Result<Node> {
        if self.is_one_of_keywords(&["int", "char", "boolean"]) {
            Ok(Node::Terminal(self.advance()?))
        } else if self.is_identifier() {
            self.expect_identifier()
        } else {
            Err(CompileError::recoverable(self.pos, "expected a type"))
        }
    }

    fn compile_subroutine_dec(&mut self) -> Result<Node> {
        let mut children = vec![self.alternation(&[
            (|e: &mut Engine| e.expect_keyword("constructor")) as Rule,
            (|e: &mut Engine| e.expect_keyword("function")) as Rule,
            (|e: &mut Engine| e.expect_keyword("method")) as Rule,
        ])?];
        children.push(self.alternation(&[
            (|e: &mut Engine| e.expect_keyword("void")) as Rule,
            Self::compile_type,
        ])?);
        children.push(self.expect_identifier()?);
        children.push(self.expect_symbol("(")?);
        children.push(self.compile_parameter_list()?);
        children.push(self.expect_symbol(")")?);
        children.push(self.compile_subroutine_body()?);
        Ok(Node::rule("subroutineDec", children))
    }

    fn compile_parameter_list(&mut self) -> Result<Node> {
        let mut children = Vec::new();
        if let Some(ty) = self.optional(Self::compile_type)? {
            children.push(ty);
            children.push(self.expect_identifier()?);
            loop {
                match self.optional(|e| e.expect_symbol(","))? {
                    Some(comma) => {
                        children.push(comma);
                        children.push(self.compile_type()?);
                        children.push(self.expect_identifier()?);
                    }
                    None => break,
                }
            }
        }
        Ok(Node::rule("parameterList", children))
    }

    fn compile_subroutine_body(&mut self) -> Result<Node> {
        let mut children = vec![self.expect_symbol("{")?];
        children.extend(self.zero_or_more(Self::compile_var_dec)?);
        children.push(self.compile_statements()?);
        children.push(self.expect_symbol("}")?);
        Ok(Node::rule("subroutineBody", children))
    }

    fn compile_var_dec(&mut self) -> Result<Node> {
        let mut children = vec![self.expect_keyword("var")?, self.compile_type()?, self.expect_identifier()?];
        loop {
            match self.optional(|e| e.expect_symbol(","))? {
                Some(comma) => {
                    children.push(comma);
                    children.push(self.expect_identifier()?);
                }
                None => break,
            }
        }
        children.push(self.expect_symbol(";")?);
        Ok(Node::rule("varDec", children))
    }

    // --- grammar: statements ---

    fn compile_statements(&mut self) -> Result<Node> {
        let children = self.zero_or_more(Self::compile_statement)?;
        Ok(Node::rule("statements", children))
    }

    fn compile_statement(&mut self) -> Result<Node> {
        self.alternation(&[
            Self::compile_let,
            Self::compile_if,
            Self::compile_while,
            Self::compile_do,
            Self::compile_return,
        ])
    }

    fn compile_let(&mut self) -> Result<Node> {
        let mut children = vec![self.expect_keyword("let")?, self.expect_identifier()?];
        if let Some(lbracket) = self.optional(|e| e.expect_symbol("["))? {
            children.push(lbracket);
            children.push(self.compile_expression()?);
            children.push(self.expect_symbol("]")?);
        }
        children.push(self.expect_symbol("=")?);
        children.push(self.compile_expression()?);
        children.push(self.expect_symbol(";")?);
        Ok(Node::rule("letStatement", children))
    }

    fn compile_if(&mut self) -> Result<Node> {
        let mut children = vec![
            self.expect_keyword("if")?,
            self.expect_symbol("(")?,
            self.compile_expression()?,
            self.expect_symbol(")")?,
            self.expect_symbol("{")?,
            self.compile_statements()?,
            self.expect_symbol("}")?,
        ];
        if let Some(else_kw) = self.optional(|e| e.expect_keyword("else"))? {
            children.push(else_kw);
            children.push(self.expect_symbol("{")?);
            children.push(self.compile_statements()?);
            children.push(self.expect_symbol("}")?);
        }
        Ok(Node::rule("ifStatement", children))
    }

    fn compile_while(&mut self) -> Result<Node> {
        let children = vec![
            self.expect_keyword("while")?,
            self.expect_symbol("(")?,
            self.compile_expression()?,
            self.expect_symbol(")")?,
            self.expect_symbol("{")?,
            self.compile_statements()?,
            self.expect_symbol("}")?,
        ];
        Ok(Node::rule("whileStatement", children))
    }

    fn compile_do(&mut self) -> Result<Node> {
        let mut children = vec![self.expect_keyword("do")?];
        children.extend(self.compile_subroutine_call()?);
        children.push(self.expect_symbol(";")?);
        Ok(Node::rule("doStatement", children))
    }

    fn compile_return(&mut self) -> Result<Node> {
        let mut children = vec![self.expect_keyword("return")?];
        if let Some(expr) = self.optional(Self::compile_expression)? {
            children.push(expr);
        }
        children.push(self.expect_symbol(";")?);
        Ok(Node::rule("returnStatement", children))
    }

    // --- grammar: expressions ---

    fn compile_expression(&mut self) -> Result<Node> {
        let mut children = vec![self.compile_term()?];
        loop {
            match self.optional(Self::compile_op)? {
                Some(op) => {
                    children.push(op);
                    children.push(self.compile_term()?);
                }
                None => break,
            }
        }
        Ok(Node::rule("expression", children))
    }

    fn compile_op(&mut self) -> Result<Node> {
        const OPS: &[&str] = &["+", "-", "*", "/", "&", "|", "<", ">", "="];
        for op in OPS {
            if self.is_symbol(op) {
                return Ok(Node::Terminal(self.advance()?));
            }
        }
        Err(CompileError::recoverable(self.pos, "expected an operator"))
    }

    /// The one place this grammar needs lookahead past the current token:
    /// an identifier is a bare variable reference unless the *next* token
    /// is `[` (array access) or `(`/`.` (subroutine call).
    fn compile_term(&mut self) -> Result<Node> {
        if self.is_one_of_keywords(&["true", "false", "null", "this"]) {
            return Ok(Node::rule("term", vec![Node::Terminal(self.advance()?)]));
        }
        if matches!(self.peek(), Some(t) if t.kind == TokenKind::IntConst) {
            return Ok(Node::rule("term", vec![Node::Terminal(self.advance()?)]));
        }
        if matches!(self.peek(), Some(t) if t.kind == TokenKind::StringConst) {
            return Ok(Node::rule("term", vec![Node::Terminal(self.advance()?)]));
        }
        if self.is_symbol("(") {
            let open = self.advance()?;
            let expr = self.compile_expression()?;
            let close = self.expect_symbol(")")?;
            return Ok(Node::rule("term", vec![Node::Terminal(open), expr, close]));
        }
        if self.is_symbol("-") || self.is_symbol("~") {
            let op = Node::Terminal(self.advance()?);
            let term = self.compile_term()?;
            return Ok(Node::rule("term", vec![op, term]));
        }
        if self.is_identifier() {
            let next_is_bracket = matches!(self.tokens.get(self.pos + 1), Some(t) if t.kind == TokenKind::Symbol && t.lexeme == "[");
            let next_is_call = matches!(self.tokens.get(self.pos + 1), Some(t) if t.kind == TokenKind::Symbol && (t.lexeme == "(" || t.lexeme == "."));
            if next_is_bracket {
                let name = self.expect_identifier()?;
                let lbracket = self.expect_symbol("[")?;
                let expr = self.compile_expression()?;
                let rbracket = self.expect_symbol("]")?;
                return Ok(Node::rule("term", vec![name, lbracket, expr, rbracket]));
            }
            if next_is_call {
                let children = self.compile_subroutine_call()?;
                return Ok(Node::rule("term", children));
            }
            return Ok(Node::rule("term", vec![self.expect_identifier()?]));
        }
        Err(CompileError::recoverable(self.pos, "expected a term"))
    }

    fn compile_subroutine_call(&mut self) -> Result<Vec<Node>> {
        let mut children = vec![self.expect_identifier()?];
        if let Some(dot) = self.optional(|e| e.expect_symbol("."))? {
            children.push(dot);
            children.push(self.expect_identifier()?);
        }
        children.push(self.expect_symbol("(")?);
        children.push(self.compile_expression_list()?);
        children.push(self.expect_symbol(")")?);
        Ok(children)
    }

    fn compile_expression_list(&mut self) -> Result<Node> {
        let mut children = Vec::new();
        if let Some(expr) = self.optional(Self::compile_expression)? {
            children.push(expr);
            loop {
                match self.optional(|e| e.expect_symbol(","))? {
                    Some(comma) => {
                        children.push(comma);
                        children.push(self.compile_expression()?);
                    }
                    None => break,
                }
            }
        }
        Ok(Node::rule("expressionList", children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jack::tokenizer::tokenize;

    fn parse(source: &str) -> Result<Node> {
        Engine::new(tokenize(source)?).parse()
    }

    #[test]
    fn parses_minimal_class() {
        let tree = parse("class Main { function void main() { return; } }").unwrap();
        assert_eq!(tree.label(), "class");
        assert_eq!(tree.children().len(), 4);
    }

    #[test]
    fn empty_parameter_list_parses() {
        let tree = parse("class Main { function void main() { return; } }").unwrap();
        let subroutine = &tree.children()[3];
        let params = &subroutine.children()[4];
        assert_eq!(params.label(), "parameterList");
        assert!(params.children().is_empty());
    }

    #[test]
    fn return_with_no_expression_parses() {
        let tree = parse("class Main { function void main() { return; } }").unwrap();
        let body = &tree.children()[3].children()[6];
        let statements = &body.children()[1];
        let ret = &statements.children()[0];
        assert_eq!(ret.children().len(), 2);
    }

    #[test]
    fn nested_if_else_if_is_left_associative() {
        let source = "class Main { function void main() { if (true) { } else { if (false) { } } } }";
        assert!(parse(source).is_ok());
    }

    #[test]
    fn array_access_is_distinguished_by_one_token_lookahead() {
        let source = "class Main { function void main() { let a[1] = 2; } }";
        assert!(parse(source).is_ok());
    }

    #[test]
    fn unexpected_token_is_a_fatal_error() {
        assert!(parse("class 5 { }").is_err());
    }
}
