//! The parse tree produced by [`super::engine::Engine`].

use crate::jack::token::Token;

/// One node of the parse tree: either a consumed terminal token, or an
/// interior node labelled with a Jack grammar non-terminal and holding its
/// children in source order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub enum Node {
    Terminal(Token),
    Rule { label: &'static str, children: Vec<Node> },
}

impl Node {
    pub fn rule(label: &'static str, children: Vec<Node>) -> Self {
        Self::Rule { label, children }
    }

    /// The grammar-rule label of an interior node, or the token's display
    /// name (`"keyword"`, `"symbol"`, ...) for a terminal.
    pub fn label(&self) -> String {
        match self {
            Self::Terminal(token) => token.kind.to_string(),
            Self::Rule { label, .. } => label.to_string(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Self::Terminal(_) => &[],
            Self::Rule { children, .. } => children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jack::token::TokenKind;

    #[test]
    fn terminal_label_is_its_token_kind() {
        let node = Node::Terminal(Token::new(TokenKind::Keyword, "class", 1));
        assert_eq!(node.label(), "keyword");
    }

    #[test]
    fn rule_node_exposes_its_children() {
        let node = Node::rule("classVarDec", vec![Node::Terminal(Token::new(TokenKind::Keyword, "static", 1))]);
        assert_eq!(node.children().len(), 1);
    }
}
