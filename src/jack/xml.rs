//! Mechanical XML serialization of a [`Node`] tree, structurally isomorphic
//! to the `ElementTree`/`minidom` pretty-printed output produced by the
//! reference analyser: two-space indentation, one element per line, and
//! terminal elements carry the escaped lexeme as text content.

use crate::jack::tree::Node;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_node(node: &Node, indent: usize, out: &mut String) {
    let pad = "  ".repeat(indent);
    match node {
        Node::Terminal(token) => {
            out.push_str(&format!(
                "{pad}<{kind}> {lexeme} </{kind}>\n",
                kind = token.kind,
                lexeme = escape(&token.lexeme),
            ));
        }
        Node::Rule { label, children } => {
            out.push_str(&format!("{pad}<{label}>\n"));
            for child in children {
                write_node(child, indent + 1, out);
            }
            out.push_str(&format!("{pad}</{label}>\n"));
        }
    }
}

/// Renders `root` as indented XML.
pub fn render(root: &Node) -> String {
    let mut out = String::new();
    write_node(root, 0, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jack::engine::Engine;
    use crate::jack::tokenizer::tokenize;

    #[test]
    fn renders_matched_opening_and_closing_tags() {
        let tree = Engine::new(tokenize("class Main { }").unwrap())
            .parse()
            .unwrap();
        let xml = render(&tree);
        assert!(xml.starts_with("<class>\n"));
        assert!(xml.trim_end().ends_with("</class>"));
    }

    #[test]
    fn terminal_keeps_surrounding_spaces_around_lexeme() {
        let tree = Engine::new(tokenize("class Main { }").unwrap())
            .parse()
            .unwrap();
        let xml = render(&tree);
        assert!(xml.contains("<keyword> class </keyword>"));
    }
}
