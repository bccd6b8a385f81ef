//! Two-pass symbol resolution for Hack assembly.
//!
//! Pass one assigns every `(Label)` pseudo-instruction the address of the
//! instruction that follows it. Pass two assigns every undeclared `@symbol`
//! the next free RAM address starting at 16. A final substitution pass
//! replaces every symbolic reference and drops the label pseudo-instructions,
//! leaving a flat stream of `@n` / C-instruction lines ready for
//! [`super::encoder`].

use std::collections::HashMap;

use crate::error::Result;

const FIRST_VARIABLE_ADDRESS: u32 = 16;
const LAST_VARIABLE_ADDRESS: u32 = 16383;

fn predefined_symbols() -> HashMap<String, u32> {
    let mut table = HashMap::new();
    for n in 0..16u32 {
        table.insert(format!("R{n}"), n);
    }
    table.insert("SCREEN".to_string(), 16384);
    table.insert("KBD".to_string(), 24576);
    table.insert("SP".to_string(), 0);
    table.insert("LCL".to_string(), 1);
    table.insert("ARG".to_string(), 2);
    table.insert("THIS".to_string(), 3);
    table.insert("THAT".to_string(), 4);
    table
}

/// Strips `//` comments (full-line and trailing) and blank lines.
fn clean(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let without_comment = match line.find("//") {
                Some(idx) => &line[..idx],
                None => line,
            };
            let trimmed = without_comment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

fn is_label(line: &str) -> bool {
    line.starts_with('(') && line.ends_with(')')
}

fn label_name(line: &str) -> &str {
    &line[1..line.len() - 1]
}

/// Resolves all symbols in `source`, returning the flat list of `@n` /
/// C-instruction lines with every `(label)` pseudo-instruction removed.
pub fn resolve(source: &str) -> Result<Vec<String>> {
    let cleaned = clean(source);
    let mut table = predefined_symbols();

    let mut instruction_index = 0u32;
    for line in &cleaned {
        if is_label(line) {
            table.insert(label_name(line).to_string(), instruction_index);
        } else {
            instruction_index += 1;
        }
    }

    let mut next_variable = FIRST_VARIABLE_ADDRESS;
    for line in &cleaned {
        if is_label(line) {
            continue;
        }
        if let Some(symbol) = line.strip_prefix('@') {
            if symbol.parse::<u32>().is_err() && !table.contains_key(symbol) {
                if next_variable > LAST_VARIABLE_ADDRESS {
                    return Err(crate::error::CompileError::encode(format!(
                        "ran out of variable RAM addresses allocating '{symbol}'"
                    )));
                }
                table.insert(symbol.to_string(), next_variable);
                next_variable += 1;
            }
        }
    }

    Ok(cleaned
        .into_iter()
        .filter(|line| !is_label(line))
        .map(|line| match line.strip_prefix('@') {
            Some(symbol) if symbol.parse::<u32>().is_err() => {
                format!("@{}", table[symbol])
            }
            _ => line,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_labels_and_variables() {
        let source = "\
            (LOOP)\n\
            @counter\n\
            D=M\n\
            @LOOP\n\
            D;JGT\n\
        ";
        let resolved = resolve(source).unwrap();
        assert_eq!(resolved, vec!["@16", "D=M", "@0", "D;JGT"]);
    }

    #[test]
    fn predefined_symbols_resolve_without_allocation() {
        let resolved = resolve("@SCREEN\nD=A\n").unwrap();
        assert_eq!(resolved, vec!["@16384", "D=A"]);
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let resolved = resolve("// a comment\n\n@1 // inline\nD=A\n").unwrap();
        assert_eq!(resolved, vec!["@1", "D=A"]);
    }
}
