//! Classifies cleaned `.vm` source lines into [`Command`]s.
//!
//! Comments and blank lines are stripped first; everything that survives is
//! classified by its leading whitespace-separated token into exactly one
//! `Command` variant, paired with its 1-based source line number for
//! diagnostics.

use crate::debug::log_parser;
use crate::error::{CompileError, Result};
use crate::vm::command::{ArithmeticOp, Command, Segment};

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_index(line: usize, raw: &str) -> Result<u16> {
    raw.parse()
        .map_err(|_| CompileError::semantic(line, format!("'{raw}' is not a valid index")))
}

/// Parses every non-blank, non-comment line of `source` into a `Command`
/// paired with its 1-based line number.
pub fn parse(source: &str) -> Result<Vec<(Command, usize)>> {
    let mut commands = Vec::new();
    for (offset, raw_line) in source.lines().enumerate() {
        let line_number = offset + 1;
        let trimmed = strip_comment(raw_line).trim();
        if trimmed.is_empty() {
            continue;
        }
        log_parser(&format!("line {line_number}: '{trimmed}'"));
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let command = classify(line_number, &fields)?;
        commands.push((command, line_number));
    }
    Ok(commands)
}

fn classify(line: usize, fields: &[&str]) -> Result<Command> {
    let head = fields[0];

    if let Some(op) = ArithmeticOp::parse(head) {
        if fields.len() != 1 {
            return Err(CompileError::semantic(
                line,
                format!("'{head}' takes no arguments"),
            ));
        }
        return Ok(Command::Arithmetic(op));
    }

    match head {
        "push" | "pop" => {
            let [_, segment_name, index_raw] = *fields else {
                return Err(CompileError::semantic(
                    line,
                    format!("'{head}' requires a segment and an index"),
                ));
            };
            let segment = Segment::parse(segment_name).ok_or_else(|| {
                CompileError::semantic(line, format!("unknown segment '{segment_name}'"))
            })?;
            let index = parse_index(line, index_raw)?;
            if head == "pop" && segment == Segment::Constant {
                return Err(CompileError::semantic(
                    line,
                    "cannot pop with the 'constant' segment",
                ));
            }
            Ok(if head == "push" {
                Command::Push(segment, index)
            } else {
                Command::Pop(segment, index)
            })
        }
        "label" => {
            let [_, name] = *fields else {
                return Err(CompileError::semantic(line, "'label' requires a name"));
            };
            Ok(Command::Label(name.to_string()))
        }
        "goto" => {
            let [_, name] = *fields else {
                return Err(CompileError::semantic(line, "'goto' requires a label"));
            };
            Ok(Command::Goto(name.to_string()))
        }
        "if-goto" => {
            let [_, name] = *fields else {
                return Err(CompileError::semantic(line, "'if-goto' requires a label"));
            };
            Ok(Command::IfGoto(name.to_string()))
        }
        "function" => {
            let [_, name, n_locals] = *fields else {
                return Err(CompileError::semantic(
                    line,
                    "'function' requires a name and a local count",
                ));
            };
            Ok(Command::Function(name.to_string(), parse_index(line, n_locals)?))
        }
        "call" => {
            let [_, name, n_args] = *fields else {
                return Err(CompileError::semantic(
                    line,
                    "'call' requires a name and an argument count",
                ));
            };
            Ok(Command::Call(name.to_string(), parse_index(line, n_args)?))
        }
        "return" => {
            if fields.len() != 1 {
                return Err(CompileError::semantic(line, "'return' takes no arguments"));
            }
            Ok(Command::Return)
        }
        other => Err(CompileError::semantic(line, format!("unknown command '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_push_and_arithmetic() {
        let commands = parse("push constant 7\npush constant 8\nadd\n").unwrap();
        assert_eq!(
            commands,
            vec![
                (Command::Push(Segment::Constant, 7), 1),
                (Command::Push(Segment::Constant, 8), 2),
                (Command::Arithmetic(ArithmeticOp::Add), 3),
            ]
        );
    }

    #[test]
    fn strips_comments_and_blank_lines() {
        let commands = parse("// header\n\npush constant 1 // one\n").unwrap();
        assert_eq!(commands, vec![(Command::Push(Segment::Constant, 1), 3)]);
    }

    #[test]
    fn pop_constant_is_rejected() {
        assert!(parse("pop constant 0\n").is_err());
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(parse("frobnicate\n").is_err());
    }
}
