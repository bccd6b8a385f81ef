//! Emission of `push`/`pop` across the eight VM segments.

use crate::vm::codegen::common::CodeGenContext;
use crate::vm::command::Segment;

const TEMP_BASE: u16 = 5;

fn pointer_register(index: u16) -> &'static str {
    if index == 0 { "THIS" } else { "THAT" }
}

/// Loads the effective value of `segment[index]` into `D`, leaving the
/// caller to push it onto the stack.
fn load_into_d(ctx: &CodeGenContext, segment: Segment, index: u16) -> Vec<String> {
    match segment {
        Segment::Constant => vec![format!("@{index}"), "D=A".to_string()],
        Segment::Static => vec![
            format!("@{}.{index}", ctx.current_unit()),
            "D=M".to_string(),
        ],
        Segment::Local | Segment::Argument | Segment::This | Segment::That => {
            let pointer = match segment {
                Segment::Local => "LCL",
                Segment::Argument => "ARG",
                Segment::This => "THIS",
                Segment::That => "THAT",
                _ => unreachable!(),
            };
            vec![
                format!("@{index}"),
                "D=A".to_string(),
                format!("@{pointer}"),
                "A=M".to_string(),
                "A=D+A".to_string(),
                "D=M".to_string(),
            ]
        }
        Segment::Temp => vec![
            format!("@{index}"),
            "D=A".to_string(),
            format!("@{TEMP_BASE}"),
            "A=D+A".to_string(),
            "D=M".to_string(),
        ],
        Segment::Pointer => vec![
            format!("@{}", pointer_register(index)),
            "A=M".to_string(),
            "D=A".to_string(),
        ],
    }
}

/// Generates `push <segment> <index>`.
pub fn generate_push(ctx: &CodeGenContext, segment: Segment, index: u16) -> Vec<String> {
    let mut asm = load_into_d(ctx, segment, index);
    asm.push("@SP".to_string());
    asm.push("A=M".to_string());
    asm.push("M=D".to_string());
    asm.push("@SP".to_string());
    asm.push("M=M+1".to_string());
    asm
}

/// Generates `pop <segment> <index>`. Callers must already have rejected
/// `pop constant` at parse time (see [`crate::vm::parser`]).
pub fn generate_pop(ctx: &CodeGenContext, segment: Segment, index: u16) -> Vec<String> {
    if segment == Segment::Static {
        return vec![
            "@SP".to_string(),
            "A=M-1".to_string(),
            "D=M".to_string(),
            format!("@{}.{index}", ctx.current_unit()),
            "M=D".to_string(),
            "@SP".to_string(),
            "M=M-1".to_string(),
        ];
    }

    let mut asm = match segment {
        Segment::Local | Segment::Argument | Segment::This | Segment::That | Segment::Temp => {
            let mut lines = vec![format!("@{index}"), "D=A".to_string()];
            match segment {
                Segment::Local => lines.extend(["@LCL".to_string(), "A=M".to_string(), "D=D+A".to_string()]),
                Segment::Argument => lines.extend(["@ARG".to_string(), "A=M".to_string(), "D=D+A".to_string()]),
                Segment::This => lines.extend(["@THIS".to_string(), "A=M".to_string(), "D=D+A".to_string()]),
                Segment::That => lines.extend(["@THAT".to_string(), "A=M".to_string(), "D=D+A".to_string()]),
                Segment::Temp => lines.extend([format!("@{TEMP_BASE}"), "D=D+A".to_string()]),
                _ => unreachable!(),
            }
            lines
        }
        // `pop pointer` writes the popped value into RAM[THIS]/RAM[THAT]
        // itself, so the scratch register needs the register's own address
        // (`D=A`), not whatever it currently points at.
        Segment::Pointer => vec![format!("@{}", pointer_register(index)), "D=A".to_string()],
        Segment::Constant | Segment::Static => unreachable!("handled above / rejected at parse time"),
    };

    asm.push("@R13".to_string());
    asm.push("M=D".to_string());
    asm.push("@SP".to_string());
    asm.push("A=M-1".to_string());
    asm.push("D=M".to_string());
    asm.push("@R13".to_string());
    asm.push("A=M".to_string());
    asm.push("M=D".to_string());
    asm.push("@SP".to_string());
    asm.push("M=M-1".to_string());
    asm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_constant_loads_immediate() {
        let ctx = CodeGenContext::new();
        let asm = generate_push(&ctx, Segment::Constant, 42);
        assert_eq!(asm[0], "@42");
        assert_eq!(asm[1], "D=A");
    }

    #[test]
    fn static_symbols_are_prefixed_by_current_unit() {
        let mut ctx = CodeGenContext::new();
        ctx.set_unit("Foo");
        let asm = generate_push(&ctx, Segment::Static, 3);
        assert!(asm.contains(&"@Foo.3".to_string()));
    }

    #[test]
    fn pop_pointer_uses_register_address_not_its_contents() {
        let ctx = CodeGenContext::new();
        let asm = generate_pop(&ctx, Segment::Pointer, 0);
        assert_eq!(asm[0], "@THIS");
        assert_eq!(asm[1], "D=A");
    }

    #[test]
    fn push_pointer_one_targets_that() {
        let ctx = CodeGenContext::new();
        let asm = generate_push(&ctx, Segment::Pointer, 1);
        assert_eq!(asm[0], "@THAT");
    }
}
