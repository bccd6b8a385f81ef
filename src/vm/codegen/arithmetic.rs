//! Emission of the nine arithmetic/logical VM operations.
//!
//! Every operation pops its operand(s) from `SP`, computes in place, and
//! for binary operations decrements `SP` by one (two popped, one pushed).
//! The three comparisons (`eq`, `gt`, `lt`) additionally need a unique label
//! pair per call site, drawn from [`CodeGenContext::next_label_id`].

use crate::vm::codegen::common::CodeGenContext;
use crate::vm::command::ArithmeticOp;

/// Generates the Hack assembly for one arithmetic/logical command.
pub fn generate(ctx: &mut CodeGenContext, op: ArithmeticOp) -> Vec<String> {
    let mut asm = vec!["@SP".to_string(), "A=M-1".to_string()];

    match op {
        ArithmeticOp::Not => {
            asm.push("M=!M".to_string());
            return asm;
        }
        ArithmeticOp::Neg => {
            asm.push("M=-M".to_string());
            return asm;
        }
        _ => {}
    }

    asm.push("D=M".to_string());
    asm.push("A=A-1".to_string());

    match op {
        ArithmeticOp::Add => asm.push("M=D+M".to_string()),
        ArithmeticOp::Sub => asm.push("M=M-D".to_string()),
        ArithmeticOp::And => asm.push("M=D&M".to_string()),
        ArithmeticOp::Or => asm.push("M=D|M".to_string()),
        ArithmeticOp::Eq | ArithmeticOp::Gt | ArithmeticOp::Lt => {
            let id = ctx.next_label_id();
            let jump = match op {
                ArithmeticOp::Eq => "JEQ",
                ArithmeticOp::Gt => "JGT",
                ArithmeticOp::Lt => "JLT",
                _ => unreachable!(),
            };
            let true_label = format!("COMPARE_TRUE.{id}");
            let end_label = format!("COMPARE_END.{id}");
            asm.push("D=M-D".to_string());
            asm.push(format!("@{true_label}"));
            asm.push(format!("D;{jump}"));
            asm.push("@SP".to_string());
            asm.push("A=M-1".to_string());
            asm.push("A=A-1".to_string());
            asm.push("M=0".to_string());
            asm.push(format!("@{end_label}"));
            asm.push("0;JMP".to_string());
            asm.push(format!("({true_label})"));
            asm.push("@SP".to_string());
            asm.push("A=M-1".to_string());
            asm.push("A=A-1".to_string());
            asm.push("M=-1".to_string());
            asm.push(format!("({end_label})"));
        }
        ArithmeticOp::Neg | ArithmeticOp::Not => unreachable!("handled above"),
    }

    asm.push("@SP".to_string());
    asm.push("M=M-1".to_string());
    asm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_pops_two_and_decrements_sp_once() {
        let mut ctx = CodeGenContext::new();
        let asm = generate(&mut ctx, ArithmeticOp::Add);
        assert_eq!(asm.last(), Some(&"M=M-1".to_string()));
        assert!(asm.contains(&"M=D+M".to_string()));
    }

    #[test]
    fn neg_does_not_touch_sp() {
        let mut ctx = CodeGenContext::new();
        let asm = generate(&mut ctx, ArithmeticOp::Neg);
        assert!(!asm.iter().any(|line| line == "M=M-1"));
    }

    #[test]
    fn successive_comparisons_mint_distinct_labels() {
        let mut ctx = CodeGenContext::new();
        let first = generate(&mut ctx, ArithmeticOp::Eq);
        let second = generate(&mut ctx, ArithmeticOp::Eq);
        assert_ne!(first, second);
    }
}
