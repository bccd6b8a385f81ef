//! Emission of `function`/`call`/`return` and the bootstrap preamble —
//! together, the VM's calling convention: a five-word frame (return
//! address, LCL, ARG, THIS, THAT) pushed by `call` and unwound by `return`.

use crate::vm::codegen::common::CodeGenContext;
use crate::vm::codegen::memory;
use crate::vm::command::Segment;

/// Generates `function name nLocals`: the entry label followed by `nLocals`
/// pushes of constant 0 to zero-initialise the callee's local segment.
pub fn generate_function(name: &str, n_locals: u16) -> Vec<String> {
    let mut asm = vec![format!("({name})")];
    let push_zero = memory::generate_push(&CodeGenContext::new(), Segment::Constant, 0);
    for _ in 0..n_locals {
        asm.extend(push_zero.clone());
    }
    asm
}

/// Generates `call name nArgs`.
pub fn generate_call(ctx: &mut CodeGenContext, name: &str, n_args: u16) -> Vec<String> {
    let id = ctx.next_label_id();
    let return_label = format!("{name}$ret.{id}");
    let mut asm = Vec::new();

    asm.push(format!("@{return_label}"));
    asm.push("D=A".to_string());
    asm.push("@SP".to_string());
    asm.push("A=M".to_string());
    asm.push("M=D".to_string());
    asm.push("@SP".to_string());
    asm.push("M=M+1".to_string());

    for segment in ["LCL", "ARG", "THIS", "THAT"] {
        asm.push(format!("@{segment}"));
        asm.push("D=M".to_string());
        asm.push("@SP".to_string());
        asm.push("A=M".to_string());
        asm.push("M=D".to_string());
        asm.push("@SP".to_string());
        asm.push("M=M+1".to_string());
    }

    asm.push("@SP".to_string());
    asm.push("D=M".to_string());
    asm.push("@5".to_string());
    asm.push("D=D-A".to_string());
    asm.push(format!("@{n_args}"));
    asm.push("D=D-A".to_string());
    asm.push("@ARG".to_string());
    asm.push("M=D".to_string());

    asm.push("@SP".to_string());
    asm.push("D=M".to_string());
    asm.push("@LCL".to_string());
    asm.push("M=D".to_string());

    asm.push(format!("@{name}"));
    asm.push("0;JMP".to_string());
    asm.push(format!("({return_label})"));

    asm
}

/// Generates `return`.
pub fn generate_return() -> Vec<String> {
    let mut asm = Vec::new();

    // endFrame (R13) = LCL
    asm.push("@LCL".to_string());
    asm.push("D=M".to_string());
    asm.push("@R13".to_string());
    asm.push("M=D".to_string());

    // retAddr (R14) = *(endFrame - 5)
    asm.push("@R13".to_string());
    asm.push("D=M".to_string());
    asm.push("@5".to_string());
    asm.push("A=D-A".to_string());
    asm.push("D=M".to_string());
    asm.push("@R14".to_string());
    asm.push("M=D".to_string());

    // *ARG = pop()
    asm.push("@SP".to_string());
    asm.push("A=M-1".to_string());
    asm.push("D=M".to_string());
    asm.push("@ARG".to_string());
    asm.push("A=M".to_string());
    asm.push("M=D".to_string());

    // SP = ARG + 1
    asm.push("@ARG".to_string());
    asm.push("D=M+1".to_string());
    asm.push("@SP".to_string());
    asm.push("M=D".to_string());

    // THAT, THIS, ARG, LCL = *(endFrame - 1..4), restored in that order
    for (offset, segment) in [(1, "THAT"), (2, "THIS"), (3, "ARG"), (4, "LCL")] {
        asm.push("@R13".to_string());
        asm.push("D=M".to_string());
        asm.push(format!("@{offset}"));
        asm.push("A=D-A".to_string());
        asm.push("D=M".to_string());
        asm.push(format!("@{segment}"));
        asm.push("M=D".to_string());
    }

    asm.push("@R14".to_string());
    asm.push("A=M".to_string());
    asm.push("0;JMP".to_string());

    asm
}

/// Generates the bootstrap preamble prepended to a multi-file translation:
/// `SP = 256` followed by `call Sys.init 0`.
pub fn generate_bootstrap(ctx: &mut CodeGenContext) -> Vec<String> {
    let mut asm = vec![
        "@256".to_string(),
        "D=A".to_string(),
        "@SP".to_string(),
        "M=D".to_string(),
    ];
    asm.extend(generate_call(ctx, "Sys.init", 0));
    asm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_pushes_zero_per_local() {
        let asm = generate_function("Foo.bar", 2);
        let zero_pushes = asm.iter().filter(|l| l.as_str() == "D=A").count();
        assert_eq!(zero_pushes, 2);
    }

    #[test]
    fn call_return_labels_are_unique_per_site() {
        let mut ctx = CodeGenContext::new();
        let first = generate_call(&mut ctx, "Foo.bar", 0);
        let second = generate_call(&mut ctx, "Foo.bar", 0);
        assert_ne!(first.last(), second.last());
    }

    #[test]
    fn return_restores_segments_in_reverse_push_order() {
        let asm = generate_return();
        let that_idx = asm.iter().position(|l| l == "@THAT").unwrap();
        let lcl_idx = asm.iter().rposition(|l| l == "@LCL").unwrap();
        assert!(that_idx < lcl_idx);
    }
}
