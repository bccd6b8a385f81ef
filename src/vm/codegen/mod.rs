//! Per-command code generation, dispatched from [`super::translator`].

pub mod arithmetic;
pub mod branch;
pub mod common;
pub mod function;
pub mod memory;

use crate::vm::command::Command;
use common::CodeGenContext;

/// Generates the Hack assembly for a single VM command, threading `ctx`
/// through so label minting and the current static-segment unit stay
/// consistent across an entire translation run.
pub fn generate(ctx: &mut CodeGenContext, command: &Command) -> Vec<String> {
    match command {
        Command::Arithmetic(op) => arithmetic::generate(ctx, *op),
        Command::Push(segment, index) => memory::generate_push(ctx, *segment, *index),
        Command::Pop(segment, index) => memory::generate_pop(ctx, *segment, *index),
        Command::Label(name) => branch::generate_label(name),
        Command::Goto(name) => branch::generate_goto(name),
        Command::IfGoto(name) => branch::generate_if_goto(name),
        Command::Function(name, n_locals) => function::generate_function(name, *n_locals),
        Command::Call(name, n_args) => function::generate_call(ctx, name, *n_args),
        Command::Return => function::generate_return(),
    }
}
