//! Top-level orchestration: reads one `.vm` file or every `.vm` file in a
//! directory, emits a shared bootstrap preamble for multi-file runs, and
//! concatenates per-file output in directory-listing order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::debug::{log_codegen, log_compiler, PerfTimer};
use crate::error::{CompileError, Result};
use crate::vm::codegen::{self, common::CodeGenContext};
use crate::vm::parser;

/// Drives a VM-to-assembly translation run.
pub struct Translator {
    /// Whether to prepend `SP = 256; call Sys.init 0`. Suppressed by
    /// `--nobootstrap`, matching single-file Nand2Tetris project 7 tests
    /// that have no `Sys.init` to call.
    pub bootstrap: bool,
    /// Whether to interleave `// <source line>` comments in the output.
    pub annotate: bool,
}

impl Translator {
    pub fn new() -> Self {
        Self {
            bootstrap: true,
            annotate: false,
        }
    }

    fn unit_name(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn is_vm_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "vm")
    }

    fn collect_vm_files(input: &Path) -> Result<Vec<PathBuf>> {
        if input.is_dir() {
            let mut files: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| Self::is_vm_file(p))
                .collect();
            files.sort();
            if files.is_empty() {
                return Err(CompileError::NoSourceFiles {
                    extension: ".vm",
                    path: input.display().to_string(),
                });
            }
            Ok(files)
        } else {
            Ok(vec![input.to_path_buf()])
        }
    }

    /// Translates `input` (a file or directory) and returns the full Hack
    /// assembly text.
    pub fn translate(&self, input: &Path) -> Result<String> {
        let timer = PerfTimer::new("vm translate");
        let files = Self::collect_vm_files(input)?;
        log_compiler(&format!("translating {} file(s) from {input:?}", files.len()));

        let mut ctx = CodeGenContext::new();
        ctx.annotate = self.annotate;
        let mut output: Vec<String> = Vec::new();

        if self.bootstrap {
            ctx.set_unit(&Self::unit_name(&files[0]));
            output.extend(codegen::function::generate_bootstrap(&mut ctx));
        }

        for file in &files {
            let unit = Self::unit_name(file);
            ctx.set_unit(&unit);
            log_compiler(&format!("translating unit {unit}"));
            let source = fs::read_to_string(file)?;
            let commands = parser::parse(&source)?;
            for (command, line) in &commands {
                if ctx.annotate {
                    output.push(format!("// {command:?}"));
                }
                log_codegen(&format!("line {line}: {command:?}"));
                output.extend(codegen::generate(&mut ctx, command));
            }
        }

        timer.finish();
        let mut text = output.join("\n");
        text.push('\n');
        Ok(text)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("n2t-test-{}-{name}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn single_file_without_bootstrap_has_no_sys_init_call() {
        let path = write_temp("single.vm", "push constant 7\npush constant 8\nadd\n");
        let mut translator = Translator::new();
        translator.bootstrap = false;
        let asm = translator.translate(&path).unwrap();
        assert!(!asm.contains("Sys.init"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn bootstrap_sets_sp_and_calls_sys_init() {
        let path = write_temp("single2.vm", "push constant 1\n");
        let translator = Translator::new();
        let asm = translator.translate(&path).unwrap();
        assert!(asm.starts_with("@256"));
        assert!(asm.contains("@Sys.init"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn function_call_round_trip_emits_matching_return_label() {
        let source = "\
            function Main.main 0\n\
            push constant 5\n\
            call Main.double 1\n\
            return\n\
            function Main.double 0\n\
            push argument 0\n\
            push argument 0\n\
            add\n\
            return\n";
        let path = write_temp("callreturn.vm", source);
        let translator = Translator::new();
        let asm = translator.translate(&path).unwrap();
        assert!(asm.contains("(Main.main$ret.1)"));
        assert!(asm.contains("@Main.main$ret.1"));
        assert!(asm.contains("(Main.main)"));
        assert!(asm.contains("(Main.double)"));
        fs::remove_file(path).ok();
    }

    fn write_temp_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("n2t-test-dir-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for (file_name, contents) in files {
            let mut path = dir.clone();
            path.push(file_name);
            let mut file = fs::File::create(&path).unwrap();
            file.write_all(contents.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn static_segment_symbols_are_isolated_per_unit() {
        let dir = write_temp_dir(
            "statics",
            &[
                ("UnitA.vm", "push constant 1\npop static 0\n"),
                ("UnitB.vm", "push constant 2\npop static 0\n"),
            ],
        );
        let mut translator = Translator::new();
        translator.bootstrap = false;
        let asm = translator.translate(&dir).unwrap();
        assert!(asm.contains("@UnitA.0"));
        assert!(asm.contains("@UnitB.0"));
        fs::remove_dir_all(&dir).ok();
    }
}
