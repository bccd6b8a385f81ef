//! # VM Translator CLI
//!
//! Translates a `.vm` file or a directory of `.vm` files into Hack assembly.

use clap::{Arg, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use n2t::debug::{enable_debug, log_compiler, PerfTimer};
use n2t::error::Result;
use n2t::vm::Translator;

fn main() {
    let matches = Command::new("vmtranslate")
        .version("0.1.0")
        .about("VM translator: lowers stack-machine VM commands to Hack assembly")
        .arg(
            Arg::new("fileread")
                .long("fileread")
                .required(true)
                .value_name("PATH")
                .help("A .vm file, or a directory of .vm files"),
        )
        .arg(
            Arg::new("filewrite")
                .long("filewrite")
                .required(true)
                .value_name("FILE")
                .help("Output .asm path"),
        )
        .arg(
            Arg::new("nobootstrap")
                .long("nobootstrap")
                .action(clap::ArgAction::SetTrue)
                .help("Suppress the SP=256 / call Sys.init 0 preamble"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(clap::ArgAction::SetTrue)
                .help("Enable verbose diagnostic output and source-line annotations"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue)
                .help("Dump the parsed VM commands as JSON instead of translating them"),
        )
        .get_matches();

    if matches.get_flag("debug") {
        enable_debug();
    }

    let fileread = matches.get_one::<String>("fileread").unwrap();
    let filewrite = matches.get_one::<String>("filewrite").unwrap();
    let nobootstrap = matches.get_flag("nobootstrap");
    let debug = matches.get_flag("debug");
    let json = matches.get_flag("json");

    let timer = PerfTimer::new("vmtranslate");
    log_compiler(&format!("reading from {fileread}, writing to {filewrite}"));

    if let Err(e) = run(fileread, filewrite, nobootstrap, debug, json) {
        eprintln!("❌ {e}");
        process::exit(1);
    }
    timer.finish();
}

fn run(fileread: &str, filewrite: &str, nobootstrap: bool, debug: bool, json: bool) -> Result<()> {
    if json {
        let source = fs::read_to_string(fileread)?;
        let commands = n2t::vm::parser::parse(&source)?;
        let dump = serde_json::to_string_pretty(&commands)
            .map_err(|e| n2t::error::CompileError::encode(format!("failed to serialize: {e}")))?;
        fs::write(filewrite, dump)?;
        return Ok(());
    }

    let mut translator = Translator::new();
    translator.bootstrap = !nobootstrap;
    translator.annotate = debug;

    let asm = translator.translate(Path::new(fileread))?;
    fs::write(PathBuf::from(filewrite), asm)?;
    Ok(())
}
