//! # Hack Assembler CLI
//!
//! Resolves symbols and encodes Hack assembly source into 16-bit binary,
//! written to standard output.

use clap::{Arg, Command};
use std::fs;
use std::process;

use n2t::debug::{enable_debug, log_compiler, PerfTimer};
use n2t::error::Result;
use n2t::hack;

fn main() {
    let matches = Command::new("hackasm")
        .version("0.1.0")
        .about("Hack assembler: translates symbolic Hack assembly to binary")
        .arg(
            Arg::new("filename")
                .long("filename")
                .required(true)
                .value_name("FILE")
                .help("Hack assembly source file (.asm)"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(clap::ArgAction::SetTrue)
                .help("Enable verbose diagnostic output"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(clap::ArgAction::SetTrue)
                .help("Dump the resolved instruction stream as JSON instead of assembling it"),
        )
        .get_matches();

    if matches.get_flag("debug") {
        enable_debug();
    }

    let filename = matches.get_one::<String>("filename").unwrap();
    let json = matches.get_flag("json");
    let timer = PerfTimer::new("hackasm");
    log_compiler(&format!("assembling {filename}"));

    if let Err(e) = run(filename, json) {
        eprintln!("❌ {e}");
        process::exit(1);
    }
    timer.finish();
}

fn run(filename: &str, json: bool) -> Result<()> {
    let source = fs::read_to_string(filename)?;
    if json {
        let resolved = hack::symbols::resolve(&source)?;
        let dump = serde_json::to_string_pretty(&resolved)
            .map_err(|e| n2t::error::CompileError::encode(format!("failed to serialize: {e}")))?;
        println!("{dump}");
        return Ok(());
    }
    for line in hack::assemble(&source)? {
        println!("{line}");
    }
    Ok(())
}
