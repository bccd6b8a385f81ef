//! # Jack Syntax Analyser CLI
//!
//! Tokenizes and parses `.jack` source, writing the parse tree as XML. For a
//! directory input, every `.jack` file is processed and written as
//! `<stem>.xml` under the output path; for a single file, one `.xml` is
//! written next to it.

use clap::{Arg, Command};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use n2t::debug::{enable_debug, log_compiler, PerfTimer};
use n2t::error::{CompileError, Result};
use n2t::jack;

fn main() {
    let matches = Command::new("jackanalyse")
        .version("0.1.0")
        .about("Jack syntax analyser: tokenizes and parses Jack source into an XML parse tree")
        .arg(
            Arg::new("fileread")
                .long("fileread")
                .required(true)
                .value_name("PATH")
                .help("A .jack file, or a directory of .jack files"),
        )
        .arg(
            Arg::new("filewrite")
                .long("filewrite")
                .required(true)
                .value_name("PATH")
                .help("Output file (single input) or directory (directory input)"),
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
                .help("Dump the token stream as JSON instead of writing a parse tree"),
        )
        .get_matches();

    if matches.get_flag("debug") {
        enable_debug();
    }

    let fileread = matches.get_one::<String>("fileread").unwrap();
    let filewrite = matches.get_one::<String>("filewrite").unwrap();
    let json = matches.get_flag("json");

    let timer = PerfTimer::new("jackanalyse");
    log_compiler(&format!("reading from {fileread}, writing to {filewrite}"));

    if let Err(e) = run(fileread, filewrite, json) {
        eprintln!("❌ {e}");
        process::exit(1);
    }
    timer.finish();
}

fn is_jack_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jack")
}

fn run(fileread: &str, filewrite: &str, json: bool) -> Result<()> {
    let input = Path::new(fileread);

    if json {
        let tokens = jack::tokenizer::tokenize(&fs::read_to_string(input)?)?;
        let dump = serde_json::to_string_pretty(&tokens)
            .map_err(|e| CompileError::encode(format!("failed to serialize: {e}")))?;
        fs::write(filewrite, dump)?;
        return Ok(());
    }

    if input.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(input)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| is_jack_file(p))
            .collect();
        files.sort();
        if files.is_empty() {
            return Err(CompileError::NoSourceFiles {
                extension: ".jack",
                path: input.display().to_string(),
            });
        }

        let out_dir = Path::new(filewrite);
        fs::create_dir_all(out_dir)?;
        for file in files {
            let tree = jack::analyse(&fs::read_to_string(&file)?)?;
            let stem = file.file_stem().unwrap().to_string_lossy();
            fs::write(out_dir.join(format!("{stem}.xml")), jack::xml::render(&tree))?;
        }
    } else {
        let tree = jack::analyse(&fs::read_to_string(input)?)?;
        fs::write(filewrite, jack::xml::render(&tree))?;
    }

    Ok(())
}
