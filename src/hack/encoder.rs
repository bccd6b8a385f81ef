//! Binary encoding of already symbol-resolved Hack assembly.
//!
//! Input lines must be either `@n` (a resolved numeric address) or a
//! C-instruction `[dest=]comp[;jump]`. Symbolic `@name` references reaching
//! this stage indicate a bug upstream in [`super::symbols`].

use crate::error::{CompileError, Result};

const MAX_ADDRESS: u32 = 32767;

fn comp_bits(comp: &str) -> Option<&'static str> {
    Some(match comp {
        "0" => "0101010",
        "1" => "0111111",
        "-1" => "0111010",
        "D" => "0001100",
        "A" => "0110000",
        "M" => "1110000",
        "!D" => "0001101",
        "!A" => "0110001",
        "!M" => "1110001",
        "-D" => "0001111",
        "-A" => "0110011",
        "-M" => "1110011",
        "D+1" => "0011111",
        "A+1" => "0110111",
        "M+1" => "1110111",
        "D-1" => "0001110",
        "A-1" => "0110010",
        "M-1" => "1110010",
        "D+A" => "0000010",
        "D+M" => "1000010",
        "D-A" => "0010011",
        "D-M" => "1010011",
        "A-D" => "0000111",
        "M-D" => "1000111",
        "D&A" => "0000000",
        "D&M" => "1000000",
        "D|A" => "0010101",
        "D|M" => "1010101",
        _ => return None,
    })
}

fn dest_bits(dest: &str) -> Option<&'static str> {
    Some(match dest {
        "null" | "" => "000",
        "M" => "001",
        "D" => "010",
        "MD" | "DM" => "011",
        "A" => "100",
        "AM" | "MA" => "101",
        "AD" | "DA" => "110",
        "AMD" | "ADM" | "MAD" | "MDA" | "DAM" | "DMA" => "111",
        _ => return None,
    })
}

fn jump_bits(jump: &str) -> Option<&'static str> {
    Some(match jump {
        "null" | "" => "000",
        "JGT" => "001",
        "JEQ" => "010",
        "JGE" => "011",
        "JLT" => "100",
        "JNE" => "101",
        "JLE" => "110",
        "JMP" => "111",
        _ => return None,
    })
}

fn encode_a(value: &str) -> Result<String> {
    let address: u32 = value
        .parse()
        .map_err(|_| CompileError::encode(format!("unresolved symbol reached encoder: @{value}")))?;
    if address > MAX_ADDRESS {
        return Err(CompileError::encode(format!(
            "address @{address} exceeds the 15-bit address space (max {MAX_ADDRESS})"
        )));
    }
    Ok(format!("0{:015b}", address))
}

fn encode_c(instruction: &str) -> Result<String> {
    let (dest, rest) = match instruction.split_once('=') {
        Some((d, r)) => (d, r),
        None => ("null", instruction),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((c, j)) => (c, j),
        None => (rest, "null"),
    };

    let comp_bits = comp_bits(comp)
        .ok_or_else(|| CompileError::encode(format!("unknown comp mnemonic '{comp}'")))?;
    let dest_bits = dest_bits(dest)
        .ok_or_else(|| CompileError::encode(format!("unknown dest mnemonic '{dest}'")))?;
    let jump_bits = jump_bits(jump)
        .ok_or_else(|| CompileError::encode(format!("unknown jump mnemonic '{jump}'")))?;

    Ok(format!("111{comp_bits}{dest_bits}{jump_bits}"))
}

/// Encodes a fully symbol-resolved instruction stream into 16-bit binary lines.
pub fn encode(lines: &[String]) -> Result<Vec<String>> {
    lines
        .iter()
        .map(|line| {
            if let Some(value) = line.strip_prefix('@') {
                encode_a(value)
            } else {
                encode_c(line)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_a_instruction() {
        assert_eq!(encode_a("2").unwrap(), "0000000000000010");
    }

    #[test]
    fn max_address_encodes_but_overflow_fails() {
        assert!(encode_a("32767").is_ok());
        assert!(encode_a("32768").is_err());
    }

    #[test]
    fn encodes_c_instruction_with_m_comp() {
        assert_eq!(encode_c("M=D+1;JMP").unwrap(), "1110011111001111");
    }

    #[test]
    fn defaults_missing_dest_and_jump() {
        assert_eq!(encode_c("0").unwrap(), "1110101010000000");
    }

    #[test]
    fn unknown_mnemonic_is_an_error() {
        assert!(encode_c("D=Q").is_err());
    }
}
