//! Emission of `label`/`goto`/`if-goto`. Label names are used verbatim: a
//! well-formed `.vm` file already prefixes function-local labels with their
//! enclosing function's name, so no additional scoping is done here.

/// Generates `(label)`.
pub fn generate_label(name: &str) -> Vec<String> {
    vec![format!("({name})")]
}

/// Generates an unconditional `goto`.
pub fn generate_goto(name: &str) -> Vec<String> {
    vec![format!("@{name}"), "0;JMP".to_string()]
}

/// Generates `if-goto`: pops the stack top and jumps when it is non-zero.
pub fn generate_if_goto(name: &str) -> Vec<String> {
    vec![
        "@SP".to_string(),
        "A=M-1".to_string(),
        "D=M".to_string(),
        "@SP".to_string(),
        "M=M-1".to_string(),
        format!("@{name}"),
        "D;JNE".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goto_is_unconditional() {
        assert_eq!(generate_goto("LOOP"), vec!["@LOOP".to_string(), "0;JMP".to_string()]);
    }

    #[test]
    fn if_goto_decrements_sp_before_testing() {
        let asm = generate_if_goto("LOOP");
        let sp_dec = asm.iter().position(|l| l == "M=M-1").unwrap();
        let jump = asm.iter().position(|l| l == "D;JNE").unwrap();
        assert!(sp_dec < jump);
    }
}
