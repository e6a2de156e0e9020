use std::process::Command;

use crate::error::ReaderError;

/// Run `program args..` and return its trimmed stdout.
pub fn run_command(program: &str, args: &[&str]) -> Result<String, ReaderError> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ReaderError::Command {
            program: program.to_string(),
            detail: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(ReaderError::Command {
            program: program.to_string(),
            detail: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn count_lines(output: &str) -> usize {
    output.lines().filter(|l| !l.trim().is_empty()).count()
}
