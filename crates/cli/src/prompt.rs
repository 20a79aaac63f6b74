use std::io::{stdin, stdout, Write};

use askopt_core::error::Result;

/// Asks a free-text question on the terminal and reads one line.
///
/// A required question is re-asked until the answer is non-empty; an
/// optional one accepts an empty line. The answer is returned as typed,
/// with only the line terminator stripped.
pub fn prompt_line(question: &str, required: bool) -> Result<String> {
    loop {
        print!("\n{question}\n  ");
        stdout().flush()?;

        let mut input = String::new();
        stdin().read_line(&mut input)?;
        let answer = input.trim_end_matches(['\r', '\n']).to_string();

        if !answer.is_empty() || !required {
            return Ok(answer);
        }

        // Required and empty - ask again
    }
}
