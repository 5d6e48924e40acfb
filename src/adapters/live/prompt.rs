//! Live prompt adapters.

use std::io::{self, BufRead, Write};

use crate::ports::prompt::Prompt;
use crate::ports::PortError;

/// Asks on stderr, keeping stdout for the report, and reads the answer
/// from stdin.
///
/// Anything other than `y`/`yes` (case-insensitive) is a no, including an
/// empty line and end of input.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool, PortError> {
        eprint!("{question} [y/N]: ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        Ok(parse_answer(&input))
    }
}

/// Answers no without asking. Used when `DYWO_NONINTERACTIVE` is set.
pub struct DecliningPrompt;

impl Prompt for DecliningPrompt {
    fn confirm(&self, _question: &str) -> Result<bool, PortError> {
        Ok(false)
    }
}

fn parse_answer(input: &str) -> bool {
    let trimmed = input.trim().to_lowercase();
    trimmed == "y" || trimmed == "yes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer("  YES \n"));
    }

    #[test]
    fn default_is_no() {
        assert!(!parse_answer("\n"));
        assert!(!parse_answer(""));
        assert!(!parse_answer("nope\n"));
    }

    #[test]
    fn declining_prompt_always_says_no() {
        assert!(!DecliningPrompt.confirm("Fix?").unwrap());
    }
}
