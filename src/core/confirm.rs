//! Interactive confirmation for destructive actions

use std::io::{self, BufRead, Write};
use tracing::debug;

/// Prompt shown before destroying resources
pub const DESTROY_PROMPT: &str =
    "Are you sure you want to destroy all resources? Type 'yes' to confirm: ";

/// Ask for confirmation and read one line of `input`.
///
/// End of input counts as a refusal.
pub fn confirm_destroy<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    out.write_all(DESTROY_PROMPT.as_bytes())?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        debug!("No confirmation received (end of input)");
        return Ok(false);
    }

    let confirmed = is_confirmation(&answer);
    debug!("Confirmation answer {:?} accepted={}", answer, confirmed);
    Ok(confirmed)
}

/// `yes` in any letter case, ignoring only the line terminator
#[must_use]
pub fn is_confirmation(answer: &str) -> bool {
    let answer = answer
        .strip_suffix('\n')
        .map_or(answer, |a| a.strip_suffix('\r').unwrap_or(a));
    answer.eq_ignore_ascii_case("yes")
}
