//! Interactive confirmation of a [`Delta`] over injected streams.
//!
//! The exchange is at most one batch of output followed by at most one
//! blocking line read. A driver that feeds input programmatically must drain
//! output concurrently.

use std::io::{BufRead, Write};

use crate::error::{stream_err, GenerateError};
use crate::reconcile::Delta;

pub const NO_CHANGES: &str = "No new services, groups or imports found";
pub const PROMPT: &str = "Do you wish to continue? [y/n]? ";

/// Human-readable list of what `delta` would add, names in sorted order.
///
/// Membership in a target group is not listed; only discovered entries are.
pub fn summary(delta: &Delta) -> String {
    let mut text = String::from("The following will be generated:\n");
    let services = delta.service_names();
    if !services.is_empty() {
        text.push_str("Services:\n");
        for name in services {
            text.push('\t');
            text.push_str(name);
            text.push('\n');
        }
    }
    text
}

/// `y` or `yes`, ignoring case and surrounding whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Decide whether `delta` should be written.
///
/// An empty delta prints [`NO_CHANGES`] and returns `false`. With `force`
/// nothing is printed and `input` is never read. Otherwise the summary and
/// [`PROMPT`] are written and one line is read; anything but an affirmative
/// answer, including end of input, returns `false`.
pub fn confirm<W, R>(
    delta: &Delta,
    force: bool,
    out: &mut W,
    input: &mut R,
) -> Result<bool, GenerateError>
where
    W: Write + ?Sized,
    R: BufRead + ?Sized,
{
    if delta.is_empty() {
        writeln!(out, "{NO_CHANGES}").map_err(stream_err("output"))?;
        out.flush().map_err(stream_err("output"))?;
        return Ok(false);
    }
    if force {
        return Ok(true);
    }

    write!(out, "{}{PROMPT}", summary(delta)).map_err(stream_err("output"))?;
    out.flush().map_err(stream_err("output"))?;

    let mut answer = Vec::new();
    input
        .read_until(b'\n', &mut answer)
        .map_err(stream_err("input"))?;
    let proceed = is_affirmative(&String::from_utf8_lossy(&answer));
    tracing::debug!(proceed, "confirmation answered");
    Ok(proceed)
}
