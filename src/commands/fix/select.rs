use std::io::{self, BufRead, Write};

use chrono::{DateTime, Utc};

use crate::format::format_issue_line;
use crate::models::Issue;

/// Ask the user to pick one of `issues` by its 1-based position.
///
/// Returns `None` when the user cancels with an empty answer, `q`, or end of
/// input. Anything else that is not a valid position asks again.
pub fn select_issue<'a, R: BufRead, W: Write>(
    issues: &'a [Issue],
    now: DateTime<Utc>,
    mut input: R,
    out: &mut W,
) -> io::Result<Option<&'a Issue>> {
    for (i, issue) in issues.iter().enumerate() {
        writeln!(out, "{:>3}) {}", i + 1, format_issue_line(issue, now))?;
    }

    loop {
        write!(
            out,
            "Select an issue to fix [1-{}, q to quit]: ",
            issues.len()
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match parse_choice(answer, issues.len()).and_then(|i| issues.get(i)) {
            Some(issue) => return Ok(Some(issue)),
            None => writeln!(
                out,
                "'{answer}' is not a valid choice; enter a number between 1 and {}.",
                issues.len()
            )?,
        }
    }
}

/// Zero-based index for a 1-based answer within `1..=len`.
fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}
