//! Free-text compiler messages returned by Aura and LWC deployments.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{NormalizedDiagnostic, Severity, coerce_number};

#[expect(clippy::expect_used, reason = "the pattern is a compile-time constant")]
static BRACKET_POSITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*\[([0-9]+)[:, ]+([0-9]+)\].*$").expect("bracket position pattern compiles")
});

/// Parses a free-text compiler message into exactly one error diagnostic.
///
/// Two layouts are recognised, in order:
///
/// 1. a `[line:column]` marker anywhere in the message (separators may be any
///    run of `:`, `,` or spaces). The whole message is kept, the line becomes
///    zero-based and the column is used as given;
/// 2. a `<file_name>:line,column:message` marker. Text before the first
///    `file_name:` occurrence is discarded. Missing markers read as
///    `1,1:<message>`.
///
/// Non-numeric positions coerce to the first line and a whole-line range.
/// The line is clamped into a document of `line_count` lines.
#[must_use]
pub fn parse_compiler_error(
    message: &str,
    file_name: &str,
    line_count: u32,
) -> NormalizedDiagnostic {
    let last_line = line_count.saturating_sub(1);
    let clamp = |index: i64| -> u32 {
        u32::try_from(index.max(0)).map_or(last_line, |line| line.min(last_line))
    };

    if let Some(captures) = BRACKET_POSITION.captures(message) {
        let line = captures
            .get(1)
            .and_then(|m| coerce_number(m.as_str()))
            .unwrap_or(0);
        let column = captures
            .get(2)
            .and_then(|m| coerce_number(m.as_str()))
            .filter(|column| *column > 0)
            .and_then(|column| u32::try_from(column).ok());
        let whole = captures.get(0).map_or(message, |m| m.as_str());
        return NormalizedDiagnostic {
            line: clamp(line.saturating_sub(1)),
            column,
            message: whole.to_owned(),
            severity: Severity::Error,
        };
    }

    let marker = format!("{file_name}:");
    let located: Cow<'_, str> = message.split(marker.as_str()).nth(1).map_or_else(
        || Cow::Owned(format!("1,1:{message}")),
        Cow::Borrowed,
    );
    let (position, text) = located.split_once(':').unwrap_or(("", &*located));
    let mut coordinates = position.split(',');
    let line = coordinates.next().and_then(coerce_number).unwrap_or(0);
    let column = coordinates
        .next()
        .and_then(coerce_number)
        .filter(|column| *column > 0)
        .and_then(|column| u32::try_from(column).ok());

    NormalizedDiagnostic {
        line: clamp(line.saturating_sub(1)),
        column,
        message: text.to_owned(),
        severity: Severity::Error,
    }
}
