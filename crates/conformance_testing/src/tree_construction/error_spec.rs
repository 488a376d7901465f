//! Location prefixes of expected parse errors
//!
//! Fixtures written by different projects use different conventions for the location of an
//! expected error. The ones seen in the wild are:
//!
//! ```text
//! (1,0): expected-doctype-but-got-chars
//! (1,5) expected-doctype-but-got-start-tag
//! (1:16) incorrectly-closed-comment
//! 1:1: Expected a doctype token
//!  * (1,6) missing DOCTYPE
//! 52: End of file seen and there were open elements.
//! (1:44-1:49) non-void-html-element-start-tag-with-trailing-solidus
//! ```
use conformance_shared::types::Position;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{space0, space1, u64 as number},
    combinator::{map, opt, rest},
    sequence::{delimited, preceded, separated_pair},
    IResult, Parser,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorSpec {
    /// No recognizable location
    Message(String),

    Line { line: usize, message: String },

    Location { pos: Position, message: String },

    Span { start: Position, end: Position, message: String },
}

impl ErrorSpec {
    /// Parses a single line of an `#errors` section. Lines without a known location prefix are
    /// kept as a plain message.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match alt((span_error, location_error, star_error, line_col_error, line_error)).parse(line) {
            Ok((_, spec)) => spec,
            Err(_) => ErrorSpec::Message(line.trim().to_owned()),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ErrorSpec::Message(message)
            | ErrorSpec::Line { message, .. }
            | ErrorSpec::Location { message, .. }
            | ErrorSpec::Span { message, .. } => message,
        }
    }

    /// Line the error starts on, if known
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            ErrorSpec::Message(_) => None,
            ErrorSpec::Line { line, .. } => Some(*line),
            ErrorSpec::Location { pos, .. } => Some(pos.line),
            ErrorSpec::Span { start, .. } => Some(start.line),
        }
    }
}

fn message(i: &str) -> IResult<&str, String> {
    map(rest, |message: &str| message.trim().to_owned()).parse(i)
}

fn position_with<'a>(separator: &'static str, i: &'a str) -> IResult<&'a str, Position> {
    map(separated_pair(number, tag(separator), number), |(line, col)| {
        Position::new(line as usize, col as usize)
    })
    .parse(i)
}

// 1,0
fn comma_position(i: &str) -> IResult<&str, Position> {
    position_with(",", i)
}

// 1:0
fn colon_position(i: &str) -> IResult<&str, Position> {
    position_with(":", i)
}

// (1,0): message  /  (1,5) message  /  (1:16) message
fn location_error(i: &str) -> IResult<&str, ErrorSpec> {
    map(
        (
            delimited(tag("("), alt((comma_position, colon_position)), tag(")")),
            opt(tag(":")),
            space1,
            message,
        ),
        |(pos, _, _, message)| ErrorSpec::Location { pos, message },
    )
    .parse(i)
}

//  * (1,6) message
fn star_error(i: &str) -> IResult<&str, ErrorSpec> {
    preceded((space0, tag("*"), space1), location_error).parse(i)
}

// 1:1: message
fn line_col_error(i: &str) -> IResult<&str, ErrorSpec> {
    map((colon_position, tag(":"), space1, message), |(pos, _, _, message)| {
        ErrorSpec::Location { pos, message }
    })
    .parse(i)
}

// 52: message
fn line_error(i: &str) -> IResult<&str, ErrorSpec> {
    map((number, tag(":"), space1, message), |(line, _, _, message)| ErrorSpec::Line {
        line: line as usize,
        message,
    })
    .parse(i)
}

// (1:44-1:49) message
fn span_error(i: &str) -> IResult<&str, ErrorSpec> {
    map(
        (
            delimited(tag("("), separated_pair(colon_position, tag("-"), colon_position), tag(")")),
            space1,
            message,
        ),
        |((start, end), _, message)| ErrorSpec::Span { start, end, message },
    )
    .parse(i)
}
