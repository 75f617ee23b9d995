use nom::{
    IResult,
    bytes::complete::{take_till1, take_while},
    character::complete::satisfy,
    multi::many0,
};

use crate::error::Error;

const SNIPPET_LENGTH: usize = 80;

pub fn parse_word(input: &str) -> IResult<&str, &str> {
    take_till1(is_whitespace)(input)
}

pub fn parse_whitespace(input: &str) -> IResult<&str, ()> {
    skip_whitespace(input).map(|input| (input, ()))
}

pub fn skip_whitespace(
    input: &str,
) -> std::result::Result<&str, nom::Err<nom::error::Error<&str>>> {
    many0(satisfy(is_whitespace))(input).map(|(input, _)| input)
}

pub fn parse_digits(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_ascii_digit())(input)
}

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace() && !is_any_line_break(c)
}

pub fn is_any_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Shortens a line of input so that it can be embedded into an error message.
pub fn snippet(line: &str) -> String {
    let line = line.trim_end();
    if line.chars().count() > SNIPPET_LENGTH {
        let mut result: String = line.chars().take(SNIPPET_LENGTH).collect();
        result.push_str("...");
        result
    } else {
        line.to_string()
    }
}

pub fn format_error(
    format: &'static str,
    line_number: usize,
    line: &str,
    reason: impl Into<String>,
) -> Error {
    Error::Format {
        format,
        line_number,
        snippet: snippet(line),
        reason: reason.into(),
    }
}

/// Converts the error of a nom parser that was applied to a single line.
pub fn translate_nom_error(
    format: &'static str,
    line_number: usize,
    line: &str,
    error: nom::Err<nom::error::Error<&str>>,
) -> Error {
    let reason = match error {
        nom::Err::Incomplete(needed) => format!("incomplete input ({needed:?})"),
        nom::Err::Error(error) | nom::Err::Failure(error) => format!(
            "unexpected input '{}' ({:?})",
            snippet(error.input),
            error.code
        ),
    };
    format_error(format, line_number, line, reason)
}
