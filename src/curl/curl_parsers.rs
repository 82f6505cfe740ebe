use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::char,
    combinator::{map, opt, recognize},
    error::context,
    multi::fold_many0,
    sequence::tuple,
};

use super::RequestInfo;
use super::flags::FlagTable;
use crate::error::{CurlError, Result};
use crate::url::is_url;

const CURL_CMD: &str = "curl";

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn curl_keyword(input: &str) -> IResult<&str, &str> {
    context("curl keyword", tag(CURL_CMD))(input)
}

pub fn is_curl(input: &str) -> bool {
    curl_keyword(input.trim()).is_ok()
}

/// Strips the leading `curl` keyword and the whitespace around the command.
pub fn remove_curl_cmd_header(input: &str) -> Result<&str> {
    let (rest, _) = curl_keyword(input.trim()).map_err(|_| CurlError::NotCurl)?;
    Ok(rest.trim())
}

/// Identify a line continuation: a backslash directly followed by a line ending.
fn slash_line_ending(input: &str) -> IResult<&str, &str> {
    context(
        "Slash line ending",
        recognize(tuple((char('\\'), opt(char('\r')), char('\n')))),
    )(input)
}

fn continuation_joined(input: &str) -> IResult<&str, String> {
    context(
        "Continuation joined",
        fold_many0(
            alt((
                map(slash_line_ending, |_| ""),
                take_till1(|c: char| c == '\\'),
                tag("\\"),
            )),
            String::new,
            |mut acc: String, part| {
                acc.push_str(part);
                acc
            },
        ),
    )(input)
}

/// Removes shell line continuations (`\` followed by a newline) so a
/// multi-line command reads as one line.
pub fn join_continuations(input: &str) -> String {
    match continuation_joined(input) {
        Ok((rest, mut joined)) => {
            joined.push_str(rest);
            joined
        }
        Err(_) => input.to_string(),
    }
}

/// Stores a `Name: value` header. Headers without a colon are ignored.
pub fn parse_header(header: &str, req: &mut RequestInfo) {
    match header.split_once(':') {
        Some((key, value)) => {
            req.headers
                .insert(key.trim().to_string(), value.trim().to_string());
        }
        None => log::debug!("ignoring header without a colon: {:?}", header),
    }
}

/// Infers the content type of a data payload from its shape, and fills the
/// body for form-encoded payloads. JSON payloads are only detected.
pub fn parse_data(data: &str, req: &mut RequestInfo) {
    if data.starts_with('{') && data.ends_with('}') {
        req.headers
            .insert("Content-Type".into(), JSON_CONTENT_TYPE.into());
        return;
    }

    if data.contains('=') {
        req.headers
            .insert("Content-Type".into(), FORM_CONTENT_TYPE.into());
        for pair in data.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                req.body.insert(key.into(), value.into());
            }
        }
    }
}

/// Walks the tokens once, applying recognized flags to `req` and capturing
/// the last URL-looking token.
///
/// A flag at the very end, without its argument, is skipped. Unknown flags
/// are ignored.
pub fn parse_tokens<S: AsRef<str>>(flags: &FlagTable, tokens: &[S], req: &mut RequestInfo) {
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_ref();

        match flags.get(token) {
            Some(handler) => match tokens.get(i + 1) {
                Some(arg) => {
                    handler.apply(arg.as_ref(), req);
                    i += 1;
                }
                None => log::debug!("flag {} is missing its argument", token),
            },
            None if is_url(token) => req.url = token.to_string(),
            None => log::trace!("ignoring token {:?}", token),
        }

        i += 1;
    }
}
