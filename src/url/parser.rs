use serde::Serialize;
use winnow::ascii::alpha1;
use winnow::combinator::{eof, opt, preceded, separated, terminated};
use winnow::token::take_till;
use winnow::{ModalResult, Parser};

use super::protocol::Schema;

/// The pieces a captured URL is split into.
///
/// `https://a.com/x?y=1` becomes base `https://a.com`, uri `/x` and query `y=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrlParts<'a> {
    pub schema: Schema,
    pub base_url: &'a str,
    /// Always starts with `/`, never contains the query string.
    pub uri: &'a str,
    /// Everything after the first `?`, if the URL has one.
    pub query: Option<&'a str>,
}

fn parse_schema(s: &mut &str) -> ModalResult<Schema> {
    terminated(alpha1.verify_map(|name: &str| Schema::try_from(name).ok()), "://").parse_next(s)
}

/// `scheme://authority`, where the authority is everything up to the first `/`.
fn parse_base_url<'a>(s: &mut &'a str) -> ModalResult<(Schema, &'a str)> {
    (parse_schema, take_till(1.., '/'))
        .with_taken()
        .map(|((schema, _authority), base)| (schema, base))
        .parse_next(s)
}

/// The path and query, which may not span lines.
fn parse_path<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    ('/', take_till(0.., '\n')).take().parse_next(s)
}

fn parse_url<'a>(s: &mut &'a str) -> ModalResult<((Schema, &'a str), Option<&'a str>)> {
    terminated((parse_base_url, opt(parse_path)), eof).parse_next(s)
}

/// Splits `url` into base URL, path and query string.
///
/// Returns `None` when the URL does not look like `http(s)://authority[/path]`.
pub fn split_url(url: &str) -> Option<UrlParts<'_>> {
    let mut input = url;
    let ((schema, base_url), path) = parse_url(&mut input).ok()?;
    let path = path.unwrap_or("/");

    let (uri, query) = match path.split_once('?') {
        Some((uri, query)) => (uri, Some(query)),
        None => (path, None),
    };

    Some(UrlParts {
        schema,
        base_url,
        uri,
        query,
    })
}

fn parse_query_pair<'a>(s: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    (
        take_till(0.., ['=', '&']),
        opt(preceded('=', take_till(0.., '&'))).map(|value| value.unwrap_or("")),
    )
        .parse_next(s)
}

fn parse_query_string<'a>(s: &mut &'a str) -> ModalResult<Vec<(&'a str, &'a str)>> {
    terminated(separated(1.., parse_query_pair, '&'), eof).parse_next(s)
}

/// Splits a query string into key/value pairs.
///
/// Pairs are split on the first `=`; a key without `=` maps to `""`.
pub fn parse_query(query: &str) -> Vec<(&str, &str)> {
    if query.is_empty() {
        return Vec::new();
    }

    let mut input = query;
    parse_query_string(&mut input).unwrap_or_default()
}
