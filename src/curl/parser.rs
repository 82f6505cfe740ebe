use winnow::{
    ModalResult, Parser,
    combinator::{alt, delimited, opt, preceded, repeat, terminated},
    token::{take_till, take_while},
};

const BLANKS: [char; 2] = [' ', '\t'];

fn blanks<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    take_while(0.., BLANKS).parse_next(s)
}

/// The body of a quoted run. A quote preceded by a backslash does not close
/// the run; both characters are kept.
fn quoted_body<'a>(quote: char, s: &mut &'a str) -> ModalResult<&'a str> {
    repeat::<_, _, (), _, _>(
        0..,
        alt((
            ('\\', quote).take(),
            "\\",
            take_till(1.., ['\\', quote]),
        )),
    )
    .take()
    .parse_next(s)
}

/// A quoted run. An unterminated quote runs to the end of input.
fn quoted_data<'a>(quote: char, s: &mut &'a str) -> ModalResult<&'a str> {
    delimited(quote, |s: &mut &'a str| quoted_body(quote, s), opt(quote)).parse_next(s)
}

fn parse_double_quoted_data<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    quoted_data('"', s)
}

fn parse_single_quoted_data<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    quoted_data('\'', s)
}

fn parse_bare_data<'a>(s: &mut &'a str) -> ModalResult<&'a str> {
    take_till(1.., [' ', '\t', '"', '\'']).parse_next(s)
}

/// One token: touching bare and quoted runs are glued together.
fn parse_token(s: &mut &str) -> ModalResult<String> {
    repeat(
        1..,
        alt((
            parse_bare_data,
            parse_double_quoted_data,
            parse_single_quoted_data,
        )),
    )
    .fold(String::new, |mut acc: String, run| {
        acc.push_str(run);
        acc
    })
    .parse_next(s)
}

fn parse_token_list(s: &mut &str) -> ModalResult<Vec<String>> {
    preceded(
        blanks,
        repeat(0.., terminated(parse_token, blanks)).fold(Vec::new, |mut acc: Vec<String>, token| {
            // `''` yields an empty run, which is not a token on its own.
            if !token.is_empty() {
                acc.push(token);
            }
            acc
        }),
    )
    .parse_next(s)
}

/// Splits a command (with the `curl` keyword already removed) into tokens.
///
/// Tokens are separated by spaces and tabs outside of quotes. Newlines are
/// ordinary characters.
pub fn tokenize(command: &str) -> Vec<String> {
    let mut input = command;
    match parse_token_list(&mut input) {
        Ok(tokens) => {
            log::trace!("tokenized {:?} into {:?}", command, tokens);
            tokens
        }
        Err(e) => {
            log::debug!("failed to tokenize {:?}: {:?}", command, e);
            Vec::new()
        }
    }
}
