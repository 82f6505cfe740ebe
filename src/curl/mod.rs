pub mod curl_parsers;
pub mod flags;
pub mod parser;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::url::{parse_query, split_url};
use curl_parsers::{parse_tokens, remove_curl_cmd_header};
use flags::FlagTable;
use parser::tokenize;

pub use curl_parsers::join_continuations;

pub const DEFAULT_METHOD: &str = "GET";

/// The HTTP request a curl command describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInfo {
    /// Uppercase HTTP verb.
    pub method: String,
    /// The URL exactly as it appeared in the command.
    pub url: String,
    /// Scheme and authority, e.g. `https://host:8080`.
    pub base_url: String,
    /// Path without the query string, starting with `/`.
    pub uri: String,
    /// Form fields of a url-encoded payload.
    pub body: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub query_params: BTreeMap<String, String>,
    /// Reserved; never filled by the parser.
    pub path_params: BTreeMap<String, String>,
}

impl Default for RequestInfo {
    fn default() -> Self {
        Self {
            method: DEFAULT_METHOD.into(),
            url: String::new(),
            base_url: String::new(),
            uri: String::new(),
            body: BTreeMap::new(),
            headers: BTreeMap::new(),
            query_params: BTreeMap::new(),
            path_params: BTreeMap::new(),
        }
    }
}

impl RequestInfo {
    /// Splits `url` into `base_url`, `uri` and `query_params`.
    ///
    /// A URL that does not look like `http(s)://authority[/path]` leaves the
    /// request untouched.
    pub fn decompose_url(&mut self) {
        let Some(parts) = split_url(&self.url) else {
            log::debug!("url {:?} has no scheme/authority, not decomposed", self.url);
            return;
        };

        self.base_url = parts.base_url.to_string();
        self.uri = parts.uri.to_string();
        if let Some(query) = parts.query {
            for (key, value) in parse_query(query) {
                self.query_params.insert(key.into(), value.into());
            }
        }
    }
}

/// Turns curl commands into [`RequestInfo`]s using a table of known flags.
#[derive(Debug, Clone, Default)]
pub struct CurlParser {
    flags: FlagTable,
}

impl CurlParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(flags: FlagTable) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> &FlagTable {
        &self.flags
    }

    /// Parses a full command line such as `curl -X POST https://a.com -d 'a=1'`.
    ///
    /// Fails only when the trimmed input does not start with `curl`. Anything
    /// else that cannot be understood is skipped and leaves the matching
    /// fields at their defaults.
    pub fn parse(&self, input: &str) -> Result<RequestInfo> {
        let command = remove_curl_cmd_header(input)?;
        let tokens = tokenize(command);
        log::debug!("parsing {} tokens", tokens.len());

        let mut req = RequestInfo::default();
        parse_tokens(&self.flags, &tokens, &mut req);

        if !req.url.is_empty() {
            req.decompose_url();
        }

        Ok(req)
    }
}

static DEFAULT_PARSER: LazyLock<CurlParser> = LazyLock::new(CurlParser::default);

/// Parses a curl command with the built-in flag table.
pub fn parse_curl(input: &str) -> Result<RequestInfo> {
    DEFAULT_PARSER.parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurlError;
    use super::flags::{FlagAction, FlagHandler};

    #[test]
    fn test_default_request() {
        let req = RequestInfo::default();
        assert_eq!(req.method, "GET");
        assert!(req.url.is_empty() && req.base_url.is_empty() && req.uri.is_empty());
        assert!(req.headers.is_empty() && req.body.is_empty());
    }

    #[test]
    fn test_decompose_url() {
        let mut req = RequestInfo {
            url: "https://a.com/x?y=1&z".into(),
            ..Default::default()
        };
        req.decompose_url();
        assert_eq!(req.base_url, "https://a.com");
        assert_eq!(req.uri, "/x");
        assert_eq!(req.query_params["y"], "1");
        assert_eq!(req.query_params["z"], "");
        assert_eq!(req.url, "https://a.com/x?y=1&z");
    }

    #[test]
    fn test_decompose_url_without_path() {
        let mut req = RequestInfo {
            url: "http://localhost:3000".into(),
            ..Default::default()
        };
        req.decompose_url();
        assert_eq!(req.base_url, "http://localhost:3000");
        assert_eq!(req.uri, "/");
        assert!(req.query_params.is_empty());
    }

    #[test]
    fn test_parse_not_curl() {
        assert!(matches!(parse_curl("wget https://a.com"), Err(CurlError::NotCurl)));
        assert!(matches!(parse_curl("   "), Err(CurlError::NotCurl)));
    }

    #[test]
    fn test_custom_flags() {
        let mut table = FlagTable::default();
        table.register(&["--json"], |arg: &str, req: &mut RequestInfo| {
            FlagAction::Data.apply(arg, req);
            req.headers.insert("Accept".into(), "application/json".into());
        });
        let parser = CurlParser::with_flags(table);

        let req = parser
            .parse(r#"curl https://a.com/api --json '{"a": 1}'"#)
            .unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.headers["Content-Type"], "application/json");
        assert_eq!(req.headers["Accept"], "application/json");

        // The built-in parser doesn't know `--json`.
        let req = parse_curl(r#"curl https://a.com/api --json '{"a": 1}'"#).unwrap();
        assert_eq!(req.method, "GET");
        assert!(req.headers.is_empty());
    }
}
