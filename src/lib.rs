pub mod curl;
pub mod error;
pub mod url;
#[cfg(test)]
mod test_util;

pub use curl::{CurlParser, RequestInfo, parse_curl};
pub use error::{CurlError, Result};
