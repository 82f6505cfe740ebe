pub mod parser;
pub mod protocol;

pub use parser::{UrlParts, parse_query, split_url};
pub use protocol::{Schema, is_url};
