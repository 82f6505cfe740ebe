use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::RequestInfo;
use super::curl_parsers::{parse_data, parse_header};

/// Something a flag does with the token that follows it.
pub trait FlagHandler: Send + Sync {
    fn apply(&self, arg: &str, req: &mut RequestInfo);
}

impl<F> FlagHandler for F
where
    F: Fn(&str, &mut RequestInfo) + Send + Sync,
{
    fn apply(&self, arg: &str, req: &mut RequestInfo) {
        self(arg, req)
    }
}

/// The flags understood out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagAction {
    Method,
    Header,
    Data,
    User,
    UserAgent,
    Referer,
    Cookie,
}

impl FlagAction {
    pub const ALL: [FlagAction; 7] = [
        FlagAction::Method,
        FlagAction::Header,
        FlagAction::Data,
        FlagAction::User,
        FlagAction::UserAgent,
        FlagAction::Referer,
        FlagAction::Cookie,
    ];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            FlagAction::Method => &["-X", "--request"],
            FlagAction::Header => &["-H", "--header"],
            FlagAction::Data => &["-d", "--data", "--data-raw", "--data-binary"],
            FlagAction::User => &["-u", "--user"],
            FlagAction::UserAgent => &["-A", "--user-agent"],
            FlagAction::Referer => &["-e", "--referer"],
            FlagAction::Cookie => &["-b", "--cookie"],
        }
    }
}

impl FlagHandler for FlagAction {
    fn apply(&self, arg: &str, req: &mut RequestInfo) {
        match self {
            FlagAction::Method => req.method = arg.to_uppercase(),
            FlagAction::Header => parse_header(arg, req),
            FlagAction::Data => {
                parse_data(arg, req);
                if req.method == super::DEFAULT_METHOD {
                    req.method = "POST".into();
                }
            }
            // Not base64-encoded: the credentials are passed through as given.
            FlagAction::User => {
                req.headers
                    .insert("Authorization".into(), format!("Basic {}", arg));
            }
            FlagAction::UserAgent => {
                req.headers.insert("User-Agent".into(), arg.into());
            }
            FlagAction::Referer => {
                req.headers.insert("Referer".into(), arg.into());
            }
            FlagAction::Cookie => {
                req.headers.insert("Cookie".into(), arg.into());
            }
        }
    }
}

/// Maps every alias of a flag to the handler consuming its argument.
#[derive(Clone)]
pub struct FlagTable {
    handlers: HashMap<String, Arc<dyn FlagHandler>>,
}

impl FlagTable {
    /// A table that recognizes no flags at all.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` under each of `aliases`, replacing any previous
    /// handler for the same alias.
    pub fn register<H>(&mut self, aliases: &[&str], handler: H) -> &mut Self
    where
        H: FlagHandler + 'static,
    {
        let handler: Arc<dyn FlagHandler> = Arc::new(handler);
        for alias in aliases {
            self.handlers.insert((*alias).to_string(), Arc::clone(&handler));
        }
        self
    }

    pub fn get(&self, flag: &str) -> Option<&dyn FlagHandler> {
        self.handlers.get(flag).map(|handler| handler.as_ref())
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.handlers.contains_key(flag)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for FlagTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for action in FlagAction::ALL {
            table.register(action.aliases(), action);
        }
        table
    }
}

impl fmt::Debug for FlagTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        flags.sort_unstable();
        f.debug_struct("FlagTable").field("flags", &flags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[test]
    fn test_default_table_has_every_alias() {
        let table = FlagTable::default();
        let aliases: usize = FlagAction::ALL.iter().map(|a| a.aliases().len()).sum();
        assert_eq!(table.len(), aliases);
        for flag in ["-X", "--request", "-H", "--data-binary", "-u", "-A", "-e", "--cookie"] {
            assert!(table.contains(flag), "missing flag {}", flag);
        }
        for flag in ["--location", "-k", "--compressed", "-L"] {
            assert!(!table.contains(flag), "unexpected flag {}", flag);
        }
    }

    #[rstest]
    #[case(FlagAction::Method, "patch", "PATCH")]
    #[case(FlagAction::Method, "Delete", "DELETE")]
    fn test_method_action(#[case] action: FlagAction, #[case] arg: &str, #[case] expected: &str) {
        let mut req = RequestInfo::default();
        action.apply(arg, &mut req);
        assert_eq!(req.method, expected);
    }

    #[rstest]
    #[case(FlagAction::User, "Authorization", "Basic alice:secret")]
    #[case(FlagAction::UserAgent, "User-Agent", "alice:secret")]
    #[case(FlagAction::Referer, "Referer", "alice:secret")]
    #[case(FlagAction::Cookie, "Cookie", "alice:secret")]
    fn test_header_actions(#[case] action: FlagAction, #[case] header: &str, #[case] expected: &str) {
        let mut req = RequestInfo::default();
        action.apply("alice:secret", &mut req);
        assert_eq!(req.headers.get(header).map(String::as_str), Some(expected));
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn test_data_action_keeps_explicit_method() {
        let mut req = RequestInfo::default();
        FlagAction::Data.apply("a=1", &mut req);
        assert_eq!(req.method, "POST");

        let mut req = RequestInfo::default();
        FlagAction::Method.apply("put", &mut req);
        FlagAction::Data.apply("a=1", &mut req);
        assert_eq!(req.method, "PUT");
    }

    #[test]
    fn test_register_closure() {
        let mut table = FlagTable::empty();
        assert!(table.is_empty());
        table.register(&["--oauth2-bearer"], |arg: &str, req: &mut RequestInfo| {
            req.headers
                .insert("Authorization".into(), format!("Bearer {}", arg));
        });

        let mut req = RequestInfo::default();
        table.get("--oauth2-bearer").unwrap().apply("t0k3n", &mut req);
        assert_eq!(req.headers["Authorization"], "Bearer t0k3n");
        assert!(table.get("-H").is_none());
    }

    #[test]
    fn test_register_overrides_alias() {
        let mut table = FlagTable::default();
        table.register(&["-u"], FlagAction::Cookie);

        let mut req = RequestInfo::default();
        table.get("-u").unwrap().apply("k=v", &mut req);
        assert_eq!(req.headers["Cookie"], "k=v");
        assert!(!req.headers.contains_key("Authorization"));
    }
}
