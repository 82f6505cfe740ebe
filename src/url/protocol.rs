use serde::Serialize;

/// The URL schemes a request can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    HTTPS,
    HTTP,
}

impl Schema {
    pub fn name(&self) -> &'static str {
        match self {
            Schema::HTTPS => "https",
            Schema::HTTP => "http",
        }
    }

    /// The literal a URL of this schema starts with, e.g. `https://`.
    pub fn prefix(&self) -> &'static str {
        match self {
            Schema::HTTPS => "https://",
            Schema::HTTP => "http://",
        }
    }

    /// Returns the schema `token` starts with. Matching is case-sensitive.
    pub fn detect(token: &str) -> Option<Self> {
        [Schema::HTTPS, Schema::HTTP]
            .into_iter()
            .find(|schema| token.starts_with(schema.prefix()))
    }
}

impl TryFrom<&str> for Schema {
    type Error = ();

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "https" => Ok(Schema::HTTPS),
            "http" => Ok(Schema::HTTP),
            _ => Err(()),
        }
    }
}

/// A token is a URL iff it begins with `http://` or `https://`.
pub fn is_url(token: &str) -> bool {
    Schema::detect(token).is_some()
}
