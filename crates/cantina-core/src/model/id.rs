// ── Core identity types ──
//
// ResourceId is the one identifier every cached entity exposes. Identities
// are assigned by the server and never minted client-side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque server-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An entity held in a store's collection cache.
///
/// Cache patching (update, delete, current-item tracking) compares
/// identities only, never contents.
pub trait Resource: Clone + Send + Sync + 'static {
    fn id(&self) -> &ResourceId;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_string() {
        let id = ResourceId::from("c-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"c-42\"");
        let back: ResourceId = serde_json::from_str("\"c-42\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_is_raw_value() {
        assert_eq!(ResourceId::new("abc").to_string(), "abc");
    }
}
