use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque token tying one attempt's start and submit calls together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionIdentity(String);

impl SessionIdentity {
    /// Wrap a token. Returns `None` for an empty or blank token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used in report file names.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((i, _)) => &self.0[..i],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of client-side session tokens.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Where the controller gets a session identity from on `start()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// `POST start` on the scoring service.
    #[default]
    Service,
    /// The controller's `IdGenerator`.
    Local,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_rejected() {
        assert!(SessionIdentity::new("").is_none());
        assert!(SessionIdentity::new("   ").is_none());
        assert!(SessionIdentity::new("abc").is_some());
    }

    #[test]
    fn short_takes_eight_chars() {
        let id = SessionIdentity::new("0123456789abcdef").unwrap();
        assert_eq!(id.short(), "01234567");
        let tiny = SessionIdentity::new("abc").unwrap();
        assert_eq!(tiny.short(), "abc");
    }

    #[test]
    fn uuid_generator_yields_distinct_tokens() {
        let g = UuidGenerator;
        assert_ne!(g.generate(), g.generate());
    }
}
