use serde::{Deserialize, Serialize};

/// Prefix marking a credential that names an environment variable instead
/// of carrying the secret itself.
pub const ENV_INDIRECTION_PREFIX: &str = "env:";

/// A service credential as stored in the preference set.
///
/// Invariant: a value carrying the `env:` indirection prefix is never sent
/// as a literal bearer token. Resolving the indirection to a real secret
/// is the display layer's job; on the request path an unresolved
/// indirection simply means an unauthenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Credential {
    None,
    Literal(String),
    EnvRef(String),
}

impl Credential {
    /// Parse the flat string form the store keeps: empty means no auth,
    /// `env:NAME` is an indirection, anything else is a literal secret.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Credential::None;
        }
        match trimmed.strip_prefix(ENV_INDIRECTION_PREFIX) {
            Some(name) => Credential::EnvRef(name.to_string()),
            None => Credential::Literal(trimmed.to_string()),
        }
    }

    /// The `Authorization` header value for this credential, if any.
    pub fn bearer(&self) -> Option<String> {
        match self {
            Credential::Literal(secret) => Some(format!("Bearer {}", secret)),
            Credential::None | Credential::EnvRef(_) => None,
        }
    }

    /// Round-trip back to the flat string form. The settings UI displays
    /// and edits the indirection string itself, not the resolved secret.
    pub fn as_pref_value(&self) -> String {
        match self {
            Credential::None => String::new(),
            Credential::Literal(secret) => secret.clone(),
            Credential::EnvRef(name) => format!("{}{}", ENV_INDIRECTION_PREFIX, name),
        }
    }

    /// Resolve through an external lookup. Literals resolve to themselves.
    pub fn resolve_with<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match self {
            Credential::None => None,
            Credential::Literal(secret) => Some(secret.clone()),
            Credential::EnvRef(name) => lookup(name),
        }
    }

    /// Convenience resolver against the process environment.
    pub fn resolve_from_env(&self) -> Option<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_is_none() {
        assert_eq!(Credential::parse(""), Credential::None);
        assert_eq!(Credential::parse("   "), Credential::None);
    }

    #[test]
    fn parse_literal_and_indirection() {
        assert_eq!(
            Credential::parse("sk-test-123"),
            Credential::Literal("sk-test-123".to_string())
        );
        assert_eq!(
            Credential::parse("env:OPENAI_API_KEY"),
            Credential::EnvRef("OPENAI_API_KEY".to_string())
        );
    }

    #[test]
    fn bearer_only_for_literals() {
        assert_eq!(
            Credential::parse("sk-test-123").bearer(),
            Some("Bearer sk-test-123".to_string())
        );
        assert_eq!(Credential::parse("env:OPENAI_API_KEY").bearer(), None);
        assert_eq!(Credential::None.bearer(), None);
    }

    #[test]
    fn pref_value_round_trips() {
        for raw in ["", "sk-test-123", "env:OPENAI_API_KEY"] {
            assert_eq!(Credential::parse(raw).as_pref_value(), raw);
        }
    }

    #[test]
    fn resolve_with_uses_the_lookup_for_indirections() {
        let cred = Credential::parse("env:MY_KEY");
        let resolved = cred.resolve_with(|name| {
            assert_eq!(name, "MY_KEY");
            Some("secret".to_string())
        });
        assert_eq!(resolved, Some("secret".to_string()));

        let cred = Credential::parse("literal-key");
        assert_eq!(
            cred.resolve_with(|_| panic!("literal must not hit the lookup")),
            Some("literal-key".to_string())
        );
    }
}
