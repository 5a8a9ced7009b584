//! Upstream credential handling.
//!
//! The proxy handler never reads process state directly. It is handed a
//! [`CredentialSource`] at construction and resolves it once per request.

use std::fmt;

/// A resolved, non-blank upstream API key.
///
/// `Debug` is redacted so the key cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from raw text. Blank values yield `None`.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The key, for use in the upstream request header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Where the credential comes from.
#[derive(Clone)]
pub enum CredentialSource {
    /// Read the named environment variable on every request, so a changed
    /// value takes effect without a restart.
    Env(String),
    /// A fixed value, or none.
    Fixed(Option<Credential>),
}

impl CredentialSource {
    /// Source backed by an environment variable.
    pub fn env(var: impl Into<String>) -> Self {
        Self::Env(var.into())
    }

    /// Source backed by a fixed value. Blank values behave as missing.
    pub fn fixed(raw: &str) -> Self {
        Self::Fixed(Credential::new(raw))
    }

    /// Source that never yields a credential.
    pub fn none() -> Self {
        Self::Fixed(None)
    }

    /// Resolve the current credential, if any.
    pub fn resolve(&self) -> Option<Credential> {
        match self {
            Self::Env(var) => std::env::var(var).ok().and_then(|v| Credential::new(&v)),
            Self::Fixed(credential) => credential.clone(),
        }
    }

    /// Whether a credential is currently available.
    pub fn is_present(&self) -> bool {
        self.resolve().is_some()
    }

    /// Human-readable origin, safe to log.
    pub fn describe(&self) -> String {
        match self {
            Self::Env(var) => format!("env:{}", var),
            Self::Fixed(_) => "fixed".to_string(),
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(var) => f.debug_tuple("Env").field(var).finish(),
            Self::Fixed(c) => f.debug_tuple("Fixed").field(c).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_missing() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   \n\t").is_none());
        assert!(CredentialSource::fixed("  ").resolve().is_none());
        assert!(!CredentialSource::none().is_present());
    }

    #[test]
    fn test_value_is_trimmed() {
        let credential = Credential::new("  sk-ant-test \n").unwrap();
        assert_eq!(credential.expose(), "sk-ant-test");
    }

    #[test]
    fn test_debug_is_redacted() {
        let source = CredentialSource::fixed("sk-ant-secret");
        let rendered = format!("{:?}", source);
        assert!(!rendered.contains("sk-ant-secret"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_env_source_reads_on_every_resolve() {
        let var = "CANOPY_TEST_CREDENTIAL_ENV_SOURCE";
        let source = CredentialSource::env(var);

        std::env::remove_var(var);
        assert!(source.resolve().is_none());

        std::env::set_var(var, "sk-first");
        assert_eq!(source.resolve().unwrap().expose(), "sk-first");

        std::env::set_var(var, "sk-second");
        assert_eq!(source.resolve().unwrap().expose(), "sk-second");

        std::env::remove_var(var);
        assert_eq!(source.describe(), format!("env:{}", var));
    }
}
