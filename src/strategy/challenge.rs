//! `WWW-Authenticate` challenge rendering (RFC 6750 §3)

use crate::types::DEFAULT_REALM;

/// Renders bearer challenges for a fixed realm and scope
///
/// Field values are inserted verbatim between double quotes. Callers must not
/// pass values containing `"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeBuilder {
    realm: String,
    scope: Vec<String>,
}

impl Default for ChallengeBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_REALM, Vec::new())
    }
}

impl ChallengeBuilder {
    /// Create a builder; an empty realm falls back to `"Users"`
    pub fn new(realm: impl Into<String>, scope: Vec<String>) -> Self {
        let realm = realm.into();
        let realm = if realm.is_empty() {
            DEFAULT_REALM.to_string()
        } else {
            realm
        };
        Self { realm, scope }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// Render a challenge
    ///
    /// `error`, `error_description` and `error_uri` are emitted only for
    /// non-empty values, always in that order after `realm` and `scope`.
    pub fn render(&self, code: Option<&str>, description: Option<&str>, uri: Option<&str>) -> String {
        let mut challenge = format!("Bearer realm=\"{}\"", self.realm);

        if !self.scope.is_empty() {
            push_param(&mut challenge, "scope", &self.scope.join(" "));
        }

        for (name, value) in [
            ("error", code),
            ("error_description", description),
            ("error_uri", uri),
        ] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                push_param(&mut challenge, name, value);
            }
        }

        challenge
    }
}

fn push_param(challenge: &mut String, name: &str, value: &str) {
    challenge.push_str(", ");
    challenge.push_str(name);
    challenge.push_str("=\"");
    challenge.push_str(value);
    challenge.push('"');
}
