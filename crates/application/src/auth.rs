//! Credential Gate
//!
//! Checks the single shared operator credential pair carried in an HTTP
//! `Authorization: Basic ...` header. The check is stateless: each request is
//! judged on its own header only.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use feedback_desk_common::AuthConfig;
use std::fmt;
use subtle::ConstantTimeEq;

const BASIC_SCHEME: &str = "Basic";

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// No header, or a scheme other than Basic
    MissingHeader,
    /// The header was Basic but the pair did not decode or did not match
    InvalidCredentials,
}

impl RejectReason {
    /// Message returned to the client.
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::MissingHeader => "Missing Authorization Header",
            RejectReason::InvalidCredentials => "Invalid Credentials",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Authorized,
    Unauthorized(RejectReason),
}

impl GateDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GateDecision::Authorized)
    }
}

/// The configured credential pair.
#[derive(Clone)]
pub struct CredentialGate {
    username: String,
    password: String,
    realm: String,
}

impl CredentialGate {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            realm: realm.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.username, &config.password, &config.realm)
    }

    /// Value for the `WWW-Authenticate` response header.
    pub fn challenge(&self) -> String {
        format!("{} realm=\"{}\"", BASIC_SCHEME, self.realm)
    }

    /// Judge a raw `Authorization` header value.
    pub fn check(&self, header: Option<&str>) -> GateDecision {
        let Some(payload) = header.and_then(basic_payload) else {
            return GateDecision::Unauthorized(RejectReason::MissingHeader);
        };

        match decode_pair(payload) {
            Some((username, password)) if self.matches(&username, &password) => {
                GateDecision::Authorized
            }
            _ => GateDecision::Unauthorized(RejectReason::InvalidCredentials),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        // Evaluate both comparisons so timing does not reveal which one failed
        let user_ok = username.as_bytes().ct_eq(self.username.as_bytes());
        let pass_ok = password.as_bytes().ct_eq(self.password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

impl fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialGate")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("realm", &self.realm)
            .finish()
    }
}

/// Payload after a case-insensitive `Basic ` scheme, or `None`.
fn basic_payload(header: &str) -> Option<&str> {
    let (scheme, payload) = header.trim_start().split_once(' ')?;
    scheme
        .eq_ignore_ascii_case(BASIC_SCHEME)
        .then_some(payload.trim())
}

/// Decode `base64(username:password)`, splitting on the first colon.
fn decode_pair(payload: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(payload).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let (username, password) = text.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Build an `Authorization` header value for the given pair.
pub fn basic_authorization(username: &str, password: &str) -> String {
    format!(
        "{} {}",
        BASIC_SCHEME,
        STANDARD.encode(format!("{}:{}", username, password))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gate() -> CredentialGate {
        CredentialGate::new("admin", "s3cret:with:colons", "Restricted Area")
    }

    #[test]
    fn test_accepts_matching_pair() {
        let header = basic_authorization("admin", "s3cret:with:colons");
        assert_eq!(gate().check(Some(&header)), GateDecision::Authorized);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let header = basic_authorization("admin", "s3cret:with:colons").replacen("Basic", "bAsIc", 1);
        assert!(gate().check(Some(&header)).is_authorized());
    }

    #[test]
    fn test_missing_or_foreign_scheme() {
        let missing = GateDecision::Unauthorized(RejectReason::MissingHeader);
        assert_eq!(gate().check(None), missing);
        assert_eq!(gate().check(Some("")), missing);
        assert_eq!(gate().check(Some("Bearer abc.def")), missing);
        assert_eq!(gate().check(Some("Basic")), missing);
    }

    #[test]
    fn test_invalid_credentials() {
        let invalid = GateDecision::Unauthorized(RejectReason::InvalidCredentials);
        let g = gate();
        assert_eq!(g.check(Some(&basic_authorization("admin", "wrong"))), invalid);
        assert_eq!(g.check(Some(&basic_authorization("Admin", "s3cret:with:colons"))), invalid);
        assert_eq!(g.check(Some("Basic !!!not-base64")), invalid);
        // Decodes fine but carries no colon
        assert_eq!(g.check(Some(&format!("Basic {}", STANDARD.encode("admin")))), invalid);
        assert_eq!(g.check(Some("Basic ")), invalid);
    }

    #[test]
    fn test_challenge_names_realm() {
        assert_eq!(gate().challenge(), "Basic realm=\"Restricted Area\"");
        assert_eq!(RejectReason::MissingHeader.to_string(), "Missing Authorization Header");
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", gate());
        assert!(!rendered.contains("s3cret"));
    }

    proptest! {
        #[test]
        fn test_only_the_configured_pair_passes(user in "[a-z]{1,8}", pass in "[ -~]{0,16}") {
            let g = CredentialGate::new("admin", "hunter2", "r");
            let decision = g.check(Some(&basic_authorization(&user, &pass)));
            prop_assert_eq!(decision.is_authorized(), user == "admin" && pass == "hunter2");
        }
    }
}
