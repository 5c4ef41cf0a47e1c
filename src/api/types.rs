//! Wire types for the panel backend.

use serde::{Deserialize, Serialize};

/// Response envelope used by every backend operation.
///
/// `result == false` is an explicit rejection; transport and decode problems
/// surface as errors instead.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub result: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// Server-sourced snapshot driving flow branching, fetched once per mount.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AccountStatus {
    /// No TOTP secret bound to the account yet.
    pub is_first_use: bool,
    /// Declaration code previously verified for this account.
    #[serde(rename = "is_declaration")]
    pub is_declaration_accepted: bool,
}

/// Credential returned after a successful code check.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionGrant {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Whether the session is already linked to the downstream messaging
    /// identity. Decides post-login routing.
    #[serde(default)]
    pub is_bind: bool,
}

/// Body for the login operation. `google_secret_key` is present only on the
/// first-time bind path.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_secret_key: Option<&'a str>,
}

/// Body for the declaration-code verification operation.
#[derive(Debug, Serialize)]
pub struct DeclarationRequest<'a> {
    pub code: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_status_uses_server_field_names() {
        let status: AccountStatus =
            serde_json::from_str(r#"{"is_first_use": true, "is_declaration": false}"#).unwrap();
        assert!(status.is_first_use);
        assert!(!status.is_declaration_accepted);
    }

    #[test]
    fn grant_defaults_unbound() {
        let grant: SessionGrant =
            serde_json::from_str(r#"{"access_token": "jwt", "token_type": "Bearer"}"#).unwrap();
        assert_eq!(grant.access_token, "jwt");
        assert!(!grant.is_bind);
    }

    #[test]
    fn login_request_omits_absent_secret() {
        let body = serde_json::to_string(&LoginRequest {
            code: "123456",
            google_secret_key: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"code":"123456"}"#);

        let body = serde_json::to_string(&LoginRequest {
            code: "123456",
            google_secret_key: Some("ABCDEFGHIJKLMNOP"),
        })
        .unwrap();
        assert!(body.contains("google_secret_key"));
    }

    #[test]
    fn envelope_tolerates_null_data() {
        let envelope: Envelope<SessionGrant> =
            serde_json::from_str(r#"{"result": false, "data": null, "msg": "bad code"}"#).unwrap();
        assert!(!envelope.result);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.msg.as_deref(), Some("bad code"));
    }
}
