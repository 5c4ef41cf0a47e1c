//! HTTP implementation of the backend port.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::domain::{DeclarationCode, EnrollmentSecret, VerificationCode};
use crate::error::{AuthError, Result};
use crate::store::SessionStore;

use super::backend::AuthBackend;
use super::types::{AccountStatus, DeclarationRequest, Envelope, LoginRequest, SessionGrant};

/// Response header carrying a rotated access token when the current one
/// nears expiry. Adopted into the session store whenever present.
const REFRESH_TOKEN_HEADER: &str = "X-Refresh-Token";

pub struct HttpBackend {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpBackend {
    pub fn new(base_url: String, session: Arc<SessionStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.session.access_token().ok_or(AuthError::MissingToken)?;
        Ok(request.bearer_auth(token))
    }

    /// Pick up a rotated token if the server sent one.
    fn adopt_refreshed_token(&self, header: Option<&HeaderValue>) {
        let Some(value) = header else {
            return;
        };
        match value.to_str() {
            Ok(token) => {
                debug!("adopting refreshed access token");
                if let Err(err) = self.session.set_access_token(token.to_string()) {
                    warn!(error = %err, "failed to persist refreshed token");
                }
            }
            Err(_) => warn!("ignoring non-ASCII refresh token header"),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<Envelope<T>> {
        self.adopt_refreshed_token(response.headers().get(REFRESH_TOKEN_HEADER));
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AuthBackend for HttpBackend {
    async fn account_status(&self) -> Result<AccountStatus> {
        let response = self.client.get(self.url("/first")).send().await?;
        let envelope: Envelope<AccountStatus> = self.decode(response).await?;

        match envelope.data {
            Some(status) if envelope.result => Ok(status),
            _ => Err(AuthError::MalformedResponse(
                "account status missing from response".to_string(),
            )
            .into()),
        }
    }

    async fn verify_declaration_code(&self, code: &DeclarationCode) -> Result<bool> {
        let response = self
            .client
            .post(self.url("/declaration"))
            .json(&DeclarationRequest {
                code: code.as_str(),
            })
            .send()
            .await?;
        let envelope: Envelope<bool> = self.decode(response).await?;

        Ok(envelope.result && envelope.data == Some(true))
    }

    async fn bind_totp(
        &self,
        code: &VerificationCode,
        secret: &EnrollmentSecret,
    ) -> Result<Option<SessionGrant>> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest {
                code: code.as_str(),
                google_secret_key: Some(secret.as_str()),
            })
            .send()
            .await?;
        let envelope: Envelope<SessionGrant> = self.decode(response).await?;

        if !envelope.result {
            debug!(msg = envelope.msg.as_deref().unwrap_or(""), "bind rejected");
            return Ok(None);
        }
        match envelope.data {
            Some(grant) => Ok(Some(grant)),
            None => Err(AuthError::MalformedResponse(
                "login accepted but no credential returned".to_string(),
            )
            .into()),
        }
    }

    async fn verify_totp(&self, code: &VerificationCode) -> Result<Option<SessionGrant>> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&LoginRequest {
                code: code.as_str(),
                google_secret_key: None,
            })
            .send()
            .await?;
        let envelope: Envelope<SessionGrant> = self.decode(response).await?;

        if !envelope.result {
            debug!(
                msg = envelope.msg.as_deref().unwrap_or(""),
                "verification rejected"
            );
            return Ok(None);
        }
        match envelope.data {
            Some(grant) => Ok(Some(grant)),
            None => Err(AuthError::MalformedResponse(
                "login accepted but no credential returned".to_string(),
            )
            .into()),
        }
    }

    async fn user_profile(&self) -> Result<Option<serde_json::Value>> {
        let request = self.bearer(self.client.get(self.url("/user/info")))?;
        let response = request.send().await?;
        let envelope: Envelope<serde_json::Value> = self.decode(response).await?;

        if envelope.result {
            Ok(envelope.data)
        } else {
            Ok(None)
        }
    }

    async fn logout(&self) -> Result<()> {
        let request = self.bearer(self.client.post(self.url("/logout")))?;
        request.send().await?.error_for_status()?;
        Ok(())
    }
}
