//! Identity provider seam.
//!
//! Default: `HttpIdentityProvider`, the Identity Toolkit REST API
//! (`accounts:signUp`, `accounts:signInWithPassword`). `AppState` holds an
//! `Arc<dyn IdentityProvider>`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::auth::credentials::CredentialError;

pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Namespace for account ids derived from provider uids. Changing it orphans every stored record.
const USER_ID_NAMESPACE: Uuid = Uuid::from_u128(0x4c0e_9a7d_31b2_5f08_9d6e_2a41_c3b7_e590);

/// Account id used by every other route, derived from the provider's `localId`.
/// The same provider uid always yields the same id.
pub fn user_id_for(provider_uid: &str) -> Uuid {
    Uuid::new_v5(&USER_ID_NAMESPACE, provider_uid.as_bytes())
}

/// Successful `accounts:*` response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderSession {
    local_id: String,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    #[serde(default)]
    expires_in: String,
}

/// Session returned to the client after sign-up or sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// Pass as `user_id` to the experience, story and report routes.
    pub user_id: Uuid,
    pub provider_uid: String,
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
}

impl From<ProviderSession> for AuthSession {
    fn from(session: ProviderSession) -> Self {
        AuthSession {
            user_id: user_id_for(&session.local_id),
            provider_uid: session.local_id,
            id_token: session.id_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, CredentialError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, CredentialError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpIdentityProvider {
    pub fn new(endpoint: String, api_key: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn post(&self, action: &str, email: &str, password: &str) -> Result<AuthSession, CredentialError> {
        let url = format!("{}/accounts:{action}", self.endpoint);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| CredentialError::Unknown(format!("identity provider unreachable: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CredentialError::Unknown(e.to_string()))?;

        if !status.is_success() {
            warn!("Identity provider {action} returned {status}");
            return Err(parse_error_body(&body));
        }

        debug!("Identity provider {action} succeeded");
        parse_session_body(&body)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, CredentialError> {
        self.post("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, CredentialError> {
        self.post("signInWithPassword", email, password).await
    }
}

fn parse_session_body(body: &str) -> Result<AuthSession, CredentialError> {
    serde_json::from_str::<ProviderSession>(body)
        .map(AuthSession::from)
        .map_err(|e| CredentialError::Unknown(format!("unexpected provider response: {e}")))
}

fn parse_error_body(body: &str) -> CredentialError {
    serde_json::from_str::<ProviderError>(body)
        .map(|e| CredentialError::from_provider_code(&e.error.message))
        .unwrap_or_else(|_| CredentialError::Unknown(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        assert_eq!(parse_error_body(body), CredentialError::AlreadyRegistered);
        assert!(matches!(parse_error_body("<html>"), CredentialError::Unknown(_)));
    }

    const SIGN_UP_BODY: &str = r#"{"kind":"identitytoolkit#SignupNewUserResponse",
        "localId":"tRcfmLH7o2XrNHEkEz9ZMrWrFr82","idToken":"tok","refreshToken":"ref",
        "expiresIn":"3600"}"#;

    #[test]
    fn test_session_from_provider_payload() {
        let session = parse_session_body(SIGN_UP_BODY).unwrap();
        assert_eq!(session.provider_uid, "tRcfmLH7o2XrNHEkEz9ZMrWrFr82");
        assert_eq!(session.user_id, user_id_for("tRcfmLH7o2XrNHEkEz9ZMrWrFr82"));
        assert_eq!(session.id_token, "tok");
        assert_eq!(session.expires_in, "3600");

        let out = serde_json::to_value(&session).unwrap();
        assert_eq!(out["userId"], session.user_id.to_string());
        assert!(matches!(
            parse_session_body(r#"{"idToken":"tok"}"#),
            Err(CredentialError::Unknown(_))
        ));
    }

    #[test]
    fn test_user_id_is_stable_per_provider_uid() {
        assert_eq!(user_id_for("abc"), user_id_for("abc"));
        assert_ne!(user_id_for("abc"), user_id_for("abd"));
        assert_eq!(user_id_for("abc").get_version_num(), 5);
    }

    #[test]
    fn test_session_user_id_accepted_by_organize_request() {
        use crate::organizer::handlers::OrganizeRequest;

        let session = parse_session_body(SIGN_UP_BODY).unwrap();
        let req: OrganizeRequest = serde_json::from_value(serde_json::json!({
            "user_id": session.user_id.to_string(),
            "query": "",
        }))
        .unwrap();
        assert_eq!(req.user_id, session.user_id);
    }
}
