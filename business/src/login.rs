//! Credential login against `admin/login`.

use chrono::Duration;
use log::{error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ApiClient, ApiEnvelope, ApiError, CallOptions, Session, SessionUser};

pub const LOGIN_ENDPOINT: &str = "admin/login";

/// Input state for the login form.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), LoginError> {
        if self.username.trim().is_empty() {
            return Err(LoginError::MissingUsername);
        }
        if self.password.is_empty() {
            return Err(LoginError::MissingPassword);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Username is required")]
    MissingUsername,
    #[error("Password is required")]
    MissingPassword,
    /// The backend answered but refused the credentials.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "userName")]
    user_name: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    user: SessionUser,
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// Result/status of authentication, as shown by the front ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    NotAuthenticated,
    Authenticating,
    Authenticated {
        username: String,
        token: Option<String>,
    },
    Failed(String),
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username, .. } => Some(username.as_str()),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated { token, .. } => token.as_deref(),
            _ => None,
        }
    }

    pub fn from_session(session: &Session) -> Self {
        Self::Authenticated {
            username: session.user.user_name.clone(),
            token: Some(session.access_token.clone()),
        }
    }
}

/// Exchanges credentials for a session and stores it in the client's session store.
pub async fn login(client: &ApiClient, input: &LoginInput) -> Result<Session, LoginError> {
    input.validate()?;
    info!("Logging in as {}", input.username.trim());

    let request = LoginRequest {
        user_name: input.username.trim(),
        password: &input.password,
    };
    let envelope: ApiEnvelope<LoginResult> = client
        .call(LOGIN_ENDPOINT, CallOptions::post(&request)?.anonymous())
        .await
        .inspect_err(|e| error!("Login request failed: {e}"))?;

    let result = match envelope.result {
        Some(result) if envelope.success => result,
        _ => {
            let message = envelope
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Login failed".to_owned());
            error!("Login rejected: {message}");
            return Err(LoginError::Rejected(message));
        }
    };

    let ttl = Duration::from_std(client.config().session_ttl).unwrap_or(Duration::hours(24));
    let session = Session {
        access_token: result.access_token,
        user: result.user,
        expires_at: client.sessions().clock().now() + ttl,
    };
    client.sessions().set(session.clone());
    Ok(session)
}

/// Destroys the current session.
pub fn logout(client: &ApiClient) {
    client.sessions().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_both_fields() {
        assert_eq!(
            LoginInput::new("  ", "pw").validate(),
            Err(LoginError::MissingUsername)
        );
        assert_eq!(
            LoginInput::new("admin", "").validate(),
            Err(LoginError::MissingPassword)
        );
        assert_eq!(LoginInput::new("admin", "pw").validate(), Ok(()));
    }

    #[test]
    fn auth_status_default_is_not_authenticated() {
        let status = AuthStatus::default();
        assert!(!status.is_authenticated());
        assert!(status.username().is_none());
        assert!(status.token().is_none());
    }

    #[test]
    fn auth_status_authenticated_exposes_user_and_token() {
        let status = AuthStatus::Authenticated {
            username: "admin".to_owned(),
            token: Some("t".to_owned()),
        };
        assert!(status.is_authenticated());
        assert_eq!(status.username(), Some("admin"));
        assert_eq!(status.token(), Some("t"));
    }

    #[test]
    fn auth_status_failed_is_not_authenticated() {
        let status = AuthStatus::Failed("Invalid credentials".to_owned());
        assert!(!status.is_authenticated());
        assert!(status.username().is_none());
    }

    #[test]
    fn login_request_uses_wire_names() {
        let request = LoginRequest {
            user_name: "admin",
            password: "pw",
        };
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            serde_json::json!({"userName": "admin", "password": "pw"})
        );
    }
}
