use axum::http::StatusCode;
use thiserror::Error;

/// Provider failures, reduced to the messages we show users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("phone number already registered")]
    AlreadyRegistered,

    #[error("invalid phone number or password")]
    InvalidCredentials,

    #[error("too many attempts")]
    TooManyAttempts,

    #[error("password rejected by provider")]
    WeakPassword,

    #[error("unrecognised provider error: {0}")]
    Unknown(String),
}

impl CredentialError {
    /// Maps an Identity Toolkit error message (e.g. `"WEAK_PASSWORD : Password should be..."`).
    pub fn from_provider_code(message: &str) -> Self {
        let code = message
            .split(|c: char| c == ':' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        match code {
            "EMAIL_EXISTS" => CredentialError::AlreadyRegistered,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS"
            | "USER_DISABLED" | "INVALID_EMAIL" => CredentialError::InvalidCredentials,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => CredentialError::TooManyAttempts,
            "WEAK_PASSWORD" => CredentialError::WeakPassword,
            _ => CredentialError::Unknown(message.to_string()),
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            CredentialError::AlreadyRegistered => "이미 가입된 전화번호입니다.",
            CredentialError::InvalidCredentials => "전화번호 또는 비밀번호가 올바르지 않습니다.",
            CredentialError::TooManyAttempts => {
                "시도 횟수가 너무 많습니다. 잠시 후 다시 시도해 주세요."
            }
            CredentialError::WeakPassword => "비밀번호가 너무 약합니다.",
            CredentialError::Unknown(_) => "인증 중 오류가 발생했습니다. 다시 시도해 주세요.",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CredentialError::AlreadyRegistered => "ALREADY_REGISTERED",
            CredentialError::InvalidCredentials => "INVALID_CREDENTIALS",
            CredentialError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            CredentialError::WeakPassword => "WEAK_PASSWORD",
            CredentialError::Unknown(_) => "AUTH_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CredentialError::AlreadyRegistered => StatusCode::CONFLICT,
            CredentialError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            CredentialError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            CredentialError::WeakPassword => StatusCode::BAD_REQUEST,
            CredentialError::Unknown(_) => StatusCode::BAD_GATEWAY,
        }
    }
}
