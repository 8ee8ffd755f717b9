use serde::Deserialize;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 8;
const LOGIN_EMAIL_DOMAIN: &str = "phone.careerlog.app";

#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub phone: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub consent: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub phone: String,
    pub password: String,
}

/// Local rejections. Messages are shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthValidationError {
    #[error("올바른 휴대폰 번호를 입력해 주세요.")]
    InvalidPhone,

    #[error("비밀번호는 8자 이상이며 영문과 숫자를 모두 포함해야 합니다.")]
    PasswordPolicy,

    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,

    #[error("개인정보 수집 및 이용에 동의해 주세요.")]
    ConsentRequired,

    #[error("비밀번호를 입력해 주세요.")]
    MissingPassword,
}

/// Strips separators and validates a Korean mobile number (`010-1234-5678`).
pub fn normalize_phone(raw: &str) -> Result<String, AuthValidationError> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, '-' | ' ' | '.'))
        .collect();
    let valid = digits.chars().all(|c| c.is_ascii_digit())
        && (10..=11).contains(&digits.len())
        && digits.starts_with("01")
        && matches!(digits.as_bytes()[2], b'0' | b'1' | b'6' | b'7' | b'8' | b'9');
    if valid {
        Ok(digits)
    } else {
        Err(AuthValidationError::InvalidPhone)
    }
}

/// The provider is email-keyed; phone numbers map onto a synthetic address.
pub fn login_email(phone_digits: &str) -> String {
    format!("{phone_digits}@{LOGIN_EMAIL_DOMAIN}")
}

pub fn check_password_policy(password: &str) -> Result<(), AuthValidationError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        Err(AuthValidationError::PasswordPolicy)
    }
}

/// Validates a sign-up form. Returns the normalized phone digits.
pub fn validate_sign_up(req: &SignUpRequest) -> Result<String, AuthValidationError> {
    let phone = normalize_phone(&req.phone)?;
    check_password_policy(&req.password)?;
    if req.password != req.password_confirm {
        return Err(AuthValidationError::PasswordMismatch);
    }
    if !req.consent {
        return Err(AuthValidationError::ConsentRequired);
    }
    Ok(phone)
}

pub fn validate_sign_in(req: &SignInRequest) -> Result<String, AuthValidationError> {
    let phone = normalize_phone(&req.phone)?;
    if req.password.is_empty() {
        return Err(AuthValidationError::MissingPassword);
    }
    Ok(phone)
}
