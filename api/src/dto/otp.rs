use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ilon_core::services::otp::{OtpIssued, OtpVerification, PHONE_REQUIRED_MESSAGE};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    /// Cameroon (`+237XXXXXXXXX`) or other international number; spaces,
    /// hyphens and parentheses are accepted and stripped
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub phone_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub phone_number: String,

    /// The code received out of band
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl From<OtpIssued> for SendOtpResponse {
    fn from(issued: OtpIssued) -> Self {
        Self {
            message: issued.message,
            expires_at: issued.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub is_valid: bool,
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl From<OtpVerification> for VerifyOtpResponse {
    fn from(verification: OtpVerification) -> Self {
        Self {
            is_valid: verification.is_valid,
            token: verification.token,
            error: verification.error_message,
        }
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut error = validator::ValidationError::new("required");
        error.message = Some(PHONE_REQUIRED_MESSAGE.into());
        return Err(error);
    }
    Ok(())
}

/// Flatten validator output into the plain message list used by `ErrorResponse`
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .map(|e| {
            e.message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string())
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages
}
