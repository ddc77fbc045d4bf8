//! OTP issuance and verification

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::entities::OtpEntry;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{DomainError, DomainResult};
use crate::services::token::SessionTokenService;

use super::config::OtpServiceConfig;
use super::generator;
use super::traits::{OtpStoreTrait, RateLimiterTrait};
use super::types::{ConsumeOutcome, OtpIssued, OtpVerification};

pub const PHONE_REQUIRED_MESSAGE: &str = "Phone number is required";
pub const INVALID_PHONE_MESSAGE: &str =
    "Invalid phone number format. Use international format (e.g., +237XXXXXXXXX)";
pub const INVALID_CODE_MESSAGE: &str = "Invalid or expired code";

/// Issues one-time passwords and checks them back.
///
/// The service owns no state of its own: the outstanding codes live in the
/// store and the issuance counters in the rate limiter, both chosen by the
/// composition root.
pub struct OtpService {
    store: Arc<dyn OtpStoreTrait>,
    limiter: Arc<dyn RateLimiterTrait>,
    tokens: Arc<SessionTokenService>,
    config: OtpServiceConfig,
}

impl OtpService {
    pub fn new(
        store: Arc<dyn OtpStoreTrait>,
        limiter: Arc<dyn RateLimiterTrait>,
        tokens: Arc<SessionTokenService>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            store,
            limiter,
            tokens,
            config,
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Store backing this service, exposed for readiness checks
    pub fn store(&self) -> &Arc<dyn OtpStoreTrait> {
        &self.store
    }

    /// Issue a fresh code for `raw_phone`.
    ///
    /// Any code still outstanding for the same number is replaced. The code
    /// itself is never returned: delivery happens out of band.
    pub async fn issue(&self, raw_phone: &str) -> DomainResult<OtpIssued> {
        let phone = parse_phone(raw_phone)?;
        let masked = phone.masked();

        self.check_issuance_limit(&phone).await?;

        let ttl = chrono::Duration::from_std(self.config.ttl).map_err(|e| DomainError::Internal {
            message: format!("OTP TTL out of range: {}", e),
        })?;
        let code = generator::generate_with(self.config.code_length);
        let entry = OtpEntry::new(phone.clone(), code, Utc::now(), ttl);

        self.store.set(&entry, self.config.ttl).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Failed to store OTP"
            );
            DomainError::from(e)
        })?;

        if self.config.log_codes {
            tracing::debug!(phone = %masked, code = entry.code.as_str(), "Issued OTP");
        }

        tracing::info!(
            phone = %masked,
            expires_at = %entry.expires_at,
            event = "otp_sent",
            "OTP issued"
        );

        Ok(OtpIssued {
            message: format!(
                "OTP sent to {}. Valid for {} minutes.",
                phone,
                self.config.ttl_minutes()
            ),
            phone_number: phone,
            issued_at: entry.issued_at,
            expires_at: entry.expires_at,
        })
    }

    /// Check `submitted` against the outstanding code for `raw_phone`.
    ///
    /// An invalid phone number is an error. Every other failure is reported
    /// as `is_valid = false` with the same message, whether the code was
    /// never issued, expired, already used, wrong, or out of attempts.
    pub async fn verify(&self, raw_phone: &str, submitted: &str) -> DomainResult<OtpVerification> {
        let phone = parse_phone(raw_phone)?;
        let masked = phone.masked();
        let submitted = submitted.trim();

        if !generator::is_valid_format(submitted, self.config.code_length.get()) {
            tracing::info!(
                phone = %masked,
                event = "otp_rejected",
                reason = "malformed",
                "OTP verification failed"
            );
            return Ok(OtpVerification::rejected(INVALID_CODE_MESSAGE));
        }

        let outcome = self
            .store
            .consume(&phone, submitted, self.config.max_attempts)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %masked,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to check OTP"
                );
                DomainError::from(e)
            })?;

        match outcome {
            ConsumeOutcome::Matched => {
                let token = self.tokens.issue(&phone)?;
                tracing::info!(phone = %masked, event = "otp_verified", "OTP verified");
                Ok(OtpVerification::accepted(token))
            }
            ConsumeOutcome::Mismatched { remaining_attempts } => {
                tracing::info!(
                    phone = %masked,
                    remaining_attempts,
                    event = "otp_rejected",
                    reason = "mismatch",
                    "OTP verification failed"
                );
                Ok(OtpVerification::rejected(INVALID_CODE_MESSAGE))
            }
            ConsumeOutcome::Exhausted => {
                tracing::warn!(
                    phone = %masked,
                    event = "otp_attempts_exhausted",
                    "OTP discarded after too many wrong guesses"
                );
                Ok(OtpVerification::rejected(INVALID_CODE_MESSAGE))
            }
            ConsumeOutcome::Absent => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_rejected",
                    reason = "absent",
                    "OTP verification failed"
                );
                Ok(OtpVerification::rejected(INVALID_CODE_MESSAGE))
            }
        }
    }

    async fn check_issuance_limit(&self, phone: &PhoneNumber) -> DomainResult<()> {
        if self.config.issuance_limit == 0 {
            return Ok(());
        }

        let usage = self
            .limiter
            .hit(&phone.issuance_key(), self.config.issuance_window)
            .await?;

        if usage.count > self.config.issuance_limit {
            let retry_after_seconds = whole_seconds(usage.resets_in);
            tracing::warn!(
                phone = %phone.masked(),
                count = usage.count,
                retry_after_seconds,
                event = "otp_rate_limited",
                "OTP issuance limit exceeded"
            );
            return Err(DomainError::RateLimited { retry_after_seconds });
        }

        Ok(())
    }
}

/// Validate and normalize a raw phone number
pub fn parse_phone(raw: &str) -> DomainResult<PhoneNumber> {
    if raw.trim().is_empty() {
        return Err(DomainError::validation(PHONE_REQUIRED_MESSAGE));
    }
    PhoneNumber::create(raw).ok_or_else(|| DomainError::validation(INVALID_PHONE_MESSAGE))
}

/// Rounds up to whole seconds, never below one
fn whole_seconds(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}
