//! Session token service implementation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use ilon_shared::JwtConfig;

use crate::domain::entities::SessionClaims;
use crate::domain::value_objects::PhoneNumber;
use crate::errors::{DomainError, DomainResult, TokenError};

/// Signs session tokens for verified phone numbers
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
    issuer: String,
    audience: String,
}

/// Longest accepted session lifetime (30 days)
pub const MAX_SESSION_EXPIRY_SECONDS: i64 = 30 * 86_400;

impl SessionTokenService {
    /// Creates a new token service from JWT settings
    ///
    /// An empty secret or a lifetime outside `1..=MAX_SESSION_EXPIRY_SECONDS`
    /// is a configuration error.
    pub fn new(config: &JwtConfig) -> DomainResult<Self> {
        if config.secret.trim().is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if config.session_expiry_seconds <= 0 {
            return Err(DomainError::Configuration {
                message: "Session expiry must be positive".to_string(),
            });
        }
        if config.session_expiry_seconds > MAX_SESSION_EXPIRY_SECONDS {
            return Err(DomainError::Configuration {
                message: format!(
                    "Session expiry must not exceed {} seconds",
                    MAX_SESSION_EXPIRY_SECONDS
                ),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            lifetime: Duration::seconds(config.session_expiry_seconds),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        })
    }

    /// Issues a signed session token for `phone`
    pub fn issue(&self, phone: &PhoneNumber) -> DomainResult<String> {
        let claims = SessionClaims::for_phone(
            phone,
            Utc::now(),
            self.lifetime,
            &self.issuer,
            &self.audience,
        );
        self.encode_jwt(&claims)
    }

    fn encode_jwt(&self, claims: &SessionClaims) -> DomainResult<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| DomainError::Token(TokenError::GenerationFailed(e.to_string())))
    }

    /// Verifies a session token and returns its claims
    pub fn validate(&self, token: &str) -> DomainResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::Expired)
                } else {
                    DomainError::Token(TokenError::Invalid(e.to_string()))
                }
            })?;

        Ok(token_data.claims)
    }
}
