//! Session token claims issued after a successful OTP verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::PhoneNumber;

/// Claims structure for the session JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (normalized phone number)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl SessionClaims {
    /// Creates claims for a phone number verified at `now`
    pub fn for_phone(
        phone_number: &PhoneNumber,
        now: DateTime<Utc>,
        lifetime: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            sub: phone_number.value().to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_for_phone() {
        let phone = PhoneNumber::create("+237612345678").unwrap();
        let now = Utc::now();
        let claims = SessionClaims::for_phone(&phone, now, Duration::minutes(15), "ilon", "ilon-api");

        assert_eq!(claims.sub, "+237612345678");
        assert_eq!(claims.exp - claims.iat, 900);
        assert_eq!(claims.iss, "ilon");
        assert!(Uuid::parse_str(&claims.jti).is_ok());
        assert_eq!(claims.expires_at().unwrap().timestamp(), claims.exp);
    }
}
