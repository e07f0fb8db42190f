/// Viewer token verification
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Viewer ID
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued at
}

#[derive(Clone)]
pub struct TokenVerifier {
    secret: String,
}

impl TokenVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("invalid id token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret-key-min-32-chars-long!!!";

    fn make_token(sub: &str, exp_offset_secs: i64, secret: &str) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64;

        let claims = Claims {
            sub: sub.to_string(),
            iat: now as usize,
            exp: (now + exp_offset_secs) as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .expect("Failed to encode JWT")
    }

    #[test]
    fn test_valid_token_yields_claims() {
        let verifier = TokenVerifier::new(SECRET);
        let claims = verifier.verify(&make_token("u1", 3600, SECRET)).unwrap();
        assert_eq!(claims.sub, "u1");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let result = verifier.verify(&make_token("u1", -100, SECRET));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_wrong_signature_is_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        let forged = make_token("u1", 3600, "wrong-secret-key!!!!!!!!!!!!!!!");
        assert!(matches!(
            verifier.verify(&forged),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let verifier = TokenVerifier::new(SECRET);
        assert!(matches!(
            verifier.verify("invalid.token.format"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
