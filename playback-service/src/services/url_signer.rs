// Signed playable URLs - HMAC-SHA256 over asset key + expiration
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Mints expiring, tamper-evident playable URLs.
#[derive(Clone)]
pub struct UrlSigner {
    secret: String,
    domain: String,
}

impl UrlSigner {
    pub fn new(secret: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            domain: domain.into(),
        }
    }

    /// Format: `https://{domain}/{asset_key}?exp={timestamp}&sig={hmac_hex}`
    pub fn sign(&self, asset_key: &str, ttl_seconds: u64) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(format!("Time error: {}", e)))?
            .as_secs();

        let expiration = now + ttl_seconds;
        let payload = format!("{}:{}", asset_key, expiration);
        let signature = self.compute_signature(&payload)?;

        Ok(format!(
            "https://{}/{}?exp={}&sig={}",
            self.domain, asset_key, expiration, signature
        ))
    }

    /// Verify signature and expiration of a previously minted URL.
    pub fn verify(&self, url: &str) -> Result<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| AppError::ValidationError(format!("Invalid URL: {}", e)))?;

        let exp = parsed
            .query_pairs()
            .find(|(k, _)| k == "exp")
            .ok_or_else(|| AppError::ValidationError("Missing exp parameter".into()))?
            .1
            .parse::<u64>()
            .map_err(|_| AppError::ValidationError("Invalid exp format".into()))?;

        let provided_sig = parsed
            .query_pairs()
            .find(|(k, _)| k == "sig")
            .ok_or_else(|| AppError::ValidationError("Missing sig parameter".into()))?
            .1
            .to_string();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(format!("Time error: {}", e)))?
            .as_secs();

        if now > exp {
            return Err(AppError::ValidationError("URL expired".into()));
        }

        let asset_key = parsed
            .path()
            .strip_prefix('/')
            .ok_or_else(|| AppError::ValidationError("Invalid path".into()))?;

        let payload = format!("{}:{}", asset_key, exp);
        let expected_sig = self.compute_signature(&payload)?;

        if provided_sig != expected_sig {
            return Err(AppError::ValidationError("Invalid signature".into()));
        }

        Ok(())
    }

    fn compute_signature(&self, payload: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| AppError::Internal(format!("HMAC error: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
