// SPDX-FileCopyrightText: 2026 Sentria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HMAC-SHA256 signed session tokens.
//!
//! Token format: `base64url(claims_json) + "." + base64url(hmac_sha256)`,
//! both segments unpadded. Claims carry a random session id, the user id
//! the token was issued for, and issue/expiry timestamps. Verification is
//! constant-time on the signature (the hmac crate's `verify_slice`).

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sentria_core::SentriaError;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Random session id, one per issued token.
    pub sid: String,
    /// User id the token authorizes.
    pub uid: i64,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

/// Issues and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct SessionSigner {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("secret", &"[redacted]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl SessionSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs: ttl_secs as i64,
        }
    }

    /// Issues a fresh token for the given user. Returns the session id and
    /// the serialized token.
    pub fn issue(&self, user_id: i64) -> Result<(String, String), SentriaError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sid: Uuid::new_v4().to_string(),
            uid: user_id,
            iat: now,
            exp: now + self.ttl_secs,
        };
        let payload = serde_json::to_vec(&claims)
            .map_err(|e| SentriaError::Internal(format!("serializing claims: {e}")))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(&payload);
        let sig_b64 = URL_SAFE_NO_PAD.encode(self.sign(payload_b64.as_bytes())?);
        Ok((claims.sid, format!("{payload_b64}.{sig_b64}")))
    }

    /// Verifies a serialized token: signature, shape, and expiry. Returns
    /// the claims on success.
    pub fn verify(&self, token: &str) -> Result<Claims, SentriaError> {
        let (payload_b64, sig_b64) = token
            .split_once('.')
            .ok_or_else(|| SentriaError::Unauthorized("malformed session token".to_string()))?;
        let sig = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| SentriaError::Unauthorized("malformed token signature".to_string()))?;

        let mut mac = self.mac()?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&sig)
            .map_err(|_| SentriaError::Unauthorized("invalid token signature".to_string()))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| SentriaError::Unauthorized("malformed token payload".to_string()))?;
        let claims: Claims = serde_json::from_slice(&payload)
            .map_err(|_| SentriaError::Unauthorized("malformed token claims".to_string()))?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(SentriaError::Unauthorized("session token expired".to_string()));
        }
        Ok(claims)
    }

    /// Extracts and verifies a token from an `Authorization` header value.
    pub fn verify_bearer(&self, header: &str) -> Result<Claims, SentriaError> {
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| SentriaError::Unauthorized("missing bearer token".to_string()))?;
        self.verify(token.trim())
    }

    fn mac(&self) -> Result<HmacSha256, SentriaError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| SentriaError::Internal(format!("hmac init: {e}")))
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SentriaError> {
        let mut mac = self.mac()?;
        mac.update(data);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}
