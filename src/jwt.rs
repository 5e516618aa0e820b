use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use sha2::Sha256;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{JwtError, JwtResult};

type HmacSha256 = Hmac<Sha256>;

/// Token payload: string keys to arbitrary JSON values.
pub type Claims = Map<String, Value>;

/// Every token expires one hour after it was minted.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, Copy, Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

const HEADER: Header = Header {
    alg: "HS256",
    typ: "JWT",
};

/// A signed compact token together with the claims that were actually signed.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    compact: String,
    claims: Claims,
    expires_at: i64,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.compact
    }

    /// The caller's claims with `exp` stamped in.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Unix seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn into_string(self) -> String {
        self.compact
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact)
    }
}

/// URL-safe base64 without padding.
pub fn base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// HMAC-SHA256 of `message` keyed with the raw bytes of `secret`.
pub fn sign_hs256(secret: &str, message: &str) -> JwtResult<Vec<u8>> {
    if secret.is_empty() {
        return Err(JwtError::EmptySecret);
    }
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| JwtError::Crypto(e.to_string()))?;
    mac.update(message.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Mint a token that expires [`TOKEN_TTL_SECS`] after `now`.
///
/// `claims` is left untouched; any `exp` it carries is replaced in the signed
/// copy. Top-level keys are emitted in sorted order, so equal claim maps
/// always produce byte-identical payloads.
pub fn mint_at(claims: &Claims, secret: &str, now: DateTime<Utc>) -> JwtResult<Token> {
    if secret.is_empty() {
        return Err(JwtError::EmptySecret);
    }

    let expires_at = now.timestamp() + TOKEN_TTL_SECS;
    let mut merged = claims.clone();
    merged.insert("exp".to_owned(), Value::from(expires_at));

    let header_b64 = base64url(serde_json::to_string(&HEADER)?.as_bytes());
    // Sort explicitly: serde_json keeps insertion order under `preserve_order`.
    let sorted: BTreeMap<&str, &Value> = merged.iter().map(|(k, v)| (k.as_str(), v)).collect();
    let payload_b64 = base64url(serde_json::to_string(&sorted)?.as_bytes());
    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = sign_hs256(secret, &signing_input)?;

    debug!(
        "minted HS256 token with {} claim(s), exp={}",
        merged.len(),
        expires_at
    );

    Ok(Token {
        compact: format!("{signing_input}.{}", base64url(&signature)),
        claims: merged,
        expires_at,
    })
}

pub fn mint(claims: &Claims, secret: &str) -> JwtResult<Token> {
    mint_at(claims, secret, Utc::now())
}

pub fn encode_at(claims: &Claims, secret: &str, now: DateTime<Utc>) -> JwtResult<String> {
    mint_at(claims, secret, now).map(Token::into_string)
}

/// `header.payload.signature` for `claims` with `exp = now + 1h`.
pub fn encode(claims: &Claims, secret: &str) -> JwtResult<String> {
    encode_at(claims, secret, Utc::now())
}

/// Encode any serializable claims type. It must serialize to a JSON object.
pub fn encode_claims<T: Serialize>(claims: &T, secret: &str) -> JwtResult<String> {
    match serde_json::to_value(claims)? {
        Value::Object(map) => encode(&map, secret),
        _ => Err(JwtError::ClaimsNotObject),
    }
}

pub fn generate_jwt(subject: &str, secret: &str) -> JwtResult<String> {
    let mut claims = Claims::new();
    claims.insert("sub".to_owned(), Value::from(subject));
    encode(&claims, secret)
}
