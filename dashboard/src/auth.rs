//! HTTP Basic Authentication gate.
//!
//! Every dashboard request must carry `Authorization: Basic <base64>` with
//! the configured username and password. There are no sessions: the check
//! runs on each request.
//!
//! Credentials are compared as keyed HMAC-SHA256 digests using the MAC's
//! constant-time verification, so response timing does not reveal how much
//! of a guess matched.

use axum::{
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::fmt;

use crate::config::AuthConfig;

type HmacSha256 = Hmac<Sha256>;

/// A username/password pair taken from an `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Parse an `Authorization` header value of the form `Basic <base64>`.
    ///
    /// The scheme is case-insensitive and the password may itself contain
    /// `:`; only the first colon separates it from the username.
    pub fn parse(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Extract credentials from request headers, if present and well formed.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        Self::parse(value)
    }

    /// Encode as an `Authorization` header value.
    pub fn to_header_value(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {encoded}")
    }
}

/// Verifies credentials against the single configured pair.
pub struct BasicAuthGate {
    key: [u8; 32],
    username_digest: Vec<u8>,
    password_digest: Vec<u8>,
    challenge: HeaderValue,
}

impl BasicAuthGate {
    /// Build a gate for the configured credentials.
    ///
    /// The HMAC key is random per process; digests are never persisted.
    pub fn new(config: &AuthConfig) -> Self {
        let mut key = [0u8; 32];
        rand::rng().fill(&mut key[..]);

        let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", config.realm))
            .unwrap_or_else(|_| HeaderValue::from_static("Basic"));

        Self {
            key,
            username_digest: digest(&key, &config.username),
            password_digest: digest(&key, &config.password),
            challenge,
        }
    }

    /// Check a credential pair. Both fields are always compared.
    pub fn verify(&self, credentials: &Credentials) -> bool {
        let username_ok = matches_digest(&self.key, &credentials.username, &self.username_digest);
        let password_ok = matches_digest(&self.key, &credentials.password, &self.password_digest);
        username_ok & password_ok
    }

    /// Check the credentials carried by a request.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Credentials, AuthFailure> {
        let credentials = Credentials::from_headers(headers).ok_or(AuthFailure::Missing)?;
        if self.verify(&credentials) {
            Ok(credentials)
        } else {
            Err(AuthFailure::Rejected {
                username: credentials.username,
            })
        }
    }

    /// `401 Unauthorized` response asking the client for Basic credentials.
    pub fn challenge(&self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, self.challenge.clone())],
            "Invalid credentials",
        )
            .into_response()
    }
}

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// No `Authorization` header, or one that is not valid Basic auth.
    Missing,
    /// Well-formed credentials that do not match.
    Rejected { username: String },
}

fn digest(key: &[u8], value: &str) -> Vec<u8> {
    match HmacSha256::new_from_slice(key) {
        Ok(mut mac) => {
            mac.update(value.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        Err(_) => Vec::new(),
    }
}

fn matches_digest(key: &[u8], value: &str, expected: &[u8]) -> bool {
    let mut mac = match HmacSha256::new_from_slice(key) {
        Ok(mac) => mac,
        Err(_) => return false,
    };

    mac.update(value.as_bytes());
    mac.verify_slice(expected).is_ok()
}
