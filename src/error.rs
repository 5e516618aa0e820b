use actix_web::{http::StatusCode, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("claims could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("claims must serialize to a JSON object")]
    ClaimsNotObject,

    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("crypto error: {0}")]
    Crypto(String),
}

impl JwtError {
    /// Key import or signing failed.
    pub fn is_crypto(&self) -> bool {
        matches!(self, JwtError::EmptySecret | JwtError::Crypto(_))
    }

    /// The claims could not be turned into a JSON object.
    pub fn is_serialization(&self) -> bool {
        matches!(self, JwtError::Serialization(_) | JwtError::ClaimsNotObject)
    }
}

impl ResponseError for JwtError {
    fn status_code(&self) -> StatusCode {
        if self.is_serialization() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub type JwtResult<T> = Result<T, JwtError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("BIND_PORT is not a valid port: {0}")]
    InvalidPort(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(JwtError::EmptySecret.is_crypto());
        assert!(JwtError::Crypto("bad key".into()).is_crypto());
        assert!(JwtError::ClaimsNotObject.is_serialization());
        assert!(!JwtError::ClaimsNotObject.is_crypto());

        let err: JwtError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            JwtError::ClaimsNotObject.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            JwtError::EmptySecret.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::Missing("JWT_SECRET").to_string(),
            "JWT_SECRET must be set"
        );
        assert_eq!(
            ConfigError::InvalidPort("http".into()).to_string(),
            "BIND_PORT is not a valid port: http"
        );
    }
}
