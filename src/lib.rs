pub mod config;
pub mod error;
pub mod jwt;
pub mod services;

pub use error::{ConfigError, JwtError, JwtResult};
pub use jwt::{encode, encode_at, encode_claims, generate_jwt, mint, mint_at, Claims, Token};
