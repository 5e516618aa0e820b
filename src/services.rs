use actix_web::{
    dev::ServiceRequest,
    error::ErrorUnauthorized,
    get, post,
    web::{self, Data, Json, Path},
    Error, HttpResponse, Responder,
};
use actix_web_httpauth::{extractors::bearer::BearerAuth, middleware::HttpAuthentication};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::JwtError;
use crate::jwt::{mint, Claims};

pub struct AppState {
    jwt_secret: String,
    api_key_digest: Vec<u8>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        AppState {
            jwt_secret: config.jwt_secret.clone(),
            api_key_digest: Sha256::digest(config.api_key.as_bytes()).to_vec(),
        }
    }

    // Compare digests so the check does not short-circuit on a key prefix.
    fn accepts(&self, presented: &str) -> bool {
        Sha256::digest(presented.as_bytes()).as_slice() == self.api_key_digest.as_slice()
    }
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub exp: i64,
}

async fn validate_api_key(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let accepted = req
        .app_data::<Data<AppState>>()
        .map(|state| state.accepts(credentials.token()))
        .unwrap_or(false);

    if accepted {
        Ok(req)
    } else {
        warn!("rejected token request to {}: bad API key", req.path());
        Err((ErrorUnauthorized("invalid API key"), req))
    }
}

fn issue(state: &AppState, claims: &Claims) -> Result<HttpResponse, JwtError> {
    let token = mint(claims, &state.jwt_secret)?;
    let exp = token.expires_at();
    info!("issued token, exp={exp}");
    Ok(HttpResponse::Ok().json(TokenResponse {
        token: token.into_string(),
        exp,
    }))
}

#[post("")]
pub async fn mint_token(
    state: Data<AppState>,
    body: Json<Claims>,
) -> Result<HttpResponse, JwtError> {
    issue(&state, &body)
}

#[post("/{subject}")]
pub async fn mint_subject_token(
    state: Data<AppState>,
    subject: Path<String>,
) -> Result<HttpResponse, JwtError> {
    let mut claims = Claims::new();
    claims.insert("sub".to_owned(), Value::from(subject.into_inner()));
    issue(&state, &claims)
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/token")
            .wrap(HttpAuthentication::bearer(validate_api_key))
            .service(mint_token)
            .service(mint_subject_token),
    );
}
