// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session authentication and agent gating middleware.
//!
//! Sessions are issued by the backend's auth service. The console only
//! verifies them and forwards the raw token so that row-level security on the
//! backend applies to every query made on the operator's behalf.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie the frontend stores the session access token in.
pub const SESSION_COOKIE: &str = "sb-access-token";

/// Audience of sessions for signed-in users.
pub const SESSION_AUDIENCE: &str = "authenticated";

/// Metadata object carried in session tokens.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
}

/// Session token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: usize,
    pub aud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub app_metadata: UserMetadata,
}

impl Claims {
    /// `user_type` from user metadata, falling back to app metadata.
    pub fn user_type(&self) -> Option<String> {
        self.user_metadata
            .user_type
            .clone()
            .or_else(|| self.app_metadata.user_type.clone())
            .filter(|t| !t.is_empty())
    }
}

/// Authenticated operator extracted from the session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    /// Role from token metadata, if present
    pub user_type: Option<String>,
    /// Raw session token, forwarded to the backend
    pub access_token: String,
}

/// Verify a session token and build the operator it belongs to.
pub fn verify_session(token: &str, secret: &[u8]) -> Result<AuthUser, AppError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[SESSION_AUDIENCE]);

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "Session token rejected");
        AppError::InvalidToken
    })?;

    let claims = token_data.claims;
    if claims.sub.is_empty() {
        return Err(AppError::InvalidToken);
    }

    Ok(AuthUser {
        user_type: claims.user_type(),
        id: claims.sub,
        email: claims.email,
        access_token: token.to_string(),
    })
}

fn session_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    // Try cookie first, then header
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// True when the client is a browser navigating to a page.
fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|h| h.to_str().ok())
        .and_then(|accept| accept.split(',').next())
        .is_some_and(|first| first.trim().starts_with("text/html"))
}

/// Middleware that requires a valid session.
///
/// Browsers are sent to the login page; API clients get a 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let result = match session_token(&jar, request.headers()) {
        Some(token) => verify_session(&token, &state.config.jwt_secret),
        None => Err(AppError::Unauthorized),
    };

    match result {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(_) if wants_html(request.headers()) => {
            let login = format!("{}/login", state.config.frontend_url.trim_end_matches('/'));
            tracing::debug!(path = %request.uri().path(), "Redirecting unauthenticated browser to login");
            // 303 See Other
            Redirect::to(&login).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// Middleware that admits only operators with the agent role.
///
/// Must run after [`require_auth`].
pub async fn require_agent(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.roles.is_agent(&state.backend, &user).await? {
        tracing::warn!(user_id = %user.id, "Non-agent denied access to agent area");
        return Err(AppError::Forbidden(
            "Only agents can access this resource".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
