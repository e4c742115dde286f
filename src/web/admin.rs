//! Admin login and session gate
//!
//! One shared password from configuration. A successful login hands out
//! an opaque bearer token that expires after the configured TTL. Tokens
//! live in memory only, so a restart logs everyone out.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRef, FromRequestParts, State},
    http::{header, request::Parts, StatusCode},
    Json,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::core::error::{Error, Result};
use crate::web::error::{ApiError, ApiResult};

// =============================================================================
// GATE
// =============================================================================

pub struct AdminGate {
    password: String,
    ttl: Duration,
    sessions: RwLock<HashMap<String, Instant>>,
}

/// Issued on successful login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl AdminGate {
    pub fn new(password: impl Into<String>, ttl: Duration) -> Self {
        Self {
            password: password.into(),
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Login is impossible when no password is configured
    pub fn enabled(&self) -> bool {
        !self.password.is_empty()
    }

    pub fn login(&self, password: &str) -> Result<Session> {
        if !self.enabled() || !constant_time_eq(password.as_bytes(), self.password.as_bytes()) {
            return Err(Error::Unauthorized);
        }

        self.purge_expired();
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.sessions
            .write()
            .insert(token.clone(), Instant::now() + self.ttl);

        Ok(Session {
            token,
            expires_in: self.ttl.as_secs(),
        })
    }

    /// Whether a token belongs to a live session
    pub fn check(&self, token: &str) -> bool {
        let expired = match self.sessions.read().get(token) {
            Some(expires) => *expires <= Instant::now(),
            None => return false,
        };
        if expired {
            self.sessions.write().remove(token);
            return false;
        }
        true
    }

    /// Revoke a token. Returns false if it was not live.
    pub fn logout(&self, token: &str) -> bool {
        self.sessions.write().remove(token).is_some()
    }

    fn purge_expired(&self) {
        let now = Instant::now();
        self.sessions.write().retain(|_, expires| *expires > now);
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.read().len()
    }
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Proof that the request carries a live admin token.
///
/// Add it as a handler argument to make the route admin-only.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    Arc<AdminGate>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> ApiResult<Self> {
        let gate = Arc::<AdminGate>::from_ref(state);
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
        if !gate.check(token) {
            return Err(ApiError::Unauthorized);
        }
        Ok(AdminSession {
            token: token.to_string(),
        })
    }
}

// =============================================================================
// ROUTE HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// POST /api/admin/login
pub async fn api_login(
    State(gate): State<Arc<AdminGate>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<Session>> {
    let Json(request) = payload?;
    match gate.login(&request.password) {
        Ok(session) => {
            info!("admin logged in");
            Ok(Json(session))
        }
        Err(e) => {
            warn!("rejected admin login");
            Err(e.into())
        }
    }
}

/// POST /api/admin/logout
pub async fn api_logout(State(gate): State<Arc<AdminGate>>, session: AdminSession) -> StatusCode {
    gate.logout(&session.token);
    StatusCode::NO_CONTENT
}

/// GET /api/admin/session
pub async fn api_session(_session: AdminSession) -> Json<SessionStatus> {
    Json(SessionStatus {
        authenticated: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_and_check() {
        let gate = AdminGate::new("s3cret", Duration::from_secs(60));
        assert!(gate.login("wrong").is_err());
        assert!(gate.login("s3cre").is_err());

        let session = gate.login("s3cret").unwrap();
        assert_eq!(session.expires_in, 60);
        assert!(gate.check(&session.token));
        assert!(!gate.check("made-up"));

        assert!(gate.logout(&session.token));
        assert!(!gate.check(&session.token));
        assert!(!gate.logout(&session.token));
    }

    #[test]
    fn test_empty_password_disables_login() {
        let gate = AdminGate::new("", Duration::from_secs(60));
        assert!(!gate.enabled());
        assert!(gate.login("").is_err());
    }

    #[test]
    fn test_expired_sessions() {
        let gate = AdminGate::new("pw", Duration::ZERO);
        let session = gate.login("pw").unwrap();
        assert!(!gate.check(&session.token));
        assert_eq!(gate.active_sessions(), 0);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
