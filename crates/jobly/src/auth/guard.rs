use super::token::{Claims, TokenKeys};
use crate::error::{JoblyError, JoblyResult};

/// Result of reading the `Authorization` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A valid token; its payload becomes the request identity.
    Authenticated(Claims),
    /// No header was sent.
    NoCredential,
    /// A header was sent but the token did not verify.
    InvalidCredential(String),
}

impl AuthOutcome {
    pub fn user(&self) -> Option<&Claims> {
        match self {
            Self::Authenticated(claims) => Some(claims),
            _ => None,
        }
    }

    /// The identity to attach to the request. Both failure kinds mean "anonymous".
    pub fn into_user(self) -> Option<Claims> {
        match self {
            Self::Authenticated(claims) => Some(claims),
            _ => None,
        }
    }
}

/// Verify a `Bearer <token>` header value.
///
/// Never fails: a missing or bad token leaves the request anonymous and the later guards
/// decide whether that matters.
pub fn authenticate(header: Option<&str>, keys: &TokenKeys) -> AuthOutcome {
    let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) else {
        return AuthOutcome::NoCredential;
    };

    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .unwrap_or(header)
        .trim();

    if token.is_empty() {
        tracing::debug!(target: "jobly.auth", "empty bearer token");
        return AuthOutcome::InvalidCredential("empty token".to_string());
    }

    match keys.verify(token) {
        Ok(claims) => AuthOutcome::Authenticated(claims),
        Err(err) => {
            tracing::debug!(target: "jobly.auth", error = %err, "rejected bearer token");
            AuthOutcome::InvalidCredential(err.to_string())
        }
    }
}

/// Require any authenticated identity.
pub fn require_logged_in(user: Option<&Claims>) -> JoblyResult<&Claims> {
    user.ok_or_else(|| JoblyError::unauthorized("Login required"))
}

/// Require an authenticated admin.
pub fn require_admin(user: Option<&Claims>) -> JoblyResult<&Claims> {
    match user {
        Some(claims) if claims.is_admin => Ok(claims),
        _ => Err(JoblyError::unauthorized("Admin required")),
    }
}

/// Require that the identity is `username` itself, or an admin.
pub fn require_self_or_admin<'a>(
    user: Option<&'a Claims>,
    username: &str,
) -> JoblyResult<&'a Claims> {
    match user {
        Some(claims) if claims.username == username || claims.is_admin => Ok(claims),
        _ => Err(JoblyError::unauthorized(format!("Must be {username} or an admin"))),
    }
}

/// Request-scoped identity, built once per request by [`AuthContext::from_header`].
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<Claims>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_header(header: Option<&str>, keys: &TokenKeys) -> Self {
        Self {
            user: authenticate(header, keys).into_user(),
        }
    }

    pub fn user(&self) -> Option<&Claims> {
        self.user.as_ref()
    }

    pub fn require_logged_in(&self) -> JoblyResult<&Claims> {
        require_logged_in(self.user())
    }

    pub fn require_admin(&self) -> JoblyResult<&Claims> {
        require_admin(self.user())
    }

    pub fn require_self_or_admin(&self, username: &str) -> JoblyResult<&Claims> {
        require_self_or_admin(self.user(), username)
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self { user: Some(claims) }
    }
}
