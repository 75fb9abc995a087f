//! JWT authentication and route guards.
//!
//! A web layer runs [`authenticate`] (or [`AuthContext::from_header`]) on every request,
//! then calls the guard each route needs before touching the models:
//!
//! ```ignore
//! let keys = TokenKeys::from_config(&config);
//! let ctx = AuthContext::from_header(headers.get("authorization"), &keys);
//!
//! ctx.require_admin()?;                 // POST /companies
//! ctx.require_self_or_admin(&username)?; // PATCH /users/:username
//! ```
//!
//! Guard failures are [`JoblyError::Unauthorized`](crate::JoblyError::Unauthorized).

mod guard;
mod token;


pub use guard::{
    AuthContext, AuthOutcome, authenticate, require_admin, require_logged_in,
    require_self_or_admin,
};
pub use token::{Claims, TokenKeys};
