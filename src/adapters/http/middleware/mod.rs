//! HTTP middleware and extractors.
//!
//! - `session` - signed session cookie, server-side session load/save
//! - `guards` - `RequireLogin`, `RequireAdmin` and `OptionalUser` extractors

mod guards;
mod session;

pub use guards::{OptionalUser, RequireAdmin, RequireLogin};
pub use session::{session_middleware, CookieSigner, SessionHandle, SessionManager};
