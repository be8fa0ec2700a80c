//! HTTP adapter - server-rendered pages and JSON endpoints.
//!
//! - `middleware` - session cookie and authorization gates
//! - `pages` / `resources` - route handlers delegating to application handlers
//! - `views` - HTML rendering
//! - `dto` - form and JSON shapes

pub mod dto;
pub mod middleware;
mod pages;
mod resources;
mod routes;
mod state;
pub mod views;

pub use middleware::{CookieSigner, SessionManager};
pub use routes::app_router;
pub use state::{AppState, BackendPorts};
