//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span)
//!     → handlers.rs (shared list or session list)
//!     → views.rs (HTML page)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;
pub mod views;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
