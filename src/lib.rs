//! Item board: one list shared by every visitor, and one list per visitor
//! kept in a signed session cookie.

pub mod config;
pub mod http;
pub mod items;
pub mod lifecycle;
pub mod observability;
pub mod session;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
