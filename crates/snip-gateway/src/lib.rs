//! HTTP surface of the snip URL shortener.
//!
//! The router exposes the shortener, redirector and stats services over
//! axum; the `snip` binary in `bin/http` wires it to a listener.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::AppError;
pub use state::AppState;
