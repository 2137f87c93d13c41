mod health;
mod url;

pub use health::health_handler;
pub use url::{redirect_handler, shorten_handler, stats_handler};
