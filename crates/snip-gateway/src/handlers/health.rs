/// Liveness probe; answers `ok` as plain text.
pub async fn health_handler() -> &'static str {
    "ok"
}
