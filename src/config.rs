/// Crate-level constants
pub const ENGINE_NAME: &str = "Tassel";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}
