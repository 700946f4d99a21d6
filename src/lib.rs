// src/lib.rs - Library interface for internal module access

pub mod constants;
pub mod data_input;
pub mod extract;
pub mod json_output;
pub mod time_align;
pub mod types;

// Expose the crate version, preferring a git-derived semver when the build
// environment injects one.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
