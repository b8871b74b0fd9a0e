//! Word-suggestion engine for the hex on-screen keyboard.
//!
//! Prefix completions ranked by corpus frequency and learned usage, plus
//! the macro slots that share the same per-user config document. The
//! window-focus and keystroke-injection side of the keyboard lives
//! elsewhere; this crate is a pure data/query service.

mod engine;
mod error;
pub mod fetch;
mod loader;
pub mod paths;
pub mod trace_init;

pub use engine::{EngineConfig, LexiconStats, SuggestEngine};
pub use error::EngineError;
pub use paths::DataPaths;

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
