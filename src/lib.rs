//! Unique Password Generator
//!
//! Generates random passwords from selected character sets. A password never
//! repeats a character, always contains a character of every selected set,
//! and is never handed out twice by the same process.

pub mod cli;
pub mod error;
pub mod generator;
pub mod logging;
pub mod metrics;
pub mod request;
pub mod store;
pub mod types;
pub mod web;

// Re-export commonly used types
pub use error::{PassGenError, Result};
pub use generator::{generate_unique_password, CharacterPool, PasswordGenerator};
pub use metrics::MetricsSnapshot;
pub use store::{InMemoryPasswordStore, PasswordStore};
pub use types::{CharacterClass, GenerationOptions, GeneratorConfig, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
