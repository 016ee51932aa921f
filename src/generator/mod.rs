//! Password generation
//!
//! Builds the character pool for a request, draws duplicate-free candidates
//! that cover every enabled class, and retries against the shared store until
//! an unissued password comes up.

pub mod pool;
pub mod space;
mod unique;

pub use pool::CharacterPool;
pub use space::password_space;
pub use unique::{generate_unique_password, PasswordGenerator};
