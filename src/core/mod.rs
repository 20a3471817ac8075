//! Core infrastructure module for Pure Rust ID3.
//!
//! This module provides the foundational components shared by the rest of
//! the crate:
//!
//! - [`types`]: Fundamental data types and enumerations
//! - [`constants`]: System constants and configuration defaults
//! - [`error`]: Error type and result alias
//!
//! ```rust
//! use id3_rust::core::{
//!     types::{CategoryValue, EngineState},
//!     constants::DEFAULT_EPSILON,
//!     error::{Result, Id3Error},
//! };
//!
//! let code: CategoryValue = 3;
//! assert_eq!(EngineState::default(), EngineState::Untrained);
//! assert!(DEFAULT_EPSILON > 0.0);
//! # let _ = code;
//! ```

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{Id3Error, Result};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the logging subsystem.
///
/// Honors `RUST_LOG` when set and falls back to `info` otherwise. Calling
/// this more than once, or after the host application installed its own
/// logger, is harmless.
pub fn initialize_core() -> Result<()> {
    if CORE_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let env = env_logger::Env::default().default_filter_or("info");
    // Another logger may already be installed by the host application.
    let _ = env_logger::Builder::from_env(env).try_init();

    log::debug!("id3-rust {} core initialized", ID3_RUST_VERSION);
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_initialization() {
        assert!(initialize_core().is_ok());
        assert!(is_core_initialized());
        // Second call is a no-op
        assert!(initialize_core().is_ok());
    }

    #[test]
    fn test_module_reexports() {
        let _error: Id3Error = Id3Error::config("test");
        let _value: CategoryValue = 42;
        let _stage: Stage = 1;
        let _constant = DEFAULT_TARGET_COLUMN;
    }
}
