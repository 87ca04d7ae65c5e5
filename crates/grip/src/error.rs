#![forbid(unsafe_code)]

//! Unified error type for the facade.
//!
//! Resizing itself never fails: declined inputs are reported on dispatch
//! records and capture failures are swallowed. Errors only arise at the
//! edges, when hosts decode options or drive pointer capture directly.

use grip_core::ConfigError;
use grip_web::CaptureError;

/// Top-level error type for grip hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Resize options could not be decoded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Host pointer capture failed.
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Standard result type for grip APIs.
pub type Result<T> = std::result::Result<T, Error>;
