//! Error types.
//!
//! Only conditions that a caller can legitimately run into at runtime are
//! reported through `Error`: a failing random source, or bad data coming
//! from outside (configuration strings, untrusted coordinates, zero
//! private scalars). Misuse of the arithmetic API (mixing elements of
//! different fields, dividing by zero) is a programming error and panics
//! instead. A signature that does not verify is not an error either; the
//! verification functions simply return `false`.

use thiserror::Error;

/// Result type for curve and ECDSA operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for curve and ECDSA operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The random source failed to produce bytes.
    #[error("random number generation failed: {0}")]
    Rng(#[from] rand_core::Error),

    /// A configuration parameter is not a hexadecimal integer.
    #[error("invalid curve parameter {field}: {value:?} is not a hexadecimal integer")]
    InvalidHex {
        field: &'static str,
        value: String,
    },

    /// The curve parameters fail a basic consistency check.
    #[error("invalid curve parameters: {0}")]
    InvalidParameters(&'static str),

    /// Affine coordinates do not satisfy the curve equation.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// A private scalar is zero modulo the curve order.
    #[error("scalar is zero modulo the curve order")]
    ZeroScalar,

    /// A public key is the point-at-infinity.
    #[error("public key is the point-at-infinity")]
    InfinityPublicKey,
}
