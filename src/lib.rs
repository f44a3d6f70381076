//! Swcurve is a Rust library for arithmetic over short Weierstraß
//! elliptic curves, and ECDSA signatures over them.
//!
//! This library implements computations in prime fields, and on elliptic
//! curves of equation `y^2 = x^3 + a*x + b` over such fields, with a
//! convenient API so that field elements may be used in straightforward
//! expressions with normal arithmetic operators. Curves are not types:
//! their parameters are chosen at runtime, either as integers
//! (`Curve::new()`) or as hexadecimal strings (`Curve::from_params()`,
//! see the `params` module). Curve secp256k1 is predefined
//! (`Curve::secp256k1()`).
//!
//! Field elements are implemented in the `field` module, on top of the
//! arbitrary-precision integers of the `num-bigint` crate. Points (in
//! affine coordinates, with a dedicated point-at-infinity) are in
//! `point`. The group law and scalar multiplication are implemented by
//! the `Curve` structure in `curve`. ECDSA key generation, signature
//! generation and verification are in `ecdsa`.
//!
//! # Usage
//!
//! ```
//! use swcurve::{Curve, KeyPair, OsRng};
//!
//! let curve = Curve::secp256k1();
//! let kp = KeyPair::generate(&curve, &mut OsRng).unwrap();
//! let sig = kp.private.sign(&curve, b"hello", &mut OsRng).unwrap();
//! assert!(kp.public.verify(&curve, b"hello", &sig));
//! assert!(!kp.public.verify(&curve, b"hollo", &sig));
//! ```
//!
//! By default, the `os-rng` feature is enabled, which re-exports the
//! operating system random source as `OsRng`. Any other implementation
//! of `CryptoRng + RngCore` can be used in its place.
//!
//! # Conventions
//!
//! Operations which can fail because of bad external data (parameter
//! strings, untrusted coordinates, a failing random source) return a
//! `Result` with the `Error` type defined in `error`. Misuse of the
//! arithmetic API, such as combining elements of two distinct fields,
//! or dividing by zero, is a bug in the caller and leads to a panic.
//! Signature verification does not fail: it returns `true` or `false`.
//!
//! This code is NOT constant-time. Timing of all operations, including
//! signature generation, depends on the values of secret scalars. It is
//! meant for experimentation, education and tests, not for protecting
//! secrets against an attacker who can measure execution time.

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

#[cfg(feature = "os-rng")]
pub use rand_core::OsRng;

pub use num_bigint::BigUint;

pub mod error;
pub mod field;
pub mod point;
pub mod params;
pub mod curve;
pub mod ecdsa;

pub use error::{Error, Result};
pub use field::FieldElement;
pub use point::Point;
pub use params::CurveParams;
pub use curve::Curve;
pub use ecdsa::{KeyPair, PrivateKey, PublicKey, Signature};
